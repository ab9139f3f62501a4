//! `/cats` handlers

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use agency::BreedValidator;
use shared::{CatId, CatProfile, CreateCatRequest, UpdateCatRequest};

use super::{json_body, parse_id};
use crate::error::ApiResult;
use crate::web::{AgencyStore, AppState};

pub async fn create_cat<S, V>(
    State(state): State<AppState<S, V>>,
    payload: Result<Json<CreateCatRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<CatProfile>)>
where
    S: AgencyStore,
    V: BreedValidator + 'static,
{
    let request = json_body(payload)?;
    let profile = state.cats.create_cat(request).await?;
    Ok((StatusCode::CREATED, Json(profile)))
}

pub async fn list_cats<S, V>(State(state): State<AppState<S, V>>) -> ApiResult<Json<Vec<CatProfile>>>
where
    S: AgencyStore,
    V: BreedValidator + 'static,
{
    Ok(Json(state.cats.list_cats().await?))
}

pub async fn get_cat<S, V>(
    State(state): State<AppState<S, V>>,
    Path(id): Path<String>,
) -> ApiResult<Json<CatProfile>>
where
    S: AgencyStore,
    V: BreedValidator + 'static,
{
    let cat_id: CatId = parse_id(&id, "cat")?;
    Ok(Json(state.cats.get_cat(cat_id).await?))
}

/// Only the salary can change
pub async fn update_cat<S, V>(
    State(state): State<AppState<S, V>>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateCatRequest>, JsonRejection>,
) -> ApiResult<Json<CatProfile>>
where
    S: AgencyStore,
    V: BreedValidator + 'static,
{
    let cat_id: CatId = parse_id(&id, "cat")?;
    let request = json_body(payload)?;
    Ok(Json(state.cats.update_cat(cat_id, request).await?))
}

pub async fn delete_cat<S, V>(
    State(state): State<AppState<S, V>>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode>
where
    S: AgencyStore,
    V: BreedValidator + 'static,
{
    let cat_id: CatId = parse_id(&id, "cat")?;
    state.cats.delete_cat(cat_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
