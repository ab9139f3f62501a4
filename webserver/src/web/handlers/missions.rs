//! `/missions` handlers, including target and assignment sub-resources

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use agency::BreedValidator;
use shared::{
    component_debug, CatId, Component, CreateMissionRequest, Mission, MissionId, TargetId, TargetRequest,
    UpdateMissionRequest, UpdateTargetRequest,
};

use super::{json_body, parse_id};
use crate::error::ApiResult;
use crate::web::{AgencyStore, AppState};

fn parse_mission_id(raw: &str) -> ApiResult<MissionId> {
    parse_id(raw, "mission")
}

pub async fn create_mission<S, V>(
    State(state): State<AppState<S, V>>,
    payload: Result<Json<CreateMissionRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Mission>)>
where
    S: AgencyStore,
    V: BreedValidator + 'static,
{
    let request = json_body(payload)?;
    let mission = state.missions.create_mission(request).await?;
    Ok((StatusCode::CREATED, Json(mission)))
}

pub async fn list_missions<S, V>(State(state): State<AppState<S, V>>) -> ApiResult<Json<Vec<Mission>>>
where
    S: AgencyStore,
    V: BreedValidator + 'static,
{
    Ok(Json(state.missions.list_missions().await?))
}

pub async fn get_mission<S, V>(
    State(state): State<AppState<S, V>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Mission>>
where
    S: AgencyStore,
    V: BreedValidator + 'static,
{
    let mission_id = parse_mission_id(&id)?;
    Ok(Json(state.missions.get_mission(mission_id).await?))
}

pub async fn update_mission<S, V>(
    State(state): State<AppState<S, V>>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateMissionRequest>, JsonRejection>,
) -> ApiResult<Json<Mission>>
where
    S: AgencyStore,
    V: BreedValidator + 'static,
{
    let mission_id = parse_mission_id(&id)?;
    let request = json_body(payload)?;
    Ok(Json(state.missions.update_mission(mission_id, request).await?))
}

pub async fn delete_mission<S, V>(
    State(state): State<AppState<S, V>>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode>
where
    S: AgencyStore,
    V: BreedValidator + 'static,
{
    let mission_id = parse_mission_id(&id)?;
    state.missions.delete_mission(mission_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn assign_cat<S, V>(
    State(state): State<AppState<S, V>>,
    Path((id, cat_id)): Path<(String, String)>,
) -> ApiResult<Json<Mission>>
where
    S: AgencyStore,
    V: BreedValidator + 'static,
{
    let mission_id = parse_mission_id(&id)?;
    let cat_id: CatId = parse_id(&cat_id, "cat")?;
    component_debug!(Component::Api, mission_id = %mission_id, cat_id = %cat_id, "Assignment requested");
    Ok(Json(state.missions.assign_cat(mission_id, cat_id).await?))
}

pub async fn create_target<S, V>(
    State(state): State<AppState<S, V>>,
    Path(id): Path<String>,
    payload: Result<Json<TargetRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Mission>)>
where
    S: AgencyStore,
    V: BreedValidator + 'static,
{
    let mission_id = parse_mission_id(&id)?;
    let request = json_body(payload)?;
    let mission = state.missions.create_target(mission_id, request).await?;
    Ok((StatusCode::CREATED, Json(mission)))
}

pub async fn update_target<S, V>(
    State(state): State<AppState<S, V>>,
    Path((id, target_id)): Path<(String, String)>,
    payload: Result<Json<UpdateTargetRequest>, JsonRejection>,
) -> ApiResult<Json<Mission>>
where
    S: AgencyStore,
    V: BreedValidator + 'static,
{
    let mission_id = parse_mission_id(&id)?;
    let target_id: TargetId = parse_id(&target_id, "target")?;
    let request = json_body(payload)?;
    Ok(Json(state.missions.update_target(mission_id, target_id, request).await?))
}

/// Responds with the remaining mission rather than an empty body
pub async fn delete_target<S, V>(
    State(state): State<AppState<S, V>>,
    Path((id, target_id)): Path<(String, String)>,
) -> ApiResult<Json<Mission>>
where
    S: AgencyStore,
    V: BreedValidator + 'static,
{
    let mission_id = parse_mission_id(&id)?;
    let target_id: TargetId = parse_id(&target_id, "target")?;
    Ok(Json(state.missions.delete_target(mission_id, target_id).await?))
}
