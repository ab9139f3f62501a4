//! HTTP surface of the agency
//!
//! `AppState` carries the two services; the route table under `/api/v1` is
//! built here and mounted by `WebServer`.

pub mod handlers;

use std::sync::Arc;

use axum::routing::{get, patch, post};
use axum::Router;

use agency::{BreedValidator, CatService, CatStore, MissionService, MissionStore, TargetStore};

use handlers::{cats, missions};

/// Store able to back both services
pub trait AgencyStore: CatStore + MissionStore + TargetStore + Clone + 'static {}

impl<T> AgencyStore for T where T: CatStore + MissionStore + TargetStore + Clone + 'static {}

/// Shared router state
pub struct AppState<S, V>
where
    S: AgencyStore,
    V: BreedValidator + 'static,
{
    pub missions: Arc<MissionService<S, S>>,
    pub cats: Arc<CatService<S, S, V>>,
}

impl<S, V> AppState<S, V>
where
    S: AgencyStore,
    V: BreedValidator + 'static,
{
    /// Wire both services onto the same store
    pub fn new(store: S, validator: V) -> Self {
        Self {
            missions: Arc::new(MissionService::new(store.clone(), store.clone())),
            cats: Arc::new(CatService::new(store.clone(), store, validator)),
        }
    }
}

impl<S, V> Clone for AppState<S, V>
where
    S: AgencyStore,
    V: BreedValidator + 'static,
{
    fn clone(&self) -> Self {
        Self {
            missions: Arc::clone(&self.missions),
            cats: Arc::clone(&self.cats),
        }
    }
}

/// Routes relative to `/api/v1`
pub fn api_routes<S, V>() -> Router<AppState<S, V>>
where
    S: AgencyStore,
    V: BreedValidator + 'static,
{
    Router::new()
        .route("/cats", post(cats::create_cat::<S, V>).get(cats::list_cats::<S, V>))
        .route(
            "/cats/:id",
            get(cats::get_cat::<S, V>)
                .patch(cats::update_cat::<S, V>)
                .delete(cats::delete_cat::<S, V>),
        )
        .route(
            "/missions",
            post(missions::create_mission::<S, V>).get(missions::list_missions::<S, V>),
        )
        .route(
            "/missions/:id",
            get(missions::get_mission::<S, V>)
                .patch(missions::update_mission::<S, V>)
                .delete(missions::delete_mission::<S, V>),
        )
        .route("/missions/:id/assign/:cat_id", patch(missions::assign_cat::<S, V>))
        .route("/missions/:id/targets", post(missions::create_target::<S, V>))
        .route(
            "/missions/:id/targets/:target_id",
            patch(missions::update_target::<S, V>).delete(missions::delete_target::<S, V>),
        )
}
