//! Trait definitions with mockall annotations for testing
//!
//! Persistence and the external breed registry are reached only through these
//! traits. The services are generic over them so a store or validator can be
//! swapped per environment (memory or sqlite store, mocks for failure paths).

use async_trait::async_trait;
use shared::{Cat, CatId, Mission, MissionId, Target, TargetId};

use crate::error::AgencyResult;

/// Fields of a cat that is about to be stored
#[derive(Debug, Clone, PartialEq)]
pub struct NewCat {
    pub name: String,
    pub years_experience: u32,
    pub breed: String,
    pub salary: f64,
}

/// Fields of a target that is about to be stored
#[derive(Debug, Clone, PartialEq)]
pub struct NewTarget {
    pub name: String,
    pub country: String,
    pub notes: String,
}

/// Cat persistence
#[mockall::automock]
#[async_trait]
pub trait CatStore: Send + Sync {
    async fn create_cat(&self, cat: NewCat) -> AgencyResult<Cat>;

    async fn list_cats(&self) -> AgencyResult<Vec<Cat>>;

    /// `NotFound` when the id is unknown
    async fn get_cat(&self, id: CatId) -> AgencyResult<Cat>;

    async fn update_cat(&self, cat: &Cat) -> AgencyResult<()>;

    /// Removes the cat and clears it from every mission that referenced it
    async fn delete_cat(&self, id: CatId) -> AgencyResult<()>;
}

/// Mission persistence
#[mockall::automock]
#[async_trait]
pub trait MissionStore: Send + Sync {
    /// Store a new unassigned, incomplete mission together with its targets
    ///
    /// The mission and all of its targets become visible in one step; on
    /// failure nothing is stored.
    async fn create_mission(&self, targets: Vec<NewTarget>) -> AgencyResult<Mission>;

    async fn list_missions(&self) -> AgencyResult<Vec<Mission>>;

    /// Mission hydrated with its cat and targets; `NotFound` when unknown
    async fn get_mission(&self, id: MissionId) -> AgencyResult<Mission>;

    /// Persist `cat_id` and `complete`
    ///
    /// Fails with `NotFound` when the mission or the referenced cat is unknown.
    async fn update_mission(&self, mission: &Mission) -> AgencyResult<()>;

    /// Removes the mission together with its targets
    async fn delete_mission(&self, id: MissionId) -> AgencyResult<()>;

    /// The incomplete mission currently assigned to `cat_id`, if any
    async fn get_active_mission_by_cat(&self, cat_id: CatId) -> AgencyResult<Option<Mission>>;
}

/// Target persistence
#[mockall::automock]
#[async_trait]
pub trait TargetStore: Send + Sync {
    /// Fails with `NotFound` when the owning mission is unknown
    async fn create_target(&self, mission_id: MissionId, target: NewTarget) -> AgencyResult<Target>;

    async fn get_target(&self, id: TargetId) -> AgencyResult<Target>;

    /// Persist `notes` and `complete`; the owning mission is never rewritten
    async fn update_target(&self, target: &Target) -> AgencyResult<()>;

    async fn delete_target(&self, id: TargetId) -> AgencyResult<()>;

    async fn count_targets_by_mission(&self, mission_id: MissionId) -> AgencyResult<usize>;
}

/// External breed registry
#[mockall::automock]
#[async_trait]
pub trait BreedValidator: Send + Sync {
    /// `Ok(false)` for an unknown breed; `Err` only when the registry cannot answer
    async fn validate_breed(&self, breed: &str) -> AgencyResult<bool>;
}
