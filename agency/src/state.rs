//! Entity store state
//!
//! Tables behind `RealMemoryStore`. All access goes through one
//! `tokio::sync::RwLock`, so every store operation (including cascades) is
//! applied atomically.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use shared::{Cat, CatId, Mission, MissionId, Target, TargetId};

use crate::error::AgencyError;

/// A mission row without its hydrated relations
#[derive(Debug, Clone, PartialEq)]
pub struct MissionRecord {
    pub id: MissionId,
    pub cat_id: Option<CatId>,
    pub complete: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Tables and id sequences of the in-memory store
#[derive(Debug, Default)]
pub struct StoreTables {
    pub cats: BTreeMap<CatId, Cat>,
    pub missions: BTreeMap<MissionId, MissionRecord>,
    pub targets: BTreeMap<TargetId, Target>,
    last_cat_id: u64,
    last_mission_id: u64,
    last_target_id: u64,
}

impl StoreTables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_cat_id(&mut self) -> CatId {
        self.last_cat_id += 1;
        CatId(self.last_cat_id)
    }

    pub fn next_mission_id(&mut self) -> MissionId {
        self.last_mission_id += 1;
        MissionId(self.last_mission_id)
    }

    pub fn next_target_id(&mut self) -> TargetId {
        self.last_target_id += 1;
        TargetId(self.last_target_id)
    }

    pub fn cat(&self, id: CatId) -> Result<&Cat, AgencyError> {
        self.cats.get(&id).ok_or_else(|| missing_cat(id))
    }

    pub fn mission(&self, id: MissionId) -> Result<&MissionRecord, AgencyError> {
        self.missions.get(&id).ok_or_else(|| missing_mission(id))
    }

    pub fn target(&self, id: TargetId) -> Result<&Target, AgencyError> {
        self.targets.get(&id).ok_or_else(|| missing_target(id))
    }

    pub fn targets_of(&self, mission_id: MissionId) -> impl Iterator<Item = &Target> {
        self.targets.values().filter(move |t| t.mission_id == mission_id)
    }

    /// Mission row joined with its cat and targets
    pub fn hydrate(&self, record: &MissionRecord) -> Mission {
        Mission {
            id: record.id,
            cat_id: record.cat_id,
            complete: record.complete,
            created_at: record.created_at,
            updated_at: record.updated_at,
            cat: record.cat_id.and_then(|id| self.cats.get(&id).cloned()),
            targets: self.targets_of(record.id).cloned().collect(),
        }
    }

    /// Drop a mission row and every target it owns
    pub fn remove_mission(&mut self, id: MissionId) -> Option<MissionRecord> {
        let removed = self.missions.remove(&id)?;
        self.targets.retain(|_, t| t.mission_id != id);
        Some(removed)
    }

    /// Drop a cat and unassign it from its missions
    pub fn remove_cat(&mut self, id: CatId, now: DateTime<Utc>) -> Option<Cat> {
        let removed = self.cats.remove(&id)?;
        for mission in self.missions.values_mut().filter(|m| m.cat_id == Some(id)) {
            mission.cat_id = None;
            mission.updated_at = now;
        }
        Some(removed)
    }
}

pub fn missing_cat(id: CatId) -> AgencyError {
    AgencyError::not_found(format!("no cat with id \"{id}\""))
}

pub fn missing_mission(id: MissionId) -> AgencyError {
    AgencyError::not_found(format!("no mission with id \"{id}\""))
}

pub fn missing_target(id: TargetId) -> AgencyError {
    AgencyError::not_found(format!("no target with id \"{id}\""))
}
