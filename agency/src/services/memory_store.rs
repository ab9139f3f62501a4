//! In-memory entity store
//!
//! Implements the cat, mission and target store traits over shared tables.
//! Clones share the same tables, so one instance can be handed to every
//! service that needs a store.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use shared::{component_debug, Cat, CatId, Component, Mission, MissionId, Target, TargetId};
use tokio::sync::RwLock;

use crate::error::AgencyResult;
use crate::state::{missing_cat, missing_mission, missing_target, MissionRecord, StoreTables};
use crate::traits::{CatStore, MissionStore, NewCat, NewTarget, TargetStore};

/// Real in-memory store implementation
#[derive(Clone, Default)]
pub struct RealMemoryStore {
    tables: Arc<RwLock<StoreTables>>,
}

impl RealMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Row counts as (cats, missions, targets)
    pub async fn counts(&self) -> (usize, usize, usize) {
        let tables = self.tables.read().await;
        (tables.cats.len(), tables.missions.len(), tables.targets.len())
    }
}

#[async_trait]
impl CatStore for RealMemoryStore {
    async fn create_cat(&self, cat: NewCat) -> AgencyResult<Cat> {
        let mut tables = self.tables.write().await;
        let now = Utc::now();
        let cat = Cat {
            id: tables.next_cat_id(),
            name: cat.name,
            years_experience: cat.years_experience,
            breed: cat.breed,
            salary: cat.salary,
            created_at: now,
            updated_at: now,
        };
        tables.cats.insert(cat.id, cat.clone());
        component_debug!(Component::Store, cat_id = %cat.id, "Inserted cat {}", cat.id);
        Ok(cat)
    }

    async fn list_cats(&self) -> AgencyResult<Vec<Cat>> {
        let tables = self.tables.read().await;
        Ok(tables.cats.values().cloned().collect())
    }

    async fn get_cat(&self, id: CatId) -> AgencyResult<Cat> {
        let tables = self.tables.read().await;
        tables.cat(id).cloned()
    }

    async fn update_cat(&self, cat: &Cat) -> AgencyResult<()> {
        let mut tables = self.tables.write().await;
        let stored = tables.cats.get_mut(&cat.id).ok_or_else(|| missing_cat(cat.id))?;
        stored.name = cat.name.clone();
        stored.years_experience = cat.years_experience;
        stored.breed = cat.breed.clone();
        stored.salary = cat.salary;
        stored.updated_at = Utc::now();
        Ok(())
    }

    async fn delete_cat(&self, id: CatId) -> AgencyResult<()> {
        let mut tables = self.tables.write().await;
        tables.remove_cat(id, Utc::now()).ok_or_else(|| missing_cat(id))?;
        component_debug!(Component::Store, cat_id = %id, "Deleted cat {}", id);
        Ok(())
    }
}

#[async_trait]
impl MissionStore for RealMemoryStore {
    async fn create_mission(&self, targets: Vec<NewTarget>) -> AgencyResult<Mission> {
        let mut tables = self.tables.write().await;
        let now = Utc::now();
        let record = MissionRecord {
            id: tables.next_mission_id(),
            cat_id: None,
            complete: false,
            created_at: now,
            updated_at: now,
        };
        tables.missions.insert(record.id, record.clone());
        for target in targets {
            let target = new_target_row(tables.next_target_id(), record.id, target);
            tables.targets.insert(target.id, target);
        }
        component_debug!(Component::Store, mission_id = %record.id, "Inserted mission {}", record.id);
        Ok(tables.hydrate(&record))
    }

    async fn list_missions(&self) -> AgencyResult<Vec<Mission>> {
        let tables = self.tables.read().await;
        Ok(tables.missions.values().map(|record| tables.hydrate(record)).collect())
    }

    async fn get_mission(&self, id: MissionId) -> AgencyResult<Mission> {
        let tables = self.tables.read().await;
        let record = tables.mission(id)?;
        Ok(tables.hydrate(record))
    }

    async fn update_mission(&self, mission: &Mission) -> AgencyResult<()> {
        let mut tables = self.tables.write().await;
        if let Some(cat_id) = mission.cat_id {
            tables.cat(cat_id)?;
        }
        let stored = tables
            .missions
            .get_mut(&mission.id)
            .ok_or_else(|| missing_mission(mission.id))?;
        stored.cat_id = mission.cat_id;
        stored.complete = mission.complete;
        stored.updated_at = Utc::now();
        Ok(())
    }

    async fn delete_mission(&self, id: MissionId) -> AgencyResult<()> {
        let mut tables = self.tables.write().await;
        tables.remove_mission(id).ok_or_else(|| missing_mission(id))?;
        component_debug!(Component::Store, mission_id = %id, "Deleted mission {} and its targets", id);
        Ok(())
    }

    async fn get_active_mission_by_cat(&self, cat_id: CatId) -> AgencyResult<Option<Mission>> {
        let tables = self.tables.read().await;
        Ok(tables
            .missions
            .values()
            .find(|record| record.cat_id == Some(cat_id) && !record.complete)
            .map(|record| tables.hydrate(record)))
    }
}

#[async_trait]
impl TargetStore for RealMemoryStore {
    async fn create_target(&self, mission_id: MissionId, target: NewTarget) -> AgencyResult<Target> {
        let mut tables = self.tables.write().await;
        tables.mission(mission_id)?;
        let target = new_target_row(tables.next_target_id(), mission_id, target);
        tables.targets.insert(target.id, target.clone());
        Ok(target)
    }

    async fn get_target(&self, id: TargetId) -> AgencyResult<Target> {
        let tables = self.tables.read().await;
        tables.target(id).cloned()
    }

    async fn update_target(&self, target: &Target) -> AgencyResult<()> {
        let mut tables = self.tables.write().await;
        let stored = tables.targets.get_mut(&target.id).ok_or_else(|| missing_target(target.id))?;
        stored.notes = target.notes.clone();
        stored.complete = target.complete;
        stored.updated_at = Utc::now();
        Ok(())
    }

    async fn delete_target(&self, id: TargetId) -> AgencyResult<()> {
        let mut tables = self.tables.write().await;
        tables.targets.remove(&id).ok_or_else(|| missing_target(id))?;
        Ok(())
    }

    async fn count_targets_by_mission(&self, mission_id: MissionId) -> AgencyResult<usize> {
        let tables = self.tables.read().await;
        Ok(tables.targets_of(mission_id).count())
    }
}

fn new_target_row(id: TargetId, mission_id: MissionId, target: NewTarget) -> Target {
    let now = Utc::now();
    Target {
        id,
        mission_id,
        name: target.name,
        country: target.country,
        notes: target.notes,
        complete: false,
        created_at: now,
        updated_at: now,
    }
}
