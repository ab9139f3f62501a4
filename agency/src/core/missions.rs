//! Mission orchestration
//!
//! `MissionService` is the only path through which missions, targets and cat
//! assignments change. Creation is a single atomic store call. Every other
//! mutation takes the lock of the mission it touches (and, for assignment
//! changes, the lock of the cat) before reading the records it checks, and
//! holds it until the write has landed. Locks are always taken mission first,
//! cat second.

use shared::{
    component_debug, component_info, CatId, Component,
    CreateMissionRequest, Mission, MissionId, TargetId, TargetRequest, UpdateMissionRequest,
    UpdateTargetRequest, Validate,
};

use crate::core::locks::KeyedLocks;
use crate::core::rules;
use crate::error::{AgencyError, AgencyResult};
use crate::traits::{MissionStore, NewTarget, TargetStore};

/// Mission orchestration service with injected stores
pub struct MissionService<M, T>
where
    M: MissionStore,
    T: TargetStore,
{
    missions: M,
    targets: T,
    mission_locks: KeyedLocks<MissionId>,
    cat_locks: KeyedLocks<CatId>,
}

impl<M, T> MissionService<M, T>
where
    M: MissionStore,
    T: TargetStore,
{
    pub fn new(missions: M, targets: T) -> Self {
        Self {
            missions,
            targets,
            mission_locks: KeyedLocks::new(),
            cat_locks: KeyedLocks::new(),
        }
    }

    /// Create a mission together with its initial targets
    ///
    /// The store inserts the mission and its targets in one step, so no other
    /// request can observe or extend a half-built mission.
    pub async fn create_mission(&self, request: CreateMissionRequest) -> AgencyResult<Mission> {
        request.validate()?;

        let targets = request.targets.into_iter().map(new_target).collect();
        let mission = self.missions.create_mission(targets).await?;
        component_info!(
            Component::Missions,
            mission_id = %mission.id,
            "🎯 Mission {} created with {} targets",
            mission.id,
            mission.targets.len()
        );
        Ok(mission)
    }

    pub async fn list_missions(&self) -> AgencyResult<Vec<Mission>> {
        self.missions.list_missions().await
    }

    pub async fn get_mission(&self, mission_id: MissionId) -> AgencyResult<Mission> {
        self.missions.get_mission(mission_id).await
    }

    /// Attach a cat to an open, unassigned mission; the assignment is permanent
    pub async fn assign_cat(&self, mission_id: MissionId, cat_id: CatId) -> AgencyResult<Mission> {
        let _mission_guard = self.mission_locks.lock(mission_id).await;
        let _cat_guard = self.cat_locks.lock(cat_id).await;

        let mut mission = self.missions.get_mission(mission_id).await?;
        rules::ensure_assignable(&mission).inspect_err(|err| rejected(mission_id, "assign cat", err))?;

        let active = self.missions.get_active_mission_by_cat(cat_id).await?;
        rules::ensure_cat_available(active.as_ref(), mission_id)
            .inspect_err(|err| rejected(mission_id, "assign cat", err))?;

        mission.cat_id = Some(cat_id);
        self.missions.update_mission(&mission).await?;

        component_info!(
            Component::Missions,
            mission_id = %mission_id,
            cat_id = %cat_id,
            "🐈 Cat {} assigned to mission {}",
            cat_id,
            mission_id
        );
        self.missions.get_mission(mission_id).await
    }

    /// Set or clear the completion flag
    ///
    /// Completion is not derived from the targets. Re-opening is refused when
    /// the assigned cat has meanwhile taken another active mission.
    pub async fn update_mission(&self, mission_id: MissionId, request: UpdateMissionRequest) -> AgencyResult<Mission> {
        let _mission_guard = self.mission_locks.lock(mission_id).await;

        let mut mission = self.missions.get_mission(mission_id).await?;
        let Some(complete) = request.complete else {
            return Ok(mission);
        };
        if complete == mission.complete {
            return Ok(mission);
        }

        let _cat_guard = match (complete, mission.cat_id) {
            (false, Some(cat_id)) => {
                let guard = self.cat_locks.lock(cat_id).await;
                let active = self.missions.get_active_mission_by_cat(cat_id).await?;
                rules::ensure_cat_available(active.as_ref(), mission_id)
                    .inspect_err(|err| rejected(mission_id, "reopen mission", err))?;
                Some(guard)
            }
            _ => None,
        };

        mission.complete = complete;
        self.missions.update_mission(&mission).await?;

        component_info!(
            Component::Missions,
            mission_id = %mission_id,
            "{} Mission {} marked {}",
            if complete { "🏁" } else { "🔄" },
            mission_id,
            if complete { "complete" } else { "incomplete" }
        );
        self.missions.get_mission(mission_id).await
    }

    /// Delete an unassigned mission and its targets
    pub async fn delete_mission(&self, mission_id: MissionId) -> AgencyResult<()> {
        let _guard = self.mission_locks.lock(mission_id).await;

        let mission = self.missions.get_mission(mission_id).await?;
        rules::ensure_deletable(&mission).inspect_err(|err| rejected(mission_id, "delete mission", err))?;

        self.missions.delete_mission(mission_id).await?;
        component_info!(Component::Missions, mission_id = %mission_id, "🗑️ Mission {} deleted", mission_id);
        Ok(())
    }

    /// Add a target to an open mission holding fewer than three
    pub async fn create_target(&self, mission_id: MissionId, request: TargetRequest) -> AgencyResult<Mission> {
        request.validate()?;
        let _guard = self.mission_locks.lock(mission_id).await;

        let mission = self.missions.get_mission(mission_id).await?;
        let count = self.targets.count_targets_by_mission(mission_id).await?;
        rules::ensure_can_add_target(&mission, count).inspect_err(|err| rejected(mission_id, "add target", err))?;

        let target = self.targets.create_target(mission_id, new_target(request)).await?;
        component_info!(
            Component::Missions,
            mission_id = %mission_id,
            target_id = %target.id,
            "➕ Target {} added to mission {}",
            target.id,
            mission_id
        );
        self.missions.get_mission(mission_id).await
    }

    /// Apply the supplied notes/completion to an open target of an open mission
    pub async fn update_target(
        &self,
        mission_id: MissionId,
        target_id: TargetId,
        request: UpdateTargetRequest,
    ) -> AgencyResult<Mission> {
        let _guard = self.mission_locks.lock(mission_id).await;

        let mut target = self.targets.get_target(target_id).await?;
        rules::ensure_target_belongs(&target, mission_id)?;

        let mission = self.missions.get_mission(mission_id).await?;
        rules::ensure_target_mutable(&target, &mission).inspect_err(|err| rejected(mission_id, "update target", err))?;

        if let Some(notes) = request.notes {
            target.notes = notes;
        }
        if let Some(complete) = request.complete {
            target.complete = complete;
        }
        self.targets.update_target(&target).await?;

        if target.complete {
            component_info!(
                Component::Missions,
                mission_id = %mission_id,
                target_id = %target_id,
                "🎯 Target {} of mission {} completed",
                target_id,
                mission_id
            );
        }
        self.missions.get_mission(mission_id).await
    }

    /// Remove an open target, keeping at least one on the mission
    pub async fn delete_target(&self, mission_id: MissionId, target_id: TargetId) -> AgencyResult<Mission> {
        let _guard = self.mission_locks.lock(mission_id).await;

        let target = self.targets.get_target(target_id).await?;
        rules::ensure_target_belongs(&target, mission_id)?;

        let mission = self.missions.get_mission(mission_id).await?;
        let count = self.targets.count_targets_by_mission(mission_id).await?;
        rules::ensure_target_removable(&target, &mission, count)
            .inspect_err(|err| rejected(mission_id, "remove target", err))?;

        self.targets.delete_target(target_id).await?;
        component_info!(
            Component::Missions,
            mission_id = %mission_id,
            target_id = %target_id,
            "➖ Target {} removed from mission {}",
            target_id,
            mission_id
        );
        self.missions.get_mission(mission_id).await
    }
}

fn new_target(request: TargetRequest) -> NewTarget {
    NewTarget {
        name: request.name,
        country: request.country,
        notes: request.notes,
    }
}

fn rejected(mission_id: MissionId, action: &str, err: &AgencyError) {
    component_debug!(
        Component::Missions,
        mission_id = %mission_id,
        "🚫 {} on mission {} rejected: {}",
        action,
        mission_id,
        err
    );
}
