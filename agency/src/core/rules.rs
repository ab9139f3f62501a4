//! Mission and target state machines
//!
//! Mission: `Unassigned -> Assigned -> Completed`, completion set directly.
//! Target: `Open -> Completed`, one way.
//!
//! The guards here are pure; callers fetch the current records (under the
//! relevant key locks) and ask whether a transition is allowed.

use shared::{CatId, Mission, MissionId, Target, MAX_TARGETS, MIN_TARGETS};

use crate::error::{AgencyError, AgencyResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissionState {
    Unassigned,
    Assigned(CatId),
    Completed,
}

impl MissionState {
    pub fn of(mission: &Mission) -> Self {
        match (mission.complete, mission.cat_id) {
            (true, _) => MissionState::Completed,
            (false, Some(cat_id)) => MissionState::Assigned(cat_id),
            (false, None) => MissionState::Unassigned,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetState {
    Open,
    Completed,
}

impl TargetState {
    pub fn of(target: &Target) -> Self {
        if target.complete {
            TargetState::Completed
        } else {
            TargetState::Open
        }
    }
}

/// A cat may only be attached to an open mission that has none yet
pub fn ensure_assignable(mission: &Mission) -> AgencyResult<()> {
    match MissionState::of(mission) {
        MissionState::Completed => Err(AgencyError::conflict("cannot assign cat to completed mission")),
        MissionState::Assigned(_) => Err(AgencyError::conflict("mission already has an assigned cat")),
        MissionState::Unassigned => Ok(()),
    }
}

/// The cat's active mission, if any, must be `mission_id` itself
pub fn ensure_cat_available(active: Option<&Mission>, mission_id: MissionId) -> AgencyResult<()> {
    match active {
        Some(other) if other.id != mission_id => Err(AgencyError::conflict("cat already has an active mission")),
        _ => Ok(()),
    }
}

pub fn ensure_can_add_target(mission: &Mission, current_count: usize) -> AgencyResult<()> {
    if mission.complete {
        return Err(AgencyError::conflict("cannot add targets to completed mission"));
    }
    if current_count >= MAX_TARGETS {
        return Err(AgencyError::conflict(format!(
            "mission cannot have more than {MAX_TARGETS} targets"
        )));
    }
    Ok(())
}

/// Targets are addressed through their mission; a mismatch is a client error
pub fn ensure_target_belongs(target: &Target, mission_id: MissionId) -> AgencyResult<()> {
    if target.mission_id == mission_id {
        Ok(())
    } else {
        Err(AgencyError::bad_request("target does not belong to this mission"))
    }
}

/// Notes and completion are frozen once the target or its mission completes
pub fn ensure_target_mutable(target: &Target, mission: &Mission) -> AgencyResult<()> {
    if TargetState::of(target) == TargetState::Completed {
        return Err(AgencyError::conflict("cannot update notes of completed target"));
    }
    if MissionState::of(mission) == MissionState::Completed {
        return Err(AgencyError::conflict("cannot update notes if mission is completed"));
    }
    Ok(())
}

pub fn ensure_target_removable(target: &Target, mission: &Mission, current_count: usize) -> AgencyResult<()> {
    if TargetState::of(target) == TargetState::Completed {
        return Err(AgencyError::conflict("cannot delete completed target"));
    }
    if MissionState::of(mission) == MissionState::Completed {
        return Err(AgencyError::conflict("cannot delete targets from completed mission"));
    }
    if current_count <= MIN_TARGETS {
        return Err(AgencyError::conflict(format!(
            "mission must have at least {MIN_TARGETS} target"
        )));
    }
    Ok(())
}

pub fn ensure_deletable(mission: &Mission) -> AgencyResult<()> {
    if mission.cat_id.is_some() {
        Err(AgencyError::conflict("cannot delete assigned mission"))
    } else {
        Ok(())
    }
}
