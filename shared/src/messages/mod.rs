//! Request payloads accepted by the agency API
//!
//! Organized by resource:
//! - `cat`: spy cat creation and salary updates
//! - `mission`: missions, their targets and completion updates

pub mod cat;
pub mod mission;

pub use cat::{CreateCatRequest, UpdateCatRequest};
pub use mission::{
    CreateMissionRequest, TargetRequest, UpdateMissionRequest, UpdateTargetRequest, MAX_TARGETS,
    MIN_TARGETS,
};

use crate::errors::SharedResult;

/// Structural validation of an inbound payload
pub trait Validate {
    fn validate(&self) -> SharedResult<()>;
}

pub(crate) fn require_text(field: &str, value: &str, messages: &mut Vec<String>) {
    if value.trim().is_empty() {
        messages.push(format!("{field} is required"));
    }
}

pub(crate) fn require_non_negative(field: &str, value: f64, messages: &mut Vec<String>) {
    if !value.is_finite() || value < 0.0 {
        messages.push(format!("{field} must be at least 0"));
    }
}
