//! Shared types for the spy cat agency
//!
//! Contains the entity records, identifiers and request payloads used by both
//! the agency core and the HTTP layer, plus the common logging setup.

pub mod errors;
pub mod logging;
pub mod messages;
pub mod types;

pub use errors::*;
pub use types::*;

pub use messages::{
    // Cats
    CreateCatRequest, UpdateCatRequest,

    // Missions and targets
    CreateMissionRequest, TargetRequest, UpdateMissionRequest, UpdateTargetRequest,

    // Validation
    Validate, MAX_TARGETS, MIN_TARGETS,
};
