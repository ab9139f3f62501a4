//! Spy cat agency core
//!
//! Cats, missions and targets, and the rules that tie them together. The
//! services here are transport-agnostic and generic over their stores and the
//! breed registry, which are injected at construction.

pub mod core;
pub mod error;
pub mod services;
pub mod state;
pub mod traits;

// Re-export commonly used types
pub use crate::core::{CatService, KeyedLocks, MissionService, MissionState, TargetState};
pub use error::{AgencyError, AgencyResult};
pub use services::{BreedRegistryConfig, RealBreedValidator, RealMemoryStore, RealSqliteStore};
pub use traits::{BreedValidator, CatStore, MissionStore, NewCat, NewTarget, TargetStore};
pub use traits::{MockBreedValidator, MockCatStore, MockMissionStore, MockTargetStore};
