//! Core business logic
//!
//! This module contains the agency's rules, free of any transport:
//! - `missions`: mission/target/assignment orchestration
//! - `cats`: cat management
//! - `rules`: pure state-machine guards
//! - `locks`: per-key serialization of check-then-act sequences

pub mod cats;
pub mod locks;
pub mod missions;
pub mod rules;

pub use cats::CatService;
pub use locks::KeyedLocks;
pub use missions::MissionService;
pub use rules::{MissionState, TargetState};
