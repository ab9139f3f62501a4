//! Test fixtures and data for agency tests
//!
//! Consistent payloads used across the integration suites.

use shared::{CreateCatRequest, CreateMissionRequest, TargetRequest};

/// Standard test data and fixtures
pub struct TestFixtures;

impl TestFixtures {
    pub const KNOWN_BREED: &'static str = "Siamese";
    pub const UNKNOWN_BREED: &'static str = "Sabre-tooth";
    pub const DEFAULT_SALARY: f64 = 1500.0;

    /// Targets named `Target 1..=count`, spread across a few countries
    pub fn targets(count: usize) -> Vec<TargetRequest> {
        const COUNTRIES: [&str; 3] = ["France", "Japan", "Brazil"];
        (1..=count)
            .map(|i| TargetRequest::new(format!("Target {i}"), COUNTRIES[(i - 1) % COUNTRIES.len()], "initial notes"))
            .collect()
    }

    pub fn mission_request(target_count: usize) -> CreateMissionRequest {
        CreateMissionRequest {
            targets: Self::targets(target_count),
        }
    }

    pub fn extra_target() -> TargetRequest {
        TargetRequest::new("Late Addition", "Norway", "")
    }

    pub fn cat_request(name: &str) -> CreateCatRequest {
        CreateCatRequest {
            name: name.to_string(),
            years_experience: 5,
            breed: Self::KNOWN_BREED.to_string(),
            salary: Self::DEFAULT_SALARY,
        }
    }
}
