//! Test helpers for agency integration tests
//!
//! Wires the services onto a fresh memory store so each test starts empty.

use std::sync::Arc;

use agency::{AgencyError, CatService, CatStore, MissionService, MockBreedValidator, NewCat, RealMemoryStore};
use shared::{Cat, Mission};

use super::fixtures::TestFixtures;

pub type StoreMissionService = MissionService<RealMemoryStore, RealMemoryStore>;
pub type StoreCatService = CatService<RealMemoryStore, RealMemoryStore, MockBreedValidator>;

/// Services over one shared memory store
pub struct Agency {
    pub store: RealMemoryStore,
    pub missions: Arc<StoreMissionService>,
}

impl Agency {
    pub fn new() -> Self {
        let store = RealMemoryStore::new();
        let missions = Arc::new(MissionService::new(store.clone(), store.clone()));
        Self { store, missions }
    }

    /// Cat service on the same store, with a registry that knows `KNOWN_BREED`
    pub fn cat_service(&self) -> StoreCatService {
        CatService::new(self.store.clone(), self.store.clone(), accepting_validator())
    }

    /// Insert a cat directly, bypassing the registry
    pub async fn cat(&self, name: &str) -> Cat {
        self.store
            .create_cat(NewCat {
                name: name.to_string(),
                years_experience: 2,
                breed: TestFixtures::KNOWN_BREED.to_string(),
                salary: TestFixtures::DEFAULT_SALARY,
            })
            .await
            .expect("cat insert")
    }

    pub async fn mission(&self, target_count: usize) -> Mission {
        self.missions
            .create_mission(TestFixtures::mission_request(target_count))
            .await
            .expect("mission creation")
    }
}

/// Registry double that recognises only `TestFixtures::KNOWN_BREED`
pub fn accepting_validator() -> MockBreedValidator {
    let mut validator = MockBreedValidator::new();
    validator
        .expect_validate_breed()
        .returning(|breed| Ok(breed.eq_ignore_ascii_case(TestFixtures::KNOWN_BREED)))
        .times(0..);
    validator
}

/// Unwrap a conflict message, failing the test on any other outcome
pub fn conflict_message<T: std::fmt::Debug>(result: Result<T, AgencyError>) -> String {
    match result {
        Err(AgencyError::Conflict { message }) => message,
        other => panic!("expected conflict, got {other:?}"),
    }
}
