//! Concurrent mutation tests
//!
//! Races many tasks against the same cat or mission on a multi-threaded
//! runtime and checks that the invariants still hold afterwards.

mod common;

use std::sync::Arc;
use std::time::Duration;

use agency::{AgencyError, AgencyResult, MissionService, MissionStore, NewTarget, RealMemoryStore, TargetStore};
use async_trait::async_trait;
use common::*;
use shared::{CatId, Mission, MissionId, UpdateTargetRequest};

/// Mission store that holds the creating request open after the insert
struct LingeringMissionStore(RealMemoryStore);

#[async_trait]
impl MissionStore for LingeringMissionStore {
    async fn create_mission(&self, targets: Vec<NewTarget>) -> AgencyResult<Mission> {
        let mission = self.0.create_mission(targets).await?;
        tokio::time::sleep(Duration::from_millis(50)).await;
        Ok(mission)
    }

    async fn list_missions(&self) -> AgencyResult<Vec<Mission>> {
        self.0.list_missions().await
    }

    async fn get_mission(&self, id: MissionId) -> AgencyResult<Mission> {
        self.0.get_mission(id).await
    }

    async fn update_mission(&self, mission: &Mission) -> AgencyResult<()> {
        self.0.update_mission(mission).await
    }

    async fn delete_mission(&self, id: MissionId) -> AgencyResult<()> {
        self.0.delete_mission(id).await
    }

    async fn get_active_mission_by_cat(&self, cat_id: CatId) -> AgencyResult<Option<Mission>> {
        self.0.get_active_mission_by_cat(cat_id).await
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_creation_is_never_observed_half_built() {
    let store = RealMemoryStore::new();
    let missions = Arc::new(MissionService::new(LingeringMissionStore(store.clone()), store.clone()));

    let creator = {
        let missions = Arc::clone(&missions);
        tokio::spawn(async move { missions.create_mission(TestFixtures::mission_request(3)).await })
    };

    tokio::time::timeout(Duration::from_secs(5), async {
        while store.counts().await.1 == 0 {
            tokio::task::yield_now().await;
        }
    })
    .await
    .expect("mission stored");

    // The creating request is still in flight here.
    let seen = missions.get_mission(MissionId(1)).await.unwrap();
    assert_eq!(seen.targets.len(), 3);

    let added = missions.create_target(MissionId(1), TestFixtures::extra_target()).await;
    assert_matches::assert_matches!(added, Err(AgencyError::Conflict { ref message })
        if message == "mission cannot have more than 3 targets");

    let created = creator.await.unwrap().unwrap();
    assert_eq!(created.targets.len(), 3);
    assert_eq!(store.count_targets_by_mission(MissionId(1)).await.unwrap(), 3);
    assert_eq!(store.counts().await, (0, 1, 3));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_assignments_of_one_cat() {
    let agency = Agency::new();
    let tom = agency.cat("Tom").await.id;
    let mut mission_ids = Vec::new();
    for _ in 0..8 {
        mission_ids.push(agency.mission(1).await.id);
    }

    let handles: Vec<_> = mission_ids
        .iter()
        .map(|&mission_id| {
            let missions = Arc::clone(&agency.missions);
            tokio::spawn(async move { missions.assign_cat(mission_id, tom).await })
        })
        .collect();

    let mut successes = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => successes += 1,
            Err(err) => assert_eq!(err.to_string(), "cat already has an active mission"),
        }
    }
    assert_eq!(successes, 1);

    let assigned: Vec<MissionId> = agency
        .store
        .list_missions()
        .await
        .unwrap()
        .into_iter()
        .filter(|m| m.cat_id == Some(tom))
        .map(|m| m.id)
        .collect();
    assert_eq!(assigned.len(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_assignments_to_one_mission() {
    let agency = Agency::new();
    let mission_id = agency.mission(1).await.id;
    let mut cat_ids = Vec::new();
    for i in 0..6 {
        cat_ids.push(agency.cat(&format!("Agent {i}")).await.id);
    }

    let handles: Vec<_> = cat_ids
        .iter()
        .map(|&cat_id| {
            let missions = Arc::clone(&agency.missions);
            tokio::spawn(async move { missions.assign_cat(mission_id, cat_id).await })
        })
        .collect();

    let mut successes = 0;
    for handle in handles {
        if handle.await.unwrap().is_ok() {
            successes += 1;
        }
    }
    assert_eq!(successes, 1);
    assert!(agency.missions.get_mission(mission_id).await.unwrap().cat_id.is_some());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_target_additions_respect_ceiling() {
    let agency = Agency::new();
    let mission_id = agency.mission(1).await.id;

    let handles: Vec<_> = (0..10)
        .map(|_| {
            let missions = Arc::clone(&agency.missions);
            tokio::spawn(async move { missions.create_target(mission_id, TestFixtures::extra_target()).await })
        })
        .collect();

    let mut successes = 0;
    for handle in handles {
        if handle.await.unwrap().is_ok() {
            successes += 1;
        }
    }
    assert_eq!(successes, 2);
    assert_eq!(agency.store.count_targets_by_mission(mission_id).await.unwrap(), 3);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_target_removals_respect_floor() {
    let agency = Agency::new();
    let mission = agency.mission(3).await;
    let mission_id = mission.id;

    let handles: Vec<_> = mission
        .targets
        .iter()
        .map(|target| {
            let missions = Arc::clone(&agency.missions);
            let target_id = target.id;
            tokio::spawn(async move { missions.delete_target(mission_id, target_id).await })
        })
        .collect();

    let mut successes = 0;
    for handle in handles {
        if handle.await.unwrap().is_ok() {
            successes += 1;
        }
    }
    assert_eq!(successes, 2);
    assert_eq!(agency.store.count_targets_by_mission(mission_id).await.unwrap(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_completion_races_with_target_removal() {
    let agency = Agency::new();
    let mission = agency.mission(2).await;
    let mission_id = mission.id;
    let target_id = mission.targets[0].id;

    let completer = {
        let missions = Arc::clone(&agency.missions);
        tokio::spawn(async move {
            missions
                .update_target(mission_id, target_id, UpdateTargetRequest::completed())
                .await
        })
    };
    let remover = {
        let missions = Arc::clone(&agency.missions);
        tokio::spawn(async move { missions.delete_target(mission_id, target_id).await })
    };

    let completed = completer.await.unwrap();
    let removed = remover.await.unwrap();

    // Whichever ran first wins; a completed target is never removed.
    match agency.store.get_target(target_id).await {
        Ok(target) => {
            assert!(completed.is_ok());
            assert!(target.complete);
            assert!(removed.is_err());
        }
        Err(err) => {
            assert!(err.is_not_found());
            assert!(removed.is_ok());
            assert!(completed.is_err());
        }
    }
}
