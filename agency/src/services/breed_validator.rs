//! Breed registry client
//!
//! Checks breed names against TheCatAPI's public breed list
//! (`GET {base_url}/breeds`). Names are compared case-insensitively.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use shared::{component_debug, component_warn, Component};

use crate::error::{AgencyError, AgencyResult};
use crate::traits::BreedValidator;

/// Connection settings for the breed registry
#[derive(Debug, Clone, PartialEq)]
pub struct BreedRegistryConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl BreedRegistryConfig {
    pub const DEFAULT_BASE_URL: &'static str = "https://api.thecatapi.com/v1";
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            base_url: base_url.into(),
            timeout,
        }
    }

    pub fn breeds_url(&self) -> String {
        format!("{}/breeds", self.base_url.trim_end_matches('/'))
    }
}

impl Default for BreedRegistryConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_BASE_URL, Self::DEFAULT_TIMEOUT)
    }
}

/// One entry of the registry's breed list; other fields are ignored
#[derive(Debug, Deserialize)]
struct BreedRecord {
    name: String,
}

/// Real breed validator backed by the HTTP registry
#[derive(Clone)]
pub struct RealBreedValidator {
    client: reqwest::Client,
    breeds_url: String,
}

impl RealBreedValidator {
    pub fn new(config: &BreedRegistryConfig) -> AgencyResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AgencyError::internal_with("failed to build breed registry client", e))?;

        Ok(Self {
            client,
            breeds_url: config.breeds_url(),
        })
    }

    async fn fetch_breeds(&self) -> AgencyResult<Vec<BreedRecord>> {
        let response = self
            .client
            .get(&self.breeds_url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| {
                component_warn!(Component::BreedRegistry, "⚠️ Breed registry unreachable: {}", e);
                AgencyError::internal_with("breed registry unreachable", e)
            })?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            component_warn!(Component::BreedRegistry, "⚠️ Breed registry returned HTTP {}", status);
            return Err(AgencyError::internal(format!("breed registry returned status {}", status.as_u16())));
        }

        response
            .json::<Vec<BreedRecord>>()
            .await
            .map_err(|e| AgencyError::internal_with("failed to decode breed registry response", e))
    }
}

#[async_trait]
impl BreedValidator for RealBreedValidator {
    async fn validate_breed(&self, breed: &str) -> AgencyResult<bool> {
        let wanted = breed.trim().to_lowercase();
        let breeds = self.fetch_breeds().await?;
        let known = breeds.iter().any(|b| b.name.to_lowercase() == wanted);

        component_debug!(
            Component::BreedRegistry,
            "Breed '{}' {} among {} registry entries",
            breed,
            if known { "found" } else { "not found" },
            breeds.len()
        );
        Ok(known)
    }
}
