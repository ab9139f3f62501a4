//! Tests for the breed registry client against a local mock registry

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::error::AgencyError;
use crate::services::{BreedRegistryConfig, RealBreedValidator};
use crate::traits::BreedValidator;

fn breed_list() -> serde_json::Value {
    json!([
        {"id": "abys", "name": "Abyssinian", "origin": "Egypt"},
        {"id": "siam", "name": "Siamese", "origin": "Thailand"},
        {"id": "mcoo", "name": "Maine Coon", "origin": "United States"}
    ])
}

async fn registry_with(response: ResponseTemplate) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/breeds"))
        .respond_with(response)
        .mount(&server)
        .await;
    server
}

fn validator_for(server: &MockServer) -> RealBreedValidator {
    let config = BreedRegistryConfig::new(format!("{}/v1", server.uri()), Duration::from_secs(2));
    RealBreedValidator::new(&config).unwrap()
}

#[tokio::test]
async fn test_known_breed_matches_case_insensitively() {
    let server = registry_with(ResponseTemplate::new(200).set_body_json(breed_list())).await;
    let validator = validator_for(&server);

    assert!(validator.validate_breed("Siamese").await.unwrap());
    assert!(validator.validate_breed("maine coon").await.unwrap());
    assert!(validator.validate_breed("  ABYSSINIAN ").await.unwrap());
}

#[tokio::test]
async fn test_unknown_breed_is_false_not_error() {
    let server = registry_with(ResponseTemplate::new(200).set_body_json(breed_list())).await;
    let validator = validator_for(&server);

    assert!(!validator.validate_breed("Tiger").await.unwrap());
}

#[tokio::test]
async fn test_registry_error_status_is_internal() {
    let server = registry_with(ResponseTemplate::new(503)).await;
    let validator = validator_for(&server);

    let err = validator.validate_breed("Siamese").await.unwrap_err();
    assert!(matches!(err, AgencyError::Internal { .. }));
    assert_eq!(err.to_string(), "internal error: breed registry returned status 503");
}

#[tokio::test]
async fn test_malformed_body_is_internal() {
    let server = registry_with(ResponseTemplate::new(200).set_body_string("not json")).await;
    let validator = validator_for(&server);

    let err = validator.validate_breed("Siamese").await.unwrap_err();
    assert!(matches!(err, AgencyError::Internal { .. }));
}

#[tokio::test]
async fn test_unreachable_registry_is_internal() {
    // Nothing listens on the discard port.
    let config = BreedRegistryConfig::new("http://127.0.0.1:9", Duration::from_millis(500));
    let validator = RealBreedValidator::new(&config).unwrap();

    let err = validator.validate_breed("Siamese").await.unwrap_err();
    assert_eq!(err.public_message(), "Internal server error");
}

#[test]
fn test_breeds_url_joins_cleanly() {
    let config = BreedRegistryConfig::new("https://api.thecatapi.com/v1/", Duration::from_secs(1));
    assert_eq!(config.breeds_url(), "https://api.thecatapi.com/v1/breeds");
    assert_eq!(BreedRegistryConfig::default().breeds_url(), "https://api.thecatapi.com/v1/breeds");
}
