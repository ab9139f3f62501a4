//! Request handlers
//!
//! Handlers only translate: path segments and bodies in, service results out.

pub mod cats;
pub mod health;
pub mod missions;

use std::str::FromStr;

use axum::extract::rejection::JsonRejection;
use axum::Json;

use crate::error::{ApiError, ApiResult};

/// Parse an id path segment, naming the entity in the error
pub(crate) fn parse_id<T: FromStr>(raw: &str, entity: &str) -> ApiResult<T> {
    raw.parse()
        .map_err(|_| ApiError::bad_request(format!("invalid {entity} id")))
}

/// Unwrap a JSON body, turning extractor rejections into bad requests
pub(crate) fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> ApiResult<T> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| ApiError::bad_request(rejection.body_text()))
}
