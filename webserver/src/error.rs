//! WebServer-specific error types

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use agency::AgencyError;
use shared::{logging, Component};

/// Failures while configuring or starting the server
#[derive(Error, Debug)]
pub enum WebServerError {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("HTTP server startup failed on {addr}")]
    ServerStartupFailed {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl WebServerError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

pub type WebServerResult<T> = Result<T, WebServerError>;

/// Agency error on its way out of a handler
#[derive(Debug)]
pub struct ApiError(pub AgencyError);

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self(AgencyError::bad_request(message))
    }

    pub fn status(&self) -> StatusCode {
        match &self.0 {
            AgencyError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AgencyError::NotFound { .. } => StatusCode::NOT_FOUND,
            AgencyError::Conflict { .. } => StatusCode::CONFLICT,
            AgencyError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<AgencyError> for ApiError {
    fn from(err: AgencyError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if let AgencyError::Internal { source, .. } = &self.0 {
            match source {
                Some(cause) => logging::log_error(Component::Api, &self.0.to_string(), cause),
                None => logging::log_error(Component::Api, "request failed", &self.0),
            }
        }
        (status, Json(json!({ "error": self.0.public_message() }))).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
