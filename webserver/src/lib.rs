//! HTTP front end for the spy cat agency
//!
//! Binds the agency services to an axum router under `/api/v1`, maps agency
//! errors to status codes and runs the server with graceful shutdown.

pub mod config;
pub mod error;
pub mod web;
pub mod webserver_impl;

// Re-export main types
pub use config::{Args, ServerConfig};
pub use error::{ApiError, ApiResult, WebServerError, WebServerResult};
pub use web::{AgencyStore, AppState};
pub use webserver_impl::WebServer;
