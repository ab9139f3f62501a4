//! Agency error types
//!
//! Every failure leaving the agency core is one of four kinds. The HTTP layer
//! only has to match on the variant to choose a status code.

use shared::SharedError;
use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Error, Debug)]
pub enum AgencyError {
    /// Malformed input or a cross-reference that does not line up
    #[error("{message}")]
    BadRequest { message: String },

    #[error("{message}")]
    NotFound { message: String },

    /// A business invariant would be violated
    #[error("{message}")]
    Conflict { message: String },

    /// Storage or upstream failure; `context` and `source` are for logs only
    #[error("internal error: {context}")]
    Internal {
        context: String,
        #[source]
        source: Option<BoxError>,
    },
}

impl AgencyError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest { message: message.into() }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound { message: message.into() }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict { message: message.into() }
    }

    pub fn internal(context: impl Into<String>) -> Self {
        Self::Internal {
            context: context.into(),
            source: None,
        }
    }

    pub fn internal_with<E>(context: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Internal {
            context: context.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Message safe to hand to a client
    pub fn public_message(&self) -> String {
        match self {
            Self::Internal { .. } => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl From<SharedError> for AgencyError {
    fn from(err: SharedError) -> Self {
        match err {
            SharedError::InvalidId { input } => Self::bad_request(format!("invalid id \"{input}\"")),
            other => Self::bad_request(other.to_string()),
        }
    }
}

impl From<rusqlite::Error> for AgencyError {
    fn from(err: rusqlite::Error) -> Self {
        Self::internal_with("database error", err)
    }
}

pub type AgencyResult<T> = Result<T, AgencyError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_internal_hides_details() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk on fire");
        let err = AgencyError::internal_with("persist target", io);
        assert_eq!(err.public_message(), "Internal server error");
        assert_eq!(err.to_string(), "internal error: persist target");
        assert_eq!(err.source().unwrap().to_string(), "disk on fire");
    }

    #[test]
    fn test_conflict_message_is_public() {
        let err = AgencyError::conflict("cannot delete assigned mission");
        assert!(matches!(err, AgencyError::Conflict { .. }));
        assert_eq!(err.public_message(), "cannot delete assigned mission");
    }

    #[test]
    fn test_database_error_is_internal() {
        let err: AgencyError = rusqlite::Error::QueryReturnedNoRows.into();
        assert_eq!(err.to_string(), "internal error: database error");
        assert_eq!(err.public_message(), "Internal server error");
    }

    #[test]
    fn test_shared_error_becomes_bad_request() {
        let err: AgencyError = SharedError::ValidationFailed {
            messages: vec!["name is required".to_string()],
        }
        .into();
        assert!(matches!(err, AgencyError::BadRequest { ref message } if message == "name is required"));
    }
}
