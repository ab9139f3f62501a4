//! Shared error types for the spy cat agency

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SharedError {
    /// One or more request fields failed validation; messages are comma-joined
    #[error("{}", .messages.join(", "))]
    ValidationFailed { messages: Vec<String> },

    #[error("Invalid identifier: {input}")]
    InvalidId { input: String },
}

impl SharedError {
    /// Turn a list of field complaints into an error, or `Ok` when there are none
    pub fn from_messages(messages: Vec<String>) -> SharedResult<()> {
        if messages.is_empty() {
            Ok(())
        } else {
            Err(SharedError::ValidationFailed { messages })
        }
    }
}

pub type SharedResult<T> = Result<T, SharedError>;
