//! Spy cat payloads

use serde::{Deserialize, Serialize};

use super::{require_non_negative, require_text, Validate};
use crate::errors::{SharedError, SharedResult};

/// Body of `POST /cats`
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CreateCatRequest {
    #[serde(default)]
    pub name: String,
    pub years_experience: u32,
    #[serde(default)]
    pub breed: String,
    pub salary: f64,
}

impl Validate for CreateCatRequest {
    fn validate(&self) -> SharedResult<()> {
        let mut messages = Vec::new();
        require_text("name", &self.name, &mut messages);
        require_text("breed", &self.breed, &mut messages);
        require_non_negative("salary", self.salary, &mut messages);
        SharedError::from_messages(messages)
    }
}

/// Body of `PATCH /cats/{id}`; salary is the only mutable attribute
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct UpdateCatRequest {
    pub salary: f64,
}

impl Validate for UpdateCatRequest {
    fn validate(&self) -> SharedResult<()> {
        let mut messages = Vec::new();
        require_non_negative("salary", self.salary, &mut messages);
        SharedError::from_messages(messages)
    }
}
