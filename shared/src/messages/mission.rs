//! Mission and target payloads

use serde::{Deserialize, Serialize};

use super::{require_text, Validate};
use crate::errors::{SharedError, SharedResult};

/// Fewest targets a mission may hold
pub const MIN_TARGETS: usize = 1;
/// Most targets a mission may hold
pub const MAX_TARGETS: usize = 3;

/// A target to be created, either with its mission or added later
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct TargetRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub notes: String,
}

impl TargetRequest {
    pub fn new(name: impl Into<String>, country: impl Into<String>, notes: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            country: country.into(),
            notes: notes.into(),
        }
    }

    fn collect_errors(&self, prefix: &str, messages: &mut Vec<String>) {
        require_text(&format!("{prefix}name"), &self.name, messages);
        require_text(&format!("{prefix}country"), &self.country, messages);
    }
}

impl Validate for TargetRequest {
    fn validate(&self) -> SharedResult<()> {
        let mut messages = Vec::new();
        self.collect_errors("", &mut messages);
        SharedError::from_messages(messages)
    }
}

/// Body of `POST /missions`
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CreateMissionRequest {
    #[serde(default)]
    pub targets: Vec<TargetRequest>,
}

impl Validate for CreateMissionRequest {
    fn validate(&self) -> SharedResult<()> {
        let mut messages = Vec::new();
        if self.targets.len() < MIN_TARGETS {
            messages.push(format!("targets must have at least {MIN_TARGETS} items"));
        }
        if self.targets.len() > MAX_TARGETS {
            messages.push(format!("targets must have at most {MAX_TARGETS} items"));
        }
        for (index, target) in self.targets.iter().enumerate() {
            target.collect_errors(&format!("targets[{index}]."), &mut messages);
        }
        SharedError::from_messages(messages)
    }
}

/// Body of `PATCH /missions/{id}`
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct UpdateMissionRequest {
    #[serde(default)]
    pub complete: Option<bool>,
}

/// Body of `PATCH /missions/{id}/targets/{target_id}`; omitted fields stay untouched
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct UpdateTargetRequest {
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub complete: Option<bool>,
}

impl UpdateTargetRequest {
    pub fn notes(notes: impl Into<String>) -> Self {
        Self {
            notes: Some(notes.into()),
            complete: None,
        }
    }

    pub fn completed() -> Self {
        Self {
            notes: None,
            complete: Some(true),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target(name: &str) -> TargetRequest {
        TargetRequest::new(name, "France", "")
    }

    #[test]
    fn test_target_count_bounds() {
        let empty = CreateMissionRequest { targets: vec![] };
        assert_eq!(
            empty.validate().unwrap_err().to_string(),
            "targets must have at least 1 items"
        );

        let four = CreateMissionRequest {
            targets: vec![target("a"), target("b"), target("c"), target("d")],
        };
        assert_eq!(
            four.validate().unwrap_err().to_string(),
            "targets must have at most 3 items"
        );

        let three = CreateMissionRequest {
            targets: vec![target("a"), target("b"), target("c")],
        };
        assert!(three.validate().is_ok());
    }

    #[test]
    fn test_target_fields_are_indexed() {
        let request = CreateMissionRequest {
            targets: vec![target("a"), TargetRequest::new("", "", "notes")],
        };
        assert_eq!(
            request.validate().unwrap_err().to_string(),
            "targets[1].name is required, targets[1].country is required"
        );
    }

    #[test]
    fn test_partial_target_update_deserializes() {
        let only_notes: UpdateTargetRequest = serde_json::from_str(r#"{"notes": "seen at dawn"}"#).unwrap();
        assert_eq!(only_notes, UpdateTargetRequest::notes("seen at dawn"));

        let empty: UpdateTargetRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, UpdateTargetRequest::default());
    }
}
