//! Core shared types and identifiers

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::SharedError;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl $name {
            pub fn value(&self) -> u64 {
                self.0
            }
        }

        impl From<u64> for $name {
            fn from(value: u64) -> Self {
                Self(value)
            }
        }

        impl FromStr for $name {
            type Err = SharedError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim()
                    .parse::<u64>()
                    .map(Self)
                    .map_err(|_| SharedError::InvalidId { input: s.to_string() })
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

entity_id!(
    /// Identifier of a spy cat
    CatId
);
entity_id!(
    /// Identifier of a mission
    MissionId
);
entity_id!(
    /// Identifier of a mission target
    TargetId
);

/// A spy cat as stored
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Cat {
    pub id: CatId,
    pub name: String,
    pub years_experience: u32,
    pub breed: String,
    pub salary: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A target belonging to exactly one mission
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Target {
    pub id: TargetId,
    pub mission_id: MissionId,
    pub name: String,
    pub country: String,
    pub notes: String,
    pub complete: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A mission hydrated with its assigned cat and targets
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Mission {
    pub id: MissionId,
    pub cat_id: Option<CatId>,
    pub complete: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cat: Option<Cat>,
    #[serde(default)]
    pub targets: Vec<Target>,
}

impl Mission {
    pub fn target(&self, id: TargetId) -> Option<&Target> {
        self.targets.iter().find(|t| t.id == id)
    }
}

/// Read view of a cat together with its current mission
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CatProfile {
    #[serde(flatten)]
    pub cat: Cat,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mission: Option<Mission>,
}

/// Logical component name attached to log events
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Component {
    Api,
    Cats,
    Missions,
    Store,
    BreedRegistry,
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Component::Api => "api",
            Component::Cats => "cats",
            Component::Missions => "missions",
            Component::Store => "store",
            Component::BreedRegistry => "breed_registry",
        };
        f.write_str(name)
    }
}
