//! Service-specific tests
//!
//! One file per service implementation, sharing the fixtures below.

mod breed_validator;

pub mod common {
    use crate::traits::{NewCat, NewTarget};

    pub fn new_cat(name: &str) -> NewCat {
        NewCat {
            name: name.to_string(),
            years_experience: 3,
            breed: "Siamese".to_string(),
            salary: 1000.0,
        }
    }

    pub fn new_target(name: &str) -> NewTarget {
        NewTarget {
            name: name.to_string(),
            country: "Portugal".to_string(),
            notes: String::new(),
        }
    }
}
