//! Service implementations
//!
//! Real implementations of the store and breed registry traits

pub mod breed_validator;
pub mod memory_store;
pub mod sqlite_store;

#[cfg(test)]
mod tests;

pub use breed_validator::{BreedRegistryConfig, RealBreedValidator};
pub use memory_store::RealMemoryStore;
pub use sqlite_store::RealSqliteStore;
