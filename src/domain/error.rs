//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent violated preconditions of network and zone operations.
///
/// All of them are raised before any mutation happens, so a failed call leaves
/// the network untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("city not found: {0}")]
    CityNotFound(String),

    #[error("parent zone not found in {city}: {parent}")]
    ParentNotFound { city: String, parent: String },

    #[error("zone not found in {city}: {zone}")]
    ZoneNotFound { city: String, zone: String },

    #[error("cannot connect {a} and {b}: unknown city {missing}")]
    EdgeEndpointNotFound {
        a: String,
        b: String,
        missing: String,
    },

    #[error("city already exists: {0}")]
    DuplicateCity(String),
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
