//! Unified error types for the engine.
//!
//! Validation outcomes (`Validation`) are ordinary return values, not errors;
//! this enum covers catalog/configuration problems, unknown package ids, the
//! defensive `build_order` failure, and infrastructure errors surfaced from
//! the persistence layer.

use crate::core::validate::ValidationFailure;
use thiserror::Error;

/// Crate-wide error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Catalog data failed to load or violated a structural invariant.
    #[error("Catalog error: {message}")]
    Catalog {
        /// What went wrong
        message: String,
    },

    /// A package id was referenced that the catalog does not contain.
    #[error("Unknown package id: {id}")]
    UnknownPackage {
        /// The offending id
        id: String,
    },

    /// `build_order` was invoked on a selection that does not validate.
    /// This is a caller bug: validate first, then build.
    #[error("Selection failed validation: {reason}")]
    InvalidSelection {
        /// The first validation failure found
        reason: ValidationFailure,
    },

    /// Database error from the persistence layer.
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

/// Convenience `Result` type.
pub type Result<T> = std::result::Result<T, Error>;
