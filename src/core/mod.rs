//! Core business logic - Framework-agnostic selection, pricing, validation,
//! and order-building operations.
//!
//! Everything here is pure computation over a [`Selection`](selection::Selection)
//! value and an injected read-only [`Catalog`](crate::catalog::Catalog): no
//! I/O, no suspension, identical behavior from a UI callback or a unit test.

/// Order snapshot construction
pub mod order;
/// Total price computation
pub mod pricing;
/// Selection state and quota-clamped mutation operations
pub mod selection;
/// Submit-time validation
pub mod validate;
