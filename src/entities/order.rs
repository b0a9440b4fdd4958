//! Order entity - A submitted order as stored by the database sink.
//!
//! The commonly queried fields are broken out into columns; the full order
//! snapshot (line items, add-ons, event metadata) travels in the JSON
//! `payload` column so the record can be replayed to downstream consumers
//! without a join schema.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Submitted order database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    /// Unique identifier for the order
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Caller-supplied session identifier the order was submitted under
    pub session_id: String,
    /// Customer name
    pub customer_name: String,
    /// Customer email
    pub email: String,
    /// Booked package id (e.g. "C4")
    pub package_id: String,
    /// Booked package display name
    pub package_name: String,
    /// Attendee count
    pub attendee_count: i32,
    /// Computed total, whole pesos
    pub total_price: i64,
    /// Lifecycle tag ("pending" at submission)
    pub status: String,
    /// Full order snapshot as JSON
    #[sea_orm(column_type = "Text")]
    pub payload: String,
    /// When the order was built
    pub created_at: DateTime<Utc>,
}

/// Orders stand alone; there are no related entities.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
