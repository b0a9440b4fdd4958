//! Entity module - `SeaORM` entity definitions for the database tables.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod order;

pub use order::{Column as OrderColumn, Entity as OrderRecord, Model as OrderRecordModel};
