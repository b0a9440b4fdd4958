//! Database configuration module.
//!
//! Handles the `SQLite` connection and table creation using `SeaORM`'s
//! `Schema::create_table_from_entity`, so the schema always matches the
//! entity definitions without hand-written SQL.

use crate::entities::OrderRecord;
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};
use tracing::info;

/// Gets the database URL from the `DATABASE_URL` environment variable,
/// falling back to a local `SQLite` file.
#[must_use]
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| "sqlite://data/coffee_break.sqlite".to_string())
}

/// Establishes a connection to the database named by [`get_database_url`].
///
/// # Errors
///
/// Returns [`Error::Database`](crate::errors::Error::Database) when the
/// connection cannot be established.
pub async fn create_connection() -> Result<DatabaseConnection> {
    let database_url = get_database_url();
    info!(url = %database_url, "connecting to order database");
    Database::connect(&database_url).await.map_err(Into::into)
}

/// Creates the orders table from the entity definition.
///
/// # Errors
///
/// Returns [`Error::Database`](crate::errors::Error::Database) when the
/// statement fails.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let orders_table = schema.create_table_from_entity(OrderRecord);
    db.execute(builder.build(&orders_table)).await?;

    Ok(())
}
