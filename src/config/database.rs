//! Database configuration module.
//!
//! Handles database connection and table creation using `SeaORM`. Table
//! creation uses `Schema::create_table_from_entity` to generate SQL from
//! the entity definitions, so the database schema always matches the Rust
//! struct definitions without manual SQL.

use crate::entities::{Booking, Room, User, Wallet, WalletTransaction};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};
use tracing::info;

/// Gets the database URL from the `DATABASE_URL` environment variable or
/// returns the default local `SQLite` path.
#[must_use]
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://data/stayledger.sqlite".to_string())
}

/// Establishes a database connection using [`get_database_url`].
///
/// # Errors
/// Returns an error if the connection cannot be established.
pub async fn create_connection() -> Result<DatabaseConnection> {
    let database_url = get_database_url();
    let db = Database::connect(&database_url).await?;
    info!(url = %database_url, "database connection established");
    Ok(db)
}

/// Creates all tables from the entity definitions: rooms, users, bookings,
/// wallets, and wallet transactions.
///
/// # Errors
/// Returns an error if a table creation statement fails.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let room_table = schema.create_table_from_entity(Room);
    let user_table = schema.create_table_from_entity(User);
    let booking_table = schema.create_table_from_entity(Booking);
    let wallet_table = schema.create_table_from_entity(Wallet);
    let wallet_transaction_table = schema.create_table_from_entity(WalletTransaction);

    db.execute(builder.build(&room_table)).await?;
    db.execute(builder.build(&user_table)).await?;
    db.execute(builder.build(&booking_table)).await?;
    db.execute(builder.build(&wallet_table)).await?;
    db.execute(builder.build(&wallet_transaction_table)).await?;

    Ok(())
}
