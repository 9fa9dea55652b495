//! Shared test utilities.
//!
//! Common helper functions for setting up test databases and creating test
//! entities with sensible defaults, plus a seeded random source so
//! confirmation-code behavior is deterministic in tests.

use crate::{
    core::{booking, room, user},
    entities::{self, user::Role},
    errors::Result,
};
use chrono::NaiveDate;
use rand::{SeedableRng, rngs::StdRng};
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// A deterministic random source for confirmation-code generation.
#[must_use]
pub fn test_rng() -> StdRng {
    StdRng::seed_from_u64(0x5EED)
}

/// Shorthand for building calendar dates in test scenarios.
#[must_use]
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
}

/// Creates a test user with sensible defaults.
///
/// # Defaults
/// * `name`: "Test User"
/// * `phone_number`: None
/// * `role`: [`Role::User`]
pub async fn create_test_user(
    db: &DatabaseConnection,
    email: &str,
) -> Result<entities::user::Model> {
    user::create_user(db, "Test User".to_string(), email.to_string(), None, Role::User).await
}

/// Creates a test user with custom name and role.
pub async fn create_custom_user(
    db: &DatabaseConnection,
    name: &str,
    email: &str,
    role: Role,
) -> Result<entities::user::Model> {
    user::create_user(db, name.to_string(), email.to_string(), None, role).await
}

/// Creates a test room with sensible defaults.
///
/// # Defaults
/// * `price`: 2500.0
/// * `description`: "Comfortable room for testing"
/// * `photo_url`: None
pub async fn create_test_room(
    db: &DatabaseConnection,
    room_type: &str,
) -> Result<entities::room::Model> {
    room::create_room(
        db,
        Role::Admin,
        room_type.to_string(),
        2500.0,
        "Comfortable room for testing".to_string(),
        None,
    )
    .await
}

/// Creates a test booking with two adults and no children, using the
/// deterministic test random source.
///
/// Each call seeds a fresh rng, so a second booking in the same database
/// regenerates the same leading codes and exercises the collision-retry
/// path before landing on an unused one.
pub async fn create_test_booking(
    db: &DatabaseConnection,
    room_id: i64,
    user_id: i64,
    check_in: NaiveDate,
    check_out: NaiveDate,
) -> Result<entities::booking::Model> {
    let mut rng = test_rng();
    booking::create_booking(db, &mut rng, room_id, user_id, check_in, check_out, 2, 0).await
}

/// Sets up a complete test environment with one room and one user.
/// Returns (db, room, user) for common booking scenarios.
pub async fn setup_with_room_and_user() -> Result<(
    DatabaseConnection,
    entities::room::Model,
    entities::user::Model,
)> {
    let db = setup_test_db().await?;
    let room = create_test_room(&db, "Standard Room").await?;
    let user = create_test_user(&db, "guest@example.com").await?;
    Ok((db, room, user))
}
