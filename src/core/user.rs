//! User record business logic.
//!
//! Only the minimal account surface the booking and ledger aggregates
//! need: creation and lookup. Credential and token handling live in the
//! surrounding system.

use crate::{
    entities::{User, user, user::Role},
    errors::{Error, Result},
};
use sea_orm::{Set, prelude::*};

/// Creates a new user record.
///
/// # Errors
/// Returns [`Error::Validation`] for an empty name or email, or a database
/// error (including a unique violation on a duplicate email).
pub async fn create_user(
    db: &DatabaseConnection,
    name: String,
    email: String,
    phone_number: Option<String>,
    role: Role,
) -> Result<user::Model> {
    if name.trim().is_empty() {
        return Err(Error::Validation {
            message: "User name cannot be empty".to_string(),
        });
    }
    if email.trim().is_empty() {
        return Err(Error::Validation {
            message: "User email cannot be empty".to_string(),
        });
    }

    user::ActiveModel {
        name: Set(name.trim().to_string()),
        email: Set(email.trim().to_string()),
        phone_number: Set(phone_number),
        role: Set(role),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Retrieves a user by their unique ID, `None` if absent.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_user_by_id(db: &DatabaseConnection, user_id: i64) -> Result<Option<user::Model>> {
    User::find_by_id(user_id).one(db).await.map_err(Into::into)
}

/// Retrieves a user by email, `None` if absent.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_user_by_email(
    db: &DatabaseConnection,
    email: &str,
) -> Result<Option<user::Model>> {
    User::find()
        .filter(user::Column::Email.eq(email))
        .one(db)
        .await
        .map_err(Into::into)
}
