//! Booking lifecycle business logic.
//!
//! Creation validates the request, verifies room and user, and re-checks
//! availability inside the same database transaction that inserts the
//! booking row, so two racing requests for the same room serialize on the
//! store. Confirmation codes are sampled uniformly from a 36-character
//! alphabet through a caller-supplied random source; a unique-constraint
//! collision on the code column is tolerated by regenerating.

use crate::{
    core::availability,
    entities::{Booking, Room, User, booking, user::Role},
    errors::{Error, Result},
};
use chrono::NaiveDate;
use rand::Rng;
use sea_orm::{DbErr, QueryOrder, Set, SqlErr, TransactionTrait, prelude::*};
use tracing::debug;

/// Length of every confirmation code.
pub const CONFIRMATION_CODE_LEN: usize = 10;

/// Uppercase letters and digits, 36 characters.
const CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Collision probability per attempt is about 36^-10.
const CODE_RETRY_LIMIT: usize = 5;

/// Samples a fresh confirmation code from the caller-supplied random source.
#[must_use]
pub fn generate_confirmation_code<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..CONFIRMATION_CODE_LEN)
        .map(|_| {
            let idx = rng.gen_range(0..CODE_ALPHABET.len());
            CODE_ALPHABET[idx] as char
        })
        .collect()
}

/// Creates a booking for `room_id` and `user_id` over the given date range.
///
/// Room and user existence, the availability check, and the insert all run
/// inside one database transaction, so availability is checked against
/// committed state immediately before the row is written.
///
/// # Errors
/// - [`Error::InvalidDateRange`] unless `check_in < check_out`
/// - [`Error::Validation`] if `num_adults < 1` or `num_children < 0`
/// - [`Error::RoomNotFound`] / [`Error::UserNotFound`] for dangling ids
/// - [`Error::RoomUnavailable`] when a conflicting booking exists; retrying
///   the same range without changed inputs cannot succeed
#[allow(clippy::too_many_arguments)]
pub async fn create_booking<R: Rng + ?Sized>(
    db: &DatabaseConnection,
    rng: &mut R,
    room_id: i64,
    user_id: i64,
    check_in: NaiveDate,
    check_out: NaiveDate,
    num_adults: i32,
    num_children: i32,
) -> Result<booking::Model> {
    availability::validate_range(check_in, check_out)?;

    if num_adults < 1 {
        return Err(Error::Validation {
            message: format!("At least one adult is required, got {num_adults}"),
        });
    }
    if num_children < 0 {
        return Err(Error::Validation {
            message: format!("Number of children cannot be negative, got {num_children}"),
        });
    }

    let txn = db.begin().await?;

    Room::find_by_id(room_id)
        .one(&txn)
        .await?
        .ok_or(Error::RoomNotFound { id: room_id })?;

    User::find_by_id(user_id)
        .one(&txn)
        .await?
        .ok_or(Error::UserNotFound { id: user_id })?;

    if !availability::is_room_available(&txn, room_id, check_in, check_out).await? {
        return Err(Error::RoomUnavailable {
            room_id,
            check_in,
            check_out,
        });
    }

    let now = chrono::Utc::now();
    let mut attempts = 0;
    let created = loop {
        let code = generate_confirmation_code(rng);
        let model = booking::ActiveModel {
            room_id: Set(room_id),
            user_id: Set(user_id),
            check_in_date: Set(check_in),
            check_out_date: Set(check_out),
            num_adults: Set(num_adults),
            num_children: Set(num_children),
            total_guests: Set(num_adults + num_children),
            confirmation_code: Set(code),
            created_at: Set(now),
            ..Default::default()
        };

        match model.insert(&txn).await {
            Ok(created) => break created,
            Err(err) if attempts < CODE_RETRY_LIMIT && is_unique_violation(&err) => {
                attempts += 1;
            }
            Err(err) => return Err(err.into()),
        }
    };

    txn.commit().await?;

    debug!(
        booking_id = created.id,
        room_id,
        user_id,
        code = %created.confirmation_code,
        "booking created"
    );
    Ok(created)
}

/// Cancels (hard-deletes) a booking.
///
/// Only the booking's owner or an [`Role::Admin`] caller may cancel.
///
/// # Errors
/// - [`Error::BookingNotFound`] if the booking does not exist
/// - [`Error::Forbidden`] if the caller is neither owner nor admin
pub async fn cancel_booking(
    db: &DatabaseConnection,
    booking_id: i64,
    requesting_user_id: i64,
    requesting_role: Role,
) -> Result<()> {
    let record = Booking::find_by_id(booking_id)
        .one(db)
        .await?
        .ok_or(Error::BookingNotFound { id: booking_id })?;

    if requesting_role != Role::Admin && record.user_id != requesting_user_id {
        return Err(Error::Forbidden {
            message: "You can only cancel your own bookings".to_string(),
        });
    }

    record.delete(db).await?;
    debug!(booking_id, requesting_user_id, "booking cancelled");
    Ok(())
}

/// Retrieves a booking by its unique ID, `None` if absent.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_booking_by_id(
    db: &DatabaseConnection,
    booking_id: i64,
) -> Result<Option<booking::Model>> {
    Booking::find_by_id(booking_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Looks a booking up by its public confirmation code, `None` if absent.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_booking_by_confirmation_code(
    db: &DatabaseConnection,
    code: &str,
) -> Result<Option<booking::Model>> {
    Booking::find()
        .filter(booking::Column::ConfirmationCode.eq(code))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Retrieves all bookings for one user, newest first.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_bookings_for_user(
    db: &DatabaseConnection,
    user_id: i64,
) -> Result<Vec<booking::Model>> {
    Booking::find()
        .filter(booking::Column::UserId.eq(user_id))
        .order_by_desc(booking::Column::CreatedAt)
        .order_by_desc(booking::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves every booking in the system, newest first.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_all_bookings(db: &DatabaseConnection) -> Result<Vec<booking::Model>> {
    Booking::find()
        .order_by_desc(booking::Column::CreatedAt)
        .order_by_desc(booking::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;
    use std::collections::HashSet;

    #[tokio::test]
    async fn test_create_booking_invalid_range() -> Result<()> {
        let (db, room, user) = setup_with_room_and_user().await?;
        let mut rng = test_rng();

        let result = create_booking(
            &db,
            &mut rng,
            room.id,
            user.id,
            date(2024, 6, 3),
            date(2024, 6, 1),
            2,
            0,
        )
        .await;
        assert!(matches!(
            result.unwrap_err(),
            Error::InvalidDateRange { .. }
        ));

        let result = create_booking(
            &db,
            &mut rng,
            room.id,
            user.id,
            date(2024, 6, 1),
            date(2024, 6, 1),
            2,
            0,
        )
        .await;
        assert!(matches!(
            result.unwrap_err(),
            Error::InvalidDateRange { .. }
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_booking_requires_an_adult() -> Result<()> {
        let (db, room, user) = setup_with_room_and_user().await?;
        let mut rng = test_rng();

        let result = create_booking(
            &db,
            &mut rng,
            room.id,
            user.id,
            date(2024, 6, 1),
            date(2024, 6, 3),
            0,
            2,
        )
        .await;
        assert!(matches!(result.unwrap_err(), Error::Validation { .. }));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_booking_room_not_found() -> Result<()> {
        let db = setup_test_db().await?;
        let user = create_test_user(&db, "guest@example.com").await?;
        let mut rng = test_rng();

        let result = create_booking(
            &db,
            &mut rng,
            999,
            user.id,
            date(2024, 6, 1),
            date(2024, 6, 3),
            2,
            0,
        )
        .await;
        assert!(matches!(
            result.unwrap_err(),
            Error::RoomNotFound { id: 999 }
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_booking_user_not_found() -> Result<()> {
        let db = setup_test_db().await?;
        let room = create_test_room(&db, "Standard Room").await?;
        let mut rng = test_rng();

        let result = create_booking(
            &db,
            &mut rng,
            room.id,
            999,
            date(2024, 6, 1),
            date(2024, 6, 3),
            2,
            0,
        )
        .await;
        assert!(matches!(
            result.unwrap_err(),
            Error::UserNotFound { id: 999 }
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_booking_success() -> Result<()> {
        let (db, room, user) = setup_with_room_and_user().await?;
        let mut rng = test_rng();

        let before = chrono::Utc::now();
        let created = create_booking(
            &db,
            &mut rng,
            room.id,
            user.id,
            date(2024, 6, 1),
            date(2024, 6, 3),
            2,
            1,
        )
        .await?;
        let after = chrono::Utc::now();

        assert_eq!(created.room_id, room.id);
        assert_eq!(created.user_id, user.id);
        assert_eq!(created.num_adults, 2);
        assert_eq!(created.num_children, 1);
        assert_eq!(created.total_guests, 3);
        assert_eq!(created.confirmation_code.len(), CONFIRMATION_CODE_LEN);
        assert!(
            created
                .confirmation_code
                .chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
        );
        assert!(created.created_at >= before);
        assert!(created.created_at <= after);

        Ok(())
    }

    #[tokio::test]
    async fn test_create_booking_conflict_rejected() -> Result<()> {
        let (db, room, user) = setup_with_room_and_user().await?;
        let mut rng = test_rng();

        create_booking(
            &db,
            &mut rng,
            room.id,
            user.id,
            date(2024, 6, 1),
            date(2024, 6, 3),
            2,
            0,
        )
        .await?;

        // Overlap on 06-02/06-03
        let result = create_booking(
            &db,
            &mut rng,
            room.id,
            user.id,
            date(2024, 6, 2),
            date(2024, 6, 4),
            1,
            0,
        )
        .await;
        assert!(matches!(
            result.unwrap_err(),
            Error::RoomUnavailable { .. }
        ));

        // Back-to-back on the checkout day is also rejected (both endpoints
        // count as occupied).
        let result = create_booking(
            &db,
            &mut rng,
            room.id,
            user.id,
            date(2024, 6, 3),
            date(2024, 6, 5),
            1,
            0,
        )
        .await;
        assert!(matches!(
            result.unwrap_err(),
            Error::RoomUnavailable { .. }
        ));

        // A disjoint later stay succeeds.
        let second = create_booking(
            &db,
            &mut rng,
            room.id,
            user.id,
            date(2024, 6, 10),
            date(2024, 6, 12),
            1,
            0,
        )
        .await?;
        assert_ne!(second.confirmation_code.len(), 0);

        Ok(())
    }

    #[test]
    fn test_confirmation_codes_unique_across_many_samples() {
        let mut rng = test_rng();
        let mut seen = HashSet::with_capacity(10_000);

        for _ in 0..10_000 {
            let code = generate_confirmation_code(&mut rng);
            assert_eq!(code.len(), CONFIRMATION_CODE_LEN);
            assert!(
                code.chars()
                    .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
            );
            assert!(seen.insert(code), "confirmation code collision");
        }
    }

    #[tokio::test]
    async fn test_cancel_booking_by_owner() -> Result<()> {
        let (db, room, user) = setup_with_room_and_user().await?;
        let booking =
            create_test_booking(&db, room.id, user.id, date(2024, 6, 1), date(2024, 6, 3)).await?;

        cancel_booking(&db, booking.id, user.id, Role::User).await?;

        assert!(get_booking_by_id(&db, booking.id).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_cancel_booking_by_admin() -> Result<()> {
        let (db, room, user) = setup_with_room_and_user().await?;
        let admin = create_custom_user(&db, "Admin", "admin@example.com", Role::Admin).await?;
        let booking =
            create_test_booking(&db, room.id, user.id, date(2024, 6, 1), date(2024, 6, 3)).await?;

        cancel_booking(&db, booking.id, admin.id, Role::Admin).await?;

        assert!(get_booking_by_id(&db, booking.id).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_cancel_booking_forbidden_for_stranger() -> Result<()> {
        let (db, room, user) = setup_with_room_and_user().await?;
        let stranger =
            create_custom_user(&db, "Stranger", "stranger@example.com", Role::User).await?;
        let booking =
            create_test_booking(&db, room.id, user.id, date(2024, 6, 1), date(2024, 6, 3)).await?;

        let result = cancel_booking(&db, booking.id, stranger.id, Role::User).await;
        assert!(matches!(result.unwrap_err(), Error::Forbidden { .. }));

        // The booking record is left intact.
        assert!(get_booking_by_id(&db, booking.id).await?.is_some());
        Ok(())
    }

    #[tokio::test]
    async fn test_cancel_booking_not_found() -> Result<()> {
        let db = setup_test_db().await?;

        let result = cancel_booking(&db, 999, 1, Role::Admin).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::BookingNotFound { id: 999 }
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_get_booking_by_confirmation_code() -> Result<()> {
        let (db, room, user) = setup_with_room_and_user().await?;
        let booking =
            create_test_booking(&db, room.id, user.id, date(2024, 6, 1), date(2024, 6, 3)).await?;

        let found = get_booking_by_confirmation_code(&db, &booking.confirmation_code).await?;
        assert_eq!(found.unwrap().id, booking.id);

        let missing = get_booking_by_confirmation_code(&db, "0000000000").await?;
        assert!(missing.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn test_get_bookings_for_user_scoped() -> Result<()> {
        let (db, room, user) = setup_with_room_and_user().await?;
        let other = create_custom_user(&db, "Other", "other@example.com", Role::User).await?;
        let other_room = create_test_room(&db, "Deluxe Room").await?;

        let mine =
            create_test_booking(&db, room.id, user.id, date(2024, 6, 1), date(2024, 6, 3)).await?;
        create_test_booking(
            &db,
            other_room.id,
            other.id,
            date(2024, 6, 1),
            date(2024, 6, 3),
        )
        .await?;

        let bookings = get_bookings_for_user(&db, user.id).await?;
        assert_eq!(bookings.len(), 1);
        assert_eq!(bookings[0].id, mine.id);

        let all = get_all_bookings(&db).await?;
        assert_eq!(all.len(), 2);

        Ok(())
    }
}
