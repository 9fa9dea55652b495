//! Availability checking - date-range conflict detection for rooms.
//!
//! The overlap test treats both endpoints as occupied: an existing booking
//! conflicts when `existing.check_in_date <= check_out` and
//! `existing.check_out_date >= check_in`. A checkout on the same day as a
//! new check-in therefore conflicts (no same-day turnover). All functions
//! are read-only.

use crate::{
    entities::{Booking, Room, booking, room},
    errors::{Error, Result},
};
use chrono::NaiveDate;
use sea_orm::{PaginatorTrait, prelude::*};

/// Returns whether `room_id` is free of conflicting bookings for the given
/// date range.
///
/// Generic over [`ConnectionTrait`] so the booking manager can re-check
/// availability inside an open transaction immediately before inserting.
///
/// # Errors
/// Returns [`Error::InvalidDateRange`] unless `check_in < check_out`, or a
/// database error if the query fails.
pub async fn is_room_available<C>(
    conn: &C,
    room_id: i64,
    check_in: NaiveDate,
    check_out: NaiveDate,
) -> Result<bool>
where
    C: ConnectionTrait,
{
    validate_range(check_in, check_out)?;

    let conflicts = Booking::find()
        .filter(booking::Column::RoomId.eq(room_id))
        .filter(booking::Column::CheckInDate.lte(check_out))
        .filter(booking::Column::CheckOutDate.gte(check_in))
        .count(conn)
        .await?;

    Ok(conflicts == 0)
}

/// Returns every room, optionally restricted to one room type, that has no
/// conflicting booking for the given date range.
///
/// # Errors
/// Returns [`Error::InvalidDateRange`] unless `check_in < check_out`, or a
/// database error if a query fails.
pub async fn find_available_rooms(
    db: &DatabaseConnection,
    check_in: NaiveDate,
    check_out: NaiveDate,
    room_type: Option<&str>,
) -> Result<Vec<room::Model>> {
    validate_range(check_in, check_out)?;

    let mut query = Room::find();
    if let Some(kind) = room_type {
        query = query.filter(room::Column::RoomType.eq(kind));
    }
    let rooms = query.all(db).await?;

    let mut available = Vec::with_capacity(rooms.len());
    for candidate in rooms {
        if is_room_available(db, candidate.id, check_in, check_out).await? {
            available.push(candidate);
        }
    }
    Ok(available)
}

/// Rejects ranges where the check-in date is not strictly before check-out.
pub(crate) fn validate_range(check_in: NaiveDate, check_out: NaiveDate) -> Result<()> {
    if check_in >= check_out {
        return Err(Error::InvalidDateRange {
            check_in,
            check_out,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_invalid_range_rejected() -> Result<()> {
        let db = setup_test_db().await?;

        // check_in == check_out
        let result = is_room_available(&db, 1, date(2024, 6, 1), date(2024, 6, 1)).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::InvalidDateRange { .. }
        ));

        // check_in after check_out
        let result = is_room_available(&db, 1, date(2024, 6, 5), date(2024, 6, 1)).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::InvalidDateRange { .. }
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_no_bookings_means_available() -> Result<()> {
        let (db, room, _user) = setup_with_room_and_user().await?;

        let available = is_room_available(&db, room.id, date(2024, 6, 1), date(2024, 6, 3)).await?;
        assert!(available);

        Ok(())
    }

    #[tokio::test]
    async fn test_overlapping_range_conflicts() -> Result<()> {
        let (db, room, user) = setup_with_room_and_user().await?;
        create_test_booking(&db, room.id, user.id, date(2024, 6, 1), date(2024, 6, 3)).await?;

        // Straddles the existing stay
        let available = is_room_available(&db, room.id, date(2024, 6, 2), date(2024, 6, 4)).await?;
        assert!(!available);

        // Entirely inside
        let available = is_room_available(&db, room.id, date(2024, 6, 1), date(2024, 6, 2)).await?;
        assert!(!available);

        Ok(())
    }

    #[tokio::test]
    async fn test_back_to_back_same_day_conflicts() -> Result<()> {
        let (db, room, user) = setup_with_room_and_user().await?;
        create_test_booking(&db, room.id, user.id, date(2024, 6, 1), date(2024, 6, 3)).await?;

        // Check-in on the existing checkout day is rejected: both endpoints
        // count as occupied.
        let available = is_room_available(&db, room.id, date(2024, 6, 3), date(2024, 6, 5)).await?;
        assert!(!available);

        // Checkout on the existing check-in day is rejected for the same reason.
        let available =
            is_room_available(&db, room.id, date(2024, 5, 29), date(2024, 6, 1)).await?;
        assert!(!available);

        Ok(())
    }

    #[tokio::test]
    async fn test_disjoint_range_is_available() -> Result<()> {
        let (db, room, user) = setup_with_room_and_user().await?;
        create_test_booking(&db, room.id, user.id, date(2024, 6, 1), date(2024, 6, 3)).await?;

        let available = is_room_available(&db, room.id, date(2024, 6, 10), date(2024, 6, 12)).await?;
        assert!(available);

        let available = is_room_available(&db, room.id, date(2024, 5, 20), date(2024, 5, 25)).await?;
        assert!(available);

        Ok(())
    }

    #[tokio::test]
    async fn test_other_rooms_do_not_conflict() -> Result<()> {
        let (db, room, user) = setup_with_room_and_user().await?;
        let other_room = create_test_room(&db, "Deluxe Room").await?;
        create_test_booking(&db, room.id, user.id, date(2024, 6, 1), date(2024, 6, 3)).await?;

        let available =
            is_room_available(&db, other_room.id, date(2024, 6, 1), date(2024, 6, 3)).await?;
        assert!(available);

        Ok(())
    }

    #[tokio::test]
    async fn test_find_available_rooms_filters_conflicts() -> Result<()> {
        let (db, room, user) = setup_with_room_and_user().await?;
        let free_room = create_test_room(&db, "Deluxe Room").await?;
        create_test_booking(&db, room.id, user.id, date(2024, 6, 1), date(2024, 6, 3)).await?;

        let available = find_available_rooms(&db, date(2024, 6, 2), date(2024, 6, 4), None).await?;
        assert_eq!(available.len(), 1);
        assert_eq!(available[0].id, free_room.id);

        Ok(())
    }

    #[tokio::test]
    async fn test_find_available_rooms_by_type() -> Result<()> {
        let (db, _room, _user) = setup_with_room_and_user().await?;
        let deluxe = create_test_room(&db, "Deluxe Room").await?;

        let available = find_available_rooms(
            &db,
            date(2024, 6, 1),
            date(2024, 6, 3),
            Some("Deluxe Room"),
        )
        .await?;
        assert_eq!(available.len(), 1);
        assert_eq!(available[0].id, deluxe.id);

        let none = find_available_rooms(&db, date(2024, 6, 1), date(2024, 6, 3), Some("Suite"))
            .await?;
        assert!(none.is_empty());

        Ok(())
    }
}
