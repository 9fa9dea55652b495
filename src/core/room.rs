//! Room inventory business logic.
//!
//! Reads are open to any caller; every mutation requires the elevated
//! [`Role::Admin`]. Partial updates keep the current value for any field
//! the caller leaves out. Deleting a room removes the room's bookings in
//! the same transaction, so no booking is ever left pointing at a missing
//! room.

use crate::{
    entities::{Booking, Room, booking, room, user::Role},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, QuerySelect, Set, TransactionTrait, prelude::*};
use tracing::debug;

/// Creates a new room.
///
/// # Errors
/// Returns [`Error::Forbidden`] unless the caller is an admin,
/// [`Error::Validation`] for an empty type or description,
/// [`Error::InvalidAmount`] unless the price is positive and finite, or a
/// database error.
pub async fn create_room(
    db: &DatabaseConnection,
    requesting_role: Role,
    room_type: String,
    price: f64,
    description: String,
    photo_url: Option<String>,
) -> Result<room::Model> {
    require_admin(requesting_role, "add rooms")?;

    if room_type.trim().is_empty() {
        return Err(Error::Validation {
            message: "Room type cannot be empty".to_string(),
        });
    }
    if description.trim().is_empty() {
        return Err(Error::Validation {
            message: "Room description cannot be empty".to_string(),
        });
    }
    validate_price(price)?;

    let created = room::ActiveModel {
        room_type: Set(room_type.trim().to_string()),
        price: Set(price),
        description: Set(description.trim().to_string()),
        photo_url: Set(photo_url),
        ..Default::default()
    }
    .insert(db)
    .await?;

    debug!(room_id = created.id, room_type = %created.room_type, "room created");
    Ok(created)
}

/// Applies a partial update to a room: `None` fields keep their current
/// values.
///
/// # Errors
/// Returns [`Error::Forbidden`] unless the caller is an admin,
/// [`Error::RoomNotFound`] for a dangling id, [`Error::Validation`] /
/// [`Error::InvalidAmount`] for rejected field values, or a database error.
pub async fn update_room(
    db: &DatabaseConnection,
    requesting_role: Role,
    room_id: i64,
    room_type: Option<String>,
    price: Option<f64>,
    description: Option<String>,
    photo_url: Option<String>,
) -> Result<room::Model> {
    require_admin(requesting_role, "update rooms")?;

    let existing = Room::find_by_id(room_id)
        .one(db)
        .await?
        .ok_or(Error::RoomNotFound { id: room_id })?;

    if let Some(ref t) = room_type {
        if t.trim().is_empty() {
            return Err(Error::Validation {
                message: "Room type cannot be empty".to_string(),
            });
        }
    }
    if let Some(ref d) = description {
        if d.trim().is_empty() {
            return Err(Error::Validation {
                message: "Room description cannot be empty".to_string(),
            });
        }
    }
    if let Some(p) = price {
        validate_price(p)?;
    }

    let mut active: room::ActiveModel = existing.into();
    if let Some(t) = room_type {
        active.room_type = Set(t.trim().to_string());
    }
    if let Some(p) = price {
        active.price = Set(p);
    }
    if let Some(d) = description {
        active.description = Set(d.trim().to_string());
    }
    if let Some(url) = photo_url {
        active.photo_url = Set(Some(url));
    }

    active.update(db).await.map_err(Into::into)
}

/// Deletes a room and, in the same transaction, every booking that
/// references it.
///
/// # Errors
/// Returns [`Error::Forbidden`] unless the caller is an admin,
/// [`Error::RoomNotFound`] for a dangling id, or a database error.
pub async fn delete_room(
    db: &DatabaseConnection,
    requesting_role: Role,
    room_id: i64,
) -> Result<()> {
    require_admin(requesting_role, "delete rooms")?;

    let txn = db.begin().await?;

    let existing = Room::find_by_id(room_id)
        .one(&txn)
        .await?
        .ok_or(Error::RoomNotFound { id: room_id })?;

    let removed = Booking::delete_many()
        .filter(booking::Column::RoomId.eq(room_id))
        .exec(&txn)
        .await?;
    existing.delete(&txn).await?;

    txn.commit().await?;

    debug!(
        room_id,
        cascaded_bookings = removed.rows_affected,
        "room deleted"
    );
    Ok(())
}

/// Retrieves a room by its unique ID, `None` if absent.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_room_by_id(db: &DatabaseConnection, room_id: i64) -> Result<Option<room::Model>> {
    Room::find_by_id(room_id).one(db).await.map_err(Into::into)
}

/// Retrieves every room, ordered alphabetically by type label.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_all_rooms(db: &DatabaseConnection) -> Result<Vec<room::Model>> {
    Room::find()
        .order_by_asc(room::Column::RoomType)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves the distinct room type labels in the inventory.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_room_types(db: &DatabaseConnection) -> Result<Vec<String>> {
    Room::find()
        .select_only()
        .column(room::Column::RoomType)
        .distinct()
        .order_by_asc(room::Column::RoomType)
        .into_tuple::<String>()
        .all(db)
        .await
        .map_err(Into::into)
}

fn require_admin(role: Role, action: &str) -> Result<()> {
    if role == Role::Admin {
        Ok(())
    } else {
        Err(Error::Forbidden {
            message: format!("Only administrators may {action}"),
        })
    }
}

fn validate_price(price: f64) -> Result<()> {
    if !(price.is_finite() && price > 0.0) {
        return Err(Error::InvalidAmount { amount: price });
    }
    Ok(())
}
