//! Booking entity - Represents a reserved stay for one room and one user.
//!
//! The stay is the half-open calendar range `[check_in_date, check_out_date)`
//! for pricing purposes, but conflict detection treats both endpoints as
//! occupied (no same-day turnover). The `confirmation_code` is the
//! public-facing identifier, distinct from the row id, assigned once at
//! creation and never changed.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Booking database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "bookings")]
pub struct Model {
    /// Unique identifier for the booking
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Room this booking reserves
    pub room_id: i64,
    /// User who owns this booking
    pub user_id: i64,
    /// First night of the stay
    pub check_in_date: Date,
    /// Departure date; must be strictly after `check_in_date`
    pub check_out_date: Date,
    /// Number of adult guests, at least 1
    pub num_adults: i32,
    /// Number of child guests, zero or more
    pub num_children: i32,
    /// Computed as `num_adults + num_children`
    pub total_guests: i32,
    /// Public 10-character alphanumeric confirmation code
    #[sea_orm(unique)]
    pub confirmation_code: String,
    /// When the booking was created
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Booking and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each booking reserves one room
    #[sea_orm(
        belongs_to = "super::room::Entity",
        from = "Column::RoomId",
        to = "super::room::Column::Id"
    )]
    Room,
    /// Each booking belongs to one user
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
}

impl Related<super::room::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Room.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
