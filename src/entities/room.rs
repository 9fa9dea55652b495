//! Room entity - Represents a bookable room in the inventory.
//!
//! Each room carries a type label, a nightly price, a description, and an
//! optional photo reference. Rooms are created and mutated by administrators
//! only; deleting a room removes every booking that references it.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Room database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "rooms")]
pub struct Model {
    /// Unique identifier for the room
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Category label (e.g., "Standard Room", "Deluxe Room", "Suite")
    pub room_type: String,
    /// Nightly price
    pub price: f64,
    /// Human-readable description of the room
    pub description: String,
    /// Optional photo reference (URL or storage path)
    pub photo_url: Option<String>,
}

/// Defines relationships between Room and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One room has many bookings
    #[sea_orm(has_many = "super::booking::Entity")]
    Bookings,
}

impl Related<super::booking::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Bookings.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
