//! User entity - Represents an account that can book rooms and hold a wallet.
//!
//! Only the fields the booking and ledger aggregates reference live here;
//! credential and token handling belong to the surrounding system.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Permission level of a user. `Admin` may act on any user's bookings and
/// mutate the room inventory; `User` may only act on their own records.
#[derive(Copy, Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum Role {
    /// Ordinary account holder
    #[sea_orm(string_value = "USER")]
    User,
    /// Elevated role authorized for administrative operations
    #[sea_orm(string_value = "ADMIN")]
    Admin,
}

/// User database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    /// Unique identifier for the user
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name
    pub name: String,
    /// Contact email, unique per account
    #[sea_orm(unique)]
    pub email: String,
    /// Optional contact phone number
    pub phone_number: Option<String>,
    /// Permission level
    pub role: Role,
}

/// Defines relationships between User and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One user has many bookings
    #[sea_orm(has_many = "super::booking::Entity")]
    Bookings,
    /// One user has at most one wallet
    #[sea_orm(has_many = "super::wallet::Entity")]
    Wallets,
}

impl Related<super::booking::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Bookings.def()
    }
}

impl Related<super::wallet::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Wallets.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
