//! Wallet entity - Per-user balance derived from an append-only ledger.
//!
//! One wallet exists per user, created lazily on first access. The stored
//! `balance` always equals the sum of ADD and REFUND entries minus the sum
//! of SPEND entries in `wallet_transactions`, and never goes negative.
//! `total_added` and `total_spent` are running counters; refunds do not
//! reduce `total_spent`, so historical spend totals survive compensation.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Wallet database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "wallets")]
pub struct Model {
    /// Unique identifier for the wallet
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Owning user; one wallet per user
    #[sea_orm(unique)]
    pub user_id: i64,
    /// Current balance, never negative
    pub balance: f64,
    /// Lifetime sum of ADD amounts
    pub total_added: f64,
    /// Lifetime sum of SPEND amounts; untouched by refunds
    pub total_spent: f64,
    /// When the wallet was created
    pub created_at: DateTimeUtc,
    /// When the wallet was last mutated
    pub updated_at: DateTimeUtc,
}

/// Defines relationships between Wallet and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One wallet has many ledger entries
    #[sea_orm(has_many = "super::wallet_transaction::Entity")]
    WalletTransactions,
    /// Each wallet belongs to one user
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
}

impl Related<super::wallet_transaction::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::WalletTransactions.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
