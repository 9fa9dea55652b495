//! Wallet transaction entity - One immutable ledger entry.
//!
//! Entries are append-only: they are never updated or deleted after
//! insertion, so the ledger is a complete audit trail from which the wallet
//! balance is derivable.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// What a ledger entry did to the wallet balance.
#[derive(Copy, Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum TransactionKind {
    /// Funds added by the user; increases balance and `total_added`
    #[sea_orm(string_value = "ADD")]
    Add,
    /// Funds spent (booking payment); decreases balance, increases `total_spent`
    #[sea_orm(string_value = "SPEND")]
    Spend,
    /// Compensation credited back; increases balance only
    #[sea_orm(string_value = "REFUND")]
    Refund,
}

/// Wallet transaction database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "wallet_transactions")]
pub struct Model {
    /// Unique identifier for the ledger entry
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Wallet this entry belongs to
    pub wallet_id: i64,
    /// Direction of the entry
    pub kind: TransactionKind,
    /// Amount moved, always positive
    pub amount: f64,
    /// Human-readable description of the entry
    pub description: String,
    /// Booking this entry paid for or refunded, if any
    pub booking_id: Option<i64>,
    /// When the entry was appended
    pub timestamp: DateTimeUtc,
}

/// Defines relationships between WalletTransaction and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each ledger entry belongs to one wallet
    #[sea_orm(
        belongs_to = "super::wallet::Entity",
        from = "Column::WalletId",
        to = "super::wallet::Column::Id"
    )]
    Wallet,
}

impl Related<super::wallet::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Wallet.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
