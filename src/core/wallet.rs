//! Wallet ledger business logic.
//!
//! Every mutating operation runs as one database transaction per wallet:
//! read, validate, append the ledger entry, then apply the balance change
//! as a single atomic `UPDATE ... SET balance = balance + delta` statement
//! rather than a read-modify-write from Rust. The ledger itself is
//! append-only; entries are never updated or deleted, so the balance is
//! always derivable from the log.

use crate::{
    entities::{User, Wallet, wallet, wallet_transaction, wallet_transaction::TransactionKind},
    errors::{Error, Result},
};
use sea_orm::{DbErr, QueryOrder, Set, SqlErr, TransactionTrait, prelude::*};
use tracing::debug;

/// Returns the wallet for `user_id`, creating an empty one on first access.
///
/// Idempotent: calling it repeatedly returns the same wallet. A concurrent
/// create racing on the unique `user_id` column is resolved by re-fetching
/// the row that won.
///
/// # Errors
/// Returns [`Error::UserNotFound`] for a dangling user id, or a database
/// error if a query fails.
pub async fn get_or_create_wallet(
    db: &DatabaseConnection,
    user_id: i64,
) -> Result<wallet::Model> {
    User::find_by_id(user_id)
        .one(db)
        .await?
        .ok_or(Error::UserNotFound { id: user_id })?;

    find_or_insert_wallet(db, user_id).await
}

/// Adds funds to the wallet: appends an ADD entry, then increases both the
/// balance and the lifetime `total_added` counter.
///
/// # Errors
/// Returns [`Error::InvalidAmount`] unless `amount` is positive and finite,
/// [`Error::UserNotFound`] for a dangling user id, or a database error.
pub async fn credit(
    db: &DatabaseConnection,
    user_id: i64,
    amount: f64,
    description: &str,
) -> Result<wallet::Model> {
    validate_amount(amount)?;

    User::find_by_id(user_id)
        .one(db)
        .await?
        .ok_or(Error::UserNotFound { id: user_id })?;

    let txn = db.begin().await?;
    let target = find_or_insert_wallet(&txn, user_id).await?;

    append_entry(&txn, target.id, TransactionKind::Add, amount, description, None).await?;
    let updated = apply_deltas(&txn, target.id, amount, amount, 0.0).await?;
    txn.commit().await?;

    debug!(user_id, amount, balance = updated.balance, "wallet credited");
    Ok(updated)
}

/// Spends from the wallet: appends a SPEND entry, then decreases the
/// balance and increases the lifetime `total_spent` counter.
///
/// The balance check and the write happen inside the same transaction, so
/// the balance can never be driven negative by a spend.
///
/// # Errors
/// Returns [`Error::InvalidAmount`] unless `amount` is positive and finite,
/// [`Error::UserNotFound`] for a dangling user id,
/// [`Error::InsufficientFunds`] (reporting both the current balance and the
/// required amount) when the wallet cannot cover the spend, or a database
/// error.
pub async fn debit(
    db: &DatabaseConnection,
    user_id: i64,
    amount: f64,
    description: &str,
    booking_id: Option<i64>,
) -> Result<wallet::Model> {
    validate_amount(amount)?;

    User::find_by_id(user_id)
        .one(db)
        .await?
        .ok_or(Error::UserNotFound { id: user_id })?;

    let txn = db.begin().await?;
    let target = find_or_insert_wallet(&txn, user_id).await?;

    if target.balance < amount {
        return Err(Error::InsufficientFunds {
            current: target.balance,
            required: amount,
        });
    }

    append_entry(
        &txn,
        target.id,
        TransactionKind::Spend,
        amount,
        description,
        booking_id,
    )
    .await?;
    let updated = apply_deltas(&txn, target.id, -amount, 0.0, amount).await?;
    txn.commit().await?;

    debug!(user_id, amount, balance = updated.balance, "wallet debited");
    Ok(updated)
}

/// Returns funds to the wallet as compensation: appends a REFUND entry and
/// increases the balance. `total_spent` is deliberately untouched so the
/// historical spend counter survives refunds.
///
/// # Errors
/// Returns [`Error::InvalidAmount`] unless `amount` is positive and finite,
/// [`Error::UserNotFound`] for a dangling user id, or a database error.
pub async fn refund(
    db: &DatabaseConnection,
    user_id: i64,
    amount: f64,
    booking_id: Option<i64>,
    reason: &str,
) -> Result<wallet::Model> {
    validate_amount(amount)?;

    User::find_by_id(user_id)
        .one(db)
        .await?
        .ok_or(Error::UserNotFound { id: user_id })?;

    let txn = db.begin().await?;
    let target = find_or_insert_wallet(&txn, user_id).await?;

    append_entry(
        &txn,
        target.id,
        TransactionKind::Refund,
        amount,
        reason,
        booking_id,
    )
    .await?;
    let updated = apply_deltas(&txn, target.id, amount, 0.0, 0.0).await?;
    txn.commit().await?;

    debug!(user_id, amount, balance = updated.balance, "wallet refunded");
    Ok(updated)
}

/// Retrieves the full ledger for one user's wallet, newest entry first.
///
/// Creates the wallet on first access like every other wallet operation.
///
/// # Errors
/// Returns [`Error::UserNotFound`] for a dangling user id, or a database
/// error if a query fails.
pub async fn get_wallet_transactions(
    db: &DatabaseConnection,
    user_id: i64,
) -> Result<Vec<wallet_transaction::Model>> {
    let target = get_or_create_wallet(db, user_id).await?;

    wallet_transaction::Entity::find()
        .filter(wallet_transaction::Column::WalletId.eq(target.id))
        .order_by_desc(wallet_transaction::Column::Timestamp)
        .order_by_desc(wallet_transaction::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds the wallet row for `user_id`, inserting a zeroed one if absent.
/// Generic over [`ConnectionTrait`] so mutations can run it inside their
/// transaction.
async fn find_or_insert_wallet<C>(conn: &C, user_id: i64) -> Result<wallet::Model>
where
    C: ConnectionTrait,
{
    if let Some(existing) = Wallet::find()
        .filter(wallet::Column::UserId.eq(user_id))
        .one(conn)
        .await?
    {
        return Ok(existing);
    }

    let now = chrono::Utc::now();
    let fresh = wallet::ActiveModel {
        user_id: Set(user_id),
        balance: Set(0.0),
        total_added: Set(0.0),
        total_spent: Set(0.0),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    match fresh.insert(conn).await {
        Ok(created) => Ok(created),
        Err(err) => {
            // Lost a concurrent create; the committed row wins.
            if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
                if let Some(existing) = Wallet::find()
                    .filter(wallet::Column::UserId.eq(user_id))
                    .one(conn)
                    .await?
                {
                    return Ok(existing);
                }
            }
            Err(err.into())
        }
    }
}

/// Appends one immutable ledger entry.
async fn append_entry<C>(
    conn: &C,
    wallet_id: i64,
    kind: TransactionKind,
    amount: f64,
    description: &str,
    booking_id: Option<i64>,
) -> Result<wallet_transaction::Model>
where
    C: ConnectionTrait,
{
    let entry = wallet_transaction::ActiveModel {
        wallet_id: Set(wallet_id),
        kind: Set(kind),
        amount: Set(amount),
        description: Set(description.to_string()),
        booking_id: Set(booking_id),
        timestamp: Set(chrono::Utc::now()),
        ..Default::default()
    };
    entry.insert(conn).await.map_err(Into::into)
}

/// Applies balance and counter deltas as a single atomic UPDATE statement,
/// then returns the refreshed wallet.
async fn apply_deltas<C>(
    conn: &C,
    wallet_id: i64,
    balance_delta: f64,
    added_delta: f64,
    spent_delta: f64,
) -> Result<wallet::Model>
where
    C: ConnectionTrait,
{
    use sea_orm::sea_query::Expr;

    Wallet::update_many()
        .col_expr(
            wallet::Column::Balance,
            Expr::col(wallet::Column::Balance).add(balance_delta),
        )
        .col_expr(
            wallet::Column::TotalAdded,
            Expr::col(wallet::Column::TotalAdded).add(added_delta),
        )
        .col_expr(
            wallet::Column::TotalSpent,
            Expr::col(wallet::Column::TotalSpent).add(spent_delta),
        )
        .col_expr(wallet::Column::UpdatedAt, Expr::value(chrono::Utc::now()))
        .filter(wallet::Column::Id.eq(wallet_id))
        .exec(conn)
        .await?;

    Wallet::find_by_id(wallet_id)
        .one(conn)
        .await?
        .ok_or_else(|| DbErr::RecordNotFound(format!("wallet {wallet_id}")).into())
}

fn validate_amount(amount: f64) -> Result<()> {
    if !(amount.is_finite() && amount > 0.0) {
        return Err(Error::InvalidAmount { amount });
    }
    Ok(())
}
