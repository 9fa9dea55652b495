//! Unified error types and result handling.
//!
//! Every fallible operation in the crate returns [`Result<T>`] with this
//! module's [`Error`]. Business-rule rejections carry the values a caller
//! needs to build an actionable message (for example the current balance and
//! the required amount on an insufficient-funds failure). Persistence-layer
//! failures propagate unchanged through the `Database` variant.

use chrono::NaiveDate;
use thiserror::Error;

/// All error kinds produced by the booking, ledger, and room operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Check-in date is not strictly before the check-out date.
    #[error("Invalid date range: check-in {check_in} must be before check-out {check_out}")]
    InvalidDateRange {
        /// Requested check-in date
        check_in: NaiveDate,
        /// Requested check-out date
        check_out: NaiveDate,
    },

    /// Referenced room does not exist.
    #[error("Room not found: {id}")]
    RoomNotFound {
        /// Room primary key that failed to resolve
        id: i64,
    },

    /// Referenced user does not exist.
    #[error("User not found: {id}")]
    UserNotFound {
        /// User primary key that failed to resolve
        id: i64,
    },

    /// Referenced booking does not exist.
    #[error("Booking not found: {id}")]
    BookingNotFound {
        /// Booking primary key that failed to resolve
        id: i64,
    },

    /// Room has a conflicting booking for the requested dates. Retrying the
    /// same range without changed inputs cannot succeed.
    #[error("Room {room_id} is not available from {check_in} to {check_out}")]
    RoomUnavailable {
        /// Room that was requested
        room_id: i64,
        /// Requested check-in date
        check_in: NaiveDate,
        /// Requested check-out date
        check_out: NaiveDate,
    },

    /// Caller is not authorized for the attempted operation.
    #[error("Forbidden: {message}")]
    Forbidden {
        /// Why the caller was rejected
        message: String,
    },

    /// Monetary amount is zero, negative, or not finite.
    #[error("Invalid amount: {amount}")]
    InvalidAmount {
        /// The rejected amount
        amount: f64,
    },

    /// Wallet balance cannot cover the requested spend.
    #[error("Insufficient wallet balance. Current: {current}, Required: {required}")]
    InsufficientFunds {
        /// Balance at the time of the rejected spend
        current: f64,
        /// Amount the spend asked for
        required: f64,
    },

    /// Residual input validation failure (empty names, guest counts).
    #[error("Validation error: {message}")]
    Validation {
        /// What was wrong with the input
        message: String,
    },

    /// Configuration loading or parsing failure.
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong while loading configuration
        message: String,
    },

    /// Persistence-layer error, propagated unchanged.
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// I/O error while reading configuration files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience `Result` type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
