//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod booking;
pub mod room;
pub mod user;
pub mod wallet;
pub mod wallet_transaction;

// Re-export specific types to avoid conflicts
pub use booking::{Column as BookingColumn, Entity as Booking, Model as BookingModel};
pub use room::{Column as RoomColumn, Entity as Room, Model as RoomModel};
pub use user::{Column as UserColumn, Entity as User, Model as UserModel, Role};
pub use wallet::{Column as WalletColumn, Entity as Wallet, Model as WalletModel};
pub use wallet_transaction::{
    Column as WalletTransactionColumn, Entity as WalletTransaction,
    Model as WalletTransactionModel, TransactionKind,
};
