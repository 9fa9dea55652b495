/// Database connection and schema management
pub mod database;

/// Assistant knowledge-base loading from knowledge.toml
pub mod knowledge;
