//! Assistant knowledge-base loading from knowledge.toml
//!
//! Everything the assistant knows about the property lives in a TOML file:
//! the room catalogue, nearby places, and guidance texts. Swapping the file
//! changes the assistant's knowledge without any code change.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Everything the assistant can answer from.
#[derive(Debug, Clone, Deserialize)]
pub struct KnowledgeBase {
    /// Property name used in response headers
    pub hotel_name: String,
    /// Room catalogue with nightly prices
    pub rooms: Vec<RoomInfo>,
    /// Nearby tourist attractions, closest first
    pub attractions: Vec<String>,
    /// Nearby dining options, closest first
    pub dining: Vec<String>,
    /// Nearby shopping areas, closest first
    pub shopping: Vec<String>,
    /// Step-by-step booking guidance text
    pub booking_help: String,
    /// Accepted payment options text
    pub payment_help: String,
}

/// One room category in the assistant's catalogue.
#[derive(Debug, Clone, Deserialize)]
pub struct RoomInfo {
    /// Category label (e.g., "Standard Room")
    pub label: String,
    /// Nightly price
    pub price: f64,
    /// Short description shown in listings
    pub description: String,
}

/// Loads the knowledge base from a TOML file.
///
/// # Errors
/// Returns [`Error::Config`] if the file cannot be read, the TOML syntax is
/// invalid, or required fields are missing.
pub fn load_knowledge<P: AsRef<Path>>(path: P) -> Result<KnowledgeBase> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read knowledge file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse knowledge file: {e}"),
    })
}

/// Loads the knowledge base from the default location (./knowledge.toml).
///
/// # Errors
/// Returns [`Error::Config`] if the file cannot be read or parsed.
pub fn load_default_knowledge() -> Result<KnowledgeBase> {
    load_knowledge("knowledge.toml")
}
