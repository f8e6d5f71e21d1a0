//! Market economy — item descriptors and the shared catalog.
//!
//! The catalog is a process-wide lookup table seeded with the known item set.
//! Unknown ids get a synthesized placeholder entry so a stall can always
//! display *something* for whatever the host hands it.

pub mod catalog;

pub use catalog::Catalog;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// A single item as the market understands it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketItem {
    /// Stable item identifier (`module:item` form).
    pub id: String,
    /// Name shown on stall listings.
    pub display_name: String,
    /// Flavor description.
    pub description: String,
    /// List price per unit.
    pub cost: u32,
    /// Units currently associated with this entry.
    pub quantity: u32,
    /// Whether a player may buy this from a stall.
    pub buyable: bool,
    /// Whether a merchant will buy this back from a player.
    pub sellable: bool,
}

// ---------------------------------------------------------------------------
// Process-wide catalog
// ---------------------------------------------------------------------------

static CATALOG: OnceLock<RwLock<Catalog>> = OnceLock::new();

fn global() -> &'static RwLock<Catalog> {
    CATALOG.get_or_init(|| RwLock::new(Catalog::new()))
}

/// Resolve an item id to a market listing with the given stock quantity.
///
/// Unknown ids synthesize (and cache) a placeholder entry. The returned item
/// is a market-stock view: `buyable` is set, `sellable` cleared.
#[must_use]
pub fn resolve(id: &str, quantity: u32) -> MarketItem {
    global().write().resolve(id, quantity)
}

/// Look up an item id without the market-stock overrides.
#[must_use]
pub fn lookup(id: &str) -> Option<MarketItem> {
    global().read().lookup(id)
}

/// The empty sentinel entry (blank stall slot).
#[must_use]
pub fn empty() -> MarketItem {
    global().read().empty()
}

/// The default entry used when nothing better can be shown.
#[must_use]
pub fn default_item() -> MarketItem {
    global().read().default_item()
}

/// Merge a content-pack item table (JSON array of items) into the shared
/// catalog. Returns the number of entries added or replaced.
///
/// # Errors
/// Returns `OutpostError::ItemTable` if the JSON does not parse.
pub fn extend_from_json(json: &str) -> crate::error::Result<usize> {
    global().write().extend_from_json(json)
}
