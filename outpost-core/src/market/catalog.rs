//! The item catalog — seeded lookup table with a placeholder fallback.

use rand::Rng;
use std::collections::HashMap;
use tracing::{debug, warn};

use super::MarketItem;

/// Id of the blank sentinel entry.
pub const EMPTY_ID: &str = "empty";
/// Id of the default entry returned when nothing better can be shown.
pub const DEFAULT_ID: &str = "default";

const MYSTERY_DESCRIPTION: &str = "A mystery item. No description is available";

/// The item lookup table.
///
/// Seeded with the known item set at construction; unknown ids synthesize a
/// placeholder entry with a random quantity, which is cached so repeated
/// lookups of the same id agree with each other.
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: HashMap<String, MarketItem>,
    fallback_quantity_max: u32,
}

impl Catalog {
    /// Create a catalog seeded with the known item table.
    #[must_use]
    pub fn new() -> Self {
        Self::with_fallback_max(50)
    }

    /// Create a seeded catalog with a custom fallback quantity bound.
    #[must_use]
    pub fn with_fallback_max(fallback_quantity_max: u32) -> Self {
        let mut catalog = Self {
            entries: HashMap::new(),
            fallback_quantity_max,
        };
        catalog.seed();
        catalog
    }

    fn seed(&mut self) {
        let known = [
            (
                "fruits:blueberry",
                "Blueberries",
                "Blue/purple berries, perfect for a quick treat!",
                3,
                false,
            ),
            (
                "fruits:cranberry",
                "Cranberries",
                "Small berries, with an incredible red hue.",
                3,
                false,
            ),
            (
                "fruits:peach",
                "Peaches",
                "A medium-sized pink fruit; nice and juicy!",
                4,
                false,
            ),
            (
                "fruits:raspberry",
                "Raspberries",
                "A small red berry, or is it really a bunch of smaller berries?",
                3,
                false,
            ),
            (
                "fruits:strawberry",
                "Strawberries",
                "A delicious red berry with an outer layer of seeds.",
                3,
                false,
            ),
            (
                "fruits:tomato",
                "Tomatoes",
                "A medium-size red vegetable/fruit.",
                2,
                false,
            ),
            (
                "vegetables:cucumber",
                "Cucumbers",
                "A long green vegetable, delicious to eat in slices!",
                2,
                false,
            ),
            (
                "vegetables:potato",
                "Potatoes",
                "A brownish root vegetable, and a major ingredient in French Fries!",
                2,
                false,
            ),
            (
                "core:torch",
                "Torches",
                "Great for lighting up a room!",
                5,
                true,
            ),
            (
                "core:pickaxe",
                "Pickaxe",
                "There's gold in them hills, and this tool will bring you to it.",
                25,
                true,
            ),
        ];

        for (id, display_name, description, cost, sellable) in known {
            self.entries.insert(
                id.to_string(),
                MarketItem {
                    id: id.to_string(),
                    display_name: display_name.to_string(),
                    description: description.to_string(),
                    cost,
                    quantity: 2,
                    buyable: true,
                    sellable,
                },
            );
        }

        self.entries.insert(
            EMPTY_ID.to_string(),
            MarketItem {
                id: String::new(),
                display_name: String::new(),
                description: String::new(),
                cost: 0,
                quantity: 0,
                buyable: false,
                sellable: false,
            },
        );

        self.entries.insert(
            DEFAULT_ID.to_string(),
            MarketItem {
                id: DEFAULT_ID.to_string(),
                display_name: "Unknown Item".to_string(),
                description: MYSTERY_DESCRIPTION.to_string(),
                cost: 1,
                quantity: 0,
                buyable: false,
                sellable: false,
            },
        );
    }

    /// Resolve an item id to a market listing with the given stock quantity.
    ///
    /// Known ids come from the table; unknown ids synthesize a cached
    /// placeholder. The returned item is a market-stock view: `quantity`
    /// overridden, `buyable` set, `sellable` cleared. The cached entry itself
    /// is never handed out by reference, so callers cannot alias the table.
    #[must_use]
    pub fn resolve(&mut self, id: &str, quantity: u32) -> MarketItem {
        self.resolve_with_rng(id, quantity, &mut rand::thread_rng())
    }

    /// `resolve` with an explicit RNG for the fallback quantity draw.
    pub fn resolve_with_rng<R: Rng + ?Sized>(
        &mut self,
        id: &str,
        quantity: u32,
        rng: &mut R,
    ) -> MarketItem {
        if !self.entries.contains_key(id) {
            let placeholder = self.synthesize(id, rng);
            self.entries.insert(id.to_string(), placeholder);
        }

        let mut item = self
            .entries
            .get(id)
            .cloned()
            .unwrap_or_else(|| self.default_item());
        item.quantity = quantity;
        item.buyable = true;
        item.sellable = false;
        item
    }

    fn synthesize<R: Rng + ?Sized>(&self, id: &str, rng: &mut R) -> MarketItem {
        warn!(item = id, "unknown item id, synthesizing placeholder entry");
        let quantity = if self.fallback_quantity_max == 0 {
            0
        } else {
            rng.gen_range(0..self.fallback_quantity_max)
        };
        MarketItem {
            id: id.to_string(),
            display_name: id.to_string(),
            description: MYSTERY_DESCRIPTION.to_string(),
            cost: 1,
            quantity,
            buyable: true,
            sellable: false,
        }
    }

    /// Look up an entry without the market-stock overrides.
    #[must_use]
    pub fn lookup(&self, id: &str) -> Option<MarketItem> {
        self.entries.get(id).cloned()
    }

    /// The blank sentinel entry.
    #[must_use]
    pub fn empty(&self) -> MarketItem {
        self.entries
            .get(EMPTY_ID)
            .cloned()
            .unwrap_or_else(|| MarketItem {
                id: String::new(),
                display_name: String::new(),
                description: String::new(),
                cost: 0,
                quantity: 0,
                buyable: false,
                sellable: false,
            })
    }

    /// The default entry.
    #[must_use]
    pub fn default_item(&self) -> MarketItem {
        self.entries
            .get(DEFAULT_ID)
            .cloned()
            .unwrap_or_else(|| self.empty())
    }

    /// Ids of all buyable entries, for stall restocking. Sentinels excluded.
    #[must_use]
    pub fn buyable_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self
            .entries
            .iter()
            .filter(|(key, item)| {
                item.buyable && key.as_str() != EMPTY_ID && key.as_str() != DEFAULT_ID
            })
            .map(|(key, _)| key.clone())
            .collect();
        ids.sort();
        ids
    }

    /// Merge a content-pack item table (JSON array of [`MarketItem`]) into
    /// the catalog. Entries with colliding ids are replaced.
    ///
    /// # Errors
    /// Returns `OutpostError::ItemTable` if the JSON does not parse.
    pub fn extend_from_json(&mut self, json: &str) -> crate::error::Result<usize> {
        let items: Vec<MarketItem> = serde_json::from_str(json)?;
        let count = items.len();
        for item in items {
            debug!(item = %item.id, "catalog entry added from content pack");
            self.entries.insert(item.id.clone(), item);
        }
        Ok(count)
    }

    /// Number of entries, sentinels included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}
