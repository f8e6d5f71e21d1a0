//! Configuration for the outpost gameplay layer.
//!
//! Maps directly to `outpost.toml`. Every section and field has a serde
//! default so a partial (or missing) file still yields a playable setup.

use serde::{Deserialize, Serialize};

/// Top-level outpost configuration, loadable from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutpostConfig {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,
    /// Market catalog and stall behavior.
    #[serde(default)]
    pub market: MarketConfig,
    /// Fetch-quest tuning.
    #[serde(default)]
    pub quest: QuestConfig,
    /// Faction alignment spawn weights.
    #[serde(default)]
    pub faction: FactionConfig,
}

impl OutpostConfig {
    /// Load configuration from a TOML string.
    ///
    /// # Errors
    /// Returns `OutpostError::Config` if the TOML is invalid.
    pub fn from_toml(toml_str: &str) -> crate::error::Result<Self> {
        toml::from_str(toml_str).map_err(|e| crate::OutpostError::Config(e.to_string()))
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }
}

// ---------------------------------------------------------------------------
// Sub-configs
// ---------------------------------------------------------------------------

/// General system settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Whether the gameplay layer is enabled.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Log level: trace, debug, info, warn, error.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            log_level: "info".to_string(),
        }
    }
}

/// Market catalog and stall configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketConfig {
    /// Upper bound (exclusive) for the random quantity synthesized for
    /// unknown item ids.
    #[serde(default = "default_50")]
    pub fallback_quantity_max: u32,
    /// Stock quantity assigned to known catalog items on restock.
    #[serde(default = "default_2")]
    pub default_stock: u32,
    /// World-time cycles between stall restocks.
    #[serde(default = "default_20")]
    pub restock_interval_cycles: u64,
    /// Maximum number of listings a stall carries.
    #[serde(default = "default_8")]
    pub stall_capacity: usize,
    /// Fraction of list cost a merchant pays when buying from a player.
    #[serde(default = "default_buyback")]
    pub buyback_rate_percent: u32,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            fallback_quantity_max: 50,
            default_stock: 2,
            restock_interval_cycles: 20,
            stall_capacity: 8,
            buyback_rate_percent: 60,
        }
    }
}

/// Fetch-quest tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestConfig {
    /// Currency paid out on successful completion.
    #[serde(default = "default_reward")]
    pub reward: i64,
    /// World-time cycles between quest-point regeneration sweeps.
    #[serde(default = "default_20")]
    pub regen_cycles: u64,
    /// Item the fetch quest asks the player to collect.
    #[serde(default = "default_collect_item")]
    pub collect_item: String,
    /// How many of the item the quest demands.
    #[serde(default = "default_5")]
    pub collect_amount: u32,
    /// Building kind that hosts quest points.
    #[serde(default = "default_quest_building")]
    pub quest_building: String,
}

impl Default for QuestConfig {
    fn default() -> Self {
        Self {
            reward: 50,
            regen_cycles: 20,
            collect_item: "wildlife:raw_meat".to_string(),
            collect_amount: 5,
            quest_building: "church".to_string(),
        }
    }
}

/// Faction alignment spawn weights. Normalized at sample time, so they only
/// need to be relative to each other.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FactionConfig {
    /// Relative weight of friendly settlements.
    #[serde(default = "default_0_4")]
    pub friendly_weight: f32,
    /// Relative weight of neutral settlements.
    #[serde(default = "default_0_4")]
    pub neutral_weight: f32,
    /// Relative weight of hostile settlements.
    #[serde(default = "default_0_2")]
    pub hostile_weight: f32,
}

impl Default for FactionConfig {
    fn default() -> Self {
        Self {
            friendly_weight: 0.4,
            neutral_weight: 0.4,
            hostile_weight: 0.2,
        }
    }
}

// ---------------------------------------------------------------------------
// Serde default helpers
// ---------------------------------------------------------------------------

fn default_true() -> bool { true }
fn default_log_level() -> String { "info".to_string() }
fn default_collect_item() -> String { "wildlife:raw_meat".to_string() }
fn default_quest_building() -> String { "church".to_string() }
fn default_0_2() -> f32 { 0.2 }
fn default_0_4() -> f32 { 0.4 }
fn default_2() -> u32 { 2 }
fn default_5() -> u32 { 5 }
fn default_8() -> usize { 8 }
fn default_20() -> u64 { 20 }
fn default_50() -> u32 { 50 }
fn default_reward() -> i64 { 50 }
fn default_buyback() -> u32 { 60 }

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_gives_defaults() {
        let config = OutpostConfig::from_toml("").expect("parse");
        assert!(config.general.enabled);
        assert_eq!(config.quest.reward, 50);
        assert_eq!(config.quest.regen_cycles, 20);
        assert_eq!(config.market.fallback_quantity_max, 50);
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let config = OutpostConfig::from_toml("[quest]\nreward = 120\n").expect("parse");
        assert_eq!(config.quest.reward, 120);
        assert_eq!(config.quest.collect_amount, 5);
        assert_eq!(config.market.stall_capacity, 8);
    }

    #[test]
    fn invalid_toml_is_a_config_error() {
        let err = OutpostConfig::from_toml("[quest\nreward = ").expect_err("must not parse");
        assert!(matches!(err, crate::OutpostError::Config(_)));
    }
}
