//! Faction alignment — which side of the frontier a character, building, or
//! settlement is on.
//!
//! Alignment is a single tag. External systems mutate it; it has no lifecycle
//! of its own beyond the entity it is attached to.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::FactionConfig;

/// Faction alignment of a character, building, or settlement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    /// Welcomes travellers; settlements trade and hand out work.
    Friendly,
    /// Keeps to itself.
    #[default]
    Neutral,
    /// Raids and robs; settlements attack outsiders on sight.
    Hostile,
}

/// How one alignment reacts to another on first contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Will trade, talk, and share quests.
    Amicable,
    /// Ignores the other party.
    Indifferent,
    /// Attacks on sight.
    Aggressive,
}

impl Alignment {
    /// Draw a random alignment using the configured spawn weights.
    ///
    /// Weights are relative; a zero total falls back to `Neutral`.
    #[must_use]
    pub fn sample<R: Rng + ?Sized>(rng: &mut R, config: &FactionConfig) -> Self {
        let total = config.friendly_weight + config.neutral_weight + config.hostile_weight;
        if total <= f32::EPSILON {
            return Self::Neutral;
        }
        let roll = rng.gen_range(0.0..total);
        if roll < config.friendly_weight {
            Self::Friendly
        } else if roll < config.friendly_weight + config.neutral_weight {
            Self::Neutral
        } else {
            Self::Hostile
        }
    }

    /// Citizen prefab ids spawned in settlements of this alignment.
    #[must_use]
    pub fn citizen_prefabs(&self) -> &'static [&'static str] {
        match self {
            Self::Friendly => &[
                "citizens:farmer",
                "citizens:trader",
                "citizens:deputy",
            ],
            Self::Neutral => &[
                "citizens:rancher",
                "citizens:drifter",
            ],
            Self::Hostile => &[
                "citizens:bandit",
                "citizens:rustler",
            ],
        }
    }

    /// Disposition of `self` toward `other`.
    ///
    /// Same alignment is amicable. `Neutral` is indifferent to everyone (and
    /// everyone to it). `Friendly` and `Hostile` are aggressive toward each
    /// other.
    #[must_use]
    pub fn disposition_toward(&self, other: Self) -> Disposition {
        if *self == other {
            return Disposition::Amicable;
        }
        if *self == Self::Neutral || other == Self::Neutral {
            return Disposition::Indifferent;
        }
        Disposition::Aggressive
    }
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Friendly => "friendly",
            Self::Neutral => "neutral",
            Self::Hostile => "hostile",
        };
        write!(f, "{name}")
    }
}
