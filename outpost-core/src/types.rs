//! Core type definitions shared across the outpost gameplay layer.
//!
//! All types are serializable so components built from them can ride along
//! in whatever snapshot format the host game uses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Identity Types
// ---------------------------------------------------------------------------

/// Unique identifier for any entity (citizen, player, quest point, item) in
/// the game world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityId(pub Uuid);

impl EntityId {
    /// Create a new random entity ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a settlement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SettlementId(pub Uuid);

impl SettlementId {
    /// Create a new random settlement ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SettlementId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SettlementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Spatial
// ---------------------------------------------------------------------------

/// A 3D position in the game world.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Location {
    /// X coordinate.
    pub x: f32,
    /// Y coordinate (height).
    pub y: f32,
    /// Z coordinate.
    pub z: f32,
}

impl Location {
    /// Create a location from raw coordinates.
    #[must_use]
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.1}, {:.1}, {:.1})", self.x, self.y, self.z)
    }
}

/// Footprint of a building parcel: a rectangle on the ground plane plus the
/// terrain height the parcel was flattened to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParcelShape {
    /// Minimum X of the footprint rectangle.
    pub min_x: i32,
    /// Minimum Z of the footprint rectangle.
    pub min_z: i32,
    /// Footprint size along X.
    pub size_x: i32,
    /// Footprint size along Z.
    pub size_z: i32,
    /// Terrain height of the parcel.
    pub height: i32,
}

impl ParcelShape {
    /// Spawn position for markers placed on this parcel: centered on the
    /// footprint, two blocks above parcel height so the marker clears the
    /// floor.
    #[must_use]
    pub fn center_spawn(&self) -> Location {
        Location {
            x: (self.min_x + self.size_x / 2) as f32,
            y: (self.height + 2) as f32,
            z: (self.min_z + self.size_z / 2) as f32,
        }
    }
}

// ---------------------------------------------------------------------------
// Time
// ---------------------------------------------------------------------------

/// In-game timestamp measured in world-time cycles since world creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GameTimestamp {
    /// World-time cycle (monotonically increasing).
    pub tick: u64,
    /// Corresponding real-world wall-clock time (for save metadata).
    pub real_time: DateTime<Utc>,
}

impl GameTimestamp {
    /// Create a new game timestamp at the current wall-clock time.
    #[must_use]
    pub fn now(tick: u64) -> Self {
        Self {
            tick,
            real_time: Utc::now(),
        }
    }

    /// Whole cycles elapsed since `other` (saturating).
    #[must_use]
    pub fn cycles_since(&self, other: &Self) -> u64 {
        self.tick.saturating_sub(other.tick)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parcel_center_spawn_is_centered_and_raised() {
        let parcel = ParcelShape {
            min_x: 10,
            min_z: 20,
            size_x: 8,
            size_z: 6,
            height: 64,
        };
        let spawn = parcel.center_spawn();
        assert_eq!(spawn.x, 14.0);
        assert_eq!(spawn.y, 66.0);
        assert_eq!(spawn.z, 23.0);
    }

    #[test]
    fn cycles_since_saturates() {
        let early = GameTimestamp::now(100);
        let late = GameTimestamp::now(120);
        assert_eq!(late.cycles_since(&early), 20);
        assert_eq!(early.cycles_since(&late), 0);
    }
}
