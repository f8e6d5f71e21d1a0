//! Game events the outpost systems react to.
//!
//! Hosts construct these (usually through [`crate::hooks`]) and feed them to
//! the systems in [`crate::systems`].

use outpost_core::quest::TaskId;
use outpost_core::types::{EntityId, ParcelShape, SettlementId};

/// Which way a trade at a stall goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradeDirection {
    /// The player buys from the stall.
    PlayerBuys,
    /// The player sells to the stall.
    PlayerSells,
}

/// A gameplay event dispatched by the host.
#[derive(Debug, Clone)]
pub enum GameEvent {
    /// One world-time cycle elapsed.
    WorldTimeCycle {
        /// Current world tick.
        tick: u64,
    },

    /// A settlement building finished spawning.
    BuildingSpawned {
        /// The building entity.
        building: EntityId,
        /// Building kind ("church", "bank", ...).
        kind: String,
        /// Settlement the building belongs to.
        settlement: SettlementId,
        /// Parcel the building stands on.
        parcel: ParcelShape,
    },

    /// A player activated a quest point.
    QuestProposed {
        /// The activating player.
        player: EntityId,
        /// The quest point entity.
        quest_point: EntityId,
    },

    /// A task in a player's quest went active.
    TaskStarted {
        /// The quest's player.
        player: EntityId,
        /// Short name of the quest.
        quest: String,
        /// The task that started.
        task: TaskId,
    },

    /// A player picked up items.
    ItemCollected {
        /// The collecting player.
        player: EntityId,
        /// Item id collected.
        item: String,
        /// Units collected.
        amount: u32,
    },

    /// A player reached a quest beacon.
    BeaconReached {
        /// The player.
        player: EntityId,
        /// Beacon id reached.
        beacon: String,
    },

    /// A quest finished.
    QuestCompleted {
        /// The quest's player.
        player: EntityId,
        /// Short name of the quest.
        quest: String,
        /// Whether the quest succeeded.
        success: bool,
    },

    /// A player asked to trade at a stall.
    TradeRequested {
        /// The trading player.
        player: EntityId,
        /// The stall entity.
        stall: EntityId,
        /// Item id to trade.
        item: String,
        /// Units to trade.
        quantity: u32,
        /// Buy or sell.
        direction: TradeDirection,
    },
}

impl GameEvent {
    /// The player this event concerns, if any.
    #[must_use]
    pub fn player(&self) -> Option<EntityId> {
        match self {
            Self::WorldTimeCycle { .. } | Self::BuildingSpawned { .. } => None,
            Self::QuestProposed { player, .. }
            | Self::TaskStarted { player, .. }
            | Self::ItemCollected { player, .. }
            | Self::BeaconReached { player, .. }
            | Self::QuestCompleted { player, .. }
            | Self::TradeRequested { player, .. } => Some(*player),
        }
    }

    /// Short name for logging.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::WorldTimeCycle { .. } => "world_time_cycle",
            Self::BuildingSpawned { .. } => "building_spawned",
            Self::QuestProposed { .. } => "quest_proposed",
            Self::TaskStarted { .. } => "task_started",
            Self::ItemCollected { .. } => "item_collected",
            Self::BeaconReached { .. } => "beacon_reached",
            Self::QuestCompleted { .. } => "quest_completed",
            Self::TradeRequested { .. } => "trade_requested",
        }
    }
}
