//! Integration hooks for Veloren's existing systems.
//!
//! These hooks bridge host happenings (world-time ticks, building spawns,
//! player interactions, trades) to outpost [`GameEvent`]s. In a full Veloren
//! integration, these would be injected into the host's existing ECS
//! systems.

use outpost_core::quest::TaskId;
use outpost_core::types::{EntityId, ParcelShape, SettlementId};

use crate::events::{GameEvent, TradeDirection};

/// One world-time cycle elapsed.
#[must_use]
pub fn on_world_time_cycle(tick: u64) -> GameEvent {
    GameEvent::WorldTimeCycle { tick }
}

/// A settlement building finished spawning.
#[must_use]
pub fn on_building_spawned(
    building: EntityId,
    kind: String,
    settlement: SettlementId,
    parcel: ParcelShape,
) -> GameEvent {
    GameEvent::BuildingSpawned {
        building,
        kind,
        settlement,
        parcel,
    }
}

/// A player used a quest point.
#[must_use]
pub fn on_quest_proposed(player: EntityId, quest_point: EntityId) -> GameEvent {
    GameEvent::QuestProposed {
        player,
        quest_point,
    }
}

/// A task in a player's quest went active.
#[must_use]
pub fn on_task_started(player: EntityId, quest: String, task: TaskId) -> GameEvent {
    GameEvent::TaskStarted {
        player,
        quest,
        task,
    }
}

/// A player picked up items.
#[must_use]
pub fn on_item_collected(player: EntityId, item: String, amount: u32) -> GameEvent {
    GameEvent::ItemCollected {
        player,
        item,
        amount,
    }
}

/// A player reached a quest beacon.
#[must_use]
pub fn on_beacon_reached(player: EntityId, beacon: String) -> GameEvent {
    GameEvent::BeaconReached { player, beacon }
}

/// A quest finished, successfully or not.
#[must_use]
pub fn on_quest_completed(player: EntityId, quest: String, success: bool) -> GameEvent {
    GameEvent::QuestCompleted {
        player,
        quest,
        success,
    }
}

/// A player asked to trade at a stall.
#[must_use]
pub fn on_trade_requested(
    player: EntityId,
    stall: EntityId,
    item: String,
    quantity: u32,
    direction: TradeDirection,
) -> GameEvent {
    GameEvent::TradeRequested {
        player,
        stall,
        item,
        quantity,
        direction,
    }
}
