//! ECS components for the outpost gameplay layer.
//!
//! These components are attached to entities (citizens, players, buildings,
//! settlements, stalls) to carry faction, quest, and market state within
//! Veloren's ECS.
//!
//! In a full Veloren integration, these would derive `specs::Component`.
//! For now, they are standalone data bags.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use outpost_core::economy::Wallet;
use outpost_core::faction::Alignment;
use outpost_core::market::MarketItem;
use outpost_core::quest::{FetchQuest, Task, FETCH_QUEST_NAME};
use outpost_core::types::{EntityId, GameTimestamp, ParcelShape, SettlementId};

/// Faction alignment of a character, building, or settlement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactionAlignment {
    /// The alignment tag.
    pub alignment: Alignment,
}

impl FactionAlignment {
    /// Create an alignment component.
    #[must_use]
    pub fn new(alignment: Alignment) -> Self {
        Self { alignment }
    }
}

/// Back-reference from a building or quest point to its settlement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementRef {
    /// The owning settlement.
    pub settlement: SettlementId,
}

/// Marks a building as already having a quest point attached, so the
/// regeneration sweep does not spawn a second one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestPointRef {
    /// The quest point entity.
    pub quest_point: EntityId,
    /// When the quest point was spawned.
    pub spawned_at: GameTimestamp,
}

/// Floating label data for world markers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NameTag {
    /// Label text.
    pub text: String,
    /// RGB label color.
    pub color: [u8; 3],
    /// Render scale.
    pub scale: f32,
    /// Vertical offset above the entity.
    pub y_offset: f32,
}

impl NameTag {
    /// The standard quest-point marker: "Quest", yellow, double scale,
    /// floating two blocks up.
    #[must_use]
    pub fn quest_marker() -> Self {
        Self {
            text: "Quest".to_string(),
            color: [255, 255, 0],
            scale: 2.0,
            y_offset: 2.0,
        }
    }
}

/// A joined row over the building-related components the quest sweep needs:
/// the building's kind, its parcel, its settlement, and whether a quest
/// point is already attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingRecord {
    /// The building entity.
    pub entity: EntityId,
    /// Building kind ("church", "bank", ...).
    pub kind: String,
    /// The parcel the building stands on.
    pub parcel: ParcelShape,
    /// The settlement the building belongs to.
    pub settlement: SettlementRef,
    /// Quest point attached to this building, if any.
    pub quest_point: Option<QuestPointRef>,
}

/// Per-player quest log.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerQuests {
    /// Quests currently held by the player.
    pub quests: Vec<FetchQuest>,
}

impl PlayerQuests {
    /// Create an empty quest log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a quest.
    pub fn push(&mut self, quest: FetchQuest) {
        self.quests.push(quest);
    }

    /// First held fetch quest, mutably.
    pub fn fetch_quest_mut(&mut self) -> Option<&mut FetchQuest> {
        self.quests
            .iter_mut()
            .find(|q| q.short_name == FETCH_QUEST_NAME)
    }

    /// Remove and return the first held fetch quest.
    pub fn remove_fetch_quest(&mut self) -> Option<FetchQuest> {
        let index = self
            .quests
            .iter()
            .position(|q| q.short_name == FETCH_QUEST_NAME)?;
        Some(self.quests.remove(index))
    }

    /// Active tasks across all held quests, keyed by quest short name.
    #[must_use]
    pub fn active_tasks(&self) -> HashMap<String, Vec<&Task>> {
        let mut map: HashMap<String, Vec<&Task>> = HashMap::new();
        for quest in &self.quests {
            let active = quest.graph.active_tasks();
            if !active.is_empty() {
                map.entry(quest.short_name.clone()).or_default().extend(active);
            }
        }
        map
    }
}

/// A stack of one item kind in an inventory slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStack {
    /// Item id.
    pub item: String,
    /// Units in the stack.
    pub amount: u32,
}

/// Slot-based character inventory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    /// Occupied slots in order.
    pub slots: Vec<ItemStack>,
}

impl Inventory {
    /// Create an empty inventory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Total units of `item` across all slots.
    #[must_use]
    pub fn count_of(&self, item: &str) -> u32 {
        self.slots
            .iter()
            .filter(|s| s.item == item)
            .map(|s| s.amount)
            .sum()
    }

    /// Add units of `item`, stacking onto an existing slot when possible.
    pub fn insert(&mut self, item: &str, amount: u32) {
        if amount == 0 {
            return;
        }
        if let Some(slot) = self.slots.iter_mut().find(|s| s.item == item) {
            slot.amount = slot.amount.saturating_add(amount);
        } else {
            self.slots.push(ItemStack {
                item: item.to_string(),
                amount,
            });
        }
    }

    /// Remove up to `amount` units of `item` across slots, front to back.
    /// Returns how many were actually removed; emptied slots are dropped.
    pub fn remove(&mut self, item: &str, amount: u32) -> u32 {
        let mut remaining = amount;
        for slot in &mut self.slots {
            if slot.item != item || remaining == 0 {
                continue;
            }
            let taken = slot.amount.min(remaining);
            slot.amount -= taken;
            remaining -= taken;
        }
        self.slots.retain(|s| s.amount > 0);
        amount - remaining
    }
}

/// Currency balance carried by a character.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletComponent {
    /// The underlying wallet.
    pub wallet: Wallet,
}

/// A settlement market stall: its current listings and when it last
/// restocked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketStall {
    /// The settlement this stall trades for.
    pub settlement: SettlementId,
    /// Items currently offered.
    pub listings: Vec<MarketItem>,
    /// World tick of the last restock.
    pub last_restock_tick: u64,
}

impl MarketStall {
    /// Create an empty stall for a settlement.
    #[must_use]
    pub fn new(settlement: SettlementId) -> Self {
        Self {
            settlement,
            listings: Vec::new(),
            last_restock_tick: 0,
        }
    }

    /// Mutable listing for an item id, if stocked.
    pub fn listing_mut(&mut self, item: &str) -> Option<&mut MarketItem> {
        self.listings.iter_mut().find(|l| l.id == item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use outpost_core::config::QuestConfig;
    use outpost_core::quest::TaskId;
    use outpost_core::types::Location;

    #[test]
    fn inventory_stacks_and_counts() {
        let mut inventory = Inventory::new();
        inventory.insert("wildlife:raw_meat", 3);
        inventory.insert("wildlife:raw_meat", 2);
        inventory.insert("core:torch", 1);
        assert_eq!(inventory.slots.len(), 2);
        assert_eq!(inventory.count_of("wildlife:raw_meat"), 5);
    }

    #[test]
    fn inventory_remove_spans_slots_and_reports_shortfall() {
        let mut inventory = Inventory {
            slots: vec![
                ItemStack { item: "wildlife:raw_meat".into(), amount: 2 },
                ItemStack { item: "core:torch".into(), amount: 1 },
                ItemStack { item: "wildlife:raw_meat".into(), amount: 1 },
            ],
        };
        assert_eq!(inventory.remove("wildlife:raw_meat", 5), 3);
        assert_eq!(inventory.count_of("wildlife:raw_meat"), 0);
        assert_eq!(inventory.count_of("core:torch"), 1);
    }

    #[test]
    fn player_quests_finds_and_removes_fetch_quests() {
        let mut quests = PlayerQuests::new();
        assert!(quests.fetch_quest_mut().is_none());

        let quest = FetchQuest::standard(
            EntityId::new(),
            Location::default(),
            &QuestConfig::default(),
        );
        quests.push(quest);
        assert!(quests.fetch_quest_mut().is_some());
        assert!(quests.remove_fetch_quest().is_some());
        assert!(quests.remove_fetch_quest().is_none());
    }

    #[test]
    fn active_tasks_reflect_graph_state() {
        let mut quests = PlayerQuests::new();
        let mut quest = FetchQuest::standard(
            EntityId::new(),
            Location::default(),
            &QuestConfig::default(),
        );
        quest.graph.start();
        quests.push(quest);

        let active = quests.active_tasks();
        let tasks = active.get(FETCH_QUEST_NAME).expect("one active quest");
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].id, TaskId::from("gather_supplies"));
    }
}
