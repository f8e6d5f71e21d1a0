//! ECS systems for the outpost gameplay layer.
//!
//! In a full Veloren integration, these would implement `specs::System`.
//! For now, they are standalone functions over the components in
//! [`crate::components`]. Host-side mutation (entity spawns, overlays,
//! item removal) is never performed here; it is returned as [`Effect`]
//! values for the host to apply inside its own authority model.

use rand::Rng;
use tracing::{debug, info, warn};

use outpost_core::config::{FactionConfig, MarketConfig, OutpostConfig, QuestConfig};
use outpost_core::economy::{self, Transaction};
use outpost_core::error::{OutpostError, Result};
use outpost_core::faction::Alignment;
use outpost_core::market::Catalog;
use outpost_core::quest::{FetchQuest, TaskId, TaskKind, TaskStatus, FETCH_QUEST_NAME, RETURN_BEACON};
use outpost_core::types::{EntityId, GameTimestamp, Location, SettlementId};

use crate::components::{
    BuildingRecord, FactionAlignment, Inventory, MarketStall, NameTag, PlayerQuests,
    QuestPointRef, WalletComponent,
};
use crate::events::{GameEvent, TradeDirection};

/// A host-side action requested by a system.
///
/// Systems mutate the components they are handed and describe everything
/// else as an effect; the host applies effects with its own entity manager,
/// network layer, and UI.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Spawn a quest-point marker entity on a building's parcel.
    SpawnQuestPoint {
        /// Pre-allocated id for the new quest point.
        quest_point: EntityId,
        /// Building the quest point belongs to.
        building: EntityId,
        /// Settlement the quest point inherits.
        settlement: SettlementId,
        /// Where to spawn the marker.
        position: Location,
        /// Floating label for the marker.
        name_tag: NameTag,
    },
    /// Notify the player that a task went active.
    StartTask {
        /// The quest's player.
        player: EntityId,
        /// Short name of the quest.
        quest: String,
        /// The task that started.
        task: TaskId,
    },
    /// Destroy an entity (a consumed quest point).
    DestroyEntity {
        /// The entity to destroy.
        entity: EntityId,
    },
    /// Spawn a navigation beacon in the world.
    SpawnBeacon {
        /// Beacon id.
        beacon: String,
        /// Where to place it.
        position: Location,
    },
    /// Show the beacon overlay on the player's minimap.
    AddBeaconOverlay {
        /// The player.
        player: EntityId,
        /// Beacon id to highlight.
        beacon: String,
    },
    /// Remove the beacon overlay from the player's minimap.
    RemoveBeaconOverlay {
        /// The player.
        player: EntityId,
    },
    /// Remove item entities from the player's character.
    RemoveItems {
        /// The player.
        player: EntityId,
        /// Item id to remove.
        item: String,
        /// Units removed.
        amount: u32,
    },
    /// Credit a quest payout.
    PayReward {
        /// The player.
        player: EntityId,
        /// The payout record.
        transaction: Transaction,
    },
    /// Attach a faction alignment to an entity.
    AttachAlignment {
        /// The entity.
        entity: EntityId,
        /// The alignment to attach.
        alignment: Alignment,
    },
    /// Spawn a citizen prefab in a settlement.
    SpawnCitizen {
        /// The settlement.
        settlement: SettlementId,
        /// Citizen prefab id.
        prefab: String,
    },
}

// ---------------------------------------------------------------------------
// Quest-point regeneration
// ---------------------------------------------------------------------------

/// Counts world-time cycles and periodically re-seeds quest points on
/// buildings of the configured kind.
#[derive(Debug, Default)]
pub struct QuestPointKeeper {
    cycles_left: u64,
}

impl QuestPointKeeper {
    /// Create a keeper with a fresh cycle counter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance one world-time cycle. Every `regen_cycles`, any matching
    /// building without a quest point gets one spawned on its parcel; the
    /// building's record is updated in place so the next sweep skips it.
    pub fn on_world_time_cycle(
        &mut self,
        config: &QuestConfig,
        now: GameTimestamp,
        buildings: &mut [BuildingRecord],
    ) -> Vec<Effect> {
        self.cycles_left += 1;
        if self.cycles_left <= config.regen_cycles {
            return Vec::new();
        }

        let mut effects = Vec::new();
        for building in buildings
            .iter_mut()
            .filter(|b| b.kind == config.quest_building && b.quest_point.is_none())
        {
            let quest_point = EntityId::new();
            building.quest_point = Some(QuestPointRef {
                quest_point,
                spawned_at: now,
            });
            debug!(
                building = %building.entity,
                %quest_point,
                "quest point spawned on building parcel"
            );
            effects.push(Effect::SpawnQuestPoint {
                quest_point,
                building: building.entity,
                settlement: building.settlement.settlement,
                position: building.parcel.center_spawn(),
                name_tag: NameTag::quest_marker(),
            });
        }

        self.cycles_left = 0;
        effects
    }
}

// ---------------------------------------------------------------------------
// Quest lifecycle
// ---------------------------------------------------------------------------

/// Activate the standard fetch quest from a quest point the player used.
///
/// The quest point's location becomes the return point; the quest point
/// itself is consumed.
pub fn activate_quest(
    config: &QuestConfig,
    player: EntityId,
    quest_point: EntityId,
    return_point: Location,
    quests: &mut PlayerQuests,
) -> Vec<Effect> {
    let quest = FetchQuest::standard(player, return_point, config);
    launch_quest(quest, player, quest_point, quests)
}

/// Activate a quest by copying a template's task list into a fresh graph.
/// Statuses and collect progress are reset; the template is untouched.
pub fn activate_quest_from_template(
    template: &FetchQuest,
    player: EntityId,
    quest_point: EntityId,
    return_point: Location,
    quests: &mut PlayerQuests,
) -> Vec<Effect> {
    let quest = FetchQuest::new(
        template.short_name.clone(),
        template.description.clone(),
        player,
        return_point,
        template.graph.template_copy(),
    );
    launch_quest(quest, player, quest_point, quests)
}

fn launch_quest(
    mut quest: FetchQuest,
    player: EntityId,
    quest_point: EntityId,
    quests: &mut PlayerQuests,
) -> Vec<Effect> {
    let started = quest.graph.start();
    let mut effects: Vec<Effect> = started
        .into_iter()
        .map(|task| Effect::StartTask {
            player,
            quest: quest.short_name.clone(),
            task,
        })
        .collect();
    effects.push(Effect::DestroyEntity { entity: quest_point });
    info!(%player, quest = %quest.short_name, "quest activated");
    quests.push(quest);
    effects
}

/// React to a task going active: the return-home leg of a fetch quest gets
/// a beacon at the return point and a minimap overlay for the player.
#[must_use]
pub fn on_task_started(
    quests: &PlayerQuests,
    player: EntityId,
    quest: &str,
    task: &TaskId,
) -> Vec<Effect> {
    let Some(quest) = quests.quests.iter().find(|q| q.short_name == quest) else {
        return Vec::new();
    };
    if !quest.is_return_task(task) {
        return Vec::new();
    }
    vec![
        Effect::SpawnBeacon {
            beacon: RETURN_BEACON.to_string(),
            position: quest.return_point,
        },
        Effect::AddBeaconOverlay {
            player,
            beacon: RETURN_BEACON.to_string(),
        },
    ]
}

/// Feed an item pickup into every quest the player holds. Newly activated
/// successor tasks are announced via `StartTask` effects.
pub fn record_item_pickup(
    quests: &mut PlayerQuests,
    player: EntityId,
    item: &str,
    amount: u32,
) -> Vec<Effect> {
    let mut effects = Vec::new();
    for quest in &mut quests.quests {
        let outcome = quest.graph.record_pickup(item, amount);
        for task in outcome.activated {
            effects.push(Effect::StartTask {
                player,
                quest: quest.short_name.clone(),
                task,
            });
        }
    }
    effects
}

/// Complete the active go-to-beacon task matching a beacon the player
/// reached.
pub fn on_beacon_reached(
    quests: &mut PlayerQuests,
    player: EntityId,
    beacon: &str,
) -> Vec<Effect> {
    let mut effects = Vec::new();
    for quest in &mut quests.quests {
        let target = quest.graph.active_tasks().iter().find_map(|task| {
            match &task.kind {
                TaskKind::GoToBeacon { beacon: b } if b == beacon => Some(task.id.clone()),
                _ => None,
            }
        });
        let Some(task) = target else { continue };
        if let Ok(activated) = quest.graph.complete(&task) {
            debug!(%player, task = %task, "beacon task completed");
            for next in activated {
                effects.push(Effect::StartTask {
                    player,
                    quest: quest.short_name.clone(),
                    task: next,
                });
            }
        }
    }
    effects
}

/// Fail expired time-constraint tasks across a player's quests. Returns the
/// ids of the tasks that expired.
pub fn sweep_time_constraints(quests: &mut PlayerQuests, tick: u64) -> Vec<TaskId> {
    let mut expired = Vec::new();
    for quest in &mut quests.quests {
        expired.extend(quest.graph.expire(tick));
    }
    if !expired.is_empty() {
        warn!(count = expired.len(), tick, "time-constraint tasks expired");
    }
    expired
}

/// Turn in a successful fetch quest: take the collected items back out of
/// the inventory, pay the reward, clear the beacon overlay, and drop the
/// quest from the player's log.
///
/// A no-op (empty effect list) when the player holds no successful fetch
/// quest; the host may dispatch completion events for quests that are not
/// ours to settle.
pub fn complete_fetch_quest(
    config: &QuestConfig,
    player: EntityId,
    quests: &mut PlayerQuests,
    inventory: &mut Inventory,
    wallet: &mut WalletComponent,
) -> Vec<Effect> {
    let Some(index) = quests
        .quests
        .iter()
        .position(|q| q.short_name == FETCH_QUEST_NAME && q.status() == TaskStatus::Succeeded)
    else {
        return Vec::new();
    };
    let quest = quests.quests.remove(index);

    let required = quest.required_amount(&config.collect_item);
    let removed = inventory.remove(&config.collect_item, required);
    if removed < required {
        warn!(
            %player,
            item = %config.collect_item,
            required,
            removed,
            "inventory held fewer items than the quest demanded"
        );
    }

    wallet.wallet.deposit(config.reward);
    info!(%player, reward = config.reward, "fetch quest turned in");

    vec![
        Effect::RemoveItems {
            player,
            item: config.collect_item.clone(),
            amount: removed,
        },
        Effect::PayReward {
            player,
            transaction: Transaction::new(config.reward, "fetch quest reward"),
        },
        Effect::RemoveBeaconOverlay { player },
    ]
}

// ---------------------------------------------------------------------------
// Faction assignment
// ---------------------------------------------------------------------------

/// Draw a weighted random alignment for a newly spawned settlement.
pub fn assign_settlement_alignment<R: Rng + ?Sized>(
    rng: &mut R,
    config: &FactionConfig,
    settlement_entity: EntityId,
) -> (FactionAlignment, Effect) {
    let alignment = Alignment::sample(rng, config);
    debug!(entity = %settlement_entity, %alignment, "settlement alignment assigned");
    (
        FactionAlignment::new(alignment),
        Effect::AttachAlignment {
            entity: settlement_entity,
            alignment,
        },
    )
}

/// Buildings and citizens take their settlement's alignment; entities
/// without a settlement default to neutral.
#[must_use]
pub fn inherit_alignment(settlement: Option<FactionAlignment>) -> FactionAlignment {
    settlement.unwrap_or_default()
}

/// Pick a citizen prefab for a settlement from its alignment's roster.
pub fn spawn_citizen<R: Rng + ?Sized>(
    rng: &mut R,
    settlement: SettlementId,
    alignment: Alignment,
) -> Effect {
    let prefabs = alignment.citizen_prefabs();
    let prefab = prefabs[rng.gen_range(0..prefabs.len())];
    Effect::SpawnCitizen {
        settlement,
        prefab: prefab.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Market
// ---------------------------------------------------------------------------

/// Refill a stall's listings from the catalog. No-op until the restock
/// interval has elapsed (an empty stall always restocks). Returns the number
/// of listings stocked.
pub fn restock_stall(
    config: &MarketConfig,
    catalog: &mut Catalog,
    stall: &mut MarketStall,
    tick: u64,
) -> usize {
    let elapsed = tick.saturating_sub(stall.last_restock_tick);
    if elapsed < config.restock_interval_cycles && !stall.listings.is_empty() {
        return 0;
    }

    stall.listings.clear();
    for id in catalog.buyable_ids().into_iter().take(config.stall_capacity) {
        let listing = catalog.resolve(&id, config.default_stock);
        stall.listings.push(listing);
    }
    stall.last_restock_tick = tick;
    debug!(
        settlement = %stall.settlement,
        listings = stall.listings.len(),
        tick,
        "stall restocked"
    );
    stall.listings.len()
}

/// Player buys from a stall: checks the listing, moves currency out of the
/// wallet and items into the inventory, and decrements stall stock.
///
/// # Errors
/// `OutOfStock` if the stall lacks the listing or quantity, `NotTradeable`
/// if the listing is not buyable, `InsufficientFunds` if the wallet cannot
/// cover the cost.
pub fn buy_from_stall(
    stall: &mut MarketStall,
    player: EntityId,
    item: &str,
    quantity: u32,
    inventory: &mut Inventory,
    wallet: &mut WalletComponent,
) -> Result<Transaction> {
    let Some(listing) = stall.listing_mut(item) else {
        return Err(OutpostError::OutOfStock {
            item: item.to_string(),
            requested: quantity,
            available: 0,
        });
    };
    if !listing.buyable {
        return Err(OutpostError::NotTradeable {
            direction: "buyable",
            item: item.to_string(),
        });
    }
    if listing.quantity < quantity {
        return Err(OutpostError::OutOfStock {
            item: item.to_string(),
            requested: quantity,
            available: listing.quantity,
        });
    }

    let cost = economy::purchase_cost(listing, quantity);
    wallet.wallet.withdraw(cost)?;
    listing.quantity -= quantity;
    inventory.insert(item, quantity);

    let transaction = Transaction::new(-cost, format!("bought {quantity}x {item}"));
    debug!(%player, item, quantity, cost, "stall purchase");
    Ok(transaction)
}

/// Player sells to a stall: the catalog decides whether the item is
/// sellable, the merchant pays the buyback fraction of list price, and any
/// matching listing absorbs the stock.
///
/// # Errors
/// `NotTradeable` if the catalog says the item cannot be sold back,
/// `OutOfStock` if the player holds fewer than `quantity`.
pub fn sell_to_stall(
    config: &MarketConfig,
    catalog: &Catalog,
    stall: &mut MarketStall,
    player: EntityId,
    item: &str,
    quantity: u32,
    inventory: &mut Inventory,
    wallet: &mut WalletComponent,
) -> Result<Transaction> {
    let entry = catalog.lookup(item).unwrap_or_else(|| catalog.default_item());
    if !entry.sellable {
        return Err(OutpostError::NotTradeable {
            direction: "sellable",
            item: item.to_string(),
        });
    }
    let available = inventory.count_of(item);
    if available < quantity {
        return Err(OutpostError::OutOfStock {
            item: item.to_string(),
            requested: quantity,
            available,
        });
    }

    inventory.remove(item, quantity);
    let value = economy::sale_value(&entry, quantity, config.buyback_rate_percent);
    wallet.wallet.deposit(value);
    if let Some(listing) = stall.listing_mut(item) {
        listing.quantity = listing.quantity.saturating_add(quantity);
    }

    let transaction = Transaction::new(value, format!("sold {quantity}x {item}"));
    debug!(%player, item, quantity, value, "stall sale");
    Ok(transaction)
}

// ---------------------------------------------------------------------------
// Event dispatch
// ---------------------------------------------------------------------------

/// Convenience dispatcher for the per-player events. Trade refusals
/// (no stock, no funds, not tradeable) are logged and produce no effects —
/// an in-game "no deal" rather than an error the host must handle.
///
/// `quest_point_location` must accompany `QuestProposed`; world-time and
/// building events belong to [`QuestPointKeeper`] and the faction systems
/// instead and produce no effects here.
#[allow(clippy::too_many_arguments)]
pub fn handle_player_event(
    config: &OutpostConfig,
    event: &GameEvent,
    quests: &mut PlayerQuests,
    inventory: &mut Inventory,
    wallet: &mut WalletComponent,
    catalog: &mut Catalog,
    stall: Option<&mut MarketStall>,
    quest_point_location: Option<Location>,
) -> Vec<Effect> {
    match event {
        GameEvent::QuestProposed {
            player,
            quest_point,
        } => {
            let Some(return_point) = quest_point_location else {
                warn!(%quest_point, "quest point has no location, ignoring activation");
                return Vec::new();
            };
            activate_quest(&config.quest, *player, *quest_point, return_point, quests)
        }

        GameEvent::TaskStarted {
            player,
            quest,
            task,
        } => on_task_started(quests, *player, quest, task),

        GameEvent::ItemCollected {
            player,
            item,
            amount,
        } => record_item_pickup(quests, *player, item, *amount),

        GameEvent::BeaconReached { player, beacon } => {
            on_beacon_reached(quests, *player, beacon)
        }

        GameEvent::QuestCompleted {
            player,
            quest,
            success,
        } => {
            if !success || quest != FETCH_QUEST_NAME {
                return Vec::new();
            }
            complete_fetch_quest(&config.quest, *player, quests, inventory, wallet)
        }

        GameEvent::TradeRequested {
            player,
            item,
            quantity,
            direction,
            ..
        } => {
            let Some(stall) = stall else {
                warn!(%player, "trade requested with no stall in reach");
                return Vec::new();
            };
            let result = match direction {
                TradeDirection::PlayerBuys => {
                    buy_from_stall(stall, *player, item, *quantity, inventory, wallet)
                }
                TradeDirection::PlayerSells => sell_to_stall(
                    &config.market,
                    catalog,
                    stall,
                    *player,
                    item,
                    *quantity,
                    inventory,
                    wallet,
                ),
            };
            if let Err(refusal) = result {
                warn!(%player, item, %refusal, "trade refused");
            }
            Vec::new()
        }

        GameEvent::WorldTimeCycle { .. } | GameEvent::BuildingSpawned { .. } => Vec::new(),
    }
}
