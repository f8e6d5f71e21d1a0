//! Outpost Benchmark Suite
//!
//! The gameplay layer runs inside the host's frame, so the hot paths are
//! held to frame-budget scale:
//!   catalog_resolve_known ........ < 1μs
//!   catalog_resolve_fallback ..... < 5μs
//!   quest_status_50_tasks ........ < 5μs
//!   pickup_cascade_50_tasks ...... < 20μs
//!   quest_lifecycle_end_to_end ... < 50μs

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use outpost_core::config::QuestConfig;
use outpost_core::market::Catalog;
use outpost_core::quest::{FetchQuest, Task, TaskGraph, RETURN_BEACON};
use outpost_core::types::{EntityId, Location};
use outpost_veloren::components::{Inventory, PlayerQuests, WalletComponent};
use outpost_veloren::systems;

fn big_fetch_quest(tasks: u32) -> FetchQuest {
    let mut graph = TaskGraph::new();
    for i in 0..tasks {
        graph.push(Task::collect(
            format!("gather_{i}"),
            "wildlife:raw_meat",
            1,
        ));
    }
    graph.push(Task::go_to_beacon("return_home", "quest_return"));
    let mut quest = FetchQuest::new(
        "FetchQuest",
        "benchmark quest",
        EntityId::new(),
        Location::default(),
        graph,
    );
    quest.graph.start();
    quest
}

/// Benchmark: known-item catalog resolution (target: < 1μs).
fn bench_catalog_resolve_known(c: &mut Criterion) {
    let mut catalog = Catalog::new();
    c.bench_function("catalog_resolve_known", |b| {
        b.iter(|| {
            let item = catalog.resolve(black_box("core:torch"), black_box(3));
            black_box(item);
        });
    });
}

/// Benchmark: fallback synthesis for an unknown id, first hit only
/// (target: < 5μs). Later hits are plain cache lookups.
fn bench_catalog_resolve_fallback(c: &mut Criterion) {
    let mut i = 0u64;
    let mut catalog = Catalog::new();
    c.bench_function("catalog_resolve_fallback", |b| {
        b.iter(|| {
            i += 1;
            let item = catalog.resolve(black_box(&format!("mystery:item_{i}")), 1);
            black_box(item);
        });
    });
}

/// Benchmark: quest status derivation over a 50-task graph (target: < 5μs).
fn bench_quest_status(c: &mut Criterion) {
    let quest = big_fetch_quest(50);
    c.bench_function("quest_status_50_tasks", |b| {
        b.iter(|| {
            let status = black_box(&quest).status();
            black_box(status);
        });
    });
}

/// Benchmark: a pickup cascading through a 50-task graph (target: < 20μs).
fn bench_pickup_cascade(c: &mut Criterion) {
    c.bench_function("pickup_cascade_50_tasks", |b| {
        b.iter_with_setup(
            || big_fetch_quest(50),
            |mut quest| {
                let outcome = quest
                    .graph
                    .record_pickup(black_box("wildlife:raw_meat"), 1);
                black_box(outcome);
            },
        );
    });
}

/// Benchmark: the standard quest template build (target: < 2μs).
fn bench_standard_quest_build(c: &mut Criterion) {
    let config = QuestConfig::default();
    let player = EntityId::new();
    c.bench_function("standard_quest_build", |b| {
        b.iter(|| {
            let quest = FetchQuest::standard(player, Location::default(), black_box(&config));
            black_box(quest);
        });
    });
}

/// Benchmark: the whole quest lifecycle through the systems layer —
/// activate, collect, return, turn in (target: < 50μs).
fn bench_quest_lifecycle(c: &mut Criterion) {
    let config = QuestConfig::default();
    let player = EntityId::new();
    c.bench_function("quest_lifecycle_end_to_end", |b| {
        b.iter_with_setup(
            || {
                let mut inventory = Inventory::new();
                inventory.insert(&config.collect_item, config.collect_amount);
                (PlayerQuests::new(), inventory, WalletComponent::default())
            },
            |(mut quests, mut inventory, mut wallet)| {
                let effects = systems::activate_quest(
                    &config,
                    player,
                    EntityId::new(),
                    Location::default(),
                    &mut quests,
                );
                black_box(effects);
                systems::record_item_pickup(
                    &mut quests,
                    player,
                    &config.collect_item,
                    config.collect_amount,
                );
                systems::on_beacon_reached(&mut quests, player, RETURN_BEACON);
                let effects = systems::complete_fetch_quest(
                    &config,
                    player,
                    &mut quests,
                    &mut inventory,
                    &mut wallet,
                );
                black_box(effects);
            },
        );
    });
}

criterion_group!(
    benches,
    bench_catalog_resolve_known,
    bench_catalog_resolve_fallback,
    bench_quest_status,
    bench_pickup_cascade,
    bench_standard_quest_build,
    bench_quest_lifecycle,
);
criterion_main!(benches);
