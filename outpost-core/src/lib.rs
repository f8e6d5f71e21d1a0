//! # Outpost Core Library
//!
//! Game-agnostic settlement gameplay layer for voxel sandboxes: NPC faction
//! alignment, a marketplace economy, and fetch-quest mechanics.
//!
//! The library owns the data and the rules; a thin integration crate
//! (`outpost-veloren`) adapts them to a concrete game's ECS:
//!
//! - [`faction`] — alignment tags and dispositions between them
//! - [`market`] — the item catalog and its placeholder fallback
//! - [`economy`] — wallets, transactions, trade pricing
//! - [`quest`] — task graphs and derived quest status
//!
//! Everything here runs synchronously inside a host game's dispatch cycle;
//! the only shared state is the process-wide market catalog, which carries
//! its own lock.

#![deny(clippy::unwrap_used)]
#![deny(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod economy;
pub mod error;
pub mod faction;
pub mod market;
pub mod quest;
pub mod types;

pub use config::OutpostConfig;
pub use error::{OutpostError, Result};
pub use faction::{Alignment, Disposition};
pub use market::MarketItem;
pub use quest::{FetchQuest, TaskGraph, TaskStatus};
pub use types::*;
