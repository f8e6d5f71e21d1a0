//! # outpost-veloren — Veloren Integration for Outpost
//!
//! This crate provides the integration layer between the game-agnostic
//! `outpost-core` library and Veloren's ECS (Entity Component System).
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │              Veloren ECS                 │
//! │  ┌───────────────────────────────────┐  │
//! │  │       outpost-veloren             │  │
//! │  │  ┌─────────────┐ ┌─────────────┐ │  │
//! │  │  │ Components  │ │   Systems   │ │  │
//! │  │  └──────┬──────┘ └──────┬──────┘ │  │
//! │  │         │               │         │  │
//! │  │         ▼               ▼         │  │
//! │  │    ┌─────────────────────────┐    │  │
//! │  │    │     outpost-core        │    │  │
//! │  │    └─────────────────────────┘    │  │
//! │  └───────────────────────────────────┘  │
//! └─────────────────────────────────────────┘
//! ```
//!
//! The host owns entity lifecycles, persistence, networking, and rendering.
//! Systems here only mutate the components they are handed and return
//! [`systems::Effect`] values describing everything the host must apply
//! itself (entity spawns, overlays, item removal).
//!
//! ## Modules
//!
//! - `components` — ECS components (faction alignment, quest log, inventory,
//!   wallet, market stall, quest-point bookkeeping)
//! - `systems` — ECS systems (quest-point regeneration, quest lifecycle,
//!   faction assignment, stall restocking, trading)
//! - `events` — game event types the systems react to
//! - `hooks` — integration points with the host's existing systems

pub mod components;
pub mod events;
pub mod hooks;
pub mod systems;
