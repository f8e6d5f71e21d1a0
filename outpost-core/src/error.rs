//! Error types for the outpost core library.

use thiserror::Error;

/// Top-level error type for all outpost operations.
#[derive(Error, Debug)]
pub enum OutpostError {
    /// A wallet withdrawal or purchase exceeded the available balance.
    #[error("Insufficient funds: needed {needed}, balance {balance}")]
    InsufficientFunds {
        /// Amount the operation required.
        needed: i64,
        /// Balance actually available.
        balance: i64,
    },

    /// A task with the given ID does not exist in the graph.
    #[error("Task not found: {0}")]
    TaskNotFound(crate::quest::TaskId),

    /// A task transition was requested that its current status does not allow.
    #[error("Invalid task transition for {task}: {from:?} -> {to:?}")]
    InvalidTransition {
        /// The task being transitioned.
        task: crate::quest::TaskId,
        /// Status before the attempted transition.
        from: crate::quest::TaskStatus,
        /// Status the transition asked for.
        to: crate::quest::TaskStatus,
    },

    /// A market operation referenced stock that is not there.
    #[error("Out of stock: {item} (requested {requested}, available {available})")]
    OutOfStock {
        /// Item identifier.
        item: String,
        /// Units requested.
        requested: u32,
        /// Units actually in stock.
        available: u32,
    },

    /// An item is not tradeable in the requested direction.
    #[error("Item not {direction}: {item}")]
    NotTradeable {
        /// "buyable" or "sellable".
        direction: &'static str,
        /// Item identifier.
        item: String,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Content-pack JSON could not be parsed.
    #[error("Item table error: {0}")]
    ItemTable(#[from] serde_json::Error),

    /// Generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience Result type alias.
pub type Result<T> = std::result::Result<T, OutpostError>;
