//! Task definitions — the sub-objectives a quest is made of.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a task within its graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskId(pub String);

impl TaskId {
    /// Create a task id.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for TaskId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Lifecycle status of a task (and, derived, of a whole quest).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskStatus {
    /// Not yet reachable; earlier tasks still in progress.
    Pending,
    /// Currently being worked on.
    Active,
    /// Completed successfully.
    Succeeded,
    /// Failed; fails the whole quest.
    Failed,
}

impl TaskStatus {
    /// Whether this status can no longer change.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }

    /// Whether the task is still in play (pending or active).
    #[must_use]
    pub fn is_open(&self) -> bool {
        !self.is_terminal()
    }
}

/// A single task: an id plus what kind of objective it is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Identifier within the quest's graph.
    pub id: TaskId,
    /// The objective itself.
    pub kind: TaskKind,
}

/// The kinds of objective the quest framework tracks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TaskKind {
    /// Gather a number of a specific item.
    CollectItems {
        /// Item id to collect.
        item: String,
        /// How many are required.
        required: u32,
        /// How many have been collected so far.
        collected: u32,
    },
    /// Reach a named beacon in the world.
    GoToBeacon {
        /// Beacon identifier the host navigates the player toward.
        beacon: String,
    },
    /// Watchdog: the rest of the graph must finish before this world tick.
    TimeConstraint {
        /// Deadline in world-time ticks.
        deadline_tick: u64,
    },
}

impl Task {
    /// A collect-items task with zero progress.
    #[must_use]
    pub fn collect(id: impl Into<String>, item: impl Into<String>, required: u32) -> Self {
        Self {
            id: TaskId::new(id),
            kind: TaskKind::CollectItems {
                item: item.into(),
                required,
                collected: 0,
            },
        }
    }

    /// A go-to-beacon task.
    #[must_use]
    pub fn go_to_beacon(id: impl Into<String>, beacon: impl Into<String>) -> Self {
        Self {
            id: TaskId::new(id),
            kind: TaskKind::GoToBeacon {
                beacon: beacon.into(),
            },
        }
    }

    /// A time-constraint watchdog task.
    #[must_use]
    pub fn time_constraint(id: impl Into<String>, deadline_tick: u64) -> Self {
        Self {
            id: TaskId::new(id),
            kind: TaskKind::TimeConstraint { deadline_tick },
        }
    }

    /// Whether this task is a time-constraint watchdog rather than a step the
    /// player works through.
    #[must_use]
    pub fn is_watchdog(&self) -> bool {
        matches!(self.kind, TaskKind::TimeConstraint { .. })
    }
}
