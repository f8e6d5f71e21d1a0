//! The task graph — ordered sub-objectives with per-task status.
//!
//! Progress tasks (collect, beacon) run one at a time in insertion order.
//! Time-constraint tasks are watchdogs: they go active when the graph starts
//! and succeed only once every progress task has succeeded; a tick sweep
//! fails them if their deadline passes first.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{OutpostError, Result};

use super::task::{Task, TaskId, TaskKind, TaskStatus};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct TaskEntry {
    task: Task,
    status: TaskStatus,
}

/// An ordered list of tasks with their statuses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskGraph {
    entries: Vec<TaskEntry>,
}

/// What a pickup did to the graph: which collect tasks it satisfied and
/// which successor tasks went active as a result.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PickupOutcome {
    /// Collect tasks completed by this pickup.
    pub satisfied: Vec<TaskId>,
    /// Tasks newly activated by the cascade.
    pub activated: Vec<TaskId>,
}

impl TaskGraph {
    /// Create an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a task as `Pending`.
    pub fn push(&mut self, task: Task) {
        self.entries.push(TaskEntry {
            task,
            status: TaskStatus::Pending,
        });
    }

    /// Activate the graph: the first pending progress task goes active, and
    /// every time-constraint watchdog starts ticking. Returns the ids of
    /// newly activated tasks.
    pub fn start(&mut self) -> Vec<TaskId> {
        let mut started = Vec::new();
        for entry in &mut self.entries {
            if entry.task.is_watchdog() && entry.status == TaskStatus::Pending {
                entry.status = TaskStatus::Active;
                started.push(entry.task.id.clone());
            }
        }
        let progress_active = self
            .entries
            .iter()
            .any(|e| !e.task.is_watchdog() && e.status == TaskStatus::Active);
        if !progress_active {
            if let Some(entry) = self
                .entries
                .iter_mut()
                .find(|e| !e.task.is_watchdog() && e.status == TaskStatus::Pending)
            {
                entry.status = TaskStatus::Active;
                started.push(entry.task.id.clone());
            }
        }
        started
    }

    /// Status of the task with the given id.
    ///
    /// # Errors
    /// Returns `OutpostError::TaskNotFound` for an unknown id.
    pub fn status_of(&self, id: &TaskId) -> Result<TaskStatus> {
        self.entry(id).map(|e| e.status)
    }

    /// Mark an active task as succeeded and activate its successor.
    /// Returns the ids of newly activated tasks (at most one progress task;
    /// none once the graph is exhausted).
    ///
    /// # Errors
    /// `TaskNotFound` for unknown ids; `InvalidTransition` if the task is not
    /// active.
    pub fn complete(&mut self, id: &TaskId) -> Result<Vec<TaskId>> {
        let index = self.index_of(id)?;
        let status = self.entries[index].status;
        if status != TaskStatus::Active {
            return Err(OutpostError::InvalidTransition {
                task: id.clone(),
                from: status,
                to: TaskStatus::Succeeded,
            });
        }
        self.entries[index].status = TaskStatus::Succeeded;
        debug!(task = %id, "task succeeded");
        Ok(self.advance())
    }

    /// Mark an open task as failed.
    ///
    /// # Errors
    /// `TaskNotFound` for unknown ids; `InvalidTransition` if the task has
    /// already finished.
    pub fn fail(&mut self, id: &TaskId) -> Result<()> {
        let index = self.index_of(id)?;
        let status = self.entries[index].status;
        if status.is_terminal() {
            return Err(OutpostError::InvalidTransition {
                task: id.clone(),
                from: status,
                to: TaskStatus::Failed,
            });
        }
        self.entries[index].status = TaskStatus::Failed;
        debug!(task = %id, "task failed");
        Ok(())
    }

    /// Feed collected items into active collect tasks. Satisfied tasks
    /// complete, activating their successors.
    pub fn record_pickup(&mut self, item: &str, amount: u32) -> PickupOutcome {
        let mut outcome = PickupOutcome::default();
        for entry in &mut self.entries {
            if entry.status != TaskStatus::Active {
                continue;
            }
            if let TaskKind::CollectItems {
                item: wanted,
                required,
                collected,
            } = &mut entry.task.kind
            {
                if wanted == item {
                    *collected = collected.saturating_add(amount);
                    if *collected >= *required {
                        outcome.satisfied.push(entry.task.id.clone());
                    }
                }
            }
        }
        for id in outcome.satisfied.clone() {
            if let Ok(mut next) = self.complete(&id) {
                outcome.activated.append(&mut next);
            }
        }
        outcome
    }

    /// A fresh copy of this graph's tasks with all statuses back to
    /// `Pending` and collect progress zeroed. Quest points hand these out so
    /// every activation starts from a clean slate.
    #[must_use]
    pub fn template_copy(&self) -> TaskGraph {
        let mut copy = TaskGraph::new();
        for entry in &self.entries {
            let mut task = entry.task.clone();
            if let TaskKind::CollectItems { collected, .. } = &mut task.kind {
                *collected = 0;
            }
            copy.push(task);
        }
        copy
    }

    /// Fail any active time-constraint task whose deadline has passed.
    /// Returns the ids of the tasks that expired.
    pub fn expire(&mut self, tick: u64) -> Vec<TaskId> {
        let mut expired = Vec::new();
        for entry in &mut self.entries {
            if entry.status != TaskStatus::Active {
                continue;
            }
            if let TaskKind::TimeConstraint { deadline_tick } = entry.task.kind {
                if tick > deadline_tick {
                    entry.status = TaskStatus::Failed;
                    debug!(task = %entry.task.id, tick, deadline_tick, "time constraint expired");
                    expired.push(entry.task.id.clone());
                }
            }
        }
        expired
    }

    /// Tasks currently active, in insertion order.
    #[must_use]
    pub fn active_tasks(&self) -> Vec<&Task> {
        self.entries
            .iter()
            .filter(|e| e.status == TaskStatus::Active)
            .map(|e| &e.task)
            .collect()
    }

    /// Iterate over `(task, status)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&Task, TaskStatus)> {
        self.entries.iter().map(|e| (&e.task, e.status))
    }

    /// Number of tasks in the graph.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the graph holds no tasks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Activate the next pending progress task, if the previous ones are all
    /// done. Once no open progress tasks remain, active watchdogs succeed
    /// (the deadline was met).
    fn advance(&mut self) -> Vec<TaskId> {
        let mut activated = Vec::new();
        let progress_open = self
            .entries
            .iter()
            .any(|e| !e.task.is_watchdog() && e.status == TaskStatus::Active);
        if !progress_open {
            if let Some(entry) = self
                .entries
                .iter_mut()
                .find(|e| !e.task.is_watchdog() && e.status == TaskStatus::Pending)
            {
                entry.status = TaskStatus::Active;
                activated.push(entry.task.id.clone());
            }
        }

        let all_progress_done = self
            .entries
            .iter()
            .filter(|e| !e.task.is_watchdog())
            .all(|e| e.status == TaskStatus::Succeeded);
        if all_progress_done {
            for entry in &mut self.entries {
                if entry.task.is_watchdog() && entry.status == TaskStatus::Active {
                    entry.status = TaskStatus::Succeeded;
                }
            }
        }
        activated
    }

    fn entry(&self, id: &TaskId) -> Result<&TaskEntry> {
        self.entries
            .iter()
            .find(|e| &e.task.id == id)
            .ok_or_else(|| OutpostError::TaskNotFound(id.clone()))
    }

    fn index_of(&self, id: &TaskId) -> Result<usize> {
        self.entries
            .iter()
            .position(|e| &e.task.id == id)
            .ok_or_else(|| OutpostError::TaskNotFound(id.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_step_graph() -> TaskGraph {
        let mut graph = TaskGraph::new();
        graph.push(Task::collect("gather", "wildlife:raw_meat", 2));
        graph.push(Task::go_to_beacon("return_home", "quest_return"));
        graph
    }

    #[test]
    fn start_activates_first_progress_task_only() {
        let mut graph = two_step_graph();
        let started = graph.start();
        assert_eq!(started, vec![TaskId::from("gather")]);
        assert_eq!(
            graph.status_of(&TaskId::from("return_home")).expect("known"),
            TaskStatus::Pending
        );
    }

    #[test]
    fn completion_cascades_to_successor() {
        let mut graph = two_step_graph();
        graph.start();
        let activated = graph.complete(&TaskId::from("gather")).expect("active");
        assert_eq!(activated, vec![TaskId::from("return_home")]);
    }

    #[test]
    fn completing_a_pending_task_is_rejected() {
        let mut graph = two_step_graph();
        graph.start();
        let err = graph
            .complete(&TaskId::from("return_home"))
            .expect_err("not active yet");
        assert!(matches!(err, OutpostError::InvalidTransition { .. }));
    }

    #[test]
    fn unknown_task_errors() {
        let graph = two_step_graph();
        assert!(matches!(
            graph.status_of(&TaskId::from("nope")),
            Err(OutpostError::TaskNotFound(_))
        ));
    }

    #[test]
    fn pickups_accumulate_and_complete() {
        let mut graph = two_step_graph();
        graph.start();
        assert!(graph.record_pickup("wildlife:raw_meat", 1).satisfied.is_empty());
        let outcome = graph.record_pickup("wildlife:raw_meat", 1);
        assert_eq!(outcome.satisfied, vec![TaskId::from("gather")]);
        assert_eq!(outcome.activated, vec![TaskId::from("return_home")]);
        assert_eq!(
            graph.status_of(&TaskId::from("return_home")).expect("known"),
            TaskStatus::Active
        );
    }

    #[test]
    fn pickups_of_other_items_are_ignored() {
        let mut graph = two_step_graph();
        graph.start();
        let outcome = graph.record_pickup("fruits:tomato", 10);
        assert_eq!(outcome, PickupOutcome::default());
        assert_eq!(
            graph.status_of(&TaskId::from("gather")).expect("known"),
            TaskStatus::Active
        );
    }

    #[test]
    fn template_copy_resets_statuses_and_progress() {
        let mut graph = two_step_graph();
        graph.start();
        graph.record_pickup("wildlife:raw_meat", 2);

        let copy = graph.template_copy();
        assert_eq!(copy.len(), graph.len());
        for (task, status) in copy.iter() {
            assert_eq!(status, TaskStatus::Pending);
            if let TaskKind::CollectItems { collected, .. } = &task.kind {
                assert_eq!(*collected, 0);
            }
        }
    }

    #[test]
    fn watchdog_starts_with_graph_and_succeeds_when_progress_done() {
        let mut graph = two_step_graph();
        graph.push(Task::time_constraint("deadline", 100));
        let started = graph.start();
        assert!(started.contains(&TaskId::from("deadline")));

        graph.complete(&TaskId::from("gather")).expect("active");
        graph.complete(&TaskId::from("return_home")).expect("active");
        assert_eq!(
            graph.status_of(&TaskId::from("deadline")).expect("known"),
            TaskStatus::Succeeded
        );
    }

    #[test]
    fn watchdog_expires_after_deadline() {
        let mut graph = two_step_graph();
        graph.push(Task::time_constraint("deadline", 100));
        graph.start();
        assert!(graph.expire(100).is_empty());
        let expired = graph.expire(101);
        assert_eq!(expired, vec![TaskId::from("deadline")]);
    }
}
