//! Task lifecycle engine.
//!
//! # Responsibility
//! - Sole owner of task mutation: creation, status transitions, comments.
//! - Report the observable status, deriving `overdue` from the deadline.
//!
//! # Invariants
//! - `pending -> in-progress -> completed` are the only explicit moves.
//! - A task whose observable status is terminal (`completed` or `overdue`)
//!   rejects `start_task` and `complete_task`.
//! - Role-scoped operations treat an invisible task as unknown.

use std::sync::Arc;

use log::{debug, info, warn};

use crate::clock::Clock;
use crate::error::{Collection, CoreError, CoreResult};
use crate::model::filter::TaskFilter;
use crate::model::role::Role;
use crate::model::task::{NewTask, Task, TaskId, TaskStatus};
use crate::repo::RecordRepository;
use crate::visibility::{is_visible, Scoped};

/// Use-case service for task workflow operations.
pub struct TaskService<R: RecordRepository<Item = Task>> {
    repo: R,
    clock: Arc<dyn Clock>,
}

impl<R: RecordRepository<Item = Task>> TaskService<R> {
    pub fn new(repo: R, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }

    /// Creates a pending task with the next id and `created_date = now`.
    ///
    /// # Errors
    /// - `Validation` when `title` or `assigned_to` is blank.
    pub fn create_task(&self, new: NewTask) -> CoreResult<Task> {
        let now = self.clock.now();
        let result = self
            .repo
            .insert_with(|id| Task::create(id, new, now).map_err(CoreError::from));
        match &result {
            Ok(task) => info!(
                "event=task_create module=task status=ok task_id={} department={} priority={}",
                task.id, task.department, task.priority
            ),
            Err(err) => warn!("event=task_create module=task status=error error={err}"),
        }
        result
    }

    /// Returns one task with its observable status.
    pub fn get_task(&self, role: Role, id: TaskId) -> CoreResult<Task> {
        let today = self.clock.today();
        self.repo
            .get(id)?
            .filter(|task| is_visible(role, task.department()))
            .map(|task| task.observed(today))
            .ok_or_else(|| CoreError::not_found(Collection::Tasks, id))
    }

    /// Every task the role may see, in insertion order, with observable status.
    pub fn visible_tasks(&self, role: Role) -> CoreResult<Vec<Task>> {
        self.list_tasks(role, &TaskFilter::default())
    }

    /// Display list: department filter AND status filter AND visibility.
    ///
    /// The status filter compares against the observable status, so an
    /// `overdue` filter finds tasks whose deadline passed.
    pub fn list_tasks(&self, role: Role, filter: &TaskFilter) -> CoreResult<Vec<Task>> {
        let today = self.clock.today();
        Ok(self
            .repo
            .list()?
            .into_iter()
            .map(|task| task.observed(today))
            .filter(|task| {
                filter.matches(&task.department, task.status)
                    && is_visible(role, task.department())
            })
            .collect())
    }

    /// `pending -> in-progress`. Re-starting an in-progress task is a no-op.
    pub fn start_task(&self, role: Role, id: TaskId) -> CoreResult<Task> {
        self.transition(role, id, TaskStatus::InProgress, true)
    }

    /// `in-progress -> completed`.
    pub fn complete_task(&self, role: Role, id: TaskId) -> CoreResult<Task> {
        self.transition(role, id, TaskStatus::Completed, true)
    }

    /// Moves a task to `target` when the transition is allowed.
    ///
    /// Re-invoking with the current observable status is a no-op, including
    /// `completed -> completed` and `overdue -> overdue`.
    ///
    /// # Errors
    /// - `NotFound` for an unknown (or invisible) id.
    /// - `InvalidTransition` for any move outside the allowed set.
    pub fn update_status(&self, role: Role, id: TaskId, target: TaskStatus) -> CoreResult<Task> {
        self.transition(role, id, target, false)
    }

    /// Records one more comment on the task thread.
    pub fn add_comment(&self, role: Role, id: TaskId) -> CoreResult<Task> {
        let today = self.clock.today();
        self.repo.update_with(id, |task| {
            if !is_visible(role, task.department()) {
                return Err(CoreError::not_found(Collection::Tasks, id));
            }
            task.comment_count = task.comment_count.saturating_add(1);
            debug!(
                "event=task_comment module=task status=ok task_id={} comments={}",
                id, task.comment_count
            );
            Ok(task.observed(today))
        })
    }

    fn transition(
        &self,
        role: Role,
        id: TaskId,
        target: TaskStatus,
        reject_terminal: bool,
    ) -> CoreResult<Task> {
        let today = self.clock.today();
        let result = self.repo.update_with(id, |task| {
            if !is_visible(role, task.department()) {
                return Err(CoreError::not_found(Collection::Tasks, id));
            }
            let current = task.observed_status(today);
            let allowed = if reject_terminal && current.is_terminal() {
                false
            } else {
                current.allows(target)
            };
            if !allowed {
                return Err(CoreError::InvalidTransition {
                    collection: Collection::Tasks,
                    id,
                    from: current.as_str(),
                    to: target.as_str(),
                });
            }
            if current != target {
                task.status = target;
            }
            Ok((current, task.observed(today)))
        });

        match result {
            Ok((from, task)) => {
                let status = if from == task.status { "noop" } else { "ok" };
                info!(
                    "event=task_transition module=task status={status} task_id={id} from={from} to={}",
                    task.status
                );
                Ok(task)
            }
            Err(err) => {
                warn!("event=task_transition module=task status=error task_id={id} target={target} error={err}");
                Err(err)
            }
        }
    }
}
