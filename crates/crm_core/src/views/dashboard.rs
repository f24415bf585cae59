//! Dashboard headline numbers and recent-task table.

use super::tasks::{task_row, TaskRow};
use crate::model::task::TaskStatus;
use crate::store::entity_store::CrmStore;

/// How many tasks the "recent" table shows.
pub const RECENT_TASKS_LIMIT: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardSummary<'a> {
    pub total_contacts: usize,
    pub total_tasks: usize,
    pub pending_tasks: usize,
    pub completed_tasks: usize,
    /// The first `RECENT_TASKS_LIMIT` tasks by insertion, latest due first.
    pub recent_tasks: Vec<TaskRow<'a>>,
}

pub fn dashboard_summary(store: &CrmStore) -> DashboardSummary<'_> {
    let tasks = store.tasks();
    let count_status =
        |status: TaskStatus| tasks.iter().filter(|task| task.status == status).count();

    let mut recent_tasks: Vec<TaskRow<'_>> = tasks
        .iter()
        .take(RECENT_TASKS_LIMIT)
        .map(|task| task_row(store, task))
        .collect();
    recent_tasks.sort_by(|a, b| b.task.due_date.cmp(&a.task.due_date));

    DashboardSummary {
        total_contacts: store.contacts().len(),
        total_tasks: tasks.len(),
        pending_tasks: count_status(TaskStatus::Pending),
        completed_tasks: count_status(TaskStatus::Completed),
        recent_tasks,
    }
}
