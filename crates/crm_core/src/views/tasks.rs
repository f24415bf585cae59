//! Task table rows.

use crate::model::task::Task;
use crate::model::user::User;
use crate::store::entity_store::CrmStore;

/// Task with its assignee and contact resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRow<'a> {
    pub task: &'a Task,
    pub assignee: Option<&'a User>,
    pub contact_name: Option<&'a str>,
}

impl TaskRow<'_> {
    /// Assignee name, or `Unassigned`.
    pub fn assignee_name(&self) -> &str {
        User::display_name(self.assignee)
    }
}

/// Resolves one task against the store.
pub fn task_row<'a>(store: &'a CrmStore, task: &'a Task) -> TaskRow<'a> {
    TaskRow {
        task,
        assignee: task.assignee_id.and_then(|id| store.get_user_by_id(id)),
        contact_name: task
            .contact_id
            .and_then(|id| store.get_contact_by_id(id))
            .map(|contact| contact.name.as_str()),
    }
}

/// All tasks in insertion order.
pub fn task_rows(store: &CrmStore) -> Vec<TaskRow<'_>> {
    store.tasks().iter().map(|task| task_row(store, task)).collect()
}
