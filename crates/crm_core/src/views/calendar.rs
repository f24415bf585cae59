//! Calendar day lookup.
//!
//! Grid layout is the view's job; this only answers "what is due that day".

use crate::model::task::Task;
use crate::store::entity_store::CrmStore;
use chrono::{Datelike, NaiveDate, TimeZone};

/// Tasks whose due date falls on `day` as seen in `tz`, in insertion order.
pub fn tasks_due_on<'a, Tz: TimeZone>(store: &'a CrmStore, day: NaiveDate, tz: &Tz) -> Vec<&'a Task> {
    store
        .tasks()
        .iter()
        .filter(|task| task.due_date.with_timezone(tz).date_naive() == day)
        .collect()
}

/// Tasks due in the calendar month containing `day`, earliest first.
pub fn tasks_due_in_month<'a, Tz: TimeZone>(
    store: &'a CrmStore,
    day: NaiveDate,
    tz: &Tz,
) -> Vec<&'a Task> {
    let mut tasks: Vec<&Task> = store
        .tasks()
        .iter()
        .filter(|task| {
            let local = task.due_date.with_timezone(tz).date_naive();
            local.year() == day.year() && local.month() == day.month()
        })
        .collect();
    tasks.sort_by_key(|task| task.due_date);
    tasks
}
