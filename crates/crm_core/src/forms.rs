//! Form boundary in front of the store.
//!
//! # Responsibility
//! - Hold raw form field values the way a view collects them.
//! - Validate required fields, email shape, dates and references, then
//!   build the `New*` payload (add) or full replacement record (edit).
//!
//! # Invariants
//! - The store trusts its inputs; everything it must not receive is
//!   rejected here.
//! - Date-only input (`YYYY-MM-DD`) means midnight UTC of that day.
//! - Edits carry store-assigned fields (ids, `created_at`) forward from the
//!   existing record.

use crate::model::contact::{Contact, NewContact};
use crate::model::ids::{ContactId, UserId};
use crate::model::note::{NewNote, Note};
use crate::model::task::{NewTask, Task, TaskStatus};
use crate::model::user::{NewUser, User};
use crate::store::collection::EntityKind;
use crate::store::entity_store::CrmStore;
use chrono::{DateTime, NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

const DATE_INPUT_FORMAT: &str = "%Y-%m-%d";

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

pub type FormResult<T> = Result<T, FormError>;

/// Validation failure reported back to the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    /// A required field is blank.
    MissingField(&'static str),
    /// Email does not look like `local@domain.tld`.
    InvalidEmail(String),
    /// Date is neither `YYYY-MM-DD` nor RFC 3339.
    InvalidDate { field: &'static str, value: String },
    /// Selected reference is not a well-formed id.
    MalformedReference { field: &'static str, value: String },
    /// Selected reference does not exist in the store.
    UnknownReference { kind: EntityKind, id: String },
}

impl Display for FormError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "{field} is required"),
            Self::InvalidEmail(value) => write!(f, "invalid email address: `{value}`"),
            Self::InvalidDate { field, value } => {
                write!(f, "invalid {field}: `{value}`; expected YYYY-MM-DD or RFC 3339")
            }
            Self::MalformedReference { field, value } => {
                write!(f, "invalid {field} selection: `{value}`")
            }
            Self::UnknownReference { kind, id } => write!(f, "{kind} does not exist: {id}"),
        }
    }
}

impl Error for FormError {}

/// Parses date input into a timestamp.
///
/// Accepts `YYYY-MM-DD` (midnight UTC) or a full RFC 3339 timestamp.
pub fn parse_date_input(field: &'static str, value: &str) -> FormResult<DateTime<Utc>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(FormError::MissingField(field));
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, DATE_INPUT_FORMAT) {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(midnight.and_utc());
        }
    }
    DateTime::parse_from_rfc3339(trimmed)
        .map(|parsed| parsed.with_timezone(&Utc))
        .map_err(|_| FormError::InvalidDate {
            field,
            value: trimmed.to_string(),
        })
}

/// Renders a timestamp as date-only form input.
pub fn format_date_input(value: DateTime<Utc>) -> String {
    value.format(DATE_INPUT_FORMAT).to_string()
}

fn required(field: &'static str, value: &str) -> FormResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(FormError::MissingField(field));
    }
    Ok(trimmed.to_string())
}

fn email(value: &str) -> FormResult<String> {
    let email = required("email", value)?;
    if !EMAIL_RE.is_match(&email) {
        return Err(FormError::InvalidEmail(email));
    }
    Ok(email)
}

fn optional_contact(
    store: &CrmStore,
    field: &'static str,
    value: &str,
) -> FormResult<Option<ContactId>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    required_contact(store, field, trimmed).map(Some)
}

fn required_contact(store: &CrmStore, field: &'static str, value: &str) -> FormResult<ContactId> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(FormError::MissingField(field));
    }
    let id: ContactId = trimmed
        .parse()
        .map_err(|_| FormError::MalformedReference {
            field,
            value: trimmed.to_string(),
        })?;
    if store.get_contact_by_id(id).is_none() {
        return Err(FormError::UnknownReference {
            kind: EntityKind::Contact,
            id: id.to_string(),
        });
    }
    Ok(id)
}

fn optional_user(store: &CrmStore, field: &'static str, value: &str) -> FormResult<Option<UserId>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let id: UserId = trimmed
        .parse()
        .map_err(|_| FormError::MalformedReference {
            field,
            value: trimmed.to_string(),
        })?;
    if store.get_user_by_id(id).is_none() {
        return Err(FormError::UnknownReference {
            kind: EntityKind::User,
            id: id.to_string(),
        });
    }
    Ok(Some(id))
}

/// User add/edit form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserForm {
    pub name: String,
    pub email: String,
    /// Blank asks for a generated avatar on add, keeps the current one on edit.
    pub avatar_url: String,
}

impl UserForm {
    pub fn from_user(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            email: user.email.clone(),
            avatar_url: user.avatar_url.clone(),
        }
    }

    pub fn validate(&self) -> FormResult<NewUser> {
        let avatar_url = self.avatar_url.trim();
        Ok(NewUser {
            name: required("name", &self.name)?,
            email: email(&self.email)?,
            avatar_url: (!avatar_url.is_empty()).then(|| avatar_url.to_string()),
        })
    }

    pub fn apply_to(&self, existing: &User) -> FormResult<User> {
        let new = self.validate()?;
        Ok(User {
            id: existing.id,
            name: new.name,
            email: new.email,
            avatar_url: new
                .avatar_url
                .unwrap_or_else(|| existing.avatar_url.clone()),
        })
    }
}

/// Contact add/edit form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company: String,
    /// Date-only input.
    pub last_contacted: String,
}

impl ContactForm {
    /// Blank form with "last contacted" preset to `today`.
    pub fn blank(today: DateTime<Utc>) -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            phone: String::new(),
            company: String::new(),
            last_contacted: format_date_input(today),
        }
    }

    pub fn from_contact(contact: &Contact) -> Self {
        Self {
            name: contact.name.clone(),
            email: contact.email.clone(),
            phone: contact.phone.clone(),
            company: contact.company.clone(),
            last_contacted: format_date_input(contact.last_contacted),
        }
    }

    pub fn validate(&self) -> FormResult<NewContact> {
        Ok(NewContact {
            name: required("name", &self.name)?,
            email: email(&self.email)?,
            phone: self.phone.trim().to_string(),
            company: self.company.trim().to_string(),
            last_contacted: parse_date_input("last contacted", &self.last_contacted)?,
        })
    }

    pub fn apply_to(&self, existing: &Contact) -> FormResult<Contact> {
        let new = self.validate()?;
        Ok(Contact {
            id: existing.id,
            name: new.name,
            email: new.email,
            phone: new.phone,
            company: new.company,
            last_contacted: new.last_contacted,
        })
    }
}

/// Task add/edit form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskForm {
    pub title: String,
    pub description: String,
    /// Date-only input.
    pub due_date: String,
    pub status: TaskStatus,
    /// Selected user id; blank means unassigned.
    pub assignee_id: String,
    /// Selected contact id; blank means none.
    pub contact_id: String,
}

impl TaskForm {
    /// Blank form preselecting the first user as assignee.
    pub fn blank(store: &CrmStore) -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            due_date: String::new(),
            status: TaskStatus::Pending,
            assignee_id: store
                .users()
                .first()
                .map(|user| user.id.to_string())
                .unwrap_or_default(),
            contact_id: String::new(),
        }
    }

    /// Blank form with the due date preset (calendar "add on this day").
    pub fn blank_on(store: &CrmStore, day: NaiveDate) -> Self {
        Self {
            due_date: day.format(DATE_INPUT_FORMAT).to_string(),
            ..Self::blank(store)
        }
    }

    pub fn from_task(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone(),
            due_date: format_date_input(task.due_date),
            status: task.status,
            assignee_id: task.assignee_id.map(|id| id.to_string()).unwrap_or_default(),
            contact_id: task.contact_id.map(|id| id.to_string()).unwrap_or_default(),
        }
    }

    pub fn validate(&self, store: &CrmStore) -> FormResult<NewTask> {
        Ok(NewTask {
            title: required("title", &self.title)?,
            description: self.description.trim().to_string(),
            due_date: parse_date_input("due date", &self.due_date)?,
            status: self.status,
            assignee_id: optional_user(store, "assignee", &self.assignee_id)?,
            contact_id: optional_contact(store, "contact", &self.contact_id)?,
        })
    }

    pub fn apply_to(&self, store: &CrmStore, existing: &Task) -> FormResult<Task> {
        let new = self.validate(store)?;
        Ok(Task {
            id: existing.id,
            title: new.title,
            description: new.description,
            due_date: new.due_date,
            status: new.status,
            assignee_id: new.assignee_id,
            contact_id: new.contact_id,
        })
    }
}

/// Note add/edit form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteForm {
    pub content: String,
    /// Selected contact id; required.
    pub contact_id: String,
}

impl NoteForm {
    pub fn from_note(note: &Note) -> Self {
        Self {
            content: note.content.clone(),
            contact_id: note.contact_id.to_string(),
        }
    }

    pub fn validate(&self, store: &CrmStore) -> FormResult<NewNote> {
        Ok(NewNote {
            content: required("content", &self.content)?,
            contact_id: required_contact(store, "contact", &self.contact_id)?,
        })
    }

    pub fn apply_to(&self, store: &CrmStore, existing: &Note) -> FormResult<Note> {
        let new = self.validate(store)?;
        Ok(Note {
            id: existing.id,
            content: new.content,
            contact_id: new.contact_id,
            created_at: existing.created_at,
        })
    }
}
