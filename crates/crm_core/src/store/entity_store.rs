//! CRM entity store: collections, CRUD operations and delete cascades.
//!
//! # Responsibility
//! - Assign ids and store-owned timestamps on creation.
//! - Replace records by id on update; remove them on delete.
//! - Keep weak references consistent when users/contacts go away.
//!
//! # Invariants
//! - `update_*` against an unknown id fails with `StoreError::NotFound`
//!   and leaves every collection untouched. The rule is identical for all
//!   five entities.
//! - `delete_*` against an unknown id returns `None`; deleting twice is safe.
//! - Deleting a user clears `Task::assignee_id` where it pointed at the user.
//! - Deleting a contact removes its notes and clears `contact_id` on tasks
//!   and files; tasks/files themselves survive.
//! - `Note::created_at` and `CrmFile::upload_date` keep their stored value
//!   across updates, whatever the caller passes.

use super::clock::{Clock, SystemClock};
use super::collection::{Collection, EntityKind, Record};
use crate::model::contact::{Contact, NewContact};
use crate::model::file::{CrmFile, NewFile};
use crate::model::ids::{ContactId, FileId, NoteId, TaskId, UserId};
use crate::model::note::{NewNote, Note};
use crate::model::task::{NewTask, Task};
use crate::model::user::{NewUser, User};
use chrono::{DateTime, Utc};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};

/// Avatar used for users created without one. `{seed}` is replaced with a
/// per-user value so avatars differ.
pub const DEFAULT_AVATAR_URL_TEMPLATE: &str = "https://picsum.photos/seed/{seed}/40/40";

pub type StoreResult<T> = Result<T, StoreError>;

/// Store operation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Update target does not exist.
    NotFound { kind: EntityKind, id: String },
    /// Snapshot contains the same id twice in one collection.
    DuplicateId { kind: EntityKind, id: String },
    /// Snapshot record points at a record that does not exist.
    DanglingReference {
        kind: EntityKind,
        id: String,
        target: EntityKind,
        target_id: String,
    },
}

impl StoreError {
    fn not_found<T: Record>(id: T::Id) -> Self {
        Self::NotFound {
            kind: T::KIND,
            id: id.to_string(),
        }
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { kind, id } => write!(f, "{kind} not found: {id}"),
            Self::DuplicateId { kind, id } => write!(f, "duplicate {kind} id: {id}"),
            Self::DanglingReference {
                kind,
                id,
                target,
                target_id,
            } => write!(
                f,
                "{kind} {id} references missing {target} {target_id}"
            ),
        }
    }
}

impl Error for StoreError {}

/// Owned copy of all five collections.
///
/// Used for export and for rebuilding a store; not a persistence format.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrmSnapshot {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub contacts: Vec<Contact>,
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub notes: Vec<Note>,
    #[serde(default)]
    pub files: Vec<CrmFile>,
}

/// Sole owner of CRM data.
pub struct CrmStore {
    users: Collection<User>,
    contacts: Collection<Contact>,
    tasks: Collection<Task>,
    notes: Collection<Note>,
    files: Collection<CrmFile>,
    clock: Box<dyn Clock>,
    avatar_url_template: String,
}

impl Debug for CrmStore {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CrmStore")
            .field("users", &self.users.len())
            .field("contacts", &self.contacts.len())
            .field("tasks", &self.tasks.len())
            .field("notes", &self.notes.len())
            .field("files", &self.files.len())
            .field("avatar_url_template", &self.avatar_url_template)
            .finish()
    }
}

impl Default for CrmStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CrmStore {
    /// Creates an empty store using the wall clock.
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }

    /// Creates an empty store stamping records with `clock`.
    pub fn with_clock(clock: impl Clock + 'static) -> Self {
        Self {
            users: Collection::new(),
            contacts: Collection::new(),
            tasks: Collection::new(),
            notes: Collection::new(),
            files: Collection::new(),
            clock: Box::new(clock),
            avatar_url_template: DEFAULT_AVATAR_URL_TEMPLATE.to_string(),
        }
    }

    /// Overrides the default-avatar template (`{seed}` placeholder).
    pub fn with_avatar_url_template(mut self, template: impl Into<String>) -> Self {
        self.avatar_url_template = template.into();
        self
    }

    /// Rebuilds a store from a snapshot.
    ///
    /// # Errors
    /// - `DuplicateId` when a collection repeats an id.
    /// - `DanglingReference` when a task, note or file points at a missing
    ///   user/contact.
    pub fn from_snapshot(snapshot: CrmSnapshot, clock: impl Clock + 'static) -> StoreResult<Self> {
        let mut store = Self::with_clock(clock);
        let CrmSnapshot {
            users,
            contacts,
            tasks,
            notes,
            files,
        } = snapshot;

        load_into(&mut store.users, users)?;
        load_into(&mut store.contacts, contacts)?;

        for task in &tasks {
            if let Some(assignee_id) = task.assignee_id {
                store.ensure_reference::<Task, User>(task.id, assignee_id)?;
            }
            if let Some(contact_id) = task.contact_id {
                store.ensure_reference::<Task, Contact>(task.id, contact_id)?;
            }
        }
        for note in &notes {
            store.ensure_reference::<Note, Contact>(note.id, note.contact_id)?;
        }
        for file in &files {
            if let Some(contact_id) = file.contact_id {
                store.ensure_reference::<CrmFile, Contact>(file.id, contact_id)?;
            }
        }

        load_into(&mut store.tasks, tasks)?;
        load_into(&mut store.notes, notes)?;
        load_into(&mut store.files, files)?;

        info!(
            "event=store_load module=store status=ok users={} contacts={} tasks={} notes={} files={}",
            store.users.len(),
            store.contacts.len(),
            store.tasks.len(),
            store.notes.len(),
            store.files.len()
        );
        Ok(store)
    }

    /// Copies the current state of all collections.
    pub fn snapshot(&self) -> CrmSnapshot {
        CrmSnapshot {
            users: self.users.as_slice().to_vec(),
            contacts: self.contacts.as_slice().to_vec(),
            tasks: self.tasks.as_slice().to_vec(),
            notes: self.notes.as_slice().to_vec(),
            files: self.files.as_slice().to_vec(),
        }
    }

    /// Consumes the store, handing back its collections.
    pub fn into_snapshot(self) -> CrmSnapshot {
        CrmSnapshot {
            users: self.users.into_vec(),
            contacts: self.contacts.into_vec(),
            tasks: self.tasks.into_vec(),
            notes: self.notes.into_vec(),
            files: self.files.into_vec(),
        }
    }

    /// Current time according to the store clock.
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    pub fn users(&self) -> &[User] {
        self.users.as_slice()
    }

    pub fn contacts(&self) -> &[Contact] {
        self.contacts.as_slice()
    }

    pub fn tasks(&self) -> &[Task] {
        self.tasks.as_slice()
    }

    pub fn notes(&self) -> &[Note] {
        self.notes.as_slice()
    }

    pub fn files(&self) -> &[CrmFile] {
        self.files.as_slice()
    }

    pub fn get_user_by_id(&self, id: UserId) -> Option<&User> {
        self.users.get(id)
    }

    pub fn get_contact_by_id(&self, id: ContactId) -> Option<&Contact> {
        self.contacts.get(id)
    }

    pub fn get_task_by_id(&self, id: TaskId) -> Option<&Task> {
        self.tasks.get(id)
    }

    pub fn get_note_by_id(&self, id: NoteId) -> Option<&Note> {
        self.notes.get(id)
    }

    pub fn get_file_by_id(&self, id: FileId) -> Option<&CrmFile> {
        self.files.get(id)
    }

    // ---- users ----

    /// Adds a user, filling in a generated avatar when none was given.
    pub fn add_user(&mut self, new: NewUser) -> User {
        let id = fresh_id(&self.users, UserId::generate);
        let avatar_url = match new.avatar_url {
            Some(url) if !url.trim().is_empty() => url,
            _ => self.default_avatar_url(&id),
        };
        let user = User {
            id,
            name: new.name,
            email: new.email,
            avatar_url,
        };
        self.insert(user)
    }

    pub fn update_user(&mut self, user: User) -> StoreResult<()> {
        replace(&mut self.users, user)
    }

    /// Removes a user and unassigns every task assigned to it.
    pub fn delete_user(&mut self, id: UserId) -> Option<User> {
        let removed = self.users.remove(id)?;
        let mut unassigned = 0usize;
        for task in self.tasks.iter_mut() {
            if task.assignee_id == Some(id) {
                task.assignee_id = None;
                unassigned += 1;
            }
        }
        info!(
            "event=user_delete module=store status=ok user_id={} tasks_unassigned={}",
            id, unassigned
        );
        Some(removed)
    }

    // ---- contacts ----

    pub fn add_contact(&mut self, new: NewContact) -> Contact {
        let id = fresh_id(&self.contacts, ContactId::generate);
        self.insert(Contact::from_new(id, new))
    }

    pub fn update_contact(&mut self, contact: Contact) -> StoreResult<()> {
        replace(&mut self.contacts, contact)
    }

    /// Removes a contact together with its notes, and detaches its tasks and
    /// files.
    pub fn delete_contact(&mut self, id: ContactId) -> Option<Contact> {
        let removed = self.contacts.remove(id)?;

        let notes_removed = self.notes.remove_where(|note| note.contact_id == id);

        let mut tasks_unlinked = 0usize;
        for task in self.tasks.iter_mut() {
            if task.contact_id == Some(id) {
                task.contact_id = None;
                tasks_unlinked += 1;
            }
        }

        let mut files_unlinked = 0usize;
        for file in self.files.iter_mut() {
            if file.contact_id == Some(id) {
                file.contact_id = None;
                files_unlinked += 1;
            }
        }

        info!(
            "event=contact_delete module=store status=ok contact_id={} notes_removed={} tasks_unlinked={} files_unlinked={}",
            id, notes_removed, tasks_unlinked, files_unlinked
        );
        Some(removed)
    }

    // ---- tasks ----

    pub fn add_task(&mut self, new: NewTask) -> Task {
        let id = fresh_id(&self.tasks, TaskId::generate);
        self.insert(Task::from_new(id, new))
    }

    pub fn update_task(&mut self, task: Task) -> StoreResult<()> {
        replace(&mut self.tasks, task)
    }

    pub fn delete_task(&mut self, id: TaskId) -> Option<Task> {
        remove(&mut self.tasks, id)
    }

    // ---- notes ----

    /// Adds a note stamped with the current time.
    pub fn add_note(&mut self, new: NewNote) -> Note {
        let id = fresh_id(&self.notes, NoteId::generate);
        let note = Note {
            id,
            content: new.content,
            contact_id: new.contact_id,
            created_at: self.clock.now(),
        };
        self.insert(note)
    }

    /// Replaces a note; `created_at` keeps its stored value.
    pub fn update_note(&mut self, note: Note) -> StoreResult<()> {
        let Some(existing) = self.notes.get(note.id) else {
            return Err(StoreError::not_found::<Note>(note.id));
        };
        let created_at = existing.created_at;
        replace(&mut self.notes, Note { created_at, ..note })
    }

    pub fn delete_note(&mut self, id: NoteId) -> Option<Note> {
        remove(&mut self.notes, id)
    }

    // ---- files ----

    /// Adds a file stamped with the current time.
    pub fn add_file(&mut self, new: NewFile) -> CrmFile {
        let id = fresh_id(&self.files, FileId::generate);
        let file = CrmFile {
            id,
            name: new.name,
            kind: new.kind,
            size: new.size,
            upload_date: self.clock.now(),
            contact_id: new.contact_id,
            data_url: new.data_url,
        };
        self.insert(file)
    }

    /// Replaces a file; `upload_date` keeps its stored value.
    pub fn update_file(&mut self, file: CrmFile) -> StoreResult<()> {
        let Some(existing) = self.files.get(file.id) else {
            return Err(StoreError::not_found::<CrmFile>(file.id));
        };
        let upload_date = existing.upload_date;
        replace(&mut self.files, CrmFile { upload_date, ..file })
    }

    pub fn delete_file(&mut self, id: FileId) -> Option<CrmFile> {
        remove(&mut self.files, id)
    }

    fn default_avatar_url(&self, id: &UserId) -> String {
        let seed = id.as_uuid().simple().to_string();
        self.avatar_url_template.replace("{seed}", &seed)
    }

    fn insert<T: Record>(&mut self, record: T) -> T
    where
        Self: CollectionFor<T>,
    {
        let stored = record.clone();
        let inserted = CollectionFor::<T>::collection_mut(self).push(record);
        debug_assert!(inserted, "fresh_id returned an id already in use");
        debug!(
            "event={}_add module=store status=ok id={}",
            T::KIND,
            stored.id()
        );
        stored
    }

    fn ensure_reference<S: Record, T: Record>(&self, source: S::Id, target: T::Id) -> StoreResult<()>
    where
        Self: CollectionFor<T>,
    {
        if CollectionFor::<T>::collection(self).contains(target) {
            return Ok(());
        }
        Err(StoreError::DanglingReference {
            kind: S::KIND,
            id: source.to_string(),
            target: T::KIND,
            target_id: target.to_string(),
        })
    }
}

/// Maps a record type to the store field holding it.
trait CollectionFor<T: Record> {
    fn collection(&self) -> &Collection<T>;
    fn collection_mut(&mut self) -> &mut Collection<T>;
}

macro_rules! collection_for {
    ($record:ty, $field:ident) => {
        impl CollectionFor<$record> for CrmStore {
            fn collection(&self) -> &Collection<$record> {
                &self.$field
            }

            fn collection_mut(&mut self) -> &mut Collection<$record> {
                &mut self.$field
            }
        }
    };
}

collection_for!(User, users);
collection_for!(Contact, contacts);
collection_for!(Task, tasks);
collection_for!(Note, notes);
collection_for!(CrmFile, files);

fn fresh_id<T: Record>(collection: &Collection<T>, generate: impl Fn() -> T::Id) -> T::Id {
    loop {
        let id = generate();
        if !collection.contains(id) {
            return id;
        }
    }
}

fn replace<T: Record>(collection: &mut Collection<T>, record: T) -> StoreResult<()> {
    let id = record.id();
    let Some(slot) = collection.get_mut(id) else {
        debug!(
            "event={}_update module=store status=not_found id={}",
            T::KIND,
            id
        );
        return Err(StoreError::not_found::<T>(id));
    };
    *slot = record;
    debug!("event={}_update module=store status=ok id={}", T::KIND, id);
    Ok(())
}

fn remove<T: Record>(collection: &mut Collection<T>, id: T::Id) -> Option<T> {
    let removed = collection.remove(id);
    let status = if removed.is_some() { "ok" } else { "absent" };
    debug!(
        "event={}_delete module=store status={} id={}",
        T::KIND,
        status,
        id
    );
    removed
}

fn load_into<T: Record>(collection: &mut Collection<T>, records: Vec<T>) -> StoreResult<()> {
    for record in records {
        let id = record.id();
        if !collection.push(record) {
            return Err(StoreError::DuplicateId {
                kind: T::KIND,
                id: id.to_string(),
            });
        }
    }
    Ok(())
}
