//! Insertion-ordered record collection with linear id lookup.
//!
//! Collections are small (a dashboard's worth of rows), so a `Vec` scan
//! keeps insertion order for free and beats a map in practice.

use crate::model::contact::Contact;
use crate::model::file::CrmFile;
use crate::model::ids::{ContactId, FileId, NoteId, TaskId, UserId};
use crate::model::note::Note;
use crate::model::task::Task;
use crate::model::user::User;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::hash::Hash;

/// Names the collection a record belongs to; used in errors and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    User,
    Contact,
    Task,
    Note,
    File,
}

impl EntityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Contact => "contact",
            Self::Task => "task",
            Self::Note => "note",
            Self::File => "file",
        }
    }
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A record stored in a [`Collection`].
pub trait Record: Clone {
    type Id: Copy + Eq + Hash + Display;
    const KIND: EntityKind;

    fn id(&self) -> Self::Id;
}

macro_rules! impl_record {
    ($record:ty, $id:ty, $kind:expr) => {
        impl Record for $record {
            type Id = $id;
            const KIND: EntityKind = $kind;

            fn id(&self) -> Self::Id {
                self.id
            }
        }
    };
}

impl_record!(User, UserId, EntityKind::User);
impl_record!(Contact, ContactId, EntityKind::Contact);
impl_record!(Task, TaskId, EntityKind::Task);
impl_record!(Note, NoteId, EntityKind::Note);
impl_record!(CrmFile, FileId, EntityKind::File);

/// Ordered set of records keyed by id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collection<T: Record> {
    items: Vec<T>,
}

impl<T: Record> Default for Collection<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Record> Collection<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn get(&self, id: T::Id) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn contains(&self, id: T::Id) -> bool {
        self.get(id).is_some()
    }

    /// Appends a record. Returns `false` (and leaves the collection as is)
    /// when the id is already present.
    pub(crate) fn push(&mut self, record: T) -> bool {
        if self.contains(record.id()) {
            return false;
        }
        self.items.push(record);
        true
    }

    pub(crate) fn get_mut(&mut self, id: T::Id) -> Option<&mut T> {
        self.items.iter_mut().find(|item| item.id() == id)
    }

    pub(crate) fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.items.iter_mut()
    }

    /// Removes the record with `id`, keeping the order of the rest.
    pub(crate) fn remove(&mut self, id: T::Id) -> Option<T> {
        let index = self.items.iter().position(|item| item.id() == id)?;
        Some(self.items.remove(index))
    }

    /// Drops every record matching `predicate`; returns how many went.
    pub(crate) fn remove_where(&mut self, mut predicate: impl FnMut(&T) -> bool) -> usize {
        let before = self.items.len();
        self.items.retain(|item| !predicate(item));
        before - self.items.len()
    }

    pub(crate) fn into_vec(self) -> Vec<T> {
        self.items
    }
}

impl<'a, T: Record> IntoIterator for &'a Collection<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
