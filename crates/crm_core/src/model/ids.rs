//! Typed entity identifiers.
//!
//! # Responsibility
//! - Give each collection its own id type so references cannot be mixed up
//!   at compile time (a `ContactId` never lands in `Task::assignee_id`).
//!
//! # Invariants
//! - Ids are random v4 UUIDs generated by the store; the nil UUID is never
//!   produced by `generate()`.
//! - Wire form is the hyphenated UUID string.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Generates a fresh random id.
            pub fn generate() -> Self {
                Self(Uuid::new_v4())
            }

            /// Wraps an existing UUID (seed data, imports).
            pub const fn from_uuid(value: Uuid) -> Self {
                Self(value)
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(value.trim()).map(Self)
            }
        }
    };
}

entity_id!(
    /// Identifier of a [`crate::User`].
    UserId
);
entity_id!(
    /// Identifier of a [`crate::Contact`].
    ContactId
);
entity_id!(
    /// Identifier of a [`crate::Task`].
    TaskId
);
entity_id!(
    /// Identifier of a [`crate::Note`].
    NoteId
);
entity_id!(
    /// Identifier of a [`crate::CrmFile`].
    FileId
);
