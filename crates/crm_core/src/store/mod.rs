//! In-memory entity store.
//!
//! # Responsibility
//! - Own the five CRM collections and route every mutation through named
//!   add/update/delete operations.
//! - Apply delete cascades so no weak reference is left dangling.
//!
//! # Invariants
//! - Ids are unique within their collection for the store lifetime.
//! - Each operation is one synchronous `&mut self` transition; a cascade is
//!   never observable half-applied.
//! - Store-assigned timestamps (`created_at`, `upload_date`) are immutable.
//!
//! # See also
//! - `crate::forms` for the validation boundary in front of the store.

pub mod clock;
pub mod collection;
pub mod entity_store;
pub mod seed;
