//! Read-side projections consumed by dashboard views.
//!
//! # Responsibility
//! - Turn store collections into the filtered/sorted rows each view shows,
//!   with weak references resolved to display names.
//!
//! # Invariants
//! - Projections only borrow the store; they never mutate it.
//! - A reference that does not resolve renders as absent, never panics.

pub mod calendar;
pub mod contacts;
pub mod dashboard;
pub mod files;
pub mod notes;
pub mod tasks;
