//! CRM domain model.
//!
//! # Responsibility
//! - Define the five record shapes held by the store and their creation
//!   payloads (`New*`, i.e. the record minus store-assigned fields).
//!
//! # Invariants
//! - Every record carries a typed id assigned by the store.
//! - Cross-entity links are weak references (ids), never embedded records.
//! - Wire field names follow the dashboard's camelCase layout.

pub mod contact;
pub mod file;
pub mod ids;
pub mod note;
pub mod task;
pub mod user;
