//! Task description drafting through an external text generator.
//!
//! # Responsibility
//! - Define the generator seam (`TextGenerator`) and its failure taxonomy.
//! - Provide the HTTP backend and the form-side session that applies a
//!   generated description only to the form that asked for it.
//!
//! # Invariants
//! - An empty title never reaches a generator.
//! - One attempt per request; failures are returned, logged and contained.
//! - Nothing here touches the entity store.

pub mod draft;
pub mod gemini;
pub mod generator;
