//! Core domain logic for the CRM dashboard.
//! This crate owns all CRM data and the rules that keep it consistent.

pub mod assist;
pub mod config;
pub mod forms;
pub mod logging;
pub mod model;
pub mod nav;
pub mod store;
pub mod upload;
pub mod views;

pub use assist::draft::{ApplyOutcome, PendingDescription, TaskDraft};
pub use assist::gemini::GeminiGenerator;
pub use assist::generator::{
    describe_task, task_description_prompt, GenerationError, TextGenerator,
    GENERATION_FAILED_MESSAGE,
};
pub use config::{ConfigError, CrmConfig, GeneratorConfig};
pub use forms::{ContactForm, FormError, FormResult, NoteForm, TaskForm, UserForm};
pub use logging::{default_log_level, init_logging, init_logging_from_config, logging_status};
pub use model::contact::{Contact, NewContact};
pub use model::file::{CrmFile, NewFile};
pub use model::ids::{ContactId, FileId, NoteId, TaskId, UserId};
pub use model::note::{NewNote, Note};
pub use model::task::{NewTask, Task, TaskStatus};
pub use model::user::{NewUser, User};
pub use nav::{Shell, View};
pub use store::clock::{Clock, FixedClock, SystemClock};
pub use store::collection::EntityKind;
pub use store::entity_store::{CrmSnapshot, CrmStore, StoreError, StoreResult};
pub use upload::{bundle_link, bundle_upload, format_file_size, UploadError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
