//! Task form session with stale-result protection for generated text.
//!
//! # Invariants
//! - A generated description lands only in the draft that requested it,
//!   only while that draft is open, and only for its latest request.
//! - A failed generation keeps the current description.

use super::generator::{describe_task, GenerationError, TextGenerator, GENERATION_FAILED_MESSAGE};
use crate::forms::TaskForm;
use log::{debug, warn};
use uuid::Uuid;

/// Ticket for one in-flight generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDescription {
    draft_id: Uuid,
    request: u64,
    title: String,
}

impl PendingDescription {
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Runs the generation this ticket stands for.
    pub async fn run<G>(&self, generator: &G) -> Result<String, GenerationError>
    where
        G: TextGenerator + ?Sized,
    {
        describe_task(generator, &self.title).await
    }
}

/// What happened to a generation result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// Description replaced.
    Applied,
    /// Draft closed, replaced or superseded; result dropped.
    Discarded,
    /// Generation failed; description kept, message to show inline.
    Failed(String),
}

/// One open add/edit task form.
#[derive(Debug, Clone)]
pub struct TaskDraft {
    id: Uuid,
    form: TaskForm,
    open: bool,
    latest_request: u64,
    pending: bool,
    message: Option<String>,
}

impl TaskDraft {
    pub fn open(form: TaskForm) -> Self {
        Self {
            id: Uuid::new_v4(),
            form,
            open: true,
            latest_request: 0,
            pending: false,
            message: None,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn form(&self) -> &TaskForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut TaskForm {
        &mut self.form
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Whether a generation is in flight.
    pub fn is_generating(&self) -> bool {
        self.pending
    }

    /// Inline message from the last failed generation.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Closes the draft; pending results will be discarded.
    pub fn close(&mut self) {
        self.open = false;
        self.pending = false;
    }

    /// Starts a generation for the current title.
    ///
    /// A newer request supersedes any earlier one still in flight.
    ///
    /// # Errors
    /// - `EmptyTitle` when the title is blank; nothing is started.
    pub fn begin_generation(&mut self) -> Result<PendingDescription, GenerationError> {
        let title = self.form.title.trim();
        if title.is_empty() {
            return Err(GenerationError::EmptyTitle);
        }
        self.latest_request += 1;
        self.pending = true;
        self.message = None;
        Ok(PendingDescription {
            draft_id: self.id,
            request: self.latest_request,
            title: title.to_string(),
        })
    }

    /// Applies a generation result if the ticket still matches this draft.
    pub fn apply_generated(
        &mut self,
        ticket: &PendingDescription,
        result: Result<String, GenerationError>,
    ) -> ApplyOutcome {
        if !self.open || ticket.draft_id != self.id || ticket.request != self.latest_request {
            debug!(
                "event=draft_apply module=assist status=discarded open={} same_draft={}",
                self.open,
                ticket.draft_id == self.id
            );
            return ApplyOutcome::Discarded;
        }

        self.pending = false;
        match result {
            Ok(description) => {
                self.form.description = description;
                self.message = None;
                ApplyOutcome::Applied
            }
            Err(err) => {
                warn!(
                    "event=draft_apply module=assist status=failed error_code={}",
                    err.code()
                );
                let message = GENERATION_FAILED_MESSAGE.to_string();
                self.message = Some(message.clone());
                ApplyOutcome::Failed(message)
            }
        }
    }
}
