//! The document-at-a-time review loop.
//!
//! `ReviewSession` is a synchronous state machine: it owns the record sink and
//! the current document's selection engine, and reacts to operator commands
//! and fetch results. `driver::drive` runs it against an async document source
//! and a stream of operator commands.

pub mod driver;
pub mod session;

use crate::document::Document;
use crate::errors::FetchError;
use crate::selection::{SelectionCommand, SelectionEngine};

pub use driver::{Presenter, ReviewEvent, SessionSummary, drive};
pub use session::ReviewSession;

/// Everything the operator can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorCommand {
    Select(SelectionCommand),
    /// Persist the excerpt and move on to the next document.
    ConfirmAndAdvance,
    /// Fetch the current document again after a failure.
    Retry,
    Quit,
}

impl From<SelectionCommand> for OperatorCommand {
    fn from(command: SelectionCommand) -> Self {
        OperatorCommand::Select(command)
    }
}

#[derive(Debug, Clone)]
pub enum ReviewPhase {
    /// Waiting for document `index` to arrive.
    Fetching { index: usize },
    Reviewing {
        index: usize,
        document: Document,
        engine: SelectionEngine,
    },
    /// The fetch for `index` failed; nothing advances until the operator retries.
    FetchFailed { index: usize, error: FetchError },
    /// No further fetches or writes happen in this state.
    Exhausted,
}

impl ReviewPhase {
    pub fn name(&self) -> &'static str {
        match self {
            ReviewPhase::Fetching { .. } => "fetching",
            ReviewPhase::Reviewing { .. } => "reviewing",
            ReviewPhase::FetchFailed { .. } => "fetch_failed",
            ReviewPhase::Exhausted => "exhausted",
        }
    }
}

/// Read-only snapshot handed to the presentation layer.
#[derive(Debug, Clone, Copy)]
pub struct ReviewView<'a> {
    pub phase: &'a ReviewPhase,
    pub total: usize,
    pub message: Option<&'a crate::errors::ReviewError>,
}
