use tracing::{debug, info, warn};

use super::{OperatorCommand, ReviewPhase, ReviewView};
use crate::document::Document;
use crate::errors::{FetchError, PersistError, ReviewError};
use crate::selection::SelectionEngine;
use crate::sink::{Record, RecordSink};

/// Review state for one run of the loop.
///
/// Documents are visited strictly in order. Index `i + 1` only becomes the
/// pending fetch after record `i` has been appended, and each index is
/// appended at most once per session.
pub struct ReviewSession<K: RecordSink> {
    sink: K,
    total: usize,
    phase: ReviewPhase,
    start_index: usize,
    current_index: usize,
    appended: usize,
    last_error: Option<ReviewError>,
    quit: bool,
}

impl<K: RecordSink> ReviewSession<K> {
    /// Start at the sink's resume point (`last_index + 1`, or 0).
    pub fn resume(sink: K, total: usize) -> Result<Self, PersistError> {
        let start = sink.resume_index()?;
        Ok(Self::starting_at(sink, total, start))
    }

    pub fn starting_at(sink: K, total: usize, start: usize) -> Self {
        let phase = if start < total {
            ReviewPhase::Fetching { index: start }
        } else {
            ReviewPhase::Exhausted
        };
        info!(start, total, phase = phase.name(), "Review session created");
        Self {
            sink,
            total,
            phase,
            start_index: start,
            current_index: start,
            appended: 0,
            last_error: None,
            quit: false,
        }
    }

    pub fn phase(&self) -> &ReviewPhase {
        &self.phase
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn start_index(&self) -> usize {
        self.start_index
    }

    /// Position in the source sequence; survives restarts through the sink.
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Records appended during this session.
    pub fn appended(&self) -> usize {
        self.appended
    }

    pub fn last_error(&self) -> Option<&ReviewError> {
        self.last_error.as_ref()
    }

    pub fn sink(&self) -> &K {
        &self.sink
    }

    pub fn is_exhausted(&self) -> bool {
        matches!(self.phase, ReviewPhase::Exhausted)
    }

    pub fn quit_requested(&self) -> bool {
        self.quit
    }

    /// The index a fetch should be running for, if any.
    pub fn pending_fetch(&self) -> Option<usize> {
        match (&self.phase, self.quit) {
            (ReviewPhase::Fetching { index }, false) => Some(*index),
            _ => None,
        }
    }

    pub fn view(&self) -> ReviewView<'_> {
        ReviewView {
            phase: &self.phase,
            total: self.total,
            message: self.last_error.as_ref(),
        }
    }

    /// Deliver the result of fetching `index`. Results for any index other
    /// than the pending one are dropped.
    pub fn on_fetched(&mut self, index: usize, result: Result<Document, FetchError>) {
        if self.pending_fetch() != Some(index) {
            warn!(index, phase = self.phase.name(), "Ignoring stale fetch result");
            return;
        }
        match result {
            Ok(document) => {
                info!(index, name = %document.name, chars = document.char_len(), "Document ready");
                let engine = SelectionEngine::new(document.text.clone());
                self.phase = ReviewPhase::Reviewing {
                    index,
                    document,
                    engine,
                };
                self.last_error = None;
            }
            Err(error) => {
                warn!(index, %error, "Fetch failed");
                self.phase = ReviewPhase::FetchFailed {
                    index,
                    error: error.clone(),
                };
                self.last_error = Some(ReviewError::Fetch(error));
            }
        }
    }

    pub fn handle(&mut self, command: OperatorCommand) {
        if self.quit {
            return;
        }
        match command {
            OperatorCommand::Quit => {
                info!(phase = self.phase.name(), index = self.current_index, "Quit requested");
                self.quit = true;
            }
            OperatorCommand::Select(command) => match &mut self.phase {
                ReviewPhase::Reviewing { engine, .. } => engine.apply(command),
                _ => debug!(?command, phase = self.phase.name(), "No document to select in"),
            },
            OperatorCommand::ConfirmAndAdvance => self.confirm_and_advance(),
            OperatorCommand::Retry => {
                if let ReviewPhase::FetchFailed { index, .. } = self.phase {
                    info!(index, "Retrying fetch");
                    self.phase = ReviewPhase::Fetching { index };
                    self.last_error = None;
                }
            }
        }
    }

    fn confirm_and_advance(&mut self) {
        let ReviewPhase::Reviewing {
            index,
            document,
            engine,
        } = &self.phase
        else {
            return;
        };
        let index = *index;

        if engine.excerpt().is_empty() {
            self.last_error = Some(ReviewError::EmptySelection);
            return;
        }

        if index + 1 >= self.total {
            info!(index, "Reached the last document");
            self.phase = ReviewPhase::Exhausted;
            self.last_error = Some(ReviewError::EndOfSequence);
            return;
        }

        let record = Record::new(index, &document.name, engine.excerpt());
        match self.sink.append(&record) {
            Ok(()) => {
                info!(
                    index,
                    name = %record.name,
                    chars = record.excerpt.chars().count(),
                    "Excerpt saved"
                );
                self.appended += 1;
                self.current_index = index + 1;
                self.phase = ReviewPhase::Fetching { index: index + 1 };
                self.last_error = None;
            }
            Err(error) => {
                warn!(index, %error, "Failed to save excerpt");
                self.last_error = Some(ReviewError::Persist(error));
            }
        }
    }
}
