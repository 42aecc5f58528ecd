//! Async event loop around `ReviewSession`.
//!
//! Operator commands and fetch completions are funnelled into one loop and
//! applied one at a time. At most one fetch is in flight; it runs as a tokio
//! task that reports back through a channel, so a quit is honored without
//! waiting for the network.

use anyhow::Result;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use super::{OperatorCommand, ReviewSession, ReviewView};
use crate::document::Document;
use crate::errors::FetchError;
use crate::sink::RecordSink;
use crate::source::DocumentSource;

/// Something that can show the current review state to the operator.
pub trait Presenter {
    fn present(&mut self, view: &ReviewView<'_>) -> Result<()>;
}

/// An input to the review loop.
#[derive(Debug)]
pub enum ReviewEvent {
    Operator(OperatorCommand),
    Fetched {
        index: usize,
        result: Result<Document, FetchError>,
    },
}

/// How a review run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    pub start_index: usize,
    pub next_index: usize,
    pub appended: usize,
    pub exhausted: bool,
}

struct InFlight {
    index: usize,
    task: JoinHandle<()>,
}

/// Run `session` until the operator quits or the command stream closes.
///
/// An exhausted session keeps presenting its final state until quit so the
/// operator can read the completion message.
pub async fn drive<K, P>(
    session: &mut ReviewSession<K>,
    source: Arc<dyn DocumentSource>,
    commands: &mut mpsc::Receiver<OperatorCommand>,
    presenter: &mut P,
) -> Result<SessionSummary>
where
    K: RecordSink,
    P: Presenter,
{
    let (fetch_tx, mut fetch_rx) = mpsc::channel::<ReviewEvent>(1);
    let mut in_flight: Option<InFlight> = None;

    loop {
        if session.quit_requested() {
            if let Some(fetch) = in_flight.take() {
                debug!(index = fetch.index, "Abandoning in-flight fetch");
                fetch.task.abort();
            }
            break;
        }

        if in_flight.is_none()
            && let Some(index) = session.pending_fetch()
        {
            in_flight = Some(spawn_fetch(Arc::clone(&source), index, fetch_tx.clone()));
        }

        presenter.present(&session.view())?;

        let event = tokio::select! {
            command = commands.recv() => {
                ReviewEvent::Operator(command.unwrap_or(OperatorCommand::Quit))
            }
            Some(event) = fetch_rx.recv() => event,
        };

        match event {
            ReviewEvent::Operator(command) => session.handle(command),
            ReviewEvent::Fetched { index, result } => {
                if in_flight.as_ref().is_some_and(|f| f.index == index) {
                    in_flight = None;
                }
                session.on_fetched(index, result);
            }
        }
    }

    let summary = SessionSummary {
        start_index: session.start_index(),
        next_index: session.current_index(),
        appended: session.appended(),
        exhausted: session.is_exhausted(),
    };
    info!(?summary, "Review session ended");
    Ok(summary)
}

fn spawn_fetch(
    source: Arc<dyn DocumentSource>,
    index: usize,
    tx: mpsc::Sender<ReviewEvent>,
) -> InFlight {
    info!(index, "Fetching document");
    let task = tokio::spawn(async move {
        let result = source.fetch(index).await;
        let _ = tx.send(ReviewEvent::Fetched { index, result }).await;
    });
    InFlight { index, task }
}
