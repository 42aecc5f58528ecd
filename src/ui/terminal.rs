use anyhow::Result;
use console::Term;
use terminal_size::{Width, terminal_size};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use super::keys::command_for_key;
use super::render::render;
use crate::review::{OperatorCommand, Presenter, ReviewView};

const FALLBACK_WIDTH: usize = 80;

/// Draws review frames on stdout.
///
/// The key reader keeps the terminal in raw mode most of the time, so line
/// breaks are written as `\r\n`.
pub struct TerminalPresenter {
    term: Term,
    width: Option<usize>,
}

impl TerminalPresenter {
    /// `width` overrides the detected terminal width.
    pub fn new(width: Option<usize>) -> Self {
        let term = Term::stdout();
        if let Err(e) = term.hide_cursor() {
            warn!(error = %e, "Failed to hide cursor");
        }
        Self { term, width }
    }

    fn width(&self) -> usize {
        self.width
            .or_else(|| terminal_size().map(|(Width(w), _)| w as usize))
            .unwrap_or(FALLBACK_WIDTH)
    }
}

impl Presenter for TerminalPresenter {
    fn present(&mut self, view: &ReviewView<'_>) -> Result<()> {
        let frame = render(view, self.width()).replace('\n', "\r\n");
        self.term.clear_screen()?;
        self.term.write_str(&frame)?;
        self.term.flush()?;
        Ok(())
    }
}

impl Drop for TerminalPresenter {
    fn drop(&mut self) {
        let _ = self.term.clear_screen();
        let _ = self.term.show_cursor();
    }
}

/// Read keys on a dedicated thread and forward mapped commands.
///
/// The thread stops after forwarding a quit, when the receiver is gone, or
/// when stdin is no longer readable. A blocking read cannot be interrupted,
/// so this is a detached OS thread rather than a runtime task.
pub fn spawn_key_reader(tx: mpsc::Sender<OperatorCommand>) -> std::thread::JoinHandle<()> {
    std::thread::spawn(move || {
        let term = Term::stdout();
        loop {
            let key = match term.read_key() {
                Ok(key) => key,
                Err(e) => {
                    warn!(error = %e, "Key reader stopped");
                    let _ = tx.blocking_send(OperatorCommand::Quit);
                    return;
                }
            };
            let Some(command) = command_for_key(&key) else {
                debug!(?key, "Unbound key");
                continue;
            };
            if tx.blocking_send(command).is_err() || command == OperatorCommand::Quit {
                return;
            }
        }
    })
}
