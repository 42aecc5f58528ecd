//! Frame rendering for the review screen.
//!
//! `render` is a pure function of the session view and a column width, so
//! the layout can be tested without a terminal.

use console::style;

use crate::errors::ReviewError;
use crate::review::{ReviewPhase, ReviewView};
use crate::selection::SelectionEngine;
use crate::ui::icons::{CHECK, CROSS, HOURGLASS, INFO, SCROLL};

const CURSOR: &str = "|";
const MIN_WIDTH: usize = 20;

pub const HELP: &str =
    "h/← back  l/→ forward  v extend  esc cancel  p add span  enter save & next  q quit";
pub const HELP_FAILED: &str = "r retry  q quit";
pub const HELP_DONE: &str = "q quit";

pub fn render(view: &ReviewView<'_>, width: usize) -> String {
    let mut out = String::new();

    match view.phase {
        ReviewPhase::Fetching { index } => {
            out.push_str(&header(*index, view.total));
            out.push_str(&format!("{}Loading document...\n", HOURGLASS));
            push_footer(&mut out, view.message, HELP_DONE);
        }
        ReviewPhase::Reviewing {
            index,
            document,
            engine,
        } => {
            out.push_str(&header(*index, view.total));
            out.push_str(&format!(
                "{}Name: {}\n\n",
                SCROLL,
                style(&document.name).bold()
            ));
            out.push_str(&marked_text(engine));
            out.push('\n');
            if engine.is_extending() {
                out.push_str(&format!("\n{}\n", style("-- EXTEND --").cyan()));
            }
            if !engine.excerpt().is_empty() {
                out.push_str(&format!(
                    "\n{} {}\n",
                    style("Selected:").green().bold(),
                    engine.excerpt()
                ));
            }
            push_footer(&mut out, view.message, HELP);
        }
        ReviewPhase::FetchFailed { index, .. } => {
            out.push_str(&header(*index, view.total));
            push_footer(&mut out, view.message, HELP_FAILED);
        }
        ReviewPhase::Exhausted => {
            out.push_str(&format!(
                "{}{}\n",
                CHECK,
                style("All documents reviewed.").green().bold()
            ));
            push_footer(&mut out, view.message, HELP_DONE);
        }
    }

    textwrap::fill(&out, width.max(MIN_WIDTH))
}

fn header(index: usize, total: usize) -> String {
    format!(
        "{} {}\n\n",
        style("Move the cursor along the text").bold(),
        style(format!("[{}/{}]", index + 1, total)).dim()
    )
}

/// The document text with cursor markers around the active range.
fn marked_text(engine: &SelectionEngine) -> String {
    let spans = engine.visible_spans();
    match spans.highlighted {
        None => format!("{}{}{}", spans.before, style(CURSOR).yellow().bold(), spans.after),
        Some(highlighted) => format!(
            "{}{}{}{}{}",
            spans.before,
            style(CURSOR).yellow().bold(),
            style(highlighted).reverse(),
            style(CURSOR).yellow().bold(),
            spans.after
        ),
    }
}

fn push_footer(out: &mut String, message: Option<&ReviewError>, help: &str) {
    if let Some(message) = message {
        let line = match message {
            ReviewError::Fetch(_) | ReviewError::Persist(_) => {
                format!("{}{}", CROSS, style(message).red())
            }
            ReviewError::EmptySelection | ReviewError::EndOfSequence => {
                format!("{}{}", INFO, style(message).yellow())
            }
        };
        out.push_str(&format!("\n{} {}\n", style("Info:").bold(), line));
    }
    out.push_str(&format!("\n{}\n", style(help).dim()));
}
