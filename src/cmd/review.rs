//! Interactive excerpt review (`sift review`).

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::Arc;

use super::super::Cli;

pub async fn cmd_review(
    cli: &Cli,
    project_dir: PathBuf,
    manifest: Option<PathBuf>,
    records: Option<PathBuf>,
    width: Option<usize>,
) -> Result<()> {
    use sift::config::{CliOverrides, Config};
    use sift::init::is_initialized;
    use sift::logging::init_file_logging;
    use sift::review::{ReviewSession, drive};
    use sift::sink::{JsonlSink, SessionLock};
    use sift::source::{DocumentSource, Manifest, WikipediaSource};
    use sift::ui::{TerminalPresenter, icons::SAVED, spawn_key_reader};
    use tokio::sync::mpsc;

    if !is_initialized(&project_dir) {
        anyhow::bail!("Project not initialized. Run 'sift init' first.");
    }

    let config = Config::new(
        project_dir,
        CliOverrides {
            manifest,
            records,
            width,
            verbose: cli.verbose,
        },
    )?;
    config.ensure_directories()?;

    let level = if config.verbose { "debug" } else { config.log_level.as_str() };
    let _log_guard = init_file_logging(&config.log_dir, level)?;

    let manifest = Manifest::load(&config.manifest_file)?;
    if manifest.is_empty() {
        anyhow::bail!(
            "Manifest {} has no entries. Add {{\"name\", \"link\"}} objects to it first.",
            config.manifest_file.display()
        );
    }

    if !console::Term::stdout().is_term() {
        anyhow::bail!("'sift review' needs an interactive terminal");
    }

    let _lock = SessionLock::acquire(&config.lock_file)?;

    let source: Arc<dyn DocumentSource> = Arc::new(
        WikipediaSource::new(manifest, &config.api_base, config.timeout, &config.user_agent)
            .context("Failed to build HTTP client")?,
    );
    let sink = JsonlSink::new(config.records_file.clone());
    let mut session = ReviewSession::resume(sink, source.len())?;

    tracing::info!(
        records = %config.records_file.display(),
        start = session.start_index(),
        total = session.total(),
        "Starting review"
    );

    let (tx, mut rx) = mpsc::channel(32);
    spawn_key_reader(tx);

    let summary = {
        let mut presenter = TerminalPresenter::new(config.wrap_width);
        drive(&mut session, source, &mut rx, &mut presenter).await?
    };

    println!(
        "{}Saved {} excerpt(s) this session to {}",
        SAVED,
        summary.appended,
        config.records_file.display()
    );
    if summary.exhausted {
        println!("All {} documents reviewed.", session.total());
    } else {
        println!(
            "Next session resumes at document {} of {}.",
            summary.next_index + 1,
            session.total()
        );
    }

    Ok(())
}
