//! Record log inspection commands: status, records, export, reset.

use anyhow::{Context, Result};
use std::path::Path;

use super::super::Cli;

const PREVIEW_CHARS: usize = 60;

fn load_config(project_dir: &Path, cli: &Cli) -> Result<sift::config::Config> {
    use sift::config::{CliOverrides, Config};

    Config::new(
        project_dir.to_path_buf(),
        CliOverrides {
            verbose: cli.verbose,
            ..Default::default()
        },
    )
}

fn preview(excerpt: &str) -> String {
    let flat = excerpt.replace(['\n', '\r'], " ");
    if flat.chars().count() <= PREVIEW_CHARS {
        flat
    } else {
        let cut: String = flat.chars().take(PREVIEW_CHARS - 3).collect();
        format!("{}...", cut)
    }
}

pub fn cmd_status(project_dir: &Path, cli: &Cli) -> Result<()> {
    use sift::init::is_initialized;
    use sift::sink::{JsonlSink, RecordSink};
    use sift::source::Manifest;

    println!();
    println!("Sift Review Status");
    println!("==================");
    println!();

    if !is_initialized(project_dir) {
        println!("Project: Not initialized");
        println!();
        println!("Run 'sift init' to initialize the project.");
        println!();
        return Ok(());
    }

    println!("Project:  Initialized");
    let config = load_config(project_dir, cli)?;

    let total = if config.manifest_file.exists() {
        let manifest = Manifest::load(&config.manifest_file)?;
        println!(
            "Manifest: {} ({} documents)",
            config.manifest_file.display(),
            manifest.len()
        );
        Some(manifest.len())
    } else {
        println!(
            "Manifest: Missing ({})",
            config.manifest_file.display()
        );
        None
    };

    let sink = JsonlSink::new(config.records_file.clone());
    let records = sink.records()?;
    let resume = sink.resume_index()?;
    println!(
        "Records:  {} ({} saved)",
        config.records_file.display(),
        records.len()
    );
    println!();

    match total {
        Some(0) => println!("Add documents to the manifest, then run 'sift review'."),
        // The final document is never recorded, so a finished review rests here.
        Some(total) if resume + 1 == total => {
            println!(
                "{}",
                console::style(format!(
                    "Final document pending confirmation ({} of {})",
                    total, total
                ))
                .green()
            );
        }
        Some(total) if resume >= total => {
            println!("Every document in the manifest has a record ({} total)", total);
        }
        Some(total) => {
            println!(
                "Next document: {} of {} (run 'sift review' to continue)",
                resume + 1,
                total
            );
        }
        None => println!("Resume index: {}", resume),
    }
    println!();

    Ok(())
}

pub fn cmd_records(project_dir: &Path, cli: &Cli) -> Result<()> {
    use sift::sink::JsonlSink;

    let config = load_config(project_dir, cli)?;
    let records = JsonlSink::new(config.records_file.clone()).records()?;

    if records.is_empty() {
        println!();
        println!("No records saved yet. Run 'sift review' to start.");
        println!();
        return Ok(());
    }

    println!();
    println!("{:<6} {:<25} Excerpt", "Index", "Name");
    println!("{:<6} {:<25} -------", "-----", "-------------------------");
    for record in &records {
        println!(
            "{:<6} {:<25} {}",
            record.index,
            record.name,
            console::style(preview(&record.excerpt)).dim()
        );
    }
    println!();
    println!("{} record(s) in {}", records.len(), config.records_file.display());
    println!();

    Ok(())
}

pub fn cmd_export(project_dir: &Path, cli: &Cli, output: &Path) -> Result<()> {
    use sift::sink::JsonlSink;

    let config = load_config(project_dir, cli)?;
    let records = JsonlSink::new(config.records_file.clone()).records()?;

    let json = serde_json::to_string_pretty(&records).context("Failed to serialize records")?;
    std::fs::write(output, json + "\n")
        .with_context(|| format!("Failed to write export: {}", output.display()))?;

    tracing::info!(count = records.len(), output = %output.display(), "Exported records");
    println!("Exported {} record(s) to {}", records.len(), output.display());
    Ok(())
}

pub fn cmd_reset(project_dir: &Path, cli: &Cli, force: bool) -> Result<()> {
    use dialoguer::Confirm;
    use sift::sink::JsonlSink;

    let config = load_config(project_dir, cli)?;

    if !force {
        let confirm = Confirm::new()
            .with_prompt("This will delete all saved excerpts. Are you sure?")
            .default(false)
            .interact()
            .unwrap_or(false);

        if !confirm {
            println!("Reset cancelled");
            return Ok(());
        }
    }

    JsonlSink::new(config.records_file.clone()).reset()?;
    tracing::info!(records = %config.records_file.display(), "Record log removed");

    println!("Reset complete");
    Ok(())
}
