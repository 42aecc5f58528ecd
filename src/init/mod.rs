//! Initialization of sift projects.
//!
//! `sift init` creates the `.sift/` directory in a project:
//!
//! ```text
//! .sift/
//! ├── sift.toml        # Configuration (defaults written on first init)
//! ├── manifest.json    # Ordered list of {name, link} documents to review
//! ├── records.jsonl    # Reviewed excerpts, one JSON record per line
//! └── logs/            # Rolling review-session logs
//! ```

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::sift_config::{CONFIG_FILE, SiftToml};

/// The name of the sift project directory.
pub const SIFT_DIR: &str = ".sift";

/// Result of initializing a sift project.
#[derive(Debug)]
pub struct InitResult {
    pub sift_dir: PathBuf,
    /// Whether the directory was newly created (false if it already existed)
    pub created: bool,
}

/// Initialize a sift project in the given directory. Existing files are kept.
pub fn init_project(project_dir: &Path) -> Result<InitResult> {
    let sift_dir = get_sift_dir(project_dir);
    let created = !sift_dir.exists();

    std::fs::create_dir_all(&sift_dir)
        .with_context(|| format!("Failed to create directory: {}", sift_dir.display()))?;
    ensure_directory_structure(&sift_dir)?;

    Ok(InitResult { sift_dir, created })
}

fn ensure_directory_structure(sift_dir: &Path) -> Result<()> {
    let logs_dir = sift_dir.join("logs");
    std::fs::create_dir_all(&logs_dir)
        .with_context(|| format!("Failed to create logs directory: {}", logs_dir.display()))?;

    let config_file = sift_dir.join(CONFIG_FILE);
    if !config_file.exists() {
        SiftToml::default().save(&config_file)?;
    }

    let manifest_file = sift_dir.join("manifest.json");
    if !manifest_file.exists() {
        std::fs::write(&manifest_file, "[]\n").with_context(|| {
            format!("Failed to create manifest.json: {}", manifest_file.display())
        })?;
    }

    Ok(())
}

/// Check if a project is already initialized with sift.
pub fn is_initialized(project_dir: &Path) -> bool {
    project_dir.join(SIFT_DIR).exists()
}

/// Get the path to the sift directory for a project.
pub fn get_sift_dir(project_dir: &Path) -> PathBuf {
    project_dir.join(SIFT_DIR)
}
