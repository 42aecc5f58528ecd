use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::init::get_sift_dir;
use crate::sift_config::SiftToml;

/// Runtime configuration for a sift command.
///
/// Resolves the layered settings (sift.toml, then `SIFT_*` environment
/// variables, then CLI flags) into concrete paths and values.
#[derive(Debug, Clone)]
pub struct Config {
    pub project_dir: PathBuf,
    pub sift_dir: PathBuf,
    pub manifest_file: PathBuf,
    pub records_file: PathBuf,
    pub log_dir: PathBuf,
    pub lock_file: PathBuf,
    pub api_base: String,
    pub timeout: Duration,
    pub user_agent: String,
    pub wrap_width: Option<usize>,
    pub log_level: String,
    pub verbose: bool,
}

/// Values given on the command line; `None` defers to the lower layers.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub manifest: Option<PathBuf>,
    pub records: Option<PathBuf>,
    pub width: Option<usize>,
    pub verbose: bool,
}

impl Config {
    pub fn new(project_dir: PathBuf, overrides: CliOverrides) -> Result<Self> {
        let project_dir = project_dir
            .canonicalize()
            .context("Failed to resolve project directory")?;
        let sift_dir = get_sift_dir(&project_dir);

        let mut toml = SiftToml::load_or_default(&sift_dir)?;
        toml.apply_env();

        let manifest_file = match overrides.manifest {
            Some(path) => path,
            None => resolve(&sift_dir, &toml.source.manifest),
        };
        let records_file = match overrides.records {
            Some(path) => path,
            None => resolve(&sift_dir, &toml.records.path),
        };
        let wrap_width = overrides
            .width
            .or((toml.display.wrap_width > 0).then_some(toml.display.wrap_width));

        Ok(Self {
            log_dir: sift_dir.join("logs"),
            lock_file: sift_dir.join("review.lock"),
            project_dir,
            sift_dir,
            manifest_file,
            records_file,
            api_base: toml.source.api_base,
            timeout: Duration::from_secs(toml.source.timeout_secs),
            user_agent: toml.source.user_agent,
            wrap_width,
            log_level: toml.logging.level,
            verbose: overrides.verbose,
        })
    }

    pub fn ensure_directories(&self) -> Result<()> {
        std::fs::create_dir_all(&self.sift_dir).context("Failed to create .sift directory")?;
        std::fs::create_dir_all(&self.log_dir).context("Failed to create log directory")?;
        Ok(())
    }
}

fn resolve(base: &Path, path: &str) -> PathBuf {
    let path = Path::new(path);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
