//! Configuration view and validation commands (`sift config`).

use anyhow::Result;

use super::super::ConfigCommands;

pub fn cmd_config(project_dir: &std::path::Path, command: Option<ConfigCommands>) -> Result<()> {
    use sift::init::get_sift_dir;
    use sift::sift_config::{CONFIG_FILE, SiftToml};

    let sift_dir = get_sift_dir(project_dir);
    let config_path = sift_dir.join(CONFIG_FILE);

    match command {
        None | Some(ConfigCommands::Show) => {
            println!();
            println!("Sift Configuration");
            println!("==================");
            println!();

            let toml = if config_path.exists() {
                println!("Config file: {}", config_path.display());
                SiftToml::load(&config_path)?
            } else {
                println!("Config file: (none, using defaults)");
                SiftToml::default()
            };
            println!();

            println!("[source]");
            println!("  manifest = \"{}\"", toml.source.manifest);
            println!("  api_base = \"{}\"", toml.source.api_base);
            println!("  timeout_secs = {}", toml.source.timeout_secs);
            println!("  user_agent = \"{}\"", toml.source.user_agent);
            println!();
            println!("[records]");
            println!("  path = \"{}\"", toml.records.path);
            println!();
            println!("[display]");
            println!("  wrap_width = {}", toml.display.wrap_width);
            println!();
            println!("[logging]");
            println!("  level = \"{}\"", toml.logging.level);
            println!();
        }
        Some(ConfigCommands::Validate) => {
            println!();
            println!("Validating configuration...");
            println!();

            if !config_path.exists() {
                println!("No sift.toml found. Using defaults (valid).");
                return Ok(());
            }

            let toml = SiftToml::load(&config_path)?;
            let warnings = toml.validate();

            if warnings.is_empty() {
                println!("Configuration is valid.");
            } else {
                println!("Configuration warnings:");
                for warning in warnings {
                    println!("  - {}", warning);
                }
            }
            println!();
        }
        Some(ConfigCommands::Init) => {
            if config_path.exists() {
                println!("sift.toml already exists at {}", config_path.display());
                println!("Delete it first if you want to recreate it.");
                return Ok(());
            }

            if !sift_dir.exists() {
                std::fs::create_dir_all(&sift_dir)?;
            }

            SiftToml::default().save(&config_path)?;

            println!("Created sift.toml at {}", config_path.display());
            println!();
            println!("You can now customize:");
            println!("  - [source] manifest, api_base, timeout_secs, user_agent");
            println!("  - [records] path");
            println!("  - [display] wrap_width");
            println!();
        }
    }

    Ok(())
}
