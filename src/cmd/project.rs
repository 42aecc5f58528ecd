//! Project initialization command.

use anyhow::Result;

pub fn cmd_init(project_dir: &std::path::Path) -> Result<()> {
    use sift::init::{init_project, is_initialized};

    let was_initialized = is_initialized(project_dir);

    let result = init_project(project_dir)?;

    if result.created {
        println!("Initialized sift project at {}", result.sift_dir.display());
        println!();
        println!("Created directory structure:");
        println!("  .sift/");
        println!("  ├── sift.toml      # Configuration (use `sift config`)");
        println!("  ├── manifest.json  # Documents to review, as {{\"name\", \"link\"}} objects");
        println!("  └── logs/          # Review session logs");
        println!();
        println!("Next steps:");
        println!("  1. Add documents to .sift/manifest.json");
        println!("  2. Run `sift review` to start selecting excerpts");
        println!("  3. Run `sift export --output excerpts.json` when done");
    } else if was_initialized {
        println!(
            "Sift project already initialized at {}",
            result.sift_dir.display()
        );
        println!("Directory structure verified.");
    }

    Ok(())
}
