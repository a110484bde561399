//! Initialize planroll in a directory

use std::fs;

use crate::config::{Config, CONFIG_FILE, DATA_DIR};
use crate::output::{OperationResult, OutputMode};

/// Initialize planroll in the current directory
pub fn init(force: bool, mode: OutputMode) -> anyhow::Result<()> {
    let root = std::env::current_dir()?;
    let config_path = Config::path(&root);

    if config_path.exists() && !force {
        OperationResult {
            success: false,
            message: format!(
                "Already initialized ({CONFIG_FILE} exists). Use --force to reinitialize."
            ),
        }
        .render(mode);
        return Ok(());
    }

    Config::default().save(&root)?;

    fs::create_dir_all(root.join(DATA_DIR).join("projects"))?;
    fs::create_dir_all(root.join(DATA_DIR).join("employees"))?;
    fs::write(root.join(DATA_DIR).join(".gitkeep"), "")?;

    if mode == OutputMode::Human {
        println!("Initializing planroll...\n");
        println!("  Created {CONFIG_FILE}");
        println!("  Created {DATA_DIR}/");
        println!("\nplanroll initialized!");
        println!("\nNext steps:");
        println!("  planroll task -p <project> add \"<subject>\"");
        println!("  planroll task -p <project> list");
    } else {
        OperationResult {
            success: true,
            message: "initialized".to_string(),
        }
        .render(mode);
    }

    Ok(())
}
