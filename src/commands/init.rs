//! `featmatrix init`

use anyhow::{Context, Result};
use colored::*;
use inquire::Confirm;
use std::fs;
use std::path::Path;

use crate::config::{MatrixConfig, MatrixSettings};
use crate::discover::discover_modules;

/// Config generated from the packages found under `root`.
pub fn scaffold_config(root: &Path) -> Result<MatrixConfig> {
    Ok(MatrixConfig {
        matrix: MatrixSettings::default(),
        modules: discover_modules(root)?,
    })
}

pub fn init_config(root: &Path, config_path: &Path, force: bool) -> Result<()> {
    if config_path.exists() && !force {
        let prompt = format!("{} already exists. Overwrite?", config_path.display());
        let overwrite = Confirm::new(&prompt)
            .with_default(false)
            .prompt()
            .unwrap_or(false);
        if !overwrite {
            println!("{} Left {} untouched.", "!".yellow(), config_path.display());
            return Ok(());
        }
    }

    println!("{} Scanning {} for packages...", "🔍".cyan(), root.display());
    let config = scaffold_config(root)?;

    if config.modules.is_empty() {
        println!("{} No Cargo packages found.", "!".yellow());
    }
    for module in &config.modules {
        println!(
            "   {} {} ({} features)",
            "+".green(),
            module.name.bold(),
            module.features.len()
        );
    }

    let content = config.to_toml()?;
    fs::write(config_path, content)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    println!("{} Created {}", "✓".green(), config_path.display());
    super::list::warn_large_inventories(&config.modules);
    Ok(())
}
