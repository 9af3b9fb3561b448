//! `featmatrix list`

use anyhow::Result;
use colored::*;
use std::path::Path;

use super::LARGE_INVENTORY;
use crate::config::{ModuleConfig, load_config};
use crate::matrix::plan::configuration_count;
use crate::ui::Table;

pub fn list_modules(config_path: &Path) -> Result<()> {
    let config = load_config(config_path)?;

    if config.modules.is_empty() {
        println!("{} No modules listed in featmatrix.toml.", "!".yellow());
        return Ok(());
    }

    let mut table = Table::new(&["Module", "Features", "Configurations", "Invocations"]);
    let mut total: usize = 0;
    for module in &config.modules {
        let configurations = configuration_count(module.features.len());
        let invocations = configurations.saturating_mul(3);
        total = invocations.saturating_add(total);

        let features = if module.features.is_empty() {
            "-".dimmed().to_string()
        } else {
            module.features.join(", ")
        };
        table.add_row(vec![
            module.name.bold().to_string(),
            features,
            configurations.to_string(),
            invocations.to_string(),
        ]);
    }
    table.print();
    println!("   {} invocations in total", total);

    warn_large_inventories(&config.modules);
    Ok(())
}

/// Prints a warning for each module whose matrix is likely to take very long.
pub fn warn_large_inventories<'a>(modules: impl IntoIterator<Item = &'a ModuleConfig>) {
    for module in modules {
        let n = module.features.len();
        if n > LARGE_INVENTORY {
            println!(
                "{} Module '{}' declares {} features: {} configurations will be run.",
                "⚠".yellow(),
                module.name,
                n,
                configuration_count(n)
            );
        }
    }
}
