//! Workspace scanning for `featmatrix init`.
//!
//! Walks the directory tree for `Cargo.toml` manifests that declare a
//! `[package]` and collects their `[features]` keys.

use crate::config::ModuleConfig;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use walkdir::{DirEntry, WalkDir};

#[derive(Debug, Deserialize)]
struct Manifest {
    package: Option<PackageInfo>,
    #[serde(default)]
    features: BTreeMap<String, toml::Value>,
}

#[derive(Debug, Deserialize)]
struct PackageInfo {
    name: String,
}

fn is_skipped(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.starts_with('.') || name == "target")
}

/// Finds every package under `root`, sorted by name.
pub fn discover_modules(root: &Path) -> Result<Vec<ModuleConfig>> {
    let mut modules = Vec::new();

    for entry in WalkDir::new(root)
        .into_iter()
        .filter_entry(|e| !is_skipped(e))
        .filter_map(|e| e.ok())
    {
        if !entry.file_type().is_file() || entry.file_name() != "Cargo.toml" {
            continue;
        }

        let path = entry.path();
        let content =
            fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
        let manifest: Manifest = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        if let Some(package) = manifest.package {
            modules.push(ModuleConfig {
                name: package.name,
                features: manifest.features.into_keys().collect(),
            });
        }
    }

    modules.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(modules)
}
