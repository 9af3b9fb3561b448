use crate::invoker::IterationEnv;
use crate::matrix::FailurePolicy;
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

pub const CONFIG_FILE: &str = "featmatrix.toml";

#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
pub struct MatrixConfig {
    #[serde(default)]
    pub matrix: MatrixSettings,
    #[serde(default, rename = "module")]
    pub modules: Vec<ModuleConfig>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct MatrixSettings {
    #[serde(default = "default_toolchain")]
    pub toolchain: String,
    #[serde(default)]
    pub policy: FailurePolicy,
    #[serde(default = "default_iterations_var")]
    pub iterations_var: String,
    /// 0 leaves the variable untouched.
    #[serde(default = "default_iterations")]
    pub iterations: u64,
}

impl Default for MatrixSettings {
    fn default() -> Self {
        Self {
            toolchain: default_toolchain(),
            policy: FailurePolicy::default(),
            iterations_var: default_iterations_var(),
            iterations: default_iterations(),
        }
    }
}

impl MatrixSettings {
    pub fn iteration_env(&self) -> Option<IterationEnv> {
        (self.iterations > 0).then(|| IterationEnv {
            var: self.iterations_var.clone(),
            value: self.iterations,
        })
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct ModuleConfig {
    pub name: String,
    #[serde(default)]
    pub features: Vec<String>,
}

fn default_toolchain() -> String {
    "cargo".to_string()
}

fn default_iterations_var() -> String {
    IterationEnv::default().var
}

fn default_iterations() -> u64 {
    IterationEnv::default().value
}

impl MatrixConfig {
    pub fn parse(content: &str) -> Result<Self> {
        let config: MatrixConfig = toml::from_str(content).context(
            "Failed to parse featmatrix.toml - check for syntax errors (missing quotes, brackets)",
        )?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for module in &self.modules {
            if module.name.trim().is_empty() {
                bail!("featmatrix.toml: a [[module]] entry has an empty name");
            }
            if !seen.insert(module.name.as_str()) {
                bail!(
                    "featmatrix.toml: module '{}' is listed more than once",
                    module.name
                );
            }
        }
        Ok(())
    }

    /// Modules named in `packages`, in config order. Empty selects everything.
    pub fn select(&self, packages: &[String]) -> Result<Vec<&ModuleConfig>> {
        if let Some(unknown) = packages
            .iter()
            .find(|p| !self.modules.iter().any(|m| &m.name == *p))
        {
            bail!(
                "Module '{}' is not listed in featmatrix.toml (known: {})",
                unknown,
                self.module_names().join(", ")
            );
        }

        Ok(self
            .modules
            .iter()
            .filter(|m| packages.is_empty() || packages.contains(&m.name))
            .collect())
    }

    pub fn module_names(&self) -> Vec<&str> {
        self.modules.iter().map(|m| m.name.as_str()).collect()
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize featmatrix.toml")
    }
}

pub fn load_config(path: &Path) -> Result<MatrixConfig> {
    if !path.exists() {
        return Err(anyhow::anyhow!(
            "{} not found.\n\n\
            💡 Tip: Run 'featmatrix init' to generate one from the workspace manifests.",
            path.display()
        ));
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {} - check file permissions", path.display()))?;
    MatrixConfig::parse(&content)
}
