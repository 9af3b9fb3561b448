//! `featmatrix run`

use anyhow::Result;
use colored::*;
use std::path::Path;

use crate::config::{MatrixConfig, load_config};
use crate::invoker::{DryRunInvoker, IterationEnv, ToolchainInvoker};
use crate::matrix::{FailurePolicy, MatrixRunner, RunSummary};
use crate::ui;

/// Command-line overrides for the `[matrix]` table.
#[derive(Debug, Default, Clone)]
pub struct RunOptions {
    pub packages: Vec<String>,
    pub dry_run: bool,
    pub toolchain: Option<String>,
    pub policy: Option<FailurePolicy>,
    pub iterations: Option<u64>,
}

impl RunOptions {
    /// Folds the overrides into the loaded config.
    pub fn apply(&self, config: &mut MatrixConfig) {
        if let Some(toolchain) = &self.toolchain {
            config.matrix.toolchain = toolchain.clone();
        }
        if let Some(policy) = self.policy {
            config.matrix.policy = policy;
        }
        if let Some(iterations) = self.iterations {
            config.matrix.iterations = iterations;
        }
    }
}

/// Runs the matrix and returns whether every module passed.
pub fn run_matrix(config_path: &Path, options: &RunOptions) -> Result<bool> {
    let mut config = load_config(config_path)?;
    options.apply(&mut config);
    let summary = execute(&config, options)?;
    Ok(summary.success())
}

pub fn execute(config: &MatrixConfig, options: &RunOptions) -> Result<RunSummary> {
    let modules = config.select(&options.packages)?;
    let settings = &config.matrix;

    if modules.is_empty() {
        println!("{} No modules listed in featmatrix.toml.", "!".yellow());
        return Ok(RunSummary::default());
    }

    super::list::warn_large_inventories(modules.iter().copied());

    let iterations = settings.iteration_env();
    print_header(
        &settings.toolchain,
        settings.policy,
        iterations.as_ref(),
        modules.len(),
        options.dry_run,
    );

    let summary = if options.dry_run {
        MatrixRunner::new(DryRunInvoker::default(), &settings.toolchain)
            .with_policy(settings.policy)
            .run(modules)?
    } else {
        let invoker = ToolchainInvoker::new(&settings.toolchain).with_iterations(iterations);
        MatrixRunner::new(invoker, &settings.toolchain)
            .with_policy(settings.policy)
            .run(modules)?
    };

    ui::print_summary(&summary, &settings.toolchain);
    Ok(summary)
}

fn print_header(
    toolchain: &str,
    policy: FailurePolicy,
    iterations: Option<&IterationEnv>,
    module_count: usize,
    dry_run: bool,
) {
    let mode = if dry_run { " (dry run)" } else { "" };
    println!(
        "{} Running feature matrix for {} module(s) with {}{}",
        "🧪".magenta(),
        module_count,
        toolchain.bold(),
        mode.yellow()
    );
    println!("   {} failure policy: {}", "→".dimmed(), policy);
    if let Some(env) = iterations {
        println!("   {} {}={}", "→".dimmed(), env.var, env.value);
    }
}
