//! `featmatrix plan`

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;

use crate::config::{ModuleConfig, load_config};
use crate::matrix::runner::plan_module;
use crate::matrix::{InvocationDescriptor, sequence};

#[derive(Debug, Serialize)]
pub struct PlannedInvocation {
    #[serde(flatten)]
    pub descriptor: InvocationDescriptor,
    /// Full argv, toolchain binary first.
    pub command: Vec<String>,
}

/// Every invocation a run would issue if nothing failed, in dispatch order.
pub fn build_plan<'a>(
    modules: impl IntoIterator<Item = &'a ModuleConfig>,
    toolchain: &str,
) -> Result<Vec<PlannedInvocation>> {
    let mut planned = Vec::new();
    for module in modules {
        let configurations = plan_module(module)?;
        let total = configurations.len();
        for (index, configuration) in configurations.iter().enumerate() {
            for descriptor in sequence(&module.name, configuration, index, total) {
                let mut command = vec![toolchain.to_string()];
                command.extend(descriptor.args());
                planned.push(PlannedInvocation {
                    descriptor,
                    command,
                });
            }
        }
    }
    Ok(planned)
}

pub fn print_plan(config_path: &Path, packages: &[String], json: bool) -> Result<()> {
    let config = load_config(config_path)?;
    let modules = config.select(packages)?;
    let toolchain = &config.matrix.toolchain;

    let plan = build_plan(modules.iter().copied(), toolchain)?;

    if json {
        let out = serde_json::to_string_pretty(&plan).context("Failed to serialize plan")?;
        println!("{}", out);
    } else {
        super::list::warn_large_inventories(modules.iter().copied());
        for item in &plan {
            println!("{}", item.descriptor.progress_line(toolchain));
        }
        println!("{} invocations planned.", plan.len());
    }
    Ok(())
}
