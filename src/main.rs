//! # featmatrix CLI Entry Point
//!
//! Parses CLI arguments using clap and routes commands to the handlers in
//! [`featmatrix::commands`]. Running without a subcommand is the same as
//! `featmatrix run`.

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};
use std::path::PathBuf;

use featmatrix::commands;
use featmatrix::commands::run::RunOptions;
use featmatrix::config::CONFIG_FILE;
use featmatrix::matrix::FailurePolicy;

#[derive(Parser)]
#[command(name = "featmatrix")]
#[command(about = "Run check, clippy and test over every cargo feature combination", version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to the matrix configuration
    #[arg(long, global = true, default_value = CONFIG_FILE)]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the feature matrix (default)
    Run {
        /// Only run these modules
        #[arg(short, long = "package")]
        packages: Vec<String>,
        /// Print every invocation without executing anything
        #[arg(long)]
        dry_run: bool,
        /// Toolchain binary to invoke [default: cargo]
        #[arg(long)]
        toolchain: Option<String>,
        /// What to do after a failed invocation [default: abort-module]
        #[arg(long, value_enum)]
        policy: Option<FailurePolicy>,
        /// Property-test iteration count exported to every invocation (0 to leave unset)
        #[arg(long)]
        iterations: Option<u64>,
    },
    /// Print the invocation plan
    Plan {
        /// Only plan these modules
        #[arg(short, long = "package")]
        packages: Vec<String>,
        /// Emit the plan as JSON
        #[arg(long)]
        json: bool,
    },
    /// List configured modules and the size of their matrix
    List,
    /// Generate featmatrix.toml from the workspace manifests
    Init {
        /// Overwrite an existing file without asking
        #[arg(long)]
        force: bool,
    },
    /// Generate shell completion scripts
    Completion { shell: Shell },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        None => run(&cli.config, &RunOptions::default()),

        Some(Commands::Run {
            packages,
            dry_run,
            toolchain,
            policy,
            iterations,
        }) => {
            let options = RunOptions {
                packages,
                dry_run,
                toolchain,
                policy,
                iterations,
            };
            run(&cli.config, &options)
        }

        Some(Commands::Plan { packages, json }) => {
            commands::plan::print_plan(&cli.config, &packages, json)
        }
        Some(Commands::List) => commands::list::list_modules(&cli.config),
        Some(Commands::Init { force }) => {
            let root = std::env::current_dir()?;
            commands::init::init_config(&root, &cli.config, force)
        }
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let bin_name = cmd.get_name().to_string();
            generate(shell, &mut cmd, bin_name, &mut std::io::stdout());
            Ok(())
        }
    }
}

fn run(config: &std::path::Path, options: &RunOptions) -> Result<()> {
    match commands::run::run_matrix(config, options) {
        Ok(true) => Ok(()),
        Ok(false) => std::process::exit(1),
        Err(e) => Err(e),
    }
}
