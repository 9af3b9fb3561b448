//! # featmatrix - Cargo Feature Matrix Runner
//!
//! featmatrix checks that every combination of a crate's feature flags still
//! compiles, passes clippy, and passes its tests. Bugs that only appear with
//! a specific mix of features are invisible when CI builds only the default
//! and `--all-features` configurations.
//!
//! ## Quick Start
//!
//! ```bash
//! # Generate featmatrix.toml from the workspace manifests
//! featmatrix init
//!
//! # Run check, clippy and test over every combination
//! featmatrix run
//! ```
//!
//! For a module declaring `n` features, `2^n + 1` configurations are run:
//! `--all-features`, `--no-default-features`, then every non-empty subset
//! with `--no-default-features --features ...`.
//!
//! ## Module Organization
//!
//! - [`matrix`] - Power set, planning, sequencing and the runner
//! - [`invoker`] - Toolchain process spawning behind a trait
//! - [`config`] - Configuration parsing (`featmatrix.toml`)
//! - [`commands`] - CLI command handlers

/// CLI command handlers extracted from main.
pub mod commands;

/// Configuration file parsing (`featmatrix.toml`).
pub mod config;

/// Workspace manifest scanning.
pub mod discover;

/// External toolchain invocation.
pub mod invoker;

/// Feature matrix planning and execution.
pub mod matrix;

/// Terminal UI utilities (tables, colors).
pub mod ui;
