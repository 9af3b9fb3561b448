//! CLI command handlers
//!
//! Implementation of the `featmatrix` subcommands, kept out of main.rs so
//! they can be driven from tests.

pub mod init;
pub mod list;
pub mod plan;
pub mod run;

/// Inventories above this size get a warning: the matrix grows as 2^n.
pub const LARGE_INVENTORY: usize = 16;
