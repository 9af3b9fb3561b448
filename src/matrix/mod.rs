//! Feature matrix engine.
//!
//! Turns a module's feature inventory into the ordered list of toolchain
//! invocations and runs them against an [`Invoker`](crate::invoker::Invoker).
//!
//! ## Pipeline
//!
//! - [`powerset`] - every subset of the declared flags
//! - [`plan`] - the two extremes followed by each non-empty subset
//! - [`invocation`] - check, clippy and test descriptors per configuration
//! - [`runner`] - module/configuration/verb loops and failure policy

pub mod invocation;
pub mod plan;
pub mod powerset;
pub mod runner;

pub use invocation::{CommandVerb, InvocationDescriptor, TargetScope, sequence};
pub use plan::{Configuration, plan_configurations};
pub use powerset::{MAX_FEATURES, PlanError, power_set};
pub use runner::{FailurePolicy, MatrixRunner, ModuleReport, ModuleStatus, RunError, RunSummary};
