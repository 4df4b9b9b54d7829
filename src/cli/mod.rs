//! CLI command implementations

mod check;
mod run;
mod style;

pub use check::{CheckOptions, run_check};
pub use run::{RunOptions, run_gate_command};
