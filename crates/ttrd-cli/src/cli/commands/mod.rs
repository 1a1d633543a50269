//! CLI command handlers. Each command is in its own file.

mod check;
mod run;

pub use check::run_check;
pub use run::run_pipeline;
