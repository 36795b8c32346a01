pub mod commands;
pub mod context;
pub mod help;
pub mod output;
pub mod registry;
mod shell;

pub use context::{CliError, CliMode};
pub use shell::run_cli;
