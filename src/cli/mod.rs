//! Terminal front end: renders ledger views and turns typed commands into
//! session actions.

pub mod commands;
pub mod core;
pub mod output;
pub mod registry;
mod shell;
pub mod shell_context;
pub mod view;

pub use shell::run_cli;
pub use shell_context::{CliMode, ShellContext};
