mod command;
pub mod exit;

pub use command::{run_command, CommandOutput, CommandSpec};
