use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};

#[derive(Parser, Debug, Clone)]
#[command(version, about = "Run deployment actions, stopping at the first failure")]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (defaults to ./deploy.toml when present).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct CallArgs {
    /// Action name, e.g. `npm.build` or `git.push`.
    pub action: String,

    /// Arguments forwarded verbatim to the action handler.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct PipelineArgs {
    /// TOML file with `[[steps]]`; falls back to `[[pipeline.steps]]` in the config.
    #[arg(long)]
    pub file: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Run a single action.
    Call(CallArgs),
    /// Run a sequence of actions through one session.
    Pipeline(PipelineArgs),
    /// List known actions and their failure messages.
    Actions,
}
