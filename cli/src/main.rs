use clap::Parser;
mod commands;
mod logging;
use commands::cli;
use deploy_core::api::{AppContext, CliError};
use deploy_core::config;
use deploy_plugins::PluginServicesFactory;

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let args = cli::Args::parse();

    if let cli::Commands::Actions = args.command {
        return commands::actions::handle_actions(&mut std::io::stdout().lock());
    }

    // The configured level is unknown until the config is read.
    let cfg = tracing::subscriber::with_default(logging::bootstrap(std::io::stderr), || {
        config::load(args.config.as_deref())
    })?;
    let guard = logging::init(&cfg.logging);
    let ctx = AppContext::new(cfg, &PluginServicesFactory)?;

    let exit = dispatch(args.command, &ctx).await?;
    drop(guard);
    std::process::exit(exit);
}

async fn dispatch(cmd: cli::Commands, ctx: &AppContext) -> Result<i32, CliError> {
    let mut out = std::io::stdout();
    match cmd {
        cli::Commands::Call(call_args) => {
            commands::call::handle_call(call_args, ctx, &mut out).await
        }
        cli::Commands::Pipeline(pipeline_args) => {
            commands::pipeline::handle_pipeline(pipeline_args, ctx, &mut out).await
        }
        cli::Commands::Actions => {
            commands::actions::handle_actions(&mut out)?;
            Ok(0)
        }
    }
}
