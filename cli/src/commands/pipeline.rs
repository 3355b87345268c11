use std::io::Write;

use serde::Serialize;
use tracing::Instrument;
use uuid::Uuid;

use deploy_core::api::{ActionProxy, AppConfig, AppContext, CallResult, CliError, PipelineStep};
use deploy_core::config;

use super::cli::PipelineArgs;

#[derive(Debug, Serialize)]
struct StepReport<'a> {
    run_id: &'a str,
    step: usize,
    action: &'a str,
    ts: String,
    #[serde(flatten)]
    result: CallResult,
}

pub async fn handle_pipeline(
    args: PipelineArgs,
    ctx: &AppContext,
    out: &mut impl Write,
) -> Result<i32, CliError> {
    let steps = resolve_steps(&args, ctx.cfg())?;
    let run_id = Uuid::new_v4().to_string();
    let span = tracing::info_span!("pipeline", run_id = %run_id, steps = steps.len());

    let all_ok = run_steps(&ctx.proxy(), &steps, &run_id, out)
        .instrument(span)
        .await?;
    Ok(if all_ok { 0 } else { 1 })
}

fn resolve_steps(args: &PipelineArgs, cfg: &AppConfig) -> Result<Vec<PipelineStep>, CliError> {
    let steps = match &args.file {
        Some(path) => config::load_pipeline(path)?.steps,
        None => cfg.pipeline.steps.clone(),
    };
    if steps.is_empty() {
        return Err(CliError::Command("no pipeline steps configured".into()));
    }
    Ok(steps)
}

/// Every step is reported, including the ones the proxy refuses after a failure.
async fn run_steps(
    proxy: &ActionProxy,
    steps: &[PipelineStep],
    run_id: &str,
    out: &mut impl Write,
) -> Result<bool, CliError> {
    let mut all_ok = true;
    for (i, step) in steps.iter().enumerate() {
        let result = proxy.call(&step.action, &step.args).await;
        all_ok &= result.success;
        let report = StepReport {
            run_id,
            step: i + 1,
            action: &step.action,
            ts: chrono::Local::now().to_rfc3339(),
            result,
        };
        writeln!(out, "{}", serde_json::to_string(&report)?)?;
    }
    if !all_ok {
        tracing::warn!("pipeline finished with failures");
    }
    Ok(all_ok)
}
