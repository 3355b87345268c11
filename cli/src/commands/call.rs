use std::io::Write;

use deploy_core::api::{AppContext, CliError};

use super::cli::CallArgs;

/// Runs one action through a fresh session and prints its result as JSON.
pub async fn handle_call(
    args: CallArgs,
    ctx: &AppContext,
    out: &mut impl Write,
) -> Result<i32, CliError> {
    let proxy = ctx.proxy();
    let result = proxy.call(&args.action, &args.args).await;
    writeln!(out, "{}", serde_json::to_string(&result)?)?;
    Ok(if result.success { 0 } else { 1 })
}

#[cfg(test)]
mod tests {
    use deploy_core::api::{AppConfig, BLOCKED_MESSAGE, SUCCESS_MESSAGE};
    use deploy_plugins::PluginServicesFactory;
    use pretty_assertions::assert_eq;

    use super::*;

    fn context(root: &std::path::Path) -> AppContext {
        let cfg = AppConfig {
            source_dir: root.display().to_string(),
            ..AppConfig::default()
        };
        AppContext::new(cfg, &PluginServicesFactory).unwrap()
    }

    async fn call(ctx: &AppContext, action: &str) -> (i32, serde_json::Value) {
        let mut buf = Vec::new();
        let args = CallArgs {
            action: action.to_string(),
            args: vec![],
        };
        let code = handle_call(args, ctx, &mut buf).await.unwrap();
        let printed = String::from_utf8(buf).unwrap();
        assert_eq!(printed.lines().count(), 1);
        (code, serde_json::from_str(printed.trim_end()).unwrap())
    }

    #[tokio::test]
    async fn failing_action_exits_one_with_envelope() {
        let root = tempfile::tempdir().unwrap();
        let (code, json) = call(&context(root.path()), "catalog.back").await;

        assert_eq!(code, 1);
        assert_eq!(
            json,
            serde_json::json!({
                "success": false,
                "message": "failed to restore previous deployment",
            })
        );
    }

    #[tokio::test]
    async fn unknown_action_exits_one() {
        let root = tempfile::tempdir().unwrap();
        let (code, json) = call(&context(root.path()), "unknown.action").await;

        assert_eq!(code, 1);
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "unknown action: unknown.action");
    }

    #[tokio::test]
    async fn succeeding_action_exits_zero() {
        let root = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(root.path().join("dist")).unwrap();
        std::fs::write(root.path().join("dist/index.html"), "v1").unwrap();

        let (code, json) = call(&context(root.path()), "catalog.to").await;

        assert_eq!(code, 0);
        assert_eq!(json["success"], true);
        assert_eq!(json["message"], SUCCESS_MESSAGE);
    }

    #[tokio::test]
    async fn each_call_gets_a_fresh_session() {
        let root = tempfile::tempdir().unwrap();
        let ctx = context(root.path());

        let (first, _) = call(&ctx, "catalog.back").await;
        let (second, json) = call(&ctx, "unknown.action").await;

        assert_eq!(first, 1);
        assert_eq!(second, 1);
        assert!(json["message"] != BLOCKED_MESSAGE);
    }
}
