use std::path::{Path, PathBuf};

use anyhow::Result;
use deploy_core::api::{run_command, CommandSpec};

/// Runs `spec` and reports whether it exited 0.
///
/// Spawn failures surface as `Err`; a non-zero exit is `Ok(false)` with the
/// captured stderr tail logged.
pub(crate) async fn run_ok(spec: &CommandSpec, capture_bytes: usize, label: &str) -> Result<bool> {
    let out = run_command(spec, capture_bytes).await?;
    if out.success() {
        tracing::info!(label, duration_ms = out.duration_ms, "command succeeded");
        return Ok(true);
    }
    tracing::warn!(
        label,
        exit_code = out.exit_code,
        stderr = %out.stderr_tail.trim_end(),
        "command failed"
    );
    Ok(false)
}

/// Resolves `p` against `base` unless it is already absolute.
pub(crate) fn resolve(base: &str, p: &str) -> PathBuf {
    let p = Path::new(p);
    if p.is_absolute() {
        p.to_path_buf()
    } else {
        Path::new(base).join(p)
    }
}
