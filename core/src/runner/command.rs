use std::collections::VecDeque;
use std::process::Stdio;
use std::time::Instant;

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;
use tokio::task::JoinHandle;

use crate::error::RunnerError;

use super::exit::exit_code;

#[derive(Clone, Debug, Default)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: Option<String>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            ..Self::default()
        }
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn cwd(mut self, cwd: impl Into<String>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }
}

#[derive(Clone, Debug)]
pub struct CommandOutput {
    pub exit_code: i32,
    pub duration_ms: u64,
    pub stdout_tail: String,
    pub stderr_tail: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Runs `spec` to completion. Only the last `capture_bytes` of each stream are kept.
///
/// A non-zero exit is not an error here; callers decide what it means.
pub async fn run_command(
    spec: &CommandSpec,
    capture_bytes: usize,
) -> Result<CommandOutput, RunnerError> {
    let mut cmd = Command::new(&spec.program);
    cmd.args(&spec.args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);
    if let Some(cwd) = &spec.cwd {
        cmd.current_dir(cwd);
    }

    tracing::debug!(
        program = %spec.program,
        args = ?spec.args,
        cwd = ?spec.cwd,
        "spawning command"
    );

    let started = Instant::now();
    let mut child = cmd.spawn().map_err(|source| RunnerError::Spawn {
        program: spec.program.clone(),
        source,
    })?;

    // Drain both pipes while the child runs so it never blocks on a full pipe.
    let out_task = child.stdout.take().map(|r| pump_tail(r, capture_bytes));
    let err_task = child.stderr.take().map(|r| pump_tail(r, capture_bytes));

    let status = child.wait().await.map_err(|source| RunnerError::Wait {
        program: spec.program.clone(),
        source,
    })?;

    let out = CommandOutput {
        exit_code: exit_code(status),
        duration_ms: started.elapsed().as_millis() as u64,
        stdout_tail: join_tail(out_task).await,
        stderr_tail: join_tail(err_task).await,
    };

    tracing::debug!(
        program = %spec.program,
        exit_code = out.exit_code,
        duration_ms = out.duration_ms,
        "command finished"
    );
    Ok(out)
}

/// Byte buffer that only ever holds the most recent `max` bytes pushed into it.
struct TailBuf {
    buf: VecDeque<u8>,
    max: usize,
}

impl TailBuf {
    fn new(max: usize) -> Self {
        Self {
            buf: VecDeque::with_capacity(max.min(64 * 1024)),
            max,
        }
    }

    fn push(&mut self, chunk: &[u8]) {
        let chunk = &chunk[chunk.len().saturating_sub(self.max)..];
        let overflow = (self.buf.len() + chunk.len()).saturating_sub(self.max);
        self.buf.drain(..overflow);
        self.buf.extend(chunk);
    }

    fn into_lossy(self) -> String {
        let bytes: Vec<u8> = self.buf.into();
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

fn pump_tail<R>(mut reader: R, max: usize) -> JoinHandle<String>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut tail = TailBuf::new(max);
        let mut chunk = [0u8; 8192];
        loop {
            match reader.read(&mut chunk).await {
                Ok(0) => break,
                Ok(n) => tail.push(&chunk[..n]),
                Err(e) => {
                    tracing::debug!(error = %e, "stopped reading child output");
                    break;
                }
            }
        }
        tail.into_lossy()
    })
}

async fn join_tail(task: Option<JoinHandle<String>>) -> String {
    match task {
        Some(t) => t.await.unwrap_or_default(),
        None => String::new(),
    }
}
