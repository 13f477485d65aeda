// ─── Launch Task ───
// Runs one Gradle invocation, streams its output to the log and optionally
// stops it once a readiness marker shows up.

use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::{Child, ChildStdout};
use tracing::{debug, info, warn};

use super::launcher::{format_command_for_logs, ProcessLauncher};
use super::lines::{LineBuffer, MarkerWatch};
use crate::core::error::{ActionError, ActionResult};

const READ_CHUNK: usize = 8 * 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunMode {
    /// Wait for natural exit.
    ToCompletion,
    /// Terminate as soon as a stdout line contains the marker.
    UntilMarker(String),
}

/// One process invocation.
#[derive(Debug, Clone)]
pub struct ProcessSpec {
    /// Short label used to tag log lines, e.g. `gradle:build`.
    pub step: String,
    pub project_dir: PathBuf,
    pub args: Vec<String>,
    pub mode: RunMode,
    pub timeout: Option<Duration>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutcome {
    pub exit_code: Option<i32>,
    pub success: bool,
    /// Whether the marker was seen and the process stopped because of it.
    pub marker_seen: bool,
}

/// Spawn `spec` with `launcher` and wait for its exit event.
///
/// Returns once the child has exited, whether it ended naturally, was
/// stopped on the marker, or was stopped on timeout (an error).
pub async fn run_process(
    launcher: &dyn ProcessLauncher,
    spec: &ProcessSpec,
) -> ActionResult<ProcessOutcome> {
    let mut cmd = launcher.command(&spec.project_dir, &spec.args);
    cmd.stdin(Stdio::null());
    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::piped());
    cmd.kill_on_drop(true);

    info!("[{}] Running {}", spec.step, launcher.program());
    debug!("Command (copy/paste): {}", format_command_for_logs(&cmd));

    let mut child = cmd.spawn().map_err(|source| ActionError::ProcessSpawn {
        program: launcher.program(),
        source,
    })?;

    let mut stderr_pump = child
        .stderr
        .take()
        .map(|stderr| tokio::spawn(pump_stderr(stderr, spec.step.clone())));
    let stdout = child.stdout.take();

    // Watching stdout, reaping the child and draining stderr share one limit.
    let finished = async {
        let marker_seen = watch_stdout(launcher, &mut child, stdout, spec).await?;
        let status = child
            .wait()
            .await
            .map_err(|e| ActionError::io(&spec.project_dir, e))?;

        if let Some(pump) = stderr_pump.as_mut() {
            if marker_seen {
                // Grandchildren of a killed wrapper may hold stderr open.
                pump.abort();
            } else {
                let _ = pump.await;
            }
        }
        Ok::<_, ActionError>((status, marker_seen))
    };

    let result = match spec.timeout {
        Some(limit) => tokio::time::timeout(limit, finished)
            .await
            .map_err(|_| limit),
        None => Ok(finished.await),
    };

    let (status, marker_seen) = match result {
        Ok(done) => done?,
        Err(limit) => {
            warn!("[{}] Timed out after {:?}, stopping", spec.step, limit);
            launcher.terminate(&mut child).await?;
            let _ = child.wait().await;
            if let Some(pump) = stderr_pump {
                pump.abort();
            }
            return Err(ActionError::ProcessTimeout {
                step: spec.step.clone(),
                limit,
            });
        }
    };

    info!("[{}] Exited with {}", spec.step, status);

    Ok(ProcessOutcome {
        exit_code: status.code(),
        success: status.success(),
        marker_seen,
    })
}

/// Log stdout line by line; returns whether the marker fired.
async fn watch_stdout(
    launcher: &dyn ProcessLauncher,
    child: &mut Child,
    stdout: Option<ChildStdout>,
    spec: &ProcessSpec,
) -> ActionResult<bool> {
    let Some(mut stdout) = stdout else {
        return Ok(false);
    };

    let mut watch = match &spec.mode {
        RunMode::UntilMarker(marker) => Some(MarkerWatch::new(marker.clone())),
        RunMode::ToCompletion => None,
    };
    let mut lines = LineBuffer::new();
    let mut chunk = vec![0u8; READ_CHUNK];

    loop {
        let n = stdout
            .read(&mut chunk)
            .await
            .map_err(|e| ActionError::io(&spec.project_dir, e))?;
        if n == 0 {
            break;
        }

        let mut ready = false;
        for line in lines.push(&chunk[..n]) {
            info!("[{}][stdout] {}", spec.step, line);
            if let Some(watch) = watch.as_mut() {
                ready |= watch.observe(&line);
            }
        }

        if ready {
            info!("[{}] Readiness marker seen, stopping process", spec.step);
            launcher.terminate(child).await?;
            return Ok(true);
        }
    }

    if let Some(line) = lines.finish() {
        info!("[{}][stdout] {}", spec.step, line);
        if let Some(watch) = watch.as_mut() {
            if watch.observe(&line) {
                return Ok(true);
            }
        }
    }

    Ok(false)
}

async fn pump_stderr(mut stderr: impl AsyncRead + Unpin, step: String) {
    let mut lines = LineBuffer::new();
    let mut chunk = vec![0u8; READ_CHUNK];

    loop {
        match stderr.read(&mut chunk).await {
            Ok(0) => break,
            Ok(n) => {
                for line in lines.push(&chunk[..n]) {
                    warn!("[{}][stderr] {}", step, line);
                }
            }
            Err(e) => {
                warn!("[{}] stderr read failed: {}", step, e);
                break;
            }
        }
    }

    if let Some(line) = lines.finish() {
        warn!("[{}][stderr] {}", step, line);
    }
}
