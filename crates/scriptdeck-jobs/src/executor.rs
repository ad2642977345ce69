//! The job execution loop: spawn, relay output, observe cancellation.
//!
//! One task per running job drives everything; the job's interpreter is only
//! ever touched from that task while the process lives (single-writer).
//! stdout and stderr are drained by two reader tasks into one channel; their
//! interleaving is best-effort and carries no ordering guarantee.

use std::process::Stdio;
use std::sync::Arc;
use std::time::Instant;

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};
use tokio::process::Command;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use scriptdeck_common::JobError;

use crate::events::JobEvent;
use crate::format::format_elapsed;
use crate::job::{lock, JobInner};
use crate::status::JobStatus;

const SEPARATOR: &str = "---------------------------------------------";

enum Outcome {
    /// Process exited on its own. The exit code is reported but never
    /// interpreted as failure.
    Exited(Option<i32>),
    /// Cancellation was requested and the teardown completed.
    Cancelled,
}

/// Run one job to a terminal status. Never returns an error: every failure
/// is converted into transcript text plus a status.
pub(crate) async fn drive(inner: Arc<JobInner>) {
    let started = Instant::now();
    inner.set_status(JobStatus::Running);

    let outcome = run_process(&inner).await;

    let status = match outcome {
        Ok(Outcome::Exited(code)) => {
            debug!(job = %inner.id, ?code, "process exited");
            JobStatus::Finished
        }
        Ok(Outcome::Cancelled) => {
            inner.append_line(SEPARATOR);
            inner.append_line("Execution cancelled");
            JobStatus::Cancelled
        }
        Err(err) => {
            warn!(job = %inner.id, error = %err, "job failed");
            inner.append_line(SEPARATOR);
            inner.append_line(&err.to_string());
            JobStatus::Failed
        }
    };

    let elapsed = started.elapsed();
    *lock(&inner.elapsed_on_completion) = Some(elapsed);
    inner.append_line(SEPARATOR);
    inner.append_line(&format!("Execution finished after {}", format_elapsed(elapsed)));

    inner.set_status(status);
    inner.events.publish(JobEvent::Completed);
}

async fn run_process(inner: &Arc<JobInner>) -> Result<Outcome, JobError> {
    let spec = &inner.spec;
    let mut command = Command::new(&spec.program);
    command
        .args(&spec.args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);
    if let Some(dir) = &spec.working_dir {
        command.current_dir(dir);
    }
    for (key, value) in &spec.env {
        command.env(key, value);
    }

    let mut child = command
        .spawn()
        .map_err(|err| JobError::SpawnFailed(err.to_string()))?;

    // Interactive input: lines forwarded to the child's stdin.
    if let Some(mut stdin) = child.stdin.take() {
        let (stdin_tx, mut stdin_rx) = mpsc::channel::<String>(16);
        *lock(&inner.stdin_tx) = Some(stdin_tx);
        tokio::spawn(async move {
            while let Some(line) = stdin_rx.recv().await {
                if stdin.write_all(line.as_bytes()).await.is_err()
                    || stdin.write_all(b"\n").await.is_err()
                {
                    break;
                }
                let _ = stdin.flush().await;
            }
        });
    }

    // Both output streams funnel into one channel; the single loop below is
    // the only writer to this job's interpreter.
    let (tx, mut rx) = mpsc::channel::<Vec<u8>>(64);
    if let Some(stdout) = child.stdout.take() {
        tokio::spawn(drain_stream(stdout, tx.clone()));
    }
    if let Some(stderr) = child.stderr.take() {
        tokio::spawn(drain_stream(stderr, tx.clone()));
    }
    drop(tx);

    let mut cancelled = false;
    loop {
        tokio::select! {
            chunk = rx.recv() => match chunk {
                Some(bytes) => inner.feed_output(&bytes),
                // Both streams closed: everything buffered has been flushed.
                None => break,
            },
            _ = inner.cancel.cancelled(), if !cancelled => {
                cancelled = true;
                if let Err(err) = child.start_kill() {
                    warn!(job = %inner.id, error = %err, "failed to signal process");
                }
                // Keep draining until the readers hit EOF.
            }
        }
    }

    let exit = child.wait().await;
    *lock(&inner.stdin_tx) = None;

    if cancelled {
        // The final status is set by the caller only now, after teardown.
        let _ = exit;
        Ok(Outcome::Cancelled)
    } else {
        Ok(Outcome::Exited(exit?.code()))
    }
}

/// Drain one output stream into the relay channel, chunk by chunk.
async fn drain_stream<R>(mut stream: R, tx: mpsc::Sender<Vec<u8>>)
where
    R: AsyncRead + Unpin,
{
    let mut buf = [0u8; 4096];
    loop {
        match stream.read(&mut buf).await {
            Ok(0) => break,
            Ok(n) => {
                if tx.send(buf[..n].to_vec()).await.is_err() {
                    break;
                }
            }
            Err(err) => {
                debug!(error = %err, "output stream closed with error");
                break;
            }
        }
    }
}
