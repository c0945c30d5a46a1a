//! External tag tool execution.
//!
//! [`ExternalTagProcess`] implements [`TagExecutor`] by spawning the tool
//! with stdout and stderr piped. Both streams are drained on their own
//! threads so a chatty tool never blocks on a full pipe buffer, while the
//! calling thread polls for exit and then collects the streams, all within
//! one wall-clock deadline.

use std::io::Read;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use camino::{Utf8Path, Utf8PathBuf};
use tracing::{debug, warn};

use crate::error::TaglistError;
use crate::runner::TagExecutor;

/// Tracing target for tag process operations.
const PROCESS_TARGET: &str = "callscope_taglist::process";

/// Interval between exit polls.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Program and arguments of one tool run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolInvocation {
    program: Utf8PathBuf,
    args: Vec<String>,
}

impl ToolInvocation {
    /// Creates an invocation of `program` with `args`.
    #[must_use]
    pub fn new(program: impl Into<Utf8PathBuf>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Returns the program to launch.
    #[must_use]
    pub fn program(&self) -> &Utf8Path {
        &self.program
    }

    /// Returns the arguments passed to the program.
    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }
}

/// Runs an external tag tool with a deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExternalTagProcess {
    timeout: Duration,
}

impl Default for ExternalTagProcess {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TIMEOUT)
    }
}

impl ExternalTagProcess {
    /// Deadline applied when none is configured.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Creates a runner that kills tools still running after `timeout`.
    #[must_use]
    pub const fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Returns the configured deadline.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Runs `invocation` and returns everything it wrote to stdout.
    ///
    /// # Errors
    ///
    /// Returns [`TaglistError::SpawnFailed`] if the tool cannot be started,
    /// [`TaglistError::Timeout`] if it, or a descendant holding its output
    /// open, outlives the deadline and [`TaglistError::NonZeroExit`] with the
    /// captured stderr if it fails.
    pub fn run(&self, invocation: &ToolInvocation) -> Result<String, TaglistError> {
        let tool = invocation.program().as_str();
        debug!(
            target: PROCESS_TARGET,
            tool,
            args = invocation.args().len(),
            "spawning tag tool"
        );

        let mut child = Command::new(invocation.program())
            .args(invocation.args())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|err| TaglistError::spawn_failed(tool, err))?;

        let deadline = Deadline::new(self.timeout);
        let stdout = drain(child.stdout.take());
        let stderr = drain(child.stderr.take());

        // On timeout the drain threads are abandoned: a descendant may still
        // hold the pipes open after the tool itself has exited or been killed.
        let status = wait_for_exit(tool, &mut child, &deadline)?;
        let output = collect(tool, stdout.as_ref(), &deadline)?;
        let errors = collect(tool, stderr.as_ref(), &deadline)?;

        if status.success() {
            return Ok(output);
        }
        Err(TaglistError::NonZeroExit {
            tool: tool.to_owned(),
            status: status.code().unwrap_or(-1),
            stderr: errors.trim_end().to_owned(),
        })
    }
}

impl TagExecutor for ExternalTagProcess {
    fn execute(&self, invocation: &ToolInvocation) -> Result<String, TaglistError> {
        self.run(invocation)
    }
}

/// Wall-clock budget shared by the exit wait and the stream collection.
#[derive(Debug)]
struct Deadline {
    start: Instant,
    timeout: Duration,
}

impl Deadline {
    fn new(timeout: Duration) -> Self {
        Self {
            start: Instant::now(),
            timeout,
        }
    }

    fn remaining(&self) -> Duration {
        self.timeout.saturating_sub(self.start.elapsed())
    }

    fn millis(&self) -> u64 {
        millis(self.timeout)
    }

    fn expired(&self, tool: &str) -> TaglistError {
        TaglistError::Timeout {
            tool: tool.to_owned(),
            timeout_ms: self.millis(),
        }
    }
}

/// Polls the tool for exit, killing and reaping it once the deadline passes.
fn wait_for_exit(
    tool: &str,
    child: &mut Child,
    deadline: &Deadline,
) -> Result<ExitStatus, TaglistError> {
    loop {
        match child.try_wait() {
            Ok(Some(status)) => {
                debug!(
                    target: PROCESS_TARGET,
                    tool,
                    ?status,
                    elapsed_ms = millis(deadline.start.elapsed()),
                    "tag tool exited"
                );
                return Ok(status);
            }
            Ok(None) => {
                if deadline.remaining().is_zero() {
                    warn!(
                        target: PROCESS_TARGET,
                        tool,
                        timeout_ms = deadline.millis(),
                        "tag tool timed out, killing process"
                    );
                    drop(child.kill());
                    drop(child.wait());
                    return Err(deadline.expired(tool));
                }
                thread::sleep(POLL_INTERVAL);
            }
            Err(err) => return Err(TaglistError::io(tool, err)),
        }
    }
}

type Captured = std::io::Result<Vec<u8>>;

/// Reads a stream to its end on a dedicated thread, which reports the
/// captured bytes over a channel.
fn drain(stream: Option<impl Read + Send + 'static>) -> Option<Receiver<Captured>> {
    stream.map(|mut reader| {
        let (sender, receiver) = mpsc::channel();
        thread::spawn(move || {
            let mut buffer = Vec::new();
            // The receiver is gone once the run has timed out.
            drop(sender.send(reader.read_to_end(&mut buffer).map(|_| buffer)));
        });
        receiver
    })
}

/// Waits for a drain thread within the deadline and decodes what it
/// captured.
fn collect(
    tool: &str,
    captured: Option<&Receiver<Captured>>,
    deadline: &Deadline,
) -> Result<String, TaglistError> {
    let Some(receiver) = captured else {
        return Ok(String::new());
    };
    let bytes = match receiver.recv_timeout(deadline.remaining()) {
        Ok(result) => result.map_err(|err| TaglistError::io(tool, err))?,
        Err(RecvTimeoutError::Timeout) => {
            warn!(
                target: PROCESS_TARGET,
                tool,
                timeout_ms = deadline.millis(),
                "tag tool output still open at deadline, abandoning readers"
            );
            return Err(deadline.expired(tool));
        }
        Err(RecvTimeoutError::Disconnected) => {
            return Err(TaglistError::io(
                tool,
                std::io::Error::other("stream reader panicked"),
            ));
        }
    };
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
