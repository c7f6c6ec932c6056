//! Listing command execution.
//!
//! [`PackageLister`] abstracts "run the package manager's listing command
//! and hand back what it printed". [`CommandLister`] is the real process
//! implementation; tests substitute canned output.

use std::io::{self, Read};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::error::{AuditError, Result};

/// Default listing program.
pub const DEFAULT_PROGRAM: &str = "winget";

/// Default listing arguments.
pub const DEFAULT_ARGS: &[&str] = &["list"];

/// Default timeout for the listing command.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Interval between exit-status polls while waiting on the child.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Raw output of one listing command invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingOutput {
    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,

    /// Standard output.
    pub stdout: String,

    /// Standard error.
    pub stderr: String,

    /// Whether the command exited successfully.
    pub success: bool,
}

impl ListingOutput {
    /// Create a successful output with empty stderr.
    pub fn success(stdout: impl Into<String>) -> Self {
        Self {
            exit_code: Some(0),
            stdout: stdout.into(),
            stderr: String::new(),
            success: true,
        }
    }

    /// Create a failed output.
    pub fn failure(exit_code: Option<i32>, stdout: String, stderr: String) -> Self {
        Self {
            exit_code,
            stdout,
            stderr,
            success: false,
        }
    }

    /// Whether anything was written to standard error.
    pub fn has_stderr(&self) -> bool {
        !self.stderr.is_empty()
    }
}

/// Capability to enumerate installed packages.
///
/// Implementations return the listing command's raw output; interpreting
/// exit status and stderr is left to the caller.
pub trait PackageLister: Send + Sync {
    /// Human-readable command description, used in error messages.
    fn describe(&self) -> String;

    /// Run the listing command to completion.
    fn list(&self) -> Result<ListingOutput>;
}

/// Runs a package manager listing command as a child process.
#[derive(Debug, Clone)]
pub struct CommandLister {
    program: String,
    args: Vec<String>,
    timeout: Option<Duration>,
}

impl Default for CommandLister {
    fn default() -> Self {
        Self::new(
            DEFAULT_PROGRAM,
            DEFAULT_ARGS.iter().map(|a| a.to_string()).collect(),
        )
    }
}

impl CommandLister {
    /// Create a lister for `program args...` with the default timeout.
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            timeout: Some(DEFAULT_TIMEOUT),
        }
    }

    /// Set the timeout. `None` waits indefinitely.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// The configured timeout.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    fn execution_error(&self, message: impl Into<String>) -> AuditError {
        AuditError::CommandExecution {
            command: self.describe(),
            message: message.into(),
        }
    }

    fn timeout_error(&self, timeout: Duration) -> AuditError {
        AuditError::CommandTimeout {
            command: self.describe(),
            timeout,
        }
    }

    /// Wait for the child, killing it once the deadline passes.
    fn wait_with_deadline(&self, child: &mut Child, started: Instant) -> Result<ExitStatus> {
        loop {
            match child.try_wait() {
                Ok(Some(status)) => return Ok(status),
                Ok(None) => {
                    if let Some(timeout) = self.timeout {
                        if started.elapsed() > timeout {
                            warn!("Listing command exceeded {:?}, killing it", timeout);
                            let _ = child.kill();
                            let _ = child.wait();
                            return Err(self.timeout_error(timeout));
                        }
                    }
                    thread::sleep(POLL_INTERVAL);
                }
                Err(e) => return Err(self.execution_error(format!("wait failed: {}", e))),
            }
        }
    }

    /// Collect both streams from the reader threads.
    ///
    /// The deadline still applies after the child exits: a descendant that
    /// inherited the pipes can keep them open long after its parent is gone.
    fn collect_output(&self, rx: Receiver<StreamRead>, started: Instant) -> Result<(Vec<u8>, Vec<u8>)> {
        let mut stdout = None;
        let mut stderr = None;

        while stdout.is_none() || stderr.is_none() {
            let (stream, read) = match self.timeout {
                Some(timeout) => {
                    let remaining = timeout.saturating_sub(started.elapsed());
                    rx.recv_timeout(remaining).map_err(|e| match e {
                        RecvTimeoutError::Timeout => {
                            warn!("Listing output still open after {:?}", timeout);
                            self.timeout_error(timeout)
                        }
                        RecvTimeoutError::Disconnected => self.reader_stopped(),
                    })?
                }
                None => rx.recv().map_err(|_| self.reader_stopped())?,
            };

            let bytes = read.map_err(|e| {
                self.execution_error(format!("failed to read {}: {}", stream.name(), e))
            })?;
            match stream {
                Stream::Stdout => stdout = Some(bytes),
                Stream::Stderr => stderr = Some(bytes),
            }
        }

        Ok((stdout.unwrap_or_default(), stderr.unwrap_or_default()))
    }

    fn reader_stopped(&self) -> AuditError {
        self.execution_error("output reader stopped before the stream closed")
    }
}

impl PackageLister for CommandLister {
    fn describe(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn list(&self) -> Result<ListingOutput> {
        debug!("Spawning listing command: {}", self.describe());

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| self.execution_error(e.to_string()))?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| self.execution_error("stdout was not captured"))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| self.execution_error("stderr was not captured"))?;

        let started = Instant::now();

        // Pipes are drained on their own threads while the child runs.
        let (tx, rx) = mpsc::channel();
        spawn_reader(Stream::Stdout, stdout, tx.clone());
        spawn_reader(Stream::Stderr, stderr, tx);

        let status = self.wait_with_deadline(&mut child, started)?;
        let (stdout_bytes, stderr_bytes) = self.collect_output(rx, started)?;

        let stdout = String::from_utf8(stdout_bytes).map_err(|e| AuditError::Parse {
            message: format!("output of `{}` is not valid UTF-8: {}", self.describe(), e),
        })?;
        let stderr = String::from_utf8_lossy(&stderr_bytes).to_string();

        debug!(
            "Listing command exited with {:?} ({} bytes stdout, {} bytes stderr)",
            status.code(),
            stdout.len(),
            stderr.len()
        );

        if status.success() {
            Ok(ListingOutput {
                exit_code: status.code(),
                stdout,
                stderr,
                success: true,
            })
        } else {
            Ok(ListingOutput::failure(status.code(), stdout, stderr))
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Stream {
    Stdout,
    Stderr,
}

impl Stream {
    fn name(self) -> &'static str {
        match self {
            Stream::Stdout => "stdout",
            Stream::Stderr => "stderr",
        }
    }
}

type StreamRead = (Stream, io::Result<Vec<u8>>);

fn spawn_reader(stream: Stream, reader: impl Read + Send + 'static, tx: Sender<StreamRead>) {
    thread::spawn(move || {
        // The receiver is gone once the deadline has passed.
        let _ = tx.send((stream, read_all(reader)));
    });
}

fn read_all(mut reader: impl Read) -> io::Result<Vec<u8>> {
    let mut buf = Vec::new();
    reader.read_to_end(&mut buf)?;
    Ok(buf)
}
