//! External process execution with live, line-oriented output.
//!
//! Every JDK tool invocation goes through [`run`]. Standard output and
//! standard error are read concurrently and each line is handed to the
//! caller's sink as soon as it is read. Order is preserved within a stream;
//! interleaving between the two streams is best-effort only.

use crate::packager::{Context, Error, Result};
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::Mutex;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;
use tokio_util::sync::CancellationToken;

/// Stream a line was read from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StreamKind {
    /// Standard output
    Stdout,
    /// Standard error
    Stderr,
}

impl fmt::Display for StreamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamKind::Stdout => f.write_str("stdout"),
            StreamKind::Stderr => f.write_str("stderr"),
        }
    }
}

/// One line of tool output, without its line terminator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogLine {
    /// Originating stream
    pub stream: StreamKind,
    /// Line content (lossily decoded)
    pub text: String,
}

/// Receives tool output lines as they arrive.
pub type LineSink<'a> = dyn Fn(&LogLine) + Send + Sync + 'a;

/// A program invocation: executable, ordered arguments, optional working directory.
#[derive(Clone, Debug)]
pub struct ToolCommand {
    program: PathBuf,
    args: Vec<String>,
    working_dir: Option<PathBuf>,
}

impl ToolCommand {
    /// Creates an invocation of `program` with no arguments.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            working_dir: None,
        }
    }

    /// Appends one argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Appends several arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Runs the program from `dir`.
    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Executable to spawn.
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Arguments, in order.
    pub fn arguments(&self) -> &[String] {
        &self.args
    }

    /// Short tool name for messages (`/opt/jdk/bin/jlink` -> `jlink`).
    pub fn tool_name(&self) -> String {
        self.program
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.program.display().to_string())
    }

    /// Command line as a single string, for logs.
    pub fn display(&self) -> String {
        let mut line = self.program.display().to_string();
        for arg in &self.args {
            line.push(' ');
            if arg.contains(' ') {
                line.push('"');
                line.push_str(arg);
                line.push('"');
            } else {
                line.push_str(arg);
            }
        }
        line
    }
}

/// Spawns `command`, forwards every output line to `sink`, and waits for exit.
///
/// Returns the exit code (`-1` when the process was terminated by a signal).
/// A non-zero exit is not an error here; see [`run_checked`].
///
/// # Errors
///
/// - [`Error::ToolUnavailable`] if the executable cannot be spawned
/// - [`Error::Cancelled`] if `cancel` fires first; the child is killed
pub async fn run(
    command: &ToolCommand,
    sink: &LineSink<'_>,
    cancel: Option<&CancellationToken>,
) -> Result<i32> {
    let mut cmd = Command::new(&command.program);
    cmd.args(&command.args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);
    if let Some(dir) = &command.working_dir {
        cmd.current_dir(dir);
    }

    log::debug!("Running: {}", command.display());

    let mut child = cmd.spawn().map_err(|source| Error::ToolUnavailable {
        tool: command.tool_name(),
        source,
    })?;

    let stdout = child.stdout.take();
    let stderr = child.stderr.take();

    let outcome = {
        let finished = async {
            tokio::join!(
                forward_lines(stdout, StreamKind::Stdout, sink),
                forward_lines(stderr, StreamKind::Stderr, sink),
            );
            child.wait().await
        };

        match cancel {
            Some(token) => tokio::select! {
                status = finished => Some(status),
                _ = token.cancelled() => None,
            },
            None => Some(finished.await),
        }
    };

    let Some(status) = outcome else {
        log::warn!("Cancelling {}", command.tool_name());
        if let Err(e) = child.kill().await {
            log::warn!("Failed to kill {}: {}", command.tool_name(), e);
        }
        return Err(Error::Cancelled);
    };

    let status = status.context(format!("Failed waiting for {}", command.tool_name()))?;

    let code = status.code().unwrap_or(-1);
    log::debug!("{} exited with code {}", command.tool_name(), code);
    Ok(code)
}

/// Like [`run`], but a non-zero exit becomes [`Error::ToolFailed`].
pub async fn run_checked(
    command: &ToolCommand,
    sink: &LineSink<'_>,
    cancel: Option<&CancellationToken>,
) -> Result<()> {
    match run(command, sink, cancel).await? {
        0 => Ok(()),
        exit_code => Err(Error::ToolFailed {
            tool: command.tool_name(),
            exit_code,
        }),
    }
}

/// Output of a command run to completion without a live sink.
#[derive(Debug, Default)]
pub struct CapturedOutput {
    /// Exit code of the process
    pub exit_code: i32,
    /// Standard output lines
    pub stdout: Vec<String>,
    /// Standard error lines
    pub stderr: Vec<String>,
}

impl CapturedOutput {
    /// True when the process exited with code zero.
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Runs `command` and collects its output lines per stream.
pub async fn capture(command: &ToolCommand) -> Result<CapturedOutput> {
    let stdout = Mutex::new(Vec::new());
    let stderr = Mutex::new(Vec::new());

    let exit_code = run(
        command,
        &|line: &LogLine| {
            let target = match line.stream {
                StreamKind::Stdout => &stdout,
                StreamKind::Stderr => &stderr,
            };
            if let Ok(mut lines) = target.lock() {
                lines.push(line.text.clone());
            }
        },
        None,
    )
    .await?;

    Ok(CapturedOutput {
        exit_code,
        stdout: stdout.into_inner().unwrap_or_default(),
        stderr: stderr.into_inner().unwrap_or_default(),
    })
}

async fn forward_lines<R>(reader: Option<R>, stream: StreamKind, sink: &LineSink<'_>)
where
    R: AsyncRead + Unpin,
{
    let Some(reader) = reader else {
        return;
    };

    let mut reader = BufReader::new(reader);
    let mut buf = Vec::new();

    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf).await {
            Ok(0) => break,
            Ok(_) => {
                let text = String::from_utf8_lossy(&buf);
                let text = text.trim_end_matches(['\n', '\r']);
                sink(&LogLine {
                    stream,
                    text: text.to_string(),
                });
            }
            Err(e) => {
                log::warn!("Failed reading tool {}: {}", stream, e);
                break;
            }
        }
    }
}
