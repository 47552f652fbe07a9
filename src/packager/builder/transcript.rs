//! Ordered log of a packaging run, mirrored live to the caller.

use crate::packager::process::{LogLine, StreamKind};
use std::sync::{Mutex, PoisonError};

/// Receives every transcript line as soon as it is recorded.
pub type LogSink<'a> = dyn Fn(&str) + Send + Sync + 'a;

/// Collects log lines and forwards each one to a sink.
pub(crate) struct Transcript<'a> {
    lines: Mutex<Vec<String>>,
    sink: &'a LogSink<'a>,
}

impl<'a> Transcript<'a> {
    pub(crate) fn new(sink: &'a LogSink<'a>) -> Self {
        Self {
            lines: Mutex::new(Vec::new()),
            sink,
        }
    }

    /// Appends a line and hands it to the sink.
    pub(crate) fn record(&self, line: impl Into<String>) {
        let line = line.into();
        (self.sink)(&line);
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(line);
    }

    /// Line sink for a tool; stderr lines are marked `ERROR`.
    pub(crate) fn tool_sink<'t>(&'t self, tool: &'t str) -> impl Fn(&LogLine) + Send + Sync + 't {
        move |line: &LogLine| match line.stream {
            StreamKind::Stdout => self.record(format!("{tool}: {}", line.text)),
            StreamKind::Stderr => self.record(format!("{tool} ERROR: {}", line.text)),
        }
    }

    pub(crate) fn into_lines(self) -> Vec<String> {
        self.lines
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
