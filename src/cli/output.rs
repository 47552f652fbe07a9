//! Styled terminal output.
//!
//! Regular messages go to stdout, warnings and errors to stderr. `--quiet`
//! suppresses everything except errors and requested data (JSON, preset
//! contents); `--verbose` enables the verbose channel.

use console::{Style, Term};
use std::io;

/// Terminal writer honouring the verbosity flags.
#[derive(Debug, Clone)]
pub struct OutputManager {
    verbose: bool,
    quiet: bool,
    stdout: Term,
    stderr: Term,
}

impl OutputManager {
    /// Creates an output manager; `quiet` wins over `verbose`.
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            verbose: verbose && !quiet,
            quiet,
            stdout: Term::stdout(),
            stderr: Term::stderr(),
        }
    }

    /// True when `--quiet` was given.
    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    /// Prints a dimmed message in verbose mode only.
    pub fn verbose(&self, message: &str) -> io::Result<()> {
        if !self.verbose {
            return Ok(());
        }
        self.stdout
            .write_line(&Style::new().dim().apply_to(message).to_string())
    }

    /// Prints a plain line unless quiet.
    pub fn println(&self, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.stdout.write_line(message)
    }

    /// Prints a line even in quiet mode; used for requested data.
    pub fn data(&self, message: &str) -> io::Result<()> {
        self.stdout.write_line(message)
    }

    /// Prints a yellow warning to stderr unless quiet.
    pub fn warn(&self, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.stderr.write_line(&format!(
            "{} {}",
            Style::new().yellow().bold().apply_to("⚠"),
            Style::new().yellow().apply_to(message)
        ))
    }

    /// Prints a green success line unless quiet.
    pub fn success(&self, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.stdout.write_line(&format!(
            "{} {}",
            Style::new().green().bold().apply_to("✓"),
            message
        ))
    }

    /// Prints a red error line to stderr, even in quiet mode.
    pub fn error(&self, message: &str) -> io::Result<()> {
        self.stderr.write_line(&format!(
            "{} {}",
            Style::new().red().bold().apply_to("✗"),
            Style::new().red().apply_to(message)
        ))
    }

    /// Prints a cyan progress line unless quiet.
    pub fn progress(&self, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.stdout.write_line(&format!(
            "{} {}",
            Style::new().cyan().bold().apply_to("→"),
            message
        ))
    }

    /// Prints a bold section header unless quiet.
    pub fn section(&self, title: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.stdout
            .write_line(&Style::new().bold().underlined().apply_to(title).to_string())
    }

    /// Prints an indented line unless quiet.
    pub fn indent(&self, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.stdout.write_line(&format!("   {message}"))
    }

    /// Prints one line of a packaging transcript.
    ///
    /// Lines from a tool's stderr (`<tool> ERROR: ...`) and pipeline errors are
    /// highlighted.
    pub fn transcript_line(&self, line: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let style = if line.starts_with("ERROR:") || line.contains(" ERROR: ") {
            Style::new().red()
        } else if line.starts_with("WARNING:") {
            Style::new().yellow()
        } else if line.contains(": ") && !line.ends_with("...") {
            Style::new().dim()
        } else {
            Style::new()
        };
        self.stdout.write_line(&style.apply_to(line).to_string())
    }
}
