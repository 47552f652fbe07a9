//! Error types for the packaging pipeline.
//!
//! [`Error`] encodes every way a pipeline step can fail. The orchestrator turns
//! these into failed [`PackagingResult`](super::PackagingResult)s, so callers of
//! the public operations only ever see them through result messages.

use std::path::{Path, PathBuf};

/// Result type alias for packaging operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced by the packaging pipeline.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Caller-supplied configuration violates a precondition.
    ///
    /// Always reported before any subprocess is spawned.
    #[error("{0}")]
    Validation(String),

    /// An external tool could not be located or spawned.
    #[error("{tool} is not available: {source}")]
    ToolUnavailable {
        /// Program that failed to start
        tool: String,
        /// Underlying spawn error
        #[source]
        source: std::io::Error,
    },

    /// An external tool ran but exited non-zero.
    #[error("{tool} failed with exit code: {exit_code}")]
    ToolFailed {
        /// Program that failed
        tool: String,
        /// Exit code reported by the process (-1 when killed by a signal)
        exit_code: i32,
    },

    /// The runtime minimization tool exited non-zero.
    #[error("jlink failed with exit code: {exit_code}")]
    RuntimeBuildFailed {
        /// Exit code reported by jlink
        exit_code: i32,
    },

    /// A runtime image was requested with no modules.
    #[error("cannot build a runtime image without modules")]
    EmptyModuleSet,

    /// Another run is already targeting this output directory.
    #[error("another packaging run is already using output directory {}", .0.display())]
    OutputDirectoryBusy(PathBuf),

    /// The run was cancelled while a tool was executing.
    #[error("packaging was cancelled")]
    Cancelled,

    /// Filesystem operation failed.
    #[error("{context} {}: {source}", .path.display())]
    Fs {
        /// What was being attempted
        context: String,
        /// Path involved
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// IO error without path context.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Archive could not be read as a zip container.
    #[error("archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Anything else.
    #[error("{0}")]
    GenericError(String),
}

impl Error {
    /// Exit code of the failed tool, if the error came from a process exit.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Error::ToolFailed { exit_code, .. } | Error::RuntimeBuildFailed { exit_code } => {
                Some(*exit_code)
            }
            _ => None,
        }
    }

    /// True for errors raised before any process was spawned.
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_) | Error::EmptyModuleSet)
    }
}

/// Adds filesystem context to IO results.
pub trait ErrorExt<T> {
    /// Wraps an IO error with a description of the operation and the path.
    fn fs_context(self, context: &str, path: impl AsRef<Path>) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, std::io::Error> {
    fn fs_context(self, context: &str, path: impl AsRef<Path>) -> Result<T> {
        self.map_err(|source| Error::Fs {
            context: context.to_string(),
            path: path.as_ref().to_path_buf(),
            source,
        })
    }
}

/// Converts options and foreign results into [`Error::GenericError`].
pub trait Context<T> {
    /// Attaches a message, producing a packaging error on failure.
    fn context<C: std::fmt::Display>(self, context: C) -> Result<T>;
}

impl<T> Context<T> for Option<T> {
    fn context<C: std::fmt::Display>(self, context: C) -> Result<T> {
        self.ok_or_else(|| Error::GenericError(context.to_string()))
    }
}

impl<T, E: std::fmt::Display> Context<T> for std::result::Result<T, E> {
    fn context<C: std::fmt::Display>(self, context: C) -> Result<T> {
        self.map_err(|e| Error::GenericError(format!("{context}: {e}")))
    }
}
