//! Top-level error types for the command line.
//!
//! Library operations report [`crate::packager::Error`]; the CLI wraps those
//! together with argument and IO problems in [`PackarooError`].

use thiserror::Error;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, PackarooError>;

/// Main error type for CLI operations
#[derive(Error, Debug)]
pub enum PackarooError {
    /// CLI argument errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Packaging errors
    #[error("{0}")]
    Packaging(#[from] crate::packager::Error),
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Missing required argument
    #[error("Missing required argument: {argument}")]
    MissingArgument {
        /// Argument name
        argument: String,
    },
}

impl PackarooError {
    /// Hint printed under the error message.
    pub fn recovery_suggestion(&self) -> Option<&'static str> {
        match self {
            PackarooError::Packaging(crate::packager::Error::ToolUnavailable { .. }) => {
                Some("Install a JDK (17 or newer) and set JAVA_HOME or pass --java-home")
            }
            PackarooError::Cli(_) => Some("Run with --help to see the accepted arguments"),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_argument_suggests_help() {
        let err = PackarooError::from(CliError::MissingArgument {
            argument: "--jar".to_string(),
        });
        assert_eq!(err.to_string(), "CLI error: Missing required argument: --jar");
        assert!(err.recovery_suggestion().unwrap().contains("--help"));
    }

    #[test]
    fn packaging_errors_display_unwrapped() {
        let err = PackarooError::from(crate::packager::Error::Cancelled);
        assert_eq!(err.to_string(), crate::packager::Error::Cancelled.to_string());
        assert!(err.recovery_suggestion().is_none());
    }
}
