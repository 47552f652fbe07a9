//! External tool detection and availability checking.
//!
//! A tool counts as available when `<tool> --version` can be spawned and
//! exits with code zero. Used to disable features before a run is attempted.

use crate::packager::{
    process::{self, ToolCommand},
    settings::Toolchain,
};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Probes a tool by running it with `--version`.
///
/// Never fails: a missing executable, a spawn error, and a non-zero exit all
/// yield `false`.
pub async fn is_tool_available(program: impl AsRef<Path>) -> bool {
    let program = program.as_ref();

    match which::which(program) {
        Ok(path) => log::debug!("Found {} at: {}", program.display(), path.display()),
        Err(e) => {
            log::debug!("{} not found in PATH: {}", program.display(), e);
        }
    }

    match process::capture(&ToolCommand::new(program).arg("--version")).await {
        Ok(output) if output.success() => {
            log::info!(
                "✓ {} available: {}",
                program.display(),
                output
                    .stdout
                    .iter()
                    .chain(output.stderr.iter())
                    .find(|line| !line.trim().is_empty())
                    .map(|line| line.trim())
                    .unwrap_or("unknown version")
            );
            true
        }
        Ok(output) => {
            log::warn!(
                "{} found but --version check failed (exit code: {}). Stderr: {}",
                program.display(),
                output.exit_code,
                output.stderr.join(" ")
            );
            false
        }
        Err(e) => {
            log::warn!("{} not available: {}", program.display(), e);
            false
        }
    }
}

/// Availability of one toolchain entry.
#[derive(Clone, Debug, Serialize)]
pub struct ToolStatus {
    /// Tool role (`java`, `jdeps`, `jlink`, `jpackage`)
    pub name: &'static str,
    /// Executable that was probed
    pub program: PathBuf,
    /// Resolved location on `PATH`, if any
    pub resolved: Option<PathBuf>,
    /// Whether `--version` succeeded
    pub available: bool,
}

/// Probes every tool in the toolchain, in pipeline order.
pub async fn check_toolchain(toolchain: &Toolchain) -> Vec<ToolStatus> {
    let mut statuses = Vec::with_capacity(4);
    for (name, program) in toolchain.tools() {
        statuses.push(ToolStatus {
            name,
            program: program.to_path_buf(),
            resolved: which::which(program).ok(),
            available: is_tool_available(program).await,
        });
    }
    statuses
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_tool_is_unavailable() {
        assert!(!is_tool_available("packaroo-no-such-tool-7f3a").await);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn failing_version_check_is_unavailable() {
        // `false` ignores its arguments and exits 1
        assert!(!is_tool_available("false").await);
    }
}
