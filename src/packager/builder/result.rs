//! Outcome record of one packaging run.

use crate::packager::settings::PackageConfiguration;
use chrono::{DateTime, Local};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Result of [`Packager::package_application`](super::Packager::package_application).
///
/// Built once when the run finishes and never changed afterwards. Carries
/// the full ordered transcript whether the run succeeded or not.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackagingResult {
    success: bool,
    message: String,
    timestamp: DateTime<Local>,
    logs: Vec<String>,
    output_path: Option<PathBuf>,
    execution_time_ms: u64,
    configuration: PackageConfiguration,
}

impl PackagingResult {
    pub(crate) fn success(
        configuration: PackageConfiguration,
        output_path: PathBuf,
        logs: Vec<String>,
        execution_time_ms: u64,
    ) -> Self {
        Self {
            success: true,
            message: "Application packaged successfully!".to_string(),
            timestamp: Local::now(),
            logs,
            output_path: Some(output_path),
            execution_time_ms,
            configuration,
        }
    }

    pub(crate) fn failure(
        configuration: PackageConfiguration,
        message: String,
        logs: Vec<String>,
        execution_time_ms: u64,
    ) -> Self {
        Self {
            success: false,
            message,
            timestamp: Local::now(),
            logs,
            output_path: None,
            execution_time_ms,
            configuration,
        }
    }

    /// Whether the installer was produced.
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Human-readable summary.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// When the run finished.
    pub fn timestamp(&self) -> DateTime<Local> {
        self.timestamp
    }

    /// Every log line of the run, in order.
    pub fn logs(&self) -> &[String] {
        &self.logs
    }

    /// Output directory on success.
    pub fn output_path(&self) -> Option<&Path> {
        self.output_path.as_deref()
    }

    /// Wall-clock duration of the run in milliseconds.
    pub fn execution_time_ms(&self) -> u64 {
        self.execution_time_ms
    }

    /// Configuration the run was started with.
    pub fn configuration(&self) -> &PackageConfiguration {
        &self.configuration
    }
}
