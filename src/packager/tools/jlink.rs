//! Minimized runtime image creation with jlink.

use crate::packager::{
    Error, Result,
    process::{self, LineSink, ToolCommand},
    utils::fs,
};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tokio_util::sync::CancellationToken;

/// Directory name of the runtime image inside the output directory.
pub const RUNTIME_DIR_NAME: &str = "runtime";

/// Where the runtime image for `output_dir` is written.
pub fn runtime_image_path(output_dir: &Path) -> PathBuf {
    output_dir.join(RUNTIME_DIR_NAME)
}

/// Builds the jlink invocation.
///
/// Modules are passed comma-joined in sorted order so identical module sets
/// always produce identical command lines.
pub fn jlink_command(jlink: &Path, modules: &BTreeSet<String>, runtime_path: &Path) -> ToolCommand {
    let module_list = modules
        .iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(",");

    ToolCommand::new(jlink)
        .arg("--add-modules")
        .arg(module_list)
        .arg("--output")
        .arg(runtime_path.display().to_string())
        .args(["--compress=2", "--no-header-files", "--no-man-pages"])
}

/// Creates a runtime image containing exactly `modules` under `output_dir`.
///
/// Any previous runtime image at the target path is deleted first; jlink
/// refuses to write into an existing directory.
///
/// # Errors
///
/// - [`Error::EmptyModuleSet`] when `modules` is empty (no process is spawned)
/// - [`Error::ToolUnavailable`] when jlink cannot be spawned
/// - [`Error::RuntimeBuildFailed`] when jlink exits non-zero
pub async fn build_runtime_image(
    jlink: &Path,
    output_dir: &Path,
    modules: &BTreeSet<String>,
    sink: &LineSink<'_>,
    cancel: Option<&CancellationToken>,
) -> Result<PathBuf> {
    if modules.is_empty() {
        return Err(Error::EmptyModuleSet);
    }

    let runtime_path = runtime_image_path(output_dir);
    if runtime_path.exists() {
        log::info!("Removing existing runtime image: {}", runtime_path.display());
    }
    fs::remove_dir_all(&runtime_path).await?;

    log::info!(
        "Building runtime image with {} modules at {}",
        modules.len(),
        runtime_path.display()
    );

    let command = jlink_command(jlink, modules, &runtime_path);
    match process::run(&command, sink, cancel).await? {
        0 => Ok(runtime_path),
        exit_code => Err(Error::RuntimeBuildFailed { exit_code }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packager::process::LogLine;

    fn modules(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn command_line_is_sorted_and_complete() {
        let command = jlink_command(
            Path::new("jlink"),
            &modules(&["java.sql", "java.base", "java.desktop"]),
            Path::new("/out/runtime"),
        );
        assert_eq!(
            command.arguments(),
            [
                "--add-modules",
                "java.base,java.desktop,java.sql",
                "--output",
                "/out/runtime",
                "--compress=2",
                "--no-header-files",
                "--no-man-pages"
            ]
        );
    }

    #[tokio::test]
    async fn empty_module_set_is_rejected_without_spawning() {
        let dir = tempfile::tempdir().unwrap();
        let err = build_runtime_image(
            Path::new("packaroo-no-such-tool-7f3a"),
            dir.path(),
            &BTreeSet::new(),
            &|_: &LogLine| {},
            None,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, Error::EmptyModuleSet));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn stale_runtime_is_removed_before_build() {
        let dir = tempfile::tempdir().unwrap();
        let stale = runtime_image_path(dir.path()).join("stale.txt");
        std::fs::create_dir_all(stale.parent().unwrap()).unwrap();
        std::fs::write(&stale, b"old").unwrap();

        // `true` accepts any arguments and exits 0 without creating anything
        let path = build_runtime_image(
            Path::new("true"),
            dir.path(),
            &modules(&["java.base"]),
            &|_: &LogLine| {},
            None,
        )
        .await
        .unwrap();
        assert_eq!(path, runtime_image_path(dir.path()));
        assert!(!stale.exists());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn non_zero_exit_is_runtime_build_failure() {
        let dir = tempfile::tempdir().unwrap();
        let err = build_runtime_image(
            Path::new("false"),
            dir.path(),
            &modules(&["java.base"]),
            &|_: &LogLine| {},
            None,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, Error::RuntimeBuildFailed { exit_code: 1 }));
    }
}
