//! Native installer creation with jpackage.

use crate::packager::{
    Error, Result,
    process::{self, LineSink, ToolCommand},
    settings::{PackageConfiguration, is_blank},
};
use std::path::Path;
use tokio_util::sync::CancellationToken;

/// Assembles jpackage's argument list from a configuration.
///
/// Mandatory flags come first (`--input`, `--main-jar`, `--main-class`,
/// `--name`, `--dest`), followed by optional flags that are only emitted when
/// their value is non-blank. The icon and runtime image are additionally
/// skipped when they do not exist on disk.
///
/// # Errors
///
/// [`Error::Validation`] when the archive or output directory is unset.
pub fn installer_arguments(
    config: &PackageConfiguration,
    runtime_image: Option<&Path>,
) -> Result<Vec<String>> {
    let archive = config
        .archive_path()
        .ok_or_else(|| Error::Validation("JAR file is required".to_string()))?;
    let output_dir = config
        .output_dir()
        .ok_or_else(|| Error::Validation("Output directory is required".to_string()))?;

    let input_dir = match archive.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let main_jar = archive
        .file_name()
        .ok_or_else(|| {
            Error::Validation(format!("JAR path has no file name: {}", archive.display()))
        })?
        .to_string_lossy()
        .into_owned();

    let mut args = vec![
        "--input".to_string(),
        input_dir.display().to_string(),
        "--main-jar".to_string(),
        main_jar,
        "--main-class".to_string(),
        config.main_class.trim().to_string(),
        "--name".to_string(),
        config.app_name.trim().to_string(),
        "--dest".to_string(),
        output_dir.display().to_string(),
    ];

    let mut push_text = |flag: &str, value: &str| {
        if !is_blank(value) {
            args.push(flag.to_string());
            args.push(value.trim().to_string());
        }
    };

    push_text("--app-version", &config.version);

    let icon = config
        .icon
        .as_deref()
        .filter(|icon| icon.exists())
        .map(|icon| icon.display().to_string())
        .unwrap_or_default();
    push_text("--icon", &icon);

    push_text("--vendor", &config.vendor);
    push_text("--description", &config.description);
    push_text("--copyright", &config.copyright);
    push_text(
        "--type",
        config.output_format.jpackage_type().unwrap_or_default(),
    );

    let runtime = runtime_image
        .filter(|path| path.exists())
        .map(|path| path.display().to_string())
        .unwrap_or_default();
    push_text("--runtime-image", &runtime);

    push_text("--java-options", &config.runtime_options.join(" "));
    push_text("--arguments", &config.app_arguments.join(" "));

    Ok(args)
}

/// Builds the full jpackage invocation.
pub fn jpackage_command(
    jpackage: &Path,
    config: &PackageConfiguration,
    runtime_image: Option<&Path>,
) -> Result<ToolCommand> {
    Ok(ToolCommand::new(jpackage).args(installer_arguments(config, runtime_image)?))
}

/// Runs jpackage; succeeds iff it exits with code zero.
///
/// # Errors
///
/// - [`Error::ToolUnavailable`] when jpackage cannot be spawned
/// - [`Error::ToolFailed`] when it exits non-zero
pub async fn build_installer(
    jpackage: &Path,
    config: &PackageConfiguration,
    runtime_image: Option<&Path>,
    sink: &LineSink<'_>,
    cancel: Option<&CancellationToken>,
) -> Result<()> {
    let command = jpackage_command(jpackage, config, runtime_image)?;
    log::info!(
        "Building {} for {}",
        config.output_format.display_name(),
        config.app_name.trim()
    );
    process::run_checked(&command, sink, cancel).await
}
