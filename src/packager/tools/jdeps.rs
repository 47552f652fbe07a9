//! Module dependency introspection with jdeps.

use crate::packager::{
    analysis::Introspection,
    builder::is_tool_available,
    process::{self, ToolCommand},
};
use std::path::Path;

/// Builds the `jdeps --print-module-deps` invocation for an archive.
///
/// `--ignore-missing-deps` keeps jdeps from aborting on fat archives whose
/// bundled third-party classes it cannot resolve. Multi-release archives
/// additionally need `--multi-release`.
pub fn module_deps_command(jdeps: &Path, archive: &Path, multi_release: bool) -> ToolCommand {
    let mut command = ToolCommand::new(jdeps)
        .arg("--print-module-deps")
        .arg("--ignore-missing-deps");
    if multi_release {
        command = command.args(["--multi-release", "base"]);
    }
    command.arg(archive.display().to_string())
}

/// Asks jdeps which modules the archive depends on.
///
/// Never fails; every failure mode is encoded in the returned [`Introspection`].
pub async fn print_module_deps(jdeps: &Path, archive: &Path, multi_release: bool) -> Introspection {
    if !is_tool_available(jdeps).await {
        log::warn!("jdeps is not available, using default module set");
        return Introspection::Unavailable;
    }

    let command = module_deps_command(jdeps, archive, multi_release);
    let output = match process::capture(&command).await {
        Ok(output) => output,
        Err(e) => {
            log::warn!("jdeps could not be run: {}", e);
            return Introspection::Unavailable;
        }
    };

    for line in &output.stderr {
        log::debug!("jdeps stderr: {}", line);
    }

    if !output.success() {
        log::warn!("jdeps exited with code {}", output.exit_code);
        return Introspection::Failed {
            exit_code: output.exit_code,
        };
    }

    Introspection::Modules(parse_module_deps(&output.stdout))
}

/// Splits jdeps' comma-separated module list, skipping diagnostics.
pub fn parse_module_deps<S: AsRef<str>>(lines: &[S]) -> Vec<String> {
    let mut modules = Vec::new();
    for line in lines {
        let line = line.as_ref().trim();
        if line.is_empty()
            || line.starts_with("Error:")
            || line.starts_with("Warning:")
            || line.contains("not found")
        {
            continue;
        }
        modules.extend(
            line.split(',')
                .map(str::trim)
                .filter(|module| !module.is_empty())
                .map(String::from),
        );
    }
    modules
}
