//! Modules of the active Java runtime (`java --list-modules`).

use crate::packager::{
    Error, Result,
    process::{self, ToolCommand},
};
use std::collections::BTreeSet;
use std::path::Path;

/// Names of every module the runtime reports.
///
/// # Errors
///
/// [`Error::ToolUnavailable`] when `java` cannot be spawned and
/// [`Error::ToolFailed`] when it exits non-zero.
pub async fn list_modules(java: &Path) -> Result<BTreeSet<String>> {
    let command = ToolCommand::new(java).arg("--list-modules");
    let output = process::capture(&command).await?;

    if !output.success() {
        return Err(Error::ToolFailed {
            tool: command.tool_name(),
            exit_code: output.exit_code,
        });
    }

    let modules = parse_module_list(&output.stdout);
    log::debug!("Runtime reports {} modules", modules.len());
    Ok(modules)
}

/// Parses `name@version` lines; lines without `@` are ignored.
pub fn parse_module_list<S: AsRef<str>>(lines: &[S]) -> BTreeSet<String> {
    lines
        .iter()
        .map(|line| line.as_ref().trim())
        .filter_map(|line| line.split_once('@'))
        .map(|(name, _)| name.trim())
        .filter(|name| !name.is_empty())
        .map(String::from)
        .collect()
}
