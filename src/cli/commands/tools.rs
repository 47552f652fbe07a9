//! `packaroo tools`: JDK tool availability.

use crate::cli::RuntimeConfig;
use crate::error::Result;
use crate::packager::check_toolchain;

/// Probes each tool. Exit code 0 only when all four can be run.
pub async fn execute(config: &RuntimeConfig) -> Result<i32> {
    config.section("JDK tools")?;

    let statuses = check_toolchain(config.toolchain()).await;
    for status in &statuses {
        let location = status
            .resolved
            .as_ref()
            .unwrap_or(&status.program)
            .display()
            .to_string();
        if status.available {
            config.success(&format!("{:<9} {}", status.name, location))?;
        } else {
            config
                .output()
                .error(&format!("{:<9} not available ({})", status.name, location))?;
        }
    }

    if statuses.iter().all(|status| status.available) {
        return Ok(0);
    }

    if statuses
        .iter()
        .any(|status| status.name == "jdeps" && !status.available)
    {
        config.warn("Without jdeps, analysis falls back to a default module set")?;
    }
    config.warn("Install a JDK (17 or newer) and set JAVA_HOME or pass --java-home")?;
    Ok(1)
}
