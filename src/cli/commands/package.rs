//! `packaroo package`: assemble a configuration and run the pipeline.

use crate::cli::{RuntimeConfig, args::PackageArgs};
use crate::error::{CliError, Result};
use crate::packager::{Analyzer, PackageConfiguration, Packager, PackagingResult};
use crate::presets::{self, default_configuration};

/// Builds the configuration, packages, and reports. Exit code 0 iff the package was produced.
pub async fn execute(args: &PackageArgs, config: &RuntimeConfig) -> Result<i32> {
    let configuration = resolve_configuration(args, config).await?;
    config.verbose_println(&format!(
        "Configuration:\n{}",
        serde_json::to_string_pretty(&configuration)?
    ))?;

    let packager = Packager::new(config.toolchain().clone());

    let canceller = packager.clone();
    let ctrl_c = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            log::warn!("Interrupted, cancelling packaging");
            canceller.cancel();
        }
    });

    if !args.json {
        config.progress(&format!(
            "Packaging {} as {}",
            configuration.app_name,
            configuration.output_format.display_name()
        ))?;
    }

    let output = config.output().clone();
    let stream_lines = !args.json;
    let result = packager
        .package_application(&configuration, &move |line: &str| {
            if stream_lines {
                let _ = output.transcript_line(line);
            }
        })
        .await;
    ctrl_c.abort();

    report(&result, args.json, config)?;
    Ok(if result.is_success() { 0 } else { 1 })
}

/// File or preset first, analysis to fill gaps, explicit flags last.
async fn resolve_configuration(args: &PackageArgs, config: &RuntimeConfig) -> Result<PackageConfiguration> {
    let mut base = match (&args.config, &args.preset) {
        (Some(file), _) => presets::load_from_file(file).await?,
        (None, Some(name)) => config.presets().load(name).await?,
        (None, None) => default_configuration(),
    };

    if args.analyze {
        let archive = args
            .jar
            .clone()
            .or_else(|| base.archive.clone())
            .ok_or_else(|| CliError::MissingArgument {
                argument: "--jar (required by --analyze)".to_string(),
            })?;

        config.progress(&format!("Analyzing {}", archive.display()))?;
        let analysis = Analyzer::new(config.toolchain().clone())
            .analyze_archive(&archive)
            .await;
        if let Some(message) = &analysis.error_message {
            config.warn(message)?;
        }
        if analysis.success {
            let suggestion = analysis.suggest_configuration(args.output.as_deref());
            base = fill_gaps(base, suggestion);
        }
    }

    Ok(args.apply_to(base))
}

/// Copies suggested values into fields `base` leaves empty.
fn fill_gaps(mut base: PackageConfiguration, suggestion: PackageConfiguration) -> PackageConfiguration {
    fn fill(target: &mut String, value: String) {
        if target.trim().is_empty() {
            *target = value;
        }
    }

    if base.archive.is_none() {
        base.archive = suggestion.archive;
    }
    if base.output_directory.is_none() {
        base.output_directory = suggestion.output_directory;
    }
    fill(&mut base.app_name, suggestion.app_name);
    fill(&mut base.version, suggestion.version);
    fill(&mut base.main_class, suggestion.main_class);
    fill(&mut base.vendor, suggestion.vendor);
    fill(&mut base.description, suggestion.description);
    if base.modules.is_empty() && !suggestion.modules.is_empty() {
        base.modules = suggestion.modules;
        base.minimize_runtime = suggestion.minimize_runtime;
    }
    base
}

fn report(result: &PackagingResult, json: bool, config: &RuntimeConfig) -> Result<()> {
    if json {
        config.output().data(&serde_json::to_string_pretty(result)?)?;
        return Ok(());
    }

    if result.is_success() {
        config.success(result.message())?;
        if let Some(path) = result.output_path() {
            config.indent(&format!("Output: {}", path.display()))?;
        }
    } else {
        config.output().error(result.message())?;
    }
    config.verbose_println(&format!("Finished in {} ms", result.execution_time_ms()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn suggestions_only_fill_empty_fields() {
        let base = PackageConfiguration {
            app_name: "Chosen".into(),
            ..Default::default()
        };
        let suggestion = PackageConfiguration {
            archive: Some(PathBuf::from("app.jar")),
            app_name: "Suggested".into(),
            main_class: "com.acme.Main".into(),
            modules: ["java.base".to_string()].into(),
            minimize_runtime: true,
            ..Default::default()
        };

        let merged = fill_gaps(base, suggestion);
        assert_eq!(merged.app_name, "Chosen");
        assert_eq!(merged.main_class, "com.acme.Main");
        assert_eq!(merged.archive, Some(PathBuf::from("app.jar")));
        assert!(merged.minimize_runtime);
    }
}
