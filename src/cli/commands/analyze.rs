//! `packaroo analyze`: module and manifest report for a JAR.

use crate::cli::{RuntimeConfig, args::AnalyzeArgs};
use crate::error::Result;
use crate::packager::{Analyzer, DependencyAnalysis};
use std::collections::BTreeSet;

/// Runs the analysis and prints it. Exit code 1 when the JAR could not be analyzed.
pub async fn execute(args: &AnalyzeArgs, config: &RuntimeConfig) -> Result<i32> {
    config.verbose_println(&format!("Analyzing {}", args.jar.display()))?;

    let analyzer = Analyzer::new(config.toolchain().clone());
    let analysis = analyzer.analyze_archive(&args.jar).await;

    if args.json {
        config
            .output()
            .data(&serde_json::to_string_pretty(&analysis)?)?;
    } else {
        print_report(&analysis, config)?;
    }

    Ok(if analysis.success { 0 } else { 1 })
}

fn print_report(analysis: &DependencyAnalysis, config: &RuntimeConfig) -> std::io::Result<()> {
    if !analysis.success {
        return config.output().error(
            analysis
                .error_message
                .as_deref()
                .unwrap_or("Analysis failed"),
        );
    }

    config.section(&format!("Analysis of {}", analysis.archive_path.display()))?;
    if let Some(advisory) = &analysis.error_message {
        config.warn(advisory)?;
    }

    let or_none = |value: Option<&str>| value.unwrap_or("(none)").to_string();
    config.indent(&format!("Main class:   {}", or_none(analysis.main_class.as_deref())))?;
    if analysis.start_class.is_some() {
        config.indent(&format!("Start class:  {}", or_none(analysis.start_class.as_deref())))?;
    }
    config.indent(&format!("JavaFX:       {}", if analysis.gui_toolkit { "yes" } else { "no" }))?;

    if analysis.has_manifest_info() {
        config.section("Manifest")?;
        let manifest = &analysis.manifest;
        for (label, value) in [
            ("Title", &manifest.title),
            ("Version", &manifest.version),
            ("Vendor", &manifest.vendor),
            ("Description", &manifest.description),
        ] {
            if let Some(value) = value {
                config.indent(&format!("{label:<12} {value}"))?;
            }
        }
    }

    print_modules(config, "Required modules", &analysis.required_modules)?;
    if analysis.has_missing_modules() {
        print_modules(config, "Missing modules", &analysis.missing_modules)?;
    }
    if !analysis.unresolved_modules.is_empty() {
        print_modules(config, "Skipped (not in runtime)", &analysis.unresolved_modules)?;
    }
    config.verbose_println(&format!(
        "{} modules available in the active runtime",
        analysis.available_modules.len()
    ))?;

    let suggestion = analysis.suggest_configuration(None);
    config.section("Suggested configuration")?;
    config.indent(&format!("Name:         {}", suggestion.app_name))?;
    config.indent(&format!("Version:      {}", suggestion.version))?;
    config.indent(&format!("Vendor:       {}", suggestion.vendor))?;
    if let Some(output) = &suggestion.output_directory {
        config.indent(&format!("Output:       {}", output.display()))?;
    }
    Ok(())
}

fn print_modules(config: &RuntimeConfig, title: &str, modules: &BTreeSet<String>) -> std::io::Result<()> {
    config.section(&format!("{title} ({})", modules.len()))?;
    for module in modules {
        config.indent(module)?;
    }
    Ok(())
}
