//! Command line interface for packaroo.
//!
//! Parses arguments, builds the [`RuntimeConfig`] from the global flags and
//! dispatches to the subcommand.

pub mod args;
pub mod commands;
mod output;

pub use args::{Args, Command, RuntimeConfig};
pub use output::OutputManager;

use crate::error::Result;

/// Main CLI entry point; returns the process exit code.
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();
    run_with(&args).await
}

/// Executes already-parsed arguments.
pub async fn run_with(args: &Args) -> Result<i32> {
    let config = RuntimeConfig::from(args);
    config.verbose_println(&format!(
        "Using tools: java={} jdeps={} jlink={} jpackage={}",
        config.toolchain().java.display(),
        config.toolchain().jdeps.display(),
        config.toolchain().jlink.display(),
        config.toolchain().jpackage.display()
    ))?;

    match &args.command {
        Command::Analyze(analyze) => commands::analyze::execute(analyze, &config).await,
        Command::Package(package) => commands::package::execute(package, &config).await,
        Command::Tools => commands::tools::execute(&config).await,
        Command::Preset { action } => commands::preset::execute(action, &config).await,
    }
}
