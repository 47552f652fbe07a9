//! Packaroo - native installers for Java applications.
//!
//! This binary analyzes a JAR, optionally builds a minimized runtime and
//! produces an application image or installer with jpackage.

use packaroo::cli::{self, Args};
use std::process;

#[tokio::main]
async fn main() {
    let args = Args::parse_args();

    // Initialize logging; RUST_LOG overrides the default level
    let default_level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    // Run CLI and get exit code
    let exit_code = match cli::run_with(&args).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            if let Some(hint) = e.recovery_suggestion() {
                eprintln!("  {}", hint);
            }
            1
        }
    };

    process::exit(exit_code);
}
