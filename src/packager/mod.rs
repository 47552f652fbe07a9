//! JAR to native installer packaging.
//!
//! The pipeline drives four JDK tools:
//! - `java --list-modules` to learn which modules the runtime provides
//! - `jdeps` to learn which modules an archive needs
//! - `jlink` to build a minimized runtime image
//! - `jpackage` to build the installer
//!
//! # Example
//!
//! ```no_run
//! use packaroo::packager::{Analyzer, Packager, Toolchain};
//!
//! # async fn example() {
//! let toolchain = Toolchain::detect();
//! let analysis = Analyzer::new(toolchain.clone())
//!     .analyze_archive("build/libs/shop-1.4.0.jar")
//!     .await;
//!
//! let config = analysis.suggest_configuration(None);
//! let result = Packager::new(toolchain)
//!     .package_application(&config, &|line: &str| println!("{line}"))
//!     .await;
//! assert!(result.is_success(), "{}", result.message());
//! # }
//! ```
//!
//! # Module Organization
//!
//! - [`analysis`] - archive analysis and module resolution
//! - [`builder`] - [`Packager`] orchestration and tool detection
//! - [`process`] - subprocess harness with live line streaming
//! - [`settings`] - configuration record, formats, toolchain
//! - [`tools`] - per-tool command assembly
//! - [`utils`] - filesystem helpers

pub mod analysis;
pub mod builder;
pub mod error;
pub mod process;
pub mod settings;
pub mod tools;
pub mod utils;

pub use analysis::{Analyzer, DependencyAnalysis, suggested_modules};
pub use builder::{LogSink, Packager, PackagingResult, ToolStatus, check_toolchain, is_tool_available};
pub use error::{Context, Error, ErrorExt, Result};
pub use settings::{ConfigurationBuilder, OutputFormat, PackageConfiguration, TargetPlatform, Toolchain};
