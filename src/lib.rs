//! Native installer packaging for Java applications
//!
//! This library turns an executable JAR into:
//! - a self-contained application image
//! - Windows installers (.exe, .msi)
//! - macOS packages (.pkg, .dmg)
//! - Linux packages (.deb, .rpm)
//!
//! It works out which runtime modules the JAR needs, can build a minimized
//! runtime with jlink, and drives jpackage. It can be used both as a CLI tool
//! and as a library dependency.

pub mod cli;
pub mod error;
pub mod metadata;
pub mod packager;
pub mod presets;

// Re-export commonly used types
pub use error::{CliError, PackarooError, Result};
pub use packager::{
    Analyzer, DependencyAnalysis, PackageConfiguration, Packager, PackagingResult, Toolchain,
};
pub use presets::PresetStore;
