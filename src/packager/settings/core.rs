//! The packaging configuration record.

use super::{OutputFormat, TargetPlatform};
use crate::packager::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Everything needed to turn one archive into a native package.
///
/// Immutable input to [`Packager::package_application`](crate::packager::Packager::package_application).
/// Constructed field by field, through [`ConfigurationBuilder`](super::ConfigurationBuilder),
/// or deserialized from a preset. Field names serialize in camelCase so preset
/// files stay readable by other tooling.
///
/// # Examples
///
/// ```
/// use packaroo::packager::{ConfigurationBuilder, OutputFormat};
///
/// let config = ConfigurationBuilder::new()
///     .archive("build/libs/demo-1.0.jar")
///     .app_name("Demo")
///     .main_class("com.example.demo.Main")
///     .output_directory("dist")
///     .output_format(OutputFormat::Deb)
///     .build();
/// assert_eq!(config.output_format.jpackage_type(), Some("deb"));
/// assert!(!config.minimize_runtime);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PackageConfiguration {
    /// Application archive (JAR) to package.
    pub archive: Option<PathBuf>,

    /// Application name shown by the installer.
    pub app_name: String,

    /// Application version, omitted from jpackage when blank.
    pub version: String,

    /// Fully qualified entry-point class.
    pub main_class: String,

    /// Icon file; ignored when it does not exist on disk.
    pub icon: Option<PathBuf>,

    /// Destination directory for the runtime image and the installer.
    pub output_directory: Option<PathBuf>,

    /// Intended operating system.
    pub target_platform: TargetPlatform,

    /// Artifact kind requested from jpackage.
    pub output_format: OutputFormat,

    /// Build a minimized runtime image with jlink before packaging.
    pub minimize_runtime: bool,

    /// Runtime modules for the minimized image.
    pub modules: BTreeSet<String>,

    /// Options passed to the runtime at launch, in order.
    pub runtime_options: Vec<String>,

    /// Arguments passed to the application at launch, in order.
    pub app_arguments: Vec<String>,

    /// Vendor shown by the installer.
    pub vendor: String,

    /// Free-text description.
    pub description: String,

    /// Copyright notice.
    pub copyright: String,
}

impl PackageConfiguration {
    /// Checks the preconditions for a packaging run.
    ///
    /// Checks run in a fixed order and the first failure wins: archive
    /// existence, application name, entry-point class, output directory.
    pub fn validate(&self) -> Result<()> {
        match &self.archive {
            Some(archive) if archive.is_file() => {}
            Some(archive) => {
                return Err(Error::Validation(format!(
                    "JAR file does not exist: {}",
                    archive.display()
                )));
            }
            None => {
                return Err(Error::Validation("JAR file is required".to_string()));
            }
        }

        if is_blank(&self.app_name) {
            return Err(Error::Validation("Application name is required".to_string()));
        }

        if is_blank(&self.main_class) {
            return Err(Error::Validation("Main class is required".to_string()));
        }

        if self.output_directory.is_none() {
            return Err(Error::Validation("Output directory is required".to_string()));
        }

        Ok(())
    }

    /// Archive path, if set.
    pub fn archive_path(&self) -> Option<&Path> {
        self.archive.as_deref()
    }

    /// Output directory, if set.
    pub fn output_dir(&self) -> Option<&Path> {
        self.output_directory.as_deref()
    }
}

/// True when the string is empty or whitespace only.
pub(crate) fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}
