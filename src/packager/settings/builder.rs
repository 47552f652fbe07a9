//! Builder for constructing a [`PackageConfiguration`].

use super::{OutputFormat, PackageConfiguration, TargetPlatform};
use std::path::Path;

/// Fluent builder for [`PackageConfiguration`].
///
/// Nothing is validated here; the orchestrator validates when a run starts so
/// that partially filled configurations can be stored as presets.
#[derive(Debug, Default)]
pub struct ConfigurationBuilder {
    config: PackageConfiguration,
}

impl ConfigurationBuilder {
    /// Creates a builder with default values.
    pub fn new() -> Self {
        Default::default()
    }

    /// Starts from an existing configuration.
    pub fn from_configuration(config: PackageConfiguration) -> Self {
        Self { config }
    }

    /// Sets the application archive.
    pub fn archive<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config.archive = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the application name.
    pub fn app_name(mut self, name: impl Into<String>) -> Self {
        self.config.app_name = name.into();
        self
    }

    /// Sets the application version.
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.config.version = version.into();
        self
    }

    /// Sets the entry-point class.
    pub fn main_class(mut self, class: impl Into<String>) -> Self {
        self.config.main_class = class.into();
        self
    }

    /// Sets the icon file.
    pub fn icon<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config.icon = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the output directory.
    pub fn output_directory<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config.output_directory = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the target platform.
    pub fn target_platform(mut self, platform: TargetPlatform) -> Self {
        self.config.target_platform = platform;
        self
    }

    /// Sets the output format.
    pub fn output_format(mut self, format: OutputFormat) -> Self {
        self.config.output_format = format;
        self
    }

    /// Enables or disables the jlink runtime image.
    pub fn minimize_runtime(mut self, enabled: bool) -> Self {
        self.config.minimize_runtime = enabled;
        self
    }

    /// Adds runtime modules.
    pub fn modules<I, S>(mut self, modules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config
            .modules
            .extend(modules.into_iter().map(Into::into));
        self
    }

    /// Appends a runtime option.
    pub fn runtime_option(mut self, option: impl Into<String>) -> Self {
        self.config.runtime_options.push(option.into());
        self
    }

    /// Appends an application argument.
    pub fn app_argument(mut self, argument: impl Into<String>) -> Self {
        self.config.app_arguments.push(argument.into());
        self
    }

    /// Sets the vendor.
    pub fn vendor(mut self, vendor: impl Into<String>) -> Self {
        self.config.vendor = vendor.into();
        self
    }

    /// Sets the description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.config.description = description.into();
        self
    }

    /// Sets the copyright notice.
    pub fn copyright(mut self, copyright: impl Into<String>) -> Self {
        self.config.copyright = copyright.into();
        self
    }

    /// Finishes the configuration.
    pub fn build(self) -> PackageConfiguration {
        self.config
    }
}
