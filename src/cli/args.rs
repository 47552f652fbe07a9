//! Command line argument parsing and validation.
//!
//! This module provides CLI argument parsing using clap, plus the runtime
//! configuration derived from the global flags.

use crate::packager::{ConfigurationBuilder, OutputFormat, PackageConfiguration, TargetPlatform, Toolchain};
use crate::presets::PresetStore;
use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

/// Package a Java application archive as a native installer
#[derive(Parser, Debug)]
#[command(
    name = "packaroo",
    version,
    about = "Package a Java application archive as a native installer",
    long_about = "Turns an executable JAR into a native application image or installer.

Analyzes the JAR with jdeps, optionally builds a minimized runtime with jlink,
and runs jpackage with the assembled arguments.

Usage:
  packaroo analyze build/libs/shop-1.4.0.jar
  packaroo package --jar build/libs/shop-1.4.0.jar --analyze --format deb
  packaroo package --preset release-linux
  packaroo tools

Exit code 0 = the package was produced."
)]
pub struct Args {
    /// JDK installation whose bin/ directory provides the tools (defaults to JAVA_HOME, then PATH)
    #[arg(long, global = true, value_name = "DIR")]
    pub java_home: Option<PathBuf>,

    /// Directory holding named presets
    #[arg(long, global = true, value_name = "DIR", env = "PACKAROO_PRESET_DIR")]
    pub preset_dir: Option<PathBuf>,

    /// Show verbose output and debug logs
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only print errors and requested data
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Command to run
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Report the runtime modules and manifest data of a JAR
    Analyze(AnalyzeArgs),

    /// Build a native package
    Package(PackageArgs),

    /// Check that java, jdeps, jlink and jpackage can be run
    Tools,

    /// Manage saved configurations
    Preset {
        /// Preset operation
        #[command(subcommand)]
        action: PresetCommand,
    },
}

/// Arguments of `analyze`
#[derive(ClapArgs, Debug)]
pub struct AnalyzeArgs {
    /// JAR file to analyze
    #[arg(value_name = "JAR")]
    pub jar: PathBuf,

    /// Print the analysis as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments of `package`
#[derive(ClapArgs, Debug, Default)]
pub struct PackageArgs {
    /// Start from a configuration file
    #[arg(long, value_name = "FILE", conflicts_with = "preset")]
    pub config: Option<PathBuf>,

    /// Start from a saved preset
    #[arg(long, value_name = "NAME")]
    pub preset: Option<String>,

    /// Analyze the JAR and fill in fields the configuration leaves empty
    #[arg(long)]
    pub analyze: bool,

    /// JAR file to package
    #[arg(long, value_name = "JAR")]
    pub jar: Option<PathBuf>,

    /// Application name
    #[arg(long, value_name = "NAME")]
    pub name: Option<String>,

    /// Application version
    #[arg(long, value_name = "VERSION")]
    pub app_version: Option<String>,

    /// Fully qualified main class
    #[arg(long, value_name = "CLASS")]
    pub main_class: Option<String>,

    /// Icon file
    #[arg(long, value_name = "FILE")]
    pub icon: Option<PathBuf>,

    /// Output directory
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Target platform: windows, macos, linux, current
    #[arg(long, value_name = "PLATFORM")]
    pub platform: Option<TargetPlatform>,

    /// Output format: app-image, exe, msi, pkg, dmg, deb, rpm
    #[arg(short, long, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,

    /// Build a minimized runtime with jlink
    #[arg(long, conflicts_with = "no_minimize")]
    pub minimize: bool,

    /// Bundle the full runtime
    #[arg(long)]
    pub no_minimize: bool,

    /// Runtime module for the minimized image (repeatable, comma-separated)
    #[arg(long = "module", value_name = "MODULE", value_delimiter = ',')]
    pub modules: Vec<String>,

    /// Option passed to the JVM at launch (repeatable)
    #[arg(long = "java-option", value_name = "OPTION", allow_hyphen_values = true)]
    pub java_options: Vec<String>,

    /// Argument passed to the application at launch (repeatable)
    #[arg(long = "arg", value_name = "ARG", allow_hyphen_values = true)]
    pub app_arguments: Vec<String>,

    /// Vendor name
    #[arg(long, value_name = "VENDOR")]
    pub vendor: Option<String>,

    /// Description
    #[arg(long, value_name = "TEXT")]
    pub description: Option<String>,

    /// Copyright notice
    #[arg(long, value_name = "TEXT")]
    pub copyright: Option<String>,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

impl PackageArgs {
    /// Overlays the explicitly given flags onto `config`.
    pub fn apply_to(&self, config: PackageConfiguration) -> PackageConfiguration {
        let mut builder = ConfigurationBuilder::from_configuration(config);

        if let Some(jar) = &self.jar {
            builder = builder.archive(jar);
        }
        if let Some(name) = &self.name {
            builder = builder.app_name(name);
        }
        if let Some(version) = &self.app_version {
            builder = builder.version(version);
        }
        if let Some(class) = &self.main_class {
            builder = builder.main_class(class);
        }
        if let Some(icon) = &self.icon {
            builder = builder.icon(icon);
        }
        if let Some(output) = &self.output {
            builder = builder.output_directory(output);
        }
        if let Some(platform) = self.platform {
            builder = builder.target_platform(platform);
        }
        if let Some(format) = self.format {
            builder = builder.output_format(format);
        }
        if self.minimize {
            builder = builder.minimize_runtime(true);
        }
        if self.no_minimize {
            builder = builder.minimize_runtime(false);
        }
        builder = builder.modules(self.modules.iter().map(|m| m.trim()).filter(|m| !m.is_empty()));
        for option in &self.java_options {
            builder = builder.runtime_option(option);
        }
        for argument in &self.app_arguments {
            builder = builder.app_argument(argument);
        }
        if let Some(vendor) = &self.vendor {
            builder = builder.vendor(vendor);
        }
        if let Some(description) = &self.description {
            builder = builder.description(description);
        }
        if let Some(copyright) = &self.copyright {
            builder = builder.copyright(copyright);
        }

        builder.build()
    }
}

/// Preset subcommands
#[derive(Subcommand, Debug)]
pub enum PresetCommand {
    /// List saved presets
    List,

    /// Print a preset as JSON
    Show {
        /// Preset name
        name: String,
    },

    /// Save a configuration file as a preset
    Save {
        /// Preset name
        name: String,

        /// Configuration file to store (defaults to an empty configuration)
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
    },

    /// Delete a preset
    Delete {
        /// Preset name
        name: String,
    },
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

/// Configuration derived from the global flags
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    output: super::OutputManager,
    toolchain: Toolchain,
    presets: PresetStore,
}

impl From<&Args> for RuntimeConfig {
    fn from(args: &Args) -> Self {
        let toolchain = match &args.java_home {
            Some(home) => Toolchain::from_java_home(home),
            None => Toolchain::detect(),
        };
        let preset_dir = args
            .preset_dir
            .clone()
            .unwrap_or_else(PresetStore::default_location);

        Self {
            output: super::OutputManager::new(args.verbose, args.quiet),
            toolchain,
            presets: PresetStore::new(preset_dir),
        }
    }
}

impl RuntimeConfig {
    /// Get a reference to the output manager
    pub fn output(&self) -> &super::OutputManager {
        &self.output
    }

    /// JDK tools to drive
    pub fn toolchain(&self) -> &Toolchain {
        &self.toolchain
    }

    /// Preset storage
    pub fn presets(&self) -> &PresetStore {
        &self.presets
    }

    /// Print verbose message if in verbose mode
    pub fn verbose_println(&self, message: &str) -> std::io::Result<()> {
        self.output.verbose(message)
    }

    /// Print warning message if not in quiet mode
    pub fn warn(&self, message: &str) -> std::io::Result<()> {
        self.output.warn(message)
    }

    /// Print success message if not in quiet mode
    pub fn success(&self, message: &str) -> std::io::Result<()> {
        self.output.success(message)
    }

    /// Print progress message
    pub fn progress(&self, message: &str) -> std::io::Result<()> {
        self.output.progress(message)
    }

    /// Print section header
    pub fn section(&self, title: &str) -> std::io::Result<()> {
        self.output.section(title)
    }

    /// Print indented text
    pub fn indent(&self, message: &str) -> std::io::Result<()> {
        self.output.indent(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn package_flags_override_configuration() {
        let args = Args::try_parse_from([
            "packaroo",
            "package",
            "--jar",
            "app.jar",
            "--name",
            "Shop",
            "--format",
            "DEB",
            "--module",
            "java.base,java.sql",
            "--module",
            "java.xml",
            "--java-option",
            "-Xmx512m",
            "--minimize",
        ])
        .unwrap();

        let Command::Package(package) = args.command else {
            panic!("expected package command");
        };
        let base = PackageConfiguration {
            app_name: "Old".into(),
            vendor: "Kept".into(),
            ..Default::default()
        };
        let config = package.apply_to(base);
        assert_eq!(config.app_name, "Shop");
        assert_eq!(config.vendor, "Kept");
        assert_eq!(config.output_format, OutputFormat::Deb);
        assert_eq!(config.modules.len(), 3);
        assert_eq!(config.runtime_options, ["-Xmx512m"]);
        assert!(config.minimize_runtime);
    }

    #[test]
    fn config_and_preset_conflict() {
        let parsed = Args::try_parse_from([
            "packaroo", "package", "--config", "a.json", "--preset", "b",
        ]);
        assert!(parsed.is_err());
    }
}
