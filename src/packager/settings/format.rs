//! Output format and target platform tags.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Native artifact produced by jpackage.
///
/// # Examples
///
/// ```
/// use packaroo::packager::OutputFormat;
///
/// assert_eq!(OutputFormat::Deb.jpackage_type(), Some("deb"));
/// // app-image is jpackage's default, so no --type flag is emitted
/// assert_eq!(OutputFormat::AppImage.jpackage_type(), None);
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    /// Self-contained application directory (jpackage default)
    #[default]
    AppImage,
    /// Windows executable installer
    Exe,
    /// Windows MSI installer
    Msi,
    /// macOS installer package
    Pkg,
    /// macOS disk image
    Dmg,
    /// Debian package
    Deb,
    /// Red Hat package
    Rpm,
}

impl OutputFormat {
    /// Every format, in display order.
    pub const ALL: [OutputFormat; 7] = [
        OutputFormat::AppImage,
        OutputFormat::Exe,
        OutputFormat::Msi,
        OutputFormat::Pkg,
        OutputFormat::Dmg,
        OutputFormat::Deb,
        OutputFormat::Rpm,
    ];

    /// Tag accepted by the CLI and stored in presets.
    pub fn tag(self) -> &'static str {
        match self {
            OutputFormat::AppImage => "app-image",
            OutputFormat::Exe => "exe",
            OutputFormat::Msi => "msi",
            OutputFormat::Pkg => "pkg",
            OutputFormat::Dmg => "dmg",
            OutputFormat::Deb => "deb",
            OutputFormat::Rpm => "rpm",
        }
    }

    /// Value for jpackage's `--type` flag, `None` for the default app image.
    pub fn jpackage_type(self) -> Option<&'static str> {
        match self {
            OutputFormat::AppImage => None,
            other => Some(other.tag()),
        }
    }

    /// Human-readable name.
    pub fn display_name(self) -> &'static str {
        match self {
            OutputFormat::AppImage => "App Image",
            OutputFormat::Exe => "Windows Executable (.exe)",
            OutputFormat::Msi => "Windows Installer (.msi)",
            OutputFormat::Pkg => "macOS Package (.pkg)",
            OutputFormat::Dmg => "macOS Disk Image (.dmg)",
            OutputFormat::Deb => "Debian Package (.deb)",
            OutputFormat::Rpm => "Red Hat Package (.rpm)",
        }
    }

    /// Operating system the format can be built on, `None` when any host works.
    pub fn native_platform(self) -> Option<TargetPlatform> {
        match self {
            OutputFormat::AppImage => None,
            OutputFormat::Exe | OutputFormat::Msi => Some(TargetPlatform::Windows),
            OutputFormat::Pkg | OutputFormat::Dmg => Some(TargetPlatform::Macos),
            OutputFormat::Deb | OutputFormat::Rpm => Some(TargetPlatform::Linux),
        }
    }

    /// Whether jpackage on the current host can produce this format.
    pub fn buildable_on_host(self) -> bool {
        match self.native_platform() {
            None => true,
            Some(platform) => Some(platform) == TargetPlatform::host(),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        OutputFormat::ALL
            .into_iter()
            .find(|format| format.tag() == wanted)
            .ok_or_else(|| {
                let valid: Vec<&str> = OutputFormat::ALL.iter().map(|f| f.tag()).collect();
                format!(
                    "Invalid output format: {}. Valid formats: {}",
                    s,
                    valid.join(", ")
                )
            })
    }
}

/// Operating system the package is intended for.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetPlatform {
    /// Microsoft Windows
    Windows,
    /// Apple macOS
    Macos,
    /// Linux distributions
    Linux,
    /// Whatever the host is
    #[default]
    Current,
}

impl TargetPlatform {
    /// Platform of the running host, `None` on unsupported operating systems.
    pub fn host() -> Option<TargetPlatform> {
        if cfg!(target_os = "windows") {
            Some(TargetPlatform::Windows)
        } else if cfg!(target_os = "macos") {
            Some(TargetPlatform::Macos)
        } else if cfg!(target_os = "linux") {
            Some(TargetPlatform::Linux)
        } else {
            None
        }
    }

    /// Human-readable name.
    pub fn display_name(self) -> &'static str {
        match self {
            TargetPlatform::Windows => "Windows",
            TargetPlatform::Macos => "macOS",
            TargetPlatform::Linux => "Linux",
            TargetPlatform::Current => "Current Platform",
        }
    }
}

impl FromStr for TargetPlatform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "windows" => Ok(TargetPlatform::Windows),
            "macos" => Ok(TargetPlatform::Macos),
            "linux" => Ok(TargetPlatform::Linux),
            "current" => Ok(TargetPlatform::Current),
            _ => Err(format!(
                "Invalid target platform: {}. Valid platforms: windows, macos, linux, current",
                s
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jpackage_type_codes() {
        let codes: Vec<Option<&str>> = OutputFormat::ALL
            .iter()
            .map(|f| f.jpackage_type())
            .collect();
        assert_eq!(
            codes,
            vec![
                None,
                Some("exe"),
                Some("msi"),
                Some("pkg"),
                Some("dmg"),
                Some("deb"),
                Some("rpm")
            ]
        );
    }

    #[test]
    fn parses_tags_case_insensitively() {
        assert_eq!("DMG".parse::<OutputFormat>(), Ok(OutputFormat::Dmg));
        assert_eq!("app-image".parse::<OutputFormat>(), Ok(OutputFormat::AppImage));
        assert!("zip".parse::<OutputFormat>().is_err());
        assert_eq!("MacOS".parse::<TargetPlatform>(), Ok(TargetPlatform::Macos));
    }

    #[test]
    fn serde_uses_tags() {
        let json = serde_json::to_string(&OutputFormat::AppImage).unwrap();
        assert_eq!(json, "\"app-image\"");
        let platform: TargetPlatform = serde_json::from_str("\"linux\"").unwrap();
        assert_eq!(platform, TargetPlatform::Linux);
    }

    #[test]
    fn app_image_builds_anywhere() {
        assert!(OutputFormat::AppImage.buildable_on_host());
    }
}
