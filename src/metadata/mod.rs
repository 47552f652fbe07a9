//! Archive metadata discovery from a JAR file
//!
//! Reads the archive's entry list and manifest once and answers three
//! questions about it: which class starts the application, what the manifest
//! says about name/version/vendor/description, and whether JavaFX is bundled.
//!
//! The free functions ([`detect_entry_point`], [`extract_metadata`],
//! [`detect_gui_toolkit`]) never fail. A read error degrades to absent fields
//! and a warning in the log.

pub mod heuristics;
mod manifest;

pub use manifest::{MANIFEST_PATH, Manifest};

use crate::packager::{ErrorExt, Result};
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;

/// Entry-point classes declared by an archive.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryPoint {
    /// `Main-Class` attribute
    pub main_class: Option<String>,

    /// `Start-Class` attribute.
    ///
    /// Present in framework-launched archives (e.g. Spring Boot) where
    /// `Main-Class` is only a bootstrap launcher.
    pub start_class: Option<String>,
}

impl EntryPoint {
    /// Start class when present, main class otherwise.
    pub fn preferred(&self) -> Option<&str> {
        self.start_class
            .as_deref()
            .or(self.main_class.as_deref())
    }
}

/// Descriptive manifest attributes, each resolved by precedence.
///
/// Implementation-scoped attributes win over specification-scoped ones,
/// which win over bundle (OSGi) attributes.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestInfo {
    /// Application title
    pub title: Option<String>,
    /// Application version
    pub version: Option<String>,
    /// Vendor
    pub vendor: Option<String>,
    /// Description
    pub description: Option<String>,
}

impl ManifestInfo {
    /// Resolves the attributes from a parsed manifest.
    pub fn from_manifest(manifest: &Manifest) -> Self {
        let resolve = |names: [&str; 3]| {
            heuristics::first_non_blank(names.into_iter().map(|name| manifest.get(name)))
        };

        Self {
            title: resolve(["Implementation-Title", "Specification-Title", "Bundle-Name"]),
            version: resolve([
                "Implementation-Version",
                "Specification-Version",
                "Bundle-Version",
            ]),
            vendor: resolve([
                "Implementation-Vendor",
                "Specification-Vendor",
                "Bundle-Vendor",
            ]),
            description: resolve([
                "Implementation-Description",
                "Specification-Description",
                "Bundle-Description",
            ]),
        }
    }

    /// True when no attribute could be resolved.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.version.is_none()
            && self.vendor.is_none()
            && self.description.is_none()
    }
}

/// Entry names and manifest of one archive.
#[derive(Clone, Debug, Default)]
pub struct ArchiveInspector {
    entries: Vec<String>,
    manifest: Option<Manifest>,
}

impl ArchiveInspector {
    /// Opens the archive and reads its entry list and manifest.
    ///
    /// Blocking; run it on a blocking thread from async code.
    pub fn open(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path).fs_context("opening archive", path)?;
        let mut archive = zip::ZipArchive::new(file)?;

        let entries: Vec<String> = archive.file_names().map(String::from).collect();

        // Entry names are case-sensitive in the zip but tooling tolerates
        // lower-case manifests.
        let manifest_name = entries
            .iter()
            .find(|name| name.eq_ignore_ascii_case(MANIFEST_PATH))
            .cloned();

        let manifest = match manifest_name {
            Some(name) => {
                let mut entry = archive.by_name(&name)?;
                let mut bytes = Vec::new();
                entry
                    .read_to_end(&mut bytes)
                    .fs_context("reading manifest from", path)?;
                Some(Manifest::parse(&String::from_utf8_lossy(&bytes)))
            }
            None => {
                log::debug!("{} has no {}", path.display(), MANIFEST_PATH);
                None
            }
        };

        Ok(Self { entries, manifest })
    }

    /// Builds an inspector from already-known parts.
    pub fn from_parts(entries: Vec<String>, manifest: Option<Manifest>) -> Self {
        Self { entries, manifest }
    }

    /// Archive entry names, in archive order.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Parsed manifest, if the archive has one.
    pub fn manifest(&self) -> Option<&Manifest> {
        self.manifest.as_ref()
    }

    /// Declared entry points.
    pub fn entry_point(&self) -> EntryPoint {
        let Some(manifest) = &self.manifest else {
            return EntryPoint::default();
        };

        EntryPoint {
            main_class: manifest.get("Main-Class").map(|v| v.trim().to_string()),
            start_class: manifest.get("Start-Class").map(|v| v.trim().to_string()),
        }
    }

    /// Resolved descriptive attributes.
    pub fn manifest_info(&self) -> ManifestInfo {
        self.manifest
            .as_ref()
            .map(ManifestInfo::from_manifest)
            .unwrap_or_default()
    }

    /// True when any entry path carries the JavaFX marker.
    pub fn has_gui_toolkit(&self) -> bool {
        self.entries
            .iter()
            .any(|name| name.contains("javafx") || name.contains("JavaFX"))
    }
}

/// Opens an archive, logging and swallowing any failure.
pub fn inspect(path: &Path) -> Option<ArchiveInspector> {
    match ArchiveInspector::open(path) {
        Ok(inspector) => Some(inspector),
        Err(e) => {
            log::warn!("Could not inspect archive {}: {}", path.display(), e);
            None
        }
    }
}

/// Entry points declared by the archive; empty when it cannot be read.
pub fn detect_entry_point(path: &Path) -> EntryPoint {
    inspect(path)
        .map(|inspector| inspector.entry_point())
        .unwrap_or_default()
}

/// Manifest title/version/vendor/description; empty when it cannot be read.
pub fn extract_metadata(path: &Path) -> ManifestInfo {
    inspect(path)
        .map(|inspector| inspector.manifest_info())
        .unwrap_or_default()
}

/// Whether the archive embeds JavaFX; `false` when it cannot be read.
pub fn detect_gui_toolkit(path: &Path) -> bool {
    inspect(path).is_some_and(|inspector| inspector.has_gui_toolkit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn precedence_is_implementation_then_specification_then_bundle() {
        let manifest = Manifest::parse(
            "Specification-Title: Spec Title\n\
             Bundle-Name: Bundle Name\n\
             Implementation-Version: 1.2.3\n\
             Specification-Version: 9.9\n\
             Bundle-Vendor: Bundle Vendor\n\
             Implementation-Vendor:  \n\
             Bundle-Description: Does things\n",
        );
        let info = ManifestInfo::from_manifest(&manifest);
        assert_eq!(info.title.as_deref(), Some("Spec Title"));
        assert_eq!(info.version.as_deref(), Some("1.2.3"));
        assert_eq!(info.vendor.as_deref(), Some("Bundle Vendor"));
        assert_eq!(info.description.as_deref(), Some("Does things"));
    }

    #[test]
    fn start_class_is_preferred() {
        let inspector = ArchiveInspector::from_parts(
            vec![MANIFEST_PATH.to_string()],
            Some(Manifest::parse(
                "Main-Class: org.springframework.boot.loader.launch.JarLauncher\n\
                 Start-Class: com.acme.Shop\n",
            )),
        );
        let entry = inspector.entry_point();
        assert_eq!(
            entry.main_class.as_deref(),
            Some("org.springframework.boot.loader.launch.JarLauncher")
        );
        assert_eq!(entry.preferred(), Some("com.acme.Shop"));
    }

    #[test]
    fn gui_toolkit_marker() {
        let fx = ArchiveInspector::from_parts(
            vec!["javafx/scene/Node.class".into(), "com/acme/App.class".into()],
            None,
        );
        assert!(fx.has_gui_toolkit());

        let plain = ArchiveInspector::from_parts(vec!["com/acme/App.class".into()], None);
        assert!(!plain.has_gui_toolkit());
    }

    #[test]
    fn unreadable_archive_degrades() {
        let dir = tempfile::tempdir().unwrap();
        let bogus = dir.path().join("bogus.jar");
        std::fs::write(&bogus, b"not a zip").unwrap();

        assert_eq!(detect_entry_point(&bogus), EntryPoint::default());
        assert!(extract_metadata(&bogus).is_empty());
        assert!(!detect_gui_toolkit(&bogus));
        assert!(!detect_gui_toolkit(&dir.path().join("missing.jar")));
    }
}
