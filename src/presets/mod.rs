//! Named configuration presets.
//!
//! Each preset is one pretty-printed JSON file, `<directory>/<name>.json`,
//! holding a [`PackageConfiguration`] field for field. Loading a saved preset
//! gives back an equal configuration.

use crate::packager::{
    Error, ErrorExt, OutputFormat, PackageConfiguration, Result, TargetPlatform, utils::fs,
};
use std::io;
use std::path::{Path, PathBuf};

const PRESET_EXTENSION: &str = "json";

/// Directory-backed preset storage.
#[derive(Clone, Debug)]
pub struct PresetStore {
    directory: PathBuf,
}

impl PresetStore {
    /// Store rooted at `directory`; created on first save.
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    /// `~/.packaroo/presets`, or `.packaroo/presets` when there is no home directory.
    pub fn default_location() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_default()
            .join(".packaroo")
            .join("presets")
    }

    /// Directory holding the preset files.
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    fn preset_path(&self, name: &str) -> Result<PathBuf> {
        validate_name(name)?;
        Ok(self.directory.join(format!("{name}.{PRESET_EXTENSION}")))
    }

    /// Writes `config` under `name`, replacing any existing preset.
    pub async fn save(&self, name: &str, config: &PackageConfiguration) -> Result<()> {
        let path = self.preset_path(name)?;
        fs::ensure_dir_all(&self.directory).await?;
        save_to_file(&path, config).await?;
        log::info!("Saved preset '{}' to {}", name, path.display());
        Ok(())
    }

    /// Reads the preset called `name`.
    pub async fn load(&self, name: &str) -> Result<PackageConfiguration> {
        let path = self.preset_path(name)?;
        load_from_file(&path).await
    }

    /// Preset names, sorted case-insensitively. A missing directory means no presets.
    pub async fn list(&self) -> Result<Vec<String>> {
        let mut entries = match tokio::fs::read_dir(&self.directory).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e).fs_context("listing presets in", &self.directory),
        };

        let mut names = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .fs_context("listing presets in", &self.directory)?
        {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(PRESET_EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                names.push(stem.to_string());
            }
        }

        names.sort_by(|a, b| a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| a.cmp(b)));
        Ok(names)
    }

    /// Removes the preset called `name`. Deleting a missing preset succeeds.
    pub async fn delete(&self, name: &str) -> Result<()> {
        let path = self.preset_path(name)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                log::info!("Deleted preset '{}'", name);
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).fs_context("deleting preset", &path),
        }
    }
}

/// Writes a configuration to an arbitrary JSON file.
pub async fn save_to_file(path: &Path, config: &PackageConfiguration) -> Result<()> {
    let json = serde_json::to_string_pretty(config)?;
    tokio::fs::write(path, json)
        .await
        .fs_context("writing configuration", path)
}

/// Reads a configuration from an arbitrary JSON file.
pub async fn load_from_file(path: &Path) -> Result<PackageConfiguration> {
    let json = tokio::fs::read_to_string(path)
        .await
        .fs_context("reading configuration", path)?;
    Ok(serde_json::from_str(&json)?)
}

/// Starting point for a new configuration: host platform, app image, no minimization.
pub fn default_configuration() -> PackageConfiguration {
    PackageConfiguration {
        target_platform: TargetPlatform::Current,
        output_format: OutputFormat::AppImage,
        minimize_runtime: false,
        ..Default::default()
    }
}

fn validate_name(name: &str) -> Result<()> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(Error::Validation("Preset name is required".to_string()));
    }
    if trimmed != name
        || name.contains(['/', '\\'])
        || name == "."
        || name == ".."
    {
        return Err(Error::Validation(format!("Invalid preset name: {name:?}")));
    }
    Ok(())
}
