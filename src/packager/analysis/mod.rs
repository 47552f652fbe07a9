//! Archive dependency analysis.
//!
//! [`Analyzer::analyze_archive`] combines archive inspection, the runtime's
//! module list and jdeps output into a [`DependencyAnalysis`]. It never fails:
//! every problem is recorded in the result's `success` flag and
//! `error_message`.

mod resolver;

pub use resolver::{
    DEFAULT_MODULES, ESSENTIAL_GUI_MODULES, FallbackReason, Introspection, Resolution,
    SUGGESTED_MODULES, is_unreliable_module, resolve_modules, suggested_modules,
};

use crate::metadata::{self, ArchiveInspector, ManifestInfo, heuristics};
use crate::packager::{
    settings::{ConfigurationBuilder, PackageConfiguration, Toolchain},
    tools::{java, jdeps},
};
use path_absolutize::Absolutize;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tokio::task::JoinHandle;

/// What an archive needs to run, and what its manifest says about it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyAnalysis {
    /// False only when the archive itself could not be analyzed
    pub success: bool,
    /// Archive that was analyzed
    pub archive_path: PathBuf,
    /// Modules for the runtime image
    pub required_modules: BTreeSet<String>,
    /// Modules the active runtime provides
    pub available_modules: BTreeSet<String>,
    /// Required but not available; informational only
    pub missing_modules: BTreeSet<String>,
    /// Reported by jdeps but dropped as unavailable
    pub unresolved_modules: BTreeSet<String>,
    /// `Main-Class` from the manifest
    pub main_class: Option<String>,
    /// `Start-Class` from the manifest
    pub start_class: Option<String>,
    /// Title, version, vendor and description from the manifest
    pub manifest: ManifestInfo,
    /// Whether the archive embeds JavaFX
    pub gui_toolkit: bool,
    /// Failure reason, or an advisory when default modules were substituted
    pub error_message: Option<String>,
}

impl DependencyAnalysis {
    /// Failed analysis with no modules.
    pub fn failure(archive_path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            archive_path: archive_path.into(),
            error_message: Some(message.into()),
            ..Default::default()
        }
    }

    /// True when at least one module is required.
    pub fn has_required_modules(&self) -> bool {
        !self.required_modules.is_empty()
    }

    /// True when some required module is unavailable.
    pub fn has_missing_modules(&self) -> bool {
        !self.missing_modules.is_empty()
    }

    /// True when the manifest contributed any descriptive attribute.
    pub fn has_manifest_info(&self) -> bool {
        !self.manifest.is_empty()
    }

    /// Start class when present, main class otherwise.
    pub fn preferred_entry_point(&self) -> Option<&str> {
        self.start_class.as_deref().or(self.main_class.as_deref())
    }

    /// Pre-fills a configuration from this analysis.
    ///
    /// Name and version come from the archive file name unless the manifest
    /// provides them. The vendor comes from the manifest, or failing that from
    /// the entry-point package. The output directory is
    /// `<output_base>/<Name>BuildOutput`, where `output_base` defaults to the
    /// archive's directory. Minimization is enabled when modules were resolved.
    pub fn suggest_configuration(&self, output_base: Option<&Path>) -> PackageConfiguration {
        let file_name = self
            .archive_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        let app_name = heuristics::first_non_blank([
            self.manifest
                .title
                .as_deref()
                .map(heuristics::format_application_name)
                .as_deref(),
            heuristics::app_name_from_file_name(&file_name).as_deref(),
        ])
        .unwrap_or_default();

        let version = heuristics::first_non_blank([
            self.manifest.version.as_deref(),
            heuristics::version_from_file_name(&file_name).as_deref(),
        ])
        .unwrap_or_default();

        let main_class = self.preferred_entry_point().unwrap_or_default().to_string();

        let vendor = heuristics::first_non_blank([
            self.manifest.vendor.as_deref(),
            heuristics::vendor_from_class(&main_class).as_deref(),
        ])
        .unwrap_or_default();

        let base = output_base
            .map(Path::to_path_buf)
            .unwrap_or_else(|| default_output_base(&self.archive_path));
        let folder = heuristics::output_folder_name(&app_name)
            .unwrap_or_else(|| "BuildOutput".to_string());

        ConfigurationBuilder::new()
            .archive(&self.archive_path)
            .app_name(app_name)
            .version(version)
            .main_class(main_class)
            .vendor(vendor)
            .description(self.manifest.description.clone().unwrap_or_default())
            .output_directory(base.join(folder))
            .modules(self.required_modules.iter().cloned())
            .minimize_runtime(self.has_required_modules())
            .build()
    }
}

/// Base directory for suggested build output.
///
/// jpackage copies everything next to the archive into the application, so the
/// base must not lie inside the archive's directory. Desktop, home and the
/// working directory are tried in that order.
fn default_output_base(archive: &Path) -> PathBuf {
    let archive_dir = archive
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let archive_dir = absolute(archive_dir);

    [
        dirs::desktop_dir(),
        dirs::home_dir(),
        std::env::current_dir().ok(),
    ]
    .into_iter()
    .flatten()
    .map(|candidate| absolute(&candidate))
    .find(|candidate| !candidate.starts_with(&archive_dir))
    .or_else(|| archive_dir.parent().map(Path::to_path_buf))
    .unwrap_or(archive_dir)
}

fn absolute(path: &Path) -> PathBuf {
    path.absolutize()
        .map(|path| path.into_owned())
        .unwrap_or_else(|_| path.to_path_buf())
}

/// Runs dependency analyses against one toolchain.
#[derive(Clone, Debug, Default)]
pub struct Analyzer {
    toolchain: Toolchain,
}

impl Analyzer {
    /// Creates an analyzer using the given tools.
    pub fn new(toolchain: Toolchain) -> Self {
        Self { toolchain }
    }

    /// Tools this analyzer invokes.
    pub fn toolchain(&self) -> &Toolchain {
        &self.toolchain
    }

    /// Modules of the active runtime; empty when `java` cannot be queried.
    pub async fn available_modules(&self) -> BTreeSet<String> {
        match java::list_modules(&self.toolchain.java).await {
            Ok(modules) => modules,
            Err(e) => {
                log::warn!("Could not list runtime modules: {}", e);
                BTreeSet::new()
            }
        }
    }

    /// Analyzes an archive.
    ///
    /// Only a missing archive makes the result unsuccessful. A missing or
    /// failing jdeps falls back to the default module set and leaves an
    /// advisory in `error_message`.
    pub async fn analyze_archive(&self, path: impl AsRef<Path>) -> DependencyAnalysis {
        let path = path.as_ref();
        log::info!("Analyzing archive: {}", path.display());

        if !path.is_file() {
            return DependencyAnalysis::failure(
                path,
                format!("JAR file does not exist: {}", path.display()),
            );
        }

        let inspected = {
            let path = path.to_path_buf();
            match tokio::task::spawn_blocking(move || metadata::inspect(&path)).await {
                Ok(inspector) => inspector,
                Err(e) => {
                    log::warn!("Archive inspection task failed: {}", e);
                    None
                }
            }
        };
        let inspector = inspected.unwrap_or_else(|| ArchiveInspector::from_parts(Vec::new(), None));

        let entry_point = inspector.entry_point();
        let gui_toolkit = inspector.has_gui_toolkit();
        let multi_release = inspector
            .manifest()
            .and_then(|manifest| manifest.get("Multi-Release"))
            .is_some_and(|value| value.trim().eq_ignore_ascii_case("true"));

        let available = self.available_modules().await;
        let introspection = jdeps::print_module_deps(&self.toolchain.jdeps, path, multi_release).await;
        let resolution = resolve_modules(&introspection, &available, gui_toolkit);

        let error_message = resolution.fallback.map(|reason| {
            let advisory = reason.advisory();
            log::warn!("{}", advisory);
            advisory
        });

        log::info!(
            "Resolved {} required modules ({} missing)",
            resolution.required.len(),
            resolution.missing.len()
        );

        DependencyAnalysis {
            success: true,
            archive_path: path.to_path_buf(),
            required_modules: resolution.required,
            available_modules: available,
            missing_modules: resolution.missing,
            unresolved_modules: resolution.unresolved,
            main_class: entry_point.main_class,
            start_class: entry_point.start_class,
            manifest: inspector.manifest_info(),
            gui_toolkit,
            error_message,
        }
    }

    /// Runs [`analyze_archive`](Self::analyze_archive) as a background task.
    pub fn spawn_analysis(&self, path: PathBuf) -> JoinHandle<DependencyAnalysis> {
        let analyzer = self.clone();
        tokio::spawn(async move { analyzer.analyze_archive(&path).await })
    }
}
