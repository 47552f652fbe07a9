//! Packaging orchestration.
//!
//! [`Packager`] drives one run through its stages:
//!
//! ```text
//! Validating -> [BuildingRuntime] -> BuildingInstaller -> Done
//! ```
//!
//! The runtime stage only runs when minimization is enabled. Modules are taken
//! from the configuration as is; resolution happens during analysis.

use super::{
    result::PackagingResult,
    transcript::{LogSink, Transcript},
};
use crate::packager::{
    Error, Result,
    settings::{PackageConfiguration, TargetPlatform, Toolchain},
    tools::{jlink, jpackage},
    utils::fs,
};
use path_absolutize::Absolutize;
use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Instant;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Pipeline stage of a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Stage {
    Validating,
    BuildingRuntime,
    BuildingInstaller,
    Done,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Validating => "validating",
            Stage::BuildingRuntime => "building runtime",
            Stage::BuildingInstaller => "building installer",
            Stage::Done => "done",
        };
        f.write_str(name)
    }
}

/// Progress of a run, kept for failure reporting.
#[derive(Debug)]
struct RunState {
    stage: Stage,
    runtime_image: Option<PathBuf>,
}

impl RunState {
    fn enter(&mut self, stage: Stage) {
        log::info!("Packaging stage: {} -> {}", self.stage, stage);
        self.stage = stage;
    }
}

type ActiveOutputs = Arc<Mutex<HashSet<PathBuf>>>;

/// Claim on an output directory, released on drop.
struct OutputGuard {
    active: ActiveOutputs,
    key: PathBuf,
}

impl OutputGuard {
    fn acquire(active: &ActiveOutputs, output_dir: &Path) -> Result<Self> {
        let key = output_key(output_dir);

        let mut outputs = active.lock().unwrap_or_else(PoisonError::into_inner);
        if !outputs.insert(key.clone()) {
            return Err(Error::OutputDirectoryBusy(key));
        }

        Ok(Self {
            active: Arc::clone(active),
            key,
        })
    }
}

/// Identity of an output directory that may not exist yet.
///
/// The nearest existing ancestor is canonicalized so paths reaching the same
/// place through symlinks compare equal; missing components are appended.
fn output_key(output_dir: &Path) -> PathBuf {
    let absolute = output_dir
        .absolutize()
        .map(|path| path.into_owned())
        .unwrap_or_else(|_| output_dir.to_path_buf());

    let mut existing = absolute.as_path();
    let mut missing = Vec::new();
    loop {
        if let Ok(canonical) = std::fs::canonicalize(existing) {
            return missing
                .iter()
                .rev()
                .fold(canonical, |path, part| path.join(part));
        }
        match (existing.parent(), existing.file_name()) {
            (Some(parent), Some(name)) => {
                missing.push(name.to_os_string());
                existing = parent;
            }
            _ => return absolute.clone(),
        }
    }
}

impl Drop for OutputGuard {
    fn drop(&mut self) {
        self.active
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.key);
    }
}

/// Runs packaging pipelines against one toolchain.
///
/// Clones share the set of output directories in use and the cancellation
/// handle, so a clone handed to a background task can be cancelled from the
/// original.
///
/// # Examples
///
/// ```no_run
/// use packaroo::packager::{ConfigurationBuilder, Packager, Toolchain};
///
/// # async fn example() {
/// let config = ConfigurationBuilder::new()
///     .archive("build/libs/demo-1.0.jar")
///     .app_name("Demo")
///     .main_class("com.example.demo.Main")
///     .output_directory("dist")
///     .build();
///
/// let packager = Packager::new(Toolchain::detect());
/// let result = packager
///     .package_application(&config, &|line: &str| println!("{line}"))
///     .await;
/// println!("{}", result.message());
/// # }
/// ```
#[derive(Clone, Debug, Default)]
pub struct Packager {
    toolchain: Toolchain,
    active_outputs: ActiveOutputs,
    cancel: Arc<Mutex<CancellationToken>>,
}

impl Packager {
    /// Creates a packager using the given tools.
    pub fn new(toolchain: Toolchain) -> Self {
        Self {
            toolchain,
            ..Default::default()
        }
    }

    /// Tools this packager invokes.
    pub fn toolchain(&self) -> &Toolchain {
        &self.toolchain
    }

    /// Cancels every run currently in progress.
    ///
    /// A running tool is killed and its run ends with a failure result.
    /// Runs started afterwards are unaffected.
    pub fn cancel(&self) {
        let mut token = self.cancel.lock().unwrap_or_else(PoisonError::into_inner);
        token.cancel();
        *token = CancellationToken::new();
    }

    fn current_token(&self) -> CancellationToken {
        self.cancel
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Packages an application.
    ///
    /// Every line of the transcript is passed to `on_log` as it is produced.
    /// Never fails: all failures, including unexpected filesystem errors,
    /// come back as an unsuccessful [`PackagingResult`] carrying the logs
    /// collected so far.
    pub async fn package_application(
        &self,
        config: &PackageConfiguration,
        on_log: &LogSink<'_>,
    ) -> PackagingResult {
        let started = Instant::now();
        let transcript = Transcript::new(on_log);
        let mut state = RunState {
            stage: Stage::Validating,
            runtime_image: None,
        };

        let outcome = self.run_pipeline(config, &transcript, &mut state).await;
        state.enter(Stage::Done);

        let message = match &outcome {
            Ok(_) => None,
            Err(e) => {
                transcript.record(format!("ERROR: {e}"));
                Some(failure_message(e, &state))
            }
        };

        let elapsed = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        let logs = transcript.into_lines();

        match (outcome, message) {
            (Ok(output_path), _) => {
                log::info!("Packaging finished in {} ms", elapsed);
                PackagingResult::success(config.clone(), output_path, logs, elapsed)
            }
            (Err(e), message) => {
                log::warn!("Packaging failed: {}", e);
                let message = message.unwrap_or_else(|| format!("Packaging failed: {e}"));
                PackagingResult::failure(config.clone(), message, logs, elapsed)
            }
        }
    }

    /// Runs [`package_application`](Self::package_application) as a background task.
    pub fn spawn_packaging<F>(
        &self,
        config: PackageConfiguration,
        on_log: F,
    ) -> JoinHandle<PackagingResult>
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        let packager = self.clone();
        tokio::spawn(async move { packager.package_application(&config, &on_log).await })
    }

    async fn run_pipeline(
        &self,
        config: &PackageConfiguration,
        transcript: &Transcript<'_>,
        state: &mut RunState,
    ) -> Result<PathBuf> {
        log::info!("Packaging stage: {}", state.stage);
        config.validate()?;
        if config.minimize_runtime && config.modules.is_empty() {
            return Err(Error::EmptyModuleSet);
        }
        let output_dir = config
            .output_dir()
            .ok_or_else(|| Error::Validation("Output directory is required".to_string()))?;

        warn_on_foreign_format(config, transcript);

        let _guard = OutputGuard::acquire(&self.active_outputs, output_dir)?;
        let cancel = self.current_token();

        if fs::ensure_dir_all(output_dir).await? {
            transcript.record(format!("Created output directory: {}", output_dir.display()));
        }

        if config.minimize_runtime {
            check_cancelled(&cancel)?;
            state.enter(Stage::BuildingRuntime);
            transcript.record("Creating custom runtime with jlink...");

            let sink = transcript.tool_sink("jlink");
            let runtime = jlink::build_runtime_image(
                &self.toolchain.jlink,
                output_dir,
                &config.modules,
                &sink,
                Some(&cancel),
            )
            .await?;

            transcript.record(format!(
                "Custom runtime created successfully at: {}",
                runtime.display()
            ));
            state.runtime_image = Some(runtime);
        }

        check_cancelled(&cancel)?;
        state.enter(Stage::BuildingInstaller);
        transcript.record("Packaging application with jpackage...");

        let sink = transcript.tool_sink("jpackage");
        jpackage::build_installer(
            &self.toolchain.jpackage,
            config,
            state.runtime_image.as_deref(),
            &sink,
            Some(&cancel),
        )
        .await?;

        transcript.record("Application packaged successfully!");
        Ok(output_dir.to_path_buf())
    }
}

fn check_cancelled(token: &CancellationToken) -> Result<()> {
    if token.is_cancelled() {
        return Err(Error::Cancelled);
    }
    Ok(())
}

fn warn_on_foreign_format(config: &PackageConfiguration, transcript: &Transcript<'_>) {
    let format = config.output_format;
    if format.buildable_on_host() {
        return;
    }

    let wanted = format
        .native_platform()
        .map(TargetPlatform::display_name)
        .unwrap_or("another platform");
    let message = format!(
        "WARNING: {} is normally built on {}; jpackage on this host may reject it",
        format.display_name(),
        wanted
    );
    log::warn!("{}", message);
    transcript.record(message);
}

fn failure_message(error: &Error, state: &RunState) -> String {
    if error.is_validation() {
        return format!("Invalid configuration: {error}");
    }
    if matches!(error, Error::Cancelled) {
        return "Packaging was cancelled.".to_string();
    }
    match (&state.runtime_image, error) {
        (Some(runtime), Error::ToolFailed { .. } | Error::ToolUnavailable { .. }) => format!(
            "Runtime image was created at {}, but installer creation failed: {error}",
            runtime.display()
        ),
        _ => format!("Packaging failed: {error}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packager::ConfigurationBuilder;

    #[tokio::test]
    async fn validation_failure_spawns_nothing() {
        let packager = Packager::new(Toolchain {
            java: "packaroo-no-such-tool-7f3a".into(),
            jdeps: "packaroo-no-such-tool-7f3a".into(),
            jlink: "packaroo-no-such-tool-7f3a".into(),
            jpackage: "packaroo-no-such-tool-7f3a".into(),
        });
        let config = ConfigurationBuilder::new()
            .archive("/no/such/app.jar")
            .app_name("App")
            .build();

        let result = packager.package_application(&config, &|_: &str| {}).await;
        assert!(!result.is_success());
        assert!(result.message().starts_with("Invalid configuration: JAR file does not exist"));
        assert!(result.output_path().is_none());
        assert_eq!(result.logs().len(), 1);
    }

    #[test]
    fn output_guard_rejects_overlap_and_releases_on_drop() {
        let active = ActiveOutputs::default();
        let first = OutputGuard::acquire(&active, Path::new("dist/app")).unwrap();
        let err = OutputGuard::acquire(&active, Path::new("dist/../dist/app"))
            .err()
            .unwrap();
        assert!(matches!(err, Error::OutputDirectoryBusy(_)));
        drop(first);
        assert!(OutputGuard::acquire(&active, Path::new("dist/app")).is_ok());
    }

    #[cfg(unix)]
    #[test]
    fn output_guard_sees_through_symlinks() {
        let dir = tempfile::tempdir().unwrap();
        let real = dir.path().join("real");
        std::fs::create_dir(&real).unwrap();
        let link = dir.path().join("link");
        std::os::unix::fs::symlink(&real, &link).unwrap();

        let active = ActiveOutputs::default();
        let _first = OutputGuard::acquire(&active, &real.join("dist")).unwrap();
        let err = OutputGuard::acquire(&active, &link.join("dist")).err().unwrap();
        assert!(matches!(err, Error::OutputDirectoryBusy(_)));
    }

    #[test]
    fn partial_pipeline_message_mentions_runtime() {
        let state = RunState {
            stage: Stage::Done,
            runtime_image: Some(PathBuf::from("/out/runtime")),
        };
        let message = failure_message(
            &Error::ToolFailed {
                tool: "jpackage".into(),
                exit_code: 1,
            },
            &state,
        );
        assert!(message.contains("/out/runtime"));
        assert!(message.contains("jpackage failed with exit code: 1"));
    }
}
