//! Locations of the JDK tools the pipeline drives.

use std::path::{Path, PathBuf};

/// Executables used by analysis and packaging.
///
/// Bare names are resolved through `PATH` when spawned. Pointing a field at a
/// different program (a wrapper script, another JDK) changes which binary the
/// pipeline runs without touching any other code.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toolchain {
    /// Launcher used to list the runtime's modules
    pub java: PathBuf,
    /// Dependency introspection tool
    pub jdeps: PathBuf,
    /// Runtime minimization tool
    pub jlink: PathBuf,
    /// Native packaging tool
    pub jpackage: PathBuf,
}

impl Default for Toolchain {
    fn default() -> Self {
        Self {
            java: PathBuf::from("java"),
            jdeps: PathBuf::from("jdeps"),
            jlink: PathBuf::from("jlink"),
            jpackage: PathBuf::from("jpackage"),
        }
    }
}

impl Toolchain {
    /// Tools inside a JDK installation (`<home>/bin/<tool>`).
    pub fn from_java_home<P: AsRef<Path>>(home: P) -> Self {
        let bin = home.as_ref().join("bin");
        let tool = |name: &str| {
            let mut path = bin.join(name);
            if cfg!(target_os = "windows") {
                path.set_extension("exe");
            }
            path
        };

        Self {
            java: tool("java"),
            jdeps: tool("jdeps"),
            jlink: tool("jlink"),
            jpackage: tool("jpackage"),
        }
    }

    /// Uses `JAVA_HOME` when it names a JDK directory, `PATH` otherwise.
    pub fn detect() -> Self {
        match std::env::var_os("JAVA_HOME") {
            Some(home) if Path::new(&home).join("bin").is_dir() => {
                log::debug!("Using JDK tools from JAVA_HOME={}", Path::new(&home).display());
                Self::from_java_home(home)
            }
            Some(home) => {
                log::warn!(
                    "JAVA_HOME={} has no bin directory, falling back to PATH",
                    Path::new(&home).display()
                );
                Self::default()
            }
            None => Self::default(),
        }
    }

    /// All tools with their display names, in pipeline order.
    pub fn tools(&self) -> [(&'static str, &Path); 4] {
        [
            ("java", self.java.as_path()),
            ("jdeps", self.jdeps.as_path()),
            ("jlink", self.jlink.as_path()),
            ("jpackage", self.jpackage.as_path()),
        ]
    }
}
