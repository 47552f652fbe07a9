//! Common test utilities for packaroo integration tests
//!
//! Provides a scratch workspace that can fabricate JAR files and a fake JDK
//! whose tools are small shell scripts. Every fake tool appends its command
//! line to `calls.log` so tests can assert which processes ran.

#![allow(dead_code)]

use packaroo::packager::Toolchain;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use zip::write::SimpleFileOptions;

/// Modules reported by the fake `java --list-modules`.
pub const RUNTIME_MODULES: [&str; 8] = [
    "java.base",
    "java.desktop",
    "java.logging",
    "java.sql",
    "java.xml",
    "javafx.base",
    "javafx.controls",
    "javafx.graphics",
];

/// A test workspace for integration tests
pub struct TestWorkspace {
    /// Temporary directory
    pub temp: TempDir,
    /// Path to workspace root
    pub path: PathBuf,
}

impl TestWorkspace {
    /// Create a new test workspace
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().to_path_buf();
        Self { temp, path }
    }

    /// Write a JAR containing a manifest and empty class entries
    pub fn write_jar(&self, name: &str, manifest: &str, entries: &[&str]) -> PathBuf {
        let jar_path = self.path.join(name);
        let file = std::fs::File::create(&jar_path).expect("Failed to create jar");
        let mut zip = zip::ZipWriter::new(file);
        let options = SimpleFileOptions::default();

        zip.start_file("META-INF/MANIFEST.MF", options)
            .expect("Failed to add manifest");
        zip.write_all(format!("Manifest-Version: 1.0\n{manifest}").as_bytes())
            .expect("Failed to write manifest");

        for entry in entries {
            zip.start_file(*entry, options).expect("Failed to add entry");
            zip.write_all(b"\xCA\xFE\xBA\xBE").expect("Failed to write entry");
        }

        zip.finish().expect("Failed to finish jar");
        jar_path
    }

    /// Log of every fake tool invocation, one line per call
    pub fn calls_log(&self) -> PathBuf {
        self.path.join("calls.log")
    }

    /// Fake tool invocations, excluding `--version` probes
    pub fn calls(&self) -> Vec<String> {
        std::fs::read_to_string(self.calls_log())
            .unwrap_or_default()
            .lines()
            .filter(|line| !line.ends_with(" --version"))
            .map(String::from)
            .collect()
    }

    /// Home directory of the fake JDK
    pub fn jdk_home(&self) -> PathBuf {
        self.path.join("jdk")
    }

    /// Toolchain pointing at the fake JDK
    pub fn toolchain(&self) -> Toolchain {
        Toolchain::from_java_home(self.jdk_home())
    }

    /// Install a fake tool under `jdk/bin`
    ///
    /// `--version` always succeeds; `body` handles every other invocation.
    #[cfg(unix)]
    pub fn install_tool(&self, name: &str, body: &str) {
        use std::os::unix::fs::PermissionsExt;

        let bin = self.jdk_home().join("bin");
        std::fs::create_dir_all(&bin).expect("Failed to create jdk/bin");
        let script = format!(
            "#!/bin/sh\n\
             echo \"{name} $*\" >> '{log}'\n\
             if [ \"$1\" = \"--version\" ]; then echo \"{name} 21.0.2\"; exit 0; fi\n\
             {body}\n",
            log = self.calls_log().display(),
        );

        let path = bin.join(name);
        std::fs::write(&path, script).expect("Failed to write fake tool");
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
            .expect("Failed to make fake tool executable");
    }

    /// Fake `java` listing [`RUNTIME_MODULES`]
    #[cfg(unix)]
    pub fn install_java(&self) {
        let listing: String = RUNTIME_MODULES
            .iter()
            .map(|module| format!("echo '{module}@21.0.2'\n"))
            .collect();
        self.install_tool("java", &listing);
    }

    /// Fake `jdeps` printing `output` on stdout and exiting with `exit_code`
    #[cfg(unix)]
    pub fn install_jdeps(&self, output: &str, exit_code: i32) {
        self.install_tool("jdeps", &format!("printf '%s\\n' '{output}'\nexit {exit_code}"));
    }

    /// Fake `jlink` that creates its `--output` directory and exits 0
    #[cfg(unix)]
    pub fn install_working_jlink(&self) {
        self.install_tool(
            "jlink",
            "while [ $# -gt 0 ]; do\n\
               if [ \"$1\" = \"--output\" ]; then mkdir -p \"$2\"; fi\n\
               shift\n\
             done\n\
             echo 'runtime image written'\n\
             exit 0",
        );
    }

    /// Fake tool that writes `message` to stderr and exits with `exit_code`
    #[cfg(unix)]
    pub fn install_failing_tool(&self, name: &str, message: &str, exit_code: i32) {
        self.install_tool(name, &format!("echo '{message}' 1>&2\nexit {exit_code}"));
    }

    /// Fake `jpackage` that prints a line and exits 0
    #[cfg(unix)]
    pub fn install_working_jpackage(&self) {
        self.install_tool("jpackage", "echo 'Succeeded in building App Image package'\nexit 0");
    }

    /// Read a file from workspace
    pub fn read_file(&self, path: impl AsRef<Path>) -> String {
        std::fs::read_to_string(self.path.join(path)).expect("Failed to read file")
    }
}

/// Manifest of a plain application
pub const PLAIN_MANIFEST: &str = "Main-Class: com.acme.shop.Main\n\
Implementation-Title: Acme Shop\n\
Implementation-Version: 1.4.0\n\
Implementation-Vendor: Acme Corp\n";

/// Entries of a plain application
pub const PLAIN_ENTRIES: [&str; 2] = ["com/acme/shop/Main.class", "com/acme/shop/Cart.class"];

/// Entries of an application bundling JavaFX
pub const JAVAFX_ENTRIES: [&str; 3] = [
    "com/acme/shop/Main.class",
    "javafx/scene/Node.class",
    "javafx/application/Application.class",
];
