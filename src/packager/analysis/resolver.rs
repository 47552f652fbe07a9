//! Module resolution: which runtime modules an archive needs.
//!
//! Reconciles jdeps output against the modules the active runtime provides.
//! Availability always wins: a module the runtime does not have never ends up
//! in the required set, no matter who asked for it.

use std::collections::BTreeSet;

/// Substituted when jdeps cannot say anything useful.
pub const DEFAULT_MODULES: [&str; 11] = [
    "java.base",
    "java.desktop",
    "java.logging",
    "java.management",
    "java.naming",
    "java.prefs",
    "java.xml",
    "javafx.controls",
    "javafx.fxml",
    "javafx.base",
    "javafx.graphics",
];

/// Always added for archives that embed JavaFX.
pub const ESSENTIAL_GUI_MODULES: [&str; 4] = [
    "javafx.controls",
    "javafx.fxml",
    "javafx.base",
    "javafx.graphics",
];

/// Broader selection offered to users who pick modules by hand.
pub const SUGGESTED_MODULES: [&str; 16] = [
    "java.base",
    "java.desktop",
    "java.logging",
    "java.management",
    "java.naming",
    "java.prefs",
    "java.security.jgss",
    "java.sql",
    "java.xml",
    "javafx.controls",
    "javafx.fxml",
    "javafx.base",
    "javafx.graphics",
    "jdk.crypto.ec",
    "jdk.localedata",
    "jdk.unsupported",
];

/// Diagnostic and agent modules that jdeps reports but many runtimes lack.
const UNRELIABLE_MODULES: [&str; 3] = ["jdk.management.jfr", "jdk.jfr", "jdk.management.agent"];

/// [`SUGGESTED_MODULES`] as an owned set.
pub fn suggested_modules() -> BTreeSet<String> {
    SUGGESTED_MODULES.iter().map(|m| m.to_string()).collect()
}

/// What the introspection tool reported.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Introspection {
    /// Module names, as printed (unfiltered)
    Modules(Vec<String>),
    /// The tool could not be found or started
    Unavailable,
    /// The tool ran and exited non-zero
    Failed {
        /// Exit code of the tool
        exit_code: i32,
    },
}

/// Why the default module set was used.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FallbackReason {
    /// jdeps was missing
    ToolUnavailable,
    /// jdeps exited non-zero
    ToolFailed {
        /// Exit code of the tool
        exit_code: i32,
    },
    /// jdeps ran but nothing usable survived filtering
    NoModules,
}

impl FallbackReason {
    /// User-facing note carried in the analysis result.
    pub fn advisory(self) -> String {
        match self {
            FallbackReason::ToolUnavailable => "jdeps not available - using default modules".into(),
            FallbackReason::ToolFailed { exit_code } => {
                format!("jdeps failed with exit code {exit_code} - using default modules")
            }
            FallbackReason::NoModules => {
                "jdeps reported no usable modules - using default modules".into()
            }
        }
    }
}

/// Modules that may be reported unavailable without being worth surfacing.
///
/// Covers the diagnostic/agent modules above, anything under `jdk.internal.`
/// and incubator modules.
pub fn is_unreliable_module(name: &str) -> bool {
    UNRELIABLE_MODULES.contains(&name) || name.starts_with("jdk.internal.") || name.contains("incubator")
}

/// Outcome of [`resolve_modules`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Resolution {
    /// Modules to put in the runtime image; always a subset of the available set
    pub required: BTreeSet<String>,
    /// `required - available`
    pub missing: BTreeSet<String>,
    /// Reported by jdeps but unavailable and not known to be unreliable
    pub unresolved: BTreeSet<String>,
    /// Set when the default module set was substituted
    pub fallback: Option<FallbackReason>,
}

/// Computes the required module set.
///
/// 1. Keep the jdeps modules the runtime has. Unavailable unreliable ones are
///    dropped silently, other unavailable ones are listed in `unresolved`.
/// 2. If jdeps was unavailable, failed, or left nothing, use the available
///    part of [`DEFAULT_MODULES`].
/// 3. If the archive embeds JavaFX, add the available part of
///    [`ESSENTIAL_GUI_MODULES`].
/// 4. `missing = required - available`.
///
/// Deterministic: identical inputs give identical output.
pub fn resolve_modules(
    introspection: &Introspection,
    available: &BTreeSet<String>,
    gui_toolkit: bool,
) -> Resolution {
    let mut resolution = Resolution::default();

    match introspection {
        Introspection::Modules(reported) => {
            for module in reported {
                let module = module.trim();
                if module.is_empty() {
                    continue;
                }
                if available.contains(module) {
                    resolution.required.insert(module.to_string());
                } else if is_unreliable_module(module) {
                    log::debug!("Skipping unreliable module {}", module);
                } else {
                    log::info!("Module {} is not available in current runtime, skipping", module);
                    resolution.unresolved.insert(module.to_string());
                }
            }
            if resolution.required.is_empty() {
                resolution.fallback = Some(FallbackReason::NoModules);
            }
        }
        Introspection::Unavailable => resolution.fallback = Some(FallbackReason::ToolUnavailable),
        Introspection::Failed { exit_code } => {
            resolution.fallback = Some(FallbackReason::ToolFailed {
                exit_code: *exit_code,
            })
        }
    }

    if resolution.fallback.is_some() {
        add_available(&mut resolution.required, &DEFAULT_MODULES, available);
    }

    if gui_toolkit {
        add_available(&mut resolution.required, &ESSENTIAL_GUI_MODULES, available);
    }

    resolution.missing = resolution.required.difference(available).cloned().collect();
    resolution
}

fn add_available(target: &mut BTreeSet<String>, modules: &[&str], available: &BTreeSet<String>) {
    for module in modules {
        if available.contains(*module) {
            target.insert(module.to_string());
        } else {
            log::debug!("Default module {} is not available, skipping", module);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn reported(names: &[&str]) -> Introspection {
        Introspection::Modules(names.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn unavailable_modules_never_become_required() {
        let available = set(&["java.base", "java.sql"]);
        let resolution = resolve_modules(
            &reported(&["java.base", "java.sql", "java.scripting", "jdk.jfr"]),
            &available,
            false,
        );
        assert_eq!(resolution.required, set(&["java.base", "java.sql"]));
        assert_eq!(resolution.unresolved, set(&["java.scripting"]));
        assert!(resolution.missing.is_empty());
        assert_eq!(resolution.fallback, None);
    }

    #[test]
    fn unavailable_tool_falls_back_to_available_defaults() {
        let available = set(&["java.base", "java.desktop", "java.xml", "jdk.zipfs"]);
        let resolution = resolve_modules(&Introspection::Unavailable, &available, false);
        assert_eq!(resolution.required, set(&["java.base", "java.desktop", "java.xml"]));
        assert_eq!(resolution.fallback, Some(FallbackReason::ToolUnavailable));
    }

    #[test]
    fn empty_result_after_filtering_falls_back() {
        let available = set(&["java.base"]);
        let resolution = resolve_modules(&reported(&["jdk.internal.vm.ci"]), &available, false);
        assert_eq!(resolution.required, set(&["java.base"]));
        assert_eq!(resolution.fallback, Some(FallbackReason::NoModules));
        assert!(resolution.unresolved.is_empty());
    }

    #[test]
    fn failed_tool_keeps_exit_code() {
        let resolution = resolve_modules(
            &Introspection::Failed { exit_code: 2 },
            &set(&["java.base"]),
            false,
        );
        let reason = resolution.fallback.unwrap();
        assert_eq!(reason, FallbackReason::ToolFailed { exit_code: 2 });
        assert!(reason.advisory().contains("exit code 2"));
    }

    #[test]
    fn gui_essentials_are_added_when_available() {
        let available = set(&["java.base", "javafx.base", "javafx.controls"]);
        let resolution = resolve_modules(&reported(&["java.base"]), &available, true);
        assert_eq!(
            resolution.required,
            set(&["java.base", "javafx.base", "javafx.controls"])
        );
    }

    #[test]
    fn nothing_available_gives_empty_set() {
        let resolution = resolve_modules(&Introspection::Unavailable, &BTreeSet::new(), true);
        assert!(resolution.required.is_empty());
        assert!(resolution.missing.is_empty());
    }

    #[test]
    fn unreliable_patterns() {
        for name in [
            "jdk.jfr",
            "jdk.management.jfr",
            "jdk.management.agent",
            "jdk.internal.vm.ci",
            "jdk.incubator.vector",
        ] {
            assert!(is_unreliable_module(name), "{name}");
        }
        assert!(!is_unreliable_module("java.sql"));
        assert!(!is_unreliable_module("jdk.crypto.ec"));
    }

    #[test]
    fn resolution_is_deterministic() {
        let available = set(&["java.base", "java.sql", "javafx.base"]);
        let input = reported(&["java.sql", "java.base", "java.sql"]);
        assert_eq!(
            resolve_modules(&input, &available, true),
            resolve_modules(&input, &available, true)
        );
    }
}
