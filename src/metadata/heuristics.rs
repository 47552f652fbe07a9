//! Name, version and vendor guesses from file names and class names.
//!
//! All functions here are pure: a string in, an optional string out.

use regex::Regex;
use std::sync::LazyLock;

static VERSION_PART: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+(\.\d+)*").expect("version pattern is valid"));

/// Package prefixes after which the second segment names the vendor.
const VENDOR_PREFIXES: [&str; 4] = ["com", "org", "net", "io"];

/// Removes a trailing `.jar` (any case).
pub fn strip_archive_extension(file_name: &str) -> &str {
    let len = file_name.len();
    if len >= 4
        && file_name.is_char_boundary(len - 4)
        && file_name[len - 4..].eq_ignore_ascii_case(".jar")
    {
        &file_name[..len - 4]
    } else {
        file_name
    }
}

/// Splits `app-name-1.2.3` into `("app-name", Some("1.2.3"))`.
///
/// The last dash-separated part that starts with a digit is taken as the
/// version and everything before it as the name. When no such part exists, or
/// nothing precedes it, the whole input is the name.
pub fn split_name_and_version(stem: &str) -> (String, Option<String>) {
    let parts: Vec<&str> = stem.split('-').collect();
    if parts.len() < 2 {
        return (stem.to_string(), None);
    }

    for i in (0..parts.len()).rev() {
        if VERSION_PART.is_match(parts[i]) {
            let name = parts[..i].join("-");
            let version = Some(parts[i].to_string());
            if name.is_empty() {
                return (stem.to_string(), version);
            }
            return (name, version);
        }
    }

    (stem.to_string(), None)
}

/// Display name derived from an archive file name.
///
/// `inventory-service-2.0.1.jar` becomes `Inventory Service`.
pub fn app_name_from_file_name(file_name: &str) -> Option<String> {
    let (name, _) = split_name_and_version(strip_archive_extension(file_name));
    let formatted = format_application_name(&name);
    (!formatted.is_empty()).then_some(formatted)
}

/// Version derived from an archive file name.
pub fn version_from_file_name(file_name: &str) -> Option<String> {
    split_name_and_version(strip_archive_extension(file_name)).1
}

/// Title-cases a name, treating `-` and `_` as word separators.
pub fn format_application_name(name: &str) -> String {
    name.replace(['-', '_'], " ")
        .split_whitespace()
        .map(title_case)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Vendor guessed from a fully qualified class name.
///
/// `com.acme.shop.Main` gives `Acme`; packages without a common prefix use
/// their first segment; classes in the default package give `None`.
pub fn vendor_from_class(class_name: &str) -> Option<String> {
    let class_name = class_name.trim();
    if class_name.is_empty() {
        return None;
    }

    let parts: Vec<&str> = class_name.split('.').collect();
    if parts.len() >= 3 {
        let first = parts[0].to_ascii_lowercase();
        if VENDOR_PREFIXES.contains(&first.as_str()) {
            format_vendor_name(parts[1])
        } else {
            format_vendor_name(parts[0])
        }
    } else if parts.len() == 2 {
        format_vendor_name(parts[0])
    } else {
        None
    }
}

/// Keeps ASCII letters and digits, then capitalizes the first character.
pub fn format_vendor_name(vendor: &str) -> Option<String> {
    let cleaned: String = vendor.chars().filter(char::is_ascii_alphanumeric).collect();
    (!cleaned.is_empty()).then(|| title_case(&cleaned))
}

/// Folder name for an application's build output (`My App` -> `MyAppBuildOutput`).
pub fn output_folder_name(app_name: &str) -> Option<String> {
    let cleaned: String = app_name.chars().filter(char::is_ascii_alphanumeric).collect();
    (!cleaned.is_empty()).then(|| format!("{cleaned}BuildOutput"))
}

/// First value that is present and not blank, trimmed.
pub fn first_non_blank<'a, I>(values: I) -> Option<String>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    values
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|value| !value.is_empty())
        .map(String::from)
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_jar_extension() {
        for (input, expected) in [
            ("app.jar", "app"),
            ("APP.JAR", "APP"),
            ("app.war", "app.war"),
            (".jar", ""),
            ("jar", "jar"),
        ] {
            assert_eq!(strip_archive_extension(input), expected, "input {input:?}");
        }
    }

    #[test]
    fn splits_name_and_version() {
        let cases = [
            ("app-name-1.0.0", ("app-name", Some("1.0.0"))),
            ("app-1.0-SNAPSHOT", ("app", Some("1.0"))),
            ("tool-2", ("tool", Some("2"))),
            ("plainname", ("plainname", None)),
            ("no-version-here", ("no-version-here", None)),
            ("1.0-final", ("1.0-final", Some("1.0"))),
        ];
        for (input, (name, version)) in cases {
            let (got_name, got_version) = split_name_and_version(input);
            assert_eq!(got_name, name, "input {input:?}");
            assert_eq!(got_version.as_deref(), version, "input {input:?}");
        }
    }

    #[test]
    fn app_name_from_archive_file() {
        let cases = [
            ("inventory-service-2.0.1.jar", Some("Inventory Service")),
            ("my_tool.jar", Some("My Tool")),
            ("HELLO-world.jar", Some("Hello World")),
            (".jar", None),
        ];
        for (input, expected) in cases {
            assert_eq!(app_name_from_file_name(input).as_deref(), expected, "input {input:?}");
        }
        assert_eq!(version_from_file_name("shop-3.1.4.jar").as_deref(), Some("3.1.4"));
        assert_eq!(version_from_file_name("shop.jar"), None);
    }

    #[test]
    fn vendor_from_class_names() {
        let cases = [
            ("com.acme.shop.Main", Some("Acme")),
            ("org.apache.tools.Runner", Some("Apache")),
            ("io.my-corp.app.Main", Some("Mycorp")),
            ("devdam.desktop.App", Some("Devdam")),
            ("example.Main", Some("Example")),
            ("Main", None),
            ("", None),
            ("com.__.x.Main", None),
        ];
        for (input, expected) in cases {
            assert_eq!(vendor_from_class(input).as_deref(), expected, "input {input:?}");
        }
    }

    #[test]
    fn output_folder_names() {
        assert_eq!(output_folder_name("My App").as_deref(), Some("MyAppBuildOutput"));
        assert_eq!(output_folder_name("Shop 2.0!").as_deref(), Some("Shop20BuildOutput"));
        assert_eq!(output_folder_name("  "), None);
    }

    #[test]
    fn first_non_blank_skips_blank_values() {
        assert_eq!(
            first_non_blank([None, Some("  "), Some(" Acme "), Some("Other")]).as_deref(),
            Some("Acme")
        );
        assert_eq!(first_non_blank([None, Some("")]), None);
    }
}
