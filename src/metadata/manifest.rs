//! JAR manifest parsing.
//!
//! Only the main section is read. Attribute names are matched
//! case-insensitively, values keep their original case. Continuation lines
//! (a single leading space) are joined onto the previous value.

use std::collections::BTreeMap;

/// Archive entry holding the manifest.
pub const MANIFEST_PATH: &str = "META-INF/MANIFEST.MF";

/// Main-section attributes of a JAR manifest.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Manifest {
    attributes: BTreeMap<String, String>,
}

impl Manifest {
    /// Parses manifest text. Malformed lines are skipped.
    pub fn parse(text: &str) -> Self {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        let mut attributes: BTreeMap<String, String> = BTreeMap::new();
        let mut current: Option<String> = None;

        for line in text.lines() {
            let line = line.strip_suffix('\r').unwrap_or(line);

            if line.is_empty() {
                // end of the main section
                break;
            }

            if let Some(continuation) = line.strip_prefix(' ') {
                if let Some(value) = current.as_ref().and_then(|key| attributes.get_mut(key)) {
                    value.push_str(continuation);
                }
                continue;
            }

            match line.split_once(':') {
                Some((name, value)) if !name.trim().is_empty() => {
                    let key = name.trim().to_ascii_lowercase();
                    attributes.insert(key.clone(), value.trim_start().to_string());
                    current = Some(key);
                }
                _ => {
                    log::debug!("Skipping malformed manifest line: {}", line);
                    current = None;
                }
            }
        }

        for value in attributes.values_mut() {
            let trimmed = value.trim_end().len();
            value.truncate(trimmed);
        }

        Self { attributes }
    }

    /// Attribute value, `None` when absent or blank.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.attributes
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
            .filter(|value| !value.trim().is_empty())
    }

    /// Number of attributes in the main section.
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    /// True when the main section has no attributes.
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_main_section_attributes() {
        let manifest = Manifest::parse(
            "Manifest-Version: 1.0\r\n\
             Main-Class: org.springframework.boot.loader.JarLauncher\r\n\
             Start-Class: com.acme.shop.ShopApplication\r\n\
             \r\n\
             Name: ignored/section\r\n\
             Main-Class: not.this.One\r\n",
        );
        assert_eq!(
            manifest.get("Main-Class"),
            Some("org.springframework.boot.loader.JarLauncher")
        );
        assert_eq!(manifest.get("start-class"), Some("com.acme.shop.ShopApplication"));
        assert_eq!(manifest.get("Name"), None);
    }

    #[test]
    fn joins_continuation_lines() {
        let manifest = Manifest::parse(
            "Implementation-Title: a-very-long-application-name-that-wr\n aps-onto-the-next-line\n",
        );
        assert_eq!(
            manifest.get("Implementation-Title"),
            Some("a-very-long-application-name-that-wraps-onto-the-next-line")
        );
    }

    #[test]
    fn blank_values_are_absent() {
        let manifest = Manifest::parse("Implementation-Vendor:   \nBroken line\n");
        assert_eq!(manifest.get("Implementation-Vendor"), None);
        assert_eq!(manifest.len(), 1);
    }
}
