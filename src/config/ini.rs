//! INI documents: the section/option source for value coercion.
//!
//! The dialect matches the common "configparser" defaults: `[section]`
//! headers, `key = value` or `key: value` options with lower-cased keys,
//! `#`/`;` full-line comments, indented continuation lines, a `DEFAULT`
//! section visible from every other section, strict duplicate checks and
//! `%(name)s` interpolation on read.

use super::error::{ConfigError, ConfigResult};
use indexmap::IndexMap;
use std::fmt;
use std::path::Path;

/// Name of the section whose options every other section inherits.
pub const DEFAULT_SECTION: &str = "DEFAULT";

/// Maximum nesting of `%(name)s` references.
const MAX_INTERPOLATION_DEPTH: usize = 10;

type Options = IndexMap<String, String>;

/// A parsed INI document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IniDocument {
    defaults: Options,
    sections: IndexMap<String, Options>,
}

impl IniDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse INI text.
    pub fn parse(text: &str) -> ConfigResult<Self> {
        let mut doc = Self::new();
        let mut current: Option<String> = None;
        let mut last_option: Option<String> = None;

        for (index, raw_line) in text.lines().enumerate() {
            let line = index + 1;
            let trimmed = raw_line.trim();

            if trimmed.is_empty() {
                last_option = None;
                continue;
            }
            if trimmed.starts_with('#') || trimmed.starts_with(';') {
                continue;
            }

            let indented = raw_line.starts_with(char::is_whitespace);
            if indented {
                if let (Some(section), Some(option)) = (&current, &last_option) {
                    if let Some(value) = doc.options_mut(section).get_mut(option) {
                        value.push('\n');
                        value.push_str(trimmed);
                    }
                    continue;
                }
            }

            if trimmed.starts_with('[') && trimmed.ends_with(']') && trimmed.len() > 2 {
                let name = &trimmed[1..trimmed.len() - 1];
                if name != DEFAULT_SECTION {
                    if doc.sections.contains_key(name) {
                        return Err(ConfigError::DuplicateSection {
                            line,
                            section: name.to_string(),
                        });
                    }
                    doc.sections.insert(name.to_string(), Options::new());
                }
                current = Some(name.to_string());
                last_option = None;
                continue;
            }

            let Some(section) = &current else {
                return Err(ConfigError::MissingSectionHeader {
                    line,
                    text: trimmed.to_string(),
                });
            };

            let Some(split) = trimmed.find(|c: char| c == '=' || c == ':') else {
                return Err(ConfigError::parse(
                    line,
                    format!("expected 'key = value', found '{trimmed}'"),
                ));
            };
            let option = trimmed[..split].trim().to_lowercase();
            let value = trimmed[split + 1..].trim().to_string();
            if option.is_empty() {
                return Err(ConfigError::parse(line, "option name is empty"));
            }

            let options = doc.options_mut(section);
            if options.contains_key(&option) {
                return Err(ConfigError::DuplicateOption {
                    line,
                    section: section.clone(),
                    option,
                });
            }
            options.insert(option.clone(), value);
            last_option = Some(option);
        }

        Ok(doc)
    }

    /// Read and parse an INI file.
    pub fn from_path(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    fn options_mut(&mut self, section: &str) -> &mut Options {
        if section == DEFAULT_SECTION {
            &mut self.defaults
        } else {
            self.sections.entry(section.to_string()).or_default()
        }
    }

    /// Section names in file order, excluding `DEFAULT`.
    pub fn sections(&self) -> Vec<String> {
        self.sections.keys().cloned().collect()
    }

    pub fn has_section(&self, section: &str) -> bool {
        self.sections.contains_key(section)
    }

    /// The `DEFAULT` section's options.
    pub fn defaults(&self) -> &IndexMap<String, String> {
        &self.defaults
    }

    pub fn add_section(&mut self, section: &str) -> ConfigResult<()> {
        if section == DEFAULT_SECTION {
            return Err(ConfigError::parse(0, "cannot add the DEFAULT section"));
        }
        if self.has_section(section) {
            return Err(ConfigError::DuplicateSection {
                line: 0,
                section: section.to_string(),
            });
        }
        self.sections.insert(section.to_string(), Options::new());
        Ok(())
    }

    /// Option names of `section`: its own first, then inherited defaults.
    pub fn options(&self, section: &str) -> ConfigResult<Vec<String>> {
        let own = self
            .sections
            .get(section)
            .ok_or_else(|| ConfigError::NoSection(section.to_string()))?;
        let inherited = self.defaults.keys().filter(|k| !own.contains_key(*k));
        Ok(own.keys().chain(inherited).cloned().collect())
    }

    pub fn has_option(&self, section: &str, option: &str) -> bool {
        self.lookup(section, &option.to_lowercase()).is_some()
    }

    /// Value of `option` without interpolation.
    pub fn raw(&self, section: &str, option: &str) -> ConfigResult<String> {
        self.check_section(section)?;
        self.lookup(section, &option.to_lowercase())
            .cloned()
            .ok_or_else(|| ConfigError::no_option(section, option))
    }

    /// Value of `option` with `%(name)s` references expanded.
    pub fn get(&self, section: &str, option: &str) -> ConfigResult<String> {
        let raw = self.raw(section, option)?;
        self.interpolate(section, option, &raw, 1)
    }

    /// Set an option in an existing section (or `DEFAULT`).
    pub fn set(
        &mut self,
        section: &str,
        option: &str,
        value: impl Into<String>,
    ) -> ConfigResult<()> {
        self.check_section(section)?;
        self.options_mut(section)
            .insert(option.to_lowercase(), value.into());
        Ok(())
    }

    fn check_section(&self, section: &str) -> ConfigResult<()> {
        if section == DEFAULT_SECTION || self.has_section(section) {
            Ok(())
        } else {
            Err(ConfigError::NoSection(section.to_string()))
        }
    }

    fn lookup(&self, section: &str, option: &str) -> Option<&String> {
        if section == DEFAULT_SECTION {
            return self.defaults.get(option);
        }
        self.sections
            .get(section)?
            .get(option)
            .or_else(|| self.defaults.get(option))
    }

    fn interpolate(
        &self,
        section: &str,
        option: &str,
        raw: &str,
        depth: usize,
    ) -> ConfigResult<String> {
        if depth > MAX_INTERPOLATION_DEPTH {
            return Err(ConfigError::InterpolationDepth {
                section: section.to_string(),
                option: option.to_string(),
            });
        }
        let syntax_error = || ConfigError::InterpolationSyntax {
            section: section.to_string(),
            option: option.to_string(),
            raw: raw.to_string(),
        };

        let mut out = String::with_capacity(raw.len());
        let mut rest = raw;
        while let Some(pos) = rest.find('%') {
            out.push_str(&rest[..pos]);
            rest = &rest[pos..];

            if let Some(after) = rest.strip_prefix("%%") {
                out.push('%');
                rest = after;
            } else if let Some(after) = rest.strip_prefix("%(") {
                let close = after.find(')').ok_or_else(syntax_error)?;
                let reference = &after[..close];
                if reference.is_empty() || !after[close + 1..].starts_with('s') {
                    return Err(syntax_error());
                }
                let reference = reference.to_lowercase();
                let value = self.lookup(section, &reference).ok_or_else(|| {
                    ConfigError::InterpolationMissingOption {
                        section: section.to_string(),
                        option: option.to_string(),
                        reference: reference.clone(),
                    }
                })?;
                if value.contains('%') {
                    out.push_str(&self.interpolate(section, option, value, depth + 1)?);
                } else {
                    out.push_str(value);
                }
                rest = &after[close + 2..];
            } else {
                return Err(syntax_error());
            }
        }
        out.push_str(rest);
        Ok(out)
    }
}

impl fmt::Display for IniDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.defaults.is_empty() {
            write_section(f, DEFAULT_SECTION, &self.defaults)?;
        }
        for (name, options) in &self.sections {
            write_section(f, name, options)?;
        }
        Ok(())
    }
}

fn write_section(f: &mut fmt::Formatter<'_>, name: &str, options: &Options) -> fmt::Result {
    writeln!(f, "[{name}]")?;
    for (key, value) in options {
        writeln!(f, "{key} = {}", value.replace('\n', "\n\t"))?;
    }
    writeln!(f)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = "\
# Helix settings
[DEFAULT]
root = /srv/helix

[paths]
Images = %(root)s/images
labels: %(root)s/labels
ratio = 50%%

[training]
epochs = 30
notes = first line
    second line
";

    #[test]
    fn test_sections_and_options() {
        let doc = IniDocument::parse(SAMPLE).unwrap();
        assert_eq!(doc.sections(), vec!["paths", "training"]);
        assert_eq!(
            doc.options("paths").unwrap(),
            vec!["images", "labels", "ratio", "root"]
        );
        assert!(doc.has_option("training", "ROOT"));
    }

    #[test]
    fn test_interpolation() {
        let doc = IniDocument::parse(SAMPLE).unwrap();
        assert_eq!(doc.get("paths", "images").unwrap(), "/srv/helix/images");
        assert_eq!(doc.get("paths", "labels").unwrap(), "/srv/helix/labels");
        assert_eq!(doc.get("paths", "ratio").unwrap(), "50%");
        assert_eq!(doc.raw("paths", "ratio").unwrap(), "50%%");
    }

    #[test]
    fn test_continuation_lines() {
        let doc = IniDocument::parse(SAMPLE).unwrap();
        assert_eq!(doc.get("training", "notes").unwrap(), "first line\nsecond line");
    }

    #[test]
    fn test_interpolation_errors() {
        let doc = IniDocument::parse("[s]\na = %(missing)s\nb = 5%\nc = %(c)s\n").unwrap();
        assert!(matches!(
            doc.get("s", "a"),
            Err(ConfigError::InterpolationMissingOption { reference, .. }) if reference == "missing"
        ));
        assert!(matches!(
            doc.get("s", "b"),
            Err(ConfigError::InterpolationSyntax { .. })
        ));
        assert!(matches!(
            doc.get("s", "c"),
            Err(ConfigError::InterpolationDepth { .. })
        ));
    }

    #[test]
    fn test_strict_parsing() {
        assert!(matches!(
            IniDocument::parse("key = value\n"),
            Err(ConfigError::MissingSectionHeader { line: 1, .. })
        ));
        assert!(matches!(
            IniDocument::parse("[a]\n[a]\n"),
            Err(ConfigError::DuplicateSection { line: 2, .. })
        ));
        assert!(matches!(
            IniDocument::parse("[a]\nk = 1\nK = 2\n"),
            Err(ConfigError::DuplicateOption { line: 3, .. })
        ));
        assert!(matches!(
            IniDocument::parse("[a]\njust words\n"),
            Err(ConfigError::Parse { line: 2, .. })
        ));
    }

    #[test]
    fn test_lookup_errors() {
        let doc = IniDocument::parse(SAMPLE).unwrap();
        assert!(matches!(doc.get("nope", "x"), Err(ConfigError::NoSection(_))));
        assert!(matches!(
            doc.get("paths", "nope"),
            Err(ConfigError::NoOption { .. })
        ));
    }

    #[test]
    fn test_write_round_trip() {
        let mut doc = IniDocument::parse(SAMPLE).unwrap();
        doc.add_section("extra").unwrap();
        doc.set("extra", "Flag", "true").unwrap();

        let reparsed = IniDocument::parse(&doc.to_string()).unwrap();
        assert_eq!(reparsed, doc);
        assert_eq!(reparsed.raw("extra", "flag").unwrap(), "true");
    }
}
