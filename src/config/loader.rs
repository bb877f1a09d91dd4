//! Configuration loader with file resolution.

use super::coerce::{coerce_configuration, ConfigSource};
use super::error::{ConfigError, ConfigResult};
use super::ini::IniDocument;
use crate::maps::Maps;
use crate::value::{Dict, Value};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Config file name
const CONFIG_FILE_NAME: &str = "helix.ini";

/// Application directory under the platform config directory
const APP_DIR_NAME: &str = "helix";

/// Environment variable for explicit config path
const CONFIG_PATH_ENV: &str = "HELIX_CONFIG";

/// A configuration document as read from disk.
#[derive(Debug, Clone)]
pub enum ConfigDocument {
    /// INI sections; values are coerced with environment substitution.
    Ini(IniDocument),
    /// A TOML table; values already carry their types, strings are coerced.
    Toml(toml::Table),
}

impl Default for ConfigDocument {
    fn default() -> Self {
        Self::Ini(IniDocument::new())
    }
}

/// Configuration loader with path resolution and coercion.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Resolved config file path (if any)
    pub config_path: Option<PathBuf>,
    /// The loaded document
    pub document: ConfigDocument,
}

impl ConfigLoader {
    /// Load configuration using standard resolution order.
    ///
    /// Resolution priority (highest to lowest):
    /// 1. `HELIX_CONFIG` environment variable (explicit path)
    /// 2. `./helix.ini` (current directory)
    /// 3. `~/.config/helix/helix.ini` (XDG on Linux/macOS)
    /// 4. `%APPDATA%\helix\helix.ini` (Windows)
    /// 5. An empty document (no file required)
    pub fn load() -> ConfigResult<Self> {
        let config_path = resolve_config_path();

        let document = match config_path {
            Some(ref path) => load_from_file(path)?,
            None => ConfigDocument::default(),
        };

        Ok(Self {
            config_path,
            document,
        })
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref().to_path_buf();
        let document = load_from_file(&path)?;

        Ok(Self {
            config_path: Some(path),
            document,
        })
    }

    /// Create a loader with an empty document (no file).
    pub fn with_defaults() -> Self {
        Self {
            config_path: None,
            document: ConfigDocument::default(),
        }
    }

    /// Get the loaded document.
    pub fn document(&self) -> &ConfigDocument {
        &self.document
    }

    /// Coerced configuration as a plain dict.
    pub fn plain(&self) -> ConfigResult<Dict> {
        match self.coerce(false)? {
            Value::Dict(dict) => Ok(dict),
            Value::Node(node) => Ok(node.to_plain()),
            _ => Ok(Dict::new()),
        }
    }

    /// Coerced configuration as a mapping node.
    pub fn settings(&self) -> ConfigResult<Maps> {
        match self.coerce(true)? {
            Value::Node(node) => Ok(node),
            Value::Dict(dict) => Ok(Maps::from_dict(&dict)),
            _ => Ok(Maps::new()),
        }
    }

    fn coerce(&self, as_node: bool) -> ConfigResult<Value> {
        match &self.document {
            ConfigDocument::Ini(doc) => coerce_configuration(ConfigSource::Sections(doc), as_node),
            ConfigDocument::Toml(table) => {
                let value = Value::from(toml::Value::Table(table.clone()));
                coerce_configuration(ConfigSource::Value(&value), as_node)
            }
        }
    }

    /// Save the current document to its file.
    pub fn save(&self) -> ConfigResult<()> {
        let path = self
            .config_path
            .as_ref()
            .ok_or_else(|| ConfigError::NotFound(PathBuf::from(CONFIG_FILE_NAME)))?;

        save_to_file(&self.document, path)
    }

    /// Save the current document to a specific file.
    pub fn save_to(&self, path: impl AsRef<Path>) -> ConfigResult<()> {
        save_to_file(&self.document, path.as_ref())
    }

    /// Reload the document from file (if path is set).
    pub fn reload(&mut self) -> ConfigResult<()> {
        if let Some(ref path) = self.config_path {
            self.document = load_from_file(path)?;
        }
        Ok(())
    }
}

/// Resolve the configuration file path using standard locations.
pub fn resolve_config_path() -> Option<PathBuf> {
    // 1. Explicit environment variable
    if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
        let path = PathBuf::from(path);
        if path.exists() {
            return Some(path);
        }
        debug!(path = %path.display(), "HELIX_CONFIG points at a missing file");
    }

    // 2. Current directory
    let cwd_config = PathBuf::from(CONFIG_FILE_NAME);
    if cwd_config.exists() {
        return Some(cwd_config);
    }

    // 3. XDG config directory (Linux/macOS) or APPDATA (Windows)
    if let Some(app_config) = get_default_config_path() {
        if app_config.exists() {
            return Some(app_config);
        }
    }

    None
}

/// Get the platform-specific config directory.
fn get_config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        std::env::var("APPDATA").ok().map(PathBuf::from)
    }

    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("XDG_CONFIG_HOME")
            .ok()
            .map(PathBuf::from)
            .or_else(|| {
                std::env::var("HOME")
                    .ok()
                    .map(|h| PathBuf::from(h).join(".config"))
            })
    }
}

fn is_toml(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"))
}

/// Load a document from a file, choosing the format by extension.
fn load_from_file(path: &Path) -> ConfigResult<ConfigDocument> {
    debug!(path = %path.display(), "loading configuration");
    if !is_toml(path) {
        return IniDocument::from_path(path).map(ConfigDocument::Ini);
    }

    if !path.exists() {
        return Err(ConfigError::NotFound(path.to_path_buf()));
    }
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    let table: toml::Table = toml::from_str(&content)?;
    Ok(ConfigDocument::Toml(table))
}

/// Save a document to a file.
fn save_to_file(document: &ConfigDocument, path: &Path) -> ConfigResult<()> {
    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| ConfigError::WriteError {
            path: path.to_path_buf(),
            source: e,
        })?;
    }

    let content = match document {
        ConfigDocument::Ini(doc) => doc.to_string(),
        ConfigDocument::Toml(table) => toml::to_string_pretty(table)?,
    };
    std::fs::write(path, content).map_err(|e| ConfigError::WriteError {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Get the default config directory for creating new config files.
pub fn get_default_config_dir() -> Option<PathBuf> {
    get_config_dir().map(|d| d.join(APP_DIR_NAME))
}

/// Get the default config file path for creating new config files.
pub fn get_default_config_path() -> Option<PathBuf> {
    get_default_config_dir().map(|d| d.join(CONFIG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    #[test]
    fn test_default_loader() {
        let loader = ConfigLoader::with_defaults();
        assert!(loader.settings().unwrap().is_empty());
        assert!(loader.config_path.is_none());
    }

    #[test]
    #[serial]
    fn test_explicit_path_env() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.ini");
        std::fs::write(&path, "[run]\nepochs = 3\n").unwrap();

        env::set_var(CONFIG_PATH_ENV, &path);
        let loader = ConfigLoader::load().unwrap();
        env::remove_var(CONFIG_PATH_ENV);

        assert_eq!(loader.config_path.as_deref(), Some(path.as_path()));
        assert_eq!(
            loader.settings().unwrap().get_path("run.epochs").unwrap(),
            Value::Int(3)
        );
    }

    #[test]
    fn test_toml_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("helix.toml");
        std::fs::write(&path, "[window]\ntitle = 'Helix'\nscale = '1.5'\n").unwrap();

        let loader = ConfigLoader::load_from(&path).unwrap();
        let settings = loader.settings().unwrap();
        assert_eq!(settings.get_path("window.scale").unwrap(), Value::Float(1.5));
        assert_eq!(
            settings.get_path("window.title").unwrap(),
            Value::from("Helix")
        );
    }

    #[test]
    fn test_missing_file() {
        let err = ConfigLoader::load_from("/definitely/not/here.ini").unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("helix.ini");
        let mut doc = IniDocument::new();
        doc.add_section("ui").unwrap();
        doc.set("ui", "theme", "dark").unwrap();

        let mut loader = ConfigLoader {
            config_path: Some(path.clone()),
            document: ConfigDocument::Ini(doc),
        };
        loader.save().unwrap();
        loader.reload().unwrap();
        assert_eq!(
            loader.plain().unwrap().get("ui").and_then(|v| v.as_dict().and_then(|d| d.get("theme"))),
            Some(Value::from("dark"))
        );
    }
}
