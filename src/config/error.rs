//! Configuration error types for the config module.

use crate::error::MapsError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading, interpolating or writing
/// configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file not found at expected path
    #[error("Configuration file not found: {0}")]
    NotFound(PathBuf),

    /// Failed to read config file
    #[error("Failed to read configuration file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write config file
    #[error("Failed to write configuration file '{path}': {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse a TOML document
    #[error("Failed to parse TOML configuration: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Failed to serialize a TOML document
    #[error("Failed to serialize configuration: {0}")]
    SerializeError(#[from] toml::ser::Error),

    /// An option appeared before any `[section]` header
    #[error("Line {line}: option outside of any section: '{text}'")]
    MissingSectionHeader { line: usize, text: String },

    /// A line is neither a header, an option nor a comment
    #[error("Line {line}: {message}")]
    Parse { line: usize, message: String },

    /// A section header appeared twice
    #[error("Line {line}: section '{section}' already exists")]
    DuplicateSection { line: usize, section: String },

    /// An option appeared twice in one section
    #[error("Line {line}: option '{option}' in section '{section}' already exists")]
    DuplicateOption {
        line: usize,
        section: String,
        option: String,
    },

    /// Lookup of an unknown section
    #[error("No section: '{0}'")]
    NoSection(String),

    /// Lookup of an unknown option
    #[error("No option '{option}' in section '{section}'")]
    NoOption { section: String, option: String },

    /// A `%` not followed by `%` or `(name)s`
    #[error("Bad interpolation syntax in '{section}.{option}': {raw}")]
    InterpolationSyntax {
        section: String,
        option: String,
        raw: String,
    },

    /// `%(name)s` references an unknown option
    #[error("Bad value substitution in '{section}.{option}': no option '{reference}'")]
    InterpolationMissingOption {
        section: String,
        option: String,
        reference: String,
    },

    /// Interpolation nested too deeply (likely a reference loop)
    #[error("Interpolation of '{section}.{option}' exceeded the maximum depth")]
    InterpolationDepth { section: String, option: String },

    /// Coercing the loaded values failed
    #[error(transparent)]
    Maps(#[from] MapsError),
}

impl ConfigError {
    /// Create a parse error for a line
    pub fn parse<M: Into<String>>(line: usize, message: M) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }

    /// Create a NoOption error
    pub fn no_option<S: Into<String>, O: Into<String>>(section: S, option: O) -> Self {
        Self::NoOption {
            section: section.into(),
            option: option.into(),
        }
    }
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
