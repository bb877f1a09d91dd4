//! Configuration module for Helix.
//!
//! This module reads INI (or TOML) configuration and coerces its string
//! values into typed [`Value`](crate::Value)s, optionally wrapped in a
//! [`Maps`](crate::Maps) node for dotted access.
//!
//! # Configuration Resolution
//!
//! Configuration is loaded from the following locations (in order of priority):
//!
//! 1. `HELIX_CONFIG` environment variable (explicit path)
//! 2. `./helix.ini` (current directory)
//! 3. `~/.config/helix/helix.ini` (XDG on Linux/macOS)
//! 4. `%APPDATA%\helix\helix.ini` (Windows)
//! 5. An empty document (no file required)
//!
//! # Environment Substitution
//!
//! Inside INI option values, `&NAME&` is replaced with the value of the
//! environment variable `NAME` when it is set:
//!
//! ```ini
//! [paths]
//! datasets = &HOME&/datasets
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use helix_maps::config::ConfigLoader;
//!
//! let loader = ConfigLoader::load()?;
//! let settings = loader.settings()?;
//!
//! println!("Datasets: {}", settings.get_path("paths.datasets")?);
//! ```

mod coerce;
mod env;
mod error;
mod ini;
mod loader;

pub use coerce::{
    coerce_configuration, coerce_configuration_with, substitute_env, ConfigSource, ENV_DELIMITER,
};
pub use env::{EnvSource, MapEnv, ProcessEnv};
pub use error::{ConfigError, ConfigResult};
pub use ini::{IniDocument, DEFAULT_SECTION};
pub use loader::{
    get_default_config_dir, get_default_config_path, resolve_config_path, ConfigDocument,
    ConfigLoader,
};
