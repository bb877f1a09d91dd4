//! Helix Maps Library
//!
//! Dot-notation access to nested configuration for the Helix annotation
//! tooling: nested mappings become [`Maps`] nodes whose keys read like
//! attributes, and INI option strings are coerced into typed values.
//!
//! # Modules
//!
//! - `value`: Dynamic values, plain dicts and the literal parser
//! - `maps`: Mapping nodes with attribute and keyed access
//! - `config`: INI reading, environment substitution, coercion and loading
//! - `error`: Mapping node errors
//!
//! # Example
//!
//! ```
//! use helix_maps::{Dict, Maps, Value};
//!
//! let dict: Dict = [("hello", "world"), ("should be int", "32")].into_iter().collect();
//! let maps = Maps::from_dict(&dict);
//!
//! assert_eq!(maps.attr("hello")?, Value::from("world"));
//! assert_eq!(maps.attr("should_be_int")?, Value::Int(32));
//! assert_eq!(maps.to_string(), "Maps(hello='world', should_be_int=32)");
//! # Ok::<(), helix_maps::MapsError>(())
//! ```

pub mod config;
pub mod error;
pub mod maps;
pub mod value;

// Re-export commonly used types for convenience
pub use error::{MapsError, MapsResult};
pub use maps::{normalize_key, Maps, DYNAMIC_ATTR, MAP_ATTR, PROBE_ATTR};
pub use value::{coerce_scalar, parse_literal, Dict, Entries, LiteralError, Value};

// Re-export config types
pub use config::{
    coerce_configuration, ConfigError, ConfigLoader, ConfigResult, ConfigSource, IniDocument,
};
