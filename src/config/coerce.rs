//! Turning raw configuration strings into typed values.
//!
//! Each option value first has `&NAME&` spans replaced from the
//! environment, then goes through [`coerce_scalar`].

use super::env::{EnvSource, ProcessEnv};
use super::error::ConfigResult;
use super::ini::IniDocument;
use crate::error::MapsError;
use crate::maps::Maps;
use crate::value::{coerce_scalar, Dict, Value};
use std::collections::HashSet;
use tracing::trace;

/// Character bracketing an environment variable name: `&HOME&/data`.
pub const ENV_DELIMITER: char = '&';

/// Input accepted by [`coerce_configuration`].
#[derive(Debug, Clone, Copy)]
pub enum ConfigSource<'a> {
    /// Sections of an INI document.
    Sections(&'a IniDocument),
    /// A plain nested dict; any other value is rejected.
    Value(&'a Value),
}

impl<'a> From<&'a IniDocument> for ConfigSource<'a> {
    fn from(doc: &'a IniDocument) -> Self {
        Self::Sections(doc)
    }
}

impl<'a> From<&'a Value> for ConfigSource<'a> {
    fn from(value: &'a Value) -> Self {
        Self::Value(value)
    }
}

/// Coerce a configuration source using the process environment.
///
/// See [`coerce_configuration_with`].
pub fn coerce_configuration(source: ConfigSource<'_>, as_node: bool) -> ConfigResult<Value> {
    coerce_configuration_with(source, as_node, &ProcessEnv)
}

/// Coerce every string in a configuration source to its literal type.
///
/// Sections become a dict of `section -> {option -> value}` with option
/// values interpolated and environment-substituted. A plain dict is
/// coerced in place, so the caller's handle sees the typed values. The
/// result is a `Value::Dict`, or a `Value::Node` when `as_node` is set.
///
/// # Errors
///
/// `TypeMismatch` when given a value that is not a plain dict; INI
/// interpolation errors when reading sections.
pub fn coerce_configuration_with<E: EnvSource + ?Sized>(
    source: ConfigSource<'_>,
    as_node: bool,
    env: &E,
) -> ConfigResult<Value> {
    let plain = match source {
        ConfigSource::Sections(doc) => sections_to_dict(doc, env)?,
        ConfigSource::Value(Value::Dict(dict)) => dict.clone(),
        ConfigSource::Value(other) => {
            return Err(MapsError::type_mismatch(format!(
                "configuration source must be INI sections or a plain dict: '{}'",
                other.type_name()
            ))
            .into())
        }
    };

    coerce_dict(&plain, &mut HashSet::new());

    Ok(if as_node {
        Value::Node(Maps::from_dict(&plain))
    } else {
        Value::Dict(plain)
    })
}

fn sections_to_dict<E: EnvSource + ?Sized>(doc: &IniDocument, env: &E) -> ConfigResult<Dict> {
    let out = Dict::new();
    for section in doc.sections() {
        let options = Dict::new();
        for option in doc.options(&section)? {
            let raw = doc.get(&section, &option)?;
            options.insert(option, substitute_env(&raw, env));
        }
        out.insert(section, options);
    }
    Ok(out)
}

/// Coerce string values in place, descending into nested dicts once each.
fn coerce_dict(dict: &Dict, visited: &mut HashSet<usize>) {
    if !visited.insert(dict.id()) {
        return;
    }
    for (key, value) in dict.items() {
        match value {
            Value::Dict(child) => coerce_dict(&child, visited),
            Value::Str(text) => {
                dict.insert(key, coerce_scalar(&text));
            }
            _ => {}
        }
    }
}

/// Replace `&NAME&` spans with environment values.
///
/// Delimiters pair up in order (first with second, third with fourth).
/// Text with no delimiters or an odd number of them is returned unchanged,
/// as is any span whose variable is not set.
pub fn substitute_env<E: EnvSource + ?Sized>(text: &str, env: &E) -> String {
    let positions: Vec<usize> = text
        .match_indices(ENV_DELIMITER)
        .map(|(i, _)| i)
        .collect();
    if positions.is_empty() || positions.len() % 2 != 0 {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    for pair in positions.chunks_exact(2) {
        let (start, end) = (pair[0], pair[1]);
        out.push_str(&text[cursor..start]);

        let name = &text[start + 1..end];
        match env.var(name) {
            Some(value) => out.push_str(&value),
            None => {
                trace!(name, "environment variable not set, keeping text");
                out.push_str(&text[start..=end]);
            }
        }
        cursor = end + 1;
    }
    out.push_str(&text[cursor..]);
    out
}

impl IniDocument {
    /// Coerced plain dict of this document's sections.
    pub fn to_dict(&self) -> ConfigResult<Dict> {
        let dict = sections_to_dict(self, &ProcessEnv)?;
        coerce_dict(&dict, &mut HashSet::new());
        Ok(dict)
    }

    /// Coerced mapping node of this document's sections.
    pub fn to_maps(&self) -> ConfigResult<Maps> {
        Ok(Maps::from_dict(&self.to_dict()?))
    }
}
