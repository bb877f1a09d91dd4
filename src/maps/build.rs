//! Recursive construction of mapping nodes.

use super::Maps;
use crate::value::{coerce_scalar, Value};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use tracing::debug;

static NON_ALPHANUMERIC: Lazy<Regex> =
    Lazy::new(|| Regex::new("[^0-9A-Za-z]+").expect("key pattern is valid"));

/// Collapse every run of characters outside `[0-9A-Za-z]` into one `_`.
///
/// Distinct keys can normalize to the same string (`"a b"` and `"a-b"`),
/// in which case the later one overwrites the earlier during construction.
pub fn normalize_key(key: &str) -> String {
    NON_ALPHANUMERIC.replace_all(key, "_").into_owned()
}

/// State for one top-level construction: the dynamic flag inherited by
/// every child and the registry from source identity to built node.
pub(super) struct Builder {
    dynamic: bool,
    seen: HashMap<usize, Maps>,
}

impl Builder {
    pub(super) fn new(dynamic: bool) -> Self {
        Self {
            dynamic,
            seen: HashMap::new(),
        }
    }

    pub(super) fn register(&mut self, source_id: usize, node: &Maps) {
        self.seen.insert(source_id, node.clone());
    }

    /// Normalize and convert `entries` into `node`, in order.
    pub(super) fn fill(&mut self, node: &Maps, entries: Vec<(String, Value)>) {
        for (key, value) in entries {
            let value = self.convert(&value);
            node.insert_raw(normalize_key(&key), value);
        }
    }

    fn convert(&mut self, value: &Value) -> Value {
        match value {
            Value::Dict(_) | Value::Node(_) => Value::Node(self.node_for(value)),
            Value::List(items) => Value::List(self.convert_items(items)),
            Value::Tuple(items) => Value::Tuple(self.convert_items(items)),
            Value::Str(s) => coerce_scalar(s),
            other => other.clone(),
        }
    }

    /// Mappings inside a sequence become nodes; other elements are kept.
    fn convert_items(&mut self, items: &[Value]) -> Vec<Value> {
        items
            .iter()
            .map(|item| {
                if item.is_mapping() {
                    Value::Node(self.node_for(item))
                } else {
                    item.clone()
                }
            })
            .collect()
    }

    fn node_for(&mut self, mapping: &Value) -> Maps {
        let id = mapping.mapping_id().unwrap_or_default();
        if let Some(existing) = self.seen.get(&id) {
            debug!(source = id, "linking repeated mapping to its existing node");
            return existing.clone();
        }

        let node = Maps::with_dynamic(self.dynamic);
        self.register(id, &node);
        let entries = mapping.mapping_items().unwrap_or_default();
        self.fill(&node, entries);
        node
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_key() {
        assert_eq!(normalize_key("hello"), "hello");
        assert_eq!(normalize_key("hello joh*&^n"), "hello_joh_n");
        assert_eq!(normalize_key("--lead"), "_lead");
        assert_eq!(normalize_key("_dynamic"), "_dynamic");
        assert_eq!(normalize_key("caf\u{e9} au lait"), "caf_au_lait");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for key in ["a  b", "x.y.z", "__", "plain"] {
            let once = normalize_key(key);
            assert_eq!(normalize_key(&once), once);
        }
    }
}
