//! Conversion of mapping nodes back to plain dicts.

use super::Maps;
use crate::value::{Dict, Value};

impl Maps {
    /// Recursively convert this node into a plain [`Dict`].
    ///
    /// A node that contains one of its ancestors (itself included) maps
    /// that slot to the ancestor's plain dict under construction, so the
    /// result has the same shape of cycle.
    pub fn to_plain(&self) -> Dict {
        let mut active = Vec::new();
        self.plain_into(&mut active)
    }

    fn plain_into(&self, active: &mut Vec<(usize, Dict)>) -> Dict {
        let out = Dict::new();
        active.push((self.id(), out.clone()));
        for (key, value) in self.items() {
            let value = plain_value(&value, active);
            out.insert(key, value);
        }
        active.pop();
        out
    }
}

fn plain_value(value: &Value, active: &mut Vec<(usize, Dict)>) -> Value {
    match value {
        Value::Node(node) => {
            let ancestor = active
                .iter()
                .find(|(id, _)| *id == node.id())
                .map(|(_, dict)| dict.clone());
            Value::Dict(ancestor.unwrap_or_else(|| node.plain_into(active)))
        }
        Value::List(items) => Value::List(items.iter().map(|v| plain_value(v, active)).collect()),
        Value::Tuple(items) => Value::Tuple(items.iter().map(|v| plain_value(v, active)).collect()),
        other => other.clone(),
    }
}
