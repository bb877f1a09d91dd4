//! Literal-syntax rendering with cycle markers.

use super::{Dict, Value};
use crate::maps::Maps;
use std::fmt::Write;

/// Renders values while tracking the mappings currently being rendered,
/// so a mapping reached again through its own contents prints a marker
/// instead of recursing.
#[derive(Default)]
pub(crate) struct Renderer {
    active: Vec<usize>,
}

impl Renderer {
    pub(crate) fn value(&mut self, value: &Value, out: &mut String) {
        match value {
            Value::None => out.push_str("None"),
            Value::Bool(true) => out.push_str("True"),
            Value::Bool(false) => out.push_str("False"),
            Value::Int(i) => {
                let _ = write!(out, "{i}");
            }
            Value::Float(f) => out.push_str(&float_repr(*f)),
            Value::Str(s) => string_repr(s, out),
            Value::List(items) => {
                out.push('[');
                self.items(items, out);
                out.push(']');
            }
            Value::Tuple(items) => {
                out.push('(');
                self.items(items, out);
                if items.len() == 1 {
                    out.push(',');
                }
                out.push(')');
            }
            Value::Dict(d) => self.dict(d, out),
            Value::Node(m) => self.node(m, out),
        }
    }

    fn items(&mut self, items: &[Value], out: &mut String) {
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            self.value(item, out);
        }
    }

    pub(crate) fn dict(&mut self, dict: &Dict, out: &mut String) {
        if self.active.contains(&dict.id()) {
            out.push_str("{...}");
            return;
        }
        self.active.push(dict.id());
        out.push('{');
        for (i, (key, value)) in dict.items().iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            string_repr(key, out);
            out.push_str(": ");
            self.value(value, out);
        }
        out.push('}');
        self.active.pop();
    }

    /// `Maps(key=value, ...)`; a node nested inside itself prints `Maps(...)`.
    pub(crate) fn node(&mut self, maps: &Maps, out: &mut String) {
        if self.active.contains(&maps.id()) {
            out.push_str(Maps::TYPE_NAME);
            out.push_str("(...)");
            return;
        }
        self.active.push(maps.id());
        out.push_str(Maps::TYPE_NAME);
        out.push('(');
        for (i, (key, value)) in maps.items().iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            out.push_str(key);
            out.push('=');
            self.value(value, out);
        }
        out.push(')');
        self.active.pop();
    }
}

fn float_repr(f: f64) -> String {
    if f.is_nan() {
        "nan".to_string()
    } else if f.is_infinite() {
        let text = if f > 0.0 { "inf" } else { "-inf" };
        text.to_string()
    } else {
        format!("{f:?}")
    }
}

fn string_repr(s: &str, out: &mut String) {
    let quote = if s.contains('\'') && !s.contains('"') {
        '"'
    } else {
        '\''
    };
    out.push(quote);
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out.push(quote);
}
