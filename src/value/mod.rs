//! Dynamic values stored in mapping nodes.
//!
//! A [`Value`] is either a scalar, a sequence, a plain ordered mapping
//! ([`Dict`]) or a mapping node ([`Maps`]). Mappings are shared handles:
//! cloning one aliases the same storage, and the storage address is the
//! identity used for cycle detection.

mod compare;
mod convert;
mod literal;
mod render;

pub use literal::{coerce_scalar, parse_literal, LiteralError, MAX_NESTING_DEPTH};

pub(crate) use render::Renderer;

use crate::maps::Maps;
use indexmap::IndexMap;
use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;

/// Ordered key/value storage backing both [`Dict`] and [`Maps`].
pub type Entries = IndexMap<String, Value>;

/// A dynamically typed value.
#[derive(Clone, Default)]
pub enum Value {
    #[default]
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<Value>),
    Tuple(Vec<Value>),
    Dict(Dict),
    Node(Maps),
}

impl Value {
    /// Name of the value's type, as used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::None => "NoneType",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Str(_) => "str",
            Self::List(_) => "list",
            Self::Tuple(_) => "tuple",
            Self::Dict(_) => "dict",
            Self::Node(_) => "Maps",
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// True for plain dicts and mapping nodes.
    pub fn is_mapping(&self) -> bool {
        matches!(self, Self::Dict(_) | Self::Node(_))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Numeric view of ints and floats.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            Self::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Elements of a list or tuple.
    pub fn as_slice(&self) -> Option<&[Value]> {
        match self {
            Self::List(items) | Self::Tuple(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_dict(&self) -> Option<&Dict> {
        match self {
            Self::Dict(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_maps(&self) -> Option<&Maps> {
        match self {
            Self::Node(m) => Some(m),
            _ => None,
        }
    }

    /// Literal-syntax rendering of the value.
    pub fn repr(&self) -> String {
        let mut out = String::new();
        Renderer::default().value(self, &mut out);
        out
    }

    /// Storage identity of a mapping value.
    pub(crate) fn mapping_id(&self) -> Option<usize> {
        match self {
            Self::Dict(d) => Some(d.id()),
            Self::Node(m) => Some(m.id()),
            _ => None,
        }
    }

    /// Snapshot of a mapping value's entries, in order.
    pub(crate) fn mapping_items(&self) -> Option<Vec<(String, Value)>> {
        match self {
            Self::Dict(d) => Some(d.items()),
            Self::Node(m) => Some(m.items()),
            _ => None,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.repr())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => f.write_str(s),
            other => f.write_str(&other.repr()),
        }
    }
}

/// A plain ordered mapping with shared ownership.
///
/// This is the "plain dictionary" form that [`Maps`] is built from and
/// converted back into.
#[derive(Clone, Default)]
pub struct Dict {
    inner: Rc<RefCell<Entries>>,
}

impl Dict {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: Entries) -> Self {
        Self {
            inner: Rc::new(RefCell::new(entries)),
        }
    }

    /// Storage address, stable for the lifetime of the dict.
    pub fn id(&self) -> usize {
        Rc::as_ptr(&self.inner) as usize
    }

    /// Whether both handles refer to the same storage.
    pub fn ptr_eq(&self, other: &Dict) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.inner.borrow().contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        self.inner.borrow().get(key).cloned()
    }

    /// Insert or overwrite `key`, keeping its position if it already exists.
    pub fn insert(&self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.inner.borrow_mut().insert(key.into(), value.into())
    }

    pub fn remove(&self, key: &str) -> Option<Value> {
        self.inner.borrow_mut().shift_remove(key)
    }

    pub fn keys(&self) -> Vec<String> {
        self.inner.borrow().keys().cloned().collect()
    }

    pub fn items(&self) -> Vec<(String, Value)> {
        self.inner
            .borrow()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    pub fn borrow(&self) -> Ref<'_, Entries> {
        self.inner.borrow()
    }

    pub fn borrow_mut(&self) -> RefMut<'_, Entries> {
        self.inner.borrow_mut()
    }
}

impl fmt::Debug for Dict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        Renderer::default().dict(self, &mut out);
        f.write_str(&out)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Dict {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let entries = iter
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self::from_entries(entries)
    }
}
