//! Dot-notation mapping nodes.
//!
//! [`Maps`] wraps an ordered string-keyed store and exposes each key both
//! as an attribute ([`Maps::attr`], [`Maps::set_attr`]) and as an item
//! ([`Maps::get_item`], [`Maps::set_item`]). Construction converts nested
//! mappings into child nodes, normalizes keys and coerces string values.
//!
//! # Key normalization
//!
//! Only bulk construction normalizes keys: every run of characters outside
//! `[0-9A-Za-z]` becomes a single `_`. Direct writes through `set_item`,
//! `set_attr` and `update` store keys exactly as given; use
//! [`normalize_key`] first when the key comes from untrusted text.
//!
//! # Dynamic mode
//!
//! In dynamic mode (the default) reading an absent key creates an empty
//! child node in place, so chains like `a.b.c = 1` can be built without
//! declaring `a` and `b`:
//!
//! ```
//! use helix_maps::{Maps, Value};
//!
//! let maps = Maps::new();
//! maps.child("a")?.child("b")?.set_attr("c", 1)?;
//! assert_eq!(maps.get_path("a.b.c")?, Value::Int(1));
//! # Ok::<(), helix_maps::MapsError>(())
//! ```
//!
//! # Sharing
//!
//! `Maps` is a shared handle: `clone()` aliases the same node. Use
//! [`Maps::copy`] for an independent structural copy. Nodes are not
//! thread-safe; share them across threads only behind external
//! synchronization of an owning type.

mod build;
mod plain;

pub use build::normalize_key;

use crate::error::{MapsError, MapsResult};
use crate::value::{Dict, Entries, Renderer, Value};
use build::Builder;
use std::cell::RefCell;
use std::cmp::Ordering;
use std::fmt;
use std::ops::Add;
use std::rc::Rc;

/// Attribute name of the dynamic-mode flag.
pub const DYNAMIC_ATTR: &str = "_dynamic";

/// Attribute name of the backing store.
pub const MAP_ATTR: &str = "_map";

/// Name probed by interactive inspectors to test object-likeness. It is
/// never synthesized by dynamic mode.
pub const PROBE_ATTR: &str = "_ipython_canary_method_should_not_exist_";

#[derive(Debug, Default)]
struct Node {
    map: Entries,
    dynamic: bool,
}

/// An ordered mapping node with attribute-style access.
#[derive(Clone)]
pub struct Maps {
    inner: Rc<RefCell<Node>>,
}

impl Default for Maps {
    fn default() -> Self {
        Self::new()
    }
}

impl Maps {
    /// Type name used in renderings and error messages.
    pub const TYPE_NAME: &'static str = "Maps";

    /// An empty node in dynamic mode.
    pub fn new() -> Self {
        Self::with_dynamic(true)
    }

    pub fn with_dynamic(dynamic: bool) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Node {
                map: Entries::new(),
                dynamic,
            })),
        }
    }

    /// Build a node from named entries and/or a positional mapping.
    ///
    /// Named entries are applied first, then the entries of `source`; a
    /// later entry whose normalized key collides with an earlier one wins.
    /// An entry named [`DYNAMIC_ATTR`] sets the dynamic flag (it must be a
    /// bool) instead of becoming data, and the flag is inherited by every
    /// child node built here.
    ///
    /// Nested mappings become child nodes. A source mapping reached more
    /// than once (including the source itself) is converted once and then
    /// linked, so cyclic inputs terminate. Strings go through
    /// [`coerce_scalar`](crate::coerce_scalar).
    ///
    /// # Errors
    ///
    /// `InvalidArgument` when `source` is not a mapping or the dynamic
    /// entry is not a bool.
    pub fn construct<K, V>(
        source: Option<&Value>,
        entries: impl IntoIterator<Item = (K, V)>,
    ) -> MapsResult<Self>
    where
        K: AsRef<str>,
        V: Into<Value>,
    {
        if let Some(source) = source {
            if !source.is_mapping() {
                return Err(MapsError::invalid_argument(format!(
                    "object passed to constructor must be a mapping: '{}'",
                    source.type_name()
                )));
            }
        }

        let node = Self::new();
        let mut named = Vec::new();
        for (key, value) in entries {
            let key = key.as_ref();
            let value = value.into();
            if key == DYNAMIC_ATTR {
                let dynamic = value.as_bool().ok_or_else(|| {
                    MapsError::invalid_argument(format!(
                        "'{DYNAMIC_ATTR}' must be a bool, not '{}'",
                        value.type_name()
                    ))
                })?;
                node.set_dynamic(dynamic);
            } else {
                named.push((key.to_string(), value));
            }
        }

        let mut builder = Builder::new(node.is_dynamic());
        if let Some(id) = source.and_then(Value::mapping_id) {
            builder.register(id, &node);
        }
        builder.fill(&node, named);
        if let Some(items) = source.and_then(Value::mapping_items) {
            builder.fill(&node, items);
        }
        Ok(node)
    }

    /// Build a node from a mapping value.
    pub fn from_value(source: &Value) -> MapsResult<Self> {
        Self::construct(Some(source), std::iter::empty::<(&str, Value)>())
    }

    /// Build a dynamic node from a plain dict.
    pub fn from_dict(dict: &Dict) -> Self {
        Self::from_dict_with(dict, true)
    }

    pub fn from_dict_with(dict: &Dict, dynamic: bool) -> Self {
        let node = Self::with_dynamic(dynamic);
        let mut builder = Builder::new(dynamic);
        builder.register(dict.id(), &node);
        builder.fill(&node, dict.items());
        node
    }

    /// Build a node from named entries only.
    pub fn from_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> MapsResult<Self>
    where
        K: AsRef<str>,
        V: Into<Value>,
    {
        Self::construct(None, entries)
    }

    /// A node with every key in `keys` set to `value`. Keys are stored as
    /// given.
    pub fn from_keys<K: Into<String>>(keys: impl IntoIterator<Item = K>, value: Value) -> Self {
        let node = Self::new();
        for key in keys {
            node.insert_raw(key.into(), value.clone());
        }
        node
    }

    /// Storage address, stable for the lifetime of the node.
    pub fn id(&self) -> usize {
        Rc::as_ptr(&self.inner) as usize
    }

    /// Whether both handles refer to the same node.
    pub fn ptr_eq(&self, other: &Maps) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    pub fn is_dynamic(&self) -> bool {
        self.inner.borrow().dynamic
    }

    pub fn set_dynamic(&self, dynamic: bool) {
        self.inner.borrow_mut().dynamic = dynamic;
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().map.len()
    }

    /// True exactly when the node holds no keys.
    pub fn is_empty(&self) -> bool {
        self.inner.borrow().map.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.inner.borrow().map.contains_key(key)
    }

    pub fn keys(&self) -> Vec<String> {
        self.inner.borrow().map.keys().cloned().collect()
    }

    pub fn values(&self) -> Vec<Value> {
        self.inner.borrow().map.values().cloned().collect()
    }

    pub fn items(&self) -> Vec<(String, Value)> {
        self.inner
            .borrow()
            .map
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Value at `key`, without dynamic creation.
    pub fn get(&self, key: &str) -> Option<Value> {
        self.inner.borrow().map.get(key).cloned()
    }

    pub fn get_or(&self, key: &str, default: Value) -> Value {
        self.get(key).unwrap_or(default)
    }

    pub(crate) fn insert_raw(&self, key: String, value: Value) {
        self.inner.borrow_mut().map.insert(key, value);
    }

    /// Keyed read. An absent key is created as an empty child node in
    /// dynamic mode (except for [`PROBE_ATTR`]) and is an error otherwise.
    pub fn get_item(&self, key: &str) -> MapsResult<Value> {
        if let Some(value) = self.get(key) {
            return Ok(value);
        }
        if !self.is_dynamic() || key == PROBE_ATTR {
            return Err(MapsError::key_not_found(key));
        }

        let child = Self::with_dynamic(true);
        self.insert_raw(key.to_string(), Value::Node(child.clone()));
        Ok(Value::Node(child))
    }

    /// Keyed write; overwrites any previous value. The key is not
    /// normalized.
    pub fn set_item(&self, key: impl Into<String>, value: impl Into<Value>) {
        self.insert_raw(key.into(), value.into());
    }

    pub fn del_item(&self, key: &str) -> MapsResult<()> {
        self.inner
            .borrow_mut()
            .map
            .shift_remove(key)
            .map(|_| ())
            .ok_or_else(|| MapsError::key_not_found(key))
    }

    /// Attribute read.
    ///
    /// [`DYNAMIC_ATTR`] yields the flag and [`MAP_ATTR`] a shallow plain
    /// snapshot of the store; [`PROBE_ATTR`] is always absent. Other names
    /// behave like [`get_item`](Self::get_item).
    pub fn attr(&self, name: &str) -> MapsResult<Value> {
        match name {
            DYNAMIC_ATTR => Ok(Value::Bool(self.is_dynamic())),
            MAP_ATTR => Ok(Value::Dict(Dict::from_entries(
                self.inner.borrow().map.clone(),
            ))),
            PROBE_ATTR => Err(MapsError::key_not_found(name)),
            _ => self.get_item(name),
        }
    }

    /// Attribute write. [`DYNAMIC_ATTR`] takes a bool; [`MAP_ATTR`] takes a
    /// mapping whose entries replace the store. Other names behave like
    /// [`set_item`](Self::set_item).
    pub fn set_attr(&self, name: &str, value: impl Into<Value>) -> MapsResult<()> {
        let value = value.into();
        match name {
            DYNAMIC_ATTR => {
                let dynamic = value.as_bool().ok_or_else(|| {
                    MapsError::type_mismatch(format!(
                        "'{DYNAMIC_ATTR}' must be a bool, not '{}'",
                        value.type_name()
                    ))
                })?;
                self.set_dynamic(dynamic);
            }
            MAP_ATTR => {
                let items = value.mapping_items().ok_or_else(|| {
                    MapsError::type_mismatch(format!(
                        "'{MAP_ATTR}' must be a mapping, not '{}'",
                        value.type_name()
                    ))
                })?;
                self.inner.borrow_mut().map = items.into_iter().collect();
            }
            _ => self.set_item(name, value),
        }
        Ok(())
    }

    pub fn del_attr(&self, name: &str) -> MapsResult<()> {
        if matches!(name, DYNAMIC_ATTR | MAP_ATTR) {
            return Err(MapsError::invalid_argument(format!(
                "cannot delete reserved attribute '{name}'"
            )));
        }
        self.del_item(name)
    }

    /// Attribute read that must yield a node.
    pub fn child(&self, name: &str) -> MapsResult<Maps> {
        match self.attr(name)? {
            Value::Node(node) => Ok(node),
            other => Err(MapsError::type_mismatch(format!(
                "'{name}' holds '{}', not '{}'",
                other.type_name(),
                Self::TYPE_NAME
            ))),
        }
    }

    /// Chained attribute read over a dotted path (`"a.b.c"`).
    pub fn get_path(&self, path: &str) -> MapsResult<Value> {
        let (parent, last) = self.walk(path)?;
        parent.attr(last)
    }

    /// Chained attribute write over a dotted path; intermediate nodes are
    /// created in dynamic mode.
    pub fn set_path(&self, path: &str, value: impl Into<Value>) -> MapsResult<()> {
        let (parent, last) = self.walk(path)?;
        parent.set_attr(last, value)
    }

    /// Read-only lookup over a dotted path; never creates nodes.
    pub fn lookup(&self, path: &str) -> Option<Value> {
        let mut current = Value::Node(self.clone());
        for segment in path.split('.') {
            current = current.as_maps()?.get(segment)?;
        }
        Some(current)
    }

    fn walk<'p>(&self, path: &'p str) -> MapsResult<(Maps, &'p str)> {
        let mut segments: Vec<&str> = path.split('.').collect();
        let last = segments.pop().unwrap_or_default();
        if last.is_empty() || segments.iter().any(|s| s.is_empty()) {
            return Err(MapsError::invalid_argument(format!("invalid path '{path}'")));
        }

        let mut node = self.clone();
        for segment in segments {
            node = node.child(segment)?;
        }
        Ok((node, last))
    }

    /// Remove `key` and return its value.
    pub fn pop(&self, key: &str) -> Option<Value> {
        self.inner.borrow_mut().map.shift_remove(key)
    }

    /// Remove `key` and return its value, or `default` when absent.
    pub fn pop_or(&self, key: &str, default: Value) -> Value {
        self.pop(key).unwrap_or(default)
    }

    /// Remove and return the most recently inserted entry.
    pub fn pop_item(&self) -> MapsResult<(String, Value)> {
        self.inner
            .borrow_mut()
            .map
            .pop()
            .ok_or_else(|| MapsError::key_not_found("popitem(): Maps is empty"))
    }

    /// Value at `key`, inserting `default` first when absent.
    pub fn setdefault(&self, key: &str, default: Value) -> Value {
        self.inner
            .borrow_mut()
            .map
            .entry(key.to_string())
            .or_insert(default)
            .clone()
    }

    /// Merge entries as given: no normalization, no conversion of nested
    /// mappings.
    ///
    /// `source` may be a mapping or a sequence of `(key, value)` pairs;
    /// `entries` are applied after it.
    pub fn update<K, V>(
        &self,
        source: Option<&Value>,
        entries: impl IntoIterator<Item = (K, V)>,
    ) -> MapsResult<()>
    where
        K: Into<String>,
        V: Into<Value>,
    {
        if let Some(source) = source {
            for (key, value) in update_pairs(source)? {
                self.insert_raw(key, value);
            }
        }
        for (key, value) in entries {
            self.insert_raw(key.into(), value.into());
        }
        Ok(())
    }

    pub fn clear(&self) {
        self.inner.borrow_mut().map.clear();
    }

    /// `self + value`: an empty node is a neutral element and yields
    /// `value`; any other node is an error.
    pub fn add(&self, value: Value) -> MapsResult<Value> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(MapsError::type_mismatch(format!(
                "unsupported operand type(s) for +: '{}' and '{}'",
                Self::TYPE_NAME,
                value.type_name()
            )))
        }
    }

    /// Order this node against another mapping.
    pub fn compare(&self, other: &Value) -> MapsResult<Ordering> {
        self.compare_op(other, "cmp")
    }

    fn compare_op(&self, other: &Value, op: &'static str) -> MapsResult<Ordering> {
        Value::Node(self.clone()).try_cmp(other, op)
    }

    pub fn lt(&self, other: &Value) -> MapsResult<bool> {
        Ok(self.compare_op(other, "<")?.is_lt())
    }

    pub fn le(&self, other: &Value) -> MapsResult<bool> {
        Ok(self.compare_op(other, "<=")?.is_le())
    }

    pub fn gt(&self, other: &Value) -> MapsResult<bool> {
        Ok(self.compare_op(other, ">")?.is_gt())
    }

    pub fn ge(&self, other: &Value) -> MapsResult<bool> {
        Ok(self.compare_op(other, ">=")?.is_ge())
    }

    /// Independent copy rebuilt through construction.
    pub fn copy(&self) -> Maps {
        let node = Self::with_dynamic(self.is_dynamic());
        let mut builder = Builder::new(self.is_dynamic());
        builder.register(self.id(), &node);
        builder.fill(&node, self.items());
        node
    }

    /// Same as [`copy`](Self::copy); construction already copies the
    /// whole structure.
    pub fn deep_copy(&self) -> Maps {
        self.copy()
    }
}

fn update_pairs(source: &Value) -> MapsResult<Vec<(String, Value)>> {
    if let Some(items) = source.mapping_items() {
        return Ok(items);
    }
    let Some(elements) = source.as_slice() else {
        return Err(MapsError::invalid_argument(format!(
            "'{}' object is not a mapping or a sequence of pairs",
            source.type_name()
        )));
    };

    elements
        .iter()
        .enumerate()
        .map(|(i, element)| match element.as_slice() {
            Some([Value::Str(key), value]) => Ok((key.clone(), value.clone())),
            _ => Err(MapsError::invalid_argument(format!(
                "update sequence element #{i} is not a (str, value) pair"
            ))),
        })
        .collect()
}

impl fmt::Display for Maps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        Renderer::default().node(self, &mut out);
        f.write_str(&out)
    }
}

impl fmt::Debug for Maps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl PartialEq for Maps {
    fn eq(&self, other: &Self) -> bool {
        Value::Node(self.clone()) == Value::Node(other.clone())
    }
}

impl PartialEq<Value> for Maps {
    fn eq(&self, other: &Value) -> bool {
        Value::Node(self.clone()) == *other
    }
}

impl PartialEq<Dict> for Maps {
    fn eq(&self, other: &Dict) -> bool {
        Value::Node(self.clone()) == Value::Dict(other.clone())
    }
}

impl PartialOrd for Maps {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.compare(&Value::Node(other.clone())).ok()
    }
}

impl Add<Value> for &Maps {
    type Output = MapsResult<Value>;

    fn add(self, rhs: Value) -> Self::Output {
        Maps::add(self, rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> Dict {
        [
            ("hello", Value::from("world")),
            ("should_be_int", Value::from("32")),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_construct_coerces_strings() {
        let maps = Maps::from_dict(&sample());
        assert_eq!(maps.attr("hello").unwrap(), Value::from("world"));
        assert_eq!(maps.attr("should_be_int").unwrap(), Value::Int(32));
    }

    #[test]
    fn test_keys_are_normalized() {
        let dict: Dict = [("hello joh*&^n", "hi computer")].into_iter().collect();
        let maps = Maps::from_dict(&dict);
        assert_eq!(maps.keys(), vec!["hello_joh_n"]);
        assert_eq!(maps.to_string(), "Maps(hello_joh_n='hi computer')");
    }

    #[test]
    fn test_normalized_collision_last_wins() {
        let dict: Dict = [("a b", 1), ("a-b", 2)].into_iter().collect();
        let maps = Maps::from_dict(&dict);
        assert_eq!(maps.len(), 1);
        assert_eq!(maps.get("a_b"), Some(Value::Int(2)));
    }

    #[test]
    fn test_named_entries_before_source() {
        let source: Dict = [("b", 2), ("a", 10)].into_iter().collect();
        let maps = Maps::construct(
            Some(&Value::Dict(source)),
            [("a", Value::Int(1)), ("z", Value::Int(0))],
        )
        .unwrap();
        assert_eq!(maps.keys(), vec!["a", "z", "b"]);
        assert_eq!(maps.get("a"), Some(Value::Int(10)));
    }

    #[test]
    fn test_dynamic_entry_sets_flag() {
        let source: Dict = [("inner", Value::Dict(Dict::new()))].into_iter().collect();
        let maps = Maps::construct(
            Some(&Value::Dict(source)),
            [(DYNAMIC_ATTR, Value::Bool(false))],
        )
        .unwrap();
        assert!(!maps.is_dynamic());
        assert!(!maps.contains_key(DYNAMIC_ATTR));
        assert!(!maps.child("inner").unwrap().is_dynamic());

        let err = Maps::from_entries([(DYNAMIC_ATTR, Value::Int(1))]).unwrap_err();
        assert!(matches!(err, MapsError::InvalidArgument(_)));
    }

    #[test]
    fn test_source_must_be_mapping() {
        let err = Maps::from_value(&Value::List(vec![])).unwrap_err();
        assert!(matches!(err, MapsError::InvalidArgument(msg) if msg.contains("'list'")));
    }

    #[test]
    fn test_dynamic_chain() {
        let maps = Maps::new();
        maps.set_path("a.b.c", 1).unwrap();
        assert_eq!(maps.get_path("a.b.c").unwrap(), Value::Int(1));
        assert!(maps.get("a").unwrap().as_maps().is_some());
    }

    #[test]
    fn test_static_mode_missing_key() {
        let maps = Maps::with_dynamic(false);
        assert_eq!(
            maps.attr("missing").unwrap_err(),
            MapsError::key_not_found("missing")
        );
        assert!(maps.is_empty());
    }

    #[test]
    fn test_probe_never_created() {
        let maps = Maps::new();
        assert!(maps.attr(PROBE_ATTR).is_err());
        assert!(maps.get_item(PROBE_ATTR).is_err());
        assert!(maps.is_empty());
    }

    #[test]
    fn test_reserved_attributes() {
        let maps = Maps::new();
        maps.set_attr(DYNAMIC_ATTR, false).unwrap();
        assert_eq!(maps.attr(DYNAMIC_ATTR).unwrap(), Value::Bool(false));
        assert!(maps.set_attr(DYNAMIC_ATTR, "no").is_err());

        let replacement: Dict = [("x", 1)].into_iter().collect();
        maps.set_attr(MAP_ATTR, replacement).unwrap();
        assert_eq!(maps.keys(), vec!["x"]);
        let snapshot = maps.attr(MAP_ATTR).unwrap();
        assert_eq!(snapshot.as_dict().unwrap().get("x"), Some(Value::Int(1)));
        assert!(maps.del_attr(MAP_ATTR).is_err());
    }

    #[test]
    fn test_direct_writes_are_not_normalized() {
        let maps = Maps::new();
        maps.set_item("a b", 1);
        assert!(maps.contains_key("a b"));
        assert!(!maps.contains_key("a_b"));
    }

    #[test]
    fn test_delete() {
        let maps = Maps::from_dict(&sample());
        maps.del_attr("hello").unwrap();
        assert_eq!(
            maps.del_item("hello").unwrap_err(),
            MapsError::key_not_found("hello")
        );
    }

    #[test]
    fn test_pop_by_key() {
        let maps = Maps::from_dict(&sample());
        assert_eq!(maps.pop("should_be_int"), Some(Value::Int(32)));
        assert_eq!(maps.pop_or("missing", Value::from("dflt")), Value::from("dflt"));
        assert_eq!(maps.keys(), vec!["hello"]);
    }

    #[test]
    fn test_pop_item_is_lifo() {
        let maps = Maps::from_dict(&sample());
        let (key, _) = maps.pop_item().unwrap();
        assert_eq!(key, "should_be_int");
        maps.clear();
        assert!(maps.pop_item().is_err());
    }

    #[test]
    fn test_setdefault() {
        let maps = Maps::new();
        assert_eq!(maps.setdefault("k", Value::Int(1)), Value::Int(1));
        assert_eq!(maps.setdefault("k", Value::Int(2)), Value::Int(1));
    }

    #[test]
    fn test_update_is_raw() {
        let maps = Maps::new();
        let source: Dict = [("x y", "5")].into_iter().collect();
        maps.update(Some(&Value::Dict(source)), [("k", 1)]).unwrap();
        assert_eq!(maps.get("x y"), Some(Value::from("5")));
        assert_eq!(maps.get("k"), Some(Value::Int(1)));

        let pairs = Value::List(vec![Value::Tuple(vec![Value::from("p"), Value::Int(9)])]);
        maps.update(Some(&pairs), Vec::<(String, Value)>::new()).unwrap();
        assert_eq!(maps.get("p"), Some(Value::Int(9)));

        assert!(maps
            .update(Some(&Value::Int(3)), Vec::<(String, Value)>::new())
            .is_err());
    }

    #[test]
    fn test_add_identity_only_when_empty() {
        let empty = Maps::new();
        assert_eq!((&empty + Value::Int(5)).unwrap(), Value::Int(5));

        let full = Maps::from_dict(&sample());
        let err = (&full + Value::Int(5)).unwrap_err();
        assert_eq!(
            err,
            MapsError::type_mismatch("unsupported operand type(s) for +: 'Maps' and 'int'")
        );
    }

    #[test]
    fn test_equality() {
        let a = Maps::from_dict(&sample());
        let b = Maps::from_dict(&sample());
        assert_eq!(a, b);
        assert_eq!(a, a.to_plain());
        assert_ne!(a, Value::Int(1));

        let reordered: Dict = [("should_be_int", Value::Int(32)), ("hello", Value::from("world"))]
            .into_iter()
            .collect();
        assert_eq!(a, reordered);
        assert_ne!(a, Maps::from_dict(&reordered));
    }

    #[test]
    fn test_ordering() {
        let a = Maps::from_entries([("k", 1)]).unwrap();
        let b = Maps::from_entries([("k", 2)]).unwrap();
        assert!(a < b);
        assert!(a.lt(&Value::Node(b.clone())).unwrap());
        assert!(b.ge(&Value::Node(a)).unwrap());
        assert!(matches!(
            b.lt(&Value::Int(1)),
            Err(MapsError::Incomparable { op: "<", .. })
        ));
    }

    #[test]
    fn test_copy_is_independent() {
        let original = Maps::from_dict(&sample());
        let copy = original.copy();
        copy.set_item("hello", "changed");
        assert_eq!(original.get("hello"), Some(Value::from("world")));
        assert_eq!(original.deep_copy(), original);
    }

    #[test]
    fn test_from_keys() {
        let maps = Maps::from_keys(["a", "b"], Value::None);
        assert_eq!(maps.to_string(), "Maps(a=None, b=None)");
    }

    #[test]
    fn test_lookup_does_not_create() {
        let maps = Maps::new();
        assert_eq!(maps.lookup("a.b"), None);
        assert!(maps.is_empty());
    }
}
