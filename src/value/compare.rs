//! Equality and ordering between values.

use super::{Dict, Value};
use crate::error::{MapsError, MapsResult};
use crate::maps::Maps;
use indexmap::IndexMap;
use std::cmp::Ordering;

/// `(left, right)` mapping identities currently being compared. A pair
/// met again while still active is a cycle and counts as equal.
type ActivePairs = Vec<(usize, usize)>;

/// 2^63 as a float: the first magnitude outside `i64`.
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        value_eq(self, other, &mut ActivePairs::new())
    }
}

impl PartialEq<Dict> for Value {
    fn eq(&self, other: &Dict) -> bool {
        *self == Value::Dict(other.clone())
    }
}

impl PartialEq for Dict {
    fn eq(&self, other: &Self) -> bool {
        Value::Dict(self.clone()) == Value::Dict(other.clone())
    }
}

impl PartialEq<Maps> for Dict {
    fn eq(&self, other: &Maps) -> bool {
        Value::Dict(self.clone()) == Value::Node(other.clone())
    }
}

fn value_eq(a: &Value, b: &Value, active: &mut ActivePairs) -> bool {
    match (a, b) {
        (Value::None, Value::None) => true,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::Int(x), Value::Int(y)) => x == y,
        (Value::Float(x), Value::Float(y)) => x == y,
        (Value::Int(i), Value::Float(f)) | (Value::Float(f), Value::Int(i)) => {
            cmp_int_float(*i, *f) == Some(Ordering::Equal)
        }
        (Value::Str(x), Value::Str(y)) => x == y,
        (Value::List(x), Value::List(y)) | (Value::Tuple(x), Value::Tuple(y)) => {
            sequence_eq(x, y, active)
        }
        (a, b) if a.is_mapping() && b.is_mapping() => mapping_eq(a, b, active),
        _ => false,
    }
}

fn sequence_eq(a: &[Value], b: &[Value], active: &mut ActivePairs) -> bool {
    if a.len() != b.len() {
        return false;
    }
    for (x, y) in a.iter().zip(b) {
        if !value_eq(x, y, active) {
            return false;
        }
    }
    true
}

/// Two nodes compare entry by entry in order; as soon as a plain dict is
/// involved the comparison ignores order.
fn mapping_eq(a: &Value, b: &Value, active: &mut ActivePairs) -> bool {
    let (Some(left_id), Some(right_id)) = (a.mapping_id(), b.mapping_id()) else {
        return false;
    };
    if left_id == right_id || active.contains(&(left_id, right_id)) {
        return true;
    }
    let (Some(left), Some(right)) = (a.mapping_items(), b.mapping_items()) else {
        return false;
    };
    if left.len() != right.len() {
        return false;
    }

    active.push((left_id, right_id));
    let ordered = matches!((a, b), (Value::Node(_), Value::Node(_)));
    let equal = if ordered {
        entries_eq_ordered(&left, &right, active)
    } else {
        let right: IndexMap<String, Value> = right.into_iter().collect();
        entries_eq_unordered(&left, &right, active)
    };
    active.pop();
    equal
}

fn entries_eq_ordered(
    left: &[(String, Value)],
    right: &[(String, Value)],
    active: &mut ActivePairs,
) -> bool {
    for ((ka, va), (kb, vb)) in left.iter().zip(right) {
        if ka != kb || !value_eq(va, vb, active) {
            return false;
        }
    }
    true
}

fn entries_eq_unordered(
    left: &[(String, Value)],
    right: &IndexMap<String, Value>,
    active: &mut ActivePairs,
) -> bool {
    for (key, value) in left {
        match right.get(key) {
            Some(other) if value_eq(value, other, active) => {}
            _ => return false,
        }
    }
    true
}

/// Exact ordering of an int against a float; `None` for NaN.
fn cmp_int_float(i: i64, f: f64) -> Option<Ordering> {
    if f.is_nan() {
        return None;
    }
    if f >= I64_BOUND {
        return Some(Ordering::Less);
    }
    if f < -I64_BOUND {
        return Some(Ordering::Greater);
    }
    let floor = f.floor();
    match i.cmp(&(floor as i64)) {
        Ordering::Equal if f > floor => Some(Ordering::Less),
        other => Some(other),
    }
}

impl Value {
    /// Order two values, failing when they are not mutually comparable.
    ///
    /// Numbers order numerically, strings and bools by value, sequences
    /// and mappings lexicographically (mappings over their `(key, value)`
    /// entries). `op` names the operator for the error message.
    pub fn try_cmp(&self, other: &Value, op: &'static str) -> MapsResult<Ordering> {
        cmp_values(self, other, op, &mut ActivePairs::new())
    }
}

fn cmp_values(
    a: &Value,
    b: &Value,
    op: &'static str,
    active: &mut ActivePairs,
) -> MapsResult<Ordering> {
    let incomparable = || MapsError::Incomparable {
        op,
        left: a.type_name(),
        right: b.type_name(),
    };

    match (a, b) {
        (Value::Int(x), Value::Int(y)) => Ok(x.cmp(y)),
        (Value::Float(x), Value::Float(y)) => x.partial_cmp(y).ok_or_else(incomparable),
        (Value::Int(i), Value::Float(f)) => cmp_int_float(*i, *f).ok_or_else(incomparable),
        (Value::Float(f), Value::Int(i)) => cmp_int_float(*i, *f)
            .map(Ordering::reverse)
            .ok_or_else(incomparable),
        (Value::Bool(x), Value::Bool(y)) => Ok(x.cmp(y)),
        (Value::Str(x), Value::Str(y)) => Ok(x.cmp(y)),
        (Value::List(x), Value::List(y)) | (Value::Tuple(x), Value::Tuple(y)) => {
            cmp_sequences(x, y, op, active)
        }
        (a, b) if a.is_mapping() && b.is_mapping() => {
            let (Some(left_id), Some(right_id)) = (a.mapping_id(), b.mapping_id()) else {
                return Err(incomparable());
            };
            if left_id == right_id || active.contains(&(left_id, right_id)) {
                return Ok(Ordering::Equal);
            }
            let left = a.mapping_items().unwrap_or_default();
            let right = b.mapping_items().unwrap_or_default();

            active.push((left_id, right_id));
            let ordering = cmp_entries(&left, &right, op, active);
            active.pop();
            ordering
        }
        _ => Err(incomparable()),
    }
}

fn cmp_sequences(
    a: &[Value],
    b: &[Value],
    op: &'static str,
    active: &mut ActivePairs,
) -> MapsResult<Ordering> {
    for (x, y) in a.iter().zip(b) {
        if !value_eq(x, y, active) {
            return cmp_values(x, y, op, active);
        }
    }
    Ok(a.len().cmp(&b.len()))
}

fn cmp_entries(
    a: &[(String, Value)],
    b: &[(String, Value)],
    op: &'static str,
    active: &mut ActivePairs,
) -> MapsResult<Ordering> {
    for ((ka, va), (kb, vb)) in a.iter().zip(b) {
        match ka.cmp(kb) {
            Ordering::Equal => {}
            other => return Ok(other),
        }
        if !value_eq(va, vb, active) {
            return cmp_values(va, vb, op, active);
        }
    }
    Ok(a.len().cmp(&b.len()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbers_compare_across_types() {
        assert_eq!(Value::Int(1), Value::Float(1.0));
        assert_ne!(Value::Int(1), Value::Bool(true));
        assert_eq!(
            Value::Int(2).try_cmp(&Value::Float(2.5), "<"),
            Ok(Ordering::Less)
        );
    }

    #[test]
    fn test_list_never_equals_tuple() {
        let items = vec![Value::Int(1)];
        assert_ne!(Value::List(items.clone()), Value::Tuple(items));
    }

    #[test]
    fn test_plain_dict_equality_ignores_order() {
        let a: Dict = [("x", 1), ("y", 2)].into_iter().collect();
        let b: Dict = [("y", 2), ("x", 1)].into_iter().collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_sequence_ordering() {
        let a = Value::List(vec![Value::Int(1), Value::Int(2)]);
        let b = Value::List(vec![Value::Int(1), Value::Int(3)]);
        assert_eq!(a.try_cmp(&b, "<"), Ok(Ordering::Less));

        let short = Value::List(vec![Value::Int(1)]);
        assert_eq!(short.try_cmp(&a, "<"), Ok(Ordering::Less));
    }

    #[test]
    fn test_incomparable_types() {
        let err = Value::from("a").try_cmp(&Value::Int(1), ">=").unwrap_err();
        assert_eq!(
            err,
            MapsError::Incomparable {
                op: ">=",
                left: "str",
                right: "int"
            }
        );
        assert!(Value::None.try_cmp(&Value::None, "<").is_err());
    }

    #[test]
    fn test_large_ints_against_floats() {
        let above = Value::Int(9_007_199_254_740_993);
        let nearest = Value::Float(9_007_199_254_740_992.0);
        assert_ne!(above, nearest);
        assert_eq!(above.try_cmp(&nearest, ">"), Ok(Ordering::Greater));
        assert_eq!(nearest.try_cmp(&above, "<"), Ok(Ordering::Less));

        assert_eq!(Value::Int(i64::MAX).try_cmp(&Value::Float(1e19), "<"), Ok(Ordering::Less));
        assert_ne!(Value::Int(i64::MAX), Value::Float(I64_BOUND));
        assert_eq!(Value::Int(i64::MIN), Value::Float(-I64_BOUND));
        assert_eq!(Value::Int(-3).try_cmp(&Value::Float(-2.5), "<"), Ok(Ordering::Less));
        assert_ne!(Value::Int(0), Value::Float(f64::NAN));
        assert!(Value::Int(0).try_cmp(&Value::Float(f64::NAN), "<").is_err());
    }

    #[test]
    fn test_cyclic_mappings_compare_without_recursing_forever() {
        let a = Dict::new();
        a.insert("me", Value::Dict(a.clone()));
        let b = Dict::new();
        b.insert("me", Value::Dict(b.clone()));
        assert_eq!(a, b);
        assert_eq!(
            Value::Dict(a.clone()).try_cmp(&Value::Dict(b.clone()), "<="),
            Ok(Ordering::Equal)
        );

        b.insert("extra", 1);
        assert_ne!(a, b);
        assert_eq!(
            Value::Dict(a).try_cmp(&Value::Dict(b), "<"),
            Ok(Ordering::Less)
        );
    }
}
