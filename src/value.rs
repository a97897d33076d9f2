//! Classification of parsed values into a closed set of shapes.
//!
//! Documents arrive as [`serde_json::Value`] trees. Every structural check in
//! this crate first classifies a value with [`Shape::of`] and then matches on
//! the result, so there is exactly one place that inspects runtime types.

use serde_json::{Map, Number, Value};

/// Borrowed view of a parsed value, tagged by shape.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Shape<'a> {
    Mapping(&'a Map<String, Value>),
    Sequence(&'a [Value]),
    Scalar(Scalar<'a>),
}

/// Leaf values.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Scalar<'a> {
    Null,
    Bool(bool),
    Number(&'a Number),
    String(&'a str),
}

impl<'a> Shape<'a> {
    pub fn of(value: &'a Value) -> Self {
        match value {
            Value::Object(map) => Shape::Mapping(map),
            Value::Array(items) => Shape::Sequence(items.as_slice()),
            Value::Null => Shape::Scalar(Scalar::Null),
            Value::Bool(b) => Shape::Scalar(Scalar::Bool(*b)),
            Value::Number(n) => Shape::Scalar(Scalar::Number(n)),
            Value::String(s) => Shape::Scalar(Scalar::String(s.as_str())),
        }
    }

    pub fn as_mapping(self) -> Option<&'a Map<String, Value>> {
        match self {
            Shape::Mapping(map) => Some(map),
            Shape::Sequence(_) | Shape::Scalar(_) => None,
        }
    }

    pub fn as_sequence(self) -> Option<&'a [Value]> {
        match self {
            Shape::Sequence(items) => Some(items),
            Shape::Mapping(_) | Shape::Scalar(_) => None,
        }
    }

    /// `true` for a string-typed scalar.
    pub fn is_string(self) -> bool {
        matches!(self, Shape::Scalar(Scalar::String(_)))
    }

    /// Loose truthiness: empty strings, zero, `false` and null are falsy;
    /// every mapping and sequence is truthy.
    pub fn is_truthy(self) -> bool {
        match self {
            Shape::Mapping(_) | Shape::Sequence(_) => true,
            Shape::Scalar(Scalar::Null) => false,
            Shape::Scalar(Scalar::Bool(b)) => b,
            Shape::Scalar(Scalar::String(s)) => !s.is_empty(),
            Shape::Scalar(Scalar::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        }
    }
}

/// `true` when `map` contains at least one of `keys`.
pub fn has_any_key(map: &Map<String, Value>, keys: &[&str]) -> bool {
    keys.iter().any(|k| map.contains_key(*k))
}
