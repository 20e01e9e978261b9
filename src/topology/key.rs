//! `Key`: opaque identity of a raw node or edge
//!
//! Datasets name their nodes and edges with arbitrary hashable Python
//! values. `Key` keeps the subset that node ids use in practice (integers,
//! strings, bytes and tuples of those) and follows Python equality:
//! `True == 1` and `2.0 == 2` collapse onto the integer variant, while
//! `'x'` and `b'x'` stay distinct.
//!
//! Edge keys are only enumerated, never sorted, so any other hashable value
//! (`0.5`, `None`) is kept as [`Key::Opaque`] by [`Key::edge_from_pickle`].
//!
//! Ordering is only meaningful between keys with compatible [`KeyShape`]s;
//! the renumbering pass checks shapes before it sorts, so the derived `Ord`
//! never has to decide how an integer compares to a string.

use crate::io::pickle::PickleValue;
use std::fmt;

/// A raw node or edge identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    Int(i64),
    Str(String),
    Bytes(Vec<u8>),
    Tuple(Vec<Key>),
    /// Any other hashable value, by its Python `str()`. Edge keys only.
    Opaque(String),
}

/// Structural type of a [`Key`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum KeyShape {
    Int,
    Str,
    Bytes,
    Tuple(Vec<KeyShape>),
    Opaque,
}

impl KeyShape {
    /// Whether keys of these shapes can be ordered against each other.
    ///
    /// Scalars must be of the same kind. Tuples are compared position by
    /// position over their common length, since a shorter tuple that is a
    /// prefix of a longer one orders before it without further comparison.
    pub fn compatible(&self, other: &KeyShape) -> bool {
        match (self, other) {
            (KeyShape::Tuple(a), KeyShape::Tuple(b)) => {
                a.iter().zip(b).all(|(x, y)| x.compatible(y))
            }
            (KeyShape::Opaque, _) | (_, KeyShape::Opaque) => false,
            (a, b) => a == b,
        }
    }

    /// Widen `self` to also describe `other`. Tuple shapes grow to the
    /// longer of the two; callers check [`compatible`](Self::compatible) first.
    pub fn merge(&mut self, other: &KeyShape) {
        if let (KeyShape::Tuple(a), KeyShape::Tuple(b)) = (self, other) {
            for (x, y) in a.iter_mut().zip(b) {
                x.merge(y);
            }
            if b.len() > a.len() {
                a.extend_from_slice(&b[a.len()..]);
            }
        }
    }
}

impl Key {
    /// Convert a decoded pickle value, or `None` if it cannot act as a key.
    pub fn from_pickle(value: &PickleValue) -> Option<Key> {
        match value {
            PickleValue::Int(v) => Some(Key::Int(*v)),
            PickleValue::Bool(b) => Some(Key::Int(i64::from(*b))),
            PickleValue::Float(f) if f.fract() == 0.0 => value.python_int().map(Key::Int),
            PickleValue::Str(s) => Some(Key::Str(s.clone())),
            PickleValue::Bytes(b) => Some(Key::Bytes(b.clone())),
            PickleValue::Seq(items) => items
                .iter()
                .map(Key::from_pickle)
                .collect::<Option<Vec<_>>>()
                .map(Key::Tuple),
            _ => None,
        }
    }

    /// Like [`from_pickle`](Self::from_pickle), but any value that is not a
    /// node-style id becomes [`Key::Opaque`]. Unhashable values (dicts) are
    /// still rejected.
    pub fn edge_from_pickle(value: &PickleValue) -> Option<Key> {
        match value {
            PickleValue::Map(_) => None,
            other => {
                Some(Key::from_pickle(other).unwrap_or_else(|| Key::Opaque(other.python_str())))
            }
        }
    }

    #[inline]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Key::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn shape(&self) -> KeyShape {
        match self {
            Key::Int(_) => KeyShape::Int,
            Key::Str(_) => KeyShape::Str,
            Key::Bytes(_) => KeyShape::Bytes,
            Key::Tuple(items) => KeyShape::Tuple(items.iter().map(Key::shape).collect()),
            Key::Opaque(_) => KeyShape::Opaque,
        }
    }

    fn write_repr(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Str(s) => write!(f, "'{s}'"),
            other => fmt::Display::fmt(other, f),
        }
    }
}

/// Python `str()` of the key: `5`, `abc`, `(1, 'a')`.
impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Int(v) => write!(f, "{v}"),
            Key::Str(s) => f.write_str(s),
            Key::Bytes(b) => write!(f, "b'{}'", String::from_utf8_lossy(b)),
            Key::Opaque(s) => f.write_str(s),
            Key::Tuple(items) => {
                f.write_str("(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    item.write_repr(f)?;
                }
                if items.len() == 1 {
                    f.write_str(",")?;
                }
                f.write_str(")")
            }
        }
    }
}

impl fmt::Display for KeyShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyShape::Int => f.write_str("int"),
            KeyShape::Str => f.write_str("str"),
            KeyShape::Bytes => f.write_str("bytes"),
            KeyShape::Opaque => f.write_str("object"),
            KeyShape::Tuple(items) => {
                f.write_str("tuple[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
        }
    }
}

impl From<i64> for Key {
    fn from(v: i64) -> Self {
        Key::Int(v)
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Key::Str(s.to_owned())
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Key::Str(s)
    }
}
