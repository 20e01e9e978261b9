//! Pickle decoding into an order-preserving value tree.
//!
//! `serde_pickle` evaluates the pickle stream; [`PickleValue`] captures the
//! result through `deserialize_any`, so dictionaries keep their insertion
//! order (the order edges are numbered in). Lists, tuples and sets all
//! become [`PickleValue::Seq`].
//!
//! # Limitations
//! - Objects reconstructed through arbitrary globals are rejected by the
//!   decoder; datasets must store plain lists/tuples/dicts. Files that
//!   reference numpy (arrays, numpy scalars) fail early with
//!   [`HypergraphError::NumpyObjects`].
//! - One container referenced from several places (`rec = {...};
//!   {1: rec, 2: rec}`) fails with "recursive structure found": the decoder
//!   resolves each memo entry once and does not share values.
//! - Integers outside the `i64` range are rejected.

use crate::hypergraph_error::HypergraphError;
use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use std::fmt;
use std::fs;
use std::io::Read;
use std::path::Path;

/// numpy modules whose globals rebuild arrays (`_reconstruct`) and scalars
/// (`scalar`). numpy 2 renamed `core` to `_core`.
const NUMPY_MODULES: [&str; 2] = ["numpy.core.multiarray", "numpy._core.multiarray"];

/// A decoded pickle object.
#[derive(Clone, Debug, PartialEq)]
pub enum PickleValue {
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Bytes(Vec<u8>),
    /// list, tuple, set or frozenset
    Seq(Vec<PickleValue>),
    /// dict, in insertion order
    Map(Vec<(PickleValue, PickleValue)>),
}

impl PickleValue {
    /// Short Python-flavoured type name, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            PickleValue::None => "None",
            PickleValue::Bool(_) => "bool",
            PickleValue::Int(_) => "int",
            PickleValue::Float(_) => "float",
            PickleValue::Str(_) => "str",
            PickleValue::Bytes(_) => "bytes",
            PickleValue::Seq(_) => "sequence",
            PickleValue::Map(_) => "dict",
        }
    }

    pub fn as_seq(&self) -> Option<&[PickleValue]> {
        match self {
            PickleValue::Seq(items) => Some(items),
            _ => None,
        }
    }

    /// Python `int(value)`: integers as-is, booleans as 0/1, finite floats
    /// truncated toward zero, text parsed after trimming whitespace.
    pub fn python_int(&self) -> Option<i64> {
        match self {
            PickleValue::Int(v) => Some(*v),
            PickleValue::Bool(b) => Some(i64::from(*b)),
            PickleValue::Float(f) => {
                let t = f.trunc();
                // 2^63 is exactly representable; anything at or past it overflows
                if t.is_finite() && t >= -9_223_372_036_854_775_808.0 && t < 9_223_372_036_854_775_808.0
                {
                    Some(t as i64)
                } else {
                    None
                }
            }
            PickleValue::Str(s) => parse_int_text(s),
            PickleValue::Bytes(b) => std::str::from_utf8(b).ok().and_then(parse_int_text),
            PickleValue::None | PickleValue::Seq(_) | PickleValue::Map(_) => None,
        }
    }

    /// Python `str(value)`.
    pub fn python_str(&self) -> String {
        match self {
            PickleValue::Str(s) => s.clone(),
            other => other.python_repr(),
        }
    }

    /// Python `repr(value)`; sequences render as lists.
    pub fn python_repr(&self) -> String {
        match self {
            PickleValue::None => "None".to_string(),
            PickleValue::Bool(true) => "True".to_string(),
            PickleValue::Bool(false) => "False".to_string(),
            PickleValue::Int(v) => v.to_string(),
            PickleValue::Float(f) => float_repr(*f),
            PickleValue::Str(s) => format!("'{s}'"),
            PickleValue::Bytes(b) => format!("b'{}'", String::from_utf8_lossy(b)),
            PickleValue::Seq(items) => {
                let inner: Vec<String> = items.iter().map(PickleValue::python_repr).collect();
                format!("[{}]", inner.join(", "))
            }
            PickleValue::Map(entries) => {
                let inner: Vec<String> = entries
                    .iter()
                    .map(|(k, v)| format!("{}: {}", k.python_repr(), v.python_repr()))
                    .collect();
                format!("{{{}}}", inner.join(", "))
            }
        }
    }

    /// Convert to JSON; dictionary keys are rendered with `str()`.
    pub fn to_json(&self) -> serde_json::Value {
        use serde_json::Value;
        match self {
            PickleValue::None => Value::Null,
            PickleValue::Bool(b) => Value::Bool(*b),
            PickleValue::Int(v) => Value::from(*v),
            PickleValue::Float(f) => serde_json::Number::from_f64(*f)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            PickleValue::Str(s) => Value::String(s.clone()),
            PickleValue::Bytes(b) => Value::String(String::from_utf8_lossy(b).into_owned()),
            PickleValue::Seq(items) => Value::Array(items.iter().map(PickleValue::to_json).collect()),
            PickleValue::Map(entries) => Value::Object(
                entries
                    .iter()
                    .map(|(k, v)| (k.python_str(), v.to_json()))
                    .collect(),
            ),
        }
    }
}

fn parse_int_text(s: &str) -> Option<i64> {
    s.trim().parse::<i64>().ok()
}

fn float_repr(f: f64) -> String {
    if f.is_nan() {
        "nan".to_string()
    } else if f.is_infinite() {
        if f > 0.0 { "inf" } else { "-inf" }.to_string()
    } else {
        format!("{f:?}")
    }
}

struct PickleValueVisitor;

impl<'de> Visitor<'de> for PickleValueVisitor {
    type Value = PickleValue;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a picklable builtin value")
    }

    fn visit_unit<E>(self) -> Result<PickleValue, E> {
        Ok(PickleValue::None)
    }

    fn visit_none<E>(self) -> Result<PickleValue, E> {
        Ok(PickleValue::None)
    }

    fn visit_some<D: Deserializer<'de>>(self, d: D) -> Result<PickleValue, D::Error> {
        PickleValue::deserialize(d)
    }

    fn visit_bool<E>(self, v: bool) -> Result<PickleValue, E> {
        Ok(PickleValue::Bool(v))
    }

    fn visit_i64<E>(self, v: i64) -> Result<PickleValue, E> {
        Ok(PickleValue::Int(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<PickleValue, E> {
        i64::try_from(v)
            .map(PickleValue::Int)
            .map_err(|_| E::custom(format!("integer {v} does not fit in i64")))
    }

    fn visit_f64<E>(self, v: f64) -> Result<PickleValue, E> {
        Ok(PickleValue::Float(v))
    }

    fn visit_str<E>(self, v: &str) -> Result<PickleValue, E> {
        Ok(PickleValue::Str(v.to_owned()))
    }

    fn visit_string<E>(self, v: String) -> Result<PickleValue, E> {
        Ok(PickleValue::Str(v))
    }

    fn visit_bytes<E>(self, v: &[u8]) -> Result<PickleValue, E> {
        Ok(PickleValue::Bytes(v.to_vec()))
    }

    fn visit_byte_buf<E>(self, v: Vec<u8>) -> Result<PickleValue, E> {
        Ok(PickleValue::Bytes(v))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<PickleValue, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(PickleValue::Seq(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<PickleValue, A::Error> {
        let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some(entry) = map.next_entry()? {
            entries.push(entry);
        }
        Ok(PickleValue::Map(entries))
    }
}

impl<'de> Deserialize<'de> for PickleValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(PickleValueVisitor)
    }
}

impl Serialize for PickleValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PickleValue::None => serializer.serialize_unit(),
            PickleValue::Bool(b) => serializer.serialize_bool(*b),
            PickleValue::Int(v) => serializer.serialize_i64(*v),
            PickleValue::Float(f) => serializer.serialize_f64(*f),
            PickleValue::Str(s) => serializer.serialize_str(s),
            PickleValue::Bytes(b) => serializer.serialize_bytes(b),
            PickleValue::Seq(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            PickleValue::Map(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (k, v) in entries {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
        }
    }
}

fn de_options() -> serde_pickle::DeOptions {
    // Python 2 `str` pickles arrive as bytes; decode them like Python 3 would.
    serde_pickle::DeOptions::new().decode_strings()
}

/// Decode one pickle object from `reader`; `path` is used for error context.
pub fn read_pickle<R: Read>(reader: R, path: &Path) -> Result<PickleValue, HypergraphError> {
    serde_pickle::from_reader(reader, de_options()).map_err(|source| HypergraphError::Pickle {
        path: path.to_path_buf(),
        source,
    })
}

/// Open and decode the pickle file at `path`.
pub fn load_pickle(path: &Path) -> Result<PickleValue, HypergraphError> {
    let bytes = fs::read(path).map_err(|e| HypergraphError::io(path, e))?;
    if let Some(module) = numpy_reference(&bytes) {
        return Err(HypergraphError::NumpyObjects {
            path: path.to_path_buf(),
            module,
        });
    }
    let value = read_pickle(bytes.as_slice(), path)?;
    log::debug!("decoded {} from {}", value.type_name(), path.display());
    Ok(value)
}

/// The numpy module a pickle stream imports from, if any.
fn numpy_reference(bytes: &[u8]) -> Option<&'static str> {
    NUMPY_MODULES.into_iter().find(|module| {
        bytes
            .windows(module.len())
            .any(|w| w == module.as_bytes())
    })
}

/// Encode `value` as a pickle byte stream.
pub fn to_pickle_bytes(value: &PickleValue) -> Result<Vec<u8>, serde_pickle::Error> {
    serde_pickle::to_vec(value, serde_pickle::SerOptions::new())
}
