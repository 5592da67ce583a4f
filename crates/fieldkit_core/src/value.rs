//! Dynamically typed field payloads.
//!
//! A [`Value`] is what callers hand to the write path and what the read path hands back. Each variant maps
//! onto exactly one [`FieldType`]; [`Value::Unset`] stands for an absent input and maps onto none.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDateTime, TimeZone};
use serde::ser::{Error as _, Serialize, Serializer};
use uuid::Uuid;

use crate::field::FieldType;

/// Keyed map of values, ordered by key so enumeration and JSON output are deterministic.
pub type ValueMap = BTreeMap<String, Value>;

/// A dynamically typed field payload.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// Absent or uninitialized input. Writing it is a no-op.
    #[default]
    Unset,
    Bool(bool),
    I32(i32),
    I64(i64),
    U32(u32),
    U64(u64),
    F64(f64),
    Text(String),
    /// Variable-length raw bytes.
    Bytes(Vec<u8>),
    /// Fixed 16-byte sequence, typically a UUID.
    Bytes16([u8; 16]),
    /// Wall-clock timestamp without zone.
    Timestamp(NaiveDateTime),
    List(Vec<Value>),
    Map(ValueMap),
}

impl Value {
    /// Check whether this is the absent value.
    pub fn is_unset(&self) -> bool {
        matches!(self, Value::Unset)
    }

    /// The field type this value assigns to without coercion, `None` for [`Value::Unset`].
    pub fn field_type(&self) -> Option<FieldType> {
        let ty = match self {
            Value::Unset => return None,
            Value::Bool(_) => FieldType::Bool,
            Value::I32(_) => FieldType::I32,
            Value::I64(_) => FieldType::I64,
            Value::U32(_) => FieldType::U32,
            Value::U64(_) => FieldType::U64,
            Value::F64(_) => FieldType::F64,
            Value::Text(_) => FieldType::Text,
            Value::Bytes(_) => FieldType::Bytes,
            Value::Bytes16(_) => FieldType::Bytes16,
            Value::Timestamp(_) => FieldType::Timestamp,
            Value::List(_) => FieldType::List,
            Value::Map(_) => FieldType::Map,
        };
        Some(ty)
    }

    /// Rust type name of the payload, used in diagnostics.
    pub fn type_name(&self) -> &'static str {
        self.field_type().map_or("unset", |ty| ty.type_name())
    }

    /// Convert loosely typed JSON into a value.
    ///
    /// ## Notes
    /// - `null` becomes [`Value::Unset`], so absent JSON members are skipped by the write path.
    /// - Integers land in `I64` when they fit, otherwise `U64`; every other number becomes `F64`.
    pub fn from_json(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Unset,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::I64(i)
                } else if let Some(u) = n.as_u64() {
                    Value::U64(u)
                } else {
                    Value::F64(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_json::Value::String(s) => Value::Text(s),
            serde_json::Value::Array(items) => Value::List(items.into_iter().map(Value::from_json).collect()),
            serde_json::Value::Object(members) => {
                Value::Map(members.into_iter().map(|(k, v)| (k, Value::from_json(v))).collect())
            }
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Unset => serializer.serialize_none(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::I32(v) => serializer.serialize_i32(*v),
            Value::I64(v) => serializer.serialize_i64(*v),
            Value::U32(v) => serializer.serialize_u32(*v),
            Value::U64(v) => serializer.serialize_u64(*v),
            // JSON has no representation for NaN or the infinities.
            Value::F64(v) if !v.is_finite() => Err(S::Error::custom(format!("unsupported value: {v}"))),
            Value::F64(v) => serializer.serialize_f64(*v),
            Value::Text(s) => serializer.serialize_str(s),
            Value::Bytes(bytes) => serializer.collect_seq(bytes),
            Value::Bytes16(bytes) => serializer.collect_seq(bytes),
            Value::Timestamp(ts) => ts.serialize(serializer),
            Value::List(items) => serializer.collect_seq(items),
            Value::Map(members) => serializer.collect_map(members),
        }
    }
}

macro_rules! impl_from_scalar {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::$variant(v)
                }
            }
        )*
    };
}

impl_from_scalar! {
    bool => Bool,
    i32 => I32,
    i64 => I64,
    u32 => U32,
    u64 => U64,
    f64 => F64,
    String => Text,
    Vec<u8> => Bytes,
    [u8; 16] => Bytes16,
    NaiveDateTime => Timestamp,
    Vec<Value> => List,
    ValueMap => Map,
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_owned())
    }
}

impl From<Uuid> for Value {
    fn from(id: Uuid) -> Self {
        Value::Bytes16(id.into_bytes())
    }
}

/// Zoned timestamps keep their local wall-clock fields.
impl<Tz: TimeZone> From<DateTime<Tz>> for Value {
    fn from(ts: DateTime<Tz>) -> Self {
        Value::Timestamp(ts.naive_local())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Unset, Into::into)
    }
}
