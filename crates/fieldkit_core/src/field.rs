//! Declared field shapes.
//!
//! The `Record` derive emits one [`FieldDescriptor`] per struct field into a `'static` table. The
//! descriptor's [`FieldType`] comes from the field's Rust type through [`FieldValue::FIELD_TYPE`].

use std::fmt;

use chrono::NaiveDateTime;

use crate::value::{Value, ValueMap};

/// Declared representation type of a record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    Bool,
    I32,
    I64,
    U32,
    U64,
    F64,
    Text,
    Bytes,
    Bytes16,
    Timestamp,
    List,
    Map,
    /// An embedded record, carrying its Rust type name.
    Record(&'static str),
}

impl FieldType {
    /// Canonical Rust spelling of the type.
    pub const fn type_name(&self) -> &'static str {
        match self {
            FieldType::Bool => "bool",
            FieldType::I32 => "i32",
            FieldType::I64 => "i64",
            FieldType::U32 => "u32",
            FieldType::U64 => "u64",
            FieldType::F64 => "f64",
            FieldType::Text => "String",
            FieldType::Bytes => "Vec<u8>",
            FieldType::Bytes16 => "[u8; 16]",
            FieldType::Timestamp => "NaiveDateTime",
            FieldType::List => "Vec<Value>",
            FieldType::Map => "ValueMap",
            FieldType::Record(name) => *name,
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

/// Static description of one record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub field_type: FieldType,
    /// `(key, value)` annotations, in declaration order.
    pub tags: &'static [(&'static str, &'static str)],
    /// Declared `pub`; only exported fields are readable, settable and enumerated.
    pub exported: bool,
    /// Set for `#[record(embed)]` fields.
    pub embedded: bool,
}

impl FieldDescriptor {
    /// Look up a tag value by key.
    pub fn tag(&self, key: &str) -> Option<&'static str> {
        self.tags.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
    }
}

/// Bridge between a concrete Rust field type and [`Value`].
///
/// Implemented for every type a derived record field may have (embedded records excepted).
pub trait FieldValue: Sized {
    const FIELD_TYPE: FieldType;

    /// Snapshot the field as a value.
    fn to_value(&self) -> Value;

    /// Take the payload out of an exactly matching value, handing the value back otherwise.
    fn from_value(value: Value) -> Result<Self, Value>;
}

macro_rules! impl_field_value {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl FieldValue for $ty {
                const FIELD_TYPE: FieldType = FieldType::$variant;

                fn to_value(&self) -> Value {
                    Value::$variant(self.clone())
                }

                fn from_value(value: Value) -> Result<Self, Value> {
                    match value {
                        Value::$variant(v) => Ok(v),
                        other => Err(other),
                    }
                }
            }
        )*
    };
}

impl_field_value! {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptor_tag_lookup() {
        let d = FieldDescriptor {
            name: "user_id",
            field_type: FieldType::I64,
            tags: &[("json", "userId,omitempty"), ("db", "user_id")],
            exported: true,
            embedded: false,
        };
        assert_eq!(d.tag("db"), Some("user_id"));
        assert_eq!(d.tag("json"), Some("userId,omitempty"));
        assert_eq!(d.tag("xml"), None);
    }

    #[test]
    fn field_value_round_trip_keeps_payload() {
        let v = "hello".to_string().to_value();
        assert_eq!(String::from_value(v), Ok("hello".to_string()));
    }

    #[test]
    fn field_value_hands_back_mismatched_value() {
        assert_eq!(i32::from_value(Value::I64(5)), Err(Value::I64(5)));
    }

    #[test]
    fn record_type_name_is_carried() {
        assert_eq!(FieldType::Record("Audit").type_name(), "Audit");
        assert_eq!(FieldType::Bytes16.to_string(), "[u8; 16]");
    }
}
