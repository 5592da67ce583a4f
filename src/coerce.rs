//! Write-path coercion policy.
//!
//! [`coerce`] is a pure function of the destination descriptor, the incoming value and the
//! [`AccessorConfig`]; the only side effect is the diagnostic for integer-to-text renders.
//!
//! ## Rules (destination <- source)
//!
//! | destination | source          | result                                                        |
//! |-------------|-----------------|---------------------------------------------------------------|
//! | `String`    | `NaiveDateTime` | `YYYY-MM-DD HH:MM:SS`                                         |
//! | `String`    | `Vec<u8>`       | bytes as text                                                 |
//! | `String`    | `[u8; 16]`      | hyphenated UUID                                               |
//! | `String`    | `ValueMap`      | JSON text                                                     |
//! | `String`    | `i32`           | decimal (warns when enabled)                                  |
//! | `String`    | `i64`           | `HH:MM:SS` from µs-since-midnight for `*time*` names, else decimal |
//! | `i32`       | `u32`/`i64`/`u64` | two's-complement truncation                                 |
//! | `u32`       | `i32`/`i64`/`u64` | two's-complement truncation                                 |

use fieldkit_core::{FieldDescriptor, FieldError, FieldType, Value};
use uuid::Uuid;

use crate::config::AccessorConfig;
use crate::timestamp::time_iso_str;

const MICROS_PER_SECOND: i64 = 1_000_000;
const MICROS_PER_MINUTE: i64 = 60 * MICROS_PER_SECOND;
const MICROS_PER_HOUR: i64 = 60 * MICROS_PER_MINUTE;

/// Convert `value` into the exact representation of `field`.
///
/// ## Returns
/// - (`Value`): a value whose type is `field.field_type`.
///
/// ## Errors
/// - `TypeMismatch` when no rule covers `(field type, value type)`.
/// - `Serialization` when a map holds something JSON cannot represent.
///
/// ## Notes
/// - Integer narrowing never checks range.
/// - [`Value::Unset`] is never coerced; the write path drops it before calling this.
pub fn coerce(field: &FieldDescriptor, value: Value, config: &AccessorConfig) -> Result<Value, FieldError> {
    if value.field_type() == Some(field.field_type) {
        return Ok(value);
    }

    let coerced = match (field.field_type, value) {
        (FieldType::Text, Value::Timestamp(ts)) => Value::Text(time_iso_str(&ts)),
        (FieldType::Text, Value::Bytes(bytes)) => Value::Text(bytes_to_text(field.name, bytes)),
        (FieldType::Text, Value::Bytes16(bytes)) => Value::Text(Uuid::from_bytes(bytes).hyphenated().to_string()),
        (FieldType::Text, map @ Value::Map(_)) => {
            let text = serde_json::to_string(&map).map_err(|source| FieldError::Serialization {
                field: field.name.to_owned(),
                source,
            })?;
            Value::Text(text)
        }
        (FieldType::Text, Value::I32(v)) => {
            if config.warn_int_to_text {
                tracing::warn!(field = field.name, source_type = "i32", "implicit integer-to-text coercion");
            }
            Value::Text(v.to_string())
        }
        (FieldType::Text, Value::I64(v)) => {
            if is_time_named(field.name) {
                Value::Text(micros_to_clock(v))
            } else {
                Value::Text(v.to_string())
            }
        }

        (FieldType::I32, Value::U32(v)) => Value::I32(v as i32),
        (FieldType::I32, Value::I64(v)) => Value::I32(v as i32),
        (FieldType::I32, Value::U64(v)) => Value::I32(v as i32),

        (FieldType::U32, Value::I32(v)) => Value::U32(v as u32),
        (FieldType::U32, Value::I64(v)) => Value::U32(v as u32),
        (FieldType::U32, Value::U64(v)) => Value::U32(v as u32),

        (expected, other) => {
            tracing::debug!(
                field = field.name,
                expected = expected.type_name(),
                found = other.type_name(),
                "no coercion rule"
            );
            return Err(FieldError::TypeMismatch {
                field: field.name.to_owned(),
                expected: expected.type_name(),
                found: other.type_name(),
            });
        }
    };

    Ok(coerced)
}

/// Field names mentioning `time` or `Time` carry microseconds since midnight in `i64` sources.
fn is_time_named(name: &str) -> bool {
    name.contains("Time") || name.contains("time")
}

/// Render microseconds since midnight as `HH:MM:SS`, truncating sub-second remainders.
///
/// ## Notes
/// - Hours are not wrapped at 24; values of a day or more render with more than two hour digits.
pub fn micros_to_clock(micros: i64) -> String {
    let hours = micros / MICROS_PER_HOUR;
    let rest = micros - hours * MICROS_PER_HOUR;
    let minutes = rest / MICROS_PER_MINUTE;
    let rest = rest - minutes * MICROS_PER_MINUTE;
    let seconds = rest / MICROS_PER_SECOND;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

fn bytes_to_text(field: &str, bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => {
            tracing::debug!(field, "invalid UTF-8 in byte source, replacing invalid sequences");
            String::from_utf8_lossy(err.as_bytes()).into_owned()
        }
    }
}
