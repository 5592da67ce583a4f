//! By-name field reads and writes.
//!
//! Name resolution checks the record's own descriptor table first, then promoted fields of embedded records in
//! declaration order (depth first, first match wins).

use fieldkit_core::{BatchFailure, FieldDescriptor, FieldError, FieldType, Value};

use crate::coerce::coerce;
use crate::config::AccessorConfig;
use crate::enumerate::fields_as_map;
use crate::record::Record;

fn direct(record: &dyn Record, name: &str) -> Option<&'static FieldDescriptor> {
    record.fields().iter().find(|d| d.name == name)
}

fn locate<'r>(record: &'r dyn Record, name: &str) -> Option<(&'r dyn Record, &'static FieldDescriptor)> {
    if let Some(descriptor) = direct(record, name) {
        return Some((record, descriptor));
    }
    record
        .fields()
        .iter()
        .filter(|d| d.embedded)
        .filter_map(|d| record.embedded(d.name))
        .find_map(|inner| locate(inner, name))
}

fn locate_mut<'r>(
    record: &'r mut dyn Record,
    name: &str,
) -> Option<(&'r mut dyn Record, &'static FieldDescriptor)> {
    if let Some(descriptor) = direct(record, name) {
        return Some((record, descriptor));
    }
    let owner = record
        .fields()
        .iter()
        .filter(|d| d.embedded)
        .find(|d| record.embedded(d.name).is_some_and(|inner| locate(inner, name).is_some()))?;
    locate_mut(record.embedded_mut(owner.name)?, name)
}

fn not_found(record: &dyn Record, name: &str) -> FieldError {
    FieldError::NotFound {
        record: record.record_name(),
        field: name.to_owned(),
    }
}

/// Read a field in its native representation; no coercion.
///
/// ## Errors
/// - `NotFound` if no field (own or promoted) has this name.
/// - `NotReadable` if the field is not exported.
///
/// ## Notes
/// - An embedded record field reads as a [`Value::Map`] of its shallow [`fields_as_map`].
pub fn get_field(record: &dyn Record, name: &str) -> Result<Value, FieldError> {
    let (owner, descriptor) = locate(record, name).ok_or_else(|| not_found(record, name))?;
    if !descriptor.exported {
        return Err(FieldError::NotReadable { field: name.to_owned() });
    }
    if descriptor.embedded {
        let inner = owner.embedded(descriptor.name).ok_or_else(|| not_found(record, name))?;
        return Ok(Value::Map(fields_as_map(inner, false)));
    }
    owner.field_value(descriptor.name).ok_or_else(|| not_found(record, name))
}

/// Write a field with the default [`AccessorConfig`].
///
/// See [`set_field_with_config`].
pub fn set_field(record: &mut dyn Record, name: &str, value: impl Into<Value>) -> Result<(), FieldError> {
    set_field_with_config(record, name, value, &AccessorConfig::default())
}

/// Write a field, coercing the value into the field's declared type.
///
/// ## Errors
/// - `NotFound` if no field (own or promoted) has this name.
/// - `NotSettable` if the field is not exported.
/// - `TypeMismatch` / `Serialization` from the coercion policy (see [`crate::coerce`]).
///
/// ## Notes
/// - [`Value::Unset`] is a silent no-op, even for unknown names.
pub fn set_field_with_config(
    record: &mut dyn Record,
    name: &str,
    value: impl Into<Value>,
    config: &AccessorConfig,
) -> Result<(), FieldError> {
    let value = value.into();
    if value.is_unset() {
        return Ok(());
    }

    let record_name = record.record_name();
    let (owner, descriptor) = locate_mut(record, name).ok_or_else(|| FieldError::NotFound {
        record: record_name,
        field: name.to_owned(),
    })?;
    if !descriptor.exported {
        return Err(FieldError::NotSettable { field: name.to_owned() });
    }

    let coerced = coerce(descriptor, value, config)?;
    owner
        .assign_field(descriptor.name, coerced)
        .map_err(|rejected| FieldError::TypeMismatch {
            field: name.to_owned(),
            expected: descriptor.field_type.type_name(),
            found: rejected.type_name(),
        })
}

/// Write several fields with the default [`AccessorConfig`].
///
/// See [`set_fields_with_config`].
pub fn set_fields<S: AsRef<str>>(record: &mut dyn Record, names: &[S], values: Vec<Value>) -> Result<(), FieldError> {
    set_fields_with_config(record, names, values, &AccessorConfig::default())
}

/// Write `names[i] = values[i]` for every name, in order.
///
/// ## Errors
/// - `LengthMismatch` if there are fewer values than names; nothing is written.
/// - `Batch` holding every per-field failure if any write failed. Writes continue past failures, and
///   [`BatchFailure::last`] gives the last error encountered.
///
/// ## Notes
/// - Surplus values beyond `names.len()` are ignored.
#[tracing::instrument(skip_all, fields(record = record.record_name(), field_count = names.len()))]
pub fn set_fields_with_config<S: AsRef<str>>(
    record: &mut dyn Record,
    names: &[S],
    values: Vec<Value>,
    config: &AccessorConfig,
) -> Result<(), FieldError> {
    if names.len() > values.len() {
        return Err(FieldError::LengthMismatch {
            names: names.len(),
            values: values.len(),
        });
    }

    let mut failures = BatchFailure::new();
    for (name, value) in names.iter().zip(values) {
        let name = name.as_ref();
        if let Err(err) = set_field_with_config(record, name, value, config) {
            failures.push(name, err);
        }
    }

    if failures.is_empty() {
        Ok(())
    } else {
        Err(FieldError::Batch(failures))
    }
}

/// Check whether an exported field (own or promoted) has this name.
pub fn has_field(record: &dyn Record, name: &str) -> bool {
    locate(record, name).is_some_and(|(_, d)| d.exported)
}

/// Declared type of a field.
pub fn field_type(record: &dyn Record, name: &str) -> Result<FieldType, FieldError> {
    locate(record, name)
        .map(|(_, d)| d.field_type)
        .ok_or_else(|| not_found(record, name))
}

/// Rust type name of a field's declared type.
pub fn field_type_name(record: &dyn Record, name: &str) -> Result<&'static str, FieldError> {
    field_type(record, name).map(|ty| ty.type_name())
}

/// Raw tag value of `field` for `key`; empty when the field has no such tag.
///
/// ## Errors
/// - `NotFound` if no field has this name.
/// - `NotReadable` if the field is not exported.
pub fn field_tag(record: &dyn Record, field: &str, key: &str) -> Result<String, FieldError> {
    let (_, descriptor) = locate(record, field).ok_or_else(|| not_found(record, field))?;
    if !descriptor.exported {
        return Err(FieldError::NotReadable { field: field.to_owned() });
    }
    Ok(descriptor.tag(key).unwrap_or_default().to_owned())
}

/// Check whether the record, or a record it embeds, declares `method`.
pub fn has_method(record: &dyn Record, method: &str) -> bool {
    record.methods().contains(&method)
        || record
            .fields()
            .iter()
            .filter(|d| d.embedded)
            .filter_map(|d| record.embedded(d.name))
            .any(|inner| has_method(inner, method))
}
