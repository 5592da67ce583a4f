//! Enumeration of exported fields, their tags and their values.
//!
//! With `deep = true` an exported embedded record contributes its own entries in place of its field
//! ("flattened"); with `deep = false` it is listed like any other field. Non-exported fields never appear.

use std::collections::BTreeMap;

use fieldkit_core::{FieldDescriptor, Value, ValueMap};

use crate::record::Record;

/// Visit exported fields in declaration order, descending into embedded records when `deep`.
fn visit<'r>(record: &'r dyn Record, deep: bool, f: &mut dyn FnMut(&'r dyn Record, &'static FieldDescriptor)) {
    for descriptor in record.fields().iter().filter(|d| d.exported) {
        match record.embedded(descriptor.name) {
            Some(inner) if deep && descriptor.embedded => visit(inner, deep, f),
            _ => f(record, descriptor),
        }
    }
}

/// Exported field names in declaration order.
pub fn field_names(record: &dyn Record, deep: bool) -> Vec<&'static str> {
    let mut names = Vec::new();
    visit(record, deep, &mut |_, d| names.push(d.name));
    names
}

/// Direct exported field names; embedded records listed as single fields.
pub fn fields(record: &dyn Record) -> Vec<&'static str> {
    field_names(record, false)
}

/// Flattened exported field names.
pub fn fields_deep(record: &dyn Record) -> Vec<&'static str> {
    field_names(record, true)
}

/// Map field names to their `tag_key` tag, cut at the first `,` (so `"id,omitempty"` yields `"id"`).
///
/// ## Parameters
/// - `key_by_name`: `true` maps `name -> tag`; `false` maps `tag -> name`.
///
/// ## Notes
/// - Fields without the tag map to (or from) the empty string; in `tag -> name` mode several untagged
///   fields collapse onto the `""` key and the last one wins.
pub fn field_names_and_tag(
    record: &dyn Record,
    tag_key: &str,
    deep: bool,
    key_by_name: bool,
) -> BTreeMap<String, String> {
    let mut out = BTreeMap::new();
    visit(record, deep, &mut |_, d| {
        let tag = d.tag(tag_key).unwrap_or_default();
        let tag = tag.split_once(',').map_or(tag, |(before, _)| before);
        if key_by_name {
            out.insert(d.name.to_owned(), tag.to_owned());
        } else {
            out.insert(tag.to_owned(), d.name.to_owned());
        }
    });
    out
}

/// Map field names to their raw `tag_key` tag value (empty when absent).
pub fn field_tags(record: &dyn Record, tag_key: &str, deep: bool) -> BTreeMap<String, String> {
    let mut out = BTreeMap::new();
    visit(record, deep, &mut |_, d| {
        out.insert(d.name.to_owned(), d.tag(tag_key).unwrap_or_default().to_owned());
    });
    out
}

pub fn tags(record: &dyn Record, tag_key: &str) -> BTreeMap<String, String> {
    field_tags(record, tag_key, false)
}

pub fn tags_deep(record: &dyn Record, tag_key: &str) -> BTreeMap<String, String> {
    field_tags(record, tag_key, true)
}

/// Snapshot exported fields as a name-to-value map.
///
/// ## Notes
/// - In shallow mode an embedded record becomes a nested [`Value::Map`] of its own shallow snapshot.
pub fn fields_as_map(record: &dyn Record, deep: bool) -> ValueMap {
    let mut out = ValueMap::new();
    visit(record, deep, &mut |owner, d| {
        let value = match owner.embedded(d.name) {
            Some(inner) => Value::Map(fields_as_map(inner, false)),
            None => owner.field_value(d.name).unwrap_or_default(),
        };
        out.insert(d.name.to_owned(), value);
    });
    out
}

pub fn items(record: &dyn Record) -> ValueMap {
    fields_as_map(record, false)
}

pub fn items_deep(record: &dyn Record) -> ValueMap {
    fields_as_map(record, true)
}
