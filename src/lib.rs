#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used)]
//! fieldkit: by-name struct field access for code that maps records onto loosely typed data.
//!
//! Structs opt in with `#[derive(Record)]`, which generates a static descriptor table. On top of that table this
//! crate provides:
//!
//! - **Access** ([`accessor`]): `get_field`, `set_field` with implicit coercion, batch `set_fields`, presence
//!   and metadata checks.
//! - **Coercion** ([`coerce`]): the table of conversions applied when a value's type differs from the field's.
//! - **Enumeration** ([`enumerate`]): field names, tags and value snapshots, shallow or flattened.
//! - **Timestamps** ([`timestamp`]): `YYYY-MM-DD HH:MM:SS[.mmm]` formatting and permissive parsing.
//!
//! ## Example
//!
//! ```
//! use fieldkit::{Record, Value, get_field, set_field};
//!
//! #[derive(Record, Default)]
//! pub struct Shift {
//!     pub worker: String,
//!     pub start_time: String,
//!     pub hours: i32,
//! }
//!
//! let mut shift = Shift::default();
//! set_field(&mut shift, "worker", "ada").unwrap();
//! set_field(&mut shift, "start_time", 3_661_000_000_i64).unwrap();
//! set_field(&mut shift, "hours", 8_i64).unwrap();
//!
//! assert_eq!(shift.start_time, "01:01:01");
//! assert_eq!(get_field(&shift, "hours").unwrap(), Value::I32(8));
//! ```
//!
//! ## Error handling
//!
//! Every operation returns [`FieldError`] values; none panic. Batch writes keep going past individual
//! failures and report all of them.

#[cfg(doctest)]
#[doc = include_str!("../README.md")]
pub struct ReadmeDoctests;

// Lets `#[derive(Record)]` output (`::fieldkit::...`) resolve inside this crate's own tests.
extern crate self as fieldkit;

pub mod accessor;
pub mod coerce;
pub mod config;
pub mod enumerate;
pub mod record;
pub mod timestamp;

pub use fieldkit_core::{BatchFailure, FieldDescriptor, FieldError, FieldType, FieldValue, Value, ValueMap};
pub use fieldkit_derive::Record;

pub use accessor::{
    field_tag, field_type, field_type_name, get_field, has_field, has_method, set_field, set_field_with_config,
    set_fields, set_fields_with_config,
};
pub use config::AccessorConfig;
pub use enumerate::{
    field_names, field_names_and_tag, field_tags, fields, fields_as_map, fields_deep, items, items_deep, tags,
    tags_deep,
};
pub use record::Record;
