//! Provide the value model shared by the fieldkit accessor and the `Record` derive.
//!
//! This crate is intentionally small. It contains:
//! - [`Value`]: the dynamically typed payload read from or written into a record field,
//! - [`FieldType`] and [`FieldDescriptor`]: the declared shape of one field,
//! - [`FieldValue`]: the bridge between concrete Rust field types and [`Value`],
//! - [`FieldError`]: the error taxonomy of every accessor operation.
//!
//! ## Notes
//!
//! - No IO and no global state. Logging and configuration live in the `fieldkit` crate.

#![deny(clippy::unwrap_used)]

pub mod errors;
pub mod field;
pub mod value;

pub use errors::{BatchFailure, FieldError};
pub use field::{FieldDescriptor, FieldType, FieldValue};
pub use value::{Value, ValueMap};
