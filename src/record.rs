//! The `Record` trait: the seam between derived structs and the accessor.
//!
//! Implementations are generated by `#[derive(Record)]`; hand-written ones must keep `fields()`, `field_value`
//! and `assign_field` consistent with each other.

use fieldkit_core::{FieldDescriptor, Value};

/// Provides by-name access to a struct's fields.
///
/// The accessor functions in [`crate::accessor`] and [`crate::enumerate`] are written against `&dyn Record`,
/// so this trait stays object safe.
///
/// # Examples
///
/// ```
/// use fieldkit::{Record, Value};
///
/// #[derive(Record, Default)]
/// pub struct Person {
///     pub name: String,
///     pub age: i32,
/// }
///
/// let person = Person { name: "Ada".into(), age: 36 };
/// assert_eq!(person.record_name(), "Person");
/// assert_eq!(person.fields().len(), 2);
/// assert_eq!(person.field_value("age"), Some(Value::I32(36)));
/// ```
pub trait Record {
    /// Name of the record type.
    fn record_name(&self) -> &'static str;

    /// Descriptor table, one entry per declared field in declaration order.
    fn fields(&self) -> &'static [FieldDescriptor];

    /// Read a directly declared, non-embedded field. Visibility is not checked.
    fn field_value(&self, name: &str) -> Option<Value>;

    /// Assign an exactly typed value to a directly declared, non-embedded field.
    ///
    /// ## Errors
    /// - Hands the value back if no such field exists or the value's type does not match exactly.
    fn assign_field(&mut self, name: &str, value: Value) -> Result<(), Value>;

    /// The embedded record stored in field `name`.
    fn embedded(&self, _name: &str) -> Option<&dyn Record> {
        None
    }

    /// Mutable access to the embedded record stored in field `name`.
    fn embedded_mut(&mut self, _name: &str) -> Option<&mut dyn Record> {
        None
    }

    /// Names of the methods declared with `#[record(methods(...))]`.
    fn methods(&self) -> &'static [&'static str] {
        &[]
    }
}
