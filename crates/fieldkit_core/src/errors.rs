//! Error taxonomy for field access.
//!
//! Every variant is locally recoverable; none of the accessor operations panic.

use std::fmt;

use thiserror::Error;

/// Errors returned by the field accessor.
#[derive(Debug, Error)]
pub enum FieldError {
    #[error("no such field: {field} in {record}")]
    NotFound { record: &'static str, field: String },

    #[error("cannot read non-exported field {field}")]
    NotReadable { field: String },

    #[error("cannot set {field} field value")]
    NotSettable { field: String },

    #[error("{field}: value type didn't match field type {expected}:{found}")]
    TypeMismatch {
        field: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("{field}: cannot encode value as JSON: {source}")]
    Serialization {
        field: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("field name count not equal to field values ({names} names, {values} values)")]
    LengthMismatch { names: usize, values: usize },

    #[error("{0}")]
    Batch(BatchFailure),
}

impl FieldError {
    /// The field name the error refers to, if any.
    pub fn field(&self) -> Option<&str> {
        match self {
            FieldError::NotFound { field, .. }
            | FieldError::NotReadable { field }
            | FieldError::NotSettable { field }
            | FieldError::TypeMismatch { field, .. }
            | FieldError::Serialization { field, .. } => Some(field.as_str()),
            FieldError::LengthMismatch { .. } | FieldError::Batch(_) => None,
        }
    }
}

/// Per-field failures collected by a batch write, in the order the writes were attempted.
#[derive(Debug, Default)]
pub struct BatchFailure {
    failures: Vec<(String, FieldError)>,
}

impl BatchFailure {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: impl Into<String>, err: FieldError) {
        self.failures.push((field.into(), err));
    }

    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn len(&self) -> usize {
        self.failures.len()
    }

    /// All failures as `(field name, error)` pairs.
    pub fn failures(&self) -> &[(String, FieldError)] {
        &self.failures
    }

    /// The last failure encountered. Callers written against "last error wins" batch semantics read this.
    pub fn last(&self) -> Option<&FieldError> {
        self.failures.last().map(|(_, err)| err)
    }

    pub fn into_failures(self) -> Vec<(String, FieldError)> {
        self.failures
    }
}

impl fmt::Display for BatchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} field(s) failed to set", self.failures.len())?;
        if let Some(last) = self.last() {
            write!(f, "; last: {last}")?;
        }
        Ok(())
    }
}
