//! Write-path configuration
//!
//! Threaded explicitly through `set_field_with_config` / `set_fields_with_config`.

/// Accessor configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessorConfig {
    /// Emit a warning when an `i32` is implicitly rendered into a text field
    pub warn_int_to_text: bool,
}

impl Default for AccessorConfig {
    fn default() -> Self {
        Self { warn_int_to_text: true }
    }
}

impl AccessorConfig {
    /// Create a new config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable the integer-to-text warning
    pub fn with_warn_int_to_text(mut self, warn: bool) -> Self {
        self.warn_int_to_text = warn;
        self
    }
}
