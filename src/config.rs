// Licensed under the Apache-2.0 license

//! Configuration for the generated board-support artifact.
//!
//! This module provides [`GeneratorConfig`] which controls crate-wide
//! properties of the emitted C++ source, currently the name of the generated
//! board-support struct. The hardware description's own optional `name`
//! field is used when no override is configured.

/// Default name for the generated board-support struct when neither the
/// configuration nor the document supplies one.
pub const DEFAULT_STRUCT_NAME: &str = "ControlSurface";

/// Configuration for board-support code generation.
///
/// # Example
///
/// ```
/// use board_support_generator::config::GeneratorConfig;
///
/// // Use defaults: the document name wins, then "ControlSurface"
/// let config = GeneratorConfig::with_defaults();
/// assert_eq!(config.resolve_struct_name(Some("FieldUnit")), "FieldUnit");
/// assert_eq!(config.resolve_struct_name(None), "ControlSurface");
///
/// // An explicit struct name overrides the document
/// let config = GeneratorConfig::with_defaults().struct_name("DeskPanel");
/// assert_eq!(config.resolve_struct_name(Some("FieldUnit")), "DeskPanel");
/// ```
#[derive(Clone, Debug, Default)]
pub struct GeneratorConfig {
    /// Name for the emitted struct. Overrides the document's `name` field.
    pub struct_name: Option<String>,
}

impl GeneratorConfig {
    /// Create a GeneratorConfig with default behavior (no overrides).
    pub fn with_defaults() -> Self {
        Self::default()
    }

    /// Set the name of the emitted board-support struct.
    pub fn struct_name(mut self, name: &str) -> Self {
        self.struct_name = Some(name.to_string());
        self
    }

    /// Resolve the struct name to emit: the configured override wins, then
    /// the document's `name` field, then [`DEFAULT_STRUCT_NAME`].
    ///
    /// The name is emitted verbatim; whether it is a valid C++ identifier is
    /// left to the downstream toolchain.
    pub fn resolve_struct_name(&self, document_name: Option<&str>) -> String {
        self.struct_name
            .as_deref()
            .or(document_name)
            .unwrap_or(DEFAULT_STRUCT_NAME)
            .to_string()
    }
}
