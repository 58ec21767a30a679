//! Formatter registry
//!
//!     Renderers are looked up by name (`"text"`, `"html"`, ...) so the CLI and the config
//!     layer can pick one from a string. A registry is cheap to build; [FormatRegistry::with_defaults]
//!     holds the six built-in formats, and [crate::chem::config::ChemConfig::registry] replaces
//!     the text formatter with one carrying the configured script setting.
//!
//!     Names are kept in a `BTreeMap`, so listing and iteration are alphabetical without a
//!     separate sort.

use crate::chem::equation::Equation;
use std::collections::BTreeMap;
use thiserror::Error;

/// Failure to render an equation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("Format '{0}' not found")]
    FormatNotFound(String),
    /// A serde backend rejected the token tree.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// A named renderer for parsed equations.
///
/// Renderers only walk the finished [Equation]. Markup and text renderers are infallible in
/// practice; the `Result` exists for the serde backends.
pub trait Formatter: Send + Sync {
    /// Lookup key, e.g. `"treeviz"`.
    fn name(&self) -> &str;

    fn serialize(&self, equation: &Equation) -> Result<String, FormatError>;

    /// One line shown by `chemeq list-formats`.
    fn description(&self) -> &str {
        ""
    }
}

/// Formatters keyed by [Formatter::name].
pub struct FormatRegistry {
    formatters: BTreeMap<String, Box<dyn Formatter>>,
}

impl FormatRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        FormatRegistry {
            formatters: BTreeMap::new(),
        }
    }

    /// html, json, source, text (Unicode scripts on), treeviz and yaml.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(super::HtmlFormatter);
        registry.register(super::TextFormatter::default());
        registry.register(super::JsonFormatter);
        registry.register(super::YamlFormatter);
        registry.register(super::TreevizFormatter);
        registry.register(super::SourceFormatter);
        registry
    }

    /// Adds `formatter`, replacing any formatter registered under the same name.
    pub fn register<F: Formatter + 'static>(&mut self, formatter: F) {
        self.formatters
            .insert(formatter.name().to_string(), Box::new(formatter));
    }

    pub fn get(&self, name: &str) -> Option<&dyn Formatter> {
        self.formatters.get(name).map(|f| f.as_ref())
    }

    pub fn has(&self, name: &str) -> bool {
        self.formatters.contains_key(name)
    }

    /// Render `equation` with the formatter called `format`.
    pub fn serialize(&self, equation: &Equation, format: &str) -> Result<String, FormatError> {
        self.get(format)
            .ok_or_else(|| FormatError::FormatNotFound(format.to_string()))?
            .serialize(equation)
    }

    /// Registered names in alphabetical order.
    pub fn list_formats(&self) -> Vec<String> {
        self.formatters.keys().cloned().collect()
    }

    /// Registered formatters in name order.
    pub fn formatters(&self) -> impl Iterator<Item = &dyn Formatter> {
        self.formatters.values().map(|f| f.as_ref())
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
