//! Output formats for parsed equations
//!
//! Rendering is kept apart from parsing: every format here only walks an already parsed
//! [Equation](crate::chem::equation::Equation) and makes no parsing decisions of its own.
//!
//! - html:     markup with `<sub>`/`<sup>` for the scripts, ready for a rich preview or clipboard
//! - text:     plain text with Unicode arrows and sub/superscript glyphs
//! - json:     the token tree, serialized with serde_json
//! - yaml:     the token tree, serialized with serde_yaml
//! - treeviz:  one line per node, for inspecting trees
//! - source:   the input rebuilt from token spans

pub mod data;
pub mod html;
pub mod registry;
pub mod source;
pub mod text;
pub mod treeviz;

pub use data::{JsonFormatter, YamlFormatter};
pub use html::{to_html_str, HtmlFormatter};
pub use registry::{FormatError, FormatRegistry, Formatter};
pub use source::{detokenize, SourceFormatter};
pub use text::{to_text_str, TextFormatter};
pub use treeviz::{to_treeviz_str, TreevizFormatter};

use crate::chem::equation::Equation;
use once_cell::sync::Lazy;

static DEFAULT_REGISTRY: Lazy<FormatRegistry> = Lazy::new(FormatRegistry::with_defaults);

/// Shared registry holding the built-in formatters with their default settings.
pub fn default_registry() -> &'static FormatRegistry {
    &DEFAULT_REGISTRY
}

/// Render `equation` with one of the built-in formats.
pub fn render(equation: &Equation, format: &str) -> Result<String, FormatError> {
    default_registry().serialize(equation, format)
}
