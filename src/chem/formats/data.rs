//! Structured data formats
//!
//! Both formats serialize the whole [Equation], source included, using the serde derives on
//! the token and node types. Nodes are internally tagged: `{"type": "sub", "value": "2"}`.

use super::registry::{FormatError, Formatter};
use crate::chem::equation::Equation;

/// Formatter implementation for pretty printed JSON
pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn serialize(&self, equation: &Equation) -> Result<String, FormatError> {
        serde_json::to_string_pretty(equation)
            .map_err(|e| FormatError::SerializationError(e.to_string()))
    }

    fn description(&self) -> &str {
        "Token tree as JSON"
    }
}

/// Formatter implementation for YAML
pub struct YamlFormatter;

impl Formatter for YamlFormatter {
    fn name(&self) -> &str {
        "yaml"
    }

    fn serialize(&self, equation: &Equation) -> Result<String, FormatError> {
        serde_yaml::to_string(equation).map_err(|e| FormatError::SerializationError(e.to_string()))
    }

    fn description(&self) -> &str {
        "Token tree as YAML"
    }
}
