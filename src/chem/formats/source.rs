//! Source reconstruction
//!
//! Unlike the other formats this one ignores the trees and joins the source text carried by
//! each token. The output equals the input for every equation the tokenizer produced, which
//! makes it a cheap check that no whitespace or operator was lost.

use super::registry::{FormatError, Formatter};
use crate::chem::equation::{Equation, EquationToken};

/// Join the source text of `tokens`.
pub fn detokenize(tokens: &[EquationToken]) -> String {
    tokens.iter().map(EquationToken::source_text).collect()
}

/// Formatter implementation that rebuilds the input
pub struct SourceFormatter;

impl Formatter for SourceFormatter {
    fn name(&self) -> &str {
        "source"
    }

    fn serialize(&self, equation: &Equation) -> Result<String, FormatError> {
        Ok(detokenize(&equation.tokens))
    }

    fn description(&self) -> &str {
        "The equation source rebuilt from its tokens"
    }
}
