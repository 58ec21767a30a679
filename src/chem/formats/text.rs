//! Plain text rendering
//!
//! Arrows become their glyph, whitespace is kept as typed, and groups get their parentheses
//! back. Scripts are written with the Unicode sub/superscript characters when every character
//! of the value has one (`H₂O`, `SO₄²⁻`). Otherwise, or when `unicode_scripts` is off, they
//! fall back to the input notation: bare digits for subscripts, `^2+` style for charges and
//! `_{...}` / `^{...}` for anything else.

use super::registry::{FormatError, Formatter};
use crate::chem::equation::{Equation, EquationToken};
use crate::chem::formula::FormulaNode;

/// Formatter implementation for plain text
#[derive(Debug, Clone, Copy)]
pub struct TextFormatter {
    pub unicode_scripts: bool,
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self {
            unicode_scripts: true,
        }
    }
}

impl Formatter for TextFormatter {
    fn name(&self) -> &str {
        "text"
    }

    fn serialize(&self, equation: &Equation) -> Result<String, FormatError> {
        Ok(to_text_str(equation, self.unicode_scripts))
    }

    fn description(&self) -> &str {
        "Plain text with Unicode arrows and sub/superscripts"
    }
}

pub fn to_text_str(equation: &Equation, unicode_scripts: bool) -> String {
    let mut out = String::new();
    for token in &equation.tokens {
        match token {
            EquationToken::Space { text } => out.push_str(text),
            EquationToken::Plus => out.push('+'),
            EquationToken::Arrow { kind, .. } => out.push_str(kind.glyph()),
            EquationToken::Formula { tree, .. } => write_nodes(&mut out, tree, unicode_scripts),
        }
    }
    out
}

fn write_nodes(out: &mut String, nodes: &[FormulaNode], unicode_scripts: bool) {
    for node in nodes {
        match node {
            FormulaNode::Text { value } => out.push_str(value),
            FormulaNode::Sub { value } => {
                match unicode_scripts.then(|| map_chars(value, subscript_char)).flatten() {
                    Some(mapped) => out.push_str(&mapped),
                    None if is_digits(value) => out.push_str(value),
                    None => {
                        out.push_str("_{");
                        out.push_str(value);
                        out.push('}');
                    }
                }
            }
            FormulaNode::Sup { value } => {
                match unicode_scripts.then(|| map_chars(value, superscript_char)).flatten() {
                    Some(mapped) => out.push_str(&mapped),
                    None if is_charge(value) => {
                        out.push('^');
                        out.push_str(value);
                    }
                    None => {
                        out.push_str("^{");
                        out.push_str(value);
                        out.push('}');
                    }
                }
            }
            FormulaNode::Group { children } => {
                out.push('(');
                write_nodes(out, children, unicode_scripts);
                out.push(')');
            }
        }
    }
}

fn map_chars(value: &str, map: fn(char) -> Option<char>) -> Option<String> {
    value.chars().map(map).collect()
}

fn is_digits(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|ch| ch.is_ascii_digit())
}

/// Digits with at most one trailing sign, i.e. what `^` accepts without braces.
fn is_charge(value: &str) -> bool {
    let digits = value.trim_end_matches(['+', '-']);
    !value.is_empty()
        && value.len() - digits.len() <= 1
        && digits.chars().all(|ch| ch.is_ascii_digit())
}

fn subscript_char(ch: char) -> Option<char> {
    match ch {
        '0'..='9' => char::from_u32('₀' as u32 + (ch as u32 - '0' as u32)),
        '+' => Some('₊'),
        '-' => Some('₋'),
        '=' => Some('₌'),
        '(' => Some('₍'),
        ')' => Some('₎'),
        _ => None,
    }
}

fn superscript_char(ch: char) -> Option<char> {
    match ch {
        '1' => Some('¹'),
        '2' => Some('²'),
        '3' => Some('³'),
        '0' | '4'..='9' => char::from_u32('⁰' as u32 + (ch as u32 - '0' as u32)),
        '+' => Some('⁺'),
        '-' => Some('⁻'),
        '=' => Some('⁼'),
        '(' => Some('⁽'),
        ')' => Some('⁾'),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(source: &str) -> String {
        to_text_str(&Equation::parse(source), true)
    }

    fn ascii(source: &str) -> String {
        to_text_str(&Equation::parse(source), false)
    }

    #[test]
    fn test_unicode_scripts() {
        assert_eq!(text("H2O"), "H₂O");
        assert_eq!(text("SO4^2-"), "SO₄²⁻");
        assert_eq!(text("Fe^{3+}"), "Fe³⁺");
        assert_eq!(text("C6H12O6"), "C₆H₁₂O₆");
        assert_eq!(text("x^{10}"), "x¹⁰");
    }

    #[test]
    fn test_unmappable_scripts_fall_back() {
        assert_eq!(text("NaCl_{aq}"), "NaCl_{aq}");
        assert_eq!(text("x^{n}"), "x^{n}");
    }

    #[test]
    fn test_ascii_mode() {
        assert_eq!(ascii("Cu(NO3)2"), "Cu(NO3)2");
        assert_eq!(ascii("SO4^2-"), "SO4^2-");
        assert_eq!(ascii("Fe^{3+}"), "Fe^3+");
        assert_eq!(ascii("x_{ab}"), "x_{ab}");
        assert_eq!(ascii("x^{2++}"), "x^{2++}");
    }

    #[test]
    fn test_equation_layout() {
        assert_eq!(text("2 H2 + O2 -> 2 H2O"), "2 H₂ + O₂ → 2 H₂O");
        assert_eq!(text("A<=>B"), "A⇔B");
        assert_eq!(text("A  =>  B"), "A  ⇒  B");
        assert_eq!(text("N2 + 3 H2 <-> 2 NH3"), "N₂ + 3 H₂ ⇌ 2 NH₃");
    }

    #[test]
    fn test_degraded_markers_render_literally() {
        assert_eq!(text("x_"), "x_");
        assert_eq!(text("x^"), "x^");
        assert_eq!(text("x^{"), "x^{");
        assert_eq!(text("Fe^{"), "Fe^{");
        assert_eq!(ascii("x_{"), "x_{");
    }

    #[test]
    fn test_superscript_digits() {
        let mapped: String = "0123456789".chars().filter_map(superscript_char).collect();
        assert_eq!(mapped, "⁰¹²³⁴⁵⁶⁷⁸⁹");
        let mapped: String = "0123456789".chars().filter_map(subscript_char).collect();
        assert_eq!(mapped, "₀₁₂₃₄₅₆₇₈₉");
    }
}
