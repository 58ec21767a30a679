//! HTML rendering
//!
//! Produces the markup used for rich previews and for the `text/html` clipboard flavor.
//! Every token becomes one `<span>`; scripts use `<sub>`/`<sup>`; groups are written as
//! `<span>(<span>...</span>)</span>`. The plus sign is padded with spaces and arrows get a small
//! horizontal padding so they stay readable even when typed without surrounding whitespace.

use super::registry::{FormatError, Formatter};
use crate::chem::equation::{Equation, EquationToken};
use crate::chem::formula::FormulaNode;

const ARROW_STYLE: &str = "padding: 0 0.25em";

/// Formatter implementation for HTML markup
pub struct HtmlFormatter;

impl Formatter for HtmlFormatter {
    fn name(&self) -> &str {
        "html"
    }

    fn serialize(&self, equation: &Equation) -> Result<String, FormatError> {
        Ok(to_html_str(equation))
    }

    fn description(&self) -> &str {
        "HTML markup with <sub>/<sup> scripts"
    }
}

pub fn to_html_str(equation: &Equation) -> String {
    let mut out = String::new();
    for token in &equation.tokens {
        match token {
            EquationToken::Space { text } => {
                out.push_str("<span>");
                push_escaped(&mut out, text);
                out.push_str("</span>");
            }
            EquationToken::Plus => out.push_str("<span> + </span>"),
            EquationToken::Arrow { kind, .. } => {
                out.push_str(&format!(
                    "<span style=\"{}\">{}</span>",
                    ARROW_STYLE,
                    kind.glyph()
                ));
            }
            EquationToken::Formula { tree, .. } => {
                out.push_str("<span>");
                write_nodes(&mut out, tree);
                out.push_str("</span>");
            }
        }
    }
    out
}

fn write_nodes(out: &mut String, nodes: &[FormulaNode]) {
    for node in nodes {
        match node {
            FormulaNode::Text { value } => write_element(out, "span", value),
            FormulaNode::Sub { value } => write_element(out, "sub", value),
            FormulaNode::Sup { value } => write_element(out, "sup", value),
            FormulaNode::Group { children } => {
                out.push_str("<span>(<span>");
                write_nodes(out, children);
                out.push_str("</span>)</span>");
            }
        }
    }
}

fn write_element(out: &mut String, tag: &str, value: &str) {
    out.push('<');
    out.push_str(tag);
    out.push('>');
    push_escaped(out, value);
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}

fn push_escaped(out: &mut String, text: &str) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formula_markup() {
        let html = to_html_str(&Equation::parse("H2O"));
        assert_eq!(html, "<span><span>H</span><sub>2</sub><span>O</span></span>");
    }

    #[test]
    fn test_group_markup() {
        let html = to_html_str(&Equation::parse("(OH)2"));
        assert_eq!(
            html,
            "<span><span>(<span><span>O</span><span>H</span></span>)</span><sub>2</sub></span>"
        );
    }

    #[test]
    fn test_operators() {
        let html = to_html_str(&Equation::parse("A+B→C"));
        assert_eq!(
            html,
            "<span><span>A</span></span><span> + </span><span><span>B</span></span>\
             <span style=\"padding: 0 0.25em\">→</span><span><span>C</span></span>"
        );
    }

    #[test]
    fn test_escaping() {
        let html = to_html_str(&Equation::parse("x^{<b>}"));
        assert_eq!(html, "<span><span>x</span><sup>&lt;b&gt;</sup></span>");
    }

    #[test]
    fn test_empty_equation() {
        assert_eq!(to_html_str(&Equation::parse("")), "");
    }
}
