//! Equation level tokens
//!
//!     An equation is a flat sequence of [EquationToken]s: whitespace runs, plus signs,
//!     reaction arrows and formula segments. Every token keeps the exact source text it was
//!     produced from, so joining [EquationToken::source_text] over a sequence gives back the
//!     input byte for byte.
//!
//! Arrows
//!
//!     Several spellings map to one canonical [ArrowKind]:
//!
//!         `->`, `→`   Forward
//!         `<->`, `⇌`  Equilibrium
//!         `=>`        DoubleForward
//!         `<=>`       DoubleEquilibrium

use super::formats::detokenize;
use super::formula::{FormulaTree, ParseOptions};
use super::lexing::tokenize_equation_with;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical reaction arrow, independent of how it was typed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArrowKind {
    Forward,
    Equilibrium,
    DoubleForward,
    DoubleEquilibrium,
}

impl ArrowKind {
    /// Glyph used when the arrow is rendered.
    pub fn glyph(self) -> &'static str {
        match self {
            ArrowKind::Forward => "→",
            ArrowKind::Equilibrium => "⇌",
            ArrowKind::DoubleForward => "⇒",
            ArrowKind::DoubleEquilibrium => "⇔",
        }
    }

    /// Maps a recognized source spelling to its kind.
    pub fn from_spelling(spelling: &str) -> Option<Self> {
        match spelling {
            "->" | "→" => Some(ArrowKind::Forward),
            "<->" | "⇌" => Some(ArrowKind::Equilibrium),
            "=>" => Some(ArrowKind::DoubleForward),
            "<=>" => Some(ArrowKind::DoubleEquilibrium),
            _ => None,
        }
    }
}

impl fmt::Display for ArrowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArrowKind::Forward => write!(f, "forward"),
            ArrowKind::Equilibrium => write!(f, "equilibrium"),
            ArrowKind::DoubleForward => write!(f, "double-forward"),
            ArrowKind::DoubleEquilibrium => write!(f, "double-equilibrium"),
        }
    }
}

/// One lexical unit of a reaction equation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum EquationToken {
    /// A maximal whitespace run, kept verbatim.
    Space { text: String },
    /// A `+` between equation members.
    Plus,
    /// A reaction arrow. `text` is the spelling found in the source.
    Arrow { kind: ArrowKind, text: String },
    /// A formula segment and its parsed tree.
    Formula { text: String, tree: FormulaTree },
}

impl EquationToken {
    /// The source text this token was produced from.
    pub fn source_text(&self) -> &str {
        match self {
            EquationToken::Space { text }
            | EquationToken::Arrow { text, .. }
            | EquationToken::Formula { text, .. } => text,
            EquationToken::Plus => "+",
        }
    }

    pub fn is_space(&self) -> bool {
        matches!(self, EquationToken::Space { .. })
    }

    pub fn is_formula(&self) -> bool {
        matches!(self, EquationToken::Formula { .. })
    }

    /// Returns the arrow kind for arrow tokens.
    pub fn arrow_kind(&self) -> Option<ArrowKind> {
        match self {
            EquationToken::Arrow { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    /// Returns the parsed tree for formula tokens.
    pub fn tree(&self) -> Option<&FormulaTree> {
        match self {
            EquationToken::Formula { tree, .. } => Some(tree),
            _ => None,
        }
    }

    pub fn node_type(&self) -> &'static str {
        match self {
            EquationToken::Space { .. } => "Space",
            EquationToken::Plus => "Plus",
            EquationToken::Arrow { .. } => "Arrow",
            EquationToken::Formula { .. } => "Formula",
        }
    }
}

/// A parsed equation together with its source. This is what formatters consume.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Equation {
    pub source: String,
    pub tokens: Vec<EquationToken>,
}

impl Equation {
    pub fn parse(source: &str) -> Self {
        Self::parse_with(source, &ParseOptions::default())
    }

    pub fn parse_with(source: &str, options: &ParseOptions) -> Self {
        Self {
            source: source.to_string(),
            tokens: tokenize_equation_with(source, options),
        }
    }

    /// Rebuilds the source from the token texts.
    pub fn to_source(&self) -> String {
        detokenize(&self.tokens)
    }

    /// Iterates the formula trees in order, skipping operators and whitespace.
    pub fn formulas(&self) -> impl Iterator<Item = &FormulaTree> {
        self.tokens.iter().filter_map(EquationToken::tree)
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}
