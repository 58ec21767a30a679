//! # chemeq
//!
//! A parser for typed chemical equations such as `Cu(NO3)2 + 2 H2 -> 2 H2O`.
//!
//! File Layout
//!
//! Parsing happens in two layers. The equation lexer splits the input into whitespace runs,
//! plus signs, reaction arrows and formula segments. Each formula segment is then handed to the
//! formula parser, which builds the tree of text runs, subscripts, superscripts and
//! parenthesized groups. Rendering is a separate concern that only consumes the finished tree.
//!
//! src/chem
//!   ├── equation    Equation level tokens and the document wrapper
//!   ├── lexing      The logos lexer and the tokenizer built on it
//!   ├── formula     The recursive formula parser
//!   ├── formats     Renderers and serializers (html, text, json, yaml, treeviz, source)
//!   ├── config      Layered configuration with embedded defaults
//!   └── testing     Factories and fluent assertions for tests
//!
//! Both parse operations are total: malformed notation degrades to literal text, it never fails.

pub mod chem;

pub use chem::equation::{ArrowKind, Equation, EquationToken};
pub use chem::formula::{parse_formula, parse_formula_with, FormulaNode, FormulaTree, ParseOptions};
pub use chem::lexing::{tokenize_equation, tokenize_equation_with, tokenize_equation_with_spans};
