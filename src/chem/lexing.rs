//! Equation lexer
//!
//!     Splits a full equation into [EquationToken]s. The raw tokenization is done by a logos
//!     lexer ([RawToken]); this module then folds consecutive formula pieces into one formula
//!     segment and hands each segment to the formula parser.
//!
//! Raw Tokens
//!
//!     Whitespace:
//!         Any maximal run of Unicode whitespace, so a no-break space or a thin space
//!         separates members like an ASCII space does. Kept verbatim for layout.
//!
//!     Plus:
//!         A literal `+`.
//!
//!     Arrow:
//!         `->`, `→`, `<->`, `⇌`, `=>`, `<=>`. logos always takes the longest match, so `<=>`
//!         is never read as `<` followed by `=>`, and arrows are found even when glued to a
//!         formula (`Na2CO3->NaOH`).
//!
//!     Script:
//!         A `_` or `^` construct including its payload (`_12`, `_{aq}`, `^2+`, `^-`,
//!         `^{3+}`). Lexing these as one unit keeps a charge sign such as the `+` in `Cu^2+`
//!         inside the formula instead of turning it into an operator. A `{` that is never
//!         closed swallows the rest of the input.
//!
//!     Char:
//!         Any other single character. Consecutive Char and Script tokens form one formula
//!         segment.
//!
//!     Every input character is covered by one of these, so the lexer is total. Zero length
//!     segments never occur: a segment only exists once a piece was pushed into it.

use super::equation::{ArrowKind, EquationToken};
use super::formula::{parse_formula_with, ParseOptions};
use logos::Logos;
use std::ops::Range;

/// Raw tokens produced by logos before formula segments are assembled.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawToken {
    #[regex(r"\s+")]
    Whitespace,

    #[token("+")]
    Plus,

    #[token("->", |_| ArrowKind::Forward)]
    #[token("→", |_| ArrowKind::Forward)]
    #[token("<->", |_| ArrowKind::Equilibrium)]
    #[token("⇌", |_| ArrowKind::Equilibrium)]
    #[token("=>", |_| ArrowKind::DoubleForward)]
    #[token("<=>", |_| ArrowKind::DoubleEquilibrium)]
    Arrow(ArrowKind),

    #[regex(r"_(\{[^}]*\}?|[0-9]*)", priority = 4)]
    #[regex(r"\^(\{[^}]*\}?|[0-9]*[+\-]?)", priority = 4)]
    Script,

    #[regex(r"[^\s+]", priority = 1)]
    Char,
}

/// Raw logos tokens with their byte spans. Unrecognized input (none is expected) is reported
/// as [RawToken::Char] so the spans still cover the whole source.
pub fn lex_raw(source: &str) -> Vec<(RawToken, Range<usize>)> {
    let mut lexer = RawToken::lexer(source);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        tokens.push((result.unwrap_or(RawToken::Char), lexer.span()));
    }

    tokens
}

/// Tokenize an equation with the default parse options.
pub fn tokenize_equation(source: &str) -> Vec<EquationToken> {
    tokenize_equation_with(source, &ParseOptions::default())
}

/// Tokenize an equation, parsing formula segments with `options`.
pub fn tokenize_equation_with(source: &str, options: &ParseOptions) -> Vec<EquationToken> {
    tokenize_with_spans(source, options)
        .into_iter()
        .map(|(token, _)| token)
        .collect()
}

/// Tokenize an equation, pairing every token with its byte range in `source`.
pub fn tokenize_equation_with_spans(source: &str) -> Vec<(EquationToken, Range<usize>)> {
    tokenize_with_spans(source, &ParseOptions::default())
}

fn tokenize_with_spans(
    source: &str,
    options: &ParseOptions,
) -> Vec<(EquationToken, Range<usize>)> {
    let mut tokens = Vec::new();
    let mut segment: Option<Range<usize>> = None;

    for (raw, span) in lex_raw(source) {
        let token = match raw {
            RawToken::Script | RawToken::Char => {
                segment = Some(match segment.take() {
                    Some(open) => open.start..span.end,
                    None => span,
                });
                continue;
            }
            RawToken::Whitespace => EquationToken::Space {
                text: source[span.clone()].to_string(),
            },
            RawToken::Plus => EquationToken::Plus,
            RawToken::Arrow(kind) => EquationToken::Arrow {
                kind,
                text: source[span.clone()].to_string(),
            },
        };

        if let Some(open) = segment.take() {
            tokens.push(formula_token(source, open, options));
        }
        tokens.push((token, span));
    }

    if let Some(open) = segment {
        tokens.push(formula_token(source, open, options));
    }

    tokens
}

fn formula_token(
    source: &str,
    span: Range<usize>,
    options: &ParseOptions,
) -> (EquationToken, Range<usize>) {
    let text = &source[span.clone()];
    let token = EquationToken::Formula {
        text: text.to_string(),
        tree: parse_formula_with(text, options),
    };
    (token, span)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chem::testing::{arrow, formula, plus, space};

    #[test]
    fn test_lex_raw_spans() {
        let tokens = lex_raw("H2 -> O");
        let kinds: Vec<_> = tokens.iter().map(|(t, _)| *t).collect();
        assert_eq!(
            kinds,
            vec![
                RawToken::Char,
                RawToken::Char,
                RawToken::Whitespace,
                RawToken::Arrow(ArrowKind::Forward),
                RawToken::Whitespace,
                RawToken::Char,
            ]
        );
        assert_eq!(tokens[3].1, 3..5);
    }

    #[test]
    fn test_lex_raw_scripts() {
        let tokens = lex_raw("Cu^2+");
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[2], (RawToken::Script, 2..5));

        let tokens = lex_raw("x_{aq}");
        assert_eq!(tokens[1], (RawToken::Script, 1..6));
    }

    #[test]
    fn test_lex_raw_prefers_longest_arrow() {
        assert_eq!(
            lex_raw("<=>"),
            vec![(RawToken::Arrow(ArrowKind::DoubleEquilibrium), 0..3)]
        );
        assert_eq!(
            lex_raw("<->"),
            vec![(RawToken::Arrow(ArrowKind::Equilibrium), 0..3)]
        );
    }

    #[test]
    fn test_lex_raw_unicode_arrow_span() {
        assert_eq!(
            lex_raw("⇌"),
            vec![(RawToken::Arrow(ArrowKind::Equilibrium), 0..3)]
        );
    }

    #[test]
    fn test_simple_equation() {
        assert_eq!(
            tokenize_equation("A + B -> C"),
            vec![
                formula("A"),
                space(" "),
                plus(),
                space(" "),
                formula("B"),
                space(" "),
                arrow(ArrowKind::Forward, "->"),
                space(" "),
                formula("C"),
            ]
        );
    }

    #[test]
    fn test_glued_arrow() {
        assert_eq!(
            tokenize_equation("Na2CO3->NaOH"),
            vec![
                formula("Na2CO3"),
                arrow(ArrowKind::Forward, "->"),
                formula("NaOH"),
            ]
        );
    }

    #[test]
    fn test_charge_sign_stays_in_formula() {
        assert_eq!(
            tokenize_equation("Cu^2+ + 2 e^-"),
            vec![
                formula("Cu^2+"),
                space(" "),
                plus(),
                space(" "),
                formula("2"),
                space(" "),
                formula("e^-"),
            ]
        );
    }

    #[test]
    fn test_lone_symbols_are_formulas() {
        assert_eq!(
            tokenize_equation("< = -"),
            vec![
                formula("<"),
                space(" "),
                formula("="),
                space(" "),
                formula("-"),
            ]
        );
    }

    #[test]
    fn test_adjacent_delimiters_emit_no_empty_formula() {
        assert_eq!(
            tokenize_equation("++->"),
            vec![plus(), plus(), arrow(ArrowKind::Forward, "->")]
        );
    }

    #[test]
    fn test_spans_cover_source() {
        let source = "2 H2 + O2 ⇌ 2 H2O";
        let tokens = tokenize_equation_with_spans(source);
        let mut cursor = 0;
        for (token, span) in &tokens {
            assert_eq!(span.start, cursor);
            assert_eq!(&source[span.clone()], token.source_text());
            cursor = span.end;
        }
        assert_eq!(cursor, source.len());
    }

    #[test]
    fn test_options_reach_formula_parser() {
        let options = ParseOptions::default().with_max_group_depth(0);
        let tokens = tokenize_equation_with("(A)", &options);
        assert_eq!(tokens.len(), 1);
        assert!(tokens[0]
            .tree()
            .unwrap()
            .iter()
            .all(|node| node.is_text()));
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(tokenize_equation(""), vec![]);
    }
}
