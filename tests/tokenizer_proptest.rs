//! Property-based tests for the equation tokenizer and the formula parser

use chemeq::chem::equation::{ArrowKind, EquationToken};
use chemeq::chem::formats::detokenize;
use chemeq::chem::formula::{parse_formula, FormulaNode};
use chemeq::chem::lexing::{tokenize_equation, tokenize_equation_with_spans};
use proptest::prelude::*;

/// Strings drawn from the characters the notation cares about
fn equation_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z0-9()\\[\\]_^{}+\\- <=>→⇌\t]{0,40}"
}

fn script_values_non_empty(nodes: &[FormulaNode]) -> bool {
    nodes.iter().all(|node| match node {
        FormulaNode::Sub { value } | FormulaNode::Sup { value } => !value.is_empty(),
        FormulaNode::Group { children } => script_values_non_empty(children),
        FormulaNode::Text { value } => value.chars().count() == 1,
    })
}

proptest! {
    #[test]
    fn test_tokens_reconstruct_source(source in equation_strategy()) {
        let tokens = tokenize_equation(&source);
        prop_assert_eq!(detokenize(&tokens), source);
    }

    #[test]
    fn test_arbitrary_unicode_round_trips(source in any::<String>()) {
        let tokens = tokenize_equation(&source);
        prop_assert_eq!(detokenize(&tokens), source);
    }

    #[test]
    fn test_spans_are_contiguous(source in equation_strategy()) {
        let mut cursor = 0;
        for (token, span) in tokenize_equation_with_spans(&source) {
            prop_assert_eq!(span.start, cursor);
            prop_assert_eq!(&source[span.clone()], token.source_text());
            cursor = span.end;
        }
        prop_assert_eq!(cursor, source.len());
    }

    #[test]
    fn test_no_empty_tokens(source in equation_strategy()) {
        for token in tokenize_equation(&source) {
            prop_assert!(!token.source_text().is_empty(), "empty token {:?}", token);
        }
    }

    #[test]
    fn test_formula_segments_never_touch(source in equation_strategy()) {
        let tokens = tokenize_equation(&source);
        for pair in tokens.windows(2) {
            prop_assert!(!(pair[0].is_formula() && pair[1].is_formula()));
            prop_assert!(!(pair[0].is_space() && pair[1].is_space()));
        }
    }

    #[test]
    fn test_arrow_text_maps_back_to_kind(source in equation_strategy()) {
        for token in tokenize_equation(&source) {
            if let EquationToken::Arrow { kind, text } = &token {
                prop_assert_eq!(ArrowKind::from_spelling(text), Some(*kind));
            }
        }
    }

    #[test]
    fn test_script_values_without_closing_braces(source in "[A-Za-z0-9()_^{+\\-]{0,40}") {
        let tree = parse_formula(&source);
        prop_assert!(script_values_non_empty(&tree), "{:?}", tree);
    }

    #[test]
    fn test_plain_letters_are_one_text_each(source in "[A-Za-z]{0,30}") {
        let tree = parse_formula(&source);
        prop_assert_eq!(tree.len(), source.len());
        for (node, ch) in tree.iter().zip(source.chars()) {
            prop_assert_eq!(node, &FormulaNode::text(ch));
        }
    }

    #[test]
    fn test_parser_is_total(source in any::<String>()) {
        let _ = parse_formula(&source);
    }

    #[test]
    fn test_deep_nesting_is_total(depth in 0usize..500) {
        let source = format!("{}X{}", "(".repeat(depth), ")".repeat(depth));
        let tree = parse_formula(&source);
        prop_assert!(!tree.is_empty());
    }
}
