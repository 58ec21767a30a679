//! Testing utilities
//!
//!     Factories keep expected trees short to write (`vec![text("H"), sub("2")]`), and the
//!     fluent assertions give readable failure messages for deep trees:
//!
//!     ```rust-example
//!     assert_formula(&parse_formula("Cu(NO3)2"))
//!         .length(4)
//!         .text(0, "C")
//!         .group(2, |g| { g.length(3).sub(2, "3"); })
//!         .sub(3, "2");
//!     ```

use super::equation::{ArrowKind, EquationToken};
use super::formula::{parse_formula, FormulaNode};

// ============================================================================
// Factories
// ============================================================================

pub fn text(value: impl Into<String>) -> FormulaNode {
    FormulaNode::text(value)
}

pub fn sub(value: impl Into<String>) -> FormulaNode {
    FormulaNode::sub(value)
}

pub fn sup(value: impl Into<String>) -> FormulaNode {
    FormulaNode::sup(value)
}

pub fn group(children: Vec<FormulaNode>) -> FormulaNode {
    FormulaNode::group(children)
}

pub fn space(text: impl Into<String>) -> EquationToken {
    EquationToken::Space { text: text.into() }
}

pub fn plus() -> EquationToken {
    EquationToken::Plus
}

pub fn arrow(kind: ArrowKind, text: impl Into<String>) -> EquationToken {
    EquationToken::Arrow {
        kind,
        text: text.into(),
    }
}

/// A formula token whose tree is whatever the formula parser makes of `text`.
pub fn formula(text: impl Into<String>) -> EquationToken {
    let text = text.into();
    let tree = parse_formula(&text);
    EquationToken::Formula { text, tree }
}

// ============================================================================
// Fluent assertions
// ============================================================================

/// Create an assertion builder for a formula tree
pub fn assert_formula(nodes: &[FormulaNode]) -> FormulaAssertion<'_> {
    FormulaAssertion {
        nodes,
        context: "formula".to_string(),
    }
}

/// Create an assertion builder for an equation token sequence
pub fn assert_tokens(tokens: &[EquationToken]) -> TokensAssertion<'_> {
    TokensAssertion { tokens }
}

pub struct FormulaAssertion<'a> {
    nodes: &'a [FormulaNode],
    context: String,
}

impl<'a> FormulaAssertion<'a> {
    pub fn length(self, expected: usize) -> Self {
        assert_eq!(
            self.nodes.len(),
            expected,
            "{}: Expected {} nodes, found {}: {:?}",
            self.context,
            expected,
            self.nodes.len(),
            self.nodes
        );
        self
    }

    pub fn text(self, index: usize, expected: &str) -> Self {
        self.leaf(index, "Text", expected)
    }

    pub fn sub(self, index: usize, expected: &str) -> Self {
        self.leaf(index, "Sub", expected)
    }

    pub fn sup(self, index: usize, expected: &str) -> Self {
        self.leaf(index, "Sup", expected)
    }

    /// Assert the node at `index` is a group and run `check` against its children.
    pub fn group<F>(self, index: usize, check: F) -> Self
    where
        F: FnOnce(FormulaAssertion<'a>),
    {
        let node = self.node(index);
        match node.children() {
            Some(children) => check(FormulaAssertion {
                nodes: children,
                context: format!("{}[{}]", self.context, index),
            }),
            None => panic!(
                "{}[{}]: Expected Group, found {}",
                self.context,
                index,
                node.node_type()
            ),
        }
        self
    }

    /// Assert the concatenated `Text` values equal `expected`, ignoring other nodes.
    pub fn plain_text(self, expected: &str) -> Self {
        let actual: String = self
            .nodes
            .iter()
            .filter_map(|node| match node {
                FormulaNode::Text { value } => Some(value.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(actual, expected, "{}: plain text mismatch", self.context);
        self
    }

    fn node(&self, index: usize) -> &'a FormulaNode {
        self.nodes.get(index).unwrap_or_else(|| {
            panic!(
                "{}: No node at index {} (have {})",
                self.context,
                index,
                self.nodes.len()
            )
        })
    }

    fn leaf(self, index: usize, node_type: &str, expected: &str) -> Self {
        let node = self.node(index);
        assert_eq!(
            node.node_type(),
            node_type,
            "{}[{}]: Expected {}, found {:?}",
            self.context,
            index,
            node_type,
            node
        );
        assert_eq!(
            node.value(),
            Some(expected),
            "{}[{}]: value mismatch",
            self.context,
            index
        );
        self
    }
}

pub struct TokensAssertion<'a> {
    tokens: &'a [EquationToken],
}

impl<'a> TokensAssertion<'a> {
    pub fn length(self, expected: usize) -> Self {
        assert_eq!(
            self.tokens.len(),
            expected,
            "Expected {} tokens, found {}: {:?}",
            expected,
            self.tokens.len(),
            self.tokens
        );
        self
    }

    /// Assert the token kinds in order, by [EquationToken::node_type] name.
    pub fn kinds(self, expected: &[&str]) -> Self {
        let actual: Vec<_> = self.tokens.iter().map(EquationToken::node_type).collect();
        assert_eq!(actual, expected, "token kinds mismatch");
        self
    }

    pub fn arrow(self, index: usize, kind: ArrowKind) -> Self {
        assert_eq!(
            self.token(index).arrow_kind(),
            Some(kind),
            "token[{}]: Expected {} arrow, found {:?}",
            index,
            kind,
            self.token(index)
        );
        self
    }

    /// Assert the token at `index` is a formula with source `text`, then check its tree.
    pub fn formula<F>(self, index: usize, text: &str, check: F) -> Self
    where
        F: FnOnce(FormulaAssertion<'a>),
    {
        let token = self.token(index);
        match token {
            EquationToken::Formula { text: actual, tree } => {
                assert_eq!(actual, text, "token[{}]: formula text mismatch", index);
                check(FormulaAssertion {
                    nodes: tree,
                    context: format!("token[{}]", index),
                });
            }
            other => panic!("token[{}]: Expected Formula, found {:?}", index, other),
        }
        self
    }

    /// Assert joining every token's source text gives `source`.
    pub fn reconstructs(self, source: &str) -> Self {
        let rebuilt: String = self.tokens.iter().map(EquationToken::source_text).collect();
        assert_eq!(rebuilt, source, "tokens do not reconstruct the source");
        self
    }

    fn token(&self, index: usize) -> &'a EquationToken {
        self.tokens.get(index).unwrap_or_else(|| {
            panic!("No token at index {} (have {})", index, self.tokens.len())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fluent_formula_assertions() {
        let tree = parse_formula("Cu(NO3)2");
        assert_formula(&tree)
            .length(4)
            .text(0, "C")
            .text(1, "u")
            .group(2, |g| {
                g.length(3).text(0, "N").text(1, "O").sub(2, "3");
            })
            .sub(3, "2")
            .plain_text("Cu");
    }

    #[test]
    #[should_panic(expected = "Expected Sup")]
    fn test_wrong_leaf_kind_panics() {
        let tree = parse_formula("H2");
        assert_formula(&tree).sup(1, "2");
    }

    #[test]
    fn test_formula_factory_parses() {
        assert_eq!(
            formula("H2"),
            EquationToken::Formula {
                text: "H2".to_string(),
                tree: vec![text("H"), sub("2")],
            }
        );
    }
}
