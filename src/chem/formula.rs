//! Formula parser
//!
//!     Turns a single formula segment (as produced by the equation lexer) into a tree of
//!     [FormulaNode]s. The scanner walks the segment left to right and dispatches on the
//!     current character:
//!
//!         - `(` opens a group. The body runs up to the `)` that balances it and is parsed
//!           recursively into a [FormulaNode::Group].
//!         - `_` starts a subscript: either a braced value `_{...}` or a run of ASCII digits.
//!         - `^` starts a superscript: either a braced value `^{...}` or a run of ASCII digits
//!           followed by one optional `+` or `-` (ion charges such as `^2+`, `^3-` or `^-`).
//!         - a digit run right after a letter, a closing bracket or a group is an atom count
//!           and becomes a [FormulaNode::Sub] (`H2O`, `Cu(NO3)2`). Leading coefficients such
//!           as the `2` of `2H2O` stay text.
//!         - anything else is a single character [FormulaNode::Text].
//!
//!     Braced values end at the first `}`; braces do not nest.
//!
//! Degradation
//!
//!     The parser never fails. Malformed notation falls back to literal text:
//!
//!         - a bare `_` or `^` with nothing usable after it becomes `Text("_")` / `Text("^")`,
//!         - a `{` that is never closed takes the rest of the segment as its value, unless
//!           nothing follows it: then the marker and the `{` are both literal text,
//!         - a `(` that is never closed takes the rest of the segment as its group body,
//!         - a `(` deeper than [ParseOptions::max_group_depth] stays a literal `(`.
//!
//!     Plain characters are not merged: `"NaCl"` yields four `Text` nodes. Consumers that only
//!     render can concatenate adjacent text values without any visible difference.

use serde::{Deserialize, Serialize};

/// Sequence of formula nodes in left to right layout order.
pub type FormulaTree = Vec<FormulaNode>;

/// Group nesting accepted by [ParseOptions::default].
pub const DEFAULT_MAX_GROUP_DEPTH: usize = 64;

/// One structural unit of a chemical formula.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FormulaNode {
    /// Literal text rendered on the baseline.
    Text { value: String },
    /// Lowered content: a digit run or a braced value.
    Sub { value: String },
    /// Raised content: digits with an optional trailing sign, or a braced value.
    Sup { value: String },
    /// Parenthesized sub-formula. Renderers add the `(` and `)` themselves.
    Group { children: FormulaTree },
}

impl FormulaNode {
    pub fn text(value: impl Into<String>) -> Self {
        FormulaNode::Text {
            value: value.into(),
        }
    }

    pub fn sub(value: impl Into<String>) -> Self {
        FormulaNode::Sub {
            value: value.into(),
        }
    }

    pub fn sup(value: impl Into<String>) -> Self {
        FormulaNode::Sup {
            value: value.into(),
        }
    }

    pub fn group(children: FormulaTree) -> Self {
        FormulaNode::Group { children }
    }

    /// Returns the string payload of leaf nodes.
    pub fn value(&self) -> Option<&str> {
        match self {
            FormulaNode::Text { value } | FormulaNode::Sub { value } | FormulaNode::Sup { value } => {
                Some(value)
            }
            FormulaNode::Group { .. } => None,
        }
    }

    /// Returns nested nodes for groups.
    pub fn children(&self) -> Option<&FormulaTree> {
        match self {
            FormulaNode::Group { children } => Some(children),
            _ => None,
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, FormulaNode::Text { .. })
    }

    /// Name of the variant, as used by the tree visualizer and test messages.
    pub fn node_type(&self) -> &'static str {
        match self {
            FormulaNode::Text { .. } => "Text",
            FormulaNode::Sub { .. } => "Sub",
            FormulaNode::Sup { .. } => "Sup",
            FormulaNode::Group { .. } => "Group",
        }
    }
}

/// Knobs for the formula parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Deepest group that is still built as a [FormulaNode::Group]. A top level group has
    /// depth 1. Zero disables groups entirely.
    pub max_group_depth: usize,
}

impl ParseOptions {
    pub fn with_max_group_depth(mut self, max_group_depth: usize) -> Self {
        self.max_group_depth = max_group_depth;
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_group_depth: DEFAULT_MAX_GROUP_DEPTH,
        }
    }
}

/// Parse a formula segment with the default options.
pub fn parse_formula(text: &str) -> FormulaTree {
    parse_formula_with(text, &ParseOptions::default())
}

/// Parse a formula segment.
pub fn parse_formula_with(text: &str, options: &ParseOptions) -> FormulaTree {
    let chars: Vec<char> = text.chars().collect();
    parse_nodes(&chars, 0, options)
}

fn parse_nodes(chars: &[char], depth: usize, options: &ParseOptions) -> FormulaTree {
    let mut nodes = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let (node, next) = match chars[i] {
            '(' if depth < options.max_group_depth => {
                let (body, next) = group_body(chars, i + 1);
                let children = parse_nodes(body, depth + 1, options);
                (FormulaNode::Group { children }, next)
            }
            '_' => subscript(chars, i + 1),
            '^' => superscript(chars, i + 1),
            ch if ch.is_ascii_digit() && takes_count(nodes.last()) => {
                let end = digits_end(chars, i);
                (FormulaNode::sub(chars[i..end].iter().collect::<String>()), end)
            }
            ch => (FormulaNode::text(ch), i + 1),
        };
        nodes.push(node);
        i = next;
    }

    nodes
}

/// Whether a digit run right after `prev` is an atom count. Leading coefficients and digits
/// after punctuation or scripts stay text.
fn takes_count(prev: Option<&FormulaNode>) -> bool {
    match prev {
        Some(FormulaNode::Group { .. }) => true,
        Some(FormulaNode::Text { value }) => value
            .chars()
            .all(|ch| ch.is_alphabetic() || matches!(ch, ')' | ']')),
        _ => false,
    }
}

/// Returns the body of a group opened just before `start` and the index after its `)`.
/// An unbalanced group takes everything up to the end.
fn group_body(chars: &[char], start: usize) -> (&[char], usize) {
    let mut depth = 1usize;
    for (offset, ch) in chars[start..].iter().enumerate() {
        match ch {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    let end = start + offset;
                    return (&chars[start..end], end + 1);
                }
            }
            _ => {}
        }
    }
    (&chars[start..], chars.len())
}

/// Reads `{...}` starting at `start`. The first `}` closes the value; without one the value
/// runs to the end. A `{` that is both unclosed and last is not a value, so the marker and
/// the brace stay literal.
fn braced(chars: &[char], start: usize) -> Option<(String, usize)> {
    if chars.get(start) != Some(&'{') {
        return None;
    }
    let body = &chars[start + 1..];
    match body.iter().position(|&ch| ch == '}') {
        Some(close) => Some((body[..close].iter().collect(), start + 1 + close + 1)),
        None if body.is_empty() => None,
        None => Some((body.iter().collect(), chars.len())),
    }
}

fn digits_end(chars: &[char], start: usize) -> usize {
    start
        + chars[start..]
            .iter()
            .take_while(|ch| ch.is_ascii_digit())
            .count()
}

fn subscript(chars: &[char], start: usize) -> (FormulaNode, usize) {
    if let Some((value, next)) = braced(chars, start) {
        return (FormulaNode::Sub { value }, next);
    }

    let end = digits_end(chars, start);
    if end > start {
        (FormulaNode::sub(chars[start..end].iter().collect::<String>()), end)
    } else {
        (FormulaNode::text("_"), start)
    }
}

fn superscript(chars: &[char], start: usize) -> (FormulaNode, usize) {
    if let Some((value, next)) = braced(chars, start) {
        return (FormulaNode::Sup { value }, next);
    }

    let mut end = digits_end(chars, start);
    if matches!(chars.get(end), Some('+') | Some('-')) {
        end += 1;
    }
    if end > start {
        (FormulaNode::sup(chars[start..end].iter().collect::<String>()), end)
    } else {
        (FormulaNode::text("^"), start)
    }
}
