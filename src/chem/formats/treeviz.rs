//! Treeviz formatter for equations
//!
//! Treeviz is a one line per node view of the token tree, handy when checking how a formula
//! was split. Nesting is drawn with box characters, two columns per level:
//!
//!   ⚗ Ca(OH)2 -> CaO
//!   ├─ ƒ Ca(OH)2
//!   │ ├─ ◦ C
//!   │ ├─ ◦ a
//!   │ ├─ () 2 nodes
//!   │ │ ├─ ◦ O
//!   │ │ └─ ◦ H
//!   │ └─ ↓ 2
//!   ...
//!
//! Icons
//!     Equation: ⚗
//!     Tokens:
//!         Formula: ƒ
//!         Space: ␣ (label is the quoted run)
//!         Plus: +
//!         Arrow: ⇢ (label is the kind and the spelling)
//!     Formula nodes:
//!         Text: ◦
//!         Sub: ↓
//!         Sup: ↑
//!         Group: ()

use super::registry::{FormatError, Formatter};
use crate::chem::equation::{Equation, EquationToken};
use crate::chem::formula::FormulaNode;

const LABEL_WIDTH: usize = 30;

struct Snapshot {
    node_type: &'static str,
    label: String,
    children: Vec<Snapshot>,
}

impl Snapshot {
    fn leaf(node_type: &'static str, label: String) -> Self {
        Self {
            node_type,
            label,
            children: Vec::new(),
        }
    }
}

fn snapshot_equation(equation: &Equation) -> Snapshot {
    Snapshot {
        node_type: "Equation",
        label: equation.source.clone(),
        children: equation.tokens.iter().map(snapshot_token).collect(),
    }
}

fn snapshot_token(token: &EquationToken) -> Snapshot {
    match token {
        EquationToken::Space { text } => Snapshot::leaf("Space", format!("{:?}", text)),
        EquationToken::Plus => Snapshot::leaf("Plus", "+".to_string()),
        EquationToken::Arrow { kind, text } => {
            Snapshot::leaf("Arrow", format!("{} {}", kind, text))
        }
        EquationToken::Formula { text, tree } => Snapshot {
            node_type: "Formula",
            label: text.clone(),
            children: tree.iter().map(snapshot_node).collect(),
        },
    }
}

fn snapshot_node(node: &FormulaNode) -> Snapshot {
    match node {
        FormulaNode::Group { children } => Snapshot {
            node_type: node.node_type(),
            label: format!("{} nodes", children.len()),
            children: children.iter().map(snapshot_node).collect(),
        },
        FormulaNode::Text { value } | FormulaNode::Sub { value } | FormulaNode::Sup { value } => {
            Snapshot::leaf(node.node_type(), value.clone())
        }
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let mut truncated = s.chars().take(max_chars).collect::<String>();
        truncated.push_str("...");
        truncated
    } else {
        s.to_string()
    }
}

/// Get the icon for a node type
fn get_icon(node_type: &str) -> &'static str {
    match node_type {
        "Equation" => "⚗",
        "Formula" => "ƒ",
        "Space" => "␣",
        "Plus" => "+",
        "Arrow" => "⇢",
        "Text" => "◦",
        "Sub" => "↓",
        "Sup" => "↑",
        "Group" => "()",
        _ => "○",
    }
}

fn format_snapshot(snapshot: &Snapshot, prefix: &str, is_last: bool, output: &mut String) {
    let connector = if is_last { "└─" } else { "├─" };
    output.push_str(&format!(
        "{}{} {} {}\n",
        prefix,
        connector,
        get_icon(snapshot.node_type),
        truncate(&snapshot.label, LABEL_WIDTH)
    ));

    let child_prefix = format!("{}{}", prefix, if is_last { "  " } else { "│ " });
    format_children(&snapshot.children, &child_prefix, output);
}

fn format_children(children: &[Snapshot], prefix: &str, output: &mut String) {
    let child_count = children.len();
    for (i, child) in children.iter().enumerate() {
        format_snapshot(child, prefix, i + 1 == child_count, output);
    }
}

pub fn to_treeviz_str(equation: &Equation) -> String {
    let snapshot = snapshot_equation(equation);
    let mut output = format!(
        "{} {}\n",
        get_icon(snapshot.node_type),
        truncate(&snapshot.label, LABEL_WIDTH)
    );
    format_children(&snapshot.children, "", &mut output);
    output
}

/// Formatter implementation for treeviz format
pub struct TreevizFormatter;

impl Formatter for TreevizFormatter {
    fn name(&self) -> &str {
        "treeviz"
    }

    fn serialize(&self, equation: &Equation) -> Result<String, FormatError> {
        Ok(to_treeviz_str(equation))
    }

    fn description(&self) -> &str {
        "Visual tree representation with indentation and Unicode icons"
    }
}
