//! Nested content trees and their flattening into display rows.
//!
//! A box's content producer hands back one tree per refresh tick; the tree
//! is flattened immediately and never retained across ticks.

/// Indent unit applied once per nesting level.
pub const INDENT: &str = "  ";

/// Depth argument that never limits indentation.
pub const UNBOUNDED_DEPTH: usize = usize::MAX;

/// A recursively nested sequence of display lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Leaf(String),
    Branch(Vec<Node>),
}

impl Node {
    pub fn leaf(text: impl Into<String>) -> Self {
        Node::Leaf(text.into())
    }

    pub fn branch(children: Vec<Node>) -> Self {
        Node::Branch(children)
    }

    /// Total number of leaves in this subtree.
    pub fn leaf_count(&self) -> usize {
        match self {
            Node::Leaf(_) => 1,
            Node::Branch(children) => children.iter().map(Node::leaf_count).sum(),
        }
    }
}

impl From<&str> for Node {
    fn from(text: &str) -> Self {
        Node::leaf(text)
    }
}

impl From<String> for Node {
    fn from(text: String) -> Self {
        Node::Leaf(text)
    }
}

/// Flatten a content tree into indentation-prefixed display rows.
///
/// Rows come out depth-first with sibling order preserved, so the tree's
/// insertion order is the display order. Levels at or beyond `max_depth`
/// still contribute every leaf; only the indentation stops growing.
pub fn flatten(nodes: &[Node], max_depth: usize) -> Vec<String> {
    let mut rows = Vec::new();
    flatten_into(nodes, 0, max_depth, &mut rows);
    rows
}

fn flatten_into(nodes: &[Node], depth: usize, max_depth: usize, rows: &mut Vec<String>) {
    for node in nodes {
        match node {
            Node::Leaf(text) => {
                let mut row = INDENT.repeat(depth);
                row.push_str(text);
                rows.push(row);
            }
            Node::Branch(children) => {
                let next = if depth < max_depth { depth + 1 } else { depth };
                flatten_into(children, next, max_depth, rows);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> Vec<Node> {
        vec![
            Node::leaf("alpha"),
            Node::branch(vec![
                Node::leaf("beta"),
                Node::branch(vec![Node::leaf("gamma"), Node::leaf("delta")]),
            ]),
            Node::leaf("epsilon"),
        ]
    }

    #[test]
    fn rows_match_leaf_count_and_order() {
        let tree = sample_tree();
        let rows = flatten(&tree, UNBOUNDED_DEPTH);
        let leaves: usize = tree.iter().map(Node::leaf_count).sum();
        assert_eq!(rows.len(), leaves);
        assert_eq!(
            rows,
            vec![
                "alpha".to_string(),
                "  beta".to_string(),
                "    gamma".to_string(),
                "    delta".to_string(),
                "epsilon".to_string(),
            ]
        );
    }

    #[test]
    fn depth_limit_caps_indentation_not_content() {
        let rows = flatten(&sample_tree(), 1);
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[2], "  gamma");
        assert_eq!(rows[3], "  delta");
    }

    #[test]
    fn flatten_is_idempotent_for_a_tree() {
        let tree = sample_tree();
        assert_eq!(
            flatten(&tree, UNBOUNDED_DEPTH),
            flatten(&tree, UNBOUNDED_DEPTH)
        );
    }

    #[test]
    fn empty_tree_flattens_to_nothing() {
        assert!(flatten(&[], UNBOUNDED_DEPTH).is_empty());
    }
}
