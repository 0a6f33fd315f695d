//! Writing trees back to bracketed text
//!
//! The single-line form is `(LABEL child child ...)` with tokens as
//! `(TAG WORD)`, one space between elements. Parsing that text gives back a
//! structurally equal tree.

use std::fmt::{self, Display, Write as _};

use crate::tree::{Child, Node, Token, Tree};

/// Single-line bracketed form of a tree
pub fn to_bracketed(tree: &Tree) -> String {
    tree.to_string()
}

/// Multi-line form: one node per line, nested nodes indented, tokens inline
pub fn to_pretty(tree: &Tree, indent: usize) -> String {
    let mut out = String::new();
    write_pretty(&tree.root, indent, 0, &mut out);
    out
}

fn write_pretty(node: &Node, indent: usize, depth: usize, out: &mut String) {
    let pad = " ".repeat(indent * depth);
    // Nodes whose children are all tokens fit on one line
    if node.children.iter().all(|c| matches!(c, Child::Token(_))) {
        let _ = write!(out, "{pad}{node}");
        return;
    }

    let _ = write!(out, "{pad}({}", node.label);
    for child in &node.children {
        out.push('\n');
        match child {
            Child::Node(inner) => write_pretty(inner, indent, depth + 1, out),
            Child::Token(token) => {
                let _ = write!(out, "{}{token}", " ".repeat(indent * (depth + 1)));
            }
        }
    }
    out.push(')');
}

impl Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} {})", self.tag, self.word)
    }
}

impl Display for Child {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Child::Node(node) => node.fmt(f),
            Child::Token(token) => token.fmt(f),
        }
    }
}

impl Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}", self.label)?;
        for child in &self.children {
            write!(f, " {child}")?;
        }
        write!(f, ")")
    }
}

impl Display for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.root.fmt(f)
    }
}
