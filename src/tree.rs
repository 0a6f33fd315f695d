//! Constituency tree data structures
//!
//! A tree is an owned hierarchy of labeled nodes whose leaves are
//! pre-terminal tokens `(TAG WORD)`. Subtrees are addressed by a
//! [`Position`]: the child indices followed from the root, so the empty
//! position is the root itself.
//!
//! Nothing here shares structure. `Clone` is a deep copy, which is what the
//! permutation stages rely on when they build new trees from an original.

use thiserror::Error;

/// Path of child indices from the root
pub type Position = Vec<usize>;

/// Error when addressing a subtree
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("No subtree at position {0:?}")]
    InvalidPosition(Position),

    #[error("Position {0:?} addresses a token, not a node")]
    NotANode(Position),
}

/// A pre-terminal leaf: part-of-speech tag and surface word
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token {
    pub tag: String,
    pub word: String,
}

impl Token {
    pub fn new(tag: &str, word: &str) -> Self {
        Self {
            tag: tag.to_string(),
            word: word.to_string(),
        }
    }
}

/// A child of a node: either another node or a token
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Child {
    Node(Node),
    Token(Token),
}

impl Child {
    /// Label of a node, or tag of a token
    pub fn label(&self) -> &str {
        match self {
            Child::Node(node) => &node.label,
            Child::Token(token) => &token.tag,
        }
    }

    pub fn as_node(&self) -> Option<&Node> {
        match self {
            Child::Node(node) => Some(node),
            Child::Token(_) => None,
        }
    }
}

impl From<Node> for Child {
    fn from(node: Node) -> Self {
        Child::Node(node)
    }
}

impl From<Token> for Child {
    fn from(token: Token) -> Self {
        Child::Token(token)
    }
}

/// A labeled node with ordered children
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Node {
    pub label: String,
    pub children: Vec<Child>,
}

impl Node {
    /// Create a node with the given label and children
    pub fn new(label: &str, children: Vec<Child>) -> Self {
        Self {
            label: label.to_string(),
            children,
        }
    }

    /// Get the subtree at a position relative to this node
    pub fn get(&self, position: &[usize]) -> Option<Subtree<'_>> {
        let Some((&first, rest)) = position.split_first() else {
            return Some(Subtree::Node(self));
        };
        match self.children.get(first)? {
            Child::Node(node) => node.get(rest),
            Child::Token(token) if rest.is_empty() => Some(Subtree::Token(token)),
            Child::Token(_) => None,
        }
    }

    /// Get the node at a position relative to this node
    pub fn get_node(&self, position: &[usize]) -> Option<&Node> {
        match self.get(position)? {
            Subtree::Node(node) => Some(node),
            Subtree::Token(_) => None,
        }
    }

    /// Get a mutable reference to the node at a position relative to this node
    pub fn get_node_mut(&mut self, position: &[usize]) -> Option<&mut Node> {
        let mut current = self;
        for &idx in position {
            current = match current.children.get_mut(idx)? {
                Child::Node(node) => node,
                Child::Token(_) => return None,
            };
        }
        Some(current)
    }

    /// Pre-order list of all positions below (and including) this node
    pub fn positions(&self) -> Vec<Position> {
        let mut positions = Vec::new();
        let mut prefix = Vec::new();
        collect_positions(self, &mut prefix, &mut positions);
        positions
    }

    /// Tokens under this node, left to right
    pub fn leaves(&self) -> Vec<&Token> {
        let mut leaves = Vec::new();
        collect_leaves(self, &mut leaves);
        leaves
    }
}

fn collect_positions(node: &Node, prefix: &mut Position, out: &mut Vec<Position>) {
    out.push(prefix.clone());
    for (idx, child) in node.children.iter().enumerate() {
        prefix.push(idx);
        match child {
            Child::Node(inner) => collect_positions(inner, prefix, out),
            Child::Token(_) => out.push(prefix.clone()),
        }
        prefix.pop();
    }
}

fn collect_leaves<'a>(node: &'a Node, out: &mut Vec<&'a Token>) {
    for child in &node.children {
        match child {
            Child::Node(inner) => collect_leaves(inner, out),
            Child::Token(token) => out.push(token),
        }
    }
}

/// Borrowed view of whatever a position addresses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subtree<'a> {
    Node(&'a Node),
    Token(&'a Token),
}

impl Subtree<'_> {
    pub fn label(&self) -> &str {
        match self {
            Subtree::Node(node) => &node.label,
            Subtree::Token(token) => &token.tag,
        }
    }
}

/// A parsed constituency tree
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Tree {
    pub root: Node,
}

impl Tree {
    pub fn new(root: Node) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Get the subtree at a position
    pub fn get(&self, position: &[usize]) -> Option<Subtree<'_>> {
        self.root.get(position)
    }

    /// Get the node at a position
    pub fn get_node(&self, position: &[usize]) -> Option<&Node> {
        self.root.get_node(position)
    }

    /// Get a mutable reference to the node at a position
    pub fn get_node_mut(&mut self, position: &[usize]) -> Option<&mut Node> {
        self.root.get_node_mut(position)
    }

    /// All positions in pre-order, starting with the root (`[]`)
    pub fn positions(&self) -> Vec<Position> {
        self.root.positions()
    }

    /// Replace the node at a position, returning the node that was there
    pub fn replace(&mut self, position: &[usize], node: Node) -> Result<Node, TreeError> {
        match self.get(position) {
            None => return Err(TreeError::InvalidPosition(position.to_vec())),
            Some(Subtree::Token(_)) => return Err(TreeError::NotANode(position.to_vec())),
            Some(Subtree::Node(_)) => {}
        }
        let slot = self
            .get_node_mut(position)
            .ok_or_else(|| TreeError::InvalidPosition(position.to_vec()))?;
        Ok(std::mem::replace(slot, node))
    }

    /// Tokens in surface order
    pub fn leaves(&self) -> Vec<&Token> {
        self.root.leaves()
    }

    /// Surface words joined by single spaces
    pub fn sentence(&self) -> String {
        self.leaves()
            .iter()
            .map(|token| token.word.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// (S (NP (DT the) (NN dog)) (VP (VBZ barks)))
    fn create_test_tree() -> Tree {
        let np = Node::new(
            "NP",
            vec![Token::new("DT", "the").into(), Token::new("NN", "dog").into()],
        );
        let vp = Node::new("VP", vec![Token::new("VBZ", "barks").into()]);
        Tree::new(Node::new("S", vec![np.into(), vp.into()]))
    }

    #[test]
    fn test_positions_preorder() {
        let tree = create_test_tree();
        let positions = tree.positions();

        assert_eq!(
            positions,
            vec![
                vec![],
                vec![0],
                vec![0, 0],
                vec![0, 1],
                vec![1],
                vec![1, 0],
            ]
        );
    }

    #[test]
    fn test_get_by_position() {
        let tree = create_test_tree();

        assert_eq!(tree.get(&[]).unwrap().label(), "S");
        assert_eq!(tree.get(&[0]).unwrap().label(), "NP");
        assert_eq!(
            tree.get(&[0, 1]),
            Some(Subtree::Token(&Token::new("NN", "dog")))
        );
        assert!(tree.get(&[0, 2]).is_none());
        assert!(tree.get(&[0, 1, 0]).is_none());
        assert!(tree.get_node(&[1, 0]).is_none());
    }

    #[test]
    fn test_replace_returns_old_node() {
        let mut tree = create_test_tree();
        let original = tree.clone();
        let replacement = Node::new("NP", vec![Token::new("PRP", "it").into()]);

        let old = tree.replace(&[0], replacement.clone()).unwrap();

        assert_eq!(&old, original.get_node(&[0]).unwrap());
        assert_eq!(tree.get_node(&[0]), Some(&replacement));
        // The clone is a deep copy and is untouched
        assert_eq!(original.sentence(), "the dog barks");
        assert_eq!(tree.sentence(), "it barks");
    }

    #[test]
    fn test_replace_invalid_positions() {
        let mut tree = create_test_tree();
        let node = Node::new("X", vec![Token::new("Y", "z").into()]);

        assert_eq!(
            tree.replace(&[5], node.clone()),
            Err(TreeError::InvalidPosition(vec![5]))
        );
        assert_eq!(
            tree.replace(&[0, 0], node),
            Err(TreeError::NotANode(vec![0, 0]))
        );
    }

    #[test]
    fn test_replace_root() {
        let mut tree = create_test_tree();
        let node = Node::new("FRAG", vec![Token::new("UH", "hi").into()]);

        tree.replace(&[], node.clone()).unwrap();

        assert_eq!(tree.root(), &node);
    }

    #[test]
    fn test_leaves_and_sentence() {
        let tree = create_test_tree();
        let tags: Vec<_> = tree.leaves().iter().map(|t| t.tag.as_str()).collect();

        assert_eq!(tags, vec!["DT", "NN", "VBZ"]);
        assert_eq!(tree.sentence(), "the dog barks");
    }
}
