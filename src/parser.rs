//! Bracketed tree parser
//!
//! Parses strings such as `(S (NP (DT the) (NN dog)) (VP (VBZ barks)))` into
//! a [`Tree`] using a pest grammar. Parsing is all-or-nothing: either the whole
//! input is exactly one well-formed tree, or a [`ParseError`] is returned.

use pest::Parser;
use pest::iterators::Pair;
use pest_derive::Parser;
use std::str::FromStr;
use thiserror::Error;

use crate::tree::{Child, Node, Token, Tree};

#[derive(Parser)]
#[grammar = "tree_grammar.pest"]
struct TreeParser;

/// Error type for tree parsing failures
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Tree error: {0}")]
    Syntax(#[from] pest::error::Error<Rule>),

    #[error("Tree error: root must be a node with bracketed children, found token ({0} {1})")]
    TokenRoot(String, String),
}

/// Parse a bracketed tree string
pub fn parse_tree(input: &str) -> Result<Tree, ParseError> {
    let mut pairs = TreeParser::parse(Rule::tree, input)?;

    // tree = { SOI ~ expr ~ EOI }, so the first inner pair is the root expression
    let root_pair = pairs
        .next()
        .and_then(|tree| tree.into_inner().next())
        .ok_or_else(|| unexpected(input))?;

    match build_child(root_pair) {
        Child::Node(root) => Ok(Tree::new(root)),
        Child::Token(token) => Err(ParseError::TokenRoot(token.tag, token.word)),
    }
}

/// Build a node or token from an `expr` pair
fn build_child(pair: Pair<Rule>) -> Child {
    let rule = pair.as_rule();
    let mut inner = pair.into_inner();
    // Both alternatives start with a label symbol
    let label = inner.next().map(|p| p.as_str()).unwrap_or_default();

    match rule {
        Rule::token => {
            let word = inner.next().map(|p| p.as_str()).unwrap_or_default();
            Child::Token(Token::new(label, word))
        }
        _ => {
            let children = inner.map(build_child).collect();
            Child::Node(Node::new(label, children))
        }
    }
}

/// Grammar-level failure for inputs that parsed but produced no root
fn unexpected(input: &str) -> ParseError {
    let error = pest::error::Error::new_from_pos(
        pest::error::ErrorVariant::CustomError {
            message: "expected a bracketed tree".to_string(),
        },
        pest::Position::from_start(input),
    );
    ParseError::Syntax(error)
}

impl FromStr for Tree {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_tree(s)
    }
}
