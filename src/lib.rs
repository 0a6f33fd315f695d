//! Treeperm: paraphrase generation by reordering constituents
//!
//! Given a bracketed constituency tree, produces every other tree that
//! differs only in the order of interchangeable sibling constituents
//! (e.g. coordinated noun phrases). Core implementation in Rust with
//! optional Python bindings.

pub mod assembler; // Cross product of arrangements into whole trees
pub mod engine; // End-to-end generation (parser + matcher + assembler)
pub mod matcher; // Qualifying subtree positions
pub mod parser; // Bracketed tree parser
pub mod permuter; // Arrangements of one subtree's children
pub mod service; // Request validation, limits and response payloads
pub mod tree; // Tree data structures and positions
pub mod writer; // Bracketed serialization

// Python bindings
#[cfg(feature = "pyo3")]
pub mod python;

// Re-exports for convenience
pub use assembler::Paraphrases;
pub use engine::{Paraphraser, paraphrase};
pub use matcher::Matcher;
pub use parser::{ParseError, parse_tree};
pub use permuter::permute_subtree;
pub use service::{ParaphraseService, RequestError, Response, ServiceConfig};
pub use tree::{Child, Node, Position, Token, Tree};
pub use writer::to_bracketed;
