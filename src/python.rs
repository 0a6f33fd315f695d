//! Python bindings for treeperm
//!
//! This module provides PyO3-based Python bindings for the Rust core.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::engine::Paraphraser as RustParaphraser;
use crate::parser::parse_tree;
use crate::service::{ParaphraseService, RequestError};
use crate::writer::to_bracketed;

/// Convert RequestError to Python exception
impl From<RequestError> for PyErr {
    fn from(err: RequestError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

/// A paraphrase generator for one target label.
///
/// Subtrees labeled `target_label` whose children only carry labels from
/// `allowed_labels` (and at least two different ones) have their
/// `target_label` children reordered.
#[pyclass(name = "Paraphraser")]
#[derive(Clone)]
pub struct PyParaphraser {
    inner: RustParaphraser,
}

#[pymethods]
impl PyParaphraser {
    #[new]
    fn new(target_label: &str, allowed_labels: Vec<String>) -> Self {
        PyParaphraser {
            inner: RustParaphraser::new(target_label, allowed_labels),
        }
    }

    /// Generate paraphrases of a bracketed tree.
    ///
    /// Args:
    ///     tree: Bracketed tree, e.g. "(NP (NP (NN tea)) (CC and) (NP (NN milk)))"
    ///     limit: Maximum number of results (None for all)
    ///
    /// Returns:
    ///     List of bracketed trees, original excluded
    ///
    /// Raises:
    ///     ValueError: If the tree cannot be parsed
    #[pyo3(signature = (tree, limit=None))]
    fn paraphrases(&self, tree: &str, limit: Option<usize>) -> PyResult<Vec<String>> {
        let parsed = parse_tree(tree).map_err(|e| PyValueError::new_err(e.to_string()))?;
        let results = self.inner.paraphrases(&parsed).map(|t| to_bracketed(&t));
        Ok(match limit {
            Some(n) => results.take(n).collect(),
            None => results.collect(),
        })
    }

    /// Number of paraphrases a tree has, or None if it does not fit in memory
    fn count(&self, tree: &str) -> PyResult<Option<usize>> {
        let parsed = parse_tree(tree).map_err(|e| PyValueError::new_err(e.to_string()))?;
        Ok(self.inner.count(&parsed))
    }

    fn __repr__(&self) -> String {
        format!("<Paraphraser target='{}'>", self.inner.matcher().target_label())
    }
}

/// Paraphrase a tree with the default NP coordination settings.
///
/// Args:
///     tree: Bracketed tree
///     limit: Maximum number of results (default 20)
///
/// Returns:
///     List of bracketed trees
///
/// Raises:
///     ValueError: On an empty tree, invalid tree or a limit below 1
#[pyfunction]
#[pyo3(signature = (tree, limit=20))]
fn paraphrase(tree: &str, limit: i64) -> PyResult<Vec<String>> {
    let service = ParaphraseService::default();
    let limit = limit.to_string();
    let results = service.handle(Some(tree), Some(&limit))?;
    Ok(results.into_iter().map(|p| p.tree).collect())
}

#[pyfunction]
fn __version__() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[pymodule]
fn treeperm(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyParaphraser>()?;

    m.add_function(wrap_pyfunction!(paraphrase, m)?)?;
    m.add_function(wrap_pyfunction!(__version__, m)?)?;

    Ok(())
}
