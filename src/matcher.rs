//! Finding subtrees whose children may be reordered
//!
//! A node qualifies when its label is the target label and the distinct
//! labels of its immediate children:
//! - number at least `min_distinct_labels` (2 by default), and
//! - all belong to the allowed-label set.
//!
//! Token children count by their tag, so `(, ,)` and `(CC or)` contribute
//! `,` and `CC`.

use rustc_hash::FxHashSet;

use crate::tree::{Node, Position, Subtree, Tree};

/// Default minimum number of distinct child labels
pub const MIN_DISTINCT_LABELS: usize = 2;

/// Subtree matching rule
#[derive(Debug, Clone)]
pub struct Matcher {
    target_label: String,
    allowed_labels: FxHashSet<String>,
    min_distinct_labels: usize,
}

impl Matcher {
    /// Create a matcher for `target_label` whose children may carry `allowed_labels`
    pub fn new<I, S>(target_label: &str, allowed_labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            target_label: target_label.to_string(),
            allowed_labels: allowed_labels.into_iter().map(Into::into).collect(),
            min_distinct_labels: MIN_DISTINCT_LABELS,
        }
    }

    /// Override the minimum number of distinct child labels (at least 1)
    pub fn with_min_distinct_labels(mut self, min: usize) -> Self {
        self.min_distinct_labels = min.max(1);
        self
    }

    pub fn target_label(&self) -> &str {
        &self.target_label
    }

    pub fn allowed_labels(&self) -> &FxHashSet<String> {
        &self.allowed_labels
    }

    pub fn min_distinct_labels(&self) -> usize {
        self.min_distinct_labels
    }

    /// Check whether a single node qualifies for reordering
    pub fn qualifies(&self, node: &Node) -> bool {
        if node.label != self.target_label {
            return false;
        }

        let labels: FxHashSet<&str> = node.children.iter().map(|c| c.label()).collect();

        labels.len() >= self.min_distinct_labels
            && labels.iter().all(|label| self.allowed_labels.contains(*label))
    }

    /// Positions of all qualifying nodes, in pre-order
    pub fn find_positions(&self, tree: &Tree) -> Vec<Position> {
        tree.positions()
            .into_iter()
            .filter(|pos| match tree.get(pos) {
                Some(Subtree::Node(node)) => self.qualifies(node),
                _ => false,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_tree;

    const GOTHIC_QUARTER: &str = "(S (NP (NP (DT The)(JJ charming)(NNP Gothic)(NNP Quarter))(, ,)(CC or)(NP (NNP Barri)(NNP Gòtic)))(, ,)(VP (VBZ has)(NP (NP(JJ narrow)(JJ medieval)(NNS streets))(VP (VBN filled)(PP (IN with)(NP (NP (JJ trendy)(NNS bars))(, ,)(NP (NNS clubs))(CC and)(NP (JJ Catalan)(NNS restaurants))))))))";

    fn np_matcher() -> Matcher {
        Matcher::new("NP", ["NP", ",", "CC"])
    }

    #[test]
    fn test_find_coordinated_nps() {
        let tree = parse_tree(GOTHIC_QUARTER).unwrap();
        let positions = np_matcher().find_positions(&tree);

        assert_eq!(positions, vec![vec![0], vec![2, 1, 1, 1, 1]]);
    }

    #[test]
    fn test_no_matches() {
        let tree =
            parse_tree("(S (DP (D the) (NP dog)) (VP (V chased) (DP (D the) (NP cat))))").unwrap();

        assert!(np_matcher().find_positions(&tree).is_empty());
    }

    #[test]
    fn test_disallowed_child_label() {
        // VP child is outside the allowed set
        let tree = parse_tree("(NP (NP (NN dog)) (VP (VBZ barks)))").unwrap();

        assert!(np_matcher().find_positions(&tree).is_empty());
    }

    #[test]
    fn test_single_child_label_does_not_qualify() {
        let tree = parse_tree("(NP (NP (NN salt)) (NP (NN pepper)))").unwrap();
        let matcher = np_matcher();

        assert!(matcher.find_positions(&tree).is_empty());
        // Relaxing the threshold lets repeated-label groups through
        assert_eq!(
            matcher.with_min_distinct_labels(1).find_positions(&tree),
            vec![Vec::<usize>::new()]
        );
    }

    #[test]
    fn test_root_can_qualify() {
        let tree = parse_tree("(NP (NP (NN salt)) (CC and) (NP (NN pepper)))").unwrap();

        assert_eq!(np_matcher().find_positions(&tree), vec![Vec::<usize>::new()]);
    }

    #[test]
    fn test_nested_positions() {
        let tree = parse_tree(
            "(NP (NP (NP (NN salt)) (CC and) (NP (NN pepper))) (CC or) (NP (NN sugar)))",
        )
        .unwrap();

        assert_eq!(np_matcher().find_positions(&tree), vec![vec![], vec![0]]);
    }

    #[test]
    fn test_label_must_equal_target() {
        let tree = parse_tree("(NX (NP (NN salt)) (CC and) (NP (NN pepper)))").unwrap();

        assert!(np_matcher().find_positions(&tree).is_empty());
    }
}
