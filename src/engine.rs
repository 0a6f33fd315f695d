//! End-to-end paraphrase generation
//!
//! The [`Paraphraser`] runs the full pipeline:
//! 1. Parse the bracketed text into a Tree
//! 2. Find the qualifying positions
//! 3. Enumerate the arrangements at each position
//! 4. Combine them into whole trees, leaving out the original

use crate::assembler::Paraphrases;
use crate::matcher::Matcher;
use crate::parser::{ParseError, parse_tree};
use crate::tree::Tree;

/// Paraphrase generator for one target label and allowed-label set
#[derive(Debug, Clone)]
pub struct Paraphraser {
    matcher: Matcher,
}

impl Paraphraser {
    pub fn new<I, S>(target_label: &str, allowed_labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            matcher: Matcher::new(target_label, allowed_labels),
        }
    }

    /// Override the minimum number of distinct child labels a subtree needs
    pub fn with_min_distinct_labels(self, min: usize) -> Self {
        Self {
            matcher: self.matcher.with_min_distinct_labels(min),
        }
    }

    pub fn matcher(&self) -> &Matcher {
        &self.matcher
    }

    /// Lazily generate every reordering of `tree` except `tree` itself
    pub fn paraphrases<'a>(&self, tree: &'a Tree) -> Paraphrases<'a> {
        let positions = self.matcher.find_positions(tree);
        Paraphrases::from_matched(tree, positions, self.matcher.target_label())
    }

    /// Number of results `paraphrases` would yield, `None` on overflow
    pub fn count(&self, tree: &Tree) -> Option<usize> {
        self.paraphrases(tree).combination_count().map(|n| n - 1)
    }

    /// Parse `text` and collect all of its paraphrases
    ///
    /// Collects eagerly; check [`count`](Self::count) first or use
    /// [`paraphrases`](Self::paraphrases) with `take` for wide coordinations.
    pub fn paraphrase_str(&self, text: &str) -> Result<Vec<Tree>, ParseError> {
        let tree = parse_tree(text)?;
        Ok(self.paraphrases(&tree).collect())
    }
}

/// Parse `text` and return every reordering of its `target_label` subtrees
pub fn paraphrase<I, S>(text: &str, target_label: &str, allowed_labels: I) -> Result<Vec<Tree>, ParseError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Paraphraser::new(target_label, allowed_labels).paraphrase_str(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::writer::to_bracketed;
    use rustc_hash::FxHashSet;

    const GOTHIC_QUARTER: &str = "(S (NP (NP (DT The)(JJ charming)(NNP Gothic)(NNP Quarter))(, ,)(CC or)(NP (NNP Barri)(NNP Gòtic)))(, ,)(VP (VBZ has)(NP (NP(JJ narrow)(JJ medieval)(NNS streets))(VP (VBN filled)(PP (IN with)(NP (NP (JJ trendy)(NNS bars))(, ,)(NP (NNS clubs))(CC and)(NP (JJ Catalan)(NNS restaurants))))))))";

    const ALLOWED: [&str; 3] = ["NP", ",", "CC"];

    #[test]
    fn test_end_to_end() {
        let results = paraphrase(GOTHIC_QUARTER, "NP", ALLOWED).unwrap();
        let original = parse_tree(GOTHIC_QUARTER).unwrap();

        assert_eq!(results.len(), 11);
        assert!(!results.contains(&original));
        let unique: FxHashSet<&Tree> = results.iter().collect();
        assert_eq!(unique.len(), 11);
    }

    #[test]
    fn test_results_round_trip() {
        for tree in paraphrase(GOTHIC_QUARTER, "NP", ALLOWED).unwrap() {
            let reparsed = parse_tree(&to_bracketed(&tree)).unwrap();
            assert_eq!(reparsed, tree);
        }
    }

    #[test]
    fn test_results_keep_words() {
        let original = parse_tree(GOTHIC_QUARTER).unwrap();
        let mut original_words: Vec<_> = original.leaves().into_iter().cloned().collect();
        original_words.sort_by(|a, b| (&a.tag, &a.word).cmp(&(&b.tag, &b.word)));

        for tree in paraphrase(GOTHIC_QUARTER, "NP", ALLOWED).unwrap() {
            let mut words: Vec<_> = tree.leaves().into_iter().cloned().collect();
            words.sort_by(|a, b| (&a.tag, &a.word).cmp(&(&b.tag, &b.word)));
            assert_eq!(words, original_words);
        }
    }

    #[test]
    fn test_no_matches_is_empty() {
        let results = paraphrase(
            "(S (DP (D the) (NP dog)) (VP (V chased) (DP (D the) (NP cat))))",
            "NP",
            ALLOWED,
        )
        .unwrap();

        assert!(results.is_empty());
    }

    #[test]
    fn test_invalid_tree_is_parse_failure() {
        assert!(paraphrase("invalid tree", "NP", ALLOWED).is_err());
        assert!(paraphrase("", "NP", ALLOWED).is_err());
    }

    #[test]
    fn test_count() {
        let paraphraser = Paraphraser::new("NP", ALLOWED);
        let tree = parse_tree(GOTHIC_QUARTER).unwrap();

        assert_eq!(paraphraser.count(&tree), Some(11));
        assert_eq!(paraphraser.matcher().target_label(), "NP");
    }

    #[test]
    fn test_three_coordinations_of_three() {
        // Three independent positions of arity 3: 6 * 6 * 6 - 1
        let coordination = "(NP (NP (NN a)) (, ,) (NP (NN b)) (CC and) (NP (NN c)))";
        let text = format!("(S {coordination} (VP (VBZ likes) {coordination}) (PP (IN with) {coordination}))");
        let results = Paraphraser::new("NP", ALLOWED).paraphrase_str(&text).unwrap();

        assert_eq!(results.len(), 215);
    }

    #[test]
    fn test_equal_siblings_keep_count() {
        // Slots are reordered by index, so swapping two equal conjuncts
        // still counts as a paraphrase even though it rebuilds the original
        let text = "(NP (NP (NN a)) (CC and) (NP (NN a)))";
        let results = paraphrase(text, "NP", ALLOWED).unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0], parse_tree(text).unwrap());
    }

    #[test]
    fn test_min_distinct_labels_threshold() {
        let text = "(NP (NP (NN salt)) (NP (NN pepper)) (NP (NN sugar)))";

        assert!(Paraphraser::new("NP", ALLOWED).paraphrase_str(text).unwrap().is_empty());
        assert_eq!(
            Paraphraser::new("NP", ALLOWED)
                .with_min_distinct_labels(1)
                .paraphrase_str(text)
                .unwrap()
                .len(),
            5
        );
    }
}
