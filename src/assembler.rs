//! Combining per-subtree reorderings into whole trees
//!
//! [`Paraphrases`] walks the cross product of every qualifying position's
//! arrangements like an odometer: positions are the digits in pre-order,
//! and the last position turns fastest. The starting state (every position
//! in its identity arrangement) reproduces the original tree and is
//! skipped, so each combination after it is yielded exactly once.
//!
//! Every yielded tree is a fresh deep copy of the original. Arrangements are
//! applied in reverse pre-order, so a nested qualifying subtree is
//! rearranged before any ancestor moves it to a different slot.

use crate::permuter::{apply_order, checked_factorial, next_permutation, target_slots};
use crate::tree::{Node, Position, Subtree, Tree, TreeError};

/// Lazy sequence of all reorderings of a tree except the original
#[derive(Debug, Clone)]
pub struct Paraphrases<'a> {
    original: &'a Tree,
    positions: Vec<Position>,
    slots: Vec<Vec<usize>>,
    orders: Vec<Vec<usize>>,
    remaining: Option<usize>,
    exhausted: bool,
}

impl<'a> Paraphrases<'a> {
    /// Prepare the combinations for `positions` of `original`
    ///
    /// Each position must address a node; the children labeled `target` at
    /// that node are the ones reordered.
    pub fn new(original: &'a Tree, positions: Vec<Position>, target: &str) -> Result<Self, TreeError> {
        for pos in &positions {
            match original.get(pos) {
                Some(Subtree::Node(_)) => {}
                Some(Subtree::Token(_)) => return Err(TreeError::NotANode(pos.clone())),
                None => return Err(TreeError::InvalidPosition(pos.clone())),
            }
        }
        Ok(Self::from_matched(original, positions, target))
    }

    /// Build from positions already known to address nodes of `original`
    pub(crate) fn from_matched(original: &'a Tree, positions: Vec<Position>, target: &str) -> Self {
        let slots: Vec<Vec<usize>> = positions
            .iter()
            .map(|pos| {
                original
                    .get_node(pos)
                    .map(|node| target_slots(node, target))
                    .unwrap_or_default()
            })
            .collect();
        let orders = slots.iter().map(|s| (0..s.len()).collect()).collect();

        let mut paraphrases = Self {
            original,
            positions,
            slots,
            orders,
            remaining: None,
            exhausted: false,
        };
        paraphrases.remaining = paraphrases.combination_count().map(|n| n - 1);
        paraphrases
    }

    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    /// Number of reorderable children at each position
    pub fn arities(&self) -> Vec<usize> {
        self.slots.iter().map(Vec::len).collect()
    }

    /// Total combinations including the original (`∏ aᵢ!`), `None` on overflow
    pub fn combination_count(&self) -> Option<usize> {
        self.slots
            .iter()
            .try_fold(1usize, |acc, s| acc.checked_mul(checked_factorial(s.len())?))
    }

    /// Turn the odometer by one; `false` once every combination has been seen
    fn advance(&mut self) -> bool {
        for order in self.orders.iter_mut().rev() {
            if next_permutation(order) {
                return true;
            }
            // Wrapped back to identity: carry into the next position out
        }
        false
    }

    /// Copy of the original with the current combination applied
    fn build(&self) -> Tree {
        let mut tree = self.original.clone();
        let digits = self.positions.iter().zip(&self.slots).zip(&self.orders);
        for ((pos, slots), order) in digits.rev() {
            if let Some(node) = tree.get_node_mut(pos) {
                apply_order(node, slots, order);
            }
        }
        tree
    }
}

impl Iterator for Paraphrases<'_> {
    type Item = Tree;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted || !self.advance() {
            self.exhausted = true;
            return None;
        }
        if let Some(remaining) = self.remaining.as_mut() {
            *remaining = remaining.saturating_sub(1);
        }
        Some(self.build())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.exhausted {
            return (0, Some(0));
        }
        match self.remaining {
            Some(remaining) => (remaining, Some(remaining)),
            // Too many to count; a large lower bound would make `collect` preallocate
            None => (0, None),
        }
    }
}

/// Substitute every combination of precomputed variants into copies of `original`
///
/// `variants[i]` lists the variants for `positions[i]`, identity first. The
/// first combination (all identities) is left out. Positions must not nest:
/// substitution at an ancestor would discard the change made below it.
pub fn assemble(
    original: &Tree,
    positions: &[Position],
    variants: &[Vec<Node>],
) -> Result<Vec<Tree>, TreeError> {
    let mut trees = Vec::new();
    if variants.is_empty() || variants.len() != positions.len() || variants.iter().any(Vec::is_empty) {
        return Ok(trees);
    }

    let mut choice = vec![0usize; variants.len()];
    loop {
        // Odometer step; stop after the last digit wraps
        let mut digit = variants.len();
        loop {
            if digit == 0 {
                return Ok(trees);
            }
            digit -= 1;
            choice[digit] += 1;
            if choice[digit] < variants[digit].len() {
                break;
            }
            choice[digit] = 0;
        }

        let mut tree = original.clone();
        for ((pos, list), &idx) in positions.iter().zip(variants).zip(&choice) {
            tree.replace(pos, list[idx].clone())?;
        }
        trees.push(tree);
    }
}
