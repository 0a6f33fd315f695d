//! Reordering the target-labeled children of one subtree
//!
//! Only children carrying the target label move; every other child keeps
//! its slot. With `k` movable children there are `k!` arrangements,
//! enumerated in lexicographic order of the index sequence, so the identity
//! arrangement always comes first.

use crate::tree::{Child, Node};

/// Lexicographic permutations of `0..k`, starting with the identity
///
/// `k = 0` yields a single empty permutation.
#[derive(Debug, Clone)]
pub struct Permutations {
    current: Option<Vec<usize>>,
}

impl Permutations {
    pub fn new(k: usize) -> Self {
        Self {
            current: Some((0..k).collect()),
        }
    }
}

impl Iterator for Permutations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.current.take()?;
        let mut successor = current.clone();
        if next_permutation(&mut successor) {
            self.current = Some(successor);
        }
        Some(current)
    }
}

/// Advance `order` to its lexicographic successor in place
///
/// Returns `false` (and resets `order` to ascending) after the last permutation.
pub fn next_permutation(order: &mut [usize]) -> bool {
    let n = order.len();
    if n < 2 {
        return false;
    }

    // Longest non-increasing suffix starts at `pivot + 1`
    let Some(pivot) = (0..n - 1).rev().find(|&i| order[i] < order[i + 1]) else {
        order.reverse();
        return false;
    };

    let Some(swap) = (pivot + 1..n).rev().find(|&j| order[j] > order[pivot]) else {
        return false;
    };
    order.swap(pivot, swap);
    order[pivot + 1..].reverse();
    true
}

/// `k!`, or `None` on overflow
pub fn checked_factorial(k: usize) -> Option<usize> {
    (2..=k).try_fold(1usize, |acc, i| acc.checked_mul(i))
}

/// Child slots of `node` whose label equals `target`
pub fn target_slots(node: &Node, target: &str) -> Vec<usize> {
    node.children
        .iter()
        .enumerate()
        .filter(|(_, child)| child.label() == target)
        .map(|(slot, _)| slot)
        .collect()
}

/// Number of movable (target-labeled) children
pub fn arity(node: &Node, target: &str) -> usize {
    node.children.iter().filter(|c| c.label() == target).count()
}

/// One reordering of a node's target-labeled children
///
/// Slot `slots[i]` receives the child originally at `slots[order[i]]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arrangement {
    slots: Vec<usize>,
    order: Vec<usize>,
}

impl Arrangement {
    pub fn new(slots: Vec<usize>, order: Vec<usize>) -> Self {
        debug_assert_eq!(slots.len(), order.len());
        Self { slots, order }
    }

    pub fn identity(slots: Vec<usize>) -> Self {
        let order = (0..slots.len()).collect();
        Self { slots, order }
    }

    pub fn slots(&self) -> &[usize] {
        &self.slots
    }

    pub fn order(&self) -> &[usize] {
        &self.order
    }

    pub fn is_identity(&self) -> bool {
        self.order.iter().enumerate().all(|(i, &o)| i == o)
    }

    /// Fresh copy of `node` with the arrangement applied
    pub fn apply(&self, node: &Node) -> Node {
        let mut copy = node.clone();
        self.apply_in_place(&mut copy);
        copy
    }

    /// Apply the arrangement to a node the caller owns
    pub fn apply_in_place(&self, node: &mut Node) {
        apply_order(node, &self.slots, &self.order);
    }
}

/// Fill `slots` of `node`, in order, with the children at `slots[order[i]]`
pub(crate) fn apply_order(node: &mut Node, slots: &[usize], order: &[usize]) {
    if order.iter().enumerate().all(|(i, &o)| i == o) {
        return;
    }

    let moved: Vec<Child> = order
        .iter()
        .filter_map(|&o| node.children.get(slots[o]).cloned())
        .collect();
    for (&slot, child) in slots.iter().zip(moved) {
        node.children[slot] = child;
    }
}

/// All `k!` arrangements of the target-labeled children of `node`
pub fn arrangements(node: &Node, target: &str) -> Vec<Arrangement> {
    let slots = target_slots(node, target);
    Permutations::new(slots.len())
        .map(|order| Arrangement::new(slots.clone(), order))
        .collect()
}

/// All `k!` variants of `node`, identity first
///
/// No filtering happens here: the identity variant is included and equal
/// siblings produce equal variants.
pub fn permute_subtree(node: &Node, target: &str) -> Vec<Node> {
    arrangements(node, target)
        .iter()
        .map(|arrangement| arrangement.apply(node))
        .collect()
}
