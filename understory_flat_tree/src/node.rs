// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The per-node view handed out by [`FlatTree`](crate::FlatTree).

/// One entry of a [`FlatTree`](crate::FlatTree).
///
/// A node knows its own position, its depth, and the position of the last node
/// in its subtree. Every structural relation (parent, children, descendants)
/// can be recovered from those three numbers and the surrounding sequence.
///
/// The metadata is read-only: callers only ever see `&FlatNode<T>`, and the
/// tree is the only place that can change positions or extents.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FlatNode<T> {
    payload: T,
    index: usize,
    level: usize,
    last_child_index: usize,
}

impl<T> FlatNode<T> {
    /// New node whose subtree is, for now, only itself.
    pub(crate) const fn new(payload: T, index: usize, level: usize) -> Self {
        Self {
            payload,
            index,
            level,
            last_child_index: index,
        }
    }

    /// The caller-supplied payload.
    #[must_use]
    pub const fn payload(&self) -> &T {
        &self.payload
    }

    /// Consumes the node and returns its payload.
    #[must_use]
    pub fn into_payload(self) -> T {
        self.payload
    }

    /// Position of this node in the flat sequence.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Zero-based depth. Roots are at level 0.
    #[must_use]
    pub const fn level(&self) -> usize {
        self.level
    }

    /// Position of the last node of this node's subtree (inclusive).
    ///
    /// Equal to [`index`](Self::index) for leaves.
    #[must_use]
    pub const fn last_child_index(&self) -> usize {
        self.last_child_index
    }

    /// Returns `true` if this node has at least one descendant.
    #[must_use]
    pub const fn has_children(&self) -> bool {
        self.last_child_index > self.index
    }

    /// Number of nodes in this node's subtree, itself included.
    #[must_use]
    pub const fn subtree_len(&self) -> usize {
        self.last_child_index - self.index + 1
    }

    pub(crate) fn set_payload(&mut self, payload: T) -> T {
        core::mem::replace(&mut self.payload, payload)
    }

    pub(crate) fn set_last_child_index(&mut self, last_child_index: usize) {
        debug_assert!(
            last_child_index >= self.index,
            "a subtree cannot end before its root"
        );
        self.last_child_index = last_child_index;
    }

    /// Moves the node (and the end of its subtree) `by` positions to the left.
    pub(crate) fn shift_left(&mut self, by: usize) {
        self.index -= by;
        self.last_child_index -= by;
    }

    /// Re-anchors a copied node: positions become relative to `origin`, and the
    /// level is moved from `from_level` to `to_level`.
    pub(crate) fn rebased(&self, origin: usize, from_level: usize, to_level: usize) -> Self
    where
        T: Clone,
    {
        Self {
            payload: self.payload.clone(),
            index: self.index - origin,
            level: self.level - from_level + to_level,
            last_child_index: self.last_child_index - origin,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_node_is_a_leaf() {
        let node = FlatNode::new('a', 4, 2);
        assert_eq!(node.index(), 4);
        assert_eq!(node.level(), 2);
        assert_eq!(node.last_child_index(), 4);
        assert!(!node.has_children());
        assert_eq!(node.subtree_len(), 1);
    }

    #[test]
    fn has_children_follows_extent() {
        let mut node = FlatNode::new('a', 1, 0);
        node.set_last_child_index(3);
        assert!(node.has_children());
        assert_eq!(node.subtree_len(), 3);

        node.set_last_child_index(1);
        assert!(!node.has_children(), "extent back to itself means leaf");
    }

    #[test]
    fn shift_left_moves_both_ends() {
        let mut node = FlatNode::new('a', 5, 1);
        node.set_last_child_index(7);
        node.shift_left(3);
        assert_eq!(node.index(), 2);
        assert_eq!(node.last_child_index(), 4);
        assert_eq!(node.level(), 1, "level is not positional");
    }

    #[test]
    fn rebased_moves_level_down_and_up() {
        let mut node = FlatNode::new('a', 6, 3);
        node.set_last_child_index(8);

        let shallower = node.rebased(5, 2, 0);
        assert_eq!(shallower.index(), 1);
        assert_eq!(shallower.last_child_index(), 3);
        assert_eq!(shallower.level(), 1);

        let deeper = node.rebased(5, 2, 4);
        assert_eq!(deeper.level(), 5);
    }
}
