// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The flat tree: construction, queries, and mutation.

use alloc::vec::Vec;
use core::convert::Infallible;
use core::fmt;
use smallvec::SmallVec;

use crate::build::{INLINE_DEPTH, flatten};
use crate::error::FlatTreeError;
use crate::iter::{Ancestors, Children};
use crate::node::FlatNode;
use crate::trace::FlatTreeTrace;

/// A hierarchy stored as one pre-order sequence of [`FlatNode`]s.
///
/// Each node is immediately followed by its whole subtree, so the subtree of
/// the node at `i` is exactly the range `i..=last_child_index`. Parents,
/// children and siblings are never linked; they are recovered from
/// [`FlatNode::level`] and [`FlatNode::last_child_index`].
///
/// The structure is built once from root payloads and a children accessor.
/// Afterwards payloads can be replaced in place and whole subtrees can be
/// deleted; there is no insertion.
///
/// ## Example
///
/// ```rust
/// use understory_flat_tree::FlatTree;
///
/// // A has children B and C; B has child D.
/// let mut tree = FlatTree::new(["A"], |label: &&str| match *label {
///     "A" => vec!["B", "C"],
///     "B" => vec!["D"],
///     _ => vec![],
/// });
///
/// let outline: Vec<_> = tree
///     .iter()
///     .map(|n| (*n.payload(), n.level(), n.last_child_index()))
///     .collect();
/// assert_eq!(outline, [("A", 0, 3), ("B", 1, 2), ("D", 2, 2), ("C", 1, 3)]);
///
/// // Ancestors come nearest first.
/// let parents: Vec<_> = tree.ancestors(2).unwrap().map(|n| *n.payload()).collect();
/// assert_eq!(parents, ["B", "A"]);
///
/// // Deleting B takes D with it.
/// tree.delete(1).unwrap();
/// let outline: Vec<_> = tree
///     .iter()
///     .map(|n| (*n.payload(), n.level(), n.last_child_index()))
///     .collect();
/// assert_eq!(outline, [("A", 0, 1), ("C", 1, 1)]);
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct FlatTree<T> {
    nodes: Vec<FlatNode<T>>,
}

impl<T> fmt::Debug for FlatTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let roots = self.nodes.iter().filter(|n| n.level() == 0).count();
        let depth = self.nodes.iter().map(FlatNode::level).max();
        f.debug_struct("FlatTree")
            .field("len", &self.nodes.len())
            .field("roots", &roots)
            .field("max_level", &depth)
            .finish_non_exhaustive()
    }
}

impl<T> Default for FlatTree<T> {
    fn default() -> Self {
        Self { nodes: Vec::new() }
    }
}

impl<T> FlatTree<T> {
    /// Flattens `roots` and their descendants.
    ///
    /// `children` maps a payload to its direct children, in order. It is called
    /// exactly once for every payload in the hierarchy, including leaves, and
    /// never for an empty `roots`.
    pub fn new<C, F>(roots: impl IntoIterator<Item = T>, mut children: F) -> Self
    where
        C: IntoIterator<Item = T>,
        F: FnMut(&T) -> C,
    {
        match flatten(roots, |p| Ok::<_, Infallible>(children(p)), &mut ()) {
            Ok(nodes) => Self { nodes },
            Err(never) => match never {},
        }
    }

    /// Like [`new`](Self::new), but the accessor may fail.
    ///
    /// The first error aborts the build and is returned as is; no partially
    /// flattened tree is produced.
    pub fn try_new<C, E, F>(roots: impl IntoIterator<Item = T>, children: F) -> Result<Self, E>
    where
        C: IntoIterator<Item = T>,
        F: FnMut(&T) -> Result<C, E>,
    {
        let nodes = flatten(roots, children, &mut ())?;
        Ok(Self { nodes })
    }

    /// Like [`new`](Self::new), reporting every append and back-patch to `trace`.
    pub fn with_trace<C, F, S>(
        roots: impl IntoIterator<Item = T>,
        mut children: F,
        mut trace: S,
    ) -> Self
    where
        C: IntoIterator<Item = T>,
        F: FnMut(&T) -> C,
        S: FlatTreeTrace,
    {
        match flatten(roots, |p| Ok::<_, Infallible>(children(p)), &mut trace) {
            Ok(nodes) => Self { nodes },
            Err(never) => match never {},
        }
    }

    /// Number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the tree has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes in pre-order.
    #[must_use]
    pub fn nodes(&self) -> &[FlatNode<T>] {
        &self.nodes
    }

    /// Iterates all nodes in pre-order.
    pub fn iter(&self) -> core::slice::Iter<'_, FlatNode<T>> {
        self.nodes.iter()
    }

    /// Calls `visit` for every node in pre-order.
    pub fn for_each<F>(&self, visit: F)
    where
        F: FnMut(&FlatNode<T>),
    {
        self.nodes.iter().for_each(visit);
    }

    /// The node at `index`.
    pub fn get(&self, index: usize) -> Result<&FlatNode<T>, FlatTreeError> {
        self.nodes.get(index).ok_or(FlatTreeError::IndexOutOfRange {
            index,
            len: self.nodes.len(),
        })
    }

    /// Position of the first node matching `predicate`, or `None`.
    pub fn find_index<P>(&self, predicate: P) -> Option<usize>
    where
        P: FnMut(&FlatNode<T>) -> bool,
    {
        self.nodes.iter().position(predicate)
    }

    /// Iterates the direct children of the node at `parent`, left to right.
    ///
    /// Deeper descendants are skipped over by their extents rather than
    /// visited.
    pub fn children(&self, parent: usize) -> Result<Children<'_, T>, FlatTreeError> {
        let node = self.get(parent)?;
        Ok(Children::new(&self.nodes, parent + 1, node.last_child_index()))
    }

    /// Calls `visit` for each direct child of the node at `parent`.
    pub fn for_each_child<F>(&self, parent: usize, visit: F) -> Result<(), FlatTreeError>
    where
        F: FnMut(&FlatNode<T>),
    {
        self.children(parent)?.for_each(visit);
        Ok(())
    }

    /// Iterates the strict ancestors of the node at `index`, nearest first.
    ///
    /// This is a single backward scan from `index` that stops at the root, so
    /// its cost is bounded by the distance to the root rather than the tree.
    pub fn ancestors(&self, index: usize) -> Result<Ancestors<'_, T>, FlatTreeError> {
        let node = self.get(index)?;
        Ok(Ancestors::new(&self.nodes, index, node.level()))
    }

    /// Calls `visit` for each strict ancestor of the node at `index`, nearest
    /// first.
    pub fn for_each_parent<F>(&self, index: usize, visit: F) -> Result<(), FlatTreeError>
    where
        F: FnMut(&FlatNode<T>),
    {
        self.ancestors(index)?.for_each(visit);
        Ok(())
    }

    /// Position of the parent of the node at `index`; `None` for roots.
    pub fn parent_index(&self, index: usize) -> Result<Option<usize>, FlatTreeError> {
        Ok(self.ancestors(index)?.next().map(FlatNode::index))
    }

    /// The node at `index` followed by all of its descendants.
    pub fn sub_tree(&self, index: usize) -> Result<&[FlatNode<T>], FlatTreeError> {
        let last = self.get(index)?.last_child_index();
        Ok(&self.nodes[index..=last])
    }

    /// An owned copy of the subtree at `index`, re-based so it can stand on its
    /// own: positions start at 0 and the subtree root sits at `root_level`.
    pub fn sub_tree_rebased(
        &self,
        index: usize,
        root_level: usize,
    ) -> Result<Vec<FlatNode<T>>, FlatTreeError>
    where
        T: Clone,
    {
        let sub_tree = self.sub_tree(index)?;
        let from_level = sub_tree[0].level();
        Ok(sub_tree
            .iter()
            .map(|n| n.rebased(index, from_level, root_level))
            .collect())
    }

    /// Replaces the payload at `index` and returns the previous one.
    ///
    /// Levels and extents are untouched.
    pub fn replace_payload(&mut self, index: usize, payload: T) -> Result<T, FlatTreeError> {
        let len = self.nodes.len();
        let node = self
            .nodes
            .get_mut(index)
            .ok_or(FlatTreeError::IndexOutOfRange { index, len })?;
        Ok(node.set_payload(payload))
    }

    /// Removes the node at `index` together with its subtree.
    ///
    /// Returns the removed payloads in pre-order. Ancestors lose the removed
    /// count from their extents and every later node shifts left by it.
    /// Positions obtained before the call are stale afterwards.
    pub fn delete(&mut self, index: usize) -> Result<Vec<T>, FlatTreeError> {
        self.delete_with_trace(index, ())
    }

    /// Like [`delete`](Self::delete), reporting shrunk ancestors and the removed
    /// range to `trace`.
    pub fn delete_with_trace<S>(
        &mut self,
        index: usize,
        mut trace: S,
    ) -> Result<Vec<T>, FlatTreeError>
    where
        S: FlatTreeTrace,
    {
        let node = self.get(index)?;
        let last = node.last_child_index();
        let removed = node.subtree_len();

        let ancestors: SmallVec<[usize; INLINE_DEPTH]> =
            Ancestors::new(&self.nodes, index, node.level())
                .map(FlatNode::index)
                .collect();
        for ancestor in ancestors {
            let node = &mut self.nodes[ancestor];
            let old_last = node.last_child_index();
            let new_last = old_last - removed;
            node.set_last_child_index(new_last);
            trace.extent_shrunk(ancestor, old_last, new_last);
        }

        let payloads: Vec<T> = self
            .nodes
            .drain(index..=last)
            .map(FlatNode::into_payload)
            .collect();
        for node in &mut self.nodes[index..] {
            node.shift_left(removed);
        }
        trace.range_removed(index, last);

        debug_assert!(
            self.check_invariants(),
            "delete left the flat tree inconsistent"
        );
        Ok(payloads)
    }

    /// Checks the structural invariants of the whole sequence.
    ///
    /// - every node knows its own position;
    /// - roots are at level 0 and each node is at most one level deeper than
    ///   the node before it;
    /// - every extent lies within its node and the sequence, and the node
    ///   right after an extent is no deeper than the extent's root;
    /// - nested extents never outgrow their enclosing extent.
    ///
    /// Linear in the number of nodes, like `delete` itself; it backs a debug
    /// assertion after every deletion.
    #[must_use]
    pub fn check_invariants(&self) -> bool {
        let len = self.nodes.len();
        // Extents of the currently open ancestors, outermost first.
        let mut open: Vec<usize> = Vec::new();

        for (i, node) in self.nodes.iter().enumerate() {
            if node.index() != i {
                return false;
            }
            let last = node.last_child_index();
            if last < i || last >= len {
                return false;
            }
            while open.last().is_some_and(|&end| end < i) {
                open.pop();
            }
            if node.level() != open.len() {
                return false;
            }
            if open.last().is_some_and(|&end| last > end) {
                return false;
            }
            if let Some(next) = self.nodes.get(last + 1)
                && next.level() > node.level()
            {
                return false;
            }
            open.push(last);
        }
        true
    }
}

impl<'a, T> IntoIterator for &'a FlatTree<T> {
    type Item = &'a FlatNode<T>;
    type IntoIter = core::slice::Iter<'a, FlatNode<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}
