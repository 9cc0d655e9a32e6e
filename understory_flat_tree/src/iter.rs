// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Structural iterators over a flat sequence.

use core::iter::FusedIterator;

use crate::node::FlatNode;

/// Direct children of one node, left to right.
///
/// Created by [`FlatTree::children`](crate::FlatTree::children). Each step
/// jumps over the previous child's whole subtree, so grandchildren are never
/// touched.
#[derive(Debug)]
pub struct Children<'a, T> {
    nodes: &'a [FlatNode<T>],
    next: usize,
    end: usize,
}

impl<'a, T> Children<'a, T> {
    /// Children found in `first..=end`, where `end` is the parent's extent.
    pub(crate) const fn new(nodes: &'a [FlatNode<T>], first: usize, end: usize) -> Self {
        Self {
            nodes,
            next: first,
            end,
        }
    }
}

impl<T> Clone for Children<'_, T> {
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes,
            next: self.next,
            end: self.end,
        }
    }
}

impl<'a, T> Iterator for Children<'a, T> {
    type Item = &'a FlatNode<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next > self.end {
            return None;
        }
        let child = self.nodes.get(self.next)?;
        self.next = child.last_child_index() + 1;
        Some(child)
    }
}

impl<T> FusedIterator for Children<'_, T> {}

/// Strict ancestors of one node, nearest first.
///
/// Created by [`FlatTree::ancestors`](crate::FlatTree::ancestors). Scans
/// backward once, looking for a node exactly one level above the last one
/// found; in pre-order the first such node is always the parent.
#[derive(Debug)]
pub struct Ancestors<'a, T> {
    nodes: &'a [FlatNode<T>],
    cursor: usize,
    /// Level the next ancestor must have; `None` once a root was yielded.
    ceiling: Option<usize>,
}

impl<'a, T> Ancestors<'a, T> {
    /// Ancestors of the node at `index`, which sits at `level`.
    pub(crate) fn new(nodes: &'a [FlatNode<T>], index: usize, level: usize) -> Self {
        Self {
            nodes,
            cursor: index,
            ceiling: level.checked_sub(1),
        }
    }
}

impl<T> Clone for Ancestors<'_, T> {
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes,
            cursor: self.cursor,
            ceiling: self.ceiling,
        }
    }
}

impl<'a, T> Iterator for Ancestors<'a, T> {
    type Item = &'a FlatNode<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let ceiling = self.ceiling?;
        while self.cursor > 0 {
            self.cursor -= 1;
            let node = &self.nodes[self.cursor];
            if node.level() == ceiling {
                self.ceiling = ceiling.checked_sub(1);
                return Some(node);
            }
        }
        self.ceiling = None;
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.ceiling.map_or(0, |c| c + 1);
        (remaining, Some(remaining))
    }
}

impl<T> ExactSizeIterator for Ancestors<'_, T> {}

impl<T> FusedIterator for Ancestors<'_, T> {}
