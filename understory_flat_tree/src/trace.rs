// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Explainability hooks for building and deleting.
//!
//! The tree does not log. Embedders that want to see how a flat sequence was
//! produced, or which extents a deletion touched, pass a [`FlatTreeTrace`] sink
//! to [`FlatTree::with_trace`](crate::FlatTree::with_trace) or
//! [`FlatTree::delete_with_trace`](crate::FlatTree::delete_with_trace).
//! [`TraceRecorder`] stores every event for later inspection.

use alloc::vec::Vec;

/// A callback sink for structural events.
///
/// All methods default to doing nothing, so a sink only implements what it
/// cares about. `()` is the no-op sink.
pub trait FlatTreeTrace {
    /// A node was appended at `index` during a build.
    fn node_appended(&mut self, index: usize, level: usize) {
        let _ = (index, level);
    }

    /// The subtree rooted at `index` is complete and ends at `last_child_index`.
    fn subtree_closed(&mut self, index: usize, last_child_index: usize) {
        let _ = (index, last_child_index);
    }

    /// The inclusive range `start..=end` was removed from the sequence.
    fn range_removed(&mut self, start: usize, end: usize) {
        let _ = (start, end);
    }

    /// The ancestor at `index` lost descendants; its extent moved from
    /// `old_last` to `new_last`.
    fn extent_shrunk(&mut self, index: usize, old_last: usize, new_last: usize) {
        let _ = (index, old_last, new_last);
    }
}

impl FlatTreeTrace for () {}

impl<S: FlatTreeTrace + ?Sized> FlatTreeTrace for &mut S {
    fn node_appended(&mut self, index: usize, level: usize) {
        (**self).node_appended(index, level);
    }

    fn subtree_closed(&mut self, index: usize, last_child_index: usize) {
        (**self).subtree_closed(index, last_child_index);
    }

    fn range_removed(&mut self, start: usize, end: usize) {
        (**self).range_removed(start, end);
    }

    fn extent_shrunk(&mut self, index: usize, old_last: usize, new_last: usize) {
        (**self).extent_shrunk(index, old_last, new_last);
    }
}

/// One event observed by a [`TraceRecorder`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TraceEvent {
    /// See [`FlatTreeTrace::node_appended`].
    NodeAppended {
        /// Position of the new node.
        index: usize,
        /// Its depth.
        level: usize,
    },
    /// See [`FlatTreeTrace::subtree_closed`].
    SubtreeClosed {
        /// Position of the subtree root.
        index: usize,
        /// Position of the subtree's last node.
        last_child_index: usize,
    },
    /// See [`FlatTreeTrace::range_removed`].
    RangeRemoved {
        /// First removed position.
        start: usize,
        /// Last removed position (inclusive).
        end: usize,
    },
    /// See [`FlatTreeTrace::extent_shrunk`].
    ExtentShrunk {
        /// Position of the ancestor.
        index: usize,
        /// Extent before the deletion.
        old_last: usize,
        /// Extent after the deletion.
        new_last: usize,
    },
}

/// Records every event it receives, in order.
#[derive(Clone, Debug, Default)]
pub struct TraceRecorder {
    events: Vec<TraceEvent>,
}

impl TraceRecorder {
    /// Creates an empty recorder.
    #[must_use]
    pub const fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Events recorded so far.
    #[must_use]
    pub fn events(&self) -> &[TraceEvent] {
        &self.events
    }

    /// Forgets all recorded events.
    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl FlatTreeTrace for TraceRecorder {
    fn node_appended(&mut self, index: usize, level: usize) {
        self.events.push(TraceEvent::NodeAppended { index, level });
    }

    fn subtree_closed(&mut self, index: usize, last_child_index: usize) {
        self.events.push(TraceEvent::SubtreeClosed {
            index,
            last_child_index,
        });
    }

    fn range_removed(&mut self, start: usize, end: usize) {
        self.events.push(TraceEvent::RangeRemoved { start, end });
    }

    fn extent_shrunk(&mut self, index: usize, old_last: usize, new_last: usize) {
        self.events.push(TraceEvent::ExtentShrunk {
            index,
            old_last,
            new_last,
        });
    }
}
