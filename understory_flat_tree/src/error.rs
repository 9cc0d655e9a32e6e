// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

/// Error returned by index-addressed [`FlatTree`](crate::FlatTree) operations.
///
/// Searching by predicate never produces this error; a failed search is `None`
/// from [`FlatTree::find_index`](crate::FlatTree::find_index).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum FlatTreeError {
    /// The index does not address an existing node.
    IndexOutOfRange {
        /// The requested index.
        index: usize,
        /// The number of nodes in the tree at the time of the request.
        len: usize,
    },
}

impl fmt::Display for FlatTreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IndexOutOfRange { index, len } => write!(
                f,
                "node index {index} is out of range for a tree of {len} nodes"
            ),
        }
    }
}

impl core::error::Error for FlatTreeError {}
