// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_flat_tree --heading-base-level=0

//! Understory Flat Tree: hierarchies stored as one flat, pre-order sequence.
//!
//! Outlines, file trees, and tree views often only need to *show* a hierarchy
//! and answer a few structural questions about it. This crate keeps such a
//! hierarchy as a single `Vec` of nodes instead of a graph of linked objects.
//! Every node records two numbers besides its payload:
//!
//! - its **level** (depth, roots are 0), and
//! - its **last child index**: the position of the last node of its subtree.
//!
//! Because the sequence is in pre-order, the subtree of the node at `i` is the
//! contiguous range `i..=last_child_index`. Parents, children, and siblings are
//! recovered from those numbers alone; there are no parent/child pointers and
//! no reference cycles.
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_flat_tree::FlatTree;
//!
//! // Any payload type works; the hierarchy is described by a children accessor.
//! let tree = FlatTree::new(["docs"], |dir: &&str| match *dir {
//!     "docs" => vec!["guide", "api"],
//!     "guide" => vec!["install"],
//!     _ => vec![],
//! });
//!
//! assert_eq!(tree.len(), 4);
//! let api = tree.find_index(|n| *n.payload() == "api").unwrap();
//! assert_eq!(tree.parent_index(api), Ok(Some(0)));
//!
//! let children: Vec<_> = tree.children(0).unwrap().map(|n| *n.payload()).collect();
//! assert_eq!(children, ["guide", "api"]);
//! ```
//!
//! ## Operations
//!
//! - Build: [`FlatTree::new`], [`FlatTree::try_new`] (fallible accessor), and
//!   [`FlatTree::with_trace`]. The accessor runs exactly once per payload and
//!   the build never recurses, so very deep hierarchies are fine.
//! - Whole sequence: [`FlatTree::nodes`], [`FlatTree::iter`],
//!   [`FlatTree::for_each`], [`FlatTree::get`], and [`FlatTree::find_index`].
//! - Structure: [`FlatTree::children`] / [`FlatTree::for_each_child`],
//!   [`FlatTree::ancestors`] / [`FlatTree::for_each_parent`],
//!   [`FlatTree::parent_index`], [`FlatTree::sub_tree`], and
//!   [`FlatTree::sub_tree_rebased`].
//! - Mutation: [`FlatTree::replace_payload`] and [`FlatTree::delete`]. There is
//!   no insertion; rebuild from source data instead.
//!
//! Index-addressed operations fail with [`FlatTreeError::IndexOutOfRange`].
//! A search that matches nothing is simply `None`.
//!
//! Callers only ever get `&FlatNode<T>`, so node metadata cannot be edited from
//! outside, and the borrow checker rules out mutating the tree from inside a
//! visitor.
//!
//! ## Tracing
//!
//! The crate does not log. Pass a [`FlatTreeTrace`] sink (for example a
//! [`TraceRecorder`]) to [`FlatTree::with_trace`] or
//! [`FlatTree::delete_with_trace`] to observe appends, back-patched extents,
//! removed ranges, and shrunk ancestors.
//!
//! ## Concurrency
//!
//! A [`FlatTree`] is a plain owned value. It is `Send`/`Sync` when `T` is, and
//! mutation requires `&mut`, so sharing between threads needs the usual
//! external lock.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod build;
mod error;
mod iter;
mod node;
mod trace;
mod tree;

pub use error::FlatTreeError;
pub use iter::{Ancestors, Children};
pub use node::FlatNode;
pub use trace::{FlatTreeTrace, TraceEvent, TraceRecorder};
pub use tree::FlatTree;
