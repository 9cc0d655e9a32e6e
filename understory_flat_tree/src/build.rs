// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Depth-first flattening of a caller-described hierarchy.

use alloc::vec::Vec;
use smallvec::SmallVec;

use crate::node::FlatNode;
use crate::trace::FlatTreeTrace;

/// Open subtrees, or ancestors, kept inline before spilling to the heap.
pub(crate) const INLINE_DEPTH: usize = 16;

/// An open subtree: its root position plus the children not yet visited.
struct Frame<I> {
    index: usize,
    pending: I,
}

/// Flattens `roots` and everything `children` reports beneath them into
/// pre-order.
///
/// `children` runs exactly once per payload, before the payload is stored.
/// Each node is appended with an extent of only itself and back-patched when
/// its last child's subtree closes. The first accessor error stops the pass and
/// the partial sequence is dropped.
pub(crate) fn flatten<T, C, E, F, S>(
    roots: impl IntoIterator<Item = T>,
    mut children: F,
    trace: &mut S,
) -> Result<Vec<FlatNode<T>>, E>
where
    C: IntoIterator<Item = T>,
    F: FnMut(&T) -> Result<C, E>,
    S: FlatTreeTrace + ?Sized,
{
    let mut nodes: Vec<FlatNode<T>> = Vec::new();
    let mut stack: SmallVec<[Frame<C::IntoIter>; INLINE_DEPTH]> = SmallVec::new();

    for root in roots {
        let pending = children(&root)?.into_iter();
        stack.push(append(&mut nodes, root, 0, pending, trace));

        while let Some(frame) = stack.last_mut() {
            match frame.pending.next() {
                Some(child) => {
                    let level = nodes[frame.index].level() + 1;
                    let pending = children(&child)?.into_iter();
                    let frame = append(&mut nodes, child, level, pending, trace);
                    stack.push(frame);
                }
                None => {
                    let index = frame.index;
                    stack.pop();
                    let last = nodes.len() - 1;
                    nodes[index].set_last_child_index(last);
                    trace.subtree_closed(index, last);
                }
            }
        }
    }

    Ok(nodes)
}

fn append<T, I, S>(
    nodes: &mut Vec<FlatNode<T>>,
    payload: T,
    level: usize,
    pending: I,
    trace: &mut S,
) -> Frame<I>
where
    S: FlatTreeTrace + ?Sized,
{
    let index = nodes.len();
    nodes.push(FlatNode::new(payload, index, level));
    trace.node_appended(index, level);
    Frame { index, pending }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use core::convert::Infallible;

    fn levels_and_extents(nodes: &[FlatNode<u32>]) -> Vec<(u32, usize, usize)> {
        nodes
            .iter()
            .map(|n| (*n.payload(), n.level(), n.last_child_index()))
            .collect()
    }

    #[test]
    fn empty_roots_never_call_the_accessor() {
        let mut calls = 0;
        let nodes = flatten(
            Vec::<u32>::new(),
            |_| {
                calls += 1;
                Ok::<_, Infallible>(Vec::<u32>::new())
            },
            &mut (),
        )
        .unwrap();
        assert!(nodes.is_empty());
        assert_eq!(calls, 0);
    }

    #[test]
    fn siblings_with_and_without_children() {
        // 1(2(3), 4), 5(6)
        let nodes = flatten(
            [1_u32, 5],
            |n| {
                Ok::<_, Infallible>(match n {
                    1 => vec![2, 4],
                    2 => vec![3],
                    5 => vec![6],
                    _ => Vec::new(),
                })
            },
            &mut (),
        )
        .unwrap();

        assert_eq!(
            levels_and_extents(&nodes),
            vec![
                (1, 0, 3),
                (2, 1, 2),
                (3, 2, 2),
                (4, 1, 3),
                (5, 0, 5),
                (6, 1, 5)
            ]
        );
    }

    #[test]
    fn deep_chain_does_not_recurse() {
        const DEPTH: u32 = 50_000;
        let nodes = flatten(
            [0_u32],
            |&n| Ok::<_, Infallible>(if n + 1 < DEPTH { Some(n + 1) } else { None }),
            &mut (),
        )
        .unwrap();

        assert_eq!(nodes.len(), DEPTH as usize);
        assert!(
            nodes
                .iter()
                .all(|n| n.last_child_index() == DEPTH as usize - 1),
            "every node of a chain ends at the leaf"
        );
        assert_eq!(nodes.last().unwrap().level(), DEPTH as usize - 1);
    }

    #[test]
    fn accessor_error_stops_the_pass() {
        let mut seen = Vec::new();
        let result = flatten(
            [1_u32, 10],
            |&n| {
                seen.push(n);
                match n {
                    1 => Ok(vec![2, 3]),
                    3 => Err("no children for 3"),
                    _ => Ok(Vec::new()),
                }
            },
            &mut (),
        );

        assert_eq!(result.unwrap_err(), "no children for 3");
        assert_eq!(seen, vec![1, 2, 3], "nothing after the failure is visited");
    }
}
