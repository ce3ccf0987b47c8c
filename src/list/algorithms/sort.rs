//! Merge sort and stable merge over raw cycles.
//!
//! Both work on the ghost links of cycles only. The temporary halves of the
//! sort live under ghost links on the stack, so sorting never allocates.

use crate::list::link::{self, Link};
use crate::list::Node;
use std::ptr::NonNull;

/// Top-down merge sort of the cycle of `ghost`, where `less(a, b)` tells
/// whether `a` must be placed strictly before `b`.
///
/// Every link of the cycle other than `ghost` must be the link of a live
/// `Node<T>`.
pub(crate) unsafe fn merge_sort<T, F>(ghost: NonNull<Link>, less: &mut F)
where
    F: FnMut(&T, &T) -> bool,
{
    if link::is_empty(ghost) || link::is_singular(ghost) {
        return;
    }
    let mut front = Link::dangling();
    let front_ghost = NonNull::from(&mut front);
    link::init(front_ghost);
    link::cut(front_ghost, ghost, front_boundary(ghost));

    merge_sort(front_ghost, less);
    merge_sort(ghost, less);
    merge(front_ghost, ghost, less);
    link::splice(front_ghost, ghost);
}

/// The last node of the front half of a cycle with at least two nodes. The
/// front half holds ⌈*n*/2⌉ nodes.
unsafe fn front_boundary(ghost: NonNull<Link>) -> NonNull<Link> {
    let mut slow = ghost.as_ref().next;
    let mut fast = slow.as_ref().next;
    while fast != ghost && fast.as_ref().next != ghost {
        slow = slow.as_ref().next;
        fast = fast.as_ref().next.as_ref().next;
    }
    slow
}

/// Stable merge of the sorted cycle of `src` into the sorted cycle of `dest`,
/// leaving `src` empty. Returns the number of nodes moved.
///
/// Every run of `src` nodes that must go before the current `dest` node is
/// moved in one step, and what is left of `src` is spliced at the end.
pub(crate) unsafe fn merge<T, F>(dest: NonNull<Link>, src: NonNull<Link>, less: &mut F) -> usize
where
    F: FnMut(&T, &T) -> bool,
{
    let mut moved = 0;
    let mut d = dest.as_ref().next;
    let mut s = src.as_ref().next;
    while d != dest && s != src {
        if !less(Node::element(s), Node::element(d)) {
            d = d.as_ref().next;
            continue;
        }
        let front = s;
        let mut back = s;
        moved += 1;
        loop {
            let next = back.as_ref().next;
            if next == src || !less(Node::element(next), Node::element(d)) {
                break;
            }
            back = next;
            moved += 1;
        }
        s = back.as_ref().next;
        link::move_range_before(front, back, d);
    }
    while s != src {
        moved += 1;
        s = s.as_ref().next;
    }
    link::splice(src, dest.as_ref().prev);
    moved
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::list::List;

    #[test]
    fn sort_front_boundary() {
        for len in 2..9 {
            let list = List::from_iter(0..len);
            let boundary = unsafe { Node::<usize>::element(front_boundary(list.ghost_node())) };
            assert_eq!(*boundary, (len + 1) / 2 - 1);
        }
    }

    #[test]
    fn sort_merge_runs() {
        let mut dest = List::from_iter([3, 7, 8]);
        let mut src = List::from_iter([0, 1, 4, 5, 6, 9, 10]);
        let moved = unsafe {
            merge(dest.ghost_node(), src.ghost_node(), &mut |a: &i32, b: &i32| a < b)
        };
        assert_eq!(moved, 7);
        assert!(dest.iter().eq(&[0, 1, 3, 4, 5, 6, 7, 8, 9, 10]));
        assert!(src.iter().next().is_none());
        // Hand the moved nodes back to `dest` before both lists are dropped.
        #[cfg(feature = "length")]
        {
            dest.len += moved;
            src.len = 0;
        }
        assert_eq!(dest.iter().count(), dest.len());
    }
}
