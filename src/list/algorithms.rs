use crate::list::link::{self, Link};
use crate::list::{List, Node};
use std::ptr::NonNull;

mod sort;

impl<T: PartialEq> PartialEq for List<T> {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other)
    }
}

impl<T: Eq> Eq for List<T> {}

impl<T: Clone> Clone for List<T> {
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }
}

impl<T> List<T> {
    /// Removes the middle element of the list and returns it.
    ///
    /// Both a slow and a fast node start at the first node; the slow one steps
    /// once and the fast one twice until the fast node or its successor is the
    /// ghost. For *n* elements this removes the element at index ⌊*n*/2⌋. A
    /// list with fewer than two elements has no removable middle, so `None` is
    /// returned and nothing changes.
    pub(crate) fn remove_middle(&mut self) -> Option<T> {
        if self.is_empty() || self.is_singular() {
            return None;
        }
        let ghost = self.ghost_node();
        // SAFETY: `fast` stops at the ghost at the latest, and `slow` stays
        // behind it, so `slow` is always an element node.
        unsafe {
            let mut slow = self.front_node();
            let mut fast = slow;
            while fast != ghost && fast.as_ref().next != ghost {
                slow = slow.as_ref().next;
                fast = fast.as_ref().next.as_ref().next;
            }
            Some(self.detach_node(slow).into_element())
        }
    }

    /// Removes every element that is equal to one of its neighbors according
    /// to `same`, in a single forward pass, and returns the number of removed
    /// elements.
    ///
    /// The list is expected to be sorted so that equal elements form runs.
    /// Each run of two or more elements is removed entirely.
    pub(crate) fn dedup_all_by<F>(&mut self, mut same: F) -> usize
    where
        F: FnMut(&T, &T) -> bool,
    {
        let ghost = self.ghost_node();
        let mut removed = 0;
        // SAFETY: `node` and `next` are always nodes of the list or the ghost
        // node, and elements are only read from non-ghost nodes.
        unsafe {
            let mut node = self.front_node();
            while node != ghost {
                let mut next = node.as_ref().next;
                if next == ghost || !same(Node::element(node), Node::element(next)) {
                    node = next;
                    continue;
                }
                // Consume the run that starts at `node`, then `node` itself.
                while next != ghost && same(Node::element(node), Node::element(next)) {
                    let after = next.as_ref().next;
                    drop(self.detach_node(next));
                    removed += 1;
                    next = after;
                }
                drop(self.detach_node(node));
                removed += 1;
                node = next;
            }
        }
        removed
    }

    pub(crate) fn dedup_all(&mut self) -> usize
    where
        T: PartialEq,
    {
        self.dedup_all_by(|a, b| a == b)
    }

    /// Reverses the list in place by moving every node, from the first to the
    /// last, right after the ghost node.
    pub(crate) fn reverse(&mut self) {
        let ghost = self.ghost_node();
        // SAFETY: `node` walks the nodes of the list in their former order,
        // its successor being read before it is moved.
        unsafe {
            let mut node = self.front_node();
            while node != ghost {
                let next = node.as_ref().next;
                link::move_after(node, ghost);
                node = next;
            }
        }
    }

    /// Reverses each consecutive block of `k` elements. A trailing block with
    /// fewer than `k` elements is left untouched, and nothing happens if
    /// `k < 2`.
    ///
    /// Within a block, each of its `k - 1` last nodes is moved right after the
    /// node that precedes the block.
    pub(crate) fn reverse_k(&mut self, k: usize) {
        if k < 2 || self.is_empty() || self.is_singular() {
            return;
        }
        let ghost = self.ghost_node();
        // SAFETY: a block is only rewired after checking that `k` nodes of the
        // list follow `anchor`.
        unsafe {
            let mut anchor = ghost;
            while has_nodes_after(anchor, ghost, k) {
                let first = anchor.as_ref().next;
                for _ in 1..k {
                    link::move_after(first.as_ref().next, anchor);
                }
                anchor = first;
            }
        }
    }

    pub(crate) fn swap_pairs(&mut self) {
        self.reverse_k(2);
    }

    /// Scans the list from the back to the front and removes every element
    /// for which `dominated(kept, element)` holds, where `kept` is the last
    /// element retained so far. Returns the length of the list afterwards.
    ///
    /// The back element is always kept.
    pub(crate) fn retain_monotonic_by<F>(&mut self, mut dominated: F) -> usize
    where
        F: FnMut(&T, &T) -> bool,
    {
        let ghost = self.ghost_node();
        // SAFETY: `kept` is always a non-ghost node of the list, and `node`
        // walks backward until the ghost node, its predecessor being read
        // before it is detached.
        unsafe {
            let mut kept = self.back_node();
            if kept != ghost {
                let mut node = kept.as_ref().prev;
                while node != ghost {
                    let prev = node.as_ref().prev;
                    if dominated(Node::element(kept), Node::element(node)) {
                        drop(self.detach_node(node));
                    } else {
                        kept = node;
                    }
                    node = prev;
                }
            }
        }
        self.len()
    }

    /// Stable merge sort, where `less(a, b)` tells whether `a` must be placed
    /// strictly before `b`. Nodes are relinked, never moved in memory, and
    /// nothing is allocated.
    pub(crate) fn sort_by_less<F>(&mut self, mut less: F)
    where
        F: FnMut(&T, &T) -> bool,
    {
        // SAFETY: every non-ghost node of the list is a `Node<T>`.
        unsafe { sort::merge_sort(self.ghost_node(), &mut less) }
    }

    /// Merges the sorted `other` into this sorted list, leaving `other`
    /// empty. Elements of `self` stay before the equal elements of `other`.
    pub(crate) fn merge_by_less<F>(&mut self, other: &mut Self, mut less: F)
    where
        F: FnMut(&T, &T) -> bool,
    {
        // SAFETY: both lists hold `Node<T>`s, and they are different lists
        // since both are borrowed at once.
        let moved = unsafe { sort::merge(self.ghost_node(), other.ghost_node(), &mut less) };
        #[cfg(feature = "length")]
        {
            self.len += moved;
            other.len -= moved;
        }
        #[cfg(not(feature = "length"))]
        let _ = moved;
    }
}

/// Whether at least `count` nodes follow `anchor` before the ghost node.
unsafe fn has_nodes_after(anchor: NonNull<Link>, ghost: NonNull<Link>, count: usize) -> bool {
    let mut node = anchor;
    for _ in 0..count {
        node = node.as_ref().next;
        if node == ghost {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use crate::list::List;

    fn to_vec<T: Clone>(list: &List<T>) -> Vec<T> {
        list.iter().cloned().collect()
    }

    #[test]
    fn list_remove_middle() {
        // (length, removed element)
        for (len, middle) in [(2, 1), (3, 1), (4, 2), (5, 2), (6, 3), (7, 3)] {
            let mut list = List::from_iter(0..len);
            assert_eq!(list.remove_middle(), Some(middle));
            assert_eq!(list.len(), len as usize - 1);
            assert!(!list.iter().any(|&x| x == middle));
        }
        let mut list = List::from_iter([1, 2, 3]);
        assert_eq!(list.remove_middle(), Some(2));
        assert_eq!(list.remove_middle(), Some(3));
        assert_eq!(list.remove_middle(), None);
        assert_eq!(to_vec(&list), vec![1]);
        assert_eq!(List::<i32>::new().remove_middle(), None);
    }

    #[test]
    fn list_dedup_all() {
        let cases: [(&[i32], &[i32]); 7] = [
            (&[], &[]),
            (&[1], &[1]),
            (&[1, 1], &[]),
            (&[1, 1, 2, 3, 3], &[2]),
            (&[1, 2, 3, 3, 4, 4, 5], &[1, 2, 5]),
            (&[1, 1, 1, 2, 3], &[2, 3]),
            (&[1, 2, 2, 2], &[1]),
        ];
        for (input, expected) in cases {
            let mut list = List::from_iter(input.iter().copied());
            let removed = list.dedup_all();
            assert_eq!(to_vec(&list), expected, "dedup of {:?}", input);
            assert_eq!(removed, input.len() - expected.len());
            assert_eq!(list.len(), expected.len());
        }
    }

    #[test]
    fn list_reverse() {
        let mut list = List::from_iter(0..5);
        list.reverse();
        assert_eq!(to_vec(&list), vec![4, 3, 2, 1, 0]);
        list.reverse();
        assert_eq!(to_vec(&list), vec![0, 1, 2, 3, 4]);
        assert!(list.iter().rev().eq(&[4, 3, 2, 1, 0]));

        let mut list = List::<i32>::new();
        list.reverse();
        assert!(list.is_empty());
        let mut list = List::from_iter([1]);
        list.reverse();
        assert_eq!(to_vec(&list), vec![1]);
    }

    #[test]
    fn list_reverse_k() {
        let mut list = List::from_iter(1..=5);
        list.swap_pairs();
        assert_eq!(to_vec(&list), vec![2, 1, 4, 3, 5]);

        let mut list = List::from_iter(1..=8);
        list.reverse_k(3);
        assert_eq!(to_vec(&list), vec![3, 2, 1, 6, 5, 4, 7, 8]);

        let mut list = List::from_iter(1..=4);
        list.reverse_k(4);
        assert_eq!(to_vec(&list), vec![4, 3, 2, 1]);

        let mut list = List::from_iter(1..=4);
        list.reverse_k(5);
        assert_eq!(to_vec(&list), vec![1, 2, 3, 4]);
        list.reverse_k(1);
        list.reverse_k(0);
        assert_eq!(to_vec(&list), vec![1, 2, 3, 4]);
        assert_eq!(list.len(), 4);
    }

    #[test]
    fn list_retain_monotonic() {
        let mut list = List::from_iter([1, 5, 2, 8, 3]);
        assert_eq!(list.retain_monotonic_by(|kept, x| kept < x), 3);
        assert_eq!(to_vec(&list), vec![1, 2, 3]);

        let mut list = List::from_iter([5, 2, 13, 3, 8]);
        assert_eq!(list.retain_monotonic_by(|kept, x| kept > x), 2);
        assert_eq!(to_vec(&list), vec![13, 8]);

        let mut list = List::from_iter([1, 1, 1]);
        assert_eq!(list.retain_monotonic_by(|kept, x| kept < x), 3);

        let mut list = List::<i32>::new();
        assert_eq!(list.retain_monotonic_by(|kept, x| kept < x), 0);
    }

    #[test]
    fn list_sort_stable() {
        let mut list = List::from_iter([(2, 'a'), (1, 'b'), (2, 'c'), (0, 'd'), (1, 'e'), (2, 'f')]);
        list.sort_by_less(|a, b| a.0 < b.0);
        assert_eq!(
            to_vec(&list),
            vec![(0, 'd'), (1, 'b'), (1, 'e'), (2, 'a'), (2, 'c'), (2, 'f')]
        );
        list.sort_by_less(|a, b| a.0 > b.0);
        assert_eq!(
            to_vec(&list),
            vec![(2, 'a'), (2, 'c'), (2, 'f'), (1, 'b'), (1, 'e'), (0, 'd')]
        );
    }

    #[test]
    fn list_sort_lengths() {
        for len in 0..40usize {
            // A deterministic shuffle of `0..len`, with repeats.
            let values: Vec<usize> = (0..len).map(|i| (i * 17 + 5) % len.max(1) / 2).collect();
            let mut list = List::from_iter(values.iter().copied());
            list.sort_by_less(|a, b| a < b);
            let mut expected = values;
            expected.sort();
            assert_eq!(to_vec(&list), expected);
            assert_eq!(list.len(), len);
            assert_eq!(list.iter().rev().count(), len);
        }
    }

    #[test]
    fn list_merge() {
        let mut list = List::from_iter([(1, 'a'), (3, 'a'), (3, 'b')]);
        let mut other = List::from_iter([(0, 'c'), (3, 'c'), (4, 'c')]);
        list.merge_by_less(&mut other, |a, b| a.0 < b.0);
        assert!(other.is_empty());
        assert_eq!(other.len(), 0);
        assert_eq!(
            to_vec(&list),
            vec![(0, 'c'), (1, 'a'), (3, 'a'), (3, 'b'), (3, 'c'), (4, 'c')]
        );
        assert_eq!(list.len(), 6);

        let mut empty = List::new();
        empty.merge_by_less(&mut List::from_iter([1, 2]), |a, b| a < b);
        assert_eq!(to_vec(&empty), vec![1, 2]);
        assert_eq!(empty.len(), 2);
        empty.merge_by_less(&mut List::new(), |a, b| a < b);
        assert_eq!(to_vec(&empty), vec![1, 2]);
        assert_eq!(empty.clone(), empty);
    }
}
