//! The owned cyclic list behind [`Queue`](crate::Queue).
//!
//! A `List<T>` owns a heap-allocated ghost [`Link`] and every element node
//! reachable from it. Element nodes are `Node<T>` values whose first field is
//! their link, so the ghost is the only payload-free node of the cycle.

use std::alloc::{self, Layout};
use std::fmt;
use std::marker::PhantomData;
use std::ptr::NonNull;

use crate::error::{Error, Result};
use crate::list::iterator::Iter;
use crate::list::link::Link;

mod algorithms;
pub(crate) mod iterator;
pub(crate) mod link;

/// A doubly-linked list with owned nodes, implemented as a cyclic list.
///
/// With the `length` feature (on by default) the list caches its length, so
/// `len` is *O*(1); otherwise `len` counts the nodes.
pub(crate) struct List<T> {
    ghost: NonNull<Link>,
    #[cfg(feature = "length")]
    pub(crate) len: usize,
    _marker: PhantomData<Box<Node<T>>>,
}

/// An element node: the payload with its link embedded in front, so that a
/// pointer to the link is also a pointer to the node.
#[repr(C)]
pub(crate) struct Node<T> {
    pub(crate) link: Link,
    pub(crate) element: T,
}

// node-level helpers
impl<T> List<T> {
    fn from_ghost(ghost: NonNull<Link>) -> Self {
        Self {
            ghost,
            #[cfg(feature = "length")]
            len: 0,
            _marker: PhantomData,
        }
    }

    pub(crate) fn ghost_node(&self) -> NonNull<Link> {
        self.ghost
    }

    pub(crate) fn front_node(&self) -> NonNull<Link> {
        // SAFETY: `ghost.next` is the ghost itself or the first element.
        unsafe { self.ghost.as_ref().next }
    }

    pub(crate) fn back_node(&self) -> NonNull<Link> {
        // SAFETY: `ghost.prev` is the ghost itself or the last element.
        unsafe { self.ghost.as_ref().prev }
    }

    /// Detach `node` from the list and take back its ownership.
    ///
    /// `node` must be a non-ghost node of this list.
    pub(crate) unsafe fn detach_node(&mut self, node: NonNull<Link>) -> Box<Node<T>> {
        debug_assert_ne!(node, self.ghost, "cannot detach the ghost node");
        #[cfg(feature = "length")]
        {
            self.len -= 1;
        }
        link::detach(node);
        Node::from_link(node)
    }

    /// Attach the detached `node` between the adjacent nodes `prev` and `next`
    /// of this list.
    pub(crate) unsafe fn attach_node(
        &mut self,
        prev: NonNull<Link>,
        next: NonNull<Link>,
        node: NonNull<Link>,
    ) {
        #[cfg(debug_assertions)]
        link::assert_adjacent(prev, next);
        link::insert_before(next, node);
        #[cfg(feature = "length")]
        {
            self.len += 1;
        }
        debug_assert_eq!(prev.as_ref().next, node);
    }
}

impl<T> List<T> {
    pub(crate) fn new() -> Self {
        Self::from_ghost(link::new_ghost())
    }

    /// Like [`List::new`], but reports a failed ghost allocation.
    pub(crate) fn try_new() -> Result<Self> {
        Ok(Self::from_ghost(link::try_new_ghost()?))
    }

    pub(crate) fn is_empty(&self) -> bool {
        // SAFETY: the ghost node is always part of a well-formed cycle.
        unsafe { link::is_empty(self.ghost) }
    }

    pub(crate) fn is_singular(&self) -> bool {
        // SAFETY: the ghost node is always part of a well-formed cycle.
        unsafe { link::is_singular(self.ghost) }
    }

    #[cfg(feature = "length")]
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    #[cfg(not(feature = "length"))]
    pub(crate) fn len(&self) -> usize {
        self.iter().count()
    }

    pub(crate) fn clear(&mut self) {
        while self.pop_front().is_some() {}
    }

    pub(crate) fn push_back(&mut self, elt: T) {
        let node = Node::new_detached(elt);
        // SAFETY: the back node and the ghost node are adjacent.
        unsafe { self.attach_node(self.back_node(), self.ghost, node) };
    }

    /// Insert `elt` first. On error the list is unchanged and `elt` is dropped.
    pub(crate) fn try_push_front(&mut self, elt: T) -> Result<()> {
        let node = Node::try_new_detached(elt)?;
        // SAFETY: the ghost node and the front node are adjacent.
        unsafe { self.attach_node(self.ghost, self.front_node(), node) };
        Ok(())
    }

    /// Insert `elt` last. On error the list is unchanged and `elt` is dropped.
    pub(crate) fn try_push_back(&mut self, elt: T) -> Result<()> {
        let node = Node::try_new_detached(elt)?;
        // SAFETY: the back node and the ghost node are adjacent.
        unsafe { self.attach_node(self.back_node(), self.ghost, node) };
        Ok(())
    }

    pub(crate) fn pop_front(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        // SAFETY: the front node of a non-empty list is an element node.
        Some(unsafe { self.detach_node(self.front_node()) }.into_element())
    }

    pub(crate) fn pop_back(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        // SAFETY: the back node of a non-empty list is an element node.
        Some(unsafe { self.detach_node(self.back_node()) }.into_element())
    }

    pub(crate) fn iter(&self) -> Iter<'_, T> {
        Iter::new(self)
    }

    /// Move every node of `other` to the back of this list in *O*(1),
    /// leaving `other` empty.
    pub(crate) fn append(&mut self, other: &mut Self) {
        // SAFETY: the back node belongs to this list, and `other` is a
        // different list since both are borrowed at once.
        unsafe { link::splice(other.ghost, self.back_node()) };
        #[cfg(feature = "length")]
        {
            self.len += std::mem::take(&mut other.len);
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for List<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> Default for List<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for List<T> {
    fn drop(&mut self) {
        self.clear();
        // SAFETY: the list is empty, so nothing refers to the ghost node any more.
        unsafe { link::free_ghost(self.ghost) };
    }
}

unsafe impl<T: Send> Send for List<T> {}

unsafe impl<T: Sync> Sync for List<T> {}

impl<T> Node<T> {
    /// Box `element` into a self-linked node.
    pub(crate) fn new_detached(element: T) -> NonNull<Link> {
        let node = Box::new(Node {
            link: Link::dangling(),
            element,
        });
        let link = NonNull::from(Box::leak(node)).cast::<Link>();
        // SAFETY: `link` points to the link of a node which is not shared yet.
        unsafe { link::init(link) };
        link
    }

    /// Like [`Node::new_detached`], but reports allocation failure instead of
    /// aborting.
    pub(crate) fn try_new_detached(element: T) -> Result<NonNull<Link>> {
        let layout = Layout::new::<Node<T>>();
        // SAFETY: a node always holds a link, so `layout` has a non-zero size.
        let ptr = unsafe { alloc::alloc(layout) }.cast::<Node<T>>();
        let node = NonNull::new(ptr).ok_or(Error::NodeAlloc {
            size: layout.size(),
        })?;
        // SAFETY: `node` is a valid, uninitialized allocation with the layout of
        // `Node<T>`, so it can be freed later as a `Box<Node<T>>`.
        unsafe {
            node.as_ptr().write(Node {
                link: Link::dangling(),
                element,
            });
            let link = node.cast::<Link>();
            link::init(link);
            Ok(link)
        }
    }

    /// Take back the ownership of a detached node.
    ///
    /// `link` must be the link of a node created by [`Node::new_detached`] or
    /// [`Node::try_new_detached`], which is no longer reachable from any list.
    pub(crate) unsafe fn from_link(link: NonNull<Link>) -> Box<Self> {
        Box::from_raw(link.cast::<Node<T>>().as_ptr())
    }

    /// `link` must be the link of a live non-ghost node.
    pub(crate) unsafe fn element<'a>(link: NonNull<Link>) -> &'a T {
        &(*link.cast::<Node<T>>().as_ptr()).element
    }

    pub(crate) fn into_element(self: Box<Self>) -> T {
        self.element
    }
}

#[cfg(test)]
mod tests {
    use crate::list::List;
    use std::cell::RefCell;

    #[test]
    fn list_create() {
        let mut list = List::<i32>::new();
        assert!(list.is_empty());
        assert!(!list.is_singular());
        list.push_back(1);
        assert!(list.is_singular());
        assert_eq!(list.pop_back(), Some(1));
        assert!(list.is_empty());

        let list = List::<i32>::try_new().unwrap();
        assert!(list.is_empty());
        assert_eq!(list.len(), 0);
    }

    #[test]
    fn list_drop() {
        struct DropChecker<'a> {
            value: i32,
            dropped: &'a RefCell<Vec<i32>>,
        }
        impl Drop for DropChecker<'_> {
            fn drop(&mut self) {
                self.dropped.borrow_mut().push(self.value);
            }
        }
        let dropped = RefCell::new(Vec::new());
        let checker = |value| DropChecker {
            value,
            dropped: &dropped,
        };
        let mut list = List::new();
        list.push_back(checker(1));
        list.try_push_back(checker(2)).unwrap();
        list.try_push_front(checker(0)).unwrap();
        list.push_back(checker(3));
        drop(list.pop_back());
        assert_eq!(dropped.borrow().as_slice(), &[3]);
        drop(list);
        assert_eq!(dropped.borrow().as_slice(), &[3, 0, 1, 2]);
    }

    #[test]
    fn list_push_and_pop() {
        let mut list = List::new();
        assert_eq!(list.pop_front(), None);
        assert_eq!(list.pop_back(), None);

        list.try_push_front(2).unwrap();
        list.try_push_front(1).unwrap();
        list.try_push_back(3).unwrap();
        list.push_back(4);
        assert!(list.iter().eq(&[1, 2, 3, 4]));
        assert_eq!(list.len(), 4);

        assert_eq!(list.pop_front(), Some(1));
        assert_eq!(list.pop_back(), Some(4));
        assert_eq!(list.pop_back(), Some(3));
        assert_eq!(list.pop_front(), Some(2));
        assert_eq!(list.pop_front(), None);
        assert!(list.is_empty());
        assert_eq!(list.len(), 0);
    }

    #[test]
    fn list_append() {
        let mut list = List::from_iter(0..3);
        let mut other = List::from_iter(3..5);
        list.append(&mut other);
        assert!(other.is_empty());
        assert_eq!(other.len(), 0);
        assert!(list.iter().copied().eq(0..5));
        assert_eq!(list.len(), 5);

        list.append(&mut List::new());
        assert_eq!(list.len(), 5);

        let mut empty = List::new();
        empty.append(&mut list);
        assert!(list.is_empty());
        assert!(empty.iter().copied().eq(0..5));
        assert_eq!(format!("{:?}", empty), "[0, 1, 2, 3, 4]");

        empty.clear();
        assert!(empty.is_empty());
        assert_eq!(empty.len(), 0);
    }
}
