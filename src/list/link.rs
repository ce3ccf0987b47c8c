//! The link core of a cyclic list.
//!
//! A [`Link`] is a position in a circular doubly-linked cycle. It knows nothing
//! about payloads: element nodes embed a `Link` as their first field, and the
//! ghost node of a list is a bare `Link`.
//!
//! Every function here is `unsafe` because it dereferences raw links. The caller
//! must guarantee that every link passed in is alive and belongs to a well-formed
//! cycle, i.e. for every link `n`, `n.next.prev == n` and `n.prev.next == n`.
//! Each primitive keeps that invariant and touches *O*(1) links.

use std::alloc::{self, Layout};
use std::ptr::NonNull;

use crate::error::{Error, Result};

/// The forward/backward relations of a node in a cycle.
///
/// An isolated link points to itself in both directions.
#[repr(C)]
pub(crate) struct Link {
    pub(crate) next: NonNull<Link>,
    pub(crate) prev: NonNull<Link>,
}

impl Link {
    /// A link whose relations are not set yet. It must be passed to [`init`]
    /// or attached to a cycle before being read.
    pub(crate) fn dangling() -> Self {
        Self {
            next: NonNull::dangling(),
            prev: NonNull::dangling(),
        }
    }
}

/// Allocate a self-linked ghost node.
pub(crate) fn new_ghost() -> NonNull<Link> {
    let ghost = NonNull::from(Box::leak(Box::new(Link::dangling())));
    // SAFETY: `ghost` is freshly allocated and not shared yet.
    unsafe { init(ghost) };
    ghost
}

/// Like [`new_ghost`], but reports allocation failure instead of aborting.
pub(crate) fn try_new_ghost() -> Result<NonNull<Link>> {
    let layout = Layout::new::<Link>();
    // SAFETY: `Link` holds two pointers, so `layout` has a non-zero size.
    let ptr = unsafe { alloc::alloc(layout) }.cast::<Link>();
    let ghost = NonNull::new(ptr).ok_or(Error::NodeAlloc {
        size: layout.size(),
    })?;
    // SAFETY: `ghost` is a valid, uninitialized allocation for a `Link`.
    unsafe {
        ghost.as_ptr().write(Link::dangling());
        init(ghost);
    }
    Ok(ghost)
}

/// Free a ghost node allocated by [`new_ghost`] or [`try_new_ghost`].
///
/// The ghost must not be reachable from any other link afterwards.
pub(crate) unsafe fn free_ghost(ghost: NonNull<Link>) {
    drop(Box::from_raw(ghost.as_ptr()));
}

/// Make `node` self-linked.
#[inline]
pub(crate) unsafe fn init(mut node: NonNull<Link>) {
    node.as_mut().next = node;
    node.as_mut().prev = node;
}

/// Link `prev` and `next` to each other.
#[inline]
pub(crate) unsafe fn connect(mut prev: NonNull<Link>, mut next: NonNull<Link>) {
    prev.as_mut().next = next;
    next.as_mut().prev = prev;
}

/// Splice the isolated `new` into the cycle right after `node`.
#[inline]
pub(crate) unsafe fn insert_after(node: NonNull<Link>, new: NonNull<Link>) {
    let next = node.as_ref().next;
    connect(node, new);
    connect(new, next);
}

/// Splice the isolated `new` into the cycle right before `node`.
#[inline]
pub(crate) unsafe fn insert_before(node: NonNull<Link>, new: NonNull<Link>) {
    let prev = node.as_ref().prev;
    connect(prev, new);
    connect(new, node);
}

/// Remove `node` from its cycle and leave it self-linked.
///
/// The former neighbors of `node` are linked to each other. `node` is not freed.
#[inline]
pub(crate) unsafe fn detach(node: NonNull<Link>) {
    connect(node.as_ref().prev, node.as_ref().next);
    init(node);
}

/// Whether the cycle rooted at `ghost` holds no other link.
#[inline]
pub(crate) unsafe fn is_empty(ghost: NonNull<Link>) -> bool {
    ghost.as_ref().next == ghost
}

/// Whether the cycle rooted at `ghost` holds exactly one other link.
#[inline]
pub(crate) unsafe fn is_singular(ghost: NonNull<Link>) -> bool {
    !is_empty(ghost) && ghost.as_ref().next == ghost.as_ref().prev
}

/// Detach `node` and insert it right after `dest`.
///
/// `node` and `dest` must be different links.
#[inline]
pub(crate) unsafe fn move_after(node: NonNull<Link>, dest: NonNull<Link>) {
    debug_assert_ne!(node, dest, "cannot move a node next to itself");
    detach(node);
    insert_after(dest, node);
}

/// Move the range `front..=back` of one cycle right before `dest`.
///
/// `dest` must not be inside `front..=back`. Both ends may belong to the cycle
/// of `dest` or to another cycle.
#[inline]
pub(crate) unsafe fn move_range_before(
    front: NonNull<Link>,
    back: NonNull<Link>,
    dest: NonNull<Link>,
) {
    connect(front.as_ref().prev, back.as_ref().next);
    connect(dest.as_ref().prev, front);
    connect(back, dest);
}

/// Split the cycle of `source` at `boundary`.
///
/// The links strictly after `source` up to and including `boundary` move under
/// the empty ghost `target`; the remainder stays under `source`. Nothing moves
/// if `boundary` is `source` itself.
pub(crate) unsafe fn cut(target: NonNull<Link>, source: NonNull<Link>, boundary: NonNull<Link>) {
    debug_assert!(is_empty(target), "cannot cut into a non-empty cycle");
    if boundary == source {
        return;
    }
    let first = source.as_ref().next;
    let rest = boundary.as_ref().next;
    connect(target, first);
    connect(boundary, target);
    connect(source, rest);
}

/// Move every link of the cycle of `source` right after `after`, leaving
/// `source` empty. Nothing happens if `source` is already empty.
pub(crate) unsafe fn splice(source: NonNull<Link>, after: NonNull<Link>) {
    if is_empty(source) {
        return;
    }
    let first = source.as_ref().next;
    let last = source.as_ref().prev;
    let at = after.as_ref().next;
    connect(after, first);
    connect(last, at);
    init(source);
}

/// Check that `prev` and `next` are linked to each other.
#[cfg(any(debug_assertions, test))]
pub(crate) fn assert_adjacent(prev: NonNull<Link>, next: NonNull<Link>) {
    unsafe {
        assert_eq!(prev.as_ref().next, next);
        assert_eq!(next.as_ref().prev, prev);
    }
}
