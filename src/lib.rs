//! This crate provides a queue of owned strings built on a doubly-linked list
//! with owned nodes, implemented as a cyclic list.
//!
//! The [`Queue`] inserts and removes elements at both ends in constant time, and
//! rearranges itself in place (reverse, k-group reverse, sort, merge, filters)
//! by relinking nodes only: no element is moved or copied once inserted.
//!
//! Here is a quick example showing how the queue works.
//!
//! ```
//! use cyclic_queue::Queue;
//!
//! let mut queue = Queue::new();
//! for value in ["dolphin", "bear", "gerbil", "bear"] {
//!     queue.insert_tail(value).unwrap();
//! }
//!
//! queue.sort(false);
//! assert_eq!(queue.to_string(), "[bear bear dolphin gerbil]");
//!
//! assert_eq!(queue.delete_dup(), 2); // every copy of "bear" goes
//! queue.reverse();
//! assert_eq!(queue.to_string(), "[gerbil dolphin]");
//!
//! let mut buf = [0u8; 4];
//! let element = queue.remove_head(Some(&mut buf[..])).unwrap();
//! assert_eq!(element.value(), "gerbil");
//! assert_eq!(&buf, b"ger\0"); // truncated copy
//! element.release();
//! ```
//!
//! # Memory Layout
//!
//! The memory layout of the underlying list is like the following graph:
//! ```text
//!          ┌─────────────────────────────────────────────────────────────────────┐
//!          ↓                                                        Ghost node   │
//!    ╔═══════════╗           ╔═══════════╗                        ┌───────────┐  │
//!    ║   next    ║ ────────→ ║   next    ║ ────────→ ┄┄ ────────→ │   next    │ ─┘
//!    ╟───────────╢           ╟───────────╢     Node 2, 3, ...     ├───────────┤
//! ┌─ ║   prev    ║ ←──────── ║   prev    ║ ←──────── ┄┄ ←──────── │   prev    │
//! │  ╟───────────╢           ╟───────────╢                        └───────────┘
//! │  ║ payload T ║           ║ payload T ║                            ↑   ↑
//! │  ╚═══════════╝           ╚═══════════╝                            │   │
//! │      Node 0                  Node 1                               │   │
//! └───────────────────────────────────────────────────────────────────┘   │
//! ╔═══════════╗                                                           │
//! ║   ghost   ║ ──────────────────────────────────────────────────────────┘
//! ╟───────────╢
//! ║   (len)   ║
//! ╚═══════════╝
//!     List
//! ```
//! Each node embeds its `next`/`prev` link in front of its payload, so a link
//! pointer is also a node pointer. The ghost node is a bare link with *NO*
//! payload, allocated on its own.
//!
//! The length field `len` can be disabled by disabling the `length` feature in
//! your `Cargo.toml`, in which case [`Queue::size`] counts the nodes:
//! ```text
//! [dependencies]
//! cyclic_queue = { default-features = false }
//! ```
//!
//! Initially, the ghost node of an empty list points to itself. As elements are
//! inserted, `ghost.next` points to the first element and `ghost.prev` to the
//! last one.
//!
//! In convention, in a list with length *n*, the nodes are indexed by 0, 1, ...,
//! *n* - 1, and the ghost node is always indexed by *n*.
//!
//! # Errors
//!
//! Only allocation can fail. [`Queue::try_new`], [`Queue::insert_head`] and
//! [`Queue::insert_tail`] return an [`Error`] and leave the queue unchanged.

#[doc(inline)]
pub use error::{Error, Result};
#[doc(inline)]
pub use queue::{Element, Queue};

mod error;
mod list;
pub mod queue;
