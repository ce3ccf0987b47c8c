//! A queue of owned strings on top of the crate's cyclic list.
//!
//! Every [`Element`] owns a copy of the value it was inserted with. Insertions
//! are fallible: the value is copied first, then its node is allocated, and
//! the queue is only touched once both succeeded.
//!
//! Operations that order elements (sort, merge and the monotonic filters) all
//! compare values with [`ranks_before`].

use std::fmt;

use crate::error::{Error, Result};
use crate::list::List;

/// An element detached from a [`Queue`], owning its value.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Element {
    value: String,
}

impl Element {
    /// Create an element holding a copy of `value`.
    pub fn new(value: &str) -> Self {
        Self {
            value: value.to_owned(),
        }
    }

    /// Like [`Element::new`], but reports allocation failure of the copy
    /// instead of aborting.
    pub fn try_new(value: &str) -> Result<Self> {
        let mut owned = String::new();
        owned
            .try_reserve_exact(value.len())
            .map_err(|_| Error::ValueAlloc { len: value.len() })?;
        owned.push_str(value);
        Ok(Self { value: owned })
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn into_value(self) -> String {
        self.value
    }

    /// Release the element and its value.
    pub fn release(self) {}

    /// Copy the value into `buf` as a NUL-terminated byte string and return
    /// the number of value bytes copied.
    ///
    /// At most `buf.len() - 1` bytes of the value are copied; a longer value
    /// is silently truncated. The rest of `buf` is filled with zeros. An empty
    /// `buf` is left untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Element;
    ///
    /// let element = Element::new("bear");
    /// let mut buf = [0xff; 4];
    /// assert_eq!(element.copy_into(&mut buf), 3);
    /// assert_eq!(&buf, b"bea\0");
    /// ```
    pub fn copy_into(&self, buf: &mut [u8]) -> usize {
        let Some(capacity) = buf.len().checked_sub(1) else {
            return 0;
        };
        let bytes = self.value.as_bytes();
        let n = bytes.len().min(capacity);
        buf[..n].copy_from_slice(&bytes[..n]);
        buf[n..].fill(0);
        n
    }
}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.value, f)
    }
}

/// Whether the value `a` must be placed strictly before `b`: `a < b` in
/// lexicographic byte order, or `a > b` if `descend` is set.
///
/// Equal values never rank before each other, which keeps sort and merge
/// stable.
///
/// # Examples
///
/// ```
/// use cyclic_queue::queue::ranks_before;
///
/// assert!(ranks_before("apple", "banana", false));
/// assert!(ranks_before("banana", "apple", true));
/// assert!(ranks_before("10", "9", false));
/// assert!(!ranks_before("same", "same", false));
/// assert!(!ranks_before("same", "same", true));
/// ```
#[inline]
pub fn ranks_before(a: &str, b: &str, descend: bool) -> bool {
    if descend {
        a > b
    } else {
        a < b
    }
}

/// A double-ended queue of owned strings.
///
/// # Examples
///
/// ```
/// use cyclic_queue::Queue;
///
/// let mut queue = Queue::new();
/// queue.insert_tail("b").unwrap();
/// queue.insert_head("a").unwrap();
/// queue.insert_tail("c").unwrap();
/// assert_eq!(queue.size(), 3);
///
/// let mut buf = [0u8; 8];
/// let head = queue.remove_head(Some(&mut buf[..])).unwrap();
/// assert_eq!(head.value(), "a");
/// assert_eq!(&buf[..2], b"a\0");
/// head.release();
///
/// assert!(queue.iter().eq(["b", "c"]));
/// ```
#[derive(Default, Clone, PartialEq, Eq)]
pub struct Queue {
    list: List<Element>,
}

impl Queue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self { list: List::new() }
    }

    /// Create an empty queue, or return an error if its ghost node cannot be
    /// allocated.
    pub fn try_new() -> Result<Self> {
        let list = List::try_new().map_err(|e| {
            log::warn!("Failed to create a queue: {}", e);
            e
        })?;
        Ok(Self { list })
    }

    /// Release every element, then the queue itself.
    pub fn free(self) {
        log::trace!("Releasing a queue of {} elements", self.size());
        drop(self);
    }

    /// Insert a copy of `value` at the head of the queue.
    ///
    /// On error the queue is unchanged.
    pub fn insert_head(&mut self, value: &str) -> Result<()> {
        let element = Self::copy_value(value)?;
        self.list.try_push_front(element).map_err(|e| {
            log::warn!("Failed to insert at head: {}", e);
            e
        })
    }

    /// Insert a copy of `value` at the tail of the queue.
    ///
    /// On error the queue is unchanged.
    pub fn insert_tail(&mut self, value: &str) -> Result<()> {
        let element = Self::copy_value(value)?;
        self.list.try_push_back(element).map_err(|e| {
            log::warn!("Failed to insert at tail: {}", e);
            e
        })
    }

    fn copy_value(value: &str) -> Result<Element> {
        Element::try_new(value).map_err(|e| {
            log::warn!("Failed to copy an inserted value: {}", e);
            e
        })
    }

    /// Detach the head element and return it, or `None` if the queue is empty.
    ///
    /// If `buf` is given, the value is also copied into it with
    /// [`Element::copy_into`].
    pub fn remove_head(&mut self, buf: Option<&mut [u8]>) -> Option<Element> {
        let element = self.list.pop_front()?;
        if let Some(buf) = buf {
            element.copy_into(buf);
        }
        Some(element)
    }

    /// Detach the tail element and return it, or `None` if the queue is empty.
    ///
    /// If `buf` is given, the value is also copied into it with
    /// [`Element::copy_into`].
    pub fn remove_tail(&mut self, buf: Option<&mut [u8]>) -> Option<Element> {
        let element = self.list.pop_back()?;
        if let Some(buf) = buf {
            element.copy_into(buf);
        }
        Some(element)
    }

    /// Number of elements in the queue.
    pub fn size(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Iterate over the values from head to tail.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &str> + '_ {
        self.list.iter().map(Element::value)
    }

    /// Delete the middle element, found by a fast/slow walk from the head.
    ///
    /// For *n* elements, the element at index ⌊*n*/2⌋ is deleted. A queue
    /// with a single element has no middle to delete and is left as is.
    /// Returns `false` only if the queue is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Queue;
    ///
    /// let mut queue = Queue::from_iter(["1", "2", "3", "4"]);
    /// assert!(queue.delete_mid());
    /// assert!(queue.iter().eq(["1", "2", "4"]));
    /// ```
    pub fn delete_mid(&mut self) -> bool {
        if self.list.is_empty() {
            return false;
        }
        self.list.remove_middle();
        true
    }

    /// Delete every element whose value is duplicated, keeping only the
    /// values that are unique in their run. The queue is expected to be
    /// sorted. Returns the number of deleted elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Queue;
    ///
    /// let mut queue = Queue::from_iter(["a", "a", "b", "c", "c"]);
    /// assert_eq!(queue.delete_dup(), 4);
    /// assert!(queue.iter().eq(["b"]));
    /// ```
    pub fn delete_dup(&mut self) -> usize {
        let removed = self.list.dedup_all();
        log::trace!("Deleted {} duplicated elements", removed);
        removed
    }

    /// Swap every two adjacent elements.
    pub fn swap(&mut self) {
        self.list.swap_pairs();
    }

    /// Reverse the queue in place.
    pub fn reverse(&mut self) {
        self.list.reverse();
    }

    /// Reverse each consecutive block of `k` elements. A trailing block
    /// shorter than `k` is left untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Queue;
    ///
    /// let mut queue = Queue::from_iter(["1", "2", "3", "4", "5"]);
    /// queue.reverse_k(3);
    /// assert!(queue.iter().eq(["3", "2", "1", "4", "5"]));
    /// ```
    pub fn reverse_k(&mut self, k: usize) {
        self.list.reverse_k(k);
    }

    /// Delete every element that has a strictly smaller value anywhere after
    /// it. Returns the number of elements left.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Queue;
    ///
    /// let mut queue = Queue::from_iter(["5", "2", "8", "1"]);
    /// assert_eq!(queue.ascend(), 1);
    /// assert!(queue.iter().eq(["1"]));
    /// ```
    pub fn ascend(&mut self) -> usize {
        self.retain_monotonic(false)
    }

    /// Delete every element that has a strictly greater value anywhere after
    /// it. Returns the number of elements left.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Queue;
    ///
    /// let mut queue = Queue::from_iter(["5", "2", "8", "1"]);
    /// assert_eq!(queue.descend(), 2);
    /// assert!(queue.iter().eq(["8", "1"]));
    /// ```
    pub fn descend(&mut self) -> usize {
        self.retain_monotonic(true)
    }

    fn retain_monotonic(&mut self, descend: bool) -> usize {
        let before = self.size();
        let after = self
            .list
            .retain_monotonic_by(|kept, x| ranks_before(kept.value(), x.value(), descend));
        log::trace!(
            "Monotonic filter (descend: {}) kept {} of {} elements",
            descend,
            after,
            before
        );
        after
    }

    /// Sort the queue in ascending order, or descending order if `descend` is
    /// set. The sort is stable.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Queue;
    ///
    /// let mut queue = Queue::from_iter(["pear", "apple", "fig"]);
    /// queue.sort(false);
    /// assert!(queue.iter().eq(["apple", "fig", "pear"]));
    /// queue.sort(true);
    /// assert!(queue.iter().eq(["pear", "fig", "apple"]));
    /// ```
    pub fn sort(&mut self, descend: bool) {
        log::trace!("Sorting {} elements (descend: {})", self.size(), descend);
        self.list
            .sort_by_less(|a, b| ranks_before(a.value(), b.value(), descend));
    }

    /// Merge the sorted `other` into this sorted queue, leaving `other`
    /// empty. Both queues must be sorted in the direction given by `descend`.
    /// Returns the size of the merged queue.
    ///
    /// Elements of `self` stay before the equal elements of `other`.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Queue;
    ///
    /// let mut queue = Queue::from_iter(["1", "3", "5"]);
    /// let mut other = Queue::from_iter(["2", "4", "6"]);
    /// assert_eq!(queue.merge_two(&mut other, false), 6);
    /// assert!(queue.iter().eq(["1", "2", "3", "4", "5", "6"]));
    /// assert!(other.is_empty());
    /// ```
    pub fn merge_two(&mut self, other: &mut Queue, descend: bool) -> usize {
        self.list.merge_by_less(&mut other.list, |a, b| {
            ranks_before(a.value(), b.value(), descend)
        });
        self.size()
    }

    /// Merge all the sorted `queues` into a new queue, leaving every queue of
    /// `queues` empty. Returns the merged queue and its size; an empty slice
    /// gives an empty queue.
    ///
    /// Queues are merged pairwise, neighbors first, so that equal elements
    /// keep the order of their queues in `queues`, then their order in their
    /// queue.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Queue;
    ///
    /// let mut queues = [
    ///     Queue::from_iter(["b", "e"]),
    ///     Queue::from_iter(["a", "d"]),
    ///     Queue::from_iter(["c"]),
    /// ];
    /// let (merged, size) = Queue::merge_all(&mut queues, false);
    /// assert_eq!(size, 5);
    /// assert!(merged.iter().eq(["a", "b", "c", "d", "e"]));
    /// assert!(queues.iter().all(Queue::is_empty));
    /// ```
    pub fn merge_all(queues: &mut [Queue], descend: bool) -> (Queue, usize) {
        let count = queues.len();
        let mut step = 1;
        while step < count {
            for i in (0..count - step).step_by(2 * step) {
                let (left, right) = queues.split_at_mut(i + step);
                left[i].merge_two(&mut right[0], descend);
            }
            step *= 2;
        }
        let mut merged = Queue::new();
        if let Some(first) = queues.first_mut() {
            merged.list.append(&mut first.list);
        }
        let size = merged.size();
        log::debug!("Merged {} queues into {} elements", count, size);
        (merged, size)
    }
}

impl fmt::Debug for Queue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl fmt::Display for Queue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, value) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            f.write_str(value)?;
        }
        f.write_str("]")
    }
}

impl<'a> FromIterator<&'a str> for Queue {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        Self {
            list: iter.into_iter().map(Element::new).collect(),
        }
    }
}
