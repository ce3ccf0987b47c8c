use crate::list::link::Link;
use crate::list::{List, Node};
use std::iter::FusedIterator;
use std::marker::PhantomData;
use std::ptr::NonNull;

/// A double-ended iterator over the elements of a `List`, non-cyclic and
/// fused.
pub(crate) struct Iter<'a, T: 'a> {
    start: NonNull<Link>,
    end: NonNull<Link>,
    #[cfg(feature = "length")]
    len: usize,
    _marker: PhantomData<&'a List<T>>,
}

impl<'a, T: 'a> Iter<'a, T> {
    pub(crate) fn new(list: &'a List<T>) -> Self {
        Self {
            start: list.front_node(),
            end: list.ghost_node(),
            #[cfg(feature = "length")]
            len: list.len(),
            _marker: PhantomData,
        }
    }
}

impl<'a, T: 'a> Clone for Iter<'a, T> {
    fn clone(&self) -> Self {
        Self { ..*self }
    }
}

impl<'a, T: 'a> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.start == self.end {
            return None;
        }
        let current = self.start;
        // SAFETY: `start..end` is a non-empty range of the list, so `start` is
        // an element node.
        self.start = unsafe { current.as_ref().next };
        #[cfg(feature = "length")]
        {
            self.len -= 1;
        }
        Some(unsafe { Node::element(current) })
    }

    #[cfg(feature = "length")]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<'a, T: 'a> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.start == self.end {
            return None;
        }
        // SAFETY: `start..end` is a non-empty range of the list, so the node
        // before `end` is an element node.
        self.end = unsafe { self.end.as_ref().prev };
        #[cfg(feature = "length")]
        {
            self.len -= 1;
        }
        Some(unsafe { Node::element(self.end) })
    }
}

#[cfg(feature = "length")]
impl<'a, T: 'a> ExactSizeIterator for Iter<'a, T> {}

impl<'a, T: 'a> FusedIterator for Iter<'a, T> {}

impl<'a, T> IntoIterator for &'a List<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> FromIterator<T> for List<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = List::new();
        list.extend(iter);
        list
    }
}

impl<T> Extend<T> for List<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        iter.into_iter().for_each(|item| self.push_back(item));
    }
}

unsafe impl<T: Sync> Send for Iter<'_, T> {}

unsafe impl<T: Sync> Sync for Iter<'_, T> {}

#[cfg(test)]
mod tests {
    use crate::list::List;

    #[test]
    fn iter_both_ends() {
        let list = List::from_iter(1..=4);
        let mut iter = list.iter();
        #[cfg(feature = "length")]
        assert_eq!(iter.len(), 4);
        assert_eq!(iter.next(), Some(&1));
        assert_eq!(iter.next_back(), Some(&4));
        let rest = iter.clone();
        assert_eq!(iter.next(), Some(&2));
        assert_eq!(iter.next_back(), Some(&3));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next_back(), None);
        assert!(rest.eq(&[2, 3]));
        assert!(list.iter().rev().eq(&[4, 3, 2, 1]));
    }

    #[test]
    fn iter_collect_and_extend() {
        let mut list: List<i32> = Vec::new().into_iter().collect();
        assert_eq!(list.iter().next(), None);
        list.extend([1, 2]);
        list.extend(vec![3]);
        let mut sum = 0;
        for item in &list {
            sum += item;
        }
        assert_eq!(sum, 6);
        assert_eq!(list.len(), 3);
    }
}
