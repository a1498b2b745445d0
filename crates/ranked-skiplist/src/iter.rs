use std::{iter::FusedIterator, vec};
use std::fmt::{Debug, Formatter, Result as FmtResult};

use seekable_iterator::CursorIterator;

use crate::{
    engine::{ListState, NodeId, SpanSkiplist},
    interface::Comparator,
};


// ================================
//  Iter
// ================================

/// An iterator over the elements of a skiplist, in sorted order.
///
/// Moving forwards follows base-level links and takes `O(1)` time per step. Moving backwards,
/// or skipping ahead with [`Iterator::nth`], looks up elements by rank in `O(log n)` expected
/// time.
///
/// The skiplist cannot be mutated while it is borrowed by an `Iter`.
pub struct Iter<'a, K> {
    state:       &'a ListState<K>,
    /// The node at `front_index`, if `front_index < back_index`.
    front:       Option<NodeId>,
    front_index: usize,
    /// One past the index of the last element which has not been yielded from the back.
    back_index:  usize,
}

impl<'a, K> Iter<'a, K> {
    #[inline]
    #[must_use]
    pub(crate) fn new(state: &'a ListState<K>) -> Self {
        Self {
            state,
            front:       state.first(),
            front_index: 0,
            back_index:  state.len(),
        }
    }

    #[inline]
    const fn remaining(&self) -> usize {
        self.back_index.saturating_sub(self.front_index)
    }
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.front_index >= self.back_index {
            return None;
        }

        let node = self.state.node(self.front?);
        self.front = node.next();
        self.front_index += 1;

        Some(&node.key)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining(), Some(self.remaining()))
    }

    #[inline]
    fn count(self) -> usize {
        self.remaining()
    }

    fn nth(&mut self, n: usize) -> Option<Self::Item> {
        if n >= self.remaining() {
            self.front_index = self.back_index;
            self.front = None;
            return None;
        }

        if n > 0 {
            self.front_index += n;
            self.front = self.state.node_at(self.front_index);
        }

        self.next()
    }

    #[inline]
    fn last(mut self) -> Option<Self::Item> {
        self.next_back()
    }
}

impl<K> DoubleEndedIterator for Iter<'_, K> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front_index >= self.back_index {
            return None;
        }

        self.back_index -= 1;
        self.state
            .node_at(self.back_index)
            .map(|id| &self.state.node(id).key)
    }
}

impl<K> ExactSizeIterator for Iter<'_, K> {}

impl<K> FusedIterator for Iter<'_, K> {}

impl<K> Clone for Iter<'_, K> {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            state:       self.state,
            front:       self.front,
            front_index: self.front_index,
            back_index:  self.back_index,
        }
    }
}

impl<K> Debug for Iter<'_, K> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("Iter")
            .field("front_index", &self.front_index)
            .field("back_index", &self.back_index)
            .finish_non_exhaustive()
    }
}

// ================================
//  IntoIter
// ================================

/// An owning iterator over the elements of a skiplist, in sorted order.
#[derive(Debug, Clone)]
pub struct IntoIter<K>(vec::IntoIter<K>);

impl<K> IntoIter<K> {
    #[inline]
    #[must_use]
    pub(crate) fn new(sorted: Vec<K>) -> Self {
        Self(sorted.into_iter())
    }

    /// The elements which have not been yielded yet, in sorted order.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[K] {
        self.0.as_slice()
    }
}

impl<K> Iterator for IntoIter<K> {
    type Item = K;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.0.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<K> DoubleEndedIterator for IntoIter<K> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.0.next_back()
    }
}

impl<K> ExactSizeIterator for IntoIter<K> {}

impl<K> FusedIterator for IntoIter<K> {}

// ================================
//  Cursor
// ================================

/// A `Cursor` provides seekable, bidirectional access to the elements of a skiplist.
///
/// Conceptually, it is circular, and its initial position is before the first element and after
/// the last element. Continuing to call [`next`] at the end of the list wraps around to the start,
/// and likewise for [`prev`]. (If the list is empty, the cursor remains at that phantom position.)
///
/// Every position has a 0-based index, so the cursor can also jump straight to an index.
///
/// [`next`]: Iterator::next
/// [`prev`]: CursorIterator::prev
pub struct Cursor<'a, K, Cmp, P> {
    list:     &'a SpanSkiplist<K, Cmp, P>,
    /// The current index and node, if the cursor is valid.
    position: Option<(usize, NodeId)>,
}

impl<'a, K, Cmp, P> Cursor<'a, K, Cmp, P> {
    #[inline]
    #[must_use]
    pub(crate) const fn new(list: &'a SpanSkiplist<K, Cmp, P>) -> Self {
        Self {
            list,
            position: None,
        }
    }

    #[inline]
    fn at_index(&self, index: usize) -> Option<(usize, NodeId)> {
        self.list.state().node_at(index).map(|id| (index, id))
    }

    /// Reset the cursor to its initial position, before the first element and after the last.
    #[inline]
    pub const fn reset(&mut self) {
        self.position = None;
    }

    /// The 0-based index of the element the cursor is at, if the cursor is valid.
    #[inline]
    #[must_use]
    pub fn index(&self) -> Option<usize> {
        self.position.map(|(index, _)| index)
    }

    /// Move the cursor to the element at the 0-based `index`.
    ///
    /// If `index` is out of range, the cursor becomes [invalid].
    ///
    /// [invalid]: CursorIterator::valid
    pub fn seek_to_index(&mut self, index: usize) {
        self.position = self.at_index(index);
    }

    /// Move the cursor to the smallest element of the list.
    ///
    /// If the list is empty, the cursor is [invalid].
    ///
    /// [invalid]: CursorIterator::valid
    #[inline]
    pub fn seek_to_first(&mut self) {
        self.position = self.list.state().first().map(|first| (0, first));
    }

    /// Move the cursor to the greatest element of the list.
    ///
    /// If the list is empty, the cursor is [invalid].
    ///
    /// [invalid]: CursorIterator::valid
    pub fn seek_to_last(&mut self) {
        self.position = self.list.len().checked_sub(1).and_then(|index| self.at_index(index));
    }
}

impl<K, Cmp: Comparator<K>, P> Cursor<'_, K, Cmp, P> {
    /// Move the cursor to the first element which is not less than `min_bound`.
    ///
    /// Among order-equal elements, that is the earliest inserted one. If there is no such
    /// element, the cursor becomes [invalid].
    ///
    /// [invalid]: CursorIterator::valid
    pub fn seek(&mut self, min_bound: &K) {
        let index = self.list.lower_bound(min_bound);
        self.position = self.at_index(index);
    }
}

impl<'a, K, Cmp, P> Iterator for Cursor<'a, K, Cmp, P> {
    type Item = &'a K;

    /// Move the cursor one position forwards, and return the element at that position.
    ///
    /// Returns `None` if the cursor was at the last element. `O(1)`.
    fn next(&mut self) -> Option<Self::Item> {
        let state = self.list.state();

        self.position = match self.position {
            Some((index, id)) => state.node(id).next().map(|next| (index + 1, next)),
            None              => state.first().map(|first| (0, first)),
        };

        self.current()
    }
}

impl<'a, K, Cmp, P> CursorIterator for Cursor<'a, K, Cmp, P> {
    #[inline]
    fn valid(&self) -> bool {
        self.position.is_some()
    }

    #[inline]
    fn current(&self) -> Option<&'a K> {
        self.position.map(|(_, id)| &self.list.state().node(id).key)
    }

    /// Move the cursor one position back, and return the element at that position.
    ///
    /// Returns `None` if the cursor was at the first element. `O(log n)` in expectation.
    fn prev(&mut self) -> Option<&'a K> {
        let prev_index = match self.position {
            Some((index, _)) => index.checked_sub(1),
            None             => self.list.len().checked_sub(1),
        };

        self.position = prev_index.and_then(|index| self.at_index(index));
        self.current()
    }
}

impl<K, Cmp, P> Clone for Cursor<'_, K, Cmp, P> {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            list:     self.list,
            position: self.position,
        }
    }
}

impl<K, Cmp, P> Debug for Cursor<'_, K, Cmp, P> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("Cursor")
            .field("index", &self.index())
            .finish_non_exhaustive()
    }
}
