use std::iter;

use tracing::Level as LogLevel;

use crate::{
    error::StructureError,
    interface::Comparator,
    node_heights::{LevelGenerator, Prng32},
};
use super::{node::NodeId, state::{ListState, SearchPath}};


/// Struct that implements most of the logic of the two skiplists provided by this crate.
///
/// Keys are ordered by `Cmp`, node heights are drawn from `levels`, and everything involving links
/// and spans is delegated to [`ListState`].
#[derive(Debug, Clone)]
pub(crate) struct SpanSkiplist<K, Cmp, P> {
    state:  ListState<K>,
    cmp:    Cmp,
    levels: LevelGenerator<P>,
}

// Methods which do not compare keys
impl<K, Cmp, P> SpanSkiplist<K, Cmp, P> {
    #[inline]
    #[must_use]
    pub(crate) fn new(cmp: Cmp, levels: LevelGenerator<P>) -> Self {
        Self {
            state: ListState::new(),
            cmp,
            levels,
        }
    }

    #[inline]
    #[must_use]
    pub(crate) const fn state(&self) -> &ListState<K> {
        &self.state
    }

    #[inline]
    #[must_use]
    pub(crate) const fn comparator(&self) -> &Cmp {
        &self.cmp
    }

    #[inline]
    #[must_use]
    pub(crate) const fn len(&self) -> usize {
        self.state.len()
    }

    /// The element at the 0-based `index`. `O(log n)` in expectation.
    #[must_use]
    pub(crate) fn get(&self, index: usize) -> Option<&K> {
        self.state.node_at(index).map(|id| &self.state.node(id).key)
    }

    #[inline]
    #[must_use]
    pub(crate) fn first(&self) -> Option<&K> {
        self.state.first().map(|id| &self.state.node(id).key)
    }

    #[inline]
    #[must_use]
    pub(crate) fn last(&self) -> Option<&K> {
        self.get(self.len().checked_sub(1)?)
    }

    #[inline]
    pub(crate) fn remove_at(&mut self, index: usize) -> Option<K> {
        self.state.remove_at(index)
    }

    #[inline]
    pub(crate) fn clear(&mut self) {
        self.state.clear();
    }

    #[inline]
    #[must_use]
    pub(crate) fn into_sorted_vec(self) -> Vec<K> {
        self.state.into_sorted_vec()
    }
}

// Searching
impl<K, Cmp: Comparator<K>, P> SpanSkiplist<K, Cmp, P> {
    /// The path to the last node which is `<=` the `key`. A new node inserted along this path
    /// lands after every node order-equal to `key`.
    #[must_use]
    pub(crate) fn path_after_equals(&self, key: &K) -> SearchPath {
        self.state.trace(|candidate, _| self.cmp.is_le(candidate, key))
    }

    /// The path to the last node which is strictly less than `key`. The node after it, if any,
    /// is the first node which is not less than `key`.
    #[must_use]
    fn path_before_equals(&self, key: &K) -> SearchPath {
        self.state.trace(|candidate, _| self.cmp.is_lt(candidate, key))
    }

    /// The 0-based index of the first element which is not less than `key`; that is, the number
    /// of elements strictly less than `key`.
    #[must_use]
    pub(crate) fn lower_bound(&self, key: &K) -> usize {
        self.path_before_equals(key).rank(0)
    }

    /// The elements order-equal to `key`, with their 0-based indices, in insertion order.
    ///
    /// `path` must come from [`path_before_equals`] applied to `key`.
    ///
    /// [`path_before_equals`]: SpanSkiplist::path_before_equals
    fn order_equal_run<'a>(
        &'a self,
        path: &SearchPath,
        key:  &'a K,
    ) -> impl Iterator<Item = (usize, &'a K)> + use<'a, K, Cmp, P> {
        let start = path.rank(0);
        let first = self.state.link(path.pred(0), 0).next;

        iter::successors(first, move |&id| self.state.node(id).next())
            .map(move |id| &self.state.node(id).key)
            // Nothing in the run is less than `key`, so `<=` means order-equal.
            .take_while(move |&candidate| self.cmp.is_le(candidate, key))
            .enumerate()
            .map(move |(offset, candidate)| (start + offset, candidate))
    }

    /// The 0-based index of the earliest-inserted element which is equal to `key`.
    #[must_use]
    pub(crate) fn position(&self, key: &K) -> Option<usize> {
        self.order_equal_run(&self.path_before_equals(key), key)
            .find(|&(_, candidate)| self.cmp.is_eq(candidate, key))
            .map(|(index, _)| index)
    }

    #[inline]
    #[must_use]
    pub(crate) fn contains(&self, key: &K) -> bool {
        self.position(key).is_some()
    }

    /// The number of elements equal to `key`.
    #[must_use]
    pub(crate) fn count(&self, key: &K) -> usize {
        self.order_equal_run(&self.path_before_equals(key), key)
            .filter(|&(_, candidate)| self.cmp.is_eq(candidate, key))
            .count()
    }

    /// If the last node of `path` is order-equal to `key`, return it and its 0-based index.
    ///
    /// `path` must come from [`path_after_equals`] applied to `key`, so its last node is already
    /// known to be `<=` the key.
    ///
    /// [`path_after_equals`]: SpanSkiplist::path_after_equals
    #[must_use]
    pub(crate) fn order_equal_at(&self, path: &SearchPath, key: &K) -> Option<(usize, NodeId)> {
        let id = path.pred(0)?;

        if self.cmp.is_le(key, &self.state.node(id).key) {
            Some((path.rank(0) - 1, id))
        } else {
            None
        }
    }

    /// Check the links and spans of the list, and that the elements are in order.
    ///
    /// Takes `O(n * height)` time.
    pub(crate) fn verify(&self) -> Result<(), StructureError> {
        let result = self.state.verify_links().and_then(|order| {
            let out_of_order = order
                .windows(2)
                .position(|pair| {
                    if let &[prev, next] = pair {
                        self.cmp.is_lt(&self.state.node(next).key, &self.state.node(prev).key)
                    } else {
                        false
                    }
                });

            match out_of_order {
                Some(prev_index) => Err(StructureError::OutOfOrder { index: prev_index + 1 }),
                None             => Ok(()),
            }
        });

        if let Err(err) = &result {
            tracing::event!(LogLevel::DEBUG, "skiplist failed verification: {err}");
        }

        result
    }
}

// Mutation
impl<K, Cmp: Comparator<K>, P: Prng32> SpanSkiplist<K, Cmp, P> {
    /// Insert `key` after every element order-equal to it, returning its 0-based index.
    pub(crate) fn insert(&mut self, key: K) -> usize {
        let path = self.path_after_equals(&key);
        self.insert_along(&path, key)
    }

    /// Insert `key` along a path obtained from [`path_after_equals`], with no mutation since.
    ///
    /// [`path_after_equals`]: SpanSkiplist::path_after_equals
    pub(crate) fn insert_along(&mut self, path: &SearchPath, key: K) -> usize {
        let height = self.levels.random_height(self.state.len());
        self.state.insert_at(path, key, height)
    }

    /// Remove and return the earliest-inserted element equal to `key`.
    pub(crate) fn remove(&mut self, key: &K) -> Option<K> {
        let path = self.path_before_equals(key);
        let index = self
            .order_equal_run(&path, key)
            .find(|&(_, candidate)| self.cmp.is_eq(candidate, key))
            .map(|(index, _)| index)?;

        if index == path.rank(0) {
            // The match heads its run, so `path` already leads straight to it.
            self.state.remove_after(&path)
        } else {
            self.state.remove_at(index)
        }
    }

    /// Swap the element stored at `id` for an order-equal `key`.
    pub(crate) fn replace(&mut self, id: NodeId, key: K) -> K {
        debug_assert!(
            self.cmp.is_order_equal(&self.state.node(id).key, &key),
            "a replacement must not move within the list",
        );
        self.state.replace_key(id, key)
    }
}
