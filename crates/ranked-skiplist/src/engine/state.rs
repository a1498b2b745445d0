use std::collections::HashMap;

use slab::Slab;
use tracing::Level as LogLevel;

use crate::{error::StructureError, node_heights::MAX_HEIGHT};
use super::node::{Link, Node, NodeId};


/// The nodes preceding a search target on each level, and their ranks.
///
/// A `None` predecessor is the head sentinel, with rank `0`. Levels at or above the list's height
/// when the path was traced are always the head.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SearchPath {
    preds: [Option<NodeId>; MAX_HEIGHT],
    ranks: [usize; MAX_HEIGHT],
}

impl SearchPath {
    #[inline]
    #[must_use]
    const fn new() -> Self {
        Self {
            preds: [None; MAX_HEIGHT],
            ranks: [0; MAX_HEIGHT],
        }
    }

    #[inline]
    #[must_use]
    pub(crate) fn pred(&self, level: usize) -> Option<NodeId> {
        self.preds.get(level).copied().flatten()
    }

    #[inline]
    #[must_use]
    pub(crate) fn rank(&self, level: usize) -> usize {
        self.ranks.get(level).copied().unwrap_or(0)
    }
}

/// The key-agnostic part of a skiplist: the node arena, the head sentinel, and the bookkeeping
/// needed to keep spans consistent.
///
/// # Invariants
/// Checked by [`ListState::verify_links`]:
/// - Exactly `len` nodes are in the arena, and all of them are linked on level `0`.
/// - For every level below `height`, following links from the head visits exactly the nodes whose
///   height exceeds that level, and every link's span equals the rank of its target minus the rank
///   of its source (with a `None` target at rank `len + 1`).
/// - No node is taller than `height`, and the head's link on level `height - 1` is `Some`.
///   (Equivalently, `height == 0` if and only if the list is empty.)
/// - Head links at or above `height` are stale, and are reset before being used.
#[derive(Debug, Clone)]
pub(crate) struct ListState<K> {
    nodes:  Slab<Node<K>>,
    head:   [Link; MAX_HEIGHT],
    height: usize,
    len:    usize,
}

impl<K> Default for ListState<K> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

// Short utility functions
impl<K> ListState<K> {
    #[inline]
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            nodes:  Slab::new(),
            head:   [Link::to_tail(0); MAX_HEIGHT],
            height: 0,
            len:    0,
        }
    }

    #[inline]
    #[must_use]
    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    #[cfg(test)]
    #[inline]
    #[must_use]
    pub(crate) const fn height(&self) -> usize {
        self.height
    }

    /// # Panics
    /// Panics if `id` is not in the arena, which would be a bug in this crate.
    #[inline]
    #[must_use]
    pub(crate) fn node(&self, id: NodeId) -> &Node<K> {
        &self.nodes[id]
    }

    /// # Panics
    /// Panics if `id` is not in the arena, which would be a bug in this crate.
    #[inline]
    #[must_use]
    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node<K> {
        &mut self.nodes[id]
    }

    /// The first node on the base level, if the list is nonempty.
    #[inline]
    #[must_use]
    pub(crate) fn first(&self) -> Option<NodeId> {
        if self.height == 0 {
            None
        } else {
            self.head[0].next
        }
    }

    /// The link leaving `from` (or the head, if `None`) on `level`.
    ///
    /// # Panics
    /// Panics if `from`'s tower does not reach `level`, or `level >= MAX_HEIGHT`.
    #[must_use]
    pub(crate) fn link(&self, from: Option<NodeId>, level: usize) -> Link {
        #![expect(clippy::indexing_slicing, reason = "levels are below the tower heights")]

        match from {
            Some(id) => self.node(id).links()[level],
            None     => self.head[level],
        }
    }

    /// # Panics
    /// Panics if `from`'s tower does not reach `level`, or `level >= MAX_HEIGHT`.
    #[must_use]
    fn link_mut(&mut self, from: Option<NodeId>, level: usize) -> &mut Link {
        #![expect(clippy::indexing_slicing, reason = "levels are below the tower heights")]

        match from {
            Some(id) => self.node_mut(id).link_mut(level),
            None     => &mut self.head[level],
        }
    }

    /// Remove every element, keeping the arena's allocation.
    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.head = [Link::to_tail(0); MAX_HEIGHT];
        self.height = 0;
        self.len = 0;
    }

    /// Move every element out of the arena, in order.
    #[must_use]
    pub(crate) fn into_sorted_vec(mut self) -> Vec<K> {
        let mut keys = Vec::with_capacity(self.len);
        let mut cursor = self.first();

        while let Some(id) = cursor {
            let node = self.nodes.remove(id);
            cursor = node.next();
            keys.push(node.into_key());
        }

        keys
    }
}

// Traversal
impl<K> ListState<K> {
    /// Walk from the top of the head down to level `0`, moving forwards on each level while
    /// `advance(next_key, next_rank)` returns `true`.
    ///
    /// `advance` should be monotone (once it returns `false` for a node, it would return `false`
    /// for every later node), or else the returned path may not lead where the caller expects.
    /// Even so, the path is always one along which a node can be spliced without breaking any
    /// span: a node rejected on some level is never offered to `advance` on a lower one.
    ///
    /// This takes `O(log n)` time in expectation and `O(n)` in the worst case; the bound is
    /// probabilistic, depending on the randomly chosen node heights rather than on the keys.
    pub(crate) fn trace<F>(&self, mut advance: F) -> SearchPath
    where
        F: FnMut(&K, usize) -> bool,
    {
        let mut path = SearchPath::new();
        let mut current = None;
        let mut rank = 0;
        // The rank of the node (or virtual tail) most recently rejected.
        let mut limit = self.len + 1;

        for level in (0..self.height).rev() {
            loop {
                let link = self.link(current, level);
                let next_rank = rank + link.span;

                match link.next {
                    Some(next) if next_rank < limit && advance(&self.node(next).key, next_rank) => {
                        rank = next_rank;
                        current = Some(next);
                    }
                    _ => {
                        limit = next_rank;
                        break;
                    }
                }
            }

            #[expect(clippy::indexing_slicing, reason = "level < height <= MAX_HEIGHT")]
            {
                path.preds[level] = current;
                path.ranks[level] = rank;
            }
        }

        path
    }

    /// The predecessors of the node at 1-based `rank` on every level.
    #[inline]
    #[must_use]
    pub(crate) fn path_to_rank(&self, rank: usize) -> SearchPath {
        self.trace(|_, reached| reached < rank)
    }

    /// The node at the 0-based `index`, found by summing spans from the head.
    ///
    /// `O(log n)` in expectation.
    #[must_use]
    pub(crate) fn node_at(&self, index: usize) -> Option<NodeId> {
        if index >= self.len {
            return None;
        }

        let target = index + 1;
        let mut current = None;
        let mut rank = 0;

        for level in (0..self.height).rev() {
            loop {
                let link = self.link(current, level);

                match link.next {
                    Some(next) if rank + link.span <= target => {
                        rank += link.span;
                        current = Some(next);

                        if rank == target {
                            return current;
                        }
                    }
                    _ => break,
                }
            }
        }

        debug_assert!(false, "spans should sum to every rank in 1..=len");
        None
    }
}

// Mutation
impl<K> ListState<K> {
    /// Splice a new node of the given `height` immediately after `path.pred(0)`, and return its
    /// 0-based index.
    ///
    /// `path` must have been traced on `self` with no mutation since, and `height` must be in
    /// `1..=MAX_HEIGHT`.
    pub(crate) fn insert_at(&mut self, path: &SearchPath, key: K, height: usize) -> usize {
        // The node is allocated before any link or span is changed; if allocation fails, the list
        // is untouched.
        let node_id = self.nodes.insert(Node::new(key, height));

        if height > self.height {
            #[expect(clippy::indexing_slicing, reason = "height <= MAX_HEIGHT")]
            for link in &mut self.head[self.height..height] {
                *link = Link::to_tail(self.len);
            }

            tracing::event!(
                LogLevel::TRACE,
                "skiplist head grew from {} to {height} levels with {} elements",
                self.height,
                self.len,
            );
            self.height = height;
        }

        let base_rank = path.rank(0);

        for level in 0..self.height {
            let pred = path.pred(level);
            // How far past `pred` the new node lands, minus one.
            let consumed = base_rank - path.rank(level);

            if level < height {
                let old = self.link(pred, level);

                *self.node_mut(node_id).link_mut(level) = Link {
                    next: old.next,
                    span: old.span - consumed,
                };
                *self.link_mut(pred, level) = Link {
                    next: Some(node_id),
                    span: consumed + 1,
                };
            } else {
                // The new node is now somewhere beneath this link.
                self.link_mut(pred, level).span += 1;
            }
        }

        self.len += 1;
        base_rank
    }

    /// Unlink and return the element at the 0-based `index`, if `index < len`.
    pub(crate) fn remove_at(&mut self, index: usize) -> Option<K> {
        if index >= self.len {
            return None;
        }

        let path = self.path_to_rank(index + 1);
        self.remove_after(&path)
    }

    /// Unlink and return the node directly after the base level of `path`, if any.
    ///
    /// On every level which that node's tower reaches, the predecessor in `path` must link
    /// straight to it. Any path traced with no mutation since, whose base-level predecessor is
    /// the node just before the target, satisfies this.
    pub(crate) fn remove_after(&mut self, path: &SearchPath) -> Option<K> {
        let target = self.link(path.pred(0), 0).next?;
        let removed = self.nodes.try_remove(target)?;

        for level in 0..self.height {
            let pred_link = self.link_mut(path.pred(level), level);

            if let Some(removed_link) = removed.link(level) {
                debug_assert_eq!(pred_link.next, Some(target), "update path must precede target");

                *pred_link = Link {
                    next: removed_link.next,
                    span: pred_link.span + removed_link.span - 1,
                };
            } else {
                pred_link.span -= 1;
            }
        }

        self.len -= 1;
        self.shrink_height();

        Some(removed.into_key())
    }

    /// Swap the key of an existing node.
    ///
    /// The new key must be order-equal to the old one.
    pub(crate) fn replace_key(&mut self, id: NodeId, key: K) -> K {
        std::mem::replace(&mut self.node_mut(id).key, key)
    }

    /// Drop empty levels from the top of the head.
    fn shrink_height(&mut self) {
        let old_height = self.height;

        while let Some(top) = self.height.checked_sub(1) {
            #[expect(clippy::indexing_slicing, reason = "top < height <= MAX_HEIGHT")]
            if self.head[top].next.is_some() {
                break;
            }
            self.height = top;
        }

        if self.height != old_height {
            tracing::event!(
                LogLevel::TRACE,
                "skiplist head shrank from {old_height} to {} levels with {} elements",
                self.height,
                self.len,
            );
        }
    }
}

// Verification
impl<K> ListState<K> {
    /// Exhaustively check the links and spans of the list, returning the base-level nodes in
    /// order.
    ///
    /// Takes `O(n * height)` time.
    pub(crate) fn verify_links(&self) -> Result<Vec<NodeId>, StructureError> {
        let mut order = Vec::with_capacity(self.len);
        let mut ranks = HashMap::with_capacity(self.len);
        let mut cursor = self.first();

        while let Some(id) = cursor {
            // A cycle would link more nodes than the arena holds.
            if order.len() >= self.nodes.len() {
                return Err(StructureError::LengthMismatch {
                    counted:  order.len() + 1,
                    recorded: self.len,
                });
            }

            let index = order.len();
            let node = self.nodes.get(id).ok_or(StructureError::LeakedNode {
                arena:  self.nodes.len(),
                linked: index + 1,
            })?;

            if node.height() == 0 {
                return Err(StructureError::EmptyTower { index });
            }
            if node.height() > self.height {
                return Err(StructureError::TowerTooTall {
                    index,
                    height:      node.height(),
                    list_height: self.height,
                });
            }

            order.push(id);
            ranks.insert(id, index + 1);
            cursor = node.next();
        }

        if order.len() != self.len {
            return Err(StructureError::LengthMismatch {
                counted:  order.len(),
                recorded: self.len,
            });
        }
        if order.len() != self.nodes.len() {
            return Err(StructureError::LeakedNode {
                arena:  self.nodes.len(),
                linked: order.len(),
            });
        }
        if self.height > 0 && self.link(None, self.height - 1).next.is_none() {
            return Err(StructureError::TowerGap {
                level:       self.height - 1,
                linked:      0,
                tall_enough: 0,
            });
        }

        for level in 0..self.height {
            let tall_enough = order
                .iter()
                .filter(|&&id| self.node(id).height() > level)
                .count();

            let mut current = None;
            let mut rank = 0;
            let mut linked = 0;

            loop {
                let link = match current {
                    Some(id) => self.node(id).link(level).ok_or(StructureError::TowerGap {
                        level,
                        linked,
                        tall_enough,
                    })?,
                    None => self.link(None, level),
                };

                let expected = match link.next {
                    Some(next) => ranks.get(&next).copied().ok_or(StructureError::LeakedNode {
                        arena:  self.nodes.len(),
                        linked: order.len(),
                    })?,
                    None => self.len + 1,
                };

                // A zero span could link a node to itself forever.
                if link.span == 0 || rank + link.span != expected {
                    return Err(StructureError::SpanMismatch {
                        level,
                        expected,
                        found: rank + link.span,
                    });
                }

                let Some(next) = link.next else { break };

                linked += 1;
                rank = expected;
                current = Some(next);
            }

            if linked != tall_enough {
                return Err(StructureError::TowerGap { level, linked, tall_enough });
            }
        }

        Ok(order)
    }
}


#[cfg(test)]
mod tests {
    use super::*;


    /// Insert `keys` in order, each appended at the end, with the given heights.
    fn appended(keys_and_heights: &[(char, usize)]) -> ListState<char> {
        let mut state = ListState::new();

        for &(key, height) in keys_and_heights {
            let len = state.len();
            let path = state.path_to_rank(len + 1);
            assert_eq!(state.insert_at(&path, key, height), len);
            state.verify_links().unwrap();
        }

        state
    }

    fn keys(state: &ListState<char>) -> String {
        state
            .verify_links()
            .unwrap()
            .into_iter()
            .map(|id| state.node(id).key)
            .collect()
    }

    #[test]
    fn empty_state() {
        let state = ListState::<u8>::new();

        assert_eq!(state.len(), 0);
        assert_eq!(state.height(), 0);
        assert_eq!(state.first(), None);
        assert_eq!(state.node_at(0), None);
        assert_eq!(state.verify_links(), Ok(Vec::new()));
    }

    #[test]
    fn spans_after_appends() {
        // a(1) b(3) c(1) d(2)
        let state = appended(&[('a', 1), ('b', 3), ('c', 1), ('d', 2)]);

        assert_eq!(state.height(), 3);
        assert_eq!(keys(&state), "abcd");

        // The head reaches `a` on level 0, `b` on levels 1 and 2.
        assert_eq!(state.link(None, 0).span, 1);
        assert_eq!(state.link(None, 1).span, 2);
        assert_eq!(state.link(None, 2).span, 2);

        let b = state.node_at(1).unwrap();
        // `b` skips `c` on level 1, and reaches the tail (rank 5) on level 2.
        assert_eq!(state.link(Some(b), 1).span, 2);
        assert_eq!(state.link(Some(b), 2), Link { next: None, span: 3 });

        for (index, key) in "abcd".chars().enumerate() {
            assert_eq!(state.node(state.node_at(index).unwrap()).key, key);
        }
        assert_eq!(state.node_at(4), None);
    }

    #[test]
    fn insert_in_the_middle() {
        let mut state = appended(&[('a', 2), ('c', 1), ('e', 3)]);

        // Insert `b` tall and `d` short between existing nodes.
        let path = state.path_to_rank(2);
        assert_eq!(state.insert_at(&path, 'b', 3), 1);
        state.verify_links().unwrap();

        let path = state.path_to_rank(4);
        assert_eq!(state.insert_at(&path, 'd', 1), 3);
        state.verify_links().unwrap();

        assert_eq!(keys(&state), "abcde");
    }

    #[test]
    fn growing_the_head_spans_the_whole_list() {
        let mut state = appended(&[('a', 1), ('b', 1), ('c', 1)]);
        assert_eq!(state.height(), 1);

        let path = state.path_to_rank(2);
        assert_eq!(state.insert_at(&path, 'x', 4), 1);

        assert_eq!(state.height(), 4);
        assert_eq!(keys(&state), "axbc");
        for level in 1..4 {
            assert_eq!(state.link(None, level).span, 2);
            assert_eq!(state.link(state.node_at(1), level), Link { next: None, span: 3 });
        }
    }

    #[test]
    fn remove_and_shrink() {
        let mut state = appended(&[('a', 1), ('b', 4), ('c', 2), ('d', 1)]);
        assert_eq!(state.height(), 4);

        assert_eq!(state.remove_at(1), Some('b'));
        state.verify_links().unwrap();
        assert_eq!(state.height(), 2);
        assert_eq!(keys(&state), "acd");

        assert_eq!(state.remove_at(3), None);
        assert_eq!(state.remove_at(2), Some('d'));
        assert_eq!(state.remove_at(0), Some('a'));
        state.verify_links().unwrap();
        assert_eq!(keys(&state), "c");

        assert_eq!(state.remove_at(0), Some('c'));
        assert_eq!(state.height(), 0);
        assert_eq!(state.len(), 0);
        assert_eq!(state.first(), None);
        state.verify_links().unwrap();

        // The stale head levels are reset when the list grows again.
        let path = state.path_to_rank(1);
        state.insert_at(&path, 'z', 3);
        state.verify_links().unwrap();
        assert_eq!(keys(&state), "z");
    }

    #[test]
    fn replace_and_drain() {
        let mut state = appended(&[('a', 2), ('b', 1), ('c', 3)]);

        let b = state.node_at(1).unwrap();
        assert_eq!(state.replace_key(b, 'B'), 'b');
        assert_eq!(keys(&state), "aBc");

        assert_eq!(state.clone().into_sorted_vec(), ['a', 'B', 'c']);

        state.clear();
        assert_eq!(state.len(), 0);
        assert_eq!(state.verify_links(), Ok(Vec::new()));
    }

    #[test]
    fn detects_corrupted_spans() {
        let mut state = appended(&[('a', 2), ('b', 1), ('c', 2)]);

        state.link_mut(None, 1).span += 1;

        assert_eq!(
            state.verify_links(),
            Err(StructureError::SpanMismatch { level: 1, expected: 1, found: 2 }),
        );
    }

    #[test]
    fn detects_wrong_length() {
        let mut state = appended(&[('a', 1), ('b', 1)]);
        state.len = 3;

        assert_eq!(
            state.verify_links(),
            Err(StructureError::LengthMismatch { counted: 2, recorded: 3 }),
        );
    }

    #[test]
    fn detects_skipped_tower() {
        let mut state = appended(&[('a', 2), ('b', 2)]);
        let a = state.node_at(0);

        // Skip `b` on level 1 while keeping spans consistent with the tail.
        *state.link_mut(a, 1) = Link::to_tail(1);

        assert_eq!(
            state.verify_links(),
            Err(StructureError::TowerGap { level: 1, linked: 1, tall_enough: 2 }),
        );
    }
}
