use crate::node_heights::MAX_HEIGHT;


/// The key of a node in its list's arena.
pub(crate) type NodeId = usize;

/// A forward link on one level of a tower.
///
/// `span` is the number of base-level positions advanced by following the link; that is, the
/// rank of `next` minus the rank of the node owning the link. A `None` link points at a virtual
/// tail one past the last element, with rank `len + 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Link {
    pub(crate) next: Option<NodeId>,
    pub(crate) span: usize,
}

impl Link {
    /// A link to the virtual tail from the head of a list with `len` elements.
    #[inline]
    #[must_use]
    pub(crate) const fn to_tail(len: usize) -> Self {
        Self {
            next: None,
            span: len + 1,
        }
    }
}

/// # Invariants
/// - `links` is nonempty and has length at most [`MAX_HEIGHT`]; its length is the node's height,
///   fixed when the node is created.
/// - Since `links` is a contiguous slice, a node occupies every level below its height.
#[derive(Debug, Clone)]
pub(crate) struct Node<K> {
    pub(crate) key: K,
    links:          Box<[Link]>,
}

impl<K> Node<K> {
    /// Allocate a node whose links all point to the virtual tail.
    ///
    /// The caller is expected to overwrite every link when splicing the node into a list.
    #[must_use]
    pub(crate) fn new(key: K, height: usize) -> Self {
        debug_assert!(
            (1..=MAX_HEIGHT).contains(&height),
            "this crate should never attempt to create a node with height {height}",
        );

        Self {
            key,
            links: vec![Link::to_tail(0); height].into_boxed_slice(),
        }
    }

    #[inline]
    #[must_use]
    pub(crate) const fn height(&self) -> usize {
        self.links.len()
    }

    #[inline]
    #[must_use]
    pub(crate) fn links(&self) -> &[Link] {
        &self.links
    }

    /// The link on `level`, or `None` if the tower does not reach that level.
    #[inline]
    #[must_use]
    pub(crate) fn link(&self, level: usize) -> Option<Link> {
        self.links.get(level).copied()
    }

    /// # Panics
    /// Panics if `level >= self.height()`.
    #[inline]
    #[must_use]
    pub(crate) fn link_mut(&mut self, level: usize) -> &mut Link {
        #[expect(clippy::indexing_slicing, reason = "callers only touch levels in the tower")]
        &mut self.links[level]
    }

    /// The successor on the base level.
    #[inline]
    #[must_use]
    pub(crate) fn next(&self) -> Option<NodeId> {
        self.link(0).and_then(|link| link.next)
    }

    #[inline]
    #[must_use]
    pub(crate) fn into_key(self) -> K {
        self.key
    }
}
