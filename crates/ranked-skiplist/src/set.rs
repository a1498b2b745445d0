use std::ops::Index;
use std::fmt::{Debug, Formatter, Result as FmtResult};

use oorandom::Rand32;

use crate::{
    default_comparator::DefaultComparator,
    engine::SpanSkiplist,
    interface::Comparator,
    iter::{Cursor, IntoIter, Iter},
    node_heights::{LevelGenerator, Prng32},
    options::SkiplistOptions,
};
use crate::error::{OptionsError, OutOfRange, StructureError};


/// A sorted set backed by a skiplist whose links record how many elements they skip.
///
/// No two elements of the set are order-equal under `Cmp`. Inserting an element order-equal to
/// one already present leaves the set unchanged; use [`replace`] to overwrite the stored element
/// instead.
///
/// Otherwise, this behaves like a [`SkipList`], including `O(log n)` access by 0-based index.
///
/// # Example
/// ```
/// use ranked_skiplist::SkipListSet;
///
/// let mut set = SkipListSet::new();
/// assert!(set.insert("pear"));
/// assert!(set.insert("apple"));
/// assert!(!set.insert("pear"));
///
/// assert_eq!(set.len(), 2);
/// assert_eq!(set[0], "apple");
/// assert_eq!(set.index_of(&"pear"), Some(1));
/// ```
///
/// [`replace`]: SkipListSet::replace
/// [`SkipList`]: crate::SkipList
#[derive(Clone)]
pub struct SkipListSet<K, Cmp = DefaultComparator, P = Rand32>(SpanSkiplist<K, Cmp, P>);

impl<K> SkipListSet<K> {
    /// An empty set ordered by [`PartialOrd`], with the default options.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::with_comparator(DefaultComparator)
    }

    /// An empty set ordered by [`PartialOrd`], whose node heights are seeded with `seed`.
    #[inline]
    #[must_use]
    pub fn new_seeded(seed: u64) -> Self {
        Self::with_parts(DefaultComparator, LevelGenerator::new_seeded(seed))
    }

    /// An empty set ordered by [`PartialOrd`], with the provided options.
    pub fn with_options(options: &SkiplistOptions) -> Result<Self, OptionsError> {
        Ok(Self::with_parts(DefaultComparator, LevelGenerator::from_options(options)?))
    }
}

impl<K, Cmp> SkipListSet<K, Cmp> {
    /// An empty set ordered by `cmp`, with the default options.
    #[inline]
    #[must_use]
    pub fn with_comparator(cmp: Cmp) -> Self {
        Self::with_parts(cmp, LevelGenerator::default())
    }
}

impl<K, Cmp, P> SkipListSet<K, Cmp, P> {
    /// An empty set ordered by `cmp`, whose node heights are chosen by `levels`.
    #[inline]
    #[must_use]
    pub fn with_parts(cmp: Cmp, levels: LevelGenerator<P>) -> Self {
        Self(SpanSkiplist::new(cmp, levels))
    }

    #[inline]
    #[must_use]
    pub const fn comparator(&self) -> &Cmp {
        self.0.comparator()
    }

    /// The number of elements in the set. `O(1)`.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The element at the 0-based `index` in sorted order, or `None` if `index >= self.len()`.
    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&K> {
        self.0.get(index)
    }

    /// The element at the 0-based `index` in sorted order.
    pub fn select(&self, index: usize) -> Result<&K, OutOfRange> {
        self.get(index).ok_or(OutOfRange { index, len: self.len() })
    }

    #[inline]
    #[must_use]
    pub fn first(&self) -> Option<&K> {
        self.0.first()
    }

    #[inline]
    #[must_use]
    pub fn last(&self) -> Option<&K> {
        self.0.last()
    }

    /// Remove and return the element at the 0-based `index` in sorted order.
    pub fn remove_at(&mut self, index: usize) -> Result<K, OutOfRange> {
        let len = self.len();
        self.0.remove_at(index).ok_or(OutOfRange { index, len })
    }

    #[inline]
    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Iterate over the elements in sorted order.
    #[inline]
    #[must_use]
    pub fn iter(&self) -> Iter<'_, K> {
        Iter::new(self.0.state())
    }

    /// A [`Cursor`] over this set, starting at its invalid position.
    #[inline]
    #[must_use]
    pub const fn cursor(&self) -> Cursor<'_, K, Cmp, P> {
        Cursor::new(&self.0)
    }

    #[inline]
    #[must_use]
    pub fn into_vec(self) -> Vec<K> {
        self.0.into_sorted_vec()
    }

    #[must_use]
    pub fn to_vec(&self) -> Vec<K>
    where
        K: Clone,
    {
        self.iter().cloned().collect()
    }
}

impl<K, Cmp: Comparator<K>, P> SkipListSet<K, Cmp, P> {
    /// Whether the set holds an element equal to `key`.
    #[inline]
    #[must_use]
    pub fn contains(&self, key: &K) -> bool {
        self.0.contains(key)
    }

    /// The 0-based index of the element equal to `key`.
    #[inline]
    #[must_use]
    pub fn index_of(&self, key: &K) -> Option<usize> {
        self.0.position(key)
    }

    /// See [`SkipList::verify`].
    ///
    /// Beyond the checks made there, a set whose comparator is a total preorder never holds two
    /// order-equal elements, but that is not checked here.
    ///
    /// [`SkipList::verify`]: crate::SkipList::verify
    pub fn verify(&self) -> Result<(), StructureError> {
        self.0.verify()
    }
}

impl<K, Cmp: Comparator<K>, P: Prng32> SkipListSet<K, Cmp, P> {
    /// Insert `key` if no element order-equal to it is present.
    ///
    /// Returns whether `key` was inserted. If it was not, the element already in the set is kept
    /// and `key` is dropped. Takes `O(log n)` time in expectation.
    pub fn insert(&mut self, key: K) -> bool {
        let path = self.0.path_after_equals(&key);

        if self.0.order_equal_at(&path, &key).is_some() {
            false
        } else {
            self.0.insert_along(&path, key);
            true
        }
    }

    /// Insert `key`, overwriting any element order-equal to it.
    ///
    /// Returns the overwritten element, if there was one. Takes `O(log n)` time in expectation.
    pub fn replace(&mut self, key: K) -> Option<K> {
        let path = self.0.path_after_equals(&key);

        if let Some((_, id)) = self.0.order_equal_at(&path, &key) {
            Some(self.0.replace(id, key))
        } else {
            self.0.insert_along(&path, key);
            None
        }
    }

    /// Remove the element equal to `key`, returning whether there was one.
    #[inline]
    pub fn remove(&mut self, key: &K) -> bool {
        self.take(key).is_some()
    }

    /// Remove and return the element equal to `key`.
    #[inline]
    pub fn take(&mut self, key: &K) -> Option<K> {
        self.0.remove(key)
    }
}

impl<K, Cmp: Default> Default for SkipListSet<K, Cmp> {
    #[inline]
    fn default() -> Self {
        Self::with_comparator(Cmp::default())
    }
}

impl<K, Cmp, P> Index<usize> for SkipListSet<K, Cmp, P> {
    type Output = K;

    /// # Panics
    /// Panics if `index >= self.len()`.
    fn index(&self, index: usize) -> &Self::Output {
        match self.select(index) {
            Ok(key) => key,
            #[expect(clippy::panic, reason = "indexing out of bounds panics, as with slices")]
            Err(err) => panic!("{err}"),
        }
    }
}

impl<K: Debug, Cmp, P> Debug for SkipListSet<K, Cmp, P> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<K: PartialEq, Cmp, P> PartialEq for SkipListSet<K, Cmp, P> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K: Eq, Cmp, P> Eq for SkipListSet<K, Cmp, P> {}

/// Elements order-equal to one already present are dropped, as with [`SkipListSet::insert`].
impl<K, Cmp: Comparator<K>, P: Prng32> Extend<K> for SkipListSet<K, Cmp, P> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<K, Cmp: Comparator<K> + Default> FromIterator<K> for SkipListSet<K, Cmp> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut set = Self::default();
        set.extend(iter);
        set
    }
}

impl<K, Cmp, P> IntoIterator for SkipListSet<K, Cmp, P> {
    type Item     = K;
    type IntoIter = IntoIter<K>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self.into_vec())
    }
}

impl<'a, K, Cmp, P> IntoIterator for &'a SkipListSet<K, Cmp, P> {
    type Item     = &'a K;
    type IntoIter = Iter<'a, K>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
