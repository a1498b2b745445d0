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


/// A sorted multiset backed by a skiplist whose links record how many elements they skip.
///
/// Elements are kept in the order defined by `Cmp`. Order-equal elements may repeat, and they are
/// kept in insertion order. Besides the usual sorted-collection operations, the element at any
/// 0-based index can be found in `O(log n)` expected time.
///
/// Node heights are drawn from `P`, which defaults to a seeded [`Rand32`]; the default seed is
/// fixed, so the shape of a list is reproducible unless a seed is provided.
///
/// # Example
/// ```
/// use ranked_skiplist::SkipList;
///
/// let mut list = SkipList::new();
/// for key in [3, 1, 4, 1, 5] {
///     list.insert(key);
/// }
///
/// assert_eq!(list.len(), 5);
/// assert_eq!(list[1], 1);
/// assert_eq!(list.count(&1), 2);
///
/// assert!(list.remove(&1));
/// assert_eq!(list.into_vec(), [1, 3, 4, 5]);
/// ```
#[derive(Clone)]
pub struct SkipList<K, Cmp = DefaultComparator, P = Rand32>(SpanSkiplist<K, Cmp, P>);

impl<K> SkipList<K> {
    /// An empty list ordered by [`PartialOrd`], with the default options.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::with_comparator(DefaultComparator)
    }

    /// An empty list ordered by [`PartialOrd`], whose node heights are seeded with `seed`.
    #[inline]
    #[must_use]
    pub fn new_seeded(seed: u64) -> Self {
        Self::with_parts(DefaultComparator, LevelGenerator::new_seeded(seed))
    }

    /// An empty list ordered by [`PartialOrd`], with the provided options.
    pub fn with_options(options: &SkiplistOptions) -> Result<Self, OptionsError> {
        Ok(Self::with_parts(DefaultComparator, LevelGenerator::from_options(options)?))
    }
}

impl<K, Cmp> SkipList<K, Cmp> {
    /// An empty list ordered by `cmp`, with the default options.
    #[inline]
    #[must_use]
    pub fn with_comparator(cmp: Cmp) -> Self {
        Self::with_parts(cmp, LevelGenerator::default())
    }
}

impl<K, Cmp, P> SkipList<K, Cmp, P> {
    /// An empty list ordered by `cmp`, whose node heights are chosen by `levels`.
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

    /// The number of elements in the list, counting repeats. `O(1)`.
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
    ///
    /// Takes `O(log n)` time in expectation.
    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&K> {
        self.0.get(index)
    }

    /// The element at the 0-based `index` in sorted order.
    ///
    /// Takes `O(log n)` time in expectation.
    pub fn select(&self, index: usize) -> Result<&K, OutOfRange> {
        self.get(index).ok_or(OutOfRange { index, len: self.len() })
    }

    /// The smallest element, if any. `O(1)`.
    #[inline]
    #[must_use]
    pub fn first(&self) -> Option<&K> {
        self.0.first()
    }

    /// The greatest element, if any. `O(log n)` in expectation.
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

    /// Remove every element, keeping the comparator and the state of the PRNG.
    #[inline]
    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Iterate over the elements in sorted order; order-equal elements are yielded in the order
    /// they were inserted.
    #[inline]
    #[must_use]
    pub fn iter(&self) -> Iter<'_, K> {
        Iter::new(self.0.state())
    }

    /// A [`Cursor`] over this list, starting at its invalid position.
    #[inline]
    #[must_use]
    pub const fn cursor(&self) -> Cursor<'_, K, Cmp, P> {
        Cursor::new(&self.0)
    }

    /// Consume the list, returning its elements in sorted order. `O(n)`.
    #[inline]
    #[must_use]
    pub fn into_vec(self) -> Vec<K> {
        self.0.into_sorted_vec()
    }

    /// Clone the elements into a `Vec`, in sorted order. `O(n)`.
    #[must_use]
    pub fn to_vec(&self) -> Vec<K>
    where
        K: Clone,
    {
        self.iter().cloned().collect()
    }
}

impl<K, Cmp: Comparator<K>, P> SkipList<K, Cmp, P> {
    /// Whether any element is equal to `key`. `O(log n)` in expectation, plus the number of
    /// elements order-equal to `key`.
    #[inline]
    #[must_use]
    pub fn contains(&self, key: &K) -> bool {
        self.0.contains(key)
    }

    /// The 0-based index of the earliest-inserted element equal to `key`.
    #[inline]
    #[must_use]
    pub fn index_of(&self, key: &K) -> Option<usize> {
        self.0.position(key)
    }

    /// The number of elements equal to `key`.
    #[inline]
    #[must_use]
    pub fn count(&self, key: &K) -> usize {
        self.0.count(key)
    }

    /// Check that every link skips exactly as many elements as it claims to, that every tower is
    /// linked on each of its levels, and that the elements are in order.
    ///
    /// This can only fail if the comparator does not describe a total preorder. Takes
    /// `O(n * log n)` time in expectation.
    pub fn verify(&self) -> Result<(), StructureError> {
        self.0.verify()
    }
}

impl<K, Cmp: Comparator<K>, P: Prng32> SkipList<K, Cmp, P> {
    /// Insert `key`, after every element already in the list which is order-equal to it.
    ///
    /// Takes `O(log n)` time in expectation.
    #[inline]
    pub fn insert(&mut self, key: K) {
        self.0.insert(key);
    }

    /// Remove one element equal to `key`: the one inserted earliest among those still present.
    ///
    /// Returns whether an element was removed. Takes `O(log n)` time in expectation.
    #[inline]
    pub fn remove(&mut self, key: &K) -> bool {
        self.take(key).is_some()
    }

    /// Like [`remove`], but returns the removed element.
    ///
    /// [`remove`]: SkipList::remove
    #[inline]
    pub fn take(&mut self, key: &K) -> Option<K> {
        self.0.remove(key)
    }
}

impl<K, Cmp: Default> Default for SkipList<K, Cmp> {
    #[inline]
    fn default() -> Self {
        Self::with_comparator(Cmp::default())
    }
}

impl<K, Cmp, P> Index<usize> for SkipList<K, Cmp, P> {
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

impl<K: Debug, Cmp, P> Debug for SkipList<K, Cmp, P> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<K: PartialEq, Cmp, P> PartialEq for SkipList<K, Cmp, P> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K: Eq, Cmp, P> Eq for SkipList<K, Cmp, P> {}

impl<K, Cmp: Comparator<K>, P: Prng32> Extend<K> for SkipList<K, Cmp, P> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<K, Cmp: Comparator<K> + Default> FromIterator<K> for SkipList<K, Cmp> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut list = Self::default();
        list.extend(iter);
        list
    }
}

impl<K, Cmp, P> IntoIterator for SkipList<K, Cmp, P> {
    type Item     = K;
    type IntoIter = IntoIter<K>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self.into_vec())
    }
}

impl<'a, K, Cmp, P> IntoIterator for &'a SkipList<K, Cmp, P> {
    type Item     = &'a K;
    type IntoIter = Iter<'a, K>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
