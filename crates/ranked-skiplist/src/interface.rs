/// Interface for ordering the elements of a skiplist.
///
/// Rather than a three-way comparison, a comparator supplies a "less than or equal" predicate and
/// an equality predicate. Together they must describe a total preorder:
/// - for all `a`, `b`: `is_le(a, b) || is_le(b, a)` (totality),
/// - for all `a`, `b`, `c`: `is_le(a, b) && is_le(b, c)` implies `is_le(a, c)` (transitivity).
///
/// Two elements are *order-equal* when each is `<=` the other. Order-equal elements sit next to
/// each other in a skiplist, and a multiset keeps them in insertion order.
///
/// `is_eq` decides which of the order-equal elements a lookup or removal matches. It should imply
/// order-equality; it may be stricter than it (see [`ByKey`]), in which case the skiplist scans
/// the run of order-equal elements for one which is `is_eq` to the target.
///
/// If the preorder contract is violated (for instance, by comparing floats which may be NaN), the
/// order of elements is unspecified and lookups may miss elements which are present. Memory
/// safety and the span bookkeeping of the skiplist are unaffected.
///
/// [`ByKey`]: crate::ByKey
pub trait Comparator<K: ?Sized> {
    /// Whether `lhs <= rhs`.
    #[must_use]
    fn is_le(&self, lhs: &K, rhs: &K) -> bool;

    /// Whether `lhs == rhs`.
    #[must_use]
    fn is_eq(&self, lhs: &K, rhs: &K) -> bool;

    /// Whether `lhs < rhs`, derived from [`is_le`] by totality.
    ///
    /// [`is_le`]: Comparator::is_le
    #[inline]
    #[must_use]
    fn is_lt(&self, lhs: &K, rhs: &K) -> bool {
        !self.is_le(rhs, lhs)
    }

    /// Whether each of `lhs` and `rhs` is `<=` the other.
    #[inline]
    #[must_use]
    fn is_order_equal(&self, lhs: &K, rhs: &K) -> bool {
        self.is_le(lhs, rhs) && self.is_le(rhs, lhs)
    }
}

impl<K: ?Sized, C: ?Sized + Comparator<K>> Comparator<K> for &C {
    #[inline]
    fn is_le(&self, lhs: &K, rhs: &K) -> bool {
        C::is_le(self, lhs, rhs)
    }

    #[inline]
    fn is_eq(&self, lhs: &K, rhs: &K) -> bool {
        C::is_eq(self, lhs, rhs)
    }
}

impl<K: ?Sized, C: ?Sized + Comparator<K>> Comparator<K> for Box<C> {
    #[inline]
    fn is_le(&self, lhs: &K, rhs: &K) -> bool {
        C::is_le(self, lhs, rhs)
    }

    #[inline]
    fn is_eq(&self, lhs: &K, rhs: &K) -> bool {
        C::is_eq(self, lhs, rhs)
    }
}
