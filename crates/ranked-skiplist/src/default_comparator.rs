use crate::interface::Comparator;


/// A [`Comparator`] which uses the `<=` and `==` operators of `K`.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DefaultComparator;

impl<K: ?Sized + PartialOrd> Comparator<K> for DefaultComparator {
    /// Equivalent to `lhs <= rhs`.
    #[inline]
    fn is_le(&self, lhs: &K, rhs: &K) -> bool {
        lhs <= rhs
    }

    /// Equivalent to `lhs == rhs`.
    #[inline]
    fn is_eq(&self, lhs: &K, rhs: &K) -> bool {
        lhs == rhs
    }
}

/// A [`Comparator`] which orders elements by a projected key, but compares them for equality
/// with the `==` operator of the whole element.
///
/// This is the case where order-equality and value-equality diverge: two elements with equal
/// projected keys are order-equal, so they sit next to each other in the skiplist, but lookups
/// and removals only match an element which is `==` to the target.
///
/// ```
/// use ranked_skiplist::{ByKey, SkipList};
///
/// let mut tasks = SkipList::with_comparator(ByKey(|task: &(u8, &str)| task.0));
/// tasks.insert((2, "write"));
/// tasks.insert((1, "read"));
/// tasks.insert((2, "review"));
///
/// assert_eq!(tasks.to_vec(), [(1, "read"), (2, "write"), (2, "review")]);
/// assert!(tasks.contains(&(2, "review")));
/// assert!(!tasks.contains(&(2, "publish")));
/// ```
#[derive(Default, Debug, Clone, Copy)]
pub struct ByKey<F>(pub F);

impl<K, T, F> Comparator<K> for ByKey<F>
where
    K: PartialEq,
    T: PartialOrd,
    F: Fn(&K) -> T,
{
    #[inline]
    fn is_le(&self, lhs: &K, rhs: &K) -> bool {
        (self.0)(lhs) <= (self.0)(rhs)
    }

    #[inline]
    fn is_eq(&self, lhs: &K, rhs: &K) -> bool {
        lhs == rhs
    }
}
