#![cfg_attr(test, allow(unused_crate_dependencies, reason = "`proptest` is only used by integration tests"))]

//! Skiplists whose links record how many elements they skip, so that the element at any index
//! can be found as quickly as any key.
//!
//! Two collections are provided:
//! - [`SkipList`], a sorted multiset. Order-equal elements may repeat, and are kept in insertion
//!   order.
//! - [`SkipListSet`], a sorted set. Inserting an element order-equal to one already present keeps
//!   the existing element; [`SkipListSet::replace`] overwrites it instead.
//!
//! Elements are ordered by a [`Comparator`], which defaults to the [`PartialOrd`] and
//! [`PartialEq`] implementations of the element type. The [`ByKey`] comparator orders elements by
//! a projected key while still telling apart elements which are not `==`.
//!
//! # Time complexity
//!
//! | Operation                                   | Expected time       |
//! |---------------------------------------------|---------------------|
//! | `insert`, `remove`, `take`, `replace`       | `O(log n)`          |
//! | `contains`, `index_of`, `count`             | `O(log n + d)`      |
//! | `get`, `select`, indexing, `remove_at`      | `O(log n)`          |
//! | `len`, `is_empty`, `first`                  | `O(1)`              |
//! | `last`                                      | `O(log n)`          |
//! | iterating forwards, per element             | `O(1)`              |
//! | iterating backwards, per element            | `O(log n)`          |
//! | `verify`                                    | `O(n log n)`        |
//!
//! Here `d` is the number of elements order-equal to the searched key, which is at most `1` for a
//! set whose comparator is `==`-consistent. The bounds are in expectation over the random heights
//! of nodes; node heights are also capped at roughly `log2(n) + 2`, so a poor source of
//! randomness cannot build an unreasonably tall list.
//!
//! # Concurrency
//!
//! The collections are single-threaded values. They are `Send` and `Sync` whenever their elements,
//! comparator, and PRNG are, and mutation requires `&mut` access; sharing a list between threads
//! which mutate it requires external synchronization, such as a `Mutex`. Likewise, a list cannot
//! be mutated while an [`Iter`] or [`Cursor`] borrows it.
//!
//! # Cursors
//!
//! A [`Cursor`] implements [`Iterator`] and [`seekable_iterator::CursorIterator`]; import the
//! latter trait to call [`valid`], [`current`], and [`prev`].
//!
//! [`valid`]: seekable_iterator::CursorIterator::valid
//! [`current`]: seekable_iterator::CursorIterator::current
//! [`prev`]: seekable_iterator::CursorIterator::prev
//!
//! # Logging
//!
//! Changes to the height of a list are reported as `TRACE` events, and failed calls to `verify`
//! as `DEBUG` events, through [`tracing`]. No subscriber is installed by this crate.

mod interface;
mod default_comparator;
mod node_heights;
mod options;

mod engine;

mod multiset;
mod set;

pub mod error;
pub mod iter;


pub use self::{
    default_comparator::{ByKey, DefaultComparator},
    error::{OptionsError, OutOfRange, StructureError},
    interface::Comparator,
    iter::{Cursor, IntoIter, Iter},
    multiset::SkipList,
    node_heights::{LevelGenerator, MAX_HEIGHT, Prng32},
    options::SkiplistOptions,
    set::SkipListSet,
};
