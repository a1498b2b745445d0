use thiserror::Error;

use crate::node_heights::MAX_HEIGHT;


/// A rank-indexed access used an index outside of `0..len`.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[error("index {index} is out of range for a skiplist of length {len}")]
pub struct OutOfRange {
    pub index: usize,
    pub len:   usize,
}

/// A [`SkiplistOptions`] value could not be used to build a skiplist.
///
/// [`SkiplistOptions`]: crate::SkiplistOptions
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionsError {
    #[error("max height {0} is outside of the supported range 1..={max}", max = MAX_HEIGHT)]
    MaxHeight(usize),
    #[error("branching factor {0} is too small; nodes must be promoted with probability below 1")]
    BranchingFactor(u32),
}

/// An inconsistency found by a skiplist's `verify` method.
///
/// None of these can occur through the public API unless the comparator violates its contract
/// (which can only produce [`StructureError::OutOfOrder`]).
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StructureError {
    #[error("counted {counted} elements on the base level, but the recorded length is {recorded}")]
    LengthMismatch {
        counted:  usize,
        recorded: usize,
    },
    #[error("the element at index {index} sorts strictly before its predecessor")]
    OutOfOrder {
        index: usize,
    },
    #[error("a link on level {level} should reach rank {expected}, but its span reaches {found}")]
    SpanMismatch {
        level:    usize,
        expected: usize,
        found:    usize,
    },
    #[error("level {level} links {linked} nodes, but {tall_enough} nodes have towers that tall")]
    TowerGap {
        level:       usize,
        linked:      usize,
        tall_enough: usize,
    },
    #[error("the node at index {index} has height {height}, above the list's height {list_height}")]
    TowerTooTall {
        index:       usize,
        height:      usize,
        list_height: usize,
    },
    #[error("the node at index {index} has an empty tower")]
    EmptyTower {
        index: usize,
    },
    #[error("the list's arena holds {arena} nodes, but {linked} are linked on the base level")]
    LeakedNode {
        arena:  usize,
        linked: usize,
    },
}
