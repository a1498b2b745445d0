use crate::{error::OptionsError, node_heights::MAX_HEIGHT};


/// Settings controlling how tall the towers of a skiplist may grow.
///
/// Every setting has a reasonable default; most users only need [`SkiplistOptions::seed`], if
/// anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SkiplistOptions {
    /// The greatest height a node may have. Must be in `1..=MAX_HEIGHT`.
    ///
    /// A max height of `1` turns the skiplist into a sorted linked list, where every operation
    /// takes linear time. Regardless of this setting, node heights are also capped at roughly
    /// `log2(len) + 2`.
    pub max_height:       usize,
    /// A new node gains each additional level with probability `1 / branching_factor`.
    /// Must be at least `2`.
    ///
    /// `2` is the classic choice. `4` uses fewer links per node (and is what Google's LevelDB
    /// uses), at the cost of somewhat longer searches.
    pub branching_factor: u32,
    /// Seed for the default PRNG, [`oorandom::Rand32`].
    pub seed:             u64,
}

impl SkiplistOptions {
    pub const DEFAULT_MAX_HEIGHT:       usize = MAX_HEIGHT;
    pub const DEFAULT_BRANCHING_FACTOR: u32   = 2;
    pub const DEFAULT_SEED:             u64   = 0x5EED_5EED_5EED_5EED;

    /// Check that the options describe a usable level distribution.
    pub const fn validate(&self) -> Result<(), OptionsError> {
        if self.max_height == 0 || self.max_height > MAX_HEIGHT {
            Err(OptionsError::MaxHeight(self.max_height))
        } else if self.branching_factor < 2 {
            Err(OptionsError::BranchingFactor(self.branching_factor))
        } else {
            Ok(())
        }
    }
}

impl Default for SkiplistOptions {
    #[inline]
    fn default() -> Self {
        Self {
            max_height:       Self::DEFAULT_MAX_HEIGHT,
            branching_factor: Self::DEFAULT_BRANCHING_FACTOR,
            seed:             Self::DEFAULT_SEED,
        }
    }
}
