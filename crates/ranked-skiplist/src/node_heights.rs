use oorandom::Rand32;

use crate::{error::OptionsError, options::SkiplistOptions};


/// The maximum height of any node in a skiplist from this crate.
///
/// A skiplist's effective maximum is further limited by [`SkiplistOptions::max_height`] and by
/// the number of elements it holds; see [`height_ceiling`].
pub const MAX_HEIGHT: usize = 32;


/// A simple PRNG trait, used for generating random heights for nodes in a skiplist.
///
/// Implement this for a scripted or constant source to make node heights deterministic in tests.
pub trait Prng32 {
    /// Produces a random `u32` in the range `[0, u32::MAX]`.
    ///
    /// (See [`oorandom::Rand32::rand_u32`]; this function is the same interface.)
    #[must_use]
    fn rand_u32(&mut self) -> u32;
}

impl Prng32 for Rand32 {
    #[inline]
    fn rand_u32(&mut self) -> u32 {
        // Inherent impls take priority over traits, so this is the inherent method
        // of `Rand32` a.k.a. `Self`
        Self::rand_u32(self)
    }
}

impl<P: ?Sized + Prng32> Prng32 for Box<P> {
    #[inline]
    fn rand_u32(&mut self) -> u32 {
        P::rand_u32(self)
    }
}

/// The greatest height a new node may receive while the list holds `len` elements (before the
/// new node is added), ignoring the configured maximum.
///
/// This is one more than the bit length of `len`, which keeps the head from growing far past
/// `log2(len)` even with an unlucky PRNG.
#[inline]
#[must_use]
#[expect(clippy::as_conversions, reason = "a bit count of a `usize` fits in a `usize`")]
pub(crate) const fn height_ceiling(len: usize) -> usize {
    (usize::BITS - len.leading_zeros()) as usize + 1
}

/// Chooses the heights of newly inserted nodes.
///
/// Heights follow a geometric distribution truncated at a ceiling: starting from `1`, each further
/// level is granted independently with probability `1 / branching_factor`.
#[derive(Debug, Clone)]
pub struct LevelGenerator<P = Rand32> {
    prng:             P,
    max_height:       usize,
    branching_factor: u32,
}

impl LevelGenerator<Rand32> {
    /// A generator with the default options and the provided seed.
    #[inline]
    #[must_use]
    pub fn new_seeded(seed: u64) -> Self {
        Self::with_prng(Rand32::new(seed))
    }

    /// Build a generator from validated options, seeding a [`Rand32`] with `options.seed`.
    pub fn from_options(options: &SkiplistOptions) -> Result<Self, OptionsError> {
        Self::from_options_and_prng(options, Rand32::new(options.seed))
    }
}

impl Default for LevelGenerator<Rand32> {
    #[inline]
    fn default() -> Self {
        Self::new_seeded(SkiplistOptions::DEFAULT_SEED)
    }
}

impl<P: Prng32> LevelGenerator<P> {
    /// A generator with the default maximum height and branching factor, drawing from `prng`.
    #[inline]
    #[must_use]
    pub const fn with_prng(prng: P) -> Self {
        Self {
            prng,
            max_height:       SkiplistOptions::DEFAULT_MAX_HEIGHT,
            branching_factor: SkiplistOptions::DEFAULT_BRANCHING_FACTOR,
        }
    }

    /// Build a generator from validated options, drawing from `prng`.
    ///
    /// `options.seed` is ignored.
    pub fn from_options_and_prng(options: &SkiplistOptions, prng: P) -> Result<Self, OptionsError> {
        options.validate()?;

        Ok(Self {
            prng,
            max_height:       options.max_height,
            branching_factor: options.branching_factor,
        })
    }

    #[inline]
    #[must_use]
    pub const fn max_height(&self) -> usize {
        self.max_height
    }

    #[inline]
    #[must_use]
    pub const fn branching_factor(&self) -> u32 {
        self.branching_factor
    }

    /// Return a random value in `1..=min(max_height, height_ceiling(len))`, in a geometric
    /// distribution (higher values are exponentially less likely).
    ///
    /// The top of that range is somewhat more likely than in an unbounded geometric distribution,
    /// since what would be higher values are capped to it. No entropy is drawn once the cap has
    /// been reached.
    pub(crate) fn random_height(&mut self, len: usize) -> usize {
        let cap = self.max_height.min(height_ceiling(len));

        let mut height = 1;
        while height < cap && self.prng.rand_u32() % self.branching_factor == 0 {
            height += 1;
        }
        height
    }
}
