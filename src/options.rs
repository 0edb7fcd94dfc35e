use super::MAX_LEVEL;

/// Options for [`SkipSet`](crate::SkipSet).
#[viewit::viewit(vis_all = "pub(crate)", getters(skip), setters(skip))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Options {
  max_level: u8,
  seed: Option<u64>,
}

impl Default for Options {
  #[inline]
  fn default() -> Options {
    Options::new()
  }
}

impl Options {
  /// Creates a new set of options with the default values.
  #[inline]
  pub const fn new() -> Self {
    Self {
      max_level: MAX_LEVEL as u8,
      seed: None,
    }
  }

  /// Set the seed of the level generator.
  ///
  /// By default every set seeds its own generator from the operating system, so the
  /// shape of two sets holding the same elements is unrelated. With a seed, the
  /// sequence of levels assigned to inserted nodes is reproducible, which is useful
  /// for tests and benchmarks.
  ///
  /// Clones of a set never inherit the seed's sequence, they are always reseeded.
  ///
  /// ## Example
  ///
  /// ```rust
  /// use skipset::Options;
  ///
  /// let opts = Options::new().with_seed(42);
  /// assert_eq!(opts.seed(), Some(42));
  /// ```
  #[inline]
  pub const fn with_seed(mut self, seed: u64) -> Self {
    self.seed = Some(seed);
    self
  }

  /// Set the highest level a node can be assigned.
  ///
  /// Values above [`MAX_LEVEL`](crate::MAX_LEVEL) are clamped. A max level of `0`
  /// degrades the set into a sorted linked list.
  ///
  /// The default max level is [`MAX_LEVEL`](crate::MAX_LEVEL).
  ///
  /// ## Example
  ///
  /// ```rust
  /// use skipset::{Options, MAX_LEVEL};
  ///
  /// let opts = Options::new().with_max_level(8);
  /// assert_eq!(opts.max_level(), 8);
  ///
  /// let opts = Options::new().with_max_level(u8::MAX);
  /// assert_eq!(opts.max_level() as usize, MAX_LEVEL);
  /// ```
  #[inline]
  pub const fn with_max_level(mut self, max_level: u8) -> Self {
    self.max_level = if max_level as usize > MAX_LEVEL {
      MAX_LEVEL as u8
    } else {
      max_level
    };
    self
  }

  /// Returns the seed of the level generator, if any.
  #[inline]
  pub const fn seed(&self) -> Option<u64> {
    self.seed
  }

  /// Returns the highest level a node can be assigned.
  #[inline]
  pub const fn max_level(&self) -> u8 {
    self.max_level
  }
}
