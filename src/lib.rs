#![doc = include_str!("../README.md")]
#![cfg_attr(not(all(feature = "std", test)), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![cfg_attr(docsrs, allow(unused_attributes))]
#![deny(missing_docs)]
#![allow(clippy::type_complexity, rustdoc::bare_urls)]

#[cfg(not(feature = "std"))]
extern crate alloc as std;

#[cfg(feature = "std")]
extern crate std;

use core::cmp;

mod arena;
mod node;

mod error;
pub use error::Error;

mod options;
pub use options::Options;

/// An ordered set implementation based on skiplist.
pub mod set;
pub use set::{Cursor, IntoIter, Iter, Position, Range, SkipSet};

/// The highest level a node can be assigned. The head sentinel always owns
/// `MAX_LEVEL + 1` links.
pub const MAX_LEVEL: usize = 16;

/// The probability that a node assigned to level `k` is also promoted to `k + 1`.
pub const PROBABILITY: f64 = 0.5;

const MAX_HEIGHT: usize = MAX_LEVEL + 1;

/// Precompute the promotion thresholds so that only a single random number
/// needs to be generated per node. `PROBABILITIES[k]` is `u32::MAX * P^k`.
const PROBABILITIES: [u32; MAX_HEIGHT] = {
  let mut probabilities = [0; MAX_HEIGHT];
  let mut p = 1f64;

  let mut i = 0;
  while i < MAX_HEIGHT {
    probabilities[i] = ((u32::MAX as f64) * p) as u32;
    p *= PROBABILITY;
    i += 1;
  }

  probabilities
};

/// Draws a level in `0..=max_level` with `P(level >= k) = PROBABILITY^k`.
#[inline]
fn random_level<R: rand::RngCore>(rng: &mut R, max_level: usize) -> usize {
  let rnd = rng.next_u32();
  let mut level = 0;

  while level < max_level && rnd <= PROBABILITIES[level + 1] {
    level += 1;
  }
  level
}

/// Comparator is used to define the total order of the elements stored in a [`SkipSet`].
///
/// Implementations must be a strict weak ordering and must stay consistent for
/// the whole lifetime of the set. Two elements are considered equivalent (the same
/// key) when `compare` returns [`Ordering::Equal`](cmp::Ordering::Equal).
pub trait Comparator<T: ?Sized> {
  /// Compares two elements.
  fn compare(&self, a: &T, b: &T) -> cmp::Ordering;

  /// Returns `true` if `a` is strictly ordered before `b`.
  #[inline]
  fn less(&self, a: &T, b: &T) -> bool {
    self.compare(a, b) == cmp::Ordering::Less
  }

  /// Returns `true` if neither element is ordered before the other.
  #[inline]
  fn equivalent(&self, a: &T, b: &T) -> bool {
    self.compare(a, b) == cmp::Ordering::Equal
  }
}

/// Ascend is a comparator that orders elements by their natural [`Ord`] order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Ascend;

impl<T: ?Sized + Ord> Comparator<T> for Ascend {
  #[inline]
  fn compare(&self, a: &T, b: &T) -> cmp::Ordering {
    a.cmp(b)
  }
}

/// Descend is a comparator that orders elements by the reverse of their natural [`Ord`] order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Descend;

impl<T: ?Sized + Ord> Comparator<T> for Descend {
  #[inline]
  fn compare(&self, a: &T, b: &T) -> cmp::Ordering {
    b.cmp(a)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use rand::{rngs::SmallRng, SeedableRng};

  #[test]
  fn test_probabilities_halve() {
    assert_eq!(PROBABILITIES[0], u32::MAX);
    for k in 1..MAX_HEIGHT {
      assert!(PROBABILITIES[k] < PROBABILITIES[k - 1]);
      let expected = (u32::MAX >> k) as i64;
      assert!((PROBABILITIES[k] as i64 - expected).abs() <= 1, "level {k}");
    }
  }

  #[test]
  fn test_random_level_distribution() {
    const N: usize = 100_000;
    let mut rng = SmallRng::seed_from_u64(7);
    let mut at_least = [0usize; MAX_HEIGHT];
    for _ in 0..N {
      let level = random_level(&mut rng, MAX_LEVEL);
      assert!(level <= MAX_LEVEL);
      for slot in at_least.iter_mut().take(level + 1) {
        *slot += 1;
      }
    }

    assert_eq!(at_least[0], N);
    let p1 = at_least[1] as f64 / N as f64;
    let p2 = at_least[2] as f64 / N as f64;
    assert!((p1 - 0.5).abs() < 0.02, "P(level >= 1) = {p1}");
    assert!((p2 - 0.25).abs() < 0.02, "P(level >= 2) = {p2}");
  }

  #[test]
  fn test_random_level_capped() {
    let mut rng = SmallRng::seed_from_u64(11);
    for _ in 0..10_000 {
      assert_eq!(random_level(&mut rng, 0), 0);
      assert!(random_level(&mut rng, 3) <= 3);
    }
  }

  #[test]
  fn test_comparators() {
    assert!(Comparator::<i32>::less(&Ascend, &1, &2));
    assert!(!Comparator::<i32>::less(&Ascend, &2, &2));
    assert!(Comparator::<i32>::less(&Descend, &2, &1));
    assert!(Comparator::<str>::equivalent(&Ascend, "a", "a"));
    assert_eq!(
      Comparator::<[u8]>::compare(&Descend, b"a", b"b"),
      cmp::Ordering::Greater
    );
  }
}
