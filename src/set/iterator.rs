use core::iter::FusedIterator;

use super::*;

/// An iterator over the elements of a [`SkipSet`] in ascending order.
pub struct Iter<'a, T, C> {
  cur: Cursor<'a, T, C>,
  remaining: usize,
}

impl<T, C> Clone for Iter<'_, T, C> {
  #[inline]
  fn clone(&self) -> Self {
    Self {
      cur: self.cur,
      remaining: self.remaining,
    }
  }
}

impl<'a, T, C> Iter<'a, T, C> {
  #[inline]
  pub(super) fn new(set: &'a SkipSet<T, C>) -> Self {
    Self {
      cur: set.begin(),
      remaining: set.len(),
    }
  }

  /// Returns the cursor the iterator will yield next.
  #[inline]
  pub const fn cursor(&self) -> &Cursor<'a, T, C> {
    &self.cur
  }
}

impl<'a, T, C> Iterator for Iter<'a, T, C> {
  type Item = &'a T;

  #[inline]
  fn next(&mut self) -> Option<Self::Item> {
    let value = self.cur.get()?;
    self.cur.move_next();
    self.remaining -= 1;
    Some(value)
  }

  #[inline]
  fn size_hint(&self) -> (usize, Option<usize>) {
    (self.remaining, Some(self.remaining))
  }
}

impl<T, C> ExactSizeIterator for Iter<'_, T, C> {}

impl<T, C> FusedIterator for Iter<'_, T, C> {}

impl<'a, T, C> IntoIterator for &'a SkipSet<T, C> {
  type Item = &'a T;
  type IntoIter = Iter<'a, T, C>;

  #[inline]
  fn into_iter(self) -> Self::IntoIter {
    self.iter()
  }
}

/// An iterator over a sub-range of the elements of a [`SkipSet`], in ascending order.
///
/// Created by [`SkipSet::range`].
pub struct Range<'a, T, C, R> {
  cur: Cursor<'a, T, C>,
  range: R,
}

impl<T, C, R: Clone> Clone for Range<'_, T, C, R> {
  #[inline]
  fn clone(&self) -> Self {
    Self {
      cur: self.cur,
      range: self.range.clone(),
    }
  }
}

impl<'a, T, C, R> Range<'a, T, C, R> {
  #[inline]
  pub(super) const fn new(set: &'a SkipSet<T, C>, start: NodePtr, range: R) -> Self {
    Self {
      cur: Cursor::new(set, start),
      range,
    }
  }

  /// Returns the bounds of the iterator.
  #[inline]
  pub const fn bounds(&self) -> &R {
    &self.range
  }
}

impl<'a, T, C, R> Iterator for Range<'a, T, C, R>
where
  C: Comparator<T>,
  R: RangeBounds<T>,
{
  type Item = &'a T;

  fn next(&mut self) -> Option<Self::Item> {
    let value = self.cur.get()?;
    let set = self.cur.set;
    let cmp = &set.cmp;
    let in_range = match self.range.end_bound() {
      Bound::Included(end) => !cmp.less(end, value),
      Bound::Excluded(end) => cmp.less(value, end),
      Bound::Unbounded => true,
    };

    if !in_range {
      self.cur = set.end();
      return None;
    }

    self.cur.move_next();
    Some(value)
  }
}

impl<T, C, R> FusedIterator for Range<'_, T, C, R>
where
  C: Comparator<T>,
  R: RangeBounds<T>,
{
}

/// An owning iterator over the elements of a [`SkipSet`] in ascending order.
pub struct IntoIter<T, C> {
  set: SkipSet<T, C>,
}

impl<T, C> Iterator for IntoIter<T, C> {
  type Item = T;

  #[inline]
  fn next(&mut self) -> Option<Self::Item> {
    self.set.pop_first()
  }

  #[inline]
  fn size_hint(&self) -> (usize, Option<usize>) {
    (self.set.len(), Some(self.set.len()))
  }
}

impl<T, C> ExactSizeIterator for IntoIter<T, C> {}

impl<T, C> FusedIterator for IntoIter<T, C> {}

impl<T, C> IntoIterator for SkipSet<T, C> {
  type Item = T;
  type IntoIter = IntoIter<T, C>;

  #[inline]
  fn into_iter(self) -> Self::IntoIter {
    IntoIter { set: self }
  }
}
