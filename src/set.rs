use core::{
  fmt,
  hash::{Hash, Hasher},
  mem,
  ops::{Bound, RangeBounds},
};

use rand::{rngs::SmallRng, SeedableRng};

use super::{
  arena::Arena,
  node::{Node, NodePtr, Tower, EMPTY_TOWER},
  random_level, Ascend, Comparator, Error, Options, MAX_HEIGHT,
};

mod cursor;
pub use cursor::*;
mod iterator;
pub use iterator::*;


/// An ordered set implementation based on skiplist.
///
/// Elements are kept sorted under the comparator `C` and are unique: inserting an
/// element equivalent to one already present keeps the first one. Lookups, inserts
/// and removals take expected `O(log n)` time.
///
/// Nodes live in an arena owned by the set and are linked by index, so the set is
/// cheap to move and never shares nodes with another set. The set is not internally
/// synchronized; wrap it in a lock for concurrent use.
///
/// ## Example
///
/// ```rust
/// use skipset::SkipSet;
///
/// let mut set = SkipSet::new();
/// for x in [5, 3, 9, 1, 7, 4] {
///   set.insert(x);
/// }
///
/// assert_eq!(set.iter().copied().collect::<Vec<_>>(), [1, 3, 4, 5, 7, 9]);
/// assert_eq!(set.lower_bound(&6).get(), Some(&7));
/// assert!(set.upper_bound(&9).is_end());
/// ```
pub struct SkipSet<T, C = Ascend> {
  arena: Arena<T>,
  head: Tower,
  /// Highest level with at least one node. Only level 0 is active on an empty set.
  level: usize,
  rng: SmallRng,
  opts: Options,
  cmp: C,
}

// --------------------------------Public Methods--------------------------------
impl<T> SkipSet<T> {
  /// Creates an empty set ordered by [`Ascend`].
  #[inline]
  pub fn new() -> Self {
    Self::with_options_and_comparator(Options::new(), Ascend)
  }

  /// Creates an empty set ordered by [`Ascend`] with the given options.
  ///
  /// ## Example
  ///
  /// ```rust
  /// use skipset::{Options, SkipSet};
  ///
  /// let mut set = SkipSet::with_options(Options::new().with_seed(7));
  /// set.insert("hello");
  /// assert!(set.contains(&"hello"));
  /// ```
  #[inline]
  pub fn with_options(opts: Options) -> Self {
    Self::with_options_and_comparator(opts, Ascend)
  }
}

impl<T> Default for SkipSet<T> {
  #[inline]
  fn default() -> Self {
    Self::new()
  }
}

impl<T, C> SkipSet<T, C> {
  /// Creates an empty set ordered by the given comparator.
  ///
  /// ## Example
  ///
  /// ```rust
  /// use skipset::{Descend, SkipSet};
  ///
  /// let mut set = SkipSet::with_comparator(Descend);
  /// set.extend([1, 4, 2, 8]);
  /// assert_eq!(set.into_iter().collect::<Vec<_>>(), [8, 4, 2, 1]);
  /// ```
  #[inline]
  pub fn with_comparator(cmp: C) -> Self {
    Self::with_options_and_comparator(Options::new(), cmp)
  }

  /// Creates an empty set with the given options and comparator.
  pub fn with_options_and_comparator(opts: Options, cmp: C) -> Self {
    let rng = match opts.seed() {
      Some(seed) => SmallRng::seed_from_u64(seed),
      None => SmallRng::from_os_rng(),
    };
    Self::with_rng(opts, cmp, rng)
  }

  #[inline]
  fn with_rng(opts: Options, cmp: C, rng: SmallRng) -> Self {
    Self {
      arena: Arena::new(),
      head: EMPTY_TOWER,
      level: 0,
      rng,
      opts,
      cmp,
    }
  }

  /// Returns the number of elements in the set.
  #[inline]
  pub const fn len(&self) -> usize {
    self.arena.len()
  }

  /// Returns `true` if the set contains no elements.
  #[inline]
  pub const fn is_empty(&self) -> bool {
    self.len() == 0
  }

  /// Returns the number of node slots held by the arena, live or free.
  ///
  /// Slots freed by removals are reused by later inserts; [`clear`](SkipSet::clear)
  /// keeps the slots around as well.
  #[inline]
  pub fn capacity(&self) -> usize {
    self.arena.capacity()
  }

  /// Returns the highest level currently holding at least one element.
  ///
  /// An empty set reports level `0`.
  #[inline]
  pub const fn level(&self) -> usize {
    self.level
  }

  /// Returns the comparator used to order elements.
  #[inline]
  pub const fn comparator(&self) -> &C {
    &self.cmp
  }

  /// Returns the options the set was created with.
  #[inline]
  pub const fn options(&self) -> &Options {
    &self.opts
  }

  /// Returns a cursor at the smallest element, or the end cursor if the set is empty.
  #[inline]
  pub fn begin(&self) -> Cursor<'_, T, C> {
    Cursor::new(self, self.head[0])
  }

  /// Returns the cursor positioned past the last element.
  #[inline]
  pub fn end(&self) -> Cursor<'_, T, C> {
    Cursor::new(self, NodePtr::NULL)
  }

  /// Returns the smallest element.
  #[inline]
  pub fn first(&self) -> Option<&T> {
    self.begin().get()
  }

  /// Returns the largest element.
  ///
  /// The list is singly linked, so this walks down the towers in `O(log n)`.
  pub fn last(&self) -> Option<&T> {
    let prev = self.walk(|_| true, None);
    if prev.is_head() {
      return None;
    }
    Some(&self.arena.node(prev).value)
  }

  /// Returns an iterator over the elements in ascending order.
  #[inline]
  pub fn iter(&self) -> Iter<'_, T, C> {
    Iter::new(self)
  }

  /// Returns a cursor at the element addressed by `pos`.
  ///
  /// ## Errors
  ///
  /// - Returns `Err(Error::Invalidated)` if the element has been removed since the
  ///   position was taken, including by [`clear`](SkipSet::clear).
  pub fn cursor_at(&self, pos: Position) -> Result<Cursor<'_, T, C>, Error> {
    self
      .arena
      .get(pos.ptr, pos.generation)
      .map(|_| Cursor::new(self, pos.ptr))
      .ok_or(Error::Invalidated)
  }

  /// Returns the element addressed by `pos`.
  ///
  /// ## Errors
  ///
  /// - Returns `Err(Error::Invalidated)` if the element has been removed since the
  ///   position was taken.
  #[inline]
  pub fn get_at(&self, pos: Position) -> Result<&T, Error> {
    self
      .arena
      .get(pos.ptr, pos.generation)
      .map(|node| &node.value)
      .ok_or(Error::Invalidated)
  }

  /// Removes and returns the smallest element.
  pub fn pop_first(&mut self) -> Option<T> {
    let first = self.head[0];
    if first.is_null() {
      return None;
    }

    for i in 0..=self.level {
      if self.head[i] != first {
        break;
      }
      self.head[i] = self.arena.node(first).next(i);
    }

    Some(self.release(first))
  }

  /// Removes every element. The set keeps its comparator, options and generator.
  pub fn clear(&mut self) {
    self.arena.clear();
    self.head = EMPTY_TOWER;
    self.level = 0;

    #[cfg(feature = "tracing")]
    tracing::trace!("skipset cleared");
  }

  /// Moves every element out into a new set, leaving `self` empty and reusable.
  ///
  /// The returned set keeps the options and comparator; `self` gets a freshly
  /// seeded generator.
  ///
  /// ## Example
  ///
  /// ```rust
  /// use skipset::SkipSet;
  ///
  /// let mut a: SkipSet<_> = (0..10).collect();
  /// let b = a.take();
  /// assert!(a.is_empty());
  /// assert_eq!(b.len(), 10);
  ///
  /// a.insert(3);
  /// assert_eq!(a.len(), 1);
  /// ```
  pub fn take(&mut self) -> Self
  where
    C: Clone,
  {
    let empty = Self::with_rng(self.opts, self.cmp.clone(), SmallRng::from_os_rng());
    mem::replace(self, empty)
  }

  #[inline]
  fn next(&self, ptr: NodePtr, level: usize) -> NodePtr {
    if ptr.is_head() {
      self.head[level]
    } else {
      self.arena.node(ptr).next(level)
    }
  }

  #[inline]
  fn set_next(&mut self, ptr: NodePtr, level: usize, next: NodePtr) {
    if ptr.is_head() {
      self.head[level] = next;
    } else {
      self.arena.node_mut(ptr).tower[level] = next;
    }
  }

  /// The search primitive: from the top active level down to level 0, moves forward
  /// while `advance` accepts the next element. Records the last node visited on
  /// every level into `update` and returns the one reached on level 0, which is
  /// [`NodePtr::HEAD`] if no step was taken.
  fn walk(&self, mut advance: impl FnMut(&T) -> bool, mut update: Option<&mut Tower>) -> NodePtr {
    let mut prev = NodePtr::HEAD;
    for i in (0..=self.level).rev() {
      loop {
        let next = self.next(prev, i);
        if next.is_null() || !advance(&self.arena.node(next).value) {
          break;
        }
        prev = next;
      }

      if let Some(update) = update.as_mut() {
        update[i] = prev;
      }
    }
    prev
  }

  /// Frees a node which has already been unlinked from every level and lowers the
  /// top level while it is empty.
  fn release(&mut self, ptr: NodePtr) -> T {
    let node = self.arena.dealloc(ptr);
    self.shrink();

    #[cfg(feature = "tracing")]
    tracing::trace!(level = self.level, len = self.len(), "skipset node released");

    node.value
  }

  #[inline]
  fn shrink(&mut self) {
    while self.level > 0 && self.head[self.level].is_null() {
      self.level -= 1;
    }
  }
}

impl<T, C: Comparator<T>> SkipSet<T, C> {
  /// Inserts an element.
  ///
  /// Returns a cursor at the element equivalent to `value` and whether the
  /// insertion took place. If an equivalent element is already present the set is
  /// left untouched, `value` is dropped and the cursor points at the existing element.
  ///
  /// ## Example
  ///
  /// ```rust
  /// use skipset::SkipSet;
  ///
  /// let mut set = SkipSet::new();
  /// let (cur, inserted) = set.insert(10);
  /// assert!(inserted);
  /// assert_eq!(cur.get(), Some(&10));
  ///
  /// let (_, inserted) = set.insert(10);
  /// assert!(!inserted);
  /// assert_eq!(set.len(), 1);
  /// ```
  pub fn insert(&mut self, value: T) -> (Cursor<'_, T, C>, bool) {
    let mut update = [NodePtr::HEAD; MAX_HEIGHT];
    let prev = self.walk(|v| self.cmp.less(v, &value), Some(&mut update));
    let found = self.next(prev, 0);
    if self.is_equivalent(found, &value) {
      return (Cursor::new(self, found), false);
    }

    let level = random_level(&mut self.rng, self.opts.max_level() as usize);
    if level > self.level {
      for slot in update.iter_mut().take(level + 1).skip(self.level + 1) {
        *slot = NodePtr::HEAD;
      }
      self.level = level;

      #[cfg(feature = "tracing")]
      tracing::trace!(level, "skipset level raised");
    }

    let mut tower = EMPTY_TOWER;
    for (i, link) in tower.iter_mut().enumerate().take(level + 1) {
      *link = self.next(update[i], i);
    }

    let ptr = self.arena.alloc(Node::new(value, level as u8, tower));
    for (i, prev) in update.iter().enumerate().take(level + 1) {
      self.set_next(*prev, i, ptr);
    }

    #[cfg(feature = "tracing")]
    tracing::trace!(level, len = self.len(), "skipset node inserted");

    (Cursor::new(self, ptr), true)
  }

  /// Removes the element equivalent to `value`, returning how many elements were
  /// removed (`0` or `1`).
  #[inline]
  pub fn erase(&mut self, value: &T) -> usize {
    usize::from(self.remove(value).is_some())
  }

  /// Removes the element equivalent to `value` and returns it.
  pub fn remove(&mut self, value: &T) -> Option<T> {
    let mut update = [NodePtr::HEAD; MAX_HEIGHT];
    let prev = self.walk(|v| self.cmp.less(v, value), Some(&mut update));
    let target = self.next(prev, 0);
    if !self.is_equivalent(target, value) {
      return None;
    }

    let top = self.arena.node(target).level as usize;
    for (i, prev) in update.iter().enumerate().take(top + 1) {
      if self.next(*prev, i) != target {
        break;
      }
      let next = self.arena.node(target).next(i);
      self.set_next(*prev, i, next);
    }

    Some(self.release(target))
  }

  /// Returns a cursor at the element equivalent to `value`, or the end cursor.
  pub fn find(&self, value: &T) -> Cursor<'_, T, C> {
    let cur = self.lower_bound(value);
    if self.is_equivalent(cur.ptr, value) {
      cur
    } else {
      self.end()
    }
  }

  /// Returns the element equivalent to `value`.
  #[inline]
  pub fn get(&self, value: &T) -> Option<&T> {
    self.find(value).get()
  }

  /// Returns a cursor at the first element not ordered before `value`, or the end cursor.
  pub fn lower_bound(&self, value: &T) -> Cursor<'_, T, C> {
    let prev = self.walk(|v| self.cmp.less(v, value), None);
    Cursor::new(self, self.next(prev, 0))
  }

  /// Returns a cursor at the first element ordered after `value`, or the end cursor.
  pub fn upper_bound(&self, value: &T) -> Cursor<'_, T, C> {
    let prev = self.walk(|v| !self.cmp.less(value, v), None);
    Cursor::new(self, self.next(prev, 0))
  }

  /// Returns the number of elements equivalent to `value` (`0` or `1`).
  #[inline]
  pub fn count(&self, value: &T) -> usize {
    usize::from(self.contains(value))
  }

  /// Returns `true` if the set contains an element equivalent to `value`.
  #[inline]
  pub fn contains(&self, value: &T) -> bool {
    !self.find(value).is_end()
  }

  /// Returns an iterator over the elements within `range`, in ascending order.
  ///
  /// ## Panics
  ///
  /// - If the start of the range is ordered after its end.
  /// - If start and end are equivalent and both excluded.
  ///
  /// ## Example
  ///
  /// ```rust
  /// use skipset::SkipSet;
  ///
  /// let set: SkipSet<_> = (0..10).map(|i| i * 2).collect();
  /// let got: Vec<_> = set.range(5..=12).copied().collect();
  /// assert_eq!(got, [6, 8, 10, 12]);
  /// ```
  pub fn range<R: RangeBounds<T>>(&self, range: R) -> Range<'_, T, C, R> {
    if let (Bound::Included(s) | Bound::Excluded(s), Bound::Included(e) | Bound::Excluded(e)) =
      (range.start_bound(), range.end_bound())
    {
      if self.cmp.less(e, s) {
        panic!("range start is greater than range end in SkipSet");
      }
      if matches!(
        (range.start_bound(), range.end_bound()),
        (Bound::Excluded(_), Bound::Excluded(_))
      ) && self.cmp.equivalent(s, e)
      {
        panic!("range start and end are equal and excluded in SkipSet");
      }
    }

    let start = match range.start_bound() {
      Bound::Included(s) => self.lower_bound(s).ptr,
      Bound::Excluded(s) => self.upper_bound(s).ptr,
      Bound::Unbounded => self.head[0],
    };
    Range::new(self, start, range)
  }

  #[inline]
  fn is_equivalent(&self, ptr: NodePtr, value: &T) -> bool {
    !ptr.is_null() && !ptr.is_head() && self.cmp.equivalent(&self.arena.node(ptr).value, value)
  }
}

impl<T: Clone, C: Comparator<T> + Clone> Clone for SkipSet<T, C> {
  /// Rebuilds the set element by element. The copy draws its own node levels.
  fn clone(&self) -> Self {
    let mut set = Self::with_rng(self.opts, self.cmp.clone(), SmallRng::from_os_rng());
    set.extend(self.iter().cloned());
    set
  }

  fn clone_from(&mut self, source: &Self) {
    self.clear();
    self.opts = source.opts;
    self.cmp = source.cmp.clone();
    self.extend(source.iter().cloned());
  }
}

impl<T: PartialEq, C> PartialEq for SkipSet<T, C> {
  /// Compares the in-order sequences with `T`'s own equality; the comparator is not consulted.
  fn eq(&self, other: &Self) -> bool {
    self.len() == other.len() && self.iter().eq(other.iter())
  }
}

impl<T: Eq, C> Eq for SkipSet<T, C> {}

impl<T: Hash, C> Hash for SkipSet<T, C> {
  fn hash<H: Hasher>(&self, state: &mut H) {
    self.len().hash(state);
    for value in self.iter() {
      value.hash(state);
    }
  }
}

impl<T: fmt::Debug, C> fmt::Debug for SkipSet<T, C> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_set().entries(self.iter()).finish()
  }
}

impl<T, C: Comparator<T>> Extend<T> for SkipSet<T, C> {
  #[inline]
  fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
    for value in iter {
      self.insert(value);
    }
  }
}

impl<'a, T: Copy + 'a, C: Comparator<T>> Extend<&'a T> for SkipSet<T, C> {
  #[inline]
  fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
    self.extend(iter.into_iter().copied());
  }
}

impl<T, C: Comparator<T> + Default> FromIterator<T> for SkipSet<T, C> {
  fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
    let mut set = Self::with_comparator(C::default());
    set.extend(iter);
    set
  }
}

impl<T: Ord, const N: usize> From<[T; N]> for SkipSet<T> {
  #[inline]
  fn from(values: [T; N]) -> Self {
    values.into_iter().collect()
  }
}

#[cfg(test)]
impl<T, C: Comparator<T>> SkipSet<T, C> {
  /// Walks every level and asserts the structural invariants of the skiplist.
  pub(crate) fn check_invariants(&self) {
    let mut level0 = 0;
    let mut ptr = self.head[0];
    while !ptr.is_null() {
      level0 += 1;
      ptr = self.arena.node(ptr).next(0);
    }
    assert_eq!(level0, self.len(), "level 0 length disagrees with len");

    for (i, head) in self.head.iter().enumerate() {
      if i > self.level {
        assert!(head.is_null(), "level {i} above the top level is populated");
        continue;
      }
      if i > 0 && i == self.level {
        assert!(!head.is_null(), "top level {i} is empty");
      }

      let mut expected = 0;
      let mut ptr = self.head[0];
      while !ptr.is_null() {
        let node = self.arena.node(ptr);
        if node.level as usize >= i {
          expected += 1;
        }
        ptr = node.next(0);
      }

      let mut seen = 0;
      let mut prev: Option<&T> = None;
      let mut ptr = *head;
      while !ptr.is_null() {
        let node = self.arena.node(ptr);
        assert!(node.level as usize >= i, "node linked above its own level");
        if let Some(prev) = prev {
          assert!(self.cmp.less(prev, &node.value), "level {i} is not strictly increasing");
        }
        prev = Some(&node.value);
        seen += 1;
        ptr = node.next(i);
      }
      assert_eq!(seen, expected, "level {i} is not a sublist of level 0");
    }
  }
}
