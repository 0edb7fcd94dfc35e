use super::MAX_HEIGHT;

/// An index into the node arena.
///
/// Two reserved values exist: [`NodePtr::NULL`] terminates a chain and
/// [`NodePtr::HEAD`] addresses the head sentinel, which lives outside the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct NodePtr(u32);

impl NodePtr {
  pub(crate) const NULL: Self = Self(u32::MAX);
  pub(crate) const HEAD: Self = Self(u32::MAX - 1);

  /// The largest index the arena may hand out.
  pub(crate) const MAX_INDEX: usize = (u32::MAX - 2) as usize;

  #[inline]
  pub(crate) const fn new(idx: usize) -> Self {
    assert!(idx <= Self::MAX_INDEX, "skipset arena exhausted");
    Self(idx as u32)
  }

  #[inline]
  pub(crate) const fn is_null(&self) -> bool {
    self.0 == Self::NULL.0
  }

  #[inline]
  pub(crate) const fn is_head(&self) -> bool {
    self.0 == Self::HEAD.0
  }

  #[inline]
  pub(crate) const fn index(&self) -> usize {
    self.0 as usize
  }
}

/// The forward links of a node, one per level. Only `0..=level` are used.
pub(crate) type Tower = [NodePtr; MAX_HEIGHT];

pub(crate) const EMPTY_TOWER: Tower = [NodePtr::NULL; MAX_HEIGHT];

#[derive(Debug)]
pub(crate) struct Node<T> {
  pub(crate) value: T,
  pub(crate) level: u8,
  pub(crate) tower: Tower,
}

impl<T> Node<T> {
  #[inline]
  pub(crate) const fn new(value: T, level: u8, tower: Tower) -> Self {
    Self {
      value,
      level,
      tower,
    }
  }

  #[inline]
  pub(crate) const fn next(&self, level: usize) -> NodePtr {
    self.tower[level]
  }
}
