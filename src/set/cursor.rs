use core::{fmt, ptr};

use super::*;

/// A position in a [`SkipSet`], either at an element or past the last one.
///
/// Cursors are forward only and borrow the set, so the set cannot be mutated while
/// a cursor is alive. Use [`Cursor::position`] to keep a handle across mutations.
pub struct Cursor<'a, T, C> {
  pub(super) set: &'a SkipSet<T, C>,
  pub(super) ptr: NodePtr,
}

impl<T, C> Clone for Cursor<'_, T, C> {
  #[inline]
  fn clone(&self) -> Self {
    *self
  }
}

impl<T, C> Copy for Cursor<'_, T, C> {}

impl<'a, T, C> Cursor<'a, T, C> {
  #[inline]
  pub(super) const fn new(set: &'a SkipSet<T, C>, ptr: NodePtr) -> Self {
    Self { set, ptr }
  }

  /// Returns `true` if the cursor is positioned past the last element.
  #[inline]
  pub const fn is_end(&self) -> bool {
    self.ptr.is_null()
  }

  /// Returns the element under the cursor, or `None` at the end.
  #[inline]
  pub fn get(&self) -> Option<&'a T> {
    if self.is_end() {
      return None;
    }
    Some(&self.set.arena.node(self.ptr).value)
  }

  /// Returns the element under the cursor.
  ///
  /// ## Errors
  ///
  /// - Returns `Err(Error::OutOfBounds)` if the cursor is at the end.
  #[inline]
  pub fn try_get(&self) -> Result<&'a T, Error> {
    self.get().ok_or(Error::OutOfBounds)
  }

  /// Advances the cursor to the next element. Advancing the end cursor is a no-op.
  #[inline]
  pub fn move_next(&mut self) {
    if !self.is_end() {
      self.ptr = self.set.arena.node(self.ptr).next(0);
    }
  }

  /// Returns a cursor at the next element, leaving `self` in place.
  #[inline]
  pub fn next_cursor(&self) -> Self {
    let mut next = *self;
    next.move_next();
    next
  }

  /// Returns a detached handle to the element under the cursor, or `None` at the end.
  ///
  /// The handle stays valid while the element remains in the set, regardless of
  /// other inserts and removals.
  #[inline]
  pub fn position(&self) -> Option<Position> {
    if self.is_end() {
      return None;
    }
    Some(Position {
      ptr: self.ptr,
      generation: self.set.arena.generation(self.ptr),
    })
  }
}

impl<T, C> PartialEq for Cursor<'_, T, C> {
  /// Cursors are equal when they address the same node of the same set.
  #[inline]
  fn eq(&self, other: &Self) -> bool {
    ptr::eq(self.set, other.set) && self.ptr == other.ptr
  }
}

impl<T, C> Eq for Cursor<'_, T, C> {}

impl<T: fmt::Debug, C> fmt::Debug for Cursor<'_, T, C> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self.get() {
      Some(value) => f.debug_tuple("Cursor").field(value).finish(),
      None => f.write_str("Cursor(end)"),
    }
  }
}

/// A detached handle to an element of a [`SkipSet`].
///
/// Unlike a [`Cursor`], a position does not borrow the set. It is resolved with
/// [`SkipSet::cursor_at`] or [`SkipSet::get_at`], which fail with
/// [`Error::Invalidated`] once the element has been removed. Resolving a position
/// against a set other than the one it was taken from is a logic error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
  pub(super) ptr: NodePtr,
  pub(super) generation: u32,
}
