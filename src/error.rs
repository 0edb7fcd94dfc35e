/// Error type for the skipset crate.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Error {
  /// Indicates that a cursor positioned past the last element was dereferenced.
  #[error("skipset cursor out of range")]
  OutOfBounds,

  /// Indicates that a [`Position`](crate::Position) refers to an element which
  /// has been removed from the set since the position was taken.
  #[error("position refers to an element that has been removed")]
  Invalidated,
}
