use core::mem;
use std::vec::Vec;

use crate::node::{Node, NodePtr};

#[derive(Debug)]
enum Slot<T> {
  Occupied(Node<T>),
  Vacant { next_free: NodePtr },
}

#[derive(Debug)]
struct Entry<T> {
  /// Bumped every time the slot is vacated, so stale positions can be detected.
  generation: u32,
  slot: Slot<T>,
}

/// A slab of skiplist nodes addressed by [`NodePtr`].
///
/// Vacated slots are threaded into a free list and reused by later allocations.
#[derive(Debug)]
pub(crate) struct Arena<T> {
  entries: Vec<Entry<T>>,
  free: NodePtr,
  len: usize,
}

impl<T> Default for Arena<T> {
  #[inline]
  fn default() -> Self {
    Self::new()
  }
}

impl<T> Arena<T> {
  #[inline]
  pub(crate) const fn new() -> Self {
    Self {
      entries: Vec::new(),
      free: NodePtr::NULL,
      len: 0,
    }
  }

  /// Returns the number of live nodes.
  #[inline]
  pub(crate) const fn len(&self) -> usize {
    self.len
  }

  /// Returns the number of slots, live or vacant.
  #[inline]
  pub(crate) fn capacity(&self) -> usize {
    self.entries.len()
  }

  pub(crate) fn alloc(&mut self, node: Node<T>) -> NodePtr {
    self.len += 1;

    if self.free.is_null() {
      let ptr = NodePtr::new(self.entries.len());
      self.entries.push(Entry {
        generation: 0,
        slot: Slot::Occupied(node),
      });
      return ptr;
    }

    let ptr = self.free;
    let entry = &mut self.entries[ptr.index()];
    match mem::replace(&mut entry.slot, Slot::Occupied(node)) {
      Slot::Vacant { next_free } => self.free = next_free,
      Slot::Occupied(_) => panic!("free list points at an occupied slot"),
    }
    ptr
  }

  /// Removes the node from the arena and hands it back to the caller.
  pub(crate) fn dealloc(&mut self, ptr: NodePtr) -> Node<T> {
    let entry = &mut self.entries[ptr.index()];
    let slot = mem::replace(
      &mut entry.slot,
      Slot::Vacant {
        next_free: self.free,
      },
    );

    match slot {
      Slot::Occupied(node) => {
        entry.generation = entry.generation.wrapping_add(1);
        self.free = ptr;
        self.len -= 1;
        node
      }
      Slot::Vacant { .. } => panic!("double free of skipset node {}", ptr.index()),
    }
  }

  /// Drops every live node. Slots are kept (vacant) so that generations keep
  /// growing and positions taken before the reset stay invalid.
  pub(crate) fn clear(&mut self) {
    self.free = NodePtr::NULL;
    for (idx, entry) in self.entries.iter_mut().enumerate().rev() {
      if let Slot::Occupied(_) = entry.slot {
        entry.generation = entry.generation.wrapping_add(1);
      }
      entry.slot = Slot::Vacant {
        next_free: self.free,
      };
      self.free = NodePtr::new(idx);
    }
    self.len = 0;
  }

  /// ## Panics
  /// - If `ptr` does not address a live node.
  #[inline]
  pub(crate) fn node(&self, ptr: NodePtr) -> &Node<T> {
    match &self.entries[ptr.index()].slot {
      Slot::Occupied(node) => node,
      Slot::Vacant { .. } => panic!("dangling skipset node {}", ptr.index()),
    }
  }

  /// ## Panics
  /// - If `ptr` does not address a live node.
  #[inline]
  pub(crate) fn node_mut(&mut self, ptr: NodePtr) -> &mut Node<T> {
    match &mut self.entries[ptr.index()].slot {
      Slot::Occupied(node) => node,
      Slot::Vacant { .. } => panic!("dangling skipset node {}", ptr.index()),
    }
  }

  /// Returns the node only if the slot still holds the same generation.
  #[inline]
  pub(crate) fn get(&self, ptr: NodePtr, generation: u32) -> Option<&Node<T>> {
    match self.entries.get(ptr.index()) {
      Some(Entry {
        generation: g,
        slot: Slot::Occupied(node),
      }) if *g == generation => Some(node),
      _ => None,
    }
  }

  #[inline]
  pub(crate) fn generation(&self, ptr: NodePtr) -> u32 {
    self.entries[ptr.index()].generation
  }
}
