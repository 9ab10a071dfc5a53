//! Free-list pools for search scratch structures.
//!
//! Every search borrows its open set, visited set, score maps and path
//! buffer from a [`ScratchPool`] and hands them back cleared, so repeated
//! queries stop allocating once the pools have warmed up.

use std::collections::{BinaryHeap, HashMap, HashSet};
use std::hash::BuildHasher;

use crate::astar::OpenEntry;
use crate::vertex::VertexId;

/// A container that can be emptied in place and reused.
pub trait Reusable: Default {
    /// Remove all contents, keeping allocated capacity.
    fn reset(&mut self);
}

impl<T> Reusable for Vec<T> {
    fn reset(&mut self) {
        self.clear();
    }
}

impl<K, V, S: BuildHasher + Default> Reusable for HashMap<K, V, S> {
    fn reset(&mut self) {
        self.clear();
    }
}

impl<T, S: BuildHasher + Default> Reusable for HashSet<T, S> {
    fn reset(&mut self) {
        self.clear();
    }
}

impl<T: Ord> Reusable for BinaryHeap<T> {
    fn reset(&mut self) {
        self.clear();
    }
}

/// Stack of released instances of one structure type.
#[derive(Debug)]
pub struct Pool<T> {
    free: Vec<T>,
}

impl<T> Default for Pool<T> {
    fn default() -> Self {
        Self { free: Vec::new() }
    }
}

impl<T: Reusable> Pool<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take a previously released instance, or build a fresh one.
    pub fn acquire(&mut self) -> T {
        self.free.pop().unwrap_or_default()
    }

    /// Clear `value` and keep it for the next [`acquire`](Self::acquire).
    pub fn release(&mut self, mut value: T) {
        value.reset();
        self.free.push(value);
    }

    /// Number of instances waiting to be reused.
    pub fn available(&self) -> usize {
        self.free.len()
    }

    /// Drop every pooled instance.
    pub fn clear(&mut self) {
        self.free.clear();
    }
}

/// Maps a scratch structure type to its pool inside a [`ScratchPool`].
pub trait Pooled: Reusable + Sized {
    fn pool(scratch: &ScratchPool) -> &Pool<Self>;
    fn pool_mut(scratch: &mut ScratchPool) -> &mut Pool<Self>;
}

/// One pool per scratch structure used by the A* search.
#[derive(Debug, Default)]
pub struct ScratchPool {
    paths: Pool<Vec<VertexId>>,
    came_from: Pool<HashMap<VertexId, VertexId>>,
    g_scores: Pool<HashMap<VertexId, f32>>,
    visited: Pool<HashSet<VertexId>>,
    open: Pool<BinaryHeap<OpenEntry>>,
}

impl ScratchPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Borrow a cleared `T`, reusing a released one when available.
    #[inline]
    pub fn acquire<T: Pooled>(&mut self) -> T {
        T::pool_mut(self).acquire()
    }

    /// Return `value` to its pool after clearing it.
    #[inline]
    pub fn release<T: Pooled>(&mut self, value: T) {
        T::pool_mut(self).release(value);
    }

    /// Number of released `T` instances ready for reuse.
    #[inline]
    pub fn available<T: Pooled>(&self) -> usize {
        T::pool(self).available()
    }

    /// Empty every pool.
    pub fn clear(&mut self) {
        self.paths.clear();
        self.came_from.clear();
        self.g_scores.clear();
        self.visited.clear();
        self.open.clear();
    }
}

macro_rules! pooled {
    ($ty:ty, $field:ident) => {
        impl Pooled for $ty {
            #[inline]
            fn pool(scratch: &ScratchPool) -> &Pool<Self> {
                &scratch.$field
            }
            #[inline]
            fn pool_mut(scratch: &mut ScratchPool) -> &mut Pool<Self> {
                &mut scratch.$field
            }
        }
    };
}

pooled!(Vec<VertexId>, paths);
pooled!(HashMap<VertexId, VertexId>, came_from);
pooled!(HashMap<VertexId, f32>, g_scores);
pooled!(HashSet<VertexId>, visited);
pooled!(BinaryHeap<OpenEntry>, open);
