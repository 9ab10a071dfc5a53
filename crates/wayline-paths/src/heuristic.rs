//! Distance estimates used to guide the search, and their cache.

use std::collections::HashMap;

use wayline_core::Vec2;

use crate::vertex::{Vertex, VertexId};

/// Euclidean (L2) distance between two positions.
#[inline]
pub fn euclidean(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

/// Manhattan (L1) distance between two positions.
#[inline]
pub fn manhattan(a: Vec2, b: Vec2) -> f32 {
    let d = a.abs_diff(b);
    d.x + d.y
}

/// Chebyshev (L∞) distance between two positions.
#[inline]
pub fn chebyshev(a: Vec2, b: Vec2) -> f32 {
    let d = a.abs_diff(b);
    d.x.max(d.y)
}

/// Which distance estimate the search uses.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Heuristic {
    /// Straight-line distance.
    #[default]
    Euclidean,
    /// Sum of absolute coordinate differences.
    Manhattan,
    /// Largest absolute coordinate difference (Chebyshev distance).
    Diagonal,
}

impl Heuristic {
    /// Every heuristic kind, in declaration order.
    pub const ALL: [Heuristic; 3] = [Self::Euclidean, Self::Manhattan, Self::Diagonal];

    /// Estimate the distance from `a` to `b`.
    #[inline]
    pub fn estimate(self, a: Vec2, b: Vec2) -> f32 {
        match self {
            Self::Euclidean => euclidean(a, b),
            Self::Manhattan => manhattan(a, b),
            Self::Diagonal => chebyshev(a, b),
        }
    }
}

/// Memoized heuristic values keyed by the ordered `(from, to)` id pair.
///
/// Entries are never invalidated by graph changes: moving a vertex or
/// switching the heuristic kind keeps returning the first value computed for
/// a pair until [`clear`](Self::clear) is called.
#[derive(Debug, Default)]
pub struct HeuristicCache {
    values: HashMap<(VertexId, VertexId), f32>,
}

impl HeuristicCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Estimated distance from `a` to `b`, computed once per ordered pair.
    pub fn evaluate(&mut self, a: &Vertex, b: &Vertex, kind: Heuristic) -> f32 {
        *self
            .values
            .entry((a.id(), b.id()))
            .or_insert_with(|| kind.estimate(a.position(), b.position()))
    }

    /// The cached value for `(from, to)`, if one has been computed.
    pub fn get(&self, from: VertexId, to: VertexId) -> Option<f32> {
        self.values.get(&(from, to)).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_formulas() {
        let a = Vec2::new(1.0, 1.0);
        let b = Vec2::new(4.0, 5.0);
        assert_eq!(euclidean(a, b), 5.0);
        assert_eq!(manhattan(a, b), 7.0);
        assert_eq!(chebyshev(a, b), 4.0);
    }

    #[test]
    fn heuristic_dispatch() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(-3.0, 4.0);
        assert_eq!(Heuristic::Euclidean.estimate(a, b), 5.0);
        assert_eq!(Heuristic::Manhattan.estimate(a, b), 7.0);
        assert_eq!(Heuristic::Diagonal.estimate(a, b), 4.0);
        assert_eq!(Heuristic::default(), Heuristic::Euclidean);
    }

    #[test]
    fn estimates_are_ordered() {
        // Chebyshev <= Euclidean <= Manhattan for any pair.
        let a = Vec2::new(2.0, -1.0);
        let b = Vec2::new(-5.0, 6.5);
        let d = chebyshev(a, b);
        let e = euclidean(a, b);
        let m = manhattan(a, b);
        assert!(d <= e && e <= m);
    }

    #[test]
    fn cache_populates_lazily_per_ordered_pair() {
        let a = Vertex::new(1, Vec2::new(0.0, 0.0));
        let b = Vertex::new(2, Vec2::new(3.0, 4.0));
        let mut cache = HeuristicCache::new();
        assert!(cache.is_empty());

        assert_eq!(cache.evaluate(&a, &b, Heuristic::Euclidean), 5.0);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(1, 2), Some(5.0));
        assert_eq!(cache.get(2, 1), None);

        assert_eq!(cache.evaluate(&b, &a, Heuristic::Euclidean), 5.0);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn cache_keeps_first_value() {
        let a = Vertex::new(1, Vec2::new(0.0, 0.0));
        let mut b = Vertex::new(2, Vec2::new(3.0, 4.0));
        let mut cache = HeuristicCache::new();
        let first = cache.evaluate(&a, &b, Heuristic::Euclidean);

        b.set_position(Vec2::new(30.0, 40.0));
        assert_eq!(cache.evaluate(&a, &b, Heuristic::Euclidean), first);
        // The kind is not part of the key either.
        assert_eq!(cache.evaluate(&a, &b, Heuristic::Manhattan), first);

        cache.clear();
        assert_eq!(cache.evaluate(&a, &b, Heuristic::Euclidean), 50.0);
    }
}
