use crate::vertex::Vertex;

/// Scales the base cost of an edge while the search relaxes it.
///
/// Implemented for every `Fn(&Vertex, &Vertex) -> f32` closure, so terrain or
/// condition-aware costs can be passed inline:
///
/// ```
/// # use wayline_core::Vec2;
/// # use wayline_paths::{Heuristic, NavGraph, Vertex};
/// let mut graph = NavGraph::new();
/// graph.add_vertex(0, Vec2::new(0.0, 0.0));
/// graph.add_vertex(1, Vec2::new(1.0, 0.0));
/// graph.connect(0, 1);
/// let mud = |_: &Vertex, to: &Vertex| -> f32 { if to.id() == 1 { 3.0 } else { 1.0 } };
/// let path = graph.find_path_with(0, 1, Heuristic::Euclidean, &mud).unwrap();
/// assert_eq!(path.cost(), 3.0);
/// ```
pub trait CostModifier {
    /// Multiplier applied to the cost of the edge `from -> to`.
    /// Must be non-negative.
    fn cost_factor(&self, from: &Vertex, to: &Vertex) -> f32;
}

impl<F> CostModifier for F
where
    F: Fn(&Vertex, &Vertex) -> f32,
{
    #[inline]
    fn cost_factor(&self, from: &Vertex, to: &Vertex) -> f32 {
        self(from, to)
    }
}

/// The identity modifier: every edge keeps its base cost.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Unmodified;

impl CostModifier for Unmodified {
    #[inline]
    fn cost_factor(&self, _from: &Vertex, _to: &Vertex) -> f32 {
        1.0
    }
}
