//! Weighted A* pathfinding over mutable navigation graphs.
//!
//! [`NavGraph`] owns a set of [`Vertex`]es connected by directed, weighted
//! [`Edge`]s and answers single-source, single-goal path queries:
//!
//! - **A\*** search with a choice of [`Heuristic`] ([`NavGraph::find_path`])
//! - Dynamic edge costs through a [`CostModifier`] ([`NavGraph::find_path_with`])
//! - Runtime mutation: vertices and edges can be added, removed, disabled
//!   or deactivated between queries
//!
//! The graph owns and reuses its search scratch structures ([`ScratchPool`])
//! and memoizes heuristic values ([`HeuristicCache`]), so repeated queries
//! incur no allocations after warm-up.
//!
//! # Weighted search
//!
//! Discovered vertices are scored `g + h * 1.2` by default (see
//! [`AstarConfig::heuristic_weight`]). This converges faster than canonical
//! A* but only guarantees a path within 1.2x of the optimum.
//!
//! # Stale heuristics
//!
//! Cached heuristic values are keyed by the ordered pair of vertex ids only.
//! Moving a vertex or switching heuristic kind does not refresh them; call
//! [`NavGraph::clear_pools`] after such changes.

mod astar;
mod config;
mod graph;
mod heuristic;
mod pool;
mod traits;
mod vertex;

pub use astar::PathResult;
pub use config::{AstarConfig, DEFAULT_HEURISTIC_WEIGHT};
pub use graph::{DEFAULT_EDGE_COST, NavGraph};
pub use heuristic::{Heuristic, HeuristicCache, chebyshev, euclidean, manhattan};
pub use pool::{Pool, Pooled, Reusable, ScratchPool};
pub use traits::{CostModifier, Unmodified};
pub use vertex::{Edge, Vertex, VertexId};
