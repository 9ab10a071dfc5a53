use std::collections::HashMap;

use wayline_core::Vec2;

use crate::config::AstarConfig;
use crate::heuristic::HeuristicCache;
use crate::pool::ScratchPool;
use crate::vertex::{Edge, Vertex, VertexId};

/// Default cost of an edge created by [`NavGraph::connect`].
pub const DEFAULT_EDGE_COST: f32 = 1.0;

// ---------------------------------------------------------------------------
// NavGraph
// ---------------------------------------------------------------------------

/// Owner of the navigation graph and of everything a search needs.
///
/// `NavGraph` holds the vertices (each with its outgoing edges), the pooled
/// scratch structures and the heuristic cache, so repeated searches incur no
/// allocations after warm-up. Mutations report failure with `false` instead
/// of panicking; searches live in the `astar` module.
///
/// Searches take `&mut self`. Share one graph between threads by wrapping
/// the whole value in a `Mutex`, or give each worker its own graph.
#[derive(Debug, Default)]
pub struct NavGraph {
    pub(crate) vertices: HashMap<VertexId, Vertex>,
    pub(crate) scratch: ScratchPool,
    pub(crate) heuristics: HeuristicCache,
    pub(crate) config: AstarConfig,
}

impl NavGraph {
    /// Create an empty graph with the default [`AstarConfig`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty graph with the given search configuration.
    pub fn with_config(config: AstarConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    #[inline]
    pub fn config(&self) -> &AstarConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: AstarConfig) {
        self.config = config;
    }

    // -----------------------------------------------------------------------
    // Vertices
    // -----------------------------------------------------------------------

    /// Insert a vertex. Returns `false` if `id` is already taken, in which
    /// case the existing vertex is left untouched.
    pub fn add_vertex(&mut self, id: VertexId, pos: Vec2) -> bool {
        if self.vertices.contains_key(&id) {
            log::trace!("add_vertex: id {id} already present");
            return false;
        }
        self.vertices.insert(id, Vertex::new(id, pos));
        true
    }

    /// Remove a vertex together with every edge that leads to it.
    pub fn remove_vertex(&mut self, id: VertexId) -> bool {
        if self.vertices.remove(&id).is_none() {
            log::trace!("remove_vertex: unknown id {id}");
            return false;
        }
        for v in self.vertices.values_mut() {
            v.remove_edges_to(id);
        }
        true
    }

    /// Move a vertex.
    ///
    /// Heuristic values already cached for this vertex are kept; call
    /// [`clear_pools`](Self::clear_pools) when positions change enough to
    /// matter.
    pub fn set_position(&mut self, id: VertexId, pos: Vec2) -> bool {
        match self.vertices.get_mut(&id) {
            Some(v) => {
                v.set_position(pos);
                true
            }
            None => false,
        }
    }

    /// Include or exclude a vertex from searches. Inactive vertices are never
    /// entered from a neighbour, but may still start a search.
    pub fn set_vertex_active(&mut self, id: VertexId, active: bool) -> bool {
        match self.vertices.get_mut(&id) {
            Some(v) => {
                v.set_active(active);
                true
            }
            None => false,
        }
    }

    #[inline]
    pub fn vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.vertices.get(&id)
    }

    #[inline]
    pub fn contains(&self, id: VertexId) -> bool {
        self.vertices.contains_key(&id)
    }

    /// Position of `id`, if the vertex exists.
    #[inline]
    pub fn try_get_position(&self, id: VertexId) -> Option<Vec2> {
        self.vertices.get(&id).map(Vertex::position)
    }

    /// Iterate over all vertices in unspecified order.
    pub fn vertices(&self) -> impl Iterator<Item = &Vertex> {
        self.vertices.values()
    }

    /// Number of vertices.
    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Total number of directed edges.
    pub fn edge_count(&self) -> usize {
        self.vertices.values().map(|v| v.edges().len()).sum()
    }

    /// Drop every vertex, pooled structure and cached heuristic value.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.clear_pools();
    }

    // -----------------------------------------------------------------------
    // Edges
    // -----------------------------------------------------------------------

    /// Connect `id` and `to` in both directions with the default cost.
    pub fn connect(&mut self, id: VertexId, to: VertexId) -> bool {
        self.connect_with(id, to, DEFAULT_EDGE_COST, true)
    }

    /// Add the edge `id -> to` with the given cost and, if `bidirectional`,
    /// the mirror edge `to -> id`.
    ///
    /// Fails if either endpoint is missing or `id -> to` already exists. An
    /// existing mirror edge is kept as is.
    pub fn connect_with(
        &mut self,
        id: VertexId,
        to: VertexId,
        cost: f32,
        bidirectional: bool,
    ) -> bool {
        if !self.contains(id) || !self.contains(to) {
            log::trace!("connect: missing endpoint in {id} -> {to}");
            return false;
        }
        if self.is_connected(id, to) {
            log::trace!("connect: edge {id} -> {to} already exists");
            return false;
        }
        if let Some(v) = self.vertices.get_mut(&id) {
            v.push_edge(Edge::new(to, cost));
        }
        if bidirectional && !self.is_connected(to, id) {
            if let Some(v) = self.vertices.get_mut(&to) {
                v.push_edge(Edge::new(id, cost));
            }
        }
        true
    }

    /// Remove the edges between `id` and `to`, in both directions.
    ///
    /// Succeeds whenever both vertices exist, even if they were not connected.
    pub fn disconnect(&mut self, id: VertexId, to: VertexId) -> bool {
        if !self.contains(id) || !self.contains(to) {
            return false;
        }
        if let Some(v) = self.vertices.get_mut(&id) {
            v.remove_edges_to(to);
        }
        if let Some(v) = self.vertices.get_mut(&to) {
            v.remove_edges_to(id);
        }
        true
    }

    /// Whether a direct edge `id -> to` exists (enabled or not).
    pub fn is_connected(&self, id: VertexId, to: VertexId) -> bool {
        self.vertices
            .get(&id)
            .is_some_and(|v| v.edge_to(to).is_some())
    }

    /// Enable or disable the edges between `from` and `to`, in both
    /// directions. Returns whether any edge was found.
    pub fn set_edge_enabled(&mut self, from: VertexId, to: VertexId, enabled: bool) -> bool {
        let mut found = false;
        for (a, b) in [(from, to), (to, from)] {
            if let Some(e) = self.vertices.get_mut(&a).and_then(|v| v.edge_to_mut(b)) {
                e.set_enabled(enabled);
                found = true;
            }
        }
        found
    }

    /// Enabled flag of the edge `from -> to`, or `None` if there is no edge.
    pub fn is_edge_enabled(&self, from: VertexId, to: VertexId) -> Option<bool> {
        self.vertices
            .get(&from)
            .and_then(|v| v.edge_to(to))
            .map(Edge::is_enabled)
    }

    // -----------------------------------------------------------------------
    // Caches
    // -----------------------------------------------------------------------

    /// Empty every scratch pool and the heuristic cache.
    pub fn clear_pools(&mut self) {
        self.scratch.clear();
        self.heuristics.clear();
    }

    #[inline]
    pub fn scratch(&self) -> &ScratchPool {
        &self.scratch
    }

    #[inline]
    pub fn heuristic_cache(&self) -> &HeuristicCache {
        &self.heuristics
    }
}

// Only vertices and config are persisted; pools and the heuristic cache
// start empty after deserialization.
#[cfg(feature = "serde")]
mod serde_impl {
    use super::*;
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Serialize)]
    struct GraphRef<'a> {
        config: &'a AstarConfig,
        vertices: Vec<&'a Vertex>,
    }

    #[derive(Deserialize)]
    struct GraphRepr {
        config: AstarConfig,
        vertices: Vec<Vertex>,
    }

    impl Serialize for NavGraph {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let mut vertices: Vec<&Vertex> = self.vertices.values().collect();
            vertices.sort_by_key(|v| v.id());
            GraphRef {
                config: &self.config,
                vertices,
            }
            .serialize(serializer)
        }
    }

    impl<'de> Deserialize<'de> for NavGraph {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            let repr = GraphRepr::deserialize(deserializer)?;
            let mut graph = NavGraph::with_config(repr.config);
            for v in repr.vertices {
                let id = v.id();
                if graph.vertices.insert(id, v).is_some() {
                    return Err(D::Error::custom(format!("duplicate vertex id {id}")));
                }
            }
            for v in graph.vertices.values() {
                let id = v.id();
                if !v.position().is_finite() {
                    return Err(D::Error::custom(format!(
                        "vertex {id} has non-finite position {}",
                        v.position()
                    )));
                }
                for (i, e) in v.edges().iter().enumerate() {
                    let to = e.to();
                    if !graph.vertices.contains_key(&to) {
                        return Err(D::Error::custom(format!(
                            "edge {id} -> {to} targets an unknown vertex"
                        )));
                    }
                    if !e.cost().is_finite() || e.cost() < 0.0 {
                        return Err(D::Error::custom(format!(
                            "edge {id} -> {to} has invalid cost {}",
                            e.cost()
                        )));
                    }
                    if v.edges()[..i].iter().any(|prev| prev.to() == to) {
                        return Err(D::Error::custom(format!(
                            "duplicate edge {id} -> {to}"
                        )));
                    }
                }
            }
            Ok(graph)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(n: VertexId) -> NavGraph {
        let mut g = NavGraph::new();
        for i in 0..n {
            assert!(g.add_vertex(i, Vec2::new(i as f32, 0.0)));
        }
        for i in 1..n {
            assert!(g.connect(i - 1, i));
        }
        g
    }

    #[test]
    fn duplicate_insert_rejected() {
        let mut g = NavGraph::new();
        assert!(g.add_vertex(1, Vec2::new(2.0, 3.0)));
        assert!(!g.add_vertex(1, Vec2::new(9.0, 9.0)));
        assert_eq!(g.try_get_position(1), Some(Vec2::new(2.0, 3.0)));
        assert_eq!(g.len(), 1);
    }

    #[test]
    fn remove_cascades_incoming_edges() {
        let mut g = line(3);
        assert!(g.connect_with(0, 2, 5.0, false));
        assert!(g.remove_vertex(2));
        assert!(!g.contains(2));
        assert!(!g.is_connected(0, 2));
        assert!(!g.is_connected(1, 2));
        assert!(g.vertices().all(|v| v.edges().iter().all(|e| e.to() != 2)));
        assert!(!g.remove_vertex(2));
    }

    #[test]
    fn connect_defaults_to_bidirectional_unit_cost() {
        let g = line(2);
        assert!(g.is_connected(0, 1));
        assert!(g.is_connected(1, 0));
        assert_eq!(g.vertex(0).unwrap().edge_to(1).unwrap().cost(), 1.0);
        assert_eq!(g.edge_count(), 2);
    }

    #[test]
    fn connect_one_way() {
        let mut g = NavGraph::new();
        g.add_vertex(0, Vec2::ZERO);
        g.add_vertex(1, Vec2::new(1.0, 0.0));
        assert!(g.connect_with(0, 1, 2.5, false));
        assert!(g.is_connected(0, 1));
        assert!(!g.is_connected(1, 0));
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn connect_rejects_duplicates_and_missing_endpoints() {
        let mut g = line(2);
        assert!(!g.connect(0, 1));
        assert!(!g.connect(0, 7));
        assert!(!g.connect(7, 0));
        assert_eq!(g.edge_count(), 2);
    }

    #[test]
    fn connect_keeps_existing_mirror_edge() {
        let mut g = NavGraph::new();
        g.add_vertex(0, Vec2::ZERO);
        g.add_vertex(1, Vec2::new(1.0, 0.0));
        assert!(g.connect_with(1, 0, 4.0, false));
        assert!(g.connect_with(0, 1, 2.0, true));
        assert_eq!(g.edge_count(), 2);
        assert_eq!(g.vertex(1).unwrap().edge_to(0).unwrap().cost(), 4.0);
    }

    #[test]
    fn disconnect_is_symmetric() {
        let mut g = NavGraph::new();
        g.add_vertex(0, Vec2::ZERO);
        g.add_vertex(1, Vec2::new(1.0, 0.0));
        g.connect_with(0, 1, 1.0, false);
        g.connect_with(1, 0, 3.0, false);
        assert!(g.disconnect(0, 1));
        assert!(!g.is_connected(0, 1));
        assert!(!g.is_connected(1, 0));
        // Both endpoints exist, so tearing down nothing still succeeds.
        assert!(g.disconnect(1, 0));
        assert!(!g.disconnect(0, 5));
    }

    #[test]
    fn edge_toggle_is_symmetric() {
        let mut g = NavGraph::new();
        g.add_vertex(0, Vec2::ZERO);
        g.add_vertex(1, Vec2::new(1.0, 0.0));
        g.add_vertex(2, Vec2::new(2.0, 0.0));
        g.connect_with(0, 1, 1.0, false);

        assert!(g.set_edge_enabled(1, 0, false));
        assert_eq!(g.is_edge_enabled(0, 1), Some(false));
        assert_eq!(g.is_edge_enabled(1, 0), None);

        g.connect_with(1, 0, 1.0, false);
        assert!(g.set_edge_enabled(0, 1, true));
        assert_eq!(g.is_edge_enabled(0, 1), Some(true));
        assert_eq!(g.is_edge_enabled(1, 0), Some(true));
        assert!(g.set_edge_enabled(0, 1, false));
        assert_eq!(g.is_edge_enabled(1, 0), Some(false));

        assert!(!g.set_edge_enabled(0, 2, false));
    }

    #[test]
    fn vertex_flags_and_position() {
        let mut g = line(2);
        assert!(g.set_vertex_active(1, false));
        assert!(!g.vertex(1).unwrap().is_active());
        assert!(!g.set_vertex_active(9, false));

        assert!(g.set_position(1, Vec2::new(5.0, 5.0)));
        assert_eq!(g.try_get_position(1), Some(Vec2::new(5.0, 5.0)));
        assert!(!g.set_position(9, Vec2::ZERO));
        assert_eq!(g.try_get_position(9), None);
    }

    #[test]
    fn clear_empties_everything() {
        let mut g = line(4);
        g.clear();
        assert!(g.is_empty());
        assert_eq!(g.edge_count(), 0);
        assert!(g.heuristic_cache().is_empty());
    }

    #[test]
    fn with_config_is_kept() {
        let cfg = AstarConfig::new().with_heuristic_weight(1.0);
        let mut g = NavGraph::with_config(cfg);
        assert_eq!(g.config().heuristic_weight, 1.0);
        g.set_config(AstarConfig::default());
        assert_eq!(g.config().heuristic_weight, 1.2);
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;
    use crate::Heuristic;

    #[test]
    fn graph_round_trip() {
        let mut g = NavGraph::new();
        g.add_vertex(0, Vec2::new(0.0, 0.0));
        g.add_vertex(1, Vec2::new(1.0, 2.0));
        g.add_vertex(2, Vec2::new(3.0, 1.0));
        g.connect_with(0, 1, 2.0, true);
        g.connect_with(1, 2, 0.5, false);
        g.set_edge_enabled(0, 1, false);
        g.set_vertex_active(2, false);

        let json = serde_json::to_string(&g).unwrap();
        let back: NavGraph = serde_json::from_str(&json).unwrap();
        assert_eq!(back.len(), 3);
        assert_eq!(back.edge_count(), 3);
        assert_eq!(back.vertex(1), g.vertex(1));
        assert_eq!(back.is_edge_enabled(1, 0), Some(false));
        assert!(!back.vertex(2).unwrap().is_active());
        assert!(back.heuristic_cache().is_empty());
    }

    #[test]
    fn dangling_edge_is_rejected() {
        let json = r#"{"config":{"heuristic_weight":1.2,"max_expansions":null},
            "vertices":[{"id":0,"pos":{"x":0.0,"y":0.0},"active":true,
            "edges":[{"to":4,"cost":1.0,"enabled":true}]}]}"#;
        assert!(serde_json::from_str::<NavGraph>(json).is_err());
    }

    fn two_vertices_with_edges(edges: &str) -> String {
        format!(
            r#"{{"config":{{"heuristic_weight":1.2,"max_expansions":null}},
            "vertices":[
            {{"id":0,"pos":{{"x":0.0,"y":0.0}},"active":true,"edges":[{edges}]}},
            {{"id":1,"pos":{{"x":1.0,"y":0.0}},"active":true,"edges":[]}}]}}"#
        )
    }

    #[test]
    fn duplicate_edge_is_rejected() {
        let edge = r#"{"to":1,"cost":1.0,"enabled":true}"#;
        let json = two_vertices_with_edges(&format!("{edge},{edge}"));
        let err = serde_json::from_str::<NavGraph>(&json).unwrap_err();
        assert!(err.to_string().contains("duplicate edge 0 -> 1"));

        // A single edge loads, and disabling it makes the pair untraversable.
        let mut g: NavGraph = serde_json::from_str(&two_vertices_with_edges(edge)).unwrap();
        assert!(g.set_edge_enabled(0, 1, false));
        assert!(g.find_path(0, 1, Heuristic::Euclidean).is_none());
    }

    #[test]
    fn negative_edge_cost_is_rejected() {
        let json = two_vertices_with_edges(r#"{"to":1,"cost":-2.0,"enabled":true}"#);
        let err = serde_json::from_str::<NavGraph>(&json).unwrap_err();
        assert!(err.to_string().contains("invalid cost"));
    }

    #[test]
    fn non_finite_position_is_rejected() {
        let json = r#"{"config":{"heuristic_weight":1.2,"max_expansions":null},
            "vertices":[{"id":0,"pos":{"x":1e39,"y":0.0},"active":true,"edges":[]}]}"#;
        assert!(serde_json::from_str::<NavGraph>(json).is_err());
    }
}
