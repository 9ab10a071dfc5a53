use wayline_core::Vec2;

/// Identifier of a vertex, unique within a [`NavGraph`](crate::NavGraph).
pub type VertexId = i32;

/// A directed, weighted connection to a target vertex.
///
/// The cost is fixed at construction; only the enabled flag changes
/// afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Edge {
    to: VertexId,
    cost: f32,
    enabled: bool,
}

impl Edge {
    pub(crate) fn new(to: VertexId, cost: f32) -> Self {
        debug_assert!(cost >= 0.0, "edge cost must be non-negative, got {cost}");
        Self {
            to,
            cost,
            enabled: true,
        }
    }

    /// Id of the vertex this edge leads to.
    #[inline]
    pub fn to(&self) -> VertexId {
        self.to
    }

    /// Base traversal cost, before any cost modifier is applied.
    #[inline]
    pub fn cost(&self) -> f32 {
        self.cost
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub(crate) fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }
}

/// A point in the navigation graph together with its outgoing edges.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vertex {
    id: VertexId,
    pos: Vec2,
    active: bool,
    edges: Vec<Edge>,
}

impl Vertex {
    pub(crate) fn new(id: VertexId, pos: Vec2) -> Self {
        Self {
            id,
            pos,
            active: true,
            edges: Vec::new(),
        }
    }

    #[inline]
    pub fn id(&self) -> VertexId {
        self.id
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.pos
    }

    /// Whether the vertex may be entered during a search.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Outgoing edges, in insertion order.
    #[inline]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// The outgoing edge leading to `to`, if any.
    pub fn edge_to(&self, to: VertexId) -> Option<&Edge> {
        self.edges.iter().find(|e| e.to == to)
    }

    pub(crate) fn edge_to_mut(&mut self, to: VertexId) -> Option<&mut Edge> {
        self.edges.iter_mut().find(|e| e.to == to)
    }

    pub(crate) fn set_position(&mut self, pos: Vec2) {
        self.pos = pos;
    }

    pub(crate) fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    pub(crate) fn push_edge(&mut self, edge: Edge) {
        self.edges.push(edge);
    }

    /// Drop every edge leading to `to`. Returns whether anything was removed.
    pub(crate) fn remove_edges_to(&mut self, to: VertexId) -> bool {
        let before = self.edges.len();
        self.edges.retain(|e| e.to != to);
        self.edges.len() != before
    }
}
