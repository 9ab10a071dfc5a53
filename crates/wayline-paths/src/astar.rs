use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

use wayline_core::Vec2;

use crate::NavGraph;
use crate::heuristic::Heuristic;
use crate::traits::{CostModifier, Unmodified};
use crate::vertex::VertexId;

/// A path found by [`NavGraph::find_path`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathResult {
    ids: Vec<VertexId>,
    cost: f32,
}

impl PathResult {
    /// Vertex ids from start to goal, both included.
    #[inline]
    pub fn ids(&self) -> &[VertexId] {
        &self.ids
    }

    /// Sum of the traversed edge costs, cost modifiers applied.
    #[inline]
    pub fn cost(&self) -> f32 {
        self.cost
    }

    /// Number of vertices on the path.
    #[inline]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether the path holds no vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// First vertex of the path.
    pub fn start(&self) -> Option<VertexId> {
        self.ids.first().copied()
    }

    /// Last vertex of the path.
    pub fn goal(&self) -> Option<VertexId> {
        self.ids.last().copied()
    }

    /// Consume the result, keeping only the vertex ids.
    pub fn into_ids(self) -> Vec<VertexId> {
        self.ids
    }
}

/// Open-set entry, ordered so that `BinaryHeap` (a max-heap) pops the
/// smallest `f` first. Equal scores pop in insertion order.
#[derive(Debug, Clone, Copy)]
pub struct OpenEntry {
    id: VertexId,
    f: f32,
    seq: u64,
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for OpenEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OpenEntry {}

enum Outcome {
    Found,
    Exhausted,
    Aborted,
}

impl NavGraph {
    /// Find a path from `start` to `goal` using weighted A*.
    ///
    /// Returns `None` if either id is unknown, if the goal cannot be reached
    /// through enabled edges and active vertices, or if the configured
    /// expansion budget runs out.
    pub fn find_path(
        &mut self,
        start: VertexId,
        goal: VertexId,
        heuristic: Heuristic,
    ) -> Option<PathResult> {
        self.find_path_with(start, goal, heuristic, &Unmodified)
    }

    /// Like [`find_path`](Self::find_path), scaling every edge cost by
    /// `modifier.cost_factor(from, to)`.
    ///
    /// The heuristic is multiplied by the configured weight (1.2 by default),
    /// so the returned path may cost up to that factor more than the optimum.
    pub fn find_path_with<M: CostModifier + ?Sized>(
        &mut self,
        start: VertexId,
        goal: VertexId,
        heuristic: Heuristic,
        modifier: &M,
    ) -> Option<PathResult> {
        let Self {
            vertices,
            scratch,
            heuristics,
            config,
        } = self;
        let vertices = &*vertices;

        let (Some(start_v), Some(goal_v)) = (vertices.get(&start), vertices.get(&goal)) else {
            log::debug!("find_path: unknown endpoint in {start} -> {goal}");
            return None;
        };

        let mut open: BinaryHeap<OpenEntry> = scratch.acquire();
        let mut visited: HashSet<VertexId> = scratch.acquire();
        let mut came_from: HashMap<VertexId, VertexId> = scratch.acquire();
        let mut g_scores: HashMap<VertexId, f32> = scratch.acquire();

        let mut seq: u64 = 0;
        let mut expanded: usize = 0;
        g_scores.insert(start, 0.0);
        open.push(OpenEntry {
            id: start,
            f: heuristics.evaluate(start_v, goal_v, heuristic),
            seq,
        });

        let outcome = 'search: loop {
            let Some(current) = open.pop() else {
                break 'search Outcome::Exhausted;
            };

            // Skip stale entries.
            if !visited.insert(current.id) {
                continue;
            }

            if current.id == goal {
                break 'search Outcome::Found;
            }

            if config.max_expansions.is_some_and(|max| expanded >= max) {
                break 'search Outcome::Aborted;
            }
            expanded += 1;

            let Some(cv) = vertices.get(&current.id) else {
                continue;
            };
            let current_g = g_scores.get(&current.id).copied().unwrap_or(0.0);

            for edge in cv.edges() {
                if !edge.is_enabled() {
                    continue;
                }
                let Some(nv) = vertices.get(&edge.to()) else {
                    continue;
                };
                if !nv.is_active() {
                    continue;
                }

                let tentative = current_g + edge.cost() * modifier.cost_factor(cv, nv);
                if g_scores.get(&nv.id()).is_some_and(|&g| tentative >= g) {
                    continue;
                }

                came_from.insert(nv.id(), cv.id());
                g_scores.insert(nv.id(), tentative);
                let h = heuristics.evaluate(nv, goal_v, heuristic);
                seq += 1;
                open.push(OpenEntry {
                    id: nv.id(),
                    f: tentative + h * config.heuristic_weight,
                    seq,
                });
            }
        };

        let result = match outcome {
            Outcome::Found => {
                let mut path: Vec<VertexId> = scratch.acquire();
                let mut id = goal;
                path.push(id);
                // Predecessor links never form a cycle with non-negative
                // costs; the bound only caps a broken modifier.
                for _ in 0..vertices.len() {
                    if id == start {
                        break;
                    }
                    let Some(&prev) = came_from.get(&id) else {
                        break;
                    };
                    path.push(prev);
                    id = prev;
                }
                let found = PathResult {
                    ids: path.iter().rev().copied().collect(),
                    cost: g_scores.get(&goal).copied().unwrap_or(0.0),
                };
                scratch.release(path);
                log::debug!(
                    "find_path: {start} -> {goal} in {} steps, cost {}, {expanded} expanded",
                    found.len(),
                    found.cost
                );
                Some(found)
            }
            Outcome::Exhausted => {
                log::debug!("find_path: no path {start} -> {goal} ({expanded} expanded)");
                None
            }
            Outcome::Aborted => {
                log::debug!("find_path: {start} -> {goal} aborted after {expanded} expansions");
                None
            }
        };

        scratch.release(open);
        scratch.release(visited);
        scratch.release(came_from);
        scratch.release(g_scores);

        result
    }

    /// Vertex ids of the path from `start` to `goal`.
    pub fn shortest_path_ids(
        &mut self,
        start: VertexId,
        goal: VertexId,
        heuristic: Heuristic,
    ) -> Option<Vec<VertexId>> {
        self.shortest_path_ids_with(start, goal, heuristic, &Unmodified)
    }

    pub fn shortest_path_ids_with<M: CostModifier + ?Sized>(
        &mut self,
        start: VertexId,
        goal: VertexId,
        heuristic: Heuristic,
        modifier: &M,
    ) -> Option<Vec<VertexId>> {
        self.find_path_with(start, goal, heuristic, modifier)
            .map(PathResult::into_ids)
    }

    /// Positions of the vertices on the path from `start` to `goal`.
    pub fn shortest_path_positions(
        &mut self,
        start: VertexId,
        goal: VertexId,
        heuristic: Heuristic,
    ) -> Option<Vec<Vec2>> {
        self.shortest_path_positions_with(start, goal, heuristic, &Unmodified)
    }

    pub fn shortest_path_positions_with<M: CostModifier + ?Sized>(
        &mut self,
        start: VertexId,
        goal: VertexId,
        heuristic: Heuristic,
        modifier: &M,
    ) -> Option<Vec<Vec2>> {
        let path = self.find_path_with(start, goal, heuristic, modifier)?;
        Some(
            path.ids()
                .iter()
                .filter_map(|&id| self.try_get_position(id))
                .collect(),
        )
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn path_result_round_trip() {
        let path = PathResult {
            ids: vec![3, 1, 4],
            cost: 2.5,
        };
        let json = serde_json::to_string(&path).unwrap();
        let back: PathResult = serde_json::from_str(&json).unwrap();
        assert_eq!(path, back);
    }
}
