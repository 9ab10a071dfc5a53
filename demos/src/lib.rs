//! Shared model for the wayline demos.
//!
//! Demonstrates: building a [`NavGraph`] from an ASCII map, terrain-aware
//! cost modifiers, toggling doors between searches, and comparing the
//! three heuristics.

use std::fmt;

use rand::Rng;
use wayline_core::Vec2;
use wayline_paths::{CostModifier, NavGraph, Vertex, VertexId};

pub const FLOOR: char = '.';
pub const WALL: char = '#';
pub const MUD: char = '~';
pub const DOOR: char = '+';
pub const START: char = 'S';
pub const GOAL: char = 'G';
pub const PATH: char = '*';

/// Cost multiplier for stepping into mud.
pub const MUD_FACTOR: f32 = 3.0;

const DIAGONAL_COST: f32 = std::f32::consts::SQRT_2;

/// Default map used by the `navmap` binary.
pub const DEFAULT_MAP: &str = "\
##########################
#S.......#...............#
#........#..........~~~..#
#..~~~...+..........~~~..#
#..~~~...#...#####.......#
#........#...#...#.......#
#####+####...#.G.#.......#
#............#...+.......#
#............#####.......#
##########################";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapError {
    Empty,
    Ragged { line: usize, width: usize, expected: usize },
    UnknownTile { ch: char, x: usize, y: usize },
    MissingStart,
    MissingGoal,
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "map is empty"),
            Self::Ragged {
                line,
                width,
                expected,
            } => write!(f, "line {line} has width {width}, expected {expected}"),
            Self::UnknownTile { ch, x, y } => write!(f, "unknown tile {ch:?} at ({x}, {y})"),
            Self::MissingStart => write!(f, "map has no '{START}' tile"),
            Self::MissingGoal => write!(f, "map has no '{GOAL}' tile"),
        }
    }
}

impl std::error::Error for MapError {}

/// Makes entering mud [`MUD_FACTOR`] times as expensive.
pub struct Terrain {
    tiles: Vec<char>,
}

impl CostModifier for Terrain {
    fn cost_factor(&self, _from: &Vertex, to: &Vertex) -> f32 {
        let tile = usize::try_from(to.id())
            .ok()
            .and_then(|i| self.tiles.get(i));
        if tile == Some(&MUD) { MUD_FACTOR } else { 1.0 }
    }
}

/// A parsed ASCII map and the navigation graph built over its open tiles.
pub struct NavMap {
    pub width: usize,
    pub height: usize,
    pub tiles: Vec<char>,
    pub start: VertexId,
    pub goal: VertexId,
    pub graph: NavGraph,
}

impl NavMap {
    /// Parse `text` and connect every walkable tile to its walkable
    /// neighbours (8-way). Diagonal moves may not cut wall corners.
    pub fn parse(text: &str) -> Result<Self, MapError> {
        let lines: Vec<&str> = text.lines().filter(|l| !l.is_empty()).collect();
        let width = lines.first().map(|l| l.chars().count()).ok_or(MapError::Empty)?;
        let height = lines.len();

        let mut tiles = Vec::with_capacity(width * height);
        let mut start = None;
        let mut goal = None;
        for (y, line) in lines.iter().enumerate() {
            let w = line.chars().count();
            if w != width {
                return Err(MapError::Ragged {
                    line: y + 1,
                    width: w,
                    expected: width,
                });
            }
            for (x, ch) in line.chars().enumerate() {
                match ch {
                    FLOOR | WALL | MUD | DOOR => {}
                    START => start = Some((y * width + x) as VertexId),
                    GOAL => goal = Some((y * width + x) as VertexId),
                    _ => return Err(MapError::UnknownTile { ch, x, y }),
                }
                tiles.push(ch);
            }
        }
        let start = start.ok_or(MapError::MissingStart)?;
        let goal = goal.ok_or(MapError::MissingGoal)?;

        let mut map = Self {
            width,
            height,
            tiles,
            start,
            goal,
            graph: NavGraph::new(),
        };
        map.build_graph();
        Ok(map)
    }

    fn build_graph(&mut self) {
        for y in 0..self.height {
            for x in 0..self.width {
                if self.walkable(x as i32, y as i32) {
                    let id = self.id(x, y);
                    self.graph.add_vertex(id, Vec2::new(x as f32, y as f32));
                }
            }
        }
        for y in 0..self.height as i32 {
            for x in 0..self.width as i32 {
                if !self.walkable(x, y) {
                    continue;
                }
                let from = self.id(x as usize, y as usize);
                // Only look forward; `connect` adds the mirror edge.
                for (dx, dy) in [(1, 0), (0, 1), (1, 1), (-1, 1)] {
                    let (nx, ny) = (x + dx, y + dy);
                    if !self.walkable(nx, ny) {
                        continue;
                    }
                    let diagonal = dx != 0 && dy != 0;
                    if diagonal && (!self.walkable(x + dx, y) || !self.walkable(x, y + dy)) {
                        continue;
                    }
                    let cost = if diagonal { DIAGONAL_COST } else { 1.0 };
                    let to = self.id(nx as usize, ny as usize);
                    self.graph.connect_with(from, to, cost, true);
                }
            }
        }
    }

    #[inline]
    pub fn id(&self, x: usize, y: usize) -> VertexId {
        (y * self.width + x) as VertexId
    }

    /// Tile at `(x, y)`, or `None` outside the map.
    pub fn tile(&self, x: i32, y: i32) -> Option<char> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        self.tiles.get(y as usize * self.width + x as usize).copied()
    }

    pub fn walkable(&self, x: i32, y: i32) -> bool {
        self.tile(x, y).is_some_and(|c| c != WALL)
    }

    /// Snapshot of the current tiles as a cost modifier.
    pub fn terrain(&self) -> Terrain {
        Terrain {
            tiles: self.tiles.clone(),
        }
    }

    /// Turn `count` random floor tiles into mud.
    pub fn scatter_mud(&mut self, rng: &mut impl Rng, count: usize) -> usize {
        let floors: Vec<usize> = self
            .tiles
            .iter()
            .enumerate()
            .filter(|&(_, &c)| c == FLOOR)
            .map(|(i, _)| i)
            .collect();
        if floors.is_empty() {
            return 0;
        }
        let mut placed = 0;
        for _ in 0..count {
            let i = floors[rng.random_range(0..floors.len())];
            if self.tiles[i] == FLOOR {
                self.tiles[i] = MUD;
                placed += 1;
            }
        }
        placed
    }

    /// Open or close every door. Closing a door disables the edges around
    /// it, so searches route elsewhere while the graph stays intact.
    pub fn set_doors_open(&mut self, open: bool) -> usize {
        let doors: Vec<VertexId> = self
            .tiles
            .iter()
            .enumerate()
            .filter(|&(_, &c)| c == DOOR)
            .map(|(i, _)| i as VertexId)
            .collect();
        for &door in &doors {
            let neighbours: Vec<VertexId> = self
                .graph
                .vertex(door)
                .map(|v| v.edges().iter().map(|e| e.to()).collect())
                .unwrap_or_default();
            for n in neighbours {
                self.graph.set_edge_enabled(door, n, open);
            }
        }
        doors.len()
    }

    /// Render the map with `path` overlaid.
    pub fn render(&self, path: &[VertexId]) -> String {
        let mut tiles = self.tiles.clone();
        for &id in path {
            if id == self.start || id == self.goal {
                continue;
            }
            if let Some(t) = usize::try_from(id).ok().and_then(|i| tiles.get_mut(i)) {
                *t = PATH;
            }
        }
        let mut out = String::with_capacity((self.width + 1) * self.height);
        for row in tiles.chunks(self.width) {
            out.extend(row);
            out.push('\n');
        }
        out
    }
}
