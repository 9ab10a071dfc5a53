//! **wayline-core** — geometry primitives shared across the *wayline* crates.
//!
//! The pathfinder only needs a position type with component access, a
//! distance and a per-axis absolute difference; [`Vec2`] provides exactly that.

pub mod geom;

pub use geom::Vec2;
