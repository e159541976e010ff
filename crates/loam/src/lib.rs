//! # Loam
//!
//! Tile-grid spatial substrate for top-down world simulation.
//!
//! Loam provides the two spatial building blocks a 2D arcade simulation
//! needs and nothing else:
//!
//! - **[`TileGrid`]**: a rectangular, index-addressed grid of tiles with a
//!   per-cell movement-blocking flag and bounds-checked neighbor queries.
//!   The grid is immutable terrain: it is built once and never mutated.
//! - **[`geom`]**: pure point-in-shape predicates (cone, circle, segment
//!   distance) with a single, shared set of edge-case rules so every
//!   consumer resolves boundaries identically.
//!
//! ## Quick Start
//!
//! ```
//! use loam::{TileGrid, CellCoord};
//! use glam::Vec2;
//!
//! let grid = TileGrid::build(65, 65, 64.0, 64.0).unwrap();
//!
//! // Border cells block movement, interior cells do not.
//! assert!(grid.cell(CellCoord::new(0, 0)).unwrap().blocks_movement);
//! assert!(!grid.cell(CellCoord::new(5, 5)).unwrap().blocks_movement);
//!
//! // World-space lookups.
//! let coord = grid.cell_at_world(Vec2::new(100.0, 100.0)).unwrap();
//! assert_eq!(coord, CellCoord::new(1, 1));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod geom;
pub mod grid;

// Re-exports for convenience
pub use grid::{Cell, CellCoord, Direction, GridError, TileGrid};
