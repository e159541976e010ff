//! Index-addressed tile grid.
//!
//! The grid is the static terrain of the simulation: a `rows × cols` array
//! of [`Cell`]s, each carrying a visual tile id and a movement-blocking
//! flag. Storage is a flat row-major `Vec` addressed by [`CellCoord`];
//! neighbor queries are bounds-checked arithmetic rather than embedded
//! references, so the structure has no ownership cycles and no interior
//! mutability.
//!
//! # Procedural pattern
//!
//! The terrain follows a deterministic checkerboard: the outermost border
//! ring alternates between two blocking tile ids (0/1) by `(row + col)`
//! parity, and the interior alternates between two open ids (2/3) the same
//! way. A cell blocks movement exactly when its tile id is ≤ 1.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced while constructing a [`TileGrid`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    /// Rows, columns, or tile dimensions were zero or negative.
    #[error("invalid grid dimensions: {rows} rows x {cols} cols")]
    InvalidDimensions {
        /// Requested row count.
        rows: usize,
        /// Requested column count.
        cols: usize,
    },
}

/// A `(row, col)` address into a [`TileGrid`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellCoord {
    /// Row index (y axis, top to bottom).
    pub row: usize,
    /// Column index (x axis, left to right).
    pub col: usize,
}

impl CellCoord {
    /// Creates a new coordinate.
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// One of the four orthogonal neighbor directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Row − 1.
    Up,
    /// Row + 1.
    Down,
    /// Col − 1.
    Left,
    /// Col + 1.
    Right,
}

/// One grid unit of the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    /// Visual tile id (0..=3 in the standard pattern).
    pub tile_id: u8,
    /// True when entities cannot stand on this cell.
    pub blocks_movement: bool,
    /// Row of this cell.
    pub row: usize,
    /// Column of this cell.
    pub col: usize,
}

/// Static navigable grid with per-cell collision flags.
///
/// Built once via [`TileGrid::build`]; immutable afterwards. All world-space
/// conversions treat tile `(0, 0)` as occupying world `[0, tile_width) ×
/// [0, tile_height)`.
///
/// # Example
///
/// ```
/// use loam::{TileGrid, CellCoord, Direction};
///
/// let grid = TileGrid::build(10, 10, 64.0, 64.0).unwrap();
/// assert_eq!(grid.rows(), 10);
///
/// // Border blocks, interior does not.
/// assert!(grid.blocks_at(CellCoord::new(0, 3)));
/// assert!(!grid.blocks_at(CellCoord::new(4, 3)));
///
/// // Neighbor queries are bounds-checked.
/// assert!(grid.neighbor(CellCoord::new(0, 0), Direction::Up).is_none());
/// assert_eq!(
///     grid.neighbor(CellCoord::new(0, 0), Direction::Right),
///     Some(CellCoord::new(0, 1)),
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileGrid {
    rows: usize,
    cols: usize,
    tile_width: f32,
    tile_height: f32,
    cells: Vec<Cell>,
}

impl TileGrid {
    /// Builds a fully-initialized grid with the standard procedural pattern.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidDimensions`] when `rows`, `cols`, or a
    /// tile dimension is zero/non-positive.
    pub fn build(
        rows: usize,
        cols: usize,
        tile_width: f32,
        tile_height: f32,
    ) -> Result<Self, GridError> {
        if rows == 0 || cols == 0 || tile_width <= 0.0 || tile_height <= 0.0 {
            return Err(GridError::InvalidDimensions { rows, cols });
        }

        let mut cells = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                let tile_id = Self::pattern_tile_id(row, col, rows, cols);
                cells.push(Cell {
                    tile_id,
                    blocks_movement: tile_id <= 1,
                    row,
                    col,
                });
            }
        }

        Ok(Self {
            rows,
            cols,
            tile_width,
            tile_height,
            cells,
        })
    }

    /// The deterministic checkerboard: blocking ids on the border ring,
    /// open ids in the interior, alternating by `(row + col)` parity.
    fn pattern_tile_id(row: usize, col: usize, rows: usize, cols: usize) -> u8 {
        let border = row == 0 || col == 0 || row == rows - 1 || col == cols - 1;
        let odd = (row + col) % 2 == 1;
        match (border, odd) {
            (true, true) => 1,
            (true, false) => 0,
            (false, true) => 3,
            (false, false) => 2,
        }
    }

    /// Number of rows.
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[must_use]
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Width of a single tile in world units.
    #[must_use]
    pub const fn tile_width(&self) -> f32 {
        self.tile_width
    }

    /// Height of a single tile in world units.
    #[must_use]
    pub const fn tile_height(&self) -> f32 {
        self.tile_height
    }

    /// Returns the cell at `coord`, or `None` when out of bounds.
    #[must_use]
    pub fn cell(&self, coord: CellCoord) -> Option<&Cell> {
        if coord.row >= self.rows || coord.col >= self.cols {
            return None;
        }
        self.cells.get(coord.row * self.cols + coord.col)
    }

    /// True when `coord` is out of bounds or the cell blocks movement.
    ///
    /// Out-of-bounds is treated as blocking so a probe that walks off the
    /// map behaves like hitting a wall.
    #[must_use]
    pub fn blocks_at(&self, coord: CellCoord) -> bool {
        self.cell(coord).map_or(true, |c| c.blocks_movement)
    }

    /// Bounds-checked orthogonal neighbor lookup.
    #[must_use]
    pub fn neighbor(&self, coord: CellCoord, direction: Direction) -> Option<CellCoord> {
        let (row, col) = (coord.row, coord.col);
        let next = match direction {
            Direction::Up => (row.checked_sub(1)?, col),
            Direction::Down => (row + 1, col),
            Direction::Left => (row, col.checked_sub(1)?),
            Direction::Right => (row, col + 1),
        };
        if next.0 >= self.rows || next.1 >= self.cols {
            return None;
        }
        Some(CellCoord::new(next.0, next.1))
    }

    /// Maps a world-space position to its containing cell.
    ///
    /// Returns `None` for positions outside the grid extent (including any
    /// negative coordinate).
    #[must_use]
    pub fn cell_at_world(&self, position: Vec2) -> Option<CellCoord> {
        if position.x < 0.0 || position.y < 0.0 {
            return None;
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let coord = CellCoord::new(
            (position.y / self.tile_height) as usize,
            (position.x / self.tile_width) as usize,
        );
        if coord.row >= self.rows || coord.col >= self.cols {
            return None;
        }
        Some(coord)
    }

    /// World-space center of a cell.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn cell_center(&self, coord: CellCoord) -> Vec2 {
        Vec2::new(
            coord.col as f32 * self.tile_width + self.tile_width / 2.0,
            coord.row as f32 * self.tile_height + self.tile_height / 2.0,
        )
    }

    /// Maximum world-space corner, exclusive of the clamp margin.
    ///
    /// Positions are considered in-world when each axis is within
    /// `[0, extent − 1]`, matching [`TileGrid::clamp_to_world`].
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn world_extent(&self) -> Vec2 {
        Vec2::new(
            self.cols as f32 * self.tile_width,
            self.rows as f32 * self.tile_height,
        )
    }

    /// Clamps a world-space position into `[0, extent − 1]` on each axis.
    #[must_use]
    pub fn clamp_to_world(&self, position: Vec2) -> Vec2 {
        let max = self.world_extent() - Vec2::ONE;
        position.clamp(Vec2::ZERO, max)
    }
}

// =============================================================================
// Tests
// =============================================================================
