//! NavGrid: row-major cell array with world-space transforms.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use skirmish_core::constants::{GRID_CELL_SIZE, GRID_HEIGHT, GRID_WIDTH};

/// Row-major cell index: `y * width + x`.
pub type CellIndex = usize;

/// Neighbour offsets `(dx, dy)` in enumeration order.
///
/// Diagonals first (bottom-left, bottom-right, top-left, top-right), then
/// above, below, right, left. The greedy step breaks score ties by this order.
pub const NEIGHBOR_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (1, -1),
    (-1, 1),
    (1, 1),
    (0, 1),
    (0, -1),
    (1, 0),
    (-1, 0),
];

/// Errors raised when building a grid.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum GridError {
    #[error("grid dimensions must be non-zero (got {width}x{height})")]
    ZeroSized { width: u32, height: u32 },
    #[error("cell size must be positive and finite (got {0})")]
    InvalidCellSize(f32),
}

/// One grid cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavCell {
    /// Traversal cost. Tracked, not yet weighted into `NavGrid::score`.
    pub discomfort: i32,
    pub x: i32,
    pub y: i32,
}

/// Uniform navigation grid centred on the world origin.
#[derive(Debug, Clone)]
pub struct NavGrid {
    width: u32,
    height: u32,
    cell_size: f32,
    cells: Vec<NavCell>,
}

impl Default for NavGrid {
    fn default() -> Self {
        Self::build(GRID_WIDTH, GRID_HEIGHT, GRID_CELL_SIZE)
    }
}

impl NavGrid {
    /// Create a grid of `width × height` cells, each `cell_size` world units across.
    pub fn new(width: u32, height: u32, cell_size: f32) -> Result<Self, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::ZeroSized { width, height });
        }
        if !(cell_size.is_finite() && cell_size > 0.0) {
            return Err(GridError::InvalidCellSize(cell_size));
        }
        Ok(Self::build(width, height, cell_size))
    }

    fn build(width: u32, height: u32, cell_size: f32) -> Self {
        let mut cells = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height as i32 {
            for x in 0..width as i32 {
                cells.push(NavCell {
                    discomfort: 0,
                    x,
                    y,
                });
            }
        }
        Self {
            width,
            height,
            cell_size,
            cells,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// World-space extent along x.
    pub fn real_width(&self) -> f32 {
        self.cell_size * self.width as f32
    }

    /// World-space extent along z.
    pub fn real_height(&self) -> f32 {
        self.cell_size * self.height as f32
    }

    pub fn cells(&self) -> &[NavCell] {
        &self.cells
    }

    pub fn cell(&self, index: CellIndex) -> Option<&NavCell> {
        self.cells.get(index)
    }

    /// Grid coordinates `(x, y)` of a cell index.
    pub fn coords(&self, index: CellIndex) -> (i32, i32) {
        let w = self.width as usize;
        ((index % w) as i32, (index / w) as i32)
    }

    /// Index of the cell at grid coordinates, if in bounds.
    pub fn index_of(&self, x: i32, y: i32) -> Option<CellIndex> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    /// Cell containing the world point `(x, z)`, or `None` off the grid.
    pub fn real_to_cell(&self, x: f32, z: f32) -> Option<CellIndex> {
        // Shift so (0, 0) is the grid's bottom-left corner.
        let gx = ((x + self.real_width() / 2.0) / self.cell_size).floor();
        let gy = ((z + self.real_height() / 2.0) / self.cell_size).floor();
        if !(gx.is_finite() && gy.is_finite()) {
            return None;
        }
        if gx < 0.0 || gy < 0.0 || gx >= self.width as f32 || gy >= self.height as f32 {
            return None;
        }
        self.index_of(gx as i32, gy as i32)
    }

    /// World coordinates `(x, z)` of a cell's bottom-left corner.
    pub fn cell_to_real(&self, index: CellIndex) -> (f32, f32) {
        let (x, y) = self.coords(index);
        (
            x as f32 * self.cell_size - self.real_width() / 2.0,
            y as f32 * self.cell_size - self.real_height() / 2.0,
        )
    }

    /// In-bounds neighbours of `index`, in `NEIGHBOR_OFFSETS` order.
    pub fn neighbors(&self, index: CellIndex) -> impl Iterator<Item = CellIndex> + '_ {
        let (x, y) = self.coords(index);
        NEIGHBOR_OFFSETS
            .iter()
            .filter_map(move |&(dx, dy)| self.index_of(x + dx, y + dy))
    }

    /// Cost of stepping from `from` into `candidate` when heading for `target`:
    /// squared grid distance from `candidate` to `target`.
    pub fn score(&self, from: CellIndex, candidate: CellIndex, target: CellIndex) -> f32 {
        // Discomfort hook: neither the origin cell nor the candidate's discomfort
        // is weighted yet.
        let _ = from;
        let (cx, cy) = self.coords(candidate);
        let (tx, ty) = self.coords(target);
        let dx = (cx - tx) as f32;
        let dy = (cy - ty) as f32;
        dx * dx + dy * dy
    }

    /// Neighbour of `from` with the lowest score toward `target`.
    /// Ties go to the earliest neighbour in enumeration order.
    pub fn best_step(&self, from: CellIndex, target: CellIndex) -> Option<CellIndex> {
        let mut best: Option<(CellIndex, f32)> = None;
        for candidate in self.neighbors(from) {
            let s = self.score(from, candidate, target);
            match best {
                Some((_, best_score)) if s >= best_score => {}
                _ => best = Some((candidate, s)),
            }
        }
        best.map(|(cell, _)| cell)
    }

    pub fn discomfort(&self, index: CellIndex) -> Option<i32> {
        self.cells.get(index).map(|c| c.discomfort)
    }

    /// Set a cell's discomfort. Returns false if `index` is out of range.
    pub fn set_discomfort(&mut self, index: CellIndex, value: i32) -> bool {
        match self.cells.get_mut(index) {
            Some(cell) => {
                cell.discomfort = value;
                true
            }
            None => false,
        }
    }
}
