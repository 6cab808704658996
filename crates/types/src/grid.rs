//! Grid - the board matrix
//!
//! A fixed-size `rows x cols` matrix of colour ids stored as a flat,
//! row-major buffer (`y * cols + x`). Dimensions are set at construction
//! and never change. Coordinates are `(x, y)` with x left to right and
//! y top to bottom.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Board matrix; 0 = empty, 1..=7 = placed cell
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<u8>>", into = "Vec<Vec<u8>>")]
pub struct Grid {
    rows: usize,
    cols: usize,
    /// Flat array of cells, row-major order
    cells: Vec<u8>,
}

/// Returned when nested rows cannot form a rectangular grid
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("row {row} has {actual} cells, expected {expected}")]
pub struct GridShapeError {
    pub row: usize,
    pub expected: usize,
    pub actual: usize,
}

impl Grid {
    /// Create an all-empty grid
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![0; rows * cols],
        }
    }

    /// Build a grid from nested rows; every row must have the same length
    pub fn from_rows(rows: Vec<Vec<u8>>) -> Result<Self, GridShapeError> {
        let cols = rows.first().map_or(0, Vec::len);
        let mut cells = Vec::with_capacity(rows.len() * cols);
        for (y, row) in rows.iter().enumerate() {
            if row.len() != cols {
                return Err(GridShapeError {
                    row: y,
                    expected: cols,
                    actual: row.len(),
                });
            }
            cells.extend_from_slice(row);
        }
        Ok(Self {
            rows: rows.len(),
            cols,
            cells,
        })
    }

    #[inline(always)]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as usize >= self.cols || y as usize >= self.rows {
            return None;
        }
        Some(y as usize * self.cols + x as usize)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Get cell at (x, y); None if out of bounds
    pub fn get(&self, x: i32, y: i32) -> Option<u8> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at (x, y); false if out of bounds
    pub fn set(&mut self, x: i32, y: i32, value: u8) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = value;
                true
            }
            None => false,
        }
    }

    pub fn row(&self, y: usize) -> Option<&[u8]> {
        if y >= self.rows {
            return None;
        }
        let start = y * self.cols;
        Some(&self.cells[start..start + self.cols])
    }

    pub fn row_mut(&mut self, y: usize) -> Option<&mut [u8]> {
        if y >= self.rows {
            return None;
        }
        let start = y * self.cols;
        Some(&mut self.cells[start..start + self.cols])
    }

    /// Iterate rows top to bottom
    pub fn iter_rows(&self) -> impl Iterator<Item = &[u8]> {
        // chunks_exact(0) panics; a zero-width grid yields no rows
        let width = self.cols.max(1);
        let rows = self.rows;
        self.cells.chunks_exact(width).take(rows)
    }

    /// Rows below the hidden spawn buffer
    pub fn visible_rows(&self, hidden: usize) -> impl Iterator<Item = &[u8]> {
        self.iter_rows().skip(hidden)
    }

    /// A row is full when it has no empty cell
    pub fn is_row_full(&self, y: usize) -> bool {
        self.row(y).is_some_and(|row| row.iter().all(|&c| c != 0))
    }

    /// Copy row `src` over row `dst` (overlap-safe)
    pub fn copy_row(&mut self, src: usize, dst: usize) {
        if src >= self.rows || dst >= self.rows || src == dst {
            return;
        }
        let start = src * self.cols;
        self.cells
            .copy_within(start..start + self.cols, dst * self.cols);
    }

    pub fn fill_row(&mut self, y: usize, value: u8) {
        if let Some(row) = self.row_mut(y) {
            row.fill(value);
        }
    }

    /// Reset every cell to empty
    pub fn clear(&mut self) {
        self.cells.fill(0);
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|&c| c == 0)
    }

    pub fn filled_cells(&self) -> usize {
        self.cells.iter().filter(|&&c| c != 0).count()
    }

    /// Convert to nested rows
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        self.iter_rows().map(<[u8]>::to_vec).collect()
    }
}

impl TryFrom<Vec<Vec<u8>>> for Grid {
    type Error = GridShapeError;

    fn try_from(rows: Vec<Vec<u8>>) -> Result<Self, Self::Error> {
        Grid::from_rows(rows)
    }
}

impl From<Grid> for Vec<Vec<u8>> {
    fn from(grid: Grid) -> Self {
        grid.to_rows()
    }
}
