//! Read-only snapshots handed to presentation layers

use serde::Serialize;

use crate::types::{Grid, Shape};

/// Result of a row-clear pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClearRow {
    pub lines_removed: usize,
    /// Grid after compaction
    pub grid: Grid,
    pub score_bonus: u32,
    /// Original indices of the removed rows, top to bottom
    pub cleared_rows: Vec<usize>,
}

impl ClearRow {
    pub fn is_empty(&self) -> bool {
        self.lines_removed == 0
    }
}

/// What should be on screen right now
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewData {
    pub shape: Shape,
    pub x: i32,
    pub y: i32,
    /// First rotation state of the next brick
    pub next_shape: Shape,
    /// First rotation states of the whole preview queue, next brick first
    pub preview: Vec<Shape>,
    /// Row the active brick would land on if hard-dropped
    pub ghost_y: i32,
}

/// Outcome of a down (or hard drop) event
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DownData {
    /// Present when the brick landed and a clear pass ran
    pub clear_row: Option<ClearRow>,
    pub view_data: ViewData,
    pub game_over: bool,
}
