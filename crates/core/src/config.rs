//! Configuration - board and garbage settings
//!
//! Both structs deserialize with `#[serde(default)]`, so a driver can load a
//! partial JSON/TOML document and get the stock values for anything left out.
//! Strategies (rotation, bag, drop scoring) are not data and are injected
//! through [`Board::with_strategies`](crate::board::Board::with_strategies).

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{CoreError, Result};
use crate::types::{
    DEFAULT_COLS, DEFAULT_PREVIEW_SIZE, DEFAULT_ROWS, GARBAGE_MAX_DELAY_MS, GARBAGE_MAX_ROWS,
    GARBAGE_MIN_DELAY_MS, HIDDEN_ROWS, MIN_PREVIEW_SIZE, SHAPE_SIZE,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Grid height including the hidden spawn rows
    pub rows: usize,
    pub cols: usize,
    /// Upcoming bricks kept queued; values below 1 are clamped to 1
    pub preview_size: usize,
    /// Seed for the bag shuffler
    pub seed: u32,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            preview_size: DEFAULT_PREVIEW_SIZE,
            seed: 1,
        }
    }
}

impl BoardConfig {
    pub fn with_size(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            ..Self::default()
        }
    }

    pub fn seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    pub fn preview_size(mut self, preview_size: usize) -> Self {
        self.preview_size = preview_size;
        self
    }

    /// Check dimensions and clamp the preview size
    ///
    /// The grid must fit a whole 4x4 shape and keep at least one row below
    /// the hidden buffer.
    pub fn validate(mut self) -> Result<Self> {
        if self.cols < SHAPE_SIZE || self.rows < SHAPE_SIZE || self.rows <= HIDDEN_ROWS {
            return Err(CoreError::InvalidDimensions {
                rows: self.rows,
                cols: self.cols,
            });
        }
        if self.preview_size < MIN_PREVIEW_SIZE {
            warn!(
                requested = self.preview_size,
                clamped = MIN_PREVIEW_SIZE,
                "preview size below minimum, clamping"
            );
            self.preview_size = MIN_PREVIEW_SIZE;
        }
        Ok(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GarbageConfig {
    pub enabled: bool,
    pub min_delay_ms: u64,
    pub max_delay_ms: u64,
    /// Upper bound of rows per wave (at least 1 row is always added)
    pub max_rows: usize,
    pub seed: u32,
}

impl Default for GarbageConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            min_delay_ms: GARBAGE_MIN_DELAY_MS,
            max_delay_ms: GARBAGE_MAX_DELAY_MS,
            max_rows: GARBAGE_MAX_ROWS,
            seed: 1,
        }
    }
}

impl GarbageConfig {
    /// Swap an inverted delay window and lift `max_rows` to at least 1
    pub fn normalized(mut self) -> Self {
        if self.min_delay_ms > self.max_delay_ms {
            std::mem::swap(&mut self.min_delay_ms, &mut self.max_delay_ms);
        }
        self.max_rows = self.max_rows.max(1);
        self
    }
}
