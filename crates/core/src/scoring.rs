//! Scoring module - score accumulator, drop policy and row-clear bonus
//!
//! Rules:
//! - Row clears award `50 * n * n` (1 line = 50, 2 = 200, 3 = 450, 4 = 800).
//! - Soft drops award 1 point per step, but only when the user asked for the
//!   step; gravity ticks are free.
//! - Hard drops award 2 points per cell travelled.
//! - Level increases every 10 lines; gravity speeds up per level.

use std::fmt;

use serde::Serialize;

use crate::types::{
    EventKind, MoveEvent, DROP_INTERVALS, DROP_INTERVAL_FLOOR_MS, HARD_DROP_POINTS_PER_CELL,
    LINES_PER_LEVEL, ROW_CLEAR_BASE, SOFT_DROP_POINTS,
};

/// Mutable score counter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Score {
    value: u32,
}

impl Score {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, delta: u32) {
        self.value = self.value.saturating_add(delta);
    }

    pub fn reset(&mut self) {
        self.value = 0;
    }

    pub fn value(&self) -> u32 {
        self.value
    }
}

/// Decides how many points a move is worth
///
/// Every accepted move is offered to the policy, so a custom policy can
/// reward rotations or sideways moves as well as drops.
pub trait ScorePolicy: fmt::Debug + Send {
    /// Points for a single step (down, left, right, rotate) triggered by `event`
    fn calculate_drop_score(&self, event: &MoveEvent) -> u32;

    /// Points for a hard drop that travelled `cells` rows
    fn calculate_hard_drop_score(&self, event: &MoveEvent, cells: u32) -> u32 {
        if event.kind == EventKind::HardDrop {
            cells.saturating_mul(HARD_DROP_POINTS_PER_CELL)
        } else {
            0
        }
    }
}

/// Default policy: one point per user soft-drop step
#[derive(Debug, Clone, Copy, Default)]
pub struct SoftDropScoring;

impl ScorePolicy for SoftDropScoring {
    fn calculate_drop_score(&self, event: &MoveEvent) -> u32 {
        if event.kind == EventKind::Down && event.is_user() {
            SOFT_DROP_POINTS
        } else {
            0
        }
    }
}

/// Bonus for clearing `lines` rows at once
pub fn calculate_row_clear_bonus(lines: usize) -> u32 {
    if lines == 0 {
        return 0;
    }
    let n = lines.min(u32::MAX as usize) as u32;
    ROW_CLEAR_BASE.saturating_mul(n).saturating_mul(n)
}

/// Level management
/// Level increases every 10 lines cleared
pub fn calculate_level(total_lines: u32) -> u32 {
    total_lines / LINES_PER_LEVEL
}

/// Get drop interval for a level (in milliseconds)
pub fn drop_interval_ms(level: u32) -> u32 {
    DROP_INTERVALS
        .get(level as usize)
        .copied()
        .unwrap_or(DROP_INTERVAL_FLOOR_MS)
}
