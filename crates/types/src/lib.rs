//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the engine.
//! All types are pure data structures with no game logic, making them
//! usable in any context (core logic, presentation layers, drivers).
//!
//! # Board Dimensions
//!
//! The default playfield is 10 columns by 22 rows. The top two rows are a
//! hidden spawn buffer; only rows `HIDDEN_ROWS..` are meant to be displayed.
//!
//! - **Columns**: 10 (indexed 0-9)
//! - **Rows**: 22 (indexed 0-21, rows 0-1 hidden)
//! - **Spawn row**: 1 (inside the hidden buffer)
//!
//! # Cell Values
//!
//! | Value | Meaning |
//! |-------|---------|
//! | 0 | Empty |
//! | 1 | I |
//! | 2 | J |
//! | 3 | L |
//! | 4 | O |
//! | 5 | S |
//! | 6 | T |
//! | 7 | Z |
//!
//! # Garbage Timing
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `GARBAGE_MIN_DELAY_MS` | 30000 | Shortest gap between garbage waves |
//! | `GARBAGE_MAX_DELAY_MS` | 45000 | Longest gap between garbage waves |
//! | `GARBAGE_MAX_ROWS` | 2 | Most rows injected per wave |
//!
//! # Examples
//!
//! ```
//! use brickfall_types::{BrickKind, EventKind, EventSource, MoveEvent, DEFAULT_COLS};
//!
//! let kind = BrickKind::from_str("t").unwrap();
//! assert_eq!(kind, BrickKind::T);
//! assert_eq!(kind.id(), 6);
//! assert_eq!(BrickKind::from_id(6), Some(BrickKind::T));
//!
//! let event = MoveEvent::new(EventKind::Down, EventSource::User);
//! assert!(event.is_user());
//!
//! assert_eq!(DEFAULT_COLS, 10);
//! ```

use serde::{Deserialize, Serialize};

mod grid;

pub use grid::{Grid, GridShapeError};

/// Default board height including the hidden spawn rows (20 visible + 2 hidden)
pub const DEFAULT_ROWS: usize = 22;

/// Default board width in cells
pub const DEFAULT_COLS: usize = 10;

/// Rows at the top of the grid that are not displayed
pub const HIDDEN_ROWS: usize = 2;

/// Row a freshly spawned brick is placed on
pub const SPAWN_Y: i32 = 1;

/// Side length of every rotation-state shape matrix
pub const SHAPE_SIZE: usize = 4;

/// Number of distinct brick kinds (and the size of one bag)
pub const BRICK_KIND_COUNT: usize = 7;

/// Default number of upcoming bricks kept in the preview queue
pub const DEFAULT_PREVIEW_SIZE: usize = 3;

/// Preview sizes below this are clamped up to it
pub const MIN_PREVIEW_SIZE: usize = 1;

/// Row clear bonus base: `ROW_CLEAR_BASE * n * n` for `n` lines
pub const ROW_CLEAR_BASE: u32 = 50;

/// Points per user-driven soft drop step
pub const SOFT_DROP_POINTS: u32 = 1;

/// Points per cell travelled during a hard drop
pub const HARD_DROP_POINTS_PER_CELL: u32 = 2;

/// Lines needed to advance one level
pub const LINES_PER_LEVEL: u32 = 10;

/// Drop intervals by level (milliseconds per row)
///
/// Index 0 = Level 0, Index 8 = Level 8
pub const DROP_INTERVALS: [u32; 9] = [1000, 800, 650, 500, 400, 320, 250, 200, 160];

/// Drop interval for every level past the table
pub const DROP_INTERVAL_FLOOR_MS: u32 = 120;

/// Shortest delay before the next garbage wave (30s)
pub const GARBAGE_MIN_DELAY_MS: u64 = 30_000;

/// Longest delay before the next garbage wave (45s)
pub const GARBAGE_MAX_DELAY_MS: u64 = 45_000;

/// Most garbage rows injected in one wave
pub const GARBAGE_MAX_ROWS: usize = 2;

/// One rotation state of a brick: 4x4 cells, 0 = empty, nonzero = colour id
pub type Shape = [[u8; SHAPE_SIZE]; SHAPE_SIZE];

/// A shape with no filled cells
pub const EMPTY_SHAPE: Shape = [[0; SHAPE_SIZE]; SHAPE_SIZE];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_dimensions_leave_a_visible_field() {
        assert_eq!(DEFAULT_ROWS - HIDDEN_ROWS, 20);
        assert!(DEFAULT_COLS >= SHAPE_SIZE);
        assert!((SPAWN_Y as usize) < HIDDEN_ROWS);
    }

    #[test]
    fn garbage_window_is_ordered() {
        assert!(GARBAGE_MIN_DELAY_MS <= GARBAGE_MAX_DELAY_MS);
        assert!(GARBAGE_MAX_ROWS >= 1);
    }
}

/// The seven brick kinds
///
/// The discriminant doubles as the colour id written into the grid:
/// - **I** (1): straight bar
/// - **J** (2)
/// - **L** (3): mirror of J
/// - **O** (4): 2x2 square
/// - **S** (5)
/// - **T** (6)
/// - **Z** (7): mirror of S
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum BrickKind {
    I = 1,
    J = 2,
    L = 3,
    O = 4,
    S = 5,
    T = 6,
    Z = 7,
}

impl BrickKind {
    /// All kinds in colour-id order
    pub const ALL: [BrickKind; BRICK_KIND_COUNT] = [
        BrickKind::I,
        BrickKind::J,
        BrickKind::L,
        BrickKind::O,
        BrickKind::S,
        BrickKind::T,
        BrickKind::Z,
    ];

    /// Colour id written into grid cells (1..=7)
    pub fn id(&self) -> u8 {
        *self as u8
    }

    /// Look up a kind by its colour id
    ///
    /// ```
    /// use brickfall_types::BrickKind;
    ///
    /// assert_eq!(BrickKind::from_id(1), Some(BrickKind::I));
    /// assert_eq!(BrickKind::from_id(0), None);
    /// assert_eq!(BrickKind::from_id(8), None);
    /// ```
    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            1 => Some(BrickKind::I),
            2 => Some(BrickKind::J),
            3 => Some(BrickKind::L),
            4 => Some(BrickKind::O),
            5 => Some(BrickKind::S),
            6 => Some(BrickKind::T),
            7 => Some(BrickKind::Z),
            _ => None,
        }
    }

    /// Parse brick kind from string (case-insensitive)
    ///
    /// ```
    /// use brickfall_types::BrickKind;
    ///
    /// assert_eq!(BrickKind::from_str("i"), Some(BrickKind::I));
    /// assert_eq!(BrickKind::from_str("O"), Some(BrickKind::O));
    /// assert_eq!(BrickKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(BrickKind::I),
            "j" => Some(BrickKind::J),
            "l" => Some(BrickKind::L),
            "o" => Some(BrickKind::O),
            "s" => Some(BrickKind::S),
            "t" => Some(BrickKind::T),
            "z" => Some(BrickKind::Z),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            BrickKind::I => "i",
            BrickKind::J => "j",
            BrickKind::L => "l",
            BrickKind::O => "o",
            BrickKind::S => "s",
            BrickKind::T => "t",
            BrickKind::Z => "z",
        }
    }
}

/// A grid coordinate; for a brick this is the top-left corner of its shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Return a copy moved by `(dx, dy)`
    pub fn translated(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// What a move event asks the brick to do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    Down,
    Left,
    Right,
    Rotate,
    HardDrop,
}

/// Who triggered a move event
///
/// - **User**: a key press routed from the input layer
/// - **Timer**: the driver's gravity tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventSource {
    User,
    Timer,
}

/// A move request, handed to score policies to decide drop points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MoveEvent {
    pub kind: EventKind,
    pub source: EventSource,
}

impl MoveEvent {
    pub fn new(kind: EventKind, source: EventSource) -> Self {
        Self { kind, source }
    }

    pub fn is_user(&self) -> bool {
        self.source == EventSource::User
    }
}

/// Lifecycle of a board
///
/// The board starts `Playing` after `new_game` and moves to `GameOver` when a
/// spawn or a garbage insertion leaves no legal place for the active brick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GameStatus {
    #[default]
    Playing,
    GameOver,
}

impl GameStatus {
    pub fn is_over(&self) -> bool {
        matches!(self, GameStatus::GameOver)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameStatus::Playing => "playing",
            GameStatus::GameOver => "game_over",
        }
    }
}
