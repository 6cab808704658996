//! Core engine - pure, deterministic, and testable
//!
//! This crate contains the board/brick rules: the grid, collision detection,
//! rotation with horizontal kicks, line clearing, scoring, the bag
//! randomizer and the garbage-row modifier. It has **no** dependency on a
//! UI, a terminal or a network, so it can be driven by any front end:
//!
//! - **Deterministic**: bag and garbage RNGs are seeded
//! - **Testable**: every component can be exercised in isolation
//! - **Pluggable**: rotation, bag and drop-scoring strategies are traits
//! - **Pull-based**: timers are polled by the driver, nothing runs in the background
//!
//! # Module Structure
//!
//! - [`matrix`]: collision, merge, copy and row-clear functions over a [`Grid`](types::Grid)
//! - [`bricks`]: the seven brick prototypes and their rotation states
//! - [`generator`]: preview queue fed by a 7-bag [`BagPolicy`](generator::BagPolicy)
//! - [`kicks`]: [`RotationStrategy`](kicks::RotationStrategy) and the -1, +1, -2, +2 kick order
//! - [`rotator`]: active brick + rotation index
//! - [`scoring`]: [`Score`](scoring::Score), drop policies, row-clear bonus
//! - [`board`]: the orchestrator the driver calls into
//! - [`garbage`]: polled garbage-row scheduler
//! - [`game`]: down/left/right/rotate event handling on top of the board
//!
//! # Example
//!
//! ```
//! use brickfall_core::{Board, BoardConfig};
//!
//! let mut board = Board::with_config(BoardConfig::default().seed(12345)).unwrap();
//! board.new_game();
//!
//! board.move_brick_left().unwrap();
//! board.rotate_left_brick().unwrap();
//! while board.move_brick_down().unwrap() {}
//!
//! board.merge_brick_to_background().unwrap();
//! let cleared = board.clear_rows();
//! assert_eq!(cleared.lines_removed, 0);
//!
//! let game_over = board.create_new_brick();
//! assert!(!game_over);
//! ```

pub mod board;
pub mod bricks;
pub mod config;
pub mod error;
pub mod game;
pub mod garbage;
pub mod generator;
pub mod kicks;
pub mod matrix;
pub mod rng;
pub mod rotator;
pub mod scoring;
pub mod snapshot;

pub use brickfall_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use bricks::{catalog, Brick};
pub use config::{BoardConfig, GarbageConfig};
pub use error::{CoreError, Result};
pub use game::Game;
pub use garbage::{Clock, GarbageScheduler, ManualClock, SystemClock};
pub use generator::{BagPolicy, BrickGenerator, ShuffledBag};
pub use kicks::{HorizontalKicks, NoKicks, RotationStrategy};
pub use rng::SimpleRng;
pub use rotator::{BrickRotator, NextShapeInfo};
pub use scoring::{calculate_row_clear_bonus, Score, ScorePolicy, SoftDropScoring};
pub use snapshot::{ClearRow, DownData, ViewData};
