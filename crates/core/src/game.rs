//! Game module - event handling on top of the board
//!
//! The driver owns *when* (gravity timer, key events, garbage polling); this
//! module owns *what happens*: a blocked down step lands the brick, clears
//! rows, banks the bonus and spawns the next brick. Once the board reports
//! game over, further move events leave it untouched.

use tracing::{debug, info};

use crate::board::Board;
use crate::config::{BoardConfig, GarbageConfig};
use crate::error::Result;
use crate::garbage::{Clock, GarbageScheduler, SystemClock};
use crate::scoring::{calculate_level, drop_interval_ms};
use crate::snapshot::{ClearRow, DownData, ViewData};
use crate::types::{EventKind, EventSource, GameStatus, MoveEvent};

#[derive(Debug)]
pub struct Game<C: Clock = SystemClock> {
    board: Board,
    garbage: GarbageScheduler<C>,
    lines: u32,
}

impl Game<SystemClock> {
    /// Board plus a wall-clock garbage scheduler; call [`Game::new_game`] to start
    pub fn new(board: BoardConfig, garbage: GarbageConfig) -> Result<Self> {
        Ok(Self::with_parts(
            Board::with_config(board)?,
            GarbageScheduler::new(garbage),
        ))
    }
}

impl<C: Clock> Game<C> {
    pub fn with_parts(board: Board, garbage: GarbageScheduler<C>) -> Self {
        Self {
            board,
            garbage,
            lines: 0,
        }
    }

    pub fn new_game(&mut self) {
        self.board.new_game();
        self.lines = 0;
        self.garbage.reset();
        info!("new game");
    }

    fn down_data(&self, clear_row: Option<ClearRow>) -> Result<DownData> {
        Ok(DownData {
            clear_row,
            view_data: self.board.view_data()?,
            game_over: self.board.is_game_over(),
        })
    }

    /// Merge, clear, bank the bonus, spawn
    fn land(&mut self) -> Result<DownData> {
        self.board.merge_brick_to_background()?;
        let clear_row = self.board.clear_rows();
        if !clear_row.is_empty() {
            self.board.score_mut().add(clear_row.score_bonus);
            self.lines = self
                .lines
                .saturating_add(clear_row.lines_removed.min(u32::MAX as usize) as u32);
        }
        if self.board.create_new_brick() {
            info!(
                score = self.board.score().value(),
                lines = self.lines,
                "game over"
            );
        }
        self.down_data(Some(clear_row))
    }

    /// One step down from a gravity tick or a soft-drop key
    pub fn on_down_event(&mut self, source: EventSource) -> Result<DownData> {
        if self.is_game_over() {
            return self.down_data(None);
        }
        if self.board.move_brick_down()? {
            self.board
                .apply_drop_score(&MoveEvent::new(EventKind::Down, source));
            return self.down_data(None);
        }
        self.land()
    }

    /// Drop to the floor and land immediately
    pub fn on_hard_drop(&mut self) -> Result<DownData> {
        if self.is_game_over() {
            return self.down_data(None);
        }
        let cells = self.board.hard_drop()?;
        self.board.apply_hard_drop_score(EventSource::User, cells);
        debug!(cells, "hard drop");
        self.land()
    }

    /// Apply a user move; accepted moves are offered to the score policy
    fn user_move(&mut self, kind: EventKind) -> Result<ViewData> {
        if !self.is_game_over() {
            let moved = match kind {
                EventKind::Left => self.board.move_brick_left()?,
                EventKind::Right => self.board.move_brick_right()?,
                EventKind::Rotate => self.board.rotate_left_brick()?,
                EventKind::Down | EventKind::HardDrop => false,
            };
            if moved {
                self.board
                    .apply_drop_score(&MoveEvent::new(kind, EventSource::User));
            }
        }
        self.board.view_data()
    }

    pub fn on_left_event(&mut self) -> Result<ViewData> {
        self.user_move(EventKind::Left)
    }

    pub fn on_right_event(&mut self) -> Result<ViewData> {
        self.user_move(EventKind::Right)
    }

    pub fn on_rotate_event(&mut self) -> Result<ViewData> {
        self.user_move(EventKind::Rotate)
    }

    /// Poll the garbage clock and insert any due rows
    ///
    /// Returns `true` if the insertion ended the game.
    pub fn poll_garbage(&mut self) -> Result<bool> {
        if self.is_game_over() {
            return Ok(false);
        }
        let count = self.garbage.check_and_get_rows_to_add();
        if count == 0 {
            return Ok(false);
        }
        let rows = self.garbage.generate_rows(count, self.board.cols());
        let over = self.board.add_rows(&rows)?;
        if over {
            info!(score = self.board.score().value(), "game over (garbage)");
        }
        Ok(over)
    }

    pub fn status(&self) -> GameStatus {
        self.board.status()
    }

    pub fn is_game_over(&self) -> bool {
        self.board.is_game_over()
    }

    pub fn score(&self) -> u32 {
        self.board.score().value()
    }

    /// Lines cleared this game
    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn level(&self) -> u32 {
        calculate_level(self.lines)
    }

    /// Gravity interval the driver should use at the current level
    pub fn drop_interval_ms(&self) -> u32 {
        drop_interval_ms(self.level())
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn garbage(&self) -> &GarbageScheduler<C> {
        &self.garbage
    }

    pub fn garbage_mut(&mut self) -> &mut GarbageScheduler<C> {
        &mut self.garbage
    }
}
