//! Board module - the grid, the active brick and everything that moves it
//!
//! The board owns the grid, the active brick's offset, the rotator, the brick
//! generator and the score. Every legality check goes through
//! [`matrix::intersect`](crate::matrix::intersect); a blocked move or rotation
//! is reported as `false` and leaves the board untouched.
//!
//! Coordinates: `(x, y)` is the top-left corner of the active shape, x left
//! to right, y top to bottom. Rows `0..HIDDEN_ROWS` are the spawn buffer.

use tracing::{debug, trace};

use crate::bricks::{shape_width, Brick};
use crate::config::BoardConfig;
use crate::error::{CoreError, Result};
use crate::generator::{BagPolicy, BrickGenerator, ShuffledBag};
use crate::kicks::{HorizontalKicks, RotationStrategy};
use crate::matrix::{check_removing, drop_distance, intersect, merge};
use crate::rotator::BrickRotator;
use crate::scoring::{Score, ScorePolicy, SoftDropScoring};
use crate::snapshot::{ClearRow, ViewData};
use crate::types::{
    EventKind, EventSource, GameStatus, Grid, MoveEvent, Point, Shape, SPAWN_Y,
};

#[derive(Debug)]
pub struct Board {
    grid: Grid,
    offset: Point,
    rotator: BrickRotator,
    generator: BrickGenerator,
    score: Score,
    score_policy: Box<dyn ScorePolicy>,
    status: GameStatus,
}

impl Board {
    /// Board with the stock strategies (horizontal kicks, shuffled bag, soft-drop scoring)
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        Self::with_config(BoardConfig::with_size(rows, cols))
    }

    pub fn with_config(config: BoardConfig) -> Result<Self> {
        let seed = config.seed;
        Self::with_strategies(
            config,
            Box::new(HorizontalKicks),
            Box::new(ShuffledBag::new(seed)),
            Box::new(SoftDropScoring),
        )
    }

    /// Board with custom strategies; `config.seed` is not used here, the bag
    /// policy brings its own randomness
    pub fn with_strategies(
        config: BoardConfig,
        rotation: Box<dyn RotationStrategy>,
        bag: Box<dyn BagPolicy>,
        score_policy: Box<dyn ScorePolicy>,
    ) -> Result<Self> {
        let config = config.validate()?;
        Ok(Self {
            grid: Grid::new(config.rows, config.cols),
            offset: Point::default(),
            rotator: BrickRotator::with_strategy(rotation),
            generator: BrickGenerator::with_policy(bag, config.preview_size),
            score: Score::new(),
            score_policy,
            status: GameStatus::Playing,
        })
    }

    pub fn rows(&self) -> usize {
        self.grid.rows()
    }

    pub fn cols(&self) -> usize {
        self.grid.cols()
    }

    fn try_move(&mut self, dx: i32, dy: i32) -> Result<bool> {
        let shape = self.rotator.current_shape()?;
        let target = self.offset.translated(dx, dy);
        if intersect(&self.grid, &shape, target.x, target.y) {
            trace!(dx, dy, x = self.offset.x, y = self.offset.y, "move blocked");
            return Ok(false);
        }
        self.offset = target;
        Ok(true)
    }

    /// One row down; `false` means the brick has landed
    pub fn move_brick_down(&mut self) -> Result<bool> {
        self.try_move(0, 1)
    }

    pub fn move_brick_left(&mut self) -> Result<bool> {
        self.try_move(-1, 0)
    }

    pub fn move_brick_right(&mut self) -> Result<bool> {
        self.try_move(1, 0)
    }

    /// Advance one rotation state, kicking sideways if the strategy allows
    pub fn rotate_left_brick(&mut self) -> Result<bool> {
        match self.rotator.try_rotate_left(&self.grid, self.offset)? {
            Some(offset) => {
                self.offset = offset;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Spawn the next brick centred on the spawn row
    ///
    /// Returns `true` when the spawn position is already blocked: the game is
    /// over and the board status flips to `GameOver`. A successful spawn sets
    /// the status back to `Playing`, so the status always matches the latest
    /// spawn. The grid is never modified here.
    pub fn create_new_brick(&mut self) -> bool {
        let brick = self.generator.get_brick();
        self.rotator.set_brick(brick);

        let shape = brick.first_shape();
        let cols = self.grid.cols() as i32;
        let width = shape_width(&shape) as i32;
        let max_x = (cols - width).max(0);
        let x = ((cols - width) / 2).clamp(0, max_x);
        self.offset = Point::new(x, SPAWN_Y);

        let blocked = intersect(&self.grid, &shape, self.offset.x, self.offset.y);
        if blocked {
            self.status = GameStatus::GameOver;
            debug!(kind = brick.kind().as_str(), x, "spawn blocked, game over");
        } else {
            self.status = GameStatus::Playing;
            trace!(kind = brick.kind().as_str(), x, "brick spawned");
        }
        blocked
    }

    /// Owned copy of the grid; mutating it never touches the board
    pub fn board_matrix(&self) -> Grid {
        self.grid.clone()
    }

    /// Replace the grid wholesale (restoring a saved position, test setups)
    pub fn set_board_matrix(&mut self, grid: Grid) -> Result<()> {
        if grid.rows() != self.grid.rows() || grid.cols() != self.grid.cols() {
            return Err(CoreError::InvalidDimensions {
                rows: grid.rows(),
                cols: grid.cols(),
            });
        }
        self.grid = grid;
        Ok(())
    }

    pub fn view_data(&self) -> Result<ViewData> {
        let shape = self.rotator.current_shape()?;
        let ghost_y =
            self.offset.y + drop_distance(&self.grid, &shape, self.offset.x, self.offset.y);
        let preview = self
            .generator
            .queued()
            .take(self.generator.preview_size())
            .map(Brick::first_shape)
            .collect();

        Ok(ViewData {
            shape,
            x: self.offset.x,
            y: self.offset.y,
            next_shape: self.generator.get_next_brick().first_shape(),
            preview,
            ghost_y,
        })
    }

    /// Paint the active brick into the background at its current offset
    pub fn merge_brick_to_background(&mut self) -> Result<()> {
        let shape = self.rotator.current_shape()?;
        self.grid = merge(&self.grid, &shape, self.offset.x, self.offset.y);
        Ok(())
    }

    /// Remove full rows and compact; the grid takes the compacted result
    pub fn clear_rows(&mut self) -> ClearRow {
        let result = check_removing(&self.grid);
        if !result.is_empty() {
            debug!(
                lines = result.lines_removed,
                bonus = result.score_bonus,
                rows = ?result.cleared_rows,
                "rows cleared"
            );
            self.grid = result.grid.clone();
        }
        result
    }

    /// Empty grid, zero score, fresh brick
    pub fn new_game(&mut self) {
        self.grid.clear();
        self.score.reset();
        self.status = GameStatus::Playing;
        self.create_new_brick();
    }

    /// Push garbage rows in from the bottom
    ///
    /// Existing rows shift up by `rows.len()`; whatever crosses the top edge
    /// is discarded. The active brick is then lifted by the smallest amount
    /// (at most `rows.len()` rows) that makes its position legal. When no lift
    /// works, the board switches to `GameOver` and `Ok(true)` is returned.
    pub fn add_rows(&mut self, rows: &[Vec<u8>]) -> Result<bool> {
        let cols = self.grid.cols();
        if let Some(bad) = rows.iter().find(|row| row.len() != cols) {
            return Err(CoreError::RowWidthMismatch {
                expected: cols,
                actual: bad.len(),
            });
        }
        if rows.is_empty() {
            return Ok(false);
        }

        let height = self.grid.rows();
        let shift = rows.len().min(height);
        let lost = (0..shift)
            .filter_map(|y| self.grid.row(y))
            .flatten()
            .filter(|&&c| c != 0)
            .count();
        if lost > 0 {
            debug!(cells = lost, "garbage pushed cells off the top");
        }

        for y in 0..height - shift {
            self.grid.copy_row(y + shift, y);
        }
        let incoming = &rows[rows.len() - shift..];
        for (i, row) in incoming.iter().enumerate() {
            if let Some(dst) = self.grid.row_mut(height - shift + i) {
                dst.copy_from_slice(row);
            }
        }
        debug!(rows = shift, "garbage rows inserted");

        if self.status.is_over() {
            return Ok(true);
        }
        let Ok(shape) = self.rotator.current_shape() else {
            return Ok(false);
        };

        let lift = (0..=rows.len() as i32)
            .find(|&k| !intersect(&self.grid, &shape, self.offset.x, self.offset.y - k));
        match lift {
            Some(k) => {
                self.offset.y -= k;
                Ok(false)
            }
            None => {
                self.status = GameStatus::GameOver;
                debug!("garbage left no room for the active brick, game over");
                Ok(true)
            }
        }
    }

    /// Drop straight down until blocked; returns rows travelled
    pub fn hard_drop(&mut self) -> Result<u32> {
        let shape = self.rotator.current_shape()?;
        let distance = drop_distance(&self.grid, &shape, self.offset.x, self.offset.y);
        self.offset.y += distance;
        Ok(distance as u32)
    }

    /// Row the active brick would land on
    pub fn ghost_y(&self) -> Result<i32> {
        let shape = self.rotator.current_shape()?;
        Ok(self.offset.y + drop_distance(&self.grid, &shape, self.offset.x, self.offset.y))
    }

    /// Score a drop step through the policy; returns the points added
    pub fn apply_drop_score(&mut self, event: &MoveEvent) -> u32 {
        let points = self.score_policy.calculate_drop_score(event);
        self.score.add(points);
        points
    }

    /// Score a hard drop of `cells` rows through the policy
    pub fn apply_hard_drop_score(&mut self, source: EventSource, cells: u32) -> u32 {
        let event = MoveEvent::new(EventKind::HardDrop, source);
        let points = self.score_policy.calculate_hard_drop_score(&event, cells);
        self.score.add(points);
        points
    }

    pub fn score(&self) -> &Score {
        &self.score
    }

    pub fn score_mut(&mut self) -> &mut Score {
        &mut self.score
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_game_over(&self) -> bool {
        self.status.is_over()
    }

    pub fn current_offset(&self) -> Point {
        self.offset
    }

    pub fn active_brick(&self) -> Option<Brick> {
        self.rotator.brick()
    }

    pub fn current_shape(&self) -> Result<Shape> {
        self.rotator.current_shape()
    }

    /// Up to `n` upcoming bricks, next first
    pub fn next_bricks(&mut self, n: usize) -> Vec<Brick> {
        self.generator.get_next_bricks(n)
    }
}

impl Default for Board {
    fn default() -> Self {
        let config = BoardConfig::default();
        Self {
            grid: Grid::new(config.rows, config.cols),
            offset: Point::default(),
            rotator: BrickRotator::new(),
            generator: BrickGenerator::with_policy(
                Box::new(ShuffledBag::new(config.seed)),
                config.preview_size,
            ),
            score: Score::new(),
            score_policy: Box::new(SoftDropScoring),
            status: GameStatus::Playing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bricks::catalog;
    use crate::types::BrickKind;

    /// Deals only the given kind
    #[derive(Debug)]
    struct Only(BrickKind);

    impl BagPolicy for Only {
        fn create_bag(&mut self, _prototypes: &[Brick]) -> Vec<Brick> {
            vec![Brick::new(self.0)]
        }
    }

    fn board_of(kind: BrickKind, rows: usize, cols: usize) -> Board {
        Board::with_strategies(
            BoardConfig::with_size(rows, cols),
            Box::new(HorizontalKicks),
            Box::new(Only(kind)),
            Box::new(SoftDropScoring),
        )
        .unwrap()
    }

    #[test]
    fn test_operations_before_spawn_fail() {
        let mut board = Board::default();
        assert_eq!(board.move_brick_down(), Err(CoreError::NoActiveBrick));
        assert_eq!(board.rotate_left_brick(), Err(CoreError::NoActiveBrick));
        assert_eq!(board.view_data(), Err(CoreError::NoActiveBrick));
        assert_eq!(board.merge_brick_to_background(), Err(CoreError::NoActiveBrick));
    }

    #[test]
    fn test_spawn_is_centred() {
        let mut board = board_of(BrickKind::T, 22, 10);
        assert!(!board.create_new_brick());
        assert_eq!(board.current_offset(), Point::new(3, 1));

        let mut board = board_of(BrickKind::T, 22, 7);
        board.create_new_brick();
        assert_eq!(board.current_offset().x, 1);
    }

    #[test]
    fn test_o_brick_falls_to_floor() {
        let mut board = board_of(BrickKind::O, 8, 6);
        board.create_new_brick();
        let mut steps = 0;
        while board.move_brick_down().unwrap() {
            steps += 1;
        }
        // O occupies shape rows 1..=2, so it rests with its offset at rows - 3
        assert_eq!(board.current_offset().y, 5);
        assert_eq!(steps, 4);
    }

    #[test]
    fn test_walls_block_sideways_moves() {
        let mut board = board_of(BrickKind::O, 8, 6);
        board.create_new_brick();
        while board.move_brick_left().unwrap() {}
        // O's filled columns are 1..=2
        assert_eq!(board.current_offset().x, -1);
        while board.move_brick_right().unwrap() {}
        assert_eq!(board.current_offset().x, 3);
    }

    #[test]
    fn test_merge_and_clear() {
        let mut board = board_of(BrickKind::I, 6, 4);
        board.create_new_brick();
        while board.move_brick_down().unwrap() {}
        board.merge_brick_to_background().unwrap();
        assert_eq!(board.board_matrix().row(5), Some(&[1u8, 1, 1, 1][..]));

        let result = board.clear_rows();
        assert_eq!(result.lines_removed, 1);
        assert_eq!(result.cleared_rows, vec![5]);
        assert_eq!(result.score_bonus, 50);
        assert!(board.board_matrix().is_empty());
    }

    #[test]
    fn test_hard_drop_and_ghost() {
        let mut board = board_of(BrickKind::O, 10, 6);
        board.create_new_brick();
        let ghost = board.ghost_y().unwrap();
        assert_eq!(board.view_data().unwrap().ghost_y, ghost);
        let cells = board.hard_drop().unwrap();
        assert_eq!(cells, 6);
        assert_eq!(board.current_offset().y, ghost);
        assert!(!board.move_brick_down().unwrap());
    }

    #[test]
    fn test_drop_score_through_policy() {
        let mut board = board_of(BrickKind::O, 10, 6);
        board.create_new_brick();
        board.apply_drop_score(&MoveEvent::new(EventKind::Down, EventSource::User));
        board.apply_drop_score(&MoveEvent::new(EventKind::Down, EventSource::Timer));
        assert_eq!(board.score().value(), 1);
        board.apply_hard_drop_score(EventSource::User, 3);
        assert_eq!(board.score().value(), 7);
        board.apply_drop_score(&MoveEvent::new(EventKind::Rotate, EventSource::User));
        assert_eq!(board.score().value(), 7);
    }

    #[test]
    fn test_add_rows_rejects_wrong_width() {
        let mut board = board_of(BrickKind::O, 10, 6);
        assert_eq!(
            board.add_rows(&[vec![1, 1, 0]]),
            Err(CoreError::RowWidthMismatch {
                expected: 6,
                actual: 3
            })
        );
    }

    #[test]
    fn test_add_rows_shifts_content_up() {
        let mut board = board_of(BrickKind::O, 6, 4);
        let mut grid = board.board_matrix();
        grid.set(0, 5, 3);
        board.set_board_matrix(grid).unwrap();

        assert_eq!(board.add_rows(&[vec![1, 0, 1, 1], vec![2, 2, 0, 2]]), Ok(false));
        let rows = board.board_matrix().to_rows();
        assert_eq!(rows[3], vec![3, 0, 0, 0]);
        assert_eq!(rows[4], vec![1, 0, 1, 1]);
        assert_eq!(rows[5], vec![2, 2, 0, 2]);
    }

    #[test]
    fn test_view_data_preview() {
        let mut board = Board::with_config(BoardConfig::default().preview_size(5)).unwrap();
        board.new_game();
        let view = board.view_data().unwrap();
        assert_eq!(view.preview.len(), 5);
        assert_eq!(view.preview[0], view.next_shape);
        let next = board.next_bricks(5);
        let shapes: Vec<_> = next.iter().map(Brick::first_shape).collect();
        assert_eq!(shapes, view.preview);
        assert!(catalog().iter().any(|b| b.first_shape() == view.shape));
    }
}
