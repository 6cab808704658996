//! Rotator module - the active brick and its rotation index

use tracing::trace;

use crate::bricks::Brick;
use crate::error::{CoreError, Result};
use crate::kicks::{HorizontalKicks, RotationStrategy};
use crate::types::{Grid, Point, Shape};

/// The shape one rotation step ahead, and its index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NextShapeInfo {
    pub shape: Shape,
    pub index: usize,
}

#[derive(Debug)]
pub struct BrickRotator {
    brick: Option<Brick>,
    current_shape_index: usize,
    strategy: Box<dyn RotationStrategy>,
}

impl BrickRotator {
    pub fn new() -> Self {
        Self::with_strategy(Box::new(HorizontalKicks))
    }

    pub fn with_strategy(strategy: Box<dyn RotationStrategy>) -> Self {
        Self {
            brick: None,
            current_shape_index: 0,
            strategy,
        }
    }

    /// Make `brick` the active brick in its spawn orientation
    pub fn set_brick(&mut self, brick: Brick) {
        self.brick = Some(brick);
        self.current_shape_index = 0;
    }

    pub fn brick(&self) -> Option<Brick> {
        self.brick
    }

    pub fn current_shape_index(&self) -> usize {
        self.current_shape_index
    }

    fn active(&self) -> Result<Brick> {
        self.brick.ok_or(CoreError::NoActiveBrick)
    }

    pub fn current_shape(&self) -> Result<Shape> {
        Ok(self.active()?.shape(self.current_shape_index))
    }

    /// Shape after one more rotation step; does not rotate
    pub fn peek_next_rotation(&self) -> Result<NextShapeInfo> {
        let brick = self.active()?;
        let index = (self.current_shape_index + 1) % brick.state_count();
        Ok(NextShapeInfo {
            shape: brick.shape(index),
            index,
        })
    }

    /// Rotate if the strategy finds room
    ///
    /// Returns the offset the brick should move to, or `None` when the
    /// rotation is rejected (in which case nothing changes).
    pub fn try_rotate_left(&mut self, grid: &Grid, offset: Point) -> Result<Option<Point>> {
        let next = self.peek_next_rotation()?;
        match self
            .strategy
            .find_offset_for_rotation(grid, &next.shape, offset)
        {
            Some(position) => {
                self.current_shape_index = next.index;
                Ok(Some(position))
            }
            None => {
                trace!(x = offset.x, y = offset.y, "rotation rejected");
                Ok(None)
            }
        }
    }
}

impl Default for BrickRotator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kicks::NoKicks;
    use crate::types::BrickKind;

    #[test]
    fn test_queries_without_brick_fail() {
        let rotator = BrickRotator::new();
        assert_eq!(rotator.current_shape(), Err(CoreError::NoActiveBrick));
        assert_eq!(rotator.peek_next_rotation(), Err(CoreError::NoActiveBrick));

        let mut rotator = BrickRotator::new();
        let grid = Grid::new(10, 10);
        assert_eq!(
            rotator.try_rotate_left(&grid, Point::new(0, 0)),
            Err(CoreError::NoActiveBrick)
        );
    }

    #[test]
    fn test_set_brick_resets_index() {
        let mut rotator = BrickRotator::new();
        let grid = Grid::new(10, 10);
        rotator.set_brick(Brick::new(BrickKind::T));
        rotator.try_rotate_left(&grid, Point::new(3, 3)).unwrap();
        assert_eq!(rotator.current_shape_index(), 1);

        rotator.set_brick(Brick::new(BrickKind::J));
        assert_eq!(rotator.current_shape_index(), 0);
        assert_eq!(
            rotator.current_shape().unwrap(),
            Brick::new(BrickKind::J).first_shape()
        );
    }

    #[test]
    fn test_peek_wraps_without_mutating() {
        let mut rotator = BrickRotator::new();
        rotator.set_brick(Brick::new(BrickKind::O));
        let next = rotator.peek_next_rotation().unwrap();
        assert_eq!(next.index, 0);

        rotator.set_brick(Brick::new(BrickKind::I));
        let next = rotator.peek_next_rotation().unwrap();
        assert_eq!(next.index, 1);
        assert_eq!(rotator.current_shape_index(), 0);
    }

    #[test]
    fn test_full_rotation_cycle_returns_to_start() {
        let mut rotator = BrickRotator::new();
        let grid = Grid::new(10, 10);
        rotator.set_brick(Brick::new(BrickKind::L));
        let start = rotator.current_shape().unwrap();
        for _ in 0..4 {
            assert!(rotator.try_rotate_left(&grid, Point::new(3, 3)).unwrap().is_some());
        }
        assert_eq!(rotator.current_shape().unwrap(), start);
    }

    #[test]
    fn test_rejected_rotation_keeps_state() {
        let mut rotator = BrickRotator::with_strategy(Box::new(NoKicks));
        // I brick lying on row 1 at the top-left; its vertical state needs
        // column 1 rows 0..4, block row 3
        let mut grid = Grid::new(4, 4);
        grid.set(1, 3, 2);
        rotator.set_brick(Brick::new(BrickKind::I));

        assert_eq!(rotator.try_rotate_left(&grid, Point::new(0, 0)), Ok(None));
        assert_eq!(rotator.current_shape_index(), 0);
    }
}
