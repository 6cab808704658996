//! Kicks module - where a rotated brick may go
//!
//! When the rotated shape collides in place, the default strategy slides it
//! sideways: one column left, one right, two left, two right. The first
//! legal offset wins, so smaller kicks beat larger ones and left beats right.

use std::fmt;

use crate::matrix::intersect;
use crate::types::{Grid, Point, Shape};

/// Column offsets tried, in order, when the rotation collides in place
pub const HORIZONTAL_KICKS: [i32; 4] = [-1, 1, -2, 2];

/// Finds a legal offset for a rotated shape
pub trait RotationStrategy: fmt::Debug + Send {
    /// `None` rejects the rotation
    fn find_offset_for_rotation(&self, grid: &Grid, shape: &Shape, offset: Point)
        -> Option<Point>;
}

/// In place, then the horizontal kick sequence
#[derive(Debug, Clone, Copy, Default)]
pub struct HorizontalKicks;

impl RotationStrategy for HorizontalKicks {
    fn find_offset_for_rotation(
        &self,
        grid: &Grid,
        shape: &Shape,
        offset: Point,
    ) -> Option<Point> {
        if !intersect(grid, shape, offset.x, offset.y) {
            return Some(offset);
        }

        HORIZONTAL_KICKS
            .iter()
            .map(|&dx| offset.translated(dx, 0))
            .find(|p| !intersect(grid, shape, p.x, p.y))
    }
}

/// Rotate in place or not at all
#[derive(Debug, Clone, Copy, Default)]
pub struct NoKicks;

impl RotationStrategy for NoKicks {
    fn find_offset_for_rotation(
        &self,
        grid: &Grid,
        shape: &Shape,
        offset: Point,
    ) -> Option<Point> {
        (!intersect(grid, shape, offset.x, offset.y)).then_some(offset)
    }
}
