//! Matrix operations - pure functions over the grid
//!
//! Collision testing, merging a shape into the background, deep copies and
//! full-row detection with compaction. Nothing here keeps state.
//!
//! Shapes are any rectangular slice of rows (`&[R]` where `R: AsRef<[u8]>`),
//! so the 4x4 brick states and ad-hoc test shapes like `[[1]]` both work.
//! A shape cell at `(col, row)` lands on grid cell `(x + col, y + row)`.

use crate::scoring::calculate_row_clear_bonus;
use crate::snapshot::ClearRow;
use crate::types::Grid;

/// Iterate the nonzero cells of a shape as `(col, row, value)`
fn filled_cells<R: AsRef<[u8]>>(shape: &[R]) -> impl Iterator<Item = (i32, i32, u8)> + '_ {
    shape.iter().enumerate().flat_map(|(row, cells)| {
        cells
            .as_ref()
            .iter()
            .enumerate()
            .filter(|&(_, &v)| v != 0)
            .map(move |(col, &v)| (col as i32, row as i32, v))
    })
}

/// True if any filled shape cell at offset `(x, y)` is out of bounds or
/// lands on an occupied grid cell
pub fn intersect<R: AsRef<[u8]>>(grid: &Grid, shape: &[R], x: i32, y: i32) -> bool {
    filled_cells(shape).any(|(col, row, _)| match grid.get(x + col, y + row) {
        Some(cell) => cell != 0,
        None => true,
    })
}

/// Deep copy of the grid
pub fn copy(grid: &Grid) -> Grid {
    grid.clone()
}

/// New grid with the shape written in at `(x, y)`; the input is untouched
///
/// Cells that fall outside the grid are skipped.
pub fn merge<R: AsRef<[u8]>>(grid: &Grid, shape: &[R], x: i32, y: i32) -> Grid {
    let mut merged = copy(grid);
    for (col, row, value) in filled_cells(shape) {
        merged.set(x + col, y + row, value);
    }
    merged
}

/// Find full rows, remove them and compact the rest downward
///
/// Rows are scanned bottom to top with a two-pointer pass; every surviving
/// row keeps its relative order and the vacated rows at the top are zeroed.
/// `cleared_rows` lists the removed indices top to bottom.
pub fn check_removing(grid: &Grid) -> ClearRow {
    let mut compacted = copy(grid);
    let mut cleared_rows = Vec::new();
    let mut write_y = grid.rows();

    for read_y in (0..grid.rows()).rev() {
        if grid.is_row_full(read_y) {
            cleared_rows.push(read_y);
        } else {
            write_y -= 1;
            compacted.copy_row(read_y, write_y);
        }
    }

    for y in 0..write_y {
        compacted.fill_row(y, 0);
    }

    cleared_rows.reverse();
    let lines_removed = cleared_rows.len();

    ClearRow {
        lines_removed,
        grid: compacted,
        score_bonus: calculate_row_clear_bonus(lines_removed),
        cleared_rows,
    }
}

/// Rows the shape can fall from `(x, y)` before it would collide
///
/// Returns 0 when the shape is already blocked (or already colliding).
pub fn drop_distance<R: AsRef<[u8]>>(grid: &Grid, shape: &[R], x: i32, y: i32) -> i32 {
    if intersect(grid, shape, x, y) {
        return 0;
    }
    let mut distance = 0;
    while distance <= grid.rows() as i32 && !intersect(grid, shape, x, y + distance + 1) {
        distance += 1;
    }
    distance
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: Vec<Vec<u8>>) -> Grid {
        Grid::from_rows(rows).unwrap()
    }

    #[test]
    fn test_intersect_out_of_bounds() {
        let g = Grid::new(4, 4);
        assert!(intersect(&g, &[[1u8]], -1, 0));
        assert!(intersect(&g, &[[1u8]], 0, -1));
        assert!(intersect(&g, &[[1u8]], 4, 0));
        assert!(intersect(&g, &[[1u8]], 0, 4));
        assert!(!intersect(&g, &[[1u8]], 0, 0));
        assert!(!intersect(&g, &[[1u8]], 3, 3));
    }

    #[test]
    fn test_intersect_ignores_empty_shape_cells() {
        let g = Grid::new(4, 4);
        // Left column of the shape is empty, so it may hang off the left edge
        let shape = [[0u8, 2], [0, 2]];
        assert!(!intersect(&g, &shape, -1, 0));
        assert!(intersect(&g, &shape, -2, 0));
    }

    #[test]
    fn test_intersect_occupied_cell() {
        let g = grid(vec![vec![0, 0, 0], vec![0, 5, 0], vec![0, 0, 0]]);
        assert!(intersect(&g, &[[1u8]], 1, 1));
        assert!(!intersect(&g, &[[1u8]], 0, 1));
    }

    #[test]
    fn test_merge_leaves_input_untouched() {
        let g = Grid::new(3, 3);
        let merged = merge(&g, &[[4u8, 0], [4, 4]], 1, 0);

        assert_eq!(
            merged.to_rows(),
            vec![vec![0, 4, 0], vec![0, 4, 4], vec![0, 0, 0]]
        );
        assert!(g.is_empty());
    }

    #[test]
    fn test_check_removing_nothing_full() {
        let g = grid(vec![vec![0, 1], vec![1, 0]]);
        let result = check_removing(&g);
        assert_eq!(result.lines_removed, 0);
        assert_eq!(result.score_bonus, 0);
        assert!(result.cleared_rows.is_empty());
        assert_eq!(result.grid, g);
    }

    #[test]
    fn test_check_removing_compacts_in_order() {
        let g = grid(vec![
            vec![1, 1, 1],
            vec![0, 0, 0],
            vec![2, 2, 2],
            vec![0, 3, 0],
        ]);
        let result = check_removing(&g);

        assert_eq!(result.lines_removed, 2);
        assert_eq!(result.cleared_rows, vec![0, 2]);
        assert_eq!(result.score_bonus, 200);
        assert_eq!(
            result.grid.to_rows(),
            vec![vec![0, 0, 0], vec![0, 0, 0], vec![0, 0, 0], vec![0, 3, 0]]
        );
        assert_eq!(result.grid.rows(), 4);
    }

    #[test]
    fn test_check_removing_entire_board() {
        let g = grid(vec![vec![7; 3]; 5]);
        let result = check_removing(&g);
        assert_eq!(result.lines_removed, 5);
        assert_eq!(result.cleared_rows, vec![0, 1, 2, 3, 4]);
        assert_eq!(result.score_bonus, 50 * 25);
        assert!(result.grid.is_empty());
    }

    #[test]
    fn test_drop_distance() {
        let mut g = Grid::new(6, 3);
        assert_eq!(drop_distance(&g, &[[1u8]], 0, 0), 5);
        g.set(0, 3, 2);
        assert_eq!(drop_distance(&g, &[[1u8]], 0, 0), 2);
        assert_eq!(drop_distance(&g, &[[1u8]], 0, 2), 0);
    }

    #[test]
    fn test_drop_distance_when_already_colliding() {
        let mut g = Grid::new(6, 3);
        g.set(0, 0, 4);
        assert_eq!(drop_distance(&g, &[[1u8]], 0, 0), 0);
        // Hanging off the grid counts as colliding too
        assert_eq!(drop_distance(&g, &[[1u8]], -1, 0), 0);
    }
}
