//! Bricks module - the seven brick prototypes and their rotation states
//!
//! Every rotation state is a 4x4 matrix whose filled cells hold the brick's
//! colour id. States are listed in rotation order; rotating steps to the next
//! state and wraps around. The tables are `'static` and never mutated, so a
//! `Brick` is just a kind tag plus a borrowed view of its table.

use crate::types::{BrickKind, Shape, BRICK_KIND_COUNT};

static I_SHAPES: [Shape; 2] = [
    [[0, 0, 0, 0], [1, 1, 1, 1], [0, 0, 0, 0], [0, 0, 0, 0]],
    [[0, 1, 0, 0], [0, 1, 0, 0], [0, 1, 0, 0], [0, 1, 0, 0]],
];

static J_SHAPES: [Shape; 4] = [
    [[0, 0, 0, 0], [2, 2, 2, 0], [0, 0, 2, 0], [0, 0, 0, 0]],
    [[0, 0, 0, 0], [0, 2, 2, 0], [0, 2, 0, 0], [0, 2, 0, 0]],
    [[0, 0, 0, 0], [0, 2, 0, 0], [0, 2, 2, 2], [0, 0, 0, 0]],
    [[0, 0, 2, 0], [0, 0, 2, 0], [0, 2, 2, 0], [0, 0, 0, 0]],
];

static L_SHAPES: [Shape; 4] = [
    [[0, 0, 0, 0], [0, 3, 3, 3], [0, 3, 0, 0], [0, 0, 0, 0]],
    [[0, 0, 0, 0], [0, 3, 3, 0], [0, 0, 3, 0], [0, 0, 3, 0]],
    [[0, 0, 0, 0], [0, 0, 3, 0], [3, 3, 3, 0], [0, 0, 0, 0]],
    [[0, 3, 0, 0], [0, 3, 0, 0], [0, 3, 3, 0], [0, 0, 0, 0]],
];

static O_SHAPES: [Shape; 1] = [[[0, 0, 0, 0], [0, 4, 4, 0], [0, 4, 4, 0], [0, 0, 0, 0]]];

static S_SHAPES: [Shape; 2] = [
    [[0, 0, 0, 0], [0, 5, 5, 0], [5, 5, 0, 0], [0, 0, 0, 0]],
    [[5, 0, 0, 0], [5, 5, 0, 0], [0, 5, 0, 0], [0, 0, 0, 0]],
];

static T_SHAPES: [Shape; 4] = [
    [[0, 0, 0, 0], [6, 6, 6, 0], [0, 6, 0, 0], [0, 0, 0, 0]],
    [[0, 6, 0, 0], [0, 6, 6, 0], [0, 6, 0, 0], [0, 0, 0, 0]],
    [[0, 6, 0, 0], [6, 6, 6, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
    [[0, 6, 0, 0], [6, 6, 0, 0], [0, 6, 0, 0], [0, 0, 0, 0]],
];

static Z_SHAPES: [Shape; 2] = [
    [[0, 0, 0, 0], [7, 7, 0, 0], [0, 7, 7, 0], [0, 0, 0, 0]],
    [[0, 7, 0, 0], [7, 7, 0, 0], [7, 0, 0, 0], [0, 0, 0, 0]],
];

/// Rotation-state table for a brick kind
pub fn shapes_for(kind: BrickKind) -> &'static [Shape] {
    match kind {
        BrickKind::I => &I_SHAPES,
        BrickKind::J => &J_SHAPES,
        BrickKind::L => &L_SHAPES,
        BrickKind::O => &O_SHAPES,
        BrickKind::S => &S_SHAPES,
        BrickKind::T => &T_SHAPES,
        BrickKind::Z => &Z_SHAPES,
    }
}

/// A brick: kind tag plus its immutable rotation states
///
/// Copying a `Brick` is the clone operation: the copy shares the static shape
/// table and carries no rotation index of its own (the rotator owns that).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Brick {
    kind: BrickKind,
    shapes: &'static [Shape],
}

impl Brick {
    /// Factory for a fresh brick of the given kind
    pub fn new(kind: BrickKind) -> Self {
        Self {
            kind,
            shapes: shapes_for(kind),
        }
    }

    pub fn kind(&self) -> BrickKind {
        self.kind
    }

    /// Colour id this brick paints into the grid
    pub fn id(&self) -> u8 {
        self.kind.id()
    }

    /// Rotation states in rotation order
    pub fn shapes(&self) -> &[Shape] {
        self.shapes
    }

    pub fn state_count(&self) -> usize {
        self.shapes.len()
    }

    /// Shape for a rotation index; wraps modulo the state count
    pub fn shape(&self, index: usize) -> Shape {
        self.shapes[index % self.shapes.len()]
    }

    /// Spawn orientation
    pub fn first_shape(&self) -> Shape {
        self.shapes[0]
    }
}

/// All seven prototypes in colour-id order
pub fn catalog() -> [Brick; BRICK_KIND_COUNT] {
    BrickKind::ALL.map(Brick::new)
}

/// Width of a shape matrix (column count of its first row)
pub fn shape_width<R: AsRef<[u8]>>(shape: &[R]) -> usize {
    shape.first().map_or(0, |row| row.as_ref().len())
}
