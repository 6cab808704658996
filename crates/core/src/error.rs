use thiserror::Error;

/// Errors raised by the engine
///
/// Rejected moves and rotations are not errors; they come back as `false`
/// or `None`. These variants cover misuse of the API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("no active brick: spawn one with create_new_brick or new_game first")]
    NoActiveBrick,
    #[error("row has {actual} cells, board is {expected} columns wide")]
    RowWidthMismatch { expected: usize, actual: usize },
    #[error("invalid board dimensions {rows}x{cols}")]
    InvalidDimensions { rows: usize, cols: usize },
}

pub type Result<T, E = CoreError> = std::result::Result<T, E>;
