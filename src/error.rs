use thiserror::Error;

/// Errors raised while building or collapsing a `Wave`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WaveError {
    /// Propagation emptied the superposition of the slot at `(x, y)`.
    #[error("no possible modules for slot ({x}, {y})")]
    Contradiction { x: usize, y: usize },

    #[error("tile set is empty")]
    EmptyTileSet,

    #[error("invalid grid dimensions {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    /// All tiles of a set must share the size of the first one.
    #[error("tile {index} is {}x{}, expected {}x{}", found.0, found.1, expected.0, expected.1)]
    TileSizeMismatch {
        index: usize,
        expected: (u32, u32),
        found: (u32, u32),
    },

    #[error("tile {index} has no pixels")]
    ZeroSizedTile { index: usize },
}
