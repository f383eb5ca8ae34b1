use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid configuration: need at least one mine and one safe cell")]
    InvalidConfiguration,
    #[error("Coordinates out of bounds")]
    OutOfBounds,
    #[error("Corrupt save data: {0}")]
    CorruptSaveData(CorruptReason),
}

/// Why a save could not be turned back into a board.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum CorruptReason {
    #[error("malformed document or missing field")]
    Malformed,
    #[error("board is empty or too large")]
    BadDimensions,
    #[error("rows have differing lengths")]
    RaggedGrid,
    #[error("visibility grid does not match the board shape")]
    ShapeMismatch,
    #[error("cell value outside -1..=8")]
    BadCellValue,
    #[error("numbers do not match mine positions")]
    InconsistentNumbers,
    #[error("mine count outside the valid range")]
    BadMineCount,
    #[error("displayed digit does not match the cell")]
    VisibilityMismatch,
    #[error("game status contradicts the board")]
    InconsistentStatus,
    #[error("triggered mine is not a mine on the board")]
    BadTriggeredMine,
}

impl From<CorruptReason> for GameError {
    fn from(reason: CorruptReason) -> Self {
        Self::CorruptSaveData(reason)
    }
}

pub type Result<T> = core::result::Result<T, GameError>;
