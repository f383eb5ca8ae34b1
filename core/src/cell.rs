use serde::{Deserialize, Serialize};

/// Fixed content of a cell, decided when the board is generated.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cell {
    Mine,
    /// Number of mines among the up-to-eight neighbours, `0..=8`.
    Number(u8),
}

impl Cell {
    pub const fn is_mine(self) -> bool {
        matches!(self, Self::Mine)
    }

    /// Integer form used by the save file: `-1` for a mine, the number otherwise.
    pub const fn to_code(self) -> i8 {
        match self {
            Self::Mine => -1,
            Self::Number(count) => count as i8,
        }
    }

    pub const fn from_code(code: i8) -> Option<Self> {
        match code {
            -1 => Some(Self::Mine),
            0..=8 => Some(Self::Number(code as u8)),
            _ => None,
        }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::Number(0)
    }
}

/// Canonical player-visible state stored by the engine.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Visibility {
    Hidden,
    Revealed,
    Flagged,
}

impl Visibility {
    pub const fn is_unrevealed(self) -> bool {
        matches!(self, Self::Hidden | Self::Flagged)
    }
}

impl Default for Visibility {
    fn default() -> Self {
        Self::Hidden
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_cover_mine_and_numbers() {
        assert_eq!(Cell::from_code(-1), Some(Cell::Mine));
        assert_eq!(Cell::from_code(8), Some(Cell::Number(8)));
        assert_eq!(Cell::from_code(9), None);
        assert_eq!(Cell::from_code(-2), None);
        assert_eq!(Cell::Number(3).to_code(), 3);
    }
}
