use core::fmt;
use core::str::FromStr;

use crate::*;

/// Named board presets, given as `(rows, cols, mines)`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Expert,
}

impl Difficulty {
    pub const ALL: [Self; 3] = [Self::Beginner, Self::Intermediate, Self::Expert];

    pub const fn game_config(self) -> GameConfig {
        use Difficulty::*;
        match self {
            Beginner => GameConfig::new_unchecked((9, 9), 10),
            Intermediate => GameConfig::new_unchecked((16, 16), 40),
            Expert => GameConfig::new_unchecked((30, 16), 99),
        }
    }

    pub const fn name(self) -> &'static str {
        use Difficulty::*;
        match self {
            Beginner => "beginner",
            Intermediate => "intermediate",
            Expert => "expert",
        }
    }

    /// The preset matching `config` exactly, if any.
    pub fn from_game_config(config: GameConfig) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|difficulty| difficulty.game_config() == config)
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::Beginner
    }
}

impl From<Difficulty> for GameConfig {
    fn from(difficulty: Difficulty) -> Self {
        difficulty.game_config()
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(thiserror::Error, Debug, Copy, Clone, PartialEq, Eq)]
#[error("Unknown difficulty, expected one of: beginner, intermediate, expert")]
pub struct UnknownDifficulty;

impl FromStr for Difficulty {
    type Err = UnknownDifficulty;

    fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|difficulty| difficulty.name().eq_ignore_ascii_case(s.trim()))
            .ok_or(UnknownDifficulty)
    }
}
