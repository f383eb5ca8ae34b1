#![no_std]

extern crate alloc;

use alloc::vec::Vec;
use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use cell::*;
pub use difficulty::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use save::*;
pub use types::*;

mod cell;
mod difficulty;
mod engine;
mod error;
mod generator;
mod save;
mod types;

/// Dimensions `(rows, cols)` and mine count of a board.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord2,
    pub mines: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(size: Coord2, mines: CellCount) -> Self {
        Self { size, mines }
    }

    /// Accepts any board with at least one mine and at least one safe cell.
    pub fn new(size: Coord2, mines: CellCount) -> Result<Self> {
        let config = Self::new_unchecked(size, mines);
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let (rows, cols) = self.size;
        if rows == 0 || cols == 0 {
            return Err(GameError::InvalidConfiguration);
        }
        if self.mines == 0 || self.mines >= self.total_cells() {
            return Err(GameError::InvalidConfiguration);
        }
        Ok(())
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells().saturating_sub(self.mines)
    }
}

/// Immutable mine positions together with the precomputed neighbour numbers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MineLayout {
    cells: Array2<Cell>,
    mine_count: CellCount,
}

impl MineLayout {
    pub fn from_mine_mask(mine_mask: &Array2<bool>) -> Self {
        let cells = Array2::from_shape_fn(mine_mask.dim(), |(row, col)| {
            let coords = (row as Coord, col as Coord);
            if mine_mask[coords.to_nd_index()] {
                Cell::Mine
            } else {
                let count = mine_mask
                    .iter_neighbors(coords)
                    .filter(|&pos| mine_mask[pos.to_nd_index()])
                    .count();
                Cell::Number(count as u8)
            }
        });
        Self::from_cells(cells)
    }

    /// Builds a layout from explicit mine positions; duplicates count once.
    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());

        for &coords in mine_coords {
            if coords.0 >= size.0 || coords.1 >= size.1 {
                return Err(GameError::OutOfBounds);
            }
            mine_mask[coords.to_nd_index()] = true;
        }

        let layout = Self::from_mine_mask(&mine_mask);
        layout.game_config().validate()?;
        Ok(layout)
    }

    /// Trusts that `cells` already hold consistent numbers.
    pub(crate) fn from_cells(cells: Array2<Cell>) -> Self {
        let mine_count = cells.iter().filter(|cell| cell.is_mine()).count() as CellCount;
        Self { cells, mine_count }
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig {
            size: self.size(),
            mines: self.mine_count,
        }
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size.0 && coords.1 < size.1 {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds)
        }
    }

    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.cells.dim();
        (rows as Coord, cols as Coord)
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn total_cells(&self) -> CellCount {
        self.cells.len() as CellCount
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self[coords].is_mine()
    }

    pub fn mine_coords(&self) -> Vec<Coord2> {
        self.cells
            .indexed_iter()
            .filter(|(_, cell)| cell.is_mine())
            .map(|((row, col), _)| (row as Coord, col as Coord))
            .collect()
    }

    pub(crate) fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.cells.iter_neighbors(coords)
    }
}

impl Index<Coord2> for MineLayout {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FlagOutcome {
    NoChange,
    Flagged,
    Unflagged,
}

impl FlagOutcome {
    /// Whether the shell needs to redraw.
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

/// Cells whose visibility changed during one reveal, and where the game ended up.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RevealOutcome {
    pub changed: Vec<Coord2>,
    pub status: GameStatus,
}

impl RevealOutcome {
    pub(crate) const fn unchanged(status: GameStatus) -> Self {
        Self {
            changed: Vec::new(),
            status,
        }
    }

    pub fn has_update(&self) -> bool {
        !self.changed.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_rejects_degenerate_boards() {
        assert_eq!(
            GameConfig::new((3, 3), 0),
            Err(GameError::InvalidConfiguration)
        );
        assert_eq!(
            GameConfig::new((3, 3), 9),
            Err(GameError::InvalidConfiguration)
        );
        assert_eq!(
            GameConfig::new((0, 3), 1),
            Err(GameError::InvalidConfiguration)
        );
        assert!(GameConfig::new((3, 3), 8).is_ok());
        assert!(GameConfig::new((1, 2), 1).is_ok());
    }

    #[test]
    fn layout_counts_neighbors() {
        let layout = MineLayout::from_mine_coords((3, 3), &[(0, 0), (2, 2)]).unwrap();

        assert_eq!(layout.mine_count(), 2);
        assert_eq!(layout[(0, 0)], Cell::Mine);
        assert_eq!(layout[(1, 1)], Cell::Number(2));
        assert_eq!(layout[(0, 2)], Cell::Number(0));
        assert_eq!(layout[(2, 1)], Cell::Number(1));
        assert_eq!(layout.safe_cell_count(), 7);
    }

    #[test]
    fn layout_rejects_out_of_bounds_mines() {
        assert_eq!(
            MineLayout::from_mine_coords((2, 2), &[(2, 0)]),
            Err(GameError::OutOfBounds)
        );
    }

    #[test]
    fn layout_rejects_full_or_empty_boards() {
        assert_eq!(
            MineLayout::from_mine_coords((1, 1), &[(0, 0)]),
            Err(GameError::InvalidConfiguration)
        );
        assert_eq!(
            MineLayout::from_mine_coords((2, 2), &[]),
            Err(GameError::InvalidConfiguration)
        );
    }
}
