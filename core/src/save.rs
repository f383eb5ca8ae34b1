use alloc::string::{String, ToString};
use alloc::vec::Vec;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Persisted form of a [`Board`], stored as JSON.
///
/// `board` holds `-1` for a mine and the neighbour count otherwise. `mine_count` is the
/// remaining-mines counter shown to the player, not the mine total. `buttons` carries the
/// display string of every cell, which older saves use as their only visibility record;
/// when `visibility` is present it takes precedence, since an empty display string cannot
/// tell a hidden cell from a revealed zero.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SaveState {
    pub board: Vec<Vec<i8>>,
    pub mine_count: isize,
    pub timer: u32,
    pub game_over: bool,
    #[serde(default)]
    pub buttons: Vec<Vec<String>>,
    #[serde(default)]
    pub status: Option<GameStatus>,
    #[serde(default)]
    pub visibility: Option<Vec<Vec<Visibility>>>,
    #[serde(default)]
    pub triggered: Option<Coord2>,
}

impl SaveState {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|err| {
            log::warn!("Could not parse save data: {}", err);
            CorruptReason::Malformed.into()
        })
    }
}

/// Display string of a cell as the legacy save format records it.
fn display_string(cell: Cell, visibility: Visibility) -> String {
    match (visibility, cell) {
        (Visibility::Hidden, _) => String::new(),
        (Visibility::Flagged, _) => "F".to_string(),
        (Visibility::Revealed, Cell::Mine) => "M".to_string(),
        (Visibility::Revealed, Cell::Number(0)) => String::new(),
        (Visibility::Revealed, Cell::Number(count)) => count.to_string(),
    }
}

/// Reads a legacy display string back into a visibility.
fn parse_display_string(text: &str, cell: Cell) -> Result<Visibility> {
    match text {
        "F" => Ok(Visibility::Flagged),
        "M" if cell.is_mine() => Ok(Visibility::Revealed),
        _ => match text.parse::<u8>() {
            Ok(digit) if cell == Cell::Number(digit) => Ok(Visibility::Revealed),
            Ok(_) => Err(CorruptReason::VisibilityMismatch.into()),
            Err(_) => Ok(Visibility::Hidden),
        },
    }
}

/// Checks that `grid` is `rows` x `cols` and converts it.
fn grid_to_array<T, U>(
    grid: &[Vec<T>],
    (rows, cols): (usize, usize),
    mut convert: impl FnMut((usize, usize), &T) -> Result<U>,
) -> Result<Array2<U>> {
    if grid.len() != rows || grid.iter().any(|row| row.len() != cols) {
        return Err(CorruptReason::ShapeMismatch.into());
    }

    let mut items = Vec::with_capacity(rows * cols);
    for (row, values) in grid.iter().enumerate() {
        for (col, value) in values.iter().enumerate() {
            items.push(convert((row, col), value)?);
        }
    }
    Array2::from_shape_vec((rows, cols), items).map_err(|_| CorruptReason::ShapeMismatch.into())
}

fn decode_layout(board: &[Vec<i8>]) -> Result<MineLayout> {
    let rows = board.len();
    let cols = board.first().map_or(0, Vec::len);
    let max = usize::from(Coord::MAX);
    if rows == 0 || cols == 0 || rows > max || cols > max {
        return Err(CorruptReason::BadDimensions.into());
    }
    if board.iter().any(|row| row.len() != cols) {
        return Err(CorruptReason::RaggedGrid.into());
    }

    let cells = grid_to_array(board, (rows, cols), |_, &code| {
        Cell::from_code(code).ok_or(CorruptReason::BadCellValue.into())
    })?;

    let mine_mask = cells.map(|cell| cell.is_mine());
    let layout = MineLayout::from_mine_mask(&mine_mask);
    if layout.cells != cells {
        return Err(CorruptReason::InconsistentNumbers.into());
    }
    if layout.game_config().validate().is_err() {
        return Err(CorruptReason::BadMineCount.into());
    }

    Ok(layout)
}

impl Board {
    pub fn serialize(&self) -> SaveState {
        let (rows, cols) = self.size();
        let coords = || (0..rows).map(move |row| (0..cols).map(move |col| (row, col)));

        SaveState {
            board: coords()
                .map(|row| row.map(|pos| self.cell_at(pos).to_code()).collect())
                .collect(),
            mine_count: self.remaining_mines(),
            timer: self.elapsed(),
            game_over: self.is_finished(),
            buttons: coords()
                .map(|row| {
                    row.map(|pos| display_string(self.cell_at(pos), self.visibility_at(pos)))
                        .collect()
                })
                .collect(),
            status: Some(self.status()),
            visibility: Some(
                coords()
                    .map(|row| row.map(|pos| self.visibility_at(pos)).collect())
                    .collect(),
            ),
            triggered: self.triggered_mine(),
        }
    }

    /// Rebuilds a board from a save, rejecting anything that is not a reachable state.
    ///
    /// A lost board is fully disclosed and a won board has every safe cell revealed, even
    /// when the save left some of those cells hidden.
    pub fn deserialize(state: &SaveState) -> Result<Self> {
        let layout = decode_layout(&state.board)?;
        let (rows, cols) = layout.size();
        let shape = (usize::from(rows), usize::from(cols));
        let cell_at = |(row, col): (usize, usize)| layout[(row as Coord, col as Coord)];

        let mut visibility = match &state.visibility {
            Some(grid) => grid_to_array(grid, shape, |_, &vis| Ok(vis))?,
            None => grid_to_array(&state.buttons, shape, |index, text| {
                parse_display_string(text, cell_at(index))
            })?,
        };

        let mine_revealed = visibility
            .indexed_iter()
            .any(|(index, &vis)| vis == Visibility::Revealed && cell_at(index).is_mine());

        let status = match state.status {
            Some(status) if status.is_finished() != state.game_over => {
                return Err(CorruptReason::InconsistentStatus.into());
            }
            Some(status) => status,
            None if mine_revealed => GameStatus::Lost,
            None if state.game_over => GameStatus::Won,
            None => GameStatus::InProgress,
        };

        if mine_revealed && status != GameStatus::Lost {
            return Err(CorruptReason::InconsistentStatus.into());
        }

        let mut normalized = 0;
        for (index, vis) in visibility.indexed_iter_mut() {
            let disclose = match status {
                GameStatus::Lost => true,
                GameStatus::Won => !cell_at(index).is_mine(),
                _ => false,
            };
            if disclose && *vis != Visibility::Revealed {
                *vis = Visibility::Revealed;
                normalized += 1;
            }
        }
        if normalized > 0 {
            log::warn!(
                "Save marked {:?} but left {} cells undisclosed, revealed them",
                status,
                normalized
            );
        }

        if let Some(coords) = state.triggered {
            let valid = layout.validate_coords(coords).is_ok()
                && layout.contains_mine(coords)
                && status == GameStatus::Lost;
            if !valid {
                return Err(CorruptReason::BadTriggeredMine.into());
            }
        }

        let board = Board::from_parts(layout, visibility, status, state.timer, state.triggered);
        if !status.is_finished() && board.revealed_safe_cells() == board.layout().safe_cell_count()
        {
            return Err(CorruptReason::InconsistentStatus.into());
        }
        if board.remaining_mines() != state.mine_count {
            log::warn!(
                "Saved mine counter {} disagrees with flags on the board, using {}",
                state.mine_count,
                board.remaining_mines()
            );
        }

        log::debug!(
            "Loaded {}x{} board in state {:?}",
            rows,
            cols,
            board.status()
        );
        Ok(board)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        self.serialize().to_json()
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Self::deserialize(&SaveState::from_json(json)?)
    }
}
