use std::fmt;
use sweeper_core::{Board, Cell, Coord2, GameStatus, Visibility};

pub(crate) fn glyph(board: &Board, coords: Coord2) -> char {
    match (board.visibility_at(coords), board.cell_at(coords)) {
        (Visibility::Hidden, _) => '#',
        (Visibility::Flagged, _) => 'F',
        (Visibility::Revealed, Cell::Mine) if board.triggered_mine() == Some(coords) => 'X',
        (Visibility::Revealed, Cell::Mine) => '*',
        (Visibility::Revealed, Cell::Number(0)) => '.',
        (Visibility::Revealed, Cell::Number(count)) => char::from(b'0' + count),
    }
}

pub(crate) fn status_message(status: GameStatus) -> Option<&'static str> {
    match status {
        GameStatus::InProgress => None,
        GameStatus::Won => Some("Congratulations! You Win!"),
        GameStatus::Lost => Some("Game Over! You clicked on a mine."),
    }
}

/// Text presentation of a board: counters, then one row of glyphs per line.
pub(crate) struct BoardView<'a>(pub &'a Board);

impl fmt::Display for BoardView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let board = self.0;
        let (rows, cols) = board.size();

        writeln!(
            f,
            "Mines: {}  Time: {}",
            board.remaining_mines(),
            board.elapsed()
        )?;
        write!(f, "    ")?;
        for col in 0..cols {
            write!(f, "{:>3}", col)?;
        }
        writeln!(f)?;
        for row in 0..rows {
            write!(f, "{:>3} ", row)?;
            for col in 0..cols {
                write!(f, "{:>3}", glyph(board, (row, col)))?;
            }
            writeln!(f)?;
        }
        if let Some(message) = status_message(board.status()) {
            writeln!(f, "{}", message)?;
        }
        Ok(())
    }
}
