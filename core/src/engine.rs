use alloc::collections::VecDeque;
use alloc::vec::Vec;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - InProgress -> Won
/// - InProgress -> Lost
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// Accepting moves and counting time, from generation on
    InProgress,
    Won,
    Lost,
}

impl GameStatus {
    /// Terminal states accept only queries and serialization.
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for GameStatus {
    fn default() -> Self {
        Self::InProgress
    }
}

/// Authoritative game state: mine layout, per-cell visibility, counters and clock.
#[derive(Clone, Debug, PartialEq)]
pub struct Board {
    layout: MineLayout,
    visibility: Array2<Visibility>,
    revealed_count: CellCount,
    flagged_count: CellCount,
    status: GameStatus,
    elapsed: u32,
    triggered_mine: Option<Coord2>,
}

impl Board {
    pub fn new(layout: MineLayout) -> Self {
        let size = layout.size();
        Self {
            layout,
            visibility: Array2::default(size.to_nd_index()),
            revealed_count: 0,
            flagged_count: 0,
            status: Default::default(),
            elapsed: 0,
            triggered_mine: None,
        }
    }

    /// Generates a fresh board with mines sampled from `seed`.
    pub fn new_game(config: GameConfig, seed: u64) -> Result<Self> {
        let layout = RandomLayoutGenerator::new(seed).generate(config)?;
        log::debug!("New game: {:?}", config);
        Ok(Self::new(layout))
    }

    /// Rebuilds a board from already validated parts, recounting the derived counters.
    pub(crate) fn from_parts(
        layout: MineLayout,
        visibility: Array2<Visibility>,
        status: GameStatus,
        elapsed: u32,
        triggered_mine: Option<Coord2>,
    ) -> Self {
        let mut revealed_count = 0;
        let mut flagged_count = 0;
        for ((row, col), vis) in visibility.indexed_iter() {
            match vis {
                Visibility::Revealed if !layout.contains_mine((row as Coord, col as Coord)) => {
                    revealed_count += 1
                }
                Visibility::Flagged => flagged_count += 1,
                _ => {}
            }
        }

        Self {
            layout,
            visibility,
            revealed_count,
            flagged_count,
            status,
            elapsed,
            triggered_mine,
        }
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_finished()
    }

    pub fn size(&self) -> Coord2 {
        self.layout.size()
    }

    pub fn layout(&self) -> &MineLayout {
        &self.layout
    }

    pub fn total_mines(&self) -> CellCount {
        self.layout.mine_count()
    }

    /// Mine total minus placed flags; negative when over-flagged.
    pub fn remaining_mines(&self) -> isize {
        (self.layout.mine_count() as isize) - (self.flagged_count as isize)
    }

    pub fn elapsed(&self) -> u32 {
        self.elapsed
    }

    pub fn cell_at(&self, coords: Coord2) -> Cell {
        self.layout[coords]
    }

    pub fn visibility_at(&self, coords: Coord2) -> Visibility {
        self.visibility[coords.to_nd_index()]
    }

    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    pub fn revealed_safe_cells(&self) -> CellCount {
        self.revealed_count
    }

    /// Advances the clock by one second until the game ends.
    pub fn tick(&mut self) -> bool {
        if !self.status.is_finished() {
            self.elapsed = self.elapsed.saturating_add(1);
            true
        } else {
            false
        }
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<FlagOutcome> {
        let coords = self.layout.validate_coords(coords)?;
        if self.status.is_finished() {
            return Ok(FlagOutcome::NoChange);
        }

        let cell = &mut self.visibility[coords.to_nd_index()];
        Ok(match *cell {
            Visibility::Hidden => {
                *cell = Visibility::Flagged;
                self.flagged_count += 1;
                FlagOutcome::Flagged
            }
            Visibility::Flagged => {
                *cell = Visibility::Hidden;
                self.flagged_count -= 1;
                FlagOutcome::Unflagged
            }
            Visibility::Revealed => FlagOutcome::NoChange,
        })
    }

    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.layout.validate_coords(coords)?;

        if self.status.is_finished()
            || !matches!(self.visibility[coords.to_nd_index()], Visibility::Hidden)
        {
            return Ok(RevealOutcome::unchanged(self.status));
        }

        let changed = if self.layout.contains_mine(coords) {
            self.explode(coords)
        } else {
            let changed = self.flood_reveal(coords);
            if self.revealed_count == self.layout.safe_cell_count() {
                self.end_game(true);
            }
            changed
        };

        Ok(RevealOutcome {
            changed,
            status: self.status,
        })
    }

    /// Reveals `start` and, from every zero cell reached, its hidden neighbours.
    ///
    /// A cell is marked revealed as soon as it is dequeued, and only hidden cells
    /// are ever revealed, so each cell is visited at most once.
    fn flood_reveal(&mut self, start: Coord2) -> Vec<Coord2> {
        let mut changed = Vec::new();
        let mut to_visit = VecDeque::from([start]);

        while let Some(visit_coords) = to_visit.pop_front() {
            if !matches!(
                self.visibility[visit_coords.to_nd_index()],
                Visibility::Hidden
            ) {
                continue;
            }

            let Cell::Number(count) = self.layout[visit_coords] else {
                continue;
            };
            self.visibility[visit_coords.to_nd_index()] = Visibility::Revealed;
            self.revealed_count += 1;
            changed.push(visit_coords);
            log::trace!("Revealed cell at {:?}, mine count: {}", visit_coords, count);

            if count == 0 {
                to_visit.extend(self.layout.iter_neighbors(visit_coords).filter(|&pos| {
                    matches!(self.visibility[pos.to_nd_index()], Visibility::Hidden)
                }));
            }
        }

        log::debug!("Reveal at {:?} opened {} cells", start, changed.len());
        changed
    }

    /// Loses the game on `coords` and discloses every cell not yet revealed.
    fn explode(&mut self, coords: Coord2) -> Vec<Coord2> {
        self.triggered_mine = Some(coords);
        self.end_game(false);

        let mut changed = Vec::from([coords]);
        self.visibility[coords.to_nd_index()] = Visibility::Revealed;
        for ((row, col), vis) in self.visibility.indexed_iter_mut() {
            if *vis != Visibility::Revealed {
                *vis = Visibility::Revealed;
                changed.push((row as Coord, col as Coord));
            }
        }
        self.flagged_count = 0;
        self.revealed_count = self.layout.safe_cell_count();
        changed
    }

    fn end_game(&mut self, won: bool) {
        if self.status.is_finished() {
            return;
        }

        self.status = if won {
            GameStatus::Won
        } else {
            GameStatus::Lost
        };
        log::debug!("Game ended as {:?} after {}s", self.status, self.elapsed);
    }
}
