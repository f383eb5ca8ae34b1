use sweeper_core::{Board, GameConfig, SaveState};

use crate::storage::{Storage, StorageKey};

impl StorageKey for SaveState {
    const KEY: &'static str = "minesweeper_save";
}

/// The board being played plus whether it differs from what is on disk.
#[derive(Debug)]
pub(crate) struct GameSession {
    pub board: Board,
    dirty: bool,
}

impl GameSession {
    pub(crate) fn new(config: GameConfig, seed: u64) -> anyhow::Result<Self> {
        let board = Board::new_game(config, seed)?;
        log::info!(
            "new {}x{} game with {} mines",
            config.size.0,
            config.size.1,
            config.mines
        );
        Ok(Self { board, dirty: true })
    }

    /// Resumes the saved game; a missing or corrupt save starts a new one instead.
    pub(crate) fn load_or_new(
        storage: &Storage,
        config: GameConfig,
        seed: u64,
    ) -> anyhow::Result<Self> {
        let Some(json) = storage.read::<SaveState>()? else {
            return Self::new(config, seed);
        };

        match Board::from_json(&json) {
            Ok(board) => Ok(Self {
                board,
                dirty: false,
            }),
            Err(err) => {
                log::warn!("discarding saved game: {}", err);
                Self::new(config, seed)
            }
        }
    }

    pub(crate) fn mark_changed(&mut self, changed: bool) {
        self.dirty |= changed;
    }

    pub(crate) fn save_if_changed(&mut self, storage: &Storage) -> anyhow::Result<()> {
        if self.dirty {
            storage.save(&self.board.serialize())?;
            self.dirty = false;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::tests::scratch_dir;
    use sweeper_core::{Difficulty, GameStatus};

    fn beginner() -> GameConfig {
        Difficulty::Beginner.game_config()
    }

    #[test]
    fn missing_save_starts_fresh_game() {
        let storage = Storage::new(scratch_dir("session-missing"));

        let session = GameSession::load_or_new(&storage, beginner(), 1).unwrap();

        assert_eq!(session.board.status(), GameStatus::InProgress);
        assert_eq!(session.board.size(), (9, 9));
    }

    #[test]
    fn saved_game_is_resumed() {
        let storage = Storage::new(scratch_dir("session-resume"));
        let mut session = GameSession::new(beginner(), 5).unwrap();
        session.board.toggle_flag((4, 4)).unwrap();
        session.save_if_changed(&storage).unwrap();

        let resumed = GameSession::load_or_new(&storage, beginner(), 6).unwrap();

        assert_eq!(resumed.board, session.board);
    }

    #[test]
    fn corrupt_save_falls_back_to_fresh_game() {
        let dir = scratch_dir("session-corrupt");
        let storage = Storage::new(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(storage.path::<SaveState>(), r#"{"board": [[1, 2]]}"#).unwrap();

        let session = GameSession::load_or_new(&storage, beginner(), 3).unwrap();

        assert_eq!(session.board, Board::new_game(beginner(), 3).unwrap());
    }

    #[test]
    fn invalid_config_is_an_error() {
        let config = GameConfig::new_unchecked((2, 2), 4);

        assert!(GameSession::new(config, 1).is_err());
    }
}
