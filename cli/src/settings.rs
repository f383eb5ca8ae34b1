use serde::{Deserialize, Serialize};
use sweeper_core::{Difficulty, GameConfig};

use crate::storage::{Storage, StorageKey};

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub(crate) struct Settings {
    pub game_config: GameConfig,
}

impl Settings {
    /// Stored settings, or the defaults when the stored board size is unusable.
    pub(crate) fn load(storage: &Storage) -> Self {
        let settings: Self = storage.local_or_default();
        match settings.game_config.validate() {
            Ok(()) => settings,
            Err(err) => {
                log::warn!("stored settings rejected: {}, using defaults", err);
                Self::default()
            }
        }
    }

    pub(crate) fn difficulty(&self) -> Option<Difficulty> {
        Difficulty::from_game_config(self.game_config)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            game_config: Difficulty::default().game_config(),
        }
    }
}

impl StorageKey for Settings {
    const KEY: &'static str = "settings";
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::tests::scratch_dir;

    #[test]
    fn defaults_to_beginner() {
        let settings = Settings::load(&Storage::new(scratch_dir("settings-default")));

        assert_eq!(settings.difficulty(), Some(Difficulty::Beginner));
    }

    #[test]
    fn invalid_stored_config_is_replaced() {
        let storage = Storage::new(scratch_dir("settings-invalid"));
        storage
            .save(&Settings {
                game_config: GameConfig::new_unchecked((3, 3), 9),
            })
            .unwrap();

        assert_eq!(Settings::load(&storage), Settings::default());
    }

    #[test]
    fn keeps_custom_config() {
        let storage = Storage::new(scratch_dir("settings-custom"));
        let game_config = GameConfig::new((5, 7), 6).unwrap();
        storage.save(&Settings { game_config }).unwrap();

        let settings = Settings::load(&storage);

        assert_eq!(settings.game_config, game_config);
        assert_eq!(settings.difficulty(), None);
    }
}
