use super::*;

/// Places mines uniformly at random without replacement over the whole board.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomLayoutGenerator {
    seed: u64,
}

impl RandomLayoutGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl LayoutGenerator for RandomLayoutGenerator {
    fn generate(self, config: GameConfig) -> Result<MineLayout> {
        use rand::prelude::*;
        use crate::types::from_flat_index;
        use rand::seq::index;

        config.validate()?;
        let total_cells = usize::from(config.total_cells());
        let mines = usize::from(config.mines);

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut mine_mask: Array2<bool> = Array2::default(config.size.to_nd_index());
        for flat in index::sample(&mut rng, total_cells, mines) {
            mine_mask[from_flat_index(flat, config.size.1).to_nd_index()] = true;
        }

        let layout = MineLayout::from_mine_mask(&mine_mask);
        log::debug!(
            "Generated {}x{} layout with {} mines from seed {}",
            config.size.0,
            config.size.1,
            layout.mine_count(),
            self.seed
        );
        Ok(layout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn places_exactly_the_requested_mines() {
        let config = GameConfig::new((16, 16), 40).unwrap();
        let layout = RandomLayoutGenerator::new(7).generate(config).unwrap();

        assert_eq!(layout.size(), (16, 16));
        assert_eq!(layout.mine_count(), 40);
        assert_eq!(layout.mine_coords().len(), 40);
    }

    #[test]
    fn same_seed_same_layout() {
        let config = GameConfig::new((9, 9), 10).unwrap();

        let a = RandomLayoutGenerator::new(1234).generate(config).unwrap();
        let b = RandomLayoutGenerator::new(1234).generate(config).unwrap();

        assert_eq!(a, b);
    }

    #[test]
    fn dense_board_leaves_one_safe_cell() {
        let config = GameConfig::new((3, 3), 8).unwrap();
        let layout = RandomLayoutGenerator::new(99).generate(config).unwrap();

        assert_eq!(layout.safe_cell_count(), 1);
    }

    #[test]
    fn rejects_boards_without_mines_or_safe_cells() {
        for mines in [0, 9, 12] {
            let config = GameConfig::new_unchecked((3, 3), mines);
            assert_eq!(
                RandomLayoutGenerator::new(3).generate(config),
                Err(GameError::InvalidConfiguration)
            );
        }
    }
}
