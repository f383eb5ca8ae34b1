use crate::*;
pub use random::*;

mod random;

pub trait LayoutGenerator {
    /// Fails with `InvalidConfiguration` unless `config` leaves at least one mine and one safe cell.
    fn generate(self, config: GameConfig) -> Result<MineLayout>;
}
