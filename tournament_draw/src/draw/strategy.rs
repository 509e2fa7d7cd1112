//! Draw strategy selection.

use enum_dispatch::enum_dispatch;

use super::automatic::AutomaticDraw;
use super::manual::ManualDraw;
use crate::errors::DrawResult;
use crate::tournament::config::{DrawMode, TournamentConfig};
use crate::tournament::manager::Tournament;
use crate::tournament::models::EntrantId;

/// Lays entrants out in the initial rounds of an initialized tournament
#[enum_dispatch]
pub trait PlacePlayers {
    fn place_players(
        &mut self,
        tournament: &mut Tournament,
        entrants: &[EntrantId],
    ) -> DrawResult<()>;
}

/// Automatic (seeded) or manual draw
#[enum_dispatch(PlacePlayers)]
#[derive(Debug)]
pub enum DrawStrategy {
    AutomaticDraw,
    ManualDraw,
}

impl DrawStrategy {
    /// Strategy for the configured draw mode, shuffling from OS entropy
    pub fn for_config(config: &TournamentConfig) -> Self {
        match config.draw_mode {
            DrawMode::Seeded => AutomaticDraw::new().into(),
            DrawMode::Manual => ManualDraw.into(),
        }
    }

    /// Strategy for the configured draw mode with a reproducible shuffle
    pub fn for_config_seeded(config: &TournamentConfig, seed: u64) -> Self {
        match config.draw_mode {
            DrawMode::Seeded => AutomaticDraw::with_seed(seed).into(),
            DrawMode::Manual => ManualDraw.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_follows_draw_mode() {
        let seeded = TournamentConfig::knockout(8, 2);
        assert!(matches!(
            DrawStrategy::for_config(&seeded),
            DrawStrategy::AutomaticDraw(_)
        ));

        let manual = seeded.with_draw_mode(DrawMode::Manual);
        assert!(matches!(
            DrawStrategy::for_config_seeded(&manual, 1),
            DrawStrategy::ManualDraw(_)
        ));
    }
}
