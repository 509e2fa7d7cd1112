//! Draw orchestration.
//!
//! Decides which initial round receives which entrants, and with which
//! placement algorithm:
//!
//! - [`AutomaticDraw`]: seeds, byes and a random fill per stage
//! - [`ManualDraw`]: the caller's order, round by round
//!
//! ## Example
//!
//! ```
//! use tournament_draw::draw::DrawStrategy;
//! use tournament_draw::tournament::{Tournament, TournamentConfig};
//!
//! # fn main() -> Result<(), tournament_draw::DrawError> {
//! let config = TournamentConfig::knockout(8, 2);
//! let mut tournament = Tournament::new("Club Open");
//! tournament.initialize_structure(config.clone())?;
//!
//! let pairs: Vec<_> = (1..=6)
//!     .map(|i| tournament.register_entrant(format!("Pair {i}"), Some(i)))
//!     .collect();
//!
//! let mut strategy = DrawStrategy::for_config_seeded(&config, 2024);
//! tournament.place_entrants(&pairs, &mut strategy)?;
//! # Ok(())
//! # }
//! ```

pub mod automatic;
pub mod manual;
pub mod strategy;

pub use automatic::AutomaticDraw;
pub use manual::ManualDraw;
pub use strategy::{DrawStrategy, PlacePlayers};

use crate::tournament::models::{Round, Stage};

/// Role of an initial round in the draw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageKind {
    Qualification,
    Group,
    MainDraw,
}

/// Rounds that receive entrants at draw time, in stage order: the first
/// qualification round, the group stage and the first main-draw round
pub fn initial_rounds(rounds: &[Round]) -> Vec<(usize, StageKind)> {
    let first = |pred: fn(Stage) -> bool| rounds.iter().position(|r| pred(r.stage));

    let mut initial = Vec::with_capacity(3);
    if let Some(index) = first(Stage::is_qualification) {
        initial.push((index, StageKind::Qualification));
    }
    if let Some(index) = first(Stage::is_group) {
        initial.push((index, StageKind::Group));
    }
    if let Some(index) = first(Stage::is_main_draw) {
        initial.push((index, StageKind::MainDraw));
    }
    initial.sort_by_key(|&(index, _)| rounds[index].stage);
    initial
}
