//! Tournament aggregate, configuration and data models.
//!
//! ## Example
//!
//! ```
//! use tournament_draw::tournament::{Stage, TeamSide, Tournament, TournamentConfig};
//!
//! # fn main() -> Result<(), tournament_draw::DrawError> {
//! let mut tournament = Tournament::new("Friday Night");
//! tournament.initialize_structure(TournamentConfig::knockout(4, 2))?;
//!
//! let pairs: Vec<_> = ["Ana & Bea", "Cris & Dani", "Eli & Fer", "Gus & Hugo"]
//!     .into_iter()
//!     .enumerate()
//!     .map(|(i, name)| tournament.register_entrant(name, Some(i as u32 + 1)))
//!     .collect();
//! tournament.generate_draw(&pairs)?;
//!
//! let semi = tournament.round(Stage::Semis).unwrap().games[0].id;
//! tournament.record_winner(semi, Some(TeamSide::A))?;
//! tournament.propagate_winners_from_game(semi)?;
//!
//! let final_game = &tournament.round(Stage::Final).unwrap().games[0];
//! assert!(final_game.team_a.is_some());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod manager;
pub mod models;

pub use config::{DrawMode, TournamentConfig, TournamentFormat};
pub use manager::Tournament;
pub use models::{
    Entrant, EntrantId, EntrantKind, Game, GameId, Pool, QualifierIndex, Round, Stage, TeamSide,
};
