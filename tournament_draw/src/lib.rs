//! # Tournament Draw
//!
//! Draw generation and winner propagation for knockout and group-stage
//! tournaments.
//!
//! The engine takes an in-memory tournament, lays out its draw and mutates
//! it as results arrive. Persistence, locking and score keeping belong to
//! the caller.
//!
//! ## Formats
//!
//! - **Knockout**: a single seeded bracket
//! - **Groups + knockout**: snake-seeded round-robin pools feeding a bracket
//! - **Qualification + knockout**: a qualification bracket whose winners
//!   replace qualifier placeholders in the main draw
//!
//! ## Core Modules
//!
//! - [`bracket`]: bracket sizing, seed positions, byes and slot filling
//! - [`groups`]: pools, round-robin fixtures and pool tables
//! - [`draw`]: automatic and manual draw strategies
//! - [`propagation`]: moving winners into the next round
//! - [`tournament`]: the tournament aggregate and its configuration
//!
//! The engine is synchronous and assumes exclusive access to the tournament
//! for the duration of each call.

pub mod bracket;
pub mod draw;
pub mod errors;
pub mod groups;
pub mod propagation;
pub mod tournament;

pub use draw::{AutomaticDraw, DrawStrategy, ManualDraw, PlacePlayers};
pub use errors::{DrawError, DrawResult};
pub use propagation::{RecordedResults, ScoringEngine};
pub use tournament::{
    DrawMode, Entrant, EntrantId, Game, GameId, Round, Stage, TeamSide, Tournament,
    TournamentConfig, TournamentFormat,
};
