//! Winner propagation.
//!
//! Each time a result changes, winners are pushed forward through every
//! round boundary in stage order:
//!
//! - **Knockout** boundaries (the next round has half as many games) clear
//!   the fed slots and rewrite them, so undoing a result retracts the winner
//! - **Qualifier-slot** boundaries (qualification into the main draw) write
//!   the winner of game `k` over the slot reserved for qualifier `k + 1`
//! - the group stage advances pool qualifiers once every pool game is decided

pub mod engine;
pub mod scoring;

pub use engine::{Propagation, PropagationContext, propagate_boundary};
pub use scoring::{RecordedResults, ScoringEngine, winner_of};
