//! Seam to the scoring engine that decides who won a game.

use crate::tournament::models::{Entrant, EntrantId, Game, TeamSide, lookup};

/// Reports the winning side of a game, if any.
///
/// Set, game and tie-break progression live behind this trait; the draw
/// engine only asks for the outcome.
pub trait ScoringEngine {
    fn winner_side(&self, game: &Game) -> Option<TeamSide>;
}

/// Reads the winner recorded on the game itself
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordedResults;

impl ScoringEngine for RecordedResults {
    fn winner_side(&self, game: &Game) -> Option<TeamSide> {
        game.winner
    }
}

impl<F> ScoringEngine for F
where
    F: Fn(&Game) -> Option<TeamSide>,
{
    fn winner_side(&self, game: &Game) -> Option<TeamSide> {
        self(game)
    }
}

/// Entrant advancing out of `game`.
///
/// The scoring engine decides first, except that a bye never beats an
/// occupant. Without a result, a bye-vs-bye game advances the bye, and a
/// bye facing any occupant is a walkover for that occupant.
pub fn winner_of(game: &Game, entrants: &[Entrant], scoring: &dyn ScoringEngine) -> Option<EntrantId> {
    let is_bye = |slot: Option<EntrantId>| {
        slot.and_then(|id| lookup(entrants, id).ok())
            .is_some_and(Entrant::is_bye)
    };

    if let Some(side) = scoring.winner_side(game) {
        let (winner, loser) = (game.slot(side), game.slot(side.opposite()));
        if is_bye(winner) && loser.is_some() && !is_bye(loser) {
            return loser;
        }
        return winner;
    }

    match (is_bye(game.team_a), is_bye(game.team_b)) {
        (true, true) => game.team_a,
        (true, false) => game.team_b,
        (false, true) => game.team_a,
        (false, false) => None,
    }
}
