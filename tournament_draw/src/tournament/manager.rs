//! The tournament aggregate: entrant arena, rounds and their lifecycle.
//!
//! Lifecycle: created empty, structure initialized from a config, entrants
//! placed by a draw strategy, then winners propagated each time a result
//! changes. Rounds and games are never removed once the structure exists;
//! only slot contents change.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use super::config::{TournamentConfig, TournamentFormat};
use super::models::{
    Entrant, EntrantId, Game, GameId, QualifierIndex, Round, Stage, TeamSide, lookup,
};
use crate::bracket::{fill_in_order, place_byes, place_seeds};
use crate::draw::{DrawStrategy, PlacePlayers};
use crate::errors::{DrawError, DrawResult};
use crate::groups::{PoolStanding, pool_qualifiers, pool_standings};
use crate::propagation::{PropagationContext, RecordedResults, ScoringEngine, propagate_boundary};

/// Tournament state handed in by the caller, mutated in place
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tournament {
    pub name: String,
    pub(crate) config: Option<TournamentConfig>,
    pub(crate) entrants: Vec<Entrant>,
    pub(crate) rounds: Vec<Round>,
    pub(crate) bye: Option<EntrantId>,
    pub(crate) next_game_id: u32,
}

impl Tournament {
    /// Create an empty tournament
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Add a real entrant to the arena. A seed of 0 means unseeded.
    pub fn register_entrant(&mut self, name: impl Into<String>, seed: Option<u32>) -> EntrantId {
        let id = EntrantId(self.entrants.len());
        self.entrants.push(Entrant::normal(id, name, seed));
        id
    }

    pub fn entrants(&self) -> &[Entrant] {
        &self.entrants
    }

    pub fn entrant(&self, id: EntrantId) -> Option<&Entrant> {
        self.entrants.get(id.0)
    }

    pub fn rounds(&self) -> &[Round] {
        &self.rounds
    }

    pub fn round(&self, stage: Stage) -> Option<&Round> {
        self.rounds.iter().find(|r| r.stage == stage)
    }

    pub fn config(&self) -> Option<&TournamentConfig> {
        self.config.as_ref()
    }

    /// The bye sentinel, once the structure exists
    pub fn bye(&self) -> Option<EntrantId> {
        self.bye
    }

    /// Placeholder entrant standing for qualifier `index`
    pub fn qualifier_placeholder(&self, index: QualifierIndex) -> Option<EntrantId> {
        self.entrants
            .iter()
            .find(|e| e.qualifier_index() == Some(index))
            .map(|e| e.id)
    }

    pub fn game(&self, id: GameId) -> Option<&Game> {
        self.rounds
            .iter()
            .flat_map(|r| r.games.iter())
            .find(|g| g.id == id)
    }

    /// Round index and game index of a game
    pub fn locate_game(&self, id: GameId) -> Option<(usize, usize)> {
        self.rounds.iter().enumerate().find_map(|(round_index, round)| {
            round
                .games
                .iter()
                .position(|g| g.id == id)
                .map(|game_index| (round_index, game_index))
        })
    }

    fn push_entrant(&mut self, make: impl FnOnce(EntrantId) -> Entrant) -> EntrantId {
        let id = EntrantId(self.entrants.len());
        self.entrants.push(make(id));
        id
    }

    fn empty_round(&mut self, stage: Stage, games: usize) -> Round {
        let mut round = Round::new(stage);
        round.games = (0..games)
            .map(|_| {
                let game = Game::new(GameId(self.next_game_id));
                self.next_game_id += 1;
                game
            })
            .collect();
        round
    }

    /// Build empty rounds and games from a validated configuration.
    ///
    /// Creates the bye sentinel and, for a qualification format, one
    /// placeholder per qualifier slot.
    ///
    /// # Errors
    ///
    /// `InvalidConfig` with every validation message, `AlreadyInitialized`
    /// if rounds already exist.
    pub fn initialize_structure(&mut self, config: TournamentConfig) -> DrawResult<()> {
        if !self.rounds.is_empty() {
            return Err(DrawError::AlreadyInitialized);
        }
        let errors = config.validate();
        if !errors.is_empty() {
            return Err(DrawError::InvalidConfig(errors));
        }

        if self.bye.is_none() {
            self.bye = Some(self.push_entrant(Entrant::bye));
        }

        let mut rounds = Vec::new();
        match config.format {
            TournamentFormat::Knockout => {}
            TournamentFormat::GroupsKo => rounds.push(Round::new(Stage::Groups)),
            TournamentFormat::QualifKo => {
                for index in 1..=config.nb_qualifiers {
                    let index = QualifierIndex::try_from(index)
                        .map_err(|_| DrawError::InvalidBracketSize(config.nb_qualifiers))?;
                    if self.qualifier_placeholder(index).is_none() {
                        self.push_entrant(|id| Entrant::qualifier(id, index));
                    }
                }
                for depth in 0..config.qualification_rounds() {
                    let stage = Stage::qualification(depth)
                        .ok_or(DrawError::InvalidBracketSize(config.pre_qual_draw_size))?;
                    let games = config.pre_qual_draw_size >> (depth + 1);
                    rounds.push(self.empty_round(stage, games));
                }
            }
        }

        let mut size = config.bracket_size();
        while size >= 2 {
            let stage = Stage::for_bracket_size(size).ok_or(DrawError::InvalidBracketSize(size))?;
            rounds.push(self.empty_round(stage, size / 2));
            size /= 2;
        }

        info!(
            "{}: {} structure with {} rounds ({})",
            self.name,
            config.format,
            rounds.len(),
            rounds
                .iter()
                .map(|r| r.stage.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        );
        self.rounds = rounds;
        self.config = Some(config);
        Ok(())
    }

    /// Run a draw strategy over the initial rounds
    pub fn place_entrants(
        &mut self,
        entrants: &[EntrantId],
        strategy: &mut DrawStrategy,
    ) -> DrawResult<()> {
        if self.config.is_none() {
            return Err(DrawError::StructureNotInitialized);
        }
        strategy.place_players(self, entrants)
    }

    /// Draw with the strategy matching the configured draw mode, then let
    /// byes and walkovers advance
    pub fn generate_draw(&mut self, entrants: &[EntrantId]) -> DrawResult<usize> {
        let config = self.config.as_ref().ok_or(DrawError::StructureNotInitialized)?;
        let mut strategy = DrawStrategy::for_config(config);
        self.place_entrants(entrants, &mut strategy)?;
        self.propagate_winners()
    }

    /// Record the outcome reported for a game (`None` undoes it)
    pub fn record_winner(&mut self, game: GameId, winner: Option<TeamSide>) -> DrawResult<()> {
        let (round_index, game_index) = self.locate_game(game).ok_or(DrawError::UnknownGame(game))?;
        self.rounds[round_index].games[game_index].winner = winner;
        Ok(())
    }

    /// Propagate recorded winners across every round boundary
    pub fn propagate_winners(&mut self) -> DrawResult<usize> {
        self.propagate_winners_with(&RecordedResults)
    }

    /// Propagate winners as decided by `scoring`. Returns the number of
    /// slots whose occupant changed.
    pub fn propagate_winners_with(&mut self, scoring: &dyn ScoringEngine) -> DrawResult<usize> {
        self.propagate_from(0, scoring)
    }

    /// Propagate from the round holding `game` onward
    pub fn propagate_winners_from_game(&mut self, game: GameId) -> DrawResult<usize> {
        self.propagate_winners_from_game_with(game, &RecordedResults)
    }

    pub fn propagate_winners_from_game_with(
        &mut self,
        game: GameId,
        scoring: &dyn ScoringEngine,
    ) -> DrawResult<usize> {
        let (round_index, _) = self.locate_game(game).ok_or(DrawError::UnknownGame(game))?;
        self.propagate_from(round_index, scoring)
    }

    fn propagate_from(&mut self, start: usize, scoring: &dyn ScoringEngine) -> DrawResult<usize> {
        let mut ctx = PropagationContext::new();
        let mut changed = 0;

        for index in start..self.rounds.len().saturating_sub(1) {
            if self.rounds[index].stage.is_group() {
                changed += self.advance_from_pools(index, scoring)?;
                continue;
            }
            let (done, rest) = self.rounds.split_at_mut(index + 1);
            changed += propagate_boundary(
                &done[index],
                &mut rest[0],
                index + 1,
                &self.entrants,
                scoring,
                &mut ctx,
            );
        }

        if changed > 0 {
            debug!("{}: propagation changed {} slots", self.name, changed);
        }
        Ok(changed)
    }

    /// Standings of one pool of the group stage
    pub fn pool_standings(&self, pool_index: usize) -> Vec<PoolStanding> {
        let Some(groups) = self.round(Stage::Groups) else {
            return Vec::new();
        };
        groups
            .pools
            .get(pool_index)
            .map(|pool| {
                pool_standings(pool_index, pool, &groups.games, &self.entrants, &RecordedResults)
            })
            .unwrap_or_default()
    }

    /// Fill the first knockout round from the pool tables once every pool
    /// game is decided. Pool winners take the canonical seed slots.
    ///
    /// The round is laid out again on every pass, so an edited pool result
    /// moves the new qualifiers in and a retracted one empties the round.
    /// Once a knockout result is recorded the round is left as it is.
    fn advance_from_pools(&mut self, index: usize, scoring: &dyn ScoringEngine) -> DrawResult<usize> {
        let Some(config) = self.config.as_ref() else {
            return Ok(0);
        };
        let bye_id = self.bye.ok_or(DrawError::StructureNotInitialized)?;
        let (done, rest) = self.rounds.split_at_mut(index + 1);
        let (groups, next) = (&done[index], &mut rest[0]);

        let mut layout = Round::new(next.stage);
        layout.games = next.games.iter().map(|g| Game::new(g.id)).collect();
        let qualified = pool_qualifiers(groups, &self.entrants, config.nb_qualified_by_pool, scoring);
        if let Some(qualified) = &qualified {
            let refs = qualified
                .iter()
                .map(|&id| lookup(&self.entrants, id))
                .collect::<DrawResult<Vec<&Entrant>>>()?;
            let bye = lookup(&self.entrants, bye_id)?;
            let draw_size = layout.slot_count();
            let seeded = place_seeds(&mut layout, draw_size, &refs, groups.pools.len())?;
            place_byes(&mut layout, draw_size, refs.len(), seeded, bye)?;
            fill_in_order(&mut layout, &refs[seeded..])?;
        }

        let changed = next
            .games
            .iter()
            .zip(&layout.games)
            .map(|(old, new)| {
                usize::from(old.team_a != new.team_a) + usize::from(old.team_b != new.team_b)
            })
            .sum::<usize>();
        if changed == 0 {
            return Ok(0);
        }
        if next
            .games
            .iter()
            .any(|g| !g.is_empty() && scoring.winner_side(g).is_some())
        {
            warn!(
                "{}: pool results changed after knockout results were recorded, keeping the current draw",
                next.stage
            );
            return Ok(0);
        }

        match &qualified {
            Some(qualified) => info!(
                "{}: {} qualified from {} pools",
                next.stage,
                qualified.len(),
                groups.pools.len()
            ),
            None => info!("{}: pool results reopened, round cleared", next.stage),
        }
        next.games = layout.games;
        Ok(changed)
    }
}
