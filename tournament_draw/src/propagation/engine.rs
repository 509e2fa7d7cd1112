//! Moving winners from one round into the next.

use log::{debug, info};
use std::collections::HashMap;

use super::scoring::{ScoringEngine, winner_of};
use crate::tournament::models::{Entrant, EntrantId, QualifierIndex, Round, TeamSide};

/// How winners cross a round boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Propagation {
    /// Game `k` feeds slot `k` of the next round (game `k / 2`)
    Knockout,
    /// Game `k` feeds the slot reserved for qualifier `k + 1`
    QualifierSlots,
}

impl Propagation {
    /// Binary halving means a knockout boundary, anything else is resolved
    /// through qualifier slots
    pub fn for_boundary(current: &Round, next: &Round) -> Self {
        if current.games.len() == next.games.len() * 2 {
            Self::Knockout
        } else {
            Self::QualifierSlots
        }
    }
}

/// Lookups cached for the duration of one propagation pass
#[derive(Debug, Default)]
pub struct PropagationContext {
    /// Per round: qualifier index to bracket slot
    qualifier_slots: HashMap<usize, HashMap<QualifierIndex, usize>>,
    placeholders: Option<HashMap<QualifierIndex, EntrantId>>,
}

impl PropagationContext {
    pub fn new() -> Self {
        Self::default()
    }

    fn qualifier_slot(
        &mut self,
        round_index: usize,
        round: &Round,
        entrants: &[Entrant],
        index: QualifierIndex,
    ) -> Option<usize> {
        self.qualifier_slots
            .entry(round_index)
            .or_insert_with(|| scan_qualifier_slots(round, entrants))
            .get(&index)
            .copied()
    }

    fn placeholder(&mut self, entrants: &[Entrant], index: QualifierIndex) -> Option<EntrantId> {
        self.placeholders
            .get_or_insert_with(|| {
                entrants
                    .iter()
                    .filter_map(|e| e.qualifier_index().map(|q| (q, e.id)))
                    .collect()
            })
            .get(&index)
            .copied()
    }
}

/// Slots reserved for a qualifier, or still holding its placeholder
fn scan_qualifier_slots(round: &Round, entrants: &[Entrant]) -> HashMap<QualifierIndex, usize> {
    let mut slots = HashMap::new();
    for (game_index, game) in round.games.iter().enumerate() {
        for side in [TeamSide::A, TeamSide::B] {
            let slot = game_index * 2 + usize::from(side == TeamSide::B);
            let placeholder = game
                .slot(side)
                .and_then(|id| entrants.get(id.0))
                .and_then(Entrant::qualifier_index);
            if let Some(index) = game.reserved_for(side).or(placeholder) {
                slots.entry(index).or_insert(slot);
            }
        }
    }
    slots
}

/// Propagate winners of `current` into `next`.
///
/// Returns the number of slots of `next` whose occupant changed.
pub fn propagate_boundary(
    current: &Round,
    next: &mut Round,
    next_index: usize,
    entrants: &[Entrant],
    scoring: &dyn ScoringEngine,
    ctx: &mut PropagationContext,
) -> usize {
    if current.games.is_empty() || next.slot_count() == 0 {
        return 0;
    }
    if !current.has_entrants() {
        debug!("{} -> {}: nothing drawn yet", current.stage, next.stage);
        return 0;
    }

    match Propagation::for_boundary(current, next) {
        Propagation::Knockout => propagate_knockout(current, next, entrants, scoring),
        Propagation::QualifierSlots => {
            propagate_qualifier_slots(current, next, next_index, entrants, scoring, ctx)
        }
    }
}

fn propagate_knockout(
    current: &Round,
    next: &mut Round,
    entrants: &[Entrant],
    scoring: &dyn ScoringEngine,
) -> usize {
    let fed = current.games.len();
    let before: Vec<Option<EntrantId>> = (0..fed).map(|slot| next.slot(slot)).collect();

    // clear first so an undone result retracts its winner
    for slot in 0..fed {
        next.games[slot / 2].set_slot(TeamSide::of_slot(slot), None);
    }

    for (slot, game) in current.games.iter().enumerate() {
        let Some(winner) = winner_of(game, entrants, scoring) else {
            continue;
        };
        next.games[slot / 2].set_slot(TeamSide::of_slot(slot), Some(winner));
    }

    let changed = (0..fed)
        .filter(|&slot| next.slot(slot) != before[slot])
        .count();
    if changed > 0 {
        debug!(
            "{} -> {}: {} slots updated",
            current.stage, next.stage, changed
        );
    }
    changed
}

fn propagate_qualifier_slots(
    current: &Round,
    next: &mut Round,
    next_index: usize,
    entrants: &[Entrant],
    scoring: &dyn ScoringEngine,
    ctx: &mut PropagationContext,
) -> usize {
    let mut changed = 0;
    for (game_index, game) in current.games.iter().enumerate() {
        let Ok(index) = QualifierIndex::try_from(game_index + 1) else {
            break;
        };
        let Some(slot) = ctx.qualifier_slot(next_index, next, entrants, index) else {
            debug!("{}: no slot left for Q{}", next.stage, index);
            continue;
        };
        let side = TeamSide::of_slot(slot);
        let occupant = next.slot(slot);

        match winner_of(game, entrants, scoring) {
            Some(winner) if occupant != Some(winner) => {
                next.games[slot / 2].set_slot(side, Some(winner));
                debug!("{}: Q{} resolved to {}", next.stage, index, winner);
                changed += 1;
            }
            Some(_) => {}
            None => {
                let placeholder = ctx.placeholder(entrants, index);
                if occupant.is_some() && occupant != placeholder {
                    if let Some(placeholder) = placeholder {
                        next.games[slot / 2].set_slot(side, Some(placeholder));
                        info!(
                            "{}: qualification result for Q{} retracted, slot reopened",
                            next.stage, index
                        );
                        changed += 1;
                    }
                }
            }
        }
    }
    changed
}
