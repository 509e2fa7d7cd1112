//! Filling open slots with the rest of the entrant pool.

use log::warn;
use rand::{Rng, seq::SliceRandom};

use crate::errors::DrawResult;
use crate::tournament::models::{Entrant, Round};

/// Fill empty slots game by game, side A before side B, in the given order.
///
/// Stops when either entrants or slots run out. Extra entrants are left
/// unplaced and logged. Returns the number placed.
pub fn fill_in_order(round: &mut Round, entrants: &[&Entrant]) -> DrawResult<usize> {
    let open = round.empty_slots();
    let placed = open.len().min(entrants.len());
    for (&slot, entrant) in open.iter().zip(entrants) {
        round.place(slot, entrant)?;
    }

    if entrants.len() > placed {
        warn!(
            "{}: {} entrants left unplaced, no open slots remain",
            round.stage,
            entrants.len() - placed
        );
    }
    Ok(placed)
}

/// Shuffle the entrants, then fill slots in order.
pub fn fill_shuffled<R: Rng + ?Sized>(
    round: &mut Round,
    entrants: &[&Entrant],
    rng: &mut R,
) -> DrawResult<usize> {
    let mut shuffled = entrants.to_vec();
    shuffled.shuffle(rng);
    fill_in_order(round, &shuffled)
}

/// Put each entrant into a uniformly random open slot.
pub fn scatter<R: Rng + ?Sized>(
    round: &mut Round,
    entrants: &[&Entrant],
    rng: &mut R,
) -> DrawResult<usize> {
    let mut placed = 0;
    for entrant in entrants {
        let open = round.empty_slots();
        if open.is_empty() {
            warn!(
                "{}: {} entrants left unplaced, no open slots remain",
                round.stage,
                entrants.len() - placed
            );
            break;
        }
        let slot = open[rng.random_range(0..open.len())];
        round.place(slot, entrant)?;
        placed += 1;
    }
    Ok(placed)
}
