//! Canonical seed positions and seed placement.

use log::debug;

use super::math::is_power_of_two;
use crate::errors::{DrawError, DrawResult};
use crate::tournament::models::{Entrant, Round};

/// Bracket slot of each seed, best seed first.
///
/// Built by doubling: every position of the half-size bracket is kept and
/// its mirror `size - 1 - p` is added, the pair order flipping on odd
/// indices. Seeds 1 and 2 always end up in opposite halves, seeds 1-4 in
/// different quarters, and seed `k` meets seed `size + 1 - k` in round one.
///
/// ```
/// use tournament_draw::bracket::seed_positions;
///
/// assert_eq!(seed_positions(8).unwrap(), vec![0, 7, 4, 3, 2, 5, 6, 1]);
/// ```
pub fn seed_positions(draw_size: usize) -> DrawResult<Vec<usize>> {
    if !is_power_of_two(draw_size) {
        return Err(DrawError::InvalidBracketSize(draw_size));
    }

    let mut positions = vec![0];
    let mut size = 1;
    while size < draw_size {
        size *= 2;
        let mut doubled = Vec::with_capacity(size);
        for (i, &p) in positions.iter().enumerate() {
            let mirrored = size - 1 - p;
            if i % 2 == 0 {
                doubled.extend([p, mirrored]);
            } else {
                doubled.extend([mirrored, p]);
            }
        }
        positions = doubled;
    }
    Ok(positions)
}

/// Place the best entrants on their canonical seed slots.
///
/// `entrants` must be sorted best first. The first
/// `min(nb_seeds, draw_size, entrants.len())` are placed; the number placed
/// is returned.
///
/// # Errors
///
/// `SlotOccupied` if a canonical slot already holds an entrant, and
/// `SlotCountMismatch` if the round is smaller than the draw.
pub fn place_seeds(
    round: &mut Round,
    draw_size: usize,
    entrants: &[&Entrant],
    nb_seeds: usize,
) -> DrawResult<usize> {
    if round.slot_count() < draw_size {
        return Err(DrawError::SlotCountMismatch {
            slots: round.slot_count(),
            draw_size,
        });
    }

    let positions = seed_positions(draw_size)?;
    let count = nb_seeds.min(draw_size).min(entrants.len());
    for (entrant, &slot) in entrants.iter().zip(&positions).take(count) {
        round.place(slot, entrant)?;
        debug!("{}: seeded {} at slot {}", round.stage, entrant, slot);
    }
    Ok(count)
}
