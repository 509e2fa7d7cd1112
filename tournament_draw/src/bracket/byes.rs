//! Bye placement.
//!
//! Byes fill the gap between the number of real entrants and the bracket
//! size. They go, in order of preference:
//!
//! 1. opposite the canonical seed slots, most protected seed first
//! 2. into games that already have exactly one occupant
//! 3. into whatever is left, in slot order, even if that pairs two byes

use log::{debug, info};

use super::seeding::seed_positions;
use crate::errors::{DrawError, DrawResult};
use crate::tournament::models::{Entrant, Round, TeamSide};

/// Place `draw_size - total_pairs - existing byes` byes into `round`.
///
/// Returns the number of byes placed. Occupied slots are never touched.
///
/// # Errors
///
/// `SlotCountMismatch` when the round does not expose exactly `draw_size`
/// slots, `NotEnoughEmptySlots` when byes remain after every pass.
pub fn place_byes(
    round: &mut Round,
    draw_size: usize,
    total_pairs: usize,
    nb_seeds: usize,
    bye: &Entrant,
) -> DrawResult<usize> {
    if round.slot_count() != draw_size {
        return Err(DrawError::SlotCountMismatch {
            slots: round.slot_count(),
            draw_size,
        });
    }

    let existing = round.count_occupied_by(bye.id);
    let required = draw_size.saturating_sub(total_pairs + existing);
    if required == 0 {
        return Ok(0);
    }

    let mut remaining = required;

    // Protected: shield seeds from a real first-round opponent
    let positions = seed_positions(draw_size)?;
    for &seed_slot in positions.iter().take(nb_seeds.min(draw_size)) {
        if remaining == 0 {
            break;
        }
        let opposite = seed_slot ^ 1;
        if round.is_slot_empty(opposite) {
            round.place(opposite, bye)?;
            remaining -= 1;
        }
    }

    // Fallback: half-filled games
    for slot in 0..draw_size {
        if remaining == 0 {
            break;
        }
        if round.is_slot_empty(slot) && !round.is_slot_empty(slot ^ 1) {
            round.place(slot, bye)?;
            remaining -= 1;
        }
    }

    // Last resort: any empty slot, in order
    for slot in 0..draw_size {
        if remaining == 0 {
            break;
        }
        if round.is_slot_empty(slot) {
            debug!(
                "{}: bye at slot {} ({} side)",
                round.stage,
                slot,
                TeamSide::of_slot(slot)
            );
            round.place(slot, bye)?;
            remaining -= 1;
        }
    }

    if remaining > 0 {
        return Err(DrawError::NotEnoughEmptySlots { remaining });
    }

    info!(
        "{}: placed {} byes for {} entrants in a {}-slot draw",
        round.stage, required, total_pairs, draw_size
    );
    Ok(required)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tournament::models::{EntrantId, Game, GameId, Stage};

    const BYE: EntrantId = EntrantId(99);

    fn empty_round(games: usize) -> Round {
        let mut round = Round::new(Stage::Quarters);
        round.games = (0..games as u32).map(|i| Game::new(GameId(i))).collect();
        round
    }

    fn pair(i: usize) -> Entrant {
        Entrant::normal(EntrantId(i), format!("Pair {i}"), None)
    }

    #[test]
    fn test_byes_face_seeds_first() {
        let mut round = empty_round(4);
        round.place(0, &pair(0)).unwrap();
        round.place(7, &pair(1)).unwrap();

        let placed = place_byes(&mut round, 8, 5, 2, &Entrant::bye(BYE)).unwrap();

        assert_eq!(placed, 3);
        assert_eq!(round.slot(1), Some(BYE));
        assert_eq!(round.slot(6), Some(BYE));
        assert_eq!(round.count_occupied_by(BYE), 3);
    }

    #[test]
    fn test_fallback_fills_half_filled_games() {
        let mut round = empty_round(2);
        round.place(2, &pair(0)).unwrap();

        let placed = place_byes(&mut round, 4, 3, 0, &Entrant::bye(BYE)).unwrap();

        assert_eq!(placed, 1);
        assert_eq!(round.slot(3), Some(BYE));
    }

    #[test]
    fn test_last_resort_fills_in_slot_order() {
        let mut round = empty_round(4);
        let placed = place_byes(&mut round, 8, 3, 0, &Entrant::bye(BYE)).unwrap();

        assert_eq!(placed, 5);
        let byes: Vec<usize> = (0..8).filter(|&s| round.slot(s) == Some(BYE)).collect();
        assert_eq!(byes, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_last_resort_after_protected_byes() {
        let mut round = empty_round(4);
        round.place(0, &pair(0)).unwrap();
        round.place(7, &pair(1)).unwrap();

        let placed = place_byes(&mut round, 8, 4, 2, &Entrant::bye(BYE)).unwrap();

        assert_eq!(placed, 4);
        let byes: Vec<usize> = (0..8).filter(|&s| round.slot(s) == Some(BYE)).collect();
        assert_eq!(byes, vec![1, 2, 3, 6]);
    }

    #[test]
    fn test_existing_byes_are_counted() {
        let mut round = empty_round(2);
        round.place(1, &Entrant::bye(BYE)).unwrap();

        let placed = place_byes(&mut round, 4, 2, 0, &Entrant::bye(BYE)).unwrap();

        assert_eq!(placed, 1);
        assert_eq!(round.count_occupied_by(BYE), 2);
    }

    #[test]
    fn test_no_byes_needed_for_full_draw() {
        let mut round = empty_round(2);
        assert_eq!(place_byes(&mut round, 4, 4, 2, &Entrant::bye(BYE)).unwrap(), 0);
        assert_eq!(round.empty_slots().len(), 4);
    }

    #[test]
    fn test_slot_count_mismatch() {
        let mut round = empty_round(3);
        let err = place_byes(&mut round, 8, 5, 0, &Entrant::bye(BYE)).unwrap_err();
        assert!(matches!(
            err,
            DrawError::SlotCountMismatch {
                slots: 6,
                draw_size: 8
            }
        ));
    }

    #[test]
    fn test_not_enough_empty_slots() {
        let mut round = empty_round(2);
        for slot in 0..3 {
            round.place(slot, &pair(slot)).unwrap();
        }

        // two byes wanted, one slot free
        let err = place_byes(&mut round, 4, 2, 0, &Entrant::bye(BYE)).unwrap_err();
        assert!(matches!(err, DrawError::NotEnoughEmptySlots { remaining: 1 }));
    }
}
