//! Manual draw: entrants go where the caller listed them.

use log::{debug, info, warn};

use super::strategy::PlacePlayers;
use super::{StageKind, initial_rounds};
use crate::bracket::fill_in_order;
use crate::errors::{DrawError, DrawResult};
use crate::groups::{build_group_stage, ordered_pools};
use crate::tournament::config::TournamentFormat;
use crate::tournament::manager::Tournament;
use crate::tournament::models::{Entrant, EntrantId, lookup};

/// Consumes the caller's list front to back, filling each initial round
/// game by game, side A then side B. Byes and qualifier placeholders may
/// appear in the list and are placed like anyone else. After a group stage
/// the knockout is left to the pool standings, so entrants beyond the pools
/// stay unplaced.
#[derive(Debug, Clone, Copy, Default)]
pub struct ManualDraw;

impl PlacePlayers for ManualDraw {
    fn place_players(
        &mut self,
        tournament: &mut Tournament,
        entrants: &[EntrantId],
    ) -> DrawResult<()> {
        let config = tournament
            .config()
            .cloned()
            .ok_or(DrawError::StructureNotInitialized)?;

        let Tournament {
            entrants: arena,
            rounds,
            next_game_id,
            ..
        } = tournament;
        let arena: &[Entrant] = arena;
        let queue = entrants
            .iter()
            .map(|&id| lookup(arena, id))
            .collect::<DrawResult<Vec<&Entrant>>>()?;

        let mut cursor = 0;
        for (index, kind) in initial_rounds(rounds) {
            if cursor == queue.len() {
                break;
            }
            let round = &mut rounds[index];
            let rest = &queue[cursor..];
            let placed = match kind {
                StageKind::Group => {
                    let take = rest.len().min(config.nb_pools * config.nb_pairs_per_pool);
                    let pools = ordered_pools(config.nb_pools, config.nb_pairs_per_pool, &rest[..take]);
                    build_group_stage(round, pools, next_game_id);
                    take
                }
                StageKind::MainDraw if config.format == TournamentFormat::GroupsKo => {
                    debug!("{}: filled from pool standings later", round.stage);
                    continue;
                }
                StageKind::Qualification | StageKind::MainDraw => {
                    let take = rest.len().min(round.empty_slots().len());
                    fill_in_order(round, &rest[..take])?
                }
            };
            info!("{}: {} entrants placed in caller order", round.stage, placed);
            cursor += placed;
        }

        if cursor < queue.len() {
            warn!(
                "{} entrants left unplaced, every initial round is full",
                queue.len() - cursor
            );
        }
        Ok(())
    }
}
