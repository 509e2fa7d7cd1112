//! Automatic (seeded) draw.

use log::{debug, info, warn};
use rand::{SeedableRng, rngs::StdRng};

use super::strategy::PlacePlayers;
use super::{StageKind, initial_rounds};
use crate::bracket::{fill_shuffled, place_byes, place_seeds, scatter};
use crate::errors::{DrawError, DrawResult};
use crate::groups::{build_group_stage, snake_pools};
use crate::tournament::config::{TournamentConfig, TournamentFormat};
use crate::tournament::manager::Tournament;
use crate::tournament::models::{Entrant, EntrantId, Round, lookup};

/// Seeds, byes, then a shuffled fill of every initial round
#[derive(Debug)]
pub struct AutomaticDraw {
    rng: StdRng,
}

impl AutomaticDraw {
    /// Shuffle from OS entropy
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Reproducible shuffle
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn with_rng(rng: StdRng) -> Self {
        Self { rng }
    }

    /// Seed placement, byes, qualifier scatter and shuffled fill of one bracket
    fn draw_bracket(
        &mut self,
        round: &mut Round,
        draw_size: usize,
        pool: &[&Entrant],
        nb_seeds: usize,
        bye: &Entrant,
        qualifiers: &[&Entrant],
    ) -> DrawResult<()> {
        let seeded = place_seeds(round, draw_size, pool, nb_seeds)?;
        place_byes(round, draw_size, pool.len() + qualifiers.len(), seeded, bye)?;
        scatter(round, qualifiers, &mut self.rng)?;
        let filled = fill_shuffled(round, &pool[seeded..], &mut self.rng)?;
        info!(
            "{}: {} seeds, {} qualifier slots, {} drawn at random",
            round.stage,
            seeded,
            qualifiers.len(),
            filled
        );
        Ok(())
    }
}

impl Default for AutomaticDraw {
    fn default() -> Self {
        Self::new()
    }
}

/// Real entrants sorted best seed first, unseeded after in the given order
fn ranked<'a>(entrants: &'a [Entrant], ids: &[EntrantId]) -> DrawResult<Vec<&'a Entrant>> {
    let mut ranked = Vec::with_capacity(ids.len());
    for &id in ids {
        let entrant = lookup(entrants, id)?;
        if entrant.is_real() {
            ranked.push(entrant);
        } else {
            warn!("{} is not a real entrant, skipped by the automatic draw", entrant);
        }
    }
    ranked.sort_by_key(|e| e.seed_rank().unwrap_or(u32::MAX));
    Ok(ranked)
}

/// Entrant split between the stages of a format
struct Allocation<'a> {
    qualifying: Vec<&'a Entrant>,
    groups: Vec<&'a Entrant>,
    main: Vec<&'a Entrant>,
}

fn allocate<'a>(config: &TournamentConfig, mut ranked: Vec<&'a Entrant>) -> Allocation<'a> {
    let capacity = config.capacity();
    if ranked.len() > capacity {
        warn!(
            "{} entrants for a draw of {}, the lowest ranked {} are left out",
            ranked.len(),
            capacity,
            ranked.len() - capacity
        );
        ranked.truncate(capacity);
    }

    match config.format {
        TournamentFormat::Knockout => Allocation {
            qualifying: Vec::new(),
            groups: Vec::new(),
            main: ranked,
        },
        TournamentFormat::GroupsKo => Allocation {
            qualifying: Vec::new(),
            groups: ranked,
            main: Vec::new(),
        },
        TournamentFormat::QualifKo => {
            let direct = config.direct_entries().min(ranked.len());
            let qualifying = ranked.split_off(direct);
            Allocation {
                qualifying,
                groups: Vec::new(),
                main: ranked,
            }
        }
    }
}

impl PlacePlayers for AutomaticDraw {
    fn place_players(
        &mut self,
        tournament: &mut Tournament,
        entrants: &[EntrantId],
    ) -> DrawResult<()> {
        let config = tournament
            .config()
            .cloned()
            .ok_or(DrawError::StructureNotInitialized)?;
        let bye_id = tournament.bye().ok_or(DrawError::StructureNotInitialized)?;

        let Tournament {
            entrants: arena,
            rounds,
            next_game_id,
            ..
        } = tournament;
        let arena: &[Entrant] = arena;
        let bye = lookup(arena, bye_id)?;

        let allocation = allocate(&config, ranked(arena, entrants)?);
        let mut placeholders: Vec<&Entrant> = arena
            .iter()
            .filter(|e| e.qualifier_index().is_some())
            .collect();
        placeholders.sort_by_key(|e| e.qualifier_index());

        for (index, kind) in initial_rounds(rounds) {
            let round = &mut rounds[index];
            match kind {
                StageKind::Qualification => self.draw_bracket(
                    round,
                    config.pre_qual_draw_size,
                    &allocation.qualifying,
                    config.nb_seeds_qualify,
                    bye,
                    &[],
                )?,
                StageKind::Group => {
                    let pools = snake_pools(
                        config.nb_pools,
                        config.nb_pairs_per_pool,
                        &allocation.groups,
                    );
                    build_group_stage(round, pools, next_game_id);
                }
                StageKind::MainDraw => match config.format {
                    TournamentFormat::Knockout => self.draw_bracket(
                        round,
                        config.bracket_size(),
                        &allocation.main,
                        config.nb_seeds,
                        bye,
                        &[],
                    )?,
                    TournamentFormat::QualifKo => self.draw_bracket(
                        round,
                        config.bracket_size(),
                        &allocation.main,
                        config.nb_seeds,
                        bye,
                        &placeholders,
                    )?,
                    TournamentFormat::GroupsKo => {
                        debug!("{}: filled from pool standings later", round.stage);
                    }
                },
            }
        }
        Ok(())
    }
}
