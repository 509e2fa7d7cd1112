//! Pool rankings and qualification into the knockout stage.

use serde::{Deserialize, Serialize};
use std::cmp::Reverse;

use crate::propagation::ScoringEngine;
use crate::tournament::models::{Entrant, EntrantId, Game, Pool, Round};

/// One line of a pool table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolStanding {
    pub entrant: EntrantId,
    pub played: u32,
    pub wins: u32,
    pub losses: u32,
}

/// Rank a pool from its decided games.
///
/// Ordered by wins, then fewer losses, then seed rank (unseeded last),
/// then entrant id.
pub fn pool_standings(
    pool_index: usize,
    pool: &Pool,
    games: &[Game],
    entrants: &[Entrant],
    scoring: &dyn ScoringEngine,
) -> Vec<PoolStanding> {
    let mut table: Vec<PoolStanding> = pool
        .entrants
        .iter()
        .map(|&entrant| PoolStanding {
            entrant,
            played: 0,
            wins: 0,
            losses: 0,
        })
        .collect();

    for game in games.iter().filter(|g| g.pool == Some(pool_index)) {
        let Some(side) = scoring.winner_side(game) else {
            continue;
        };
        let (Some(winner), Some(loser)) = (game.slot(side), game.slot(side.opposite())) else {
            continue;
        };
        for line in table.iter_mut() {
            if line.entrant == winner {
                line.played += 1;
                line.wins += 1;
            } else if line.entrant == loser {
                line.played += 1;
                line.losses += 1;
            }
        }
    }

    let seed_of = |id: EntrantId| {
        entrants
            .get(id.0)
            .and_then(Entrant::seed_rank)
            .unwrap_or(u32::MAX)
    };
    table.sort_by_key(|line| {
        (
            Reverse(line.wins),
            line.losses,
            seed_of(line.entrant),
            line.entrant,
        )
    });
    table
}

/// Entrants advancing from the group stage, best first.
///
/// Pool winners come first in pool order, runners-up in reverse pool order,
/// and so on. `None` while any pool game is undecided.
pub fn pool_qualifiers(
    round: &Round,
    entrants: &[Entrant],
    nb_qualified_by_pool: usize,
    scoring: &dyn ScoringEngine,
) -> Option<Vec<EntrantId>> {
    if round.pools.is_empty()
        || round
            .games
            .iter()
            .any(|g| scoring.winner_side(g).is_none())
    {
        return None;
    }

    let tables: Vec<Vec<PoolStanding>> = round
        .pools
        .iter()
        .enumerate()
        .map(|(index, pool)| pool_standings(index, pool, &round.games, entrants, scoring))
        .collect();

    let mut qualified = Vec::with_capacity(tables.len() * nb_qualified_by_pool);
    for rank in 0..nb_qualified_by_pool {
        let mut order: Vec<&Vec<PoolStanding>> = tables.iter().collect();
        if rank % 2 == 1 {
            order.reverse();
        }
        qualified.extend(order.iter().filter_map(|t| t.get(rank)).map(|l| l.entrant));
    }
    Some(qualified)
}
