//! Pool composition and round-robin fixtures.

use log::{info, warn};

use crate::tournament::models::{Entrant, EntrantId, Game, GameId, Pool, Round};

/// Pool visited by the `k`-th seed: 0, 1, .., n-1, n-1, .., 0, 0, 1, ..
fn snake_index(k: usize, nb_pools: usize) -> usize {
    let pos = k % nb_pools;
    if (k / nb_pools) % 2 == 0 {
        pos
    } else {
        nb_pools - 1 - pos
    }
}

/// Split entrants into pools, balancing seed strength with snake seeding.
///
/// Seeded entrants (seed rank set) are dealt back and forth across the
/// pools, best seed first. The others then join the smallest pool with
/// room left, in list order. Entrants beyond `nb_pools * nb_pairs_per_pool`
/// are left out.
pub fn snake_pools(nb_pools: usize, nb_pairs_per_pool: usize, entrants: &[&Entrant]) -> Vec<Pool> {
    let mut pools: Vec<Pool> = (0..nb_pools).map(Pool::new).collect();
    if nb_pools == 0 {
        return pools;
    }
    let capacity = nb_pools * nb_pairs_per_pool;

    let mut seeded: Vec<&Entrant> = entrants
        .iter()
        .copied()
        .filter(|e| e.seed_rank().is_some())
        .collect();
    seeded.sort_by_key(|e| e.seed_rank());

    let mut turn = 0;
    let mut placed = 0;
    for entrant in seeded {
        if placed == capacity {
            break;
        }
        loop {
            let pool = &mut pools[snake_index(turn, nb_pools)];
            turn += 1;
            if pool.entrants.len() < nb_pairs_per_pool {
                pool.entrants.push(entrant.id);
                placed += 1;
                break;
            }
        }
    }

    for entrant in entrants.iter().filter(|e| e.seed_rank().is_none()) {
        let Some(pool) = pools
            .iter_mut()
            .filter(|p| p.entrants.len() < nb_pairs_per_pool)
            .min_by_key(|p| p.entrants.len())
        else {
            break;
        };
        pool.entrants.push(entrant.id);
        placed += 1;
    }

    if entrants.len() > placed {
        warn!(
            "{} entrants left out of the group stage ({} pools of {})",
            entrants.len() - placed,
            nb_pools,
            nb_pairs_per_pool
        );
    }
    pools
}

/// Fill pool A to capacity, then pool B, and so on, in the given order.
pub fn ordered_pools(
    nb_pools: usize,
    nb_pairs_per_pool: usize,
    entrants: &[&Entrant],
) -> Vec<Pool> {
    let mut pools: Vec<Pool> = (0..nb_pools).map(Pool::new).collect();
    if nb_pairs_per_pool == 0 {
        return pools;
    }
    for (pool, chunk) in pools.iter_mut().zip(entrants.chunks(nb_pairs_per_pool)) {
        pool.entrants = chunk.iter().map(|e| e.id).collect();
    }
    pools
}

/// Every unordered pairing of the pool, once
pub fn round_robin(pool: &Pool) -> Vec<(EntrantId, EntrantId)> {
    let members = &pool.entrants;
    let mut fixtures = Vec::with_capacity(members.len() * members.len().saturating_sub(1) / 2);
    for (i, &a) in members.iter().enumerate() {
        for &b in &members[i + 1..] {
            fixtures.push((a, b));
        }
    }
    fixtures
}

/// Install pools on the group round and generate their fixtures.
///
/// Returns the number of games created.
pub fn build_group_stage(round: &mut Round, pools: Vec<Pool>, next_game_id: &mut u32) -> usize {
    let mut created = 0;
    for (index, pool) in pools.iter().enumerate() {
        for (a, b) in round_robin(pool) {
            let mut game = Game::between(GameId(*next_game_id), a, b);
            game.pool = Some(index);
            *next_game_id += 1;
            round.games.push(game);
            created += 1;
        }
    }
    info!(
        "{}: {} pools, {} round-robin games",
        round.stage,
        pools.len(),
        created
    );
    round.pools = pools;
    created
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tournament::models::Stage;
    use std::collections::HashSet;

    fn entrants(n: usize, seeded: usize) -> Vec<Entrant> {
        (0..n)
            .map(|i| {
                let seed = (i < seeded).then_some(i as u32 + 1);
                Entrant::normal(EntrantId(i), format!("Pair {i}"), seed)
            })
            .collect()
    }

    #[test]
    fn test_snake_order() {
        let order: Vec<usize> = (0..8).map(|k| snake_index(k, 3)).collect();
        assert_eq!(order, vec![0, 1, 2, 2, 1, 0, 0, 1]);
    }

    #[test]
    fn test_seeds_are_snaked_across_pools() {
        let all = entrants(16, 8);
        let refs: Vec<&Entrant> = all.iter().collect();
        let pools = snake_pools(4, 4, &refs);

        assert_eq!(pools[0].entrants[..2], [EntrantId(0), EntrantId(7)]);
        assert_eq!(pools[1].entrants[..2], [EntrantId(1), EntrantId(6)]);
        assert_eq!(pools[2].entrants[..2], [EntrantId(2), EntrantId(5)]);
        assert_eq!(pools[3].entrants[..2], [EntrantId(3), EntrantId(4)]);
        assert!(pools.iter().all(|p| p.entrants.len() == 4));
    }

    #[test]
    fn test_unseeded_balance_pool_sizes() {
        let all = entrants(10, 0);
        let refs: Vec<&Entrant> = all.iter().collect();
        let pools = snake_pools(3, 4, &refs);

        let sizes: Vec<usize> = pools.iter().map(|p| p.entrants.len()).collect();
        assert_eq!(sizes, vec![4, 3, 3]);
    }

    #[test]
    fn test_excess_entrants_left_out() {
        let all = entrants(10, 2);
        let refs: Vec<&Entrant> = all.iter().collect();
        let pools = snake_pools(2, 3, &refs);

        let total: usize = pools.iter().map(|p| p.entrants.len()).sum();
        assert_eq!(total, 6);
    }

    #[test]
    fn test_ordered_pools_keep_caller_order() {
        let all = entrants(6, 6);
        let refs: Vec<&Entrant> = all.iter().collect();
        let pools = ordered_pools(2, 3, &refs);

        assert_eq!(pools[0].entrants, vec![EntrantId(0), EntrantId(1), EntrantId(2)]);
        assert_eq!(pools[1].entrants, vec![EntrantId(3), EntrantId(4), EntrantId(5)]);
    }

    #[test]
    fn test_round_robin_pairs_everyone_once() {
        let mut pool = Pool::new(0);
        pool.entrants = (0..5).map(EntrantId).collect();

        let fixtures = round_robin(&pool);
        assert_eq!(fixtures.len(), 10);
        let unique: HashSet<(EntrantId, EntrantId)> = fixtures.iter().copied().collect();
        assert_eq!(unique.len(), 10);
        assert!(fixtures.iter().all(|(a, b)| a != b));
    }

    #[test]
    fn test_group_stage_game_count() {
        let all = entrants(16, 4);
        let refs: Vec<&Entrant> = all.iter().collect();
        let mut round = Round::new(Stage::Groups);
        let mut next_id = 100;

        let created = build_group_stage(&mut round, snake_pools(4, 4, &refs), &mut next_id);

        assert_eq!(created, 24);
        assert_eq!(round.games.len(), 24);
        assert_eq!(next_id, 124);
        assert!(round.games.iter().all(|g| g.pool.is_some()));
        for game in &round.games {
            let pool = &round.pools[game.pool.unwrap()];
            assert!(pool.entrants.contains(&game.team_a.unwrap()));
            assert!(pool.entrants.contains(&game.team_b.unwrap()));
        }
    }
}
