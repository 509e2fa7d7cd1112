//! Group stage: snake-seeded pools, round-robin fixtures and pool tables.

pub mod pools;
pub mod standings;

pub use pools::{build_group_stage, ordered_pools, round_robin, snake_pools};
pub use standings::{PoolStanding, pool_qualifiers, pool_standings};
