//! Single-elimination bracket building blocks.
//!
//! - Power-of-two sizing helpers
//! - Canonical seed positions and seed placement
//! - Bye placement with seed protection
//! - Ordered, shuffled and scattered fill of the remaining slots

pub mod byes;
pub mod math;
pub mod placement;
pub mod seeding;

pub use byes::place_byes;
pub use math::{is_power_of_two, largest_power_of_two_le, next_power_of_two};
pub use placement::{fill_in_order, fill_shuffled, scatter};
pub use seeding::{place_seeds, seed_positions};
