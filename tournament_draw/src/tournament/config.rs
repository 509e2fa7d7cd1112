//! Tournament configuration models.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::bracket::math::{is_power_of_two, next_power_of_two};
use crate::errors::DrawResult;

/// Largest main-draw bracket (R128)
pub const MAX_BRACKET_SIZE: usize = 128;

/// Deepest qualification branch (Q1..Q3)
pub const MAX_QUALIFICATION_ROUNDS: usize = 3;

/// Tournament format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TournamentFormat {
    /// Pure single elimination
    Knockout,
    /// Round-robin pools feeding a knockout
    GroupsKo,
    /// Qualification bracket feeding qualifier slots of the main draw
    QualifKo,
}

impl fmt::Display for TournamentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TournamentFormat::Knockout => write!(f, "KNOCKOUT"),
            TournamentFormat::GroupsKo => write!(f, "GROUPS_KO"),
            TournamentFormat::QualifKo => write!(f, "QUALIF_KO"),
        }
    }
}

/// How entrants are laid out in the initial rounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DrawMode {
    /// Seeds, byes and a random fill
    #[default]
    Seeded,
    /// Caller-supplied order, no shuffling
    Manual,
}

/// Configuration of one draw generation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TournamentConfig {
    pub format: TournamentFormat,

    /// Main-draw entrants (direct entries plus qualifiers)
    pub main_draw_size: usize,

    /// Seeds protected in the main draw
    pub nb_seeds: usize,

    pub nb_pools: usize,

    pub nb_pairs_per_pool: usize,

    /// Entrants advancing from each pool
    pub nb_qualified_by_pool: usize,

    /// Qualification bracket size (a power of two)
    pub pre_qual_draw_size: usize,

    /// Qualifier slots in the main draw
    pub nb_qualifiers: usize,

    /// Seeds protected in the qualification bracket
    pub nb_seeds_qualify: usize,

    pub draw_mode: DrawMode,
}

impl Default for TournamentConfig {
    fn default() -> Self {
        Self::knockout(16, 4)
    }
}

impl TournamentConfig {
    /// Single-elimination draw
    pub fn knockout(main_draw_size: usize, nb_seeds: usize) -> Self {
        Self {
            format: TournamentFormat::Knockout,
            main_draw_size,
            nb_seeds,
            nb_pools: 0,
            nb_pairs_per_pool: 0,
            nb_qualified_by_pool: 0,
            pre_qual_draw_size: 0,
            nb_qualifiers: 0,
            nb_seeds_qualify: 0,
            draw_mode: DrawMode::Seeded,
        }
    }

    /// Pools feeding a knockout of `nb_pools * nb_qualified_by_pool` entrants
    pub fn groups_knockout(
        nb_pools: usize,
        nb_pairs_per_pool: usize,
        nb_qualified_by_pool: usize,
    ) -> Self {
        Self {
            format: TournamentFormat::GroupsKo,
            main_draw_size: nb_pools * nb_qualified_by_pool,
            nb_seeds: 0,
            nb_pools,
            nb_pairs_per_pool,
            nb_qualified_by_pool,
            ..Self::knockout(0, 0)
        }
    }

    /// Qualification bracket feeding `nb_qualifiers` main-draw slots
    pub fn qualif_knockout(
        main_draw_size: usize,
        nb_seeds: usize,
        pre_qual_draw_size: usize,
        nb_qualifiers: usize,
        nb_seeds_qualify: usize,
    ) -> Self {
        Self {
            format: TournamentFormat::QualifKo,
            pre_qual_draw_size,
            nb_qualifiers,
            nb_seeds_qualify,
            ..Self::knockout(main_draw_size, nb_seeds)
        }
    }

    pub fn with_draw_mode(mut self, draw_mode: DrawMode) -> Self {
        self.draw_mode = draw_mode;
        self
    }

    /// Load a configuration from JSON. Missing fields take knockout defaults.
    pub fn from_json(json: &str) -> DrawResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Slots of the first main-draw round
    pub fn bracket_size(&self) -> usize {
        next_power_of_two(self.main_draw_size).unwrap_or(0)
    }

    /// Entrants that skip qualification
    pub fn direct_entries(&self) -> usize {
        match self.format {
            TournamentFormat::QualifKo => self.main_draw_size.saturating_sub(self.nb_qualifiers),
            _ => self.main_draw_size,
        }
    }

    /// Qualification rounds needed to bring the pre-qualification draw down
    /// to one winner per qualifier slot
    pub fn qualification_rounds(&self) -> usize {
        if self.format != TournamentFormat::QualifKo || self.nb_qualifiers == 0 {
            return 0;
        }
        let ratio = self.pre_qual_draw_size / self.nb_qualifiers;
        if ratio < 2 {
            0
        } else {
            ratio.trailing_zeros() as usize
        }
    }

    /// Entrants a full draw can take in
    pub fn capacity(&self) -> usize {
        match self.format {
            TournamentFormat::Knockout => self.main_draw_size,
            TournamentFormat::GroupsKo => self.nb_pools * self.nb_pairs_per_pool,
            TournamentFormat::QualifKo => self.direct_entries() + self.pre_qual_draw_size,
        }
    }

    /// Structural checks. A non-empty result blocks draw generation.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.main_draw_size < 2 {
            errors.push(format!(
                "Main draw size must be at least 2, got {}",
                self.main_draw_size
            ));
        } else if self.bracket_size() > MAX_BRACKET_SIZE {
            errors.push(format!(
                "Main draw size {} exceeds the largest bracket of {MAX_BRACKET_SIZE}",
                self.main_draw_size
            ));
        }

        if self.nb_seeds > self.main_draw_size {
            errors.push(format!(
                "Number of seeds ({}) exceeds main draw size ({})",
                self.nb_seeds, self.main_draw_size
            ));
        }

        match self.format {
            TournamentFormat::Knockout => {}
            TournamentFormat::GroupsKo => self.validate_groups(&mut errors),
            TournamentFormat::QualifKo => self.validate_qualification(&mut errors),
        }

        errors
    }

    fn validate_groups(&self, errors: &mut Vec<String>) {
        if self.nb_pools == 0 {
            errors.push("Number of pools must be at least 1".to_string());
        }
        if self.nb_pairs_per_pool < 2 {
            errors.push(format!(
                "Pools need at least 2 pairs, got {}",
                self.nb_pairs_per_pool
            ));
        }
        if self.nb_qualified_by_pool == 0 || self.nb_qualified_by_pool > self.nb_pairs_per_pool {
            errors.push(format!(
                "Qualified per pool ({}) must be between 1 and pairs per pool ({})",
                self.nb_qualified_by_pool, self.nb_pairs_per_pool
            ));
        }
        if self.main_draw_size != self.nb_pools * self.nb_qualified_by_pool {
            errors.push(format!(
                "Main draw size ({}) must equal pools x qualified per pool ({})",
                self.main_draw_size,
                self.nb_pools * self.nb_qualified_by_pool
            ));
        }
    }

    fn validate_qualification(&self, errors: &mut Vec<String>) {
        if !is_power_of_two(self.pre_qual_draw_size) {
            errors.push(format!(
                "Qualification draw size must be a power of two, got {}",
                self.pre_qual_draw_size
            ));
        }
        if self.nb_qualifiers == 0 {
            errors.push("Number of qualifiers must be at least 1".to_string());
        } else {
            let ratio = self.pre_qual_draw_size / self.nb_qualifiers;
            if self.pre_qual_draw_size % self.nb_qualifiers != 0
                || ratio < 2
                || !is_power_of_two(ratio)
            {
                errors.push(format!(
                    "Qualification draw size ({}) must be a power-of-two multiple (at least 2x) of the number of qualifiers ({})",
                    self.pre_qual_draw_size, self.nb_qualifiers
                ));
            } else if ratio.trailing_zeros() as usize > MAX_QUALIFICATION_ROUNDS {
                errors.push(format!(
                    "Qualification needs {} rounds, at most {MAX_QUALIFICATION_ROUNDS} are supported",
                    ratio.trailing_zeros()
                ));
            }
        }
        if self.nb_qualifiers >= self.main_draw_size {
            errors.push(format!(
                "Number of qualifiers ({}) must be smaller than main draw size ({})",
                self.nb_qualifiers, self.main_draw_size
            ));
        }
        if self.nb_qualifiers > usize::from(u8::MAX) {
            errors.push(format!(
                "At most {} qualifier slots are supported, got {}",
                u8::MAX,
                self.nb_qualifiers
            ));
        }
        if self.nb_seeds > self.direct_entries() {
            errors.push(format!(
                "Number of seeds ({}) exceeds direct entries ({})",
                self.nb_seeds,
                self.direct_entries()
            ));
        }
        if self.nb_seeds_qualify > self.pre_qual_draw_size {
            errors.push(format!(
                "Qualification seeds ({}) exceed qualification draw size ({})",
                self.nb_seeds_qualify, self.pre_qual_draw_size
            ));
        }
    }
}
