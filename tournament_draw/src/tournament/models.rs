//! Tournament data models: entrants, games, pools, rounds and stages.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::{DrawError, DrawResult};

/// Stable index of an entrant in the tournament arena
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct EntrantId(pub usize);

impl fmt::Display for EntrantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Game identifier, unique within a tournament
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct GameId(pub u32);

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "G{}", self.0)
    }
}

/// Qualifier slot number (Q1, Q2, ...)
pub type QualifierIndex = u8;

/// What an entrant stands for
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum EntrantKind {
    /// A real pair with an identity
    Normal,
    /// Empty slot sentinel, one per tournament
    Bye,
    /// Main-draw slot reserved for the winner of a qualification branch
    Qualifier(QualifierIndex),
}

/// A participant of the draw
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Entrant {
    pub id: EntrantId,
    pub name: String,
    /// Seed rank, lower is better; `None` means unseeded
    pub seed: Option<u32>,
    pub kind: EntrantKind,
}

impl Entrant {
    /// Create a real entrant. A seed of 0 is treated as unseeded.
    pub fn normal(id: EntrantId, name: impl Into<String>, seed: Option<u32>) -> Self {
        Self {
            id,
            name: name.into(),
            seed: seed.filter(|&s| s > 0),
            kind: EntrantKind::Normal,
        }
    }

    pub fn bye(id: EntrantId) -> Self {
        Self {
            id,
            name: "BYE".to_string(),
            seed: None,
            kind: EntrantKind::Bye,
        }
    }

    pub fn qualifier(id: EntrantId, index: QualifierIndex) -> Self {
        Self {
            id,
            name: format!("Q{index}"),
            seed: None,
            kind: EntrantKind::Qualifier(index),
        }
    }

    pub fn is_bye(&self) -> bool {
        self.kind == EntrantKind::Bye
    }

    pub fn is_real(&self) -> bool {
        self.kind == EntrantKind::Normal
    }

    pub fn qualifier_index(&self) -> Option<QualifierIndex> {
        match self.kind {
            EntrantKind::Qualifier(index) => Some(index),
            _ => None,
        }
    }

    /// Seed rank used for protection math. Byes and qualifiers never carry one.
    pub fn seed_rank(&self) -> Option<u32> {
        if self.is_real() { self.seed } else { None }
    }
}

impl fmt::Display for Entrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.seed_rank() {
            Some(seed) => write!(f, "{} [{seed}]", self.name),
            None => write!(f, "{}", self.name),
        }
    }
}

/// Look up an entrant in the arena
pub fn lookup(entrants: &[Entrant], id: EntrantId) -> DrawResult<&Entrant> {
    entrants.get(id.0).ok_or(DrawError::UnknownEntrant(id))
}

/// Side of a game
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum TeamSide {
    A,
    B,
}

impl TeamSide {
    /// Side of a bracket slot: even slots are side A
    pub fn of_slot(slot: usize) -> Self {
        if slot % 2 == 0 { Self::A } else { Self::B }
    }

    pub fn opposite(self) -> Self {
        match self {
            Self::A => Self::B,
            Self::B => Self::A,
        }
    }

    fn index(self) -> usize {
        match self {
            Self::A => 0,
            Self::B => 1,
        }
    }
}

impl fmt::Display for TeamSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::A => write!(f, "A"),
            Self::B => write!(f, "B"),
        }
    }
}

/// A match between two slots
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Game {
    pub id: GameId,
    pub team_a: Option<EntrantId>,
    pub team_b: Option<EntrantId>,
    /// Winner side as reported by the scoring collaborator
    pub winner: Option<TeamSide>,
    /// Owning pool for group-stage games
    pub pool: Option<usize>,
    /// Qualifier index whose placeholder was drawn into each side
    reserved: [Option<QualifierIndex>; 2],
}

impl Game {
    pub fn new(id: GameId) -> Self {
        Self {
            id,
            team_a: None,
            team_b: None,
            winner: None,
            pool: None,
            reserved: [None; 2],
        }
    }

    pub fn between(id: GameId, a: EntrantId, b: EntrantId) -> Self {
        Self {
            team_a: Some(a),
            team_b: Some(b),
            ..Self::new(id)
        }
    }

    pub fn slot(&self, side: TeamSide) -> Option<EntrantId> {
        match side {
            TeamSide::A => self.team_a,
            TeamSide::B => self.team_b,
        }
    }

    pub fn set_slot(&mut self, side: TeamSide, entrant: Option<EntrantId>) {
        match side {
            TeamSide::A => self.team_a = entrant,
            TeamSide::B => self.team_b = entrant,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.team_a.is_none() && self.team_b.is_none()
    }

    pub fn reserved_for(&self, side: TeamSide) -> Option<QualifierIndex> {
        self.reserved[side.index()]
    }

    pub fn contains(&self, entrant: EntrantId) -> bool {
        self.team_a == Some(entrant) || self.team_b == Some(entrant)
    }

    /// Entrant on the recorded winner side
    pub fn winning_entrant(&self) -> Option<EntrantId> {
        self.winner.and_then(|side| self.slot(side))
    }
}

/// Subset of entrants playing each other in the group stage
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Pool {
    pub name: String,
    pub entrants: Vec<EntrantId>,
}

impl Pool {
    pub fn new(index: usize) -> Self {
        Self {
            name: pool_name(index),
            entrants: Vec::new(),
        }
    }
}

/// Pool letters A..Z, then P27, P28, ...
pub fn pool_name(index: usize) -> String {
    match u8::try_from(index) {
        Ok(i) if i < 26 => char::from(b'A' + i).to_string(),
        _ => format!("P{}", index + 1),
    }
}

/// Tournament stage, ordered from the first qualification round to the final
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum Stage {
    Q1,
    Q2,
    Q3,
    Groups,
    R128,
    R64,
    R32,
    R16,
    Quarters,
    Semis,
    Final,
}

impl Stage {
    /// Main-draw stage for a bracket with `size` slots
    pub fn for_bracket_size(size: usize) -> Option<Self> {
        match size {
            128 => Some(Self::R128),
            64 => Some(Self::R64),
            32 => Some(Self::R32),
            16 => Some(Self::R16),
            8 => Some(Self::Quarters),
            4 => Some(Self::Semis),
            2 => Some(Self::Final),
            _ => None,
        }
    }

    /// Qualification round by zero-based depth
    pub fn qualification(depth: usize) -> Option<Self> {
        match depth {
            0 => Some(Self::Q1),
            1 => Some(Self::Q2),
            2 => Some(Self::Q3),
            _ => None,
        }
    }

    pub fn is_qualification(self) -> bool {
        matches!(self, Self::Q1 | Self::Q2 | Self::Q3)
    }

    pub fn is_group(self) -> bool {
        self == Self::Groups
    }

    pub fn is_main_draw(self) -> bool {
        self > Self::Groups
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::Q1 => "Q1",
            Self::Q2 => "Q2",
            Self::Q3 => "Q3",
            Self::Groups => "Groups",
            Self::R128 => "R128",
            Self::R64 => "R64",
            Self::R32 => "R32",
            Self::R16 => "R16",
            Self::Quarters => "Quarters",
            Self::Semis => "Semis",
            Self::Final => "Final",
        };
        write!(f, "{repr}")
    }
}

/// All games of one stage, plus the pools of a group stage
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Round {
    pub stage: Stage,
    pub games: Vec<Game>,
    pub pools: Vec<Pool>,
}

impl Round {
    pub fn new(stage: Stage) -> Self {
        Self {
            stage,
            games: Vec::new(),
            pools: Vec::new(),
        }
    }

    pub fn slot_count(&self) -> usize {
        self.games.len() * 2
    }

    /// Occupant of a bracket slot (`slot / 2` is the game, parity the side)
    pub fn slot(&self, slot: usize) -> Option<EntrantId> {
        self.games
            .get(slot / 2)
            .and_then(|game| game.slot(TeamSide::of_slot(slot)))
    }

    pub fn is_slot_empty(&self, slot: usize) -> bool {
        slot < self.slot_count() && self.slot(slot).is_none()
    }

    /// Indices of empty slots in bracket order
    pub fn empty_slots(&self) -> Vec<usize> {
        (0..self.slot_count())
            .filter(|&slot| self.slot(slot).is_none())
            .collect()
    }

    pub fn count_occupied_by(&self, entrant: EntrantId) -> usize {
        self.games
            .iter()
            .map(|g| usize::from(g.team_a == Some(entrant)) + usize::from(g.team_b == Some(entrant)))
            .sum()
    }

    /// Put an entrant into an empty slot.
    ///
    /// Placing a qualifier placeholder also reserves the slot for that
    /// qualifier index.
    pub fn place(&mut self, slot: usize, entrant: &Entrant) -> DrawResult<()> {
        let side = TeamSide::of_slot(slot);
        let slots = self.slot_count();
        let game = self
            .games
            .get_mut(slot / 2)
            .ok_or(DrawError::SlotCountMismatch {
                slots,
                draw_size: slot + 1,
            })?;
        if game.slot(side).is_some() {
            return Err(DrawError::SlotOccupied {
                game: slot / 2,
                side,
            });
        }
        game.set_slot(side, Some(entrant.id));
        if let Some(index) = entrant.qualifier_index() {
            game.reserved[side.index()] = Some(index);
        }
        Ok(())
    }

    pub fn has_entrants(&self) -> bool {
        self.games.iter().any(|g| !g.is_empty())
    }
}
