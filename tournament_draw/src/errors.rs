//! Error types for draw generation and propagation.

use thiserror::Error;

use crate::tournament::models::{EntrantId, GameId, TeamSide};

/// Result type for draw operations
pub type DrawResult<T> = Result<T, DrawError>;

/// Draw and propagation errors
///
/// Every variant except `Serialization` is a deterministic function of the
/// input state: retrying without changing the input reproduces it.
#[derive(Debug, Error)]
pub enum DrawError {
    /// Configuration rejected by `TournamentConfig::validate`
    #[error("Invalid tournament configuration: {}", .0.join("; "))]
    InvalidConfig(Vec<String>),

    /// Bracket helpers only accept positive sizes (and powers of two where a bracket is implied)
    #[error("Invalid bracket size: {0}")]
    InvalidBracketSize(usize),

    /// The round does not expose as many slots as the draw size
    #[error("Round exposes {slots} slots but the draw size is {draw_size}")]
    SlotCountMismatch { slots: usize, draw_size: usize },

    /// Byes remained after every placement pass
    #[error("Not enough empty slots to place {remaining} remaining byes")]
    NotEnoughEmptySlots { remaining: usize },

    /// Double placement into an occupied slot
    #[error("Slot already occupied: game {game}, side {side}")]
    SlotOccupied { game: usize, side: TeamSide },

    #[error("Entrant not found: {0}")]
    UnknownEntrant(EntrantId),

    #[error("Game not found: {0}")]
    UnknownGame(GameId),

    #[error("Tournament structure has not been initialized")]
    StructureNotInitialized,

    #[error("Tournament structure is already initialized")]
    AlreadyInitialized,

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
