//! Error types for roost-game

use roost_cell::CellError;
use thiserror::Error;

/// Game rule error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Upgrade requests {requested} points but only {available} are unallocated")]
    InsufficientPoints { requested: u16, available: u16 },

    #[error(transparent)]
    Codec(#[from] CellError),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, GameError>;
