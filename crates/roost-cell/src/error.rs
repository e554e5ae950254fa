//! Error types for roost-cell

use thiserror::Error;

/// Codec error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CellError {
    #[error("Cell bit capacity exceeded: {used} bits used, {requested} more requested")]
    BitOverflow { used: usize, requested: usize },

    #[error("Cell reference capacity exceeded")]
    RefOverflow,

    #[error("Read past cell data: {remaining} bits remaining, {requested} requested")]
    BitUnderflow { remaining: usize, requested: usize },

    #[error("Read past cell references")]
    RefUnderflow,

    #[error("Value does not fit in {bits} bits")]
    ValueTooWide { bits: u32 },

    #[error("Coin amount does not fit in a var-length coins field")]
    CoinsTooLarge,

    #[error("Remaining payload is not byte aligned")]
    Misaligned,

    #[error("Cell chain exceeds the maximum walk depth")]
    ChainTooDeep,

    #[error("Dictionary entry exceeds cell capacity")]
    EntryTooLarge,

    #[error("Content cell carries no tag byte")]
    EmptyContent,
}

/// Result type alias
pub type Result<T> = std::result::Result<T, CellError>;
