//! Error types for roost-ledger
//!
//! Two layers: `ExecError` is what a contract handler returns and maps to a
//! numeric exit code recorded in the transaction trace; `LedgerError` covers
//! host-level failures (unknown accounts, decoding state for read accessors)
//! that never reach a transaction record.

use crate::Address;
use roost_cell::CellError;
use roost_game::GameError;
use thiserror::Error;

/// Exit code of a successful transaction
pub const EXIT_SUCCESS: u16 = 0;

/// Contract execution failure, recorded as a numeric exit code
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExecError {
    /// Malformed state or message body
    #[error(transparent)]
    Codec(#[from] CellError),

    #[error("Payment of {provided} below the required {required}")]
    InsufficientPayment { required: u128, provided: u128 },

    #[error("Sender is not allowed to perform this operation")]
    Unauthorized,

    #[error("No price entry under id {0}")]
    UnknownId(u8),

    #[error("No item minted at index {0}")]
    UnknownItem(u64),

    #[error("Not enough unallocated points")]
    InsufficientPoints,

    #[error("Item has no hp left")]
    NoHp,

    #[error("An item cannot battle itself")]
    SelfBattle,

    #[error("Unknown operation 0x{0:08x}")]
    UnknownOp(u32),
}

impl ExecError {
    /// The numeric exit code recorded in the transaction trace
    pub fn exit_code(&self) -> u16 {
        match self {
            ExecError::Codec(_) => 9,
            ExecError::InsufficientPayment { .. } => 400,
            ExecError::Unauthorized => 403,
            ExecError::UnknownId(_) => 404,
            ExecError::UnknownItem(_) => 404,
            ExecError::InsufficientPoints => 406,
            ExecError::NoHp => 410,
            ExecError::SelfBattle => 411,
            ExecError::UnknownOp(_) => 0xffff,
        }
    }
}

impl From<GameError> for ExecError {
    fn from(err: GameError) -> Self {
        match err {
            GameError::InsufficientPoints { .. } => ExecError::InsufficientPoints,
            GameError::Codec(inner) => ExecError::Codec(inner),
        }
    }
}

/// Host-level ledger error
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("No account at {0}")]
    UnknownAccount(Address),

    #[error("Account {address} holds {available} but {requested} was requested")]
    InsufficientBalance {
        address: Address,
        requested: u128,
        available: u128,
    },

    #[error("Account at {address} is not a {expected}")]
    WrongContract {
        address: Address,
        expected: &'static str,
    },

    #[error(transparent)]
    Codec(#[from] CellError),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, LedgerError>;
