//! Contract handlers
//!
//! Each handler is a pure transition: it decodes the account's state cell,
//! applies one inbound message and returns the new state cell plus any
//! outbound messages. The chain commits the whole effect or none of it.

pub mod collection;
pub mod counter;
pub mod item;

use crate::{Address, ContractKind, ExecError, Message};
use roost_cell::Cell;

/// Balance floor a contract keeps when paying out
pub const MIN_RESERVE: u128 = 10_000_000;

/// Execution context of one message delivery
pub(crate) struct ExecCtx<'a> {
    /// The account being executed
    pub addr: Address,
    /// The inbound message
    pub msg: &'a Message,
    /// Account balance including the inbound value
    pub balance: u128,
}

/// Result of one successful contract execution
pub(crate) struct Effect {
    pub state: Cell,
    pub outbound: Vec<Message>,
}

impl Effect {
    /// Accept the message without changing state or sending anything
    pub fn keep(state: Cell) -> Self {
        Self {
            state,
            outbound: Vec::new(),
        }
    }
}

/// Dispatch one message to the handler for the account kind
///
/// Bodies too short to carry an operation code are plain value transfers
/// and are accepted by every contract.
pub(crate) fn execute(
    kind: ContractKind,
    state: &Cell,
    ctx: &ExecCtx<'_>,
) -> Result<Effect, ExecError> {
    if ctx.msg.body.bit_len() < 32 {
        return Ok(Effect::keep(state.clone()));
    }
    match kind {
        ContractKind::Wallet => Ok(Effect::keep(state.clone())),
        ContractKind::Counter => counter::execute(state, ctx),
        ContractKind::Collection => collection::execute(state, ctx),
        ContractKind::Item => item::execute(state, ctx),
    }
}
