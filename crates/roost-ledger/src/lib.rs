//! Roost Ledger - a simulated message-driven ledger
//!
//! Accounts hold a balance and a state cell; everything that happens is a
//! message, processed strictly one at a time from a FIFO queue. Contract
//! handlers (collection, item, counter) decode their state cell, apply one
//! message and re-encode; the chain commits the whole effect or reverts it
//! and refunds the sender. The transaction trace is the observable record
//! tests assert against.

mod account;
mod address;
mod chain;
pub mod contracts;
mod error;
mod message;
pub mod ops;

pub use account::{Account, ContractKind};
pub use address::{Address, ADDRESS_BITS};
pub use chain::{Chain, PROCESS_FEE};
pub use contracts::collection::{
    CollectionConfig, CollectionState, RoyaltyParams,
};
pub use contracts::counter::CounterState;
pub use contracts::item::ItemState;
pub use contracts::MIN_RESERVE;
pub use error::{ExecError, LedgerError, Result, EXIT_SUCCESS};
pub use message::{begin_body, Message, StateInit, TxRecord};
