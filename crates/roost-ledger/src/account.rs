//! Accounts held by the ledger
//!
//! Every account pairs a coin balance with a persistent state cell. Wallets
//! are plain value holders with an empty state; contract accounts carry
//! their whole state as a cell tree that handlers decode, transition and
//! re-encode.

use roost_cell::Cell;
use serde::{Deserialize, Serialize};

/// What kind of code runs at an address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContractKind {
    /// Externally controlled value holder; accepts anything, runs nothing
    Wallet,
    Counter,
    Collection,
    Item,
}

impl ContractKind {
    pub fn name(&self) -> &'static str {
        match self {
            ContractKind::Wallet => "wallet",
            ContractKind::Counter => "counter",
            ContractKind::Collection => "collection",
            ContractKind::Item => "item",
        }
    }
}

/// One ledger account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub kind: ContractKind,
    /// Balance in nano units
    pub balance: u128,
    /// Persistent state as a cell tree; empty for wallets
    pub state: Cell,
}

impl Account {
    /// A wallet holding `balance`
    pub fn wallet(balance: u128) -> Self {
        Self {
            kind: ContractKind::Wallet,
            balance,
            state: Cell::empty(),
        }
    }

    /// A freshly deployed contract
    pub fn contract(kind: ContractKind, balance: u128, state: Cell) -> Self {
        Self {
            kind,
            balance,
            state,
        }
    }
}
