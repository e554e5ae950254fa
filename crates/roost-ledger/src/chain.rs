//! The simulated chain
//!
//! A chain is a deterministic account store plus a FIFO message queue.
//! Messages are processed strictly one at a time: each delivery either
//! commits its whole effect (new state cell, outbound messages, balance
//! moves) or reverts completely and returns the remaining value to the
//! sender. Sequences of messages are never atomic; a later leg can fail
//! after an earlier leg committed.
//!
//! Every delivery burns a flat [`PROCESS_FEE`] from the carried value and
//! leaves one [`TxRecord`] in the trace.

use crate::contracts::collection::{CollectionConfig, CollectionState, RoyaltyParams};
use crate::contracts::counter::CounterState;
use crate::contracts::item::ItemState;
use crate::contracts::{self, ExecCtx};
use crate::{
    Account, Address, ContractKind, LedgerError, Message, Result, TxRecord, EXIT_SUCCESS,
};
use indexmap::IndexMap;
use roost_cell::Cell;
use roost_game::ItemStats;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Flat fee burned per delivered message
pub const PROCESS_FEE: u128 = 5_000_000;

/// Starting balance of a treasury wallet
const TREASURY_BALANCE: u128 = 1_000 * roost_game::NANO;

/// The whole ledger: accounts, in-flight messages and the trace
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Chain {
    accounts: IndexMap<Address, Account>,
    queue: VecDeque<Message>,
    trace: Vec<TxRecord>,
}

impl Chain {
    /// An empty chain
    pub fn new() -> Self {
        Self::default()
    }

    /// A funded wallet derived from a seed string, created on first use
    pub fn treasury(&mut self, seed: &str) -> Address {
        let addr = Address::from_seed(seed);
        self.accounts
            .entry(addr)
            .or_insert_with(|| Account::wallet(TREASURY_BALANCE));
        addr
    }

    /// Look up an account
    pub fn account(&self, addr: Address) -> Option<&Account> {
        self.accounts.get(&addr)
    }

    /// Balance of an existing account
    pub fn balance(&self, addr: Address) -> Result<u128> {
        self.accounts
            .get(&addr)
            .map(|a| a.balance)
            .ok_or(LedgerError::UnknownAccount(addr))
    }

    /// Every transaction processed so far
    pub fn trace(&self) -> &[TxRecord] {
        &self.trace
    }

    /// Deploy a counter contract
    pub fn deploy_counter(&mut self, owner: Address, id: u32, balance: u128) -> Result<Address> {
        let state = CounterState::new(id, owner).to_cell()?;
        let addr = Address::of_state(&state);
        self.accounts
            .entry(addr)
            .or_insert_with(|| Account::contract(ContractKind::Counter, balance, state));
        Ok(addr)
    }

    /// Deploy a collection contract
    pub fn deploy_collection(&mut self, config: &CollectionConfig, balance: u128) -> Result<Address> {
        let state = CollectionState::new(config)?.to_cell()?;
        let addr = Address::of_state(&state);
        self.accounts
            .entry(addr)
            .or_insert_with(|| Account::contract(ContractKind::Collection, balance, state));
        Ok(addr)
    }

    /// Send a message from an existing account and run the queue to empty
    ///
    /// Returns the transaction records this send produced, in processing
    /// order (they are also appended to the trace).
    pub fn send(&mut self, from: Address, to: Address, value: u128, body: Cell) -> Result<Vec<TxRecord>> {
        let sender = self
            .accounts
            .get_mut(&from)
            .ok_or(LedgerError::UnknownAccount(from))?;
        if sender.balance < value {
            return Err(LedgerError::InsufficientBalance {
                address: from,
                requested: value,
                available: sender.balance,
            });
        }
        sender.balance -= value;
        self.queue.push_back(Message::internal(from, to, value, body));

        let start = self.trace.len();
        while let Some(msg) = self.queue.pop_front() {
            self.deliver(msg);
        }
        Ok(self.trace[start..].to_vec())
    }

    /// Deliver one message: execute, then commit or revert
    fn deliver(&mut self, msg: Message) {
        let fee = PROCESS_FEE.min(msg.value);
        let delivered = msg.value - fee;

        let account = self.accounts.entry(msg.dst).or_insert_with(|| match &msg.init {
            Some(init) => Account::contract(init.kind, 0, init.state.clone()),
            None => Account::wallet(0),
        });
        // A deploy claims an address that so far only held value
        if let Some(init) = &msg.init {
            if account.kind == ContractKind::Wallet {
                account.kind = init.kind;
                account.state = init.state.clone();
            }
        }
        let kind = account.kind;
        let state = account.state.clone();
        let balance = account.balance;

        let ctx = ExecCtx {
            addr: msg.dst,
            msg: &msg,
            balance: balance + delivered,
        };
        let record = match contracts::execute(kind, &state, &ctx) {
            Ok(effect) => {
                let outbound_total: u128 = effect.outbound.iter().map(|m| m.value).sum();
                if let Some(account) = self.accounts.get_mut(&msg.dst) {
                    account.state = effect.state;
                    account.balance = (balance + delivered).saturating_sub(outbound_total);
                }
                self.queue.extend(effect.outbound);
                TxRecord {
                    from: msg.src,
                    to: msg.dst,
                    value: msg.value,
                    op: msg.op(),
                    success: true,
                    exit_code: EXIT_SUCCESS,
                }
            }
            Err(err) => {
                let sender = self
                    .accounts
                    .entry(msg.src)
                    .or_insert_with(|| Account::wallet(0));
                sender.balance += delivered;
                TxRecord {
                    from: msg.src,
                    to: msg.dst,
                    value: msg.value,
                    op: msg.op(),
                    success: false,
                    exit_code: err.exit_code(),
                }
            }
        };
        self.trace.push(record);
    }

    fn contract_state(&self, addr: Address, kind: ContractKind) -> Result<&Cell> {
        let account = self
            .accounts
            .get(&addr)
            .ok_or(LedgerError::UnknownAccount(addr))?;
        if account.kind != kind {
            return Err(LedgerError::WrongContract {
                address: addr,
                expected: kind.name(),
            });
        }
        Ok(&account.state)
    }

    /// Read a counter's state
    pub fn counter_data(&self, addr: Address) -> Result<CounterState> {
        Ok(CounterState::from_cell(self.contract_state(addr, ContractKind::Counter)?)?)
    }

    /// Read a collection's state
    pub fn collection_state(&self, addr: Address) -> Result<CollectionState> {
        Ok(CollectionState::from_cell(self.contract_state(addr, ContractKind::Collection)?)?)
    }

    /// Royalty terms of a collection
    pub fn royalty_params(&self, collection: Address) -> Result<RoyaltyParams> {
        Ok(self.collection_state(collection)?.royalty)
    }

    /// Where the item with `index` of `collection` lives (minted or not)
    pub fn nft_address_by_index(&self, collection: Address, index: u64) -> Result<Address> {
        Ok(self.collection_state(collection)?.item_address(collection, index))
    }

    /// Read an item's state
    pub fn nft_data(&self, addr: Address) -> Result<ItemState> {
        Ok(ItemState::from_cell(self.contract_state(addr, ContractKind::Item)?)?)
    }

    /// Read an item's stat block
    pub fn nft_stats(&self, addr: Address) -> Result<ItemStats> {
        Ok(self.nft_data(addr)?.stats)
    }

    /// Full content of a minted item: the collection's base URL plus the
    /// item's individual part
    pub fn nft_content(&self, collection: Address, item: Address) -> Result<Vec<u8>> {
        let individual = self.nft_data(item)?.content;
        Ok(self.collection_state(collection)?.nft_content(&individual)?)
    }
}
