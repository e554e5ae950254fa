//! The collection contract
//!
//! The registry and shop of a game asset collection. It owns the price
//! table, mints item contracts at deterministically derived addresses,
//! routes consumable heals to existing items and answers the read-side
//! lookups (collection data, item address by index, combined content,
//! royalty parameters).

use crate::contracts::{item, Effect, ExecCtx, MIN_RESERVE};
use crate::{begin_body, ops, Address, ContractKind, ExecError, Message, StateInit};
use roost_cell::snake::{decode_content, encode_content, TAG_OFFCHAIN};
use roost_cell::{Cell, CellBuilder, CellError};
use roost_game::{ItemStats, PriceEntry, PriceTable};
use serde::{Deserialize, Serialize};

/// Royalty terms exposed alongside the collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoyaltyParams {
    /// Numerator of the royalty fraction
    pub factor: u16,
    /// Denominator of the royalty fraction
    pub base: u16,
    /// Where royalties are paid
    pub address: Address,
}

impl RoyaltyParams {
    fn to_cell(&self) -> Result<Cell, CellError> {
        let mut b = CellBuilder::new();
        b.store_uint(self.factor as u64, 16)?;
        b.store_uint(self.base as u64, 16)?;
        self.address.store(&mut b)?;
        Ok(b.build())
    }

    fn from_cell(cell: &Cell) -> Result<Self, CellError> {
        let mut s = cell.begin_parse();
        Ok(Self {
            factor: s.load_uint(16)? as u16,
            base: s.load_uint(16)? as u16,
            address: Address::load(&mut s)?,
        })
    }
}

/// Deploy-time configuration of a collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionConfig {
    pub owner: Address,
    /// Off-chain URL describing the collection itself
    pub collection_url: String,
    /// Shared base URL items append their own content to
    pub common_url: String,
    pub royalty: RoyaltyParams,
    pub prices: PriceTable,
}

/// Persistent collection state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionState {
    pub owner: Address,
    /// Index the next mint will take; counting starts at 1
    pub next_item_index: u64,
    /// Stand-in for the hash of the item contract code
    pub item_code_hash: u64,
    /// Two refs: collection content, shared common content
    pub content: Cell,
    pub prices: PriceTable,
    pub royalty: RoyaltyParams,
}

impl CollectionState {
    /// Initial state for a fresh deployment
    pub fn new(config: &CollectionConfig) -> Result<Self, CellError> {
        let mut content = CellBuilder::new();
        content.store_ref(encode_content(TAG_OFFCHAIN, config.collection_url.as_bytes()))?;
        content.store_ref(encode_content(TAG_OFFCHAIN, config.common_url.as_bytes()))?;
        Ok(Self {
            owner: config.owner,
            next_item_index: 1,
            item_code_hash: item::item_code_hash(),
            content: content.build(),
            prices: config.prices.clone(),
            royalty: config.royalty,
        })
    }

    pub fn to_cell(&self) -> Result<Cell, CellError> {
        let mut b = CellBuilder::new();
        self.owner.store(&mut b)?;
        b.store_uint(self.next_item_index, 64)?;
        b.store_uint(self.item_code_hash, 64)?;
        b.store_ref(self.content.clone())?;
        b.store_ref(self.prices.to_cell()?)?;
        b.store_ref(self.royalty.to_cell()?)?;
        Ok(b.build())
    }

    pub fn from_cell(cell: &Cell) -> Result<Self, CellError> {
        let mut s = cell.begin_parse();
        let owner = Address::load(&mut s)?;
        let next_item_index = s.load_uint(64)?;
        let item_code_hash = s.load_uint(64)?;
        let content = s.load_ref()?.clone();
        let prices = PriceTable::from_cell(s.load_ref()?)?;
        let royalty = RoyaltyParams::from_cell(s.load_ref()?)?;
        Ok(Self {
            owner,
            next_item_index,
            item_code_hash,
            content,
            prices,
            royalty,
        })
    }

    /// Where the item with `index` lives (or will live once minted)
    pub fn item_address(&self, collection: Address, index: u64) -> Address {
        Address::derive_item(self.item_code_hash, collection, index)
    }

    /// The collection's own content URL bytes
    pub fn collection_content(&self) -> Result<Vec<u8>, CellError> {
        let mut s = self.content.begin_parse();
        Ok(decode_content(s.load_ref()?)?.1)
    }

    /// The shared base URL bytes
    pub fn common_content(&self) -> Result<Vec<u8>, CellError> {
        let mut s = self.content.begin_parse();
        s.load_ref()?;
        Ok(decode_content(s.load_ref()?)?.1)
    }

    /// Full content of one item: shared base URL plus its individual part
    pub fn nft_content(&self, individual: &[u8]) -> Result<Vec<u8>, CellError> {
        let mut full = self.common_content()?;
        full.extend_from_slice(individual);
        Ok(full)
    }
}

pub(crate) fn execute(state: &Cell, ctx: &ExecCtx<'_>) -> Result<Effect, ExecError> {
    let mut collection = CollectionState::from_cell(state)?;
    let mut body = ctx.msg.body.begin_parse();
    let op = body.load_uint(32)? as u32;
    let query_id = body.load_uint(64)?;

    if op == ops::purchase() {
        let id = body.load_uint(8)? as u8;
        let entry = *collection.prices.get(id).ok_or(ExecError::UnknownId(id))?;
        let price = entry.price();
        if ctx.msg.value < price {
            return Err(ExecError::InsufficientPayment {
                required: price,
                provided: ctx.msg.value,
            });
        }
        let forward = ctx.msg.value - price;

        match entry {
            PriceEntry::Class(boost) => {
                let index = collection.next_item_index;
                let item_state = item::ItemState {
                    code_hash: collection.item_code_hash,
                    index,
                    collection: ctx.addr,
                    owner: Some(ctx.msg.src),
                    stats: ItemStats::minted(boost.atk, boost.def, boost.spd),
                    content: id.to_string().into_bytes(),
                };
                let dst = collection.item_address(ctx.addr, index);
                collection.next_item_index += 1;
                Ok(Effect {
                    state: collection.to_cell()?,
                    outbound: vec![Message {
                        src: ctx.addr,
                        dst,
                        value: forward,
                        body: Cell::empty(),
                        init: Some(StateInit {
                            kind: ContractKind::Item,
                            state: item_state.to_cell()?,
                        }),
                    }],
                })
            }
            PriceEntry::Item(heal) => {
                let index = body.load_uint(64)?;
                if index == 0 || index >= collection.next_item_index {
                    return Err(ExecError::UnknownItem(index));
                }
                let dst = collection.item_address(ctx.addr, index);
                let mut consume = begin_body(ops::consume(), query_id)?;
                consume.store_uint(heal.hp as u64, 16)?;
                consume.store_uint(heal.energy as u64, 16)?;
                Ok(Effect {
                    state: collection.to_cell()?,
                    outbound: vec![Message::internal(ctx.addr, dst, forward, consume.build())],
                })
            }
        }
    } else if op == ops::withdraw() {
        if ctx.msg.src != collection.owner {
            return Err(ExecError::Unauthorized);
        }
        let requested = body.load_coins()?;
        let payable = requested.min(ctx.balance.saturating_sub(MIN_RESERVE));
        Ok(Effect {
            state: collection.to_cell()?,
            outbound: vec![Message::internal(
                ctx.addr,
                collection.owner,
                payable,
                Cell::empty(),
            )],
        })
    } else if op == ops::change_owner() {
        if ctx.msg.src != collection.owner {
            return Err(ExecError::Unauthorized);
        }
        collection.owner = Address::load(&mut body)?;
        Ok(Effect::keep(collection.to_cell()?))
    } else if op == ops::update_price() {
        if ctx.msg.src != collection.owner {
            return Err(ExecError::Unauthorized);
        }
        let id = body.load_uint(8)? as u8;
        let price = body.load_coins()?;
        if !collection.prices.set_price(id, price) {
            return Err(ExecError::UnknownId(id));
        }
        Ok(Effect::keep(collection.to_cell()?))
    } else if op == ops::deposit() {
        Ok(Effect::keep(collection.to_cell()?))
    } else {
        Err(ExecError::UnknownOp(op))
    }
}

/// Body of a class purchase
pub fn purchase_class_body(query_id: u64, class_id: u8) -> Result<Cell, CellError> {
    let mut b = begin_body(ops::purchase(), query_id)?;
    b.store_uint(class_id as u64, 8)?;
    Ok(b.build())
}

/// Body of a consumable purchase aimed at an existing item
pub fn purchase_item_body(query_id: u64, item_id: u8, item_index: u64) -> Result<Cell, CellError> {
    let mut b = begin_body(ops::purchase(), query_id)?;
    b.store_uint(item_id as u64, 8)?;
    b.store_uint(item_index, 64)?;
    Ok(b.build())
}

/// Body of an `op::withdraw` request
pub fn withdraw_body(query_id: u64, amount: u128) -> Result<Cell, CellError> {
    let mut b = begin_body(ops::withdraw(), query_id)?;
    b.store_coins(amount)?;
    Ok(b.build())
}

/// Body of an `op::change_owner` request
pub fn change_owner_body(query_id: u64, new_owner: Address) -> Result<Cell, CellError> {
    let mut b = begin_body(ops::change_owner(), query_id)?;
    new_owner.store(&mut b)?;
    Ok(b.build())
}

/// Body of an `op::update_price` request
pub fn update_price_body(query_id: u64, id: u8, price: u128) -> Result<Cell, CellError> {
    let mut b = begin_body(ops::update_price(), query_id)?;
    b.store_uint(id as u64, 8)?;
    b.store_coins(price)?;
    Ok(b.build())
}

#[cfg(test)]
mod tests {
    use super::*;
    use roost_game::NANO;

    fn config() -> CollectionConfig {
        CollectionConfig {
            owner: Address::from_seed("deployer"),
            collection_url: "https://game.example/collection.json".into(),
            common_url: "https://game.example/items/".into(),
            royalty: RoyaltyParams {
                factor: 5,
                base: 100,
                address: Address::from_seed("deployer"),
            },
            prices: PriceTable::standard(),
        }
    }

    #[test]
    fn test_state_cell_roundtrip() {
        let state = CollectionState::new(&config()).unwrap();
        let cell = state.to_cell().unwrap();
        let parsed = CollectionState::from_cell(&cell).unwrap();
        assert_eq!(parsed, state);
        assert_eq!(parsed.next_item_index, 1);
        assert_eq!(parsed.prices.price_of(7), Some(NANO));
    }

    #[test]
    fn test_content_accessors() {
        let state = CollectionState::new(&config()).unwrap();
        assert_eq!(
            state.collection_content().unwrap(),
            b"https://game.example/collection.json"
        );
        assert_eq!(
            state.nft_content(b"7").unwrap(),
            b"https://game.example/items/7"
        );
    }

    #[test]
    fn test_item_addresses_are_per_collection_and_index() {
        let state = CollectionState::new(&config()).unwrap();
        let here = Address::from_seed("collection-a");
        let there = Address::from_seed("collection-b");
        assert_ne!(state.item_address(here, 1), state.item_address(here, 2));
        assert_ne!(state.item_address(here, 1), state.item_address(there, 1));
    }
}
