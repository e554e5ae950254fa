//! The item contract
//!
//! One deployed instance per minted asset. The item holds its owner, its
//! stat block and its individual content part; battles run as a three-leg
//! message exchange (battle, challenge, battle_end) between two items so
//! each side applies its own outcome. Both item-to-item legs carry the
//! sender's index and are authenticated by re-deriving the peer address
//! from it, so neither side accepts results forged by a wallet.

use crate::contracts::{Effect, ExecCtx};
use crate::{begin_body, ops, Address, ExecError, Message};
use roost_cell::hash::hash_bytes_with_seed;
use roost_cell::snake::{decode_snake, encode_snake};
use roost_cell::{Cell, CellBuilder, CellError};
use roost_game::{resolve, Combatant, ItemStats, UpgradeRequest};
use serde::{Deserialize, Serialize};

/// Fixed seed for the item code hash
const ITEM_CODE_SEED: u64 = 0x524f_4f53_5449_544d; // "ROOSTITM"

/// Stand-in for the hash of the item contract code, the first input of item
/// address derivation
pub fn item_code_hash() -> u64 {
    hash_bytes_with_seed(b"roost.item.v1", ITEM_CODE_SEED)
}

/// Persistent item state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemState {
    pub code_hash: u64,
    pub index: u64,
    pub collection: Address,
    /// Unset only for an item that was deployed but never assigned
    pub owner: Option<Address>,
    pub stats: ItemStats,
    /// Individual content part, appended to the collection's base URL
    pub content: Vec<u8>,
}

impl ItemState {
    pub fn to_cell(&self) -> Result<Cell, CellError> {
        let mut b = CellBuilder::new();
        b.store_uint(self.code_hash, 64)?;
        b.store_uint(self.index, 64)?;
        self.collection.store(&mut b)?;
        match self.owner {
            Some(owner) => {
                b.store_bit(true)?;
                owner.store(&mut b)?;
            }
            None => {
                b.store_bit(false)?;
            }
        }
        self.stats.store(&mut b)?;
        b.store_ref(encode_snake(&self.content))?;
        Ok(b.build())
    }

    pub fn from_cell(cell: &Cell) -> Result<Self, CellError> {
        let mut s = cell.begin_parse();
        let code_hash = s.load_uint(64)?;
        let index = s.load_uint(64)?;
        let collection = Address::load(&mut s)?;
        let owner = if s.load_bit()? {
            Some(Address::load(&mut s)?)
        } else {
            None
        };
        let stats = ItemStats::load(&mut s)?;
        let content = decode_snake(s.load_ref()?)?;
        Ok(Self {
            code_hash,
            index,
            collection,
            owner,
            stats,
            content,
        })
    }

    /// The address a peer item with `index` must live at
    fn peer_address(&self, index: u64) -> Address {
        Address::derive_item(self.code_hash, self.collection, index)
    }
}

pub(crate) fn execute(state: &Cell, ctx: &ExecCtx<'_>) -> Result<Effect, ExecError> {
    let mut item = ItemState::from_cell(state)?;
    let mut body = ctx.msg.body.begin_parse();
    let op = body.load_uint(32)? as u32;
    let query_id = body.load_uint(64)?;
    let from_owner = item.owner == Some(ctx.msg.src);

    if op == ops::TRANSFER {
        if !from_owner {
            return Err(ExecError::Unauthorized);
        }
        item.owner = Some(Address::load(&mut body)?);
    } else if op == ops::upgrade() {
        if !from_owner {
            return Err(ExecError::Unauthorized);
        }
        let request = UpgradeRequest {
            atk: body.load_uint(16)? as u16,
            def: body.load_uint(16)? as u16,
            spd: body.load_uint(16)? as u16,
            max_hp: body.load_uint(16)? as u16,
            max_energy: body.load_uint(16)? as u16,
        };
        item.stats.upgrade(&request)?;
    } else if op == ops::battle() {
        if !from_owner {
            return Err(ExecError::Unauthorized);
        }
        let opponent = Address::load(&mut body)?;
        if opponent == ctx.addr {
            return Err(ExecError::SelfBattle);
        }
        if item.stats.is_fainted() {
            return Err(ExecError::NoHp);
        }
        let mut challenge = begin_body(ops::challenge(), query_id)?;
        challenge.store_uint(item.index, 64)?;
        let me = Combatant::from(&item.stats);
        for field in [me.atk, me.def, me.spd, me.hp, me.energy] {
            challenge.store_uint(field as u64, 16)?;
        }
        return Ok(Effect {
            state: item.to_cell()?,
            outbound: vec![Message::internal(
                ctx.addr,
                opponent,
                ctx.msg.value,
                challenge.build(),
            )],
        });
    } else if op == ops::challenge() {
        let challenger_index = body.load_uint(64)?;
        if ctx.msg.src != item.peer_address(challenger_index) {
            return Err(ExecError::Unauthorized);
        }
        if item.stats.is_fainted() {
            return Err(ExecError::NoHp);
        }
        let challenger = Combatant {
            atk: body.load_uint(16)? as u16,
            def: body.load_uint(16)? as u16,
            spd: body.load_uint(16)? as u16,
            hp: body.load_uint(16)? as u16,
            energy: body.load_uint(16)? as u16,
        };
        let outcome = resolve(&challenger, &Combatant::from(&item.stats));
        item.stats.apply_battle(
            outcome.damage_to_defender,
            outcome.energy_cost,
            !outcome.challenger_won,
            outcome.exp_award,
        );
        let mut end = begin_body(ops::battle_end(), query_id)?;
        end.store_uint(item.index, 64)?;
        end.store_bit(outcome.challenger_won)?;
        end.store_uint(outcome.damage_to_challenger as u64, 16)?;
        end.store_uint(outcome.energy_cost as u64, 16)?;
        end.store_uint(outcome.exp_award as u64, 16)?;
        return Ok(Effect {
            state: item.to_cell()?,
            outbound: vec![Message::internal(
                ctx.addr,
                ctx.msg.src,
                ctx.msg.value,
                end.build(),
            )],
        });
    } else if op == ops::battle_end() {
        let defender_index = body.load_uint(64)?;
        let defender = item.peer_address(defender_index);
        if defender == ctx.addr || ctx.msg.src != defender {
            return Err(ExecError::Unauthorized);
        }
        let won = body.load_bit()?;
        let damage = body.load_uint(16)? as u16;
        let energy_cost = body.load_uint(16)? as u16;
        let exp_award = body.load_uint(16)? as u16;
        item.stats.apply_battle(damage, energy_cost, won, exp_award);
    } else if op == ops::consume() {
        if ctx.msg.src != item.collection {
            return Err(ExecError::Unauthorized);
        }
        let hp = body.load_uint(16)? as u16;
        let energy = body.load_uint(16)? as u16;
        item.stats.heal(hp, energy);
    } else if op == ops::deposit() {
        // value already credited by the chain
    } else {
        return Err(ExecError::UnknownOp(op));
    }

    Ok(Effect::keep(item.to_cell()?))
}

/// Body of a `transfer` request
pub fn transfer_body(query_id: u64, new_owner: Address) -> Result<Cell, CellError> {
    let mut b = begin_body(ops::TRANSFER, query_id)?;
    new_owner.store(&mut b)?;
    Ok(b.build())
}

/// Body of an `op::upgrade` request
pub fn upgrade_body(query_id: u64, request: &UpgradeRequest) -> Result<Cell, CellError> {
    let mut b = begin_body(ops::upgrade(), query_id)?;
    for field in [
        request.atk,
        request.def,
        request.spd,
        request.max_hp,
        request.max_energy,
    ] {
        b.store_uint(field as u64, 16)?;
    }
    Ok(b.build())
}

/// Body of an `op::battle` request against the item at `opponent`
pub fn battle_body(query_id: u64, opponent: Address) -> Result<Cell, CellError> {
    let mut b = begin_body(ops::battle(), query_id)?;
    opponent.store(&mut b)?;
    Ok(b.build())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ItemState {
        ItemState {
            code_hash: item_code_hash(),
            index: 3,
            collection: Address::from_seed("collection"),
            owner: Some(Address::from_seed("user1")),
            stats: ItemStats::minted(1, 1, 1),
            content: b"7".to_vec(),
        }
    }

    #[test]
    fn test_state_cell_roundtrip() {
        let state = sample();
        let cell = state.to_cell().unwrap();
        assert_eq!(ItemState::from_cell(&cell).unwrap(), state);
    }

    #[test]
    fn test_state_cell_roundtrip_without_owner() {
        let mut state = sample();
        state.owner = None;
        let cell = state.to_cell().unwrap();
        assert_eq!(ItemState::from_cell(&cell).unwrap(), state);
    }

    #[test]
    fn test_code_hash_is_stable() {
        assert_eq!(item_code_hash(), item_code_hash());
    }
}
