//! The counter contract
//!
//! A small stateful contract: a 32-bit counter anyone can move, plus a coin
//! box only the owner can drain. It records the address that last touched
//! the counter.

use crate::contracts::{Effect, ExecCtx, MIN_RESERVE};
use crate::{ops, Address, ExecError, Message};
use roost_cell::{Cell, CellBuilder, CellError};
use serde::{Deserialize, Serialize};

/// Persistent counter state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterState {
    /// Distinguishes instances sharing the same owner
    pub id: u32,
    pub value: u32,
    /// Who last moved the counter
    pub last: Address,
    pub owner: Address,
}

impl CounterState {
    /// Fresh state with the counter at zero
    pub fn new(id: u32, owner: Address) -> Self {
        Self {
            id,
            value: 0,
            last: owner,
            owner,
        }
    }

    pub fn to_cell(&self) -> Result<Cell, CellError> {
        let mut b = CellBuilder::new();
        b.store_uint(self.id as u64, 32)?;
        b.store_uint(self.value as u64, 32)?;
        self.last.store(&mut b)?;
        self.owner.store(&mut b)?;
        Ok(b.build())
    }

    pub fn from_cell(cell: &Cell) -> Result<Self, CellError> {
        let mut s = cell.begin_parse();
        Ok(Self {
            id: s.load_uint(32)? as u32,
            value: s.load_uint(32)? as u32,
            last: Address::load(&mut s)?,
            owner: Address::load(&mut s)?,
        })
    }
}

// Counter bodies carry no query id: a bare 32-bit opcode, with withdraw
// appending the requested coin amount.
pub(crate) fn execute(state: &Cell, ctx: &ExecCtx<'_>) -> Result<Effect, ExecError> {
    let mut counter = CounterState::from_cell(state)?;
    let mut body = ctx.msg.body.begin_parse();
    let op = body.load_uint(32)? as u32;

    if op == ops::up() {
        counter.value = counter.value.saturating_add(1);
        counter.last = ctx.msg.src;
    } else if op == ops::down() {
        counter.value = counter.value.saturating_sub(1);
        counter.last = ctx.msg.src;
    } else if op == ops::reset() {
        if ctx.msg.src != counter.owner {
            return Err(ExecError::Unauthorized);
        }
        counter.value = 0;
        counter.last = ctx.msg.src;
    } else if op == ops::deposit() {
        // value already credited by the chain
    } else if op == ops::withdraw() {
        if ctx.msg.src != counter.owner {
            return Err(ExecError::Unauthorized);
        }
        let requested = body.load_coins()?;
        let payable = requested.min(ctx.balance.saturating_sub(MIN_RESERVE));
        return Ok(Effect {
            state: counter.to_cell()?,
            outbound: vec![Message::internal(
                ctx.addr,
                counter.owner,
                payable,
                Cell::empty(),
            )],
        });
    } else {
        return Err(ExecError::UnknownOp(op));
    }

    Ok(Effect::keep(counter.to_cell()?))
}

fn opcode_body(op: u32) -> Result<Cell, CellError> {
    let mut b = CellBuilder::new();
    b.store_uint(op as u64, 32)?;
    Ok(b.build())
}

/// Body of an `op::up` request
pub fn up_body() -> Result<Cell, CellError> {
    opcode_body(ops::up())
}

/// Body of an `op::down` request
pub fn down_body() -> Result<Cell, CellError> {
    opcode_body(ops::down())
}

/// Body of an `op::reset` request
pub fn reset_body() -> Result<Cell, CellError> {
    opcode_body(ops::reset())
}

/// Body of an `op::deposit` request
pub fn deposit_body() -> Result<Cell, CellError> {
    opcode_body(ops::deposit())
}

/// Body of an `op::withdraw` request
pub fn withdraw_body(amount: u128) -> Result<Cell, CellError> {
    let mut b = CellBuilder::new();
    b.store_uint(ops::withdraw() as u64, 32)?;
    b.store_coins(amount)?;
    Ok(b.build())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_cell_roundtrip() {
        let state = CounterState {
            id: 7,
            value: 1234,
            last: Address::from_seed("mover"),
            owner: Address::from_seed("owner"),
        };
        let cell = state.to_cell().unwrap();
        assert_eq!(CounterState::from_cell(&cell).unwrap(), state);
    }

    #[test]
    fn test_body_wire_shapes() {
        // up/down/reset/deposit are a bare opcode, withdraw adds the amount
        let body = up_body().unwrap();
        assert_eq!(body.bit_len(), 32);
        assert_eq!(body.begin_parse().load_uint(32).unwrap() as u32, ops::up());

        let body = withdraw_body(5).unwrap();
        let mut s = body.begin_parse();
        assert_eq!(s.load_uint(32).unwrap() as u32, ops::withdraw());
        assert_eq!(s.load_coins().unwrap(), 5);
        assert_eq!(s.remaining_bits(), 0);
    }
}
