//! Messages and the transaction trace
//!
//! Everything that happens on the ledger is a message: an external request
//! from a wallet or an internal message one contract sends to another. A
//! message body is a cell whose first 32 bits are the operation code;
//! collection and item requests follow it with a caller-chosen 64-bit query
//! id. Each processed message leaves one `TxRecord` in the trace, which is
//! what tests assert against.

use crate::{Address, ContractKind};
use roost_cell::{Cell, CellBuilder, CellError};
use serde::{Deserialize, Serialize};

/// Initial state attached to a message that deploys its destination
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateInit {
    pub kind: ContractKind,
    pub state: Cell,
}

/// One message in flight
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub src: Address,
    pub dst: Address,
    /// Coins carried, in nano units
    pub value: u128,
    pub body: Cell,
    /// Present when this message deploys its destination
    pub init: Option<StateInit>,
}

impl Message {
    /// An internal message with no deploy payload
    pub fn internal(src: Address, dst: Address, value: u128, body: Cell) -> Self {
        Self {
            src,
            dst,
            value,
            body,
            init: None,
        }
    }

    /// The operation code, when the body carries one
    pub fn op(&self) -> Option<u32> {
        if self.body.bit_len() < 32 {
            return None;
        }
        self.body.begin_parse().load_uint(32).ok().map(|v| v as u32)
    }
}

/// Start a message body: operation code then query id
pub fn begin_body(op: u32, query_id: u64) -> std::result::Result<CellBuilder, CellError> {
    let mut builder = CellBuilder::new();
    builder.store_uint(op as u64, 32)?;
    builder.store_uint(query_id, 64)?;
    Ok(builder)
}

/// Record of one processed message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxRecord {
    pub from: Address,
    pub to: Address,
    pub value: u128,
    /// Operation code of the body, if it carried one
    pub op: Option<u32>,
    pub success: bool,
    pub exit_code: u16,
}

impl TxRecord {
    /// Whether this record matches the given endpoints and operation
    pub fn matches(&self, from: Address, to: Address, op: u32) -> bool {
        self.from == from && self.to == to && self.op == Some(op)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops;

    #[test]
    fn test_body_header_layout() {
        let body = begin_body(ops::upgrade(), 42).unwrap().build();
        assert_eq!(body.bit_len(), 96);
        let mut s = body.begin_parse();
        assert_eq!(s.load_uint(32).unwrap() as u32, ops::upgrade());
        assert_eq!(s.load_uint(64).unwrap(), 42);
    }

    #[test]
    fn test_message_op_extraction() {
        let a = Address::from_seed("a");
        let b = Address::from_seed("b");
        let body = begin_body(ops::deposit(), 0).unwrap().build();
        let msg = Message::internal(a, b, 1, body);
        assert_eq!(msg.op(), Some(ops::deposit()));

        let empty = Message::internal(a, b, 1, Cell::empty());
        assert_eq!(empty.op(), None);
    }
}
