//! Roost Cell - codec for a bounded cell-tree ledger
//!
//! Persistent state and messages on the ledger are binary trees of cells: a
//! fixed bit buffer (up to 1023 bits) plus up to 4 ordered child references.
//! This crate provides:
//! - `Cell`, `CellBuilder`, `CellSlice` - bit/byte packing primitives
//! - Snake encoding for byte strings longer than one cell
//! - Chunk dictionaries as the alternate long-content representation
//! - Generic keyed dictionaries packed into cell chains
//! - CRC-32 opcode derivation and deterministic cell hashing

mod builder;
mod cell;
pub mod dict;
mod error;
pub mod hash;
mod opcode;
pub mod snake;
mod slice;

pub use builder::CellBuilder;
pub use cell::{Cell, MAX_BITS, MAX_REFS};
pub use dict::{parse_dict, serialize_dict, DictValue};
pub use error::{CellError, Result};
pub use hash::cell_hash;
pub use opcode::request_opcode;
pub use slice::CellSlice;
pub use snake::{
    decode_content, decode_content_entry, decode_snake, encode_content, encode_snake,
    MAX_SNAKE_DEPTH, SNAKE_CHUNK_BYTES, TAG_OFFCHAIN, TAG_ONCHAIN,
};
