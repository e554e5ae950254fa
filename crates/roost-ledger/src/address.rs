//! Account addresses
//!
//! An address is an opaque 64-bit identifier. Wallet addresses come from a
//! seed string, contract addresses from their initial state cell, and item
//! addresses deterministically from (item code hash, collection, index) so
//! that a registry lookup and an actual mint always agree on where an item
//! lives.

use roost_cell::hash::{hash_bytes_with_seed, hash_u64_with_seed};
use roost_cell::{cell_hash, Cell, CellBuilder, CellError, CellSlice};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fixed seed for address derivation
const ADDR_SEED: u64 = 0x524f_4f53_5441_4444; // "ROOSTADD"

/// Bits an address occupies on the wire
pub const ADDRESS_BITS: u32 = 64;

/// A 64-bit account identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Address(pub u64);

impl Address {
    /// Wallet address from a human-readable seed
    pub fn from_seed(seed: &str) -> Self {
        Address(hash_bytes_with_seed(seed.as_bytes(), ADDR_SEED))
    }

    /// Contract address from its initial state cell
    pub fn of_state(state: &Cell) -> Self {
        Address(hash_u64_with_seed(cell_hash(state), ADDR_SEED))
    }

    /// Item address from the item code hash, its collection and its index
    ///
    /// Re-derivable by anyone who knows the triple; contracts use this both
    /// to route mints and to authenticate peers claiming to be an item.
    pub fn derive_item(code_hash: u64, collection: Address, index: u64) -> Self {
        let mut h = hash_u64_with_seed(code_hash, ADDR_SEED);
        h = hash_u64_with_seed(collection.0, h);
        h = hash_u64_with_seed(index, h);
        Address(h)
    }

    /// Append the 64-bit wire form
    pub fn store(&self, builder: &mut CellBuilder) -> std::result::Result<(), CellError> {
        builder.store_uint(self.0, ADDRESS_BITS)?;
        Ok(())
    }

    /// Read the 64-bit wire form
    pub fn load(slice: &mut CellSlice<'_>) -> std::result::Result<Self, CellError> {
        Ok(Address(slice.load_uint(ADDRESS_BITS)?))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0:{:016x}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_addresses_are_stable_and_distinct() {
        let a = Address::from_seed("deployer");
        assert_eq!(a, Address::from_seed("deployer"));
        assert_ne!(a, Address::from_seed("user1"));
        assert_ne!(Address::from_seed("user1"), Address::from_seed("user2"));
    }

    #[test]
    fn test_item_derivation_depends_on_every_input() {
        let coll = Address::from_seed("collection");
        let base = Address::derive_item(1, coll, 1);
        assert_eq!(base, Address::derive_item(1, coll, 1));
        assert_ne!(base, Address::derive_item(2, coll, 1));
        assert_ne!(base, Address::derive_item(1, coll, 2));
        assert_ne!(base, Address::derive_item(1, Address::from_seed("other"), 1));
    }

    #[test]
    fn test_wire_roundtrip() {
        let addr = Address::from_seed("wire");
        let mut b = CellBuilder::new();
        addr.store(&mut b).unwrap();
        let cell = b.build();
        assert_eq!(cell.bit_len(), 64);
        assert_eq!(Address::load(&mut cell.begin_parse()).unwrap(), addr);
    }
}
