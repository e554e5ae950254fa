//! Deterministic hashing over cells
//!
//! All hashing here is fixed-seed and platform independent, so the same cell
//! always hashes to the same value across runs and machines. Never
//! `std::collections::hash_map::DefaultHasher`, which is randomly keyed.

use crate::Cell;

/// Fixed seed for cell hashing
const CELL_SEED: u64 = 0x524f_4f53_5443_454c; // "ROOSTCEL"

/// splitmix64 finalizer: bijective 64-bit mixing
fn mix(mut x: u64) -> u64 {
    x ^= x >> 30;
    x = x.wrapping_mul(0xbf58_476d_1ce4_e5b9);
    x ^= x >> 27;
    x = x.wrapping_mul(0x94d0_49bb_1331_11eb);
    x ^= x >> 31;
    x
}

/// Hash a u64 into a running seed
pub fn hash_u64_with_seed(value: u64, seed: u64) -> u64 {
    mix(seed.wrapping_add(0x9e37_79b9_7f4a_7c15) ^ value)
}

/// Hash a byte string into a running seed
pub fn hash_bytes_with_seed(bytes: &[u8], seed: u64) -> u64 {
    let mut h = hash_u64_with_seed(bytes.len() as u64, seed);
    for chunk in bytes.chunks(8) {
        let mut word = [0u8; 8];
        word[..chunk.len()].copy_from_slice(chunk);
        h = hash_u64_with_seed(u64::from_le_bytes(word), h);
    }
    h
}

/// Hash a cell tree
///
/// Covers the declared bit length, the payload bytes and every child hash in
/// order, so any structural or payload difference changes the result.
pub fn cell_hash(cell: &Cell) -> u64 {
    let mut h = hash_u64_with_seed(cell.bit_len() as u64, CELL_SEED);
    h = hash_bytes_with_seed(cell.data(), h);
    for child in cell.refs() {
        h = hash_u64_with_seed(cell_hash(child), h);
    }
    h
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CellBuilder;

    #[test]
    fn test_hash_is_deterministic() {
        let mut b = CellBuilder::new();
        b.store_uint(0x1234, 16).unwrap();
        let cell = b.build();
        assert_eq!(cell_hash(&cell), cell_hash(&cell.clone()));
    }

    #[test]
    fn test_payload_changes_hash() {
        let mut a = CellBuilder::new();
        a.store_uint(1, 16).unwrap();
        let mut b = CellBuilder::new();
        b.store_uint(2, 16).unwrap();
        assert_ne!(cell_hash(&a.build()), cell_hash(&b.build()));
    }

    #[test]
    fn test_bit_length_changes_hash() {
        // Same payload bytes, different declared widths
        let mut a = CellBuilder::new();
        a.store_uint(0, 8).unwrap();
        let mut b = CellBuilder::new();
        b.store_uint(0, 9).unwrap();
        assert_ne!(cell_hash(&a.build()), cell_hash(&b.build()));
    }

    #[test]
    fn test_ref_structure_changes_hash() {
        let mut leaf = CellBuilder::new();
        leaf.store_uint(7, 8).unwrap();
        let leaf = leaf.build();

        let mut one = CellBuilder::new();
        one.store_ref(leaf.clone()).unwrap();
        let mut two = CellBuilder::new();
        two.store_ref(leaf.clone()).unwrap();
        two.store_ref(leaf).unwrap();
        assert_ne!(cell_hash(&one.build()), cell_hash(&two.build()));
    }
}
