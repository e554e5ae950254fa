//! Keyed dictionaries packed into a cell chain
//!
//! Entries are fixed-width keys followed by codec-defined values, laid out
//! back to back. When a cell runs out of bits or reference slots, the chain
//! continues through the cell's last reference. Serialization always emits
//! keys in ascending numeric order; parsing accepts any key order found on
//! the wire.

use crate::{Cell, CellBuilder, CellError, CellSlice, Result};

/// Walk depth cap for dictionary chains
const MAX_DICT_DEPTH: usize = 4096;

/// Value codec for dictionary entries
///
/// `store` appends the value after its key; `load` must consume exactly what
/// `store` wrote (bits and references both).
pub trait DictValue: Sized {
    fn store(&self, builder: &mut CellBuilder) -> Result<()>;
    fn load(slice: &mut CellSlice<'_>) -> Result<Self>;
}

/// Serialize entries into a dictionary cell, keys in ascending order
///
/// Each entry must fit in a fresh cell with one reference slot held back for
/// the continuation link; an oversized entry fails with
/// [`CellError::EntryTooLarge`].
pub fn serialize_dict<V: DictValue>(
    entries: impl IntoIterator<Item = (u64, V)>,
    key_bits: u32,
) -> Result<Cell> {
    let mut entries: Vec<(u64, V)> = entries.into_iter().collect();
    entries.sort_by_key(|(key, _)| *key);

    let mut segments: Vec<CellBuilder> = vec![CellBuilder::new()];
    for (key, value) in &entries {
        let mut piece = CellBuilder::new();
        piece.store_uint(*key, key_bits)?;
        value.store(&mut piece)?;
        let piece = piece.build();

        let fits = segments.last().is_some_and(|current| {
            piece.bit_len() <= current.bits_remaining()
                && piece.refs().len() + 1 <= current.refs_remaining()
        });
        if !fits {
            if piece.bit_len() > crate::MAX_BITS || piece.refs().len() + 1 > crate::MAX_REFS {
                return Err(CellError::EntryTooLarge);
            }
            segments.push(CellBuilder::new());
        }
        if let Some(current) = segments.last_mut() {
            current.store_cell_contents(&piece)?;
        }
    }

    // Link segments tail-first through the reserved last reference
    let mut chain: Option<Cell> = None;
    for mut segment in segments.into_iter().rev() {
        if let Some(next) = chain.take() {
            segment.store_ref(next)?;
        }
        chain = Some(segment.build());
    }
    Ok(chain.unwrap_or_else(Cell::empty))
}

/// Parse a dictionary cell into `(key, value)` pairs in wire order
pub fn parse_dict<V: DictValue>(cell: &Cell, key_bits: u32) -> Result<Vec<(u64, V)>> {
    parse_dict_from(cell.begin_parse(), key_bits)
}

/// Parse a dictionary from a cursor that may already be partly consumed
pub fn parse_dict_from<V: DictValue>(
    slice: CellSlice<'_>,
    key_bits: u32,
) -> Result<Vec<(u64, V)>> {
    let mut out = Vec::new();
    let mut cursor = slice;
    for _ in 0..MAX_DICT_DEPTH {
        while cursor.remaining_bits() > 0 {
            let key = cursor.load_uint(key_bits)?;
            let value = V::load(&mut cursor)?;
            out.push((key, value));
        }
        if cursor.remaining_refs() == 0 {
            return Ok(out);
        }
        cursor = cursor.load_ref()?.begin_parse();
    }
    Err(CellError::ChainTooDeep)
}
