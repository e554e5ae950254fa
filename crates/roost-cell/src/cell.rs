//! The cell: bounded bit buffer plus up to four ordered child references
//!
//! Cells are the unit of persisted state and message bodies. Content wider
//! than one cell recurses into child cells (see [`crate::snake`] and
//! [`crate::dict`]).

use crate::CellSlice;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum data bits a single cell can carry
pub const MAX_BITS: usize = 1023;

/// Maximum child references a single cell can carry
pub const MAX_REFS: usize = 4;

/// A bounded bit buffer with ordered child references
///
/// Cells are immutable once built; construct them with
/// [`CellBuilder`](crate::CellBuilder) and read them with
/// [`CellSlice`](crate::CellSlice). Children are owned, so a cell is always
/// a finite tree.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Cell {
    data: Vec<u8>,
    bit_len: usize,
    refs: Vec<Cell>,
}

impl Cell {
    /// The empty cell: no bits, no references
    pub fn empty() -> Self {
        Self::default()
    }

    pub(crate) fn from_parts(data: Vec<u8>, bit_len: usize, refs: Vec<Cell>) -> Self {
        debug_assert!(bit_len <= MAX_BITS);
        debug_assert!(refs.len() <= MAX_REFS);
        debug_assert_eq!(data.len(), bit_len.div_ceil(8));
        Self {
            data,
            bit_len,
            refs,
        }
    }

    /// Number of data bits
    pub fn bit_len(&self) -> usize {
        self.bit_len
    }

    /// Raw data bytes; the final byte is zero-padded below `bit_len`
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Child references in order
    pub fn refs(&self) -> &[Cell] {
        &self.refs
    }

    /// Child reference at `index`, if present
    pub fn reference(&self, index: usize) -> Option<&Cell> {
        self.refs.get(index)
    }

    /// Check for the empty cell
    pub fn is_empty(&self) -> bool {
        self.bit_len == 0 && self.refs.is_empty()
    }

    /// Read the bit at `index`
    ///
    /// Panics if `index >= bit_len`; callers go through [`CellSlice`] which
    /// checks bounds first.
    pub(crate) fn bit(&self, index: usize) -> bool {
        debug_assert!(index < self.bit_len);
        (self.data[index / 8] >> (7 - index % 8)) & 1 == 1
    }

    /// Open a read cursor over this cell
    pub fn begin_parse(&self) -> CellSlice<'_> {
        CellSlice::new(self)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cell{{{}b", self.bit_len)?;
        if !self.refs.is_empty() {
            write!(f, ", {} refs", self.refs.len())?;
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CellBuilder;

    #[test]
    fn test_empty_cell() {
        let cell = Cell::empty();
        assert!(cell.is_empty());
        assert_eq!(cell.bit_len(), 0);
        assert!(cell.refs().is_empty());
    }

    #[test]
    fn test_display() {
        let mut b = CellBuilder::new();
        b.store_uint(7, 16).unwrap();
        b.store_ref(Cell::empty()).unwrap();
        let cell = b.build();
        assert_eq!(format!("{}", cell), "cell{16b, 1 refs}");
    }

    #[test]
    fn test_bit_indexing() {
        let mut b = CellBuilder::new();
        b.store_uint(0b1010_0001, 8).unwrap();
        let cell = b.build();
        assert!(cell.bit(0));
        assert!(!cell.bit(1));
        assert!(cell.bit(2));
        assert!(cell.bit(7));
    }
}
