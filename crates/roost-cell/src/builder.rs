//! Write-side codec: pack bits and references into a cell

use crate::{Cell, CellError, Result, MAX_BITS, MAX_REFS};

/// Maximum bytes a var-length coins field can carry (4-bit byte length)
const MAX_COIN_BYTES: u32 = 15;

/// Incremental cell writer
///
/// All `store_*` methods check capacity up front and leave the builder
/// unchanged on error. Bits are written most-significant first, matching the
/// read order of [`CellSlice`](crate::CellSlice).
#[derive(Debug, Clone, Default)]
pub struct CellBuilder {
    data: Vec<u8>,
    bit_len: usize,
    refs: Vec<Cell>,
}

impl CellBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Bits written so far
    pub fn bits_used(&self) -> usize {
        self.bit_len
    }

    /// Bits still available
    pub fn bits_remaining(&self) -> usize {
        MAX_BITS - self.bit_len
    }

    /// References stored so far
    pub fn refs_used(&self) -> usize {
        self.refs.len()
    }

    /// Reference slots still available
    pub fn refs_remaining(&self) -> usize {
        MAX_REFS - self.refs.len()
    }

    fn ensure_bits(&self, requested: usize) -> Result<()> {
        if requested > self.bits_remaining() {
            return Err(CellError::BitOverflow {
                used: self.bit_len,
                requested,
            });
        }
        Ok(())
    }

    fn push_bit(&mut self, bit: bool) {
        if self.bit_len % 8 == 0 {
            self.data.push(0);
        }
        if bit {
            let idx = self.bit_len / 8;
            self.data[idx] |= 1 << (7 - self.bit_len % 8);
        }
        self.bit_len += 1;
    }

    /// Store a single bit
    pub fn store_bit(&mut self, bit: bool) -> Result<&mut Self> {
        self.ensure_bits(1)?;
        self.push_bit(bit);
        Ok(self)
    }

    /// Store `bits` bits of an unsigned integer, most-significant first
    ///
    /// `bits` may be 0..=64; the value must fit in the requested width.
    pub fn store_uint(&mut self, value: u64, bits: u32) -> Result<&mut Self> {
        if bits > 64 {
            return Err(CellError::ValueTooWide { bits });
        }
        if bits < 64 && value >> bits != 0 {
            return Err(CellError::ValueTooWide { bits });
        }
        self.ensure_bits(bits as usize)?;
        for i in (0..bits).rev() {
            self.push_bit((value >> i) & 1 == 1);
        }
        Ok(self)
    }

    /// Store a coin amount as a var-length field: a 4-bit byte count, then
    /// that many big-endian value bytes
    ///
    /// Amounts up to 2^120 - 1 are representable.
    pub fn store_coins(&mut self, amount: u128) -> Result<&mut Self> {
        let mut bytes = Vec::new();
        let mut rest = amount;
        while rest > 0 {
            bytes.push((rest & 0xff) as u8);
            rest >>= 8;
        }
        bytes.reverse();
        if bytes.len() as u32 > MAX_COIN_BYTES {
            return Err(CellError::CoinsTooLarge);
        }
        self.ensure_bits(4 + bytes.len() * 8)?;
        self.store_uint(bytes.len() as u64, 4)?;
        for byte in bytes {
            self.store_uint(byte as u64, 8)?;
        }
        Ok(self)
    }

    /// Store raw bytes
    pub fn store_bytes(&mut self, bytes: &[u8]) -> Result<&mut Self> {
        self.ensure_bits(bytes.len() * 8)?;
        for &byte in bytes {
            self.store_uint(byte as u64, 8)?;
        }
        Ok(self)
    }

    /// Store a child cell reference
    pub fn store_ref(&mut self, cell: Cell) -> Result<&mut Self> {
        if self.refs.len() == MAX_REFS {
            return Err(CellError::RefOverflow);
        }
        self.refs.push(cell);
        Ok(self)
    }

    /// Append all bits and references of a finished cell
    ///
    /// Used when packing independently built pieces into one cell (see
    /// [`crate::dict`]).
    pub fn store_cell_contents(&mut self, cell: &Cell) -> Result<&mut Self> {
        self.ensure_bits(cell.bit_len())?;
        if cell.refs().len() > self.refs_remaining() {
            return Err(CellError::RefOverflow);
        }
        for i in 0..cell.bit_len() {
            self.push_bit(cell.bit(i));
        }
        for child in cell.refs() {
            self.refs.push(child.clone());
        }
        Ok(self)
    }

    /// Finish the cell
    pub fn build(self) -> Cell {
        Cell::from_parts(self.data, self.bit_len, self.refs)
    }
}
