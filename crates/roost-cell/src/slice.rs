//! Read-side codec: a cursor over one cell's bits and references

use crate::{Cell, CellError, Result};

/// Read cursor over a cell
///
/// Every `load_*` method checks the declared bit/ref counts before reading;
/// decoding never walks past what the cell actually carries.
#[derive(Debug, Clone)]
pub struct CellSlice<'a> {
    cell: &'a Cell,
    bit_pos: usize,
    ref_pos: usize,
}

impl<'a> CellSlice<'a> {
    /// Open a cursor at the start of `cell`
    pub fn new(cell: &'a Cell) -> Self {
        Self {
            cell,
            bit_pos: 0,
            ref_pos: 0,
        }
    }

    /// Bits not yet read
    pub fn remaining_bits(&self) -> usize {
        self.cell.bit_len() - self.bit_pos
    }

    /// References not yet dequeued
    pub fn remaining_refs(&self) -> usize {
        self.cell.refs().len() - self.ref_pos
    }

    fn ensure_bits(&self, requested: usize) -> Result<()> {
        if requested > self.remaining_bits() {
            return Err(CellError::BitUnderflow {
                remaining: self.remaining_bits(),
                requested,
            });
        }
        Ok(())
    }

    /// Read a single bit
    pub fn load_bit(&mut self) -> Result<bool> {
        self.ensure_bits(1)?;
        let bit = self.cell.bit(self.bit_pos);
        self.bit_pos += 1;
        Ok(bit)
    }

    /// Read `bits` bits as an unsigned integer, most-significant first
    pub fn load_uint(&mut self, bits: u32) -> Result<u64> {
        if bits > 64 {
            return Err(CellError::ValueTooWide { bits });
        }
        self.ensure_bits(bits as usize)?;
        let mut value = 0u64;
        for _ in 0..bits {
            value = (value << 1) | (self.cell.bit(self.bit_pos) as u64);
            self.bit_pos += 1;
        }
        Ok(value)
    }

    /// Read a var-length coin amount (see
    /// [`CellBuilder::store_coins`](crate::CellBuilder::store_coins))
    pub fn load_coins(&mut self) -> Result<u128> {
        let len = self.load_uint(4)?;
        let mut amount = 0u128;
        for _ in 0..len {
            amount = (amount << 8) | (self.load_uint(8)? as u128);
        }
        Ok(amount)
    }

    /// Read `count` raw bytes
    pub fn load_bytes(&mut self, count: usize) -> Result<Vec<u8>> {
        self.ensure_bits(count * 8)?;
        let mut out = Vec::with_capacity(count);
        for _ in 0..count {
            out.push(self.load_uint(8)? as u8);
        }
        Ok(out)
    }

    /// Read every remaining bit as bytes
    ///
    /// Fails with [`CellError::Misaligned`] if the remainder is not a whole
    /// number of bytes.
    pub fn load_remaining_bytes(&mut self) -> Result<Vec<u8>> {
        if self.remaining_bits() % 8 != 0 {
            return Err(CellError::Misaligned);
        }
        self.load_bytes(self.remaining_bits() / 8)
    }

    /// Skip `bits` bits
    pub fn skip_bits(&mut self, bits: usize) -> Result<&mut Self> {
        self.ensure_bits(bits)?;
        self.bit_pos += bits;
        Ok(self)
    }

    /// Dequeue the next child reference
    pub fn load_ref(&mut self) -> Result<&'a Cell> {
        match self.cell.reference(self.ref_pos) {
            Some(child) => {
                self.ref_pos += 1;
                Ok(child)
            }
            None => Err(CellError::RefUnderflow),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CellBuilder;

    #[test]
    fn test_underflow() {
        let mut b = CellBuilder::new();
        b.store_uint(3, 2).unwrap();
        let cell = b.build();

        let mut s = cell.begin_parse();
        assert_eq!(s.load_uint(2).unwrap(), 3);
        assert_eq!(
            s.load_bit().unwrap_err(),
            CellError::BitUnderflow {
                remaining: 0,
                requested: 1
            }
        );
        assert_eq!(s.load_ref().unwrap_err(), CellError::RefUnderflow);
    }

    #[test]
    fn test_refs_dequeue_in_order() {
        let mut first = CellBuilder::new();
        first.store_uint(1, 8).unwrap();
        let mut second = CellBuilder::new();
        second.store_uint(2, 8).unwrap();

        let mut b = CellBuilder::new();
        b.store_ref(first.build()).unwrap();
        b.store_ref(second.build()).unwrap();
        let cell = b.build();

        let mut s = cell.begin_parse();
        assert_eq!(s.remaining_refs(), 2);
        assert_eq!(s.load_ref().unwrap().begin_parse().load_uint(8).unwrap(), 1);
        assert_eq!(s.load_ref().unwrap().begin_parse().load_uint(8).unwrap(), 2);
        assert_eq!(s.remaining_refs(), 0);
    }

    #[test]
    fn test_load_remaining_bytes_misaligned() {
        let mut b = CellBuilder::new();
        b.store_uint(0, 9).unwrap();
        let cell = b.build();
        assert_eq!(
            cell.begin_parse().load_remaining_bytes().unwrap_err(),
            CellError::Misaligned
        );
    }

    #[test]
    fn test_skip_bits() {
        let mut b = CellBuilder::new();
        b.store_uint(0xab, 8).unwrap();
        b.store_uint(0xcd, 8).unwrap();
        let cell = b.build();

        let mut s = cell.begin_parse();
        s.skip_bits(8).unwrap();
        assert_eq!(s.load_uint(8).unwrap(), 0xcd);
    }
}
