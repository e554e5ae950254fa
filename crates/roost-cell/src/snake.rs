//! Snake strings: unbounded byte strings chained through bounded cells
//!
//! Each cell carries up to [`SNAKE_CHUNK_BYTES`] bytes of payload and a
//! single reference to the next link. Content strings additionally carry a
//! one-byte tag ([`TAG_ONCHAIN`] / [`TAG_OFFCHAIN`]) as the first payload
//! byte, and may instead arrive as a chunk dictionary keyed by sequential
//! 32-bit ids.

use crate::{dict, Cell, CellError, CellSlice, DictValue, Result};

/// Payload bytes per snake link (1016 bits, within the 1023-bit cap)
pub const SNAKE_CHUNK_BYTES: usize = 127;

/// Walk depth cap for snake chains
pub const MAX_SNAKE_DEPTH: usize = 4096;

/// Content tag: payload stored on-chain
pub const TAG_ONCHAIN: u8 = 0x00;

/// Content tag: payload is an off-chain URL
pub const TAG_OFFCHAIN: u8 = 0x01;

/// Chunk dictionary key width (sequential 32-bit ids)
const CHUNK_KEY_BITS: u32 = 32;

/// Encode a byte string as a snake chain, returning the head cell
///
/// The chain is built tail-first: the last chunk becomes the innermost cell
/// with no reference. Empty input yields the empty cell; a single chunk
/// yields one cell with no reference.
pub fn encode_snake(bytes: &[u8]) -> Cell {
    let mut chunks = bytes.chunks(SNAKE_CHUNK_BYTES).rev();
    let mut cell = match chunks.next() {
        Some(tail) => chunk_cell(tail, None),
        None => return Cell::empty(),
    };
    for chunk in chunks {
        cell = chunk_cell(chunk, Some(cell));
    }
    cell
}

fn chunk_cell(chunk: &[u8], next: Option<Cell>) -> Cell {
    let refs = match next {
        Some(next) => vec![next],
        None => Vec::new(),
    };
    Cell::from_parts(chunk.to_vec(), chunk.len() * 8, refs)
}

/// Decode a snake chain starting at `head`
///
/// Concatenates each link's full payload, stopping at a link with no bits or
/// no next reference. The walk is depth-capped so a malformed chain cannot
/// loop forever.
pub fn decode_snake(head: &Cell) -> Result<Vec<u8>> {
    decode_snake_from(head.begin_parse())
}

/// Decode a snake chain from a cursor that may already be partly consumed
pub fn decode_snake_from(slice: CellSlice<'_>) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    let mut cursor = slice;
    for _ in 0..MAX_SNAKE_DEPTH {
        let payload = cursor.load_remaining_bytes()?;
        let ended = payload.is_empty();
        out.extend(payload);
        if ended || cursor.remaining_refs() == 0 {
            return Ok(out);
        }
        cursor = cursor.load_ref()?.begin_parse();
    }
    Err(CellError::ChainTooDeep)
}

/// Encode a content string: one tag byte, then the payload as a snake
pub fn encode_content(tag: u8, bytes: &[u8]) -> Cell {
    let mut tagged = Vec::with_capacity(bytes.len() + 1);
    tagged.push(tag);
    tagged.extend_from_slice(bytes);
    encode_snake(&tagged)
}

/// Decode a content string into its tag byte and payload
pub fn decode_content(cell: &Cell) -> Result<(u8, Vec<u8>)> {
    let flat = decode_snake(cell)?;
    match flat.split_first() {
        Some((&tag, rest)) => Ok((tag, rest.to_vec())),
        None => Err(CellError::EmptyContent),
    }
}

/// One chunk of a chunk-dictionary content string: a reference to a snake
struct ChunkRef(Vec<u8>);

impl DictValue for ChunkRef {
    fn store(&self, builder: &mut crate::CellBuilder) -> Result<()> {
        builder.store_ref(encode_snake(&self.0))?;
        Ok(())
    }

    fn load(slice: &mut CellSlice<'_>) -> Result<Self> {
        Ok(ChunkRef(decode_snake(slice.load_ref()?)?))
    }
}

/// Encode a byte string as a chunk dictionary keyed by sequential 32-bit ids
pub fn encode_chunk_dict(bytes: &[u8]) -> Result<Cell> {
    let entries: Vec<(u64, ChunkRef)> = bytes
        .chunks(SNAKE_CHUNK_BYTES)
        .enumerate()
        .map(|(i, chunk)| (i as u64, ChunkRef(chunk.to_vec())))
        .collect();
    dict::serialize_dict(entries, CHUNK_KEY_BITS)
}

/// Decode a chunk dictionary: concatenate chunk values in ascending key order
pub fn decode_chunk_dict(slice: CellSlice<'_>) -> Result<Vec<u8>> {
    let mut entries: Vec<(u64, ChunkRef)> = dict::parse_dict_from(slice, CHUNK_KEY_BITS)?;
    entries.sort_by_key(|(key, _)| *key);
    let mut out = Vec::new();
    for (_, chunk) in entries {
        out.extend(chunk.0);
    }
    Ok(out)
}

/// Decode one content entry behind a reference, as stored in keyed tables
///
/// The referenced cell starts with a discriminator byte: `0` means the rest
/// is a snake chain, `1` means the rest is a chunk dictionary. Any other
/// value yields empty content rather than an error; stored data with a
/// future encoding reads as blank instead of wedging every reader.
pub fn decode_content_entry(slice: &mut CellSlice<'_>) -> Result<Vec<u8>> {
    let mut inner = slice.load_ref()?.begin_parse();
    match inner.load_uint(8)? {
        0 => decode_snake_from(inner),
        1 => decode_chunk_dict(inner),
        _ => Ok(Vec::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CellBuilder;

    fn sample_bytes(len: usize) -> Vec<u8> {
        (0..len).map(|i| (i % 251) as u8).collect()
    }

    #[test]
    fn test_snake_roundtrip_lengths() {
        for len in [0, 1, 126, 127, 128, 254, 255, 1000, 5000] {
            let bytes = sample_bytes(len);
            let cell = encode_snake(&bytes);
            assert_eq!(decode_snake(&cell).unwrap(), bytes, "length {}", len);
        }
    }

    #[test]
    fn test_snake_empty_is_empty_cell() {
        assert!(encode_snake(&[]).is_empty());
        assert_eq!(decode_snake(&Cell::empty()).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_snake_single_chunk_has_no_ref() {
        let cell = encode_snake(&sample_bytes(127));
        assert_eq!(cell.bit_len(), 127 * 8);
        assert!(cell.refs().is_empty());
    }

    #[test]
    fn test_snake_chain_shape() {
        // 300 bytes: 127 + 127 + 46, so two links and a tail
        let cell = encode_snake(&sample_bytes(300));
        assert_eq!(cell.bit_len(), 127 * 8);
        let mid = cell.reference(0).unwrap();
        assert_eq!(mid.bit_len(), 127 * 8);
        let tail = mid.reference(0).unwrap();
        assert_eq!(tail.bit_len(), 46 * 8);
        assert!(tail.refs().is_empty());
    }

    #[test]
    fn test_content_tag_roundtrip() {
        let url = b"https://assets.example.xyz/metadata/";
        let cell = encode_content(TAG_OFFCHAIN, url);
        let (tag, payload) = decode_content(&cell).unwrap();
        assert_eq!(tag, TAG_OFFCHAIN);
        assert_eq!(payload, url);
    }

    #[test]
    fn test_content_empty_fails() {
        assert_eq!(
            decode_content(&Cell::empty()).unwrap_err(),
            CellError::EmptyContent
        );
    }

    #[test]
    fn test_chunk_dict_roundtrip() {
        for len in [0, 1, 127, 128, 1000, 5000] {
            let bytes = sample_bytes(len);
            let dict = encode_chunk_dict(&bytes).unwrap();
            assert_eq!(
                decode_chunk_dict(dict.begin_parse()).unwrap(),
                bytes,
                "length {}",
                len
            );
        }
    }

    #[test]
    fn test_content_entry_snake_form() {
        let mut inner = CellBuilder::new();
        inner.store_uint(0, 8).unwrap();
        inner.store_bytes(b"hello").unwrap();
        let mut outer = CellBuilder::new();
        outer.store_ref(inner.build()).unwrap();
        let outer = outer.build();

        let mut s = outer.begin_parse();
        assert_eq!(decode_content_entry(&mut s).unwrap(), b"hello");
    }

    #[test]
    fn test_content_entry_chunked_form() {
        let bytes = sample_bytes(400);
        let dict = encode_chunk_dict(&bytes).unwrap();

        let mut inner = CellBuilder::new();
        inner.store_uint(1, 8).unwrap();
        inner.store_cell_contents(&dict).unwrap();
        let mut outer = CellBuilder::new();
        outer.store_ref(inner.build()).unwrap();
        let outer = outer.build();

        let mut s = outer.begin_parse();
        assert_eq!(decode_content_entry(&mut s).unwrap(), bytes);
    }

    #[test]
    fn test_content_entry_unknown_discriminator_is_empty() {
        // Discriminators other than 0 and 1 decode to empty content, not an
        // error; the quirk is part of the wire contract.
        for disc in [2u64, 3, 200, 255] {
            let mut inner = CellBuilder::new();
            inner.store_uint(disc, 8).unwrap();
            inner.store_bytes(b"ignored").unwrap();
            let mut outer = CellBuilder::new();
            outer.store_ref(inner.build()).unwrap();
            let outer = outer.build();

            let mut s = outer.begin_parse();
            assert_eq!(decode_content_entry(&mut s).unwrap(), Vec::<u8>::new());
        }
    }
}
