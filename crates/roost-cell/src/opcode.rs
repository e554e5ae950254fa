//! Operation codes derived from stable textual identifiers
//!
//! An opcode is the CRC-32 (IEEE) of the identifier string, kept as a 32-bit
//! unsigned value. Wire compatibility depends on every implementation using
//! this exact hash over the exact identifier text.

/// Derive the 32-bit opcode for a request identifier, e.g. `op::purchase`
pub fn request_opcode(identifier: &str) -> u32 {
    crc32fast::hash(identifier.as_bytes())
}
