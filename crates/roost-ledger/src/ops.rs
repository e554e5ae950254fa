//! Operation codes understood by the contracts
//!
//! All codes except [`TRANSFER`] are derived from their identifier string
//! via [`request_opcode`]; `TRANSFER` keeps the fixed value of the standard
//! asset-transfer operation for wire compatibility.

use roost_cell::request_opcode;

/// The standard asset transfer operation (fixed, not derived)
pub const TRANSFER: u32 = 0x5fcc_3d14;

macro_rules! derived_op {
    ($(#[$doc:meta])* $name:ident, $identifier:literal) => {
        $(#[$doc])*
        pub fn $name() -> u32 {
            request_opcode($identifier)
        }
    };
}

derived_op!(/// Increment a counter
    up, "op::up");
derived_op!(/// Decrement a counter
    down, "op::down");
derived_op!(/// Reset a counter to zero
    reset, "op::reset");
derived_op!(/// Top up a contract balance
    deposit, "op::deposit");
derived_op!(/// Withdraw coins to the owner
    withdraw, "op::withdraw");
derived_op!(/// Buy a class mint or a consumable
    purchase, "op::purchase");
derived_op!(/// Change the price of an existing entry
    update_price, "op::update_price");
derived_op!(/// Hand a contract to a new owner
    change_owner, "op::change_owner");
derived_op!(/// Spend allocation points on stats
    upgrade, "op::upgrade");
derived_op!(/// Start a battle against another item
    battle, "op::battle");
derived_op!(/// Defender leg of a battle
    challenge, "op::challenge");
derived_op!(/// Initiator leg closing a battle
    battle_end, "op::battle_end");
derived_op!(/// Apply a consumable heal to an item
    consume, "op::consume");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transfer_is_pinned() {
        assert_eq!(TRANSFER, 0x5fcc_3d14);
    }

    #[test]
    fn test_derived_ops_match_their_identifiers() {
        assert_eq!(up(), request_opcode("op::up"));
        assert_eq!(purchase(), request_opcode("op::purchase"));
        assert_eq!(battle_end(), request_opcode("op::battle_end"));
        assert_ne!(battle(), challenge());
    }
}
