//! Roost Game - deterministic game rules
//!
//! Pure rules with no ledger or messaging concerns: the per-item stat
//! record and its transitions (experience, allocation points, upgrades,
//! heals), the battle resolver, and the merged class/consumable price
//! table. Everything here is a pure function of its inputs so every
//! replica of the ledger reaches identical state.

mod battle;
mod error;
mod price;
mod stats;

pub use battle::{resolve, BattleOutcome, Combatant, BATTLE_ENERGY_COST, WIN_EXP};
pub use error::{GameError, Result};
pub use price::{
    ClassBoost, ItemHeal, PriceEntry, PriceRecord, PriceTable, CONSUMABLE_ID_MIN, NANO,
};
pub use stats::{
    points_from_exp, ItemStats, UpgradeRequest, BASE_EXP, BASE_MAX_ENERGY, BASE_MAX_HP, BASE_STAT,
    MINT_EXP,
};
