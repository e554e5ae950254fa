//! Per-item stat record and its transitions
//!
//! Experience converts to allocation points; points are spent permanently on
//! stats through upgrades. Health and energy pools move in battle and are
//! restored by consumables. The wire layout is nine 16-bit fields in a fixed
//! order.

use crate::{GameError, Result};
use roost_cell::{Cell, CellBuilder, CellError, CellSlice};
use serde::{Deserialize, Serialize};

/// Experience floor; points accrue only above this
pub const BASE_EXP: u16 = 10;

/// Experience every freshly minted item starts with
pub const MINT_EXP: u16 = 100;

/// Base value of atk/def/spd before class boosts and allocation
pub const BASE_STAT: u16 = 1;

/// Base health pool at mint
pub const BASE_MAX_HP: u16 = 100;

/// Base energy pool at mint
pub const BASE_MAX_ENERGY: u16 = 100;

/// Allocation points earned from accumulated experience
pub fn points_from_exp(exp: u16) -> u16 {
    (3 * exp.saturating_sub(BASE_EXP) as u32 / 50) as u16
}

/// Requested stat deltas for one upgrade
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpgradeRequest {
    pub atk: u16,
    pub def: u16,
    pub spd: u16,
    pub max_hp: u16,
    pub max_energy: u16,
}

impl UpgradeRequest {
    /// Total points this request spends
    pub fn total(&self) -> u32 {
        self.atk as u32
            + self.def as u32
            + self.spd as u32
            + self.max_hp as u32
            + self.max_energy as u32
    }
}

/// The persistent stat block of one item
///
/// Field order matches the wire layout: hp, energy, exp, allocated, atk,
/// def, spd, max_hp, max_energy, each 16 bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStats {
    pub hp: u16,
    pub energy: u16,
    pub exp: u16,
    pub allocated: u16,
    pub atk: u16,
    pub def: u16,
    pub spd: u16,
    pub max_hp: u16,
    pub max_energy: u16,
}

impl ItemStats {
    /// Stats of a freshly minted item of a class with the given permanent
    /// boosts; pools start full, nothing allocated
    pub fn minted(boost_atk: u16, boost_def: u16, boost_spd: u16) -> Self {
        Self {
            hp: BASE_MAX_HP,
            energy: BASE_MAX_ENERGY,
            exp: MINT_EXP,
            allocated: 0,
            atk: BASE_STAT + boost_atk,
            def: BASE_STAT + boost_def,
            spd: BASE_STAT + boost_spd,
            max_hp: BASE_MAX_HP,
            max_energy: BASE_MAX_ENERGY,
        }
    }

    /// Points earned but not yet spent
    pub fn unallocated(&self) -> u16 {
        points_from_exp(self.exp).saturating_sub(self.allocated)
    }

    /// An item with no hp is fainted: it can neither start nor receive
    /// battles until healed
    pub fn is_fainted(&self) -> bool {
        self.hp == 0
    }

    /// Spend allocation points on permanent stat increases
    ///
    /// Fails without touching the record when the request exceeds the
    /// unallocated budget.
    pub fn upgrade(&mut self, request: &UpgradeRequest) -> Result<()> {
        let requested = request.total();
        let available = self.unallocated();
        if requested > available as u32 {
            return Err(GameError::InsufficientPoints {
                requested: requested.min(u16::MAX as u32) as u16,
                available,
            });
        }
        self.atk += request.atk;
        self.def += request.def;
        self.spd += request.spd;
        self.max_hp += request.max_hp;
        self.max_energy += request.max_energy;
        self.allocated += requested as u16;
        Ok(())
    }

    /// Restore pools, clamped at their maxima
    pub fn heal(&mut self, hp: u16, energy: u16) {
        self.hp = self.hp.saturating_add(hp).min(self.max_hp);
        self.energy = self.energy.saturating_add(energy).min(self.max_energy);
    }

    /// Apply one battle leg to this side: damage and energy drain, plus the
    /// experience award when this side won
    pub fn apply_battle(&mut self, damage: u16, energy_cost: u16, won: bool, exp_award: u16) {
        self.hp = self.hp.saturating_sub(damage);
        self.energy = self.energy.saturating_sub(energy_cost);
        if won {
            self.exp = self.exp.saturating_add(exp_award);
        }
    }

    /// Append the nine-field wire layout
    pub fn store(&self, builder: &mut CellBuilder) -> std::result::Result<(), CellError> {
        for field in [
            self.hp,
            self.energy,
            self.exp,
            self.allocated,
            self.atk,
            self.def,
            self.spd,
            self.max_hp,
            self.max_energy,
        ] {
            builder.store_uint(field as u64, 16)?;
        }
        Ok(())
    }

    /// Read the nine-field wire layout
    pub fn load(slice: &mut CellSlice<'_>) -> std::result::Result<Self, CellError> {
        let mut fields = [0u16; 9];
        for field in &mut fields {
            *field = slice.load_uint(16)? as u16;
        }
        let [hp, energy, exp, allocated, atk, def, spd, max_hp, max_energy] = fields;
        Ok(Self {
            hp,
            energy,
            exp,
            allocated,
            atk,
            def,
            spd,
            max_hp,
            max_energy,
        })
    }

    /// Encode as a standalone stats cell
    pub fn to_cell(&self) -> std::result::Result<Cell, CellError> {
        let mut builder = CellBuilder::new();
        self.store(&mut builder)?;
        Ok(builder.build())
    }
}
