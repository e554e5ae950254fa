//! Deterministic two-party battle resolution
//!
//! The resolver is a pure function of both sides' combat stats: every
//! replica computes the identical outcome from the same inputs. The formula
//! (a choice this implementation pins down and documents):
//!
//! - power = `2*atk + def + spd`; the side with strictly higher power wins,
//!   the defender wins ties
//! - the loser's hp drops to 0 (fainted)
//! - the winner takes `clamp(loser.atk * 12 / (winner.def + 4), 1, hp - 1)`
//!   damage, so its hp strictly decreases but stays positive
//! - both sides pay [`BATTLE_ENERGY_COST`] energy, floored at 0
//! - the winner gains [`WIN_EXP`] experience; the loser's is unchanged
//!
//! Nothing else moves: atk/def/spd, the pool maxima and the allocation
//! counter are untouched by battle.

use crate::ItemStats;
use serde::{Deserialize, Serialize};

/// Energy both sides spend per battle
pub const BATTLE_ENERGY_COST: u16 = 10;

/// Experience awarded to the winner
pub const WIN_EXP: u16 = 25;

/// One side's view of a battle: the live stats that feed the formula
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Combatant {
    pub atk: u16,
    pub def: u16,
    pub spd: u16,
    pub hp: u16,
    pub energy: u16,
}

impl Combatant {
    fn power(&self) -> u32 {
        2 * self.atk as u32 + self.def as u32 + self.spd as u32
    }
}

impl From<&ItemStats> for Combatant {
    fn from(stats: &ItemStats) -> Self {
        Self {
            atk: stats.atk,
            def: stats.def,
            spd: stats.spd,
            hp: stats.hp,
            energy: stats.energy,
        }
    }
}

/// Resolved outcome of one battle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleOutcome {
    /// Whether the challenging side won
    pub challenger_won: bool,
    /// Damage the challenger takes
    pub damage_to_challenger: u16,
    /// Damage the defender takes
    pub damage_to_defender: u16,
    /// Energy both sides spend
    pub energy_cost: u16,
    /// Experience the winner gains
    pub exp_award: u16,
}

/// Damage the surviving side takes: scaled by the loser's attack, mitigated
/// by the winner's defense, always at least 1 and never lethal
fn winner_damage(winner: &Combatant, loser: &Combatant) -> u16 {
    if winner.hp <= 1 {
        return 0;
    }
    let raw = (loser.atk as u32 * 12) / (winner.def as u32 + 4);
    (raw.max(1) as u16).min(winner.hp - 1)
}

/// Resolve a battle between a challenger and a defender
///
/// Both inputs must be active (hp > 0); the caller gates fainted parties
/// before resolution.
pub fn resolve(challenger: &Combatant, defender: &Combatant) -> BattleOutcome {
    let challenger_won = challenger.power() > defender.power();
    let (winner, loser) = if challenger_won {
        (challenger, defender)
    } else {
        (defender, challenger)
    };

    let to_winner = winner_damage(winner, loser);
    let to_loser = loser.hp;
    let (damage_to_challenger, damage_to_defender) = if challenger_won {
        (to_winner, to_loser)
    } else {
        (to_loser, to_winner)
    };

    BattleOutcome {
        challenger_won,
        damage_to_challenger,
        damage_to_defender,
        energy_cost: BATTLE_ENERGY_COST,
        exp_award: WIN_EXP,
    }
}
