//! The merged price table
//!
//! One u8-keyed dictionary serves two purposes: "class" entries price a
//! mintable archetype and carry its permanent atk/def/spd boosts, "item"
//! entries price a consumable and carry instantaneous hp/energy heals. The
//! two share one flat wire record `{price, attr1, attr2, attr3}` and are
//! told apart purely by id range, so the tagged variants exist only above
//! the serialization boundary.

use indexmap::IndexMap;
use roost_cell::{dict, Cell, CellBuilder, CellError, CellSlice, DictValue};
use serde::{Deserialize, Serialize};

/// One whole coin in nano units
pub const NANO: u128 = 1_000_000_000;

/// Smallest id carrying consumable semantics; ids below are classes
pub const CONSUMABLE_ID_MIN: u8 = 45;

/// Key width of the price dictionary
const PRICE_KEY_BITS: u32 = 8;

/// Permanent stat boosts applied once at mint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassBoost {
    pub price: u128,
    pub atk: u16,
    pub def: u16,
    pub spd: u16,
}

/// Instantaneous heal applied at consumption
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemHeal {
    pub price: u128,
    pub hp: u16,
    pub energy: u16,
}

/// A priced effect, classed by which id range its key falls in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PriceEntry {
    Class(ClassBoost),
    Item(ItemHeal),
}

impl PriceEntry {
    /// The coin price of this entry
    pub fn price(&self) -> u128 {
        match self {
            PriceEntry::Class(boost) => boost.price,
            PriceEntry::Item(heal) => heal.price,
        }
    }

    /// Rebuild the tagged variant from the flat record, keyed by id range
    fn from_record(id: u8, record: PriceRecord) -> Self {
        if id >= CONSUMABLE_ID_MIN {
            PriceEntry::Item(ItemHeal {
                price: record.price,
                hp: record.attr1,
                energy: record.attr2,
            })
        } else {
            PriceEntry::Class(ClassBoost {
                price: record.price,
                atk: record.attr1,
                def: record.attr2,
                spd: record.attr3,
            })
        }
    }
}

/// The flat wire record both variants share
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRecord {
    pub price: u128,
    pub attr1: u16,
    pub attr2: u16,
    pub attr3: u16,
}

impl From<&PriceEntry> for PriceRecord {
    fn from(entry: &PriceEntry) -> Self {
        match *entry {
            PriceEntry::Class(ClassBoost {
                price,
                atk,
                def,
                spd,
            }) => PriceRecord {
                price,
                attr1: atk,
                attr2: def,
                attr3: spd,
            },
            PriceEntry::Item(ItemHeal { price, hp, energy }) => PriceRecord {
                price,
                attr1: hp,
                attr2: energy,
                attr3: 0,
            },
        }
    }
}

impl DictValue for PriceRecord {
    fn store(&self, builder: &mut CellBuilder) -> std::result::Result<(), CellError> {
        builder.store_coins(self.price)?;
        builder.store_uint(self.attr1 as u64, 16)?;
        builder.store_uint(self.attr2 as u64, 16)?;
        builder.store_uint(self.attr3 as u64, 16)?;
        Ok(())
    }

    fn load(slice: &mut CellSlice<'_>) -> std::result::Result<Self, CellError> {
        Ok(Self {
            price: slice.load_coins()?,
            attr1: slice.load_uint(16)? as u16,
            attr2: slice.load_uint(16)? as u16,
            attr3: slice.load_uint(16)? as u16,
        })
    }
}

/// The full price table, keys unique across both id ranges
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PriceTable {
    entries: IndexMap<u8, PriceEntry>,
}

impl PriceTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an entry
    pub fn insert(&mut self, id: u8, entry: PriceEntry) {
        self.entries.insert(id, entry);
    }

    /// Look up an entry
    pub fn get(&self, id: u8) -> Option<&PriceEntry> {
        self.entries.get(&id)
    }

    /// Look up just the price
    pub fn price_of(&self, id: u8) -> Option<u128> {
        self.get(id).map(PriceEntry::price)
    }

    /// Replace the price of an existing entry, keeping its effects
    pub fn set_price(&mut self, id: u8, price: u128) -> bool {
        match self.entries.get_mut(&id) {
            Some(PriceEntry::Class(boost)) => {
                boost.price = price;
                true
            }
            Some(PriceEntry::Item(heal)) => {
                heal.price = price;
                true
            }
            None => false,
        }
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check for the empty table
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (u8, &PriceEntry)> {
        self.entries.iter().map(|(id, entry)| (*id, entry))
    }

    /// Serialize as a dictionary cell, keys ascending
    pub fn to_cell(&self) -> Result<Cell, CellError> {
        let records = self
            .entries
            .iter()
            .map(|(id, entry)| (*id as u64, PriceRecord::from(entry)));
        dict::serialize_dict(records, PRICE_KEY_BITS)
    }

    /// Parse from a dictionary cell, accepting any wire key order
    pub fn from_cell(cell: &Cell) -> Result<Self, CellError> {
        let mut table = Self::new();
        for (key, record) in dict::parse_dict::<PriceRecord>(cell, PRICE_KEY_BITS)? {
            let id = key as u8;
            table.insert(id, PriceEntry::from_record(id, record));
        }
        Ok(table)
    }

    /// The stock table: thirteen mintable classes and five consumables
    pub fn standard() -> Self {
        let mut table = Self::new();
        let class = |price: u128, atk, def, spd| PriceEntry::Class(ClassBoost { price, atk, def, spd });
        let item = |price: u128, hp, energy| PriceEntry::Item(ItemHeal { price, hp, energy });

        table.insert(8, class(NANO, 3, 0, 0));
        table.insert(6, class(NANO, 0, 3, 0));
        table.insert(5, class(NANO, 0, 0, 3));
        table.insert(7, class(NANO, 1, 1, 1));
        table.insert(9, class(0, 0, 0, 0));
        table.insert(37, class(5 * NANO, 5, 0, 0));
        table.insert(38, class(5 * NANO, 5, 0, 0));
        table.insert(39, class(5 * NANO, 5, 0, 0));
        table.insert(40, class(5 * NANO, 0, 5, 0));
        table.insert(41, class(5 * NANO, 0, 5, 0));
        table.insert(42, class(5 * NANO, 0, 0, 5));
        table.insert(43, class(5 * NANO, 0, 0, 5));
        table.insert(44, class(20 * NANO, 3, 3, 3));

        table.insert(45, item(14 * NANO / 100, 100, 100));
        table.insert(46, item(5 * NANO / 100, 50, 0));
        table.insert(47, item(8 * NANO / 100, 100, 0));
        table.insert(48, item(5 * NANO / 100, 0, 50));
        table.insert(49, item(8 * NANO / 100, 0, 100));
        table
    }
}
