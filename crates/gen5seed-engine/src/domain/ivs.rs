//! Packed individual-value words
//!
//! The six 5-bit IV fields share one 32-bit word in the Gen 3/4 layout
//! (hp, at, df at the low end; sp, sa, sd in the high half). The packed word
//! is the canonical in-game representation; every derived quantity (hidden
//! power, characteristic) is a pure function of it, so it is kept opaque
//! rather than decomposed into a struct.

use crate::error::ConfigurationError;
use std::fmt;

/// The six stats, in packed-field order
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stat {
    Hp = 0,
    Attack,
    Defense,
    SpAttack,
    SpDefense,
    Speed,
}

impl Stat {
    /// All stats in field order; the boundary guard for numeric stat indexes
    pub const ALL: [Stat; 6] = [
        Stat::Hp,
        Stat::Attack,
        Stat::Defense,
        Stat::SpAttack,
        Stat::SpDefense,
        Stat::Speed,
    ];

    fn shift(self) -> u32 {
        // Gen 3/4 packing: bit 15 and bit 31 are unused
        match self {
            Stat::Hp => 0,
            Stat::Attack => 5,
            Stat::Defense => 10,
            Stat::SpAttack => 21,
            Stat::SpDefense => 26,
            Stat::Speed => 16,
        }
    }
}

const IV_MASK: u32 = 0x1f;

/// Union of the six field masks; raw-word construction clears the rest
const ALL_IVS_MASK: u32 = (IV_MASK << 0)
    | (IV_MASK << 5)
    | (IV_MASK << 10)
    | (IV_MASK << 21)
    | (IV_MASK << 26)
    | (IV_MASK << 16);

/// Packed six-field IV word
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Ivs(u32);

impl Ivs {
    /// Pack six IV values. Values are masked to 5 bits each.
    pub fn new(hp: u32, at: u32, df: u32, sa: u32, sd: u32, sp: u32) -> Ivs {
        let mut ivs = Ivs(0);
        ivs.set(Stat::Hp, hp);
        ivs.set(Stat::Attack, at);
        ivs.set(Stat::Defense, df);
        ivs.set(Stat::SpAttack, sa);
        ivs.set(Stat::SpDefense, sd);
        ivs.set(Stat::Speed, sp);
        ivs
    }

    /// Wrap a raw word, masking the two unused bits to zero
    pub fn from_word(word: u32) -> Ivs {
        Ivs(word & ALL_IVS_MASK)
    }

    /// All six fields at 31
    pub fn max() -> Ivs {
        Ivs(ALL_IVS_MASK)
    }

    pub fn word(self) -> u32 {
        self.0
    }

    pub fn get(self, stat: Stat) -> u32 {
        (self.0 >> stat.shift()) & IV_MASK
    }

    pub fn set(&mut self, stat: Stat, value: u32) {
        let shift = stat.shift();
        self.0 = (self.0 & !(IV_MASK << shift)) | ((value & IV_MASK) << shift);
    }

    pub fn sum(self) -> u32 {
        Stat::ALL.into_iter().map(|s| self.get(s)).sum()
    }

    /// True when every field is 31; used as the "unbounded maximum" sentinel
    /// in criteria so the upper-bound comparison can be skipped
    pub fn is_max(self) -> bool {
        self.0 == ALL_IVS_MASK
    }

    // The six comparisons below define a strict partial order, field-wise.
    // Comparison operators are deliberately not implemented: for a partial
    // order, !(a <= b) does not imply a > b.

    /// Every field strictly greater
    pub fn better_than(self, other: Ivs) -> bool {
        Stat::ALL.into_iter().all(|s| self.get(s) > other.get(s))
    }

    /// Every field greater or equal
    pub fn better_or_equal(self, other: Ivs) -> bool {
        Stat::ALL.into_iter().all(|s| self.get(s) >= other.get(s))
    }

    /// Defined as the converse relation, never by negating better_or_equal
    pub fn worse_than(self, other: Ivs) -> bool {
        other.better_than(self)
    }

    pub fn worse_or_equal(self, other: Ivs) -> bool {
        other.better_or_equal(self)
    }

    /// Number of IV words lying field-wise between min and max inclusive
    pub fn combination_count(min: Ivs, max: Ivs) -> Result<u64, ConfigurationError> {
        if !min.worse_or_equal(max) {
            return Err(ConfigurationError::ImpossibleIvRange { min, max });
        }

        Ok(Stat::ALL
            .into_iter()
            .map(|s| u64::from(max.get(s) - min.get(s) + 1))
            .product())
    }
}

impl fmt::Debug for Ivs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Ivs({}/{}/{}/{}/{}/{})",
            self.get(Stat::Hp),
            self.get(Stat::Attack),
            self.get(Stat::Defense),
            self.get(Stat::SpAttack),
            self.get(Stat::SpDefense),
            self.get(Stat::Speed),
        )
    }
}

impl fmt::Display for Ivs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}/{}/{}/{}",
            self.get(Stat::Hp),
            self.get(Stat::Attack),
            self.get(Stat::Defense),
            self.get(Stat::SpAttack),
            self.get(Stat::SpDefense),
            self.get(Stat::Speed),
        )
    }
}
