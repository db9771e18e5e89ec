//! Nature decoding and nature criteria sets
//!
//! A nature is fully determined by the PID word modulo 25.

use std::fmt;

/// The 25 natures, in PID order
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Nature {
    Hardy = 0,
    Lonely,
    Brave,
    Adamant,
    Naughty,
    Bold,
    Docile,
    Relaxed,
    Impish,
    Lax,
    Timid,
    Hasty,
    Serious,
    Jolly,
    Naive,
    Modest,
    Mild,
    Quiet,
    Bashful,
    Rash,
    Calm,
    Gentle,
    Sassy,
    Careful,
    Quirky,
}

impl Nature {
    /// All natures in index order
    pub const ALL: [Nature; 25] = [
        Nature::Hardy,
        Nature::Lonely,
        Nature::Brave,
        Nature::Adamant,
        Nature::Naughty,
        Nature::Bold,
        Nature::Docile,
        Nature::Relaxed,
        Nature::Impish,
        Nature::Lax,
        Nature::Timid,
        Nature::Hasty,
        Nature::Serious,
        Nature::Jolly,
        Nature::Naive,
        Nature::Modest,
        Nature::Mild,
        Nature::Quiet,
        Nature::Bashful,
        Nature::Rash,
        Nature::Calm,
        Nature::Gentle,
        Nature::Sassy,
        Nature::Careful,
        Nature::Quirky,
    ];

    /// Nature for a raw PID-derived index (word mod 25)
    pub fn from_index(index: u32) -> Nature {
        Nature::ALL[(index % 25) as usize]
    }

    pub fn index(self) -> u32 {
        self as u32
    }

    pub fn name(self) -> &'static str {
        const NAMES: [&str; 25] = [
            "Hardy", "Lonely", "Brave", "Adamant", "Naughty", "Bold", "Docile", "Relaxed",
            "Impish", "Lax", "Timid", "Hasty", "Serious", "Jolly", "Naive", "Modest", "Mild",
            "Quiet", "Bashful", "Rash", "Calm", "Gentle", "Sassy", "Careful", "Quirky",
        ];
        NAMES[self as usize]
    }

    /// Parse a nature name, case-insensitively
    pub fn from_name(name: &str) -> Option<Nature> {
        Nature::ALL
            .into_iter()
            .find(|n| n.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for Nature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Criteria set of acceptable natures, stored as a 25-bit mask
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NatureSet(u32);

const ALL_NATURES_MASK: u32 = (1 << 25) - 1;

impl NatureSet {
    /// The "any nature" set
    pub fn any() -> NatureSet {
        NatureSet(ALL_NATURES_MASK)
    }

    pub fn empty() -> NatureSet {
        NatureSet(0)
    }

    pub fn single(nature: Nature) -> NatureSet {
        NatureSet(1 << nature.index())
    }

    pub fn insert(&mut self, nature: Nature) {
        self.0 |= 1 << nature.index();
    }

    pub fn contains(&self, nature: Nature) -> bool {
        self.0 & (1 << nature.index()) != 0
    }

    pub fn is_any(&self) -> bool {
        self.0 == ALL_NATURES_MASK
    }

    /// Number of natures in the set
    pub fn len(&self) -> u32 {
        self.0.count_ones()
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

impl FromIterator<Nature> for NatureSet {
    fn from_iter<I: IntoIterator<Item = Nature>>(iter: I) -> Self {
        let mut set = NatureSet::empty();
        for nature in iter {
            set.insert(nature);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_index_wraps_modulo_25() {
        assert_eq!(Nature::from_index(0), Nature::Hardy);
        assert_eq!(Nature::from_index(24), Nature::Quirky);
        assert_eq!(Nature::from_index(25), Nature::Hardy);
        assert_eq!(Nature::from_index(77), Nature::Brave);
    }

    #[test]
    fn test_name_round_trip() {
        for nature in Nature::ALL {
            assert_eq!(Nature::from_name(nature.name()), Some(nature));
        }
        assert_eq!(Nature::from_name("adamant"), Some(Nature::Adamant));
        assert_eq!(Nature::from_name("bogus"), None);
    }

    #[test]
    fn test_nature_set_membership() {
        let set: NatureSet = [Nature::Timid, Nature::Modest].into_iter().collect();
        assert!(set.contains(Nature::Timid));
        assert!(set.contains(Nature::Modest));
        assert!(!set.contains(Nature::Hardy));
        assert_eq!(set.len(), 2);
        assert!(!set.is_any());
    }

    #[test]
    fn test_any_set_contains_everything() {
        let set = NatureSet::any();
        assert!(set.is_any());
        assert_eq!(set.len(), 25);
        for nature in Nature::ALL {
            assert!(set.contains(nature));
        }
    }
}
