//! Hidden power type and power derivation
//!
//! Both quantities depend only on the two low bits of each IV field: bit 0
//! of each field selects the type, bit 1 the power. The estimator exploits
//! this to count matching IV combinations exactly without enumerating the
//! full bounded space.

use crate::domain::ivs::{Ivs, Stat};
use std::fmt;

/// Elemental types, in game index order
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Element {
    Normal = 0,
    Fighting,
    Flying,
    Poison,
    Ground,
    Rock,
    Bug,
    Ghost,
    Steel,
    Fire,
    Water,
    Grass,
    Electric,
    Psychic,
    Ice,
    Dragon,
    Dark,
}

impl Element {
    pub const ALL: [Element; 17] = [
        Element::Normal,
        Element::Fighting,
        Element::Flying,
        Element::Poison,
        Element::Ground,
        Element::Rock,
        Element::Bug,
        Element::Ghost,
        Element::Steel,
        Element::Fire,
        Element::Water,
        Element::Grass,
        Element::Electric,
        Element::Psychic,
        Element::Ice,
        Element::Dragon,
        Element::Dark,
    ];

    /// The sixteen types hidden power can produce (everything but Normal)
    pub const HIDDEN_TYPES: [Element; 16] = [
        Element::Fighting,
        Element::Flying,
        Element::Poison,
        Element::Ground,
        Element::Rock,
        Element::Bug,
        Element::Ghost,
        Element::Steel,
        Element::Fire,
        Element::Water,
        Element::Grass,
        Element::Electric,
        Element::Psychic,
        Element::Ice,
        Element::Dragon,
        Element::Dark,
    ];

    pub fn name(self) -> &'static str {
        const NAMES: [&str; 17] = [
            "Normal", "Fighting", "Flying", "Poison", "Ground", "Rock", "Bug", "Ghost", "Steel",
            "Fire", "Water", "Grass", "Electric", "Psychic", "Ice", "Dragon", "Dark",
        ];
        NAMES[self as usize]
    }

    pub fn from_name(name: &str) -> Option<Element> {
        Element::ALL
            .into_iter()
            .find(|e| e.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Criteria set of acceptable hidden power types (17-bit mask)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ElementSet(u32);

const ALL_HIDDEN_MASK: u32 = ((1 << 17) - 1) & !1; // every type but Normal

impl ElementSet {
    /// The "any type" set: all sixteen reachable hidden power types
    pub fn any() -> ElementSet {
        ElementSet(ALL_HIDDEN_MASK)
    }

    pub fn empty() -> ElementSet {
        ElementSet(0)
    }

    pub fn single(element: Element) -> ElementSet {
        ElementSet(1 << element as u32)
    }

    pub fn insert(&mut self, element: Element) {
        self.0 |= 1 << element as u32;
    }

    pub fn contains(&self, element: Element) -> bool {
        self.0 & (1 << element as u32) != 0
    }

    pub fn is_any(&self) -> bool {
        self.0 & ALL_HIDDEN_MASK == ALL_HIDDEN_MASK
    }

    /// One representative member, for error reporting
    pub fn first(&self) -> Option<Element> {
        Element::ALL.into_iter().find(|e| self.contains(*e))
    }
}

impl FromIterator<Element> for ElementSet {
    fn from_iter<I: IntoIterator<Item = Element>>(iter: I) -> Self {
        let mut set = ElementSet::empty();
        for element in iter {
            set.insert(element);
        }
        set
    }
}

/// Hidden power bit order: HP, ATK, DEF, SPE, SPA, SPD
const HP_STAT_ORDER: [Stat; 6] = [
    Stat::Hp,
    Stat::Attack,
    Stat::Defense,
    Stat::Speed,
    Stat::SpAttack,
    Stat::SpDefense,
];

/// Derive the hidden power type from the low bit of each IV field
pub fn hidden_power_type(ivs: Ivs) -> Element {
    let mut sum = 0u32;
    for (i, stat) in HP_STAT_ORDER.into_iter().enumerate() {
        sum |= (ivs.get(stat) & 1) << i;
    }
    let index = sum * 15 / 63;
    Element::HIDDEN_TYPES[index as usize]
}

/// Derive the hidden power base power (30..=70) from bit 1 of each IV field
pub fn hidden_power(ivs: Ivs) -> u32 {
    let mut sum = 0u32;
    for (i, stat) in HP_STAT_ORDER.into_iter().enumerate() {
        sum |= ((ivs.get(stat) >> 1) & 1) << i;
    }
    sum * 40 / 63 + 30
}

/// Exact count of IV combinations within [min, max] matching a hidden power
/// constraint. Returns (combinations of an acceptable type, combinations of
/// an acceptable type at or above min_power); the first count lets the
/// caller distinguish an impossible type from an unreachable power.
///
/// Counting walks the 4^6 patterns of (bit 0, bit 1) per field; each field
/// contributes the number of in-range values carrying that bit pair.
pub fn matching_combinations(
    min: Ivs,
    max: Ivs,
    types: ElementSet,
    min_power: u32,
) -> (u64, u64) {
    // bucket_counts[field][b1 << 1 | b0] = in-range values with those low bits
    let mut bucket_counts = [[0u64; 4]; 6];
    for (field, stat) in HP_STAT_ORDER.into_iter().enumerate() {
        for value in min.get(stat)..=max.get(stat) {
            bucket_counts[field][(value & 3) as usize] += 1;
        }
    }

    let mut type_matches = 0u64;
    let mut full_matches = 0u64;

    for pattern in 0u32..4096 {
        let mut count = 1u64;
        let mut type_sum = 0u32;
        let mut power_sum = 0u32;
        for field in 0..6 {
            let bits = (pattern >> (field * 2)) & 3;
            count *= bucket_counts[field][bits as usize];
            type_sum |= (bits & 1) << field;
            power_sum |= (bits >> 1) << field;
        }
        if count == 0 {
            continue;
        }

        let element = Element::HIDDEN_TYPES[(type_sum * 15 / 63) as usize];
        if !types.contains(element) {
            continue;
        }
        type_matches += count;

        if power_sum * 40 / 63 + 30 >= min_power {
            full_matches += count;
        }
    }

    (type_matches, full_matches)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_odd_ivs_give_dark_70() {
        // All bits set: type index 63*15/63 = 15 (Dark), power 63*40/63+30 = 70
        let ivs = Ivs::new(31, 31, 31, 31, 31, 31);
        assert_eq!(hidden_power_type(ivs), Element::Dark);
        assert_eq!(hidden_power(ivs), 70);
    }

    #[test]
    fn test_all_even_ivs_give_fighting_30() {
        let ivs = Ivs::new(0, 0, 0, 0, 0, 0);
        assert_eq!(hidden_power_type(ivs), Element::Fighting);
        assert_eq!(hidden_power(ivs), 30);
    }

    #[test]
    fn test_known_ice_spread() {
        // Classic 31/30/30/31/31/31 special-attacker spread: Ice 70
        let ivs = Ivs::new(31, 30, 30, 31, 31, 31);
        assert_eq!(hidden_power_type(ivs), Element::Ice);
        assert_eq!(hidden_power(ivs), 70);
    }

    #[test]
    fn test_matching_count_agrees_with_enumeration() {
        let min = Ivs::new(28, 28, 28, 28, 28, 28);
        let max = Ivs::new(31, 31, 31, 31, 31, 31);
        let types = ElementSet::single(Element::Ice);
        let min_power = 60;

        let mut expected_type = 0u64;
        let mut expected_full = 0u64;
        for hp in 28..=31 {
            for at in 28..=31 {
                for df in 28..=31 {
                    for sa in 28..=31 {
                        for sd in 28..=31 {
                            for sp in 28..=31 {
                                let ivs = Ivs::new(hp, at, df, sa, sd, sp);
                                if hidden_power_type(ivs) == Element::Ice {
                                    expected_type += 1;
                                    if hidden_power(ivs) >= min_power {
                                        expected_full += 1;
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }

        assert_eq!(
            matching_combinations(min, max, types, min_power),
            (expected_type, expected_full)
        );
    }

    #[test]
    fn test_fire_impossible_at_all_minimum_ivs() {
        let point = Ivs::new(0, 0, 0, 0, 0, 0);
        let (type_matches, _) =
            matching_combinations(point, point, ElementSet::single(Element::Fire), 30);
        assert_eq!(type_matches, 0);
    }

    #[test]
    fn test_any_type_set() {
        let set = ElementSet::any();
        assert!(set.is_any());
        for element in Element::HIDDEN_TYPES {
            assert!(set.contains(element));
        }
        assert!(!set.contains(Element::Normal));
    }
}
