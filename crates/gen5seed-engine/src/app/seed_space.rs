//! Seed-space enumeration
//!
//! The seed space is the cartesian product of the parameter ranges, ordered
//! outer-to-inner: date, time-of-day, key combination, Timer0, VCount. Seeds
//! are addressable by index through mixed-radix decomposition, so any
//! contiguous index sub-range can be produced without enumerating its
//! predecessors; this is what the runner partitions across workers.

use crate::app::runner::SeedSource;
use crate::domain::hashed_seed::{GameDate, HashedSeed, SeedParameters};
use crate::error::ConfigurationError;

/// Lazy, restartable view over every seed the parameters describe
#[derive(Clone, Debug)]
pub struct SeedSpace {
    parameters: SeedParameters,
    num_days: u64,
    num_seconds: u64,
    num_combos: u64,
    num_timer0: u64,
    num_vcount: u64,
}

impl SeedSpace {
    /// Build the space, rejecting parameter ranges that describe zero seeds
    pub fn new(parameters: SeedParameters) -> Result<SeedSpace, ConfigurationError> {
        let first_day = u64::from(parameters.date_min.epoch_days());
        let last_day = u64::from(parameters.date_max.epoch_days());
        if last_day < first_day
            || parameters.second_max < parameters.second_min
            || parameters.second_max >= 86_400
            || parameters.timer0_max < parameters.timer0_min
            || parameters.vcount_max < parameters.vcount_min
            || parameters.key_combos.is_empty()
        {
            return Err(ConfigurationError::EmptySeedSpace);
        }

        Ok(SeedSpace {
            num_days: last_day - first_day + 1,
            num_seconds: u64::from(parameters.second_max - parameters.second_min) + 1,
            num_combos: parameters.key_combos.len() as u64,
            num_timer0: u64::from(parameters.timer0_max - parameters.timer0_min) + 1,
            num_vcount: u64::from(parameters.vcount_max - parameters.vcount_min) + 1,
            parameters,
        })
    }

    /// Iterate every seed in index order
    pub fn iter(&self) -> impl Iterator<Item = HashedSeed> + '_ {
        (0..self.len()).map(|index| self.get(index))
    }
}

impl SeedSource for SeedSpace {
    type Seed = HashedSeed;

    fn len(&self) -> u64 {
        self.num_days * self.num_seconds * self.num_combos * self.num_timer0 * self.num_vcount
    }

    fn get(&self, index: u64) -> HashedSeed {
        debug_assert!(index < self.len());

        // innermost radix first
        let vcount_offset = index % self.num_vcount;
        let index = index / self.num_vcount;
        let timer0_offset = index % self.num_timer0;
        let index = index / self.num_timer0;
        let combo_offset = index % self.num_combos;
        let index = index / self.num_combos;
        let second_offset = index % self.num_seconds;
        let day_offset = index / self.num_seconds;

        let p = &self.parameters;
        HashedSeed::compute(
            p,
            GameDate::from_epoch_days(p.date_min.epoch_days() + day_offset as u32),
            p.second_min + second_offset as u32,
            p.key_combos[combo_offset as usize],
            p.timer0_min + timer0_offset as u32,
            p.vcount_min + vcount_offset as u32,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::KEY_INPUT_DEFAULT;
    use crate::domain::hashed_seed::Version;

    fn parameters() -> SeedParameters {
        SeedParameters {
            version: Version::WhiteEnglish,
            mac_address: 0x0009_BF0A_0B0C,
            timer0_min: 0xC67,
            timer0_max: 0xC69,
            vcount_min: 0x5F,
            vcount_max: 0x60,
            date_min: GameDate::new(2011, 1, 1),
            date_max: GameDate::new(2011, 1, 3),
            second_min: 10,
            second_max: 14,
            key_combos: vec![KEY_INPUT_DEFAULT, KEY_INPUT_DEFAULT ^ 0x1],
        }
    }

    #[test]
    fn test_len_is_product_of_ranges() {
        let space = SeedSpace::new(parameters()).unwrap();
        // 3 days * 5 seconds * 2 combos * 3 timer0 * 2 vcount
        assert_eq!(space.len(), 3 * 5 * 2 * 3 * 2);
    }

    #[test]
    fn test_indexing_matches_iteration() {
        let space = SeedSpace::new(parameters()).unwrap();
        for (index, seed) in space.iter().enumerate() {
            assert_eq!(space.get(index as u64), seed);
        }
    }

    #[test]
    fn test_enumeration_order_is_outer_to_inner() {
        let space = SeedSpace::new(parameters()).unwrap();
        let first = space.get(0);
        let second = space.get(1);

        // vcount is the innermost radix
        assert_eq!(first.vcount + 1, second.vcount);
        assert_eq!(first.timer0, second.timer0);
        assert_eq!(first.date, second.date);

        // the last seed carries every range maximum
        let last = space.get(space.len() - 1);
        assert_eq!(last.date, GameDate::new(2011, 1, 3));
        assert_eq!(last.second_of_day, 14);
        assert_eq!(last.timer0, 0xC69);
        assert_eq!(last.vcount, 0x60);
    }

    #[test]
    fn test_all_seeds_distinct_parameters() {
        let space = SeedSpace::new(parameters()).unwrap();
        let mut tuples: Vec<_> = space
            .iter()
            .map(|s| (s.date, s.second_of_day, s.key_combo, s.timer0, s.vcount))
            .collect();
        tuples.sort();
        tuples.dedup();
        assert_eq!(tuples.len() as u64, space.len());
    }

    #[test]
    fn test_empty_ranges_rejected() {
        let mut p = parameters();
        p.key_combos.clear();
        assert!(matches!(
            SeedSpace::new(p),
            Err(ConfigurationError::EmptySeedSpace)
        ));

        let mut p = parameters();
        p.timer0_max = p.timer0_min - 1;
        assert!(matches!(
            SeedSpace::new(p),
            Err(ConfigurationError::EmptySeedSpace)
        ));

        let mut p = parameters();
        p.date_max = GameDate::new(2010, 12, 31);
        assert!(matches!(
            SeedSpace::new(p),
            Err(ConfigurationError::EmptySeedSpace)
        ));
    }
}
