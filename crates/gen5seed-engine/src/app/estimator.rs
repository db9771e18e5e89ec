//! Closed-form result estimation
//!
//! Predicts how many frames a search should match, for progress-bar scaling
//! and pre-flight sanity warnings. The estimate is advisory: it never gates
//! whether a search runs. It does, however, surface configuration errors
//! (impossible IV bounds, unreachable hidden power) before any thread starts.

use crate::app::criteria::{AbilitySelector, Criteria, Shininess};
use crate::app::runner::SeedSource;
use crate::app::seed_space::SeedSpace;
use crate::constants::{IV_SPACE, NUM_NATURES, SHINY_DIVISOR};
use crate::domain::hidden_power;
use crate::domain::ivs::Ivs;
use crate::error::ConfigurationError;

/// Expected number of matching frames for a criteria.
///
/// `seeds × frames × iv_combinations × |natures|` over the full probability
/// denominator, then scaled by the exact fraction of the bounded IV space
/// satisfying the hidden-power constraint. Intermediate arithmetic is
/// 128-bit; the seed space alone can exceed 2^32.
pub fn expected_results(criteria: &Criteria) -> Result<u64, ConfigurationError> {
    let space = SeedSpace::new(criteria.seed_parameters.clone())?;
    expected_results_for_seeds(criteria, space.len())
}

/// Variant taking a precomputed seed-space size
pub fn expected_results_for_seeds(
    criteria: &Criteria,
    num_seeds: u64,
) -> Result<u64, ConfigurationError> {
    if criteria.frame_range.is_empty() {
        return Err(ConfigurationError::EmptyFrameRange {
            min: criteria.frame_range.min,
            max: criteria.frame_range.max,
        });
    }

    // shiny-only against a never-shiny encounter cannot match anything
    if criteria.shiny_only && criteria.shininess == Shininess::NeverShiny {
        return Ok(0);
    }

    let num_frames = criteria.frame_range.len();
    let num_ivs = Ivs::combination_count(criteria.ivs.min, criteria.ivs.max)?;

    let nature_multiplier = u128::from(criteria.pid.natures.len());
    let ability_divisor: u128 = match criteria.pid.ability {
        AbilitySelector::Any => 1,
        AbilitySelector::First | AbilitySelector::Second => 2,
    };
    let shiny_divisor: u128 =
        if criteria.shiny_only && criteria.shininess == Shininess::MayBeShiny {
            u128::from(SHINY_DIVISOR)
        } else {
            1
        };

    let numerator =
        u128::from(num_seeds) * u128::from(num_frames) * u128::from(num_ivs) * nature_multiplier;
    let denominator =
        u128::from(IV_SPACE) * u128::from(NUM_NATURES) * ability_divisor * shiny_divisor;
    let base = numerator / denominator;

    adjust_for_hidden_power(base, criteria).map(|estimate| estimate as u64)
}

/// Scale the base estimate by the fraction of the bounded IV space matching
/// the hidden-power constraint; error out if that fraction is zero.
fn adjust_for_hidden_power(base: u128, criteria: &Criteria) -> Result<u128, ConfigurationError> {
    if criteria.ivs.hidden_power_unconstrained() {
        return Ok(base);
    }

    let (type_matches, full_matches) = hidden_power::matching_combinations(
        criteria.ivs.min,
        criteria.ivs.max,
        criteria.ivs.hidden_types,
        criteria.ivs.min_hidden_power,
    );

    if type_matches == 0 {
        return Err(ConfigurationError::ImpossibleHiddenPowerType {
            requested: criteria
                .ivs
                .hidden_types
                .first()
                .unwrap_or(crate::domain::hidden_power::Element::Normal),
        });
    }
    if full_matches == 0 {
        return Err(ConfigurationError::ImpossibleMinHiddenPower {
            min_power: criteria.ivs.min_hidden_power,
        });
    }

    // total is nonzero: the IV range was validated above
    let total = u128::from(
        Ivs::combination_count(criteria.ivs.min, criteria.ivs.max).unwrap_or(1),
    );
    Ok(base * u128::from(full_matches) / total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::criteria::{IvCriteria, PidCriteria};
    use crate::constants::KEY_INPUT_DEFAULT;
    use crate::domain::frame::FrameRange;
    use crate::domain::hashed_seed::{GameDate, SeedParameters, Version};
    use crate::domain::hidden_power::{Element, ElementSet};
    use crate::domain::nature::{Nature, NatureSet};
    use crate::domain::pid::{GameFamily, Gender, GenderRatio};

    fn criteria() -> Criteria {
        Criteria {
            seed_parameters: SeedParameters {
                version: Version::BlackEnglish,
                mac_address: 0,
                timer0_min: 0,
                timer0_max: 0,
                vcount_min: 0,
                vcount_max: 0,
                date_min: GameDate::new(2011, 1, 1),
                date_max: GameDate::new(2011, 1, 1),
                second_min: 0,
                second_max: 0,
                key_combos: vec![KEY_INPUT_DEFAULT],
            },
            frame_range: FrameRange::new(1, 100),
            family: GameFamily::Gen5,
            pid: PidCriteria::default(),
            ivs: IvCriteria::default(),
            shiny_only: false,
            shininess: Shininess::MayBeShiny,
            tid: 0,
            sid: 0,
            num_threads: 1,
        }
    }

    #[test]
    fn test_unconstrained_estimate_is_frame_count() {
        // One seed, no filters: every frame matches
        let criteria = criteria();
        assert_eq!(expected_results(&criteria).unwrap(), 100);
    }

    #[test]
    fn test_nature_and_ability_scaling() {
        let mut criteria = criteria();
        criteria.frame_range = FrameRange::new(1, 2500);
        criteria.pid.natures = NatureSet::single(Nature::Timid);
        assert_eq!(expected_results(&criteria).unwrap(), 100);

        criteria.pid.ability = AbilitySelector::First;
        assert_eq!(expected_results(&criteria).unwrap(), 50);
    }

    #[test]
    fn test_shiny_divisor_applies_only_when_probabilistic() {
        let mut criteria = criteria();
        criteria.frame_range = FrameRange::new(1, 8192);
        criteria.shiny_only = true;
        assert_eq!(expected_results(&criteria).unwrap(), 1);

        criteria.shininess = Shininess::AlwaysShiny;
        assert_eq!(expected_results(&criteria).unwrap(), 8192);

        // the checker rejects every frame of a never-shiny encounter
        criteria.shininess = Shininess::NeverShiny;
        assert_eq!(expected_results(&criteria).unwrap(), 0);
    }

    #[test]
    fn test_iv_bounds_scale_estimate() {
        let mut criteria = criteria();
        // a single IV point out of 32^6
        let point = Ivs::new(31, 31, 31, 31, 31, 31);
        criteria.ivs.min = point;
        criteria.ivs.max = point;
        criteria.frame_range = FrameRange::new(1, 100);
        // 100 / 2^30 rounds to zero
        assert_eq!(expected_results(&criteria).unwrap(), 0);
    }

    #[test]
    fn test_impossible_hidden_power_type_errors() {
        let mut criteria = criteria();
        let point = Ivs::new(0, 0, 0, 0, 0, 0);
        criteria.ivs.min = point;
        criteria.ivs.max = point;
        criteria.ivs.hidden_types = ElementSet::single(Element::Fire);
        assert!(matches!(
            expected_results(&criteria),
            Err(ConfigurationError::ImpossibleHiddenPowerType { .. })
        ));
    }

    #[test]
    fn test_unreachable_min_power_errors() {
        let mut criteria = criteria();
        let point = Ivs::new(0, 0, 0, 0, 0, 0);
        criteria.ivs.min = point;
        criteria.ivs.max = point;
        criteria.ivs.hidden_types = ElementSet::single(Element::Fighting);
        criteria.ivs.min_hidden_power = 31;
        assert!(matches!(
            expected_results(&criteria),
            Err(ConfigurationError::ImpossibleMinHiddenPower { .. })
        ));
    }

    #[test]
    fn test_satisfiable_hidden_power_does_not_error() {
        let mut criteria = criteria();
        criteria.ivs.hidden_types = ElementSet::single(Element::Ice);
        criteria.ivs.min_hidden_power = 70;
        assert!(expected_results(&criteria).is_ok());
    }

    #[test]
    fn test_gender_fields_do_not_affect_estimate() {
        // Gender is not part of the closed form; only that it round-trips
        let mut criteria = criteria();
        criteria.pid.gender = Gender::Female;
        criteria.pid.gender_ratio = GenderRatio::OneEighthFemale;
        assert_eq!(expected_results(&criteria).unwrap(), 100);
    }
}
