//! Search criteria and the per-frame predicate
//!
//! A `Criteria` is built once by the caller, validated before the search
//! starts, and shared read-only across every worker thread. The
//! `FrameChecker` derived from it is the stateless conjunction applied to
//! each frame.

use crate::app::seed_space::SeedSpace;
use crate::domain::frame::{Frame, FrameParameters, FrameRange};
use crate::domain::hashed_seed::SeedParameters;
use crate::domain::hidden_power::{self, ElementSet};
use crate::domain::ivs::Ivs;
use crate::domain::nature::NatureSet;
use crate::domain::pid::{gender_matches, GameFamily, Gender, GenderRatio};
use crate::error::ConfigurationError;

/// Which ability slot the target must carry
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AbilitySelector {
    First,
    Second,
    Any,
}

impl AbilitySelector {
    fn matches(self, slot: u32) -> bool {
        match self {
            AbilitySelector::First => slot == 0,
            AbilitySelector::Second => slot == 1,
            AbilitySelector::Any => true,
        }
    }
}

/// Whether the encounter's shininess is decided by the PID or fixed
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shininess {
    /// The 1/8192 PID check applies
    MayBeShiny,
    /// The encounter is shiny-locked off
    NeverShiny,
    /// The encounter is forced shiny
    AlwaysShiny,
}

/// PID-derived constraints
#[derive(Clone, Copy, Debug)]
pub struct PidCriteria {
    pub natures: NatureSet,
    pub ability: AbilitySelector,
    pub gender: Gender,
    pub gender_ratio: GenderRatio,
}

impl Default for PidCriteria {
    fn default() -> Self {
        PidCriteria {
            natures: NatureSet::any(),
            ability: AbilitySelector::Any,
            gender: Gender::Any,
            gender_ratio: GenderRatio::Unspecified,
        }
    }
}

/// IV-derived constraints
#[derive(Clone, Copy, Debug)]
pub struct IvCriteria {
    pub min: Ivs,
    /// All-31 means "unbounded": the upper comparison is skipped entirely
    pub max: Ivs,
    pub hidden_types: ElementSet,
    pub min_hidden_power: u32,
}

impl Default for IvCriteria {
    fn default() -> Self {
        IvCriteria {
            min: Ivs::default(),
            max: Ivs::max(),
            hidden_types: ElementSet::any(),
            min_hidden_power: 0,
        }
    }
}

impl IvCriteria {
    /// True when hidden power does not constrain the search
    pub fn hidden_power_unconstrained(&self) -> bool {
        self.hidden_types.is_any() && self.min_hidden_power <= 30
    }
}

/// The complete, immutable search specification
#[derive(Clone, Debug)]
pub struct Criteria {
    pub seed_parameters: SeedParameters,
    pub frame_range: FrameRange,
    pub family: GameFamily,
    pub pid: PidCriteria,
    pub ivs: IvCriteria,
    pub shiny_only: bool,
    pub shininess: Shininess,
    pub tid: u16,
    pub sid: u16,
    /// Worker threads; 0 means one per available core
    pub num_threads: usize,
}

impl Criteria {
    /// Check every precondition that would make the search meaningless.
    /// Runs synchronously on the caller's thread, before any worker starts.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.frame_range.is_empty() {
            return Err(ConfigurationError::EmptyFrameRange {
                min: self.frame_range.min,
                max: self.frame_range.max,
            });
        }

        SeedSpace::new(self.seed_parameters.clone())?;

        // also rejects an inverted min/max pair
        Ivs::combination_count(self.ivs.min, self.ivs.max)?;

        if !self.ivs.hidden_power_unconstrained() {
            let (type_matches, full_matches) = hidden_power::matching_combinations(
                self.ivs.min,
                self.ivs.max,
                self.ivs.hidden_types,
                self.ivs.min_hidden_power,
            );
            if type_matches == 0 {
                return Err(ConfigurationError::ImpossibleHiddenPowerType {
                    // the set is non-any, so it names at least one type
                    requested: self
                        .ivs
                        .hidden_types
                        .first()
                        .unwrap_or(crate::domain::hidden_power::Element::Normal),
                });
            }
            if full_matches == 0 {
                return Err(ConfigurationError::ImpossibleMinHiddenPower {
                    min_power: self.ivs.min_hidden_power,
                });
            }
        }

        Ok(())
    }

    /// Frame-generation inputs shared by every seed of this search
    pub fn frame_parameters(&self) -> FrameParameters {
        FrameParameters {
            family: self.family,
            starting_frame: self.frame_range.min,
        }
    }
}

/// Stateless per-frame predicate; freely shared across worker threads
#[derive(Clone, Copy, Debug)]
pub struct FrameChecker<'a> {
    criteria: &'a Criteria,
}

impl<'a> FrameChecker<'a> {
    pub fn new(criteria: &'a Criteria) -> FrameChecker<'a> {
        FrameChecker { criteria }
    }

    /// Conjunction of all criteria, short-circuiting left to right
    pub fn test(&self, frame: &Frame) -> bool {
        self.check_shiny(frame)
            && self.check_nature(frame)
            && self.check_ability(frame)
            && self.check_gender(frame)
            && self.check_ivs(frame)
            && self.check_hidden_power(frame)
    }

    fn check_shiny(&self, frame: &Frame) -> bool {
        if !self.criteria.shiny_only || self.criteria.shininess == Shininess::AlwaysShiny {
            return true;
        }
        if self.criteria.shininess == Shininess::NeverShiny {
            return false;
        }
        frame.pid.is_shiny(self.criteria.tid, self.criteria.sid)
    }

    fn check_nature(&self, frame: &Frame) -> bool {
        self.criteria.pid.natures.contains(frame.pid.nature())
    }

    fn check_ability(&self, frame: &Frame) -> bool {
        self.criteria
            .pid
            .ability
            .matches(frame.pid.ability(self.criteria.family))
    }

    fn check_gender(&self, frame: &Frame) -> bool {
        gender_matches(
            frame.pid.gender_value(),
            self.criteria.pid.gender,
            self.criteria.pid.gender_ratio,
        )
    }

    fn check_ivs(&self, frame: &Frame) -> bool {
        frame.ivs.better_or_equal(self.criteria.ivs.min)
            && (self.criteria.ivs.max.is_max() || frame.ivs.worse_or_equal(self.criteria.ivs.max))
    }

    fn check_hidden_power(&self, frame: &Frame) -> bool {
        let ivs = &self.criteria.ivs;
        if ivs.hidden_power_unconstrained() {
            return true;
        }
        ivs.hidden_types
            .contains(hidden_power::hidden_power_type(frame.ivs))
            && hidden_power::hidden_power(frame.ivs) >= ivs.min_hidden_power
    }
}
