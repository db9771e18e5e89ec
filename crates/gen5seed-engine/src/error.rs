//! Error taxonomy shared across the engine
//!
//! Configuration errors are caller-fixable and raised before a search runs.
//! Search failures abort a running search and are surfaced exactly once via
//! the runner's return value, never through the match or progress callbacks.

use crate::domain::hidden_power::Element;
use crate::domain::ivs::Ivs;
use thiserror::Error;

/// Rejected search configuration (raised before or instead of running)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// Minimum IVs exceed maximum IVs in at least one stat
    #[error("impossible IV range: min {min:?} is not worse than or equal to max {max:?}")]
    ImpossibleIvRange { min: Ivs, max: Ivs },

    /// No IV combination within the bounds produces a requested hidden power type
    #[error("hidden power type {requested} is unreachable within the given IV bounds")]
    ImpossibleHiddenPowerType { requested: Element },

    /// The requested type is reachable, but never at the requested minimum power
    #[error("hidden power of at least {min_power} is unreachable within the given IV bounds")]
    ImpossibleMinHiddenPower { min_power: u32 },

    /// The seed parameter ranges describe zero seeds
    #[error("seed space is empty: every parameter range must contain at least one value")]
    EmptySeedSpace,

    /// Frame range is inverted or starts at frame 0
    #[error("invalid frame range: {min}..={max} (frames are numbered from 1)")]
    EmptyFrameRange { min: u32, max: u32 },
}

/// Unexpected failure inside a running search (terminal, not recoverable)
#[derive(Debug, Clone, Error)]
pub enum SearchFailure {
    /// A worker thread hit an invariant violation and unwound
    #[error("search worker failed: {message}")]
    Worker { message: String },

    /// The worker thread pool could not be constructed
    #[error("could not build search thread pool: {message}")]
    Pool { message: String },
}
