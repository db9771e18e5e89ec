//! Search workflow implementation
//!
//! This module provides the assembled entry point: validate a criteria,
//! build the seed space, checker and runner, and stream matches and
//! progress back to the caller.

use crate::app::criteria::{Criteria, FrameChecker};
use crate::app::runner::{CancelToken, Match, SearchOutcome, SearchRunner, SeedSource};
use crate::app::seed_space::SeedSpace;
use crate::domain::frame::FrameGenerator;
use crate::domain::hashed_seed::HashedSeed;
use crate::error::{ConfigurationError, SearchFailure};
use log::{debug, info};
use thiserror::Error;

/// Why a search never produced an outcome
#[derive(Debug, Clone, Error)]
pub enum SearchError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    #[error(transparent)]
    Failure(#[from] SearchFailure),
}

/// Run a full criteria-driven search.
///
/// Validates the criteria up front, then walks the whole hashed-seed space,
/// expanding each seed through its frame range and forwarding matches to
/// `on_result` and (processed, total) pairs to `on_progress`. The caller
/// can always distinguish the three terminal states: `Ok(Completed)`,
/// `Ok(Cancelled)` and `Err(_)`.
pub fn search_seeds<R, P>(
    criteria: &Criteria,
    on_result: R,
    on_progress: P,
    cancel: &CancelToken,
) -> Result<SearchOutcome, SearchError>
where
    R: FnMut(Match<HashedSeed>) + Send,
    P: FnMut(u64, u64) + Send,
{
    criteria.validate()?;
    let space = SeedSpace::new(criteria.seed_parameters.clone())?;
    debug!(
        "seed space: {} seeds, frames {}..={}",
        space.len(),
        criteria.frame_range.min,
        criteria.frame_range.max
    );

    let checker = FrameChecker::new(criteria);
    let frame_parameters = criteria.frame_parameters();
    let runner = SearchRunner::new(criteria.num_threads);

    let outcome = runner.run(
        &space,
        |seed: &HashedSeed| FrameGenerator::new(seed.raw, frame_parameters),
        criteria.frame_range,
        |frame| checker.test(frame),
        on_result,
        on_progress,
        cancel,
    )?;

    info!("search {:?}", outcome);
    Ok(outcome)
}
