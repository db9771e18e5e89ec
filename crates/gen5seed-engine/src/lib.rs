//! gen5seed-engine - Seed search engine for Gen 5 Pokemon RNG manipulation
//!
//! This crate provides functionality to:
//! - Decode gender/ability/nature/shininess and individual values from raw
//!   32-bit PRNG output words
//! - Enumerate the hashed initial-seed space spanned by date/time/hardware
//!   parameter ranges
//! - Expand each seed into a stream of observable frames and filter those
//!   frames against user criteria across a fixed pool of worker threads

pub mod app;
pub mod constants;
pub mod domain;
pub mod error;

// Re-export commonly used types
pub use app::criteria::{Criteria, FrameChecker, IvCriteria, PidCriteria};
pub use app::estimator::expected_results;
pub use app::runner::{CancelToken, SearchOutcome, SearchRunner};
pub use app::searcher::{search_seeds, SearchError};
pub use app::seed_space::SeedSpace;
pub use domain::frame::{Frame, FrameGenerator, FrameRange};
pub use domain::hashed_seed::{HashedSeed, SeedParameters};
pub use domain::ivs::Ivs;
pub use domain::pid::Pid;
pub use error::{ConfigurationError, SearchFailure};
