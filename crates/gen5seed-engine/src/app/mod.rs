//! Application layer - Use case implementations
//!
//! This module coordinates the domain types into the search workflow:
//! criteria validation, result estimation, seed-space enumeration and the
//! threaded search runner.

pub mod criteria;
pub mod estimator;
pub mod runner;
pub mod searcher;
pub mod seed_space;
