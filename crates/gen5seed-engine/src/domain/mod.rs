//! Domain layer - Pure computational logic
//!
//! This module contains pure functions and algorithms without I/O dependencies.

pub mod characteristic;
pub mod frame;
pub mod hashed_seed;
pub mod hidden_power;
pub mod ivs;
pub mod nature;
pub mod pid;
pub mod rng;
