//! Skyflap game core.
//!
//! A bird falls under gravity and must pass through gaps in pipes scrolling
//! in from the right. Clearing a pipe scores a point; touching a pipe, the
//! ceiling or the ground ends the run. The core only needs a millisecond
//! timestamp and an RNG from the caller.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
