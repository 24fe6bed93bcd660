//! Raffle Core — shared abstractions.
//!
//! This crate defines the determinism seams (clock and random source) and
//! the participant identifier type that the draw and crawl crates depend on.
//! It contains no infrastructure code.

pub mod clock;
pub mod participant;
pub mod rng;
