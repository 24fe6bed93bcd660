//! Random source abstraction for determinism.
//!
//! The shuffle and the spinning reveal both reduce to one operation: pick a
//! uniform index below a bound. Keeping that behind a trait lets tests inject
//! scripted values and keeps the production source swappable (e.g. for a
//! CSPRNG) without touching the draw logic.

use rand::Rng;

/// Abstraction over uniform random index generation.
pub trait DrawRng: Send {
    /// Returns a uniform random index in `[0, bound)`.
    ///
    /// `bound` must be at least 1; callers uphold this by validating their
    /// inputs before drawing.
    fn next_index(&mut self, bound: usize) -> usize;
}

/// Production random source backed by the thread-local generator.
///
/// A fresh handle is taken per call, which keeps this type `Send + Sync`
/// and safe to share behind a mutex.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRng;

impl DrawRng for SystemRng {
    fn next_index(&mut self, bound: usize) -> usize {
        rand::rng().random_range(0..bound)
    }
}
