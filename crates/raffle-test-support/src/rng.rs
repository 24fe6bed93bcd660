//! Test RNG — deterministic `DrawRng` implementations for tests.

use raffle_core::rng::DrawRng;

/// A no-op RNG that always returns `0`. Suitable for tests that do not
/// depend on specific random values; every shuffle step swaps with index 0
/// and every spin tick shows the first universe member.
#[derive(Debug)]
pub struct MockRng;

impl DrawRng for MockRng {
    fn next_index(&mut self, _bound: usize) -> usize {
        0
    }
}

/// An RNG that returns values from a predetermined sequence. Panics if the
/// sequence is exhausted. Used in tests that need specific, repeatable
/// outcomes (e.g. a known winner ordering out of the shuffle).
#[derive(Debug)]
pub struct SequenceRng {
    values: Vec<usize>,
    index: usize,
}

impl SequenceRng {
    /// Create a new `SequenceRng` with the given values.
    #[must_use]
    pub fn new(values: Vec<usize>) -> Self {
        Self { values, index: 0 }
    }
}

impl DrawRng for SequenceRng {
    fn next_index(&mut self, _bound: usize) -> usize {
        let val = self.values[self.index];
        self.index += 1;
        val
    }
}
