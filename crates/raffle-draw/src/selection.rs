//! Fair winner selection without replacement.

use raffle_core::participant::Participant;
use raffle_core::rng::DrawRng;
use thiserror::Error;

/// Precondition violations of [`select`], each naming the violated bound.
/// These are user-facing validation failures, never fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    /// The participant universe has no members.
    #[error("participant universe is empty")]
    EmptyUniverse,

    /// The requested winner count is zero.
    #[error("winner count must be at least 1")]
    NonPositiveCount,

    /// More winners were requested than there are participants.
    #[error("winner count {requested} exceeds the {available} unique participants")]
    CountExceedsUniverse {
        /// Requested winner count.
        requested: usize,
        /// Universe size.
        available: usize,
    },
}

/// Selects `winner_count` distinct winners from `universe`, in draw order.
///
/// Uniform Fisher–Yates shuffle of a copy of the universe, truncated to the
/// requested count: every permutation of the universe is equally likely, so
/// every subset of the requested size and every ordering within it is too.
/// The input is never mutated; the result is pure given a fixed `rng`.
///
/// # Errors
///
/// Returns a [`SelectionError`] when the universe is empty, the count is
/// zero, or the count exceeds the universe size.
pub fn select(
    universe: &[Participant],
    winner_count: usize,
    rng: &mut dyn DrawRng,
) -> Result<Vec<Participant>, SelectionError> {
    if universe.is_empty() {
        return Err(SelectionError::EmptyUniverse);
    }
    if winner_count == 0 {
        return Err(SelectionError::NonPositiveCount);
    }
    if winner_count > universe.len() {
        return Err(SelectionError::CountExceedsUniverse {
            requested: winner_count,
            available: universe.len(),
        });
    }

    let mut shuffled = universe.to_vec();
    for i in (1..shuffled.len()).rev() {
        let j = rng.next_index(i + 1);
        shuffled.swap(i, j);
    }
    shuffled.truncate(winner_count);
    Ok(shuffled)
}
