//! Shared test doubles for the comment raffle service.

mod clock;
mod comments;
mod rng;

pub use clock::FixedClock;
pub use comments::{FailingComments, StaticComments};
pub use rng::{MockRng, SequenceRng};
