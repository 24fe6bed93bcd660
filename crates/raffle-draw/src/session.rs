//! Session and slot state for one draw.

use chrono::{DateTime, Utc};
use raffle_core::participant::Participant;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Placeholder shown in a slot before its spin starts.
pub const PLACEHOLDER_NAME: &str = "???";

/// A request to draw winners from a participant universe.
#[derive(Debug, Clone)]
pub struct DrawRequest {
    /// Deduplicated participant universe.
    pub universe: Vec<Participant>,
    /// Number of winners to reveal. Must be in `1..=universe.len()`.
    pub winner_count: usize,
}

/// Reveal phase of one winner slot.
///
/// Phases advance strictly Idle → Spinning → Stopped → Settled; Settled is
/// terminal and freezes the displayed name for the rest of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotPhase {
    /// Created, waiting out the pre-spin delay.
    Idle,
    /// Cycling through random universe members on each tick.
    Spinning,
    /// Showing the true winner, waiting out the post-stop delay.
    Stopped,
    /// Final. The displayed name is the winner and never changes again.
    Settled,
}

/// Display state of one winner slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotState {
    /// 1-based winner rank, fixed for the slot's lifetime.
    pub rank: u32,
    /// Name currently shown for this slot.
    pub displayed_name: String,
    /// Current reveal phase.
    pub phase: SlotPhase,
}

impl SlotState {
    pub(crate) fn idle(rank: u32) -> Self {
        Self {
            rank,
            displayed_name: PLACEHOLDER_NAME.to_owned(),
            phase: SlotPhase::Idle,
        }
    }
}

/// One draw session: the request, its ground-truth winner list, and the
/// reveal state. Owned exclusively by the engine; callers only ever see
/// [`SessionSnapshot`]s.
#[derive(Debug, Clone)]
pub(crate) struct Session {
    pub(crate) id: Uuid,
    pub(crate) started_at: DateTime<Utc>,
    pub(crate) universe: Vec<Participant>,
    /// Final winner list, fixed at session start. Exposed only once done.
    pub(crate) winners: Vec<Participant>,
    pub(crate) slots: Vec<SlotState>,
    pub(crate) done: bool,
}

impl Session {
    pub(crate) fn new(
        id: Uuid,
        started_at: DateTime<Utc>,
        universe: Vec<Participant>,
        winners: Vec<Participant>,
    ) -> Self {
        Self {
            id,
            started_at,
            universe,
            winners,
            slots: Vec::new(),
            done: false,
        }
    }

    pub(crate) fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            session_id: self.id,
            started_at: self.started_at,
            slots: self.slots.clone(),
            done: self.done,
            winners: self.done.then(|| self.winners.clone()),
        }
    }
}

/// Immutable view of a session at one instant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// Session identifier; changes on every redraw.
    pub session_id: Uuid,
    /// When the session started.
    pub started_at: DateTime<Utc>,
    /// Slots revealed so far, in rank order.
    pub slots: Vec<SlotState>,
    /// True once every slot has settled.
    pub done: bool,
    /// The finalized winner list; `Some` only once `done`.
    pub winners: Option<Vec<Participant>>,
}
