//! The sequential draw engine.
//!
//! One engine owns at most one live session. `start_session` selects the
//! winner list up front, then a spawned driver task walks each slot through
//! Idle → Spinning → Stopped → Settled on the configured pacing, publishing
//! a fresh [`SessionSnapshot`] after every state change.
//!
//! Redraw safety rests on a session epoch: every driver mutation re-checks
//! the epoch under the same lock that owns the session, so a tick scheduled
//! by a superseded session can never touch a newer one. Aborting the old
//! driver task on redraw releases its timers; the epoch check is what makes
//! the teardown airtight.

use std::sync::{Arc, Mutex};

use raffle_core::clock::Clock;
use raffle_core::participant::Participant;
use raffle_core::rng::DrawRng;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::selection::{SelectionError, select};
use crate::session::{DrawRequest, Session, SessionSnapshot, SlotPhase, SlotState};
use crate::timing::DrawTiming;

/// Cheaply clonable handle to the draw engine.
#[derive(Clone)]
pub struct DrawEngine {
    inner: Arc<EngineInner>,
}

struct EngineInner {
    timing: DrawTiming,
    clock: Arc<dyn Clock>,
    rng: Arc<Mutex<dyn DrawRng>>,
    /// Single source of truth for the live session.
    state: Mutex<EngineState>,
    /// Last published snapshot; `None` until the first session starts.
    snapshot_tx: watch::Sender<Option<SessionSnapshot>>,
    driver: Mutex<Option<JoinHandle<()>>>,
}

struct EngineState {
    /// Bumped on every `start_session`; stale drivers fail the epoch check.
    epoch: u64,
    session: Option<Session>,
}

impl DrawEngine {
    /// Creates an engine with the given pacing, clock, and random source.
    #[must_use]
    pub fn new(timing: DrawTiming, clock: Arc<dyn Clock>, rng: Arc<Mutex<dyn DrawRng>>) -> Self {
        let (snapshot_tx, _) = watch::channel(None);
        Self {
            inner: Arc::new(EngineInner {
                timing,
                clock,
                rng,
                state: Mutex::new(EngineState {
                    epoch: 0,
                    session: None,
                }),
                snapshot_tx,
                driver: Mutex::new(None),
            }),
        }
    }

    /// Starts a new session, superseding any prior one.
    ///
    /// Validation and winner selection happen before any teardown, so a
    /// failed request leaves the previous session (if any) untouched. On
    /// success the previous session's driver is cancelled, a fresh session
    /// is installed, and its reveal begins. Returns the initial snapshot
    /// (no slots yet, not done).
    ///
    /// Must be called from within a tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns the [`SelectionError`] naming the violated bound when the
    /// request fails validation.
    ///
    /// # Panics
    ///
    /// Panics if an internal lock is poisoned (a prior driver panicked).
    pub fn start_session(&self, request: DrawRequest) -> Result<SessionSnapshot, SelectionError> {
        let winners = {
            let mut rng = self.inner.rng.lock().expect("rng lock poisoned");
            select(&request.universe, request.winner_count, &mut *rng)?
        };

        if let Some(prior) = self
            .inner
            .driver
            .lock()
            .expect("driver lock poisoned")
            .take()
        {
            prior.abort();
        }

        let session_id = Uuid::new_v4();
        let universe_size = request.universe.len();
        let (epoch, snapshot) = {
            let mut state = self.inner.state.lock().expect("engine state lock poisoned");
            state.epoch += 1;
            let session = Session::new(
                session_id,
                self.inner.clock.now(),
                request.universe,
                winners,
            );
            let snapshot = session.snapshot();
            state.session = Some(session);
            // Published under the state lock so receivers never observe a
            // snapshot out of order with the session it came from.
            self.inner.snapshot_tx.send_replace(Some(snapshot.clone()));
            (state.epoch, snapshot)
        };

        tracing::info!(
            %session_id,
            winner_count = request.winner_count,
            universe_size,
            "draw session started"
        );

        let handle = tokio::spawn(drive_reveal(Arc::clone(&self.inner), epoch));
        *self.inner.driver.lock().expect("driver lock poisoned") = Some(handle);

        Ok(snapshot)
    }

    /// Returns the current session snapshot, or `None` before the first
    /// session.
    #[must_use]
    pub fn snapshot(&self) -> Option<SessionSnapshot> {
        self.inner.snapshot_tx.borrow().clone()
    }

    /// Subscribes to snapshot updates. The receiver yields the latest
    /// snapshot after every state change (watch semantics: intermediate
    /// values may coalesce, the latest is never lost).
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Option<SessionSnapshot>> {
        self.inner.snapshot_tx.subscribe()
    }

    /// Returns the finalized winner list, `Some` only once the current
    /// session is done.
    ///
    /// # Panics
    ///
    /// Panics if the engine state lock is poisoned.
    #[must_use]
    pub fn winners(&self) -> Option<Vec<Participant>> {
        let state = self.inner.state.lock().expect("engine state lock poisoned");
        state
            .session
            .as_ref()
            .filter(|session| session.done)
            .map(|session| session.winners.clone())
    }
}

impl EngineInner {
    /// Runs `f` against the live session iff `epoch` is still current, then
    /// publishes the resulting snapshot. The epoch check, the mutation, and
    /// the publish all happen under the state lock. Returns false when the
    /// session has been superseded.
    fn mutate(&self, epoch: u64, f: impl FnOnce(&mut Session)) -> bool {
        let mut state = self.state.lock().expect("engine state lock poisoned");
        if state.epoch != epoch {
            return false;
        }
        let Some(session) = state.session.as_mut() else {
            return false;
        };
        f(session);
        self.snapshot_tx.send_replace(Some(session.snapshot()));
        true
    }

    /// Reads from the live session iff `epoch` is still current.
    fn read<T>(&self, epoch: u64, f: impl FnOnce(&Session) -> T) -> Option<T> {
        let state = self.state.lock().expect("engine state lock poisoned");
        if state.epoch != epoch {
            return None;
        }
        state.session.as_ref().map(f)
    }

    /// Picks a uniform random universe index. Never held across an await.
    fn pick_index(&self, bound: usize) -> usize {
        self.rng.lock().expect("rng lock poisoned").next_index(bound)
    }
}

/// Drives one session's reveal to completion (or until superseded).
async fn drive_reveal(inner: Arc<EngineInner>, epoch: u64) {
    let Some((session_id, universe, winners)) =
        inner.read(epoch, |s| (s.id, s.universe.clone(), s.winners.clone()))
    else {
        return;
    };
    let timing = inner.timing;

    for (index, winner) in winners.iter().enumerate() {
        #[allow(clippy::cast_possible_truncation)]
        let rank = (index + 1) as u32;

        // Slot k+1 is only ever created here, after slot k settled below.
        if !inner.mutate(epoch, |s| s.slots.push(SlotState::idle(rank))) {
            return;
        }
        tokio::time::sleep(timing.pre_spin_delay).await;

        if !inner.mutate(epoch, |s| s.slots[index].phase = SlotPhase::Spinning) {
            return;
        }
        for _ in 0..timing.tick_count() {
            tokio::time::sleep(timing.tick_interval).await;
            // Each tick is an independent uniform pick over the universe.
            let name = universe[inner.pick_index(universe.len())].to_string();
            if !inner.mutate(epoch, |s| s.slots[index].displayed_name = name) {
                return;
            }
        }

        // Stopped always shows the ground-truth winner, never a tick value.
        let final_name = winner.to_string();
        if !inner.mutate(epoch, |s| {
            let slot = &mut s.slots[index];
            slot.phase = SlotPhase::Stopped;
            slot.displayed_name = final_name;
        }) {
            return;
        }
        tokio::time::sleep(timing.post_stop_delay).await;

        if !inner.mutate(epoch, |s| s.slots[index].phase = SlotPhase::Settled) {
            return;
        }
        tracing::debug!(%session_id, rank, "slot settled");
    }

    if inner.mutate(epoch, |s| s.done = true) {
        tracing::info!(%session_id, winner_count = winners.len(), "draw session done");
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use raffle_test_support::{FixedClock, MockRng};

    use super::*;

    fn test_engine(timing: DrawTiming) -> DrawEngine {
        let clock = Arc::new(FixedClock(
            chrono::Utc.with_ymd_and_hms(2026, 8, 1, 12, 0, 0).unwrap(),
        ));
        DrawEngine::new(timing, clock, Arc::new(Mutex::new(MockRng)))
    }

    fn request(names: &[&str], winner_count: usize) -> DrawRequest {
        DrawRequest {
            universe: names.iter().copied().map(Participant::from).collect(),
            winner_count,
        }
    }

    /// With `MockRng` every shuffle swap targets index 0, so the shuffle of
    /// `[a, b, c, d]` is `[b, c, d, a]` and two winners are `b` then `c`.
    const MOCK_WINNERS: [&str; 2] = ["b", "c"];

    async fn run_to_done(
        rx: &mut watch::Receiver<Option<SessionSnapshot>>,
    ) -> Vec<SessionSnapshot> {
        let mut seen = Vec::new();
        loop {
            rx.changed().await.unwrap();
            let snapshot = rx.borrow().clone().unwrap();
            let done = snapshot.done;
            seen.push(snapshot);
            if done {
                return seen;
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_full_session_settles_on_selected_winners() {
        let engine = test_engine(DrawTiming::default());
        let mut rx = engine.subscribe();

        let initial = engine
            .start_session(request(&["a", "b", "c", "d"], 2))
            .unwrap();
        assert!(!initial.done);
        assert!(initial.slots.is_empty());
        assert!(initial.winners.is_none());

        let seen = run_to_done(&mut rx).await;
        let last = seen.last().unwrap();
        assert!(last.done);
        assert_eq!(last.slots.len(), 2);
        for (slot, expected) in last.slots.iter().zip(MOCK_WINNERS) {
            assert_eq!(slot.phase, SlotPhase::Settled);
            assert_eq!(slot.displayed_name, expected);
        }
        assert_eq!(
            last.winners.as_deref().unwrap(),
            &[Participant::from("b"), Participant::from("c")]
        );
        assert_eq!(engine.winners().unwrap().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_later_slot_waits_for_earlier_slot_to_settle() {
        let engine = test_engine(DrawTiming::default());
        let mut rx = engine.subscribe();
        engine
            .start_session(request(&["a", "b", "c", "d"], 3))
            .unwrap();

        for snapshot in run_to_done(&mut rx).await {
            // Only the last slot may be mid-reveal; every earlier slot must
            // already be settled.
            for slot in snapshot.slots.iter().rev().skip(1) {
                assert_eq!(
                    slot.phase,
                    SlotPhase::Settled,
                    "slot {} active while a later slot exists",
                    slot.rank
                );
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_stopped_slot_shows_true_winner() {
        let engine = test_engine(DrawTiming::default());
        let mut rx = engine.subscribe();
        engine
            .start_session(request(&["a", "b", "c", "d"], 2))
            .unwrap();

        let mut stopped_observed = 0;
        for snapshot in run_to_done(&mut rx).await {
            for slot in &snapshot.slots {
                if matches!(slot.phase, SlotPhase::Stopped | SlotPhase::Settled) {
                    assert_eq!(slot.displayed_name, MOCK_WINNERS[slot.rank as usize - 1]);
                    if slot.phase == SlotPhase::Stopped {
                        stopped_observed += 1;
                    }
                }
            }
        }
        assert!(stopped_observed > 0, "never observed a Stopped slot");
    }

    #[tokio::test(start_paused = true)]
    async fn test_settled_slot_name_never_changes() {
        let engine = test_engine(DrawTiming::default());
        let mut rx = engine.subscribe();
        engine
            .start_session(request(&["a", "b", "c", "d"], 2))
            .unwrap();

        let mut settled_names: Vec<Option<String>> = vec![None; 2];
        for snapshot in run_to_done(&mut rx).await {
            for slot in &snapshot.slots {
                if slot.phase == SlotPhase::Settled {
                    let seen = &mut settled_names[slot.rank as usize - 1];
                    match seen {
                        None => *seen = Some(slot.displayed_name.clone()),
                        Some(name) => assert_eq!(name, &slot.displayed_name),
                    }
                }
            }
        }
        assert!(settled_names.iter().all(Option::is_some));
    }

    #[tokio::test(start_paused = true)]
    async fn test_validation_failure_leaves_prior_session_untouched() {
        let engine = test_engine(DrawTiming::fast());
        let mut rx = engine.subscribe();
        let first = engine.start_session(request(&["a", "b"], 1)).unwrap();
        run_to_done(&mut rx).await;

        let err = engine
            .start_session(request(&["a", "b"], 0))
            .unwrap_err();
        assert_eq!(err, SelectionError::NonPositiveCount);

        let current = engine.snapshot().unwrap();
        assert_eq!(current.session_id, first.session_id);
        assert!(current.done);
        assert!(engine.winners().is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_redraw_supersedes_spinning_session() {
        let engine = test_engine(DrawTiming::default());
        let mut rx = engine.subscribe();
        let first = engine
            .start_session(request(&["a", "b", "c", "d"], 2))
            .unwrap();

        // Let the first session get mid-spin before redrawing.
        loop {
            rx.changed().await.unwrap();
            let snapshot = rx.borrow().clone().unwrap();
            if snapshot
                .slots
                .first()
                .is_some_and(|slot| slot.phase == SlotPhase::Spinning)
            {
                break;
            }
        }

        let second = engine
            .start_session(request(&["a", "b", "c", "d"], 2))
            .unwrap();
        assert_ne!(second.session_id, first.session_id);

        // From the redraw onward, no update may carry the superseded
        // session: stale ticks must never reach the new slot states.
        let mut rx = engine.subscribe();
        let seen = run_to_done(&mut rx).await;
        for snapshot in &seen {
            assert_eq!(snapshot.session_id, second.session_id);
        }

        let last = seen.last().unwrap();
        assert_eq!(last.slots.len(), 2);
        for (slot, expected) in last.slots.iter().zip(MOCK_WINNERS) {
            assert_eq!(slot.phase, SlotPhase::Settled);
            assert_eq!(slot.displayed_name, expected);
        }
    }

    #[tokio::test]
    async fn test_no_snapshot_before_first_session() {
        let engine = test_engine(DrawTiming::fast());
        assert!(engine.snapshot().is_none());
        assert!(engine.winners().is_none());
        assert!(engine.subscribe().borrow().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_winners_hidden_while_running() {
        let engine = test_engine(DrawTiming::default());
        let mut rx = engine.subscribe();
        engine.start_session(request(&["a", "b", "c"], 1)).unwrap();

        loop {
            rx.changed().await.unwrap();
            let snapshot = rx.borrow().clone().unwrap();
            if snapshot.done {
                assert!(snapshot.winners.is_some());
                break;
            }
            assert!(snapshot.winners.is_none());
            assert!(engine.winners().is_none());
        }
    }
}
