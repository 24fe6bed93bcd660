//! Raffle Draw — fair selection and the sequential reveal engine.
//!
//! Two pieces, composed linearly. [`selection`] picks an ordered winner list
//! without replacement via a uniform Fisher–Yates shuffle. [`engine`] turns
//! that list into a timed, observable reveal: one slot per winner, advanced
//! Idle → Spinning → Stopped → Settled strictly in rank order, with
//! redraw cancelling the superseded session before the new one starts.

pub mod engine;
pub mod selection;
pub mod session;
pub mod timing;

pub use engine::DrawEngine;
pub use selection::{SelectionError, select};
pub use session::{DrawRequest, SessionSnapshot, SlotPhase, SlotState};
pub use timing::DrawTiming;
