//! Raffle API — HTTP surface of the comment raffle.
//!
//! Exposed as a library so integration tests can assemble the router with
//! deterministic collaborators; the binary in `main.rs` wires the production
//! ones.

pub mod error;
pub mod routes;
pub mod state;
