//! Volley Netcode - Client-side prediction with server reconciliation
//!
//! The classic pattern: the client applies its own inputs immediately
//! (prediction), records them in a tick-keyed log, and when an
//! authoritative snapshot arrives behind the local clock, rewinds to the
//! snapshot and replays the log forward (reconciliation).
//!
//! ```text
//! local input ──▶ Simulation::step (prediction) ──▶ InputLog::record
//!                                                        │
//! remote snapshot (tick Ts ≤ local Tc) ──▶ Reconciler ◀──┘
//!                        │
//!                        ▼
//!       corrected state + opponent replay sequence
//! ```
//!
//! Snapshots ahead of the local clock are ignored; snapshots at or behind
//! the last reconciled tick are refused rather than silently re-applied.

mod error;
mod input_log;
mod reconcile;

pub use error::{Error, Result};
pub use input_log::{InputLog, InputRecord};
pub use reconcile::{ReconcileOutcome, ReconcileStatus, Reconciler};
