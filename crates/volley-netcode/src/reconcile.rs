//! Snapshot reconciliation
//!
//! When an authoritative snapshot arrives (behind the local clock), the
//! reconciler rewinds to it and replays the locally recorded directives
//! forward, producing the state the simulation would be in had it run from
//! the authority's view without interruption.

use crate::InputLog;
use volley_core::{GameState, Player, Simulation, Vec2};

/// Result of offering a snapshot to the reconciler
#[derive(Debug)]
pub enum ReconcileStatus {
    /// The snapshot was applied; the outcome replaces the local state
    Applied(ReconcileOutcome),
    /// Snapshot tick is ahead of the local clock; ignored
    Stale,
    /// Snapshot at exactly the last reconciled tick; ignored
    ///
    /// Re-applying it would advance the state one extra step, since the
    /// inclusive replay always lands one past the local clock.
    Duplicate,
    /// Snapshot is older than one already reconciled; rejected
    OutOfOrder,
}

/// A reconciled, caught-up state plus what the caller needs for rendering
#[derive(Debug)]
pub struct ReconcileOutcome {
    /// The corrected state; becomes the new canonical local state
    pub state: GameState,
    /// Whether the local paddle's predicted position had to be snapped
    pub local_snapped: bool,
    /// Opponent paddle position at each replayed tick, oldest first
    ///
    /// Lets the renderer play the opponent's movement back smoothly
    /// instead of snapping it to the final position.
    pub opponent_replay: Vec<(u64, Vec2)>,
}

/// Rewinds to authoritative snapshots and replays recorded inputs
///
/// Remembers the last applied snapshot tick so that snapshots arriving out
/// of order within one peer's stream are rejected explicitly instead of
/// silently rolling the game backwards.
#[derive(Debug, Default)]
pub struct Reconciler {
    last_snapshot_tick: Option<u64>,
}

impl Reconciler {
    pub fn new() -> Self {
        Self::default()
    }

    /// The tick of the last applied snapshot
    pub fn last_snapshot_tick(&self) -> Option<u64> {
        self.last_snapshot_tick
    }

    /// Reconcile the local state against an authoritative snapshot
    ///
    /// The snapshot is consumed: it is mutated into the caught-up state and
    /// returned inside the outcome. Connectivity flags already inside it
    /// are trusted as-is, they always come from the authority.
    ///
    /// For each tick from the snapshot's to the local clock inclusive, every
    /// recorded directive for that tick (either player) is applied, then the
    /// simulation steps. The produced state has therefore executed one more
    /// step than `local`; callers treat it as this frame's step.
    pub fn reconcile(
        &mut self,
        sim: &Simulation,
        local: &GameState,
        mut snapshot: GameState,
        log: &InputLog,
        local_player: Player,
    ) -> ReconcileStatus {
        if snapshot.tick > local.tick {
            log::debug!(
                "ignoring stale snapshot: snapshot tick {} ahead of local tick {}",
                snapshot.tick,
                local.tick
            );
            return ReconcileStatus::Stale;
        }

        if let Some(last) = self.last_snapshot_tick {
            if snapshot.tick == last {
                log::debug!("ignoring duplicate snapshot at tick {}", snapshot.tick);
                return ReconcileStatus::Duplicate;
            }
            if snapshot.tick < last {
                log::warn!(
                    "rejecting out-of-order snapshot: tick {} after already reconciling tick {}",
                    snapshot.tick,
                    last
                );
                return ReconcileStatus::OutOfOrder;
            }
        }

        let snapshot_tick = snapshot.tick;
        let opponent = local_player.opponent();
        let mut opponent_replay = Vec::with_capacity((local.tick - snapshot_tick + 1) as usize);

        for tick in snapshot_tick..=local.tick {
            for record in log.inputs_for_tick(tick) {
                sim.apply_directive(&mut snapshot, record.player, record.paddle);
            }
            opponent_replay.push((tick, snapshot.paddle(opponent)));
            sim.step(&mut snapshot);
        }

        let predicted = local.paddle(local_player);
        let reconciled = snapshot.paddle(local_player);
        let local_snapped = predicted != reconciled;
        if local_snapped {
            log::debug!(
                "local paddle snapped from predicted ({}, {}) to reconciled ({}, {})",
                predicted.x,
                predicted.y,
                reconciled.x,
                reconciled.y
            );
        }

        self.last_snapshot_tick = Some(snapshot_tick);

        ReconcileStatus::Applied(ReconcileOutcome {
            state: snapshot,
            local_snapped,
            opponent_replay,
        })
    }
}
