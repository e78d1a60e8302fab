//! Tick-keyed input log
//!
//! Records every paddle directive this client applied, keyed by the tick it
//! was applied on. Reconciliation replays these records forward from an
//! authoritative snapshot; the log itself never touches simulation state.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use volley_core::{Player, Vec2};

/// One recorded paddle directive
///
/// The directive shape is canonical: an absolute paddle position. Relative
/// left/right input events are resolved into a position before recording.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputRecord {
    /// The tick this directive was applied on
    pub tick: u64,
    /// Which player's paddle it moved
    pub player: Player,
    /// The game this input belongs to
    pub game_id: String,
    /// The resulting absolute paddle position
    pub paddle: Vec2,
}

impl InputRecord {
    pub fn new(tick: u64, player: Player, game_id: impl Into<String>, paddle: Vec2) -> Self {
        Self {
            tick,
            player,
            game_id: game_id.into(),
            paddle,
        }
    }
}

/// Per-tick ordered record of applied paddle directives
///
/// Records within a tick keep their recording order; ticks iterate in
/// ascending order. Optionally bounded: `record` refuses new entries once
/// the configured capacity (total records, across all ticks) is reached.
#[derive(Debug, Default)]
pub struct InputLog {
    inputs: BTreeMap<u64, Vec<InputRecord>>,
    count: usize,
    capacity: Option<usize>,
}

impl InputLog {
    /// Create an unbounded log
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a log that holds at most `capacity` records
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inputs: BTreeMap::new(),
            count: 0,
            capacity: Some(capacity),
        }
    }

    /// Append a record to its tick's sequence (creating it if absent)
    pub fn record(&mut self, record: InputRecord) -> crate::Result<()> {
        if let Some(capacity) = self.capacity {
            if self.count >= capacity {
                return Err(crate::Error::InputLogFull);
            }
        }
        self.inputs.entry(record.tick).or_default().push(record);
        self.count += 1;
        Ok(())
    }

    /// All records for a single tick, in recording order
    pub fn inputs_for_tick(&self, tick: u64) -> &[InputRecord] {
        self.inputs.get(&tick).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All records in the closed tick range, grouped by ascending tick
    pub fn replay_range(&self, from: u64, to_inclusive: u64) -> impl Iterator<Item = &InputRecord> {
        self.inputs
            .range(from..=to_inclusive)
            .flat_map(|(_, records)| records.iter())
    }

    /// Drop every tick below `tick`
    ///
    /// Called once a snapshot at `tick` has been reconciled; older inputs
    /// can never be replayed again.
    pub fn prune_before(&mut self, tick: u64) {
        let keep = self.inputs.split_off(&tick);
        let dropped: usize = self.inputs.values().map(Vec::len).sum();
        self.count -= dropped;
        self.inputs = keep;
    }

    /// Oldest and newest recorded tick
    pub fn tick_range(&self) -> Option<(u64, u64)> {
        let oldest = *self.inputs.keys().next()?;
        let newest = *self.inputs.keys().next_back()?;
        Some((oldest, newest))
    }

    /// Total number of records
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn clear(&mut self) {
        self.inputs.clear();
        self.count = 0;
    }
}
