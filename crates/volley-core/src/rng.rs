//! Deterministic random number generator
//!
//! Uses a simple xorshift64 algorithm for reproducibility across platforms.
//! The angle pool embeds one of these so a state snapshot carries its own
//! randomness and replaying from the snapshot reproduces the same draws.

use serde::{Deserialize, Serialize};

/// A deterministic random number generator
///
/// Never use `std` or OS randomness in game logic: both sides of the wire
/// must draw the same values from the same seed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRng {
    state: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u64) -> Self {
        // xorshift requires a non-zero state
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Get the current state (useful for saving/loading)
    pub fn state(&self) -> u64 {
        self.state
    }

    /// Generate the next raw u64 value
    pub fn next_u64(&mut self) -> u64 {
        // xorshift64 algorithm
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Generate a random i32 in the half-open range [min, max)
    pub fn range_i32(&mut self, min: i32, max: i32) -> i32 {
        debug_assert!(min < max);
        let span = (max - min) as u64;
        min + (self.next_u64() % span) as i32
    }

    /// Shuffle a slice in place (Fisher-Yates)
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = (self.next_u64() as usize) % (i + 1);
            slice.swap(i, j);
        }
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::new(12345)
    }
}
