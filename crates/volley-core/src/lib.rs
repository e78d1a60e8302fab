//! Volley Core - Deterministic paddle/ball simulation
//!
//! This crate provides the state and the fixed-tick simulation for a
//! two-player networked paddle game:
//! - Plain value types (`Vec2`, `Player`, `MoveDir`)
//! - `GameConfig` with the field bounds, tick rate, and speed tunables
//! - Deterministic RNG and the shuffled bounce-angle pool
//! - `GameState`, the complete simulation snapshot
//! - `Simulation`, the pure one-tick `step`
//!
//! Determinism is the contract: stepping the same state with the same
//! directives produces bit-identical results on every client, which is what
//! makes snapshot reconciliation (`volley-netcode`) possible.

mod config;
mod rng;
mod sim;
mod state;

pub use config::GameConfig;
pub use rng::GameRng;
pub use sim::{overlaps, Simulation, GOAL_DEPTH, PADDLE_HIT_DISTANCE, PADDLE_WIDTH};
pub use state::{AnglePool, GameState, MoveDir, Player, Vec2};
