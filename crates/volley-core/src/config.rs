//! Game configuration
//!
//! All tunables of the simulation and the session cadence live here. The
//! defaults reproduce the constants of the reference ruleset: a 4x7 field,
//! 60 ticks per second, a ball at speed 0.05 ramping to 0.2.

use serde::{Deserialize, Serialize};

/// Configuration for the simulation and session cadence
///
/// # Example
///
/// ```
/// use volley_core::GameConfig;
///
/// let config = GameConfig::default();
/// assert_eq!(config.higher_bound_x, 4.0);
/// assert_eq!(config.fps, 60);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Left edge of the field
    pub lower_bound_x: f32,
    /// Right edge of the field; paddles clamp to `[0, higher_bound_x]`
    pub higher_bound_x: f32,
    /// Player 1's goal line
    pub lower_bound_y: f32,
    /// Player 2's goal line
    pub higher_bound_y: f32,
    /// Ticks per second; also scales the goal-pause duration (`fps * 2`)
    pub fps: u32,
    /// Ball speed at the start of each rally
    pub start_speed: f32,
    /// Ball speed cap
    pub max_speed: f32,
    /// Speed added at each ramp interval
    pub speed_increment: f32,
    /// Ticks between speed ramps
    pub speed_interval_ticks: u64,
    /// Distance a paddle moves per directive
    pub paddle_speed: f32,
    /// Number of pre-rolled bounce angles in the pool
    pub angle_pool_size: usize,
    /// Inclusive lower bound of a rolled bounce angle, in degrees
    pub angle_min: i32,
    /// Exclusive upper bound of a rolled bounce angle, in degrees
    pub angle_max: i32,
    /// Bounce angle every game starts with
    pub start_angle: i32,
    /// Seconds between paddle-position pushes / state-pull requests
    pub server_poll_interval_seconds: f32,
    /// First player to reach this score wins; `None` plays forever
    pub win_score: Option<u32>,
}

impl GameConfig {
    /// Ticks the game stays frozen after a goal
    pub fn goal_pause_ticks(&self) -> u64 {
        self.fps as u64 * 2
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            lower_bound_x: 0.0,
            higher_bound_x: 4.0,
            lower_bound_y: 0.0,
            higher_bound_y: 7.0,
            fps: 60,
            start_speed: 1.0 / 20.0,
            max_speed: 0.2,
            speed_increment: 0.01,
            speed_interval_ticks: 100,
            paddle_speed: 0.1,
            angle_pool_size: 50,
            angle_min: 10,
            angle_max: 50,
            start_angle: 35,
            server_poll_interval_seconds: 0.15,
            win_score: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_reference_ruleset() {
        let config = GameConfig::default();
        assert_eq!(config.lower_bound_x, 0.0);
        assert_eq!(config.higher_bound_x, 4.0);
        assert_eq!(config.higher_bound_y, 7.0);
        assert_eq!(config.start_speed, 0.05);
        assert_eq!(config.angle_pool_size, 50);
        assert_eq!(config.win_score, None);
    }

    #[test]
    fn test_goal_pause_ticks() {
        let config = GameConfig::default();
        assert_eq!(config.goal_pause_ticks(), 120);
    }
}
