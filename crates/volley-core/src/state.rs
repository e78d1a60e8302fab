//! Game state: the authoritative/predicted simulation snapshot
//!
//! `GameState` is a plain value. The simulation loop owns the canonical
//! instance; a copy received over the wire is an immutable input consumed
//! once by reconciliation and then discarded. It never aliases the
//! canonical state.

use crate::{GameConfig, GameRng};
use serde::{Deserialize, Serialize};

/// Plain position value
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// One of the two players
///
/// Serialized as `1` / `2` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Player {
    One,
    Two,
}

impl Player {
    /// The other player
    pub fn opponent(self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }
}

impl From<Player> for u8 {
    fn from(player: Player) -> u8 {
        match player {
            Player::One => 1,
            Player::Two => 2,
        }
    }
}

impl TryFrom<u8> for Player {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Player::One),
            2 => Ok(Player::Two),
            other => Err(format!("invalid player number: {other}")),
        }
    }
}

/// A local paddle input event, before it becomes an absolute directive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveDir {
    Left,
    Right,
}

/// Shuffled pool of pre-rolled bounce angles
///
/// Angles are consumed sequentially; when the cursor runs off the end the
/// pool is re-rolled and re-shuffled from the embedded RNG and the cursor
/// resets. The pool rides inside `GameState` so a snapshot carries its own
/// future draws and replay stays reproducible.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnglePool {
    angles: Vec<i32>,
    cursor: usize,
    size: usize,
    min: i32,
    max: i32,
    rng: GameRng,
}

impl AnglePool {
    /// Create an empty pool; the first `draw` fills it
    pub fn new(size: usize, min: i32, max: i32, seed: u64) -> Self {
        Self {
            angles: Vec::new(),
            cursor: 0,
            size,
            min,
            max,
            rng: GameRng::new(seed),
        }
    }

    /// Draw the next angle, refilling and reshuffling when exhausted
    pub fn draw(&mut self) -> i32 {
        if self.angles.is_empty() || self.cursor >= self.size {
            self.refill();
        }
        let angle = self.angles[self.cursor];
        self.cursor += 1;
        angle
    }

    fn refill(&mut self) {
        self.angles = (0..self.size)
            .map(|_| self.rng.range_i32(self.min, self.max))
            .collect();
        self.rng.shuffle(&mut self.angles);
        self.cursor = 0;
    }

    /// Position of the next draw within the current pool
    pub fn cursor(&self) -> usize {
        self.cursor
    }
}

/// The authoritative/predicted simulation snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    /// Ball position
    pub ball: Vec2,
    /// Where the ball last changed direction
    pub last_bounce: Vec2,
    /// Player 1's paddle, on the lower goal line
    pub paddle1: Vec2,
    /// Player 2's paddle, on the upper goal line
    pub paddle2: Vec2,
    /// Monotonic simulation tick, starts at 0
    pub tick: u64,
    /// Current ball speed
    pub speed: f32,
    /// Current bounce angle in degrees; re-drawn only on paddle collision
    pub bounce_angle: i32,
    /// Pool the bounce angle is drawn from
    pub angle_pool: AnglePool,
    /// Ball travel quadrant: moving toward the upper goal line
    pub up: bool,
    /// Ball travel quadrant: moving toward the right wall
    pub right: bool,
    /// Frozen after a goal until `goal_unpause_tick` passes
    pub is_goal_pause: bool,
    /// First tick the ball is allowed to move again after a goal
    pub goal_unpause_tick: u64,
    pub player1_score: u32,
    pub player2_score: u32,
    pub has_started: bool,
    pub game_over: bool,
    pub paused: bool,
    pub player1_connected: bool,
    pub player2_connected: bool,
    pub winner: Option<Player>,
}

impl GameState {
    /// Create a freshly-served state: paddles centered on their goal lines,
    /// ball on player 1's line, travel up-right at the starting angle
    pub fn new(config: &GameConfig, seed: u64) -> Self {
        let center_x = config.higher_bound_x / 2.0;
        let start = Vec2::new(center_x, config.lower_bound_y);
        Self {
            ball: start,
            last_bounce: start,
            paddle1: Vec2::new(center_x, config.lower_bound_y),
            paddle2: Vec2::new(center_x, config.higher_bound_y),
            tick: 0,
            speed: config.start_speed,
            bounce_angle: config.start_angle,
            angle_pool: AnglePool::new(
                config.angle_pool_size,
                config.angle_min,
                config.angle_max,
                seed,
            ),
            up: true,
            right: true,
            is_goal_pause: false,
            goal_unpause_tick: 0,
            player1_score: 0,
            player2_score: 0,
            has_started: false,
            game_over: false,
            paused: false,
            player1_connected: false,
            player2_connected: false,
            winner: None,
        }
    }

    /// Get a player's paddle position
    pub fn paddle(&self, player: Player) -> Vec2 {
        match player {
            Player::One => self.paddle1,
            Player::Two => self.paddle2,
        }
    }

    /// Get a mutable reference to a player's paddle
    pub fn paddle_mut(&mut self, player: Player) -> &mut Vec2 {
        match player {
            Player::One => &mut self.paddle1,
            Player::Two => &mut self.paddle2,
        }
    }

    /// Get a player's score
    pub fn score(&self, player: Player) -> u32 {
        match player {
            Player::One => self.player1_score,
            Player::Two => self.player2_score,
        }
    }

    /// Increment a player's score
    pub fn add_score(&mut self, player: Player) {
        match player {
            Player::One => self.player1_score += 1,
            Player::Two => self.player2_score += 1,
        }
    }

    /// Whether a player's connectivity flag is set
    pub fn is_connected(&self, player: Player) -> bool {
        match player {
            Player::One => self.player1_connected,
            Player::Two => self.player2_connected,
        }
    }
}
