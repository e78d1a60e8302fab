//! The fixed-tick simulation
//!
//! `Simulation::step` advances a `GameState` by exactly one tick. It is
//! deterministic: the only randomness is the angle pool carried inside the
//! state itself, so stepping the same state with the same directives always
//! produces bit-identical results. Reconciliation relies on this.

use crate::{GameConfig, GameState, MoveDir, Player, Vec2};

/// Horizontal span of a paddle, in field units
pub const PADDLE_WIDTH: f32 = 1.0;

/// How close (in y) the ball must be to a paddle's line to bounce
pub const PADDLE_HIT_DISTANCE: f32 = 0.2;

/// How far past a goal line the ball must travel to count as a goal
pub const GOAL_DEPTH: f32 = 1.0;

/// Deterministic fixed-tick simulation over a `GameConfig`
#[derive(Debug, Clone)]
pub struct Simulation {
    config: GameConfig,
}

impl Simulation {
    pub fn new(config: GameConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Advance the state by one tick
    ///
    /// No-op while the game is over or not yet started. While a goal pause
    /// is active the ball is frozen; only the tick counter runs until the
    /// unpause tick passes and the ball is re-served.
    pub fn step(&self, state: &mut GameState) {
        if state.game_over || !state.has_started {
            return;
        }

        state.tick += 1;

        // difficulty ramp
        if state.tick % self.config.speed_interval_ticks == 0 && state.speed < self.config.max_speed
        {
            state.speed += self.config.speed_increment;
        }

        if state.is_goal_pause {
            if state.tick > state.goal_unpause_tick {
                self.serve_after_goal(state);
            }
            return;
        }

        self.move_ball(state);

        // side walls reflect in x only; top and bottom are goal lines
        if state.ball.x > self.config.higher_bound_x {
            state.right = false;
        } else if state.ball.x < self.config.lower_bound_x {
            state.right = true;
        }

        // paddle 2 first, then paddle 1, matching the original tie-break
        if (state.ball.y - state.paddle2.y).abs() <= PADDLE_HIT_DISTANCE
            && overlaps(state.paddle2.x, state.ball.x)
        {
            state.up = false;
            state.last_bounce = state.ball;
            state.bounce_angle = state.angle_pool.draw();
        } else if (state.ball.y - state.paddle1.y).abs() <= PADDLE_HIT_DISTANCE
            && overlaps(state.paddle1.x, state.ball.x)
        {
            state.up = true;
            state.last_bounce = state.ball;
            state.bounce_angle = state.angle_pool.draw();
        }

        if state.ball.y < self.config.lower_bound_y - GOAL_DEPTH {
            self.record_goal(state, Player::Two);
        } else if state.ball.y > self.config.higher_bound_y + GOAL_DEPTH {
            self.record_goal(state, Player::One);
        }
    }

    /// Apply a relative paddle move, clamped to `[0, higher_bound_x]`
    ///
    /// While the game is paused the ball is dragged along with the paddle
    /// so the serving side can aim.
    pub fn move_paddle(&self, state: &mut GameState, player: Player, dir: MoveDir) {
        if state.game_over {
            return;
        }

        let speed = self.config.paddle_speed;
        let paddle = state.paddle_mut(player);
        match dir {
            MoveDir::Left => paddle.x -= speed,
            MoveDir::Right => paddle.x += speed,
        }
        paddle.x = paddle.x.clamp(0.0, self.config.higher_bound_x);

        if state.paused {
            let x = state.paddle(player).x;
            self.manually_move_ball(state, x);
        }
    }

    /// Place a paddle at an absolute position, clamped to `[0, higher_bound_x]`
    ///
    /// This is the single entry point for directives from the wire and from
    /// replay, dispatched by player number.
    pub fn apply_directive(&self, state: &mut GameState, player: Player, target: Vec2) {
        if state.game_over {
            return;
        }
        let paddle = state.paddle_mut(player);
        paddle.x = target.x.clamp(0.0, self.config.higher_bound_x);
        paddle.y = target.y;
    }

    /// Step a computer-controlled paddle one move toward the ball's x
    ///
    /// Single-player opponent: chases the ball, never leads it. Uses the
    /// same clamped `move_paddle` path as a human directive.
    pub fn track_ball(&self, state: &mut GameState, player: Player) {
        let paddle_x = state.paddle(player).x;
        if state.ball.x > paddle_x {
            self.move_paddle(state, player, MoveDir::Right);
        } else if state.ball.x < paddle_x {
            self.move_paddle(state, player, MoveDir::Left);
        }
    }

    /// Reposition the ball in x without simulating
    pub fn manually_move_ball(&self, state: &mut GameState, x: f32) {
        if state.game_over {
            return;
        }
        state.ball.x = x;
        state.last_bounce.x = x;
    }

    fn move_ball(&self, state: &mut GameState) {
        let angle = (state.bounce_angle as f32).to_radians();
        let speed = state.speed;
        match (state.up, state.right) {
            (true, true) => {
                state.ball.x += angle.cos() * speed;
                state.ball.y += angle.sin() * speed;
            }
            (true, false) => {
                state.ball.x -= angle.sin() * speed;
                state.ball.y += angle.cos() * speed;
            }
            (false, true) => {
                state.ball.x += angle.cos() * speed;
                state.ball.y -= angle.sin() * speed;
            }
            (false, false) => {
                state.ball.x -= angle.sin() * speed;
                state.ball.y -= angle.cos() * speed;
            }
        }
    }

    fn record_goal(&self, state: &mut GameState, scorer: Player) {
        state.is_goal_pause = true;
        state.goal_unpause_tick = state.tick + self.config.goal_pause_ticks();
        state.add_score(scorer);

        if let Some(win_score) = self.config.win_score {
            if state.score(scorer) >= win_score {
                state.game_over = true;
                state.winner = Some(scorer);
            }
        }
    }

    fn serve_after_goal(&self, state: &mut GameState) {
        state.is_goal_pause = false;
        state.speed = self.config.start_speed;

        // the side that conceded serves from its own goal line
        if state.ball.y < self.config.lower_bound_y {
            state.ball = Vec2::new(state.paddle1.x, self.config.lower_bound_y);
            state.up = true;
            state.right = true;
        } else if state.ball.y > self.config.higher_bound_y {
            state.ball = Vec2::new(state.paddle2.x, self.config.higher_bound_y);
            state.up = false;
            state.right = false;
        }
        state.last_bounce = state.ball;
    }
}

/// Inclusive 1-unit span overlap between a paddle and the ball
///
/// A ball at exactly `paddle_x + PADDLE_WIDTH` still collides.
pub fn overlaps(paddle_x: f32, ball_x: f32) -> bool {
    (ball_x >= paddle_x && ball_x <= paddle_x + PADDLE_WIDTH)
        || (ball_x + PADDLE_WIDTH >= paddle_x && ball_x + PADDLE_WIDTH <= paddle_x + PADDLE_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GameConfig;

    fn started_state(sim: &Simulation, seed: u64) -> GameState {
        let mut state = GameState::new(sim.config(), seed);
        state.has_started = true;
        state
    }

    #[test]
    fn test_step_is_noop_before_start() {
        let sim = Simulation::new(GameConfig::default());
        let mut state = GameState::new(sim.config(), 1);

        sim.step(&mut state);
        assert_eq!(state.tick, 0);
    }

    #[test]
    fn test_determinism() {
        let sim = Simulation::new(GameConfig::default());
        let mut a = started_state(&sim, 42);
        let mut b = started_state(&sim, 42);

        for i in 0..500 {
            if i % 3 == 0 {
                sim.move_paddle(&mut a, Player::One, MoveDir::Right);
                sim.move_paddle(&mut b, Player::One, MoveDir::Right);
            }
            sim.step(&mut a);
            sim.step(&mut b);
        }

        assert_eq!(a, b);
    }

    #[test]
    fn test_paddle_clamped_to_bounds() {
        let sim = Simulation::new(GameConfig::default());
        let mut state = started_state(&sim, 1);

        for _ in 0..200 {
            sim.move_paddle(&mut state, Player::One, MoveDir::Left);
            assert!(state.paddle1.x >= 0.0);
        }
        assert_eq!(state.paddle1.x, 0.0);

        for _ in 0..200 {
            sim.move_paddle(&mut state, Player::One, MoveDir::Right);
            assert!(state.paddle1.x <= sim.config().higher_bound_x);
        }
        assert_eq!(state.paddle1.x, sim.config().higher_bound_x);
    }

    #[test]
    fn test_directive_clamped_to_bounds() {
        let sim = Simulation::new(GameConfig::default());
        let mut state = started_state(&sim, 1);

        sim.apply_directive(&mut state, Player::Two, Vec2::new(99.0, 7.0));
        assert_eq!(state.paddle2.x, sim.config().higher_bound_x);

        sim.apply_directive(&mut state, Player::Two, Vec2::new(-3.0, 7.0));
        assert_eq!(state.paddle2.x, 0.0);
    }

    #[test]
    fn test_collision_boundary_is_inclusive() {
        // ball exactly one paddle-width to the right still counts
        assert!(overlaps(2.0, 3.0));
        assert!(overlaps(2.0, 2.0));
        assert!(overlaps(2.0, 1.5));
        assert!(!overlaps(2.0, 3.1));
        assert!(!overlaps(2.0, 0.9));
    }

    #[test]
    fn test_paddle2_collision_flips_direction_and_draws_angle() {
        let sim = Simulation::new(GameConfig::default());
        let mut state = started_state(&sim, 42);
        state.paddle1.x = 2.0;
        state.paddle2 = Vec2::new(2.0, 7.0);
        state.ball = Vec2::new(2.0, 6.85);
        state.up = true;
        state.right = true;

        let cursor_before = state.angle_pool.cursor();
        sim.step(&mut state);

        assert!(!state.up, "collision with paddle 2 must send the ball down");
        assert_eq!(state.angle_pool.cursor(), cursor_before + 1);
        assert_eq!(state.last_bounce, state.ball);
    }

    #[test]
    fn test_bounce_angle_never_changes_mid_flight() {
        let sim = Simulation::new(GameConfig::default());
        let mut state = started_state(&sim, 42);
        // ball mid-field, far from both paddles
        state.ball = Vec2::new(2.0, 3.5);
        let angle = state.bounce_angle;

        for _ in 0..5 {
            sim.step(&mut state);
        }
        assert_eq!(state.bounce_angle, angle);
    }

    #[test]
    fn test_wall_bounce_flips_right_only() {
        let sim = Simulation::new(GameConfig::default());
        let mut state = started_state(&sim, 42);
        state.ball = Vec2::new(3.99, 3.5);
        state.up = true;
        state.right = true;

        while state.right {
            sim.step(&mut state);
        }
        assert!(state.ball.x > 3.9);
        assert!(state.up, "side walls must not change vertical travel");
    }

    #[test]
    fn test_goal_scores_and_pauses() {
        let sim = Simulation::new(GameConfig::default());
        let mut state = started_state(&sim, 42);
        state.ball = Vec2::new(2.0, -0.99);
        state.up = false;
        state.right = true;

        sim.step(&mut state);

        assert!(state.is_goal_pause);
        assert_eq!(state.player2_score, 1);
        assert_eq!(state.goal_unpause_tick, state.tick + 120);
    }

    #[test]
    fn test_goal_pause_freezes_ball_for_exactly_fps_x2_ticks() {
        let sim = Simulation::new(GameConfig::default());
        let mut state = started_state(&sim, 42);
        state.ball = Vec2::new(2.0, -0.99);
        state.up = false;
        state.right = true;

        sim.step(&mut state);
        assert!(state.is_goal_pause);
        let frozen_at = state.ball;

        // frozen for the full pause window
        for _ in 0..120 {
            sim.step(&mut state);
            assert_eq!(state.ball, frozen_at);
            assert!(state.is_goal_pause);
        }

        // the very next tick re-serves from player 1's goal line
        sim.step(&mut state);
        assert!(!state.is_goal_pause);
        assert_eq!(state.ball, Vec2::new(state.paddle1.x, 0.0));
        assert_eq!(state.speed, sim.config().start_speed);
        assert!(state.up);
        assert!(state.right);
    }

    #[test]
    fn test_speed_ramps_and_caps() {
        let sim = Simulation::new(GameConfig::default());
        let mut state = started_state(&sim, 42);
        // park the ball far from walls and goals by keeping it paused
        state.is_goal_pause = true;
        state.goal_unpause_tick = u64::MAX;

        sim.step(&mut state);
        let initial = state.speed;
        for _ in 0..99 {
            sim.step(&mut state);
        }
        assert!(state.speed > initial);

        for _ in 0..10_000 {
            sim.step(&mut state);
        }
        assert!(state.speed <= sim.config().max_speed + 1e-4);
    }

    #[test]
    fn test_win_score_sets_game_over() {
        let config = GameConfig {
            win_score: Some(1),
            ..GameConfig::default()
        };
        let sim = Simulation::new(config);
        let mut state = started_state(&sim, 42);
        state.ball = Vec2::new(2.0, 7.99);
        state.up = true;
        state.right = true;

        // next step pushes the ball past the goal depth
        sim.step(&mut state);

        assert!(state.game_over);
        assert_eq!(state.winner, Some(Player::One));
        assert_eq!(state.player1_score, 1);
    }

    #[test]
    fn test_track_ball_chases_without_overshooting_far() {
        let sim = Simulation::new(GameConfig::default());
        let mut state = started_state(&sim, 42);
        state.ball = Vec2::new(3.5, 3.5);
        state.paddle2.x = 1.0;

        for _ in 0..50 {
            sim.track_ball(&mut state, Player::Two);
        }
        // converges to within one move of the ball and then oscillates
        assert!((state.paddle2.x - 3.5).abs() <= sim.config().paddle_speed + 1e-6);
    }

    #[test]
    fn test_track_ball_holds_when_aligned() {
        let sim = Simulation::new(GameConfig::default());
        let mut state = started_state(&sim, 42);
        state.ball = Vec2::new(2.0, 3.5);
        state.paddle2.x = 2.0;

        sim.track_ball(&mut state, Player::Two);
        assert_eq!(state.paddle2.x, 2.0);
    }

    #[test]
    fn test_paused_paddle_drags_ball() {
        let sim = Simulation::new(GameConfig::default());
        let mut state = started_state(&sim, 42);
        state.paused = true;

        sim.move_paddle(&mut state, Player::One, MoveDir::Right);
        assert_eq!(state.ball.x, state.paddle1.x);
    }
}
