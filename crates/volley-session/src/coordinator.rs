//! The client session
//!
//! Drives the whole lifecycle over one connection: handshake, match start,
//! the fixed-tick prediction loop, the periodic paddle-push / state-pull
//! cadence, and snapshot reconciliation.

use crate::{Connection, Error, Result};
use log::{debug, info, warn};
use std::collections::VecDeque;
use volley_core::{GameConfig, GameState, MoveDir, Player, Simulation, Vec2};
use volley_netcode::{InputLog, InputRecord, ReconcileStatus, Reconciler};
use volley_protocol::Message;

/// Where the session stands in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No usable connection
    Disconnected,
    /// Connect request sent, waiting for a game assignment
    AwaitingConnectResponse,
    /// Assigned to a game, waiting for the opponent
    Connected,
    /// Start requested, waiting for the authority to begin the match
    Starting,
    /// Match in progress, simulation ticking
    Running,
    /// Somebody won
    GameOver,
}

/// Client-side session driver
///
/// Owns the predicted [`GameState`], the input log feeding reconciliation,
/// and the connection. Call [`advance`](Self::advance) once per rendered
/// frame with the elapsed time; it never blocks.
pub struct SessionCoordinator<C: Connection> {
    sim: Simulation,
    conn: C,
    device_id: String,
    seed: u64,
    state: SessionState,
    game_id: Option<String>,
    player: Option<Player>,
    game: Option<GameState>,
    input_log: InputLog,
    reconciler: Reconciler,
    start_message_sent: bool,
    poll_cooldown: f32,
    opponent_replay: VecDeque<(u64, Vec2)>,
}

impl<C: Connection> SessionCoordinator<C> {
    pub fn new(config: GameConfig, conn: C, device_id: impl Into<String>, seed: u64) -> Self {
        Self {
            sim: Simulation::new(config),
            conn,
            device_id: device_id.into(),
            seed,
            state: SessionState::Disconnected,
            game_id: None,
            player: None,
            game: None,
            input_log: InputLog::new(),
            reconciler: Reconciler::new(),
            start_message_sent: false,
            poll_cooldown: 0.0,
            opponent_replay: VecDeque::new(),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// The predicted game state, once a game has been assigned
    pub fn game(&self) -> Option<&GameState> {
        self.game.as_ref()
    }

    pub fn player(&self) -> Option<Player> {
        self.player
    }

    pub fn game_id(&self) -> Option<&str> {
        self.game_id.as_deref()
    }

    pub fn connection_mut(&mut self) -> &mut C {
        &mut self.conn
    }

    /// Begin the handshake
    pub fn connect(&mut self) -> Result<()> {
        let frame = volley_protocol::encode(&Message::ConnectRequest {
            device_id: self.device_id.clone(),
        })
        .map_err(Error::Protocol)?;
        self.conn.send(frame)?;
        self.state = SessionState::AwaitingConnectResponse;
        info!("connect request sent for device {}", self.device_id);
        Ok(())
    }

    /// Drive the session forward by one frame
    ///
    /// Drains incoming messages, steps the simulation if the match is
    /// running, and emits the periodic paddle-push / state-pull pair. A
    /// frame on which a snapshot was reconciled does not step again: the
    /// reconciled state already includes this frame's step.
    pub fn advance(&mut self, dt: f32) {
        let reconciled = self.pump();

        if self.state == SessionState::Running && !reconciled {
            if let Some(game) = self.game.as_mut() {
                self.sim.step(game);
                if game.game_over {
                    info!("game over, winner: {:?}", game.winner);
                    self.state = SessionState::GameOver;
                }
            }
        }

        self.run_cadence(dt);
    }

    /// Apply a local move directive and remember it for replay
    pub fn local_input(&mut self, dir: MoveDir) {
        let (Some(player), Some(game_id)) = (self.player, self.game_id.clone()) else {
            return;
        };
        let Some(game) = self.game.as_mut() else {
            return;
        };
        self.sim.move_paddle(game, player, dir);
        let record = InputRecord::new(game.tick, player, game_id, game.paddle(player));
        if let Err(err) = self.input_log.record(record) {
            warn!("dropping input: {err}");
        }
    }

    /// Opponent paddle positions replayed by the last reconciliation,
    /// oldest first. Draining them lets a renderer animate the opponent
    /// through the corrected path instead of snapping.
    pub fn take_opponent_replay(&mut self) -> Vec<(u64, Vec2)> {
        self.opponent_replay.drain(..).collect()
    }

    /// Drain and dispatch every pending message; returns whether a
    /// snapshot reconciliation replaced the local state this frame.
    fn pump(&mut self) -> bool {
        let mut reconciled = false;
        loop {
            match self.conn.poll() {
                Ok(Some(frame)) => match volley_protocol::decode(&frame) {
                    Ok(message) => {
                        if self.dispatch(message) {
                            reconciled = true;
                        }
                    }
                    Err(err) => warn!("dropping malformed frame: {err}"),
                },
                Ok(None) => break,
                Err(err) => {
                    warn!("connection lost: {err}");
                    self.state = SessionState::Disconnected;
                    break;
                }
            }
        }
        reconciled
    }

    fn dispatch(&mut self, message: Message) -> bool {
        match message {
            Message::ConnectResponse {
                game_id,
                player_number,
            } => {
                info!("assigned to game {game_id} as player {player_number:?}");
                self.game_id = Some(game_id);
                self.player = Some(player_number);
                self.game = Some(GameState::new(self.sim.config(), self.seed));
                self.input_log.clear();
                self.reconciler = Reconciler::new();
                self.start_message_sent = false;
                self.state = SessionState::Connected;
                false
            }
            Message::StartGameResponse { game_id } => {
                info!("game {game_id} started");
                if let Some(game) = self.game.as_mut() {
                    game.has_started = true;
                }
                self.state = SessionState::Running;
                false
            }
            Message::PaddleMovement {
                player_number,
                paddle,
                ..
            } => {
                // only the opponent's pushes matter; our own echo back
                if Some(player_number) != self.player {
                    if let Some(game) = self.game.as_mut() {
                        self.sim.apply_directive(game, player_number, paddle);
                    }
                }
                false
            }
            Message::StateSnapshot { state } => self.handle_snapshot(state),
            Message::ConnectRequest { .. }
            | Message::StartGameRequest { .. }
            | Message::StatePullRequest { .. } => {
                debug!("ignoring server-bound message echoed to the client");
                false
            }
        }
    }

    fn handle_snapshot(&mut self, snapshot: GameState) -> bool {
        // player 1 kicks off the match once the snapshot shows both sides
        if self.player == Some(Player::One)
            && snapshot.player1_connected
            && snapshot.player2_connected
            && !snapshot.has_started
            && !self.start_message_sent
        {
            if let (Some(game_id), Some(player)) = (self.game_id.clone(), self.player) {
                self.try_send(&Message::StartGameRequest {
                    game_id,
                    player_number: player,
                });
                self.start_message_sent = true;
                self.state = SessionState::Starting;
            }
            return false;
        }

        let Some(player) = self.player else {
            return false;
        };
        let Some(game) = self.game.as_mut() else {
            return false;
        };

        let snapshot_tick = snapshot.tick;
        match self
            .reconciler
            .reconcile(&self.sim, game, snapshot, &self.input_log, player)
        {
            ReconcileStatus::Applied(outcome) => {
                *game = outcome.state;
                self.opponent_replay.extend(outcome.opponent_replay);
                self.input_log.prune_before(snapshot_tick);
                if game.game_over {
                    info!("game over confirmed by snapshot, winner: {:?}", game.winner);
                    self.state = SessionState::GameOver;
                } else if self.state == SessionState::Starting && game.has_started {
                    self.state = SessionState::Running;
                }
                true
            }
            ReconcileStatus::Stale | ReconcileStatus::Duplicate | ReconcileStatus::OutOfOrder => {
                false
            }
        }
    }

    /// Every poll interval: push our paddle, pull the authoritative state
    fn run_cadence(&mut self, dt: f32) {
        if !matches!(
            self.state,
            SessionState::Connected | SessionState::Starting | SessionState::Running
        ) {
            return;
        }
        self.poll_cooldown -= dt;
        if self.poll_cooldown > 0.0 {
            return;
        }
        self.poll_cooldown = self.sim.config().server_poll_interval_seconds;

        let (Some(game_id), Some(player)) = (self.game_id.clone(), self.player) else {
            return;
        };
        let Some((paddle, tick, started)) = self
            .game
            .as_ref()
            .map(|g| (g.paddle(player), g.tick, g.has_started))
        else {
            return;
        };

        if started {
            self.try_send(&Message::PaddleMovement {
                game_id: game_id.clone(),
                player_number: player,
                paddle,
                tick,
            });
        }
        self.try_send(&Message::StatePullRequest {
            game_id,
            client_tick: tick,
        });
    }

    fn try_send(&mut self, message: &Message) {
        let frame = match volley_protocol::encode(message) {
            Ok(frame) => frame,
            Err(err) => {
                warn!("failed to encode outbound message: {err}");
                return;
            }
        };
        if let Err(err) = self.conn.send(frame) {
            warn!("send failed, dropping connection: {err}");
            self.state = SessionState::Disconnected;
        }
    }
}
