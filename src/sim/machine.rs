//! Match state machine
//!
//! `MatchContext` owns every piece of mutable match state. The platform layer
//! feeds it operator commands and frame timestamps; it decides which of the
//! countdown, opponent, input and physics components run, and hands back the
//! events each frame produced.
//!
//! ```text
//! Welcome --start--> Countdown --expire--> Playing --pause--> Paused
//!                        ^                  |  |                 |
//!                        +--point scored----+  +--match won--> GameOver
//!                        +--------------------resume-------------+
//!                        +--------------------play again------ GameOver
//! any --exit--> Welcome
//! ```

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::clock::LoopDriver;
use super::countdown::{Countdown, CountdownSignal};
use super::input::{self, InputState, Key};
use super::opponent;
use super::physics;
use super::state::{
    Ball, Board, Difficulty, GameEvent, MatchState, Paddle, Score, ServeDirection, Side,
};
use crate::GameError;
use crate::consts::{DEFAULT_PLAYER_NAME, GAME_OVER_REVEAL_MS, OPPONENT_NAME};

/// Operator commands, used for reporting rejected transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Start,
    Pause,
    Resume,
    PlayAgain,
}

/// Direction of the ball after a point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServeMode {
    /// Both axes random
    #[default]
    Random,
    /// Ball heads at the side that just scored
    TowardScorer,
}

/// Read-only copy of everything a renderer or HUD needs
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub board: Board,
    pub ball: Ball,
    pub player: Paddle,
    pub opponent: Paddle,
    pub score: Score,
    pub state: MatchState,
    pub countdown_value: Option<i32>,
    pub player_name: String,
    pub high_score: u32,
    pub difficulty: Difficulty,
    /// Game-over overlay is due (a short beat after the winning point)
    pub show_game_over: bool,
}

impl Snapshot {
    pub fn side_name(&self, side: Side) -> &str {
        match side {
            Side::Player => self.player_name.as_str(),
            Side::Opponent => OPPONENT_NAME,
        }
    }

    /// "<name> Wins!" once the match is decided
    pub fn winner_banner(&self) -> Option<String> {
        match self.state {
            MatchState::GameOver { winner } => Some(format!("{} Wins!", self.side_name(winner))),
            _ => None,
        }
    }

    /// Big centre text during the lead-in
    pub fn countdown_label(&self) -> Option<String> {
        self.countdown_value.map(|v| match v {
            0 => "GO!".to_string(),
            v => v.to_string(),
        })
    }

    pub fn score_label(&self, side: Side) -> String {
        format!("{}: {}", self.side_name(side), self.score.get(side))
    }
}

/// All match state, single instance for the session
#[derive(Debug, Clone)]
pub struct MatchContext {
    board: Board,
    ball: Ball,
    player: Paddle,
    opponent: Paddle,
    score: Score,
    difficulty: Difficulty,
    serve_mode: ServeMode,
    player_name: String,
    high_score: u32,
    state: MatchState,
    countdown: Countdown,
    driver: LoopDriver,
    input: InputState,
    rng: Pcg32,
    /// Events raised by commands, delivered with the next update
    pending: Vec<GameEvent>,
    game_over_at: Option<f64>,
    ticks: u64,
}

impl MatchContext {
    pub fn new(board: Board, difficulty: Difficulty, seed: u64) -> Self {
        log::info!(
            "Match context ready: board {}x{}, difficulty {}, seed {}",
            board.width,
            board.height,
            difficulty.as_str(),
            seed
        );
        Self {
            ball: Ball::at_rest(&board),
            player: Paddle::new(Side::Player, &board),
            opponent: Paddle::new(Side::Opponent, &board),
            board,
            score: Score::default(),
            difficulty,
            serve_mode: ServeMode::default(),
            player_name: DEFAULT_PLAYER_NAME.to_string(),
            high_score: 0,
            state: MatchState::Welcome,
            countdown: Countdown::new(),
            driver: LoopDriver::new(),
            input: InputState::default(),
            rng: Pcg32::seed_from_u64(seed),
            pending: Vec::new(),
            game_over_at: None,
            ticks: 0,
        }
    }

    /// Seed the best score from persistence
    pub fn with_high_score(mut self, high_score: u32) -> Self {
        self.high_score = high_score;
        self
    }

    // === Accessors ===

    pub fn state(&self) -> MatchState {
        self.state
    }

    pub fn is_paused(&self) -> bool {
        self.state.is_paused()
    }

    pub fn is_counting_down(&self) -> bool {
        self.state.is_counting_down()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn ball(&self) -> &Ball {
        &self.ball
    }

    pub fn player(&self) -> &Paddle {
        &self.player
    }

    pub fn opponent(&self) -> &Paddle {
        &self.opponent
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn player_name(&self) -> &str {
        &self.player_name
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn countdown(&self) -> &Countdown {
        &self.countdown
    }

    pub fn driver(&self) -> &LoopDriver {
        &self.driver
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    /// Simulation ticks run since startup
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn set_serve_mode(&mut self, mode: ServeMode) {
        self.serve_mode = mode;
    }

    pub fn set_autopilot(&mut self, on: bool) {
        self.input.autopilot = on;
    }

    /// Replace the ball in play (debug and test hook)
    pub fn set_ball(&mut self, ball: Ball) {
        self.ball = ball;
    }

    // === Operator commands ===

    /// Welcome -> Countdown. Blank names become "Player".
    pub fn start(&mut self, name: &str, now: f64) -> Result<(), GameError> {
        if self.state != MatchState::Welcome {
            return Err(self.reject(Action::Start));
        }
        self.player_name = display_name(name);
        log::info!("Starting match for {}", self.player_name);
        self.reset_match();
        self.queue_countdown(now);
        Ok(())
    }

    /// Playing -> Paused. Ignored during the countdown.
    pub fn pause(&mut self) -> Result<(), GameError> {
        if !self.state.is_playing() {
            return Err(self.reject(Action::Pause));
        }
        self.driver.suspend();
        self.input.release_all();
        self.set_state(MatchState::Paused);
        Ok(())
    }

    /// Paused -> Countdown; the lead-in runs again before play continues
    pub fn resume(&mut self, now: f64) -> Result<(), GameError> {
        if !self.state.is_paused() {
            return Err(self.reject(Action::Resume));
        }
        self.queue_countdown(now);
        Ok(())
    }

    /// Pause button behaviour
    pub fn toggle_pause(&mut self, now: f64) -> Result<(), GameError> {
        match self.state {
            MatchState::Playing => self.pause(),
            MatchState::Paused => self.resume(now),
            _ => Err(self.reject(Action::Pause)),
        }
    }

    /// GameOver -> Countdown with a fresh 0-0 match
    pub fn play_again(&mut self, now: f64) -> Result<(), GameError> {
        if !matches!(self.state, MatchState::GameOver { .. }) {
            return Err(self.reject(Action::PlayAgain));
        }
        self.reset_match();
        self.queue_countdown(now);
        Ok(())
    }

    /// Abandon whatever is going on and return to the welcome screen
    pub fn exit(&mut self) {
        if self.countdown.cancel() {
            log::debug!("Pending countdown cancelled on exit");
        }
        self.driver.suspend();
        self.input.release_all();
        self.pending.clear();
        self.reset_match();
        self.ball = Ball::at_rest(&self.board);
        self.set_state(MatchState::Welcome);
    }

    /// Change difficulty. Mid-match this resets the score and recounts.
    pub fn set_difficulty(&mut self, difficulty: Difficulty, now: f64) {
        if self.difficulty != difficulty {
            log::info!("Difficulty set to {}", difficulty.as_str());
        }
        self.difficulty = difficulty;
        if self.state.in_match() {
            self.reset_match();
            self.queue_countdown(now);
        }
    }

    /// Window blur / tab hidden. Returns whether the match was paused.
    pub fn focus_lost(&mut self) -> bool {
        if self.state.is_playing() {
            log::info!("Auto-paused (focus lost)");
            self.pause().is_ok()
        } else {
            false
        }
    }

    /// Pointer or touch at board-space `y`; only steers while playing
    pub fn pointer_moved(&mut self, y: f32) -> bool {
        if !self.state.is_playing() {
            return false;
        }
        input::apply_pointer(&mut self.player, &self.board, y);
        true
    }

    pub fn key_down(&mut self, key: Key) {
        if self.state.is_playing() {
            self.input.key_down(key);
        }
    }

    pub fn key_up(&mut self, key: Key) {
        self.input.key_up(key);
    }

    // === Frame driving ===

    /// Run everything due at `now`: countdown timers first, then any ticks
    /// the loop driver schedules. Returns events in the order they happened.
    pub fn update(&mut self, now: f64) -> Vec<GameEvent> {
        let mut events = std::mem::take(&mut self.pending);

        for signal in self.countdown.poll(now) {
            match signal {
                CountdownSignal::Tick(0) => {
                    self.state = MatchState::Countdown { remaining: 0 };
                    events.push(GameEvent::CountdownGo);
                }
                CountdownSignal::Tick(remaining) => {
                    self.state = MatchState::Countdown { remaining };
                    events.push(GameEvent::CountdownTick(remaining));
                }
                CountdownSignal::Finished => {
                    self.set_state(MatchState::Playing);
                    self.driver.resume(now);
                }
            }
        }

        for _ in 0..self.driver.frame(now) {
            if !self.state.is_playing() {
                break;
            }
            events.extend(self.advance(now));
        }

        events
    }

    /// One physics tick. Does nothing unless the ball is in play.
    pub fn advance(&mut self, now: f64) -> Vec<GameEvent> {
        if !self.state.is_playing() {
            return Vec::new();
        }
        self.ticks += 1;

        let profile = self.difficulty.profile();
        if self.input.autopilot {
            opponent::track_ball(&mut self.player, &self.ball, &self.board, profile.opponent_speed);
        } else {
            input::apply_keys(&mut self.player, &self.board, &self.input);
        }
        opponent::track_ball(&mut self.opponent, &self.ball, &self.board, profile.opponent_speed);

        let mut events = physics::step(
            &mut self.ball,
            &self.player,
            &self.opponent,
            &self.board,
            &mut self.score,
        );

        let scorer = events.iter().find_map(|e| match e {
            GameEvent::PointScored(side) => Some(*side),
            _ => None,
        });
        if let Some(scorer) = scorer {
            self.round_over(scorer, now, &mut events);
        }

        events
    }

    pub fn snapshot(&self, now: f64) -> Snapshot {
        let countdown_value = match self.state {
            MatchState::Countdown { remaining } => Some(remaining),
            _ => None,
        };
        let show_game_over = matches!(self.state, MatchState::GameOver { .. })
            && self
                .game_over_at
                .is_some_and(|at| now - at >= GAME_OVER_REVEAL_MS);

        Snapshot {
            board: self.board,
            ball: self.ball,
            player: self.player,
            opponent: self.opponent,
            score: self.score,
            state: self.state,
            countdown_value,
            player_name: self.player_name.clone(),
            high_score: self.high_score,
            difficulty: self.difficulty,
            show_game_over,
        }
    }

    // === Internals ===

    fn round_over(&mut self, scorer: Side, now: f64, events: &mut Vec<GameEvent>) {
        log::debug!(
            "Point to {:?} ({}-{})",
            scorer,
            self.score.player,
            self.score.opponent
        );

        if scorer == Side::Player && self.score.player > self.high_score {
            self.high_score = self.score.player;
            events.push(GameEvent::HighScore(self.high_score));
        }

        match self.score.winner() {
            Some(winner) => {
                events.push(GameEvent::MatchWon(winner));
                self.driver.suspend();
                self.input.release_all();
                self.game_over_at = Some(now);
                self.set_state(MatchState::GameOver { winner });
            }
            None => {
                self.serve(Some(scorer));
                events.push(self.begin_countdown(now));
            }
        }
    }

    /// Fresh 0-0 match: scores, paddles and ball all reset
    fn reset_match(&mut self) {
        self.score = Score::default();
        self.player = Paddle::new(Side::Player, &self.board);
        self.opponent = Paddle::new(Side::Opponent, &self.board);
        self.game_over_at = None;
        self.serve(None);
    }

    fn serve(&mut self, last_scorer: Option<Side>) {
        let direction = match (self.serve_mode, last_scorer) {
            (ServeMode::TowardScorer, Some(side)) => ServeDirection::Toward(side),
            _ => ServeDirection::Random,
        };
        self.ball = Ball::serve(
            &self.board,
            self.difficulty.profile(),
            direction,
            &mut self.rng,
        );
    }

    /// Suspend physics and (re)start the lead-in. Returns the opening cue.
    fn begin_countdown(&mut self, now: f64) -> GameEvent {
        self.driver.suspend();
        let remaining = match self.countdown.start(now) {
            CountdownSignal::Tick(value) => value,
            CountdownSignal::Finished => 0,
        };
        self.set_state(MatchState::Countdown { remaining });
        GameEvent::CountdownTick(remaining)
    }

    fn queue_countdown(&mut self, now: f64) {
        let cue = self.begin_countdown(now);
        self.pending.push(cue);
    }

    fn set_state(&mut self, next: MatchState) {
        if std::mem::discriminant(&self.state) != std::mem::discriminant(&next) {
            log::info!("Match state: {:?} -> {:?}", self.state, next);
        }
        self.state = next;
    }

    fn reject(&self, action: Action) -> GameError {
        log::debug!("Ignoring {:?} while {:?}", action, self.state);
        GameError::InvalidTransition {
            action,
            state: self.state,
        }
    }
}

fn display_name(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        DEFAULT_PLAYER_NAME.to_string()
    } else {
        trimmed.to_string()
    }
}
