//! Pong Rally - classic two-paddle Pong against a reactive AI
//!
//! Core modules:
//! - `sim`: Simulation core (physics, opponent, countdown, match state machine)
//! - `platform`: Collaborator contracts (notifications, presentation, persistence)
//! - `renderer`: WebGPU rendering pipeline
//! - `audio`: Procedural Web Audio cues
//! - `settings` / `highscores`: LocalStorage-backed preferences and best score

pub mod audio;
pub mod error;
pub mod highscores;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::GameError;
pub use highscores::HighScoreStore;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation rate; ball and paddle speeds are expressed per tick
    pub const TICK_HZ: f64 = 60.0;
    /// Duration of one tick in milliseconds
    pub const TICK_MS: f64 = 1000.0 / TICK_HZ;
    /// Maximum ticks run per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;
    /// Longest frame gap (ms) fed to the accumulator
    pub const MAX_FRAME_MS: f64 = 100.0;

    /// Board dimensions (logical units)
    pub const BOARD_WIDTH: f32 = 800.0;
    pub const BOARD_HEIGHT: f32 = 400.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 10.0;
    pub const PADDLE_HEIGHT: f32 = 100.0;
    /// Paddle travel per tick while an arrow key is held
    pub const KEY_PADDLE_SPEED: f32 = 8.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 10.0;
    /// Offset from paddle centre becomes the rebound's vertical speed
    pub const SPIN_FACTOR: f32 = 0.35;

    /// Opponent holds still while the ball is within this band of its centre
    pub const OPPONENT_DEADZONE: f32 = 35.0;

    /// Margin-win rule
    pub const WIN_SCORE: u32 = 3;
    pub const WIN_MARGIN: u32 = 2;

    /// Lead-in before each rally
    pub const COUNTDOWN_SECONDS: i32 = 3;
    pub const COUNTDOWN_STEP_MS: f64 = 1000.0;

    /// Delay between the winning point and the game-over overlay
    pub const GAME_OVER_REVEAL_MS: f64 = 500.0;

    pub const DEFAULT_PLAYER_NAME: &str = "Player";
    pub const OPPONENT_NAME: &str = "AI";
}
