//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Time comes in as caller-supplied millisecond timestamps
//! - No rendering or platform dependencies

pub mod clock;
pub mod collision;
pub mod countdown;
pub mod input;
pub mod machine;
pub mod opponent;
pub mod physics;
pub mod state;
pub mod viewport;

pub use clock::LoopDriver;
pub use collision::{PaddleContact, Wall, goal_line, paddle_contact, wall_contact};
pub use countdown::{Countdown, CountdownSignal, CountdownTask};
pub use input::{InputState, Key, apply_keys, apply_pointer, pointer_to_board_y};
pub use machine::{Action, MatchContext, ServeMode, Snapshot};
pub use opponent::track_ball;
pub use physics::step;
pub use state::{
    Ball, Board, Difficulty, DifficultyProfile, GameEvent, MatchState, Paddle, Score,
    ServeDirection, Side,
};
pub use viewport::Letterbox;
