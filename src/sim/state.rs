//! Match data model
//!
//! Everything the physics engine, opponent and renderer read lives here.
//! Positions are in board space: origin top-left, y grows downward.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::GameError;
use crate::consts::*;

/// Which end of the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Left paddle, driven by pointer/keys
    Player,
    /// Right paddle, driven by the AI
    Opponent,
}

impl Side {
    pub fn opposite(self) -> Self {
        match self {
            Side::Player => Side::Opponent,
            Side::Opponent => Side::Player,
        }
    }

    /// Horizontal direction pointing at this side's goal line
    pub fn goal_direction(self) -> f32 {
        match self {
            Side::Player => -1.0,
            Side::Opponent => 1.0,
        }
    }
}

/// Fixed logical playfield
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Board {
    pub width: f32,
    pub height: f32,
}

impl Default for Board {
    fn default() -> Self {
        Self {
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
        }
    }
}

impl Board {
    /// Validate geometry; the board must fit both paddles and the ball
    pub fn new(width: f32, height: f32) -> Result<Self, GameError> {
        let usable = width.is_finite()
            && height.is_finite()
            && width > 2.0 * (PADDLE_WIDTH + BALL_RADIUS)
            && height >= PADDLE_HEIGHT
            && height > 2.0 * BALL_RADIUS;
        if !usable {
            return Err(GameError::InvalidBoard { width, height });
        }
        Ok(Self { width, height })
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

/// The ball. Replaced wholesale on every serve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    /// Units per tick
    pub vel: Vec2,
    pub radius: f32,
}

/// Horizontal direction of a fresh serve
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServeDirection {
    Random,
    Toward(Side),
}

impl Ball {
    /// A motionless ball at board centre
    pub fn at_rest(board: &Board) -> Self {
        Self {
            pos: board.center(),
            vel: Vec2::ZERO,
            radius: BALL_RADIUS,
        }
    }

    /// Place a new ball at centre with a randomized velocity
    pub fn serve<R: Rng>(
        board: &Board,
        profile: DifficultyProfile,
        direction: ServeDirection,
        rng: &mut R,
    ) -> Self {
        let speed = profile.ball_initial_speed;
        let dir_x = match direction {
            ServeDirection::Random => {
                if rng.random_bool(0.5) {
                    1.0
                } else {
                    -1.0
                }
            }
            ServeDirection::Toward(side) => side.goal_direction(),
        };
        let vel_y = rng.random_range(-1.0..1.0) * speed;

        Self {
            pos: board.center(),
            vel: Vec2::new(dir_x * speed, vel_y),
            radius: BALL_RADIUS,
        }
    }

    pub fn left(&self) -> f32 {
        self.pos.x - self.radius
    }

    pub fn right(&self) -> f32 {
        self.pos.x + self.radius
    }

    pub fn top(&self) -> f32 {
        self.pos.y - self.radius
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y + self.radius
    }
}

/// A paddle. `x` is fixed per side; only `y_top` moves.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    pub side: Side,
    pub x: f32,
    pub y_top: f32,
    pub width: f32,
    pub height: f32,
}

impl Paddle {
    /// Paddle vertically centred against its edge of the board
    pub fn new(side: Side, board: &Board) -> Self {
        let x = match side {
            Side::Player => 0.0,
            Side::Opponent => board.width - PADDLE_WIDTH,
        };
        Self {
            side,
            x,
            y_top: (board.height - PADDLE_HEIGHT) / 2.0,
            width: PADDLE_WIDTH,
            height: PADDLE_HEIGHT,
        }
    }

    pub fn center_y(&self) -> f32 {
        self.y_top + self.height / 2.0
    }

    /// The x-plane the ball must cross to touch this paddle
    pub fn face_x(&self) -> f32 {
        match self.side {
            Side::Player => self.x + self.width,
            Side::Opponent => self.x,
        }
    }

    /// Lowest legal `y_top`
    pub fn max_top(&self, board: &Board) -> f32 {
        (board.height - self.height).max(0.0)
    }

    /// Set the top edge, clamped into `[0, board.height - height]`
    pub fn set_top(&mut self, y_top: f32, board: &Board) {
        let max = self.max_top(board);
        self.y_top = if y_top.is_nan() {
            self.y_top.clamp(0.0, max)
        } else {
            y_top.clamp(0.0, max)
        };
    }

    /// Centre the paddle on `y`, clamped
    pub fn center_on(&mut self, y: f32, board: &Board) {
        self.set_top(y - self.height / 2.0, board);
    }

    pub fn move_by(&mut self, dy: f32, board: &Board) {
        self.set_top(self.y_top + dy, board);
    }
}

/// Points this match
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub player: u32,
    pub opponent: u32,
}

impl Score {
    pub fn get(&self, side: Side) -> u32 {
        match side {
            Side::Player => self.player,
            Side::Opponent => self.opponent,
        }
    }

    pub fn award(&mut self, side: Side) {
        match side {
            Side::Player => self.player += 1,
            Side::Opponent => self.opponent += 1,
        }
    }

    /// Margin-win rule: at least `WIN_SCORE` points and a `WIN_MARGIN` lead
    pub fn winner(&self) -> Option<Side> {
        [Side::Player, Side::Opponent].into_iter().find(|&side| {
            let own = self.get(side);
            let other = self.get(side.opposite());
            own >= WIN_SCORE && own.saturating_sub(other) >= WIN_MARGIN
        })
    }
}

/// Speeds for a difficulty level (units per tick)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyProfile {
    pub ball_initial_speed: f32,
    pub opponent_speed: f32,
}

/// Difficulty levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" | "med" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Unknown keys fall back to medium
    pub fn parse_or_default(s: &str) -> Self {
        Self::from_str(s).unwrap_or_else(|| {
            log::warn!("Unknown difficulty {:?}, using medium", s);
            Difficulty::default()
        })
    }

    pub fn profile(&self) -> DifficultyProfile {
        let (ball_initial_speed, opponent_speed) = match self {
            Difficulty::Easy => (5.0, 3.0),
            Difficulty::Medium => (6.0, 5.0),
            Difficulty::Hard => (7.0, 7.0),
        };
        DifficultyProfile {
            ball_initial_speed,
            opponent_speed,
        }
    }
}

/// Which components may run. Single source of truth for the match.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MatchState {
    /// Waiting for the operator to start
    Welcome,
    /// Lead-in before a rally; physics suspended
    Countdown { remaining: i32 },
    /// Ball in play
    Playing,
    Paused,
    GameOver { winner: Side },
}

impl MatchState {
    pub fn is_playing(&self) -> bool {
        matches!(self, MatchState::Playing)
    }

    pub fn is_paused(&self) -> bool {
        matches!(self, MatchState::Paused)
    }

    pub fn is_counting_down(&self) -> bool {
        matches!(self, MatchState::Countdown { .. })
    }

    /// A match is underway (not on the welcome or game-over screen)
    pub fn in_match(&self) -> bool {
        matches!(
            self,
            MatchState::Countdown { .. } | MatchState::Playing | MatchState::Paused
        )
    }
}

/// Discrete things that happened, consumed by the notification sink
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    WallHit,
    PaddleHit(Side),
    PointScored(Side),
    MatchWon(Side),
    CountdownTick(i32),
    CountdownGo,
    /// Player beat the stored best score
    HighScore(u32),
}
