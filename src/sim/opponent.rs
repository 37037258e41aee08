//! Reactive AI paddle
//!
//! Chases the ball's current height at a fixed speed, with a dead zone to
//! stop it jittering. No prediction, so it is beatable at low speeds.

use super::state::{Ball, Board, Paddle};
use crate::consts::OPPONENT_DEADZONE;

/// Move `paddle` one tick toward the ball. Returns the applied delta.
pub fn track_ball(paddle: &mut Paddle, ball: &Ball, board: &Board, speed: f32) -> f32 {
    let center = paddle.center_y();
    let dy = if center < ball.pos.y - OPPONENT_DEADZONE {
        speed
    } else if center > ball.pos.y + OPPONENT_DEADZONE {
        -speed
    } else {
        0.0
    };

    let before = paddle.y_top;
    paddle.move_by(dy, board);
    paddle.y_top - before
}
