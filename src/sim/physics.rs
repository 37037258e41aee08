//! Fixed-step ball physics
//!
//! One call advances the rally by exactly one tick. Velocity is already in
//! units per tick, so there is no delta-time scaling.

use super::collision::{Wall, goal_line, paddle_contact, wall_contact};
use super::state::{Ball, Board, GameEvent, Paddle, Score};
use crate::consts::SPIN_FACTOR;

/// Advance the ball one tick, resolving walls, paddles and goal lines.
///
/// Awards the point on a goal but never re-serves; the caller owns that.
pub fn step(
    ball: &mut Ball,
    player: &Paddle,
    opponent: &Paddle,
    board: &Board,
    score: &mut Score,
) -> Vec<GameEvent> {
    let mut events = Vec::new();

    ball.pos += ball.vel;

    if let Some(wall) = wall_contact(ball, board) {
        ball.vel.y = -ball.vel.y;
        // Snap back inside so the next tick cannot re-trigger the same wall
        ball.pos.y = match wall {
            Wall::Top => ball.radius,
            Wall::Bottom => board.height - ball.radius,
        };
        events.push(GameEvent::WallHit);
    }

    for paddle in [player, opponent] {
        if let Some(contact) = paddle_contact(ball, paddle) {
            ball.vel.x = -ball.vel.x;
            ball.vel.y = contact.offset * SPIN_FACTOR;
            events.push(GameEvent::PaddleHit(contact.side));
        }
    }

    if let Some(scorer) = goal_line(ball, board) {
        score.award(scorer);
        events.push(GameEvent::PointScored(scorer));
    }

    events
}
