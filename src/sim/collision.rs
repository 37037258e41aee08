//! Contact tests between the ball and the board's edges and paddles
//!
//! Pure queries: nothing here mutates the ball. `physics::step` decides what
//! to do with a contact.

use super::state::{Ball, Board, Paddle, Side};

/// Which horizontal wall the ball touched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wall {
    Top,
    Bottom,
}

/// Result of a paddle check
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaddleContact {
    pub side: Side,
    /// Ball centre minus paddle centre (positive = below centre)
    pub offset: f32,
}

/// Ball overlaps the top or bottom edge
pub fn wall_contact(ball: &Ball, board: &Board) -> Option<Wall> {
    if ball.top() < 0.0 {
        Some(Wall::Top)
    } else if ball.bottom() > board.height {
        Some(Wall::Bottom)
    } else {
        None
    }
}

/// Ball's leading edge has crossed the paddle face while inside its y-band.
///
/// Only a ball travelling toward the paddle counts, so a ball that was just
/// reflected and is still overlapping cannot be turned around a second time.
pub fn paddle_contact(ball: &Ball, paddle: &Paddle) -> Option<PaddleContact> {
    let approaching = match paddle.side {
        Side::Player => ball.vel.x < 0.0,
        Side::Opponent => ball.vel.x > 0.0,
    };
    if !approaching {
        return None;
    }

    let crossed = match paddle.side {
        Side::Player => ball.left() < paddle.face_x(),
        Side::Opponent => ball.right() > paddle.face_x(),
    };
    let in_band = ball.pos.y > paddle.y_top && ball.pos.y < paddle.y_top + paddle.height;

    (crossed && in_band).then(|| PaddleContact {
        side: paddle.side,
        offset: ball.pos.y - paddle.center_y(),
    })
}

/// Ball is entirely past a goal line; returns the side that earns the point
pub fn goal_line(ball: &Ball, board: &Board) -> Option<Side> {
    if ball.right() < 0.0 {
        Some(Side::Opponent)
    } else if ball.left() > board.width {
        Some(Side::Player)
    } else {
        None
    }
}
