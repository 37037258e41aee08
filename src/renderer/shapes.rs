//! Shape generation for 2D primitives
//!
//! Everything is built in board coordinates (origin top-left, y down); the
//! pipeline maps to clip space.

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::{Vertex, colors};
use crate::sim::{Board, MatchState, Paddle, Snapshot};

/// Dash and gap lengths of the centre line
const DASH: f32 = 5.0;
const DASH_GAP: f32 = 10.0;
const CENTER_LINE_WIDTH: f32 = 2.0;
const BALL_SEGMENTS: u32 = 24;

/// Generate vertices for an axis-aligned filled rectangle
pub fn rect(min: Vec2, size: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    let max = min + size;
    vec![
        Vertex::new(min.x, min.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(max.x, max.y, color),
    ]
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Vertical dashed line down the middle of the board
pub fn center_line(board: &Board) -> Vec<Vertex> {
    let x = board.width / 2.0 - CENTER_LINE_WIDTH / 2.0;
    let mut vertices = Vec::new();
    let mut y = 0.0;
    while y < board.height {
        let len = DASH.min(board.height - y);
        vertices.extend(rect(
            Vec2::new(x, y),
            Vec2::new(CENTER_LINE_WIDTH, len),
            colors::CENTER_LINE,
        ));
        y += DASH + DASH_GAP;
    }
    vertices
}

pub fn paddle(paddle: &Paddle) -> Vec<Vertex> {
    rect(
        Vec2::new(paddle.x, paddle.y_top),
        Vec2::new(paddle.width, paddle.height),
        colors::PADDLE,
    )
}

/// Full frame for a snapshot, back to front
pub fn scene(snapshot: &Snapshot) -> Vec<Vertex> {
    let board = &snapshot.board;
    let mut vertices = rect(
        Vec2::ZERO,
        Vec2::new(board.width, board.height),
        colors::COURT,
    );

    vertices.extend(center_line(board));
    vertices.extend(paddle(&snapshot.player));
    vertices.extend(paddle(&snapshot.opponent));

    if snapshot.state != MatchState::Welcome {
        vertices.extend(circle(
            snapshot.ball.pos,
            snapshot.ball.radius,
            colors::BALL,
            BALL_SEGMENTS,
        ));
    }

    let dimmed = matches!(
        snapshot.state,
        MatchState::Countdown { .. } | MatchState::Paused
    ) || snapshot.show_game_over;
    if dimmed {
        vertices.extend(rect(
            Vec2::ZERO,
            Vec2::new(board.width, board.height),
            colors::VEIL,
        ));
    }

    vertices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Board, Difficulty, MatchContext};

    fn snapshot_after_start() -> Snapshot {
        let mut ctx = MatchContext::new(Board::default(), Difficulty::Medium, 3);
        ctx.start("Ada", 0.0).unwrap();
        ctx.snapshot(0.0)
    }

    #[test]
    fn test_rect_is_two_triangles() {
        let v = rect(Vec2::new(1.0, 2.0), Vec2::new(3.0, 4.0), colors::PADDLE);
        assert_eq!(v.len(), 6);
        assert_eq!(v[0].position, [1.0, 2.0]);
        assert_eq!(v[5].position, [4.0, 6.0]);
    }

    #[test]
    fn test_circle_stays_within_radius() {
        let center = Vec2::new(50.0, 50.0);
        for v in circle(center, 10.0, colors::BALL, 16) {
            let d = Vec2::from(v.position).distance(center);
            assert!(d <= 10.0 + 1e-4);
        }
    }

    #[test]
    fn test_center_line_dashes() {
        let board = Board::default();
        let v = center_line(&board);
        // 400 / 15 rounded up
        assert_eq!(v.len(), 27 * 6);
        assert!(v.iter().all(|v| v.position[1] <= board.height));
    }

    #[test]
    fn test_scene_hides_ball_on_welcome() {
        let ctx = MatchContext::new(Board::default(), Difficulty::Medium, 3);
        let welcome = scene(&ctx.snapshot(0.0));
        let counting = scene(&snapshot_after_start());
        // Ball plus veil
        assert_eq!(counting.len(), welcome.len() + BALL_SEGMENTS as usize * 3 + 6);
    }

    #[test]
    fn test_scene_draws_paddles_on_board_edges() {
        let snapshot = snapshot_after_start();
        let v = scene(&snapshot);
        assert!(v.iter().any(|v| v.position[0] == 0.0 && v.color == colors::PADDLE));
        assert!(v.iter().any(|v| v.position[0] == 800.0 && v.color == colors::PADDLE));
    }
}
