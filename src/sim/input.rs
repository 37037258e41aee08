//! Player input sampling
//!
//! Pointer/touch input is absolute and applied as events arrive. Arrow keys
//! are incremental and applied once per tick.

use super::state::{Board, Paddle};
use super::viewport::Letterbox;
use crate::consts::KEY_PADDLE_SPEED;

/// Keys the game cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    Other,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value
    pub fn from_dom(key: &str) -> Self {
        match key {
            "ArrowUp" => Key::ArrowUp,
            "ArrowDown" => Key::ArrowDown,
            _ => Key::Other,
        }
    }
}

/// Held-key state plus the autopilot flag
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputState {
    pub up_held: bool,
    pub down_held: bool,
    /// Attract mode - the player paddle tracks the ball by itself
    pub autopilot: bool,
}

impl InputState {
    pub fn key_down(&mut self, key: Key) {
        match key {
            Key::ArrowUp => self.up_held = true,
            Key::ArrowDown => self.down_held = true,
            Key::Other => {}
        }
    }

    pub fn key_up(&mut self, key: Key) {
        match key {
            Key::ArrowUp => self.up_held = false,
            Key::ArrowDown => self.down_held = false,
            Key::Other => {}
        }
    }

    pub fn release_all(&mut self) {
        self.up_held = false;
        self.down_held = false;
    }

    /// Vertical travel for one tick from held keys
    pub fn key_delta(&self) -> f32 {
        let mut dy = 0.0;
        if self.up_held {
            dy -= KEY_PADDLE_SPEED;
        }
        if self.down_held {
            dy += KEY_PADDLE_SPEED;
        }
        dy
    }
}

/// Convert a client-space pointer y into board units.
///
/// `rect` is the canvas on screen as `(top, width, height)`. The board is
/// letterboxed inside it exactly as the renderer draws it.
pub fn pointer_to_board_y(client_y: f32, rect: (f32, f32, f32), board: &Board) -> f32 {
    let (top, width, height) = rect;
    let local = client_y - top;
    if width <= 0.0 || height <= 0.0 {
        return local;
    }
    Letterbox::fit(board, width, height).to_board(0.0, local).1
}

/// Snap the paddle centre to the pointer
pub fn apply_pointer(paddle: &mut Paddle, board: &Board, pointer_y: f32) {
    paddle.center_on(pointer_y, board);
}

/// Apply one tick of held-key movement
pub fn apply_keys(paddle: &mut Paddle, board: &Board, input: &InputState) {
    let dy = input.key_delta();
    if dy != 0.0 {
        paddle.move_by(dy, board);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Side;
    use proptest::prelude::*;

    #[test]
    fn test_key_mapping() {
        assert_eq!(Key::from_dom("ArrowUp"), Key::ArrowUp);
        assert_eq!(Key::from_dom("ArrowDown"), Key::ArrowDown);
        assert_eq!(Key::from_dom("w"), Key::Other);
    }

    #[test]
    fn test_held_keys() {
        let board = Board::default();
        let mut paddle = Paddle::new(Side::Player, &board);
        let mut input = InputState::default();

        input.key_down(Key::ArrowDown);
        apply_keys(&mut paddle, &board, &input);
        assert_eq!(paddle.y_top, 158.0);

        // Both held cancel out
        input.key_down(Key::ArrowUp);
        apply_keys(&mut paddle, &board, &input);
        assert_eq!(paddle.y_top, 158.0);

        input.key_up(Key::ArrowDown);
        apply_keys(&mut paddle, &board, &input);
        assert_eq!(paddle.y_top, 150.0);

        input.release_all();
        assert_eq!(input.key_delta(), 0.0);
    }

    #[test]
    fn test_pointer_snaps_center() {
        let board = Board::default();
        let mut paddle = Paddle::new(Side::Player, &board);

        apply_pointer(&mut paddle, &board, 300.0);
        assert_eq!(paddle.center_y(), 300.0);

        apply_pointer(&mut paddle, &board, 10.0);
        assert_eq!(paddle.y_top, 0.0);

        apply_pointer(&mut paddle, &board, 1000.0);
        assert_eq!(paddle.y_top, 300.0);
    }

    #[test]
    fn test_pointer_scaling() {
        let board = Board::default();
        // Canvas drawn at half size, 20px from the top of the viewport
        assert_eq!(pointer_to_board_y(120.0, (20.0, 400.0, 200.0), &board), 200.0);
        // Degenerate rect passes through unscaled
        assert_eq!(pointer_to_board_y(50.0, (0.0, 0.0, 0.0), &board), 50.0);
    }

    #[test]
    fn test_pointer_skips_letterbox_bars() {
        let board = Board::default();
        // Square canvas: the board occupies pixels 200..600
        let rect = (0.0, 800.0, 800.0);
        assert_eq!(pointer_to_board_y(200.0, rect, &board), 0.0);
        assert_eq!(pointer_to_board_y(400.0, rect, &board), 200.0);
        assert_eq!(pointer_to_board_y(600.0, rect, &board), 400.0);

        let mut paddle = Paddle::new(Side::Player, &board);
        apply_pointer(&mut paddle, &board, pointer_to_board_y(350.0, rect, &board));
        assert_eq!(paddle.center_y(), 150.0);
    }

    #[test]
    fn test_pointer_on_wide_canvas() {
        let board = Board::default();
        // Height-limited: scale 0.5, bars only at the sides
        assert_eq!(pointer_to_board_y(110.0, (10.0, 1000.0, 200.0), &board), 200.0);
    }

    proptest! {
        #[test]
        fn pointer_always_clamped(y in -1.0e5f32..1.0e5) {
            let board = Board::default();
            let mut paddle = Paddle::new(Side::Player, &board);
            apply_pointer(&mut paddle, &board, y);
            prop_assert!(paddle.y_top >= 0.0 && paddle.y_top <= board.height - paddle.height);
        }

        #[test]
        fn keys_always_clamped(ticks in 0usize..200, down in any::<bool>()) {
            let board = Board::default();
            let mut paddle = Paddle::new(Side::Player, &board);
            let mut input = InputState::default();
            input.key_down(if down { Key::ArrowDown } else { Key::ArrowUp });
            for _ in 0..ticks {
                apply_keys(&mut paddle, &board, &input);
            }
            prop_assert!(paddle.y_top >= 0.0 && paddle.y_top <= board.height - paddle.height);
        }
    }
}
