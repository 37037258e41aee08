//! Board placement inside a viewport
//!
//! The board keeps its aspect ratio and is centred, with bars on the long
//! axis. Drawing and pointer input both go through `Letterbox` so they agree.

use super::state::Board;

/// Uniform scale plus centring offsets, in viewport units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Letterbox {
    pub scale: f32,
    pub offset_x: f32,
    pub offset_y: f32,
}

impl Letterbox {
    /// Fit `board` into a `width` x `height` viewport
    pub fn fit(board: &Board, width: f32, height: f32) -> Self {
        let scale = (width / board.width).min(height / board.height);
        Self {
            scale,
            offset_x: (width - board.width * scale) / 2.0,
            offset_y: (height - board.height * scale) / 2.0,
        }
    }

    /// Board coordinates to viewport coordinates (y down in both)
    pub fn to_viewport(&self, x: f32, y: f32) -> (f32, f32) {
        (self.offset_x + x * self.scale, self.offset_y + y * self.scale)
    }

    /// Viewport coordinates back to board coordinates
    pub fn to_board(&self, x: f32, y: f32) -> (f32, f32) {
        ((x - self.offset_x) / self.scale, (y - self.offset_y) / self.scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_fit_has_no_bars() {
        let fit = Letterbox::fit(&Board::default(), 1600.0, 800.0);
        assert_eq!(fit.scale, 2.0);
        assert_eq!((fit.offset_x, fit.offset_y), (0.0, 0.0));
    }

    #[test]
    fn test_square_viewport_bars_top_and_bottom() {
        let fit = Letterbox::fit(&Board::default(), 800.0, 800.0);
        assert_eq!(fit.scale, 1.0);
        assert_eq!(fit.offset_y, 200.0);
        assert_eq!(fit.to_viewport(0.0, 0.0), (0.0, 200.0));
        assert_eq!(fit.to_board(400.0, 600.0), (400.0, 400.0));
    }

    #[test]
    fn test_wide_viewport_bars_left_and_right() {
        let fit = Letterbox::fit(&Board::default(), 1000.0, 200.0);
        assert_eq!(fit.scale, 0.5);
        assert_eq!(fit.offset_x, 300.0);
        assert_eq!(fit.offset_y, 0.0);
        assert_eq!(fit.to_board(500.0, 100.0), (400.0, 200.0));
    }
}
