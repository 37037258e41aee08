//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Board-space vertex; the pipeline maps it to clip space on upload
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x4];

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }

    /// Same colour, new position
    pub fn moved_to(self, x: f32, y: f32) -> Self {
        Self {
            position: [x, y],
            ..self
        }
    }
}

/// Colors for game elements
pub mod colors {
    pub const PADDLE: [f32; 4] = [1.0, 1.0, 1.0, 0.9];
    pub const BALL: [f32; 4] = [1.0, 1.0, 1.0, 0.95];
    pub const CENTER_LINE: [f32; 4] = [1.0, 1.0, 1.0, 0.3];
    /// Dims the court during the countdown and pause
    pub const VEIL: [f32; 4] = [0.0, 0.0, 0.0, 0.45];
    pub const COURT: [f32; 4] = [0.05, 0.05, 0.1, 1.0];
    pub const BACKGROUND: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_matches_struct() {
        let layout = Vertex::desc();
        assert_eq!(layout.array_stride, 24);
        assert_eq!(layout.attributes[1].offset, 8);
    }

    #[test]
    fn test_moved_to_keeps_color() {
        let v = Vertex::new(1.0, 2.0, colors::BALL).moved_to(-0.5, 0.5);
        assert_eq!(v.position, [-0.5, 0.5]);
        assert_eq!(v.color, colors::BALL);
    }
}
