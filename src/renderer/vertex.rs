//! Vertex types for 3D rendering

use bytemuck::{Pod, Zeroable};

/// Lit 3D vertex: position, normal, color
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(position: [f32; 3], normal: [f32; 3], color: [f32; 4]) -> Self {
        Self {
            position,
            normal,
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 6]>() as wgpu::BufferAddress,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Colors for scene elements
pub mod colors {
    pub const PLAYER: [f32; 4] = [0.95, 0.45, 0.15, 1.0];
    pub const PLATFORM: [f32; 4] = [0.35, 0.55, 0.9, 1.0];
    pub const START_PAD: [f32; 4] = [0.45, 0.45, 0.5, 1.0];
    pub const GOAL_PAD: [f32; 4] = [0.25, 0.85, 0.4, 1.0];
    pub const GOAL_BEACON: [f32; 4] = [0.5, 1.0, 0.6, 0.35];
    pub const BACKGROUND: [f32; 4] = [0.04, 0.05, 0.09, 1.0];
}
