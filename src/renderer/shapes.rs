//! Shape generation for the box scene

use glam::Vec3;

use super::vertex::{Vertex, colors};
use crate::consts::*;
use crate::sim::GameState;

/// Append an axis-aligned box (center, half-extents) as 24 vertices and 36
/// indices with per-face normals
pub fn push_box(
    vertices: &mut Vec<Vertex>,
    indices: &mut Vec<u32>,
    center: Vec3,
    half: Vec3,
    color: [f32; 4],
) {
    // (normal, two in-plane axes) per face
    const FACES: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
        ([1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]),
        ([-1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, -1.0]),
        ([0.0, 1.0, 0.0], [0.0, 0.0, 1.0], [1.0, 0.0, 0.0]),
        ([0.0, -1.0, 0.0], [0.0, 0.0, -1.0], [1.0, 0.0, 0.0]),
        ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
        ([0.0, 0.0, -1.0], [-1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
    ];

    for (normal, u_axis, v_axis) in FACES {
        let n = Vec3::from_array(normal);
        let u = Vec3::from_array(u_axis);
        let v = Vec3::from_array(v_axis);
        let face_center = center + n * (n.abs() * half).length();

        let base = vertices.len() as u32;
        for (su, sv) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
            let offset = u * (u.abs() * half).length() * su + v * (v.abs() * half).length() * sv;
            vertices.push(Vertex::new(
                (face_center + offset).to_array(),
                normal,
                color,
            ));
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }
}

/// Tessellate the whole scene from the current game state
pub fn scene_mesh(state: &GameState) -> (Vec<Vertex>, Vec<u32>) {
    // 6 faces * 4 verts per box
    let boxes = state.platforms.len() + 4;
    let mut vertices = Vec::with_capacity(boxes * 24);
    let mut indices = Vec::with_capacity(boxes * 36);

    push_box(
        &mut vertices,
        &mut indices,
        START_PAD_CENTER,
        START_PAD_HALF,
        colors::START_PAD,
    );
    for platform in &state.platforms {
        push_box(
            &mut vertices,
            &mut indices,
            platform.pos,
            PLATFORM_HALF,
            colors::PLATFORM,
        );
    }
    push_box(
        &mut vertices,
        &mut indices,
        GOAL_PAD_CENTER,
        GOAL_PAD_HALF,
        colors::GOAL_PAD,
    );
    // Translucent beacon marking the goal trigger volume
    push_box(
        &mut vertices,
        &mut indices,
        GOAL_VOLUME_CENTER,
        GOAL_VOLUME_HALF,
        colors::GOAL_BEACON,
    );
    push_box(
        &mut vertices,
        &mut indices,
        state.player.pos,
        Vec3::splat(PLAYER_HALF),
        colors::PLAYER,
    );

    (vertices, indices)
}
