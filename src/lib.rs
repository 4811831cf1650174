//! Sine Hop - a 3D platformer across oscillating platforms
//!
//! Core modules:
//! - `sim`: Deterministic simulation (input intent, platform motion, player control)
//! - `renderer`: WebGPU rendering pipeline
//! - `settings`: Control scheme and HUD preferences

pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::{ControlScheme, Settings};

use glam::Vec3;

/// Game configuration constants
pub mod consts {
    use glam::Vec3;

    /// Fixed simulation timestep (120 Hz for smooth movement)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Player cube half-extent (1x1x1 cube)
    pub const PLAYER_HALF: f32 = 0.5;
    /// Spawn position (above the start pad)
    pub const SPAWN_POS: Vec3 = Vec3::new(0.0, 5.0, 0.0);
    /// Falling below this Y resets the player to spawn
    pub const FALL_RESET_Y: f32 = -5.0;
    /// Horizontal move speed (units/sec)
    pub const MOVE_SPEED: f32 = 6.0;
    /// Vertical velocity applied on jump (units/sec)
    pub const JUMP_IMPULSE: f32 = 9.0;
    /// Downward acceleration (units/sec²)
    pub const GRAVITY: f32 = 9.81;
    /// Vertical speed below which the player counts as grounded
    pub const GROUNDED_SPEED_EPS: f32 = 0.5;

    /// Number of moving platforms per session
    pub const PLATFORM_COUNT: usize = 8;
    /// Base Z of platform 0
    pub const PLATFORM_FIRST_Z: f32 = -10.0;
    /// Z spacing between consecutive platforms
    pub const PLATFORM_SPACING: f32 = 6.0;
    /// Platform half-extents (tops sit at y = 0)
    pub const PLATFORM_HALF: Vec3 = Vec3::new(1.5, 0.25, 1.5);
    /// Base X offset range for platform placement
    pub const PLATFORM_X_JITTER: f32 = 2.0;
    /// Oscillation amplitude range
    pub const PLATFORM_RANGE_MIN: f32 = 1.5;
    pub const PLATFORM_RANGE_MAX: f32 = 3.0;
    /// Oscillation angular speed range (rad/sec)
    pub const PLATFORM_SPEED_MIN: f32 = 0.6;
    pub const PLATFORM_SPEED_MAX: f32 = 1.6;

    /// Z tolerance when inferring which platform carries the player
    /// (half the platform Z-span plus margin)
    pub const RIDE_TOLERANCE: f32 = 2.5;
    /// Minimum player Y for ride inference (excludes the fallen-below case;
    /// the start pad surface at y≈0 is inside this band, an accepted
    /// approximation)
    pub const RIDE_MIN_Y: f32 = -0.1;

    /// Static start pad under the spawn point
    pub const START_PAD_CENTER: Vec3 = Vec3::new(0.0, -0.25, 0.0);
    pub const START_PAD_HALF: Vec3 = Vec3::new(5.0, 0.25, 5.0);

    /// Goal pad past the last platform
    pub const GOAL_PAD_CENTER: Vec3 = Vec3::new(0.0, -0.25, -58.0);
    pub const GOAL_PAD_HALF: Vec3 = Vec3::new(2.5, 0.25, 2.5);
    /// Trigger volume above the goal pad
    pub const GOAL_VOLUME_CENTER: Vec3 = Vec3::new(0.0, 1.5, -58.0);
    pub const GOAL_VOLUME_HALF: Vec3 = Vec3::new(2.5, 1.5, 2.5);

    /// Camera follow offset from the player
    pub const CAMERA_OFFSET: Vec3 = Vec3::new(0.0, 6.0, 10.0);
    /// Per-tick interpolation factor toward the follow target
    pub const CAMERA_LERP: f32 = 0.1;
}

/// Base Z position for a platform index (the placement rule the ride
/// resolver inverts)
#[inline]
pub fn platform_base_z(index: usize) -> f32 {
    consts::PLATFORM_FIRST_Z - consts::PLATFORM_SPACING * index as f32
}

/// Axis-aligned overlap test between two boxes given centers and half-extents
#[inline]
pub fn aabb_overlap(center_a: Vec3, half_a: Vec3, center_b: Vec3, half_b: Vec3) -> bool {
    (center_a.x - center_b.x).abs() <= half_a.x + half_b.x
        && (center_a.y - center_b.y).abs() <= half_a.y + half_b.y
        && (center_a.z - center_b.z).abs() <= half_a.z + half_b.z
}
