//! Session state and core simulation types

use glam::Vec3;
use rand::Rng;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::consts::*;
use crate::platform_base_z;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Goal reached; terminal, only gates the win overlay
    Cleared,
}

/// Whether the player is resting on a surface, derived each tick from the
/// vertical-speed heuristic (not a contact query)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stance {
    Grounded,
    Airborne,
}

/// Jump edge latch: a held jump button fires once, then must be released
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpLatch {
    Ready,
    Held,
}

/// The player-controlled cube
#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec3,
    pub vel: Vec3,
    pub stance: Stance,
    pub jump_latch: JumpLatch,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: SPAWN_POS,
            vel: Vec3::ZERO,
            stance: Stance::Airborne,
            jump_latch: JumpLatch::Ready,
        }
    }
}

impl Player {
    /// Return to spawn with zero velocity. Idempotent.
    pub fn reset(&mut self) {
        self.pos = SPAWN_POS;
        self.vel = Vec3::ZERO;
    }
}

/// A moving platform. Immutable after construction except for the derived
/// current position and velocity.
#[derive(Debug, Clone)]
pub struct Platform {
    /// Stable index assigned at construction, 0..PLATFORM_COUNT
    pub index: usize,
    /// Base position: X randomized, Z fixed by the placement rule
    pub base: Vec3,
    /// Oscillation phase offset (randomized)
    pub phase: f32,
    /// Oscillation amplitude
    pub range: f32,
    /// Oscillation angular speed (rad/sec)
    pub speed: f32,
    /// Current position, written each tick by the oscillator
    pub pos: Vec3,
    /// Current horizontal velocity, written each tick by the oscillator
    pub vel_x: f32,
}

impl Platform {
    pub fn new(index: usize, rng: &mut Pcg32) -> Self {
        let base = Vec3::new(
            rng.random_range(-PLATFORM_X_JITTER..PLATFORM_X_JITTER),
            -PLATFORM_HALF.y,
            platform_base_z(index),
        );
        Self {
            index,
            base,
            phase: rng.random_range(0.0..std::f32::consts::TAU),
            range: rng.random_range(PLATFORM_RANGE_MIN..PLATFORM_RANGE_MAX),
            speed: rng.random_range(PLATFORM_SPEED_MIN..PLATFORM_SPEED_MAX),
            pos: base,
            vel_x: 0.0,
        }
    }
}

/// Per-tick snapshot of platform horizontal velocities, keyed by platform
/// index. Built by the orchestrator after the platform update and read by the
/// player update; a missing index reads as zero.
#[derive(Debug, Clone, Default)]
pub struct PlatformVelocities(Vec<f32>);

impl PlatformVelocities {
    pub fn with_len(count: usize) -> Self {
        Self(vec![0.0; count])
    }

    pub fn set(&mut self, index: usize, vel_x: f32) {
        if let Some(slot) = self.0.get_mut(index) {
            *slot = vel_x;
        }
    }

    pub fn get(&self, index: usize) -> f32 {
        self.0.get(index).copied().unwrap_or(0.0)
    }
}

/// Complete session state (deterministic given the seed)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Session seed for reproducibility
    pub seed: u64,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Current phase
    pub phase: GamePhase,
    /// The player cube
    pub player: Player,
    /// Moving platforms, index i at slot i
    pub platforms: Vec<Platform>,
    /// Camera position (follows the player with lag)
    pub camera: Vec3,
}

impl GameState {
    /// Create a new session with the given seed
    pub fn new(seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let platforms = (0..PLATFORM_COUNT)
            .map(|i| Platform::new(i, &mut rng))
            .collect();

        Self {
            seed,
            time_ticks: 0,
            phase: GamePhase::Playing,
            player: Player::default(),
            platforms,
            camera: SPAWN_POS + CAMERA_OFFSET,
        }
    }

    /// Elapsed simulation time in seconds
    pub fn elapsed_secs(&self) -> f32 {
        self.time_ticks as f32 * SIM_DT
    }
}
