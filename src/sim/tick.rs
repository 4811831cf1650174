//! Fixed timestep orchestration
//!
//! Advances one tick: platforms first (so the velocity snapshot the player
//! reads is from this tick, never stale), then the player motion controller,
//! then integration, goal detection, and camera follow.

use crate::consts::*;

use super::input::Intent;
use super::oscillator::update_platforms;
use super::physics;
use super::ride;
use super::state::{GamePhase, GameState, JumpLatch, Stance};

/// Advance the session by one fixed timestep
pub fn tick(state: &mut GameState, intent: &Intent, dt: f32) {
    state.time_ticks += 1;
    let t = state.elapsed_secs();

    // Platforms update and publish before the player reads
    let carry = update_platforms(&mut state.platforms, t);

    // Fell through: back to spawn, and the player's tick ends here
    if state.player.pos.y < FALL_RESET_Y {
        state.player.reset();
        follow_camera(state);
        return;
    }

    let player = &mut state.player;

    // Grounded iff vertical speed is small (heuristic, not a contact query)
    player.stance = if player.vel.y.abs() < GROUNDED_SPEED_EPS {
        Stance::Grounded
    } else {
        Stance::Airborne
    };

    let extra_x = ride::carry_x(player.pos, player.stance, &carry);

    // Horizontal velocity command. Normalize only above unit length so full
    // diagonal speed is capped without cutting slow analog input; the
    // platform's velocity is composited into X only, so the player is carried
    // while still steering freely.
    let mut dir = intent.dir;
    if dir.length_squared() > 1.0 {
        dir = dir.normalize();
    }
    player.vel.x = dir.x * MOVE_SPEED + extra_x;
    player.vel.z = dir.y * MOVE_SPEED;

    // Jump fires on the rising edge only; holding the button re-arms nothing
    // until it is released
    if intent.jump {
        if player.jump_latch == JumpLatch::Ready && player.stance == Stance::Grounded {
            player.vel.y = JUMP_IMPULSE;
        }
        player.jump_latch = JumpLatch::Held;
    } else {
        player.jump_latch = JumpLatch::Ready;
    }

    let supports = physics::supports(&state.platforms);
    physics::step_player(&mut state.player, &supports, dt);

    if state.phase == GamePhase::Playing && physics::overlaps_goal(state.player.pos) {
        state.phase = GamePhase::Cleared;
    }

    follow_camera(state);
}

/// Exponential-decay style follow: a fixed fraction of the remaining offset
/// per tick, then the renderer looks at the player.
fn follow_camera(state: &mut GameState) {
    let target = state.player.pos + CAMERA_OFFSET;
    state.camera += (target - state.camera) * CAMERA_LERP;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform_base_z;
    use glam::{Vec2, Vec3};

    /// Tick until the player settles on a surface
    fn settle(state: &mut GameState) {
        let idle = Intent::default();
        for _ in 0..(5.0 / SIM_DT) as usize {
            tick(state, &idle, SIM_DT);
        }
    }

    /// Place the player standing on top of the given platform's current spot
    fn stand_on_platform(state: &mut GameState, index: usize) {
        let platform = &state.platforms[index];
        state.player.pos = Vec3::new(platform.pos.x, PLAYER_HALF, platform.base.z);
        state.player.vel = Vec3::ZERO;
    }

    #[test]
    fn test_spawn_settles_grounded_on_pad() {
        let mut state = GameState::new(1);
        settle(&mut state);

        assert!((state.player.pos.y - PLAYER_HALF).abs() < 1e-3);
        assert_eq!(state.player.stance, Stance::Grounded);
        assert_eq!(state.player.vel.y, 0.0);
    }

    #[test]
    fn test_forward_input_moves_minus_z_at_move_speed() {
        let mut state = GameState::new(1);
        settle(&mut state);
        let start_z = state.player.pos.z;

        let forward = Intent {
            dir: Vec2::new(0.0, -1.0),
            jump: false,
        };
        // Exactly half a second of ticks; truncating 0.5 / SIM_DT would
        // drop a tick to f32 rounding
        let steps = (0.5 / SIM_DT).round() as usize;
        for _ in 0..steps {
            tick(&mut state, &forward, SIM_DT);
        }

        let moved = start_z - state.player.pos.z;
        assert!((moved - MOVE_SPEED * 0.5).abs() < 0.05, "moved {moved}");
    }

    #[test]
    fn test_diagonal_discrete_input_is_normalized() {
        let mut state = GameState::new(1);
        settle(&mut state);

        // Forward+right both held: resultant horizontal speed is MOVE_SPEED,
        // not MOVE_SPEED * sqrt(2)
        let diagonal = Intent {
            dir: Vec2::new(1.0, -1.0),
            jump: false,
        };
        tick(&mut state, &diagonal, SIM_DT);

        let speed = Vec2::new(state.player.vel.x, state.player.vel.z).length();
        assert!((speed - MOVE_SPEED).abs() < 1e-4, "speed {speed}");
    }

    #[test]
    fn test_slow_analog_input_is_not_normalized() {
        let mut state = GameState::new(1);
        settle(&mut state);

        let nudge = Intent {
            dir: Vec2::new(0.3, 0.0),
            jump: false,
        };
        tick(&mut state, &nudge, SIM_DT);
        assert!((state.player.vel.x - 0.3 * MOVE_SPEED).abs() < 1e-4);
    }

    #[test]
    fn test_held_jump_fires_exactly_once() {
        let mut state = GameState::new(1);
        settle(&mut state);

        let jump = Intent {
            dir: Vec2::ZERO,
            jump: true,
        };
        let idle = Intent::default();

        // Hold jump through launch, flight, and landing. An impulse is a
        // near-zero vertical speed becoming a near-JUMP_IMPULSE one (the
        // landing snap also raises vel.y, but from a large negative value).
        let mut impulses = 0;
        for _ in 0..(3.0 / SIM_DT) as usize {
            let vy_before = state.player.vel.y;
            tick(&mut state, &jump, SIM_DT);
            if vy_before.abs() < 1.0 && state.player.vel.y > JUMP_IMPULSE - 1.0 {
                impulses += 1;
            }
        }
        assert_eq!(impulses, 1);
        assert_eq!(state.player.stance, Stance::Grounded);

        // Release, then press again: a second jump fires
        tick(&mut state, &idle, SIM_DT);
        tick(&mut state, &jump, SIM_DT);
        assert!(state.player.vel.y > JUMP_IMPULSE - 1.0);
    }

    #[test]
    fn test_platform_carry_adds_to_x_velocity() {
        let mut state = GameState::new(3);
        let idle = Intent::default();

        // Let the oscillation reach a nonzero velocity, then stand on it
        for _ in 0..30 {
            tick(&mut state, &idle, SIM_DT);
        }
        stand_on_platform(&mut state, 2);
        tick(&mut state, &idle, SIM_DT);

        assert_eq!(state.player.stance, Stance::Grounded);
        let expected = state.platforms[2].vel_x;
        assert!(
            (state.player.vel.x - expected).abs() < 1e-4,
            "vel.x {} expected {}",
            state.player.vel.x,
            expected
        );
        // Steering stays independent of the carry: forward input leaves the
        // carried X component intact
        let forward = Intent {
            dir: Vec2::new(0.0, -1.0),
            jump: false,
        };
        tick(&mut state, &forward, SIM_DT);
        let expected = state.platforms[2].vel_x;
        assert!((state.player.vel.x - expected).abs() < 1e-4);
        assert!((state.player.vel.z + MOVE_SPEED).abs() < 1e-4);
    }

    #[test]
    fn test_no_carry_on_start_pad() {
        let mut state = GameState::new(1);
        settle(&mut state);

        let idle = Intent::default();
        tick(&mut state, &idle, SIM_DT);
        assert_eq!(state.player.vel.x, 0.0);
    }

    #[test]
    fn test_fall_below_threshold_resets_to_spawn() {
        let mut state = GameState::new(1);
        state.player.pos = Vec3::new(20.0, FALL_RESET_Y - 0.1, -30.0);
        state.player.vel = Vec3::new(3.0, -12.0, 1.0);

        let idle = Intent::default();
        tick(&mut state, &idle, SIM_DT);

        assert_eq!(state.player.pos, SPAWN_POS);
        assert_eq!(state.player.vel, Vec3::ZERO);
    }

    #[test]
    fn test_goal_volume_sets_cleared_once() {
        let mut state = GameState::new(1);
        state.player.pos = Vec3::new(0.0, PLAYER_HALF, GOAL_PAD_CENTER.z);
        state.player.vel = Vec3::ZERO;

        let idle = Intent::default();
        tick(&mut state, &idle, SIM_DT);
        assert_eq!(state.phase, GamePhase::Cleared);

        // Terminal: movement still runs, phase never leaves Cleared
        let forward = Intent {
            dir: Vec2::new(0.0, -1.0),
            jump: false,
        };
        tick(&mut state, &forward, SIM_DT);
        assert_eq!(state.phase, GamePhase::Cleared);
        assert!((state.player.vel.z + MOVE_SPEED).abs() < 1e-4);
    }

    #[test]
    fn test_camera_follows_player_with_lag() {
        let mut state = GameState::new(1);
        settle(&mut state);

        let forward = Intent {
            dir: Vec2::new(0.0, -1.0),
            jump: false,
        };
        tick(&mut state, &forward, SIM_DT);
        let target = state.player.pos + CAMERA_OFFSET;
        let lag = (state.camera - target).length();

        // Keep moving: the camera converges but never snaps
        for _ in 0..60 {
            tick(&mut state, &forward, SIM_DT);
        }
        let target = state.player.pos + CAMERA_OFFSET;
        let new_lag = (state.camera - target).length();
        assert!(new_lag > 0.0);
        assert!(new_lag < lag + 1.0);
    }

    #[test]
    fn test_ride_bands_are_disjoint() {
        // A position in platform 3's band never resolves to platform 2 or 4
        let z = platform_base_z(3) + 2.0;
        let resolved =
            crate::sim::ride::resolve(Vec3::new(0.0, PLAYER_HALF, z), Stance::Grounded);
        assert_eq!(resolved, Some(3));
    }
}
