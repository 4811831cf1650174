//! Analytic platform oscillation
//!
//! Position and velocity come from the same closed form, so the published
//! carry velocity is the exact derivative of the motion rather than a
//! finite-difference estimate (which would jitter at low frame rates).

use glam::Vec3;

use super::state::{Platform, PlatformVelocities};

/// Sample a platform's position and horizontal velocity at elapsed time `t`:
///
/// `x(t) = x0 + range * sin((t + phase) * speed)`
/// `vx(t) = range * speed * cos((t + phase) * speed)`
pub fn sample(platform: &Platform, t: f32) -> (Vec3, f32) {
    let phase = t + platform.phase;
    let x = platform.base.x + platform.range * (phase * platform.speed).sin();
    let vx = platform.range * platform.speed * (phase * platform.speed).cos();
    (Vec3::new(x, platform.base.y, platform.base.z), vx)
}

/// Advance all platforms to elapsed time `t` and build the per-tick velocity
/// snapshot the player update reads. The orchestrator calls this before the
/// player update, so the snapshot is never stale.
pub fn update_platforms(platforms: &mut [Platform], t: f32) -> PlatformVelocities {
    let mut snapshot = PlatformVelocities::with_len(platforms.len());
    for platform in platforms.iter_mut() {
        let (pos, vx) = sample(platform, t);
        platform.pos = pos;
        platform.vel_x = vx;
        snapshot.set(platform.index, vx);
    }
    snapshot
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::PLATFORM_HALF;
    use glam::Vec3;
    use proptest::prelude::*;

    fn test_platform(base_x: f32, phase: f32, range: f32, speed: f32) -> Platform {
        Platform {
            index: 0,
            base: Vec3::new(base_x, -PLATFORM_HALF.y, -10.0),
            phase,
            range,
            speed,
            pos: Vec3::ZERO,
            vel_x: 0.0,
        }
    }

    #[test]
    fn test_only_x_oscillates() {
        let p = test_platform(1.0, 0.5, 2.0, 1.2);
        let (pos, _) = sample(&p, 3.7);
        assert_eq!(pos.y, p.base.y);
        assert_eq!(pos.z, p.base.z);
        assert!((pos.x - p.base.x).abs() <= p.range + 1e-5);
    }

    #[test]
    fn test_snapshot_matches_platform_velocity() {
        let mut platforms: Vec<Platform> = (0..4)
            .map(|i| {
                let mut p = test_platform(0.0, i as f32, 2.0, 1.0);
                p.index = i;
                p
            })
            .collect();
        let snapshot = update_platforms(&mut platforms, 2.0);
        for p in &platforms {
            assert_eq!(snapshot.get(p.index), p.vel_x);
        }
    }

    #[test]
    fn test_deterministic_given_time() {
        let p = test_platform(0.3, 1.1, 2.5, 0.9);
        assert_eq!(sample(&p, 5.0), sample(&p, 5.0));
    }

    proptest! {
        /// The published velocity is the analytic derivative of the position
        /// function: it must agree with a central finite difference.
        #[test]
        fn prop_velocity_is_position_derivative(
            t in 0.0f32..100.0,
            phase in 0.0f32..std::f32::consts::TAU,
            range in 0.5f32..4.0,
            speed in 0.2f32..3.0,
        ) {
            let p = test_platform(0.0, phase, range, speed);
            let (_, vx) = sample(&p, t);

            let h = 1e-3f32;
            let (lo, _) = sample(&p, t - h);
            let (hi, _) = sample(&p, t + h);
            let numeric = (hi.x - lo.x) / (2.0 * h);

            // Tolerance scales with the motion's magnitude
            let tol = 1e-2 * (1.0 + range * speed * speed);
            prop_assert!(
                (vx - numeric).abs() <= tol,
                "analytic {} vs numeric {}",
                vx,
                numeric
            );
        }

        /// Velocity peaks where the position crosses its base (phase*speed at
        /// a multiple of pi) and is bounded by range * speed.
        #[test]
        fn prop_velocity_bounded(
            t in 0.0f32..100.0,
            phase in 0.0f32..std::f32::consts::TAU,
            range in 0.5f32..4.0,
            speed in 0.2f32..3.0,
        ) {
            let p = test_platform(0.0, phase, range, speed);
            let (_, vx) = sample(&p, t);
            prop_assert!(vx.abs() <= range * speed + 1e-4);
        }
    }
}
