//! Platform-ride inference
//!
//! Determines which moving platform (if any) currently carries the player by
//! inverting the Z placement rule, then checking a tolerance band. This is a
//! positional heuristic, not a contact query: it assumes platforms never
//! overlap in Z and that a grounded player over a platform's band stands on
//! that platform. At band boundaries it can mis-resolve; acceptable at the
//! current spacing (6 units) and tolerance (2.5).

use glam::Vec3;

use crate::consts::*;
use crate::platform_base_z;

use super::state::{PlatformVelocities, Stance};

/// Infer the platform index under the player, if any. Only meaningful while
/// grounded above the fall band (`pos.y > RIDE_MIN_Y`).
pub fn resolve(pos: Vec3, stance: Stance) -> Option<usize> {
    if stance != Stance::Grounded || pos.y <= RIDE_MIN_Y {
        return None;
    }

    // Invert Z = PLATFORM_FIRST_Z - PLATFORM_SPACING * index
    let candidate = ((pos.z - PLATFORM_FIRST_Z) / -PLATFORM_SPACING).round();
    if candidate < 0.0 {
        return None;
    }
    let index = candidate as usize;

    let target_z = platform_base_z(index);
    if (pos.z - target_z).abs() < RIDE_TOLERANCE {
        Some(index)
    } else {
        None
    }
}

/// Horizontal velocity the player inherits from the platform it stands on;
/// zero when no platform resolves or the snapshot has no entry.
pub fn carry_x(pos: Vec3, stance: Stance, snapshot: &PlatformVelocities) -> f32 {
    resolve(pos, stance)
        .map(|index| snapshot.get(index))
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn standing_at(z: f32) -> Vec3 {
        Vec3::new(0.0, PLAYER_HALF, z)
    }

    #[test]
    fn test_tolerance_band_boundaries() {
        let target = platform_base_z(1); // -16

        assert_eq!(resolve(standing_at(target), Stance::Grounded), Some(1));
        assert_eq!(resolve(standing_at(target + 2.49), Stance::Grounded), Some(1));
        assert_eq!(resolve(standing_at(target - 2.49), Stance::Grounded), Some(1));
        assert_eq!(resolve(standing_at(target + 2.51), Stance::Grounded), None);
        assert_eq!(resolve(standing_at(target - 2.51), Stance::Grounded), None);
    }

    #[test]
    fn test_airborne_never_resolves() {
        let target = platform_base_z(0);
        assert_eq!(resolve(standing_at(target), Stance::Airborne), None);
    }

    #[test]
    fn test_fallen_player_never_resolves() {
        let pos = Vec3::new(0.0, -0.2, platform_base_z(0));
        assert_eq!(resolve(pos, Stance::Grounded), None);
    }

    #[test]
    fn test_start_pad_does_not_resolve() {
        // Standing at the spawn area, before the first platform's band
        assert_eq!(resolve(standing_at(0.0), Stance::Grounded), None);
        assert_eq!(resolve(standing_at(-5.0), Stance::Grounded), None);
    }

    #[test]
    fn test_carry_defaults_to_zero() {
        let snapshot = PlatformVelocities::with_len(2);
        // Resolves to index 5, which the snapshot has no entry for
        let pos = standing_at(platform_base_z(5));
        assert_eq!(carry_x(pos, Stance::Grounded, &snapshot), 0.0);

        let mut snapshot = PlatformVelocities::with_len(8);
        snapshot.set(5, -1.75);
        assert_eq!(carry_x(pos, Stance::Grounded, &snapshot), -1.75);
    }

    proptest! {
        /// A player standing exactly on a platform's target Z resolves to
        /// that platform's index.
        #[test]
        fn prop_exact_target_z_resolves(index in 0usize..32) {
            let pos = standing_at(platform_base_z(index));
            prop_assert_eq!(resolve(pos, Stance::Grounded), Some(index));
        }

        /// Anywhere strictly inside the band resolves to the band's index.
        #[test]
        fn prop_inside_band_resolves(index in 0usize..32, off in -2.49f32..2.49) {
            let pos = standing_at(platform_base_z(index) + off);
            prop_assert_eq!(resolve(pos, Stance::Grounded), Some(index));
        }
    }
}
