//! Minimal support physics for the player body
//!
//! Gravity, integration, and landing on the tops of support boxes (start
//! pad, platform tops, goal pad). There is no side-wall response: walking off
//! an edge simply stops receiving support. The motion controller still
//! derives groundedness from vertical speed, not from these contacts.

use glam::Vec3;

use crate::aabb_overlap;
use crate::consts::*;

use super::state::{Platform, Player};

/// A box the player can stand on
#[derive(Debug, Clone, Copy)]
pub struct Support {
    pub center: Vec3,
    pub half: Vec3,
}

impl Support {
    /// Y of the walkable top surface
    pub fn top(&self) -> f32 {
        self.center.y + self.half.y
    }

    /// Whether the player's footprint overlaps this support in XZ
    pub fn under_player(&self, pos: Vec3) -> bool {
        (pos.x - self.center.x).abs() <= self.half.x + PLAYER_HALF
            && (pos.z - self.center.z).abs() <= self.half.z + PLAYER_HALF
    }
}

/// The supports present this tick: start pad, platforms at their current
/// positions, goal pad.
pub fn supports(platforms: &[Platform]) -> Vec<Support> {
    let mut out = Vec::with_capacity(platforms.len() + 2);
    out.push(Support {
        center: START_PAD_CENTER,
        half: START_PAD_HALF,
    });
    for platform in platforms {
        out.push(Support {
            center: platform.pos,
            half: PLATFORM_HALF,
        });
    }
    out.push(Support {
        center: GOAL_PAD_CENTER,
        half: GOAL_PAD_HALF,
    });
    out
}

/// Apply gravity, integrate the player, and land on the first support top
/// crossed while falling.
pub fn step_player(player: &mut Player, supports: &[Support], dt: f32) {
    player.vel.y -= GRAVITY * dt;

    let old_bottom = player.pos.y - PLAYER_HALF;
    player.pos += player.vel * dt;

    if player.vel.y <= 0.0 {
        let new_bottom = player.pos.y - PLAYER_HALF;
        for support in supports {
            let top = support.top();
            // Crossing (or resting on) the top this step, within its footprint
            if old_bottom >= top - 1e-4 && new_bottom <= top && support.under_player(player.pos) {
                player.pos.y = top + PLAYER_HALF;
                player.vel.y = 0.0;
                break;
            }
        }
    }
}

/// Whether the player cube intersects the goal trigger volume
pub fn overlaps_goal(pos: Vec3) -> bool {
    aabb_overlap(
        pos,
        Vec3::splat(PLAYER_HALF),
        GOAL_VOLUME_CENTER,
        GOAL_VOLUME_HALF,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::sim::state::{JumpLatch, Stance};

    fn falling_player(pos: Vec3) -> Player {
        Player {
            pos,
            vel: Vec3::ZERO,
            stance: Stance::Airborne,
            jump_latch: JumpLatch::Ready,
        }
    }

    #[test]
    fn test_player_lands_on_start_pad() {
        let mut player = falling_player(SPAWN_POS);
        let supports = supports(&[]);

        for _ in 0..(5.0 / SIM_DT) as usize {
            step_player(&mut player, &supports, SIM_DT);
        }

        // Settled on the pad top (y=0) with the cube's half-height above it
        assert!((player.pos.y - PLAYER_HALF).abs() < 1e-3);
        assert_eq!(player.vel.y, 0.0);
    }

    #[test]
    fn test_player_misses_pad_outside_footprint() {
        let start = Vec3::new(START_PAD_HALF.x + PLAYER_HALF + 0.1, 5.0, 0.0);
        let mut player = falling_player(start);
        let supports = supports(&[]);

        for _ in 0..(3.0 / SIM_DT) as usize {
            step_player(&mut player, &supports, SIM_DT);
        }

        assert!(player.pos.y < FALL_RESET_Y);
    }

    #[test]
    fn test_no_landing_while_rising() {
        let mut player = falling_player(Vec3::new(0.0, PLAYER_HALF, 0.0));
        player.vel.y = JUMP_IMPULSE;
        let supports = supports(&[]);

        step_player(&mut player, &supports, SIM_DT);
        assert!(player.vel.y > 0.0);
        assert!(player.pos.y > PLAYER_HALF);
    }

    #[test]
    fn test_goal_volume_detection() {
        assert!(overlaps_goal(Vec3::new(0.0, PLAYER_HALF, GOAL_PAD_CENTER.z)));
        assert!(!overlaps_goal(Vec3::new(0.0, PLAYER_HALF, 0.0)));
        assert!(!overlaps_goal(Vec3::new(
            0.0,
            PLAYER_HALF,
            GOAL_PAD_CENTER.z + GOAL_VOLUME_HALF.z + PLAYER_HALF + 0.1
        )));
    }
}
