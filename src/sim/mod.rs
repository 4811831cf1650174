//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Platforms update before the player reads their velocities
//! - No rendering or platform dependencies

pub mod input;
pub mod oscillator;
pub mod physics;
pub mod ride;
pub mod state;
pub mod tick;

pub use input::{ButtonProvider, Intent, IntentProvider, RawInput, StickProvider, provider_for};
pub use oscillator::{sample, update_platforms};
pub use state::{GamePhase, GameState, JumpLatch, Platform, PlatformVelocities, Player, Stance};
pub use tick::tick;
