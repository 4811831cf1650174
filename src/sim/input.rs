//! Input intent aggregation
//!
//! Raw device state is written by the host's event listeners (keyboard
//! keydown/keyup, touch pads, joystick widget). A provider reduces it to a
//! per-tick directional intent so the motion controller never sees which
//! device produced it.

use glam::Vec2;

use crate::settings::ControlScheme;

/// Level-triggered keyboard flags (WASD / arrows / space)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyFlags {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub jump: bool,
}

impl KeyFlags {
    /// Discrete direction: +X is right, +Y is backward (world +Z)
    pub fn dir(&self) -> Vec2 {
        Vec2::new(
            (self.right as i32 - self.left as i32) as f32,
            (self.backward as i32 - self.forward as i32) as f32,
        )
    }
}

/// Touch-device state: four directional pads, a jump pad, and an optional
/// joystick vector (clamped to the unit disk by the widget)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TouchState {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    pub stick: Option<Vec2>,
}

/// Live device state, mutated by event handlers and read once per tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RawInput {
    pub keys: KeyFlags,
    pub touch: TouchState,
}

/// Per-tick directional/jump signal, decoupled from the producing device
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Intent {
    /// Directional intent: x in [-1,1], y in [-1,1] (y is world Z), or an
    /// unnormalized sum in the discrete-button variant
    pub dir: Vec2,
    pub jump: bool,
}

/// Reduces raw device state to an intent. Implementations are selected at
/// composition time from the control scheme setting.
pub trait IntentProvider {
    fn intent(&self, raw: &RawInput) -> Intent;
}

/// Discrete-button policy: a press on either source (keyboard or touch
/// button) counts
pub struct ButtonProvider;

impl IntentProvider for ButtonProvider {
    fn intent(&self, raw: &RawInput) -> Intent {
        let right = raw.keys.right || raw.touch.right;
        let left = raw.keys.left || raw.touch.left;
        let backward = raw.keys.backward || raw.touch.backward;
        let forward = raw.keys.forward || raw.touch.forward;

        Intent {
            dir: Vec2::new(
                (right as i32 - left as i32) as f32,
                (backward as i32 - forward as i32) as f32,
            ),
            jump: raw.keys.jump || raw.touch.jump,
        }
    }
}

/// Analog-stick policy: nonzero keyboard input takes priority over the
/// joystick vector
pub struct StickProvider;

impl IntentProvider for StickProvider {
    fn intent(&self, raw: &RawInput) -> Intent {
        let key_dir = raw.keys.dir();
        let dir = if key_dir != Vec2::ZERO {
            key_dir
        } else {
            raw.touch.stick.unwrap_or(Vec2::ZERO)
        };

        Intent {
            dir,
            jump: raw.keys.jump || raw.touch.jump,
        }
    }
}

/// Provider for a control scheme
pub fn provider_for(scheme: ControlScheme) -> &'static dyn IntentProvider {
    match scheme {
        ControlScheme::Buttons => &ButtonProvider,
        ControlScheme::Joystick => &StickProvider,
    }
}
