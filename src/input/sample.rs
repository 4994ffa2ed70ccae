//! Per-frame input snapshot

use glam::Vec2;

/// Movement-axis magnitude below which input counts as idle
pub const MOVE_DEADZONE: f32 = 0.1;

/// Immutable snapshot of player input for one simulation tick.
///
/// Produced fresh each frame by an input adapter and passed into the
/// controllers by value; the core never touches a device API.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputSample {
    /// Forward/backward axis in [-1, 1]
    pub move_forward: f32,
    /// Strafe axis in [-1, 1]
    pub move_right: f32,
    /// Sprint modifier held
    pub run: bool,
    /// Jump requested
    pub jump: bool,
    /// Crouch held
    pub crouch: bool,
    /// Look-axis deltas for this frame, unscaled
    pub look_delta: Vec2,
}

impl InputSample {
    /// Snapshot with movement axes clamped into [-1, 1]
    #[must_use]
    pub fn with_axes(move_forward: f32, move_right: f32) -> Self {
        Self {
            move_forward: move_forward.clamp(-1.0, 1.0),
            move_right: move_right.clamp(-1.0, 1.0),
            ..Default::default()
        }
    }

    /// True when either movement axis is past the deadzone
    #[must_use]
    pub fn has_movement(&self) -> bool {
        self.move_forward.abs() > MOVE_DEADZONE || self.move_right.abs() > MOVE_DEADZONE
    }
}
