//! Melt Runner - a side-on platformer starring a cheese wheel that melts
//!
//! Core modules:
//! - `sim`: Frame-stepped simulation (bodies, collisions, heat, mesh deformation)
//! - `input`: Logical actions and button state
//! - `renderer`: Renderer collaborator interface (vertex buffer uploads)
//! - `audio`: Audio collaborator interface (loop volume, mute)
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences
//! - `demo`: Built-in kitchen level and its autopilot

pub mod audio;
pub mod demo;
pub mod error;
pub mod input;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::{ConfigError, LevelError};
pub use settings::Settings;
pub use tuning::Tuning;

use glam::Vec3;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Thermal range of the melt level
    pub const MELT_MIN: f32 = 0.0;
    pub const MELT_MAX: f32 = 5.0;

    /// Height of a character body in world units
    pub const BODY_HEIGHT: f32 = 6.24;
    /// Default jump apex (two body heights)
    pub const JUMP_HEIGHT: f32 = BODY_HEIGHT * 2.0;
    /// Total time spent in the air for a full jump (up and down)
    pub const JUMP_AIR_TIME: f32 = 0.8;

    /// Player horizontal acceleration
    pub const PLAYER_ACCELERATION: f32 = 7.5 * 4.0;
    /// Player max speed: travels two jump heights over one full jump
    pub const PLAYER_MAX_SPEED: f32 = (JUMP_HEIGHT * 2.0) / JUMP_AIR_TIME;

    /// Pursuer max speed (well below the player's)
    pub const PURSUER_MAX_SPEED: f32 = PLAYER_MAX_SPEED / 2.5;
    /// Distance at which a pursuer starts chasing
    pub const PURSUER_AGGRO_RADIUS: f32 = 40.0;

    /// First-order lag rate used to bring horizontal speed back to rest
    pub const INERTIA_DECAY: f32 = 10.0;

    /// Bounce pad apex heights
    pub const BOUNCE_WEAK_HEIGHT: f32 = BODY_HEIGHT * 4.0;
    pub const BOUNCE_STRONG_HEIGHT: f32 = BODY_HEIGHT * 8.5;

    /// Below this distance a contact normal is considered degenerate
    pub const CONTACT_EPSILON: f32 = 1e-4;
    /// Minimum up component of a contact normal to count as standing (cos 45°)
    pub const GROUND_NORMAL_MIN_Z: f32 = std::f32::consts::FRAC_1_SQRT_2;

    /// Visual spin applied per unit of horizontal travel
    pub const SPIN_FACTOR: f32 = 0.5;
}

/// World up axis (the level is authored Z-up)
pub const UP: Vec3 = Vec3::Z;

/// Remove the axis orthogonal to the gameplay plane.
///
/// Gameplay happens in the YZ plane; X only exists for rendering depth.
#[inline]
pub fn flatten(v: Vec3) -> Vec3 {
    Vec3::new(0.0, v.y, v.z)
}

/// First-order lag toward zero: `v -= v * dt * rate`
#[inline]
pub fn decay_toward_zero(v: f32, dt: f32, rate: f32) -> f32 {
    v - v * dt * rate
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flatten_drops_depth_axis() {
        let v = flatten(Vec3::new(3.0, -2.0, 7.0));
        assert_eq!(v, Vec3::new(0.0, -2.0, 7.0));
    }

    #[test]
    fn test_decay_toward_zero() {
        let v = decay_toward_zero(10.0, 0.01, consts::INERTIA_DECAY);
        assert!((v - 9.0).abs() < 1e-5);
        assert_eq!(decay_toward_zero(0.0, 0.5, 10.0), 0.0);
    }
}
