//! Kinematic body: position, velocity and grounding for one character

use glam::Vec3;

use super::collider::ColliderId;

/// Gravity and launch speed derived once from a jump's apex and air time.
///
/// `gravity = 8h / t²` and `launch_speed = g·t / 2`, so a launch at
/// `launch_speed` peaks at exactly `h` after `t / 2` seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JumpProfile {
    pub height: f32,
    pub air_time: f32,
    pub gravity: f32,
    pub launch_speed: f32,
}

impl JumpProfile {
    pub fn new(height: f32, air_time: f32) -> Self {
        let gravity = 8.0 * height / (air_time * air_time);
        Self {
            height,
            air_time,
            gravity,
            launch_speed: gravity * air_time / 2.0,
        }
    }
}

/// A simulated circle in the YZ gameplay plane
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    /// World-space centre
    pub position: Vec3,
    pub velocity: Vec3,
    /// Collision radius
    pub radius: f32,
    /// Collider the body landed on during the last resolution pass
    pub standing_platform: Option<ColliderId>,
    pub jumping: bool,
}

impl Body {
    pub fn new(position: Vec3, radius: f32) -> Self {
        Self {
            position,
            velocity: Vec3::ZERO,
            radius,
            standing_platform: None,
            jumping: false,
        }
    }

    #[inline]
    pub fn is_grounded(&self) -> bool {
        self.standing_platform.is_some()
    }

    /// Pull the body down while it is not standing on anything.
    ///
    /// Grounded bodies keep a zero vertical speed so they cannot sink into the
    /// platform before the next resolution pass.
    pub fn apply_gravity(&mut self, gravity: f32, elapsed: f32) {
        if self.standing_platform.is_none() {
            self.velocity.z -= gravity * elapsed;
        }
    }

    /// Launch upward so the body is `height` above its take-off point after
    /// `air_time / 2` seconds under `gravity`.
    ///
    /// Callers check [`Body::is_grounded`] and `!jumping` first; calling this in
    /// mid-air simply re-launches.
    pub fn jump(&mut self, height: f32, air_time: f32, gravity: f32) {
        let half = air_time / 2.0;
        self.velocity.z = (height + 0.5 * gravity * half * half) / half;
        self.jumping = true;
        self.standing_platform = None;
    }

    /// Move by the current velocity
    pub fn integrate(&mut self, elapsed: f32) {
        self.position += self.velocity * elapsed;
    }

    /// Accelerate along Y toward `direction` (sign only), capped at `max_speed`
    pub fn accelerate(&mut self, direction: f32, acceleration: f32, max_speed: f32, elapsed: f32) {
        if direction < 0.0 {
            self.velocity.y = (self.velocity.y - acceleration * elapsed).max(-max_speed);
        } else if direction > 0.0 {
            self.velocity.y = (self.velocity.y + acceleration * elapsed).min(max_speed);
        }
    }
}
