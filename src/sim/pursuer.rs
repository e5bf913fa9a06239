//! Rats: chase the player along the track when close enough

use glam::Vec3;

use super::body::Body;
use super::collision::resolve;
use super::entity::{Actor, FrameContext, Occupant};
use super::level::{ColliderKind, Spawn};
use super::state::GameEvent;
use crate::consts::INERTIA_DECAY;
use crate::decay_toward_zero;

/// Below this horizontal gap a pursuer stops steering
const CHASE_DEADZONE: f32 = 1e-3;

#[derive(Debug, Clone)]
pub struct Pursuer {
    pub body: Body,
}

impl Pursuer {
    pub fn new(spawn: Spawn) -> Self {
        Self {
            body: Body::new(spawn.position, spawn.radius),
        }
    }

    /// Signed steering direction toward `target`, or 0 when out of range
    pub fn chase_direction(&self, target: Option<Vec3>, aggro_radius: f32) -> f32 {
        let Some(target) = target else {
            return 0.0;
        };
        if target.distance(self.body.position) >= aggro_radius {
            return 0.0;
        }
        let gap = target.y - self.body.position.y;
        if gap.abs() < CHASE_DEADZONE {
            0.0
        } else {
            gap.signum()
        }
    }
}

impl Actor for Pursuer {
    fn update(&mut self, ctx: &FrameContext<'_>, elapsed: f32, _events: &mut Vec<GameEvent>) {
        let tuning = &ctx.tuning.pursuer;
        let movement = &tuning.movement;

        let direction = self.chase_direction(ctx.target, tuning.aggro_radius);
        if direction != 0.0 {
            self.body.accelerate(direction, movement.acceleration, movement.max_speed, elapsed);
        } else {
            self.body.velocity.y = decay_toward_zero(self.body.velocity.y, elapsed, INERTIA_DECAY);
        }

        self.body.apply_gravity(movement.jump_profile().gravity, elapsed);
        self.body.integrate(elapsed);

        // Rats never melt, so gates always stop them
        self.body.standing_platform = None;
        let level = ctx.level;
        for solid in level
            .of_kind(ColliderKind::Solid)
            .chain(level.of_kind(ColliderKind::Gate))
        {
            resolve(&mut self.body, solid, false);
        }
    }

    fn occupant(&self) -> Occupant {
        Occupant {
            position: self.body.position,
            radius: self.body.radius,
            lethal: true,
        }
    }
}
