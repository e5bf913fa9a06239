//! The cheese wheel: input-driven movement, melting and level interactions

use glam::Vec3;

use super::body::Body;
use super::collider::{Collider, ColliderId};
use super::collision::resolve;
use super::entity::{Actor, FrameContext, Occupant};
use super::level::{Bounce, ColliderKind, Level};
use super::mesh::DeformableMesh;
use super::state::GameEvent;
use super::thermal::{HeatSource, ThermalState};
use crate::consts::{INERTIA_DECAY, SPIN_FACTOR};
use crate::decay_toward_zero;
use crate::error::LevelError;
use crate::input::Action;
use crate::tuning::Tuning;

#[derive(Debug, Clone)]
pub struct Player {
    pub body: Body,
    pub thermal: ThermalState,
    /// What heated or cooled the player on the last update
    pub heat_source: HeatSource,
    pub mesh: DeformableMesh,
    /// Jump already used by the current press
    jump_spent: bool,
    /// Bounce pads touched last frame; a pad only fires again after release
    bounce_contacts: Vec<ColliderId>,
}

impl Player {
    pub fn new(level: &Level, tuning: &Tuning) -> Result<Self, LevelError> {
        let spawn = level.player_spawn();
        Ok(Self {
            body: Body::new(spawn.position, spawn.radius),
            thermal: ThermalState::new(&tuning.thermal),
            heat_source: HeatSource::Ambient,
            mesh: DeformableMesh::new(level.player_mesh())?,
            jump_spent: false,
            bounce_contacts: Vec::new(),
        })
    }

    pub fn position(&self) -> Vec3 {
        self.body.position
    }

    fn steer(&mut self, ctx: &FrameContext<'_>, elapsed: f32, events: &mut Vec<GameEvent>) {
        let movement = &ctx.tuning.player;
        let axis = ctx.input.move_axis();

        self.body.accelerate(axis, movement.acceleration, movement.max_speed, elapsed);
        // Let go, or pushing against the current motion
        if axis == 0.0 || axis * self.body.velocity.y < 0.0 {
            self.body.velocity.y = decay_toward_zero(self.body.velocity.y, elapsed, INERTIA_DECAY);
        }

        let wants_jump = ctx.input.is_held(Action::Jump) || ctx.input.was_pressed(Action::Jump);
        if !wants_jump {
            self.jump_spent = false;
        } else if !self.jump_spent && self.body.is_grounded() && !self.body.jumping {
            let profile = movement.jump_profile();
            self.body.jump(profile.height, profile.air_time, profile.gravity);
            self.jump_spent = true;
            events.push(GameEvent::Jumped);
        }
    }

    /// Returns false when the player died and the rest of the frame is moot
    fn collide(&mut self, ctx: &FrameContext<'_>, events: &mut Vec<GameEvent>) -> bool {
        let level = ctx.level;
        self.body.standing_platform = None;

        let caught = ctx
            .occupants
            .iter()
            .enumerate()
            .filter(|(_, o)| o.lethal)
            .any(|(i, o)| {
                let hitbox = Collider::hitbox(ColliderId::Entity(i), o.position, o.radius);
                resolve(&mut self.body, &hitbox, true)
            });
        let hazard = level
            .of_kind(ColliderKind::Hazard)
            .any(|c| resolve(&mut self.body, c, true));
        if caught || hazard {
            log::debug!(
                "Player died at ({:.1}, {:.1})",
                self.body.position.y,
                self.body.position.z
            );
            events.push(GameEvent::Died);
            return false;
        }

        let passable = self.thermal.is_passable();
        for gate in level.of_kind(ColliderKind::Gate) {
            resolve(&mut self.body, gate, passable);
        }
        for solid in level.of_kind(ColliderKind::Solid) {
            resolve(&mut self.body, solid, false);
        }

        self.heat_source = HeatSource::Ambient;
        for plate in level.of_kind(ColliderKind::HeatPlate) {
            if resolve(&mut self.body, plate, true) {
                self.heat_source = HeatSource::Plate(ctx.stove.plate_setting(plate.id));
            }
        }
        if level
            .of_kind(ColliderKind::ColdPlate)
            .any(|c| resolve(&mut self.body, c, true))
        {
            self.heat_source = HeatSource::Cold;
        }

        let mut touching = Vec::new();
        for (bounce, pad) in level.bouncers() {
            if !resolve(&mut self.body, pad, true) {
                continue;
            }
            touching.push(pad.id);
            if self.bounce_contacts.contains(&pad.id) {
                continue;
            }
            let height = match bounce {
                Bounce::Weak => ctx.tuning.bounce.weak_height,
                Bounce::Strong => ctx.tuning.bounce.strong_height,
            };
            let profile = ctx.tuning.player.jump_profile();
            self.body.jump(height, profile.air_time, profile.gravity);
            log::debug!("Bounced off {:?} pad", bounce);
            events.push(GameEvent::Bounced {
                strong: bounce == Bounce::Strong,
            });
        }
        self.bounce_contacts = touching;

        if level
            .of_kind(ColliderKind::Goal)
            .any(|c| resolve(&mut self.body, c, true))
        {
            events.push(GameEvent::ReachedGoal);
        }

        true
    }
}

impl Actor for Player {
    fn update(&mut self, ctx: &FrameContext<'_>, elapsed: f32, events: &mut Vec<GameEvent>) {
        self.steer(ctx, elapsed, events);

        let gravity = ctx.tuning.player.jump_profile().gravity;
        self.body.apply_gravity(gravity, elapsed);
        self.body.integrate(elapsed);
        self.mesh.spin(self.body.velocity.y * elapsed * SPIN_FACTOR);

        if !self.collide(ctx, events) {
            return;
        }

        self.thermal.update(self.heat_source, &ctx.tuning.thermal, elapsed);

        let deform = &ctx.tuning.deform;
        self.mesh.advance_ripple(elapsed, deform.ripple_period);
        self.mesh.regenerate(self.thermal.level(), self.thermal.max(), deform);
    }

    fn occupant(&self) -> Occupant {
        Occupant {
            position: self.body.position,
            radius: self.body.radius,
            lethal: false,
        }
    }
}
