//! Built-in kitchen level and a scripted run through it
//!
//! Used by the headless binary in place of a scene file.

use std::f32::consts::TAU;

use glam::Vec3;

use crate::consts::BODY_HEIGHT;
use crate::input::{Action, InputState};
use crate::sim::level::PLAYER_NAME;
use crate::sim::{GameState, HeatSetting, MeshVertex, Ray, Scene, SceneTransform};

const CHEESE: [u8; 4] = [240, 200, 60, 255];
const RIND: [u8; 4] = [200, 140, 30, 255];

/// Wheel of cheese rolling in the YZ plane: a cylinder around X, centred on the
/// origin, as a plain triangle list
pub fn cheese_wheel_mesh(radius: f32, half_width: f32, segments: u32) -> Vec<MeshVertex> {
    let segments = segments.max(3);
    let rim = |i: u32| {
        let a = i as f32 * TAU / segments as f32;
        (a.cos(), a.sin())
    };

    let mut vertices = Vec::with_capacity(segments as usize * 12);
    for i in 0..segments {
        let (c0, s0) = rim(i);
        let (c1, s1) = rim(i + 1);
        let u0 = i as f32 / segments as f32;
        let u1 = (i + 1) as f32 / segments as f32;

        // Flat faces
        for side in [1.0f32, -1.0] {
            let x = side * half_width;
            let normal = Vec3::X * side;
            let (a, b) = if side > 0.0 { ((c0, s0), (c1, s1)) } else { ((c1, s1), (c0, s0)) };
            vertices.push(MeshVertex::new(Vec3::new(x, 0.0, 0.0), normal, CHEESE, [0.5, 0.5]));
            vertices.push(MeshVertex::new(
                Vec3::new(x, a.0 * radius, a.1 * radius),
                normal,
                CHEESE,
                [0.5 + a.0 * 0.5, 0.5 + a.1 * 0.5],
            ));
            vertices.push(MeshVertex::new(
                Vec3::new(x, b.0 * radius, b.1 * radius),
                normal,
                CHEESE,
                [0.5 + b.0 * 0.5, 0.5 + b.1 * 0.5],
            ));
        }

        // Rind
        let n0 = Vec3::new(0.0, c0, s0);
        let n1 = Vec3::new(0.0, c1, s1);
        let p = |x: f32, n: Vec3| Vec3::new(x, n.y * radius, n.z * radius);
        let quad = [
            (p(half_width, n0), n0, [u0, 0.0]),
            (p(-half_width, n0), n0, [u0, 1.0]),
            (p(-half_width, n1), n1, [u1, 1.0]),
            (p(half_width, n0), n0, [u0, 0.0]),
            (p(-half_width, n1), n1, [u1, 1.0]),
            (p(half_width, n1), n1, [u1, 0.0]),
        ];
        vertices.extend(quad.map(|(pos, n, uv)| MeshVertex::new(pos, n, RIND, uv)));
    }
    vertices
}

/// A countertop run: stove plate, butter gate, cold plate, bounce pad, goal.
///
/// One rat sleeps far behind the start.
pub fn kitchen_scene() -> Scene {
    let radius = BODY_HEIGHT / 2.0;
    let t = SceneTransform::new;
    Scene {
        transforms: vec![
            t(PLAYER_NAME, Vec3::new(0.0, 0.0, radius), Vec3::splat(radius)),
            t("Rat_Pantry", Vec3::new(0.0, -50.0, 1.5), Vec3::splat(1.5)),
            t("Collision_Counter", Vec3::new(0.0, 40.0, -1.0), Vec3::new(5.0, 100.0, 1.0)),
            t("Plate_Front_Left", Vec3::new(0.0, 20.0, 0.5), Vec3::new(3.0, 6.0, 0.5)),
            t("Switch_Front_Left", Vec3::new(8.0, 20.0, 4.0), Vec3::splat(0.5)),
            t("Gate_Butter", Vec3::new(0.0, 40.0, 8.0), Vec3::new(3.0, 1.0, 8.0)),
            t("Cold_Plate_Ice", Vec3::new(0.0, 55.0, 0.5), Vec3::new(3.0, 6.0, 0.5)),
            t("Bouncy_Weak_Sponge", Vec3::new(0.0, 70.0, 0.25), Vec3::new(3.0, 3.0, 0.25)),
            t("Death_Drain", Vec3::new(0.0, -30.0, 0.5), Vec3::new(3.0, 3.0, 0.5)),
            t("Goal_Plate", Vec3::new(0.0, 120.0, 4.0), Vec3::new(3.0, 2.0, 4.0)),
            t("Kettle", Vec3::new(-6.0, 30.0, 6.0), Vec3::splat(3.0)),
        ],
        player_mesh: cheese_wheel_mesh(radius, 1.2, 24),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Leg {
    #[default]
    TurnKnob,
    ToPlate,
    Melt,
    Run,
}

/// Plays the kitchen level: crank the stove, melt on the plate, then run for
/// the goal through the butter gate
#[derive(Debug, Clone, Default)]
pub struct Autopilot {
    leg: Leg,
    deaths: u32,
}

impl Autopilot {
    /// Set this substep's input from the current state
    pub fn drive(&mut self, state: &GameState, input: &mut InputState) {
        if state.deaths != self.deaths {
            self.deaths = state.deaths;
            self.leg = Leg::TurnKnob;
            input.release(Action::MoveRight);
        }

        let player = &state.player;
        match self.leg {
            Leg::TurnKnob => {
                let Some(knob) = state.stove.knobs().first() else {
                    self.leg = Leg::Run;
                    return;
                };
                if knob.setting.level() == HeatSetting::MAX {
                    input.pointer_ray = None;
                    self.leg = Leg::ToPlate;
                } else {
                    let origin = knob.collider.position - Vec3::X * 20.0;
                    input.pointer_ray = Some(Ray::new(origin, Vec3::X));
                    input.press(Action::Interact);
                    input.release(Action::Interact);
                }
            }
            Leg::ToPlate => {
                input.press(Action::MoveRight);
                let plate_y = state
                    .stove
                    .plates()
                    .first()
                    .map_or(player.body.position.y, |p| p.collider.position.y);
                if player.body.position.y >= plate_y - 8.0 {
                    input.release(Action::MoveRight);
                    self.leg = Leg::Melt;
                }
            }
            Leg::Melt => {
                if player.thermal.level() >= player.thermal.max() * 0.8 {
                    input.press(Action::MoveRight);
                    self.leg = Leg::Run;
                    log::info!("Melted to {:.2}, running", player.thermal.level());
                }
            }
            Leg::Run => {
                if !input.is_held(Action::MoveRight) {
                    input.press(Action::MoveRight);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{ColliderKind, Level, tick};
    use crate::tuning::Tuning;

    #[test]
    fn test_wheel_mesh_shape() {
        let mesh = cheese_wheel_mesh(2.0, 0.5, 8);
        assert_eq!(mesh.len(), 8 * 12);
        assert_eq!(mesh.len() % 3, 0);
        for v in &mesh {
            let p = Vec3::from_array(v.position);
            assert!(p.x.abs() <= 0.5 + 1e-6);
            assert!(p.y.hypot(p.z) <= 2.0 + 1e-4);
            assert!((Vec3::from_array(v.normal).length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_kitchen_scene_loads() {
        let level = Level::from_scene(kitchen_scene()).unwrap();
        assert_eq!(level.pursuer_spawns().len(), 1);
        assert_eq!(level.of_kind(ColliderKind::Gate).count(), 1);
        assert_eq!(level.bouncers().count(), 1);
        assert_eq!(level.of_kind(ColliderKind::Hazard).count(), 1);
        assert!((level.player_spawn().radius - BODY_HEIGHT / 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_autopilot_cranks_the_stove() {
        let level = Level::from_scene(kitchen_scene()).unwrap();
        let mut state = GameState::new(level, Tuning::default()).unwrap();
        let mut input = InputState::default();
        let mut pilot = Autopilot::default();
        for _ in 0..5 {
            pilot.drive(&state, &mut input);
            tick(&mut state, &input, crate::consts::SIM_DT);
            input.end_frame();
        }
        assert_eq!(state.stove.plates()[0].setting.level(), HeatSetting::MAX);
        assert!(input.pointer_ray.is_none());
        assert!(input.is_held(Action::MoveRight));
    }
}
