//! Level layout built from a loaded scene
//!
//! The scene loader hands over named transforms. Names carry the meaning:
//!
//! | prefix          | role                                   |
//! |-----------------|----------------------------------------|
//! | `Cheese_Wheel`  | player spawn (exact name, required)    |
//! | `Rat`           | pursuer spawn                          |
//! | `Collision`     | solid platform                         |
//! | `Plate`         | stove-driven heat plate (one required) |
//! | `Cold_Plate`    | cooling plate (one required)           |
//! | `Switch`        | stove knob                             |
//! | `Gate`          | meltable barrier                       |
//! | `Bouncy_Weak`   | small bounce pad                       |
//! | `Bouncy_Strong` | big bounce pad                         |
//! | `Death`         | lethal hazard                          |
//! | `Goal`          | level exit                             |
//!
//! Anything else is scenery and ignored.

use std::sync::Arc;

use glam::{Quat, Vec3};

use super::collider::{Collider, ColliderId};
use super::mesh::MeshVertex;
use crate::error::LevelError;

pub const PLAYER_NAME: &str = "Cheese_Wheel";
pub const PURSUER_PREFIX: &str = "Rat";

/// A named transform from the scene file
#[derive(Debug, Clone, PartialEq)]
pub struct SceneTransform {
    pub name: String,
    pub position: Vec3,
    pub rotation: Quat,
    /// Half extents for boxes; Y is the radius for spawns
    pub scale: Vec3,
}

impl SceneTransform {
    pub fn new(name: impl Into<String>, position: Vec3, scale: Vec3) -> Self {
        Self {
            name: name.into(),
            position,
            rotation: Quat::IDENTITY,
            scale,
        }
    }

    pub fn rotated(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }
}

/// Everything the loader provides for one level
#[derive(Debug, Clone, Default)]
pub struct Scene {
    pub transforms: Vec<SceneTransform>,
    /// Canonical player mesh, contiguous position/normal/colour/uv
    pub player_mesh: Vec<MeshVertex>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bounce {
    Weak,
    Strong,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColliderKind {
    Solid,
    HeatPlate,
    ColdPlate,
    Switch,
    Gate,
    Bouncer(Bounce),
    Hazard,
    Goal,
}

impl ColliderKind {
    /// Classify a transform name; `None` for scenery
    pub fn from_name(name: &str) -> Option<Self> {
        const PREFIXES: [(&str, ColliderKind); 9] = [
            ("Collision", ColliderKind::Solid),
            ("Cold_Plate", ColliderKind::ColdPlate),
            ("Plate", ColliderKind::HeatPlate),
            ("Switch", ColliderKind::Switch),
            ("Gate", ColliderKind::Gate),
            ("Bouncy_Weak", ColliderKind::Bouncer(Bounce::Weak)),
            ("Bouncy_Strong", ColliderKind::Bouncer(Bounce::Strong)),
            ("Death", ColliderKind::Hazard),
            ("Goal", ColliderKind::Goal),
        ];
        PREFIXES
            .iter()
            .find(|(prefix, _)| name.starts_with(prefix))
            .map(|(_, kind)| *kind)
    }
}

#[derive(Debug, Clone)]
pub struct LevelCollider {
    pub name: String,
    pub kind: ColliderKind,
    pub collider: Collider,
}

/// Where an entity starts and how big it is
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spawn {
    pub position: Vec3,
    pub radius: f32,
}

impl Spawn {
    fn from_transform(t: &SceneTransform) -> Self {
        Self {
            position: t.position,
            radius: t.scale.y,
        }
    }
}

/// Static level data, built once and shared read-only by every entity
#[derive(Debug, Clone)]
pub struct Level {
    colliders: Vec<LevelCollider>,
    player_spawn: Spawn,
    pursuer_spawns: Vec<Spawn>,
    player_mesh: Arc<[MeshVertex]>,
}

impl Level {
    pub fn from_scene(scene: Scene) -> Result<Self, LevelError> {
        let mut player_spawn = None;
        let mut pursuer_spawns = Vec::new();
        let mut colliders = Vec::new();

        for t in &scene.transforms {
            if t.name == PLAYER_NAME {
                player_spawn = Some(Spawn::from_transform(t));
            } else if t.name.starts_with(PURSUER_PREFIX) {
                pursuer_spawns.push(Spawn::from_transform(t));
            } else if let Some(kind) = ColliderKind::from_name(&t.name) {
                let id = ColliderId::Level(colliders.len());
                colliders.push(LevelCollider {
                    name: t.name.clone(),
                    kind,
                    collider: Collider::new(id, t.position, t.rotation, t.scale),
                });
            }
        }

        let player_spawn =
            player_spawn.ok_or_else(|| LevelError::MissingTransform(PLAYER_NAME.to_string()))?;
        for (kind, label) in [
            (ColliderKind::HeatPlate, "heat plate"),
            (ColliderKind::ColdPlate, "cold plate"),
        ] {
            if !colliders.iter().any(|c| c.kind == kind) {
                return Err(LevelError::MissingCollider(label));
            }
        }
        if scene.player_mesh.is_empty() {
            return Err(LevelError::EmptyMesh);
        }

        log::info!(
            "Level loaded: {} colliders, {} pursuers, {} mesh vertices",
            colliders.len(),
            pursuer_spawns.len(),
            scene.player_mesh.len()
        );

        Ok(Self {
            colliders,
            player_spawn,
            pursuer_spawns,
            player_mesh: scene.player_mesh.into(),
        })
    }

    pub fn colliders(&self) -> &[LevelCollider] {
        &self.colliders
    }

    pub fn collider(&self, id: ColliderId) -> Option<&LevelCollider> {
        match id {
            ColliderId::Level(i) => self.colliders.get(i),
            ColliderId::Entity(_) => None,
        }
    }

    /// Colliders of one kind, in scene order
    pub fn of_kind(&self, kind: ColliderKind) -> impl Iterator<Item = &Collider> + '_ {
        self.colliders
            .iter()
            .filter(move |c| c.kind == kind)
            .map(|c| &c.collider)
    }

    /// Bounce pads with their strength
    pub fn bouncers(&self) -> impl Iterator<Item = (Bounce, &Collider)> + '_ {
        self.colliders.iter().filter_map(|c| match c.kind {
            ColliderKind::Bouncer(bounce) => Some((bounce, &c.collider)),
            _ => None,
        })
    }

    pub fn player_spawn(&self) -> Spawn {
        self.player_spawn
    }

    pub fn pursuer_spawns(&self) -> &[Spawn] {
        &self.pursuer_spawns
    }

    /// Shared handle to the immutable player source mesh
    pub fn player_mesh(&self) -> Arc<[MeshVertex]> {
        Arc::clone(&self.player_mesh)
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    /// Floor with its top at z = 0, the player resting on it at the origin,
    /// a heat plate at y = 20 with its switch, and a cold plate at y = -20.
    pub fn flat_scene() -> Scene {
        Scene {
            transforms: vec![
                SceneTransform::new(PLAYER_NAME, Vec3::new(0.0, 0.0, 1.0), Vec3::splat(1.0)),
                SceneTransform::new("Collision_Floor", Vec3::new(0.0, 0.0, -1.0), Vec3::new(0.0, 100.0, 1.0)),
                SceneTransform::new("Plate_A", Vec3::new(0.0, 20.0, 0.5), Vec3::new(0.0, 3.0, 0.5)),
                SceneTransform::new("Cold_Plate", Vec3::new(0.0, -20.0, 0.5), Vec3::new(0.0, 3.0, 0.5)),
                SceneTransform::new("Switch_A", Vec3::new(5.0, 20.0, 3.0), Vec3::splat(0.5)),
            ],
            player_mesh: vec![
                MeshVertex::new(Vec3::new(1.0, 0.0, -1.0), Vec3::Z, [255; 4], [0.0, 0.0]),
                MeshVertex::new(Vec3::new(-1.0, 0.0, -1.0), Vec3::Z, [255; 4], [1.0, 0.0]),
                MeshVertex::new(Vec3::new(0.0, 1.0, 1.0), Vec3::Z, [255; 4], [0.0, 1.0]),
                MeshVertex::new(Vec3::new(0.0, -1.0, 1.0), Vec3::Z, [255; 4], [1.0, 1.0]),
            ],
        }
    }

    pub fn flat_scene_with(extra: impl IntoIterator<Item = SceneTransform>) -> Scene {
        let mut scene = flat_scene();
        scene.transforms.extend(extra);
        scene
    }
}
