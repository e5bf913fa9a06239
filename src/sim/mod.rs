//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering and
//! platform dependencies:
//! - Caller-supplied timestep only
//! - Stable update order (player, then pursuers in spawn order)
//! - Level geometry is read-only once loaded

pub mod body;
pub mod collider;
pub mod collision;
pub mod entity;
pub mod level;
pub mod mesh;
pub mod player;
pub mod pursuer;
pub mod raycast;
pub mod state;
pub mod stove;
pub mod thermal;
pub mod tick;

pub use body::{Body, JumpProfile};
pub use collider::{Collider, ColliderId};
pub use collision::{Contact, probe, resolve};
pub use entity::{Actor, FrameContext, Occupant};
pub use level::{Bounce, ColliderKind, Level, Scene, SceneTransform, Spawn};
pub use mesh::{DeformableMesh, MeltShape, MeshVertex, deform};
pub use player::Player;
pub use pursuer::Pursuer;
pub use raycast::{Ray, ray_box_intersect, world_box};
pub use state::{GameEvent, GamePhase, GameState};
pub use stove::Stove;
pub use thermal::{HeatSetting, HeatSource, ThermalState};
pub use tick::tick;
