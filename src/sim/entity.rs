//! Shared per-frame protocol for everything that moves

use glam::Vec3;

use super::level::Level;
use super::state::GameEvent;
use super::stove::Stove;
use crate::input::InputState;
use crate::tuning::Tuning;

/// Snapshot of an entity other actors may collide with this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Occupant {
    pub position: Vec3,
    pub radius: f32,
    /// Touching it kills the player
    pub lethal: bool,
}

/// Read-only view of the world handed to each actor update
#[derive(Debug, Clone, Copy)]
pub struct FrameContext<'a> {
    pub level: &'a Level,
    pub stove: &'a Stove,
    pub tuning: &'a Tuning,
    pub input: &'a InputState,
    /// Where pursuers head (the player's position)
    pub target: Option<Vec3>,
    /// Other entities, captured before the update pass
    pub occupants: &'a [Occupant],
}

/// An animate entity stepped once per frame
pub trait Actor {
    /// Advance by `elapsed` seconds, reporting gameplay outcomes to `events`
    fn update(&mut self, ctx: &FrameContext<'_>, elapsed: f32, events: &mut Vec<GameEvent>);

    /// How this actor appears to the others
    fn occupant(&self) -> Occupant;
}
