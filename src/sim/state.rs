//! Game state and core simulation types
//!
//! Everything that changes while playing lives here. The level itself is
//! immutable and shared by every entity.

use super::entity::{Actor, Occupant};
use super::level::Level;
use super::player::Player;
use super::pursuer::Pursuer;
use super::stove::Stove;
use super::thermal::HeatSetting;
use crate::error::LevelError;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// Player reached the goal
    Won,
}

/// Something that happened during a tick, for audio and UI collaborators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Jumped,
    Bounced { strong: bool },
    /// Lethal contact; the level restarts
    Died,
    ReachedGoal,
    StoveToggled(HeatSetting),
}

#[derive(Debug, Clone)]
pub struct GameState {
    pub level: Level,
    pub stove: Stove,
    pub tuning: Tuning,
    pub player: Player,
    /// Updated after the player, in spawn order
    pub pursuers: Vec<Pursuer>,
    pub phase: GamePhase,
    /// Seconds of play since the last restart
    pub time: f32,
    pub deaths: u32,
    /// Events from the last tick
    pub events: Vec<GameEvent>,
    /// Entities as spawned, restored on reset
    initial_player: Player,
    initial_pursuers: Vec<Pursuer>,
}

impl GameState {
    /// Build a fresh run. Fails if the level lacks something the game needs.
    pub fn new(level: Level, tuning: Tuning) -> Result<Self, LevelError> {
        tuning.validate()?;
        let stove = Stove::from_level(&level)?;
        let player = Player::new(&level, &tuning)?;
        let pursuers: Vec<Pursuer> = level
            .pursuer_spawns()
            .iter()
            .copied()
            .map(Pursuer::new)
            .collect();
        log::info!("Game started with {} pursuers", pursuers.len());
        Ok(Self {
            level,
            stove,
            tuning,
            initial_player: player.clone(),
            initial_pursuers: pursuers.clone(),
            player,
            pursuers,
            phase: GamePhase::Playing,
            time: 0.0,
            deaths: 0,
            events: Vec::new(),
        })
    }

    /// Throw away all entity state and put everyone back at their spawns.
    ///
    /// Stove settings and the death counter survive.
    pub fn reset(&mut self) {
        self.player = self.initial_player.clone();
        self.pursuers = self.initial_pursuers.clone();
        self.phase = GamePhase::Playing;
        self.time = 0.0;
        log::info!("Level reset (deaths: {})", self.deaths);
    }

    /// Pursuers as the player sees them
    pub fn occupants(&self) -> Vec<Occupant> {
        self.pursuers.iter().map(Actor::occupant).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;
    use crate::sim::level::fixtures::flat_scene_with;
    use crate::sim::level::{Scene, SceneTransform};
    use glam::Vec3;

    fn rat_scene() -> Scene {
        flat_scene_with([SceneTransform::new(
            "Rat",
            Vec3::new(0.0, 30.0, 1.0),
            Vec3::splat(1.0),
        )])
    }

    #[test]
    fn test_new_state() {
        let level = Level::from_scene(rat_scene()).unwrap();
        let state = GameState::new(level, Tuning::default()).unwrap();
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.pursuers.len(), 1);
        assert_eq!(state.stove.knobs().len(), 1);
        assert_eq!(state.occupants().len(), 1);
        assert!(state.occupants()[0].lethal);
    }

    #[test]
    fn test_bad_tuning_fails_at_construction() {
        let mut tuning = Tuning::default();
        tuning.thermal.min = 6.0;
        let level = Level::from_scene(rat_scene()).unwrap();
        let err = GameState::new(level, tuning).unwrap_err();
        assert!(matches!(err, LevelError::Tuning(ConfigError::Invalid(_))));

        let mut tuning = Tuning::default();
        tuning.thermal.max = 0.0;
        let level = Level::from_scene(rat_scene()).unwrap();
        assert!(GameState::new(level, tuning).is_err());

        let mut tuning = Tuning::default();
        tuning.pursuer.movement.jump_air_time = 0.0;
        let level = Level::from_scene(rat_scene()).unwrap();
        assert!(GameState::new(level, tuning).is_err());
    }

    #[test]
    fn test_reset_restores_spawns() {
        let level = Level::from_scene(rat_scene()).unwrap();
        let mut state = GameState::new(level, Tuning::default()).unwrap();
        state.player.body.position = Vec3::new(0.0, 50.0, 9.0);
        state.player.thermal.set_level(4.0);
        state.pursuers[0].body.position.y = -3.0;
        state.stove.set_all(HeatSetting::new(2));
        state.phase = GamePhase::Won;

        state.reset();
        assert_eq!(state.player.body.position, state.level.player_spawn().position);
        assert_eq!(state.player.thermal.level(), 0.0);
        assert_eq!(state.pursuers[0].body.position.y, 30.0);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.stove.knobs()[0].setting.level(), 2);
    }
}
