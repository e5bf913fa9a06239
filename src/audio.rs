//! Audio signals
//!
//! Playback belongs to the platform layer. The game only decides which one-shot
//! effects fire and how loud the sizzle loop should be, then hands those scalars
//! to an [`AudioSink`].

use crate::settings::Settings;
use crate::sim::{GameEvent, GamePhase, GameState, HeatSource, ThermalState};
use crate::tuning::ThermalTuning;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    Jump,
    /// Small bounce pad
    Boing,
    /// Big bounce pad
    BigBoing,
    /// Caught by a rat or fell into a hazard
    Squish,
    /// Stove knob clicked
    KnobClick,
    /// Level cleared
    Fanfare,
}

impl SoundEffect {
    pub fn for_event(event: &GameEvent) -> Self {
        match event {
            GameEvent::Jumped => SoundEffect::Jump,
            GameEvent::Bounced { strong: false } => SoundEffect::Boing,
            GameEvent::Bounced { strong: true } => SoundEffect::BigBoing,
            GameEvent::Died => SoundEffect::Squish,
            GameEvent::StoveToggled(_) => SoundEffect::KnobClick,
            GameEvent::ReachedGoal => SoundEffect::Fanfare,
        }
    }
}

/// Whatever actually makes noise
pub trait AudioSink {
    fn play(&mut self, effect: SoundEffect, volume: f32);
    /// Set the looping sizzle volume; 0 stops it
    fn set_sizzle_volume(&mut self, volume: f32);
}

/// Sink that drops everything, for headless runs
#[derive(Debug, Default)]
pub struct SilentSink;

impl AudioSink for SilentSink {
    fn play(&mut self, effect: SoundEffect, volume: f32) {
        log::trace!("sfx {:?} at {:.2}", effect, volume);
    }

    fn set_sizzle_volume(&mut self, volume: f32) {
        log::trace!("sizzle at {:.2}", volume);
    }
}

/// Changes below this are not worth telling the sink about
const VOLUME_EPSILON: f32 = 1e-3;

/// Looping frying sound that follows the heating rate
#[derive(Debug, Clone, Default)]
pub struct SizzleLoop {
    volume: f32,
}

impl SizzleLoop {
    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// Loudness in [0, 1] for a heat source: the plate's heating rate relative
    /// to the hottest setting, silent when cooling
    pub fn intensity(source: HeatSource, thermal: &ThermalTuning) -> f32 {
        let HeatSource::Plate(_) = source else {
            return 0.0;
        };
        let rate = ThermalState::rate_for(source, thermal);
        let hottest = thermal
            .setting_multipliers
            .iter()
            .fold(0.0f32, |acc, m| acc.max(thermal.base_rate * m));
        if rate <= 0.0 || hottest <= 0.0 {
            0.0
        } else {
            (rate / hottest).min(1.0)
        }
    }

    /// Move to `target`; returns the new volume when it changed enough to send
    pub fn update(&mut self, target: f32) -> Option<f32> {
        if (target - self.volume).abs() < VOLUME_EPSILON {
            return None;
        }
        self.volume = target;
        Some(target)
    }
}

/// Turns game state into audio signals each frame
#[derive(Debug, Clone, Default)]
pub struct AudioManager {
    sizzle: SizzleLoop,
}

impl AudioManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sizzle(&self) -> &SizzleLoop {
        &self.sizzle
    }

    /// Fire effects for the last tick's events and refresh the sizzle loop
    pub fn process(&mut self, state: &GameState, settings: &Settings, sink: &mut dyn AudioSink) {
        let volume = settings.effective_volume();
        if volume > 0.0 {
            for event in &state.events {
                sink.play(SoundEffect::for_event(event), volume);
            }
        }

        let silenced = state.phase == GamePhase::Won
            || (state.phase == GamePhase::Paused && settings.mute_on_pause);
        let target = if silenced {
            0.0
        } else {
            SizzleLoop::intensity(state.player.heat_source, &state.tuning.thermal) * volume
        };
        if let Some(v) = self.sizzle.update(target) {
            sink.set_sizzle_volume(v);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::HeatSetting;
    use crate::sim::level::Level;
    use crate::sim::level::fixtures::flat_scene;
    use crate::tuning::Tuning;

    #[derive(Default)]
    struct Recorder {
        played: Vec<SoundEffect>,
        sizzle: Vec<f32>,
    }

    impl AudioSink for Recorder {
        fn play(&mut self, effect: SoundEffect, _volume: f32) {
            self.played.push(effect);
        }

        fn set_sizzle_volume(&mut self, volume: f32) {
            self.sizzle.push(volume);
        }
    }

    fn state() -> GameState {
        GameState::new(Level::from_scene(flat_scene()).unwrap(), Tuning::default()).unwrap()
    }

    #[test]
    fn test_intensity_follows_setting() {
        let thermal = ThermalTuning::default();
        assert_eq!(SizzleLoop::intensity(HeatSource::Ambient, &thermal), 0.0);
        assert_eq!(SizzleLoop::intensity(HeatSource::Cold, &thermal), 0.0);
        assert_eq!(SizzleLoop::intensity(HeatSource::Plate(HeatSetting::OFF), &thermal), 0.0);
        let hot = SizzleLoop::intensity(HeatSource::Plate(HeatSetting::new(2)), &thermal);
        assert!((hot - 0.5).abs() < 1e-6);
        let very_hot = SizzleLoop::intensity(HeatSource::Plate(HeatSetting::new(3)), &thermal);
        assert_eq!(very_hot, 1.0);
    }

    #[test]
    fn test_sizzle_only_sent_on_change() {
        let mut sizzle = SizzleLoop::default();
        assert_eq!(sizzle.update(0.0), None);
        assert_eq!(sizzle.update(0.5), Some(0.5));
        assert_eq!(sizzle.update(0.5), None);
        assert_eq!(sizzle.update(0.0), Some(0.0));
    }

    #[test]
    fn test_events_become_effects() {
        let mut state = state();
        state.events = vec![GameEvent::Jumped, GameEvent::Bounced { strong: true }];
        let mut manager = AudioManager::new();
        let mut sink = Recorder::default();
        manager.process(&state, &Settings::default(), &mut sink);
        assert_eq!(sink.played, vec![SoundEffect::Jump, SoundEffect::BigBoing]);
        assert!(sink.sizzle.is_empty());
    }

    #[test]
    fn test_muted_and_paused_are_silent() {
        let mut state = state();
        state.player.heat_source = HeatSource::Plate(HeatSetting::new(3));
        state.events = vec![GameEvent::Died];

        let mut manager = AudioManager::new();
        let mut sink = Recorder::default();
        let settings = Settings::default();
        manager.process(&state, &settings, &mut sink);
        assert_eq!(sink.sizzle, vec![settings.effective_volume()]);

        state.phase = GamePhase::Paused;
        manager.process(&state, &settings, &mut sink);
        assert_eq!(sink.sizzle.last(), Some(&0.0));

        let muted = Settings {
            muted: true,
            ..Settings::default()
        };
        let mut sink = Recorder::default();
        AudioManager::new().process(&state, &muted, &mut sink);
        assert!(sink.played.is_empty());
        assert!(sink.sizzle.is_empty());
    }
}
