//! Melt level of the player
//!
//! A single float driven by plate contact. Positive rates melt (raise the level),
//! negative rates cool it. The level is clamped after every change so the mesh
//! deformation can divide by the range safely.

use crate::tuning::ThermalTuning;

/// Stove knob position: off, warm, hot, very hot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HeatSetting(u8);

impl HeatSetting {
    pub const OFF: Self = Self(0);
    pub const MAX: u8 = 3;

    /// Build a setting, clamping anything past "very hot"
    pub fn new(level: u8) -> Self {
        Self(level.min(Self::MAX))
    }

    pub fn level(self) -> u8 {
        self.0
    }

    /// Next knob position, wrapping very hot back to off
    pub fn cycled(self) -> Self {
        Self((self.0 + 1) % (Self::MAX + 1))
    }

    /// Signed rate multiplier for this setting
    pub fn multiplier(self, tuning: &ThermalTuning) -> f32 {
        tuning.setting_multipliers[self.0 as usize]
    }
}

/// What the player is touching this frame
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum HeatSource {
    /// Nothing: ambient cooling applies
    #[default]
    Ambient,
    /// A stove plate at the given setting
    Plate(HeatSetting),
    /// A cold plate
    Cold,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThermalState {
    level: f32,
    /// Rate applied on the last update (level units per second)
    rate: f32,
    min: f32,
    max: f32,
}

impl ThermalState {
    /// Start fully solid
    pub fn new(tuning: &ThermalTuning) -> Self {
        Self {
            level: tuning.min,
            rate: 0.0,
            min: tuning.min,
            max: tuning.max,
        }
    }

    pub fn level(&self) -> f32 {
        self.level
    }

    pub fn rate(&self) -> f32 {
        self.rate
    }

    pub fn min(&self) -> f32 {
        self.min
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    pub fn midpoint(&self) -> f32 {
        (self.min + self.max) * 0.5
    }

    /// Melted enough to squeeze through meltable gates
    pub fn is_passable(&self) -> bool {
        self.level > self.midpoint()
    }

    pub fn set_level(&mut self, level: f32) {
        if !level.is_nan() {
            self.level = level.clamp(self.min, self.max);
        }
    }

    /// Rate a heat source applies
    pub fn rate_for(source: HeatSource, tuning: &ThermalTuning) -> f32 {
        match source {
            HeatSource::Ambient => -tuning.ambient_cooling.abs(),
            HeatSource::Plate(setting) => tuning.base_rate * setting.multiplier(tuning),
            HeatSource::Cold => tuning.base_rate * tuning.cold_multiplier,
        }
    }

    /// Apply one frame of heating or cooling
    pub fn update(&mut self, source: HeatSource, tuning: &ThermalTuning, elapsed: f32) {
        self.apply_rate(Self::rate_for(source, tuning), elapsed);
    }

    /// Apply an arbitrary signed rate, then clamp
    pub fn apply_rate(&mut self, rate: f32, elapsed: f32) {
        self.rate = rate;
        self.set_level(self.level + rate * elapsed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_setting_cycles() {
        let mut setting = HeatSetting::OFF;
        let seen: Vec<u8> = (0..5)
            .map(|_| {
                setting = setting.cycled();
                setting.level()
            })
            .collect();
        assert_eq!(seen, vec![1, 2, 3, 0, 1]);
        assert_eq!(HeatSetting::new(9).level(), 3);
    }

    #[test]
    fn test_plate_heats_and_ambient_cools() {
        let tuning = ThermalTuning::default();
        let mut thermal = ThermalState::new(&tuning);

        thermal.update(HeatSource::Plate(HeatSetting::new(3)), &tuning, 1.0);
        assert!((thermal.level() - 2.0).abs() < 1e-5);
        assert!(thermal.rate() > 0.0);

        thermal.update(HeatSource::Ambient, &tuning, 1.0);
        assert!((thermal.level() - 1.5).abs() < 1e-5);

        thermal.update(HeatSource::Cold, &tuning, 1.0);
        assert_eq!(thermal.level(), tuning.min);
    }

    #[test]
    fn test_off_plate_holds_level() {
        let tuning = ThermalTuning::default();
        let mut thermal = ThermalState::new(&tuning);
        thermal.set_level(2.0);
        thermal.update(HeatSource::Plate(HeatSetting::OFF), &tuning, 3.0);
        assert_eq!(thermal.level(), 2.0);
    }

    #[test]
    fn test_passable_past_midpoint() {
        let tuning = ThermalTuning::default();
        let mut thermal = ThermalState::new(&tuning);
        assert!(!thermal.is_passable());
        thermal.set_level(tuning.max);
        assert!(thermal.is_passable());
        thermal.set_level(thermal.midpoint());
        assert!(!thermal.is_passable());
    }

    proptest! {
        #[test]
        fn prop_level_always_clamped(
            steps in proptest::collection::vec((-1.0e6f32..1.0e6, 0.0f32..2.0), 1..50)
        ) {
            let tuning = ThermalTuning::default();
            let mut thermal = ThermalState::new(&tuning);
            for (rate, elapsed) in steps {
                thermal.apply_rate(rate, elapsed);
                prop_assert!(thermal.level() >= tuning.min && thermal.level() <= tuning.max);
            }
        }
    }
}
