//! Data-driven game balance
//!
//! Every number the simulation reads lives here so a level designer can tweak a
//! JSON file instead of recompiling. Missing fields fall back to the defaults in
//! [`crate::consts`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;
use crate::sim::body::JumpProfile;

/// Horizontal movement and jump shape for one entity kind
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementTuning {
    pub acceleration: f32,
    pub max_speed: f32,
    /// Apex of a normal jump
    pub jump_height: f32,
    /// Total up-and-down time of a normal jump
    pub jump_air_time: f32,
}

impl Default for MovementTuning {
    fn default() -> Self {
        Self {
            acceleration: PLAYER_ACCELERATION,
            max_speed: PLAYER_MAX_SPEED,
            jump_height: JUMP_HEIGHT,
            jump_air_time: JUMP_AIR_TIME,
        }
    }
}

impl MovementTuning {
    fn validate(&self, owner: &str) -> Result<(), ConfigError> {
        for (field, value) in [
            ("acceleration", self.acceleration),
            ("max_speed", self.max_speed),
            ("jump_height", self.jump_height),
            ("jump_air_time", self.jump_air_time),
        ] {
            if !value.is_finite() {
                return Err(invalid(format!("{owner}.{field} must be finite, got {value}")));
            }
        }
        if self.jump_air_time <= 0.0 {
            return Err(invalid(format!(
                "{owner}.jump_air_time must be positive, got {}",
                self.jump_air_time
            )));
        }
        Ok(())
    }

    /// Gravity and launch speed derived from the jump shape
    pub fn jump_profile(&self) -> JumpProfile {
        JumpProfile::new(self.jump_height, self.jump_air_time)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PursuerTuning {
    pub movement: MovementTuning,
    pub aggro_radius: f32,
}

impl Default for PursuerTuning {
    fn default() -> Self {
        Self {
            movement: MovementTuning {
                max_speed: PURSUER_MAX_SPEED,
                ..MovementTuning::default()
            },
            aggro_radius: PURSUER_AGGRO_RADIUS,
        }
    }
}

/// Melt level range and the rates that move it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThermalTuning {
    pub min: f32,
    pub max: f32,
    /// Rate (level units per second) a heat plate applies at multiplier 1
    pub base_rate: f32,
    /// Passive cooling rate while touching no plate
    pub ambient_cooling: f32,
    /// Stove setting (off, warm, hot, very hot) to signed rate multiplier
    pub setting_multipliers: [f32; 4],
    /// Multiplier applied while touching a cold plate (negative cools)
    pub cold_multiplier: f32,
}

impl Default for ThermalTuning {
    fn default() -> Self {
        Self {
            min: MELT_MIN,
            max: MELT_MAX,
            base_rate: 1.0,
            ambient_cooling: 0.1 * MELT_MAX,
            setting_multipliers: [0.0, 0.5, 1.0, 2.0],
            cold_multiplier: -2.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BounceTuning {
    pub weak_height: f32,
    pub strong_height: f32,
}

impl Default for BounceTuning {
    fn default() -> Self {
        Self {
            weak_height: BOUNCE_WEAK_HEIGHT,
            strong_height: BOUNCE_STRONG_HEIGHT,
        }
    }
}

/// Shape of the melt deformation applied to the player mesh
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeformTuning {
    /// How far pooled vertices spread sideways per unit of melt factor
    pub spread: f32,
    /// Colour melted vertices blend toward (RGBA8)
    pub molten_color: [u8; 4],
    /// Ripple height used for normal reconstruction (0 = no ripple)
    pub ripple_amplitude: f32,
    /// Ripple cycles per world unit of radial distance
    pub ripple_frequency: f32,
    /// Seconds per ripple animation cycle
    pub ripple_period: f32,
    /// Lift applied to every deformed vertex to avoid z-fighting with the floor
    pub base_lift: f32,
}

impl Default for DeformTuning {
    fn default() -> Self {
        Self {
            spread: 1.0,
            molten_color: [60, 10, 2, 255],
            ripple_amplitude: 0.0,
            ripple_frequency: 0.25,
            ripple_period: 5.0,
            base_lift: 0.1,
        }
    }
}

fn invalid(message: String) -> ConfigError {
    ConfigError::Invalid(message)
}

fn finite(name: &str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(invalid(format!("{name} must be finite, got {value}")))
    }
}

/// Complete tuning set
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub player: MovementTuning,
    pub pursuer: PursuerTuning,
    pub thermal: ThermalTuning,
    pub bounce: BounceTuning,
    pub deform: DeformTuning,
}

impl Tuning {
    /// Parse and validate
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values that would make a per-frame update panic or go NaN
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.player.validate("player")?;
        self.pursuer.movement.validate("pursuer")?;
        finite("pursuer.aggro_radius", self.pursuer.aggro_radius)?;

        let thermal = &self.thermal;
        for (name, value) in [
            ("thermal.min", thermal.min),
            ("thermal.max", thermal.max),
            ("thermal.base_rate", thermal.base_rate),
            ("thermal.ambient_cooling", thermal.ambient_cooling),
            ("thermal.cold_multiplier", thermal.cold_multiplier),
        ] {
            finite(name, value)?;
        }
        for value in thermal.setting_multipliers {
            finite("thermal.setting_multipliers", value)?;
        }
        if thermal.max <= 0.0 {
            return Err(invalid(format!("thermal.max must be positive, got {}", thermal.max)));
        }
        if thermal.min >= thermal.max {
            return Err(invalid(format!(
                "thermal.min ({}) must be below thermal.max ({})",
                thermal.min, thermal.max
            )));
        }

        finite("bounce.weak_height", self.bounce.weak_height)?;
        finite("bounce.strong_height", self.bounce.strong_height)?;

        let deform = &self.deform;
        for (name, value) in [
            ("deform.spread", deform.spread),
            ("deform.ripple_amplitude", deform.ripple_amplitude),
            ("deform.ripple_frequency", deform.ripple_frequency),
            ("deform.ripple_period", deform.ripple_period),
            ("deform.base_lift", deform.base_lift),
        ] {
            finite(name, value)?;
        }
        Ok(())
    }

    /// Load tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "thermal": { "base_rate": 3.0 } }"#).unwrap();
        assert_eq!(tuning.thermal.base_rate, 3.0);
        assert_eq!(tuning.thermal.max, MELT_MAX);
        assert_eq!(tuning.player, MovementTuning::default());
    }

    #[test]
    fn test_bad_json_is_an_error() {
        assert!(matches!(
            Tuning::from_json("{ not json"),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Tuning::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    fn rejected(json: &str) -> String {
        match Tuning::from_json(json) {
            Err(ConfigError::Invalid(message)) => message,
            other => panic!("expected invalid tuning for {json}, got {other:?}"),
        }
    }

    #[test]
    fn test_default_tuning_is_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_inverted_thermal_range_rejected() {
        assert!(rejected(r#"{ "thermal": { "min": 6.0 } }"#).contains("thermal.min"));
        assert!(rejected(r#"{ "thermal": { "min": 5.0 } }"#).contains("thermal.min"));
    }

    #[test]
    fn test_non_positive_thermal_max_rejected() {
        assert!(rejected(r#"{ "thermal": { "max": 0.0 } }"#).contains("thermal.max"));
        assert!(rejected(r#"{ "thermal": { "min": -2.0, "max": -1.0 } }"#).contains("thermal.max"));
    }

    #[test]
    fn test_non_positive_air_time_rejected() {
        assert!(rejected(r#"{ "player": { "jump_air_time": 0.0 } }"#).contains("player.jump_air_time"));
        assert!(
            rejected(r#"{ "pursuer": { "movement": { "jump_air_time": -1.0 } } }"#)
                .contains("pursuer.jump_air_time")
        );
    }

    #[test]
    fn test_non_finite_values_rejected() {
        // JSON cannot spell NaN or infinity, so these are built in code
        let mut tuning = Tuning::default();
        tuning.thermal.base_rate = f32::NAN;
        assert!(matches!(tuning.validate(), Err(ConfigError::Invalid(_))));

        let mut tuning = Tuning::default();
        tuning.player.max_speed = f32::INFINITY;
        assert!(matches!(tuning.validate(), Err(ConfigError::Invalid(_))));

        let mut tuning = Tuning::default();
        tuning.thermal.setting_multipliers[3] = f32::NEG_INFINITY;
        assert!(matches!(tuning.validate(), Err(ConfigError::Invalid(_))));

        let mut tuning = Tuning::default();
        tuning.deform.spread = f32::NAN;
        assert!(matches!(tuning.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_pursuer_slower_than_player() {
        let tuning = Tuning::default();
        assert!(tuning.pursuer.movement.max_speed < tuning.player.max_speed);
    }
}
