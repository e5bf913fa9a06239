//! Stove knobs and the heat plates they drive
//!
//! Each knob is paired with its nearest plate when the level loads. Clicking a
//! knob cycles its setting and copies it to the paired plate; the player reads
//! the plate setting while standing on it.

use super::collider::{Collider, ColliderId};
use super::level::{ColliderKind, Level};
use super::raycast::{Ray, ray_box_intersect, world_box};
use super::thermal::HeatSetting;
use crate::error::LevelError;

#[derive(Debug, Clone)]
pub struct Knob {
    pub name: String,
    pub collider: Collider,
    pub setting: HeatSetting,
    /// Index into the stove's plate list
    pub plate: usize,
}

#[derive(Debug, Clone)]
pub struct Plate {
    pub collider: Collider,
    pub setting: HeatSetting,
}

#[derive(Debug, Clone, Default)]
pub struct Stove {
    knobs: Vec<Knob>,
    plates: Vec<Plate>,
}

impl Stove {
    /// Pair every knob with the closest plate. All plates start off.
    pub fn new(
        switches: impl IntoIterator<Item = (String, Collider)>,
        plates: impl IntoIterator<Item = Collider>,
    ) -> Result<Self, LevelError> {
        let plates: Vec<Plate> = plates
            .into_iter()
            .map(|collider| Plate {
                collider,
                setting: HeatSetting::OFF,
            })
            .collect();

        let knobs = switches
            .into_iter()
            .map(|(name, collider)| {
                let plate = nearest_plate(&plates, &collider)
                    .ok_or_else(|| LevelError::UnpairedSwitch(name.clone()))?;
                log::debug!("Switch {name} paired with plate {plate}");
                Ok(Knob {
                    name,
                    collider,
                    setting: HeatSetting::OFF,
                    plate,
                })
            })
            .collect::<Result<Vec<_>, LevelError>>()?;

        Ok(Self { knobs, plates })
    }

    /// Build from the level's `Switch*` and `Plate*` colliders
    pub fn from_level(level: &Level) -> Result<Self, LevelError> {
        let switches = level
            .colliders()
            .iter()
            .filter(|c| c.kind == ColliderKind::Switch)
            .map(|c| (c.name.clone(), c.collider));
        Self::new(switches, level.of_kind(ColliderKind::HeatPlate).copied())
    }

    pub fn knobs(&self) -> &[Knob] {
        &self.knobs
    }

    pub fn plates(&self) -> &[Plate] {
        &self.plates
    }

    /// Cycle the nearest knob under `ray`. Returns the knob's new setting.
    pub fn try_toggle(&mut self, ray: &Ray) -> Option<HeatSetting> {
        let (index, _) = self
            .knobs
            .iter()
            .enumerate()
            .filter_map(|(i, knob)| {
                let (center, half) = world_box(&knob.collider);
                ray_box_intersect(ray, center, half).map(|t| (i, t))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))?;

        let knob = &mut self.knobs[index];
        knob.setting = knob.setting.cycled();
        let setting = knob.setting;
        self.plates[knob.plate].setting = setting;

        log::debug!("Switch {} -> setting {}", knob.name, setting.level());
        Some(setting)
    }

    /// Force every knob (and its plate) to one setting
    pub fn set_all(&mut self, setting: HeatSetting) {
        for knob in &mut self.knobs {
            knob.setting = setting;
            self.plates[knob.plate].setting = setting;
        }
    }

    /// Setting of the plate with this collider, off when unknown
    pub fn plate_setting(&self, plate: ColliderId) -> HeatSetting {
        self.plates
            .iter()
            .find(|p| p.collider.id == plate)
            .map(|p| p.setting)
            .unwrap_or_default()
    }
}

fn nearest_plate(plates: &[Plate], from: &Collider) -> Option<usize> {
    plates
        .iter()
        .enumerate()
        .map(|(i, p)| (i, p.collider.position.distance_squared(from.position)))
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Quat, Vec3};

    fn boxed(index: usize, y: f32) -> Collider {
        Collider::new(
            ColliderId::Level(index),
            Vec3::new(0.0, y, 0.0),
            Quat::IDENTITY,
            Vec3::splat(1.0),
        )
    }

    fn two_burner_stove() -> Stove {
        Stove::new(
            vec![
                ("Switch_A".to_string(), boxed(0, -9.0)),
                ("Switch_B".to_string(), boxed(1, 9.0)),
            ],
            vec![boxed(2, -10.0), boxed(3, 10.0)],
        )
        .unwrap()
    }

    fn ray_at(y: f32) -> Ray {
        Ray::new(Vec3::new(-20.0, y, 0.0), Vec3::X)
    }

    #[test]
    fn test_knobs_pair_with_nearest_plate() {
        let stove = two_burner_stove();
        assert_eq!(stove.knobs()[0].plate, 0);
        assert_eq!(stove.knobs()[1].plate, 1);
    }

    #[test]
    fn test_toggle_cycles_paired_plate() {
        let mut stove = two_burner_stove();
        for expected in [1, 2, 3, 0] {
            let setting = stove.try_toggle(&ray_at(9.0)).unwrap();
            assert_eq!(setting.level(), expected);
            assert_eq!(stove.plate_setting(ColliderId::Level(3)).level(), expected);
            assert_eq!(stove.plate_setting(ColliderId::Level(2)), HeatSetting::OFF);
        }
        assert_eq!(stove.knobs()[1].setting, HeatSetting::OFF);
    }

    #[test]
    fn test_toggle_miss() {
        let mut stove = two_burner_stove();
        assert!(stove.try_toggle(&ray_at(0.0)).is_none());
    }

    #[test]
    fn test_switch_without_plates_is_an_error() {
        let err = Stove::new(vec![("Switch_A".to_string(), boxed(0, 0.0))], vec![]).unwrap_err();
        assert!(matches!(err, LevelError::UnpairedSwitch(name) if name == "Switch_A"));
    }

    #[test]
    fn test_from_level() {
        let level = Level::from_scene(crate::sim::level::fixtures::flat_scene()).unwrap();
        let stove = Stove::from_level(&level).unwrap();
        assert_eq!(stove.knobs().len(), 1);
        assert_eq!(stove.plates().len(), 1);
        assert_eq!(stove.knobs()[0].name, "Switch_A");
    }

    #[test]
    fn test_set_all() {
        let mut stove = two_burner_stove();
        stove.set_all(HeatSetting::new(2));
        assert_eq!(stove.plate_setting(ColliderId::Level(2)).level(), 2);
        assert_eq!(stove.plate_setting(ColliderId::Level(3)).level(), 2);
        assert_eq!(stove.plate_setting(ColliderId::Level(42)), HeatSetting::OFF);
    }
}
