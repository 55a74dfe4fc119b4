//! Explosive — бочка/мина, взрывается от пули

use bevy::prelude::*;

use super::events::BulletHittable;
use crate::config::ExplosiveConfig;

#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
#[require(Transform)]
pub struct Explosive {
    pub damage: f32,
    /// Радиус overlap сферы
    pub radius: f32,
}

impl Default for Explosive {
    fn default() -> Self {
        Self::from_config(&ExplosiveConfig::default())
    }
}

impl Explosive {
    pub fn from_config(config: &ExplosiveConfig) -> Self {
        Self {
            damage: config.damage,
            radius: config.radius,
        }
    }

    /// Попадает ли точка в сферу взрыва (граница включительно)
    pub fn in_blast(&self, center: Vec3, location: Vec3) -> bool {
        center.distance_squared(location) <= self.radius * self.radius
    }
}

pub fn explosive_bundle(config: &ExplosiveConfig, transform: Transform) -> impl Bundle {
    (Explosive::from_config(config), BulletHittable::Explosive, transform)
}
