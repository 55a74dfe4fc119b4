//! Конфигурация симуляции (RON)
//!
//! Все тюнинговые константы (скорости сглаживания, тайминги, шансы) живут в
//! `SimulationConfig` resource. Значения по умолчанию совпадают с игровыми
//! дефолтами, RON-файл может переопределить любое подмножество полей.
//!
//! ```ron
//! (
//!     enemy: (stun_chance: 0.75, hit_react_time_max: 2.0),
//!     items: (interp_duration: 1.0),
//! )
//! ```

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::shared::FloatCurve;

/// Ошибки загрузки конфигурации
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Корневой конфиг
#[derive(Resource, Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub locomotion: LocomotionConfig,
    pub items: ItemConfig,
    pub enemy: EnemyConfig,
    pub character: CharacterConfig,
    pub explosive: ExplosiveConfig,
}

/// Анимационный драйвер (lean + turn in place)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocomotionConfig {
    /// Скорость сглаживания lean (1/сек)
    pub lean_interp_speed: f32,
    /// Clamp lean сигнала (град/сек)
    pub lean_limit: f32,
    /// Максимальный |root yaw offset| пока играет turn-анимация
    pub turn_yaw_limit: f32,
}

impl Default for LocomotionConfig {
    fn default() -> Self {
        Self {
            lean_interp_speed: 6.0,
            lean_limit: 90.0,
            turn_yaw_limit: 90.0,
        }
    }
}

/// Предметы: interp к камере, бросок оружия, инвентарь
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemConfig {
    /// Длительность полёта предмета к камере (сек)
    pub interp_duration: f32,
    /// Скорость сглаживания XY во время полёта
    pub interp_xy_speed: f32,
    /// Сколько оружие "падает" после броска до возврата в Pickup (сек)
    pub throw_duration: f32,
    pub throw_impulse: f32,
    /// Наклон направления броска вокруг forward (град)
    pub throw_tilt: f32,
    pub inventory_capacity: usize,
    pub z_curve: FloatCurve,
    pub scale_curve: FloatCurve,
}

impl Default for ItemConfig {
    fn default() -> Self {
        Self {
            interp_duration: 0.7,
            interp_xy_speed: 30.0,
            throw_duration: 0.7,
            throw_impulse: 2000.0,
            throw_tilt: -20.0,
            inventory_capacity: 6,
            z_curve: FloatCurve::default_item_z(),
            scale_curve: FloatCurve::default_item_scale(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    pub max_health: f32,
    /// Вероятность stun при попадании пули [0, 1]
    pub stun_chance: f32,
    /// Интервал cooldown hit-react реакции (сек)
    pub hit_react_time_min: f32,
    pub hit_react_time_max: f32,
    pub health_bar_display_time: f32,
    pub attack_wait_time: f32,
    pub base_damage: f32,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            max_health: 100.0,
            stun_chance: 0.5,
            hit_react_time_min: 0.5,
            hit_react_time_max: 3.0,
            health_bar_display_time: 4.0,
            attack_wait_time: 1.0,
            base_damage: 20.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterConfig {
    pub max_health: f32,
    /// Шанс что удар врага оглушит персонажа
    pub stun_chance: f32,
}

impl Default for CharacterConfig {
    fn default() -> Self {
        Self {
            max_health: 100.0,
            stun_chance: 0.25,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplosiveConfig {
    pub damage: f32,
    /// Радиус overlap-сферы взрыва
    pub radius: f32,
}

impl Default for ExplosiveConfig {
    fn default() -> Self {
        Self {
            damage: 100.0,
            radius: 300.0,
        }
    }
}

impl SimulationConfig {
    /// Парсит RON и валидирует результат
    pub fn from_ron_str(source: &str) -> Result<Self, ConfigError> {
        let config: SimulationConfig = ron::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_ron_str(&source)
    }

    /// Проверка инвариантов (невалидный конфиг не применяется частично)
    pub fn validate(&self) -> Result<(), ConfigError> {
        let enemy = &self.enemy;
        check_chance("enemy.stun_chance", enemy.stun_chance)?;
        check_chance("character.stun_chance", self.character.stun_chance)?;

        if enemy.hit_react_time_min < 0.0 || enemy.hit_react_time_min > enemy.hit_react_time_max {
            return Err(ConfigError::Invalid(format!(
                "enemy.hit_react_time_min ({}) must be in [0, hit_react_time_max ({})]",
                enemy.hit_react_time_min, enemy.hit_react_time_max
            )));
        }

        check_positive("items.interp_duration", self.items.interp_duration)?;
        check_positive("items.throw_duration", self.items.throw_duration)?;
        check_positive("enemy.max_health", enemy.max_health)?;
        check_positive("character.max_health", self.character.max_health)?;
        check_positive("locomotion.turn_yaw_limit", self.locomotion.turn_yaw_limit)?;
        check_positive("locomotion.lean_limit", self.locomotion.lean_limit)?;

        if !self.items.z_curve.is_sorted() || !self.items.scale_curve.is_sorted() {
            return Err(ConfigError::Invalid("item curves must be sorted by time".into()));
        }

        Ok(())
    }
}

fn check_chance(name: &str, value: f32) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!("{} ({}) must be in [0, 1]", name, value)))
    }
}

fn check_positive(name: &str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!("{} ({}) must be > 0", name, value)))
    }
}
