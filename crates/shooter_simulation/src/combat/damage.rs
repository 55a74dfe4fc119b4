//! Damage — общий контракт для всего, что получает урон
//!
//! `Damageable` реализуют `EnemyCombat` и `CharacterVitals`.
//! Host (или combat системы) шлют `DamageIntent`, `apply_damage` применяет
//! урон и публикует `DamageDealt` / `EntityDied`.

use bevy::prelude::*;

use crate::components::CharacterVitals;

/// Результат одного применения урона
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamageOutcome {
    /// Сколько health реально снято
    pub applied: f32,
    /// Этот удар довёл health до 0
    pub killed: bool,
}

pub trait Damageable {
    fn health(&self) -> f32;
    fn set_health(&mut self, health: f32);

    /// Health не уходит ниже 0, отрицательный урон игнорируется
    fn take_damage(&mut self, amount: f32) -> DamageOutcome {
        let before = self.health();
        let after = (before - amount.max(0.0)).max(0.0);
        self.set_health(after);

        DamageOutcome {
            applied: before - after,
            killed: before > 0.0 && after <= 0.0,
        }
    }

    fn is_alive(&self) -> bool {
        self.health() > 0.0
    }
}

impl Damageable for CharacterVitals {
    fn health(&self) -> f32 {
        self.health
    }

    fn set_health(&mut self, health: f32) {
        self.health = health;
    }
}

/// Запрос: нанести урон
///
/// `hit_location` есть у точечного урона (пуля, удар) — death montage
/// выбирается по направлению; без него (взрыв) — DeathFromFront.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct DamageIntent {
    pub target: Entity,
    pub causer: Option<Entity>,
    pub amount: f32,
    pub hit_location: Option<Vec3>,
}

/// Событие: урон нанесён
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct DamageDealt {
    pub causer: Option<Entity>,
    pub target: Entity,
    pub amount: f32,
    pub target_died: bool,
}

/// Событие: entity умер (health дошёл до 0)
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityDied {
    pub entity: Entity,
    pub killer: Option<Entity>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_floors_at_zero() {
        let mut vitals = CharacterVitals::new(100.0, 0.25);
        let outcome = vitals.take_damage(150.0);

        assert_eq!(vitals.health, 0.0);
        assert_eq!(outcome.applied, 100.0);
        assert!(outcome.killed);
    }

    #[test]
    fn test_killing_blow_reported_once() {
        let mut vitals = CharacterVitals::new(30.0, 0.25);
        assert!(!vitals.take_damage(20.0).killed);
        assert!(vitals.take_damage(20.0).killed);
        // Уже мёртв — повторного kill нет
        let outcome = vitals.take_damage(20.0);
        assert!(!outcome.killed);
        assert_eq!(outcome.applied, 0.0);
    }

    #[test]
    fn test_negative_damage_ignored() {
        let mut vitals = CharacterVitals::new(50.0, 0.25);
        vitals.take_damage(-10.0);
        assert_eq!(vitals.health, 50.0);
    }
}
