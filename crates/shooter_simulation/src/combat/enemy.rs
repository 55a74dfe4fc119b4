//! Enemy combat state: health, stun, hit react cooldown, attack cooldown

use bevy::prelude::*;
use rand::Rng;

use super::damage::Damageable;
use super::events::BulletHittable;
use super::hit_direction::classify_hit_on;
use super::reaction::{death_section, hit_react_cooldown, hit_react_section, roll_stun, DEATH_FROM_FRONT};
use crate::ai::{EnemyAiContext, PatrolRoute};
use crate::config::EnemyConfig;

/// Маркер врага
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
#[require(Transform, EnemyCombat, EnemyAiContext = EnemyAiContext::new())]
pub struct Enemy;

#[derive(Component, Debug, Clone, PartialEq, Reflect)]
#[reflect(Component)]
pub struct EnemyCombat {
    pub health: f32,
    pub max_health: f32,
    /// [0, 1]
    pub stun_chance: f32,
    /// false пока идёт hit-react cooldown
    pub can_hit_react: bool,
    pub hit_react_time_min: f32,
    pub hit_react_time_max: f32,
    pub stunned: bool,
    /// Die уже вызван (повторная смерть игнорируется)
    pub dying: bool,
    pub can_attack: bool,
    pub attack_wait_time: f32,
    pub base_damage: f32,
    pub health_bar_visible: bool,
    pub health_bar_display_time: f32,
}

impl Default for EnemyCombat {
    fn default() -> Self {
        Self::from_config(&EnemyConfig::default())
    }
}

/// Что host должен сделать после попадания пули
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BulletHitReaction {
    /// Показать health bar на `health_bar_display_time` (таймер перезапускается)
    pub show_health_bar: bool,
    pub stunned: bool,
    /// Hit react секция (None пока идёт cooldown)
    pub montage_section: Option<&'static str>,
    /// Когда снова можно играть hit react
    pub hit_react_cooldown: Option<f32>,
}

impl EnemyCombat {
    pub fn from_config(config: &EnemyConfig) -> Self {
        Self {
            health: config.max_health,
            max_health: config.max_health,
            stun_chance: config.stun_chance,
            can_hit_react: true,
            hit_react_time_min: config.hit_react_time_min,
            hit_react_time_max: config.hit_react_time_max,
            stunned: false,
            dying: false,
            can_attack: true,
            attack_wait_time: config.attack_wait_time,
            base_damage: config.base_damage,
            health_bar_visible: false,
            health_bar_display_time: config.health_bar_display_time,
        }
    }

    /// Реакция на попадание пули
    ///
    /// Stun применяется всегда при удачном roll; montage + cooldown — только
    /// если hit react не на cooldown. Мёртвый враг не реагирует.
    pub fn on_bullet_hit<R: Rng + ?Sized>(
        &mut self,
        transform: &Transform,
        hit_location: Vec3,
        rng: &mut R,
    ) -> BulletHitReaction {
        if self.dying {
            return BulletHitReaction::default();
        }

        self.health_bar_visible = true;
        let mut reaction = BulletHitReaction {
            show_health_bar: true,
            ..Default::default()
        };

        if !roll_stun(rng, self.stun_chance) {
            return reaction;
        }

        self.stunned = true;
        reaction.stunned = true;

        if self.can_hit_react {
            let direction = classify_hit_on(transform, hit_location);
            reaction.montage_section = Some(hit_react_section(direction));
            reaction.hit_react_cooldown = Some(hit_react_cooldown(
                rng,
                self.hit_react_time_min,
                self.hit_react_time_max,
            ));
            self.can_hit_react = false;
        }

        reaction
    }

    /// Смерть (один раз). Возвращает death секцию.
    ///
    /// С точкой попадания — направленная секция, без (взрыв) — DeathFromFront.
    pub fn die(&mut self, transform: &Transform, hit_location: Option<Vec3>) -> Option<&'static str> {
        if self.dying {
            return None;
        }
        self.dying = true;
        self.health_bar_visible = false;

        Some(match hit_location {
            Some(location) => death_section(classify_hit_on(transform, location)),
            None => DEATH_FROM_FRONT,
        })
    }

    /// Начать атаку: false если ещё cooldown или враг умирает
    pub fn try_begin_attack(&mut self) -> bool {
        if !self.can_attack || self.dying {
            return false;
        }
        self.can_attack = false;
        true
    }
}

impl Damageable for EnemyCombat {
    fn health(&self) -> f32 {
        self.health
    }

    fn set_health(&mut self, health: f32) {
        self.health = health;
    }
}

/// Враг со всеми компонентами (BulletHittable tag + patrol маршрут)
pub fn enemy_bundle(config: &EnemyConfig, transform: Transform, route: PatrolRoute) -> impl Bundle {
    (
        Enemy,
        EnemyCombat::from_config(config),
        BulletHittable::Enemy,
        transform,
        route,
    )
}
