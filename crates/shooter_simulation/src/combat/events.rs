//! Combat events
//!
//! # Architecture
//!
//! **Host → ECS:**
//! - `BulletHit`: hitscan пули попал в entity с `BulletHittable`
//! - `EnemyWeaponHit`: weapon box врага задел персонажа
//! - `EnemyAttackIntent`: AI planner решил атаковать
//! - `DamageIntent` (см. `damage`) — урон от пули/оружия
//!
//! **ECS → Host:**
//! - `MontageRequest` (см. `animation`) — hit react / death / attack
//! - `Exploded`: взрыв (звук, частицы)
//! - `DamageDealt`, `EntityDied`

use bevy::prelude::*;

/// Как entity реагирует на попадание пули
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub enum BulletHittable {
    /// Stun roll + hit react (см. `EnemyCombat::on_bullet_hit`)
    Enemy,
    /// Взрывается и наносит урон по радиусу
    Explosive,
}

#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct BulletHit {
    pub target: Entity,
    pub shooter: Option<Entity>,
    pub location: Vec3,
}

#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct EnemyWeaponHit {
    pub enemy: Entity,
    pub victim: Entity,
    pub hit_location: Vec3,
}

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnemyAttackIntent {
    pub enemy: Entity,
}

#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct Exploded {
    pub explosive: Entity,
    pub location: Vec3,
    pub instigator: Option<Entity>,
}
