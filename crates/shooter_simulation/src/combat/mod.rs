//! Combat system module
//!
//! ECS ответственность:
//! - Game state: health врагов и персонажа, stun, cooldowns
//! - Combat rules: hit direction → montage секция, stun roll, смерть
//! - Events: DamageDealt, EntityDied, Exploded, MontageRequest
//!
//! Host ответственность:
//! - Hitscan trace пуль → `BulletHit` (+ `DamageIntent` с уроном оружия)
//! - Weapon box overlap врага → `EnemyWeaponHit`
//! - Проигрывание montage и anim notifies → `MontageNotify`

use bevy::prelude::*;

pub mod damage;
pub mod enemy;
pub mod events;
pub mod explosive;
pub mod hit_direction;
pub mod reaction;
pub mod systems;

// Re-export основных типов
pub use damage::{DamageDealt, DamageIntent, DamageOutcome, Damageable, EntityDied};
pub use enemy::{enemy_bundle, BulletHitReaction, Enemy, EnemyCombat};
pub use events::{BulletHit, BulletHittable, EnemyAttackIntent, EnemyWeaponHit, Exploded};
pub use explosive::{explosive_bundle, Explosive};
pub use hit_direction::{classify_hit, classify_hit_on, HitDirection};
pub use reaction::{attack_section, death_section, hit_react_cooldown, hit_react_section, roll_stun};

use crate::SimulationSet;

/// Combat Plugin
///
/// Порядок выполнения (`SimulationSet::Combat`, после AI и items):
/// 1. handle_combat_timers: cooldowns истекли
/// 2. dispatch_bullet_hits: реакция на пули (может породить DamageIntent)
/// 3. process_enemy_weapon_hits: удары врагов (порождает DamageIntent)
/// 4. apply_damage: все DamageIntent этого тика
/// 5. process_enemy_attack_intents: новые атаки
/// 6. handle_montage_notifies: конец stun / death
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<EnemyCombat>()
            .register_type::<Explosive>()
            .add_event::<BulletHit>()
            .add_event::<EnemyWeaponHit>()
            .add_event::<EnemyAttackIntent>()
            .add_event::<Exploded>()
            .add_event::<DamageIntent>()
            .add_event::<DamageDealt>()
            .add_event::<EntityDied>();

        app.add_systems(
            FixedUpdate,
            (
                systems::handle_combat_timers,
                systems::dispatch_bullet_hits,
                systems::process_enemy_weapon_hits,
                systems::apply_damage,
                systems::process_enemy_attack_intents,
                systems::handle_montage_notifies,
            )
                .chain()
                .in_set(SimulationSet::Combat),
        );
    }
}
