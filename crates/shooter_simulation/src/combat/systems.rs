//! Combat system implementations
//!
//! # Systems (`SimulationSet::Combat`)
//!
//! - `handle_combat_timers`: hit react / attack / health bar таймеры
//! - `dispatch_bullet_hits`: `BulletHit` → реакция по `BulletHittable` tag
//! - `process_enemy_weapon_hits`: stun персонажа + урон
//! - `apply_damage`: `DamageIntent` → health, смерть
//! - `process_enemy_attack_intents`: attack montage + cooldown
//! - `handle_montage_notifies`: конец stun, удаление трупов

use bevy::prelude::*;

use super::damage::{DamageDealt, DamageIntent, Damageable, EntityDied};
use super::enemy::EnemyCombat;
use super::events::{BulletHit, BulletHittable, EnemyAttackIntent, EnemyWeaponHit, Exploded};
use super::explosive::Explosive;
use super::hit_direction::classify_hit_on;
use super::reaction::{attack_section, hit_react_section, roll_stun};
use crate::ai::EnemyAiContext;
use crate::animation::{MontageKind, MontageNotify, MontageRequest};
use crate::components::{CharacterCombat, CharacterVitals, CombatState};
use crate::timers::{TimerFired, TimerKey, TimerKind, TimerScheduler};
use crate::{log, log_warning, DeterministicRng};

/// Таймеры врагов: hit react cooldown, attack cooldown, скрытие health bar
pub fn handle_combat_timers(
    mut fired: EventReader<TimerFired>,
    mut enemies: Query<(&mut EnemyCombat, Option<&mut EnemyAiContext>)>,
) {
    for event in fired.read() {
        let Ok((mut enemy, context)) = enemies.get_mut(event.key.entity) else {
            continue;
        };

        match event.key.kind {
            TimerKind::HitReactReset => enemy.can_hit_react = true,
            TimerKind::AttackReset => {
                enemy.can_attack = true;
                if let Some(mut context) = context {
                    context.can_attack = true;
                }
            }
            TimerKind::HealthBarHide => enemy.health_bar_visible = false,
            TimerKind::ItemInterp | TimerKind::WeaponThrow => {}
        }
    }
}

/// `BulletHit` → реакция по tag цели
///
/// - Enemy: health bar + stun roll + hit react montage
/// - Explosive: урон всем Damageable в радиусе, `Exploded`, despawn
pub fn dispatch_bullet_hits(
    mut commands: Commands,
    mut hits: EventReader<BulletHit>,
    hittables: Query<&BulletHittable>,
    mut enemies: Query<(&mut EnemyCombat, &Transform, Option<&mut EnemyAiContext>)>,
    explosives: Query<(&Explosive, &Transform)>,
    damageables: Query<(Entity, &Transform), Or<(With<EnemyCombat>, With<CharacterVitals>)>>,
    mut rng: ResMut<DeterministicRng>,
    mut scheduler: ResMut<TimerScheduler>,
    mut montages: EventWriter<MontageRequest>,
    mut damage_intents: EventWriter<DamageIntent>,
    mut exploded_events: EventWriter<Exploded>,
) {
    // Несколько пуль в одну бочку за тик → один взрыв
    let mut detonated: Vec<Entity> = Vec::new();

    for hit in hits.read() {
        let Ok(hittable) = hittables.get(hit.target) else {
            continue;
        };

        match hittable {
            BulletHittable::Enemy => {
                let Ok((mut enemy, transform, context)) = enemies.get_mut(hit.target) else {
                    log_warning(&format!("BulletHittable::Enemy {:?} without EnemyCombat", hit.target));
                    continue;
                };

                let reaction = enemy.on_bullet_hit(transform, hit.location, &mut rng.rng);

                if reaction.show_health_bar {
                    scheduler.schedule(
                        TimerKey::new(hit.target, TimerKind::HealthBarHide),
                        enemy.health_bar_display_time,
                    );
                }

                if reaction.stunned {
                    if let Some(mut context) = context {
                        context.stunned = true;
                    }
                }

                if let Some(section) = reaction.montage_section {
                    montages.write(MontageRequest::new(hit.target, MontageKind::HitReact, section));
                }

                if let Some(cooldown) = reaction.hit_react_cooldown {
                    scheduler.schedule(TimerKey::new(hit.target, TimerKind::HitReactReset), cooldown);
                }
            }
            BulletHittable::Explosive => {
                if detonated.contains(&hit.target) {
                    continue;
                }
                let Ok((explosive, transform)) = explosives.get(hit.target) else {
                    log_warning(&format!("BulletHittable::Explosive {:?} without Explosive", hit.target));
                    continue;
                };
                detonated.push(hit.target);

                let center = transform.translation;
                for (victim, victim_transform) in damageables.iter() {
                    if victim == hit.target || !explosive.in_blast(center, victim_transform.translation) {
                        continue;
                    }
                    damage_intents.write(DamageIntent {
                        target: victim,
                        causer: hit.shooter,
                        amount: explosive.damage,
                        hit_location: None,
                    });
                }

                exploded_events.write(Exploded {
                    explosive: hit.target,
                    location: hit.location,
                    instigator: hit.shooter,
                });

                scheduler.cancel_all_for(hit.target);
                commands.entity(hit.target).despawn();

                log(&format!("💥 Explosive {:?} detonated", hit.target));
            }
        }
    }
}

/// Удар оружием врага по персонажу: stun roll, затем base damage
pub fn process_enemy_weapon_hits(
    mut hits: EventReader<EnemyWeaponHit>,
    enemies: Query<&EnemyCombat>,
    mut victims: Query<(&CharacterVitals, &mut CharacterCombat, &Transform)>,
    mut rng: ResMut<DeterministicRng>,
    mut montages: EventWriter<MontageRequest>,
    mut damage_intents: EventWriter<DamageIntent>,
) {
    for hit in hits.read() {
        let Ok(enemy) = enemies.get(hit.enemy) else {
            continue;
        };
        let Ok((vitals, mut combat, transform)) = victims.get_mut(hit.victim) else {
            // Задели не персонажа (другой враг, стена)
            continue;
        };

        if vitals.is_alive() && roll_stun(&mut rng.rng, vitals.stun_chance) {
            combat.state = CombatState::Stunned;
            let section = hit_react_section(classify_hit_on(transform, hit.hit_location));
            montages.write(MontageRequest::new(hit.victim, MontageKind::HitReact, section));
            log(&format!("Character {:?} stunned by {:?}", hit.victim, hit.enemy));
        }

        damage_intents.write(DamageIntent {
            target: hit.victim,
            causer: Some(hit.enemy),
            amount: enemy.base_damage,
            hit_location: Some(hit.hit_location),
        });
    }
}

/// Система: apply damage от `DamageIntent` событий
///
/// 1. Враг: AI target = causer, урон, при убийстве — die (один раз)
/// 2. Персонаж: урон
/// 3. `DamageDealt` всегда, `EntityDied` на убивающем ударе
pub fn apply_damage(
    mut intents: EventReader<DamageIntent>,
    mut enemies: Query<(&mut EnemyCombat, &Transform, Option<&mut EnemyAiContext>)>,
    mut characters: Query<&mut CharacterVitals>,
    mut scheduler: ResMut<TimerScheduler>,
    mut montages: EventWriter<MontageRequest>,
    mut dealt_events: EventWriter<DamageDealt>,
    mut died_events: EventWriter<EntityDied>,
) {
    for intent in intents.read() {
        let outcome = if let Ok((mut enemy, transform, mut context)) = enemies.get_mut(intent.target) {
            if let (Some(context), Some(causer)) = (context.as_mut(), intent.causer) {
                context.target = Some(causer);
            }

            let outcome = enemy.take_damage(intent.amount);

            if outcome.killed {
                if let Some(section) = enemy.die(transform, intent.hit_location) {
                    scheduler.cancel(TimerKey::new(intent.target, TimerKind::HealthBarHide));
                    montages.write(MontageRequest::new(intent.target, MontageKind::Death, section));

                    if let Some(context) = context.as_mut() {
                        context.is_dead = true;
                        context.stop_requested = true;
                    }

                    log(&format!("💀 Enemy {:?} died ({})", intent.target, section));
                }
            }

            outcome
        } else if let Ok(mut vitals) = characters.get_mut(intent.target) {
            let outcome = vitals.take_damage(intent.amount);
            if outcome.killed {
                log(&format!("💀 Character {:?} died", intent.target));
            }
            outcome
        } else {
            log_warning(&format!("DamageIntent: target {:?} is not damageable", intent.target));
            continue;
        };

        dealt_events.write(DamageDealt {
            causer: intent.causer,
            target: intent.target,
            amount: outcome.applied,
            target_died: outcome.killed,
        });

        if outcome.killed {
            died_events.write(EntityDied {
                entity: intent.target,
                killer: intent.causer,
            });
        }
    }
}

/// AI решил атаковать → случайная attack секция + cooldown
pub fn process_enemy_attack_intents(
    mut intents: EventReader<EnemyAttackIntent>,
    mut enemies: Query<(&mut EnemyCombat, Option<&mut EnemyAiContext>)>,
    mut rng: ResMut<DeterministicRng>,
    mut scheduler: ResMut<TimerScheduler>,
    mut montages: EventWriter<MontageRequest>,
) {
    for intent in intents.read() {
        let Ok((mut enemy, context)) = enemies.get_mut(intent.enemy) else {
            continue;
        };
        if !enemy.try_begin_attack() {
            continue;
        }

        let section = attack_section(&mut rng.rng);
        montages.write(MontageRequest::new(intent.enemy, MontageKind::Attack, section));

        if let Some(mut context) = context {
            context.can_attack = false;
        }
        scheduler.schedule(
            TimerKey::new(intent.enemy, TimerKind::AttackReset),
            enemy.attack_wait_time,
        );
    }
}

/// Anim notifies: конец hit react снимает stun, конец death удаляет врага
pub fn handle_montage_notifies(
    mut commands: Commands,
    mut notifies: EventReader<MontageNotify>,
    mut enemies: Query<(&mut EnemyCombat, Option<&mut EnemyAiContext>)>,
    mut characters: Query<&mut CharacterCombat>,
    mut scheduler: ResMut<TimerScheduler>,
) {
    for notify in notifies.read() {
        match *notify {
            MontageNotify::HitReactEnded { entity } => {
                if let Ok((mut enemy, context)) = enemies.get_mut(entity) {
                    enemy.stunned = false;
                    if let Some(mut context) = context {
                        context.stunned = false;
                    }
                } else if let Ok(mut combat) = characters.get_mut(entity) {
                    if combat.state == CombatState::Stunned {
                        combat.state = CombatState::Unoccupied;
                    }
                }
            }
            MontageNotify::DeathFinished { entity } => {
                let is_dying = enemies
                    .get(entity)
                    .is_ok_and(|(enemy, _)| enemy.dying);
                if is_dying {
                    scheduler.cancel_all_for(entity);
                    commands.entity(entity).despawn();
                }
            }
        }
    }
}
