//! Item system implementations
//!
//! # Systems (`SimulationSet::Items`)
//!
//! - `process_item_overlaps`: pickup sensor count + авто-подбор патронов
//! - `process_pickup_intents`: старт полёта к камере
//! - `tick_item_interpolation`: поза предмета в полёте
//! - `finish_item_interpolation`: `ItemInterp` таймер → inventory
//! - `process_drop_weapon`: бросок оружия из рук
//! - `land_thrown_weapons`: `WeaponThrow` таймер → снова Pickup (оружие и упавшие в полёте предметы)
//! - `keep_falling_weapons_upright`: брошенное оружие не кувыркается

use bevy::prelude::*;
use rand_chacha::ChaCha8Rng;

use super::events::*;
use super::item::WorldItem;
use super::lifecycle::{InterpCurves, InterpTarget, ItemLifecycle, PickupDisposition};
use super::state::ItemState;
use super::weapon::{throw_impulse, AmmoType};
use crate::components::{FollowCamera, InterpLocations, Inventory, PickupSensor};
use crate::config::{ItemConfig, SimulationConfig};
use crate::shared::{yaw_of, yaw_rotation};
use crate::timers::{TimerFired, TimerKey, TimerKind, TimerScheduler};
use crate::{log, log_warning, DeterministicRng};

/// Куда пойдёт подобранный предмет
///
/// Патроны → Consume. Оружие: руки пусты → Equip; есть место → Stow;
/// инвентарь полон → Equip со swap (текущее оружие выбрасывается).
pub fn pickup_disposition(item: &WorldItem, inventory: &Inventory, capacity: usize) -> PickupDisposition {
    if !item.is_weapon() {
        return PickupDisposition::Consume;
    }

    if inventory.equipped_weapon.is_none() || inventory.weapons.len() >= capacity {
        PickupDisposition::Equip
    } else {
        PickupDisposition::Stow
    }
}

fn state_change(item: Entity, from: ItemState, lifecycle: &ItemLifecycle) -> ItemStateChanged {
    ItemStateChanged {
        item,
        from,
        to: lifecycle.state(),
        profile: lifecycle.profile(),
    }
}

/// Бросок оружия: Falling + импульс + throw таймер
fn throw_weapon(
    entity: Entity,
    item: &mut WorldItem,
    lifecycle: &mut ItemLifecycle,
    transform: &mut Transform,
    rng: &mut ChaCha8Rng,
    config: &ItemConfig,
    scheduler: &mut TimerScheduler,
) -> (ItemStateChanged, ItemImpulse) {
    // Отрываем от руки с нулевым pitch/roll
    let yaw = yaw_of(transform.rotation);
    transform.rotation = yaw_rotation(yaw);

    let from = lifecycle.state();
    lifecycle.set_state(ItemState::Falling);

    if let Some(weapon) = item.weapon_data_mut() {
        weapon.falling = true;
    }
    scheduler.schedule(
        TimerKey::new(entity, TimerKind::WeaponThrow),
        config.throw_duration,
    );

    let impulse = throw_impulse(yaw, rng, config.throw_tilt, config.throw_impulse);

    (
        state_change(entity, from, lifecycle),
        ItemImpulse { item: entity, impulse },
    )
}

/// Владелец пропал посреди полёта: Falling + landing таймер (потом снова Pickup)
fn drop_in_flight(
    entity: Entity,
    lifecycle: &mut ItemLifecycle,
    transform: &mut Transform,
    config: &ItemConfig,
    scheduler: &mut TimerScheduler,
) -> ItemStateChanged {
    let from = lifecycle.state();
    lifecycle.abort_to_falling();
    transform.scale = Vec3::ONE;

    scheduler.cancel(TimerKey::new(entity, TimerKind::ItemInterp));
    scheduler.schedule(
        TimerKey::new(entity, TimerKind::WeaponThrow),
        config.throw_duration,
    );

    state_change(entity, from, lifecycle)
}

/// Process pickup sphere overlaps
pub fn process_item_overlaps(
    mut overlaps: EventReader<ItemOverlap>,
    mut sensors: Query<&mut PickupSensor>,
    items: Query<&WorldItem>,
    mut pickup_intents: EventWriter<PickupItemIntent>,
) {
    for overlap in overlaps.read() {
        // Overlap не с персонажем (стена, враг) — игнорируем
        let Ok(mut sensor) = sensors.get_mut(overlap.other) else {
            continue;
        };

        sensor.increment(if overlap.began { 1 } else { -1 });

        // Патроны подбираются сразу при касании
        let is_ammo = items
            .get(overlap.item)
            .is_ok_and(|item| !item.is_weapon());
        if overlap.began && is_ammo {
            pickup_intents.write(PickupItemIntent {
                character: overlap.other,
                item: overlap.item,
            });
        }
    }
}

/// Process pickup intents → старт полёта к interp слоту
pub fn process_pickup_intents(
    mut intents: EventReader<PickupItemIntent>,
    mut items: Query<(&WorldItem, &mut ItemLifecycle, &Transform)>,
    mut characters: Query<(&mut InterpLocations, &FollowCamera)>,
    config: Res<SimulationConfig>,
    mut scheduler: ResMut<TimerScheduler>,
    mut state_events: EventWriter<ItemStateChanged>,
) {
    for intent in intents.read() {
        let Ok((item, mut lifecycle, transform)) = items.get_mut(intent.item) else {
            continue;
        };
        let Ok((mut locations, camera)) = characters.get_mut(intent.character) else {
            log_warning(&format!(
                "Pickup intent from {:?} without interp locations",
                intent.character
            ));
            continue;
        };

        let slot_index = item.interp_slot(&locations);
        let from = lifecycle.state();
        let duration = config.items.interp_duration;

        if !lifecycle.begin_interpolation(
            intent.character,
            slot_index,
            transform.translation,
            yaw_of(transform.rotation),
            camera.yaw,
            duration,
        ) {
            continue;
        }

        locations.increment(slot_index, 1);
        scheduler.schedule(TimerKey::new(intent.item, TimerKind::ItemInterp), duration);
        state_events.write(state_change(intent.item, from, &lifecycle));

        log(&format!("🎯 {} → interp slot {}", item.name, slot_index));
    }
}

/// Тик полёта: предмет догоняет slot перед камерой владельца
pub fn tick_item_interpolation(
    time: Res<Time>,
    config: Res<SimulationConfig>,
    mut items: Query<(Entity, &WorldItem, &mut ItemLifecycle, &mut Transform)>,
    owners: Query<(&InterpLocations, &FollowCamera)>,
    mut scheduler: ResMut<TimerScheduler>,
    mut state_events: EventWriter<ItemStateChanged>,
) {
    let delta = time.delta_secs();

    for (entity, item, mut lifecycle, mut transform) in items.iter_mut() {
        if lifecycle.state() != ItemState::EquipInterping {
            continue;
        }
        let Some(owner) = lifecycle.owner() else {
            continue;
        };
        let Some(slot_index) = lifecycle.interp().map(|interp| interp.slot_index) else {
            continue;
        };

        let Ok((locations, camera)) = owners.get(owner) else {
            state_events.write(drop_in_flight(
                entity,
                &mut lifecycle,
                &mut transform,
                &config.items,
                &mut scheduler,
            ));
            log_warning(&format!("{} lost owner {:?} mid-flight → Falling", item.name, owner));
            continue;
        };

        let target = InterpTarget {
            location: locations.world_location(slot_index, camera),
            camera_yaw: camera.yaw,
        };
        let curves = InterpCurves {
            z_curve: &config.items.z_curve,
            scale_curve: item.is_weapon().then_some(&config.items.scale_curve),
            xy_speed: config.items.interp_xy_speed,
        };

        let Some(pose) = lifecycle.tick(delta, transform.translation, &target, &curves) else {
            continue;
        };

        transform.translation = pose.location;
        transform.rotation = yaw_rotation(pose.yaw);
        if let Some(scale) = pose.scale {
            transform.scale = Vec3::splat(scale);
        }
    }
}

/// Что нужно сделать после finish (когда borrow предмета уже отпущен)
enum PickupFollowUp {
    None,
    Consume { ammo_type: AmmoType, count: i32 },
    Swap { dropped: Entity },
}

/// `ItemInterp` таймер → предмет попадает в inventory
pub fn finish_item_interpolation(
    mut commands: Commands,
    mut fired: EventReader<TimerFired>,
    mut items: Query<(&mut WorldItem, &mut ItemLifecycle, &mut Transform)>,
    mut characters: Query<(&mut Inventory, &mut InterpLocations)>,
    config: Res<SimulationConfig>,
    mut rng: ResMut<DeterministicRng>,
    mut scheduler: ResMut<TimerScheduler>,
    mut state_events: EventWriter<ItemStateChanged>,
    mut impulse_events: EventWriter<ItemImpulse>,
    mut picked_events: EventWriter<ItemPickedUp>,
) {
    for event in fired.read() {
        if event.key.kind != TimerKind::ItemInterp {
            continue;
        }
        let item_entity = event.key.entity;

        let Ok((item, mut lifecycle, mut transform)) = items.get_mut(item_entity) else {
            continue;
        };
        if lifecycle.state() != ItemState::EquipInterping {
            continue;
        }
        let Some(owner) = lifecycle.owner() else {
            continue;
        };
        let slot_index = lifecycle.interp().map(|interp| interp.slot_index);
        let from = lifecycle.state();

        let Ok((mut inventory, mut locations)) = characters.get_mut(owner) else {
            state_events.write(drop_in_flight(
                item_entity,
                &mut lifecycle,
                &mut transform,
                &config.items,
                &mut scheduler,
            ));
            log_warning(&format!("{} finished without owner {:?} → Falling", item.name, owner));
            continue;
        };

        if let Some(slot_index) = slot_index {
            locations.increment(slot_index, -1);
        }

        let disposition = pickup_disposition(&item, &inventory, config.items.inventory_capacity);
        lifecycle.finish_interpolation(disposition);
        transform.scale = Vec3::ONE;

        state_events.write(state_change(item_entity, from, &lifecycle));
        picked_events.write(ItemPickedUp {
            item: item_entity,
            character: owner,
            disposition,
        });

        let follow_up = match disposition {
            PickupDisposition::Consume => match item.ammo_type() {
                Some(ammo_type) => PickupFollowUp::Consume {
                    ammo_type,
                    count: item.count,
                },
                None => PickupFollowUp::None,
            },
            PickupDisposition::Stow => {
                inventory.weapons.push(item_entity);
                PickupFollowUp::None
            }
            PickupDisposition::Equip => {
                let previous = inventory.equipped_weapon.replace(item_entity);
                match previous {
                    Some(dropped) => {
                        // Полный инвентарь: новое оружие встаёт на место старого
                        match inventory.weapons.iter().position(|&w| w == dropped) {
                            Some(index) => inventory.weapons[index] = item_entity,
                            None => inventory.weapons.push(item_entity),
                        }
                        PickupFollowUp::Swap { dropped }
                    }
                    None => {
                        inventory.weapons.push(item_entity);
                        PickupFollowUp::None
                    }
                }
            }
        };

        log(&format!("✅ {} picked up ({:?})", item.name, disposition));

        match follow_up {
            PickupFollowUp::None => {}
            PickupFollowUp::Consume { ammo_type, count } => {
                inventory.add_ammo(ammo_type, count);

                // Пустое оружие того же калибра в руках → сразу перезаряжаем
                if let Some(weapon_entity) = inventory.equipped_weapon {
                    if let Ok((mut weapon_item, _, _)) = items.get_mut(weapon_entity) {
                        if let Some(weapon) = weapon_item.weapon_data_mut() {
                            if weapon.ammo_type == ammo_type && weapon.is_empty() {
                                let taken = inventory.take_ammo(ammo_type, weapon.missing_ammo());
                                weapon.reload_ammo(taken);
                            }
                        }
                    }
                }

                scheduler.cancel_all_for(item_entity);
                commands.entity(item_entity).despawn();
            }
            PickupFollowUp::Swap { dropped } => {
                let Ok((mut dropped_item, mut dropped_lifecycle, mut dropped_transform)) =
                    items.get_mut(dropped)
                else {
                    continue;
                };
                let (changed, impulse) = throw_weapon(
                    dropped,
                    &mut dropped_item,
                    &mut dropped_lifecycle,
                    &mut dropped_transform,
                    &mut rng.rng,
                    &config.items,
                    &mut scheduler,
                );
                state_events.write(changed);
                impulse_events.write(impulse);
            }
        }
    }
}

/// Process drop weapon intents
pub fn process_drop_weapon(
    mut intents: EventReader<DropWeaponIntent>,
    mut characters: Query<&mut Inventory>,
    mut items: Query<(&mut WorldItem, &mut ItemLifecycle, &mut Transform)>,
    config: Res<SimulationConfig>,
    mut rng: ResMut<DeterministicRng>,
    mut scheduler: ResMut<TimerScheduler>,
    mut state_events: EventWriter<ItemStateChanged>,
    mut impulse_events: EventWriter<ItemImpulse>,
) {
    for intent in intents.read() {
        let Ok(mut inventory) = characters.get_mut(intent.character) else {
            continue;
        };
        let Some(weapon) = inventory.equipped_weapon else {
            continue;
        };
        inventory.remove_weapon(weapon);

        let Ok((mut item, mut lifecycle, mut transform)) = items.get_mut(weapon) else {
            continue;
        };

        let (changed, impulse) = throw_weapon(
            weapon,
            &mut item,
            &mut lifecycle,
            &mut transform,
            &mut rng.rng,
            &config.items,
            &mut scheduler,
        );
        state_events.write(changed);
        impulse_events.write(impulse);

        log(&format!("🗑️ {} dropped by {:?}", item.name, intent.character));
    }
}

/// `WeaponThrow` таймер → предмет снова можно подобрать
///
/// Брошенное оружие и предметы, потерявшие владельца в полёте (в т.ч. патроны).
pub fn land_thrown_weapons(
    mut fired: EventReader<TimerFired>,
    mut items: Query<(&mut WorldItem, &mut ItemLifecycle)>,
    mut state_events: EventWriter<ItemStateChanged>,
) {
    for event in fired.read() {
        if event.key.kind != TimerKind::WeaponThrow {
            continue;
        }
        let Ok((mut item, mut lifecycle)) = items.get_mut(event.key.entity) else {
            continue;
        };

        if let Some(weapon) = item.weapon_data_mut() {
            weapon.falling = false;
        }

        if lifecycle.state() == ItemState::Falling {
            let from = lifecycle.state();
            lifecycle.set_state(ItemState::Pickup);
            state_events.write(state_change(event.key.entity, from, &lifecycle));
        }
    }
}

/// Пока оружие летит после броска — только yaw, без pitch/roll
pub fn keep_falling_weapons_upright(mut items: Query<(&WorldItem, &ItemLifecycle, &mut Transform)>) {
    for (item, lifecycle, mut transform) in items.iter_mut() {
        let falling = item.weapon_data().is_some_and(|weapon| weapon.falling);
        if lifecycle.state() != ItemState::Falling || !falling {
            continue;
        }

        let upright = yaw_rotation(yaw_of(transform.rotation));
        if transform.rotation != upright {
            transform.rotation = upright;
        }
    }
}
