//! Headless симуляция shooter gameplay
//!
//! Скриптованный сценарий без рендера: персонаж подбирает оружие и патроны,
//! стреляет во врага и в бочку, враг отвечает ударом.

use bevy::prelude::*;
use shooter_simulation::ai::{EnemySensor, EnemySensorOverlap};
use shooter_simulation::combat::{enemy_bundle, explosive_bundle, EnemyAttackIntent, EnemyWeaponHit};
use shooter_simulation::items::{ItemOverlap, ItemRarity, PickupItemIntent, WeaponData};
use shooter_simulation::*;

fn main() {
    let seed = 42;
    log_info(&format!("Starting shooter headless simulation (seed: {})", seed));

    let mut app = create_headless_app(seed);

    // Опционально: путь к RON конфигу первым аргументом
    if let Some(path) = std::env::args().nth(1) {
        match SimulationConfig::load(&path) {
            Ok(config) => {
                log_info(&format!("Config loaded from {}", path));
                app.insert_resource(config);
            }
            Err(err) => log_error(&format!("{} → using default config", err)),
        }
    }

    app.add_plugins(SimulationPlugin);

    let config = app.world().resource::<SimulationConfig>().clone();

    let character = app
        .world_mut()
        .spawn((
            ShooterCharacter,
            Transform::default(),
            CharacterVitals::new(config.character.max_health, config.character.stun_chance),
            FollowCamera {
                location: Vec3::new(0.0, 0.0, 160.0),
                yaw: 0.0,
            },
        ))
        .id();

    let weapon = app
        .world_mut()
        .spawn((
            WorldItem::weapon("SMG", ItemRarity::Rare, WeaponData::submachine_gun(0)),
            Transform::from_xyz(120.0, 40.0, 0.0),
        ))
        .id();
    let ammo = app
        .world_mut()
        .spawn((
            WorldItem::ammo(items::AmmoType::NineMm, 60),
            Transform::from_xyz(80.0, -30.0, 0.0),
        ))
        .id();

    let enemy = app
        .world_mut()
        .spawn(enemy_bundle(
            &config.enemy,
            Transform::from_xyz(600.0, 0.0, 0.0),
            PatrolRoute::new(Vec3::new(300.0, 0.0, 0.0), Vec3::new(-300.0, 0.0, 0.0)),
        ))
        .id();
    let barrel = app
        .world_mut()
        .spawn(explosive_bundle(&config.explosive, Transform::from_xyz(650.0, 100.0, 0.0)))
        .id();

    // Подбираем оружие, затем коробку патронов
    app.world_mut().send_event(PickupItemIntent { character, item: weapon });
    run_fixed_ticks(&mut app, 60);
    app.world_mut().send_event(ItemOverlap {
        item: ammo,
        other: character,
        began: true,
    });
    run_fixed_ticks(&mut app, 60);

    // Враг заметил персонажа и подошёл
    app.world_mut().send_event(EnemySensorOverlap {
        enemy,
        other: character,
        sensor: EnemySensor::Agro,
        began: true,
    });
    app.world_mut().send_event(EnemySensorOverlap {
        enemy,
        other: character,
        sensor: EnemySensor::CombatRange,
        began: true,
    });
    run_fixed_ticks(&mut app, 1);

    // Перестрелка
    for _ in 0..3 {
        let hit_location = Vec3::new(590.0, 0.0, 100.0);
        app.world_mut().send_event(BulletHit {
            target: enemy,
            shooter: Some(character),
            location: hit_location,
        });
        app.world_mut().send_event(DamageIntent {
            target: enemy,
            causer: Some(character),
            amount: 25.0,
            hit_location: Some(hit_location),
        });
        app.world_mut().send_event(EnemyAttackIntent { enemy });
        app.world_mut().send_event(EnemyWeaponHit {
            enemy,
            victim: character,
            hit_location: Vec3::new(20.0, 0.0, 100.0),
        });
        run_fixed_ticks(&mut app, 30);
    }

    // Бочка рядом с врагом
    app.world_mut().send_event(BulletHit {
        target: barrel,
        shooter: Some(character),
        location: Vec3::new(650.0, 100.0, 50.0),
    });
    run_fixed_ticks(&mut app, 120);

    let world = app.world_mut();
    if let Some(inventory) = world.get::<Inventory>(character) {
        log_info(&format!(
            "Inventory: equipped {:?}, weapons {}, 9mm {}",
            inventory.equipped_weapon,
            inventory.weapons.len(),
            inventory.ammo_count(items::AmmoType::NineMm)
        ));
    }
    if let Some(vitals) = world.get::<CharacterVitals>(character) {
        log_info(&format!("Character health: {}", vitals.health));
    }
    match world.get::<EnemyCombat>(enemy) {
        Some(combat) => log_info(&format!("Enemy health: {} (dying: {})", combat.health, combat.dying)),
        None => log_info("Enemy despawned"),
    }
    log_info(&format!("Barrel exists: {}", world.get_entity(barrel).is_ok()));

    log_info("Simulation complete!");
}
