//! AI context systems

use bevy::prelude::*;

use super::context::{EnemyAiContext, EnemySensor, EnemySensorOverlap, PatrolRoute};
use crate::components::ShooterCharacter;
use crate::log;

/// Patrol точки в world space (один раз, transform на момент spawn)
pub fn init_patrol_points(
    mut enemies: Query<(Entity, &PatrolRoute, &Transform, &mut EnemyAiContext), Added<PatrolRoute>>,
) {
    for (entity, route, transform, mut context) in enemies.iter_mut() {
        let (patrol_point, patrol_point2) = route.to_world(transform);
        context.patrol_point = patrol_point;
        context.patrol_point2 = patrol_point2;

        log(&format!(
            "Enemy {:?} patrol: {:?} ↔ {:?}",
            entity, patrol_point, patrol_point2
        ));
    }
}

/// Sensor overlaps → target / in_attack_range
///
/// Реагируем только на персонажей игрока. Agro сфера назначает target на
/// begin overlap (выход из сферы target не сбрасывает).
pub fn process_sensor_overlaps(
    mut overlaps: EventReader<EnemySensorOverlap>,
    characters: Query<(), With<ShooterCharacter>>,
    mut enemies: Query<&mut EnemyAiContext>,
) {
    for overlap in overlaps.read() {
        if !characters.contains(overlap.other) {
            continue;
        }
        let Ok(mut context) = enemies.get_mut(overlap.enemy) else {
            continue;
        };

        match overlap.sensor {
            EnemySensor::Agro => {
                if overlap.began {
                    context.target = Some(overlap.other);
                }
            }
            EnemySensor::CombatRange => {
                context.in_attack_range = overlap.began;
            }
        }
    }
}
