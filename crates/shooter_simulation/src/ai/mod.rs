//! Enemy AI context module
//!
//! Behaviour tree живёт на стороне host. ECS ведёт только типизированный
//! контекст, который planner читает каждый тик:
//! - sensor overlaps (agro / combat range) → target, in_attack_range
//! - patrol точки local → world при spawn
//! - combat системы пишут stunned / can_attack / is_dead

use bevy::prelude::*;

pub mod context;
pub mod systems;

pub use context::{EnemyAiContext, EnemySensor, EnemySensorOverlap, PatrolRoute};

use crate::SimulationSet;

/// AI Plugin
///
/// Порядок выполнения:
/// 1. init_patrol_points: только что заспавненные враги
/// 2. process_sensor_overlaps: target / attack range
pub struct EnemyAiPlugin;

impl Plugin for EnemyAiPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<EnemyAiContext>()
            .add_event::<EnemySensorOverlap>()
            .add_systems(
                FixedUpdate,
                (systems::init_patrol_points, systems::process_sensor_overlaps)
                    .chain()
                    .in_set(SimulationSet::Ai),
            );
    }
}
