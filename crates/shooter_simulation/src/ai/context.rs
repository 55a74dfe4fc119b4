//! EnemyAiContext — типизированное состояние для AI planner
//!
//! Combat системы пишут сюда (target, stunned, is_dead, can_attack),
//! внешний planner (behaviour tree на стороне host) только читает.

use bevy::prelude::*;

#[derive(Component, Debug, Clone, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct EnemyAiContext {
    /// Кого преследуем (последний, кто нанёс урон, или вошёл в agro сферу)
    pub target: Option<Entity>,
    pub stunned: bool,
    pub in_attack_range: bool,
    pub can_attack: bool,
    pub is_dead: bool,
    /// Мировые координаты (заполняются один раз при spawn)
    pub patrol_point: Vec3,
    pub patrol_point2: Vec3,
    /// Остановить движение (смерть)
    pub stop_requested: bool,
}

impl EnemyAiContext {
    pub fn new() -> Self {
        Self {
            can_attack: true,
            ..Default::default()
        }
    }
}

/// Patrol точки в локальных координатах врага
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct PatrolRoute {
    pub local_point: Vec3,
    pub local_point2: Vec3,
}

impl PatrolRoute {
    pub fn new(local_point: Vec3, local_point2: Vec3) -> Self {
        Self {
            local_point,
            local_point2,
        }
    }

    /// Local → world для transform врага на момент spawn
    pub fn to_world(&self, transform: &Transform) -> (Vec3, Vec3) {
        (
            transform.transform_point(self.local_point),
            transform.transform_point(self.local_point2),
        )
    }
}

/// Какая сфера врага сработала
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum EnemySensor {
    /// Большая сфера: заметил персонажа
    Agro,
    /// Малая сфера: персонаж в зоне удара
    CombatRange,
}

/// Event: host → ECS, overlap сенсорной сферы врага
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnemySensorOverlap {
    pub enemy: Entity,
    pub other: Entity,
    pub sensor: EnemySensor,
    pub began: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::yaw_rotation;

    #[test]
    fn test_new_context_can_attack() {
        let context = EnemyAiContext::new();
        assert!(context.can_attack);
        assert!(!context.is_dead);
        assert_eq!(context.target, None);
    }

    #[test]
    fn test_patrol_route_local_to_world() {
        let route = PatrolRoute::new(Vec3::new(100.0, 0.0, 0.0), Vec3::new(0.0, 50.0, 0.0));
        let transform = Transform::from_translation(Vec3::new(10.0, 20.0, 0.0))
            .with_rotation(yaw_rotation(90.0));

        let (first, second) = route.to_world(&transform);

        // Враг смотрит в +Y: local +X → world +Y, local +Y → world -X
        assert!((first - Vec3::new(10.0, 120.0, 0.0)).length() < 1.0e-3);
        assert!((second - Vec3::new(-40.0, 20.0, 0.0)).length() < 1.0e-3);
    }
}
