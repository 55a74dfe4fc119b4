//! Item state + производные физические/collision флаги

use bevy::prelude::*;

/// Lifecycle state предмета в мире
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Reflect)]
pub enum ItemState {
    /// Лежит в мире, можно подобрать
    #[default]
    Pickup,
    /// Летит к камере персонажа
    EquipInterping,
    /// В инвентаре, не в руках
    PickedUp,
    /// В руках персонажа
    Equipped,
    /// Брошен/выпал, физика включена
    Falling,
}

impl ItemState {
    /// Состояния, в которых у предмета есть владелец
    pub fn has_owner(self) -> bool {
        matches!(
            self,
            ItemState::EquipInterping | ItemState::PickedUp | ItemState::Equipped
        )
    }
}

/// Режим коллизии примитива (host маппит на свой physics engine)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum CollisionMode {
    NoCollision,
    QueryOnly,
    QueryAndPhysics,
}

/// Физика / коллизии / видимость для состояния
///
/// Три примитива предмета:
/// - mesh: видимый меш (и rigid body при падении)
/// - area sphere: pickup trigger (overlap с персонажем)
/// - collision box: цель для trace под прицелом (visibility channel)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub struct ItemPhysicsProfile {
    pub simulate_physics: bool,
    pub enable_gravity: bool,
    pub mesh_visible: bool,
    pub mesh_collision: CollisionMode,
    /// Меш блокирует world static (пол) — только при падении
    pub mesh_blocks_world_static: bool,
    pub area_sphere: CollisionMode,
    pub collision_box: CollisionMode,
    /// Box блокирует visibility trace (подсветка + pickup prompt)
    pub box_blocks_visibility: bool,
    /// Host может показывать pickup prompt
    pub pickup_prompt_allowed: bool,
}

impl ItemPhysicsProfile {
    pub fn for_state(state: ItemState) -> Self {
        match state {
            ItemState::Pickup => Self {
                simulate_physics: false,
                enable_gravity: false,
                mesh_visible: true,
                mesh_collision: CollisionMode::NoCollision,
                mesh_blocks_world_static: false,
                area_sphere: CollisionMode::QueryOnly,
                collision_box: CollisionMode::QueryAndPhysics,
                box_blocks_visibility: true,
                pickup_prompt_allowed: true,
            },
            ItemState::Falling => Self {
                simulate_physics: true,
                enable_gravity: true,
                mesh_visible: true,
                mesh_collision: CollisionMode::QueryAndPhysics,
                mesh_blocks_world_static: true,
                area_sphere: CollisionMode::NoCollision,
                collision_box: CollisionMode::NoCollision,
                box_blocks_visibility: false,
                pickup_prompt_allowed: false,
            },
            ItemState::EquipInterping | ItemState::Equipped | ItemState::PickedUp => Self {
                simulate_physics: false,
                enable_gravity: false,
                // В инвентаре меш скрыт, в руках и в полёте — виден
                mesh_visible: state != ItemState::PickedUp,
                mesh_collision: CollisionMode::NoCollision,
                mesh_blocks_world_static: false,
                area_sphere: CollisionMode::NoCollision,
                collision_box: CollisionMode::NoCollision,
                box_blocks_visibility: false,
                pickup_prompt_allowed: false,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pickup_profile_is_overlap_only() {
        let profile = ItemPhysicsProfile::for_state(ItemState::Pickup);
        assert!(!profile.simulate_physics);
        assert_eq!(profile.area_sphere, CollisionMode::QueryOnly);
        assert_eq!(profile.mesh_collision, CollisionMode::NoCollision);
        assert!(profile.pickup_prompt_allowed);
    }

    #[test]
    fn test_falling_profile_simulates_physics() {
        let profile = ItemPhysicsProfile::for_state(ItemState::Falling);
        assert!(profile.simulate_physics);
        assert!(profile.enable_gravity);
        assert!(profile.mesh_blocks_world_static);
        assert_eq!(profile.area_sphere, CollisionMode::NoCollision);
    }

    #[test]
    fn test_owned_states_disable_world_collision() {
        for state in [ItemState::EquipInterping, ItemState::Equipped, ItemState::PickedUp] {
            let profile = ItemPhysicsProfile::for_state(state);
            assert_eq!(profile.mesh_collision, CollisionMode::NoCollision);
            assert_eq!(profile.area_sphere, CollisionMode::NoCollision);
            assert_eq!(profile.collision_box, CollisionMode::NoCollision);
            assert!(!profile.pickup_prompt_allowed);
            assert!(state.has_owner());
        }
        assert!(!ItemPhysicsProfile::for_state(ItemState::PickedUp).mesh_visible);
    }

    #[test]
    fn test_profile_is_deterministic() {
        assert_eq!(
            ItemPhysicsProfile::for_state(ItemState::Falling),
            ItemPhysicsProfile::for_state(ItemState::Falling)
        );
    }
}
