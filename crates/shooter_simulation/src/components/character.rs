//! Компоненты персонажа игрока (shooter character)
//!
//! Kinematics/camera/curve samples пишет host-движок (tactical layer) каждый
//! кадр, симуляция их только читает. Combat state, vitals, inventory
//! принадлежат симуляции.

use bevy::prelude::*;
use std::collections::HashMap;

use crate::animation::{AnimationCurves, MovementBlendState};
use crate::items::AmmoType;
use crate::shared::yaw_rotation;

/// Marker: персонаж игрока
///
/// Через Required Components автоматически получает всё состояние,
/// нужное анимационному драйверу, pickup и combat системам.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
#[require(
    Transform,
    CharacterKinematics,
    CharacterCombat,
    CharacterVitals,
    AnimationCurves,
    MovementBlendState,
    FollowCamera,
    InterpLocations,
    Inventory,
    PickupSensor
)]
pub struct ShooterCharacter;

/// Кинематика персонажа (sampled, никогда не мутируется симуляцией)
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct CharacterKinematics {
    /// World velocity (Z — вертикаль)
    pub velocity: Vec3,
    /// Текущее ускорение movement component
    pub acceleration: Vec3,
    pub is_falling: bool,
    /// Yaw актора (град)
    pub actor_yaw: f32,
    /// Base aim rotation (controller)
    pub aim_yaw: f32,
    pub aim_pitch: f32,
}

/// Боевое состояние персонажа
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum CombatState {
    #[default]
    Unoccupied,
    FireTimerInProgress,
    Reloading,
    Equipping,
    Stunned,
}

#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct CharacterCombat {
    pub state: CombatState,
    pub aiming: bool,
    pub crouching: bool,
}

impl CharacterCombat {
    pub fn is_reloading(&self) -> bool {
        self.state == CombatState::Reloading
    }

    pub fn is_equipping(&self) -> bool {
        self.state == CombatState::Equipping
    }
}

/// Здоровье + шанс оглушения персонажа
///
/// Инвариант: 0 ≤ health ≤ max_health
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct CharacterVitals {
    pub health: f32,
    pub max_health: f32,
    pub stun_chance: f32,
}

impl Default for CharacterVitals {
    fn default() -> Self {
        Self::new(100.0, 0.25)
    }
}

impl CharacterVitals {
    pub fn new(max_health: f32, stun_chance: f32) -> Self {
        Self {
            health: max_health,
            max_health,
            stun_chance,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }
}

/// Follow camera (мировая позиция + yaw)
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct FollowCamera {
    pub location: Vec3,
    pub yaw: f32,
}

/// Точка перед камерой, куда прилетают подобранные предметы
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct InterpSlot {
    /// Смещение в пространстве камеры (X — вперёд, Y — вправо, Z — вверх)
    pub offset: Vec3,
    /// Сколько предметов сейчас летят в этот слот
    pub item_count: i32,
}

impl InterpSlot {
    pub fn new(offset: Vec3) -> Self {
        Self { offset, item_count: 0 }
    }
}

/// Interp-слоты персонажа
///
/// Слот 0 — оружие, слоты 1.. — патроны (распределяются по наименее занятому).
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct InterpLocations {
    pub slots: Vec<InterpSlot>,
}

impl Default for InterpLocations {
    fn default() -> Self {
        Self {
            slots: vec![
                InterpSlot::new(Vec3::new(150.0, 0.0, -20.0)),
                InterpSlot::new(Vec3::new(130.0, -60.0, -40.0)),
                InterpSlot::new(Vec3::new(130.0, 60.0, -40.0)),
                InterpSlot::new(Vec3::new(130.0, -30.0, -70.0)),
                InterpSlot::new(Vec3::new(130.0, 30.0, -70.0)),
                InterpSlot::new(Vec3::new(130.0, -60.0, -100.0)),
                InterpSlot::new(Vec3::new(130.0, 60.0, -100.0)),
            ],
        }
    }
}

impl InterpLocations {
    pub const WEAPON_SLOT: usize = 0;

    /// Наименее занятый ammo слот (при равенстве — меньший индекс)
    pub fn lowest_ammo_slot(&self) -> usize {
        self.slots
            .iter()
            .enumerate()
            .skip(1)
            .min_by_key(|(_, slot)| slot.item_count)
            .map(|(index, _)| index)
            .unwrap_or(Self::WEAPON_SLOT)
    }

    pub fn increment(&mut self, index: usize, amount: i32) {
        if let Some(slot) = self.slots.get_mut(index) {
            slot.item_count = (slot.item_count + amount).max(0);
        }
    }

    /// Мировая позиция слота для текущей камеры
    pub fn world_location(&self, index: usize, camera: &FollowCamera) -> Vec3 {
        let offset = self
            .slots
            .get(index)
            .map(|slot| slot.offset)
            .unwrap_or(Vec3::ZERO);
        camera.location + yaw_rotation(camera.yaw) * offset
    }
}

/// Инвентарь персонажа
#[derive(Component, Debug, Clone, Default)]
pub struct Inventory {
    pub equipped_weapon: Option<Entity>,
    /// Оружие в инвентаре (включая экипированное)
    pub weapons: Vec<Entity>,
    pub ammo: HashMap<AmmoType, i32>,
}

impl Inventory {
    pub fn ammo_count(&self, ammo_type: AmmoType) -> i32 {
        self.ammo.get(&ammo_type).copied().unwrap_or(0)
    }

    pub fn add_ammo(&mut self, ammo_type: AmmoType, amount: i32) {
        *self.ammo.entry(ammo_type).or_insert(0) += amount.max(0);
    }

    /// Забрать до `amount` патронов; возвращает сколько реально забрали
    pub fn take_ammo(&mut self, ammo_type: AmmoType, amount: i32) -> i32 {
        let stock = self.ammo.entry(ammo_type).or_insert(0);
        let taken = amount.clamp(0, *stock);
        *stock -= taken;
        taken
    }

    pub fn remove_weapon(&mut self, weapon: Entity) {
        self.weapons.retain(|&entity| entity != weapon);
        if self.equipped_weapon == Some(weapon) {
            self.equipped_weapon = None;
        }
    }
}

/// Сколько pickup-сфер предметов сейчас пересекает персонаж
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct PickupSensor {
    pub overlapped_item_count: i32,
}

impl PickupSensor {
    pub fn increment(&mut self, amount: i32) {
        self.overlapped_item_count = (self.overlapped_item_count + amount).max(0);
    }

    /// Есть ли рядом предметы (host включает trace под прицелом)
    pub fn should_trace_for_items(&self) -> bool {
        self.overlapped_item_count > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowest_ammo_slot_skips_weapon_slot() {
        let mut locations = InterpLocations::default();
        assert_eq!(locations.lowest_ammo_slot(), 1);

        locations.increment(1, 1);
        assert_eq!(locations.lowest_ammo_slot(), 2);

        locations.increment(2, 1);
        locations.increment(1, -1);
        assert_eq!(locations.lowest_ammo_slot(), 1);
    }

    #[test]
    fn test_slot_world_location_follows_camera_yaw() {
        let locations = InterpLocations::default();
        let camera = FollowCamera {
            location: Vec3::new(0.0, 0.0, 100.0),
            yaw: 90.0,
        };

        // Слот оружия 150 вперёд → при yaw 90 это +Y
        let location = locations.world_location(InterpLocations::WEAPON_SLOT, &camera);
        assert!((location - Vec3::new(0.0, 150.0, 80.0)).length() < 1.0e-3);
    }

    #[test]
    fn test_inventory_ammo_accounting() {
        let mut inventory = Inventory::default();
        inventory.add_ammo(AmmoType::NineMm, 30);

        assert_eq!(inventory.take_ammo(AmmoType::NineMm, 50), 30);
        assert_eq!(inventory.ammo_count(AmmoType::NineMm), 0);
        assert_eq!(inventory.take_ammo(AmmoType::AssaultRifle, 10), 0);
    }

    #[test]
    fn test_pickup_sensor_never_negative() {
        let mut sensor = PickupSensor::default();
        sensor.increment(1);
        assert!(sensor.should_trace_for_items());
        sensor.increment(-2);
        assert_eq!(sensor.overlapped_item_count, 0);
    }
}
