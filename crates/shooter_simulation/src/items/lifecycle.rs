//! ItemLifecycle — state machine предмета
//!
//! # Transitions
//! ```text
//! Pickup ──begin_interpolation──> EquipInterping ──finish──> Equipped | PickedUp
//!   ^                                  │
//!   │                                  └──owner пропал──> Falling
//!   └────throw таймер──── Falling <──drop/swap── Equipped
//! ```
//!
//! Инвариант: владелец есть только в EquipInterping / PickedUp / Equipped.

use bevy::prelude::*;

use super::state::{ItemPhysicsProfile, ItemState};
use crate::shared::{interp_to, normalize_axis, normalized_delta, FloatCurve};

/// Параметры полёта предмета к камере
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct EquipInterp {
    /// Сколько уже летим (≤ duration)
    pub elapsed: f32,
    pub duration: f32,
    pub start_location: Vec3,
    /// Yaw предмета относительно камеры на момент старта
    pub initial_yaw_offset: f32,
    pub slot_index: usize,
}

/// Куда летим в этом тике (slot location пересчитывается каждый тик)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InterpTarget {
    pub location: Vec3,
    pub camera_yaw: f32,
}

/// Кривые полёта
#[derive(Debug, Clone, Copy)]
pub struct InterpCurves<'a> {
    /// Z: 0 = стартовая высота, 1 = высота слота
    pub z_curve: &'a FloatCurve,
    /// Только для оружия (ammo летит без scale)
    pub scale_curve: Option<&'a FloatCurve>,
    /// Скорость догоняния по XY
    pub xy_speed: f32,
}

/// Поза предмета после тика интерполяции
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InterpPose {
    pub location: Vec3,
    pub yaw: f32,
    pub scale: Option<f32>,
}

/// Куда попадает предмет по завершении полёта
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum PickupDisposition {
    /// В руки
    Equip,
    /// В инвентарь
    Stow,
    /// Патроны: перешли в запас, предмет удаляется
    Consume,
}

#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct ItemLifecycle {
    state: ItemState,
    owner: Option<Entity>,
    interp: Option<EquipInterp>,
    /// Текущий uniform scale меша
    pub scale: f32,
}

impl Default for ItemLifecycle {
    fn default() -> Self {
        Self {
            state: ItemState::Pickup,
            owner: None,
            interp: None,
            scale: 1.0,
        }
    }
}

impl ItemLifecycle {
    pub fn state(&self) -> ItemState {
        self.state
    }

    pub fn owner(&self) -> Option<Entity> {
        self.owner
    }

    pub fn interp(&self) -> Option<&EquipInterp> {
        self.interp.as_ref()
    }

    pub fn profile(&self) -> ItemPhysicsProfile {
        ItemPhysicsProfile::for_state(self.state)
    }

    /// Начать полёт к камере `owner`
    ///
    /// Только из Pickup. Возвращает false (ничего не меняя) в остальных state.
    pub fn begin_interpolation(
        &mut self,
        owner: Entity,
        slot_index: usize,
        start_location: Vec3,
        item_yaw: f32,
        camera_yaw: f32,
        duration: f32,
    ) -> bool {
        if self.state != ItemState::Pickup {
            return false;
        }

        self.state = ItemState::EquipInterping;
        self.owner = Some(owner);
        self.interp = Some(EquipInterp {
            elapsed: 0.0,
            duration,
            start_location,
            initial_yaw_offset: normalized_delta(item_yaw, camera_yaw),
            slot_index,
        });

        true
    }

    /// Тик полёта: новая поза предмета
    ///
    /// XY догоняет цель через `interp_to`, Z идёт по кривой между стартом и
    /// целью, yaw держит стартовый offset относительно камеры.
    pub fn tick(
        &mut self,
        delta_time: f32,
        current_location: Vec3,
        target: &InterpTarget,
        curves: &InterpCurves,
    ) -> Option<InterpPose> {
        if self.state != ItemState::EquipInterping {
            return None;
        }
        let interp = self.interp.as_mut()?;

        interp.elapsed = (interp.elapsed + delta_time.max(0.0)).min(interp.duration);

        let curve_value = curves.z_curve.sample(interp.elapsed);
        let start = interp.start_location;

        let location = Vec3::new(
            interp_to(current_location.x, target.location.x, delta_time, curves.xy_speed),
            interp_to(current_location.y, target.location.y, delta_time, curves.xy_speed),
            start.z + curve_value * (target.location.z - start.z),
        );

        let yaw = normalize_axis(target.camera_yaw + interp.initial_yaw_offset);

        let scale = curves.scale_curve.map(|curve| curve.sample(interp.elapsed));
        if let Some(scale) = scale {
            self.scale = scale;
        }

        Some(InterpPose { location, yaw, scale })
    }

    /// Завершить полёт. Возвращает владельца (None если не летели).
    pub fn finish_interpolation(&mut self, disposition: PickupDisposition) -> Option<Entity> {
        if self.state != ItemState::EquipInterping {
            return None;
        }

        self.interp = None;
        self.scale = 1.0;
        self.state = match disposition {
            PickupDisposition::Equip => ItemState::Equipped,
            PickupDisposition::Stow | PickupDisposition::Consume => ItemState::PickedUp,
        };

        self.owner
    }

    /// Переход состояния (drop, throw, landing, Equipped ↔ PickedUp)
    ///
    /// Инвариант: owner есть тогда и только тогда, когда state owned.
    /// Поэтому owned state без владельца (и EquipInterping без активного
    /// полёта) отклоняется: `None`, состояние не меняется. Из Pickup/Falling
    /// в owned state ведут только `begin_interpolation` и `equip_to`.
    pub fn set_state(&mut self, state: ItemState) -> Option<ItemPhysicsProfile> {
        if state.has_owner() && self.owner.is_none() {
            return None;
        }
        if state == ItemState::EquipInterping && self.interp.is_none() {
            return None;
        }
        Some(self.enter(state))
    }

    /// Взять в руки напрямую (без полёта)
    pub fn equip_to(&mut self, owner: Entity) -> ItemPhysicsProfile {
        self.owner = Some(owner);
        self.enter(ItemState::Equipped)
    }

    /// Владелец исчез посреди полёта → предмет падает
    pub fn abort_to_falling(&mut self) -> ItemPhysicsProfile {
        self.scale = 1.0;
        self.enter(ItemState::Falling)
    }

    fn enter(&mut self, state: ItemState) -> ItemPhysicsProfile {
        self.state = state;
        if state != ItemState::EquipInterping {
            self.interp = None;
        }
        if !state.has_owner() {
            self.owner = None;
        }
        ItemPhysicsProfile::for_state(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn owner() -> Entity {
        Entity::from_raw(7)
    }

    fn begin(lifecycle: &mut ItemLifecycle) -> bool {
        lifecycle.begin_interpolation(owner(), 0, Vec3::new(0.0, 0.0, 10.0), 45.0, 0.0, 0.7)
    }

    #[test]
    fn test_begin_only_from_pickup() {
        let mut lifecycle = ItemLifecycle::default();
        assert!(begin(&mut lifecycle));
        assert_eq!(lifecycle.state(), ItemState::EquipInterping);
        assert_eq!(lifecycle.owner(), Some(owner()));
        assert_eq!(lifecycle.interp().map(|i| i.initial_yaw_offset), Some(45.0));

        // Повторный старт игнорируется
        assert!(!begin(&mut lifecycle));

        let mut falling = ItemLifecycle::default();
        falling.set_state(ItemState::Falling);
        assert!(!begin(&mut falling));
        assert_eq!(falling.owner(), None);
    }

    #[test]
    fn test_tick_follows_curves() {
        let mut lifecycle = ItemLifecycle::default();
        begin(&mut lifecycle);

        let z_curve = FloatCurve::new(vec![(0.0, 0.0), (0.7, 1.0)]);
        let scale_curve = FloatCurve::new(vec![(0.0, 1.0), (0.7, 2.0)]);
        let curves = InterpCurves {
            z_curve: &z_curve,
            scale_curve: Some(&scale_curve),
            xy_speed: 30.0,
        };
        let target = InterpTarget {
            location: Vec3::new(100.0, 50.0, 80.0),
            camera_yaw: 90.0,
        };

        let pose = lifecycle
            .tick(0.35, Vec3::new(0.0, 0.0, 10.0), &target, &curves)
            .unwrap();

        // Половина кривой: 10 + 0.5 * 70
        assert!((pose.location.z - 45.0).abs() < 1.0e-3);
        // xy_speed * dt > 1 → сразу в цель
        assert!((pose.location.x - 100.0).abs() < 1.0e-3);
        assert!((pose.yaw - 135.0).abs() < 1.0e-3);
        assert!((pose.scale.unwrap() - 1.5).abs() < 1.0e-3);
        assert!((lifecycle.scale - 1.5).abs() < 1.0e-3);
    }

    #[test]
    fn test_z_descends_when_target_below_start() {
        let mut lifecycle = ItemLifecycle::default();
        lifecycle.begin_interpolation(owner(), 1, Vec3::new(0.0, 0.0, 200.0), 0.0, 0.0, 0.7);

        let z_curve = FloatCurve::new(vec![(0.0, 0.0), (0.7, 1.0)]);
        let curves = InterpCurves {
            z_curve: &z_curve,
            scale_curve: None,
            xy_speed: 30.0,
        };
        let target = InterpTarget {
            location: Vec3::new(0.0, 0.0, 100.0),
            camera_yaw: 0.0,
        };

        let pose = lifecycle
            .tick(0.7, Vec3::new(0.0, 0.0, 200.0), &target, &curves)
            .unwrap();
        assert!((pose.location.z - 100.0).abs() < 1.0e-3);
        assert_eq!(pose.scale, None);
    }

    #[test]
    fn test_elapsed_never_exceeds_duration() {
        let mut lifecycle = ItemLifecycle::default();
        begin(&mut lifecycle);

        let z_curve = FloatCurve::default_item_z();
        let curves = InterpCurves {
            z_curve: &z_curve,
            scale_curve: None,
            xy_speed: 30.0,
        };
        let target = InterpTarget {
            location: Vec3::ZERO,
            camera_yaw: 0.0,
        };

        for _ in 0..120 {
            lifecycle.tick(DT, Vec3::ZERO, &target, &curves);
        }
        assert_eq!(lifecycle.interp().map(|i| i.elapsed), Some(0.7));
    }

    #[test]
    fn test_tick_outside_interp_is_none() {
        let mut lifecycle = ItemLifecycle::default();
        let z_curve = FloatCurve::default_item_z();
        let curves = InterpCurves {
            z_curve: &z_curve,
            scale_curve: None,
            xy_speed: 30.0,
        };
        let target = InterpTarget {
            location: Vec3::ZERO,
            camera_yaw: 0.0,
        };
        assert!(lifecycle.tick(DT, Vec3::ZERO, &target, &curves).is_none());
    }

    #[test]
    fn test_finish_dispositions() {
        let mut equip = ItemLifecycle::default();
        begin(&mut equip);
        equip.scale = 1.3;
        assert_eq!(equip.finish_interpolation(PickupDisposition::Equip), Some(owner()));
        assert_eq!(equip.state(), ItemState::Equipped);
        assert_eq!(equip.scale, 1.0);
        assert!(equip.interp().is_none());

        let mut stow = ItemLifecycle::default();
        begin(&mut stow);
        stow.finish_interpolation(PickupDisposition::Stow);
        assert_eq!(stow.state(), ItemState::PickedUp);
        assert_eq!(stow.owner(), Some(owner()));

        // Не летели → no-op
        let mut idle = ItemLifecycle::default();
        assert_eq!(idle.finish_interpolation(PickupDisposition::Equip), None);
        assert_eq!(idle.state(), ItemState::Pickup);
    }

    #[test]
    fn test_abort_clears_owner() {
        let mut lifecycle = ItemLifecycle::default();
        begin(&mut lifecycle);
        lifecycle.scale = 1.2;

        let profile = lifecycle.abort_to_falling();
        assert_eq!(lifecycle.state(), ItemState::Falling);
        assert_eq!(lifecycle.owner(), None);
        assert!(lifecycle.interp().is_none());
        assert_eq!(lifecycle.scale, 1.0);
        assert!(profile.simulate_physics);
    }

    #[test]
    fn test_drop_releases_owner() {
        let mut lifecycle = ItemLifecycle::default();
        lifecycle.equip_to(owner());
        assert_eq!(lifecycle.owner(), Some(owner()));

        lifecycle.set_state(ItemState::Falling);
        assert_eq!(lifecycle.owner(), None);

        lifecycle.set_state(ItemState::Pickup);
        assert!(lifecycle.profile().pickup_prompt_allowed);
    }

    #[test]
    fn test_owned_state_requires_owner() {
        let mut lifecycle = ItemLifecycle::default();

        for state in [ItemState::Equipped, ItemState::PickedUp, ItemState::EquipInterping] {
            assert_eq!(lifecycle.set_state(state), None);
            assert_eq!(lifecycle.state(), ItemState::Pickup);
            assert_eq!(lifecycle.owner(), None);
        }

        lifecycle.set_state(ItemState::Falling);
        assert_eq!(lifecycle.set_state(ItemState::Equipped), None);
        assert_eq!(lifecycle.state(), ItemState::Falling);
    }

    #[test]
    fn test_owned_states_switch_keeping_owner() {
        let mut lifecycle = ItemLifecycle::default();
        lifecycle.equip_to(owner());

        // Убрали в инвентарь и снова взяли в руки
        let profile = lifecycle.set_state(ItemState::PickedUp);
        assert!(profile.is_some_and(|profile| !profile.mesh_visible));
        assert_eq!(lifecycle.owner(), Some(owner()));

        assert!(lifecycle.set_state(ItemState::Equipped).is_some());
        assert_eq!(lifecycle.owner(), Some(owner()));

        // Без активного полёта EquipInterping недоступен даже с владельцем
        assert_eq!(lifecycle.set_state(ItemState::EquipInterping), None);
        assert_eq!(lifecycle.state(), ItemState::Equipped);
    }
}
