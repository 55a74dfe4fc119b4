//! MovementBlendState — параметры blend tree персонажа
//!
//! Каждый тик собирает kinematics + combat state + curve samples в плоский
//! набор значений, которые host animation blend tree читает read-only.

use bevy::prelude::*;

use super::lean::Lean;
use super::turn_in_place::{TurnInPlace, TurnInPlaceInput};
use crate::components::CombatState;
use crate::config::LocomotionConfig;
use crate::items::WeaponType;
use crate::shared::{normalize_axis, normalized_delta, yaw_from_direction};

/// Категория aim offset позы (взаимоисключающие)
///
/// Приоритет: Reloading > InAir > Aiming > Hip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum OffsetState {
    #[default]
    Hip,
    Aiming,
    InAir,
    Reloading,
}

impl OffsetState {
    pub fn resolve(reloading: bool, in_air: bool, aiming: bool) -> Self {
        if reloading {
            OffsetState::Reloading
        } else if in_air {
            OffsetState::InAir
        } else if aiming {
            OffsetState::Aiming
        } else {
            OffsetState::Hip
        }
    }
}

/// Флаги для таблицы recoil weight
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecoilContext {
    pub turning_in_place: bool,
    pub crouching: bool,
    pub aiming: bool,
    pub reloading: bool,
    pub equipping: bool,
}

/// Насколько сильно подмешивается recoil/aim слой
///
/// Reload/equip всегда 1.0; иначе поворот на месте гасит слой полностью,
/// присед почти полностью, стоя — половина (aim → 1.0).
pub fn recoil_weight(ctx: RecoilContext) -> f32 {
    let busy = ctx.reloading || ctx.equipping;

    if ctx.turning_in_place {
        if busy {
            1.0
        } else {
            0.0
        }
    } else if ctx.crouching {
        if busy {
            1.0
        } else {
            0.1
        }
    } else if ctx.aiming || busy {
        1.0
    } else {
        0.5
    }
}

/// Снимок входов одного тика
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AnimationInput {
    pub velocity: Vec3,
    pub acceleration: Vec3,
    pub is_falling: bool,
    pub actor_yaw: f32,
    pub aim_yaw: f32,
    pub aim_pitch: f32,
    pub combat_state: CombatState,
    pub aiming: bool,
    pub crouching: bool,
    pub turning_curve: f32,
    pub rotation_curve: f32,
    pub equipped_weapon_type: Option<WeaponType>,
}

#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct MovementBlendState {
    /// Латеральная скорость (Z обнулён), ≥ 0
    pub speed: f32,
    pub is_in_air: bool,
    pub is_accelerating: bool,
    /// Направление движения относительно aim, (-180, 180]
    pub movement_offset_yaw: f32,
    /// Последний offset пока персонаж двигался (стабильная поза на остановке)
    pub last_movement_offset_yaw: f32,
    pub offset_state: OffsetState,
    pub aim_pitch: f32,
    pub aiming: bool,
    pub crouching: bool,
    pub reloading: bool,
    pub equipping: bool,
    /// Left-hand IK включён только когда руки свободны
    pub use_fabrik: bool,
    pub recoil_weight: f32,
    pub equipped_weapon_type: Option<WeaponType>,
    pub turn_in_place: TurnInPlace,
    pub lean: Lean,
}

impl MovementBlendState {
    pub fn root_yaw_offset(&self) -> f32 {
        self.turn_in_place.root_yaw_offset
    }

    pub fn is_turning_in_place(&self) -> bool {
        self.turn_in_place.is_turning
    }

    pub fn lean_yaw_delta(&self) -> f32 {
        self.lean.yaw_delta
    }

    /// Обновление за тик. Нет входов (owner ещё не привязан) → no-op.
    pub fn update(
        &mut self,
        input: Option<&AnimationInput>,
        delta_time: f32,
        config: &LocomotionConfig,
    ) {
        let Some(input) = input else {
            return;
        };

        self.crouching = input.crouching;
        self.reloading = input.combat_state == CombatState::Reloading;
        self.equipping = input.combat_state == CombatState::Equipping;
        self.use_fabrik = matches!(
            input.combat_state,
            CombatState::Unoccupied | CombatState::FireTimerInProgress
        );

        let lateral = Vec3::new(input.velocity.x, input.velocity.y, 0.0);
        self.speed = lateral.length();
        self.is_in_air = input.is_falling;
        self.is_accelerating = input.acceleration.length() > 0.0;

        let movement_yaw = yaw_from_direction(input.velocity);
        self.movement_offset_yaw = normalized_delta(movement_yaw, input.aim_yaw);
        if self.speed > 0.0 {
            self.last_movement_offset_yaw = self.movement_offset_yaw;
        }

        self.aiming = input.aiming;
        self.offset_state = OffsetState::resolve(self.reloading, self.is_in_air, self.aiming);
        if input.equipped_weapon_type.is_some() {
            self.equipped_weapon_type = input.equipped_weapon_type;
        }

        // Base aim pitch приходит в [0, 360) — blend tree ждёт (-180, 180]
        self.aim_pitch = normalize_axis(input.aim_pitch);

        self.turn_in_place.update(
            &TurnInPlaceInput {
                speed: self.speed,
                is_in_air: self.is_in_air,
                actor_yaw: input.actor_yaw,
                turning_curve: input.turning_curve,
                rotation_curve: input.rotation_curve,
            },
            config.turn_yaw_limit,
        );

        // Каждый тик, не только стоя на месте: в движении is_turning = false,
        // так что вес совпадает с обычной таблицей stance/aim
        self.recoil_weight = recoil_weight(RecoilContext {
            turning_in_place: self.turn_in_place.is_turning,
            crouching: self.crouching,
            aiming: self.aiming,
            reloading: self.reloading,
            equipping: self.equipping,
        });

        self.lean.update(
            input.actor_yaw,
            delta_time,
            config.lean_interp_speed,
            config.lean_limit,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn config() -> LocomotionConfig {
        LocomotionConfig::default()
    }

    #[test]
    fn test_recoil_weight_table() {
        let turning_reload = RecoilContext {
            turning_in_place: true,
            reloading: true,
            ..Default::default()
        };
        assert_eq!(recoil_weight(turning_reload), 1.0);

        let turning_idle = RecoilContext {
            turning_in_place: true,
            aiming: true,
            ..Default::default()
        };
        assert_eq!(recoil_weight(turning_idle), 0.0);

        let crouched = RecoilContext {
            crouching: true,
            ..Default::default()
        };
        assert_eq!(recoil_weight(crouched), 0.1);

        let crouched_equipping = RecoilContext {
            crouching: true,
            equipping: true,
            ..Default::default()
        };
        assert_eq!(recoil_weight(crouched_equipping), 1.0);

        assert_eq!(recoil_weight(RecoilContext::default()), 0.5);

        let aiming = RecoilContext {
            aiming: true,
            ..Default::default()
        };
        assert_eq!(recoil_weight(aiming), 1.0);
    }

    #[test]
    fn test_recoil_weight_updates_while_moving() {
        let mut state = MovementBlendState::default();
        let crouch_walk = AnimationInput {
            velocity: Vec3::new(150.0, 0.0, 0.0),
            crouching: true,
            turning_curve: 1.0,
            ..Default::default()
        };
        state.update(Some(&crouch_walk), DT, &config());

        // В движении turn in place сброшен → обычная таблица
        assert!(!state.is_turning_in_place());
        assert_eq!(state.recoil_weight, 0.1);

        let aim_walk = AnimationInput {
            velocity: Vec3::new(150.0, 0.0, 0.0),
            aiming: true,
            ..Default::default()
        };
        state.update(Some(&aim_walk), DT, &config());
        assert_eq!(state.recoil_weight, 1.0);
    }

    #[test]
    fn test_offset_state_priority() {
        assert_eq!(OffsetState::resolve(true, true, true), OffsetState::Reloading);
        assert_eq!(OffsetState::resolve(false, true, true), OffsetState::InAir);
        assert_eq!(OffsetState::resolve(false, false, true), OffsetState::Aiming);
        assert_eq!(OffsetState::resolve(false, false, false), OffsetState::Hip);
    }

    #[test]
    fn test_missing_input_is_noop() {
        let mut state = MovementBlendState::default();
        state.speed = 42.0;
        state.update(None, DT, &config());
        assert_eq!(state.speed, 42.0);
    }

    #[test]
    fn test_speed_ignores_vertical_velocity() {
        let mut state = MovementBlendState::default();
        let input = AnimationInput {
            velocity: Vec3::new(300.0, 400.0, -900.0),
            is_falling: true,
            ..Default::default()
        };
        state.update(Some(&input), DT, &config());

        assert!((state.speed - 500.0).abs() < 1.0e-3);
        assert!(state.is_in_air);
        assert_eq!(state.offset_state, OffsetState::InAir);
    }

    #[test]
    fn test_movement_offset_relative_to_aim() {
        let mut state = MovementBlendState::default();
        // Бежим в +Y (yaw 90), смотрим в +X (yaw 0) → strafe вправо, offset +90
        let input = AnimationInput {
            velocity: Vec3::new(0.0, 200.0, 0.0),
            aim_yaw: 0.0,
            ..Default::default()
        };
        state.update(Some(&input), DT, &config());
        assert!((state.movement_offset_yaw - 90.0).abs() < 1.0e-3);
        assert!((state.last_movement_offset_yaw - 90.0).abs() < 1.0e-3);
    }

    #[test]
    fn test_last_offset_held_while_stationary() {
        let mut state = MovementBlendState::default();
        let running = AnimationInput {
            velocity: Vec3::new(-200.0, 0.0, 0.0),
            aim_yaw: 0.0,
            ..Default::default()
        };
        state.update(Some(&running), DT, &config());
        assert!((state.last_movement_offset_yaw - 180.0).abs() < 1.0e-3);

        let stopped = AnimationInput {
            aim_yaw: 30.0,
            ..Default::default()
        };
        state.update(Some(&stopped), DT, &config());

        assert_eq!(state.speed, 0.0);
        assert!((state.movement_offset_yaw - -30.0).abs() < 1.0e-3);
        assert!((state.last_movement_offset_yaw - 180.0).abs() < 1.0e-3);
    }

    #[test]
    fn test_combat_state_flags() {
        let mut state = MovementBlendState::default();
        let reloading = AnimationInput {
            combat_state: CombatState::Reloading,
            aiming: true,
            ..Default::default()
        };
        state.update(Some(&reloading), DT, &config());

        assert!(state.reloading);
        assert!(!state.use_fabrik);
        assert_eq!(state.offset_state, OffsetState::Reloading);
        assert_eq!(state.recoil_weight, 1.0);

        let firing = AnimationInput {
            combat_state: CombatState::FireTimerInProgress,
            ..Default::default()
        };
        state.update(Some(&firing), DT, &config());
        assert!(state.use_fabrik);
        assert_eq!(state.recoil_weight, 0.5);
    }

    #[test]
    fn test_aim_pitch_normalized() {
        let mut state = MovementBlendState::default();
        let looking_down = AnimationInput {
            aim_pitch: 350.0,
            ..Default::default()
        };
        state.update(Some(&looking_down), DT, &config());
        assert!((state.aim_pitch - -10.0).abs() < 1.0e-3);
    }

    #[test]
    fn test_turn_in_place_feeds_recoil_weight() {
        let mut state = MovementBlendState::default();
        let idle = AnimationInput::default();
        state.update(Some(&idle), DT, &config());

        let turning = AnimationInput {
            turning_curve: 1.0,
            ..Default::default()
        };
        state.update(Some(&turning), DT, &config());

        assert!(state.is_turning_in_place());
        assert_eq!(state.recoil_weight, 0.0);
    }
}
