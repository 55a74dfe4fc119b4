//! Turn in place — root yaw offset для стоящего персонажа
//!
//! Пока персонаж стоит на земле, нижняя часть тела остаётся на месте, а aim
//! крутит верх. Root yaw offset компенсирует поворот актора; когда offset
//! становится большим, host проигрывает turn-клип, и его кривая "Rotation"
//! постепенно "съедает" накопленный offset.
//!
//! Знак: offset > 0 → поворот налево, offset < 0 → направо.

use bevy::prelude::*;

use crate::shared::normalize_axis;

/// Входы одного тика (sampled)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TurnInPlaceInput {
    /// Латеральная скорость
    pub speed: f32,
    pub is_in_air: bool,
    pub actor_yaw: f32,
    /// Значение кривой "Turning" (0 → turn-клип не играет)
    pub turning_curve: f32,
    /// Значение кривой "Rotation"
    pub rotation_curve: f32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Reflect)]
pub struct TurnInPlace {
    pub root_yaw_offset: f32,
    pub is_turning: bool,
    pub character_yaw: f32,
    pub character_yaw_last_frame: f32,
    pub rotation_curve: f32,
    pub rotation_curve_last_frame: f32,
    /// Первый тик только запоминает yaw (иначе дефолтный 0 даёт ложный delta)
    initialized: bool,
}

impl TurnInPlace {
    pub fn update(&mut self, input: &TurnInPlaceInput, yaw_limit: f32) {
        if !self.initialized {
            self.character_yaw = input.actor_yaw;
            self.character_yaw_last_frame = input.actor_yaw;
            self.initialized = true;
        }

        // Движется или в воздухе → turn in place не применяется
        if input.speed > 0.0 || input.is_in_air {
            self.reset(input);
            return;
        }

        self.character_yaw_last_frame = self.character_yaw;
        self.character_yaw = input.actor_yaw;
        let yaw_delta = self.character_yaw - self.character_yaw_last_frame;

        self.root_yaw_offset = normalize_axis(self.root_yaw_offset - yaw_delta);

        if input.turning_curve > 0.0 {
            self.is_turning = true;
            self.rotation_curve_last_frame = self.rotation_curve;
            self.rotation_curve = input.rotation_curve;
            let delta_rotation = self.rotation_curve - self.rotation_curve_last_frame;

            if self.root_yaw_offset > 0.0 {
                self.root_yaw_offset -= delta_rotation;
            } else {
                self.root_yaw_offset += delta_rotation;
            }

            let abs_offset = self.root_yaw_offset.abs();
            if abs_offset > yaw_limit {
                let excess = abs_offset - yaw_limit;
                if self.root_yaw_offset > 0.0 {
                    self.root_yaw_offset -= excess;
                } else {
                    self.root_yaw_offset += excess;
                }
            }
        } else {
            self.is_turning = false;
        }
    }

    fn reset(&mut self, input: &TurnInPlaceInput) {
        self.root_yaw_offset = 0.0;
        self.character_yaw = input.actor_yaw;
        self.character_yaw_last_frame = input.actor_yaw;
        self.rotation_curve = input.rotation_curve;
        self.rotation_curve_last_frame = input.rotation_curve;
        self.is_turning = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIMIT: f32 = 90.0;

    fn standing(actor_yaw: f32) -> TurnInPlaceInput {
        TurnInPlaceInput {
            actor_yaw,
            ..Default::default()
        }
    }

    fn turning(actor_yaw: f32, rotation_curve: f32) -> TurnInPlaceInput {
        TurnInPlaceInput {
            actor_yaw,
            turning_curve: 1.0,
            rotation_curve,
            ..Default::default()
        }
    }

    #[test]
    fn test_yaw_change_while_standing_builds_offset() {
        let mut tip = TurnInPlace::default();
        tip.update(&standing(0.0), LIMIT);
        tip.update(&standing(30.0), LIMIT);

        assert!((tip.root_yaw_offset - -30.0).abs() < 1.0e-4);
        assert!(!tip.is_turning);
    }

    #[test]
    fn test_first_tick_does_not_invent_delta() {
        let mut tip = TurnInPlace::default();
        tip.update(&standing(75.0), LIMIT);
        assert_eq!(tip.root_yaw_offset, 0.0);
    }

    #[test]
    fn test_offset_wraps_across_180() {
        let mut tip = TurnInPlace::default();
        tip.update(&standing(170.0), LIMIT);
        // 170 → -170 это +20°, а не -340°
        tip.update(&standing(-170.0), LIMIT);
        assert!((tip.root_yaw_offset - -20.0).abs() < 1.0e-3);
    }

    #[test]
    fn test_moving_resets_offset() {
        let mut tip = TurnInPlace::default();
        tip.update(&standing(0.0), LIMIT);
        tip.update(&standing(45.0), LIMIT);
        assert!(tip.root_yaw_offset != 0.0);

        let moving = TurnInPlaceInput {
            speed: 300.0,
            actor_yaw: 60.0,
            ..Default::default()
        };
        tip.update(&moving, LIMIT);

        assert_eq!(tip.root_yaw_offset, 0.0);
        assert_eq!(tip.character_yaw, 60.0);
        assert_eq!(tip.character_yaw_last_frame, 60.0);
        assert!(!tip.is_turning);
    }

    #[test]
    fn test_airborne_resets_offset() {
        let mut tip = TurnInPlace::default();
        tip.update(&standing(0.0), LIMIT);
        tip.update(&standing(-50.0), LIMIT);

        let jumping = TurnInPlaceInput {
            is_in_air: true,
            actor_yaw: -50.0,
            ..Default::default()
        };
        tip.update(&jumping, LIMIT);
        assert_eq!(tip.root_yaw_offset, 0.0);
    }

    #[test]
    fn test_offset_clamped_once_turn_curve_active() {
        let mut tip = TurnInPlace::default();
        tip.update(&standing(0.0), LIMIT);
        tip.update(&standing(-120.0), LIMIT);
        // Без turn-клипа offset не ограничивается
        assert!((tip.root_yaw_offset - 120.0).abs() < 1.0e-4);

        tip.update(&turning(-120.0, 0.0), LIMIT);
        assert!(tip.is_turning);
        assert!((tip.root_yaw_offset - 90.0).abs() < 1.0e-4);
    }

    #[test]
    fn test_rotation_curve_consumes_offset() {
        let mut tip = TurnInPlace::default();
        tip.update(&standing(0.0), LIMIT);
        tip.update(&standing(-60.0), LIMIT);
        assert!((tip.root_yaw_offset - 60.0).abs() < 1.0e-4);

        tip.update(&turning(-60.0, 0.0), LIMIT);
        assert!((tip.root_yaw_offset - 60.0).abs() < 1.0e-4);

        // Положительный offset (налево) уменьшается на прирост кривой
        tip.update(&turning(-60.0, 20.0), LIMIT);
        assert!((tip.root_yaw_offset - 40.0).abs() < 1.0e-4);
    }

    #[test]
    fn test_negative_offset_consumed_toward_zero() {
        let mut tip = TurnInPlace::default();
        tip.update(&standing(0.0), LIMIT);
        tip.update(&standing(40.0), LIMIT);
        assert!((tip.root_yaw_offset - -40.0).abs() < 1.0e-4);

        tip.update(&turning(40.0, 0.0), LIMIT);
        let before = tip.root_yaw_offset;
        tip.update(&turning(40.0, 15.0), LIMIT);

        assert!((tip.root_yaw_offset - (before + 15.0)).abs() < 1.0e-4);
    }

    #[test]
    fn test_turn_flag_drops_when_curve_ends() {
        let mut tip = TurnInPlace::default();
        tip.update(&standing(0.0), LIMIT);
        tip.update(&turning(0.0, 0.0), LIMIT);
        assert!(tip.is_turning);

        tip.update(&standing(0.0), LIMIT);
        assert!(!tip.is_turning);
    }
}
