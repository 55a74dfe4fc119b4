//! AngleMath — нормализация углов и сглаживание
//!
//! Конвенции мира: Z-up, yaw вращает вокруг +Z, yaw = 0 смотрит в +X,
//! правая ось при yaw = 0 — это +Y. Все углы в градусах.

use bevy::math::{EulerRot, Quat, Vec3};

/// Порог "расстояние уже ноль" для `interp_to`
const INTERP_SNAP_EPSILON: f32 = 1.0e-8;

/// Приводит угол к диапазону (-180, 180]
///
/// Идемпотентна и периодична: `normalize_axis(x + 360k) == normalize_axis(x)`.
pub fn normalize_axis(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    if wrapped > 180.0 {
        wrapped - 360.0
    } else {
        wrapped
    }
}

/// Кратчайшая знаковая разница `a - b`, нормализованная в (-180, 180]
///
/// Антисимметрична везде кроме ровно ±180 (там оба направления дают 180).
pub fn normalized_delta(a: f32, b: f32) -> f32 {
    normalize_axis(a - b)
}

/// Экспоненциальное приближение `current → target` за один тик
///
/// - `speed <= 0` → сразу target
/// - расстояние меньше epsilon → сразу target
/// - иначе шаг `distance * clamp(dt * speed, 0, 1)`
pub fn interp_to(current: f32, target: f32, delta_time: f32, speed: f32) -> f32 {
    if speed <= 0.0 {
        return target;
    }

    let distance = target - current;
    if distance * distance < INTERP_SNAP_EPSILON {
        return target;
    }

    current + distance * (delta_time * speed).clamp(0.0, 1.0)
}

/// Yaw направления (atan2(y, x)); нулевой вектор → 0
pub fn yaw_from_direction(direction: Vec3) -> f32 {
    if direction.x == 0.0 && direction.y == 0.0 {
        return 0.0;
    }
    direction.y.atan2(direction.x).to_degrees()
}

pub fn forward_from_yaw(yaw: f32) -> Vec3 {
    let (sin, cos) = yaw.to_radians().sin_cos();
    Vec3::new(cos, sin, 0.0)
}

pub fn right_from_yaw(yaw: f32) -> Vec3 {
    let (sin, cos) = yaw.to_radians().sin_cos();
    Vec3::new(-sin, cos, 0.0)
}

/// Чистый yaw-поворот (pitch/roll = 0) для `Transform`
pub fn yaw_rotation(yaw: f32) -> Quat {
    Quat::from_rotation_z(yaw.to_radians())
}

/// Yaw компонента поворота, нормализованная
pub fn yaw_of(rotation: Quat) -> f32 {
    let (yaw_rad, _, _) = rotation.to_euler(EulerRot::ZYX);
    normalize_axis(yaw_rad.to_degrees())
}
