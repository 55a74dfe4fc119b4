//! Направление попадания относительно актора (Front/Back/Left/Right)

use bevy::prelude::*;

use crate::shared::{forward_from_yaw, right_from_yaw, yaw_of};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Reflect)]
pub enum HitDirection {
    #[default]
    Front,
    Back,
    Left,
    Right,
}

/// Классификация попадания по dot products с forward/right
///
/// Проверки по порядку, первая совпавшая выигрывает:
/// 1. forward·diff ∈ [0.5, 1] → Front
/// 2. forward·diff ∈ [-1, -0.5] → Back
/// 3. right·diff ∈ [0, 1] → Right
/// 4. right·diff ∈ [-1, 0] → Left
/// 5. иначе (нулевой diff, NaN) → Front
pub fn classify_hit(forward: Vec3, right: Vec3, actor_location: Vec3, hit_location: Vec3) -> HitDirection {
    let Some(diff) = (hit_location - actor_location).try_normalize() else {
        return HitDirection::Front;
    };

    // Float погрешность normalize может дать 1.0000001
    let forward_dot = forward.dot(diff).clamp(-1.0, 1.0);
    let right_dot = right.dot(diff).clamp(-1.0, 1.0);

    if (0.5..=1.0).contains(&forward_dot) {
        HitDirection::Front
    } else if (-1.0..=-0.5).contains(&forward_dot) {
        HitDirection::Back
    } else if (0.0..=1.0).contains(&right_dot) {
        HitDirection::Right
    } else if (-1.0..=0.0).contains(&right_dot) {
        HitDirection::Left
    } else {
        HitDirection::Front
    }
}

/// То же, но forward/right берутся из yaw `Transform` (Z-up)
pub fn classify_hit_on(transform: &Transform, hit_location: Vec3) -> HitDirection {
    let yaw = yaw_of(transform.rotation);
    classify_hit(
        forward_from_yaw(yaw),
        right_from_yaw(yaw),
        transform.translation,
        hit_location,
    )
}
