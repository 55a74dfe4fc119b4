//! Выбор реакции на удар: montage секции, stun roll, attack секции
//!
//! Все случайные решения берут RNG параметром (DeterministicRng в ECS,
//! seeded ChaCha8Rng в тестах).

use rand::Rng;

use super::hit_direction::HitDirection;

pub const HIT_REACT_FRONT: &str = "HitReactFront";
pub const HIT_REACT_BACK: &str = "HitReactBack";
pub const HIT_REACT_LEFT: &str = "HitReactLeft";
pub const HIT_REACT_RIGHT: &str = "HitReactRight";

pub const DEATH_FROM_FRONT: &str = "DeathFromFront";
pub const DEATH_FROM_BACK: &str = "DeathFromBack";

pub const ATTACK_L_FAST: &str = "AttackLFast";
pub const ATTACK_R_FAST: &str = "AttackRFast";
pub const ATTACK_L: &str = "AttackL";
pub const ATTACK_R: &str = "AttackR";

pub fn hit_react_section(direction: HitDirection) -> &'static str {
    match direction {
        HitDirection::Front => HIT_REACT_FRONT,
        HitDirection::Back => HIT_REACT_BACK,
        HitDirection::Left => HIT_REACT_LEFT,
        HitDirection::Right => HIT_REACT_RIGHT,
    }
}

/// Death клипов только два: слева падаем вперёд, справа — назад
pub fn death_section(direction: HitDirection) -> &'static str {
    match direction {
        HitDirection::Front | HitDirection::Left => DEATH_FROM_FRONT,
        HitDirection::Back | HitDirection::Right => DEATH_FROM_BACK,
    }
}

/// Stun roll: равномерный draw из [0, 1] ≤ chance
pub fn roll_stun<R: Rng + ?Sized>(rng: &mut R, chance: f32) -> bool {
    let roll: f32 = rng.gen_range(0.0..=1.0);
    roll <= chance
}

/// Случайная секция атаки (4 равновероятных варианта)
pub fn attack_section<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    attack_section_for(rng.gen_range(1..=4))
}

fn attack_section_for(roll: u32) -> &'static str {
    match roll {
        1 => ATTACK_L_FAST,
        2 => ATTACK_R_FAST,
        3 => ATTACK_L,
        4 => ATTACK_R,
        _ => "",
    }
}

/// Случайная длительность hit-react cooldown из [min, max]
pub fn hit_react_cooldown<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> f32 {
    if max <= min {
        return min;
    }
    rng.gen_range(min..=max)
}
