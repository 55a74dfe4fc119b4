//! ECS Components для игровых entity
//!
//! Организация по доменам:
//! - character: персонаж игрока (kinematics, combat state, vitals, inventory)
//!
//! Компоненты предметов, врагов и анимации живут в своих модулях
//! (`items`, `combat`, `animation`).

pub mod character;

pub use character::*;
