//! Weapon payload — патроны, магазин, бросок

use bevy::prelude::*;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::shared::{forward_from_yaw, right_from_yaw};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect, Serialize, Deserialize)]
pub enum WeaponType {
    SubmachineGun,
    AssaultRifle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect, Serialize, Deserialize)]
pub enum AmmoType {
    NineMm,
    AssaultRifle,
}

#[derive(Debug, Clone, PartialEq, Reflect)]
pub struct WeaponData {
    /// Патроны в магазине
    pub ammo: i32,
    pub magazine_capacity: i32,
    pub weapon_type: WeaponType,
    pub ammo_type: AmmoType,
    /// Секция reload montage для этого оружия
    pub reload_montage_section: String,
    pub clip_bone_name: String,
    /// Брошено и ещё не приземлилось (throw таймер активен)
    pub falling: bool,
}

impl Default for WeaponData {
    fn default() -> Self {
        Self::submachine_gun(0)
    }
}

impl WeaponData {
    pub fn submachine_gun(ammo: i32) -> Self {
        Self {
            ammo,
            magazine_capacity: 30,
            weapon_type: WeaponType::SubmachineGun,
            ammo_type: AmmoType::NineMm,
            reload_montage_section: "Reload SMG".into(),
            clip_bone_name: "smg_clip".into(),
            falling: false,
        }
    }

    pub fn assault_rifle(ammo: i32) -> Self {
        Self {
            ammo,
            magazine_capacity: 20,
            weapon_type: WeaponType::AssaultRifle,
            ammo_type: AmmoType::AssaultRifle,
            reload_montage_section: "Reload AR".into(),
            clip_bone_name: "ar_clip".into(),
            falling: false,
        }
    }

    /// Выстрел: -1 патрон, не ниже 0
    pub fn decrement_ammo(&mut self) {
        self.ammo = (self.ammo - 1).max(0);
    }

    /// Добавить патроны (порция ограничена ёмкостью магазина)
    pub fn reload_ammo(&mut self, amount: i32) {
        self.ammo += amount.clamp(0, self.magazine_capacity);
    }

    /// Сколько патронов не хватает до полного магазина
    pub fn missing_ammo(&self) -> i32 {
        (self.magazine_capacity - self.ammo).max(0)
    }

    pub fn is_empty(&self) -> bool {
        self.ammo == 0
    }
}

/// Импульс броска оружия
///
/// Правая ось меша, наклонённая на `tilt` вокруг forward, затем
/// случайно повёрнутая на [0, 180) градусов вокруг вертикали.
pub fn throw_impulse<R: Rng + ?Sized>(mesh_yaw: f32, rng: &mut R, tilt: f32, strength: f32) -> Vec3 {
    let forward = forward_from_yaw(mesh_yaw);
    let right = right_from_yaw(mesh_yaw);

    let tilted = Quat::from_axis_angle(forward, tilt.to_radians()) * right;

    let spin: f32 = rng.gen_range(0.0..180.0);
    let direction = Quat::from_rotation_z(spin.to_radians()) * tilted;

    direction * strength
}
