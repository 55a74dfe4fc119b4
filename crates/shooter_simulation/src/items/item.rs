//! WorldItem — предмет в мире (оружие или патроны)

use bevy::prelude::*;

use super::lifecycle::ItemLifecycle;
use super::weapon::{AmmoType, WeaponData};
use crate::components::InterpLocations;

/// Редкость → количество звёзд в pickup widget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum ItemRarity {
    Damaged,
    #[default]
    Common,
    Uncommon,
    Rare,
    Legendary,
}

impl ItemRarity {
    pub fn star_count(self) -> usize {
        match self {
            ItemRarity::Damaged => 1,
            ItemRarity::Common => 2,
            ItemRarity::Uncommon => 3,
            ItemRarity::Rare => 4,
            ItemRarity::Legendary => 5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub struct AmmoData {
    pub ammo_type: AmmoType,
}

#[derive(Debug, Clone, PartialEq, Reflect)]
pub enum ItemPayload {
    Weapon(WeaponData),
    Ammo(AmmoData),
}

#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
#[require(Transform, ItemLifecycle)]
pub struct WorldItem {
    pub name: String,
    /// Для патронов — сколько патронов в коробке
    pub count: i32,
    pub rarity: ItemRarity,
    pub payload: ItemPayload,
}

impl WorldItem {
    pub fn weapon(name: impl Into<String>, rarity: ItemRarity, data: WeaponData) -> Self {
        Self {
            name: name.into(),
            count: 0,
            rarity,
            payload: ItemPayload::Weapon(data),
        }
    }

    pub fn ammo(ammo_type: AmmoType, count: i32) -> Self {
        Self {
            name: match ammo_type {
                AmmoType::NineMm => "9mm".into(),
                AmmoType::AssaultRifle => "Assault Rifle".into(),
            },
            count,
            rarity: ItemRarity::Common,
            payload: ItemPayload::Ammo(AmmoData { ammo_type }),
        }
    }

    pub fn weapon_data(&self) -> Option<&WeaponData> {
        match &self.payload {
            ItemPayload::Weapon(data) => Some(data),
            ItemPayload::Ammo(_) => None,
        }
    }

    pub fn weapon_data_mut(&mut self) -> Option<&mut WeaponData> {
        match &mut self.payload {
            ItemPayload::Weapon(data) => Some(data),
            ItemPayload::Ammo(_) => None,
        }
    }

    pub fn ammo_type(&self) -> Option<AmmoType> {
        match &self.payload {
            ItemPayload::Ammo(data) => Some(data.ammo_type),
            ItemPayload::Weapon(_) => None,
        }
    }

    pub fn is_weapon(&self) -> bool {
        matches!(self.payload, ItemPayload::Weapon(_))
    }

    /// Какие из 5 звёзд горят
    pub fn active_stars(&self) -> [bool; 5] {
        let lit = self.rarity.star_count();
        std::array::from_fn(|index| index < lit)
    }

    /// Interp слот: оружие всегда в слот 0, патроны — в наименее занятый
    pub fn interp_slot(&self, locations: &InterpLocations) -> usize {
        if self.is_weapon() {
            InterpLocations::WEAPON_SLOT
        } else {
            locations.lowest_ammo_slot()
        }
    }
}
