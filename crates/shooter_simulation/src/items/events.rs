//! Item events
//!
//! # Architecture
//!
//! **Host → ECS:**
//! - `ItemOverlap`: pickup сфера предмета начала/закончила пересекать actor
//! - `PickupItemIntent`: игрок выбрал предмет под прицелом
//! - `DropWeaponIntent`: персонаж бросает оружие из рук
//!
//! **ECS → Host:**
//! - `ItemStateChanged`: применить новый physics/collision profile
//! - `ItemImpulse`: толкнуть rigid body (бросок)
//! - `ItemPickedUp`: предмет дошёл до персонажа (звук, UI)

use bevy::prelude::*;

use super::lifecycle::PickupDisposition;
use super::state::{ItemPhysicsProfile, ItemState};

/// Overlap pickup сферы предмета с другим actor
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemOverlap {
    pub item: Entity,
    pub other: Entity,
    /// true — begin overlap, false — end overlap
    pub began: bool,
}

/// Подобрать предмет под прицелом (host trace + select button)
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PickupItemIntent {
    pub character: Entity,
    pub item: Entity,
}

/// Бросить оружие из рук
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropWeaponIntent {
    pub character: Entity,
}

#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct ItemStateChanged {
    pub item: Entity,
    pub from: ItemState,
    pub to: ItemState,
    pub profile: ItemPhysicsProfile,
}

#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct ItemImpulse {
    pub item: Entity,
    pub impulse: Vec3,
}

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemPickedUp {
    pub item: Entity,
    pub character: Entity,
    pub disposition: PickupDisposition,
}
