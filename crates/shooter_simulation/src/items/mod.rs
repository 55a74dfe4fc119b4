//! Items module — подбираемые предметы (оружие, патроны)
//!
//! # Architecture
//!
//! ECS (strategic layer):
//! - `ItemLifecycle` state machine + physics profile на каждый state
//! - Полёт к камере (interp слоты), inventory, бросок оружия
//! - Таймеры полёта и броска через `TimerScheduler`
//!
//! Host (tactical layer):
//! - Overlap pickup сфер → `ItemOverlap`
//! - Применение `ItemStateChanged.profile` к collision/physics
//! - Rigid body импульс из `ItemImpulse`

use bevy::prelude::*;

pub mod events;
pub mod item;
pub mod lifecycle;
pub mod state;
pub mod systems;
pub mod weapon;

pub use events::*;
pub use item::{AmmoData, ItemPayload, ItemRarity, WorldItem};
pub use lifecycle::{
    EquipInterp, InterpCurves, InterpPose, InterpTarget, ItemLifecycle, PickupDisposition,
};
pub use state::{CollisionMode, ItemPhysicsProfile, ItemState};
pub use systems::pickup_disposition;
pub use weapon::{throw_impulse, AmmoType, WeaponData, WeaponType};

use crate::SimulationSet;

pub struct ItemsPlugin;

impl Plugin for ItemsPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<ItemLifecycle>()
            .register_type::<WorldItem>()
            .add_event::<ItemOverlap>()
            .add_event::<PickupItemIntent>()
            .add_event::<DropWeaponIntent>()
            .add_event::<ItemStateChanged>()
            .add_event::<ItemImpulse>()
            .add_event::<ItemPickedUp>()
            .add_systems(
                FixedUpdate,
                (
                    systems::process_item_overlaps,
                    systems::process_pickup_intents,
                    systems::tick_item_interpolation,
                    systems::finish_item_interpolation,
                    systems::process_drop_weapon,
                    systems::land_thrown_weapons,
                    systems::keep_falling_weapons_upright,
                )
                    .chain()
                    .in_set(SimulationSet::Items),
            );
    }
}
