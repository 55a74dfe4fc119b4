//! Animation driver module
//!
//! ECS ответственность:
//! - Locomotion blend параметры (speed, movement offset, aim pitch)
//! - Turn in place (root yaw offset) + recoil weight
//! - Lean (сглаженный yaw rate)
//!
//! Host ответственность:
//! - Blend tree / state machine (читает `MovementBlendState`)
//! - Проигрывание клипов и запись curve samples (`AnimationCurves`)
//! - Montage playback по `MontageRequest` событиям

use bevy::prelude::*;

pub mod blend_state;
pub mod curves;
pub mod lean;
pub mod turn_in_place;

pub use blend_state::{
    recoil_weight, AnimationInput, MovementBlendState, OffsetState, RecoilContext,
};
pub use curves::{AnimationCurves, ROTATION_CURVE, TURNING_CURVE};
pub use lean::Lean;
pub use turn_in_place::{TurnInPlace, TurnInPlaceInput};

use crate::components::{CharacterCombat, CharacterKinematics, Inventory};
use crate::config::SimulationConfig;
use crate::items::WorldItem;
use crate::SimulationSet;

/// Montage, который host должен проиграть
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MontageKind {
    HitReact,
    Death,
    Attack,
}

/// Event: ECS → host, проиграть секцию montage
#[derive(Event, Debug, Clone, PartialEq)]
pub struct MontageRequest {
    pub entity: Entity,
    pub montage: MontageKind,
    pub section: &'static str,
    pub play_rate: f32,
}

impl MontageRequest {
    pub fn new(entity: Entity, montage: MontageKind, section: &'static str) -> Self {
        Self {
            entity,
            montage,
            section,
            play_rate: 1.0,
        }
    }
}

/// Event: host → ECS, anim notify из montage
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MontageNotify {
    /// Hit-react клип доигран (конец stun)
    HitReactEnded { entity: Entity },
    /// Death клип доигран (можно удалять entity)
    DeathFinished { entity: Entity },
}

pub struct AnimationPlugin;

impl Plugin for AnimationPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<MontageRequest>()
            .add_event::<MontageNotify>()
            .add_systems(
                FixedUpdate,
                update_animation_properties.in_set(SimulationSet::Animation),
            );
    }
}

/// System: обновление blend параметров всех персонажей
///
/// Персонаж без kinematics/combat (owner ещё не привязан) → blend state не трогаем.
pub fn update_animation_properties(
    time: Res<Time>,
    config: Res<SimulationConfig>,
    mut characters: Query<(
        &mut MovementBlendState,
        Option<&CharacterKinematics>,
        Option<&CharacterCombat>,
        Option<&AnimationCurves>,
        Option<&Inventory>,
    )>,
    items: Query<&WorldItem>,
) {
    let delta = time.delta_secs();

    for (mut blend, kinematics, combat, curves, inventory) in characters.iter_mut() {
        let input = match (kinematics, combat) {
            (Some(kinematics), Some(combat)) => {
                let equipped_weapon_type = inventory
                    .and_then(|inventory| inventory.equipped_weapon)
                    .and_then(|weapon| items.get(weapon).ok())
                    .and_then(|item| item.weapon_data())
                    .map(|weapon| weapon.weapon_type);

                Some(AnimationInput {
                    velocity: kinematics.velocity,
                    acceleration: kinematics.acceleration,
                    is_falling: kinematics.is_falling,
                    actor_yaw: kinematics.actor_yaw,
                    aim_yaw: kinematics.aim_yaw,
                    aim_pitch: kinematics.aim_pitch,
                    combat_state: combat.state,
                    aiming: combat.aiming,
                    crouching: combat.crouching,
                    turning_curve: curves.map_or(0.0, |c| c.value(TURNING_CURVE)),
                    rotation_curve: curves.map_or(0.0, |c| c.value(ROTATION_CURVE)),
                    equipped_weapon_type,
                })
            }
            _ => None,
        };

        blend.update(input.as_ref(), delta, &config.locomotion);
    }
}
