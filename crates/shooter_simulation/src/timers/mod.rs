//! Timer module — frame-clock таймеры симуляции
//!
//! `advance_timers` запускается ПЕРВЫМ в FixedUpdate: продвигает
//! `TimerScheduler` на delta тика и публикует `TimerFired` события.
//! Gameplay системы (enemy, items) читают `TimerFired` в том же тике.

use bevy::prelude::*;

pub mod scheduler;

pub use scheduler::{TimerKey, TimerKind, TimerScheduler};

/// Event: таймер истёк
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerFired {
    pub key: TimerKey,
}

/// System set: продвижение таймеров (до gameplay систем)
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct TimerSet;

pub struct TimerPlugin;

impl Plugin for TimerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<TimerScheduler>()
            .add_event::<TimerFired>()
            .add_systems(FixedUpdate, advance_timers.in_set(TimerSet));
    }
}

/// System: продвинуть scheduler и разослать сработавшие таймеры
pub fn advance_timers(
    time: Res<Time>,
    mut scheduler: ResMut<TimerScheduler>,
    mut fired_events: EventWriter<TimerFired>,
) {
    for key in scheduler.advance(time.delta_secs()) {
        fired_events.write(TimerFired { key });
    }
}
