//! Shooter Simulation Core
//!
//! ECS-симуляция на Bevy 0.16 (gameplay layer третьего лица shooter)
//!
//! HYBRID ARCHITECTURE:
//! - ECS = gameplay rules (animation blend параметры, items, combat, AI context)
//! - Host engine = physics, rendering, montage playback, behaviour tree
//!
//! Host шлёт события (overlaps, hits, intents, anim notifies) и читает
//! компоненты + output события. Один тик = один прогон `FixedUpdate`.

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::Duration;

// Публичные модули
pub mod ai;
pub mod animation;
pub mod combat;
pub mod components;
pub mod config;
pub mod items;
pub mod logger;
pub mod shared;
pub mod timers;

// Re-export базовых типов для удобства
pub use ai::{EnemyAiContext, EnemyAiPlugin, PatrolRoute};
pub use animation::{AnimationPlugin, MontageKind, MontageNotify, MontageRequest, MovementBlendState};
pub use combat::{BulletHit, BulletHittable, CombatPlugin, DamageDealt, DamageIntent, Enemy, EnemyCombat, EntityDied};
pub use components::*;
pub use config::{ConfigError, SimulationConfig};
pub use items::{ItemLifecycle, ItemState, ItemsPlugin, WorldItem};
pub use logger::{
    init_logger, log, log_error, log_info, log_level, log_warning, log_with_level, set_log_level,
    set_logger, set_logger_if_needed, LogLevel, LogPrinter,
};
pub use timers::{TimerPlugin, TimerScheduler, TimerSet};

/// Частота simulation tick
pub const TICK_HZ: f64 = 60.0;

/// Фазы simulation тика (FixedUpdate)
///
/// Порядок фиксирован: `TimerSet` → Ai → Items → Combat → Animation.
/// Внутри фазы системы плагина идут `.chain()`, так что ни одна пара систем
/// с общими данными (RNG, `EnemyAiContext`, inventory) не выполняется в
/// неопределённом порядке.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    /// Sensor overlaps, patrol точки
    Ai,
    /// Pickup, полёт, inventory, бросок
    Items,
    /// Пули, удары, урон, смерть (урон перезаписывает agro target)
    Combat,
    /// Blend параметры читают итоговый inventory/combat state тика
    Animation,
}

/// Главный plugin симуляции (объединяет все подсистемы)
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        // Seed из create_headless_app не перетираем
        if !app.world().contains_resource::<DeterministicRng>() {
            app.insert_resource(DeterministicRng::new(42));
        }

        app
            // Fixed timestep 60Hz для simulation tick
            .insert_resource(Time::<Fixed>::from_hz(TICK_HZ))
            .init_resource::<SimulationConfig>()
            .configure_sets(
                FixedUpdate,
                (
                    TimerSet,
                    SimulationSet::Ai,
                    SimulationSet::Items,
                    SimulationSet::Combat,
                    SimulationSet::Animation,
                )
                    .chain(),
            )
            .add_plugins(TimerPlugin)
            .add_plugins((AnimationPlugin, ItemsPlugin, CombatPlugin, EnemyAiPlugin));
    }
}

/// Единственный источник случайности симуляции (ChaCha8, фиксированный seed)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// App без рендера: `MinimalPlugins` + seeded RNG + fixed 60Hz clock
///
/// `SimulationPlugin` добавляет вызывающий (тесты иногда подменяют config до него).
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(Time::<Fixed>::from_hz(TICK_HZ));

    app
}

/// Прогнать `ticks` simulation тиков с фиксированным delta
///
/// Не зависит от wall clock: `Time` продвигается вручную на 1/60 сек,
/// затем выполняется `FixedUpdate`.
pub fn run_fixed_ticks(app: &mut App, ticks: u32) {
    let step = Duration::from_secs_f64(1.0 / TICK_HZ);
    for _ in 0..ticks {
        app.world_mut().resource_mut::<Time>().advance_by(step);
        app.world_mut().run_schedule(FixedUpdate);
    }
}

/// Байтовый snapshot всех компонентов `T` (сравнение прогонов с одним seed)
///
/// Entity упорядочены по index, компонент пишется своим `Debug` представлением.
pub fn world_snapshot<T>(world: &mut World) -> Vec<u8>
where
    T: Component + std::fmt::Debug,
{
    let mut query = world.query::<(Entity, &T)>();
    let mut rows: Vec<_> = query.iter(world).collect();
    rows.sort_by_key(|(entity, _)| entity.index());

    let mut snapshot = Vec::new();
    for (entity, component) in rows {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
