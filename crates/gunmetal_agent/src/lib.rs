//! GUNMETAL Agent Core
//!
//! Decision-and-control ядро NPC-комбатанта для realtime shooter'а:
//! ECS-симуляция на Bevy 0.16, один полный проход решений на агента за
//! fixed tick. Ядро решает ЧТО делать (куда идти, куда смотреть, жать ли
//! trigger) — исполняют хостовые слои через seam-интерфейсы:
//!
//! - геометрия уровня → `world::LineOfSight` oracle
//! - pathfinding/локомоушен → `world::NavSampler` + `MovementCommand`
//! - weapon исполнение/урон → `GunState.trigger_held` + `DamageDealt`
//! - presentation → `LookAngle`, `DebugLabel`
//!
//! Headless реализации seam'ов включены: библиотека прогоняется и
//! тестируется без движка, детерминированно по seed.

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::Duration;

// Публичные модули
pub mod ai;
pub mod combat;
pub mod components;
pub mod logger;
pub mod world;

// Re-export базовых типов для удобства
pub use ai::{
    AgentAiPlugin, AgentConfig, AgentState, AgentTuning, ConfigError, Engagement, Errand,
    WanderGoal, Xray,
};
pub use combat::{
    AgentDied, CombatPlugin, DamageDealt, Dead, GunState, RespawnAgent,
};
pub use components::*;
pub use logger::{init_logger, set_log_level, set_logger, LogLevel, LogPrinter};
pub use world::{
    AmmoPickup, FlatNavMesh, MovementCommand, MovementSpeed, NavMesh, NavSampler,
    NavigationState, SightBlockers, WorldPlugin,
};

/// Фазы симуляционного тика — порядок фиксирован для детерминизма
///
/// Решения → мир (движение, pickups) → combat (урон, смерть, respawn).
/// Урон, нанесенный в тике N, агенты видят в тике N+1.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimSet {
    Decide,
    World,
    Combat,
}

/// Главный plugin симуляции (объединяет все подсистемы)
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app
            // Fixed timestep 60Hz для simulation tick
            .insert_resource(Time::<Fixed>::from_hz(60.0))
            // Детерминированный RNG, если хост не вставил свой seed
            .init_resource::<DeterministicRng>();

        app.configure_sets(
            FixedUpdate,
            (SimSet::Decide, SimSet::World, SimSet::Combat).chain(),
        );

        app.add_plugins((AgentAiPlugin, WorldPlugin, CombatPlugin));
    }
}

/// Детерминированный RNG resource (seeded)
///
/// Все случайные draw'ы симуляции идут отсюда: один seed — один прогон.
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

impl Default for DeterministicRng {
    fn default() -> Self {
        Self::new(42)
    }
}

/// Создаёт minimal Bevy App для headless симуляции
///
/// Время продвигается вручную ровно на 1/60с за `app.update()` — каждый
/// update исполняет ровно один FixedUpdate тик, прогоны воспроизводимы.
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    logger::init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(
            1.0 / 60.0,
        )))
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(Time::<Fixed>::from_hz(60.0));

    app
}

/// Snapshot компонентов мира для сравнения детерминизма
///
/// Сортировка по Entity ID, сериализация через Debug — достаточно для
/// побайтового сравнения прогонов.
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();
    entities.sort_by_key(|(entity, _)| entity.index());

    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
