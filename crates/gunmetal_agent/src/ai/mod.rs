//! AI decision-making module
//!
//! Реактивный цикл без памяти дальше одной цели: каждый тик дерево решений
//! пересобирается заново из текущего состояния мира.
//!
//! Состав:
//! - decision — дерево приоритетов (одна ветка за тик)
//! - targeting — скоринг видимых кандидатов
//! - wander — патрульные точки + вероятностный xray
//! - aim — turn-rate-limited ведение + dead reckoning
//! - pacing — таймеры выстрела, гейт точности, trigger intent
//! - config/state — tunables архетипа и явный tagged state

use bevy::prelude::*;

pub mod aim;
pub mod config;
pub mod decision;
pub mod pacing;
pub mod state;
pub mod targeting;
pub mod wander;

// Re-export основных типов
pub use config::{AgentConfig, AgentTuning, ConfigError};
pub use decision::agent_decide;
pub use state::{AgentState, Engagement, Errand, WanderGoal, Xray};
pub use targeting::{select_target, Contact};
pub use wander::{plan_wander, wander_cycle_due};

use crate::SimSet;

/// AI Plugin
///
/// Решения идут первыми в тике (`SimSet::Decide`), мир и combat — после:
/// движение исполняет уже принятые команды, урон этого тика агенты увидят
/// на следующем.
pub struct AgentAiPlugin;

impl Plugin for AgentAiPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(FixedUpdate, agent_decide.in_set(SimSet::Decide));
    }
}
