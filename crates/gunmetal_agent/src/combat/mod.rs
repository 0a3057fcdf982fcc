//! Combat module: gun state + damage pipeline
//!
//! ECS ответственность:
//! - Game state: Health, GunState, фраги
//! - Events: DamageDealt → AgentDied, RespawnAgent → re-init
//!
//! Хост ответственность:
//! - Исполнение выстрела: расход clip по fire_rate, reload, hitscan/
//!   projectile, расчет урона (сюда приходит готовый DamageDealt)

use bevy::prelude::*;

pub mod damage;
pub mod gun;

// Re-export основных типов
pub use damage::{
    apply_damage, handle_agent_death, respawn_agents, AgentDied, DamageDealt, Dead, RespawnAgent,
};
pub use gun::GunState;

use crate::SimSet;

/// Combat Plugin
///
/// Порядок выполнения (после решений и движения, см. `SimSet`):
/// 1. apply_damage — DamageDealt → health, фраги
/// 2. handle_agent_death — заморозка решений у мертвых
/// 3. respawn_agents — re-init по команде хоста
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<DamageDealt>()
            .add_event::<AgentDied>()
            .add_event::<RespawnAgent>();

        app.add_systems(
            FixedUpdate,
            (apply_damage, handle_agent_death, respawn_agents)
                .chain()
                .in_set(SimSet::Combat),
        );
    }
}
