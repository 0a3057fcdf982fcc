//! Damage application, смерть и respawn агентов
//!
//! Урон считает хостовая weapon система (hitscan/projectile — её
//! ответственность), сюда приходит готовый `DamageDealt`. Здесь:
//! health, фраги, заморозка решений у мертвых, полный re-init на respawn.

use bevy::prelude::*;

use crate::ai::{AgentState, Errand, WanderGoal, Xray};
use crate::combat::GunState;
use crate::components::{DebugLabel, Health, LookAngle, Scorecard, Velocity};
use crate::world::MovementCommand;

/// Event: урон нанесен (от хостовой weapon системы)
#[derive(Event, Debug, Clone)]
pub struct DamageDealt {
    pub attacker: Entity,
    pub target: Entity,
    pub damage: u32,
}

/// Event: агент умер (health достиг 0)
#[derive(Event, Debug, Clone)]
pub struct AgentDied {
    pub agent: Entity,
    pub killer: Entity,
}

/// Event: хост командует respawn (точку выбирает он)
#[derive(Event, Debug, Clone)]
pub struct RespawnAgent {
    pub agent: Entity,
    pub position: Vec3,
}

/// Компонент-маркер: агент мертв (Health == 0)
///
/// Труп остается на месте, деспавн — дело хоста.
#[derive(Component, Debug, Default, Reflect)]
#[reflect(Component)]
pub struct Dead;

/// System: применение урона → health, фраги, AgentDied
pub fn apply_damage(
    mut damage_events: EventReader<DamageDealt>,
    mut targets: Query<&mut Health>,
    mut scores: Query<&mut Scorecard>,
    mut died_events: EventWriter<AgentDied>,
) {
    for hit in damage_events.read() {
        // Self-hit не бывает у hitscan, но projectile может вернуться
        if hit.attacker == hit.target {
            continue;
        }
        let Ok(mut health) = targets.get_mut(hit.target) else {
            continue;
        };
        if !health.is_alive() {
            continue; // Труп не добиваем
        }
        health.take_damage(hit.damage);
        if !health.is_alive() {
            if let Ok(mut score) = scores.get_mut(hit.target) {
                score.deaths += 1;
            }
            if let Ok(mut score) = scores.get_mut(hit.attacker) {
                score.kills += 1;
            }
            died_events.write(AgentDied {
                agent: hit.target,
                killer: hit.attacker,
            });
            crate::logger::log(&format!(
                "💀 {:?} killed by {:?}",
                hit.target, hit.attacker
            ));
        }
    }
}

/// System: смерть → заморозка решений
///
/// Отпускаем trigger, стопим навигацию, Dead state + маркер. Xray гаснет —
/// труп не подсвечивается.
pub fn handle_agent_death(
    mut commands: Commands,
    mut agents: Query<
        (
            Entity,
            &Health,
            &mut AgentState,
            &mut GunState,
            &mut MovementCommand,
            &mut DebugLabel,
        ),
        Changed<Health>,
    >,
) {
    for (entity, health, mut state, mut gun, mut command, mut label) in agents.iter_mut() {
        if health.is_alive() || matches!(*state, AgentState::Dead) {
            continue;
        }
        *state = AgentState::Dead;
        gun.trigger_held = false;
        *command = MovementCommand::Stop;
        label.set("KIA");
        commands.entity(entity).insert(Dead).remove::<Xray>();
        crate::logger::log(&format!("Agent {:?} died → decisions frozen", entity));
    }
}

/// System: respawn — полный re-init, идентичный первому спавну
///
/// Фраги переживают respawn, все остальное обнуляется.
pub fn respawn_agents(
    mut commands: Commands,
    mut respawn_events: EventReader<RespawnAgent>,
    mut agents: Query<(
        &mut Health,
        &mut AgentState,
        &mut WanderGoal,
        &mut GunState,
        &mut LookAngle,
        &mut Transform,
        &mut Velocity,
        &mut MovementCommand,
        &mut DebugLabel,
    )>,
) {
    for respawn in respawn_events.read() {
        let Ok((
            mut health,
            mut state,
            mut goal,
            mut gun,
            mut look,
            mut transform,
            mut velocity,
            mut command,
            mut label,
        )) = agents.get_mut(respawn.agent)
        else {
            continue;
        };
        *health = Health::new(100);
        *state = AgentState::Searching;
        goal.point = None;
        goal.errand = Errand::Roam;
        gun.refill();
        gun.trigger_held = false;
        *look = LookAngle::default();
        transform.translation = respawn.position;
        velocity.linear = Vec3::ZERO;
        *command = MovementCommand::Idle;
        label.set("AI: respawned");
        commands.entity(respawn.agent).remove::<Dead>().remove::<Xray>();
        crate::logger::log(&format!(
            "Agent {:?} respawned at {:?}",
            respawn.agent, respawn.position
        ));
    }
}
