//! Decision engine: одна авторитетная ветка решений на тик
//!
//! Порядок приоритетов (первая сработавшая ветка — единственная за тик):
//! 1. Мертвая/удаленная цель очищается (до всего, в том числе под xray)
//! 2. Xray активен → тикаем таймер, больше ничего
//! 3. Магазин пуст и не идем за патронами → курс на ближайший pickup
//! 4. Цели нет → selector; нашли — открываем engagement, нет — wander
//! 5. Цель есть → прицеливание/прогноз/pacing + параллельный wander
//!
//! Cross-agent чтения — через снимок `Contact` на начало тика: порядок
//! обработки агентов внутри кадра не влияет на их решения.

use bevy::prelude::*;
use rand::Rng;

use crate::ai::{
    aim, pacing, plan_wander, select_target, AgentState, AgentTuning, Contact, Engagement, Errand,
    WanderGoal, Xray,
};
use crate::combat::GunState;
use crate::components::{Agent, DebugLabel, Health, LookAngle, Velocity};
use crate::world::{agent_visible, AmmoPickup, MovementCommand, NavMesh, SightBlockers};
use crate::DeterministicRng;

/// System: полный проход решений по всем живым агентам
pub fn agent_decide(
    mut commands: Commands,
    time: Res<Time<Fixed>>,
    mut rng: ResMut<DeterministicRng>,
    sight: Res<SightBlockers>,
    navmesh: Res<NavMesh>,
    mut agents: Query<
        (
            Entity,
            &Transform,
            &Health,
            &AgentTuning,
            &mut AgentState,
            &mut GunState,
            &mut LookAngle,
            &mut WanderGoal,
            &mut MovementCommand,
            &mut DebugLabel,
            Option<&mut Xray>,
        ),
        With<Agent>,
    >,
    velocities: Query<&Velocity, With<Agent>>,
    pickups: Query<(&Transform, &AmmoPickup), Without<Agent>>,
) {
    let dt = time.delta_secs();
    if dt <= 0.0 {
        return;
    }
    let rng = &mut rng.rng;

    // Снимок всех агентов на начало тика
    let contacts: Vec<Contact> = agents
        .iter()
        .map(|(entity, transform, health, _, _, _, _, _, _, _, xray)| Contact {
            entity,
            position: transform.translation,
            velocity: velocities.get(entity).map(|v| v.linear).unwrap_or(Vec3::ZERO),
            alive: health.is_alive(),
            xraying: xray.is_some(),
        })
        .collect();

    for (
        entity,
        transform,
        health,
        tuning,
        mut state,
        mut gun,
        mut look,
        mut goal,
        mut command,
        mut label,
        xray,
    ) in agents.iter_mut()
    {
        if !health.is_alive() {
            continue; // Решения заморожены до respawn
        }
        let position = transform.translation;

        // Мертвая или удаленная из мира цель — сразу в Searching
        if let AgentState::Tracking(engagement) = &*state {
            let target = engagement.target;
            let target_gone = contacts
                .iter()
                .find(|c| c.entity == target)
                .map_or(true, |c| !c.alive);
            if target_gone {
                crate::logger::log(&format!(
                    "{:?} target {:?} is down, back to searching",
                    entity, target
                ));
                *state = AgentState::Searching;
            }
        }

        // Xray: тикаем и выходим — способность вытесняет всё остальное
        if let Some(mut xray) = xray {
            xray.time_remaining -= dt;
            if xray.time_remaining <= 0.0 {
                xray.time_remaining = 0.0;
                commands.entity(entity).remove::<Xray>();
                crate::logger::log(&format!("Xray expired for {:?}", entity));
            }
            continue;
        }

        // Сухой магазин: курс на ближайшую точку патронов
        if gun.is_empty() && !goal.is_fetching_ammo() {
            let mut closest = position;
            let mut best_distance_sq = f32::INFINITY;
            for (pickup_transform, pickup) in pickups.iter() {
                if !pickup.active {
                    continue;
                }
                let distance_sq = (pickup_transform.translation - position).length_squared();
                if distance_sq < best_distance_sq {
                    best_distance_sq = distance_sq;
                    closest = pickup_transform.translation;
                }
            }
            // Точек нет — "идем" в собственную позицию: цикл мгновенно
            // закроется и перейдет в обычный wander
            goal.point = Some(closest);
            goal.errand = Errand::FetchAmmo;
            *command = MovementCommand::MoveToPosition { target: closest };
            label.set("AI: fetching ammo");
            crate::logger::log(&format!(
                "📦 {:?} clip dry, heading to ammo at {:?}",
                entity, closest
            ));
            continue;
        }

        let mut lost_target = false;
        match &mut *state {
            AgentState::Searching => {
                label.set("AI: searching for target");
                let forward = *transform.forward();
                if let Some(target) =
                    select_target(&sight, entity, position, forward, &contacts, tuning)
                {
                    // Контакт есть по построению: selector выбирает из снимка
                    let (target_position, target_velocity) = contacts
                        .iter()
                        .find(|c| c.entity == target)
                        .map(|c| (c.position, c.velocity))
                        .unwrap_or((position, Vec3::ZERO));
                    let idle_timer =
                        rng.gen_range(tuning.min_target_time..=tuning.max_target_time);
                    let fire_delay =
                        rng.gen_range(tuning.min_fire_delay..=tuning.max_fire_delay);
                    *state = AgentState::Tracking(Engagement::open(
                        target,
                        target_position,
                        target_velocity,
                        idle_timer,
                        fire_delay,
                    ));
                    goal.clear(); // Текущий wander-цикл обрывается
                    label.set("AI: target acquired");
                    crate::logger::log(&format!("⚔️ {:?} acquired target {:?}", entity, target));
                } else if let Some(xray) = plan_wander(
                    rng, &navmesh, tuning, position, None, &mut goal, &mut command, &mut label,
                ) {
                    crate::logger::log(&format!(
                        "👁️ {:?} xray on for {:.1}s",
                        entity, xray.time_remaining
                    ));
                    commands.entity(entity).insert(xray);
                }
            }

            AgentState::Tracking(engagement) => {
                label.set("AI: tracking target");
                if let Some(target) = contacts
                    .iter()
                    .find(|c| c.entity == engagement.target)
                    .copied()
                {
                    pacing::prepare_weapon(engagement, &mut gun, tuning, rng);

                    // Прямой контакт или dead reckoning
                    let visible =
                        agent_visible(&sight, position, false, target.position, target.xraying);
                    let aim_point = if visible {
                        engagement.guessing_time = 0.0;
                        engagement.last_seen = target.position;
                        engagement.last_seen_velocity = target.velocity;
                        target.position
                    } else {
                        engagement.guessing_time += dt;
                        if engagement.guessing_time > tuning.max_guess_time {
                            // Потеряли: последний тик целимся в устаревший прогноз
                            lost_target = true;
                            label.set("AI: lost sight of target");
                            crate::logger::log(&format!(
                                "👻 {:?} lost sight of {:?}",
                                entity, engagement.target
                            ));
                        }
                        aim::dead_reckon(
                            engagement.last_seen,
                            engagement.last_seen_velocity,
                            engagement.guessing_time,
                        )
                    };

                    let aim_error =
                        aim::steer_look(&mut look, position, aim_point, tuning.max_turn_speed, dt);
                    pacing::pace_trigger(engagement, &mut gun, tuning, rng, aim_error, dt);

                    // Движение не останавливается: wander идет параллельно
                    let anchor = if lost_target { None } else { Some(target.position) };
                    if let Some(xray) = plan_wander(
                        rng, &navmesh, tuning, position, anchor, &mut goal, &mut command,
                        &mut label,
                    ) {
                        crate::logger::log(&format!(
                            "👁️ {:?} xray on for {:.1}s",
                            entity, xray.time_remaining
                        ));
                        commands.entity(entity).insert(xray);
                    }
                } else {
                    lost_target = true;
                }
            }

            AgentState::Dead => {}
        }

        if lost_target {
            *state = AgentState::Searching;
        }
    }
}
