//! Wander planner: патрульные точки + вероятностный xray
//!
//! Цикл стартует заново когда цикла нет или цель цикла достигнута
//! (квадрат дистанции < goal_distance_fudge). На старте цикла:
//! - с шансом xray_chance включается xray (длительность — draw из диапазона)
//! - завершённый поход за патронами закрывается (errand → Roam)
//! - всегда строится новая точка: случайное смещение в диске wander_range,
//!   обёрнутое в границы карты, от себя или от цели (bias), снап на navmesh

use bevy::prelude::*;
use rand::Rng;

use crate::ai::{AgentTuning, Errand, WanderGoal, Xray};
use crate::components::DebugLabel;
use crate::world::{MovementCommand, NavMesh};

/// Пора ли стартовать новый wander-цикл
pub fn wander_cycle_due(position: Vec3, goal: &WanderGoal, goal_distance_fudge: f32) -> bool {
    match goal.point {
        None => true,
        Some(point) => (position - point).length_squared() < goal_distance_fudge,
    }
}

/// Обернуть смещение в пролёт карты (один полный span, не модульная арифметика)
fn wrap_span(value: f32, span: f32) -> f32 {
    let half = span / 2.0;
    if value < -half {
        value + span
    } else if value > half {
        value - span
    } else {
        value
    }
}

/// Старт wander-цикла (если пора): новая точка + возможный xray
///
/// Возвращает `Xray` если триггернулся — вызывающий вставляет компонент.
/// Sampling failure (navmesh вернул None) оставляет прежнюю цель: агент
/// замирает до следующего тика, не падаем.
pub fn plan_wander(
    rng: &mut impl Rng,
    navmesh: &NavMesh,
    tuning: &AgentTuning,
    position: Vec3,
    target_position: Option<Vec3>,
    goal: &mut WanderGoal,
    command: &mut MovementCommand,
    label: &mut DebugLabel,
) -> Option<Xray> {
    if !wander_cycle_due(position, goal, tuning.goal_distance_fudge) {
        return None;
    }

    let mut xray = None;
    if rng.gen_range(0.0..100.0) < tuning.xray_chance {
        label.set("AI: xraying");
        xray = Some(Xray {
            time_remaining: rng.gen_range(tuning.min_xray_time..=tuning.max_xray_time),
        });
    } else {
        label.set("AI: wandering");
    }

    // Случайное смещение внутри диска wander_range (равномерно по площади)
    let theta = rng.gen::<f32>() * std::f32::consts::TAU;
    let radius = tuning.wander_range * rng.gen::<f32>().sqrt();
    let offset = Vec3::new(
        wrap_span(theta.cos() * radius, tuning.map_size_x),
        0.0,
        wrap_span(theta.sin() * radius, tuning.map_size_z),
    );

    // Якорь: своя позиция, либо цель — при свежем xray или под move_closer_chance
    let anchor = match target_position {
        Some(target)
            if xray.is_some() || rng.gen_range(0.0..100.0) < tuning.move_closer_chance =>
        {
            target
        }
        _ => position,
    };

    match navmesh.sample_position(anchor + offset, tuning.wander_range) {
        Some(point) => {
            goal.point = Some(point);
            goal.errand = Errand::Roam; // Поход за патронами закрыт
            *command = MovementCommand::MoveToPosition { target: point };
        }
        None => {
            crate::logger::log_warning(&format!(
                "Wander: no navigable point near {:?}, keeping previous goal",
                anchor + offset
            ));
        }
    }

    xray
}
