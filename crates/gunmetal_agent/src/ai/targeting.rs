//! Target selector: скоринг видимых кандидатов
//!
//! Score = dist × −distance_weighting + angle_weighting × (1 − cos θ),
//! выигрывает МИНИМУМ. Заметьте: при положительном distance_weighting
//! дальняя цель при равном угле выигрывает у ближней — так оттюнено
//! поведение, формулу не "исправлять".

use bevy::prelude::*;

use crate::ai::AgentTuning;
use crate::world::{agent_visible, SightBlockers};

/// Снимок другого агента на начало тика
///
/// Все cross-agent чтения идут через этот снимок: внутри кадра агенты видят
/// друг друга в состоянии на начало тика, порядок обработки не влияет на
/// выбор цели.
#[derive(Debug, Clone, Copy)]
pub struct Contact {
    pub entity: Entity,
    pub position: Vec3,
    pub velocity: Vec3,
    pub alive: bool,
    pub xraying: bool,
}

/// Выбор цели: минимальный score среди живых видимых кандидатов
///
/// Пустой набор кандидатов — `None`, вызывающий уходит в wander. При равных
/// score выигрывает более ранний кандидат (строгое `<`).
pub fn select_target(
    sight: &SightBlockers,
    self_entity: Entity,
    self_position: Vec3,
    self_forward: Vec3,
    contacts: &[Contact],
    tuning: &AgentTuning,
) -> Option<Entity> {
    let mut best: Option<(Entity, f32)> = None;
    for contact in contacts {
        if contact.entity == self_entity || !contact.alive {
            continue;
        }
        // Свой xray здесь всегда погашен: ветка xray выходит из тика раньше
        if !agent_visible(sight, self_position, false, contact.position, contact.xraying) {
            continue;
        }
        let offset = contact.position - self_position;
        let distance = offset.length();
        let cos_angle = if distance > f32::EPSILON {
            self_forward.dot(offset) / distance
        } else {
            1.0 // Совпали позициями — считаем "прямо по курсу"
        };
        let score =
            distance * -tuning.distance_weighting + tuning.angle_weighting * (1.0 - cos_angle);
        match best {
            Some((_, lowest)) if score >= lowest => {}
            _ => best = Some((contact.entity, score)),
        }
    }
    best.map(|(entity, _)| entity)
}
