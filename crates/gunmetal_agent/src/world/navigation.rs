//! Navigation seam: navmesh sampling + movement intent + headless driver
//!
//! Архитектура:
//! - AI пишет `MovementCommand` (high-level intent), навигация исполняет
//! - Pathfinding — дело хоста; симуляция спрашивает только
//!   `sample_position` (ближайшая навигируемая точка)
//! - `drive_navigation` — kinematic driver для headless прогонов: прямая
//!   интеграция к цели + публикация `Velocity`. Хост с настоящим
//!   локомоушеном заменяет его своим мостом и пишет те же компоненты.

use bevy::prelude::*;

use crate::components::Velocity;

/// Oracle: снап точки на навигируемую поверхность
///
/// `None` = в радиусе нет навигируемой точки (sampling failure).
pub trait NavSampler: Send + Sync {
    fn sample_position(&self, point: Vec3, max_radius: f32) -> Option<Vec3>;
}

/// Resource-обертка над navmesh хоста
#[derive(Resource)]
pub struct NavMesh(pub Box<dyn NavSampler>);

impl Default for NavMesh {
    fn default() -> Self {
        Self(Box::new(FlatNavMesh::unbounded()))
    }
}

impl NavMesh {
    pub fn sample_position(&self, point: Vec3, max_radius: f32) -> Option<Vec3> {
        self.0.sample_position(point, max_radius)
    }
}

/// Плоская арена: проекция на y=0, опциональный clamp в границы
pub struct FlatNavMesh {
    pub half_extent: Option<Vec2>,
}

impl FlatNavMesh {
    pub fn unbounded() -> Self {
        Self { half_extent: None }
    }

    pub fn sized(size_x: f32, size_z: f32) -> Self {
        Self {
            half_extent: Some(Vec2::new(size_x / 2.0, size_z / 2.0)),
        }
    }
}

impl NavSampler for FlatNavMesh {
    fn sample_position(&self, point: Vec3, _max_radius: f32) -> Option<Vec3> {
        let mut grounded = Vec3::new(point.x, 0.0, point.z);
        if let Some(half) = self.half_extent {
            grounded.x = grounded.x.clamp(-half.x, half.x);
            grounded.z = grounded.z.clamp(-half.y, half.y);
        }
        Some(grounded)
    }
}

/// Navmesh без поверхности — для тестов политики sampling failure
pub struct VoidNavMesh;

impl NavSampler for VoidNavMesh {
    fn sample_position(&self, _point: Vec3, _max_radius: f32) -> Option<Vec3> {
        None
    }
}

/// Команда движения для агента
#[derive(Component, Debug, Clone, PartialEq, Default, Reflect)]
#[reflect(Component)]
pub enum MovementCommand {
    /// Нет инструкции
    #[default]
    Idle,
    /// Двигаться к позиции (world coordinates)
    MoveToPosition { target: Vec3 },
    /// Остановиться немедленно (смерть, заморозка)
    Stop,
}

/// Скорость передвижения агента (м/с)
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct MovementSpeed {
    pub speed: f32,
}

impl Default for MovementSpeed {
    fn default() -> Self {
        Self { speed: 4.0 } // Бег трусцой комбатанта
    }
}

/// Состояние навигации — трекает ПЕРЕХОД unreached → reached
///
/// Без флага лог прибытия спамил бы каждый тик стояния на цели.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct NavigationState {
    pub is_target_reached: bool,
}

/// System: headless kinematic driver
///
/// Шаг к цели без overshoot, `Velocity` — фактическая скорость этого тика.
pub fn drive_navigation(
    time: Res<Time<Fixed>>,
    mut movers: Query<(
        Entity,
        &mut Transform,
        &MovementSpeed,
        &MovementCommand,
        &mut Velocity,
        &mut NavigationState,
    )>,
) {
    let dt = time.delta_secs();
    if dt <= 0.0 {
        return;
    }
    for (entity, mut transform, speed, command, mut velocity, mut nav) in movers.iter_mut() {
        match command {
            MovementCommand::MoveToPosition { target } => {
                let offset = *target - transform.translation;
                let distance = offset.length();
                let step = speed.speed * dt;
                if distance <= step {
                    transform.translation = *target;
                    velocity.linear = offset / dt;
                    if !nav.is_target_reached {
                        nav.is_target_reached = true;
                        crate::logger::log(&format!(
                            "Nav: {:?} reached {:?}",
                            entity, target
                        ));
                    }
                } else {
                    let direction = offset / distance;
                    transform.translation += direction * step;
                    velocity.linear = direction * speed.speed;
                    nav.is_target_reached = false;
                }
            }
            MovementCommand::Idle | MovementCommand::Stop => {
                velocity.linear = Vec3::ZERO;
            }
        }
    }
}
