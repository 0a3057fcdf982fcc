//! Aim controller: turn-rate-limited ведение точки + dead reckoning
//!
//! Взгляд хранится как pitch/yaw в ГРАДУСАХ (конвенция presentation слоя):
//! pitch положительный = вниз, yaw вокруг Y, нулевые углы = +Z.
//!
//! Метрика ошибки прицеливания — |desired − rotated|, величина разности
//! единичных векторов, НЕ угол. Combat pacer сравнивает именно её с
//! квадратом допуска; менять метрику нельзя — все допуски оттюнены под неё.

use bevy::prelude::*;

use crate::components::LookAngle;

/// Единичный вектор взгляда из pitch/yaw (градусы)
pub fn look_direction(look: &LookAngle) -> Vec3 {
    let pitch = look.pitch.to_radians();
    let yaw = look.yaw.to_radians();
    Vec3::new(
        pitch.cos() * yaw.sin(),
        -pitch.sin(),
        pitch.cos() * yaw.cos(),
    )
}

/// Разложение единичного вектора обратно в pitch/yaw (градусы)
///
/// Pitch — через проекцию на горизонтальную плоскость (устойчиво у полюсов).
pub fn angles_from_direction(direction: Vec3) -> (f32, f32) {
    let horizontal = (direction.x * direction.x + direction.z * direction.z).sqrt();
    let pitch = -direction.y.atan2(horizontal).to_degrees();
    let yaw = direction.x.atan2(direction.z).to_degrees();
    (pitch, yaw)
}

/// Поворот `current` к `desired` не больше чем на `max_radians`
///
/// Если цель ближе лимита — точное выравнивание, без overshoot.
pub fn rotate_towards(current: Vec3, desired: Vec3, max_radians: f32) -> Vec3 {
    let angle = current.angle_between(desired);
    if !angle.is_finite() || angle <= max_radians {
        return desired;
    }
    let axis = current.cross(desired);
    let axis = if axis.length_squared() > 1e-12 {
        axis.normalize()
    } else {
        // Антипараллельные векторы: ось вращения произвольная
        current.any_orthogonal_vector().normalize()
    };
    (Quat::from_axis_angle(axis, max_radians) * current).normalize()
}

/// Шаг ведения: повернуть взгляд к точке, вернуть ошибку прицеливания
///
/// Нулевой вектор направления (агент и цель совпали) — направления нет,
/// поворот пропускается, ошибка 0.
pub fn steer_look(
    look: &mut LookAngle,
    from: Vec3,
    aim_point: Vec3,
    max_turn_speed_deg: f32,
    dt: f32,
) -> f32 {
    let offset = aim_point - from;
    if offset.length_squared() <= f32::EPSILON {
        return 0.0;
    }
    let desired = offset.normalize();
    let current = look_direction(look);
    let max_step = (max_turn_speed_deg * dt).to_radians();
    let rotated = rotate_towards(current, desired, max_step);

    let (pitch, yaw) = angles_from_direction(rotated);
    look.pitch = pitch;
    look.yaw = yaw;

    (desired - rotated).length()
}

/// Dead reckoning потерянной цели: last seen + скорость × время вне видимости
pub fn dead_reckon(last_seen: Vec3, last_seen_velocity: Vec3, guessing_time: f32) -> Vec3 {
    last_seen + last_seen_velocity * guessing_time
}
