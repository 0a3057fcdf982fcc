//! Perception seam: line-of-sight oracle + xray override
//!
//! Архитектура:
//! - Геометрия уровня живет у хоста (raycast по level geometry) — симуляция
//!   видит её только через трейт `LineOfSight`
//! - Xray правило применяется здесь, не в oracle: xray-агент видит всех и
//!   виден всем, геометрия не спрашивается

use bevy::prelude::*;

/// Oracle: перекрыт ли отрезок взгляда геометрией уровня
pub trait LineOfSight: Send + Sync {
    fn blocked(&self, from: Vec3, to: Vec3) -> bool;
}

/// Resource-обертка над oracle хоста
#[derive(Resource)]
pub struct SightBlockers(pub Box<dyn LineOfSight>);

impl Default for SightBlockers {
    fn default() -> Self {
        Self(Box::new(OpenArena))
    }
}

impl SightBlockers {
    pub fn clear(&self, from: Vec3, to: Vec3) -> bool {
        !self.0.blocked(from, to)
    }
}

/// Видимость агент→агент с учетом xray
///
/// Xray с любой стороны дает взаимную видимость: подсвеченный виден всем,
/// подсвечивающий видит сквозь стены.
pub fn agent_visible(
    sight: &SightBlockers,
    from: Vec3,
    from_xraying: bool,
    to: Vec3,
    to_xraying: bool,
) -> bool {
    if from_xraying || to_xraying {
        return true;
    }
    sight.clear(from, to)
}

/// Пустая арена — ничего не перекрывает (headless по умолчанию)
pub struct OpenArena;

impl LineOfSight for OpenArena {
    fn blocked(&self, _from: Vec3, _to: Vec3) -> bool {
        false
    }
}

/// Стены как XZ-отрезки — для тестов и простых карт
///
/// Взгляд перекрыт если его XZ-проекция пересекает любой отрезок.
pub struct WallGrid {
    pub walls: Vec<(Vec2, Vec2)>,
}

impl LineOfSight for WallGrid {
    fn blocked(&self, from: Vec3, to: Vec3) -> bool {
        let a = Vec2::new(from.x, from.z);
        let b = Vec2::new(to.x, to.z);
        self.walls
            .iter()
            .any(|&(c, d)| segments_intersect(a, b, c, d))
    }
}

/// Пересечение отрезков в 2D (парметрическая форма)
fn segments_intersect(p1: Vec2, p2: Vec2, p3: Vec2, p4: Vec2) -> bool {
    let den = (p1.x - p2.x) * (p3.y - p4.y) - (p1.y - p2.y) * (p3.x - p4.x);
    if den.abs() < 0.0001 {
        return false; // Параллельны
    }
    let t = ((p1.x - p3.x) * (p3.y - p4.y) - (p1.y - p3.y) * (p3.x - p4.x)) / den;
    let u = -((p1.x - p2.x) * (p1.y - p3.y) - (p1.y - p2.y) * (p1.x - p3.x)) / den;
    (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_arena_always_clear() {
        let sight = SightBlockers::default();
        assert!(sight.clear(Vec3::ZERO, Vec3::new(100.0, 0.0, 100.0)));
    }

    #[test]
    fn test_wall_blocks_crossing_sight() {
        let sight = SightBlockers(Box::new(WallGrid {
            walls: vec![(Vec2::new(5.0, -10.0), Vec2::new(5.0, 10.0))],
        }));
        // Взгляд через стену
        assert!(!sight.clear(Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0)));
        // Взгляд вдоль своей стороны стены
        assert!(sight.clear(Vec3::ZERO, Vec3::new(0.0, 0.0, 8.0)));
    }

    #[test]
    fn test_xray_overrides_walls() {
        let sight = SightBlockers(Box::new(WallGrid {
            walls: vec![(Vec2::new(5.0, -10.0), Vec2::new(5.0, 10.0))],
        }));
        let from = Vec3::ZERO;
        let to = Vec3::new(10.0, 0.0, 0.0);
        assert!(!agent_visible(&sight, from, false, to, false));
        // Xray с любой стороны дает видимость
        assert!(agent_visible(&sight, from, true, to, false));
        assert!(agent_visible(&sight, from, false, to, true));
    }

    #[test]
    fn test_segments_parallel_do_not_intersect() {
        assert!(!segments_intersect(
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(0.0, 1.0),
            Vec2::new(10.0, 1.0),
        ));
    }
}
