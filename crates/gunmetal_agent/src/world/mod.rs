//! World seams: collaborator-интерфейсы симуляции
//!
//! Симуляция не владеет геометрией уровня, pathfinding'ом и триггер-зонами —
//! это хост. Здесь трейты-oracles (`LineOfSight`, `NavSampler`), intent
//! компоненты и headless реализации по умолчанию, чтобы библиотека
//! прогонялась без движка.

use bevy::prelude::*;

pub mod navigation;
pub mod pickups;
pub mod vision;

// Re-export основных типов
pub use navigation::{
    drive_navigation, FlatNavMesh, MovementCommand, MovementSpeed, NavMesh, NavSampler,
    NavigationState, VoidNavMesh,
};
pub use pickups::{
    collect_ammo_pickups, respawn_pickups, AmmoPickup, AMMO_PICKUP_RADIUS,
};
pub use vision::{agent_visible, LineOfSight, OpenArena, SightBlockers, WallGrid};

use crate::SimSet;

/// World Plugin
///
/// Headless реализации oracle-ресурсов вставляются только если хост не
/// поставил свои (`init_resource`). Порядок: после решений (`SimSet::World`):
/// 1. drive_navigation — интеграция движения + Velocity
/// 2. collect_ammo_pickups — подбор в радиусе
/// 3. respawn_pickups — возврат точек
pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SightBlockers>()
            .init_resource::<NavMesh>();

        app.add_systems(
            FixedUpdate,
            (drive_navigation, collect_ammo_pickups, respawn_pickups)
                .chain()
                .in_set(SimSet::World),
        );
    }
}
