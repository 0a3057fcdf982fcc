//! Ammo pickups: подбор и timed respawn
//!
//! Pickup — entity с Transform. Подбор закрывает цикл "магазин пуст → сходил
//! за патронами" в headless прогонах; хост с настоящими триггер-зонами
//! заменяет `collect_ammo_pickups` своим мостом.

use bevy::prelude::*;

use crate::combat::GunState;
use crate::components::{Agent, Health};

/// Радиус подбора (метры)
pub const AMMO_PICKUP_RADIUS: f32 = 1.0;

/// Точка патронов на карте
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct AmmoPickup {
    /// Доступен для подбора
    pub active: bool,
    /// Через сколько секунд вернется после подбора
    pub respawn_delay: f32,
    /// Обратный отсчет до возврата (активен только когда !active)
    pub respawn_timer: f32,
}

impl Default for AmmoPickup {
    fn default() -> Self {
        Self::new(10.0)
    }
}

impl AmmoPickup {
    pub fn new(respawn_delay: f32) -> Self {
        Self {
            active: true,
            respawn_delay,
            respawn_timer: 0.0,
        }
    }
}

/// System: подбор патронов живыми агентами в радиусе
pub fn collect_ammo_pickups(
    mut pickups: Query<(&Transform, &mut AmmoPickup), Without<Agent>>,
    mut agents: Query<(Entity, &Transform, &Health, &mut GunState), With<Agent>>,
) {
    for (pickup_transform, mut pickup) in pickups.iter_mut() {
        if !pickup.active {
            continue;
        }
        for (entity, agent_transform, health, mut gun) in agents.iter_mut() {
            if !health.is_alive() {
                continue;
            }
            let distance_sq = (agent_transform.translation - pickup_transform.translation)
                .length_squared();
            if distance_sq <= AMMO_PICKUP_RADIUS * AMMO_PICKUP_RADIUS {
                gun.refill();
                pickup.active = false;
                pickup.respawn_timer = pickup.respawn_delay;
                crate::logger::log(&format!("📦 {:?} picked up ammo", entity));
                break; // Один подбор на точку
            }
        }
    }
}

/// System: возврат подобранных точек по таймеру
pub fn respawn_pickups(time: Res<Time<Fixed>>, mut pickups: Query<&mut AmmoPickup>) {
    let dt = time.delta_secs();
    for mut pickup in pickups.iter_mut() {
        if pickup.active {
            continue;
        }
        pickup.respawn_timer -= dt;
        if pickup.respawn_timer <= 0.0 {
            pickup.respawn_timer = 0.0;
            pickup.active = true;
        }
    }
}
