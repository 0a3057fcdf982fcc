//! Gun state component
//!
//! Архитектура:
//! - ECS хранит: магазин, запас, trigger intent (game state)
//! - Хостовая weapon система исполняет: расход патронов по fire rate,
//!   reload, спавн снарядов, урон
//! - AI только читает clip/automatic/fire_rate/reload_time и пишет
//!   `trigger_held`

use bevy::prelude::*;

/// Состояние экипированного оружия
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct GunState {
    /// Патронов в магазине
    pub clip: u32,
    /// Ёмкость магазина
    pub clip_size: u32,
    /// Запас патронов вне магазина
    pub reserve: u32,
    /// Ёмкость запаса
    pub reserve_size: u32,
    /// Trigger intent: AI держит / отпускает, weapon система стреляет
    pub trigger_held: bool,
    /// Автоматический режим (trigger можно держать)
    pub automatic: bool,
    /// Интервал между выстрелами (секунды)
    pub fire_rate: f32,
    /// Время перезарядки (секунды)
    pub reload_time: f32,
}

impl Default for GunState {
    fn default() -> Self {
        Self::assault_rifle()
    }
}

impl GunState {
    /// Автоматическая винтовка
    pub fn assault_rifle() -> Self {
        Self {
            clip: 30,
            clip_size: 30,
            reserve: 90,
            reserve_size: 90,
            trigger_held: false,
            automatic: true,
            fire_rate: 0.1,
            reload_time: 2.0,
        }
    }

    /// Полуавтоматическая марксманка — trigger отпускается после выстрела
    pub fn marksman_rifle() -> Self {
        Self {
            clip: 5,
            clip_size: 5,
            reserve: 25,
            reserve_size: 25,
            trigger_held: false,
            automatic: false,
            fire_rate: 1.2,
            reload_time: 2.5,
        }
    }

    /// Магазин пуст — агенту пора за патронами
    pub fn is_empty(&self) -> bool {
        self.clip == 0
    }

    /// Полный рефилл (pickup подобран / respawn)
    pub fn refill(&mut self) {
        self.clip = self.clip_size;
        self.reserve = self.reserve_size;
    }
}
