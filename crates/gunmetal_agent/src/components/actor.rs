//! Базовые компоненты агента: Agent, Health, LookAngle, Velocity

use bevy::prelude::*;

/// Боевой агент (NPC-комбатант) — базовый маркер
///
/// Required Components добирают весь AI-стейт автоматически; хост добавляет
/// `Transform`, `AgentTuning` (валидированный конфиг архетипа) и при желании
/// свой `GunState` пресет.
#[derive(Component, Debug, Clone, Default, Reflect)]
#[reflect(Component)]
#[require(
    Health,
    LookAngle,
    Velocity,
    DebugLabel,
    Scorecard,
    crate::ai::AgentState,
    crate::ai::WanderGoal,
    crate::combat::GunState,
    crate::world::MovementCommand,
    crate::world::MovementSpeed,
    crate::world::NavigationState
)]
pub struct Agent;

/// Здоровье агента
///
/// Инвариант: 0 ≤ current ≤ max. current == 0 — терминальное состояние,
/// решения заморожены до respawn.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct Health {
    pub current: u32,
    pub max: u32,
}

impl Default for Health {
    fn default() -> Self {
        Self::new(100) // Spawn HP по умолчанию
    }
}

impl Health {
    pub fn new(max: u32) -> Self {
        Self { current: max, max }
    }

    pub fn is_alive(&self) -> bool {
        self.current > 0
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.current = self.current.saturating_sub(amount);
    }

    pub fn heal(&mut self, amount: u32) {
        self.current = (self.current + amount).min(self.max);
    }
}

/// Ориентация взгляда (градусы) — sink для presentation слоя
///
/// Pitch положительный = взгляд вниз (ось X), yaw вокруг Y; при нулевых
/// углах взгляд вдоль +Z. Хост читает компонент и крутит камеру/кости,
/// симуляция только пишет.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct LookAngle {
    pub pitch: f32,
    pub yaw: f32,
}

impl LookAngle {
    /// Отдача оружия: кик вверх по pitch (вызывает weapon система хоста)
    pub fn apply_recoil(&mut self, recoil: f32) {
        self.pitch -= recoil;
    }
}

/// Текущая скорость агента (м/с)
///
/// Пишет navigation слой (headless driver или engine bridge), читают
/// предикторы других агентов при потере line of sight.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct Velocity {
    pub linear: Vec3,
}

/// Отладочный статус агента — телеметрия без поведенческого эффекта
///
/// Аналог worldspace-лейбла над головой: решающие системы пишут сюда
/// короткую строку текущей ветки.
#[derive(Component, Debug, Clone, Default, Reflect)]
#[reflect(Component)]
pub struct DebugLabel {
    pub text: String,
}

impl DebugLabel {
    pub fn set(&mut self, text: &str) {
        if self.text != text {
            self.text = text.to_string();
        }
    }
}

/// Счет фрагов — переживает respawn
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct Scorecard {
    pub kills: u32,
    pub deaths: u32,
}
