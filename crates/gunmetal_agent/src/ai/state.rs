//! AI state агента: явный tagged state вместо россыпи флагов
//!
//! Вместо ad-hoc булей (wandering / findingAmmo / isXraying / hasShot) —
//! один `AgentState` + два ортогональных слоя:
//! - `WanderGoal` — куда идем и зачем (движение продолжается и во время
//!   ведения цели)
//! - `Xray` — компонент-маркер с таймером; присутствие компонента ⇔
//!   способность активна, противоречивые комбинации невозможны
//!
//! Старые флаги доступны как derived projections (`is_wandering`,
//! `is_fetching_ammo`).

use bevy::prelude::*;

/// Top-level решение агента (одна ветка за тик)
#[derive(Component, Debug, Clone, PartialEq, Reflect)]
#[reflect(Component)]
pub enum AgentState {
    /// Цели нет — ищем и блуждаем
    Searching,
    /// Ведем цель (прицеливание + pacing), движение продолжается
    Tracking(Engagement),
    /// Health == 0 — решения заморожены до respawn
    Dead,
}

impl Default for AgentState {
    fn default() -> Self {
        Self::Searching
    }
}

/// Состояние непрерывного боя с одной целью
///
/// Живет ровно пока агент ведет эту цель; потеря цели сбрасывает весь
/// engagement (следующая цель начинает с чистых таймеров).
#[derive(Debug, Clone, PartialEq, Reflect)]
pub struct Engagement {
    /// Handle цели в мире; живость перепроверяется каждый тик
    pub target: Entity,
    /// Пауза прицеливания до проверки выстрела (секунды, countdown)
    pub idle_timer: f32,
    /// Задержка первого выстрела (секунды, countdown)
    pub fire_delay: f32,
    /// Первый выстрел сделан — действует continued_accuracy
    pub has_shot: bool,
    /// Последняя увиденная позиция цели
    pub last_seen: Vec3,
    /// Скорость цели в момент последнего контакта
    pub last_seen_velocity: Vec3,
    /// Сколько секунд цель вне line of sight (0 пока видима)
    pub guessing_time: f32,
}

impl Engagement {
    pub fn open(target: Entity, position: Vec3, velocity: Vec3, idle_timer: f32, fire_delay: f32) -> Self {
        Self {
            target,
            idle_timer,
            fire_delay,
            has_shot: false,
            last_seen: position,
            last_seen_velocity: velocity,
            guessing_time: 0.0,
        }
    }

    /// Цель ведется по экстраполяции, не по прямому контакту
    pub fn is_predicting(&self) -> bool {
        self.guessing_time > 0.0
    }
}

/// Зачем агент идет к текущей точке
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum Errand {
    /// Обычное блуждание / патруль
    #[default]
    Roam,
    /// Поход за патронами (магазин пуст)
    FetchAmmo,
}

/// Текущая точка назначения wander-цикла
///
/// `point == None` — цикла нет (только что заспавнились или цель захвачена);
/// ammo-поход использует тот же goal — у "цель достигнута" одна механика
/// на оба случая.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct WanderGoal {
    pub point: Option<Vec3>,
    pub errand: Errand,
}

impl WanderGoal {
    /// Projection старого флага `wandering`
    pub fn is_wandering(&self) -> bool {
        self.point.is_some()
    }

    /// Projection старого флага `findingAmmo`
    pub fn is_fetching_ammo(&self) -> bool {
        self.point.is_some() && self.errand == Errand::FetchAmmo
    }

    /// Захват цели обрывает текущий цикл (следующий Wander стартует заново)
    pub fn clear(&mut self) {
        self.point = None;
        self.errand = Errand::Roam;
    }
}

/// Xray активен: агент видит всех и виден всем
///
/// Компонент-маркер с таймером: присутствие ⇔ время > 0, снимается на
/// истечении. Вставляет только wander planner (вероятностный триггер),
/// снимают decision engine (истечение), смерть и respawn.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Xray {
    pub time_remaining: f32,
}
