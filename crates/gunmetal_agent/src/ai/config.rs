//! Параметры AI архетипа
//!
//! Один immutable конфиг на архетип, шарится по ссылке между всеми его
//! агентами (`AgentTuning` = Arc). Валидация диапазонов — при загрузке,
//! не при каждом draw.

use std::ops::Deref;
use std::sync::Arc;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Tunables боевого агента
///
/// Все поля обязательны — дефолтов у ядра нет, хост поставляет конфиг
/// целиком (или берет пресет).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Порог "цель достигнута" — сравнивается с КВАДРАТОМ дистанции до goal
    pub goal_distance_fudge: f32,
    /// Вес дистанции в score цели
    pub distance_weighting: f32,
    /// Вес угла в score цели
    pub angle_weighting: f32,
    /// Радиус блуждания (метры)
    pub wander_range: f32,
    /// Размер карты по X (метры)
    pub map_size_x: f32,
    /// Размер карты по Z (метры)
    pub map_size_z: f32,
    /// Потолок скорости поворота взгляда (градусы/сек)
    pub max_turn_speed: f32,
    /// Пауза прицеливания при захвате цели, min (секунды)
    pub min_target_time: f32,
    /// Пауза прицеливания при захвате цели, max (секунды)
    pub max_target_time: f32,
    /// Допуск ошибки прицеливания для первого выстрела
    pub accuracy: f32,
    /// Допуск для последующих выстрелов (engagement уже открыт)
    pub continued_accuracy: f32,
    /// Задержка перед первым выстрелом, min (секунды)
    pub min_fire_delay: f32,
    /// Задержка перед первым выстрелом, max (секунды)
    pub max_fire_delay: f32,
    /// Сколько секунд ведем потерянную цель по экстраполяции
    pub max_guess_time: f32,
    /// Шанс якорить wander goal у цели (0-100)
    pub move_closer_chance: f32,
    /// Шанс включить xray на старте wander-цикла (0-100)
    pub xray_chance: f32,
    /// Длительность xray, min (секунды)
    pub min_xray_time: f32,
    /// Длительность xray, max (секунды)
    pub max_xray_time: f32,
}

impl AgentConfig {
    /// Пресет для FFA deathmatch арены 60×60
    pub fn deathmatch() -> Self {
        Self {
            goal_distance_fudge: 1.0,
            distance_weighting: 1.0,
            angle_weighting: 10.0,
            wander_range: 15.0,
            map_size_x: 60.0,
            map_size_z: 60.0,
            max_turn_speed: 180.0,
            min_target_time: 0.4,
            max_target_time: 1.2,
            accuracy: 0.1,
            continued_accuracy: 0.25,
            min_fire_delay: 0.2,
            max_fire_delay: 0.8,
            max_guess_time: 2.0,
            move_closer_chance: 40.0,
            xray_chance: 2.0,
            min_xray_time: 3.0,
            max_xray_time: 6.0,
        }
    }

    /// Проверка диапазонов при загрузке
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_range("target_time", self.min_target_time, self.max_target_time)?;
        check_range("fire_delay", self.min_fire_delay, self.max_fire_delay)?;
        check_range("xray_time", self.min_xray_time, self.max_xray_time)?;
        check_positive("wander_range", self.wander_range)?;
        check_positive("map_size_x", self.map_size_x)?;
        check_positive("map_size_z", self.map_size_z)?;
        check_non_negative("goal_distance_fudge", self.goal_distance_fudge)?;
        check_non_negative("max_turn_speed", self.max_turn_speed)?;
        check_non_negative("max_guess_time", self.max_guess_time)?;
        check_non_negative("min_target_time", self.min_target_time)?;
        check_non_negative("min_fire_delay", self.min_fire_delay)?;
        check_non_negative("min_xray_time", self.min_xray_time)?;
        check_chance("move_closer_chance", self.move_closer_chance)?;
        check_chance("xray_chance", self.xray_chance)?;
        Ok(())
    }
}

fn check_range(name: &'static str, min: f32, max: f32) -> Result<(), ConfigError> {
    if min > max {
        return Err(ConfigError::InvertedRange { name, min, max });
    }
    Ok(())
}

fn check_positive(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if !(value > 0.0) {
        return Err(ConfigError::NonPositive { name, value });
    }
    Ok(())
}

fn check_non_negative(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if !(value >= 0.0) {
        return Err(ConfigError::Negative { name, value });
    }
    Ok(())
}

fn check_chance(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if !(0.0..=100.0).contains(&value) {
        return Err(ConfigError::ChanceOutOfRange { name, value });
    }
    Ok(())
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{name}: min {min} exceeds max {max}")]
    InvertedRange {
        name: &'static str,
        min: f32,
        max: f32,
    },
    #[error("{name} must be positive, got {value}")]
    NonPositive { name: &'static str, value: f32 },
    #[error("{name} must not be negative, got {value}")]
    Negative { name: &'static str, value: f32 },
    #[error("{name} must lie in 0..=100, got {value}")]
    ChanceOutOfRange { name: &'static str, value: f32 },
}

/// Конфиг архетипа на агенте — immutable, шарится по Arc
///
/// Один `AgentConfig` на тип агента, сотня инстансов держит одну аллокацию.
#[derive(Component, Clone)]
pub struct AgentTuning(Arc<AgentConfig>);

impl AgentTuning {
    /// Валидирует и заворачивает конфиг
    pub fn new(config: AgentConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self(Arc::new(config)))
    }

    /// Второй агент того же архетипа — тот же Arc
    pub fn share(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl Deref for AgentTuning {
    type Target = AgentConfig;

    fn deref(&self) -> &AgentConfig {
        &self.0
    }
}
