//! ECS Components для боевых агентов
//!
//! Организация по доменам:
//! - actor: базовые характеристики (Agent, Health, LookAngle, Velocity,
//!   DebugLabel, Scorecard)
//!
//! Gun state живет в `crate::combat`, AI state — в `crate::ai`,
//! navigation/perception seams — в `crate::world`.

pub mod actor;

// Re-exports для удобного импорта
pub use actor::*;
