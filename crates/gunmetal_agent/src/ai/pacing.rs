//! Combat pacer: когда жать и когда отпускать trigger
//!
//! Темп боя задают два таймера engagement'а:
//! - idle_timer — пауза прицеливания до следующей проверки выстрела
//! - fire_delay — задержка первого выстрела после того как прицел сошёлся
//!
//! Гейт точности: aim_error < threshold², где aim_error — ЛИНЕЙНАЯ метрика
//! из aim controller'а, а threshold берётся в квадрат. Несимметрично, но
//! именно так оттюнены допуски — сравнение сохраняем как есть, строгое `<`.

use rand::Rng;

use crate::ai::{AgentTuning, Engagement};
use crate::combat::GunState;

/// Подготовка оружия перед прицеливанием (каждый тик ведения)
///
/// - Полуавтомат не стреляет очередью: held trigger отпускается, следующий
///   выстрел не раньше fire_rate
/// - Пустой магазин паркует pacer на reload + случайную паузу переоценки
pub fn prepare_weapon(
    engagement: &mut Engagement,
    gun: &mut GunState,
    tuning: &AgentTuning,
    rng: &mut impl Rng,
) {
    if gun.trigger_held && !gun.automatic {
        gun.trigger_held = false;
        engagement.idle_timer = gun.fire_rate;
    }
    if gun.clip == 0 {
        engagement.idle_timer =
            gun.reload_time + rng.gen_range(tuning.min_target_time..=tuning.max_target_time);
    }
}

/// Решение по trigger'у на этот тик
///
/// idle_timer тикает всегда; по его истечении прицел либо в допуске
/// (fire_delay тикает к выстрелу), либо engagement "остывает": свежий
/// fire_delay, следующий выстрел снова считается первым.
pub fn pace_trigger(
    engagement: &mut Engagement,
    gun: &mut GunState,
    tuning: &AgentTuning,
    rng: &mut impl Rng,
    aim_error: f32,
    dt: f32,
) {
    engagement.idle_timer -= dt;
    if engagement.idle_timer > 0.0 {
        return;
    }
    let threshold = if engagement.has_shot {
        tuning.continued_accuracy
    } else {
        tuning.accuracy
    };
    if aim_error < threshold * threshold {
        engagement.fire_delay -= dt;
        if engagement.fire_delay <= 0.0 {
            gun.trigger_held = true;
            engagement.has_shot = true;
        }
    } else {
        engagement.fire_delay = rng.gen_range(tuning.min_fire_delay..=tuning.max_fire_delay);
        engagement.has_shot = false;
    }
}
