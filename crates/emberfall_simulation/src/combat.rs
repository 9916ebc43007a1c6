//! Combat события — side effects состояний и поведений
//!
//! ECS ответственность:
//! - Генерация эффектов: AttackPerformed, SpellCast
//! - Потребители (урон, анимации, звук) живут у внешнего драйвера

use bevy::prelude::*;

/// Событие: актор выполнил атаку
///
/// Пишется при входе в Attacking (персонаж) и из Attack/Berserk
/// поведений (AI). Эффект применяется сразу, не по завершении замаха.
#[derive(Event, Debug, Clone, Copy)]
pub struct AttackPerformed {
    pub attacker: Entity,
}

/// Событие: заклинание завершено, мана списана
///
/// Прерванный каст события не генерирует и ману не тратит.
#[derive(Event, Debug, Clone, Copy)]
pub struct SpellCast {
    pub caster: Entity,
    pub cost: f32,
}
