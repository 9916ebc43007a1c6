//! Состояния персонажа и правила переходов
//!
//! Закрытый enum вместо таблицы именованных состояний:
//! - per-state таймеры живут в варианте и обнуляются конструированием
//! - guard переходов — чистая функция над парой (текущее, следующее)
//! - отклонённый переход — тихий no-op, не ошибка

use bevy::prelude::*;

use crate::components::{Mana, MovementSpeed, VerticalBody};

/// Скорость ходьбы (units/sec)
pub const WALK_SPEED: f32 = 100.0;
/// Скорость управления в воздухе (units/sec)
pub const AIR_CONTROL_SPEED: f32 = 50.0;
/// Начальная вертикальная скорость прыжка (units/sec)
pub const JUMP_FORCE: f32 = 300.0;
/// Гравитация (units/sec², отрицательная вниз)
pub const GRAVITY: f32 = -500.0;
/// Длительность замаха атаки (секунды)
pub const ATTACK_DURATION: f32 = 0.5;
/// Длительность каста (секунды)
pub const CAST_DURATION: f32 = 1.0;
/// Стоимость заклинания (mana points)
pub const CAST_COST: f32 = 10.0;
/// Шаг позиции на одно input-событие (кадр при 60 Hz)
pub const INPUT_STEP: f32 = 0.016;

/// Состояние контроллера персонажа
///
/// Ровно одно состояние активно; per-state данные существуют
/// только пока состояние активно.
#[derive(Component, Debug, Clone, PartialEq, Reflect)]
#[reflect(Component)]
pub enum CharacterState {
    /// Idle — стоим, регенерируем ману
    Idle,

    /// Walking — ходьба, позиция меняется input-событиями
    Walking,

    /// Jumping — полёт по баллистической дуге до земли
    Jumping,

    /// Attacking — замах фиксированной длительности, input игнорируется
    Attacking { timer: f32 },

    /// Casting — чтение заклинания, прерывается движением
    Casting { timer: f32 },
}

impl Default for CharacterState {
    fn default() -> Self {
        Self::Idle
    }
}

impl CharacterState {
    /// Имя состояния для логов и демо-вывода
    pub fn name(&self) -> &'static str {
        match self {
            CharacterState::Idle => "idle",
            CharacterState::Walking => "walking",
            CharacterState::Jumping => "jumping",
            CharacterState::Attacking { .. } => "attacking",
            CharacterState::Casting { .. } => "casting",
        }
    }

    /// Разрешён ли переход в состояние next
    pub fn can_transition_to(&self, next: &CharacterState) -> bool {
        use CharacterState::*;
        matches!(
            (self, next),
            (Idle, Walking | Jumping | Attacking { .. } | Casting { .. })
                | (Walking, Idle | Jumping | Attacking { .. })
                | (Jumping, Idle | Attacking { .. })
                | (Attacking { .. }, Idle | Jumping)
                | (Casting { .. }, Idle | Walking)
        )
    }
}

/// Переход с guard-проверкой и enter/exit хуками
///
/// Возвращает false и ничего не меняет, если guard отклонил переход.
/// Вход в Casting с недостаточной маной немедленно откатывается в Idle
/// внутри того же вызова; мана при этом не меняется.
pub fn try_enter(
    state: &mut CharacterState,
    next: CharacterState,
    speed: &mut MovementSpeed,
    body: &mut VerticalBody,
    mana: &Mana,
) -> bool {
    if !state.can_transition_to(&next) {
        return false;
    }

    // exit-хук старого состояния
    if let CharacterState::Walking = state {
        speed.speed = 0.0;
    }

    *state = next;

    // enter-хук нового состояния
    match state {
        CharacterState::Idle => speed.speed = 0.0,
        CharacterState::Walking => speed.speed = WALK_SPEED,
        CharacterState::Jumping => {
            body.grounded = false;
            body.velocity = JUMP_FORCE;
        }
        CharacterState::Attacking { .. } => speed.speed = 0.0,
        CharacterState::Casting { .. } => {
            speed.speed = 0.0;
            if !mana.can_afford(CAST_COST) {
                // маны не хватает — немедленный откат в Idle
                *state = CharacterState::Idle;
            }
        }
    }

    true
}
