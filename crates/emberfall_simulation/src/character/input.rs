//! Input события внешнего драйвера
//!
//! Драйвер шлёт сырые коды клавиш; нераспознанный код тихо игнорируется.

use bevy::prelude::*;

/// Событие: сырой input-код от внешнего драйвера
#[derive(Event, Debug, Clone, Copy)]
pub struct PlayerInput {
    pub code: i32,
}

/// Распознанное действие игрока
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    MoveLeft,
    MoveRight,
    Jump,
    Attack,
    Cast,
    /// Код 0 — «нет ввода», останавливает ходьбу
    Release,
}

impl InputAction {
    /// Декодирование кода клавиши; None для нераспознанных кодов
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            65 => Some(Self::MoveLeft),  // A
            68 => Some(Self::MoveRight), // D
            32 => Some(Self::Jump),      // Space
            74 => Some(Self::Attack),    // J
            75 => Some(Self::Cast),      // K
            0 => Some(Self::Release),
            _ => None,
        }
    }
}
