//! Movement компоненты: горизонтальная скорость и вертикальное движение

use bevy::prelude::*;

/// Горизонтальная скорость движения (units/sec)
///
/// Меняется enter/exit хуками состояний персонажа и AI поведениями
/// (Defend режет вдвое, Berserk умножает при активации).
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct MovementSpeed {
    pub speed: f32,
}

impl Default for MovementSpeed {
    fn default() -> Self {
        Self { speed: 100.0 } // стартовая скорость персонажа
    }
}

impl MovementSpeed {
    pub fn new(speed: f32) -> Self {
        Self { speed }
    }
}

/// Вертикальное состояние тела (прыжок, земля)
///
/// Гравитация интегрируется вручную в character_update; земля на y = 0.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct VerticalBody {
    /// Вертикальная скорость (units/sec, положительная вверх)
    pub velocity: f32,
    /// На земле ли персонаж
    pub grounded: bool,
}

impl Default for VerticalBody {
    fn default() -> Self {
        Self {
            velocity: 0.0,
            grounded: true,
        }
    }
}
