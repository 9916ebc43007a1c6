//! Контроллер персонажа (конечный автомат)
//!
//! Пять состояний: Idle, Walking, Jumping, Attacking, Casting.
//! Входы — сырые коды PlayerInput; время — Time<Fixed> (60 Hz).

use bevy::prelude::*;

pub mod input;
pub mod state;
pub mod systems;

// Re-export основных типов
pub use input::{InputAction, PlayerInput};
pub use state::{
    try_enter, CharacterState, AIR_CONTROL_SPEED, ATTACK_DURATION, CAST_COST, CAST_DURATION,
    GRAVITY, INPUT_STEP, JUMP_FORCE, WALK_SPEED,
};

use crate::combat::{AttackPerformed, SpellCast};

/// Character Plugin
///
/// Регистрирует системы контроллера в FixedUpdate.
/// Порядок выполнения:
/// 1. character_handle_input — input-диспетчеризация
/// 2. character_update — таймеры, гравитация, авто-переходы
pub struct CharacterPlugin;

impl Plugin for CharacterPlugin {
    fn build(&self, app: &mut App) {
        // Регистрация событий
        app.add_event::<PlayerInput>()
            .add_event::<AttackPerformed>()
            .add_event::<SpellCast>();

        app.add_systems(
            FixedUpdate,
            (
                systems::character_handle_input,
                systems::character_update,
            )
                .chain(), // Последовательное выполнение для детерминизма
        );
    }
}
