//! AI decision-making module
//!
//! Приоритетный выбор поведения (Flee > Berserk > Attack > Defend >
//! Chase > Patrol) с периодической переоценкой + исполнение активного
//! поведения каждый тик.

use bevy::prelude::*;

pub mod strategy;
pub mod systems;

// Re-export основных типов
pub use strategy::{
    select_best_kind, AIBehavior, AIConfig, AITarget, BehaviorKind, ForceBehavior, PatrolRoute,
    StrategySelector, PRIORITY,
};

use crate::combat::AttackPerformed;

/// AI Plugin
///
/// Регистрирует AI системы в FixedUpdate.
/// Порядок выполнения:
/// 1. force_behavior — внешние принудительные переключения
/// 2. strategy_selection — периодическая переоценка
/// 3. behavior_execution — исполнение активного поведения
pub struct AIPlugin;

impl Plugin for AIPlugin {
    fn build(&self, app: &mut App) {
        // Регистрация событий
        app.add_event::<ForceBehavior>().add_event::<AttackPerformed>();

        app.add_systems(
            FixedUpdate,
            (
                systems::force_behavior,
                systems::strategy_selection,
                systems::behavior_execution,
            )
                .chain(), // Последовательное выполнение для детерминизма
        );
    }
}
