//! EMBERFALL Simulation Core
//!
//! Headless ECS-симуляция на Bevy 0.16:
//! - character: конечный автомат контроллера персонажа (5 состояний)
//! - ai: приоритетный выбор AI поведения + исполнение (6 поведений)
//! - combat: события-эффекты (атаки, заклинания)
//!
//! Детерминизм: все системы в FixedUpdate (60 Hz), шаг времени
//! управляется вручную через TimeUpdateStrategy::ManualDuration —
//! один app.update() == один simulation tick.

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;

// Публичные модули
pub mod ai;
pub mod character;
pub mod combat;
pub mod components;
pub mod logger;

// Re-export базовых типов для удобства
pub use ai::{
    AIBehavior, AIConfig, AIPlugin, AITarget, BehaviorKind, ForceBehavior, PatrolRoute,
    StrategySelector,
};
pub use character::{CharacterPlugin, CharacterState, InputAction, PlayerInput};
pub use combat::{AttackPerformed, SpellCast};
pub use components::*;
pub use logger::{
    init_logger, log, log_error, log_info, log_warning, set_log_level, set_logger, ConsoleLogger,
    LogLevel, LogPrinter,
};

/// Частота simulation tick (Hz)
pub const TICK_RATE: f64 = 60.0;

/// Главный plugin симуляции (объединяет все подсистемы)
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app
            // Fixed timestep 60Hz для simulation tick
            .insert_resource(Time::<Fixed>::from_hz(TICK_RATE))
            // Подсистемы
            .add_plugins((CharacterPlugin, AIPlugin));
    }
}

/// Создаёт minimal Bevy App для headless симуляции
///
/// Время продвигается ровно на один tick (1/60 s) за app.update():
/// одинаковые прогоны дают идентичные результаты.
pub fn create_headless_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .insert_resource(Time::<Fixed>::from_hz(TICK_RATE))
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(
            1.0 / TICK_RATE,
        )));

    // Прогрев времени: Time<Real> рапортует нулевую дельту на своём самом
    // первом update, из-за чего первый app.update() вызывающего не дал бы ни
    // одного фиксированного шага (и терял бы событие, посланное до него).
    // Один холостой update на ещё пустом мире выставляет базовую точку
    // Time<Real>, так что каждый последующий app.update() == ровно один
    // fixed tick (1/60 s) — контракт, описанный выше.
    app.update();

    app
}

/// Snapshot мира для сравнения детерминизма
///
/// Debug-формат компонентов, сортировка по Entity index.
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
