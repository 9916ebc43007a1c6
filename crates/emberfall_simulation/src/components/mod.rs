//! ECS Components для игровых entity
//!
//! Организация по доменам:
//! - actor: базовые характеристики (name, health, mana)
//! - movement: горизонтальная скорость и вертикальное движение

pub mod actor;
pub mod movement;

// Re-exports для удобного импорта
pub use actor::*;
pub use movement::*;
