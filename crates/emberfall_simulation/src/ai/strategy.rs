//! AI поведения и правила выбора
//!
//! Закрытый набор из шести поведений с фиксированным приоритетным
//! порядком. Eligibility-предикаты — чистые функции от доли здоровья
//! и дистанции до цели, ключ — тег поведения.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::components::{Health, MovementSpeed};

/// Активное AI поведение с per-behavior данными
///
/// Данные (таймеры, индекс маршрута) обнуляются при активации:
/// переключение конструирует свежий вариант.
#[derive(Component, Debug, Clone, PartialEq, Reflect)]
#[reflect(Component)]
pub enum AIBehavior {
    /// Patrol — обход кольцевого маршрута
    Patrol { waypoint: usize },

    /// Chase — движение к цели на номинальной скорости
    Chase,

    /// Attack — атака по cooldown, без движения
    Attack { cooldown: f32 },

    /// Flee — бегство от цели на повышенной скорости
    Flee,

    /// Defend — оборона, режет скорость движения
    Defend { timer: f32 },

    /// Berserk — сближение и атака каждый тик в радиусе
    Berserk,
}

impl Default for AIBehavior {
    fn default() -> Self {
        Self::Patrol { waypoint: 0 }
    }
}

impl AIBehavior {
    pub fn kind(&self) -> BehaviorKind {
        match self {
            AIBehavior::Patrol { .. } => BehaviorKind::Patrol,
            AIBehavior::Chase => BehaviorKind::Chase,
            AIBehavior::Attack { .. } => BehaviorKind::Attack,
            AIBehavior::Flee => BehaviorKind::Flee,
            AIBehavior::Defend { .. } => BehaviorKind::Defend,
            AIBehavior::Berserk => BehaviorKind::Berserk,
        }
    }

    /// Имя поведения для логов и демо-вывода
    pub fn name(&self) -> &'static str {
        self.kind().name()
    }
}

/// Тег поведения без данных — ключ приоритета и предикатов
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BehaviorKind {
    Patrol,
    Chase,
    Attack,
    Flee,
    Defend,
    Berserk,
}

/// Приоритетный порядок: Flee > Berserk > Attack > Defend > Chase > Patrol
///
/// Flee и Berserk пересекаются ниже 20% здоровья; порядок списка
/// детерминированно отдаёт выбор Flee.
pub const PRIORITY: [BehaviorKind; 6] = [
    BehaviorKind::Flee,
    BehaviorKind::Berserk,
    BehaviorKind::Attack,
    BehaviorKind::Defend,
    BehaviorKind::Chase,
    BehaviorKind::Patrol,
];

impl BehaviorKind {
    pub fn name(self) -> &'static str {
        match self {
            BehaviorKind::Patrol => "patrol",
            BehaviorKind::Chase => "chase",
            BehaviorKind::Attack => "attack",
            BehaviorKind::Flee => "flee",
            BehaviorKind::Defend => "defend",
            BehaviorKind::Berserk => "berserk",
        }
    }

    /// Eligibility-предикат поведения
    ///
    /// target_distance = None когда цели нет; target-зависимые
    /// поведения в этом случае не проходят.
    pub fn eligible(self, health: &Health, target_distance: Option<f32>, config: &AIConfig) -> bool {
        if !health.is_alive() {
            return false;
        }
        let hp = health.ratio();

        match self {
            BehaviorKind::Flee => hp < config.flee_health_threshold,
            BehaviorKind::Berserk => hp < config.berserk_health_threshold,
            BehaviorKind::Attack => {
                matches!(target_distance, Some(d) if d <= config.attack_range)
            }
            BehaviorKind::Defend => {
                hp >= config.defend_health_min && hp <= config.defend_health_max
            }
            BehaviorKind::Chase => {
                matches!(target_distance, Some(d) if d > config.attack_range)
            }
            BehaviorKind::Patrol => true,
        }
    }

    /// Активация: свежий вариант с обнулёнными данными
    ///
    /// Berserk применяет множитель скорости один раз при активации.
    pub fn activate(self, speed: &mut MovementSpeed, config: &AIConfig) -> AIBehavior {
        match self {
            BehaviorKind::Patrol => AIBehavior::Patrol { waypoint: 0 },
            BehaviorKind::Chase => AIBehavior::Chase,
            BehaviorKind::Attack => AIBehavior::Attack { cooldown: 0.0 },
            BehaviorKind::Flee => AIBehavior::Flee,
            BehaviorKind::Defend => AIBehavior::Defend { timer: 0.0 },
            BehaviorKind::Berserk => {
                speed.speed *= config.berserk_speed_multiplier;
                AIBehavior::Berserk
            }
        }
    }
}

/// Первый eligible тег в приоритетном порядке; None если мёртв
pub fn select_best_kind(
    health: &Health,
    target_distance: Option<f32>,
    config: &AIConfig,
) -> Option<BehaviorKind> {
    PRIORITY
        .iter()
        .copied()
        .find(|kind| kind.eligible(health, target_distance, config))
}

/// Параметры AI
#[derive(Component, Debug, Clone, Reflect, Serialize, Deserialize)]
#[reflect(Component)]
pub struct AIConfig {
    /// Радиус атаки (units)
    pub attack_range: f32,
    /// Health порог бегства (percent)
    pub flee_health_threshold: f32,
    /// Health порог берсерка (percent)
    pub berserk_health_threshold: f32,
    /// Нижняя граница окна обороны (percent)
    pub defend_health_min: f32,
    /// Верхняя граница окна обороны (percent)
    pub defend_health_max: f32,
    /// Длительность цикла обороны (секунды)
    pub defend_duration: f32,
    /// Cooldown между атаками (секунды)
    pub attack_cooldown: f32,
    /// Множитель скорости бегства
    pub flee_speed_multiplier: f32,
    /// Множитель скорости берсерка
    pub berserk_speed_multiplier: f32,
    /// Радиус достижения waypoint (units)
    pub waypoint_radius: f32,
}

impl Default for AIConfig {
    fn default() -> Self {
        Self {
            attack_range: 30.0,
            flee_health_threshold: 0.3,    // 30% health
            berserk_health_threshold: 0.2, // 20% health
            defend_health_min: 0.3,
            defend_health_max: 0.6,
            defend_duration: 2.0,
            attack_cooldown: 1.0,
            flee_speed_multiplier: 1.5,
            berserk_speed_multiplier: 1.5,
            waypoint_radius: 5.0,
        }
    }
}

/// Периодическая переоценка поведения
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct StrategySelector {
    /// Интервал переоценки (секунды)
    pub eval_interval: f32,
    /// Накопленное время с последней переоценки
    pub eval_timer: f32,
}

impl Default for StrategySelector {
    fn default() -> Self {
        Self {
            eval_interval: 1.0,
            eval_timer: 0.0,
        }
    }
}

/// Цель AI — позиция и наличие в одном Option
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct AITarget {
    pub position: Option<Vec3>,
}

impl AITarget {
    pub fn set(&mut self, position: Vec3) {
        self.position = Some(position);
    }

    pub fn clear(&mut self) {
        self.position = None;
    }

    /// Дистанция до цели от позиции pos; None без цели
    pub fn distance_from(&self, pos: Vec3) -> Option<f32> {
        self.position.map(|target| pos.distance(target))
    }
}

/// Кольцевой маршрут патруля
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct PatrolRoute {
    pub waypoints: Vec<Vec3>,
}

impl Default for PatrolRoute {
    fn default() -> Self {
        // квадрат 100×100 на плоскости земли
        Self {
            waypoints: vec![
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(100.0, 0.0, 0.0),
                Vec3::new(100.0, 0.0, 100.0),
                Vec3::new(0.0, 0.0, 100.0),
            ],
        }
    }
}

/// Событие: принудительное переключение поведения (минуя eligibility)
///
/// Данные поведения обнуляются так же, как при обычном переключении.
#[derive(Event, Debug, Clone, Copy)]
pub struct ForceBehavior {
    pub entity: Entity,
    pub kind: BehaviorKind,
}
