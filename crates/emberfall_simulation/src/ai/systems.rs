//! AI системы: выбор стратегии и исполнение поведения
//!
//! Порядок (FixedUpdate, chain):
//! 1. force_behavior — внешние принудительные переключения
//! 2. strategy_selection — периодическая переоценка по приоритету
//! 3. behavior_execution — исполнение активного поведения

use bevy::prelude::*;

use crate::combat::AttackPerformed;
use crate::components::{Health, MovementSpeed};
use crate::logger;

use super::strategy::{
    select_best_kind, AIBehavior, AIConfig, AITarget, ForceBehavior, PatrolRoute, StrategySelector,
};

/// Минимальная дистанция движения к цели (анти-дрожание)
const MIN_MOVE_DISTANCE: f32 = 1.0;

/// Система: принудительное переключение поведения
pub fn force_behavior(
    mut events: EventReader<ForceBehavior>,
    mut query: Query<(&mut AIBehavior, &mut MovementSpeed, &AIConfig)>,
) {
    for event in events.read() {
        if let Ok((mut behavior, mut speed, config)) = query.get_mut(event.entity) {
            *behavior = event.kind.activate(&mut speed, config);
        }
    }
}

/// Система: периодическая переоценка поведения
///
/// Переключает на первый eligible тег в приоритетном порядке.
/// Если активное поведение само первое eligible — no-op:
/// внутренние таймеры не сбрасываются. Если ни одно не eligible —
/// текущее остаётся.
pub fn strategy_selection(
    mut query: Query<(
        Entity,
        &mut StrategySelector,
        &mut AIBehavior,
        &mut MovementSpeed,
        &Health,
        &AITarget,
        &AIConfig,
        &Transform,
    )>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (entity, mut selector, mut behavior, mut speed, health, target, config, transform) in
        query.iter_mut()
    {
        selector.eval_timer += delta;
        if selector.eval_timer < selector.eval_interval {
            continue;
        }
        selector.eval_timer = 0.0;

        let distance = target.distance_from(transform.translation);
        let Some(best) = select_best_kind(health, distance, config) else {
            continue;
        };

        if best == behavior.kind() {
            continue;
        }

        *behavior = best.activate(&mut speed, config);
        logger::log(&format!(
            "entity {:?}: behavior -> {}",
            entity,
            behavior.name()
        ));
    }
}

/// Система: исполнение активного поведения
///
/// Поведение исполняется только пока его собственный предикат истинен;
/// отсутствие цели для target-зависимых поведений — «нечего делать».
pub fn behavior_execution(
    mut query: Query<(
        Entity,
        &mut AIBehavior,
        &mut Transform,
        &mut MovementSpeed,
        &Health,
        &AITarget,
        &AIConfig,
        Option<&PatrolRoute>,
    )>,
    mut attack_events: EventWriter<AttackPerformed>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (entity, mut behavior, mut transform, mut speed, health, target, config, route) in
        query.iter_mut()
    {
        let distance = target.distance_from(transform.translation);
        if !behavior.kind().eligible(health, distance, config) {
            continue;
        }

        match &mut *behavior {
            AIBehavior::Patrol { waypoint } => {
                let Some(route) = route else { continue };
                if route.waypoints.is_empty() {
                    continue;
                }

                let goal = route.waypoints[*waypoint % route.waypoints.len()];
                move_towards(&mut transform, goal, speed.speed, delta);

                // в радиусе waypoint — следующая точка кольца
                if transform.translation.distance_squared(goal)
                    < config.waypoint_radius * config.waypoint_radius
                {
                    *waypoint = (*waypoint + 1) % route.waypoints.len();
                }
            }

            AIBehavior::Chase => {
                if let Some(goal) = target.position {
                    move_towards(&mut transform, goal, speed.speed, delta);
                }
            }

            AIBehavior::Attack { cooldown } => {
                *cooldown += delta;
                if *cooldown >= config.attack_cooldown {
                    attack_events.write(AttackPerformed { attacker: entity });
                    *cooldown = 0.0;
                }
            }

            AIBehavior::Flee => {
                if let Some(threat) = target.position {
                    move_away(
                        &mut transform,
                        threat,
                        speed.speed * config.flee_speed_multiplier,
                        delta,
                    );
                }
            }

            AIBehavior::Defend { timer } => {
                *timer += delta;
                if *timer >= config.defend_duration {
                    // снижение скорости не восстанавливается
                    speed.speed *= 0.5;
                    *timer = 0.0;
                }
            }

            AIBehavior::Berserk => {
                if let Some(goal) = target.position {
                    move_towards(&mut transform, goal, speed.speed, delta);

                    if let Some(d) = target.distance_from(transform.translation) {
                        if d <= config.attack_range {
                            // без cooldown: атака каждый тик в радиусе
                            attack_events.write(AttackPerformed { attacker: entity });
                        }
                    }
                }
            }
        }
    }
}

/// Движение к точке с анти-дрожанием у цели
fn move_towards(transform: &mut Transform, goal: Vec3, speed: f32, delta: f32) {
    let to_goal = goal - transform.translation;
    let distance = to_goal.length();

    if distance > MIN_MOVE_DISTANCE {
        transform.translation += to_goal / distance * speed * delta;
    }
}

/// Движение от точки (бегство)
fn move_away(transform: &mut Transform, threat: Vec3, speed: f32, delta: f32) {
    let from_threat = transform.translation - threat;
    let distance = from_threat.length();

    if distance > 0.0 {
        transform.translation += from_threat / distance * speed * delta;
    }
}
