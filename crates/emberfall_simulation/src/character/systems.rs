//! Системы контроллера персонажа
//!
//! Порядок (FixedUpdate, chain):
//! 1. character_handle_input — диспетчеризация input по текущему состоянию
//! 2. character_update — таймеры, гравитация, авто-переходы

use bevy::prelude::*;

use crate::combat::{AttackPerformed, SpellCast};
use crate::components::{Mana, MovementSpeed, VerticalBody};
use crate::logger;

use super::input::{InputAction, PlayerInput};
use super::state::{
    try_enter, CharacterState, AIR_CONTROL_SPEED, ATTACK_DURATION, CAST_COST, CAST_DURATION,
    GRAVITY, INPUT_STEP, WALK_SPEED,
};

/// Система: input-диспетчеризация по текущему состоянию
///
/// Каждое состояние распознаёт свой набор действий; остальные коды
/// проглатываются без эффекта. Переходы идут через try_enter —
/// guard отклоняет недопустимые без ошибки.
pub fn character_handle_input(
    mut inputs: EventReader<PlayerInput>,
    mut query: Query<(
        Entity,
        &mut CharacterState,
        &mut Transform,
        &mut VerticalBody,
        &mut MovementSpeed,
        &Mana,
    )>,
    mut attack_events: EventWriter<AttackPerformed>,
) {
    for input in inputs.read() {
        let Some(action) = InputAction::from_code(input.code) else {
            // нераспознанный код — тихо игнорируем
            continue;
        };

        for (entity, mut state, mut transform, mut body, mut speed, mana) in query.iter_mut() {
            let mut requested: Option<CharacterState> = None;

            match (&*state, action) {
                // Idle: движение/прыжок/атака/каст переводят в новые состояния
                (CharacterState::Idle, InputAction::MoveLeft | InputAction::MoveRight) => {
                    requested = Some(CharacterState::Walking);
                }
                (CharacterState::Idle, InputAction::Jump) if body.grounded => {
                    requested = Some(CharacterState::Jumping);
                }
                (CharacterState::Idle, InputAction::Attack) => {
                    requested = Some(CharacterState::Attacking { timer: 0.0 });
                }
                (CharacterState::Idle, InputAction::Cast) if mana.can_afford(CAST_COST) => {
                    requested = Some(CharacterState::Casting { timer: 0.0 });
                }

                // Walking: движение — кадровый шаг позиции без перехода
                (CharacterState::Walking, InputAction::MoveLeft) => {
                    transform.translation.x -= WALK_SPEED * INPUT_STEP;
                }
                (CharacterState::Walking, InputAction::MoveRight) => {
                    transform.translation.x += WALK_SPEED * INPUT_STEP;
                }
                (CharacterState::Walking, InputAction::Jump) if body.grounded => {
                    requested = Some(CharacterState::Jumping);
                }
                (CharacterState::Walking, InputAction::Attack) => {
                    requested = Some(CharacterState::Attacking { timer: 0.0 });
                }
                (CharacterState::Walking, InputAction::Release) => {
                    requested = Some(CharacterState::Idle);
                }

                // Jumping: ослабленное управление в воздухе, атака доступна
                (CharacterState::Jumping, InputAction::MoveLeft) => {
                    transform.translation.x -= AIR_CONTROL_SPEED * INPUT_STEP;
                }
                (CharacterState::Jumping, InputAction::MoveRight) => {
                    transform.translation.x += AIR_CONTROL_SPEED * INPUT_STEP;
                }
                (CharacterState::Jumping, InputAction::Attack) => {
                    requested = Some(CharacterState::Attacking { timer: 0.0 });
                }

                // Attacking: весь input игнорируется до конца замаха
                (CharacterState::Attacking { .. }, _) => {}

                // Casting: движение прерывает каст, мана не тратится
                (
                    CharacterState::Casting { .. },
                    InputAction::MoveLeft | InputAction::MoveRight,
                ) => {
                    requested = Some(CharacterState::Walking);
                }

                _ => {}
            }

            if let Some(next) = requested {
                let to_attack = matches!(next, CharacterState::Attacking { .. });
                let entered = try_enter(&mut state, next, &mut speed, &mut body, mana);

                if entered && to_attack && matches!(&*state, CharacterState::Attacking { .. }) {
                    // эффект атаки применяется на входе, не по завершении замаха
                    attack_events.write(AttackPerformed { attacker: entity });
                }
                if entered {
                    logger::log(&format!("entity {:?}: state -> {}", entity, state.name()));
                }
            }
        }
    }
}

/// Система: временная логика состояний
///
/// Jumping интегрирует гравитацию (velocity, затем позиция уже
/// ускоренной velocity), Attacking/Casting копят таймеры и
/// авто-переходят по истечении.
pub fn character_update(
    mut query: Query<(
        Entity,
        &mut CharacterState,
        &mut Transform,
        &mut VerticalBody,
        &mut MovementSpeed,
        &mut Mana,
    )>,
    mut spell_events: EventWriter<SpellCast>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (entity, mut state, mut transform, mut body, mut speed, mut mana) in query.iter_mut() {
        let mut pending: Option<CharacterState> = None;

        match &mut *state {
            // Idle: медленная регенерация маны
            CharacterState::Idle => mana.regenerate(delta),

            // Walking: временной логики нет, авто-выхода нет
            CharacterState::Walking => {}

            // Jumping: гравитация, интеграция позиции, приземление
            CharacterState::Jumping => {
                body.velocity += GRAVITY * delta;
                transform.translation.y += body.velocity * delta;

                if transform.translation.y <= 0.0 {
                    transform.translation.y = 0.0;
                    body.grounded = true;
                    body.velocity = 0.0;
                    pending = Some(CharacterState::Idle);
                }
            }

            // Attacking: по истечении замаха — Idle на земле, Jumping в воздухе
            CharacterState::Attacking { timer } => {
                *timer += delta;
                if *timer >= ATTACK_DURATION {
                    pending = Some(if body.grounded {
                        CharacterState::Idle
                    } else {
                        CharacterState::Jumping
                    });
                }
            }

            // Casting: по завершении — списание маны, эффект, Idle
            CharacterState::Casting { timer } => {
                *timer += delta;
                if *timer >= CAST_DURATION {
                    mana.consume(CAST_COST);
                    spell_events.write(SpellCast {
                        caster: entity,
                        cost: CAST_COST,
                    });
                    pending = Some(CharacterState::Idle);
                }
            }
        }

        if let Some(next) = pending {
            try_enter(&mut state, next, &mut speed, &mut body, &mana);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jump_integration_step() {
        // Один шаг дуги: y' = y + (v + g*dt)*dt
        let mut velocity = 300.0_f32;
        let mut y = 0.0_f32;
        let delta = 1.0 / 60.0;

        velocity += GRAVITY * delta;
        y += velocity * delta;

        let expected = (300.0 + GRAVITY * delta) * delta;
        assert!((y - expected).abs() < 1e-6);
        assert!(y > 0.0);
    }

    #[test]
    fn test_attack_timer_logic() {
        let mut timer = 0.0_f32;
        let delta = 0.1;

        for _ in 0..4 {
            timer += delta;
            assert!(timer < ATTACK_DURATION);
        }

        timer += delta;
        assert!(timer >= ATTACK_DURATION); // Замах завершён
    }
}
