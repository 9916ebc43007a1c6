//! Headless демо EMBERFALL
//!
//! Сценарий: персонаж под скриптованным вводом (ходьба → прыжок →
//! атака → каст → стоп), отряд AI врагов нацелен на игрока;
//! периодический урон прогоняет отряд через пороги Defend / Flee.

use bevy::prelude::*;
use emberfall_simulation::{
    create_headless_app, init_logger, log_info, AIBehavior, AIConfig, AITarget, Actor,
    CharacterState, Health, Mana, MovementSpeed, PatrolRoute, PlayerInput, SimulationPlugin,
    StrategySelector, VerticalBody,
};

fn main() {
    init_logger();

    let mut app = create_headless_app();
    app.add_plugins(SimulationPlugin);

    // Игрок: контроллер состояний + ресурсы
    let player = app
        .world_mut()
        .spawn((
            Actor::new("hero"),
            CharacterState::default(),
            Health::new(100),
            Mana::default(),
            MovementSpeed::default(),
            VerticalBody::default(),
            Transform::default(),
        ))
        .id();

    // Отряд врагов вдоль оси X (шаг 50)
    let mut raiders = Vec::new();
    for i in 0..3 {
        let raider = app
            .world_mut()
            .spawn((
                Actor::new(format!("raider-{}", i + 1)),
                AIBehavior::default(),
                StrategySelector::default(),
                AIConfig::default(),
                AITarget::default(),
                PatrolRoute::default(),
                Health::new(100),
                MovementSpeed::new(50.0),
                Transform::from_xyz(i as f32 * 50.0, 0.0, 0.0),
            ))
            .id();
        raiders.push(raider);
    }

    log_info("simulation start: 1 hero, 3 raiders");

    // Скрипт ввода: (tick, key code)
    let script = [
        (10, 68),  // D — ходьба вправо
        (20, 68),  // D — ещё шаг
        (30, 32),  // Space — прыжок
        (90, 74),  // J — атака
        (150, 75), // K — каст
        (260, 0),  // нет ввода — обратно в Idle
    ];

    for tick in 0..600u32 {
        for (at, code) in script {
            if tick == at {
                app.world_mut().send_event(PlayerInput { code });
            }
        }

        // С tick 60 враги целятся в позицию игрока
        if tick == 60 {
            let hero_pos = app.world().get::<Transform>(player).map(|t| t.translation);
            if let Some(pos) = hero_pos {
                for &raider in &raiders {
                    if let Some(mut target) = app.world_mut().get_mut::<AITarget>(raider) {
                        target.set(pos);
                    }
                }
            }
        }

        // Периодический урон: здоровье отряда сползает через пороги поведения
        if tick > 0 && tick % 120 == 0 {
            for &raider in &raiders {
                if let Some(mut health) = app.world_mut().get_mut::<Health>(raider) {
                    health.take_damage(20);
                }
            }
        }

        app.update();

        if tick % 60 == 0 {
            print_status(&app, player, &raiders, tick);
        }
    }

    log_info("simulation complete");
}

fn print_status(app: &App, player: Entity, raiders: &[Entity], tick: u32) {
    let world = app.world();

    if let (Some(actor), Some(state), Some(mana)) = (
        world.get::<Actor>(player),
        world.get::<CharacterState>(player),
        world.get::<Mana>(player),
    ) {
        println!(
            "tick {:3}: {} state={} mana={:.0}",
            tick,
            actor.name,
            state.name(),
            mana.current
        );
    }

    for &raider in raiders {
        if let (Some(actor), Some(behavior), Some(health)) = (
            world.get::<Actor>(raider),
            world.get::<AIBehavior>(raider),
            world.get::<Health>(raider),
        ) {
            println!(
                "          {} behavior={} hp={}/{}",
                actor.name,
                behavior.name(),
                health.current,
                health.max
            );
        }
    }
}
