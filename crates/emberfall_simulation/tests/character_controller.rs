//! Integration тесты контроллера персонажа
//!
//! Headless App, один app.update() == один tick (1/60 s).
//! Проверяем переходы состояний, дугу прыжка и семантику каста.

use bevy::prelude::*;
use emberfall_simulation::*;

/// Журнал завершённых кастов (события собираем в ресурс,
/// чтобы не зависеть от двухкадрового буфера Events)
#[derive(Resource, Default)]
struct CastLog(Vec<f32>);

fn record_casts(mut events: EventReader<SpellCast>, mut log: ResMut<CastLog>) {
    for event in events.read() {
        log.0.push(event.cost);
    }
}

/// Helper: App с SimulationPlugin и журналом кастов
fn create_sim_app() -> App {
    let mut app = create_headless_app();
    app.add_plugins(SimulationPlugin)
        .init_resource::<CastLog>()
        .add_systems(FixedUpdate, record_casts);
    app
}

/// Helper: spawn персонажа с полным набором компонентов
fn spawn_character(app: &mut App, mana: Mana) -> Entity {
    app.world_mut()
        .spawn((
            Actor::new("hero"),
            CharacterState::default(),
            Health::new(100),
            mana,
            MovementSpeed::default(),
            VerticalBody::default(),
            Transform::default(),
        ))
        .id()
}

fn state_of(app: &App, entity: Entity) -> CharacterState {
    app.world().get::<CharacterState>(entity).unwrap().clone()
}

#[test]
fn test_walking_has_no_time_based_auto_exit() {
    let mut app = create_sim_app();
    let hero = spawn_character(&mut app, Mana::default());

    // D — переход в Walking
    app.world_mut().send_event(PlayerInput { code: 68 });
    app.update();
    assert_eq!(state_of(&app, hero), CharacterState::Walking);

    // 0.5 sec без ввода: Walking не истекает по времени
    for _ in 0..30 {
        app.update();
    }
    assert_eq!(state_of(&app, hero), CharacterState::Walking);

    // Код 0 («нет ввода») — возврат в Idle
    app.world_mut().send_event(PlayerInput { code: 0 });
    app.update();
    assert_eq!(state_of(&app, hero), CharacterState::Idle);
}

#[test]
fn test_jump_arc_matches_direct_integration() {
    let mut app = create_sim_app();
    let hero = spawn_character(&mut app, Mana::default());

    let dt = app
        .world()
        .resource::<Time<Fixed>>()
        .timestep()
        .as_secs_f32();

    // Space — прыжок; в том же тике система интегрирует первый шаг
    app.world_mut().send_event(PlayerInput { code: 32 });

    let mut expected_v = character::JUMP_FORCE;
    let mut expected_y = 0.0_f32;
    let mut landed_tick = None;

    for tick in 0..200 {
        app.update();

        if landed_tick.is_none() {
            // y' = y + (v + g*dt)*dt
            expected_v += character::GRAVITY * dt;
            expected_y += expected_v * dt;

            if expected_y <= 0.0 {
                expected_y = 0.0;
                landed_tick = Some(tick);
            }
        }

        let y = app.world().get::<Transform>(hero).unwrap().translation.y;
        assert!(
            (y - expected_y).abs() < 1e-3,
            "tick {}: y = {}, expected {}",
            tick,
            y,
            expected_y
        );
    }

    // Приземлились ровно один раз: grounded, скорость 0, Idle, без отскока
    assert!(landed_tick.is_some(), "за 200 тиков не приземлились");
    let body = app.world().get::<VerticalBody>(hero).unwrap();
    assert!(body.grounded);
    assert_eq!(body.velocity, 0.0);
    assert_eq!(state_of(&app, hero), CharacterState::Idle);
    assert_eq!(app.world().get::<Transform>(hero).unwrap().translation.y, 0.0);
}

#[test]
fn test_attack_auto_exits_to_idle_when_grounded() {
    let mut app = create_sim_app();
    let hero = spawn_character(&mut app, Mana::default());

    app.world_mut().send_event(PlayerInput { code: 74 });
    app.update();
    assert!(matches!(
        state_of(&app, hero),
        CharacterState::Attacking { .. }
    ));

    // Замах 0.5 sec: через 32 тика точно завершился
    for _ in 0..32 {
        app.update();
    }
    assert_eq!(state_of(&app, hero), CharacterState::Idle);
}

#[test]
fn test_airborne_attack_auto_exits_to_jumping() {
    let mut app = create_sim_app();
    let hero = spawn_character(&mut app, Mana::default());

    // Прыжок, затем атака в воздухе
    app.world_mut().send_event(PlayerInput { code: 32 });
    app.update();
    app.world_mut().send_event(PlayerInput { code: 74 });
    app.update();
    assert!(matches!(
        state_of(&app, hero),
        CharacterState::Attacking { .. }
    ));

    for _ in 0..32 {
        app.update();
    }

    // В воздухе атака выходит в Jumping, не в Idle
    assert_eq!(state_of(&app, hero), CharacterState::Jumping);
    assert!(!app.world().get::<VerticalBody>(hero).unwrap().grounded);
}

#[test]
fn test_attack_ignores_input_until_done() {
    let mut app = create_sim_app();
    let hero = spawn_character(&mut app, Mana::default());

    app.world_mut().send_event(PlayerInput { code: 74 });
    app.update();

    // Движение и прыжок во время замаха игнорируются
    app.world_mut().send_event(PlayerInput { code: 68 });
    app.update();
    app.world_mut().send_event(PlayerInput { code: 32 });
    app.update();

    assert!(matches!(
        state_of(&app, hero),
        CharacterState::Attacking { .. }
    ));
    assert_eq!(app.world().get::<Transform>(hero).unwrap().translation.x, 0.0);
}

#[test]
fn test_cast_interrupted_by_movement_keeps_mana() {
    let mut app = create_sim_app();
    let hero = spawn_character(&mut app, Mana::default());

    app.world_mut().send_event(PlayerInput { code: 75 });
    app.update();
    assert!(matches!(
        state_of(&app, hero),
        CharacterState::Casting { .. }
    ));

    for _ in 0..10 {
        app.update();
    }

    // Движение прерывает каст: мана не списана, события нет
    app.world_mut().send_event(PlayerInput { code: 68 });
    app.update();
    app.update();

    assert_eq!(state_of(&app, hero), CharacterState::Walking);
    assert_eq!(app.world().get::<Mana>(hero).unwrap().current, 50.0);
    assert!(app.world().resource::<CastLog>().0.is_empty());
}

#[test]
fn test_cast_completion_consumes_mana_once() {
    let mut app = create_sim_app();
    let hero = spawn_character(&mut app, Mana::default());

    app.world_mut().send_event(PlayerInput { code: 75 });

    // Каст 1.0 sec: на 60-м тике завершается и списывает ману
    for _ in 0..62 {
        app.update();
    }

    assert_eq!(state_of(&app, hero), CharacterState::Idle);

    let mana = app.world().get::<Mana>(hero).unwrap();
    assert!(
        mana.current >= 40.0 && mana.current < 41.0,
        "mana = {} (ожидали 40 + пара тиков регена)",
        mana.current
    );

    assert_eq!(app.world().resource::<CastLog>().0.as_slice(), &[10.0]);
}

#[test]
fn test_cast_with_insufficient_mana_is_rejected() {
    let mut app = create_sim_app();
    let hero = spawn_character(
        &mut app,
        Mana {
            current: 5.0,
            max: 50.0,
            regen_rate: 5.0,
        },
    );

    app.world_mut().send_event(PlayerInput { code: 75 });
    app.update();

    // Каст не начался, мана не тронута (только Idle-реген)
    assert_eq!(state_of(&app, hero), CharacterState::Idle);
    let mana = app.world().get::<Mana>(hero).unwrap();
    assert!(mana.current >= 5.0 && mana.current < 5.2);
    assert!(app.world().resource::<CastLog>().0.is_empty());
}

#[test]
fn test_unrecognized_input_changes_nothing() {
    // Контрольный прогон без ввода против прогона с мусорными кодами:
    // миры должны совпасть бит-в-бит
    let run = |codes: &[i32]| -> Vec<u8> {
        let mut app = create_sim_app();
        spawn_character(&mut app, Mana::default());

        for tick in 0..10 {
            if tick == 3 {
                for &code in codes {
                    app.world_mut().send_event(PlayerInput { code });
                }
            }
            app.update();
        }

        let world = app.world_mut();
        let mut snapshot = world_snapshot::<CharacterState>(world);
        snapshot.extend(world_snapshot::<Transform>(world));
        snapshot.extend(world_snapshot::<Mana>(world));
        snapshot.extend(world_snapshot::<MovementSpeed>(world));
        snapshot
    };

    let clean = run(&[]);
    let garbage = run(&[99, -1, 13, 255]);

    assert_eq!(clean, garbage, "мусорные коды изменили состояние мира");
}
