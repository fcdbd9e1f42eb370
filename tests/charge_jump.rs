//! Integration tests for the charge-jump plugin.
//!
//! These run the full system chain in a headless app against a minimal
//! velocity backend, with a fixed frame time so charge durations are exact.

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use msg_charge_jump::prelude::*;

/// Frame time. A power of two keeps accumulated clock values exact.
const DT: f32 = 0.0625;

#[derive(Component, Default)]
struct Velocity(Vec2);

struct TestBackend;

impl JumpPhysicsBackend for TestBackend {
    type VelocityComponent = Velocity;

    fn plugin() -> impl Plugin {
        NoOpBackendPlugin
    }

    fn read_velocity(velocity: &Velocity) -> Vec2 {
        velocity.0
    }

    fn write_velocity(velocity: &mut Velocity, value: Vec2) {
        velocity.0 = value;
    }
}

fn create_test_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f32(DT)));
    app.add_plugins(ChargeJumpPlugin::<TestBackend>::default());
    app.finish();
    app.cleanup();
    // The first update only initializes time.
    app.update();
    app
}

fn spawn_character(app: &mut App, config: JumpConfig, sensors: JumpSensors) -> Entity {
    app.world_mut()
        .spawn((
            Velocity::default(),
            ChargeJump::new(config).expect("valid config"),
            sensors,
        ))
        .id()
}

fn run_frames(app: &mut App, frames: usize) {
    for _ in 0..frames {
        app.update();
    }
}

fn input(app: &mut App, entity: Entity) -> Mut<'_, JumpInput> {
    app.world_mut().get_mut::<JumpInput>(entity).unwrap()
}

fn set_sensors(app: &mut App, entity: Entity, sensors: JumpSensors) {
    *app.world_mut().get_mut::<JumpSensors>(entity).unwrap() = sensors;
}

fn press(app: &mut App, entity: Entity) {
    input(app, entity).press();
    app.update();
}

fn release(app: &mut App, entity: Entity) {
    input(app, entity).release();
    app.update();
}

fn jump(app: &App, entity: Entity) -> &ChargeJump {
    app.world().get::<ChargeJump>(entity).unwrap()
}

fn velocity(app: &App, entity: Entity) -> Vec2 {
    app.world().get::<Velocity>(entity).unwrap().0
}

// ==================== Ground Charge ====================

mod ground_charge {
    use super::*;

    #[test]
    fn quarter_charge_produces_interpolated_impulse() {
        let mut app = create_test_app();
        let character = spawn_character(&mut app, JumpConfig::default(), JumpSensors::grounded());

        press(&mut app, character);
        assert_eq!(jump(&app, character).state(), JumpState::Charging);

        // Seven held frames plus the release frame: 0.5s of a 2s charge.
        run_frames(&mut app, 7);
        release(&mut app, character);

        let v = velocity(&app, character);
        assert!((v.y - 9.875).abs() < 1e-3, "vy = {}", v.y);
        assert_eq!(v.x, 0.0);
        assert_eq!(jump(&app, character).state(), JumpState::Bouncing);
    }

    #[test]
    fn catnip_buff_multiplies_force() {
        let mut app = create_test_app();
        let character = spawn_character(&mut app, JumpConfig::default(), JumpSensors::grounded());
        app.world_mut().entity_mut(character).insert(CatnipBuff);

        press(&mut app, character);
        release(&mut app, character);

        let expected = (8.5 + 5.5 * (DT / 2.0)) * 1.25;
        let v = velocity(&app, character);
        assert!((v.y - expected).abs() < 1e-3, "vy = {}", v.y);
    }

    #[test]
    fn walking_off_edge_fires_immediately() {
        let mut app = create_test_app();
        let character = spawn_character(&mut app, JumpConfig::default(), JumpSensors::grounded());

        press(&mut app, character);
        run_frames(&mut app, 3);
        set_sensors(&mut app, character, JumpSensors::airborne());
        app.update();

        assert_eq!(jump(&app, character).state(), JumpState::Bouncing);
        assert!(velocity(&app, character).y >= 8.5);
    }

    #[test]
    fn charging_publishes_indicator_and_throttle() {
        let mut app = create_test_app();
        let character = spawn_character(&mut app, JumpConfig::default(), JumpSensors::grounded());

        press(&mut app, character);
        run_frames(&mut app, 3);

        let indicator = app.world().get::<ChargeIndicator>(character).unwrap();
        assert!(indicator.active);
        assert!((indicator.progress - 3.0 * DT / 2.0).abs() < 1e-4);
        assert!(!indicator.fully_charged);

        let modifiers = app.world().get::<JumpMovementModifiers>(character).unwrap();
        assert_eq!(modifiers.speed, 0.5);
        assert_eq!(modifiers.acceleration, 0.5);

        release(&mut app, character);
        let indicator = app.world().get::<ChargeIndicator>(character).unwrap();
        assert!(!indicator.active);
        let modifiers = app.world().get::<JumpMovementModifiers>(character).unwrap();
        assert_eq!(modifiers.speed, 1.0);
    }
}

// ==================== Air Charge ====================

mod air_charge {
    use super::*;

    #[test]
    fn landing_with_button_held_keeps_charging() {
        let mut app = create_test_app();
        let character = spawn_character(&mut app, JumpConfig::default(), JumpSensors::airborne());

        press(&mut app, character);
        assert_eq!(jump(&app, character).state(), JumpState::Buffered);
        run_frames(&mut app, 4);
        let charged = jump(&app, character).charge_time();

        set_sensors(&mut app, character, JumpSensors::grounded());
        app.update();

        assert_eq!(jump(&app, character).state(), JumpState::Charging);
        assert_eq!(velocity(&app, character), Vec2::ZERO);
        assert!(jump(&app, character).charge_time() > charged);
    }

    #[test]
    fn air_release_fires_on_landing() {
        let mut app = create_test_app();
        let character = spawn_character(&mut app, JumpConfig::default(), JumpSensors::airborne());

        press(&mut app, character);
        run_frames(&mut app, 7);
        release(&mut app, character);

        assert_eq!(jump(&app, character).state(), JumpState::Idle);
        assert!(app.world().get::<ChargeIndicator>(character).unwrap().queued);
        assert_eq!(velocity(&app, character), Vec2::ZERO);

        run_frames(&mut app, 5);
        set_sensors(&mut app, character, JumpSensors::grounded());
        app.update();

        let v = velocity(&app, character);
        assert!((v.y - 9.875).abs() < 1e-3, "vy = {}", v.y);
        assert!(!app.world().get::<ChargeIndicator>(character).unwrap().queued);
    }
}

// ==================== Wall Charge ====================

mod wall_charge {
    use super::*;

    #[test]
    fn full_wall_charge_pushing_away_detaches() {
        let mut app = create_test_app();
        let character = spawn_character(
            &mut app,
            JumpConfig::default(),
            JumpSensors::on_wall(WallSide::Left, 0.5),
        );

        press(&mut app, character);
        assert_eq!(jump(&app, character).state(), JumpState::WallCharging);
        run_frames(&mut app, 16);
        // Wall charges never fire on their own.
        assert_eq!(jump(&app, character).state(), JumpState::WallCharging);

        input(&mut app, character).set_axis(1.0);
        release(&mut app, character);

        let v = velocity(&app, character);
        assert!((v.x - 6.0).abs() < 1e-4, "vx = {}", v.x);
        assert!((v.y - 12.0).abs() < 1e-4, "vy = {}", v.y);
        assert_eq!(jump(&app, character).state(), JumpState::Idle);
    }

    #[test]
    fn short_contact_starts_air_charge() {
        let mut app = create_test_app();
        let character = spawn_character(
            &mut app,
            JumpConfig::default(),
            JumpSensors::on_wall(WallSide::Right, 0.01),
        );

        press(&mut app, character);
        assert_eq!(jump(&app, character).state(), JumpState::Buffered);
    }
}

// ==================== Pause ====================

mod pause {
    use super::*;

    #[test]
    fn pause_freezes_charge() {
        let mut app = create_test_app();
        let character = spawn_character(&mut app, JumpConfig::default(), JumpSensors::grounded());

        press(&mut app, character);
        run_frames(&mut app, 3);
        let charged = jump(&app, character).charge_time();

        app.world_mut().resource_mut::<JumpPause>().0 = true;
        run_frames(&mut app, 60);

        assert_eq!(jump(&app, character).state(), JumpState::Charging);
        assert_eq!(jump(&app, character).charge_time(), charged);

        app.world_mut().resource_mut::<JumpPause>().0 = false;
        app.update();
        assert!((jump(&app, character).charge_time() - (charged + DT)).abs() < 1e-5);
    }
}
