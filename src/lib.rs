//! Charge-jump controller for 2D platformers.
//!
//! Holding the jump button charges a jump whose strength grows with the
//! hold time. The crate handles ground charges, charges started in the air
//! and carried to the landing, wall charges, a short wall-bounce window
//! after each ground jump, coyote time, and a cosmetic charge bar that other
//! clients can replicate.
//!
//! The core is [`ChargeJump`](machine::ChargeJump), a plain state machine
//! that reads [`JumpSignals`](signals::JumpSignals) and writes
//! [`JumpCommands`](commands::JumpCommands). [`ChargeJumpPlugin`] wires it
//! into Bevy for any [`JumpPhysicsBackend`](backend::JumpPhysicsBackend).
//!
//! # Example
//!
//! ```rust,no_run
//! use bevy::prelude::*;
//! use msg_charge_jump::prelude::*;
//!
//! #[derive(Component, Default)]
//! struct Velocity(Vec2);
//!
//! struct MyBackend;
//!
//! impl JumpPhysicsBackend for MyBackend {
//!     type VelocityComponent = Velocity;
//!     fn plugin() -> impl Plugin {
//!         NoOpBackendPlugin
//!     }
//!     fn read_velocity(velocity: &Velocity) -> Vec2 {
//!         velocity.0
//!     }
//!     fn write_velocity(velocity: &mut Velocity, value: Vec2) {
//!         velocity.0 = value;
//!     }
//! }
//!
//! fn setup(mut commands: Commands) {
//!     let config = JumpConfig::default().with_max_charge_time(1.5);
//!     commands.spawn((Velocity::default(), ChargeJump::new(config).unwrap()));
//! }
//!
//! App::new()
//!     .add_plugins(MinimalPlugins)
//!     .add_plugins(ChargeJumpPlugin::<MyBackend>::default())
//!     .add_systems(Startup, setup)
//!     .run();
//! ```

use std::marker::PhantomData;

use bevy::prelude::*;

pub mod backend;
pub mod commands;
pub mod config;
pub mod detection;
pub mod intent;
pub mod landing;
pub mod machine;
pub mod session;
pub mod signals;
pub mod sync;
pub mod systems;
pub mod timer;

#[cfg(feature = "avian2d")]
pub mod avian;

pub mod prelude {
    pub use crate::backend::{JumpPhysicsBackend, NoOpBackendPlugin};
    pub use crate::commands::{
        ChargeIndicator, IndicatorState, JumpCommands, JumpMovementModifiers, VelocityOverride,
    };
    pub use crate::config::{
        BounceConfig, ChargeConfig, JumpConfig, JumpConfigError, MovementThrottleConfig,
        ProbeConfig, SyncConfig, WallChargeConfig,
    };
    pub use crate::detection::{JumpSensors, WallSide};
    pub use crate::intent::{CatnipBuff, JumpInput};
    pub use crate::landing::LandingOutcome;
    pub use crate::machine::{ChargeJump, JumpState};
    pub use crate::session::Facing;
    pub use crate::signals::JumpSignals;
    pub use crate::sync::{
        ChargeObserver, JumpSnapshot, JumpSnapshotPublished, JumpSnapshotReceived,
        SnapshotPublisher,
    };
    pub use crate::{ChargeJumpPlugin, ChargeJumpSet, JumpPause};

    #[cfg(feature = "avian2d")]
    pub use crate::avian::{Avian2dBackend, JumpProbe};
}

/// Phases of one jump frame, run in order in `Update`.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum ChargeJumpSet {
    /// Surface probes fill [`JumpSensors`](detection::JumpSensors).
    Sensors,
    /// Button edges are latched.
    Input,
    /// The machine steps.
    Machine,
    /// Velocity overrides and indicator state are written out.
    Apply,
    /// Snapshots are published to and applied from observers.
    Sync,
}

/// Global pause. While set, every jump machine freezes, including its clock.
#[derive(Resource, Reflect, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[reflect(Resource)]
pub struct JumpPause(pub bool);

impl JumpPause {
    pub fn is_paused(&self) -> bool {
        self.0
    }
}

/// Adds the charge-jump systems for physics backend `B`.
pub struct ChargeJumpPlugin<B: backend::JumpPhysicsBackend> {
    _marker: PhantomData<B>,
}

impl<B: backend::JumpPhysicsBackend> Default for ChargeJumpPlugin<B> {
    fn default() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<B: backend::JumpPhysicsBackend> Plugin for ChargeJumpPlugin<B> {
    fn build(&self, app: &mut App) {
        app.add_plugins(B::plugin());

        app.init_resource::<JumpPause>();
        app.add_message::<sync::JumpSnapshotPublished>();
        app.add_message::<sync::JumpSnapshotReceived>();

        app.register_type::<JumpPause>();
        app.register_type::<config::JumpConfig>();
        app.register_type::<machine::ChargeJump>();
        app.register_type::<machine::JumpState>();
        app.register_type::<intent::JumpInput>();
        app.register_type::<intent::CatnipBuff>();
        app.register_type::<detection::JumpSensors>();
        app.register_type::<commands::JumpCommands>();
        app.register_type::<commands::ChargeIndicator>();
        app.register_type::<commands::JumpMovementModifiers>();
        app.register_type::<sync::SnapshotPublisher>();
        app.register_type::<sync::ChargeObserver>();

        app.configure_sets(
            Update,
            (
                ChargeJumpSet::Sensors,
                ChargeJumpSet::Input,
                ChargeJumpSet::Machine,
                ChargeJumpSet::Apply,
                ChargeJumpSet::Sync,
            )
                .chain(),
        );

        app.add_systems(
            Update,
            (
                systems::latch_jump_input.in_set(ChargeJumpSet::Input),
                systems::tick_charge_jump::<B>.in_set(ChargeJumpSet::Machine),
                systems::apply_jump_commands::<B>.in_set(ChargeJumpSet::Apply),
                (
                    systems::publish_jump_snapshots,
                    systems::receive_jump_snapshots,
                    systems::advance_charge_observers,
                )
                    .chain()
                    .in_set(ChargeJumpSet::Sync),
            ),
        );
    }
}
