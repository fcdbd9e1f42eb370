//! Systems driving the jump machine.

use bevy::prelude::*;

use crate::JumpPause;
use crate::backend::JumpPhysicsBackend;
use crate::commands::{ChargeIndicator, JumpCommands, JumpMovementModifiers};
use crate::detection::JumpSensors;
use crate::intent::{CatnipBuff, JumpInput};
use crate::machine::ChargeJump;
use crate::signals::JumpSignals;
use crate::sync::{ChargeObserver, JumpSnapshotPublished, JumpSnapshotReceived, SnapshotPublisher};

/// Turn button writes since the last frame into this frame's edges.
pub fn latch_jump_input(mut q_inputs: Query<&mut JumpInput>) {
    for mut input in &mut q_inputs {
        input.latch_edges();
    }
}

/// Run one machine step per character.
pub fn tick_charge_jump<B: JumpPhysicsBackend>(
    time: Res<Time>,
    pause: Res<JumpPause>,
    mut q_jumpers: Query<(
        &mut ChargeJump,
        &JumpInput,
        &JumpSensors,
        &mut JumpCommands,
        &B::VelocityComponent,
        Has<CatnipBuff>,
    )>,
) {
    let dt = time.delta_secs();

    for (mut jump, input, sensors, mut commands, velocity, catnip) in &mut q_jumpers {
        let signals = JumpSignals::gather(input, sensors, B::read_velocity(velocity))
            .with_catnip(catnip)
            .with_paused(pause.is_paused());
        jump.tick(dt, &signals, &mut commands);
    }
}

/// Hand machine output to physics and presentation.
pub fn apply_jump_commands<B: JumpPhysicsBackend>(
    mut q_jumpers: Query<(
        &ChargeJump,
        &mut JumpCommands,
        &mut B::VelocityComponent,
        &mut ChargeIndicator,
        &mut JumpMovementModifiers,
    )>,
) {
    for (jump, mut commands, mut velocity, mut indicator, mut modifiers) in &mut q_jumpers {
        if let Some(request) = commands.take_impulse() {
            let current = B::read_velocity(&velocity);
            let next = request.apply_to(current);
            trace!(?current, ?next, state = ?jump.state(), "jump velocity applied");
            B::write_velocity(&mut velocity, next);
        }

        indicator.set_if_neq(ChargeIndicator::from_commands(&commands));

        let (speed, acceleration) = jump.movement_multipliers();
        modifiers.set_if_neq(JumpMovementModifiers {
            speed,
            acceleration,
        });
    }
}

/// Owners go quiet while paused; the publish interval does not advance.
pub fn publish_jump_snapshots(
    time: Res<Time>,
    pause: Res<JumpPause>,
    mut q_jumpers: Query<(Entity, &ChargeJump, &mut SnapshotPublisher)>,
    mut published: MessageWriter<JumpSnapshotPublished>,
) {
    if pause.is_paused() {
        return;
    }
    let dt = time.delta_secs();

    for (entity, jump, mut publisher) in &mut q_jumpers {
        if let Some(snapshot) = publisher.poll(jump, dt) {
            published.write(JumpSnapshotPublished { entity, snapshot });
        }
    }
}

/// Apply snapshots from the transport. Snapshots addressed to entities that
/// are not observers are ignored; the owner never reads its own echo.
pub fn receive_jump_snapshots(
    mut received: MessageReader<JumpSnapshotReceived>,
    mut q_observers: Query<&mut ChargeObserver, Without<ChargeJump>>,
) {
    for message in received.read() {
        let Ok(mut observer) = q_observers.get_mut(message.observer) else {
            trace!(observer = ?message.observer, "jump snapshot for unknown observer");
            continue;
        };
        observer.apply(&message.snapshot);
    }
}

pub fn advance_charge_observers(
    time: Res<Time>,
    mut q_observers: Query<&mut ChargeObserver, Without<ChargeJump>>,
) {
    let dt = time.delta_secs();
    for mut observer in &mut q_observers {
        observer.advance(dt);
    }
}
