//! Movement domain: platformer locomotion plugin wiring and public exports.
//!
//! The core is a set of methods on [`MovementState`] that take the actor's
//! [`Body`], the frame's [`MovementInput`] and a [`RayProbe`]; the systems in
//! `systems` only copy avian2d components in and out.

mod bootstrap;
mod classify;
mod components;
mod corner;
mod dev;
mod events;
mod frame;
mod horizontal;
mod jump;
mod probe;
mod resources;
mod systems;


pub use components::{Facing, GameLayer, Ground, MovementState, Player, PlayerState, Wall};
pub use corner::CornerCorrection;
pub use events::PlayerStateChanged;
pub use frame::{Body, gravity_scale_for};
pub use jump::JumpKind;
pub use probe::{GROUND_PROBE_MARGIN, RayHit, RayProbe, WorldProbe};
pub use resources::{FlipMode, MovementInput, MovementTuning};

use bevy::prelude::*;

use crate::core::{FrameSet, load_config_or_default};
use crate::movement::bootstrap::spawn_player;
use crate::movement::dev::spawn_test_room;
use crate::movement::systems::{
    apply_friction, drive_player_frame, publish_player_state, read_input,
};

pub struct MovementPlugin;

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        let tuning = load_config_or_default::<MovementTuning>("movement.ron").sanitized();

        app.insert_resource(tuning)
            .init_resource::<MovementInput>()
            .add_message::<PlayerStateChanged>()
            .add_systems(Startup, (spawn_test_room, spawn_player))
            .add_systems(Update, read_input.in_set(FrameSet::Input))
            .add_systems(Update, drive_player_frame.in_set(FrameSet::Movement))
            .add_systems(FixedUpdate, apply_friction)
            .add_systems(PostUpdate, publish_player_state);
    }
}
