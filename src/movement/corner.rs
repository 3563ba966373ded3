//! Movement domain: airborne ledge correction.
//!
//! Two horizontal rays are cast one collider width ahead: one from the bottom
//! edge and one `corner_correction_leniency` above it. A lower hit without an
//! upper hit is a ledge lip the actor is snapped over; two hits are a wall.
//!
//! The snap writes the position directly, so at very low approach speeds it
//! can look abrupt.

use bevy::prelude::*;

use crate::movement::{Body, MovementState, MovementTuning, RayProbe};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CornerCorrection {
    /// Snapped over a ledge by `offset`.
    Ledge { offset: Vec2 },
    /// Ran into a wall; horizontal velocity was cancelled.
    Wall,
}

impl MovementState {
    pub fn correct_corner(
        &self,
        body: &mut Body,
        tuning: &MovementTuning,
        probe: &impl RayProbe,
    ) -> Option<CornerCorrection> {
        if !tuning.use_corner_correction || self.on_ground {
            return None;
        }

        let direction = probe_direction(self.axis_x, body.velocity.x)?;

        let lower = body.position - Vec2::new(0.0, body.size.y * 0.5);
        let upper = lower + Vec2::new(0.0, tuning.corner_correction_leniency);
        let reach = body.size.x;

        let lower_hit = probe.cast(lower, direction, reach)?;

        if probe.cast(upper, direction, reach).is_some() {
            body.velocity.x = 0.0;
            return Some(CornerCorrection::Wall);
        }

        let offset = Vec2::new(direction.x * lower_hit.distance, upper.y - lower.y);
        body.velocity = Vec2::ZERO;
        body.position += offset;

        debug!("Corner correction: offset={:?}", offset);
        Some(CornerCorrection::Ledge { offset })
    }
}

/// Input direction wins over velocity; nothing to probe when both are zero.
fn probe_direction(axis_x: f32, velocity_x: f32) -> Option<Dir2> {
    let reading = if axis_x != 0.0 { axis_x } else { velocity_x };
    if reading < 0.0 {
        Some(Dir2::NEG_X)
    } else if reading > 0.0 {
        Some(Dir2::X)
    } else {
        None
    }
}
