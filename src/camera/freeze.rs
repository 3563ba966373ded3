//! Camera domain: hit-stop style freeze of simulation time.
//!
//! The freeze counts down in real time, so the zero time scale it sets cannot
//! stall its own timer. It is polled once per frame and never blocks.

use std::time::Duration;

use bevy::prelude::*;

/// Longest freeze a single request can ask for, in real seconds.
pub const MAX_FREEZE_SECS: f32 = 5.0;

/// Edge reported by [`TimeFreeze::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FreezeTransition {
    /// Set the simulation time scale to zero.
    Begin,
    /// Set the simulation time scale back to 1.0.
    End,
}

#[derive(Resource, Debug, Default)]
pub struct TimeFreeze {
    /// Window still to run. `None` while idle or once cancelled.
    timer: Option<Timer>,
    /// Whether the last reported edge was `Begin`.
    frozen: bool,
}

impl TimeFreeze {
    /// Stop simulation time for `duration` real seconds, capped at
    /// [`MAX_FREEZE_SECS`]. Overlapping requests keep whichever window ends
    /// later. Non-positive durations are ignored.
    pub fn request(&mut self, duration: f32) {
        if !duration.is_finite() || duration <= 0.0 {
            return;
        }
        let duration = duration.min(MAX_FREEZE_SECS);

        let extends = self
            .timer
            .as_ref()
            .is_none_or(|timer| timer.remaining_secs() < duration);
        if extends {
            self.timer = Some(Timer::from_seconds(duration, TimerMode::Once));
        }
    }

    /// Drop the pending or running window. Time resumes on the next tick.
    pub fn cancel(&mut self) {
        self.timer = None;
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Real time left before simulation time resumes.
    pub fn remaining(&self) -> Duration {
        self.timer
            .as_ref()
            .map_or(Duration::ZERO, Timer::remaining)
    }

    /// Advance by one frame of real time. The frame that begins a freeze does
    /// not count toward it.
    pub fn tick(&mut self, real_delta: Duration) -> Option<FreezeTransition> {
        if !self.frozen {
            if self.timer.is_none() {
                return None;
            }
            self.frozen = true;
            return Some(FreezeTransition::Begin);
        }

        let running = match self.timer.as_mut() {
            Some(timer) => timer.tick(real_delta).remaining_secs() > 0.0,
            None => false,
        };
        if running {
            return None;
        }

        self.timer = None;
        self.frozen = false;
        Some(FreezeTransition::End)
    }
}
