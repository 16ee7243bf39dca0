// Focus-session countdown clock.
//
// A small three-state timer (idle → focus → break → idle) stepped once per
// real-world second by the caller, independently of the day tick. It is only
// meaningful in focus and creative modes. The economy engine reads a copy of
// the clock (`FocusClock` is `Copy`) as its snapshot of "is the player
// focusing, and for how long".
//
// Completing a focus session (the countdown reaching its last second in
// `Focus`) yields `FocusTransition::SessionComplete`; `sim.rs` turns that into
// the completion bonus and a notification.

use crate::config::FocusParams;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FocusMode {
    Idle,
    Focus,
    Break,
}

/// What one clock step did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FocusTransition {
    None,
    /// A focus session ran out; the clock is now on break.
    SessionComplete,
    /// A break ran out; the clock is idle again.
    BreakOver,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FocusClock {
    pub mode: FocusMode,
    pub seconds_left: u32,
}

impl FocusClock {
    pub fn new(params: &FocusParams) -> Self {
        Self {
            mode: FocusMode::Idle,
            seconds_left: params.focus_seconds,
        }
    }

    pub fn is_focusing(&self) -> bool {
        self.mode == FocusMode::Focus
    }

    /// Seconds into the current focus session.
    pub fn elapsed(&self, params: &FocusParams) -> u32 {
        params.focus_seconds.saturating_sub(self.seconds_left)
    }

    /// Start a session from idle; any running session or break goes idle.
    pub fn toggle(&mut self, params: &FocusParams) {
        self.mode = match self.mode {
            FocusMode::Idle => FocusMode::Focus,
            FocusMode::Focus | FocusMode::Break => FocusMode::Idle,
        };
        self.seconds_left = params.focus_seconds;
    }

    pub fn reset(&mut self, params: &FocusParams) {
        *self = Self::new(params);
    }

    /// Advance by one second.
    pub fn tick_second(&mut self, params: &FocusParams) -> FocusTransition {
        match self.mode {
            FocusMode::Idle => FocusTransition::None,
            _ if self.seconds_left > 1 => {
                self.seconds_left -= 1;
                FocusTransition::None
            }
            FocusMode::Focus => {
                self.mode = FocusMode::Break;
                self.seconds_left = params.break_seconds;
                FocusTransition::SessionComplete
            }
            FocusMode::Break => {
                self.mode = FocusMode::Idle;
                self.seconds_left = params.focus_seconds;
                FocusTransition::BreakOver
            }
        }
    }
}
