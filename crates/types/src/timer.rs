//! Countdown clock state machine
//!
//! Pure remaining-seconds arithmetic; something external delivers one
//! heartbeat per second while the clock reports itself running.

use serde::{Deserialize, Serialize};

/// Clock state
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum ClockState {
    #[serde(rename = "stopped")]
    #[default]
    Stopped,
    #[serde(rename = "running")]
    Running,
    #[serde(rename = "paused")]
    Paused,
    #[serde(rename = "finished")]
    Finished,
}

/// Countdown clock: counts a fixed duration down to zero, one second per tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountdownClock {
    duration: u64,
    remaining: u64,
    state: ClockState,
}

impl CountdownClock {
    pub fn new(duration_secs: u64) -> Self {
        Self {
            duration: duration_secs,
            remaining: duration_secs,
            state: ClockState::Stopped,
        }
    }

    pub fn state(&self) -> ClockState {
        self.state
    }

    pub fn remaining(&self) -> u64 {
        self.remaining
    }

    pub fn duration(&self) -> u64 {
        self.duration
    }

    pub fn is_running(&self) -> bool {
        self.state == ClockState::Running
    }

    /// Start from stopped or paused, pause while running. A finished clock
    /// restarts from the full duration.
    pub fn toggle(&mut self) {
        self.state = match self.state {
            ClockState::Stopped | ClockState::Paused => ClockState::Running,
            ClockState::Running => ClockState::Paused,
            ClockState::Finished => {
                self.remaining = self.duration;
                ClockState::Running
            }
        };
    }

    /// Restore the full duration and stop
    pub fn reset(&mut self) {
        self.remaining = self.duration;
        self.state = ClockState::Stopped;
    }

    /// Replace the duration; the clock resets and stops
    pub fn set_duration(&mut self, duration_secs: u64) {
        self.duration = duration_secs;
        self.reset();
    }

    /// Advance one second. Only a running clock moves; reaching zero is the
    /// terminal `Finished` state and further ticks do nothing.
    pub fn tick(&mut self) {
        if self.state != ClockState::Running {
            return;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.state = ClockState::Finished;
        }
    }

    /// Formatted `MM:SS` display string; minutes may exceed 59
    pub fn display_string(&self) -> String {
        let minutes = self.remaining / 60;
        let seconds = self.remaining % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}
