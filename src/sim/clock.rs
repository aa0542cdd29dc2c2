//! Effective elapsed play time
//!
//! Wall-clock time since the run started, minus every interval spent paused.
//! Timestamps are host milliseconds (`performance.now()` / rAF time).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ElapsedClock {
    pub game_start_time: f64,
    pub total_paused_time: f64,
    pub pause_start_time: Option<f64>,
}

impl ElapsedClock {
    /// Reset for a new run starting at `now`
    pub fn start(&mut self, now: f64) {
        self.game_start_time = now;
        self.total_paused_time = 0.0;
        self.pause_start_time = None;
    }

    pub fn is_paused(&self) -> bool {
        self.pause_start_time.is_some()
    }

    /// Begin a pause interval. Ignored if already paused.
    pub fn pause(&mut self, now: f64) {
        if self.pause_start_time.is_none() {
            self.pause_start_time = Some(now);
        }
    }

    /// Close the current pause interval. Ignored if not paused.
    pub fn resume(&mut self, now: f64) {
        if let Some(start) = self.pause_start_time.take() {
            self.total_paused_time += (now - start).max(0.0);
        }
    }

    /// Effective elapsed seconds. Frozen while paused.
    pub fn elapsed_secs(&self, now: f64) -> f64 {
        let now = self.pause_start_time.unwrap_or(now);
        ((now - self.game_start_time - self.total_paused_time) / 1000.0).max(0.0)
    }
}
