//! Fixed-rate tick scheduling
//!
//! The display calls in once per frame; the driver decides how many 60 Hz
//! ticks are due. While suspended it reports none and drops any backlog, so a
//! resume never replays the time spent paused.

use crate::consts::{MAX_FRAME_MS, MAX_SUBSTEPS, TICK_MS};

/// Slack for timestamps that land a hair short of a tick boundary
const TICK_EPSILON_MS: f64 = 1e-6;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoopDriver {
    running: bool,
    accumulator: f64,
    last_time: Option<f64>,
}

impl LoopDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Start scheduling ticks from `now`
    pub fn resume(&mut self, now: f64) {
        self.running = true;
        self.accumulator = 0.0;
        self.last_time = Some(now);
    }

    /// Stop scheduling ticks. Safe to call when already suspended.
    pub fn suspend(&mut self) {
        self.running = false;
        self.accumulator = 0.0;
        self.last_time = None;
    }

    /// Number of ticks to run for a frame at `now`
    pub fn frame(&mut self, now: f64) -> u32 {
        if !self.running {
            return 0;
        }

        let dt = match self.last_time {
            Some(last) => (now - last).clamp(0.0, MAX_FRAME_MS),
            None => TICK_MS,
        };
        self.last_time = Some(now);
        self.accumulator += dt;

        let mut ticks = 0;
        while self.accumulator + TICK_EPSILON_MS >= TICK_MS && ticks < MAX_SUBSTEPS {
            self.accumulator -= TICK_MS;
            ticks += 1;
        }
        if ticks == MAX_SUBSTEPS {
            // Too far behind; drop the rest rather than spiral
            self.accumulator = self.accumulator.min(TICK_MS);
        }
        ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suspended_runs_nothing() {
        let mut driver = LoopDriver::new();
        assert_eq!(driver.frame(0.0), 0);
        assert_eq!(driver.frame(1000.0), 0);
    }

    #[test]
    fn test_one_tick_per_display_frame() {
        let mut driver = LoopDriver::new();
        driver.resume(0.0);
        let mut total = 0;
        for i in 1..=60 {
            total += driver.frame(i as f64 * TICK_MS);
        }
        assert_eq!(total, 60);
    }

    #[test]
    fn test_high_refresh_accumulates() {
        let mut driver = LoopDriver::new();
        driver.resume(0.0);
        // 120 Hz display: a tick every other frame
        let ticks: Vec<u32> = (1..=4).map(|i| driver.frame(i as f64 * TICK_MS / 2.0)).collect();
        assert_eq!(ticks.iter().sum::<u32>(), 2);
    }

    #[test]
    fn test_long_stall_is_capped() {
        let mut driver = LoopDriver::new();
        driver.resume(0.0);
        assert_eq!(driver.frame(5000.0), MAX_SUBSTEPS);
        // Backlog dropped
        assert!(driver.frame(5000.0 + TICK_MS) <= 2);
    }

    #[test]
    fn test_resume_discards_paused_time() {
        let mut driver = LoopDriver::new();
        driver.resume(0.0);
        driver.frame(TICK_MS);
        driver.suspend();
        assert_eq!(driver.frame(10_000.0), 0);

        driver.resume(20_000.0);
        assert_eq!(driver.frame(20_000.0), 0);
        assert_eq!(driver.frame(20_000.0 + TICK_MS), 1);
    }
}
