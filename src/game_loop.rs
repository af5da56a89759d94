//! Fixed-timestep game loop.
//!
//! Real frame deltas are accumulated and drained in constant 1000/60 ms
//! steps, so simulation code always sees uniform increments regardless of
//! frame-rate jitter. Each frame's delta is clamped to 100 ms before it is
//! accumulated, which bounds catch-up after an OS-level stall.

use crate::constants::{FIXED_STEP_MS, MAX_FRAME_DELTA_MS};

// Tolerance so a frame that is an exact real-time multiple of the step
// (50 ms, 100 ms) is not short one tick from f64 rounding of 1000/60.
const STEP_TOLERANCE_MS: f64 = 1e-6;

/// Accumulator-based fixed-timestep driver.
///
/// The host calls [`frame`](FixedTimestepLoop::frame) once per rendered
/// frame with the real delta; the update callback runs once per logical
/// step and must not block, since it runs on every frame.
#[derive(Debug, Default)]
pub struct FixedTimestepLoop {
    accumulator_ms: f64,
    running: bool,
}

impl FixedTimestepLoop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts the loop. Idempotent; a second start does not reset anything.
    pub fn start(&mut self) {
        self.running = true;
    }

    /// Stops the loop and drops any accumulated time, so no tick fires
    /// after stop. Idempotent.
    pub fn stop(&mut self) {
        self.running = false;
        self.accumulator_ms = 0.0;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Advances the simulation by one real frame of `delta_ms`, invoking
    /// `update` once per fixed step with the step size in milliseconds.
    /// Returns the number of steps executed; zero while stopped.
    pub fn frame(&mut self, delta_ms: f64, mut update: impl FnMut(f64)) -> u32 {
        if !self.running || !delta_ms.is_finite() || delta_ms <= 0.0 {
            return 0;
        }

        self.accumulator_ms += delta_ms.min(MAX_FRAME_DELTA_MS);

        let mut steps = 0;
        while self.accumulator_ms + STEP_TOLERANCE_MS >= FIXED_STEP_MS {
            self.accumulator_ms -= FIXED_STEP_MS;
            update(FIXED_STEP_MS);
            steps += 1;
        }
        steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fifty_ms_frame_runs_three_steps() {
        let mut game_loop = FixedTimestepLoop::new();
        game_loop.start();

        let mut calls = 0;
        let steps = game_loop.frame(50.0, |_| calls += 1);

        assert_eq!(steps, 3);
        assert_eq!(calls, 3);
    }

    #[test]
    fn test_stalled_frame_is_clamped() {
        let mut game_loop = FixedTimestepLoop::new();
        game_loop.start();

        // 5 seconds of stall only counts as 100 ms: 6 steps, not 300.
        let steps = game_loop.frame(5000.0, |_| {});
        assert_eq!(steps, 6);
    }

    #[test]
    fn test_step_size_is_uniform() {
        let mut game_loop = FixedTimestepLoop::new();
        game_loop.start();

        let mut sizes = Vec::new();
        game_loop.frame(40.0, |step| sizes.push(step));

        assert!(!sizes.is_empty());
        assert!(sizes.iter().all(|&s| s == FIXED_STEP_MS));
    }

    #[test]
    fn test_remainder_carries_between_frames() {
        let mut game_loop = FixedTimestepLoop::new();
        game_loop.start();

        // 10 ms is less than one step; two more frames push it over.
        assert_eq!(game_loop.frame(10.0, |_| {}), 0);
        assert_eq!(game_loop.frame(10.0, |_| {}), 1);
    }

    #[test]
    fn test_no_steps_while_stopped() {
        let mut game_loop = FixedTimestepLoop::new();
        assert_eq!(game_loop.frame(50.0, |_| {}), 0);
    }

    #[test]
    fn test_stop_discards_accumulated_time() {
        let mut game_loop = FixedTimestepLoop::new();
        game_loop.start();
        game_loop.frame(10.0, |_| {});

        game_loop.stop();
        game_loop.start();

        // The 10 ms from before the stop must not leak into this frame.
        assert_eq!(game_loop.frame(10.0, |_| {}), 0);
    }

    #[test]
    fn test_start_stop_idempotent() {
        let mut game_loop = FixedTimestepLoop::new();
        game_loop.start();
        game_loop.start();
        assert!(game_loop.is_running());

        game_loop.stop();
        game_loop.stop();
        assert!(!game_loop.is_running());
    }

    #[test]
    fn test_no_ticks_fire_after_stop() {
        let mut game_loop = FixedTimestepLoop::new();
        game_loop.start();

        let mut calls = 0;
        game_loop.frame(100.0, |_| calls += 1);
        assert_eq!(calls, 6);

        game_loop.stop();
        game_loop.frame(100.0, |_| calls += 1);
        assert_eq!(calls, 6);
    }

    #[test]
    fn test_nonsense_deltas_are_ignored() {
        let mut game_loop = FixedTimestepLoop::new();
        game_loop.start();

        assert_eq!(game_loop.frame(f64::NAN, |_| {}), 0);
        assert_eq!(game_loop.frame(f64::INFINITY, |_| {}), 0);
        assert_eq!(game_loop.frame(-16.0, |_| {}), 0);
    }
}
