use std::time::{Duration, Instant};

use crate::config::TimingConfig;

/// Frame clock: measures the delta between frames and pads short frames out
/// to the target frame budget.
pub struct Timer {
    frame_start: Instant,
    last_frame: Instant,
    frame_budget: Duration,
    max_delta: Duration,
}

impl Timer {
    pub fn new(config: &TimingConfig) -> Self {
        let now = Instant::now();
        let frame_budget = if config.target_fps == 0 {
            Duration::ZERO
        } else {
            Duration::from_secs(1) / config.target_fps
        };
        Self {
            frame_start: now,
            last_frame: now,
            frame_budget,
            max_delta: Duration::from_millis(config.max_delta_ms),
        }
    }

    /// Starts a new frame and returns the time since the previous one,
    /// clamped to the configured maximum.
    pub fn compute_delta_time(&mut self) -> Duration {
        self.frame_start = Instant::now();
        let delta = self.frame_start.duration_since(self.last_frame);
        self.last_frame = self.frame_start;
        delta.min(self.max_delta)
    }

    /// Sleeps away whatever is left of the frame budget.
    pub fn delay_time(&self) {
        let frame_time = self.frame_start.elapsed();
        if frame_time < self.frame_budget {
            std::thread::sleep(self.frame_budget - frame_time);
        }
    }

    pub fn frame_budget(&self) -> Duration {
        self.frame_budget
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delta_is_clamped_to_max() {
        let mut timer = Timer::new(&TimingConfig {
            target_fps: 60,
            max_delta_ms: 5,
        });
        std::thread::sleep(Duration::from_millis(20));
        assert_eq!(timer.compute_delta_time(), Duration::from_millis(5));
    }

    #[test]
    fn delay_pads_frame_to_budget() {
        let mut timer = Timer::new(&TimingConfig {
            target_fps: 100,
            max_delta_ms: 50,
        });
        assert_eq!(timer.frame_budget(), Duration::from_millis(10));

        timer.compute_delta_time();
        timer.delay_time();
        let delta = timer.compute_delta_time();
        assert!(delta >= Duration::from_millis(10), "delta was {delta:?}");
    }

    #[test]
    fn zero_fps_disables_pacing() {
        let timer = Timer::new(&TimingConfig {
            target_fps: 0,
            max_delta_ms: 50,
        });
        assert_eq!(timer.frame_budget(), Duration::ZERO);
    }
}
