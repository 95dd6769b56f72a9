use std::time::{Duration, Instant};

/// Fixed-timestep accumulator.
///
/// Each presented frame adds the elapsed wall time to the accumulator and
/// pays out whole step intervals. Time is kept in `Duration` so the number
/// of steps paid out for a given delta is exact.
#[derive(Clone, Debug)]
pub struct StepScheduler {
    step_interval: Duration,
    accumulator: Duration,
    last_frame: Option<Instant>,
}

impl StepScheduler {
    /// `step_interval` must be non-zero, see `SimulationConfig::step_interval`
    pub fn new(step_interval: Duration) -> Self {
        Self {
            step_interval,
            accumulator: Duration::ZERO,
            last_frame: None,
        }
    }

    pub fn target_steps_per_second(&self) -> f64 {
        1.0 / self.step_interval.as_secs_f64()
    }

    pub fn step_interval(&self) -> Duration {
        self.step_interval
    }

    pub fn accumulator(&self) -> Duration {
        self.accumulator
    }

    /// Forget the previous frame time; the next frame contributes no delta
    pub fn reset_timestamp(&mut self) {
        self.last_frame = None;
    }

    /// Record a frame at `now` and return how many whole steps are due.
    /// Paused frames still advance the timestamp but never accumulate.
    pub fn due_steps(&mut self, now: Instant, running: bool) -> u32 {
        let delta = self
            .last_frame
            .map_or(Duration::ZERO, |last| now.saturating_duration_since(last));
        self.last_frame = Some(now);

        if !running {
            return 0;
        }

        self.accumulator += delta;
        if self.step_interval.is_zero() {
            return 0;
        }
        let mut steps = 0;
        while self.accumulator >= self.step_interval {
            self.accumulator -= self.step_interval;
            steps += 1;
        }
        steps
    }
}
