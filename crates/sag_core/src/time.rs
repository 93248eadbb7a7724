use std::time::{Duration, Instant};

const TPS_SAMPLE_COUNT: usize = 60;

/// Fixed-rate pacing parameters for the simulation thread.
#[derive(Debug, Clone, Copy)]
pub struct TickPacing {
    /// Wall-clock budget of one tick (1/60 s by default).
    pub budget: Duration,
    /// Shortest sleep between ticks, even when a tick overran its budget.
    pub min_sleep: Duration,
}

impl Default for TickPacing {
    fn default() -> Self {
        Self {
            budget: Duration::from_micros(16_667),
            min_sleep: Duration::from_millis(5),
        }
    }
}

impl TickPacing {
    /// Time left in the budget after `elapsed` of work, floored at `min_sleep`.
    pub fn sleep_after(&self, elapsed: Duration) -> Duration {
        self.budget.saturating_sub(elapsed).max(self.min_sleep)
    }
}

/// Copyable view of the loop timing, published alongside each frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickStats {
    pub tick_count: u64,
    pub smoothed_tps: f64,
    pub smoothed_tick_time_ms: f64,
}

pub struct TimeState {
    pub pacing: TickPacing,
    pub tick_count: u64,
    tick_started: Instant,
    last_tick_start: Option<Instant>,

    interval_samples: [f64; TPS_SAMPLE_COUNT],
    work_samples: [f64; TPS_SAMPLE_COUNT],
    sample_index: usize,
    pub smoothed_tps: f64,
    pub smoothed_tick_time_ms: f64,
}

impl TimeState {
    pub fn new(pacing: TickPacing) -> Self {
        let budget_secs = pacing.budget.as_secs_f64();
        Self {
            pacing,
            tick_count: 0,
            tick_started: Instant::now(),
            last_tick_start: None,
            interval_samples: [budget_secs; TPS_SAMPLE_COUNT],
            work_samples: [0.0; TPS_SAMPLE_COUNT],
            sample_index: 0,
            smoothed_tps: if budget_secs > 0.0 {
                1.0 / budget_secs
            } else {
                0.0
            },
            smoothed_tick_time_ms: 0.0,
        }
    }

    pub fn begin_tick(&mut self) {
        let now = Instant::now();
        if let Some(last) = self.last_tick_start {
            self.interval_samples[self.sample_index] = now.duration_since(last).as_secs_f64();
        }
        self.last_tick_start = Some(now);
        self.tick_started = now;
    }

    /// Close the current tick and return how long the loop should sleep.
    pub fn end_tick(&mut self) -> Duration {
        let elapsed = self.tick_started.elapsed();
        self.tick_count += 1;

        if elapsed > self.pacing.budget {
            log::warn!(
                "Tick {} took {:.1}ms (budget {:.1}ms)",
                self.tick_count,
                elapsed.as_secs_f64() * 1000.0,
                self.pacing.budget.as_secs_f64() * 1000.0
            );
        }

        // Rate smoothing
        self.work_samples[self.sample_index] = elapsed.as_secs_f64();
        self.sample_index = (self.sample_index + 1) % TPS_SAMPLE_COUNT;
        let avg_interval: f64 =
            self.interval_samples.iter().sum::<f64>() / TPS_SAMPLE_COUNT as f64;
        let avg_work: f64 = self.work_samples.iter().sum::<f64>() / TPS_SAMPLE_COUNT as f64;
        self.smoothed_tps = if avg_interval > 0.0 {
            1.0 / avg_interval
        } else {
            0.0
        };
        self.smoothed_tick_time_ms = avg_work * 1000.0;

        self.pacing.sleep_after(elapsed)
    }

    pub fn stats(&self) -> TickStats {
        TickStats {
            tick_count: self.tick_count,
            smoothed_tps: self.smoothed_tps,
            smoothed_tick_time_ms: self.smoothed_tick_time_ms,
        }
    }
}

impl Default for TimeState {
    fn default() -> Self {
        Self::new(TickPacing::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sleep_covers_remaining_budget() {
        let pacing = TickPacing::default();
        let sleep = pacing.sleep_after(Duration::from_millis(2));
        assert_eq!(sleep, Duration::from_micros(14_667));
    }

    #[test]
    fn sleep_is_floored_when_tick_overruns() {
        let pacing = TickPacing::default();
        assert_eq!(
            pacing.sleep_after(Duration::from_millis(40)),
            Duration::from_millis(5)
        );
        // Close to the budget still leaves at least the floor.
        assert_eq!(
            pacing.sleep_after(Duration::from_millis(15)),
            Duration::from_millis(5)
        );
    }

    #[test]
    fn end_tick_counts_ticks() {
        let mut time = TimeState::default();
        for _ in 0..3 {
            time.begin_tick();
            let sleep = time.end_tick();
            assert!(sleep >= time.pacing.min_sleep);
            assert!(sleep <= time.pacing.budget);
        }
        assert_eq!(time.stats().tick_count, 3);
    }

    #[test]
    fn initial_rate_matches_budget() {
        let time = TimeState::default();
        assert!((time.smoothed_tps - 60.0).abs() < 0.01);
    }
}
