use std::sync::Arc;
use std::time::Instant;

use chrono::{Local, NaiveDate};
use parking_lot::Mutex;

use crate::models::config::StepConfig;
use crate::models::step_data::{StepSnapshot, StepSession, StepStats};

/// Shared tracker handle for concurrent callers
pub type SharedStepTracker = Arc<Mutex<StepTracker>>;

/// Step session tracker over a cumulative pedometer counter.
///
/// Platform step counters report a monotone total since device boot; the
/// tracker turns those readings into session deltas. A reading below the
/// previous one means the counter reset (reboot, sensor switch) and rebases
/// the baseline without losing the accumulated session total. A single
/// update jumping more than the configured ceiling is rejected as a sensor
/// glitch.
pub struct StepTracker {
    config: StepConfig,
    start_time: Option<Instant>,
    last_count: Option<u64>,
    session_steps: u64,
    session: Option<StepSession>,
    daily_steps: u64,
    day: Option<NaiveDate>,
}

impl StepTracker {
    pub fn new(config: StepConfig) -> Self {
        Self {
            config,
            start_time: None,
            last_count: None,
            session_steps: 0,
            session: None,
            daily_steps: 0,
            day: None,
        }
    }

    /// Create a shared tracker handle
    pub fn shared(config: StepConfig) -> SharedStepTracker {
        Arc::new(Mutex::new(Self::new(config)))
    }

    /// Reset the session; daily totals survive
    pub fn reset(&mut self) {
        self.start_time = None;
        self.last_count = None;
        self.session_steps = 0;
        self.session = None;
    }

    /// Feed a cumulative counter reading and get updated statistics
    pub fn update(&mut self, cumulative: u64) -> StepStats {
        self.update_on_date(cumulative, Local::now().date_naive())
    }

    /// Update with an explicit calendar date (for testing the rollover)
    fn update_on_date(&mut self, cumulative: u64, today: NaiveDate) -> StepStats {
        // Daily counter rolls over at midnight
        if self.day != Some(today) {
            self.day = Some(today);
            self.daily_steps = 0;
        }

        match self.last_count {
            None => {
                // First reading becomes the session baseline
                self.last_count = Some(cumulative);
                self.start_time.get_or_insert_with(Instant::now);
                self.session = Some(StepSession::new(StepSnapshot::new(cumulative)));
            }
            Some(last) if cumulative < last => {
                // Counter reset - rebase, keep the accumulated total
                tracing::debug!(last, cumulative, "step counter reset, rebasing");
                self.last_count = Some(cumulative);
                if let Some(session) = &mut self.session {
                    session.add_snapshot(StepSnapshot::new(cumulative));
                }
            }
            Some(last) => {
                let delta = cumulative - last;

                if delta > self.config.max_delta_per_update {
                    // Sensor glitch - reject the reading
                    tracing::warn!(last, cumulative, delta, "rejecting step spike");
                } else {
                    self.session_steps += delta;
                    self.daily_steps += delta;
                    self.last_count = Some(cumulative);
                    if let Some(session) = &mut self.session {
                        session.add_snapshot(StepSnapshot::new(cumulative));
                    }
                }
            }
        }

        self.stats()
    }

    /// Derive statistics from the current session
    pub fn stats(&self) -> StepStats {
        let elapsed_seconds = self
            .start_time
            .map(|t| t.elapsed().as_secs())
            .unwrap_or(0);

        let steps_per_minute = if elapsed_seconds > 0 {
            (self.session_steps as f64 * 60.0) / elapsed_seconds as f64
        } else {
            0.0
        };

        let goal_progress = if self.config.daily_goal > 0 {
            (self.daily_steps as f64 / self.config.daily_goal as f64).min(1.0)
        } else {
            0.0
        };

        StepStats {
            session_steps: self.session_steps,
            daily_steps: self.daily_steps,
            elapsed_seconds,
            steps_per_minute,
            distance_meters: self.session_steps as f64 * self.config.stride_meters,
            calories_kcal: self.session_steps as f64 * self.config.kcal_per_step,
            goal_progress,
        }
    }

    /// Snapshot history of the current session, if one is running
    pub fn session(&self) -> Option<&StepSession> {
        self.session.as_ref()
    }
}
