use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Single reading of the cumulative step counter at a specific time
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StepSnapshot {
    pub timestamp: u64, // Unix timestamp in seconds
    pub steps: u64,     // Cumulative counter value as reported by the sensor
}

impl StepSnapshot {
    /// Create a new snapshot with current timestamp
    pub fn new(steps: u64) -> Self {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);

        Self { timestamp, steps }
    }

    /// Create snapshot with custom timestamp (for testing)
    pub fn with_timestamp(timestamp: u64, steps: u64) -> Self {
        Self { timestamp, steps }
    }
}

/// Step tracking session data
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StepSession {
    pub start_snapshot: StepSnapshot,
    pub current_snapshot: Option<StepSnapshot>,
    pub snapshots: Vec<StepSnapshot>,
}

impl StepSession {
    /// Create a new session with starting snapshot
    pub fn new(start_snapshot: StepSnapshot) -> Self {
        Self {
            start_snapshot: start_snapshot.clone(),
            current_snapshot: Some(start_snapshot.clone()),
            snapshots: vec![start_snapshot],
        }
    }

    /// Add a new snapshot to the session
    pub fn add_snapshot(&mut self, snapshot: StepSnapshot) {
        self.current_snapshot = Some(snapshot.clone());
        self.snapshots.push(snapshot);
    }

    /// Get elapsed time in seconds
    pub fn elapsed_seconds(&self) -> u64 {
        if let Some(current) = &self.current_snapshot {
            current.timestamp.saturating_sub(self.start_snapshot.timestamp)
        } else {
            0
        }
    }

    /// Get total snapshots count
    pub fn snapshot_count(&self) -> usize {
        self.snapshots.len()
    }
}

/// Statistics derived from a step tracking session
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StepStats {
    pub session_steps: u64,
    pub daily_steps: u64,
    pub elapsed_seconds: u64,
    pub steps_per_minute: f64,
    pub distance_meters: f64,
    pub calories_kcal: f64,
    /// Fraction of the daily goal reached, clamped to 1.0
    pub goal_progress: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_elapsed_seconds() {
        let mut session = StepSession::new(StepSnapshot::with_timestamp(1_000, 500));
        session.add_snapshot(StepSnapshot::with_timestamp(1_060, 620));

        assert_eq!(session.elapsed_seconds(), 60);
        assert_eq!(session.snapshot_count(), 2);
    }

    #[test]
    fn test_session_tracks_current_snapshot() {
        let mut session = StepSession::new(StepSnapshot::with_timestamp(1_000, 500));
        session.add_snapshot(StepSnapshot::with_timestamp(1_030, 560));

        let current = session.current_snapshot.as_ref().unwrap();
        assert_eq!(current.steps, 560);
        assert_eq!(current.timestamp, 1_030);
    }

    #[test]
    fn test_elapsed_never_negative_on_clock_skew() {
        let mut session = StepSession::new(StepSnapshot::with_timestamp(2_000, 500));
        session.add_snapshot(StepSnapshot::with_timestamp(1_900, 510));

        assert_eq!(session.elapsed_seconds(), 0);
    }
}
