//! Snapshot statistics for admin and doctor dashboards.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::types::{EntryStatus, Profile, QueueEntry};

/// Aggregate view of one queue snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueueStats {
    /// Entries currently waiting
    pub total_waiting: usize,
    /// Waiting entries whose profile carries the priority flag
    pub priority_waiting: usize,
    /// Entries currently in attendance
    pub called: usize,
    /// Mean wait of waiting entries, in seconds
    pub average_wait_seconds: u64,
    /// Longest wait among waiting entries, in seconds
    pub longest_wait_seconds: u64,
}

impl QueueStats {
    /// Compute statistics from a snapshot
    ///
    /// `now` is a parameter so the computation stays deterministic; callers
    /// pass `Utc::now()`. Entries without a check-in are counted but
    /// excluded from the wait aggregates, and a check-in in the future
    /// (clock skew between backend and client) counts as zero wait.
    pub fn from_snapshot(
        entries: &[QueueEntry],
        profiles: &[Profile],
        now: DateTime<Utc>,
    ) -> Self {
        let waiting: Vec<&QueueEntry> = entries.iter().filter(|e| e.is_waiting()).collect();
        let called = entries
            .iter()
            .filter(|e| e.status == EntryStatus::Called)
            .count();

        let priority_waiting = waiting
            .iter()
            .filter(|e| {
                profiles
                    .iter()
                    .find(|p| p.id == e.profile_id)
                    .map(|p| p.priority)
                    .unwrap_or(false)
            })
            .count();

        let wait_seconds: Vec<u64> = waiting
            .iter()
            .filter_map(|e| e.checkin)
            .map(|checkin| now.signed_duration_since(checkin).num_seconds().max(0) as u64)
            .collect();

        let (average_wait_seconds, longest_wait_seconds) = if wait_seconds.is_empty() {
            (0, 0)
        } else {
            let total: u64 = wait_seconds.iter().sum();
            let average = total / wait_seconds.len() as u64;
            let longest = wait_seconds.iter().max().copied().unwrap_or(0);
            (average, longest)
        };

        Self {
            total_waiting: waiting.len(),
            priority_waiting,
            called,
            average_wait_seconds,
            longest_wait_seconds,
        }
    }
}
