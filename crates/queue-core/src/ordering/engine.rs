//! # Queue Ordering Engine
//!
//! Deterministically orders a snapshot of queue entries and derives the
//! calling patient's 1-based position or coarse status. Priority patients
//! (elderly, disabled, pregnant/nursing, autism-spectrum: a legal
//! requirement) always come before non-priority patients; within each group
//! the earliest check-in wins.
//!
//! Every operation here is a pure function of its two input snapshots: no
//! I/O, no mutation of inputs, no state between invocations. The same rule
//! backs both the full queue view and the "my position" view, so the two
//! can never disagree.
//!
//! ## Quick Start
//!
//! ```rust
//! use medfila_queue_core::ordering::QueueOrderingEngine;
//! use medfila_queue_core::types::QueuePosition;
//!
//! let engine = QueueOrderingEngine::with_defaults();
//!
//! let ordered = engine.order(&[], &[]);
//! assert!(ordered.is_empty());
//!
//! let position = engine.position_of(&"p1".into(), &[], &[]);
//! assert_eq!(position, QueuePosition::NotInQueue);
//! ```

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use crate::config::OrderingConfig;
use crate::types::{EntryStatus, Profile, ProfileId, QueueEntry, QueuePosition};

/// Queue ordering engine
///
/// Cheap to construct and to clone; holds only the ordering configuration.
#[derive(Debug, Clone)]
pub struct QueueOrderingEngine {
    config: OrderingConfig,
}

/// One row of the ordered queue, ready for display
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderedEntry {
    /// 1-based display rank
    pub rank: usize,
    /// Resolved patient name, or the configured fallback
    pub display_name: String,
    /// Resolved priority flag (false when the profile is missing)
    pub priority: bool,
    pub entry: QueueEntry,
}

/// Outcome of the call-next selection rule for a doctor
#[derive(Debug, Clone, PartialEq)]
pub enum CallNextDecision {
    /// The doctor already has a called patient; one patient at a time
    AlreadyAttending(QueueEntry),
    /// The entry at the head of the ordered waiting queue
    Next(QueueEntry),
    /// Nobody is waiting
    QueueEmpty,
}

impl QueueOrderingEngine {
    /// Create an engine with the given ordering configuration
    pub fn new(config: OrderingConfig) -> Self {
        Self { config }
    }

    /// Create an engine with the default configuration
    pub fn with_defaults() -> Self {
        Self::new(OrderingConfig::default())
    }

    /// Order a snapshot of queue entries
    ///
    /// Total order: priority descending, check-in ascending (a missing
    /// check-in counts as the epoch), entry id ascending as the final
    /// tie-break. The result is a permutation of the input; the input is
    /// not mutated. Always succeeds, including on empty input.
    pub fn order(&self, entries: &[QueueEntry], profiles: &[Profile]) -> Vec<OrderedEntry> {
        let roster = index_profiles(profiles);
        let sorted = sorted_refs(entries.iter(), &roster);

        let ordered: Vec<OrderedEntry> = sorted
            .into_iter()
            .enumerate()
            .map(|(index, entry)| OrderedEntry {
                rank: index + 1,
                display_name: self.resolve_name(&roster, &entry.profile_id),
                priority: resolve_priority(&roster, &entry.profile_id),
                entry: entry.clone(),
            })
            .collect();

        debug!(
            "📋 Ordered {} queue entries ({} priority)",
            ordered.len(),
            ordered.iter().filter(|row| row.priority).count()
        );

        ordered
    }

    /// Derive the calling patient's position or coarse status
    ///
    /// Reproduces the backend's answer exactly given the same snapshots:
    /// only `waiting` entries occupy a rank, and the rank uses the same
    /// tie-break rule as [`order`](Self::order). An absent caller or empty
    /// snapshots degrade to `NotInQueue`; nothing here errors.
    pub fn position_of(
        &self,
        caller: &ProfileId,
        entries: &[QueueEntry],
        profiles: &[Profile],
    ) -> QueuePosition {
        let Some(mine) = entries.iter().find(|e| e.profile_id == *caller) else {
            return QueuePosition::NotInQueue;
        };

        if mine.status == EntryStatus::Called {
            // Once called, rank is no longer meaningful to the patient.
            return QueuePosition::Called;
        }

        let roster = index_profiles(profiles);
        let waiting = sorted_refs(entries.iter().filter(|e| e.is_waiting()), &roster);

        match waiting.iter().position(|e| e.profile_id == *caller) {
            Some(index) => QueuePosition::Waiting { position: index + 1 },
            // Unreachable while the caller's entry is waiting, but degrade
            // rather than panic on an inconsistent snapshot.
            None => QueuePosition::NotInQueue,
        }
    }

    /// Select the next patient for a doctor
    ///
    /// A doctor serves one patient at a time: an entry already called by
    /// this doctor is returned as [`CallNextDecision::AlreadyAttending`].
    /// Otherwise the head of the ordered waiting queue is the next patient.
    /// The state transition itself (status update, doctor assignment)
    /// belongs to the backend; this is only the selection rule.
    pub fn next_for_doctor(
        &self,
        doctor_id: &ProfileId,
        entries: &[QueueEntry],
        profiles: &[Profile],
    ) -> CallNextDecision {
        if let Some(current) = entries.iter().find(|e| {
            e.status == EntryStatus::Called && e.assigned_doctor_id.as_ref() == Some(doctor_id)
        }) {
            debug!("👩‍⚕️ Doctor {} is already attending {}", doctor_id, current.id);
            return CallNextDecision::AlreadyAttending(current.clone());
        }

        let roster = index_profiles(profiles);
        let waiting = sorted_refs(entries.iter().filter(|e| e.is_waiting()), &roster);

        match waiting.first() {
            Some(next) => CallNextDecision::Next((*next).clone()),
            None => CallNextDecision::QueueEmpty,
        }
    }

    fn resolve_name(&self, roster: &Roster<'_>, profile_id: &ProfileId) -> String {
        let fallback = self.config.fallback_display_name.as_str();
        roster
            .get(profile_id)
            .map(|profile| profile.display_name(fallback))
            .unwrap_or(fallback)
            .to_string()
    }
}

type Roster<'a> = HashMap<&'a ProfileId, &'a Profile>;

fn index_profiles(profiles: &[Profile]) -> Roster<'_> {
    profiles.iter().map(|p| (&p.id, p)).collect()
}

fn resolve_priority(roster: &Roster<'_>, profile_id: &ProfileId) -> bool {
    roster.get(profile_id).map(|p| p.priority).unwrap_or(false)
}

/// Shared comparator behind both the queue view and the position view
fn sorted_refs<'a>(
    entries: impl Iterator<Item = &'a QueueEntry>,
    roster: &Roster<'_>,
) -> Vec<&'a QueueEntry> {
    let mut decorated: Vec<(bool, DateTime<Utc>, &QueueEntry)> = entries
        .map(|entry| {
            (
                resolve_priority(roster, &entry.profile_id),
                entry.checkin_or_epoch(),
                entry,
            )
        })
        .collect();

    decorated.sort_by(|a, b| {
        b.0.cmp(&a.0)
            .then_with(|| a.1.cmp(&b.1))
            .then_with(|| a.2.id.cmp(&b.2.id))
    });

    decorated.into_iter().map(|(_, _, entry)| entry).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EntryId;

    fn entry(id: &str, profile: &str, checkin: Option<&str>) -> QueueEntry {
        QueueEntry {
            id: EntryId::from(id),
            profile_id: ProfileId::from(profile),
            checkin: checkin.map(|raw| {
                DateTime::parse_from_rfc3339(raw)
                    .expect("test timestamp")
                    .with_timezone(&Utc)
            }),
            status: EntryStatus::Waiting,
            assigned_doctor_id: None,
        }
    }

    #[test]
    fn test_missing_checkin_sorts_first_within_group() {
        let entries = vec![
            entry("e1", "p1", Some("2025-05-02T09:00:00-03:00")),
            entry("e2", "p2", None),
        ];

        let engine = QueueOrderingEngine::with_defaults();
        let ordered = engine.order(&entries, &[]);

        assert_eq!(ordered[0].entry.id, EntryId::from("e2"));
        assert_eq!(ordered[1].entry.id, EntryId::from("e1"));
    }

    #[test]
    fn test_id_breaks_exact_timestamp_ties() {
        let ts = Some("2025-05-02T09:00:00-03:00");
        let forward = vec![entry("a", "p1", ts), entry("b", "p2", ts)];
        let reversed = vec![entry("b", "p2", ts), entry("a", "p1", ts)];

        let engine = QueueOrderingEngine::with_defaults();
        let ids = |rows: Vec<OrderedEntry>| {
            rows.into_iter().map(|r| r.entry.id).collect::<Vec<_>>()
        };

        assert_eq!(
            ids(engine.order(&forward, &[])),
            ids(engine.order(&reversed, &[]))
        );
    }
}
