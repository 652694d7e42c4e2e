use std::fmt;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Opaque identifier of a queue entry
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntryId(pub String);

impl EntryId {
    /// Generate a fresh entry id
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for EntryId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Opaque identifier of a profile
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProfileId(pub String);

impl ProfileId {
    /// Generate a fresh profile id
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl fmt::Display for ProfileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ProfileId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Status of a non-terminal queue entry
///
/// Terminal entries (attendance finished, cancelled) are removed from the
/// snapshot by the backend and never reach this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryStatus {
    /// Checked in, waiting to be called
    #[default]
    Waiting,
    /// Called by a doctor; the backend persists this state as
    /// `"being_attended"`
    #[serde(alias = "being_attended")]
    Called,
}

/// A patient's place in the attendance queue at one point in time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueueEntry {
    pub id: EntryId,

    /// The patient this entry belongs to (no ownership implied)
    pub profile_id: ProfileId,

    /// Check-in timestamp; blank or unparsable values become `None` and
    /// sort as the Unix epoch
    #[serde(default, deserialize_with = "lenient_datetime")]
    pub checkin: Option<DateTime<Utc>>,

    #[serde(default)]
    pub status: EntryStatus,

    /// Doctor handling this entry; present only once called
    #[serde(default)]
    pub assigned_doctor_id: Option<ProfileId>,
}

impl QueueEntry {
    /// Effective check-in instant for ordering purposes
    pub fn checkin_or_epoch(&self) -> DateTime<Utc> {
        self.checkin.unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
    }

    /// Whether this entry still occupies a rank in the waiting queue
    pub fn is_waiting(&self) -> bool {
        self.status == EntryStatus::Waiting
    }
}

/// Profile role as stored by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    #[default]
    Patient,
    Doctor,
    Admin,
}

// Unknown role strings and nulls fall back to Patient rather than failing
// a whole snapshot.
impl<'de> Deserialize<'de> for Role {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(match raw.as_deref() {
            Some("doctor") => Role::Doctor,
            Some("admin") => Role::Admin,
            _ => Role::Patient,
        })
    }
}

/// The subset of a profile the queue core consumes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: ProfileId,

    #[serde(default)]
    pub full_name: Option<String>,

    /// Legally-mandated priority attendance flag
    #[serde(default)]
    pub priority: bool,

    #[serde(default)]
    pub role: Role,

    /// CPF, when the backend sent one; see [`crate::validation`]
    #[serde(default)]
    pub document_number: Option<String>,
}

impl Profile {
    /// Display name, falling back when the backend sent none
    pub fn display_name<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.full_name.as_deref().unwrap_or(fallback)
    }

    /// Whether the profile carries a structurally valid CPF
    pub fn has_valid_document(&self) -> bool {
        self.document_number
            .as_deref()
            .is_some_and(crate::validation::is_valid_cpf)
    }
}

/// Coarse queue status exposed to the calling patient
///
/// Serializes to the backend's `my-position` payload shape:
/// `{"status":"not_in_queue"}`, `{"status":"waiting","position":N}` or
/// `{"status":"called"}` (no position once called).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum QueuePosition {
    NotInQueue,
    Waiting { position: usize },
    Called,
}

impl QueuePosition {
    /// 1-based position, when one is disclosed
    pub fn position(&self) -> Option<usize> {
        match self {
            Self::Waiting { position } => Some(*position),
            _ => None,
        }
    }
}

/// The current user, passed explicitly to whatever needs it
///
/// There is deliberately no process-wide session state in this crate; a
/// caller constructs the context once after login and hands it down.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserContext {
    pub profile_id: ProfileId,
    pub role: Role,
}

impl UserContext {
    pub fn new(profile_id: ProfileId, role: Role) -> Self {
        Self { profile_id, role }
    }

    pub fn is_doctor(&self) -> bool {
        self.role == Role::Doctor
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Accept a missing, null, blank or unparsable timestamp without failing
/// the surrounding snapshot; the backend occasionally ships blank strings
fn lenient_datetime<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw
        .as_ref()
        .and_then(serde_json::Value::as_str)
        .and_then(parse_checkin))
}

/// Parse the timestamp shapes the backend has been observed to emit:
/// RFC 3339 with an offset (`2025-05-02T09:00:00-03:00`) and the
/// offset-less isoformat variant, which is taken as UTC
fn parse_checkin(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_checkin_shapes() {
        assert!(parse_checkin("2025-05-02T09:00:00-03:00").is_some());
        assert!(parse_checkin("2025-05-02T09:00:00+00:00").is_some());
        assert!(parse_checkin("2025-05-02T09:00:00.123456").is_some());
        assert!(parse_checkin("").is_none());
        assert!(parse_checkin("   ").is_none());
        assert!(parse_checkin("yesterday").is_none());
    }

    #[test]
    fn test_offset_is_normalized_to_utc() {
        let parsed = parse_checkin("2025-05-02T09:00:00-03:00").unwrap();
        assert_eq!(parsed, parse_checkin("2025-05-02T12:00:00+00:00").unwrap());
    }
}
