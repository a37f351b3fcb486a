//! Core record definitions.
//!
//! Defines [`Episode`] (one captured snippet), [`MemoryStore`] (the persisted
//! aggregate), and [`ScopeId`] (the project partition key). Field names on disk
//! are kept compatible with existing `memory.json` files: the episode body is
//! stored as `fix` and the scope as `project_hash`.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Short identifier partitioning episodes by originating project.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScopeId(String);

impl ScopeId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ScopeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One stored memory record. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Episode {
    /// Decimal milliseconds since the Unix epoch, unique within a store.
    pub id: String,
    #[serde(rename = "timestamp")]
    pub created_at: Timestamp,
    /// Scope of the project the episode was captured in.
    #[serde(rename = "project_hash")]
    pub project_scope: ScopeId,
    /// First whitespace-delimited token of the captured text.
    #[serde(default)]
    pub summary: String,
    /// The full captured text, verbatim.
    #[serde(rename = "fix")]
    pub body: String,
    #[serde(default)]
    pub keywords: String,
    /// Fields written by other tools, preserved on write-back.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// An ISO 8601 creation instant that keeps the exact text it was read from,
/// so rewriting the store never alters a stored episode's timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timestamp {
    raw: String,
    instant: DateTime<Utc>,
}

impl Timestamp {
    /// Parse an RFC 3339 string, keeping the original text.
    pub fn parse(raw: &str) -> Result<Self, chrono::ParseError> {
        let instant = DateTime::parse_from_rfc3339(raw)?.with_timezone(&Utc);
        Ok(Self {
            raw: raw.to_string(),
            instant,
        })
    }

    pub fn instant(&self) -> DateTime<Utc> {
        self.instant
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn timestamp_millis(&self) -> i64 {
        self.instant.timestamp_millis()
    }
}

/// New timestamps are written as `2024-05-01T12:30:00.123Z`, the same shape a
/// JS `Date#toISOString` produces.
impl From<DateTime<Utc>> for Timestamp {
    fn from(instant: DateTime<Utc>) -> Self {
        Self {
            raw: instant.to_rfc3339_opts(SecondsFormat::Millis, true),
            instant,
        }
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Timestamp::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// The persisted aggregate: `{ "events": [...], "episodes": [...] }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemoryStore {
    /// Reserved for future event records. Never populated here, but carried
    /// through reads and writes unchanged.
    #[serde(default)]
    pub events: Vec<serde_json::Value>,
    /// Insertion-ordered, which is also chronological order.
    pub episodes: Vec<Episode>,
    /// Unknown top-level keys, preserved on write-back.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}
