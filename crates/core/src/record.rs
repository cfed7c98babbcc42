//! Record type and on-disk shape migration.
//!
//! A [`Record`] is one stored entry: a string value, creation and update
//! timestamps, and a set of tags. The key is not part of the record — the
//! durable document is a JSON object mapping key to record.
//!
//! [`StoredRecord`] is the on-disk shape. Loading goes through a
//! versioned-decode step: legacy documents stored a raw string where a
//! structured record now lives, and early structured records had no
//! `tags` field. Both shapes upgrade monotonically to the current
//! [`Record`]; upgrading is idempotent and never downgrades.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One stored entry.
///
/// Invariants, maintained by the store:
/// - `updated_at >= created_at`
/// - `tags` holds non-empty, trimmed strings; the `BTreeSet`
///   representation keeps them sorted and deduplicated, including in the
///   serialized form (a sorted JSON array).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// The string payload
    pub value: String,
    /// Set once at first creation, never mutated
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    /// Bumped on every value update and tag mutation
    #[serde(with = "timestamp")]
    pub updated_at: DateTime<Utc>,
    /// Classification labels, sorted and deduplicated
    #[serde(default)]
    pub tags: BTreeSet<String>,
}

impl Record {
    /// Create a record with the given value and already-normalized tags.
    ///
    /// Both timestamps are set to the current instant.
    pub fn new(value: String, tags: BTreeSet<String>) -> Self {
        let now = Utc::now();
        Record {
            value,
            created_at: now,
            updated_at: now,
            tags,
        }
    }

    /// Replace the value and bump `updated_at`. Tags are untouched.
    pub fn update_value(&mut self, value: String) {
        self.value = value;
        self.touch();
    }

    /// Bump `updated_at` to the current instant.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Case-insensitive substring match against the value or any tag.
    ///
    /// `needle` must already be lowercased. Key matching is the caller's
    /// concern — the record does not know its key.
    pub fn matches(&self, needle: &str) -> bool {
        self.value.to_lowercase().contains(needle)
            || self.tags.iter().any(|t| t.to_lowercase().contains(needle))
    }
}

/// Normalize a tag collection: trim each tag, drop the empties, collect
/// into a sorted, deduplicated set.
pub fn normalize_tags<I, S>(tags: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    tags.into_iter()
        .map(|t| t.as_ref().trim().to_owned())
        .filter(|t| !t.is_empty())
        .collect()
}

/// On-disk shape of one entry.
///
/// Decoded untagged: a JSON object is a structured [`Record`] (with
/// `tags` defaulting to empty when absent), a bare JSON string is the
/// legacy scalar shape.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum StoredRecord {
    /// Current shape
    Structured(Record),
    /// Legacy shape: the raw value with no metadata
    Legacy(String),
}

impl StoredRecord {
    /// Upgrade to the current shape.
    ///
    /// Returns the record and whether a legacy scalar was upgraded.
    /// Structured records pass through unchanged, so running the upgrade
    /// twice produces the same document.
    pub fn into_record(self, now: DateTime<Utc>) -> (Record, bool) {
        match self {
            StoredRecord::Structured(record) => (record, false),
            StoredRecord::Legacy(value) => (
                Record {
                    value,
                    created_at: now,
                    updated_at: now,
                    tags: BTreeSet::new(),
                },
                true,
            ),
        }
    }
}

/// Timestamp encoding for the durable document.
///
/// Written as RFC 3339 UTC. On read, offset-less ISO-8601 stamps are
/// also accepted and assumed UTC — legacy documents carried naive
/// `isoformat()` strings.
mod timestamp {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{self, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(dt: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&dt.to_rfc3339())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .or_else(|_| {
                raw.parse::<NaiveDateTime>()
                    .map(|naive| naive.and_utc())
            })
            .map_err(|_| {
                serde::de::Error::custom(format!("unrecognized timestamp: {:?}", raw))
            })
    }
}
