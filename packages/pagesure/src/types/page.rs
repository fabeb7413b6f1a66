//! Page types - identifiers, opaque records, and resolution values.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Stable cache key for one logical page.
///
/// Produced by [`resolve_page_id`](crate::identifier::resolve_page_id) and
/// never re-derived afterwards. Two URLs that refer to the same page share
/// the same identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageId(String);

impl PageId {
    pub(crate) fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Rebuild an identifier from a key previously issued by the resolver,
    /// e.g. one carried in a page route or read back from a store.
    pub fn from_key(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PageId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Extracted page data (page metadata and reviews).
///
/// The schema belongs to the extraction service. The record is stored and
/// returned verbatim; the only structural requirement is that it is a JSON
/// object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageRecord(Map<String, Value>);

impl PageRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a record from raw JSON bytes. Anything but an object is rejected.
    pub fn from_slice(bytes: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(bytes)
    }

    /// Parse a record from a JSON string.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.0)
    }

    /// Builder-style field insert, mostly for tests and fixtures.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

impl From<Map<String, Value>> for PageRecord {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl TryFrom<Value> for PageRecord {
    type Error = Value;

    /// Fails with the original value when it is not a JSON object.
    fn try_from(value: Value) -> std::result::Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(other),
        }
    }
}

/// A user-submitted resolution request. The URL is untrusted input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionRequest {
    pub url: String,
}

impl ResolutionRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

/// Where a resolved record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordSource {
    /// Read from the document store, no network call made
    Cache,
    /// Freshly fetched from the extraction service and stored
    Extraction,
}

impl RecordSource {
    pub fn is_cache_hit(&self) -> bool {
        matches!(self, RecordSource::Cache)
    }
}

/// Outcome of a successful resolution.
#[derive(Debug, Clone, Serialize)]
pub struct Resolution {
    pub page_id: PageId,
    pub record: PageRecord,
    pub source: RecordSource,
    pub resolved_at: DateTime<Utc>,
}

impl Resolution {
    pub(crate) fn new(page_id: PageId, record: PageRecord, source: RecordSource) -> Self {
        Self {
            page_id,
            record,
            source,
            resolved_at: Utc::now(),
        }
    }
}
