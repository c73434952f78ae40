//! Identifiers for stops and candidate points.
//!
//! Stop identifiers come from the schedule feed and use `Arc<str>` for cheap cloning.
//! Candidate identifiers are the signed 64-bit IDs of the geographic source.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Identifier of a stop in the schedule feed; clones share the string
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(transparent))]
pub struct StopIdentifier(Arc<str>);

impl StopIdentifier {
    pub fn new(s: impl AsRef<str>) -> Self {
        Self(s.as_ref().into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl PartialEq for StopIdentifier {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0) || self.0 == other.0
    }
}

impl Eq for StopIdentifier {}

impl Hash for StopIdentifier {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl fmt::Display for StopIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for StopIdentifier {
    fn from(s: String) -> Self {
        Self(s.into())
    }
}

impl From<&str> for StopIdentifier {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Identifier of a candidate point (an OSM node ID in practice)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CandidateId(pub i64);

impl CandidateId {
    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for CandidateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for CandidateId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}
