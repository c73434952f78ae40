//! Core records and error types for stop matching.

use geo::Point;

use crate::identifiers::*;

// ============================================================================
// Records
// ============================================================================

/// A transit stop decoded from the schedule feed
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stop {
    pub id: StopIdentifier,
    /// x = longitude, y = latitude
    pub location: Point,
}

impl Stop {
    pub fn new(id: impl Into<StopIdentifier>, lon: f64, lat: f64) -> Self {
        Self {
            id: id.into(),
            location: Point::new(lon, lat),
        }
    }
}

/// A point eligible to be matched to a stop
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CandidatePoint {
    pub id: CandidateId,
    /// x = longitude, y = latitude
    pub location: Point,
}

impl CandidatePoint {
    pub fn new(id: i64, lon: f64, lat: f64) -> Self {
        Self {
            id: CandidateId(id),
            location: Point::new(lon, lat),
        }
    }
}

/// An accepted association of a stop with its nearest candidate
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StopMatch {
    pub stop_id: StopIdentifier,
    pub candidate: CandidatePoint,
    pub distance_m: f64,
}

// ============================================================================
// Distance tiers
// ============================================================================

/// Number of near-miss tiers tracked for diagnostics
pub const TIER_COUNT: usize = 4;

/// Index of the first tier bound a rejected distance falls below
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DistanceTier(usize);

impl DistanceTier {
    /// Classify `distance_m` against ascending `bounds`.
    ///
    /// Returns `None` when the distance is not below any bound (including NaN).
    pub fn classify(distance_m: f64, bounds: &[f64; TIER_COUNT]) -> Option<Self> {
        bounds.iter().position(|&bound| distance_m < bound).map(Self)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

/// Counters of rejected stops per distance tier
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TierCounts {
    counts: [usize; TIER_COUNT],
}

impl TierCounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, tier: DistanceTier) {
        self.counts[tier.index()] += 1;
    }

    pub fn get(&self, tier: DistanceTier) -> usize {
        self.counts[tier.index()]
    }

    pub fn as_array(&self) -> [usize; TIER_COUNT] {
        self.counts
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Combine counters accumulated by separate workers
    pub fn merge(mut self, other: Self) -> Self {
        for (mine, theirs) in self.counts.iter_mut().zip(other.counts) {
            *mine += theirs;
        }
        self
    }

    /// Pair each counter with its tier bound, for reporting
    pub fn with_bounds<'a>(
        &'a self,
        bounds: &'a [f64; TIER_COUNT],
    ) -> impl Iterator<Item = (f64, usize)> + 'a {
        bounds.iter().copied().zip(self.counts.iter().copied())
    }
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum MatchError {
    #[error("Empty input: no stops to compute a bounding box from")]
    EmptyInput,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Stop has no coordinates: {0}")]
    MissingCoordinates(StopIdentifier),
}

pub type Result<T> = std::result::Result<T, MatchError>;
