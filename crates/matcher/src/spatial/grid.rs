//! Grid bucket index keyed by rounded coordinates.
//!
//! Each candidate lands in the cell named by its longitude and latitude rounded
//! to a fixed number of decimal places (3 by default, roughly 100m cells).
//! Keys are integer pairs, so no text formatting is involved.
//!
//! ## Known limitation
//!
//! Nearest-candidate search only visits the 3x3 block of cells around the
//! query's own cell. A closer candidate two or more cells away is never seen,
//! so in sparse regions the result can be a farther candidate or nothing at
//! all. [`RTreeIndex`](super::RTreeIndex) searches a true radius instead.

use std::collections::HashMap;

use geo::Point;

use crate::models::types::{CandidatePoint, MatchError, Result};
use crate::spatial::queries::point_distance;
use crate::spatial::{Nearest, NearestCandidate};

/// Decimal places used by [`BucketIndex::build`]
pub const DEFAULT_PRECISION: u32 = 3;

/// Largest precision accepted by [`BucketIndex::build_with_precision`]
pub const MAX_PRECISION: u32 = 7;

/// Offsets visited by the neighborhood search, longitude-major
const NEIGHBOR_OFFSETS: [i64; 3] = [-1, 0, 1];

/// Quantized cell coordinates: degrees times `10^precision`, rounded
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BucketKey {
    pub lon: i64,
    pub lat: i64,
}

impl BucketKey {
    /// Key of the cell containing `point` on a grid with `scale` cells per degree.
    ///
    /// Non-finite coordinates saturate rather than panic.
    pub fn at(point: Point, scale: f64) -> Self {
        Self {
            lon: (point.x() * scale).round() as i64,
            lat: (point.y() * scale).round() as i64,
        }
    }

    /// Key shifted by whole grid steps
    pub fn offset(self, d_lon: i64, d_lat: i64) -> Self {
        Self {
            lon: self.lon.saturating_add(d_lon),
            lat: self.lat.saturating_add(d_lat),
        }
    }

    /// The 3x3 block of keys centered on this one, longitude offset outermost
    pub fn neighborhood(self) -> impl Iterator<Item = BucketKey> {
        NEIGHBOR_OFFSETS.into_iter().flat_map(move |d_lon| {
            NEIGHBOR_OFFSETS
                .into_iter()
                .map(move |d_lat| self.offset(d_lon, d_lat))
        })
    }
}

/// Read-only mapping from grid cell to the candidates inside it.
///
/// Buckets keep insertion order and may hold duplicates.
#[derive(Clone, Debug)]
pub struct BucketIndex {
    buckets: HashMap<BucketKey, Vec<CandidatePoint>>,
    scale: f64,
    len: usize,
}

impl BucketIndex {
    /// Build an index with [`DEFAULT_PRECISION`] decimal places
    pub fn build(points: impl IntoIterator<Item = CandidatePoint>) -> Self {
        Self::build_scaled(points, 10f64.powi(DEFAULT_PRECISION as i32))
    }

    /// Build an index with a custom number of decimal places (`0..=MAX_PRECISION`)
    pub fn build_with_precision(
        points: impl IntoIterator<Item = CandidatePoint>,
        precision: u32,
    ) -> Result<Self> {
        if precision > MAX_PRECISION {
            return Err(MatchError::InvalidConfig(format!(
                "grid precision must be at most {MAX_PRECISION} decimal places, got {precision}"
            )));
        }
        Ok(Self::build_scaled(points, 10f64.powi(precision as i32)))
    }

    fn build_scaled(points: impl IntoIterator<Item = CandidatePoint>, scale: f64) -> Self {
        let mut buckets: HashMap<BucketKey, Vec<CandidatePoint>> = HashMap::new();
        let mut len = 0;

        for point in points {
            buckets
                .entry(BucketKey::at(point.location, scale))
                .or_default()
                .push(point);
            len += 1;
        }

        tracing::debug!(candidates = len, cells = buckets.len(), "built bucket index");

        Self {
            buckets,
            scale,
            len,
        }
    }

    /// Key of the cell containing `point` on this index's grid
    pub fn key_for(&self, point: Point) -> BucketKey {
        BucketKey::at(point, self.scale)
    }

    /// Candidates in one cell; empty when the cell has none
    pub fn lookup(&self, key: BucketKey) -> &[CandidatePoint] {
        self.buckets.get(&key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Candidates in the 3x3 block of cells around `point`, in deterministic order
    pub fn neighborhood(&self, point: Point) -> impl Iterator<Item = &CandidatePoint> + '_ {
        self.key_for(point)
            .neighborhood()
            .flat_map(move |key| self.lookup(key).iter())
    }

    /// Number of indexed candidates
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of non-empty cells
    pub fn cell_count(&self) -> usize {
        self.buckets.len()
    }
}

impl NearestCandidate for BucketIndex {
    fn nearest(&self, point: Point) -> Option<Nearest> {
        let mut best: Option<Nearest> = None;

        for candidate in self.neighborhood(point) {
            let distance_m = point_distance(point, candidate.location);
            // Bad coordinates must not shadow valid candidates
            if distance_m.is_nan() {
                continue;
            }
            // Strict comparison keeps the first of equidistant candidates
            if best.map_or(true, |b| distance_m < b.distance_m) {
                best = Some(Nearest {
                    candidate: *candidate,
                    distance_m,
                });
            }
        }

        best
    }
}
