//! Spatial indexing and distance utilities.

pub mod bounds;
pub mod grid;
pub mod index;
pub mod queries;

use geo::Point;

use crate::models::types::CandidatePoint;

pub use bounds::{BoundingBox, BBOX_PADDING_DEG};
pub use grid::{BucketIndex, BucketKey};
pub use index::RTreeIndex;
pub use queries::{haversine_distance, planar_distance_squared, point_distance};

/// Closest candidate found for a query point
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Nearest {
    pub candidate: CandidatePoint,
    /// Haversine distance from the query point
    pub distance_m: f64,
}

/// Read-only index answering nearest-candidate queries.
///
/// Implementations must be deterministic: equal inputs give equal answers,
/// with ties going to the candidate inserted first.
pub trait NearestCandidate: Send + Sync {
    /// Closest candidate within the index's search area, if any
    fn nearest(&self, point: Point) -> Option<Nearest>;
}
