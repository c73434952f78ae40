//! R-tree index over candidate points.
//!
//! An alternative to the grid [`BucketIndex`](super::BucketIndex) whose search
//! area does not depend on cell boundaries.
//!
//! ## Two-Stage Filtering
//!
//! 1. **R-tree filter**: collects candidates inside a lat/lon envelope sized
//!    from the search radius
//! 2. **Haversine filter**: keeps candidates whose geodesic distance is within
//!    the radius and picks the closest
//!
//! Ties are broken by insertion order, so results are reproducible even though
//! the tree itself does not preserve it.

use geo::Point;
use rstar::{RTree, RTreeObject, AABB};

use crate::models::types::{CandidatePoint, MatchError, Result};
use crate::spatial::queries::{meters_to_degrees_approx, meters_to_lon_degrees_approx, point_distance};
use crate::spatial::{Nearest, NearestCandidate};

// ============================================================================
// Candidate Spatial Node
// ============================================================================

#[derive(Clone, Debug)]
pub struct CandidateNode {
    pub candidate: CandidatePoint,
    /// Position in the input sequence
    pub seq: usize,
    point: [f64; 2],
}

impl CandidateNode {
    pub fn new(candidate: CandidatePoint, seq: usize) -> Self {
        Self {
            candidate,
            seq,
            point: [candidate.location.x(), candidate.location.y()],
        }
    }
}

impl RTreeObject for CandidateNode {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

// ============================================================================
// Index
// ============================================================================

/// Radius-bounded nearest candidate search backed by an R-tree
pub struct RTreeIndex {
    tree: RTree<CandidateNode>,
    radius_m: f64,
}

impl RTreeIndex {
    /// Bulk load `points`; searches reach `radius_m` meters from the query
    pub fn build(points: impl IntoIterator<Item = CandidatePoint>, radius_m: f64) -> Result<Self> {
        if !(radius_m.is_finite() && radius_m > 0.0) {
            return Err(MatchError::InvalidConfig(format!(
                "search radius must be positive, got {radius_m}"
            )));
        }

        // Non-finite coordinates would poison the tree's envelopes
        let nodes: Vec<CandidateNode> = points
            .into_iter()
            .enumerate()
            .filter(|(_, c)| c.location.x().is_finite() && c.location.y().is_finite())
            .map(|(seq, c)| CandidateNode::new(c, seq))
            .collect();

        tracing::debug!(candidates = nodes.len(), radius_m, "built r-tree index");

        Ok(Self {
            tree: RTree::bulk_load(nodes),
            radius_m,
        })
    }

    pub fn radius_m(&self) -> f64 {
        self.radius_m
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    fn search_envelope(&self, point: Point) -> AABB<[f64; 2]> {
        let d_lat = meters_to_degrees_approx(self.radius_m);
        let d_lon = meters_to_lon_degrees_approx(self.radius_m, point.y());

        AABB::from_corners(
            [point.x() - d_lon, point.y() - d_lat],
            [point.x() + d_lon, point.y() + d_lat],
        )
    }
}

impl NearestCandidate for RTreeIndex {
    fn nearest(&self, point: Point) -> Option<Nearest> {
        if !(point.x().is_finite() && point.y().is_finite()) {
            return None;
        }

        self.tree
            .locate_in_envelope(&self.search_envelope(point))
            .map(|node| (node, point_distance(point, node.candidate.location)))
            .filter(|(_, distance_m)| *distance_m <= self.radius_m)
            .min_by(|(a, da), (b, db)| da.total_cmp(db).then(a.seq.cmp(&b.seq)))
            .map(|(node, distance_m)| Nearest {
                candidate: node.candidate,
                distance_m,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identifiers::CandidateId;

    #[test]
    fn test_finds_candidate_across_cell_boundary() {
        // 0.0025 degrees east at 59.9N is about 140m: out of the 3x3 grid reach
        let index = RTreeIndex::build(vec![CandidatePoint::new(1, 30.3025, 59.9000)], 150.0).unwrap();

        let nearest = index.nearest(Point::new(30.3000, 59.9000)).unwrap();
        assert_eq!(nearest.candidate.id, CandidateId(1));
        assert!(nearest.distance_m > 130.0 && nearest.distance_m < 150.0);
    }

    #[test]
    fn test_respects_radius() {
        let index = RTreeIndex::build(vec![CandidatePoint::new(1, 30.3018, 59.9000)], 50.0).unwrap();
        assert!(index.nearest(Point::new(30.3000, 59.9000)).is_none());
    }

    #[test]
    fn test_finds_candidate_at_edge_of_radius() {
        use crate::spatial::queries::METERS_PER_DEGREE;

        // Just inside 100m due north; the envelope must use the haversine sphere
        let d_lat = 0.999_999 * 100.0 / METERS_PER_DEGREE;
        let index = RTreeIndex::build(vec![CandidatePoint::new(1, 30.3, 59.9 + d_lat)], 100.0).unwrap();

        let nearest = index.nearest(Point::new(30.3, 59.9)).unwrap();
        assert_eq!(nearest.candidate.id, CandidateId(1));
        assert!(nearest.distance_m <= 100.0);
    }

    #[test]
    fn test_tie_keeps_first_inserted() {
        let points: Vec<_> = (0..16)
            .map(|i| CandidatePoint::new(100 + i, 30.3001, 59.9000))
            .collect();
        let index = RTreeIndex::build(points, 150.0).unwrap();

        let nearest = index.nearest(Point::new(30.3000, 59.9000)).unwrap();
        assert_eq!(nearest.candidate.id, CandidateId(100));
    }

    #[test]
    fn test_skips_non_finite_points() {
        let index = RTreeIndex::build(
            vec![
                CandidatePoint::new(1, f64::NAN, 59.9),
                CandidatePoint::new(2, 30.3, 59.9),
            ],
            150.0,
        )
        .unwrap();

        assert_eq!(index.len(), 1);
        assert!(index.nearest(Point::new(f64::NAN, 59.9)).is_none());
    }

    #[test]
    fn test_rejects_bad_radius() {
        assert!(RTreeIndex::build(Vec::new(), 0.0).is_err());
        assert!(RTreeIndex::build(Vec::new(), f64::NAN).is_err());
    }
}
