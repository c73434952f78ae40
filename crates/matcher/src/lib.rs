//! # stop-matcher
//!
//! Match transit stops to the nearest nearby point of interest (typically
//! OpenStreetMap `public_transport` nodes).
//!
//! ## Features
//!
//! - **Grid bucket index**: candidates bucketed by coordinates rounded to 3
//!   decimal places, searched over the 3x3 block of cells around each stop
//! - **Haversine acceptance**: a stop matches when its nearest candidate is
//!   closer than the acceptance threshold (2m by default)
//! - **Near-miss tiers**: rejected stops are counted in 2/5/10/20m bands
//! - **Bounding box**: padded box around the stops for pre-filtering candidates
//! - **R-tree alternative**: radius-bounded search that ignores cell boundaries
//! - `parallel` feature: per-stop matching on the rayon thread pool
//! - `gtfs` feature: build stops from `gtfs-structures` feeds
//!
//! ## Example
//!
//! ```
//! use stop_matcher::prelude::*;
//!
//! let stops = vec![Stop::new("nevsky", 30.300, 59.900)];
//!
//! // Only load candidates near the stops
//! let bbox = BoundingBox::around(&stops).unwrap();
//! let candidates = bbox.filter_candidates(vec![
//!     CandidatePoint::new(1001, 30.30001, 59.90001),
//!     CandidatePoint::new(1002, 37.6173, 55.7558),
//! ]);
//!
//! let index = BucketIndex::build(candidates);
//! let report = match_all(&stops, &index, &MatchConfig::default()).unwrap();
//!
//! let m = report.get(&StopIdentifier::new("nevsky")).unwrap();
//! assert_eq!(m.candidate.id, CandidateId(1001));
//! assert!(m.distance_m < 2.0);
//! ```

pub mod identifiers;
pub mod matcher;
pub mod models;
pub mod spatial;

#[cfg(feature = "gtfs")]
pub mod gtfs;

// Re-exports for convenience
pub mod prelude {
    pub use crate::identifiers::*;
    pub use crate::matcher::{match_all, match_stop, MatchReport, StopOutcome};
    #[cfg(feature = "parallel")]
    pub use crate::matcher::match_all_parallel;
    pub use crate::models::{config::MatchConfig, traits::*, types::*};
    pub use crate::spatial::{
        BoundingBox, BucketIndex, BucketKey, Nearest, NearestCandidate, RTreeIndex,
    };
}

pub use prelude::*;
