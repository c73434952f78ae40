//! Stop matching data models, types, and traits.

pub mod config;
pub mod traits;
pub mod types;

// Re-exports for convenience
pub use config::MatchConfig;
pub use traits::TransitStop;
pub use types::{
    CandidatePoint, DistanceTier, MatchError, Result, Stop, StopMatch, TierCounts, TIER_COUNT,
};
