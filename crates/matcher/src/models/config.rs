//! Matching thresholds.

use crate::models::types::{MatchError, Result, TIER_COUNT};

/// Thresholds used when accepting and classifying matches
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MatchConfig {
    /// A nearest candidate strictly closer than this is accepted (meters)
    pub acceptance_m: f64,

    /// Ascending upper bounds of the near-miss tiers (meters)
    pub tier_bounds_m: [f64; TIER_COUNT],

    /// Search radius for [`RTreeIndex`](crate::spatial::RTreeIndex) (meters)
    pub search_radius_m: f64,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            acceptance_m: 2.0,
            tier_bounds_m: [2.0, 5.0, 10.0, 20.0],
            search_radius_m: 150.0,
        }
    }
}

impl MatchConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.acceptance_m.is_finite() && self.acceptance_m > 0.0) {
            return Err(MatchError::InvalidConfig(format!(
                "acceptance threshold must be positive, got {}",
                self.acceptance_m
            )));
        }

        if !self.tier_bounds_m.iter().all(|b| b.is_finite() && *b > 0.0) {
            return Err(MatchError::InvalidConfig(format!(
                "tier bounds must be positive, got {:?}",
                self.tier_bounds_m
            )));
        }

        if !self.tier_bounds_m.windows(2).all(|w| w[0] < w[1]) {
            return Err(MatchError::InvalidConfig(format!(
                "tier bounds must be strictly ascending, got {:?}",
                self.tier_bounds_m
            )));
        }

        if !(self.search_radius_m.is_finite() && self.search_radius_m > 0.0) {
            return Err(MatchError::InvalidConfig(format!(
                "search radius must be positive, got {}",
                self.search_radius_m
            )));
        }

        Ok(())
    }
}
