//! Nearest-candidate matching for a whole stop set.
//!
//! Every stop is handled independently: query the index around the stop,
//! accept the nearest candidate when it is closer than the acceptance
//! threshold, otherwise count the near miss in its distance tier.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use crate::identifiers::StopIdentifier;
use crate::models::config::MatchConfig;
use crate::models::traits::TransitStop;
use crate::models::types::{DistanceTier, Result, StopMatch, TierCounts};
use crate::spatial::NearestCandidate;

/// Outcome of matching one stop
#[derive(Clone, Debug, PartialEq)]
pub enum StopOutcome {
    Matched(StopMatch),
    /// Nearest candidate was too far; `tier` is `None` past every tier bound
    Rejected {
        distance_m: f64,
        tier: Option<DistanceTier>,
    },
    /// No candidate in the search area
    NoCandidate,
}

/// Result of matching a stop set
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchReport {
    /// Accepted matches; a stop without an entry has no acceptable candidate
    pub matches: HashMap<StopIdentifier, StopMatch>,
    /// Near-miss counters, diagnostic only
    pub tiers: TierCounts,
    /// Stops with no candidate in the search area at all
    pub unmatched: usize,
}

impl MatchReport {
    pub fn get(&self, stop_id: &StopIdentifier) -> Option<&StopMatch> {
        self.matches.get(stop_id)
    }

    /// Number of matched stops
    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    fn record(&mut self, outcome: StopOutcome) {
        match outcome {
            StopOutcome::Matched(m) => {
                // First stop in input order keeps a shared identifier
                if let Entry::Vacant(slot) = self.matches.entry(m.stop_id.clone()) {
                    slot.insert(m);
                }
            }
            StopOutcome::Rejected { tier, .. } => {
                if let Some(tier) = tier {
                    self.tiers.record(tier);
                }
            }
            StopOutcome::NoCandidate => self.unmatched += 1,
        }
    }

    /// Combine with the report of stops that come later in input order.
    ///
    /// On a shared stop identifier the entry already in `self` wins.
    pub fn merge(mut self, later: MatchReport) -> MatchReport {
        for (stop_id, m) in later.matches {
            self.matches.entry(stop_id).or_insert(m);
        }
        self.tiers = self.tiers.merge(later.tiers);
        self.unmatched += later.unmatched;
        self
    }

    fn log_summary(&self, stops: usize, config: &MatchConfig) {
        tracing::info!(
            matched = self.matches.len(),
            stops,
            no_candidate = self.unmatched,
            acceptance_m = config.acceptance_m,
            "matched stops"
        );
        for (bound, count) in self.tiers.with_bounds(&config.tier_bounds_m) {
            tracing::info!(below_m = bound, count, "near-miss tier");
        }
    }
}

/// Match a single stop against `index`
pub fn match_stop<S, I>(stop: &S, index: &I, config: &MatchConfig) -> StopOutcome
where
    S: TransitStop + ?Sized,
    I: NearestCandidate + ?Sized,
{
    let Some(nearest) = index.nearest(stop.location()) else {
        return StopOutcome::NoCandidate;
    };

    if nearest.distance_m < config.acceptance_m {
        StopOutcome::Matched(StopMatch {
            stop_id: stop.id().clone(),
            candidate: nearest.candidate,
            distance_m: nearest.distance_m,
        })
    } else {
        StopOutcome::Rejected {
            distance_m: nearest.distance_m,
            tier: DistanceTier::classify(nearest.distance_m, &config.tier_bounds_m),
        }
    }
}

/// Match every stop to its nearest candidate in `index`
pub fn match_all<S, I>(stops: &[S], index: &I, config: &MatchConfig) -> Result<MatchReport>
where
    S: TransitStop,
    I: NearestCandidate + ?Sized,
{
    config.validate()?;

    let mut report = MatchReport::default();
    for stop in stops {
        report.record(match_stop(stop, index, config));
    }

    report.log_summary(stops.len(), config);
    Ok(report)
}

/// [`match_all`] with the per-stop loop spread over the rayon thread pool.
///
/// Each worker builds a partial report over a contiguous run of stops;
/// partials are merged left to right, so the result equals the sequential one.
#[cfg(feature = "parallel")]
pub fn match_all_parallel<S, I>(stops: &[S], index: &I, config: &MatchConfig) -> Result<MatchReport>
where
    S: TransitStop,
    I: NearestCandidate + ?Sized,
{
    use rayon::prelude::*;

    config.validate()?;

    let report = stops
        .par_iter()
        .fold(MatchReport::default, |mut partial, stop| {
            partial.record(match_stop(stop, index, config));
            partial
        })
        .reduce(MatchReport::default, MatchReport::merge);

    report.log_summary(stops.len(), config);
    Ok(report)
}
