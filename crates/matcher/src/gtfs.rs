//! Conversion from `gtfs-structures` stop records.
//!
//! Decoding the feed archive is left to `gtfs-structures`; this module only
//! turns its stops into [`Stop`]s.

use gtfs_structures::Gtfs;

use crate::identifiers::StopIdentifier;
use crate::models::types::{MatchError, Result, Stop};

impl TryFrom<&gtfs_structures::Stop> for Stop {
    type Error = MatchError;

    fn try_from(stop: &gtfs_structures::Stop) -> Result<Self> {
        match (stop.longitude, stop.latitude) {
            (Some(lon), Some(lat)) => Ok(Stop::new(stop.id.as_str(), lon, lat)),
            _ => Err(MatchError::MissingCoordinates(StopIdentifier::new(&stop.id))),
        }
    }
}

/// All feed stops that carry coordinates, sorted by stop ID.
///
/// Stops without coordinates (generic nodes, boarding areas without a
/// position) are skipped.
pub fn stops_from_feed(feed: &Gtfs) -> Vec<Stop> {
    let mut stops: Vec<Stop> = feed
        .stops
        .values()
        .filter_map(|stop| match Stop::try_from(stop.as_ref()) {
            Ok(stop) => Some(stop),
            Err(err) => {
                tracing::debug!(%err, "skipping feed stop");
                None
            }
        })
        .collect();

    stops.sort_by(|a, b| a.id.as_str().cmp(b.id.as_str()));
    stops
}
