//! Traits describing the records the matcher consumes.
//!
//! Feed collaborators can implement [`TransitStop`] on their own types
//! instead of converting into [`Stop`] first.

use geo::Point;

use crate::identifiers::StopIdentifier;
use crate::models::types::Stop;

/// A transit stop (single boarding location) with coordinates
pub trait TransitStop: Send + Sync {
    fn id(&self) -> &StopIdentifier;

    /// x = longitude, y = latitude
    fn location(&self) -> Point;
}

impl TransitStop for Stop {
    fn id(&self) -> &StopIdentifier {
        &self.id
    }

    fn location(&self) -> Point {
        self.location
    }
}

impl<T: TransitStop + ?Sized> TransitStop for &T {
    fn id(&self) -> &StopIdentifier {
        (**self).id()
    }

    fn location(&self) -> Point {
        (**self).location()
    }
}
