//! Padded bounding box around a stop set.
//!
//! Point loaders use it to skip candidates that cannot match any stop.

use geo::{coord, Point, Rect};

use crate::models::traits::TransitStop;
use crate::models::types::{CandidatePoint, MatchError, Result};

/// Padding added on every side, in degrees (about 400m)
pub const BBOX_PADDING_DEG: f64 = 0.004;

/// Lat/lon rectangle; x = longitude, y = latitude
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox(Rect);

impl BoundingBox {
    /// Box covering every stop, padded by [`BBOX_PADDING_DEG`]
    pub fn around<S: TransitStop>(stops: &[S]) -> Result<Self> {
        let mut locations = stops.iter().map(TransitStop::location);
        let first = locations.next().ok_or(MatchError::EmptyInput)?;

        let (mut min, mut max) = (first, first);
        for p in locations {
            min = Point::new(min.x().min(p.x()), min.y().min(p.y()));
            max = Point::new(max.x().max(p.x()), max.y().max(p.y()));
        }

        Ok(Self(Rect::new(
            coord! { x: min.x() - BBOX_PADDING_DEG, y: min.y() - BBOX_PADDING_DEG },
            coord! { x: max.x() + BBOX_PADDING_DEG, y: max.y() + BBOX_PADDING_DEG },
        )))
    }

    pub fn min_lat(&self) -> f64 {
        self.0.min().y
    }

    pub fn min_lon(&self) -> f64 {
        self.0.min().x
    }

    pub fn max_lat(&self) -> f64 {
        self.0.max().y
    }

    pub fn max_lon(&self) -> f64 {
        self.0.max().x
    }

    pub fn rect(&self) -> Rect {
        self.0
    }

    /// Whether `point` lies inside the box, edges included
    pub fn contains(&self, point: Point) -> bool {
        (self.min_lon()..=self.max_lon()).contains(&point.x())
            && (self.min_lat()..=self.max_lat()).contains(&point.y())
    }

    /// Keep only candidates inside the box
    pub fn filter_candidates<'a, I>(&'a self, candidates: I) -> impl Iterator<Item = CandidatePoint> + 'a
    where
        I: IntoIterator<Item = CandidatePoint>,
        I::IntoIter: 'a,
    {
        candidates
            .into_iter()
            .filter(move |c| self.contains(c.location))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::types::Stop;
    use approx::assert_relative_eq;

    #[test]
    fn test_empty_input_fails() {
        let stops: Vec<Stop> = Vec::new();
        assert!(matches!(BoundingBox::around(&stops), Err(MatchError::EmptyInput)));
    }

    #[test]
    fn test_padded_box() {
        let stops = vec![
            Stop::new("a", 30.30, 59.90),
            Stop::new("b", 30.40, 59.85),
            Stop::new("c", 30.35, 59.95),
        ];
        let bbox = BoundingBox::around(&stops).unwrap();

        assert_relative_eq!(bbox.min_lat(), 59.846, max_relative = 1e-12);
        assert_relative_eq!(bbox.max_lat(), 59.954, max_relative = 1e-12);
        assert_relative_eq!(bbox.min_lon(), 30.296, max_relative = 1e-12);
        assert_relative_eq!(bbox.max_lon(), 30.404, max_relative = 1e-12);
    }

    #[test]
    fn test_single_stop_box() {
        let bbox = BoundingBox::around(&[Stop::new("a", 30.3, 59.9)]).unwrap();
        assert_relative_eq!(bbox.max_lon() - bbox.min_lon(), 2.0 * BBOX_PADDING_DEG, max_relative = 1e-9);
        assert!(bbox.contains(Point::new(30.3, 59.9)));
    }

    #[test]
    fn test_filter_candidates() {
        let bbox = BoundingBox::around(&[Stop::new("a", 30.3, 59.9)]).unwrap();
        let kept: Vec<_> = bbox
            .filter_candidates(vec![
                CandidatePoint::new(1, 30.303, 59.9),
                CandidatePoint::new(2, 30.305, 59.9),
                CandidatePoint::new(3, 30.3, 59.897),
            ])
            .map(|c| c.id.get())
            .collect();

        assert_eq!(kept, vec![1, 3]);
    }
}
