//! Distance calculations between coordinates.
//!
//! Haversine distance is authoritative for every acceptance decision. The
//! planar approximation is only good for cheap pre-filtering over small areas.

use geo::Point;

/// Sphere radius used by the haversine formula, in meters.
///
/// This is the WGS84 equatorial radius rather than the mean radius. Existing
/// match results were produced with it, so it is kept for compatibility.
pub const EARTH_RADIUS_M: f64 = 6_378_100.0;

/// Meters per degree of latitude (and of longitude at the equator) on the
/// same sphere as [`haversine_distance`]
pub const METERS_PER_DEGREE: f64 = EARTH_RADIUS_M * std::f64::consts::PI / 180.0;

fn hav(theta: f64) -> f64 {
    (theta / 2.0).sin().powi(2)
}

/// Great-circle distance in meters between two lat/lon pairs in degrees
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let la1 = lat1.to_radians();
    let la2 = lat2.to_radians();
    let lo1 = lon1.to_radians();
    let lo2 = lon2.to_radians();

    let h = hav(la2 - la1) + la1.cos() * la2.cos() * hav(lo2 - lo1);

    // Rounding can push h a hair above 1 for antipodal points
    2.0 * EARTH_RADIUS_M * h.clamp(0.0, 1.0).sqrt().asin()
}

/// Haversine distance in meters between two points (x = lon, y = lat)
pub fn point_distance(p1: Point, p2: Point) -> f64 {
    haversine_distance(p1.y(), p1.x(), p2.y(), p2.x())
}

/// Squared planar distance in square degrees
pub fn planar_distance_squared(p1: Point, p2: Point) -> f64 {
    let dx = p1.x() - p2.x();
    let dy = p1.y() - p2.y();
    dx * dx + dy * dy
}

/// Convert meters to degrees of latitude (for envelope queries)
pub fn meters_to_degrees_approx(meters: f64) -> f64 {
    meters / METERS_PER_DEGREE
}

/// Convert meters to degrees of longitude at the given latitude.
///
/// Clamps near the poles so the result stays finite.
pub fn meters_to_lon_degrees_approx(meters: f64, lat: f64) -> f64 {
    let scale = lat.to_radians().cos().abs().max(1e-6);
    meters / (METERS_PER_DEGREE * scale)
}
