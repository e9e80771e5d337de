//! Sixteen-point compass model.
//!
//! Maps compass point names (`N`, `NNE`, ... `NNW`) to bearings in degrees and
//! back. Bearings are measured clockwise from north.
//!
//! # Nearest Point
//!
//! [`name_of`] normalizes the bearing into `[0, 360)` and picks the point with
//! the smallest circular distance, so 350° is `N` rather than `NNW`. The table
//! is scanned in ascending angle order and only a strictly smaller distance
//! replaces the current best, so a bearing exactly between two points resolves
//! to the smaller angle (`N` counts as 0°).

use crate::error::LookupError;

/// Bearing of north.
pub const NORTH: f64 = 0.0;

/// Angular width of one compass sector.
pub const SECTOR: f64 = 22.5;

/// Compass points in ascending bearing order.
pub const POINTS: [(&str, f64); 16] = [
    ("N", 0.0),
    ("NNE", 22.5),
    ("NE", 45.0),
    ("ENE", 67.5),
    ("E", 90.0),
    ("ESE", 112.5),
    ("SE", 135.0),
    ("SSE", 157.5),
    ("S", 180.0),
    ("SSW", 202.5),
    ("SW", 225.0),
    ("WSW", 247.5),
    ("W", 270.0),
    ("WNW", 292.5),
    ("NW", 315.0),
    ("NNW", 337.5),
];

/// Bearing of a named compass point.
pub fn angle_of(name: &str) -> Result<f64, LookupError> {
    POINTS
        .iter()
        .find(|(point, _)| *point == name)
        .map(|&(_, angle)| angle)
        .ok_or_else(|| LookupError::CompassPoint(name.to_owned()))
}

/// Name of the compass point nearest to `angle`.
pub fn name_of(angle: f64) -> &'static str {
    let angle = normalize(angle);
    let mut best = POINTS[0];
    let mut best_distance = f64::INFINITY;
    for point in POINTS {
        let distance = circular_distance(angle, point.1);
        if distance < best_distance {
            best = point;
            best_distance = distance;
        }
    }
    best.0
}

/// Fold any finite bearing into `[0, 360)`.
#[inline]
pub fn normalize(angle: f64) -> f64 {
    let a = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if a >= 360.0 { 0.0 } else { a }
}

/// Shortest signed turn from `from` to `to`, in `(-180, 180]`.
#[inline]
pub fn shortest_turn(from: f64, to: f64) -> f64 {
    let delta = normalize(to - from);
    if delta > 180.0 { delta - 360.0 } else { delta }
}

/// Unsigned angular distance between two bearings, in `[0, 180]`.
#[inline]
pub fn circular_distance(a: f64, b: f64) -> f64 {
    shortest_turn(a, b).abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_canonical_names() {
        for (name, angle) in POINTS {
            assert_eq!(angle_of(name).unwrap(), angle);
            assert_eq!(name_of(angle), name);
        }
    }

    #[test]
    fn test_unknown_name() {
        assert_eq!(angle_of("NXE"), Err(LookupError::CompassPoint("NXE".into())));
        assert!(angle_of("n").is_err(), "names are case sensitive");
    }

    #[test]
    fn test_nearest_point_property() {
        // Sweep well outside [0, 360) in 0.25 degree steps
        let mut a = -720.0;
        while a <= 720.0 {
            let snapped = angle_of(name_of(a)).unwrap();
            let error = circular_distance(snapped, a);
            assert!(error <= SECTOR / 2.0 + 1e-9, "{a} snapped to {snapped}");
            a += 0.25;
        }
    }

    #[test]
    fn test_wraps_near_north() {
        assert_eq!(name_of(350.0), "N");
        assert_eq!(name_of(-10.0), "N");
        assert_eq!(name_of(360.0), "N");
        assert_eq!(name_of(370.0), "N");
        assert_eq!(name_of(-90.0), "W");
    }

    #[test]
    fn test_tie_break_prefers_smaller_angle() {
        assert_eq!(name_of(11.25), "N");
        assert_eq!(name_of(33.75), "NNE");
        assert_eq!(name_of(191.25), "S");
        // Halfway between NNW (337.5) and N (0/360) resolves to N
        assert_eq!(name_of(348.75), "N");
    }

    #[test]
    fn test_shortest_turn() {
        assert_eq!(shortest_turn(270.0, 225.0), -45.0);
        assert_eq!(shortest_turn(350.0, 10.0), 20.0);
        assert_eq!(shortest_turn(10.0, 350.0), -20.0);
        assert_eq!(shortest_turn(0.0, 180.0), 180.0);
        assert_eq!(shortest_turn(180.0, 0.0), 180.0);
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize(0.0), 0.0);
        assert_eq!(normalize(360.0), 0.0);
        assert_eq!(normalize(-22.5), 337.5);
        assert_eq!(normalize(725.0), 5.0);
        assert!(normalize(-1e-20) < 360.0);
    }
}
