// SPDX-License-Identifier: MIT

//! Geometry helpers for route planning.
//!
//! Distances use the haversine formula on a sphere of radius 3958.8 miles.
//! Intermediate points are plain linear interpolation in lat/lng space, which
//! is plenty for placing suggested stops on continental road trips.

use geo::{Distance, HaversineMeasure, Point};

use crate::models::Coordinates;

const EARTH_RADIUS_MILES: f64 = 3958.8;

const HAVERSINE_MILES: HaversineMeasure = HaversineMeasure::new(EARTH_RADIUS_MILES);

/// Great-circle distance between two coordinates, in miles.
pub fn haversine_miles(from: Coordinates, to: Coordinates) -> f64 {
    HAVERSINE_MILES.distance(
        Point::new(from.lng, from.lat),
        Point::new(to.lng, to.lat),
    )
}

/// Arithmetic midpoint of two coordinates.
pub fn midpoint(a: Coordinates, b: Coordinates) -> Coordinates {
    Coordinates {
        lat: (a.lat + b.lat) / 2.0,
        lng: (a.lng + b.lng) / 2.0,
    }
}

/// Point a fraction of the way from `from` to `to` (0.0 = from, 1.0 = to).
pub fn point_along(from: Coordinates, to: Coordinates, fraction: f64) -> Coordinates {
    Coordinates {
        lat: from.lat + (to.lat - from.lat) * fraction,
        lng: from.lng + (to.lng - from.lng) * fraction,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NEW_YORK: Coordinates = Coordinates {
        lat: 40.7128,
        lng: -74.0060,
    };
    const PHILADELPHIA: Coordinates = Coordinates {
        lat: 39.9526,
        lng: -75.1652,
    };
    const SAN_FRANCISCO: Coordinates = Coordinates {
        lat: 37.7749,
        lng: -122.4194,
    };
    const LOS_ANGELES: Coordinates = Coordinates {
        lat: 34.0522,
        lng: -118.2437,
    };

    #[test]
    fn test_haversine_known_pairs() {
        let nyc_philly = haversine_miles(NEW_YORK, PHILADELPHIA);
        assert!(
            (nyc_philly - 80.5).abs() < 1.5,
            "NYC-Philadelphia was {nyc_philly} miles"
        );

        let sf_la = haversine_miles(SAN_FRANCISCO, LOS_ANGELES);
        assert!((sf_la - 347.0).abs() < 3.0, "SF-LA was {sf_la} miles");
    }

    #[test]
    fn test_haversine_zero_for_same_point() {
        assert!(haversine_miles(NEW_YORK, NEW_YORK) < 1e-9);
    }

    #[test]
    fn test_haversine_symmetric() {
        let there = haversine_miles(SAN_FRANCISCO, LOS_ANGELES);
        let back = haversine_miles(LOS_ANGELES, SAN_FRANCISCO);
        assert!((there - back).abs() < 1e-9);
    }

    #[test]
    fn test_midpoint_is_mean() {
        let mid = midpoint(NEW_YORK, PHILADELPHIA);
        assert!((mid.lat - (40.7128 + 39.9526) / 2.0).abs() < 1e-12);
        assert!((mid.lng - (-74.0060 + -75.1652) / 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_point_along_endpoints_and_middle() {
        let start = point_along(NEW_YORK, PHILADELPHIA, 0.0);
        assert_eq!(start, NEW_YORK);

        let end = point_along(NEW_YORK, PHILADELPHIA, 1.0);
        assert_eq!(end, PHILADELPHIA);

        let half = point_along(NEW_YORK, PHILADELPHIA, 0.5);
        let mid = midpoint(NEW_YORK, PHILADELPHIA);
        assert!((half.lat - mid.lat).abs() < 1e-12);
        assert!((half.lng - mid.lng).abs() < 1e-12);
    }
}
