//! Geometry adapter: the narrow set of primitive operations the query
//! engines need, wrapped over the `geo` crate so engine code never touches
//! raw coordinate arrays.
//!
//! All operations assume planar (projected, metric) coordinates.

use geo::{
    BoundingRect, Closest, ClosestPoint, Contains, Distance, Euclidean, Geometry, Intersects,
    Point, Rect,
};

/// Test whether `point` lies within `container`.
///
/// With `inclusive = false` the test is strict: a point exactly on the
/// boundary does not match. With `inclusive = true` boundary points match.
///
/// # Examples
///
/// ```
/// use geo::{polygon, Geometry, Point};
/// use geoquery::geometry::contains;
///
/// let square: Geometry = polygon![
///     (x: 0.0, y: 0.0), (x: 2.0, y: 0.0), (x: 2.0, y: 2.0), (x: 0.0, y: 2.0),
/// ].into();
///
/// let on_edge = Point::new(2.0, 1.0);
/// assert!(!contains(&square, &on_edge, false));
/// assert!(contains(&square, &on_edge, true));
/// ```
pub fn contains(container: &Geometry<f64>, point: &Point<f64>, inclusive: bool) -> bool {
    if inclusive {
        // For a point query, intersection with interior-or-boundary is
        // exactly the "covers" predicate.
        container.intersects(point)
    } else {
        container.contains(point)
    }
}

/// Planar Euclidean distance between two points.
pub fn point_distance(a: &Point<f64>, b: &Point<f64>) -> f64 {
    Euclidean.distance(*a, *b)
}

/// Distance from `point` to `geometry` together with the witness point on
/// the geometry realizing it.
///
/// A point on or inside the geometry yields distance 0 with the point
/// itself as witness; on a polygon the exterior witness is the closest
/// boundary point. Returns `None` for degenerate geometries with no
/// closest point (e.g. an empty multi-part geometry).
pub fn closest_point(point: &Point<f64>, geometry: &Geometry<f64>) -> Option<(f64, Point<f64>)> {
    match geometry.closest_point(point) {
        Closest::Intersection(witness) => Some((0.0, witness)),
        Closest::SinglePoint(witness) => Some((point_distance(point, &witness), witness)),
        Closest::Indeterminate => None,
    }
}

/// Distance from `point` to `geometry`, or `None` for degenerate input.
pub fn distance(point: &Point<f64>, geometry: &Geometry<f64>) -> Option<f64> {
    closest_point(point, geometry).map(|(d, _)| d)
}

/// Axis-aligned bounding rectangle of a geometry, if it has one.
pub fn bounds(geometry: &Geometry<f64>) -> Option<Rect<f64>> {
    geometry.bounding_rect()
}
