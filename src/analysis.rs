//! Nearest-pair lookups and thin geometric helpers.
//!
//! [`nearest`] is the brute-force minimum-distance computation between a
//! query point and a single geometry, with witness points. For a whole
//! collection, [`nearest_indexed`] accelerates candidate selection with a
//! bounding-box R-tree while guaranteeing the exhaustive-search answer.
//!
//! The remaining helpers (clipping, area, perimeter, centroid, envelope)
//! are direct delegations to `geo` kept alongside the query engines for
//! workflow convenience.

use geo::{
    Area, BooleanOps, Centroid, Euclidean, Geometry, Length, MultiPolygon, Point, Polygon, Rect,
};

use geoquery_types::PointCollection;

use crate::error::{QueryError, Result};
use crate::geometry;
use crate::index::GeometryIndex;

/// Minimum distance between `query` and `target` with the witness points
/// realizing it.
///
/// Returns `(distance, point on query, point on target)`. The query-side
/// witness is the query point itself; on a polygon the target witness is
/// the closest boundary point, or the query point at distance 0 when it
/// lies on or inside the polygon.
///
/// # Examples
///
/// ```
/// use geo::{polygon, Geometry, Point};
/// use geoquery::analysis::nearest;
///
/// let square: Geometry = polygon![
///     (x: 2.0, y: 0.0), (x: 4.0, y: 0.0), (x: 4.0, y: 2.0), (x: 2.0, y: 2.0),
/// ].into();
///
/// let (dist, _, on_target) = nearest(&Point::new(0.0, 1.0), &square)?;
/// assert_eq!(dist, 2.0);
/// assert_eq!(on_target, Point::new(2.0, 1.0));
/// # Ok::<(), geoquery::QueryError>(())
/// ```
pub fn nearest(
    query: &Point<f64>,
    target: &Geometry<f64>,
) -> Result<(f64, Point<f64>, Point<f64>)> {
    let (distance, witness) = geometry::closest_point(query, target).ok_or_else(|| {
        QueryError::InvalidInputKind("target geometry has no closest point".to_string())
    })?;
    Ok((distance, *query, witness))
}

/// Nearest geometry in `targets` to `query`, via a bulk-loaded bounding-box
/// index.
///
/// Returns `(distance, index into targets)`. The index accelerates
/// candidate selection only; identity and distance always match exhaustive
/// search, with distance ties resolving to the smallest input index. Fails
/// with [`QueryError::EmptyCollection`] when `targets` holds no geometry
/// with a defined distance.
pub fn nearest_indexed(query: &Point<f64>, targets: &[Geometry<f64>]) -> Result<(f64, usize)> {
    if targets.is_empty() {
        return Err(QueryError::EmptyCollection);
    }

    let index = GeometryIndex::build(targets);
    index
        .nearest_by(query, |idx| geometry::distance(query, &targets[idx]))
        .map(|(idx, distance)| (distance, idx))
        .ok_or(QueryError::EmptyCollection)
}

/// Keep the points whose intersection with `clipper` is non-empty.
///
/// Boundary points are kept (a boundary point intersects the clipper), so
/// this matches intersection-based clipping of point features. Properties
/// pass through unchanged; order is input order restricted to survivors.
pub fn clip_points(points: &PointCollection, clipper: &Geometry<f64>) -> PointCollection {
    points
        .iter()
        .filter(|record| geometry::contains(clipper, record.point(), true))
        .cloned()
        .collect()
}

/// Intersection of two polygons.
///
/// Returns an empty `MultiPolygon` when the inputs do not overlap, keeping
/// the return shape stable.
pub fn clip_polygon(subject: &Polygon<f64>, clipper: &Polygon<f64>) -> MultiPolygon<f64> {
    subject.intersection(clipper)
}

/// Unsigned area of a geometry (square units of the input CRS).
pub fn area(geometry: &Geometry<f64>) -> f64 {
    geometry.unsigned_area()
}

/// Length of a geometry's boundary: perimeter for polygonal input
/// (exterior plus holes), path length for lines, 0 for points.
pub fn perimeter(geometry: &Geometry<f64>) -> f64 {
    match geometry {
        Geometry::Point(_) | Geometry::MultiPoint(_) => 0.0,
        Geometry::Line(line) => Euclidean.length(line),
        Geometry::LineString(line) => Euclidean.length(line),
        Geometry::MultiLineString(lines) => Euclidean.length(lines),
        Geometry::Polygon(polygon) => polygon_perimeter(polygon),
        Geometry::MultiPolygon(polygons) => polygons.iter().map(polygon_perimeter).sum(),
        Geometry::Rect(rect) => polygon_perimeter(&rect.to_polygon()),
        Geometry::Triangle(triangle) => polygon_perimeter(&triangle.to_polygon()),
        Geometry::GeometryCollection(collection) => collection.iter().map(perimeter).sum(),
    }
}

fn polygon_perimeter(polygon: &Polygon<f64>) -> f64 {
    let exterior = Euclidean.length(polygon.exterior());
    let interiors: f64 = polygon
        .interiors()
        .iter()
        .map(|ring| Euclidean.length(ring))
        .sum();
    exterior + interiors
}

/// Centroid of a geometry, if defined.
pub fn centroid(geometry: &Geometry<f64>) -> Option<Point<f64>> {
    geometry.centroid()
}

/// Minimum bounding rectangle of a geometry, if defined.
pub fn envelope(geometry: &Geometry<f64>) -> Option<Rect<f64>> {
    geometry::bounds(geometry)
}

/// Strict containment of a point in a geometry (boundary excluded).
pub fn is_contained(container: &Geometry<f64>, content: &Point<f64>) -> bool {
    geometry::contains(container, content, false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::polygon;
    use geoquery_types::PointRecord;

    fn square(x0: f64, y0: f64, x1: f64, y1: f64) -> Polygon<f64> {
        polygon![
            (x: x0, y: y0),
            (x: x1, y: y0),
            (x: x1, y: y1),
            (x: x0, y: y1),
        ]
    }

    #[test]
    fn nearest_reports_witness_on_boundary() {
        let target: Geometry<f64> = square(2.0, 0.0, 4.0, 2.0).into();
        let query = Point::new(0.0, 1.0);

        let (distance, on_query, on_target) = nearest(&query, &target).unwrap();
        assert_eq!(distance, 2.0);
        assert_eq!(on_query, query);
        assert_eq!(on_target, Point::new(2.0, 1.0));
    }

    #[test]
    fn nearest_indexed_matches_exhaustive() {
        let targets: Vec<Geometry<f64>> = vec![
            square(10.0, 10.0, 12.0, 12.0).into(),
            Point::new(0.0, 3.0).into(),
            square(-6.0, -1.0, -4.0, 1.0).into(),
            Point::new(2.0, 0.0).into(),
        ];
        let query = Point::new(0.0, 0.0);

        let (distance, idx) = nearest_indexed(&query, &targets).unwrap();

        // Exhaustive reference
        let exhaustive = targets
            .iter()
            .enumerate()
            .filter_map(|(i, g)| geometry::distance(&query, g).map(|d| (d, i)))
            .min_by(|a, b| a.partial_cmp(b).unwrap())
            .unwrap();
        assert_eq!((distance, idx), exhaustive);
        assert_eq!(idx, 3);
        assert_eq!(distance, 2.0);
    }

    #[test]
    fn nearest_indexed_rejects_empty_collection() {
        let result = nearest_indexed(&Point::new(0.0, 0.0), &[]);
        assert!(matches!(result, Err(QueryError::EmptyCollection)));
    }

    #[test]
    fn clip_points_keeps_boundary_and_order() {
        let clipper: Geometry<f64> = square(0.0, 0.0, 10.0, 10.0).into();
        let points: PointCollection = vec![
            PointRecord::new(5.0, 5.0).with_property("id", 1.into()),
            PointRecord::new(20.0, 20.0).with_property("id", 2.into()),
            PointRecord::new(10.0, 5.0).with_property("id", 3.into()), // boundary
        ]
        .into();

        let clipped = clip_points(&points, &clipper);
        let ids: Vec<i64> = clipped
            .iter()
            .map(|r| r.property("id").and_then(|v| v.as_i64()).unwrap())
            .collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn clip_polygon_overlap_area() {
        let subject = square(0.0, 0.0, 4.0, 4.0);
        let clipper = square(2.0, 2.0, 6.0, 6.0);

        let clipped = clip_polygon(&subject, &clipper);
        assert!((clipped.unsigned_area() - 4.0).abs() < 1e-9);

        let disjoint = clip_polygon(&subject, &square(10.0, 10.0, 12.0, 12.0));
        assert_eq!(disjoint.0.len(), 0);
    }

    #[test]
    fn area_and_perimeter_of_square() {
        let geometry: Geometry<f64> = square(0.0, 0.0, 4.0, 4.0).into();
        assert_eq!(area(&geometry), 16.0);
        assert_eq!(perimeter(&geometry), 16.0);
    }

    #[test]
    fn centroid_and_envelope() {
        let geometry: Geometry<f64> = square(0.0, 0.0, 4.0, 2.0).into();
        assert_eq!(centroid(&geometry), Some(Point::new(2.0, 1.0)));

        let rect = envelope(&geometry).unwrap();
        assert_eq!(rect.max().x, 4.0);
        assert_eq!(rect.max().y, 2.0);
    }
}
