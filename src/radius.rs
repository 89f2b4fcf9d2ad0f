//! Radius search engine: filter a point collection to those within a
//! distance threshold of a center coordinate.
//!
//! The indexed path queries the point index with the square window
//! `center ± radius` and applies the exact distance predicate to the
//! candidates only; it is a superset pre-filter, never a shortcut, so both
//! paths produce identical output.

use geo::{Point, Rect, coord};
use rustc_hash::FxHashSet;

use geoquery_types::PointCollection;

use crate::error::{QueryError, Result};
use crate::geometry;
use crate::index::PointIndex;

/// Property holding the exact distance from each matched point to the
/// search center.
pub const DISTANCE_PROP: &str = "distance_to_center";

/// Keep the points within `radius` of `center` (boundary inclusive).
///
/// Each output record gains a `distance_to_center` property with the exact
/// Euclidean distance. Output order is input order restricted to matches.
/// Fails with [`QueryError::InvalidRadius`] when `radius` is negative; a
/// radius of 0 keeps exactly coincident points.
///
/// # Examples
///
/// ```
/// use geo::Point;
/// use geoquery::radius::filter_by_distance;
/// use geoquery_types::{PointCollection, PointRecord};
///
/// let points: PointCollection =
///     vec![PointRecord::new(3.0, 4.0), PointRecord::new(3.0, 4.001)].into();
///
/// let hits = filter_by_distance(&points, &Point::new(0.0, 0.0), 5.0, false)?;
/// assert_eq!(hits.len(), 1); // (3, 4) at distance exactly 5 is kept
/// # Ok::<(), geoquery::QueryError>(())
/// ```
pub fn filter_by_distance(
    points: &PointCollection,
    center: &Point<f64>,
    radius: f64,
    use_index: bool,
) -> Result<PointCollection> {
    if radius < 0.0 {
        return Err(QueryError::InvalidRadius(radius));
    }

    if use_index {
        Ok(filter_indexed(points, center, radius))
    } else {
        Ok(filter_brute_force(points, center, radius))
    }
}

fn filter_brute_force(
    points: &PointCollection,
    center: &Point<f64>,
    radius: f64,
) -> PointCollection {
    points
        .iter()
        .filter_map(|record| {
            let distance = geometry::point_distance(record.point(), center);
            (distance <= radius).then(|| record.with_property(DISTANCE_PROP, distance.into()))
        })
        .collect()
}

fn filter_indexed(points: &PointCollection, center: &Point<f64>, radius: f64) -> PointCollection {
    let index = PointIndex::build(points);

    let window = Rect::new(
        coord! { x: center.x() - radius, y: center.y() - radius },
        coord! { x: center.x() + radius, y: center.y() + radius },
    );
    let candidates: FxHashSet<usize> = index.query_bbox(&window).into_iter().collect();

    points
        .iter()
        .enumerate()
        .filter_map(|(i, record)| {
            if !candidates.contains(&i) {
                return None;
            }
            // The window is a superset; the exact check decides.
            let distance = geometry::point_distance(record.point(), center);
            (distance <= radius).then(|| record.with_property(DISTANCE_PROP, distance.into()))
        })
        .collect()
}
