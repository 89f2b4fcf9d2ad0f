//! KNN engine: the k closest points to a target, ranked.
//!
//! Both paths share one ordering contract: ascending exact distance, ties
//! broken by input position (the earlier input point ranks first). The
//! indexed path walks the R-tree's distance-ordered neighbor iterator for
//! candidate order, recomputes every candidate's distance with the same
//! formula as the brute-force scan, and collects every candidate at or
//! under the k-th distance before re-sorting, so it returns the same
//! ordered top-k as the brute-force scan for any input.

use std::cmp::Ordering;

use geo::{Geometry, Point};

use geoquery_types::PointCollection;

use crate::error::{QueryError, Result};
use crate::geometry;
use crate::index::PointIndex;

/// Property holding the exact distance from each result point to the
/// target.
pub const DISTANCE_PROP: &str = "distance_m";

/// Property holding the 1-based rank of each result point.
pub const RANK_PROP: &str = "knn_rank";

/// Return the `k` points closest to `target`, ordered by rank.
///
/// Each output record gains `distance_m` (exact Euclidean distance) and
/// `knn_rank` (1-based). A collection with fewer than `k` points yields
/// all of them ranked `1..=n`. Fails with [`QueryError::InvalidK`] when
/// `k` is 0 and [`QueryError::InvalidTargetGeometry`] when `target` is not
/// a single-point geometry.
///
/// # Examples
///
/// ```
/// use geo::{Geometry, Point};
/// use geoquery::knn::knn_points;
/// use geoquery_types::{PointCollection, PointRecord};
///
/// let points: PointCollection = vec![
///     PointRecord::new(0.0, 0.0),
///     PointRecord::new(3.0, 0.0),
///     PointRecord::new(0.0, 4.0),
/// ]
/// .into();
/// let target: Geometry = Point::new(0.0, 0.0).into();
///
/// let top2 = knn_points(&points, &target, 2, true)?;
/// assert_eq!(top2.len(), 2);
/// assert_eq!(top2.get(1).unwrap().property("distance_m"), Some(&3.0.into()));
/// # Ok::<(), geoquery::QueryError>(())
/// ```
pub fn knn_points(
    points: &PointCollection,
    target: &Geometry<f64>,
    k: usize,
    use_index: bool,
) -> Result<PointCollection> {
    if k == 0 {
        return Err(QueryError::InvalidK(0));
    }
    let Geometry::Point(target) = target else {
        return Err(QueryError::InvalidTargetGeometry(format!(
            "expected a Point target, got {}",
            geometry_kind(target)
        )));
    };

    let mut ranked = if use_index {
        top_k_indexed(points, target, k)
    } else {
        all_distances(points, target)
    };
    ranked.sort_by(compare_distance_then_index);
    ranked.truncate(k);

    Ok(ranked
        .into_iter()
        .enumerate()
        .map(|(position, (distance, idx))| {
            points
                .get(idx)
                .expect("candidate index from this collection")
                .with_property(DISTANCE_PROP, distance.into())
                .with_property(RANK_PROP, ((position + 1) as u64).into())
        })
        .collect())
}

/// Composite `(distance, input index)` ordering: the deterministic
/// tie-break rule shared by both paths.
fn compare_distance_then_index(a: &(f64, usize), b: &(f64, usize)) -> Ordering {
    a.0.partial_cmp(&b.0)
        .unwrap_or(Ordering::Equal)
        .then(a.1.cmp(&b.1))
}

fn all_distances(points: &PointCollection, target: &Point<f64>) -> Vec<(f64, usize)> {
    points
        .iter()
        .enumerate()
        .map(|(idx, record)| (geometry::point_distance(target, record.point()), idx))
        .collect()
}

fn top_k_indexed(points: &PointCollection, target: &Point<f64>, k: usize) -> Vec<(f64, usize)> {
    let index = PointIndex::build(points);

    let mut candidates: Vec<(f64, usize)> = Vec::with_capacity(k);
    let mut kth_distance = f64::INFINITY;
    for idx in index.nearest_iter(target) {
        // The iterator supplies candidate order only; the stored distance
        // is recomputed with the same formula as the brute-force path so
        // the two paths never disagree in the last ulp.
        let distance = geometry::point_distance(
            target,
            points
                .get(idx)
                .expect("candidate index from this collection")
                .point(),
        );

        if candidates.len() < k {
            candidates.push((distance, idx));
            if candidates.len() == k {
                kth_distance = candidates
                    .iter()
                    .map(|c| c.0)
                    .fold(f64::NEG_INFINITY, f64::max);
            }
            continue;
        }
        // Distance-ordered iteration; once past k, only candidates at or
        // under the k-th distance can still enter the top k (by the
        // input-index tie-break).
        if distance <= kth_distance {
            candidates.push((distance, idx));
        } else {
            break;
        }
    }
    candidates
}

fn geometry_kind(geometry: &Geometry<f64>) -> &'static str {
    match geometry {
        Geometry::Point(_) => "Point",
        Geometry::Line(_) => "Line",
        Geometry::LineString(_) => "LineString",
        Geometry::Polygon(_) => "Polygon",
        Geometry::MultiPoint(_) => "MultiPoint",
        Geometry::MultiLineString(_) => "MultiLineString",
        Geometry::MultiPolygon(_) => "MultiPolygon",
        Geometry::GeometryCollection(_) => "GeometryCollection",
        Geometry::Rect(_) => "Rect",
        Geometry::Triangle(_) => "Triangle",
    }
}
