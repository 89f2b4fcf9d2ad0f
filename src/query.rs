//! Containment query engine: tag or filter a point collection against a
//! polygon, brute-force or R-tree accelerated.
//!
//! The indexed path uses the polygon's bounding box as a pre-filter over a
//! point index and applies the exact containment predicate to the reduced
//! candidate set only, so both paths produce identical output.

use std::str::FromStr;

use geo::Geometry;
use rustc_hash::FxHashSet;

use geoquery_types::{PointCollection, PointRecord};

use crate::error::QueryError;
use crate::geometry;
use crate::index::PointIndex;

/// Temporary property used by [`filter_points_within`], stripped from its
/// output.
const FILTER_PROP: &str = "_inside";

/// Boundary semantics of the containment predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContainmentMode {
    /// A point exactly on the polygon boundary does not match.
    #[default]
    Strict,
    /// Boundary points match.
    Inclusive,
}

impl ContainmentMode {
    /// Whether boundary points match under this mode.
    pub fn is_inclusive(self) -> bool {
        matches!(self, ContainmentMode::Inclusive)
    }
}

impl FromStr for ContainmentMode {
    type Err = QueryError;

    /// Parse a mode name. Accepts `"strict"` / `"contains"` and
    /// `"inclusive"` / `"covers"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "strict" | "contains" => Ok(ContainmentMode::Strict),
            "inclusive" | "covers" => Ok(ContainmentMode::Inclusive),
            other => Err(QueryError::InvalidMode(other.to_string())),
        }
    }
}

/// Tag every point with a boolean property indicating containment in
/// `polygon`.
///
/// Every input point appears in the output in input order; `prop` is set
/// on a copy of each record (an existing property of the same name is
/// overwritten in the copy only).
///
/// # Examples
///
/// ```
/// use geo::{polygon, Geometry};
/// use geoquery::query::{tag_points_within, ContainmentMode};
/// use geoquery_types::{PointCollection, PointRecord};
///
/// let square: Geometry = polygon![
///     (x: 0.0, y: 0.0), (x: 10.0, y: 0.0), (x: 10.0, y: 10.0), (x: 0.0, y: 10.0),
/// ].into();
/// let points: PointCollection =
///     vec![PointRecord::new(5.0, 5.0), PointRecord::new(20.0, 20.0)].into();
///
/// let tagged = tag_points_within(&points, &square, "inside", ContainmentMode::Strict, false);
/// assert_eq!(tagged.get(0).unwrap().property("inside"), Some(&true.into()));
/// assert_eq!(tagged.get(1).unwrap().property("inside"), Some(&false.into()));
/// ```
pub fn tag_points_within(
    points: &PointCollection,
    polygon: &Geometry<f64>,
    prop: &str,
    mode: ContainmentMode,
    use_index: bool,
) -> PointCollection {
    if use_index {
        tag_indexed(points, polygon, prop, mode)
    } else {
        tag_brute_force(points, polygon, prop, mode)
    }
}

fn tag_brute_force(
    points: &PointCollection,
    polygon: &Geometry<f64>,
    prop: &str,
    mode: ContainmentMode,
) -> PointCollection {
    points
        .iter()
        .map(|record| {
            let inside = geometry::contains(polygon, record.point(), mode.is_inclusive());
            record.with_property(prop, inside.into())
        })
        .collect()
}

fn tag_indexed(
    points: &PointCollection,
    polygon: &Geometry<f64>,
    prop: &str,
    mode: ContainmentMode,
) -> PointCollection {
    let index = PointIndex::build(points);

    // Candidates whose position falls in the polygon's bounding box; a
    // polygon with no bounding rectangle contains nothing.
    let candidates: FxHashSet<usize> = match geometry::bounds(polygon) {
        Some(window) => index.query_bbox(&window).into_iter().collect(),
        None => FxHashSet::default(),
    };

    points
        .iter()
        .enumerate()
        .map(|(i, record)| {
            let inside = candidates.contains(&i)
                && geometry::contains(polygon, record.point(), mode.is_inclusive());
            record.with_property(prop, inside.into())
        })
        .collect()
}

/// Keep only the points contained in `polygon`.
///
/// Defined as tagging with a temporary property, retaining matches, and
/// stripping the helper property. Output order is input order restricted
/// to matches.
pub fn filter_points_within(
    points: &PointCollection,
    polygon: &Geometry<f64>,
    mode: ContainmentMode,
    use_index: bool,
) -> PointCollection {
    let tagged = tag_points_within(points, polygon, FILTER_PROP, mode, use_index);

    tagged
        .into_iter()
        .filter(|record| record.property(FILTER_PROP) == Some(&true.into()))
        .map(|record: PointRecord| record.without_property(FILTER_PROP))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::polygon;

    fn square() -> Geometry<f64> {
        polygon![
            (x: 0.0, y: 0.0),
            (x: 10.0, y: 0.0),
            (x: 10.0, y: 10.0),
            (x: 0.0, y: 10.0),
        ]
        .into()
    }

    fn sample_points() -> PointCollection {
        vec![
            PointRecord::new(5.0, 5.0).with_property("id", 1.into()),   // inside
            PointRecord::new(0.0, 0.0).with_property("id", 2.into()),   // boundary vertex
            PointRecord::new(20.0, 20.0).with_property("id", 3.into()), // outside
        ]
        .into()
    }

    fn tags(collection: &PointCollection, prop: &str) -> Vec<bool> {
        collection
            .iter()
            .map(|r| r.property(prop).and_then(|v| v.as_bool()).unwrap())
            .collect()
    }

    #[test]
    fn strict_excludes_boundary() {
        let tagged = tag_points_within(
            &sample_points(),
            &square(),
            "inside",
            ContainmentMode::Strict,
            false,
        );
        assert_eq!(tags(&tagged, "inside"), vec![true, false, false]);
    }

    #[test]
    fn inclusive_keeps_boundary() {
        let tagged = tag_points_within(
            &sample_points(),
            &square(),
            "inside",
            ContainmentMode::Inclusive,
            false,
        );
        assert_eq!(tags(&tagged, "inside"), vec![true, true, false]);
    }

    #[test]
    fn indexed_matches_brute_force_both_modes() {
        let points = sample_points();
        let polygon = square();

        for mode in [ContainmentMode::Strict, ContainmentMode::Inclusive] {
            let brute = tag_points_within(&points, &polygon, "inside", mode, false);
            let indexed = tag_points_within(&points, &polygon, "inside", mode, true);
            assert_eq!(brute, indexed);
        }
    }

    #[test]
    fn filter_keeps_input_order_and_strips_helper() {
        let points: PointCollection = vec![
            PointRecord::new(1.0, 1.0).with_property("id", 1.into()),
            PointRecord::new(30.0, 30.0).with_property("id", 2.into()),
            PointRecord::new(2.0, 2.0).with_property("id", 3.into()),
            PointRecord::new(9.0, 9.0).with_property("id", 4.into()),
        ]
        .into();

        let filtered = filter_points_within(&points, &square(), ContainmentMode::Strict, true);

        let ids: Vec<i64> = filtered
            .iter()
            .map(|r| r.property("id").and_then(|v| v.as_i64()).unwrap())
            .collect();
        assert_eq!(ids, vec![1, 3, 4]);
        assert!(filtered.iter().all(|r| r.property("_inside").is_none()));
    }

    #[test]
    fn tag_overwrites_existing_property_in_output_only() {
        let points: PointCollection =
            vec![PointRecord::new(5.0, 5.0).with_property("inside", "stale".into())].into();

        let tagged =
            tag_points_within(&points, &square(), "inside", ContainmentMode::Strict, false);

        assert_eq!(tagged.get(0).unwrap().property("inside"), Some(&true.into()));
        assert_eq!(points.get(0).unwrap().property("inside"), Some(&"stale".into()));
    }

    #[test]
    fn mode_parsing() {
        assert_eq!(
            "contains".parse::<ContainmentMode>().unwrap(),
            ContainmentMode::Strict
        );
        assert_eq!(
            "covers".parse::<ContainmentMode>().unwrap(),
            ContainmentMode::Inclusive
        );
        assert!(matches!(
            "touching".parse::<ContainmentMode>(),
            Err(QueryError::InvalidMode(_))
        ));
    }
}
