//! Spatial index adapters over bulk-loaded R-trees.
//!
//! The engines never touch `rstar` types directly: [`PointIndex`] and
//! [`GeometryIndex`] expose the three capabilities the engines need
//! (build, bounding-box candidate retrieval, nearest-candidate iteration),
//! so the underlying index structure could be swapped without touching
//! engine logic.
//!
//! Both indexes are built once per query call from the current input,
//! read-only afterwards, and discarded with the call. Candidate retrieval
//! is always a pre-filter: the engines re-check every candidate with the
//! exact predicate, so index results never drift from brute-force results.

use geo::{Geometry, Point, Rect};
use rstar::{AABB, Point as RstarPoint, PointDistance, RTree, RTreeObject};

use geoquery_types::PointCollection;

use crate::geometry;

/// A planar point carrying its position in the input collection.
///
/// The input index rides along through the tree so query results can be
/// mapped back to the original records in input order.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexedPoint {
    pub x: f64,
    pub y: f64,
    pub idx: usize,
}

impl RstarPoint for IndexedPoint {
    type Scalar = f64;
    const DIMENSIONS: usize = 2;

    fn generate(mut generator: impl FnMut(usize) -> Self::Scalar) -> Self {
        Self {
            x: generator(0),
            y: generator(1),
            idx: usize::MAX,
        }
    }

    fn nth(&self, index: usize) -> Self::Scalar {
        match index {
            0 => self.x,
            1 => self.y,
            _ => unreachable!(),
        }
    }

    fn nth_mut(&mut self, index: usize) -> &mut Self::Scalar {
        match index {
            0 => &mut self.x,
            1 => &mut self.y,
            _ => unreachable!(),
        }
    }
}

/// Bulk-loaded R-tree over a point collection.
pub struct PointIndex {
    tree: RTree<IndexedPoint>,
}

impl PointIndex {
    /// Bulk-load an index over the collection's points.
    pub fn build(points: &PointCollection) -> Self {
        let items: Vec<IndexedPoint> = points
            .iter()
            .enumerate()
            .map(|(idx, record)| IndexedPoint {
                x: record.x(),
                y: record.y(),
                idx,
            })
            .collect();

        log::debug!("bulk-loading point index over {} points", items.len());
        Self {
            tree: RTree::bulk_load(items),
        }
    }

    /// Number of indexed points.
    pub fn len(&self) -> usize {
        self.tree.size()
    }

    /// Whether the index is empty.
    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    /// Input indices of points intersecting the query window.
    ///
    /// This is a bounding-box pre-filter; callers must still apply their
    /// exact predicate to every returned candidate.
    pub fn query_bbox(&self, window: &Rect<f64>) -> Vec<usize> {
        let envelope = AABB::from_corners(
            IndexedPoint {
                x: window.min().x,
                y: window.min().y,
                idx: usize::MAX,
            },
            IndexedPoint {
                x: window.max().x,
                y: window.max().y,
                idx: usize::MAX,
            },
        );

        self.tree
            .locate_in_envelope_intersecting(&envelope)
            .map(|point| point.idx)
            .collect()
    }

    /// Iterate input indices of candidates in ascending distance from
    /// `target`.
    ///
    /// Ordering comes from the tree's squared-distance metric; ties are
    /// yielded in unspecified order. The iterator supplies candidate
    /// order only — callers that report distances must compute them with
    /// their own distance function, so that indexed and brute-force paths
    /// share a single formula.
    pub fn nearest_iter<'a>(&'a self, target: &Point<f64>) -> impl Iterator<Item = usize> + 'a {
        let query = IndexedPoint {
            x: target.x(),
            y: target.y(),
            idx: usize::MAX,
        };

        self.tree
            .nearest_neighbor_iter(&query)
            .map(|point| point.idx)
    }
}

/// A geometry's bounding box carrying its position in the input slice.
#[derive(Debug, Clone, PartialEq)]
struct IndexedGeometry {
    bbox: AABB<[f64; 2]>,
    idx: usize,
}

impl RTreeObject for IndexedGeometry {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.bbox
    }
}

impl PointDistance for IndexedGeometry {
    // Bounding-box distance: an admissible lower bound on the exact
    // geometry distance, which is what makes the nearest walk terminate
    // with the true nearest geometry.
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        self.bbox.distance_2(point)
    }
}

/// Bulk-loaded R-tree over arbitrary geometries, keyed by bounding box.
pub struct GeometryIndex {
    tree: RTree<IndexedGeometry>,
}

impl GeometryIndex {
    /// Bulk-load an index over the geometries' bounding boxes.
    ///
    /// Degenerate geometries without a bounding rectangle are left out of
    /// the tree (exhaustive search skips them too, as they have no
    /// defined distance).
    pub fn build(geometries: &[Geometry<f64>]) -> Self {
        let items: Vec<IndexedGeometry> = geometries
            .iter()
            .enumerate()
            .filter_map(|(idx, geom)| {
                let rect = geometry::bounds(geom)?;
                Some(IndexedGeometry {
                    bbox: AABB::from_corners(
                        [rect.min().x, rect.min().y],
                        [rect.max().x, rect.max().y],
                    ),
                    idx,
                })
            })
            .collect();

        log::debug!("bulk-loading geometry index over {} envelopes", items.len());
        Self {
            tree: RTree::bulk_load(items),
        }
    }

    /// Whether the index is empty.
    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    /// Find the geometry nearest to `target`, refining bounding-box
    /// candidates with the caller's exact distance function.
    ///
    /// Walks candidates in ascending bounding-box distance and stops once
    /// the next candidate's lower bound exceeds the best exact distance
    /// found, so the returned `(input index, distance)` always matches
    /// exhaustive search. Distance ties resolve to the smallest input
    /// index.
    pub fn nearest_by<F>(&self, target: &Point<f64>, exact: F) -> Option<(usize, f64)>
    where
        F: Fn(usize) -> Option<f64>,
    {
        let query = [target.x(), target.y()];
        let mut best: Option<(usize, f64)> = None;

        for (item, bbox_distance_2) in self.tree.nearest_neighbor_iter_with_distance_2(&query) {
            if let Some((_, best_distance)) = best
                && bbox_distance_2 > best_distance * best_distance
            {
                break;
            }

            let Some(exact_distance) = exact(item.idx) else {
                continue;
            };

            match best {
                None => best = Some((item.idx, exact_distance)),
                Some((best_idx, best_distance)) => {
                    if exact_distance < best_distance
                        || (exact_distance == best_distance && item.idx < best_idx)
                    {
                        best = Some((item.idx, exact_distance));
                    }
                }
            }
        }

        best
    }
}
