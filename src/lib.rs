//! Planar vector-geoprocessing queries over GeoJSON point sets.
//!
//! The engines operate on already-projected (metric) coordinates and come
//! in brute-force and R-tree-accelerated forms with identical results:
//! containment tagging/filtering, radius search, exact k-nearest-neighbor
//! ranking, and nearest-geometry lookup.
//!
//! ```rust
//! use geo::{polygon, Geometry, Point};
//! use geoquery::prelude::*;
//!
//! let points: PointCollection =
//!     vec![PointRecord::new(5.0, 5.0), PointRecord::new(20.0, 20.0)].into();
//! let square: Geometry = polygon![
//!     (x: 0.0, y: 0.0), (x: 10.0, y: 0.0), (x: 10.0, y: 10.0), (x: 0.0, y: 10.0),
//! ].into();
//!
//! let inside = filter_points_within(&points, &square, ContainmentMode::Strict, true);
//! assert_eq!(inside.len(), 1);
//!
//! let target: Geometry = Point::new(0.0, 0.0).into();
//! let top1 = knn_points(&points, &target, 1, true)?;
//! assert_eq!(top1.get(0).unwrap().property("knn_rank"), Some(&1.into()));
//! # Ok::<(), geoquery::QueryError>(())
//! ```

pub mod analysis;
pub mod error;
pub mod geometry;
pub mod index;
pub mod io;
pub mod knn;
pub mod query;
pub mod radius;

pub use error::{QueryError, Result};

pub use geo::{Geometry, Point, Polygon, Rect};

pub use geoquery_types::{PointCollection, PointRecord, Properties};

pub use query::{ContainmentMode, filter_points_within, tag_points_within};

pub use knn::knn_points;

pub use radius::filter_by_distance;

pub use analysis::{nearest, nearest_indexed};

pub use index::{GeometryIndex, PointIndex};

pub use io::{
    point_collection_from_geojson, point_collection_to_geojson, read_geojson, write_geojson,
};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports
pub mod prelude {

    pub use crate::{QueryError, Result};

    pub use geo::{Geometry, Point, Polygon, Rect};

    pub use crate::{PointCollection, PointRecord, Properties};

    pub use crate::{ContainmentMode, filter_points_within, tag_points_within};

    pub use crate::{filter_by_distance, knn_points};

    pub use crate::{nearest, nearest_indexed};

    pub use crate::io::{point_collection_from_geojson, point_collection_to_geojson};
}
