//! # geoquery-types
//!
//! Core data-model types for the geoquery toolkit.
//!
//! This crate provides the fundamental types the query engines operate on:
//!
//! - **[`PointRecord`]**: a planar point plus an open property map
//! - **[`PointCollection`]**: an order-preserving sequence of point records
//!
//! All types are serializable with Serde and built on top of the `geo`
//! crate's geometric primitives.
//!
//! ## Examples
//!
//! ```rust
//! use geoquery_types::PointRecord;
//!
//! let record = PointRecord::new(3.0, 4.0);
//! let tagged = record.with_property("inside", true.into());
//! assert_eq!(tagged.property("inside"), Some(&true.into()));
//! ```

pub mod collection;
pub mod record;

pub use collection::PointCollection;
pub use record::{Properties, PointRecord};
