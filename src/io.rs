//! GeoJSON boundary: decoding point collections and reference geometries,
//! encoding results, and file helpers.
//!
//! All structural validation happens here, not inside the query engines.
//! Decoding keeps only Point features from a FeatureCollection (other
//! feature types are skipped); anything that is not a FeatureCollection,
//! or a Point feature with malformed coordinates, is rejected with
//! [`QueryError::InvalidInputKind`]. String, number, and boolean property
//! values round-trip losslessly.

use std::fs;
use std::path::Path;

use geo::Point;
use geojson::{Feature, FeatureCollection, GeoJson};

use geoquery_types::{PointCollection, PointRecord};

use crate::error::{QueryError, Result};

/// Decode a point collection from a GeoJSON FeatureCollection.
///
/// Non-point features are skipped, matching the behavior of treating the
/// input as a point layer.
///
/// # Examples
///
/// ```
/// use geoquery::io::point_collection_from_geojson;
///
/// let geojson = r#"{
///     "type": "FeatureCollection",
///     "features": [
///         {"type": "Feature", "properties": {"id": 1},
///          "geometry": {"type": "Point", "coordinates": [3.0, 4.0]}}
///     ]
/// }"#.parse().unwrap();
///
/// let points = point_collection_from_geojson(&geojson)?;
/// assert_eq!(points.len(), 1);
/// # Ok::<(), geoquery::QueryError>(())
/// ```
pub fn point_collection_from_geojson(geojson: &GeoJson) -> Result<PointCollection> {
    let GeoJson::FeatureCollection(fc) = geojson else {
        return Err(QueryError::InvalidInputKind(
            "points input must be a GeoJSON FeatureCollection".to_string(),
        ));
    };

    let mut records = Vec::with_capacity(fc.features.len());
    for feature in &fc.features {
        let Some(geometry) = &feature.geometry else {
            continue;
        };
        let geojson::Value::Point(coords) = &geometry.value else {
            continue;
        };
        if coords.len() < 2 {
            return Err(QueryError::InvalidInputKind(
                "Point coordinates must have x and y".to_string(),
            ));
        }
        let (x, y) = (coords[0], coords[1]);
        if !x.is_finite() || !y.is_finite() {
            return Err(QueryError::InvalidInputKind(format!(
                "Point coordinates must be finite, got ({x}, {y})"
            )));
        }

        let properties = feature.properties.clone().unwrap_or_default();
        records.push(PointRecord::from_parts(Point::new(x, y), properties));
    }

    log::debug!(
        "decoded {} point features from {} total",
        records.len(),
        fc.features.len()
    );
    Ok(records.into())
}

/// Encode a point collection as a GeoJSON FeatureCollection, preserving
/// record order and properties.
pub fn point_collection_to_geojson(points: &PointCollection) -> GeoJson {
    let features = points
        .iter()
        .map(|record| Feature {
            bbox: None,
            geometry: Some(geojson::Geometry::new(geojson::Value::Point(vec![
                record.x(),
                record.y(),
            ]))),
            id: None,
            properties: Some(record.properties.clone()),
            foreign_members: None,
        })
        .collect();

    GeoJson::FeatureCollection(FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    })
}

/// Convert a GeoJSON geometry (reference polygon, target point) into a
/// `geo` geometry.
pub fn geometry_from_geojson(geometry: &geojson::Geometry) -> Result<geo::Geometry<f64>> {
    geo::Geometry::<f64>::try_from(geometry)
        .map_err(|err| QueryError::InvalidInputKind(err.to_string()))
}

/// Convert a `geo` geometry back into GeoJSON.
pub fn geometry_to_geojson(geometry: &geo::Geometry<f64>) -> geojson::Geometry {
    geojson::Geometry::new(geojson::Value::from(geometry))
}

/// Read and parse a GeoJSON file.
pub fn read_geojson<P: AsRef<Path>>(path: P) -> Result<GeoJson> {
    let path = path.as_ref();
    log::debug!("reading GeoJSON from {}", path.display());

    let contents = fs::read_to_string(path)?;
    contents
        .parse::<GeoJson>()
        .map_err(|err| QueryError::Serialization(err.to_string()))
}

/// Write a GeoJSON value to disk, creating parent directories as needed.
pub fn write_geojson<P: AsRef<Path>>(path: P, geojson: &GeoJson) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let contents = serde_json::to_string_pretty(geojson)
        .map_err(|err| QueryError::Serialization(err.to_string()))?;
    fs::write(path, contents)?;

    log::debug!("wrote GeoJSON to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const MIXED_FC: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {"type": "Feature", "properties": {"id": 1, "name": "a"},
             "geometry": {"type": "Point", "coordinates": [0.0, 0.0]}},
            {"type": "Feature", "properties": {"id": 2},
             "geometry": {"type": "Polygon",
                          "coordinates": [[[0,0],[1,0],[1,1],[0,0]]]}},
            {"type": "Feature", "properties": {"id": 3, "ok": true},
             "geometry": {"type": "Point", "coordinates": [3.0, 4.0]}}
        ]
    }"#;

    #[test]
    fn decoding_keeps_only_point_features_in_order() {
        let geojson: GeoJson = MIXED_FC.parse().unwrap();
        let points = point_collection_from_geojson(&geojson).unwrap();

        assert_eq!(points.len(), 2);
        assert_eq!(points.get(0).unwrap().property("id"), Some(&1.into()));
        assert_eq!(points.get(1).unwrap().property("id"), Some(&3.into()));
        assert_eq!(points.get(1).unwrap().x(), 3.0);
    }

    #[test]
    fn rejects_non_feature_collection() {
        let geojson: GeoJson = r#"{"type": "Point", "coordinates": [0.0, 0.0]}"#.parse().unwrap();
        let result = point_collection_from_geojson(&geojson);
        assert!(matches!(result, Err(QueryError::InvalidInputKind(_))));
    }

    #[test]
    fn rejects_short_coordinates() {
        let geojson: GeoJson = r#"{
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature", "properties": {},
                 "geometry": {"type": "Point", "coordinates": [1.0]}}
            ]
        }"#
        .parse()
        .unwrap();
        let result = point_collection_from_geojson(&geojson);
        assert!(matches!(result, Err(QueryError::InvalidInputKind(_))));
    }

    #[test]
    fn collection_round_trip_preserves_properties() {
        let geojson: GeoJson = MIXED_FC.parse().unwrap();
        let points = point_collection_from_geojson(&geojson).unwrap();

        let encoded = point_collection_to_geojson(&points);
        let back = point_collection_from_geojson(&encoded).unwrap();
        assert_eq!(back, points);
    }

    #[test]
    fn geometry_conversion_round_trip() {
        let polygon: geojson::Geometry = serde_json::from_str(
            r#"{"type": "Polygon", "coordinates": [[[0,0],[2,0],[2,2],[0,2],[0,0]]]}"#,
        )
        .unwrap();

        let converted = geometry_from_geojson(&polygon).unwrap();
        assert!(matches!(converted, geo::Geometry::Polygon(_)));

        let back = geometry_to_geojson(&converted);
        assert_eq!(back.value, polygon.value);
    }
}
