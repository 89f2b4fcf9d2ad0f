use geo::Point;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Open property map attached to a point record.
///
/// Keys are arbitrary strings; values are JSON values, so string, number,
/// and boolean properties survive a GeoJSON round-trip unchanged.
pub type Properties = Map<String, Value>;

/// A planar point with an open mapping of auxiliary properties.
///
/// Records are treated as immutable by the query engines: deriving a new
/// property produces a copy via [`PointRecord::with_property`] rather than
/// mutating the original.
///
/// # Examples
///
/// ```
/// use geoquery_types::PointRecord;
///
/// let record = PointRecord::new(-74.0060, 40.7128)
///     .with_property("name", "NYC".into());
///
/// assert_eq!(record.x(), -74.0060);
/// assert_eq!(record.property("name"), Some(&"NYC".into()));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointRecord {
    /// The planar coordinate (x/y in a metric CRS).
    pub point: Point<f64>,
    /// Auxiliary key/value properties, carried through every query.
    pub properties: Properties,
}

impl PointRecord {
    /// Create a record at the given coordinates with no properties.
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            point: Point::new(x, y),
            properties: Properties::new(),
        }
    }

    /// Create a record from an existing point and property map.
    pub fn from_parts(point: Point<f64>, properties: Properties) -> Self {
        Self { point, properties }
    }

    /// Get the x coordinate.
    pub fn x(&self) -> f64 {
        self.point.x()
    }

    /// Get the y coordinate.
    pub fn y(&self) -> f64 {
        self.point.y()
    }

    /// Get a reference to the underlying point.
    pub fn point(&self) -> &Point<f64> {
        &self.point
    }

    /// Look up a property value by key.
    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }

    /// Return a copy of this record with `key` set to `value`.
    ///
    /// An existing value under the same key is overwritten in the copy;
    /// the original record is untouched.
    pub fn with_property(&self, key: &str, value: Value) -> Self {
        let mut out = self.clone();
        out.properties.insert(key.to_string(), value);
        out
    }

    /// Return a copy of this record with `key` removed, if present.
    pub fn without_property(&self, key: &str) -> Self {
        let mut out = self.clone();
        out.properties.remove(key);
        out
    }
}

impl From<Point<f64>> for PointRecord {
    fn from(point: Point<f64>) -> Self {
        Self {
            point,
            properties: Properties::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_property_copies() {
        let original = PointRecord::new(1.0, 2.0);
        let tagged = original.with_property("inside", true.into());

        assert!(original.properties.is_empty());
        assert_eq!(tagged.property("inside"), Some(&true.into()));
        assert_eq!(tagged.point(), original.point());
    }

    #[test]
    fn with_property_overwrites_in_copy_only() {
        let original = PointRecord::new(0.0, 0.0).with_property("dist", 1.0.into());
        let updated = original.with_property("dist", 2.0.into());

        assert_eq!(original.property("dist"), Some(&1.0.into()));
        assert_eq!(updated.property("dist"), Some(&2.0.into()));
    }

    #[test]
    fn without_property_strips_key() {
        let record = PointRecord::new(0.0, 0.0)
            .with_property("_inside", true.into())
            .with_property("id", 7.into());

        let stripped = record.without_property("_inside");
        assert_eq!(stripped.property("_inside"), None);
        assert_eq!(stripped.property("id"), Some(&7.into()));
    }

    #[test]
    fn serde_round_trip() {
        let record = PointRecord::new(3.0, 4.0).with_property("name", "a".into());
        let json = serde_json::to_string(&record).unwrap();
        let back: PointRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
