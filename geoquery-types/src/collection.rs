use serde::{Deserialize, Serialize};

use crate::record::PointRecord;

/// An ordered sequence of [`PointRecord`]s.
///
/// Order is the input order and is preserved through tagging; filtering
/// keeps the relative order of surviving records, and ranked queries order
/// their output by rank instead.
///
/// # Examples
///
/// ```
/// use geoquery_types::{PointCollection, PointRecord};
///
/// let collection: PointCollection =
///     vec![PointRecord::new(0.0, 0.0), PointRecord::new(3.0, 0.0)].into();
/// assert_eq!(collection.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PointCollection {
    records: Vec<PointRecord>,
}

impl PointCollection {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a collection from records, preserving their order.
    pub fn from_records(records: Vec<PointRecord>) -> Self {
        Self { records }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the collection holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Get the record at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&PointRecord> {
        self.records.get(index)
    }

    /// Append a record at the end.
    pub fn push(&mut self, record: PointRecord) {
        self.records.push(record);
    }

    /// Iterate over records in order.
    pub fn iter(&self) -> std::slice::Iter<'_, PointRecord> {
        self.records.iter()
    }

    /// Borrow the underlying records.
    pub fn records(&self) -> &[PointRecord] {
        &self.records
    }

    /// Consume the collection, yielding its records.
    pub fn into_records(self) -> Vec<PointRecord> {
        self.records
    }
}

impl From<Vec<PointRecord>> for PointCollection {
    fn from(records: Vec<PointRecord>) -> Self {
        Self::from_records(records)
    }
}

impl FromIterator<PointRecord> for PointCollection {
    fn from_iter<I: IntoIterator<Item = PointRecord>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for PointCollection {
    type Item = PointRecord;
    type IntoIter = std::vec::IntoIter<PointRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a> IntoIterator for &'a PointCollection {
    type Item = &'a PointRecord;
    type IntoIter = std::slice::Iter<'a, PointRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preserves_insertion_order() {
        let mut collection = PointCollection::new();
        for i in 0..5 {
            collection.push(PointRecord::new(i as f64, 0.0));
        }

        let xs: Vec<f64> = collection.iter().map(|r| r.x()).collect();
        assert_eq!(xs, vec![0.0, 1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn from_iterator_collects() {
        let collection: PointCollection =
            (0..3).map(|i| PointRecord::new(i as f64, i as f64)).collect();
        assert_eq!(collection.len(), 3);
        assert_eq!(collection.get(2).unwrap().y(), 2.0);
    }
}
