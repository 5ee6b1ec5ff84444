// src/packages/collection.rs

//! Ordered, read-only collections of decoded sub-records

use crate::packages::custom_property::CustomProperty;
use crate::packages::feature::Feature;
use serde::{Deserialize, Serialize};
use std::ops::Deref;

/// An ordered collection that cannot be modified after construction
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Collection<T> {
    items: Vec<T>,
}

/// Custom properties of a package, in native array order
pub type CustomPropertyCollection = Collection<CustomProperty>;

/// Features of a package, in native array order
pub type FeatureCollection = Collection<Feature>;

impl<T> Collection<T> {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T> From<Vec<T>> for Collection<T> {
    fn from(items: Vec<T>) -> Self {
        Self { items }
    }
}

impl<T> FromIterator<T> for Collection<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<T> Deref for Collection<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.items
    }
}

impl<'a, T> IntoIterator for &'a Collection<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T> IntoIterator for Collection<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_preserves_order() {
        let features: FeatureCollection = vec![
            Feature::new(Some("b".to_string()), Default::default()),
            Feature::new(Some("a".to_string()), Default::default()),
            Feature::new(Some("b".to_string()), Default::default()),
        ]
        .into();

        let names: Vec<_> = features.iter().map(|f| f.feature_name().unwrap()).collect();
        assert_eq!(names, vec!["b", "a", "b"]);
        assert_eq!(features.len(), 3);
        assert_eq!(features.get(1).unwrap().feature_name(), Some("a"));
        assert!(features.get(3).is_none());
    }

    #[test]
    fn test_empty_collection() {
        let properties = CustomPropertyCollection::default();
        assert!(properties.is_empty());
        assert_eq!((&properties).into_iter().count(), 0);
    }
}
