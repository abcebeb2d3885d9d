// ABOUTME: Insertion-ordered course map and its pair-list wire representation.
// ABOUTME: JSON objects carry no order guarantee for browsers, so the wire uses [[key, value], ...].

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Wire form of a `CourseMap`: an ordered list of `[key, value]` pairs.
pub type PairList = Vec<Vec<String>>;

/// Target courses keyed by course code, iterated in first-insertion order.
///
/// Equality is order-sensitive: two maps with the same entries in a different
/// order are not equal.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CourseMap(IndexMap<String, String>);

impl CourseMap {
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    /// Insert or update an entry. An existing key keeps its original position.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl PartialEq for CourseMap {
    fn eq(&self, other: &Self) -> bool {
        self.0.len() == other.0.len() && self.0.iter().eq(other.0.iter())
    }
}

impl Eq for CourseMap {}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for CourseMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = CourseMap::new();
        for (k, v) in iter {
            map.set(k, v);
        }
        map
    }
}

/// Convert a course map into its pair-list form, one pair per entry, in order.
pub fn to_pair_list(map: &CourseMap) -> PairList {
    map.iter()
        .map(|(key, value)| vec![key.to_string(), value.to_string()])
        .collect()
}

/// Build a fresh course map from a pair list, inserting in list order.
///
/// Elements that are not exactly `[key, value]` are logged and skipped; the
/// remaining elements are still converted.
pub fn to_course_map(pairs: PairList) -> CourseMap {
    let mut map = CourseMap::new();
    for pair in pairs {
        match <[String; 2]>::try_from(pair) {
            Ok([key, value]) => map.set(key, value),
            Err(pair) => {
                tracing::warn!(?pair, "skipping course entry that is not a [key, value] pair");
            }
        }
    }
    map
}
