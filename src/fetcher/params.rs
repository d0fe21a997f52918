//! Request parameters accumulated across pages

use crate::types::StringMap;
use std::collections::BTreeMap;

/// Query parameters sent with every page request
///
/// Keys map to one or more values. Merging overwrites same-named keys and
/// never removes a key, so parameters picked up from an earlier page's
/// cursor stay in effect for every later page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestParams {
    values: BTreeMap<String, Vec<String>>,
}

impl RequestParams {
    /// Create an empty parameter set
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parameter set with one value per key
    pub fn from_map(map: &StringMap) -> Self {
        let mut params = Self::new();
        params.merge_map(map);
        params
    }

    /// Set a single-valued key, replacing previous values
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), vec![value.into()]);
    }

    /// Overwrite keys from a single-valued map
    pub fn merge_map(&mut self, map: &StringMap) {
        for (key, value) in map {
            self.insert(key.clone(), value.clone());
        }
    }

    /// Overwrite keys from query pairs
    ///
    /// Repeated keys in `pairs` become a multi-valued entry, in order.
    pub fn merge_query(&mut self, pairs: &[(String, String)]) {
        let mut grouped: BTreeMap<&str, Vec<String>> = BTreeMap::new();
        for (key, value) in pairs {
            grouped.entry(key.as_str()).or_default().push(value.clone());
        }

        for (key, values) in grouped {
            self.values.insert(key.to_string(), values);
        }
    }

    /// Values for a key
    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.values.get(key).map(Vec::as_slice)
    }

    /// Number of distinct keys
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether there are no parameters
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Flatten into `(key, value)` pairs, sorted by key
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        self.values
            .iter()
            .flat_map(|(key, values)| values.iter().map(move |v| (key.clone(), v.clone())))
            .collect()
    }
}
