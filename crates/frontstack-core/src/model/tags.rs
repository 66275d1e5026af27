//! Resource tags

use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One `{"Key": .., "Value": ..}` entry as the provider renders it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Tag {
    pub key: String,
    pub value: String,
}

/// Key-unique tag set
///
/// Inserting a pair that is already present is a no-op; inserting an
/// existing key with a different value replaces it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tags {
    entries: BTreeMap<String, String>,
}

impl Tags {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a tag. Returns true if the set changed.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> bool {
        let key = key.into();
        let value = value.into();
        match self.entries.get(&key) {
            Some(existing) if *existing == value => false,
            _ => {
                self.entries.insert(key, value);
                true
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// True if the exact pair is present
    pub fn contains(&self, key: &str, value: &str) -> bool {
        self.get(key) == Some(value)
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.entries.remove(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Render as the provider's tag list, sorted by key
    pub fn to_list(&self) -> Vec<Tag> {
        self.entries
            .iter()
            .map(|(key, value)| Tag {
                key: key.clone(),
                value: value.clone(),
            })
            .collect()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Tags {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut tags = Tags::new();
        for (key, value) in iter {
            tags.insert(key, value);
        }
        tags
    }
}

impl Serialize for Tags {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_list().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Tags {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let list = Vec::<Tag>::deserialize(deserializer)?;
        Ok(list.into_iter().map(|t| (t.key, t.value)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_same_pair_is_noop() {
        let mut tags = Tags::new();
        assert!(tags.insert("Prefix", "acme"));
        assert!(!tags.insert("Prefix", "acme"));
        assert_eq!(tags.len(), 1);
    }

    #[test]
    fn test_insert_replaces_value() {
        let mut tags = Tags::new();
        tags.insert("Prefix", "acme");
        assert!(tags.insert("Prefix", "globex"));
        assert_eq!(tags.get("Prefix"), Some("globex"));
        assert_eq!(tags.len(), 1);
    }

    #[test]
    fn test_serialize_as_sorted_list() {
        let tags: Tags = [("Prefix", "acme"), ("Application", "acme-frontend")]
            .into_iter()
            .collect();
        let json = serde_json::to_value(&tags).unwrap();
        assert_eq!(
            json,
            serde_json::json!([
                { "Key": "Application", "Value": "acme-frontend" },
                { "Key": "Prefix", "Value": "acme" }
            ])
        );

        let back: Tags = serde_json::from_value(json).unwrap();
        assert_eq!(back, tags);
    }
}
