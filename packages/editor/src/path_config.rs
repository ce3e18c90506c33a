//! # Path Configuration
//!
//! A nested mapping addressed by a path of string segments and ending in
//! leaf values. Used two levels deep for name properties
//! (`document type → element type → attribute`), but any depth works.
//!
//! ## Updates
//!
//! [`PathConfig::set`] never mutates: it returns a new tree that rebuilds
//! the nodes along the path and shares every untouched sibling subtree
//! through `Arc`.
//!
//! - A segment missing at some level gets a fresh chain for the rest of the
//!   path, placed before the level's existing entries.
//! - A segment that exists is descended into; its siblings are kept as is.
//! - A leaf found where the path continues is replaced by a branch holding
//!   only the new path. The leaf's old value is dropped.
//!
//! ## JSON form
//!
//! Branches serialize as objects in entry order, leaves as plain values:
//!
//! ```text
//! { "glossary": { "entry": "term", "section": "id" } }
//! ```

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

/// Recursive key-path mapping
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathConfig<V> {
    Branch(Entries<V>),
    Leaf(V),
}

/// Ordered entries of one branch level
#[derive(Debug, Clone, PartialEq)]
pub struct Entries<V>(Vec<(String, Arc<PathConfig<V>>)>);

impl<V> Entries<V> {
    fn get(&self, key: &str) -> Option<&PathConfig<V>> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, subtree)| subtree.as_ref())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PathConfig<V>)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_ref()))
    }
}

impl<V> PathConfig<V> {
    /// Empty mapping
    pub fn new() -> Self {
        PathConfig::Branch(Entries(Vec::new()))
    }

    /// Value at `path`, if the path ends exactly at a leaf
    pub fn get<S: AsRef<str>>(&self, path: &[S]) -> Option<&V> {
        match self.subtree(path)? {
            PathConfig::Leaf(value) => Some(value),
            PathConfig::Branch(_) => None,
        }
    }

    /// Subtree at `path`. The empty path is `self`.
    pub fn subtree<S: AsRef<str>>(&self, path: &[S]) -> Option<&PathConfig<V>> {
        match path.split_first() {
            None => Some(self),
            Some((head, tail)) => match self {
                PathConfig::Branch(entries) => entries.get(head.as_ref())?.subtree(tail),
                PathConfig::Leaf(_) => None,
            },
        }
    }

    /// New tree in which `path` resolves to `value`
    pub fn set<S: AsRef<str>>(&self, path: &[S], value: V) -> PathConfig<V> {
        let Some((head, tail)) = path.split_first() else {
            return PathConfig::Leaf(value);
        };
        let head = head.as_ref();

        let entries: &[(String, Arc<PathConfig<V>>)] = match self {
            PathConfig::Branch(entries) => &entries.0,
            PathConfig::Leaf(_) => {
                tracing::debug!(segment = head, "replacing leaf value with nested path");
                &[]
            }
        };

        match entries.iter().position(|(k, _)| k == head) {
            Some(index) => {
                let mut next = entries.to_vec();
                let child = next[index].1.set(tail, value);
                next[index].1 = Arc::new(child);
                PathConfig::Branch(Entries(next))
            }
            None => {
                let mut next = Vec::with_capacity(entries.len() + 1);
                next.push((head.to_string(), Arc::new(Self::chain(tail, value))));
                next.extend(entries.iter().cloned());
                PathConfig::Branch(Entries(next))
            }
        }
    }

    /// In-place form of [`PathConfig::set`]
    pub fn insert<S: AsRef<str>>(&mut self, path: &[S], value: V) {
        *self = self.set(path, value);
    }

    /// Branch entries, or `None` for a leaf
    pub fn entries(&self) -> Option<&Entries<V>> {
        match self {
            PathConfig::Branch(entries) => Some(entries),
            PathConfig::Leaf(_) => None,
        }
    }

    /// True for a branch with no entries
    pub fn is_empty(&self) -> bool {
        matches!(self, PathConfig::Branch(entries) if entries.is_empty())
    }

    fn chain<S: AsRef<str>>(path: &[S], value: V) -> PathConfig<V> {
        path.iter().rev().fold(PathConfig::Leaf(value), |subtree, segment| {
            PathConfig::Branch(Entries(vec![(
                segment.as_ref().to_string(),
                Arc::new(subtree),
            )]))
        })
    }
}

impl<V> Default for PathConfig<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Serialize> Serialize for Entries<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, subtree) in &self.0 {
            map.serialize_entry(key, subtree.as_ref())?;
        }
        map.end()
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for Entries<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EntriesVisitor<V>(PhantomData<V>);

        impl<'de, V: Deserialize<'de>> Visitor<'de> for EntriesVisitor<V> {
            type Value = Entries<V>;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of path segments")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((key, subtree)) = access.next_entry::<String, PathConfig<V>>()? {
                    entries.push((key, Arc::new(subtree)));
                }
                Ok(Entries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor(PhantomData))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys<V>(config: &PathConfig<V>) -> Vec<&str> {
        config
            .entries()
            .map(|e| e.iter().map(|(k, _)| k).collect())
            .unwrap_or_default()
    }

    #[test]
    fn test_set_then_get_deep_path() {
        let config = PathConfig::new().set(&["a", "b", "c"], 2);

        assert_eq!(config.get(&["a", "b", "c"]), Some(&2));
        assert_eq!(config.get(&["a", "b"]), None);
        assert_eq!(config.get(&["a", "b", "c", "d"]), None);
        assert_eq!(config.get(&["x"]), None);
    }

    #[test]
    fn test_longer_path_replaces_leaf() {
        let config = PathConfig::new().set(&["a"], 1);
        assert_eq!(config.get(&["a"]), Some(&1));

        let config = config.set(&["a", "b"], 2);
        assert_eq!(config.get(&["a"]), None);
        assert_eq!(config.get(&["a", "b"]), Some(&2));
    }

    #[test]
    fn test_set_below_root_leaf() {
        let config = PathConfig::Leaf(7).set(&["a"], 1);

        assert_eq!(config.get(&["a"]), Some(&1));
        assert_eq!(config.get(&[] as &[&str]), None);
    }

    #[test]
    fn test_empty_path_yields_leaf() {
        let config = PathConfig::new().set(&[] as &[&str], "v");

        assert_eq!(config, PathConfig::Leaf("v"));
        assert_eq!(config.get(&[] as &[&str]), Some(&"v"));
    }

    #[test]
    fn test_siblings_preserved_at_every_level() {
        let config = PathConfig::new()
            .set(&["book", "chapter"], "id")
            .set(&["book", "entry"], "term")
            .set(&["article", "section"], "label");

        let updated = config.set(&["book", "figure"], "caption");

        assert_eq!(updated.get(&["book", "chapter"]), Some(&"id"));
        assert_eq!(updated.get(&["book", "entry"]), Some(&"term"));
        assert_eq!(updated.get(&["book", "figure"]), Some(&"caption"));
        assert_eq!(updated.get(&["article", "section"]), Some(&"label"));

        // The previous tree is untouched
        assert_eq!(config.get(&["book", "figure"]), None);
    }

    #[test]
    fn test_new_entries_are_prepended() {
        let config = PathConfig::new()
            .set(&["a"], 1)
            .set(&["b"], 2)
            .set(&["c"], 3);

        assert_eq!(keys(&config), vec!["c", "b", "a"]);

        // Overwriting keeps the entry where it is
        let config = config.set(&["a"], 10);
        assert_eq!(keys(&config), vec!["c", "b", "a"]);
        assert_eq!(config.get(&["a"]), Some(&10));
    }

    #[test]
    fn test_last_write_wins() {
        let mut config = PathConfig::new();
        config.insert(&["doc", "item"], "name".to_string());
        config.insert(&["doc", "item"], "key".to_string());

        assert_eq!(config.get(&["doc", "item"]).map(String::as_str), Some("key"));
        assert_eq!(config.subtree(&["doc"]).map(|s| keys(s)), Some(vec!["item"]));
    }

    #[test]
    fn test_untouched_siblings_are_shared() {
        let config = PathConfig::new()
            .set(&["left", "x"], 1)
            .set(&["right", "y"], 2);
        let updated = config.set(&["right", "z"], 3);

        let shared = |c: &PathConfig<i32>| match c {
            PathConfig::Branch(entries) => entries
                .0
                .iter()
                .find(|(k, _)| k == "left")
                .map(|(_, v)| Arc::clone(v)),
            PathConfig::Leaf(_) => None,
        };
        let before = shared(&config).unwrap();
        let after = shared(&updated).unwrap();
        assert!(Arc::ptr_eq(&before, &after));
    }

    #[test]
    fn test_json_round_trip_keeps_order() {
        let config = PathConfig::new()
            .set(&["glossary", "entry"], "term".to_string())
            .set(&["glossary", "section"], "id".to_string());

        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(json, r#"{"glossary":{"section":"id","entry":"term"}}"#);

        let parsed: PathConfig<String> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_json_leaf_and_empty_forms() {
        let leaf: PathConfig<String> = serde_json::from_str(r#""term""#).unwrap();
        assert_eq!(leaf, PathConfig::Leaf("term".to_string()));

        let empty: PathConfig<String> = serde_json::from_str("{}").unwrap();
        assert!(empty.is_empty());

        assert!(serde_json::from_str::<PathConfig<String>>("[1, 2]").is_err());
    }
}
