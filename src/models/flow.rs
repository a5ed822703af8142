//! The nested flow document and its codec primitives.
//!
//! The flow document encodes parent/child menu relationships with no payload:
//! a JSON object maps child keys to further structure (sub-menus), a JSON
//! array lists terminal option keys. `FlowNode` models both shapes explicitly
//! instead of working on untyped JSON, and keeps branch entries in document
//! order so an export does not reshuffle the device's menus.

use serde::de::{MapAccess, SeqAccess, Visitor};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::{HashSet, VecDeque};
use std::fmt;

/// One node of the flow document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowNode {
    /// A mapping from child key to further structure. An empty branch is a
    /// menu with no expanded children yet.
    Branch(Vec<(String, FlowNode)>),
    /// A sequence of terminal option keys with no further nesting.
    Leaves(Vec<String>),
}

impl Default for FlowNode {
    fn default() -> Self {
        Self::empty_branch()
    }
}

impl FlowNode {
    /// Creates an empty mapping node (`{}`).
    #[must_use]
    pub const fn empty_branch() -> Self {
        Self::Branch(Vec::new())
    }

    /// Creates an empty sequence node (`[]`).
    #[must_use]
    pub const fn empty_leaves() -> Self {
        Self::Leaves(Vec::new())
    }

    /// Returns true if this node is a mapping.
    #[must_use]
    pub const fn is_branch(&self) -> bool {
        matches!(self, Self::Branch(_))
    }

    /// Returns true if this node has no children.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Branch(entries) => entries.is_empty(),
            Self::Leaves(keys) => keys.is_empty(),
        }
    }

    /// Child keys of this node, in document order. Both mapping keys and
    /// sequence elements are child identifiers.
    #[must_use]
    pub fn child_keys(&self) -> Vec<&str> {
        match self {
            Self::Branch(entries) => entries.iter().map(|(key, _)| key.as_str()).collect(),
            Self::Leaves(keys) => keys.iter().map(String::as_str).collect(),
        }
    }

    /// Looks up a direct child of a mapping node.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Self> {
        let Self::Branch(entries) = self else {
            return None;
        };
        entries
            .iter()
            .find(|(entry_key, _)| entry_key == key)
            .map(|(_, value)| value)
    }

    /// Mutable lookup of a direct child of a mapping node.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Self> {
        let Self::Branch(entries) = self else {
            return None;
        };
        entries
            .iter_mut()
            .find(|(entry_key, _)| entry_key == key)
            .map(|(_, value)| value)
    }

    /// Inserts or replaces a direct child of a mapping node. Does nothing on
    /// a sequence node.
    pub fn insert(&mut self, key: impl Into<String>, value: Self) {
        let Self::Branch(entries) = self else {
            return;
        };
        let key = key.into();
        if let Some(entry) = entries.iter_mut().find(|(entry_key, _)| *entry_key == key) {
            entry.1 = value;
        } else {
            entries.push((key, value));
        }
    }

    /// Removes a direct child of a mapping node, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<Self> {
        let Self::Branch(entries) = self else {
            return None;
        };
        let idx = entries.iter().position(|(entry_key, _)| entry_key == key)?;
        Some(entries.remove(idx).1)
    }

    /// Finds the first occurrence of `target_key` as a mapping key, in
    /// depth-first document order, and replaces its value with
    /// `transform(current_value)`.
    ///
    /// The search descends into mapping values only; sequences cannot contain
    /// mapping keys and are never entered. Returns the rebuilt document, or
    /// `None` when the key does not occur (callers keep the original). Only
    /// the first match is transformed; a key appearing more than once as a
    /// mapping key is outside the document contract.
    #[must_use]
    pub fn locate_and_transform<F>(&self, target_key: &str, transform: F) -> Option<Self>
    where
        F: FnOnce(Self) -> Self,
    {
        let path = self.find_path(target_key)?;
        let mut doc = self.clone();

        let (last, ancestors) = path.split_last()?;
        let mut node = &mut doc;
        for idx in ancestors {
            let Self::Branch(entries) = node else {
                return None;
            };
            node = &mut entries.get_mut(*idx)?.1;
        }
        let Self::Branch(entries) = node else {
            return None;
        };
        let slot = &mut entries.get_mut(*last)?.1;
        let current = std::mem::replace(slot, Self::empty_leaves());
        *slot = transform(current);
        Some(doc)
    }

    /// Depth-first entry-index path to the first mapping entry keyed
    /// `target_key`. At each branch, a direct key match wins over descent.
    fn find_path(&self, target_key: &str) -> Option<Vec<usize>> {
        let Self::Branch(entries) = self else {
            return None;
        };
        for (idx, (key, value)) in entries.iter().enumerate() {
            if key == target_key {
                return Some(vec![idx]);
            }
            if let Some(mut rest) = value.find_path(target_key) {
                rest.insert(0, idx);
                return Some(rest);
            }
        }
        None
    }

    /// Rewrites every occurrence of `old_key` to `new_key` throughout the
    /// document, both as a mapping key and as a sequence element.
    ///
    /// Exact-token matches only; this is a global rewrite, not a targeted
    /// single-path edit.
    #[must_use]
    pub fn rename_key(&self, old_key: &str, new_key: &str) -> Self {
        let rename = |key: &String| {
            if key == old_key {
                new_key.to_string()
            } else {
                key.clone()
            }
        };
        match self {
            Self::Leaves(keys) => Self::Leaves(keys.iter().map(rename).collect()),
            Self::Branch(entries) => Self::Branch(
                entries
                    .iter()
                    .map(|(key, value)| (rename(key), value.rename_key(old_key, new_key)))
                    .collect(),
            ),
        }
    }

    /// Collects every key reachable from the top-level entry `root_key`,
    /// including `root_key` itself, by breadth-first traversal. Mapping keys
    /// and sequence elements both count as reachable node identifiers.
    #[must_use]
    pub fn reachable_keys(&self, root_key: &str) -> HashSet<String> {
        let mut keys = HashSet::new();
        keys.insert(root_key.to_string());

        let mut queue = VecDeque::new();
        if let Some(root) = self.get(root_key) {
            queue.push_back(root);
        }

        while let Some(node) = queue.pop_front() {
            match node {
                Self::Leaves(leaf_keys) => {
                    for key in leaf_keys {
                        keys.insert(key.clone());
                    }
                }
                Self::Branch(entries) => {
                    for (key, value) in entries {
                        keys.insert(key.clone());
                        queue.push_back(value);
                    }
                }
            }
        }

        keys
    }

    /// Every key mentioned anywhere in the document, mapping keys and
    /// sequence elements alike.
    #[must_use]
    pub fn all_keys(&self) -> HashSet<String> {
        let mut keys = HashSet::new();
        self.collect_keys(&mut keys);
        keys
    }

    fn collect_keys(&self, keys: &mut HashSet<String>) {
        match self {
            Self::Leaves(leaf_keys) => {
                for key in leaf_keys {
                    keys.insert(key.clone());
                }
            }
            Self::Branch(entries) => {
                for (key, value) in entries {
                    keys.insert(key.clone());
                    value.collect_keys(keys);
                }
            }
        }
    }
}

impl Serialize for FlowNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Branch(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
            Self::Leaves(keys) => {
                let mut seq = serializer.serialize_seq(Some(keys.len()))?;
                for key in keys {
                    seq.serialize_element(key)?;
                }
                seq.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for FlowNode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct FlowNodeVisitor;

        impl<'de> Visitor<'de> for FlowNodeVisitor {
            type Value = FlowNode;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a menu flow object or an array of option keys")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::new();
                while let Some((key, value)) = map.next_entry::<String, FlowNode>()? {
                    entries.push((key, value));
                }
                Ok(FlowNode::Branch(entries))
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
                let mut keys = Vec::new();
                while let Some(key) = seq.next_element::<String>()? {
                    keys.push(key);
                }
                Ok(FlowNode::Leaves(keys))
            }
        }

        deserializer.deserialize_any(FlowNodeVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_doc() -> FlowNode {
        serde_json::from_str(
            r#"{
                "audio_menu": {
                    "relax_menu": ["rain", "waves"],
                    "alerts": ["chime"]
                },
                "video_menu": ["intro"]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_deserialize_shapes() {
        let doc = sample_doc();
        let audio = doc.get("audio_menu").unwrap();
        assert!(audio.is_branch());
        assert_eq!(audio.child_keys(), vec!["relax_menu", "alerts"]);

        let video = doc.get("video_menu").unwrap();
        assert!(!video.is_branch());
        assert_eq!(video.child_keys(), vec!["intro"]);

        let empty_branch: FlowNode = serde_json::from_str("{}").unwrap();
        assert!(empty_branch.is_branch() && empty_branch.is_empty());

        let empty_leaves: FlowNode = serde_json::from_str("[]").unwrap();
        assert!(!empty_leaves.is_branch() && empty_leaves.is_empty());
    }

    #[test]
    fn test_serialize_preserves_order() {
        let doc = sample_doc();
        let out = serde_json::to_string(&doc).unwrap();
        let audio_pos = out.find("audio_menu").unwrap();
        let video_pos = out.find("video_menu").unwrap();
        assert!(audio_pos < video_pos);

        let reparsed: FlowNode = serde_json::from_str(&out).unwrap();
        assert_eq!(doc, reparsed);
    }

    #[test]
    fn test_insert_replaces_existing() {
        let mut doc = sample_doc();
        doc.insert("video_menu", FlowNode::empty_branch());
        assert!(doc.get("video_menu").unwrap().is_branch());
        assert_eq!(doc.child_keys().len(), 2);

        doc.insert("new_menu", FlowNode::empty_leaves());
        assert_eq!(doc.child_keys(), vec!["audio_menu", "video_menu", "new_menu"]);
    }

    #[test]
    fn test_locate_and_transform_deep() {
        let doc = sample_doc();
        let updated = doc
            .locate_and_transform("relax_menu", |node| {
                let FlowNode::Leaves(mut keys) = node else {
                    panic!("expected leaves");
                };
                keys.push("wind".to_string());
                FlowNode::Leaves(keys)
            })
            .unwrap();

        let relax = updated.get("audio_menu").unwrap().get("relax_menu").unwrap();
        assert_eq!(relax.child_keys(), vec!["rain", "waves", "wind"]);
        // Untouched siblings survive the rebuild
        assert_eq!(
            updated.get("audio_menu").unwrap().get("alerts").unwrap(),
            doc.get("audio_menu").unwrap().get("alerts").unwrap()
        );
    }

    #[test]
    fn test_locate_and_transform_missing_key() {
        let doc = sample_doc();
        assert!(doc
            .locate_and_transform("nonexistent", |node| node)
            .is_none());
    }

    #[test]
    fn test_locate_and_transform_ignores_sequence_elements() {
        // "rain" occurs as a sequence element, not a mapping key
        let doc = sample_doc();
        assert!(doc.locate_and_transform("rain", |node| node).is_none());
    }

    #[test]
    fn test_rename_key_everywhere() {
        let doc: FlowNode = serde_json::from_str(
            r#"{"menu": {"vol": {}}, "shortcuts": ["vol", "mute"]}"#,
        )
        .unwrap();

        let renamed = doc.rename_key("vol", "volume");
        assert!(renamed.get("menu").unwrap().get("volume").is_some());
        assert!(renamed.get("menu").unwrap().get("vol").is_none());
        assert_eq!(
            renamed.get("shortcuts").unwrap().child_keys(),
            vec!["volume", "mute"]
        );
    }

    #[test]
    fn test_rename_round_trip() {
        let doc = sample_doc();
        let there = doc.rename_key("relax_menu", "calm_menu");
        let back = there.rename_key("calm_menu", "relax_menu");
        assert_eq!(doc, back);
    }

    #[test]
    fn test_reachable_keys_example() {
        let doc: FlowNode =
            serde_json::from_str(r#"{"settings_menu": {"x": ["y", "z"]}}"#).unwrap();
        let keys = doc.reachable_keys("settings_menu");
        let expected: HashSet<String> = ["settings_menu", "x", "y", "z"]
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(keys, expected);
    }

    #[test]
    fn test_reachable_keys_absent_root() {
        let doc = sample_doc();
        let keys = doc.reachable_keys("missing_root");
        assert_eq!(keys.len(), 1);
        assert!(keys.contains("missing_root"));
    }

    #[test]
    fn test_all_keys() {
        let doc = sample_doc();
        let keys = doc.all_keys();
        for key in [
            "audio_menu",
            "relax_menu",
            "rain",
            "waves",
            "alerts",
            "chime",
            "video_menu",
            "intro",
        ] {
            assert!(keys.contains(key), "missing {key}");
        }
        assert_eq!(keys.len(), 8);
    }
}
