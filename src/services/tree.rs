//! The content/flow join engine.
//!
//! Builds the renderable tree by joining flat catalog records against the
//! flow structure. The result is derived state: rebuilt after every mutation,
//! never edited in place.

use std::collections::HashMap;

use crate::constants::{DEFAULT_COLOR, ROOT_PARENT_COLOR};
use crate::models::{resolve_color, FlowNode, MenuItem};

/// A derived, renderable node: a catalog snapshot plus structure and the
/// resolved display color.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeNode {
    /// Snapshot of the content record, or a key-only stub when the flow
    /// references a key absent from the catalog.
    pub item: MenuItem,
    /// Back-reference to the parent menu's key, not an ownership relation.
    pub parent_key: Option<String>,
    /// Resolved display color, a hex string.
    pub display_color: String,
    /// Child nodes in flow document order.
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    /// The node's key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.item.key
    }
}

/// Builds the renderable tree for a flow document.
///
/// Children listed as a sequence are terminal options of their menu: their
/// color is a tint of the parent's resolved color, derived through the parent
/// option's `color_factor`. Children listed as a mapping are sub-menus in
/// their own right: their color is the parent option's absolute override,
/// else the record's own color, else the default gray. The root level is
/// resolved with the mapping rule against a black parent.
#[must_use]
pub fn build_tree(flow: &FlowNode, content_by_key: &HashMap<String, MenuItem>) -> Vec<TreeNode> {
    build_level(flow, None, ROOT_PARENT_COLOR, content_by_key)
}

fn build_level(
    node: &FlowNode,
    parent_key: Option<&str>,
    parent_color: &str,
    content_by_key: &HashMap<String, MenuItem>,
) -> Vec<TreeNode> {
    let parent_item = parent_key.and_then(|key| content_by_key.get(key));

    match node {
        FlowNode::Leaves(keys) => keys
            .iter()
            .map(|key| {
                let option = parent_item.and_then(|item| item.option_ref(key));
                let display_color =
                    resolve_color(Some(parent_color), option.and_then(|opt| opt.factor()));
                TreeNode {
                    item: lookup(content_by_key, key),
                    parent_key: parent_key.map(ToString::to_string),
                    display_color,
                    children: Vec::new(),
                }
            })
            .collect(),
        FlowNode::Branch(entries) => entries
            .iter()
            .map(|(key, value)| {
                let item = lookup(content_by_key, key);
                let option = parent_item.and_then(|parent| parent.option_ref(key));
                let display_color = option
                    .and_then(|opt| opt.color.clone())
                    .filter(|color| !color.is_empty())
                    .or_else(|| item.color.clone().filter(|color| !color.is_empty()))
                    .unwrap_or_else(|| DEFAULT_COLOR.to_string());
                let children = build_level(value, Some(key), &display_color, content_by_key);
                TreeNode {
                    item,
                    parent_key: parent_key.map(ToString::to_string),
                    display_color,
                    children,
                }
            })
            .collect(),
    }
}

fn lookup(content_by_key: &HashMap<String, MenuItem>, key: &str) -> MenuItem {
    content_by_key
        .get(key)
        .cloned()
        .unwrap_or_else(|| MenuItem::stub(key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::OptionRef;
    use serde_json::Number;

    fn menu(key: &str, color: Option<&str>, options: Vec<OptionRef>) -> MenuItem {
        let mut item = MenuItem::stub(key);
        item.is_menu = true;
        item.color = color.map(ToString::to_string);
        item.options = Some(options);
        item
    }

    fn catalog(items: Vec<MenuItem>) -> HashMap<String, MenuItem> {
        items.into_iter().map(|item| (item.key.clone(), item)).collect()
    }

    fn flow(json: &str) -> FlowNode {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_branch_child_uses_own_color() {
        let content = catalog(vec![menu("audio", Some("#ff0000"), vec![])]);
        let tree = build_tree(&flow(r#"{"audio": {}}"#), &content);
        assert_eq!(tree[0].display_color, "#ff0000");
        assert_eq!(tree[0].parent_key, None);
    }

    #[test]
    fn test_branch_child_prefers_parent_option_override() {
        let content = catalog(vec![
            menu(
                "root",
                Some("#111111"),
                vec![OptionRef {
                    key: "sub".to_string(),
                    label: "Sub".to_string(),
                    color: Some("#00ff00".to_string()),
                    ..OptionRef::default()
                }],
            ),
            menu("sub", Some("#ff0000"), vec![]),
        ]);
        let tree = build_tree(&flow(r#"{"root": {"sub": {}}}"#), &content);
        let sub = &tree[0].children[0];
        assert_eq!(sub.display_color, "#00ff00");
        assert_eq!(sub.parent_key.as_deref(), Some("root"));
    }

    #[test]
    fn test_branch_child_defaults_to_gray() {
        let content = catalog(vec![menu("bare", None, vec![])]);
        let tree = build_tree(&flow(r#"{"bare": {}}"#), &content);
        assert_eq!(tree[0].display_color, "#cccccc");
    }

    #[test]
    fn test_leaf_child_tinted_by_factor() {
        let mut opt = OptionRef::new("song", "Song");
        opt.color_factor = Some(Number::from(2));
        // An absolute override on a sequence child is ignored; only the
        // factor participates.
        opt.color = Some("#0000ff".to_string());

        let content = catalog(vec![menu("sounds", Some("#c86432"), vec![opt])]);
        let tree = build_tree(&flow(r#"{"sounds": ["song"]}"#), &content);
        let song = &tree[0].children[0];
        assert_eq!(song.display_color, "#643219");
        assert!(song.children.is_empty());
    }

    #[test]
    fn test_leaf_child_without_factor_inherits_parent_color() {
        let content = catalog(vec![menu(
            "sounds",
            Some("#c86432"),
            vec![OptionRef::new("song", "Song")],
        )]);
        let tree = build_tree(&flow(r#"{"sounds": ["song"]}"#), &content);
        assert_eq!(tree[0].children[0].display_color, "#c86432");
    }

    #[test]
    fn test_missing_content_yields_stub() {
        let content = catalog(vec![]);
        let tree = build_tree(&flow(r#"{"ghost": ["phantom"]}"#), &content);
        assert_eq!(tree[0].key(), "ghost");
        assert!(!tree[0].item.is_menu);
        assert_eq!(tree[0].children[0].key(), "phantom");
        assert_eq!(
            tree[0].children[0].parent_key.as_deref(),
            Some("ghost")
        );
    }

    #[test]
    fn test_children_keep_flow_order() {
        let content = catalog(vec![menu("m", None, vec![])]);
        let tree = build_tree(&flow(r#"{"m": ["c", "a", "b"]}"#), &content);
        let order: Vec<&str> = tree[0].children.iter().map(TreeNode::key).collect();
        assert_eq!(order, vec!["c", "a", "b"]);
    }
}
