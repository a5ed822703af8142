//! The mutation orchestrator: the public edit operations over the document
//! pair.
//!
//! Every operation keeps the content catalog, the flow document, and the
//! settings partition consistent with each other. Duplicate or empty keys are
//! rejected before any state changes; other precondition violations (e.g. a
//! non-menu parent) are the caller's responsibility and degrade to tolerated
//! inconsistency rather than panics.

use anyhow::Result;
use std::collections::{HashMap, HashSet, VecDeque};

use crate::constants::MAIN_MENU_KEY;
use crate::models::{FlowNode, MenuItem, OptionRef};
use crate::services::partition::MenuPartition;
use crate::services::tree::{build_tree, TreeNode};

/// The editing session over an imported document pair.
///
/// Holds the editable main region and the read-only settings region; the UI
/// layer goes through these operations and accessors rather than mutating the
/// underlying documents directly.
#[derive(Debug, Clone)]
pub struct MenuEditor {
    partition: MenuPartition,
}

impl MenuEditor {
    /// Starts a session from a freshly imported content catalog and flow
    /// document.
    #[must_use]
    pub fn new(content: Vec<MenuItem>, flow: FlowNode) -> Self {
        Self {
            partition: MenuPartition::split(content, flow),
        }
    }

    /// The underlying partition.
    #[must_use]
    pub fn partition(&self) -> &MenuPartition {
        &self.partition
    }

    /// All catalog keys across both regions. Key uniqueness is enforced
    /// against this set.
    #[must_use]
    pub fn all_keys(&self) -> HashSet<String> {
        self.partition
            .main_content
            .iter()
            .chain(&self.partition.settings_content)
            .map(|item| item.key.clone())
            .collect()
    }

    /// Joined view of both catalogs, keyed by record key.
    #[must_use]
    pub fn content_map(&self) -> HashMap<String, MenuItem> {
        self.partition
            .main_content
            .iter()
            .chain(&self.partition.settings_content)
            .map(|item| (item.key.clone(), item.clone()))
            .collect()
    }

    /// The renderable tree of the editable region, rooted at `main_menu`.
    #[must_use]
    pub fn main_tree(&self) -> Vec<TreeNode> {
        let wrapped = FlowNode::Branch(vec![(
            MAIN_MENU_KEY.to_string(),
            self.partition.main_flow.clone(),
        )]);
        let content: HashMap<String, MenuItem> = self
            .partition
            .main_content
            .iter()
            .map(|item| (item.key.clone(), item.clone()))
            .collect();
        build_tree(&wrapped, &content)
    }

    /// The renderable tree of the read-only settings region.
    #[must_use]
    pub fn settings_tree(&self) -> Vec<TreeNode> {
        let content: HashMap<String, MenuItem> = self
            .partition
            .settings_content
            .iter()
            .map(|item| (item.key.clone(), item.clone()))
            .collect();
        build_tree(&self.partition.settings_flow, &content)
    }

    /// Adds a new item to the editable region.
    ///
    /// With no parent the item becomes a top-level flow entry (`{}` for a
    /// menu, `[]` otherwise). With a parent, the parent record's `options`
    /// gains an edge to the new item and the parent's flow value is extended:
    /// menus attach as mapping entries (coercing a sequence value to a
    /// mapping, its leaf keys promoted to empty branches), leaves append to a
    /// sequence (coercing an absent or mapping value to `[]`, dropping any
    /// prior mapping structure). The parent must be a menu; that precondition
    /// is the caller's.
    ///
    /// The root menu key is special-cased: its children live at the top level
    /// of the editable flow, so the flow side degrades to a top-level insert
    /// while the option edge still lands on the root's content record.
    pub fn add_item(&mut self, item: MenuItem, parent_key: Option<&str>) -> Result<()> {
        self.validate_key(&item.key, None)?;

        let key = item.key.clone();
        let is_menu = item.is_menu;
        let option = OptionRef {
            key: key.clone(),
            label: item.label.clone().unwrap_or_default(),
            color: item.color.clone().filter(|c| !c.is_empty()),
            color_factor: item.color_factor.clone(),
            ..OptionRef::default()
        };
        self.partition.main_content.push(item);

        match parent_key {
            None => {
                let value = if is_menu {
                    FlowNode::empty_branch()
                } else {
                    FlowNode::empty_leaves()
                };
                self.partition.main_flow.insert(key, value);
            }
            Some(parent) => {
                if let Some(parent_item) = self
                    .partition
                    .main_content
                    .iter_mut()
                    .find(|record| record.key == parent && record.is_menu)
                {
                    parent_item
                        .options
                        .get_or_insert_with(Vec::new)
                        .push(option);
                }

                if parent == MAIN_MENU_KEY {
                    // The root menu is the document itself: its children are
                    // the top-level flow entries
                    let value = if is_menu {
                        FlowNode::empty_branch()
                    } else {
                        FlowNode::empty_leaves()
                    };
                    self.partition.main_flow.insert(key, value);
                } else if let Some(updated) = self
                    .partition
                    .main_flow
                    .locate_and_transform(parent, |children| attach_child(children, &key, is_menu))
                {
                    self.partition.main_flow = updated;
                }
            }
        }

        Ok(())
    }

    /// Replaces the record matching `original_key` with `item`, whose key may
    /// differ.
    ///
    /// With a parent, the matching option reference is updated in place
    /// (key, label, color, factor). A key change is propagated through the
    /// whole editable flow with a global rename, keeping the unique-key
    /// invariant intact.
    pub fn edit_item(
        &mut self,
        original_key: &str,
        item: MenuItem,
        parent_key: Option<&str>,
    ) -> Result<()> {
        self.validate_key(&item.key, Some(original_key))?;

        let new_key = item.key.clone();
        let new_label = item.label.clone().unwrap_or_default();
        let new_color = item.color.clone().filter(|c| !c.is_empty());
        let new_factor = item.color_factor.clone();

        if let Some(record) = self
            .partition
            .main_content
            .iter_mut()
            .find(|record| record.key == original_key)
        {
            *record = item;
        }

        if let Some(parent) = parent_key {
            if let Some(options) = self
                .partition
                .main_content
                .iter_mut()
                .find(|record| record.key == parent && record.is_menu)
                .and_then(|record| record.options.as_mut())
            {
                if let Some(option) = options.iter_mut().find(|opt| opt.key == original_key) {
                    option.key.clone_from(&new_key);
                    option.label = new_label;
                    option.color = new_color;
                    option.color_factor = new_factor;
                }
            }
        }

        if new_key != original_key {
            self.partition.main_flow = self.partition.main_flow.rename_key(original_key, &new_key);
        }

        Ok(())
    }

    /// Deletes `item_key` and its content cascade from the editable region.
    ///
    /// The descendant set is computed over the content catalog: every key
    /// listed transitively in `options` of menu records starting from
    /// `item_key` (immediate options are included whether or not they are
    /// menus themselves). Only `item_key` is purged from the flow; descendant
    /// flow entries vanish with the deleted subtree when flow nesting mirrors
    /// content nesting.
    pub fn delete_item(&mut self, item_key: &str, parent_key: Option<&str>) {
        let doomed = self.cascade_keys(item_key);

        self.partition
            .main_content
            .retain(|item| !doomed.contains(&item.key));

        match parent_key {
            None => {
                self.partition.main_flow.remove(item_key);
            }
            Some(MAIN_MENU_KEY) => {
                self.partition.main_flow.remove(item_key);
            }
            Some(parent) => {
                let target = item_key.to_string();
                if let Some(updated) = self
                    .partition
                    .main_flow
                    .locate_and_transform(parent, |children| detach_child(children, &target))
                {
                    self.partition.main_flow = updated;
                }
            }
        }
    }

    /// The keys a delete of `item_key` would remove: the item plus everything
    /// listed transitively in `options` of menu records under it.
    #[must_use]
    pub fn cascade_keys(&self, item_key: &str) -> HashSet<String> {
        let content_map = self.content_map();
        let mut doomed: HashSet<String> = HashSet::new();
        doomed.insert(item_key.to_string());
        let mut queue: VecDeque<String> = VecDeque::new();
        queue.push_back(item_key.to_string());

        while let Some(current) = queue.pop_front() {
            let Some(item) = content_map.get(&current) else {
                continue;
            };
            if !item.is_menu {
                continue;
            }
            for option in item.options.as_deref().unwrap_or_default() {
                // Guarding on insertion keeps a cyclic catalog from looping
                if doomed.insert(option.key.clone()) {
                    queue.push_back(option.key.clone());
                }
            }
        }

        doomed
    }

    /// Sets `new_color` on the record matching `item_key` and on every parent
    /// menu's option reference to it.
    ///
    /// Both addresses are written unconditionally when found; a node may
    /// legitimately be colored through either, and downstream consumers read
    /// both.
    pub fn recolor_item(&mut self, item_key: &str, new_color: &str) {
        for item in &mut self.partition.main_content {
            if item.key == item_key {
                item.color = Some(new_color.to_string());
            } else if item.is_menu {
                if let Some(options) = item.options.as_mut() {
                    for option in options.iter_mut().filter(|opt| opt.key == item_key) {
                        option.color = Some(new_color.to_string());
                    }
                }
            }
        }
    }

    /// Recombines both regions into an exportable document pair, normalizing
    /// editable media paths against `device_root`.
    #[must_use]
    pub fn export(&self, device_root: &str) -> (Vec<MenuItem>, FlowNode) {
        self.partition.recombine(device_root)
    }

    fn validate_key(&self, key: &str, original_key: Option<&str>) -> Result<()> {
        if key.is_empty() {
            anyhow::bail!("Key is required");
        }
        if original_key != Some(key) && self.all_keys().contains(key) {
            anyhow::bail!("Key '{key}' must be unique");
        }
        Ok(())
    }
}

/// Add-side flow coercion for a parent's children value.
fn attach_child(children: FlowNode, new_key: &str, is_menu: bool) -> FlowNode {
    if is_menu {
        let mut entries = match children {
            FlowNode::Branch(entries) => entries,
            FlowNode::Leaves(keys) => keys
                .into_iter()
                .map(|key| (key, FlowNode::empty_branch()))
                .collect(),
        };
        entries.push((new_key.to_string(), FlowNode::empty_branch()));
        FlowNode::Branch(entries)
    } else {
        let mut keys = match children {
            FlowNode::Leaves(keys) => keys,
            FlowNode::Branch(_) => Vec::new(),
        };
        keys.push(new_key.to_string());
        FlowNode::Leaves(keys)
    }
}

/// Delete-side removal of `target` from a parent's children value.
fn detach_child(children: FlowNode, target: &str) -> FlowNode {
    match children {
        FlowNode::Leaves(keys) => {
            FlowNode::Leaves(keys.into_iter().filter(|key| key != target).collect())
        }
        FlowNode::Branch(mut entries) => {
            entries.retain(|(key, _)| key != target);
            FlowNode::Branch(entries)
        }
    }
}
