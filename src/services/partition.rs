//! Partitioning of an imported document pair into the editable main-menu
//! region and the read-only settings region, and their recombination on
//! export.

use std::collections::HashSet;

use crate::constants::{
    AUDIO_SUBDIR, LOTTIE_SUBDIR, MAIN_MENU_KEY, SETTINGS_MENU_KEY, VIDEO_SUBDIR,
};
use crate::models::{FlowNode, MenuItem};

/// The imported document pair split into its two regions.
///
/// Membership in the settings region is flow reachability from the
/// `settings_menu` key; everything else belongs to the editable main region.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuPartition {
    /// Editable catalog records.
    pub main_content: Vec<MenuItem>,
    /// Editable flow subtree (the former `settings_menu.main_menu` value).
    pub main_flow: FlowNode,
    /// Read-only settings catalog records.
    pub settings_content: Vec<MenuItem>,
    /// Retained flow document with the `main_menu` subtree carved out.
    pub settings_flow: FlowNode,
}

impl MenuPartition {
    /// Splits an imported content catalog and flow document.
    ///
    /// The editable subtree is extracted from `settings_menu.main_menu`
    /// (an empty mapping when absent); the catalog is partitioned by
    /// reachability from `settings_menu` over the remaining flow.
    #[must_use]
    pub fn split(content: Vec<MenuItem>, flow: FlowNode) -> Self {
        let mut settings_flow = flow;
        let main_flow = settings_flow
            .get_mut(SETTINGS_MENU_KEY)
            .and_then(|settings| settings.remove(MAIN_MENU_KEY))
            .unwrap_or_default();

        let settings_keys = settings_flow.reachable_keys(SETTINGS_MENU_KEY);
        let (settings_content, main_content): (Vec<_>, Vec<_>) = content
            .into_iter()
            .partition(|item| settings_keys.contains(&item.key));

        Self {
            main_content,
            main_flow,
            settings_content,
            settings_flow,
        }
    }

    /// Keys belonging to the read-only settings region.
    #[must_use]
    pub fn settings_keys(&self) -> HashSet<String> {
        self.settings_flow.reachable_keys(SETTINGS_MENU_KEY)
    }

    /// Recombines the partition into an exportable document pair.
    ///
    /// The edited main flow is spliced back in at `settings_menu.main_menu`
    /// (or a top-level `main_menu` entry when no settings region exists). The
    /// content array is main records first, then settings records; media
    /// sources of the editable records are normalized against `device_root`,
    /// the preserved settings records are exported untouched.
    #[must_use]
    pub fn recombine(&self, device_root: &str) -> (Vec<MenuItem>, FlowNode) {
        let mut flow = self.settings_flow.clone();
        if let Some(settings) = flow.get_mut(SETTINGS_MENU_KEY) {
            settings.insert(MAIN_MENU_KEY, self.main_flow.clone());
        } else {
            flow.insert(MAIN_MENU_KEY, self.main_flow.clone());
        }

        let mut content: Vec<MenuItem> = self
            .main_content
            .iter()
            .map(|item| normalize_media_paths(item, device_root))
            .collect();
        content.extend(self.settings_content.iter().cloned());

        (content, flow)
    }
}

/// Prefixes bare media filenames with the device root and the per-type
/// subdirectory (`music`, `video`, `lottie`). Sources already under the
/// device root are left alone. Pure string transform.
#[must_use]
pub fn normalize_media_paths(item: &MenuItem, device_root: &str) -> MenuItem {
    let root = device_root.trim_end_matches('/');
    let prefix = |source: &str, subdir: &str| {
        if source.starts_with(&format!("{root}/")) {
            source.to_string()
        } else {
            format!("{root}/{subdir}/{source}")
        }
    };

    let mut item = item.clone();
    if item.is_audio {
        if let Some(source) = item.audio_source.take() {
            item.audio_source = Some(prefix(&source, AUDIO_SUBDIR));
        }
    }
    if item.is_video {
        if let Some(source) = item.video_source.take() {
            item.video_source = Some(prefix(&source, VIDEO_SUBDIR));
        }
    }
    if item.is_lottie {
        if let Some(source) = item.lottie_source.take() {
            item.lottie_source = Some(prefix(&source, LOTTIE_SUBDIR));
        }
    }
    item
}
