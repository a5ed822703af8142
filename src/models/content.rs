//! Content catalog records: the flat, key-addressed payload for each menu node.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use std::fmt;

/// Returns true for `false`, used to omit unset flags from serialized records.
#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_false(value: &bool) -> bool {
    !*value
}

/// An edge record embedded in a parent menu's `options` list.
///
/// Carries edge-local overrides: the label shown in the parent's radial menu,
/// an absolute color override, and a relative darkening factor applied to the
/// parent's resolved color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct OptionRef {
    /// Key of the referenced content record.
    pub key: String,
    /// Label shown for this option inside the parent menu.
    #[serde(default)]
    pub label: String,
    /// Absolute color override for this edge.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Relative darkening factor applied to the parent's resolved color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_factor: Option<Number>,
    /// Fields the editor does not model (e.g. `lottieFile`, `sound`), carried
    /// through untouched so an export preserves them.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl OptionRef {
    /// Creates an option reference to `key` with the given label.
    #[must_use]
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            ..Self::default()
        }
    }

    /// The darkening factor as a float, if set.
    #[must_use]
    pub fn factor(&self) -> Option<f64> {
        self.color_factor.as_ref().and_then(Number::as_f64)
    }
}

/// Classification of a content record by its type flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemType {
    /// A menu with child options.
    Menu,
    /// A leaf that plays a video file.
    Video,
    /// A leaf that plays an audio file.
    Audio,
    /// A leaf that plays a Lottie animation.
    Lottie,
    /// A leaf with no associated media.
    Plain,
}

impl ItemType {
    /// All selectable item types, in form/display order.
    pub const ALL: [Self; 5] = [
        Self::Plain,
        Self::Menu,
        Self::Video,
        Self::Audio,
        Self::Lottie,
    ];
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Menu => "Menu",
            Self::Video => "Video",
            Self::Audio => "Audio",
            Self::Lottie => "Lottie",
            Self::Plain => "None",
        };
        write!(f, "{name}")
    }
}

/// One entry of the content catalog: all display and behavior payload for a
/// single addressable node.
///
/// The type flags (`is_menu`, `is_video`, `is_audio`, `is_lottie`) are
/// mutually exclusive in well-formed catalogs; `item_type` resolves them in
/// that priority order and `validate` reports violations rather than the
/// model rejecting them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct MenuItem {
    /// Unique identifier, stable across renames only via the explicit rename
    /// path of the edit operation.
    pub key: String,
    /// Text shown in the center when this node is displayed as a menu.
    #[serde(
        rename = "centerLabel",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub center_label: Option<String>,
    /// Text shown when this node is referenced as an option inside a parent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Menu flag: the node has children and a center label.
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_menu: bool,
    /// Video leaf flag.
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_video: bool,
    /// Audio leaf flag.
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_audio: bool,
    /// Lottie animation leaf flag.
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_lottie: bool,
    /// Video source filename, meaningful when `is_video` is set.
    #[serde(
        rename = "videoSource",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub video_source: Option<String>,
    /// Audio source filename, meaningful when `is_audio` is set.
    #[serde(
        rename = "audioSource",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub audio_source: Option<String>,
    /// Lottie source filename, meaningful when `is_lottie` is set.
    #[serde(
        rename = "lottieSource",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub lottie_source: Option<String>,
    /// Own color, present mainly on menus and on items overriding inheritance.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Darkening factor applied when this item is used as an option.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_factor: Option<Number>,
    /// Ordered child option references, present only on menus.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<OptionRef>>,
    /// Menu display tunable: rotate option labels along the slices.
    #[serde(
        rename = "primaryLabelRotation",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub primary_label_rotation: Option<bool>,
    /// Menu display tunable: radial offset of option labels.
    #[serde(
        rename = "primaryLabelOffset",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub primary_label_offset: Option<Number>,
    /// Menu display tunable: option label pixel size.
    #[serde(
        rename = "primaryPixelSize",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub primary_pixel_size: Option<Number>,
    /// Fields the editor does not model (e.g. `hasIcon`, `icons`,
    /// `fontColor`, `is_setting`), carried through untouched on export.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl MenuItem {
    /// Creates a stub record holding only a key.
    ///
    /// Used when the flow references a key with no content counterpart; the
    /// engine tolerates the inconsistency instead of failing.
    #[must_use]
    pub fn stub(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Self::default()
        }
    }

    /// Resolves the type flags into a single classification.
    #[must_use]
    pub fn item_type(&self) -> ItemType {
        if self.is_menu {
            ItemType::Menu
        } else if self.is_video {
            ItemType::Video
        } else if self.is_audio {
            ItemType::Audio
        } else if self.is_lottie {
            ItemType::Lottie
        } else {
            ItemType::Plain
        }
    }

    /// Clears all type flags and applies `item_type`, preserving any existing
    /// options when the item stays (or becomes) a menu.
    pub fn set_item_type(&mut self, item_type: ItemType) {
        self.is_menu = false;
        self.is_video = false;
        self.is_audio = false;
        self.is_lottie = false;
        match item_type {
            ItemType::Menu => {
                self.is_menu = true;
                if self.options.is_none() {
                    self.options = Some(Vec::new());
                }
            }
            ItemType::Video => self.is_video = true,
            ItemType::Audio => self.is_audio = true,
            ItemType::Lottie => self.is_lottie = true,
            ItemType::Plain => {}
        }
    }

    /// Returns true if more than one of the menu/media type flags is set.
    #[must_use]
    pub fn has_conflicting_flags(&self) -> bool {
        let set = [self.is_menu, self.is_video, self.is_audio, self.is_lottie]
            .iter()
            .filter(|flag| **flag)
            .count();
        set > 1
    }

    /// Finds the option reference for `key` in this menu's options, if any.
    #[must_use]
    pub fn option_ref(&self, key: &str) -> Option<&OptionRef> {
        self.options
            .as_deref()
            .and_then(|options| options.iter().find(|opt| opt.key == key))
    }

    /// The label used when listing this item: the center label for menus,
    /// falling back to the option label, with newlines flattened.
    #[must_use]
    pub fn display_label(&self) -> String {
        self.center_label
            .as_deref()
            .or(self.label.as_deref())
            .unwrap_or_default()
            .replace('\n', " ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_type_priority() {
        let mut item = MenuItem::stub("x");
        assert_eq!(item.item_type(), ItemType::Plain);

        item.is_lottie = true;
        assert_eq!(item.item_type(), ItemType::Lottie);

        item.is_menu = true;
        assert_eq!(item.item_type(), ItemType::Menu);
        assert!(item.has_conflicting_flags());
    }

    #[test]
    fn test_set_item_type_resets_flags() {
        let mut item = MenuItem::stub("x");
        item.set_item_type(ItemType::Video);
        assert!(item.is_video);

        item.set_item_type(ItemType::Audio);
        assert!(item.is_audio);
        assert!(!item.is_video);
        assert!(!item.has_conflicting_flags());
    }

    #[test]
    fn test_set_item_type_menu_initializes_options() {
        let mut item = MenuItem::stub("x");
        item.set_item_type(ItemType::Menu);
        assert_eq!(item.options, Some(Vec::new()));
    }

    #[test]
    fn test_unknown_fields_round_trip() {
        let json = r##"{
            "key": "welcome",
            "centerLabel": "Welcome",
            "is_menu": true,
            "options": [{"key": "song", "label": "Song", "sound": "chime.mp3"}],
            "hasIcon": true,
            "icons": ["a.png"],
            "fontColor": "#ffffff"
        }"##;

        let item: MenuItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.key, "welcome");
        assert!(item.is_menu);
        assert_eq!(item.extra.get("hasIcon"), Some(&Value::Bool(true)));

        let out = serde_json::to_value(&item).unwrap();
        assert_eq!(out["fontColor"], "#ffffff");
        assert_eq!(out["options"][0]["sound"], "chime.mp3");
        // Unset flags are omitted rather than written as false
        assert!(out.get("is_video").is_none());
    }

    #[test]
    fn test_numeric_tunables_preserve_representation() {
        let json = r#"{"key": "m", "is_menu": true, "primaryPixelSize": 24, "color_factor": 1.2}"#;
        let item: MenuItem = serde_json::from_str(json).unwrap();
        let out = serde_json::to_string(&item).unwrap();
        assert!(out.contains("\"primaryPixelSize\":24"), "got {out}");
        assert!(out.contains("\"color_factor\":1.2"), "got {out}");
    }

    #[test]
    fn test_option_ref_lookup() {
        let mut item = MenuItem::stub("menu");
        item.is_menu = true;
        item.options = Some(vec![
            OptionRef::new("a", "A"),
            OptionRef::new("b", "B"),
        ]);

        assert_eq!(item.option_ref("b").map(|o| o.label.as_str()), Some("B"));
        assert!(item.option_ref("missing").is_none());
    }

    #[test]
    fn test_display_label_flattens_newlines() {
        let mut item = MenuItem::stub("x");
        item.center_label = Some("Line\nBreak".to_string());
        assert_eq!(item.display_label(), "Line Break");
    }
}
