//! Application-wide constants.
//!
//! This module defines constants used throughout the application, including
//! the well-known flow document keys and the device filesystem layout that
//! exported media paths are rewritten against.

/// The display name of the application (human-readable, with proper capitalization).
pub const APP_NAME: &str = "Menuforge";

/// The binary name of the application (used in command examples, lowercase).
pub const APP_BINARY_NAME: &str = "menuforge";

/// Well-known root key of the editable main-menu subtree.
pub const MAIN_MENU_KEY: &str = "main_menu";

/// Well-known key of the read-only settings region in the flow document.
pub const SETTINGS_MENU_KEY: &str = "settings_menu";

/// Fallback display color for nodes with no resolvable color.
pub const DEFAULT_COLOR: &str = "#cccccc";

/// Parent color passed to the root of a tree build.
pub const ROOT_PARENT_COLOR: &str = "#000000";

/// Base key used when a label slugs down to nothing.
pub const FALLBACK_KEY_BASE: &str = "new_item";

/// Default media root on the kiosk device.
pub const DEFAULT_DEVICE_ROOT: &str = "/home/pi/qtremote";

/// Device subdirectory for audio sources.
pub const AUDIO_SUBDIR: &str = "music";

/// Device subdirectory for video sources.
pub const VIDEO_SUBDIR: &str = "video";

/// Device subdirectory for Lottie animation sources.
pub const LOTTIE_SUBDIR: &str = "lottie";

/// Filename of the exported content catalog.
pub const EXPORT_DATA_FILENAME: &str = "menu_data.json";

/// Filename of the exported flow document.
pub const EXPORT_FLOW_FILENAME: &str = "menu_flow.json";
