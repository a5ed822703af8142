//! Engine services: key generation, the content/flow join, the settings
//! partition, and the mutation orchestrator.

pub mod editor;
pub mod keys;
pub mod partition;
pub mod tree;

pub use editor::MenuEditor;
pub use keys::generate_key;
pub use partition::{normalize_media_paths, MenuPartition};
pub use tree::{build_tree, TreeNode};
