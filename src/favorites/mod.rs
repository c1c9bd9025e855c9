//! The favorites tree and its import/export formats.

pub mod codec;
pub mod macos;
pub mod model;
pub mod moves;
pub mod node;
pub mod path;
pub mod store;
pub mod windows;

pub use codec::{ExportSettings, Platform};
pub use model::{load_tree, ExportModel};
pub use moves::{MoveError, MoveMode};
pub use node::{Folder, Link, Node, NodeDraft, NodeEdit};
pub use path::NodePath;
pub use store::{FavoritesTree, DEFAULT_ROOT_LABEL};
