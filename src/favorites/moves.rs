//! Relocation of a node within the tree (the keyboard equivalent of drag and drop).

use super::node::Node;
use super::path::{self, format_path, NodePath};
use super::store::FavoritesTree;
use crate::error::AppError;

/// Where a moved node lands relative to the destination path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveMode {
    /// Insert as a sibling at the destination position.
    Reorder,
    /// Append to the children of the folder at the destination.
    IntoFolder,
}

/// Why a move did not complete.
#[derive(Debug)]
pub enum MoveError {
    /// Destination is the source itself or lies inside the source subtree.
    /// The tree is unchanged.
    Rejected(String),

    /// Nothing at the source path. The tree is unchanged.
    SourceNotFound(String),

    /// The source was removed but the adjusted destination could not take it.
    /// The tree is left without the node; it is handed back here.
    Detached {
        node: Node,
        /// Where the node was removed from.
        source: NodePath,
        /// The adjusted destination that refused it.
        dest: NodePath,
    },
}

// Display/Error are written by hand: thiserror would treat the `source`
// field of `Detached` as the error source, which `NodePath` cannot be.
impl std::fmt::Display for MoveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MoveError::Rejected(p) => write!(f, "Cannot move {} into itself", p),
            MoveError::SourceNotFound(p) => write!(f, "Nothing to move at {}", p),
            MoveError::Detached { node, dest, .. } => write!(
                f,
                "Destination {:?} is not a valid target; \"{}\" was detached",
                dest,
                node.name()
            ),
        }
    }
}

impl std::error::Error for MoveError {}

impl From<MoveError> for AppError {
    fn from(err: MoveError) -> Self {
        AppError::InvalidPath(err.to_string())
    }
}

impl FavoritesTree {
    /// Move the node at `source` to `dest`.
    ///
    /// The node is cloned, removed from `source`, and reinserted at `dest`
    /// after adjusting `dest` for the removal. See [`MoveError::Detached`] for
    /// the one case that leaves the tree partially modified.
    pub fn move_node(
        &mut self,
        source: &[usize],
        dest: &[usize],
        mode: MoveMode,
    ) -> Result<(), MoveError> {
        if path::paths_equal(dest, source) || path::is_descendant(dest, source) {
            return Err(MoveError::Rejected(format_path(source)));
        }

        let node = self
            .resolve(source)
            .cloned()
            .ok_or_else(|| MoveError::SourceNotFound(format_path(source)))?;
        // `resolve` succeeded, so the removal cannot miss.
        let _original = self.remove(source);

        let adjusted = path::adjust_path_after_removal(dest, source);
        log::debug!(
            "move {} -> {} (adjusted {}) as {:?}",
            format_path(source),
            format_path(dest),
            format_path(&adjusted),
            mode
        );

        let placed = match mode {
            MoveMode::Reorder => self.insert(&adjusted, node.clone()),
            MoveMode::IntoFolder => match self.resolve(&adjusted) {
                Some(target) if target.is_folder() => self.add_child(&adjusted, node.clone()),
                _ => Err(AppError::InvalidPath(format_path(&adjusted))),
            },
        };

        placed.map_err(|_| {
            log::warn!(
                "move of {} to {} left the node detached",
                format_path(source),
                format_path(&adjusted)
            );
            MoveError::Detached {
                node,
                source: source.to_vec(),
                dest: adjusted,
            }
        })
    }
}
