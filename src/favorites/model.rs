//! The vendor-neutral favorites array shared by both export formats, and
//! the lenient loader that turns a decoded array back into a tree.
//!
//! Shape:
//!
//! ```text
//! [ {"toplevel_name": "..."},
//!   {"name": "...", "children": [ {"name": "...", "url": "..."},
//!                                 {"name": "...", "children": [...]} ]},
//!   ... ]
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::node::{Folder, Node};
use super::store::{FavoritesTree, DEFAULT_ROOT_LABEL};
use crate::error::{AppError, Result};

/// Name of the folder that collects top-level links on export.
pub const STANDALONE_LINKS_FOLDER: &str = "Links";

/// A folder in the exported array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelFolder {
    pub name: String,
    pub children: Vec<ModelChild>,
}

/// A child entry: nested folder or link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ModelChild {
    Folder(ModelFolder),
    Link { name: String, url: String },
}

/// A top-level entry: the root-name marker or a folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ModelEntry {
    RootName { toplevel_name: String },
    Folder(ModelFolder),
}

/// The exported favorites array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExportModel(pub Vec<ModelEntry>);

impl ExportModel {
    /// Build the array for `tree`.
    ///
    /// The root name comes first, then every top-level folder in order, then
    /// (if any exist) a synthetic `Links` folder with the top-level links.
    pub fn from_tree(tree: &FavoritesTree) -> Self {
        let root_label = if tree.root_label().is_empty() {
            DEFAULT_ROOT_LABEL
        } else {
            tree.root_label()
        };

        let mut entries = vec![ModelEntry::RootName {
            toplevel_name: root_label.to_string(),
        }];
        let mut standalone = Vec::new();

        for item in tree.items() {
            match item {
                Node::Folder(folder) => entries.push(ModelEntry::Folder(convert_folder(folder))),
                Node::Link(_) => standalone.push(convert_node(item)),
            }
        }

        if !standalone.is_empty() {
            entries.push(ModelEntry::Folder(ModelFolder {
                name: STANDALONE_LINKS_FOLDER.to_string(),
                children: standalone,
            }));
        }

        ExportModel(entries)
    }

    pub fn entries(&self) -> &[ModelEntry] {
        &self.0
    }

    /// Compact JSON, as embedded in the Windows policy payload.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self)
            .map_err(|e| AppError::Format(format!("cannot serialize favorites: {}", e)))
    }

    /// Two-space indented JSON for display.
    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| AppError::Format(format!("cannot serialize favorites: {}", e)))
    }
}

fn convert_folder(folder: &Folder) -> ModelFolder {
    ModelFolder {
        name: folder.name.clone(),
        children: folder.children.iter().map(convert_node).collect(),
    }
}

fn convert_node(node: &Node) -> ModelChild {
    match node {
        Node::Folder(folder) => ModelChild::Folder(convert_folder(folder)),
        Node::Link(link) => ModelChild::Link {
            name: link.name.clone(),
            url: link.url.clone(),
        },
    }
}

// ── Loading ──────────────────────────────────────────────────────────────────

/// Build a fresh tree from a decoded favorites array.
///
/// Only a non-array input is an error. Entries are read leniently:
/// - an object with a string `toplevel_name` sets the root label (last wins);
/// - an object with a non-empty string `name` becomes a top-level folder;
/// - anything else is skipped.
///
/// Inside folders, a child object without a `children` key is a link; one
/// with `children` (even empty) is a folder.
pub fn load_tree(value: &Value) -> Result<FavoritesTree> {
    let entries = value
        .as_array()
        .ok_or_else(|| AppError::Format("favorites payload is not an array".into()))?;

    let mut tree = FavoritesTree::new();
    for (index, entry) in entries.iter().enumerate() {
        let Some(object) = entry.as_object() else {
            log::debug!("skipping favorites entry {}: not an object", index);
            continue;
        };

        if let Some(label) = object.get("toplevel_name") {
            match label.as_str() {
                Some(label) => tree.set_root_label_raw(label.to_string()),
                None => log::debug!("skipping non-string toplevel_name at entry {}", index),
            }
        } else if let Some(name) = object
            .get("name")
            .and_then(Value::as_str)
            .filter(|name| !name.is_empty())
        {
            tree.add_root(load_folder(name, object));
        } else {
            log::debug!("skipping favorites entry {}: no toplevel_name or name", index);
        }
    }

    log::info!(
        "loaded {} top-level entries ({} nodes) under \"{}\"",
        tree.len(),
        tree.node_count(),
        tree.root_label()
    );
    Ok(tree)
}

fn load_folder(name: &str, object: &Map<String, Value>) -> Node {
    let children: Vec<Node> = object
        .get("children")
        .and_then(Value::as_array)
        .map(|children| children.iter().filter_map(load_child).collect())
        .unwrap_or_default();
    Node::folder_with(name, children)
}

fn load_child(value: &Value) -> Option<Node> {
    let object = value.as_object()?;
    let name = string_field(object, "name");
    if object.contains_key("children") {
        Some(load_folder(name, object))
    } else {
        Some(Node::link(name, string_field(object, "url")))
    }
}

fn string_field<'a>(object: &'a Map<String, Value>, key: &str) -> &'a str {
    object.get(key).and_then(Value::as_str).unwrap_or("")
}
