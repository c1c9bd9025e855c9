use super::node::{Node, NodeEdit};
use super::path::{self, format_path};
use crate::error::{AppError, Result};

/// Root label used when none is set or an import carries none.
pub const DEFAULT_ROOT_LABEL: &str = "Managed favourites";

/// The favorites forest together with its root label.
///
/// The tree owns every node reachable from it. All mutations are addressed
/// by positional paths and either fully apply or leave the tree untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FavoritesTree {
    root_label: String,
    items: Vec<Node>,
}

impl Default for FavoritesTree {
    fn default() -> Self {
        Self::new()
    }
}

impl FavoritesTree {
    /// Create an empty tree with the default root label.
    pub fn new() -> Self {
        Self {
            root_label: DEFAULT_ROOT_LABEL.to_string(),
            items: Vec::new(),
        }
    }

    /// Create a tree from existing parts. The label is stored as given.
    pub fn from_parts(root_label: impl Into<String>, items: Vec<Node>) -> Self {
        Self {
            root_label: root_label.into(),
            items,
        }
    }

    pub fn root_label(&self) -> &str {
        &self.root_label
    }

    /// Set the root label from user input. Blank input restores the default.
    pub fn set_root_label(&mut self, label: &str) {
        let trimmed = label.trim();
        self.root_label = if trimmed.is_empty() {
            DEFAULT_ROOT_LABEL.to_string()
        } else {
            trimmed.to_string()
        };
    }

    /// Store an imported root label verbatim.
    pub(crate) fn set_root_label_raw(&mut self, label: String) {
        self.root_label = label;
    }

    pub fn items(&self) -> &[Node] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of top-level entries.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Total number of nodes at every depth.
    pub fn node_count(&self) -> usize {
        self.items.iter().map(Node::subtree_len).sum()
    }

    pub fn resolve(&self, path: &[usize]) -> Option<&Node> {
        path::resolve(&self.items, path)
    }

    /// Insert `node` at `path`, shifting later siblings right.
    ///
    /// The final index may equal the sibling count, which appends.
    pub fn insert(&mut self, path: &[usize], node: Node) -> Result<()> {
        let (siblings, index) = path::resolve_parent_mut(&mut self.items, path)
            .ok_or_else(|| AppError::InvalidPath(format_path(path)))?;
        if index > siblings.len() {
            return Err(AppError::InvalidPath(format!(
                "{} (only {} siblings)",
                format_path(path),
                siblings.len()
            )));
        }
        siblings.insert(index, node);
        Ok(())
    }

    /// Remove and return the node at `path`, shifting later siblings left.
    pub fn remove(&mut self, path: &[usize]) -> Option<Node> {
        let (siblings, index) = path::resolve_parent_mut(&mut self.items, path)?;
        if index < siblings.len() {
            Some(siblings.remove(index))
        } else {
            None
        }
    }

    /// Merge `edit` onto the node at `path`.
    pub fn edit(&mut self, path: &[usize], edit: NodeEdit) -> Result<()> {
        let node = path::resolve_mut(&mut self.items, path)
            .ok_or_else(|| AppError::InvalidPath(format_path(path)))?;
        node.apply_edit(edit)
    }

    /// Append `node` to the children of the folder at `parent_path`.
    pub fn add_child(&mut self, parent_path: &[usize], node: Node) -> Result<()> {
        let parent = path::resolve_mut(&mut self.items, parent_path)
            .ok_or_else(|| AppError::InvalidPath(format_path(parent_path)))?;
        let children = parent.children_mut().ok_or_else(|| {
            AppError::InvalidPath(format!("{} is not a folder", format_path(parent_path)))
        })?;
        children.push(node);
        Ok(())
    }

    /// Append `node` to the top level.
    pub fn add_root(&mut self, node: Node) {
        self.items.push(node);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> FavoritesTree {
        FavoritesTree::from_parts(
            "MyFavs",
            vec![
                Node::folder_with(
                    "Work",
                    vec![
                        Node::link("Mail", "https://mail.example"),
                        Node::link("Wiki", "https://wiki.example"),
                    ],
                ),
                Node::link("Docs", "https://docs.example"),
                Node::folder("Empty"),
            ],
        )
    }

    #[test]
    fn new_tree_is_empty_with_default_label() {
        let tree = FavoritesTree::new();
        assert!(tree.is_empty());
        assert_eq!(tree.root_label(), DEFAULT_ROOT_LABEL);
    }

    #[test]
    fn set_root_label_trims_and_defaults() {
        let mut tree = FavoritesTree::new();
        tree.set_root_label("  Company  ");
        assert_eq!(tree.root_label(), "Company");
        tree.set_root_label("   ");
        assert_eq!(tree.root_label(), DEFAULT_ROOT_LABEL);
    }

    #[test]
    fn node_count_is_recursive() {
        assert_eq!(sample().node_count(), 5);
        assert_eq!(sample().len(), 3);
    }

    #[test]
    fn insert_then_resolve_returns_node() {
        let cases: &[&[usize]] = &[&[0], &[1], &[3], &[0, 0], &[0, 2], &[2, 0]];
        for path in cases {
            let mut tree = sample();
            let node = Node::link("New", "https://new.example");
            tree.insert(path, node.clone()).unwrap();
            assert_eq!(tree.resolve(path), Some(&node), "path {:?}", path);
        }
    }

    #[test]
    fn insert_shifts_later_siblings() {
        let mut tree = sample();
        let chat = Node::link("Chat", "https://chat.example");
        tree.insert(&[0, 1], chat).unwrap();
        let names: Vec<&str> = tree.resolve(&[0]).unwrap().children().unwrap()
            .iter()
            .map(Node::name)
            .collect();
        assert_eq!(names, vec!["Mail", "Chat", "Wiki"]);
    }

    #[test]
    fn insert_invalid_path_leaves_tree_unchanged() {
        let mut tree = sample();
        let before = tree.clone();
        for path in [vec![], vec![5], vec![1, 0], vec![0, 3], vec![9, 0]] {
            let err = tree.insert(&path, Node::folder("x")).unwrap_err();
            assert!(matches!(err, AppError::InvalidPath(_)));
        }
        assert_eq!(tree, before);
    }

    #[test]
    fn remove_returns_node_and_shifts_left() {
        let mut tree = sample();
        let removed = tree.remove(&[0, 0]).unwrap();
        assert_eq!(removed, Node::link("Mail", "https://mail.example"));
        assert_eq!(tree.resolve(&[0, 0]).map(Node::name), Some("Wiki"));
    }

    #[test]
    fn remove_invalid_path_is_none() {
        let mut tree = sample();
        let before = tree.clone();
        assert!(tree.remove(&[3]).is_none());
        assert!(tree.remove(&[1, 0]).is_none());
        assert!(tree.remove(&[]).is_none());
        assert_eq!(tree, before);
    }

    #[test]
    fn remove_then_insert_restores_tree() {
        let original = sample();
        let cases: &[&[usize]] = &[&[0], &[1], &[2], &[0, 0], &[0, 1]];
        for path in cases {
            let mut tree = original.clone();
            let node = tree.remove(path).unwrap();
            tree.insert(path, node).unwrap();
            assert_eq!(tree, original, "path {:?}", path);
        }
    }

    #[test]
    fn edit_merges_fields() {
        let mut tree = sample();
        tree.edit(&[0, 1], NodeEdit::name("Handbook")).unwrap();
        assert_eq!(
            tree.resolve(&[0, 1]),
            Some(&Node::link("Handbook", "https://wiki.example"))
        );
        let edit = NodeEdit::name_and_url("Guides", "https://guides.example");
        tree.edit(&[1], edit).unwrap();
        assert_eq!(
            tree.resolve(&[1]),
            Some(&Node::link("Guides", "https://guides.example"))
        );
    }

    #[test]
    fn edit_missing_node_fails() {
        let mut tree = sample();
        let err = tree.edit(&[7], NodeEdit::name("x")).unwrap_err();
        assert!(matches!(err, AppError::InvalidPath(_)));
    }

    #[test]
    fn add_child_appends_to_folder() {
        let mut tree = sample();
        let first = Node::link("First", "https://first.example");
        tree.add_child(&[2], first).unwrap();
        tree.add_child(&[2], Node::folder("Second")).unwrap();
        assert_eq!(tree.resolve(&[2, 0]).map(Node::name), Some("First"));
        assert_eq!(tree.resolve(&[2, 1]).map(Node::name), Some("Second"));
    }

    #[test]
    fn add_child_to_link_fails() {
        let mut tree = sample();
        let before = tree.clone();
        let err = tree.add_child(&[1], Node::folder("x")).unwrap_err();
        assert!(err.to_string().contains("not a folder"));
        assert!(tree.add_child(&[8], Node::folder("x")).is_err());
        assert_eq!(tree, before);
    }

    #[test]
    fn add_root_appends_top_level() {
        let mut tree = sample();
        tree.add_root(Node::link("Last", "https://last.example"));
        assert_eq!(tree.resolve(&[3]).map(Node::name), Some("Last"));
    }
}
