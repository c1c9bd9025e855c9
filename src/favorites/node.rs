use crate::error::{AppError, Result};

/// A named container holding an ordered list of child nodes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Folder {
    pub name: String,
    pub children: Vec<Node>,
}

/// A named leaf holding a URL.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Link {
    pub name: String,
    pub url: String,
}

/// A node in the favorites forest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Folder(Folder),
    Link(Link),
}

impl Node {
    /// Create an empty folder.
    pub fn folder(name: impl Into<String>) -> Self {
        Node::Folder(Folder {
            name: name.into(),
            children: Vec::new(),
        })
    }

    /// Create a folder with the given children.
    pub fn folder_with(name: impl Into<String>, children: Vec<Node>) -> Self {
        Node::Folder(Folder {
            name: name.into(),
            children,
        })
    }

    /// Create a link.
    pub fn link(name: impl Into<String>, url: impl Into<String>) -> Self {
        Node::Link(Link {
            name: name.into(),
            url: url.into(),
        })
    }

    pub fn name(&self) -> &str {
        match self {
            Node::Folder(folder) => &folder.name,
            Node::Link(link) => &link.name,
        }
    }

    /// The link URL, or `None` for folders.
    pub fn url(&self) -> Option<&str> {
        match self {
            Node::Folder(_) => None,
            Node::Link(link) => Some(&link.url),
        }
    }

    pub fn is_folder(&self) -> bool {
        matches!(self, Node::Folder(_))
    }

    /// Children of a folder. Links have none.
    pub fn children(&self) -> Option<&[Node]> {
        match self {
            Node::Folder(folder) => Some(&folder.children),
            Node::Link(_) => None,
        }
    }

    pub fn children_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self {
            Node::Folder(folder) => Some(&mut folder.children),
            Node::Link(_) => None,
        }
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn subtree_len(&self) -> usize {
        1 + self
            .children()
            .map(|children| children.iter().map(Node::subtree_len).sum())
            .unwrap_or(0)
    }

    /// Merge an edit onto this node. Fields left as `None` are unchanged.
    ///
    /// Supplying a URL for a folder is rejected; the node is left untouched.
    pub fn apply_edit(&mut self, edit: NodeEdit) -> Result<()> {
        match self {
            Node::Folder(folder) => {
                if edit.url.is_some() {
                    return Err(AppError::InvalidPath(format!(
                        "\"{}\" is a folder and has no url",
                        folder.name
                    )));
                }
                if let Some(name) = edit.name {
                    folder.name = name;
                }
            }
            Node::Link(link) => {
                if let Some(name) = edit.name {
                    link.name = name;
                }
                if let Some(url) = edit.url {
                    link.url = url;
                }
            }
        }
        Ok(())
    }
}

/// Partial update for an existing node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeEdit {
    pub name: Option<String>,
    pub url: Option<String>,
}

impl NodeEdit {
    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            url: None,
        }
    }

    pub fn name_and_url(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            url: Some(url.into()),
        }
    }
}

/// Validated user input for a new or edited node.
///
/// Both fields are trimmed. The name must be non-empty; a link also needs a
/// non-empty URL. URL syntax is not checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeDraft {
    Folder { name: String },
    Link { name: String, url: String },
}

impl NodeDraft {
    pub fn folder(name: &str) -> Result<Self> {
        Ok(NodeDraft::Folder {
            name: required(name, "Name is required")?,
        })
    }

    pub fn link(name: &str, url: &str) -> Result<Self> {
        Ok(NodeDraft::Link {
            name: required(name, "Name is required")?,
            url: required(url, "URL is required")?,
        })
    }

    /// Build a fresh node; folders start with no children.
    pub fn into_node(self) -> Node {
        match self {
            NodeDraft::Folder { name } => Node::folder(name),
            NodeDraft::Link { name, url } => Node::link(name, url),
        }
    }

    /// Turn the draft into an edit that overwrites every field it carries.
    pub fn into_edit(self) -> NodeEdit {
        match self {
            NodeDraft::Folder { name } => NodeEdit::name(name),
            NodeDraft::Link { name, url } => NodeEdit::name_and_url(name, url),
        }
    }
}

fn required(value: &str, message: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation(message.to_string()));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folder_has_children_link_does_not() {
        let folder = Node::folder("Work");
        let link = Node::link("Mail", "https://mail.example");
        assert_eq!(folder.children(), Some(&[][..]));
        assert!(link.children().is_none());
        assert!(folder.is_folder());
        assert!(!link.is_folder());
    }

    #[test]
    fn url_only_for_links() {
        assert_eq!(Node::folder("a").url(), None);
        assert_eq!(Node::link("a", "https://a").url(), Some("https://a"));
    }

    #[test]
    fn subtree_len_counts_all_descendants() {
        let tree = Node::folder_with(
            "root",
            vec![
                Node::link("a", "https://a"),
                Node::folder_with("inner", vec![Node::link("b", "https://b")]),
            ],
        );
        assert_eq!(tree.subtree_len(), 4);
    }

    #[test]
    fn apply_edit_overwrites_given_fields_only() {
        let mut link = Node::link("Mail", "https://mail.example");
        link.apply_edit(NodeEdit::name("Inbox")).unwrap();
        assert_eq!(link, Node::link("Inbox", "https://mail.example"));

        link.apply_edit(NodeEdit {
            name: None,
            url: Some("https://inbox.example".into()),
        })
        .unwrap();
        assert_eq!(link, Node::link("Inbox", "https://inbox.example"));
    }

    #[test]
    fn apply_edit_keeps_folder_children() {
        let mut folder = Node::folder_with("Work", vec![Node::link("a", "https://a")]);
        folder.apply_edit(NodeEdit::name("Office")).unwrap();
        assert_eq!(folder.name(), "Office");
        assert_eq!(folder.children().map(<[Node]>::len), Some(1));
    }

    #[test]
    fn apply_edit_rejects_url_on_folder() {
        let mut folder = Node::folder("Work");
        let err = folder
            .apply_edit(NodeEdit::name_and_url("Work", "https://x"))
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidPath(_)));
        assert_eq!(folder, Node::folder("Work"));
    }

    #[test]
    fn draft_trims_input() {
        let draft = NodeDraft::link("  Docs ", " https://docs.example  ").unwrap();
        assert_eq!(draft.into_node(), Node::link("Docs", "https://docs.example"));
    }

    #[test]
    fn draft_requires_name() {
        let err = NodeDraft::folder("   ").unwrap_err();
        assert!(matches!(err, AppError::Validation(ref m) if m == "Name is required"));
    }

    #[test]
    fn draft_requires_url_for_links() {
        let err = NodeDraft::link("Docs", "").unwrap_err();
        assert!(matches!(err, AppError::Validation(ref m) if m == "URL is required"));
    }

    #[test]
    fn draft_into_edit_carries_all_fields() {
        let edit = NodeDraft::link("a", "https://a").unwrap().into_edit();
        assert_eq!(edit, NodeEdit::name_and_url("a", "https://a"));
        let edit = NodeDraft::folder("f").unwrap().into_edit();
        assert_eq!(edit, NodeEdit::name("f"));
    }
}
