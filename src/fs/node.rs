//! Filesystem node types.

use serde::{Deserialize, Serialize};

/// Node type as sent by the nodes API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NodeType {
    /// Regular file
    File,
    /// Folder/directory
    Folder,
}

impl NodeType {
    /// Lower-case noun used in messages.
    pub fn noun(&self) -> &'static str {
        match self {
            NodeType::File => "file",
            NodeType::Folder => "folder",
        }
    }
}

/// Things a user can do to a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeAction {
    Open,
    Download,
    Share,
    Delete,
    Rename,
}

impl NodeAction {
    pub fn verb(&self) -> &'static str {
        match self {
            NodeAction::Open => "open",
            NodeAction::Download => "download",
            NodeAction::Share => "share",
            NodeAction::Delete => "delete",
            NodeAction::Rename => "rename",
        }
    }
}

/// A file or folder record returned by the storage API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    /// Node id (unique identifier)
    pub id: String,
    /// Display name
    pub name: String,
    /// Node type
    #[serde(rename = "type")]
    pub node_type: NodeType,
    /// MIME type, files only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    /// Number of direct children, folders only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children_count: Option<u64>,
    /// Server-provided URL for fetching the file content
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,
    /// Parent folder id, `None` at the root
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<String>,
    /// Creation timestamp as the server formats it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl Node {
    /// Check if this node is a file.
    pub fn is_file(&self) -> bool {
        self.node_type == NodeType::File
    }

    /// Check if this node is a folder.
    pub fn is_folder(&self) -> bool {
        self.node_type == NodeType::Folder
    }

    /// Whether `action` makes sense for this node's type.
    ///
    /// Folders can be opened (navigated into) and renamed; files can be
    /// opened, downloaded, shared, deleted and renamed.
    pub fn allows(&self, action: NodeAction) -> bool {
        match self.node_type {
            NodeType::Folder => matches!(action, NodeAction::Open | NodeAction::Rename),
            NodeType::File => true,
        }
    }

    /// Check `action` against the node type, as an error.
    pub fn check(&self, action: NodeAction) -> crate::Result<()> {
        if self.allows(action) {
            Ok(())
        } else {
            Err(crate::HrError::InvalidAction {
                action: action.verb(),
                kind: self.node_type.noun(),
            })
        }
    }

    /// One-line description shown under the name.
    pub fn summary(&self) -> String {
        match self.node_type {
            NodeType::File => self.mime_type.clone().unwrap_or_default(),
            NodeType::Folder => format!("{} items", self.children_count.unwrap_or(0)),
        }
    }

    /// Case-insensitive substring match on the name.
    pub fn matches(&self, term: &str) -> bool {
        self.name.to_lowercase().contains(&term.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn node(id: &str, name: &str, node_type: NodeType) -> Node {
        Node {
            id: id.to_string(),
            name: name.to_string(),
            node_type,
            mime_type: None,
            children_count: None,
            download_url: None,
            parent_id: None,
            owner_id: None,
            created_at: None,
        }
    }

    #[test]
    fn test_deserialize_api_shape() {
        let raw = json!({
            "id": "66a1",
            "name": "blood-test.pdf",
            "type": "FILE",
            "mimeType": "application/pdf",
            "downloadUrl": "https://cdn.example/blood-test.pdf",
            "ownerId": "u1",
            "storageKey": "u1/abc_blood-test.pdf"
        });
        let n: Node = serde_json::from_value(raw).unwrap();
        assert!(n.is_file());
        assert_eq!(n.mime_type.as_deref(), Some("application/pdf"));
        assert_eq!(
            n.download_url.as_deref(),
            Some("https://cdn.example/blood-test.pdf")
        );
        assert_eq!(n.parent_id, None);

        let folder: Node =
            serde_json::from_value(json!({"id": "f", "name": "Scans", "type": "FOLDER", "childrenCount": 3}))
                .unwrap();
        assert!(folder.is_folder());
        assert_eq!(folder.summary(), "3 items");
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        let res: Result<Node, _> =
            serde_json::from_value(json!({"id": "x", "name": "x", "type": "LINK"}));
        assert!(res.is_err());
    }

    #[test]
    fn test_actions_by_type() {
        let folder = node("f", "Scans", NodeType::Folder);
        let file = node("x", "xray.png", NodeType::File);

        assert!(folder.allows(NodeAction::Open));
        assert!(folder.allows(NodeAction::Rename));
        assert!(!folder.allows(NodeAction::Share));
        assert!(!folder.allows(NodeAction::Delete));
        assert!(!folder.allows(NodeAction::Download));

        for action in [
            NodeAction::Open,
            NodeAction::Download,
            NodeAction::Share,
            NodeAction::Delete,
            NodeAction::Rename,
        ] {
            assert!(file.allows(action));
        }

        let err = folder.check(NodeAction::Delete).unwrap_err();
        assert_eq!(err.to_string(), "Cannot delete a folder");
    }

    #[test]
    fn test_summary_defaults() {
        assert_eq!(node("f", "Empty", NodeType::Folder).summary(), "0 items");
        assert_eq!(node("x", "notes", NodeType::File).summary(), "");
    }

    #[test]
    fn test_name_matching() {
        let n = node("x", "MRI-Report.PDF", NodeType::File);
        assert!(n.matches("report"));
        assert!(n.matches("MRI"));
        assert!(n.matches("pdf"));
        assert!(n.matches(""));
        assert!(!n.matches("ct scan"));
    }
}
