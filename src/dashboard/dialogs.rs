//! Upload and share dialogs.
//!
//! A dialog only collects input. [`Dashboard`](super::Dashboard) submits it,
//! closes it on success and keeps it open on failure.

use std::path::Path;

use crate::error::Result;
use crate::forms::validate::{is_present, looks_like_email};
use crate::forms::{Field, FieldErrors};
use crate::fs::{AccessDuration, Node, NodeAction, ShareRequest, UploadRequest};

pub(crate) const SHARE_FAILED: &str = "Failed to share file";
pub(crate) const UPLOAD_FAILED: &str = "Failed to upload file";

/// Share dialog for one file.
#[derive(Debug, Clone, PartialEq)]
pub struct ShareDialog {
    node: Node,
    pub email: String,
    pub duration: AccessDuration,
}

impl ShareDialog {
    /// Open the dialog for `node`. Only files can be shared.
    pub fn new(node: &Node) -> Result<Self> {
        node.check(NodeAction::Share)?;
        Ok(Self {
            node: node.clone(),
            email: String::new(),
            duration: AccessDuration::default(),
        })
    }

    /// The file being shared.
    pub fn node(&self) -> &Node {
        &self.node
    }

    /// Validate the recipient and build the request body.
    pub fn request(&self) -> std::result::Result<ShareRequest, FieldErrors> {
        let mut errors = FieldErrors::new();
        if !is_present(&self.email) {
            errors.insert(Field::Email, "Email is required");
        } else if !looks_like_email(self.email.trim()) {
            errors.insert(Field::Email, "Please enter a valid email address");
        }
        errors.into_result()?;
        Ok(ShareRequest::new(
            &self.email,
            vec![self.node.id.clone()],
            self.duration,
        ))
    }
}

/// Upload dialog, bound to the folder that was current when it opened.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UploadDialog {
    parent_id: Option<String>,
    selected: Option<UploadRequest>,
}

impl UploadDialog {
    pub fn new(parent_id: Option<&str>) -> Self {
        Self {
            parent_id: parent_id.map(str::to_string),
            selected: None,
        }
    }

    /// Folder the file will be created in, `None` for the root.
    pub fn parent_id(&self) -> Option<&str> {
        self.parent_id.as_deref()
    }

    /// Pick a file by its local path.
    pub fn select_path<P: AsRef<Path>>(&mut self, path: P) -> Result<&UploadRequest> {
        let request = UploadRequest::from_path(path, self.parent_id())?;
        Ok(&*self.selected.insert(request))
    }

    /// Pick a file by name, with an optional explicit MIME type.
    pub fn select_name(&mut self, name: &str, mime_type: Option<&str>) -> Result<&UploadRequest> {
        let mut request = UploadRequest::new(name, self.parent_id())?;
        if let Some(mime_type) = mime_type {
            request = request.with_mime_type(mime_type);
        }
        Ok(&*self.selected.insert(request))
    }

    /// Attach an opaque file key to the selected file.
    pub fn set_encrypted_file_key(&mut self, key: &str) {
        if let Some(request) = self.selected.take() {
            self.selected = Some(request.with_encrypted_file_key(key));
        }
    }

    pub fn selected(&self) -> Option<&UploadRequest> {
        self.selected.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::NodeType;

    fn node(node_type: NodeType) -> Node {
        Node {
            id: "x1".into(),
            name: "report.pdf".into(),
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
    fn test_share_dialog_builds_request() {
        let mut dialog = ShareDialog::new(&node(NodeType::File)).unwrap();
        assert_eq!(dialog.duration, AccessDuration::OneDay);

        dialog.email = " dr.rao@clinic.org ".into();
        dialog.duration = AccessDuration::OneWeek;
        let request = dialog.request().unwrap();
        assert_eq!(request.recipient_email, "dr.rao@clinic.org");
        assert_eq!(request.node_ids, ["x1"]);
        assert_eq!(request.access_duration, AccessDuration::OneWeek);
    }

    #[test]
    fn test_share_dialog_validates_email() {
        let mut dialog = ShareDialog::new(&node(NodeType::File)).unwrap();
        assert_eq!(
            dialog.request().unwrap_err().get(Field::Email),
            Some("Email is required")
        );
        dialog.email = "nobody".into();
        assert_eq!(
            dialog.request().unwrap_err().get(Field::Email),
            Some("Please enter a valid email address")
        );
    }

    #[test]
    fn test_folders_cannot_be_shared() {
        assert!(ShareDialog::new(&node(NodeType::Folder)).is_err());
    }

    #[test]
    fn test_upload_dialog_selection() {
        let mut dialog = UploadDialog::new(Some("f1"));
        assert!(dialog.selected().is_none());

        let request = dialog.select_path("/home/asha/scans/Chest.PNG").unwrap();
        assert_eq!(request.name, "Chest.PNG");
        assert_eq!(request.mime_type, "image/png");
        assert_eq!(request.parent_id.as_deref(), Some("f1"));

        dialog.set_encrypted_file_key("k1");
        assert_eq!(
            dialog.selected().unwrap().encrypted_file_key.as_deref(),
            Some("k1")
        );

        dialog.select_name("notes", Some("text/markdown")).unwrap();
        assert_eq!(dialog.selected().unwrap().mime_type, "text/markdown");
        assert!(dialog.select_name("  ", None).is_err());
    }
}
