//! The signed-in dashboard.
//!
//! Four views share a sidebar: only [`View::Files`] talks to the server,
//! the others are informational. The Files view is a [`FileBrowser`]; the
//! upload and share dialogs open over it.

mod browser;
mod dialogs;

use tracing::info;

pub use browser::{FileBrowser, OpenAction};
pub use dialogs::{ShareDialog, UploadDialog};

use crate::api::ApiClient;
use crate::error::{HrError, Result};
use crate::fs::{Node, ShareResult};
use crate::session::User;

/// Dashboard section selected in the sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Files,
    Hospitals,
    Shared,
    Settings,
}

impl View {
    pub const ALL: [View; 4] = [View::Files, View::Hospitals, View::Shared, View::Settings];

    /// Sidebar label.
    pub fn label(&self) -> &'static str {
        match self {
            View::Files => "My Files",
            View::Hospitals => "Hospitals",
            View::Shared => "Shared",
            View::Settings => "Settings",
        }
    }

    /// Placeholder text for the views that have no data yet.
    pub fn description(&self) -> Option<&'static str> {
        match self {
            View::Files => None,
            View::Hospitals => Some("Browse hospitals and clinics you can share records with"),
            View::Shared => Some("View files shared with you and manage your shared files"),
            View::Settings => Some("Manage your account settings and preferences"),
        }
    }
}

/// Dashboard state for one signed-in user.
#[derive(Debug, Clone)]
pub struct Dashboard {
    api: ApiClient,
    user: User,
    view: View,
    browser: FileBrowser,
    upload: Option<UploadDialog>,
    share: Option<ShareDialog>,
}

impl Dashboard {
    /// Build the dashboard. `api` must already carry the user's token.
    ///
    /// Nothing is fetched until [`Dashboard::enter`].
    pub fn new(api: ApiClient, user: User) -> Self {
        Self {
            browser: FileBrowser::new(api.clone()),
            api,
            user,
            view: View::Files,
            upload: None,
            share: None,
        }
    }

    /// Initial load: list the root folder when the Files view is showing.
    pub async fn enter(&mut self) -> Result<()> {
        if self.view == View::Files {
            self.browser.refresh().await?;
        }
        Ok(())
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn view(&self) -> View {
        self.view
    }

    /// Switch views. Entering Files lists the current folder again.
    pub async fn select_view(&mut self, view: View) -> Result<()> {
        self.view = view;
        if view == View::Files {
            self.browser.refresh().await?;
        }
        Ok(())
    }

    pub fn browser(&self) -> &FileBrowser {
        &self.browser
    }

    pub fn browser_mut(&mut self) -> &mut FileBrowser {
        &mut self.browser
    }

    /// Open the upload dialog for the current folder.
    pub fn open_upload(&mut self) -> &mut UploadDialog {
        let dialog = UploadDialog::new(self.browser.current_folder_id());
        self.upload.insert(dialog)
    }

    pub fn upload_dialog(&mut self) -> Option<&mut UploadDialog> {
        self.upload.as_mut()
    }

    pub fn close_upload(&mut self) {
        self.upload = None;
    }

    /// Send the selected file, close the dialog, and list the folder again.
    pub async fn submit_upload(&mut self) -> Result<Node> {
        let request = self
            .upload
            .as_ref()
            .and_then(UploadDialog::selected)
            .cloned()
            .ok_or_else(|| HrError::Custom("No file selected".to_string()))?;

        let node = match self.api.upload_file(&request).await {
            Ok(node) => node,
            Err(e) => return Err(self.browser.fail(dialogs::UPLOAD_FAILED, e)),
        };
        self.upload = None;
        self.browser.refresh().await?;
        Ok(node)
    }

    /// Open the share dialog for a file.
    pub fn open_share(&mut self, node: &Node) -> Result<&mut ShareDialog> {
        let dialog = ShareDialog::new(node)?;
        Ok(self.share.insert(dialog))
    }

    pub fn share_dialog(&mut self) -> Option<&mut ShareDialog> {
        self.share.as_mut()
    }

    pub fn close_share(&mut self) {
        self.share = None;
    }

    /// Send the share and close the dialog.
    ///
    /// An invalid recipient is returned as [`HrError::Validation`] without a
    /// request; a failed request leaves the dialog open.
    pub async fn submit_share(&mut self) -> Result<ShareResult> {
        let dialog = self
            .share
            .as_ref()
            .ok_or_else(|| HrError::Custom("No file selected for sharing".to_string()))?;
        let request = dialog.request()?;

        let result = match self.api.share_nodes(&request).await {
            Ok(result) => result,
            Err(e) => return Err(self.browser.fail(dialogs::SHARE_FAILED, e)),
        };
        info!("share sent to {}", request.recipient_email);
        self.share = None;
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::{Value, json};

    use super::*;
    use crate::fs::AccessDuration;
    use crate::http::HttpMethod;
    use crate::http::mock::{MockTransport, reply};

    const BASE: &str = "http://api.test/api/v1";

    fn backend() -> MockTransport {
        MockTransport::new(|req| {
            if req.method == HttpMethod::Get {
                return reply(200, json!([
                    {"id": "x1", "name": "report.pdf", "type": "FILE", "mimeType": "application/pdf"},
                    {"id": "f1", "name": "Scans", "type": "FOLDER"}
                ]));
            }
            if req.url.ends_with("/share") {
                return reply(200, json!({"shareLink": "http://app.test/share/abc", "token": "abc"}));
            }
            reply(201, json!({"id": "x9", "name": "scan.png", "type": "FILE", "mimeType": "image/png"}))
        })
    }

    fn dashboard(mock: &MockTransport) -> Dashboard {
        let api = ApiClient::with_transport(BASE, Arc::new(mock.clone())).authorized("t");
        Dashboard::new(api, User {
            id: None,
            email: "a@b.com".into(),
            full_name: "Asha".into(),
        })
    }

    fn gets(mock: &MockTransport) -> usize {
        mock.count(HttpMethod::Get, &format!("{}/nodes", BASE))
    }

    #[tokio::test]
    async fn test_only_files_view_fetches() {
        let mock = backend();
        let mut d = dashboard(&mock);
        d.enter().await.unwrap();
        assert_eq!(gets(&mock), 1);

        for view in [View::Hospitals, View::Shared, View::Settings] {
            d.select_view(view).await.unwrap();
            assert!(view.description().is_some());
        }
        assert_eq!(gets(&mock), 1);

        d.select_view(View::Files).await.unwrap();
        assert_eq!(gets(&mock), 2);
        assert_eq!(View::ALL.map(|v| v.label()), ["My Files", "Hospitals", "Shared", "Settings"]);
    }

    #[tokio::test]
    async fn test_share_flow() {
        let mock = backend();
        let mut d = dashboard(&mock);
        d.enter().await.unwrap();
        mock.clear();

        let file = d.browser().files()[0].clone();
        let dialog = d.open_share(&file).unwrap();
        dialog.email = "dr.rao@clinic.org".into();
        dialog.duration = AccessDuration::OneHour;

        let result = d.submit_share().await.unwrap();
        assert_eq!(result.token.as_deref(), Some("abc"));
        assert!(d.share_dialog().is_none());

        let req = &mock.requests()[0];
        assert_eq!(req.url, format!("{}/share", BASE));
        assert_eq!(req.header("Authorization"), Some("Bearer t"));
        let body: Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(
            body,
            json!({"recipientEmail": "dr.rao@clinic.org", "nodeIds": ["x1"], "accessDuration": "1h"})
        );
    }

    #[tokio::test]
    async fn test_share_validation_sends_nothing() {
        let mock = backend();
        let mut d = dashboard(&mock);
        d.enter().await.unwrap();
        mock.clear();

        let file = d.browser().files()[0].clone();
        d.open_share(&file).unwrap();
        assert!(matches!(d.submit_share().await, Err(HrError::Validation(_))));
        assert!(mock.requests().is_empty());
        assert!(d.share_dialog().is_some());

        let folder = d.browser().files()[1].clone();
        assert!(d.open_share(&folder).is_err());
    }

    #[tokio::test]
    async fn test_share_failure_keeps_dialog() {
        let mock = MockTransport::new(|req| {
            if req.method == HttpMethod::Get {
                reply(200, json!([{"id": "x1", "name": "report.pdf", "type": "FILE"}]))
            } else {
                reply(500, json!({"message": "smtp down"}))
            }
        });
        let mut d = dashboard(&mock);
        d.enter().await.unwrap();

        let file = d.browser().files()[0].clone();
        d.open_share(&file).unwrap().email = "dr.rao@clinic.org".into();
        assert!(d.submit_share().await.is_err());
        assert_eq!(d.browser().error(), Some("Failed to share file"));
        assert!(d.share_dialog().is_some());
    }

    #[tokio::test]
    async fn test_upload_then_refetch() {
        let mock = backend();
        let mut d = dashboard(&mock);
        d.enter().await.unwrap();
        let folder = d.browser().files()[1].clone();
        d.browser_mut().open(&folder).await.unwrap();
        mock.clear();

        d.open_upload().select_name("scan.png", None).unwrap();
        let node = d.submit_upload().await.unwrap();
        assert_eq!(node.id, "x9");
        assert!(d.upload_dialog().is_none());
        assert_eq!(gets(&mock), 1);

        let post = &mock.requests()[0];
        assert_eq!(post.url, format!("{}/nodes/file", BASE));
        let body: Value = serde_json::from_str(post.body.as_deref().unwrap()).unwrap();
        assert_eq!(
            body,
            json!({"parentId": "f1", "name": "scan.png", "mimeType": "image/png"})
        );
    }

    #[tokio::test]
    async fn test_upload_needs_a_file() {
        let mock = backend();
        let mut d = dashboard(&mock);
        d.open_upload();
        assert!(d.submit_upload().await.is_err());
        assert!(mock.requests().is_empty());
        d.close_upload();
        assert!(d.upload_dialog().is_none());
    }

    #[tokio::test]
    async fn test_upload_failure_sets_banner() {
        let mock = MockTransport::offline();
        let mut d = dashboard(&mock);
        d.open_upload().select_name("scan.png", None).unwrap();
        assert!(d.submit_upload().await.unwrap_err().is_network());
        assert_eq!(d.browser().error(), Some("Network error"));
        assert!(d.upload_dialog().is_some());
    }
}
