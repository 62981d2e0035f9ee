//! Folder listing, navigation and node actions for the Files view.

use tracing::{info, warn};

use crate::api::ApiClient;
use crate::error::{HrError, Result};
use crate::fs::{Node, NodeAction, normalize_name};

pub(crate) const FETCH_FAILED: &str = "Failed to fetch files";
pub(crate) const CREATE_FAILED: &str = "Failed to create folder";
pub(crate) const DELETE_FAILED: &str = "Failed to delete file";
pub(crate) const RENAME_FAILED: &str = "Failed to rename item";
pub(crate) const NETWORK_ERROR: &str = "Network error";
pub(crate) const ACTION_FAILED: &str = "Action failed";

/// What opening a node did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpenAction {
    /// A folder was entered and listed.
    Navigated,
    /// A file's content is at this URL.
    Url(String),
}

/// Browser state for the Files view.
///
/// The path is the breadcrumb from the root (empty) to the current folder.
/// `files` holds the last successful listing of that folder.
#[derive(Debug, Clone)]
pub struct FileBrowser {
    api: ApiClient,
    path: Vec<Node>,
    files: Vec<Node>,
    search_term: String,
    loading: bool,
    error: Option<String>,
}

impl FileBrowser {
    /// A browser at the root. Nothing is fetched until [`FileBrowser::refresh`].
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            path: Vec::new(),
            files: Vec::new(),
            search_term: String::new(),
            loading: true,
            error: None,
        }
    }

    pub fn path(&self) -> &[Node] {
        &self.path
    }

    /// Id of the folder being shown, `None` at the root.
    pub fn current_folder_id(&self) -> Option<&str> {
        self.path.last().map(|n| n.id.as_str())
    }

    /// Breadcrumb labels, starting with `Home`.
    pub fn breadcrumb(&self) -> Vec<&str> {
        std::iter::once("Home")
            .chain(self.path.iter().map(|n| n.name.as_str()))
            .collect()
    }

    /// Everything in the last listing, unfiltered.
    pub fn files(&self) -> &[Node] {
        &self.files
    }

    /// True until the first listing attempt finishes.
    pub fn loading(&self) -> bool {
        self.loading
    }

    /// The error banner, if one is showing.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn set_search(&mut self, term: &str) {
        self.search_term = term.to_string();
    }

    /// The listing filtered by the search term. Never touches the network.
    pub fn visible_files(&self) -> Vec<&Node> {
        self.files
            .iter()
            .filter(|n| n.matches(&self.search_term))
            .collect()
    }

    /// Fetch the current folder.
    ///
    /// On failure the previous listing stays and the banner is set.
    pub async fn refresh(&mut self) -> Result<()> {
        let result = self.api.list_nodes(self.current_folder_id()).await;
        self.loading = false;
        match result {
            Ok(nodes) => {
                self.files = nodes;
                Ok(())
            }
            Err(e) => Err(self.fail(FETCH_FAILED, e)),
        }
    }

    /// Open a node: enter a folder, or hand back a file's download URL.
    pub async fn open(&mut self, node: &Node) -> Result<OpenAction> {
        node.check(NodeAction::Open)?;
        if node.is_folder() {
            self.path.push(node.clone());
            self.refresh().await?;
            return Ok(OpenAction::Navigated);
        }
        download_url(node).map(OpenAction::Url)
    }

    /// Download URL of a file.
    pub fn download(&self, node: &Node) -> Result<String> {
        node.check(NodeAction::Download)?;
        download_url(node)
    }

    /// Return to the root folder.
    pub async fn go_home(&mut self) -> Result<()> {
        self.path.clear();
        self.refresh().await
    }

    /// Jump to breadcrumb entry `index` (0 is the first folder below Home).
    ///
    /// The path is truncated to `index + 1` entries and listed again. An
    /// index past the end changes nothing and issues no request.
    pub async fn navigate_to(&mut self, index: usize) -> Result<()> {
        if index >= self.path.len() {
            return Ok(());
        }
        self.path.truncate(index + 1);
        self.refresh().await
    }

    /// Create a folder in the current folder, then list it again.
    ///
    /// A missing or blank name is a cancelled prompt: no request, `Ok(None)`.
    pub async fn create_folder(&mut self, name: Option<&str>) -> Result<Option<Node>> {
        let Some(name) = name.filter(|n| !n.trim().is_empty()) else {
            return Ok(None);
        };
        let name = normalize_name(name)?;

        let parent = self.current_folder_id().map(str::to_string);
        let node = match self.api.create_folder(&name, parent.as_deref()).await {
            Ok(node) => node,
            Err(e) => return Err(self.fail(CREATE_FAILED, e)),
        };
        self.refresh().await?;
        Ok(Some(node))
    }

    /// Delete a file after `confirm` agrees, then list the folder again.
    ///
    /// Returns `false` when the user declined; nothing is sent then.
    pub async fn delete<F>(&mut self, node: &Node, confirm: F) -> Result<bool>
    where
        F: FnOnce(&Node) -> bool,
    {
        node.check(NodeAction::Delete)?;
        if !confirm(node) {
            return Ok(false);
        }
        if let Err(e) = self.api.delete_node(&node.id).await {
            // A delete that never reached the server reads "Action failed".
            let banner = if e.is_network() { ACTION_FAILED } else { DELETE_FAILED };
            return Err(self.show(banner, e));
        }
        info!("deleted {}", node.id);
        self.refresh().await?;
        Ok(true)
    }

    /// Rename a node, then list the folder again.
    pub async fn rename(&mut self, node: &Node, new_name: &str) -> Result<Node> {
        node.check(NodeAction::Rename)?;
        let new_name = normalize_name(new_name)?;
        let renamed = match self.api.rename_node(&node.id, &new_name).await {
            Ok(renamed) => renamed,
            Err(e) => return Err(self.fail(RENAME_FAILED, e)),
        };
        self.refresh().await?;
        Ok(renamed)
    }

    /// Show the banner for `err` and hand it back.
    pub(crate) fn fail(&mut self, message: &str, err: HrError) -> HrError {
        let banner = if err.is_network() { NETWORK_ERROR } else { message };
        self.show(banner, err)
    }

    fn show(&mut self, banner: &str, err: HrError) -> HrError {
        warn!("{}: {}", banner, err);
        self.error = Some(banner.to_string());
        err
    }
}

fn download_url(node: &Node) -> Result<String> {
    node.download_url
        .clone()
        .ok_or_else(|| HrError::Custom(format!("No download URL for {}", node.name)))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::{Value, json};

    use super::*;
    use crate::fs::NodeType;
    use crate::http::HttpMethod;
    use crate::http::mock::{MockTransport, reply};

    const BASE: &str = "http://api.test/api/v1";

    fn listing() -> Value {
        json!([
            {"id": "f1", "name": "Scans", "type": "FOLDER", "childrenCount": 2},
            {"id": "x1", "name": "Blood Report.pdf", "type": "FILE",
             "mimeType": "application/pdf", "downloadUrl": "http://files.test/x1"},
            {"id": "x2", "name": "xray-chest.png", "type": "FILE", "mimeType": "image/png"},
            {"id": "x3", "name": "REPORT-2023.txt", "type": "FILE", "mimeType": "text/plain"}
        ])
    }

    fn backend() -> MockTransport {
        MockTransport::new(|req| match req.method {
            HttpMethod::Get => reply(200, listing()),
            HttpMethod::Post => reply(200, json!({"id": "n9", "name": "New", "type": "FOLDER"})),
            HttpMethod::Put => reply(200, json!({"id": "x1", "name": "Renamed.pdf", "type": "FILE"})),
            HttpMethod::Delete => reply(204, Value::Null),
        })
    }

    fn browser(mock: &MockTransport) -> FileBrowser {
        FileBrowser::new(ApiClient::with_transport(BASE, Arc::new(mock.clone())).authorized("t"))
    }

    fn folder(id: &str, name: &str) -> Node {
        Node {
            id: id.into(),
            name: name.into(),
            node_type: NodeType::Folder,
            mime_type: None,
            children_count: None,
            download_url: None,
            parent_id: None,
            owner_id: None,
            created_at: None,
        }
    }

    fn gets(mock: &MockTransport) -> usize {
        mock.count(HttpMethod::Get, &format!("{}/nodes", BASE))
    }

    #[tokio::test]
    async fn test_refresh_lists_root_with_token() {
        let mock = backend();
        let mut b = browser(&mock);
        assert!(b.loading());

        b.refresh().await.unwrap();
        assert!(!b.loading());
        assert_eq!(b.files().len(), 4);

        let req = &mock.requests()[0];
        assert_eq!(req.url, format!("{}/nodes?parentId=", BASE));
        assert_eq!(req.header("Authorization"), Some("Bearer t"));
    }

    #[tokio::test]
    async fn test_search_filters_locally() {
        let mock = backend();
        let mut b = browser(&mock);
        b.refresh().await.unwrap();
        mock.clear();

        b.set_search("rePort");
        let names: Vec<&str> = b.visible_files().iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, ["Blood Report.pdf", "REPORT-2023.txt"]);

        b.set_search("");
        assert_eq!(b.visible_files().len(), 4);
        b.set_search("nothing matches");
        assert!(b.visible_files().is_empty());

        assert!(mock.requests().is_empty());
    }

    #[tokio::test]
    async fn test_navigation_updates_path_and_refetches() {
        let mock = backend();
        let mut b = browser(&mock);

        assert_eq!(b.open(&folder("f1", "Scans")).await.unwrap(), OpenAction::Navigated);
        b.open(&folder("f2", "2023")).await.unwrap();
        assert_eq!(b.breadcrumb(), ["Home", "Scans", "2023"]);
        assert_eq!(b.current_folder_id(), Some("f2"));
        assert!(mock.requests().last().unwrap().url.ends_with("parentId=f2"));

        b.navigate_to(0).await.unwrap();
        assert_eq!(b.breadcrumb(), ["Home", "Scans"]);
        assert!(mock.requests().last().unwrap().url.ends_with("parentId=f1"));

        let before = gets(&mock);
        b.navigate_to(5).await.unwrap();
        assert_eq!(gets(&mock), before);

        b.go_home().await.unwrap();
        assert!(b.path().is_empty());
        assert!(mock.requests().last().unwrap().url.ends_with("parentId="));
    }

    #[tokio::test]
    async fn test_open_file_yields_url() {
        let mock = backend();
        let mut b = browser(&mock);
        b.refresh().await.unwrap();
        mock.clear();

        let report = b.files()[1].clone();
        assert_eq!(
            b.open(&report).await.unwrap(),
            OpenAction::Url("http://files.test/x1".into())
        );
        assert_eq!(b.download(&report).unwrap(), "http://files.test/x1");
        assert!(b.path().is_empty());
        assert!(mock.requests().is_empty());

        assert!(b.download(&folder("f1", "Scans")).is_err());
        let no_url = b.files()[2].clone();
        assert!(b.download(&no_url).is_err());
    }

    #[tokio::test]
    async fn test_confirmed_delete_refetches_once() {
        let mock = backend();
        let mut b = browser(&mock);
        b.refresh().await.unwrap();
        mock.clear();

        let file = b.files()[1].clone();
        assert!(b.delete(&file, |_| true).await.unwrap());
        assert_eq!(mock.count(HttpMethod::Delete, &format!("{}/nodes/x1", BASE)), 1);
        assert_eq!(gets(&mock), 1);

        let requests = mock.requests();
        assert_eq!(requests[0].method, HttpMethod::Delete);
        assert_eq!(requests[1].method, HttpMethod::Get);
    }

    #[tokio::test]
    async fn test_declined_delete_sends_nothing() {
        let mock = backend();
        let mut b = browser(&mock);
        b.refresh().await.unwrap();
        mock.clear();

        let file = b.files()[1].clone();
        assert!(!b.delete(&file, |_| false).await.unwrap());
        assert!(mock.requests().is_empty());
    }

    #[tokio::test]
    async fn test_folders_cannot_be_deleted() {
        let mock = backend();
        let mut b = browser(&mock);
        let err = b.delete(&folder("f1", "Scans"), |_| true).await.unwrap_err();
        assert!(matches!(err, HrError::InvalidAction { .. }));
        assert!(mock.requests().is_empty());
    }

    #[tokio::test]
    async fn test_delete_failure_sets_banner_without_refetch() {
        let mock = MockTransport::new(|req| match req.method {
            HttpMethod::Delete => reply(500, json!({"message": "boom"})),
            _ => reply(200, listing()),
        });
        let mut b = browser(&mock);
        b.refresh().await.unwrap();
        mock.clear();

        let file = b.files()[1].clone();
        assert!(b.delete(&file, |_| true).await.is_err());
        assert_eq!(b.error(), Some(DELETE_FAILED));
        assert_eq!(gets(&mock), 0);
    }

    #[tokio::test]
    async fn test_unreachable_delete_reads_action_failed() {
        let mock = MockTransport::new(|req| match req.method {
            HttpMethod::Delete => Err(HrError::Transport("connection reset".into())),
            _ => reply(200, listing()),
        });
        let mut b = browser(&mock);
        b.refresh().await.unwrap();
        mock.clear();

        let file = b.files()[1].clone();
        assert!(b.delete(&file, |_| true).await.unwrap_err().is_network());
        assert_eq!(b.error(), Some(ACTION_FAILED));
        assert_eq!(gets(&mock), 0);
    }

    #[tokio::test]
    async fn test_create_folder_in_current_folder() {
        let mock = backend();
        let mut b = browser(&mock);
        b.open(&folder("f1", "Scans")).await.unwrap();
        mock.clear();

        let created = b.create_folder(Some("  2024 ")).await.unwrap().unwrap();
        assert_eq!(created.id, "n9");
        assert_eq!(gets(&mock), 1);

        let post = &mock.requests()[0];
        assert_eq!(post.url, format!("{}/nodes/folder", BASE));
        let body: Value = serde_json::from_str(post.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, json!({"name": "2024", "parentId": "f1"}));
    }

    #[tokio::test]
    async fn test_cancelled_prompt_creates_nothing() {
        let mock = backend();
        let mut b = browser(&mock);
        assert_eq!(b.create_folder(None).await.unwrap(), None);
        assert_eq!(b.create_folder(Some("   ")).await.unwrap(), None);
        assert!(mock.requests().is_empty());
    }

    #[tokio::test]
    async fn test_rename_refetches() {
        let mock = backend();
        let mut b = browser(&mock);
        b.refresh().await.unwrap();
        mock.clear();

        let file = b.files()[1].clone();
        let renamed = b.rename(&file, "Renamed.pdf").await.unwrap();
        assert_eq!(renamed.name, "Renamed.pdf");
        assert_eq!(mock.count(HttpMethod::Put, &format!("{}/nodes/x1", BASE)), 1);
        assert_eq!(gets(&mock), 1);
    }

    #[tokio::test]
    async fn test_fetch_failures_set_banners() {
        let mock = MockTransport::new(|_| reply(500, json!({"message": "db down"})));
        let mut b = browser(&mock);
        assert!(b.refresh().await.is_err());
        assert_eq!(b.error(), Some(FETCH_FAILED));
        assert!(!b.loading());

        b.dismiss_error();
        assert_eq!(b.error(), None);

        let mut offline = browser(&MockTransport::offline());
        assert!(offline.refresh().await.unwrap_err().is_network());
        assert_eq!(offline.error(), Some(NETWORK_ERROR));
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_previous_listing() {
        let mock = MockTransport::new(|req| {
            if req.url.ends_with("parentId=") {
                reply(200, listing())
            } else {
                reply(404, json!({"message": "Folder not found"}))
            }
        });
        let mut b = browser(&mock);
        b.refresh().await.unwrap();
        assert!(b.open(&folder("gone", "Gone")).await.is_err());
        assert_eq!(b.files().len(), 4);
        assert_eq!(b.error(), Some(FETCH_FAILED));
    }
}
