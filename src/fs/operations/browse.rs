//! Folder listing.

use tracing::debug;

use crate::api::ApiClient;
use crate::error::Result;
use crate::fs::node::Node;

impl ApiClient {
    /// List the direct children of a folder.
    ///
    /// # Arguments
    /// * `parent_id` - Folder id, or `None` for the root folder
    ///
    /// # Returns
    /// The nodes in the order the server sent them
    ///
    /// # Example
    /// ```no_run
    /// # use healthrecords::{ApiClient, ClientConfig};
    /// # async fn example() -> healthrecords::Result<()> {
    /// let api = ApiClient::new(&ClientConfig::from_env())?.authorized("token");
    /// for node in api.list_nodes(None).await? {
    ///     println!("{} ({})", node.name, node.summary());
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn list_nodes(&self, parent_id: Option<&str>) -> Result<Vec<Node>> {
        let nodes: Vec<Node> = self
            .get_with_query(&["nodes"], &[("parentId", parent_id.unwrap_or(""))])
            .await?;
        debug!(
            "listed {} nodes under {}",
            nodes.len(),
            parent_id.unwrap_or("<root>")
        );
        Ok(nodes)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use crate::api::ApiClient;
    use crate::error::HrError;
    use crate::fs::NodeType;
    use crate::http::mock::{MockTransport, reply};

    #[tokio::test]
    async fn test_list_root_and_folder() {
        let mock = MockTransport::new(|req| {
            if req.url.ends_with("parentId=") {
                reply(200, json!([
                    {"id": "f1", "name": "Scans", "type": "FOLDER", "childrenCount": 2},
                    {"id": "x1", "name": "notes.txt", "type": "FILE", "mimeType": "text/plain"}
                ]))
            } else {
                reply(200, json!([]))
            }
        });
        let api = ApiClient::with_transport("http://api.test/api/v1", Arc::new(mock.clone()))
            .authorized("t");

        let root = api.list_nodes(None).await.unwrap();
        assert_eq!(root.len(), 2);
        assert_eq!(root[0].node_type, NodeType::Folder);

        let inner = api.list_nodes(Some("f1")).await.unwrap();
        assert!(inner.is_empty());

        let urls: Vec<String> = mock.requests().into_iter().map(|r| r.url).collect();
        assert_eq!(
            urls,
            vec![
                "http://api.test/api/v1/nodes?parentId=".to_string(),
                "http://api.test/api/v1/nodes?parentId=f1".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_list_failure_status() {
        let mock = MockTransport::new(|_| reply(500, json!({})));
        let api = ApiClient::with_transport("http://api.test", Arc::new(mock)).authorized("t");
        assert!(matches!(
            api.list_nodes(None).await,
            Err(HrError::HttpError(500))
        ));
    }
}
