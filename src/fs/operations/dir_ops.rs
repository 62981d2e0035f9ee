//! Folder creation, rename and delete.

use serde_json::json;
use tracing::info;

use super::utils::normalize_name;
use crate::api::ApiClient;
use crate::error::Result;
use crate::fs::node::Node;

impl ApiClient {
    /// Create a folder.
    ///
    /// # Arguments
    /// * `name` - Folder name; surrounding whitespace is trimmed
    /// * `parent_id` - Folder to create it in, `None` for the root
    pub async fn create_folder(&self, name: &str, parent_id: Option<&str>) -> Result<Node> {
        let name = normalize_name(name)?;
        let node: Node = self
            .post(
                &["nodes", "folder"],
                &json!({
                    "name": name,
                    "parentId": parent_id,
                }),
            )
            .await?;
        info!("created folder {} ({})", node.name, node.id);
        Ok(node)
    }

    /// Rename a file or folder.
    pub async fn rename_node(&self, node_id: &str, new_name: &str) -> Result<Node> {
        let new_name = normalize_name(new_name)?;
        let node: Node = self
            .put(&["nodes", node_id], &json!({ "name": new_name }))
            .await?;
        info!("renamed node {} to {}", node_id, node.name);
        Ok(node)
    }

    /// Delete a node. The server removes folder contents recursively.
    pub async fn delete_node(&self, node_id: &str) -> Result<()> {
        self.delete(&["nodes", node_id]).await?;
        info!("deleted node {}", node_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::{Value, json};

    use crate::api::ApiClient;
    use crate::error::HrError;
    use crate::http::mock::{MockTransport, reply};
    use crate::http::{HttpMethod, HttpResponse};

    fn api(mock: &MockTransport) -> ApiClient {
        ApiClient::with_transport("http://api.test/api/v1", Arc::new(mock.clone())).authorized("t")
    }

    #[tokio::test]
    async fn test_create_folder_body() {
        let mock = MockTransport::new(|req| {
            let body: Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
            reply(200, json!({"id": "new", "name": body["name"], "type": "FOLDER"}))
        });

        let created = api(&mock).create_folder(" Imaging ", Some("f1")).await.unwrap();
        assert_eq!(created.name, "Imaging");

        let sent = &mock.requests()[0];
        assert_eq!(sent.method, HttpMethod::Post);
        assert_eq!(sent.url, "http://api.test/api/v1/nodes/folder");
        let body: Value = serde_json::from_str(sent.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, json!({"name": "Imaging", "parentId": "f1"}));
    }

    #[tokio::test]
    async fn test_create_folder_at_root_sends_null_parent() {
        let mock = MockTransport::new(|_| reply(200, json!({"id": "n", "name": "A", "type": "FOLDER"})));
        api(&mock).create_folder("A", None).await.unwrap();

        let body: Value =
            serde_json::from_str(mock.requests()[0].body.as_deref().unwrap()).unwrap();
        assert_eq!(body["parentId"], Value::Null);
    }

    #[tokio::test]
    async fn test_create_folder_rejects_blank_name_locally() {
        let mock = MockTransport::offline();
        assert!(api(&mock).create_folder("  ", None).await.is_err());
        assert!(mock.requests().is_empty());
    }

    #[tokio::test]
    async fn test_rename_and_delete() {
        let mock = MockTransport::new(|req| match req.method {
            HttpMethod::Put => reply(200, json!({"id": "x1", "name": "renamed.pdf", "type": "FILE"})),
            HttpMethod::Delete => Ok(HttpResponse {
                status: 204,
                body: String::new(),
            }),
            _ => reply(404, json!({})),
        });
        let api = api(&mock);

        let renamed = api.rename_node("x1", "renamed.pdf").await.unwrap();
        assert_eq!(renamed.name, "renamed.pdf");
        api.delete_node("x1").await.unwrap();

        let sent = mock.requests();
        assert_eq!(sent[0].url, "http://api.test/api/v1/nodes/x1");
        assert_eq!(sent[0].body.as_deref(), Some(r#"{"name":"renamed.pdf"}"#));
        assert_eq!(sent[1].method, HttpMethod::Delete);
        assert_eq!(sent[1].url, "http://api.test/api/v1/nodes/x1");
    }

    #[tokio::test]
    async fn test_node_id_stays_one_path_segment() {
        let mock = MockTransport::new(|req| match req.method {
            HttpMethod::Put => reply(200, json!({"id": "a/b?c#d", "name": "n.pdf", "type": "FILE"})),
            _ => Ok(HttpResponse {
                status: 204,
                body: String::new(),
            }),
        });
        let api = api(&mock);
        api.rename_node("a/b?c#d", "n.pdf").await.unwrap();
        api.delete_node("a/b?c#d").await.unwrap();

        for sent in mock.requests() {
            assert_eq!(sent.url, "http://api.test/api/v1/nodes/a%2Fb%3Fc%23d");
        }
    }

    #[tokio::test]
    async fn test_delete_reports_server_message() {
        let mock = MockTransport::new(|_| reply(400, json!({"message": "Node not found"})));
        match api(&mock).delete_node("gone").await {
            Err(HrError::ApiError { message, .. }) => assert_eq!(message, "Node not found"),
            other => panic!("unexpected: {other:?}"),
        }
    }
}
