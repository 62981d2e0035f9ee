//! File node creation.

use std::path::Path;

use serde::Serialize;
use tracing::info;

use super::utils::normalize_name;
use crate::api::ApiClient;
use crate::error::{HrError, Result};
use crate::fs::node::Node;

/// Body of `POST /nodes/file`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadRequest {
    pub parent_id: Option<String>,
    pub name: String,
    pub mime_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encrypted_file_key: Option<String>,
}

impl UploadRequest {
    /// Request for a file called `name`, MIME type guessed from the extension.
    pub fn new(name: &str, parent_id: Option<&str>) -> Result<Self> {
        let name = normalize_name(name)?;
        Ok(Self {
            mime_type: mime_guess::from_path(&name)
                .first_or_octet_stream()
                .essence_str()
                .to_string(),
            parent_id: parent_id.map(str::to_string),
            name,
            encrypted_file_key: None,
        })
    }

    /// Request named after the last component of a local path.
    pub fn from_path<P: AsRef<Path>>(path: P, parent_id: Option<&str>) -> Result<Self> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .and_then(|v| v.to_str())
            .ok_or_else(|| HrError::Custom(format!("Not a file path: {}", path.display())))?;
        Self::new(name, parent_id)
    }

    pub fn with_mime_type(mut self, mime_type: &str) -> Self {
        self.mime_type = mime_type.to_string();
        self
    }

    /// Attach a file key that the server stores opaquely.
    pub fn with_encrypted_file_key(mut self, key: &str) -> Self {
        self.encrypted_file_key = Some(key.to_string());
        self
    }
}

impl ApiClient {
    /// Register a file in a folder.
    ///
    /// # Example
    /// ```no_run
    /// # use healthrecords::{ApiClient, ClientConfig, UploadRequest};
    /// # async fn example() -> healthrecords::Result<()> {
    /// let api = ApiClient::new(&ClientConfig::from_env())?.authorized("token");
    /// let req = UploadRequest::from_path("scans/chest-xray.png", None)?;
    /// let node = api.upload_file(&req).await?;
    /// println!("uploaded {} as {}", node.name, node.id);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn upload_file(&self, request: &UploadRequest) -> Result<Node> {
        let body = serde_json::to_value(request)?;
        let node: Node = self.post(&["nodes", "file"], &body).await?;
        info!("uploaded {} ({}) as {}", node.name, request.mime_type, node.id);
        Ok(node)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::{Value, json};

    use super::*;
    use crate::http::mock::{MockTransport, reply};

    #[test]
    fn test_request_from_path() {
        let req = UploadRequest::from_path("/home/me/scans/Chest.PNG", Some("f1")).unwrap();
        assert_eq!(req.name, "Chest.PNG");
        assert_eq!(req.mime_type, "image/png");
        assert_eq!(req.parent_id.as_deref(), Some("f1"));

        assert!(UploadRequest::from_path("/", None).is_err());
    }

    #[test]
    fn test_mime_type_from_extension() {
        let cases = [
            ("chart.svg", "image/svg+xml"),
            ("audio.mp3", "audio/mpeg"),
            ("page.html", "text/html"),
            ("scan.JPEG", "image/jpeg"),
            ("labs.pdf", "application/pdf"),
            ("README", "application/octet-stream"),
        ];
        for (name, mime) in cases {
            assert_eq!(UploadRequest::new(name, None).unwrap().mime_type, mime, "{name}");
        }
    }

    #[test]
    fn test_wire_shape() {
        let req = UploadRequest::new("labs.pdf", None).unwrap();
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({"parentId": null, "name": "labs.pdf", "mimeType": "application/pdf"})
        );

        let keyed = req.with_mime_type("application/x-pdf").with_encrypted_file_key("k==");
        let v = serde_json::to_value(&keyed).unwrap();
        assert_eq!(v["mimeType"], "application/x-pdf");
        assert_eq!(v["encryptedFileKey"], "k==");
    }

    #[tokio::test]
    async fn test_upload_file() {
        let mock = MockTransport::new(|req| {
            let body: Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
            reply(200, json!({
                "id": "x9",
                "name": body["name"],
                "type": "FILE",
                "mimeType": body["mimeType"]
            }))
        });
        let api = ApiClient::with_transport("http://api.test/api/v1", Arc::new(mock.clone()))
            .authorized("t");

        let node = api
            .upload_file(&UploadRequest::new("ecg.csv", Some("f1")).unwrap())
            .await
            .unwrap();
        assert_eq!(node.id, "x9");
        assert_eq!(node.mime_type.as_deref(), Some("text/csv"));
        assert_eq!(mock.requests()[0].url, "http://api.test/api/v1/nodes/file");
    }
}
