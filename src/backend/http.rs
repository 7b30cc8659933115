//! `reqwest` transport for the inference backend.

use async_trait::async_trait;
use greenayu_core::{Payload, RawResponse, Transport, TransportError};
use reqwest::header::ACCEPT;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

use crate::types::{AppError, Result};
use crate::utils::toml_config::BackendConfig;

/// Sends feature payloads to `<base_url><endpoint>`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl HttpTransport {
    /// Builds a transport with its own connection pool.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout.min(Duration::from_secs(10)))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim().trim_end_matches('/').to_string(),
            timeout,
        })
    }

    pub fn from_config(config: &BackendConfig) -> Result<Self> {
        Self::new(config.base_url.clone(), config.timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for an endpoint path.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn classify(&self, err: reqwest::Error) -> TransportError {
        if err.is_timeout() {
            TransportError::Timeout(self.timeout.as_secs())
        } else {
            TransportError::Unreachable(err.to_string())
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, path: &str, payload: Payload) -> std::result::Result<RawResponse, TransportError> {
        let url = self.url(path);
        let request = self.client.post(&url).header(ACCEPT, "application/json");

        let request = match payload {
            Payload::Json(body) => request.json(&body),
            Payload::Multipart { field, upload } => {
                let part = Part::bytes(upload.bytes)
                    .file_name(upload.file_name)
                    .mime_str(&upload.mime_type)
                    .map_err(|e| TransportError::InvalidRequest(format!("invalid upload type: {}", e)))?;
                request.multipart(Form::new().part(field, part))
            }
        };

        debug!(%url, "Sending feature request");
        let response = request.send().await.map_err(|e| {
            warn!(%url, error = %e, "Backend request failed");
            self.classify(e)
        })?;

        let status = response.status().as_u16();
        let body = match response.text().await {
            Ok(text) => text,
            Err(e) if e.is_timeout() => return Err(self.classify(e)),
            Err(e) => {
                warn!(%url, status, error = %e, "Could not read response body");
                String::new()
            }
        };

        debug!(%url, status, bytes = body.len(), "Backend responded");
        Ok(RawResponse::new(status, body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use greenayu_core::{FeatureError, FeatureErrorKind, FeatureKind, ImageUpload};
    use rstest::rstest;

    #[rstest]
    #[case("http://localhost:8000")]
    #[case("http://localhost:8000/")]
    #[case(" http://localhost:8000// ")]
    fn joins_base_and_endpoint(#[case] base: &str) {
        let transport = HttpTransport::new(base, Duration::from_secs(5)).unwrap();
        let endpoint = FeatureKind::ShelfLife.endpoint();
        assert_eq!(transport.url(endpoint), "http://localhost:8000/shelf-life");
        assert_eq!(
            transport.url(endpoint.trim_start_matches('/')),
            "http://localhost:8000/shelf-life"
        );
    }

    #[test]
    fn from_config_uses_backend_section() {
        let config = BackendConfig {
            base_url: "https://api.greenayu.lk/v1/".into(),
            timeout_secs: 7,
        };

        let transport = HttpTransport::from_config(&config).unwrap();

        assert_eq!(transport.base_url(), "https://api.greenayu.lk/v1");
        assert_eq!(transport.url("/plant-part"), "https://api.greenayu.lk/v1/plant-part");
    }

    #[tokio::test]
    async fn refused_connection_is_unreachable() {
        // Bind then drop to get a port nothing listens on.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let transport =
            HttpTransport::new(format!("http://127.0.0.1:{}", port), Duration::from_secs(2)).unwrap();
        let err = transport
            .send("/fertilizer", Payload::Json(serde_json::json!({})))
            .await
            .unwrap_err();

        assert!(matches!(err, TransportError::Unreachable(_)));
    }

    #[tokio::test]
    async fn unparseable_upload_type_is_not_sent() {
        let transport =
            HttpTransport::new("http://127.0.0.1:9", Duration::from_secs(2)).unwrap();
        let payload = Payload::Multipart {
            field: "file",
            upload: ImageUpload::new("leaf.jpg", "not a mime", b"jpeg".to_vec()),
        };

        let err = transport.send("/plant-part", payload).await.unwrap_err();

        assert!(matches!(err, TransportError::InvalidRequest(_)));
        assert_eq!(FeatureError::from(err).kind(), FeatureErrorKind::Validation);
    }
}
