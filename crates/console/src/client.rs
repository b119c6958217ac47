//! HTTP client for the catalog API.
//!
//! Wraps the four catalog endpoints using [`reqwest`]. Non-success
//! responses keep the raw body so the console can show the API's own
//! error text.

use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use catalog_core::catalog::Document;

/// Errors from the catalog API client.
#[derive(Debug, thiserror::Error)]
pub enum CatalogApiError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API returned a non-2xx status code.
    #[error("Catalog API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: String,
    },
}

impl CatalogApiError {
    /// Text suitable for showing to an operator: the API's `error` field
    /// when the body carries one, the raw body otherwise.
    pub fn user_message(&self) -> String {
        match self {
            Self::Request(e) => format!("Could not reach the catalog API: {e}"),
            Self::Api { status, body } => {
                let detail = serde_json::from_str::<serde_json::Value>(body)
                    .ok()
                    .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string))
                    .unwrap_or_else(|| body.clone());
                format!("Error {status}: {detail}")
            }
        }
    }
}

/// `POST /upload_file` response.
#[derive(Debug, Deserialize)]
pub struct UploadReceipt {
    pub message: String,
    pub url: String,
}

/// `POST /save_catalog` response.
#[derive(Debug, Deserialize)]
pub struct SaveReceipt {
    pub message: String,
    pub id: String,
}

#[derive(Deserialize)]
struct CatalogList {
    catalogs: Vec<Document>,
}

#[derive(Deserialize)]
struct CatalogEnvelope {
    catalog: Document,
}

/// HTTP client for one catalog API deployment.
#[derive(Clone)]
pub struct CatalogApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl CatalogApiClient {
    /// * `base_url` - API root including the `/api` prefix, e.g.
    ///   `http://localhost:3000/api`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Upload `data` as the blob `filename`.
    pub async fn upload_file(
        &self,
        filename: &str,
        data: Bytes,
    ) -> Result<UploadReceipt, CatalogApiError> {
        let response = self
            .client
            .post(format!("{}/upload_file", self.base_url))
            .query(&[("filename", filename)])
            .body(data)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Create a record. The API refuses ids that already exist.
    pub async fn save_catalog(
        &self,
        record: &serde_json::Value,
    ) -> Result<SaveReceipt, CatalogApiError> {
        let response = self
            .client
            .post(format!("{}/save_catalog", self.base_url))
            .json(record)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    pub async fn list_catalogs(&self) -> Result<Vec<Document>, CatalogApiError> {
        let response = self
            .client
            .get(format!("{}/list_catalogs", self.base_url))
            .send()
            .await?;

        Ok(Self::parse_response::<CatalogList>(response).await?.catalogs)
    }

    pub async fn get_catalog(&self, id: &str) -> Result<Document, CatalogApiError> {
        let response = self
            .client
            .get(format!("{}/get_catalog", self.base_url))
            .query(&[("id", id)])
            .send()
            .await?;

        Ok(Self::parse_response::<CatalogEnvelope>(response).await?.catalog)
    }

    // ---- private helpers ----

    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, CatalogApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(CatalogApiError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    async fn parse_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, CatalogApiError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }
}
