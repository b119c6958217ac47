//! Blob-store client: single-shot block-blob uploads with SharedKey auth.

use async_trait::async_trait;
use bytes::Bytes;
use chrono::Utc;
use reqwest::header::{AUTHORIZATION, CONTENT_LENGTH, CONTENT_TYPE};

use catalog_core::error::StoreError;
use catalog_core::store::BlobStore;

use crate::connection_string::BlobConnection;
use crate::http::{ensure_success, transport};
use crate::signing::{decode_key, http_date, shared_key_signature, SharedKeyRequest};

/// REST API version sent with every request.
pub const API_VERSION: &str = "2021-08-06";

const OCTET_STREAM: &str = "application/octet-stream";

/// Client for one storage account's blob endpoint.
pub struct AzureBlobStore {
    client: reqwest::Client,
    connection: BlobConnection,
    key: Vec<u8>,
}

impl AzureBlobStore {
    /// Create a client from a `Key=Value;...` connection string.
    pub fn from_connection_string(connection_string: &str) -> Result<Self, StoreError> {
        Self::new(reqwest::Client::new(), connection_string.parse()?)
    }

    pub fn new(client: reqwest::Client, connection: BlobConnection) -> Result<Self, StoreError> {
        let key = decode_key(&connection.account_key)?;
        Ok(Self {
            client,
            connection,
            key,
        })
    }
}

#[async_trait]
impl BlobStore for AzureBlobStore {
    async fn put(&self, container: &str, name: &str, data: Bytes) -> Result<String, StoreError> {
        let url = self.connection.blob_url(container, name)?;
        let date = http_date(Utc::now());
        let content_length = data.len();
        let canonical_resource = format!("/{}{}", self.connection.account_name, url.path());

        let ms_headers = [
            ("x-ms-blob-type", "BlockBlob"),
            ("x-ms-date", date.as_str()),
            ("x-ms-version", API_VERSION),
        ];
        let signature = shared_key_signature(
            &self.key,
            &SharedKeyRequest {
                verb: "PUT",
                content_length,
                content_type: OCTET_STREAM,
                ms_headers: &ms_headers,
                canonical_resource: &canonical_resource,
            },
        );

        let mut request = self
            .client
            .put(url.clone())
            .header(CONTENT_TYPE, OCTET_STREAM)
            .header(CONTENT_LENGTH, content_length)
            .header(
                AUTHORIZATION,
                format!("SharedKey {}:{signature}", self.connection.account_name),
            );
        for (header, value) in ms_headers {
            request = request.header(header, value);
        }

        let response = request.body(data).send().await.map_err(transport)?;
        ensure_success(response).await?;

        tracing::debug!(%url, bytes = content_length, "Uploaded blob");
        Ok(url.to_string())
    }
}
