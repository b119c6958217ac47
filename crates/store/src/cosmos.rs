//! Document-store client over the SQL-API REST interface.
//!
//! Documents live in `dbs/{database}/colls/{container}` and are partitioned
//! on `/id`, so every single-document call sends the id as its partition key.

use async_trait::async_trait;
use chrono::Utc;
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use url::Url;

use catalog_core::catalog::{document_id, Document};
use catalog_core::error::StoreError;
use catalog_core::store::DocumentStore;

use crate::config::DocumentStoreConfig;
use crate::http::{body_text, ensure_success, transport};
use crate::signing::{decode_key, http_date, master_key_token};

/// REST API version sent with every request.
pub const API_VERSION: &str = "2018-12-31";

const RESOURCE_DOCS: &str = "docs";
const HEADER_DATE: &str = "x-ms-date";
const HEADER_VERSION: &str = "x-ms-version";
const HEADER_PARTITION_KEY: &str = "x-ms-documentdb-partitionkey";
const HEADER_UPSERT: &str = "x-ms-documentdb-is-upsert";
const HEADER_CROSS_PARTITION: &str = "x-ms-documentdb-query-enablecrosspartition";
const HEADER_CONTINUATION: &str = "x-ms-continuation";

/// Properties the service adds to every stored document.
const SYSTEM_PROPERTIES: &[&str] = &["_rid", "_self", "_etag", "_attachments", "_ts"];

/// One page of a read-feed response.
#[derive(Debug, Deserialize)]
struct DocumentFeed {
    #[serde(rename = "Documents", default)]
    documents: Vec<Document>,
}

/// Client for one document collection.
pub struct CosmosDocumentStore {
    client: reqwest::Client,
    endpoint: Url,
    key: Vec<u8>,
    database: String,
    container: String,
}

impl CosmosDocumentStore {
    /// Create a client for the collection named in `config`.
    pub fn new(config: &DocumentStoreConfig) -> Result<Self, StoreError> {
        Self::with_client(reqwest::Client::new(), config)
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(
        client: reqwest::Client,
        config: &DocumentStoreConfig,
    ) -> Result<Self, StoreError> {
        let endpoint = Url::parse(&config.endpoint).map_err(|e| {
            StoreError::Config(format!(
                "invalid document store endpoint '{}': {e}",
                config.endpoint
            ))
        })?;
        if endpoint.cannot_be_a_base() {
            return Err(StoreError::Config(format!(
                "document store endpoint '{}' cannot be a base URL",
                config.endpoint
            )));
        }

        Ok(Self {
            client,
            endpoint,
            key: decode_key(&config.key)?,
            database: config.database.clone(),
            container: config.container.clone(),
        })
    }

    /// `dbs/{database}/colls/{container}`, the link signed for feed operations.
    fn collection_link(&self) -> String {
        format!("dbs/{}/colls/{}", self.database, self.container)
    }

    fn docs_url(&self, id: Option<&str>) -> Url {
        let mut url = self.endpoint.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend([
                    "dbs",
                    self.database.as_str(),
                    "colls",
                    self.container.as_str(),
                    RESOURCE_DOCS,
                ]);
            if let Some(id) = id {
                segments.push(id);
            }
        }
        url
    }

    /// Start a signed request against `url`, authorizing `resource_link`.
    fn signed(&self, method: Method, url: Url, resource_link: &str) -> RequestBuilder {
        let date = http_date(Utc::now());
        let token = master_key_token(
            &self.key,
            method.as_str(),
            RESOURCE_DOCS,
            resource_link,
            &date,
        );
        self.client
            .request(method, url)
            .header(reqwest::header::AUTHORIZATION, token)
            .header(HEADER_DATE, date)
            .header(HEADER_VERSION, API_VERSION)
    }

    async fn write(&self, doc: Document, upsert: bool) -> Result<Document, StoreError> {
        let id = document_id(&doc)?.to_string();

        let mut request = self
            .signed(Method::POST, self.docs_url(None), &self.collection_link())
            .header(HEADER_PARTITION_KEY, partition_key(&id))
            .json(&doc);
        if upsert {
            request = request.header(HEADER_UPSERT, "True");
        }

        let response = request.send().await.map_err(transport)?;
        if response.status() == StatusCode::CONFLICT {
            let body = body_text(response).await;
            return Err(StoreError::Conflict(format!(
                "a document with id '{id}' already exists: {body}"
            )));
        }

        let response = ensure_success(response).await?;
        let stored: Document = response.json().await.map_err(transport)?;
        Ok(strip_system_properties(stored))
    }
}

#[async_trait]
impl DocumentStore for CosmosDocumentStore {
    async fn create(&self, doc: Document) -> Result<Document, StoreError> {
        self.write(doc, false).await
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<Document>, StoreError> {
        let link = format!("{}/{RESOURCE_DOCS}/{id}", self.collection_link());
        let response = self
            .signed(Method::GET, self.docs_url(Some(id)), &link)
            .header(HEADER_PARTITION_KEY, partition_key(id))
            .send()
            .await
            .map_err(transport)?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let response = ensure_success(response).await?;
        let doc: Document = response.json().await.map_err(transport)?;
        Ok(Some(strip_system_properties(doc)))
    }

    async fn list_all(&self) -> Result<Vec<Document>, StoreError> {
        let link = self.collection_link();
        let mut documents = Vec::new();
        let mut continuation: Option<String> = None;

        loop {
            let mut request = self
                .signed(Method::GET, self.docs_url(None), &link)
                .header(HEADER_CROSS_PARTITION, "True");
            if let Some(token) = &continuation {
                request = request.header(HEADER_CONTINUATION, token.as_str());
            }

            let response = ensure_success(request.send().await.map_err(transport)?).await?;
            let next = response
                .headers()
                .get(HEADER_CONTINUATION)
                .and_then(|v| v.to_str().ok())
                .filter(|v| !v.is_empty())
                .map(str::to_string);

            let page: DocumentFeed = response.json().await.map_err(transport)?;
            documents.extend(page.documents.into_iter().map(strip_system_properties));

            match next {
                Some(token) => continuation = Some(token),
                None => break,
            }
        }

        tracing::debug!(count = documents.len(), container = %self.container, "Read document feed");
        Ok(documents)
    }

    async fn upsert(&self, doc: Document) -> Result<Document, StoreError> {
        self.write(doc, true).await
    }
}

/// Partition key header value: a JSON array holding the id.
fn partition_key(id: &str) -> String {
    Value::Array(vec![Value::String(id.to_string())]).to_string()
}

fn strip_system_properties(mut doc: Document) -> Document {
    for property in SYSTEM_PROPERTIES {
        doc.remove(*property);
    }
    doc
}
