//! Catalog documents and the presence checks applied to incoming requests.
//!
//! Records travel through the service as schemaless JSON objects
//! ([`Document`]) so that whatever a client saves is stored and returned
//! unchanged. [`CatalogRecord`] is the typed shape used where the fields
//! are known up front (sample data, console rendering).

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{CoreError, StoreError};

/// A catalog document as persisted in the document store.
pub type Document = serde_json::Map<String, Value>;

/// Field holding the document key (also the partition key).
pub const ID_FIELD: &str = "id";

/// Typed catalog record with the enrichment fields written by the seeder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogRecord {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    /// Running time in minutes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
}

impl CatalogRecord {
    /// Convert into the schemaless form accepted by a document store.
    pub fn to_document(&self) -> Result<Document, StoreError> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(other) => Err(StoreError::InvalidDocument(format!(
                "record {} serialized to a non-object: {other}",
                self.id
            ))),
            Err(e) => Err(StoreError::InvalidDocument(e.to_string())),
        }
    }
}

/// Extract the non-empty string `id` of a document.
pub fn document_id(doc: &Document) -> Result<&str, StoreError> {
    match doc.get(ID_FIELD) {
        Some(Value::String(id)) if !id.trim().is_empty() => Ok(id),
        Some(_) => Err(StoreError::InvalidDocument(
            "'id' must be a non-empty string".into(),
        )),
        None => Err(StoreError::InvalidDocument("missing 'id' field".into())),
    }
}

/// Human-readable label for a document: `name`, then `title`, then a placeholder.
pub fn display_label(doc: &Document) -> &str {
    ["name", "title"]
        .iter()
        .find_map(|field| match doc.get(*field) {
            Some(Value::String(s)) if !s.trim().is_empty() => Some(s.as_str()),
            _ => None,
        })
        .unwrap_or("Untitled")
}

/// Require a non-blank request parameter.
///
/// The value is returned as given so that ids saved with surrounding
/// whitespace can still be looked up.
pub fn require_param(name: &str, value: Option<&str>) -> Result<String, CoreError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v.to_string()),
        _ => Err(CoreError::Validation(format!(
            "Parameter '{name}' not provided"
        ))),
    }
}

/// Parse a save request body into a document.
///
/// Rejects an empty body, malformed JSON, anything other than a JSON
/// object, an empty object, and an object without a usable `id`.
pub fn parse_catalog_body(body: &[u8]) -> Result<Document, CoreError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(CoreError::Validation("No catalog data provided".into()));
    }

    let value: Value = serde_json::from_slice(body)
        .map_err(|e| CoreError::Validation(format!("Request body is not valid JSON: {e}")))?;

    let doc = match value {
        Value::Object(map) if !map.is_empty() => map,
        Value::Object(_) | Value::Null => {
            return Err(CoreError::Validation("No catalog data provided".into()))
        }
        _ => {
            return Err(CoreError::Validation(
                "Catalog data must be a JSON object".into(),
            ))
        }
    };

    document_id(&doc).map_err(|e| CoreError::Validation(e.to_string()))?;
    Ok(doc)
}
